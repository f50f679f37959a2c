//! Display protocol types.
//!
//! Message variants the bar emits to clients. The wire encoding belongs to
//! the host transport; these types derive serde so hosts that speak JSON can
//! forward them as-is.

use serde::{Deserialize, Serialize};

/// Identifier a bar is known by on clients. Equals the bound entity's id
/// while bound, otherwise a host-minted synthetic id.
pub type BarId = u64;

/// Connected-client identifier, assigned by the host session layer.
pub type ClientId = u64;

/// In-world entity identifier, assigned by the host engine.
pub type EntityId = u64;

/// Fixed display palette defined by the host protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarColor {
    Pink,
    Blue,
    Red,
    Green,
    Yellow,
    #[default]
    Purple,
    White,
}

/// Outbound display notification for a single client.
///
/// `Show` carries the full state; the update variants are minimal diffs.
/// `RemoveEntity` cleans up client-side actor state when a synthetic bar id
/// is abandoned during a rebind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DisplayMessage {
    Show {
        bar_id: BarId,
        full_title: String,
        percentage: f32,
        color: BarColor,
    },
    Hide {
        bar_id: BarId,
    },
    UpdateTitle {
        bar_id: BarId,
        full_title: String,
    },
    UpdateHealth {
        bar_id: BarId,
        percentage: f32,
    },
    RemoveEntity {
        bar_id: BarId,
    },
}

impl DisplayMessage {
    /// The bar id this message refers to.
    pub fn bar_id(&self) -> BarId {
        match self {
            Self::Show { bar_id, .. }
            | Self::Hide { bar_id }
            | Self::UpdateTitle { bar_id, .. }
            | Self::UpdateHealth { bar_id, .. }
            | Self::RemoveEntity { bar_id } => *bar_id,
        }
    }
}
