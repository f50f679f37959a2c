//! Boss bar state for game server plugins.
//!
//! A [`BossBar`] holds the display state of one on-screen bar: title,
//! subtitle, fill percentage and color, plus the set of subscribed clients.
//! Every mutation broadcasts the matching [`DisplayMessage`] to the affected
//! subscribers through a host-provided [`SessionRegistry`], so clients never
//! need to poll. A bar can also be bound to an in-world entity through an
//! [`EntityHost`], taking over that entity's id and health range.
//!
//! [`DiverseBossBar`] layers per-client overrides on top, so individual
//! clients can see their own title, percentage or color while everyone else
//! sees the shared state.
//!
//! Bars are single-threaded by design and expect to live on the host's tick
//! loop; all fan-out happens inline in the mutating call.
//!
//! ```
//! use boss_bar::{BossBar, DisplayMessage, EntityHost, HealthRange, SessionRegistry};
//!
//! struct Stdout;
//!
//! impl SessionRegistry for Stdout {
//!     fn is_connected(&self, _client: u64) -> bool {
//!         true
//!     }
//!     fn send(&self, client: u64, message: &DisplayMessage) {
//!         println!("-> {client}: {message:?}");
//!     }
//! }
//!
//! struct NoEntities;
//!
//! impl EntityHost for NoEntities {
//!     fn health_range(&self, _entity: u64) -> Option<HealthRange> {
//!         None
//!     }
//!     fn is_player(&self, _entity: u64) -> bool {
//!         false
//!     }
//!     fn is_removed(&self, _entity: u64) -> bool {
//!         true
//!     }
//!     fn flag_for_removal(&self, _entity: u64) {}
//!     fn close(&self, _entity: u64) {}
//!     fn mint_bar_id(&self) -> u64 {
//!         1
//!     }
//! }
//!
//! let mut bar = BossBar::new(NoEntities, Stdout);
//! bar.set_title("Ender Dragon");
//! bar.add_subscriber(7);
//! bar.set_percentage(0.42);
//! ```

mod bar;
mod diverse;
mod error;
mod host;
mod protocol;
mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use bar::{Binding, BossBar};
pub use diverse::DiverseBossBar;
pub use error::{BarError, Result};
pub use host::{EntityHost, HealthRange};
pub use protocol::{BarColor, BarId, ClientId, DisplayMessage, EntityId};
pub use registry::SessionRegistry;
