//! Entity host boundary and the health range a bar mirrors.

use std::rc::Rc;

use crate::protocol::{BarId, EntityId};

/// Access to the host engine's entity registry.
///
/// Injected at construction instead of resolved through a process-wide
/// singleton so tests can substitute a deterministic fake.
pub trait EntityHost {
    /// The entity's current health range, or `None` if the host no longer
    /// tracks it (despawned or closed).
    fn health_range(&self, entity: EntityId) -> Option<HealthRange>;

    /// Whether the entity is a player-controlled client.
    fn is_player(&self, entity: EntityId) -> bool;

    /// Whether the entity is closed or already flagged for removal.
    fn is_removed(&self, entity: EntityId) -> bool;

    /// Ask the host to remove the entity on its next tick.
    fn flag_for_removal(&self, entity: EntityId);

    /// Ask the host to close the entity immediately.
    fn close(&self, entity: EntityId);

    /// Mint a fresh globally-unique id for a bar with no backing entity.
    fn mint_bar_id(&self) -> BarId;
}

impl<T: EntityHost + ?Sized> EntityHost for &T {
    fn health_range(&self, entity: EntityId) -> Option<HealthRange> {
        (**self).health_range(entity)
    }

    fn is_player(&self, entity: EntityId) -> bool {
        (**self).is_player(entity)
    }

    fn is_removed(&self, entity: EntityId) -> bool {
        (**self).is_removed(entity)
    }

    fn flag_for_removal(&self, entity: EntityId) {
        (**self).flag_for_removal(entity)
    }

    fn close(&self, entity: EntityId) {
        (**self).close(entity)
    }

    fn mint_bar_id(&self) -> BarId {
        (**self).mint_bar_id()
    }
}

impl<T: EntityHost + ?Sized> EntityHost for Rc<T> {
    fn health_range(&self, entity: EntityId) -> Option<HealthRange> {
        (**self).health_range(entity)
    }

    fn is_player(&self, entity: EntityId) -> bool {
        (**self).is_player(entity)
    }

    fn is_removed(&self, entity: EntityId) -> bool {
        (**self).is_removed(entity)
    }

    fn flag_for_removal(&self, entity: EntityId) {
        (**self).flag_for_removal(entity)
    }

    fn close(&self, entity: EntityId) {
        (**self).close(entity)
    }

    fn mint_bar_id(&self) -> BarId {
        (**self).mint_bar_id()
    }
}

/// Health-style value range backing a bar's percentage.
///
/// Each bar owns its range. Binding an entity copies the host's range into
/// the bar; the two then evolve independently (no aliasing).
#[derive(Debug, Clone, PartialEq)]
pub struct HealthRange {
    min: f32,
    max: f32,
    default: f32,
    value: f32,
}

impl Default for HealthRange {
    fn default() -> Self {
        Self::new(0.0, 100.0, 100.0)
    }
}

impl HealthRange {
    /// A new range with `value` starting at `default`.
    pub fn new(min: f32, max: f32, default: f32) -> Self {
        Self {
            min,
            max,
            default,
            value: default,
        }
    }

    /// A new range with an explicit starting value.
    pub fn with_value(min: f32, max: f32, default: f32, value: f32) -> Self {
        Self {
            min,
            max,
            default,
            value,
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn default_value(&self) -> f32 {
        self.default
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current value as a fraction of the maximum. Zero when the range is
    /// degenerate (`max <= 0`).
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.value / self.max
        } else {
            0.0
        }
    }

    /// Store `fraction` (already clamped by the caller) as an absolute value.
    pub fn set_fraction(&mut self, fraction: f32) {
        self.value = fraction * self.max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_is_full() {
        let range = HealthRange::default();
        assert_eq!(range.min(), 0.0);
        assert_eq!(range.max(), 100.0);
        assert_eq!(range.value(), 100.0);
        assert_eq!(range.fraction(), 1.0);
    }

    #[test]
    fn fraction_tracks_value() {
        let mut range = HealthRange::new(0.0, 100.0, 100.0);
        range.set_fraction(0.25);
        assert_eq!(range.value(), 25.0);
        assert_eq!(range.fraction(), 0.25);
    }

    #[test]
    fn fraction_of_degenerate_range_is_zero() {
        let range = HealthRange::new(0.0, 0.0, 0.0);
        assert_eq!(range.fraction(), 0.0);
    }

    #[test]
    fn with_value_keeps_partial_health() {
        let range = HealthRange::with_value(0.0, 200.0, 200.0, 50.0);
        assert_eq!(range.fraction(), 0.25);
    }
}
