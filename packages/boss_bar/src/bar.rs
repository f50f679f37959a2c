//! Boss bar display state and subscriber bookkeeping.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::error::{BarError, Result};
use crate::host::{EntityHost, HealthRange};
use crate::protocol::{BarColor, BarId, ClientId, DisplayMessage, EntityId};
use crate::registry::SessionRegistry;

/// What the bar's identifier is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Bound to a player-controlled entity. Never flagged for removal when
    /// the bar rebinds away from it.
    Player(EntityId),
    /// Bound to a generic in-world entity.
    Entity(EntityId),
    /// No backing entity; the bar owns a host-minted synthetic id.
    Synthetic(BarId),
}

/// A boss bar: title, subtitle, percentage and color, shown to a set of
/// subscribed clients and re-broadcast to them on every change.
///
/// Every mutator updates the field and fans the matching display message out
/// to the affected subscribers inline before returning; there is no deferred
/// work. Targets that are not connected at call time are skipped silently.
///
/// A bar instance is owned by a single thread (typically the host tick
/// loop). It provides no internal synchronization; a multi-threaded host
/// must guard each instance externally.
pub struct BossBar<H, R> {
    host: H,
    registry: R,
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) color: BarColor,
    pub(crate) range: HealthRange,
    binding: Binding,
    pub(crate) subscribers: BTreeSet<ClientId>,
}

impl<H: EntityHost, R: SessionRegistry> BossBar<H, R> {
    /// A fresh bar with no subscribers: empty title, full percentage,
    /// default color, synthetic id minted from the host.
    ///
    /// Nothing is sent until a client subscribes.
    pub fn new(host: H, registry: R) -> Self {
        let binding = Binding::Synthetic(host.mint_bar_id());
        Self {
            host,
            registry,
            title: String::new(),
            subtitle: String::new(),
            color: BarColor::default(),
            range: HealthRange::default(),
            binding,
            subscribers: BTreeSet::new(),
        }
    }

    /// A fresh bar bound to an existing entity. The entity's id becomes the
    /// bar's id and its health range is copied in.
    pub fn for_entity(host: H, registry: R, entity: EntityId) -> Result<Self> {
        let mut bar = Self::new(host, registry);
        bar.bind_entity(Some(entity))?;
        Ok(bar)
    }

    /// The id clients currently know this bar by.
    pub fn id(&self) -> BarId {
        match self.binding {
            Binding::Player(id) | Binding::Entity(id) => id,
            Binding::Synthetic(id) => id,
        }
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    pub fn subscribers(&self) -> &BTreeSet<ClientId> {
        &self.subscribers
    }

    pub fn is_subscribed(&self, client: ClientId) -> bool {
        self.subscribers.contains(&client)
    }

    /// Subscribe a client and show it the full current state. Idempotent:
    /// an already-subscribed client gets nothing.
    pub fn add_subscriber(&mut self, client: ClientId) {
        if self.subscribers.contains(&client) {
            return;
        }
        let show = self.show_message();
        self.send_to(&[client], &show);
        self.subscribers.insert(client);
    }

    /// Subscribe each client in order. Per-client semantics as
    /// [`add_subscriber`](Self::add_subscriber); no atomicity across the batch.
    pub fn add_subscribers(&mut self, clients: &[ClientId]) {
        for &client in clients {
            self.add_subscriber(client);
        }
    }

    /// Hide the bar from a client and unsubscribe it. Removing a client
    /// that was never subscribed is a debug-logged no-op.
    pub fn remove_subscriber(&mut self, client: ClientId) {
        if !self.subscribers.remove(&client) {
            debug!(client, bar = %self, "removed a client that was not subscribed");
            return;
        }
        self.send_to(&[client], &DisplayMessage::Hide { bar_id: self.id() });
    }

    pub fn remove_subscribers(&mut self, clients: &[ClientId]) {
        for &client in clients {
            self.remove_subscriber(client);
        }
    }

    /// Hide the bar from every subscriber and empty the subscriber set.
    pub fn remove_all_subscribers(&mut self) {
        let all: Vec<ClientId> = self.subscribers.iter().copied().collect();
        self.remove_subscribers(&all);
    }

    /// Text above the bar. May be empty.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.broadcast_title();
    }

    /// Optional text below the bar. May be empty.
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.subtitle = subtitle.into();
        self.broadcast_title();
    }

    /// Title and subtitle combined into the display-ready text: the title
    /// alone when the subtitle is empty, otherwise title, blank line,
    /// subtitle.
    pub fn full_title(&self) -> String {
        if self.subtitle.is_empty() {
            self.title.clone()
        } else {
            format!("{}\n\n{}", self.title, self.subtitle)
        }
    }

    /// Stored percentage as a fraction in `[0, 1]`.
    pub fn percentage(&self) -> f32 {
        self.range.fraction()
    }

    /// Store a percentage, clamped to `[0, 1]` before anything else, and
    /// broadcast the new value.
    pub fn set_percentage(&mut self, percentage: f32) {
        let clamped = percentage.clamp(0.0, 1.0);
        self.range.set_fraction(clamped);
        let update = DisplayMessage::UpdateHealth {
            bar_id: self.id(),
            percentage: clamped,
        };
        self.broadcast(&update);
    }

    pub fn color(&self) -> BarColor {
        self.color
    }

    /// Change the display color. The protocol only carries color inside the
    /// full state message, so this re-sends a full Show rather than a delta.
    pub fn set_color(&mut self, color: BarColor) {
        self.color = color;
        let show = self.show_message();
        self.broadcast(&show);
    }

    /// Hide the bar from the listed clients without unsubscribing them; a
    /// later [`show_to`](Self::show_to) reverses it.
    ///
    /// The list is not checked against the subscriber set, so callers can
    /// address clients that were never subscribed.
    pub fn hide_from(&self, clients: &[ClientId]) {
        self.send_to(clients, &DisplayMessage::Hide { bar_id: self.id() });
    }

    /// Hide the bar from every subscriber, keeping the set intact.
    pub fn hide_from_all(&self) {
        let all: Vec<ClientId> = self.subscribers.iter().copied().collect();
        self.hide_from(&all);
    }

    /// Send the full current state to the listed clients without touching
    /// subscriber-set membership. Reveals a bar hidden via
    /// [`hide_from`](Self::hide_from), or pushes a refresh.
    ///
    /// As with `hide_from`, membership is not checked.
    pub fn show_to(&self, clients: &[ClientId]) {
        let show = self.show_message();
        self.send_to(clients, &show);
    }

    pub fn show_to_all(&self) {
        let all: Vec<ClientId> = self.subscribers.iter().copied().collect();
        self.show_to(&all);
    }

    /// Rebind the bar to an entity, or to a fresh synthetic id when `None`.
    ///
    /// Binding copies the target's id and health range into the bar, so the
    /// displayed percentage resyncs to the entity's current value. The
    /// previous identity is cleaned up first: a live non-player entity is
    /// flagged for removal by the host (unless the new target is a player),
    /// while a synthetic or stale id gets a RemoveEntity broadcast so
    /// clients drop their actor state. Ends by re-sending the full state to
    /// all current subscribers.
    pub fn bind_entity(&mut self, entity: Option<EntityId>) -> Result<()> {
        // Resolve the target fully before touching the old binding, so a
        // failed rebind leaves the bar, the host and the clients untouched.
        let target = match entity {
            Some(target) => {
                if self.host.is_removed(target) {
                    return Err(BarError::InvalidBinding { entity: target });
                }
                let range = self
                    .host
                    .health_range(target)
                    .ok_or(BarError::InvalidBinding { entity: target })?;
                Some((target, range, self.host.is_player(target)))
            }
            None => None,
        };
        let target_is_player = target.as_ref().is_some_and(|(_, _, player)| *player);

        match self.binding {
            // A live player entity is never flagged.
            Binding::Player(old) if self.host.health_range(old).is_some() => {}
            Binding::Entity(old) if self.host.health_range(old).is_some() => {
                if !target_is_player {
                    self.host.flag_for_removal(old);
                }
            }
            Binding::Player(old) | Binding::Entity(old) | Binding::Synthetic(old) => {
                debug!(bar_id = old, "dropping id without a live entity, broadcasting removal");
                self.broadcast(&DisplayMessage::RemoveEntity { bar_id: old });
            }
        }

        self.binding = match target {
            Some((id, range, is_player)) => {
                self.range = range;
                if is_player {
                    Binding::Player(id)
                } else {
                    Binding::Entity(id)
                }
            }
            None => Binding::Synthetic(self.host.mint_bar_id()),
        };

        let show = self.show_message();
        self.broadcast(&show);
        Ok(())
    }

    /// Unbind the bar. With `also_destroy`, the currently bound non-player
    /// entity is closed through the host first.
    pub fn reset_entity(&mut self, also_destroy: bool) -> Result<()> {
        if also_destroy {
            if let Binding::Entity(old) = self.binding {
                if self.host.health_range(old).is_some() {
                    self.host.close(old);
                }
            }
        }
        self.bind_entity(None)
    }

    /// Full state message for the current fields.
    pub(crate) fn show_message(&self) -> DisplayMessage {
        DisplayMessage::Show {
            bar_id: self.id(),
            full_title: self.full_title(),
            percentage: self.percentage(),
            color: self.color,
        }
    }

    /// Send one message to each listed client, skipping any that are not
    /// connected at call time.
    pub(crate) fn send_to(&self, targets: &[ClientId], message: &DisplayMessage) {
        for &client in targets {
            if !self.registry.is_connected(client) {
                continue;
            }
            self.registry.send(client, message);
        }
    }

    /// Send one message to every current subscriber.
    pub(crate) fn broadcast(&self, message: &DisplayMessage) {
        for &client in &self.subscribers {
            if !self.registry.is_connected(client) {
                continue;
            }
            self.registry.send(client, message);
        }
    }

    fn broadcast_title(&self) {
        let update = DisplayMessage::UpdateTitle {
            bar_id: self.id(),
            full_title: self.full_title(),
        };
        self.broadcast(&update);
    }
}

#[cfg(test)]
impl<H, R> BossBar<H, R> {
    pub(crate) fn test_registry(&self) -> &R {
        &self.registry
    }
}

impl<H, R> fmt::Display for BossBar<H, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BossBar id={:?} subscribers={} title={:?} subtitle={:?} percentage={} color={:?}",
            self.binding,
            self.subscribers.len(),
            self.title,
            self.subtitle,
            self.range.fraction(),
            self.color,
        )
    }
}
