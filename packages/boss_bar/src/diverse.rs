//! Boss bar variant with per-client overrides layered over shared state.

use std::collections::BTreeMap;

use crate::bar::{Binding, BossBar};
use crate::error::Result;
use crate::host::EntityHost;
use crate::protocol::{BarColor, BarId, ClientId, DisplayMessage, EntityId};
use crate::registry::SessionRegistry;

/// A boss bar whose title, subtitle, percentage and color can each be
/// overridden per client, falling back to the shared value when no
/// override is set.
///
/// Clients with an override keep seeing it across shared-state changes
/// until it is reset. Removing a subscriber drops its overrides.
pub struct DiverseBossBar<H, R> {
    bar: BossBar<H, R>,
    titles: BTreeMap<ClientId, String>,
    subtitles: BTreeMap<ClientId, String>,
    percentages: BTreeMap<ClientId, f32>,
    colors: BTreeMap<ClientId, BarColor>,
}

impl<H: EntityHost, R: SessionRegistry> DiverseBossBar<H, R> {
    pub fn new(host: H, registry: R) -> Self {
        Self {
            bar: BossBar::new(host, registry),
            titles: BTreeMap::new(),
            subtitles: BTreeMap::new(),
            percentages: BTreeMap::new(),
            colors: BTreeMap::new(),
        }
    }

    pub fn for_entity(host: H, registry: R, entity: EntityId) -> Result<Self> {
        let mut diverse = Self::new(host, registry);
        diverse.bar.bind_entity(Some(entity))?;
        Ok(diverse)
    }

    pub fn id(&self) -> BarId {
        self.bar.id()
    }

    pub fn binding(&self) -> Binding {
        self.bar.binding()
    }

    pub fn is_subscribed(&self, client: ClientId) -> bool {
        self.bar.is_subscribed(client)
    }

    pub fn subscribers(&self) -> &std::collections::BTreeSet<ClientId> {
        self.bar.subscribers()
    }

    /// Subscribe a client and show it its personalized state. Idempotent.
    pub fn add_subscriber(&mut self, client: ClientId) {
        if self.bar.subscribers.contains(&client) {
            return;
        }
        let show = self.show_message_for(client);
        self.bar.send_to(&[client], &show);
        self.bar.subscribers.insert(client);
    }

    pub fn add_subscribers(&mut self, clients: &[ClientId]) {
        for &client in clients {
            self.add_subscriber(client);
        }
    }

    /// Unsubscribe a client, dropping its overrides along the way.
    pub fn remove_subscriber(&mut self, client: ClientId) {
        self.drop_overrides(client);
        self.bar.remove_subscriber(client);
    }

    pub fn remove_subscribers(&mut self, clients: &[ClientId]) {
        for &client in clients {
            self.remove_subscriber(client);
        }
    }

    pub fn remove_all_subscribers(&mut self) {
        let all: Vec<ClientId> = self.bar.subscribers.iter().copied().collect();
        self.remove_subscribers(&all);
    }

    /// Shared title, seen by clients without a title override.
    pub fn title(&self) -> &str {
        self.bar.title()
    }

    /// Title as seen by one client.
    pub fn title_for(&self, client: ClientId) -> &str {
        self.titles
            .get(&client)
            .map(String::as_str)
            .unwrap_or(self.bar.title())
    }

    pub fn subtitle(&self) -> &str {
        self.bar.subtitle()
    }

    pub fn subtitle_for(&self, client: ClientId) -> &str {
        self.subtitles
            .get(&client)
            .map(String::as_str)
            .unwrap_or(self.bar.subtitle())
    }

    /// Display-ready text for one client: its title when the effective
    /// subtitle is empty, otherwise title, blank line, subtitle.
    pub fn full_title_for(&self, client: ClientId) -> String {
        let title = self.title_for(client);
        let subtitle = self.subtitle_for(client);
        if subtitle.is_empty() {
            title.to_string()
        } else {
            format!("{title}\n\n{subtitle}")
        }
    }

    /// Change the shared title and refresh every subscriber's text.
    /// Clients with a title override keep seeing it.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.bar.title = title.into();
        self.broadcast_titles();
    }

    /// Override the title for the listed clients and refresh their text.
    pub fn set_title_for(&mut self, clients: &[ClientId], title: impl Into<String>) {
        let title = title.into();
        for &client in clients {
            self.titles.insert(client, title.clone());
        }
        self.send_titles(clients);
    }

    /// Drop the title override for the listed clients, falling them back
    /// to the shared title.
    pub fn reset_title_for(&mut self, clients: &[ClientId]) {
        for client in clients {
            self.titles.remove(client);
        }
        self.send_titles(clients);
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.bar.subtitle = subtitle.into();
        self.broadcast_titles();
    }

    pub fn set_subtitle_for(&mut self, clients: &[ClientId], subtitle: impl Into<String>) {
        let subtitle = subtitle.into();
        for &client in clients {
            self.subtitles.insert(client, subtitle.clone());
        }
        self.send_titles(clients);
    }

    pub fn reset_subtitle_for(&mut self, clients: &[ClientId]) {
        for client in clients {
            self.subtitles.remove(client);
        }
        self.send_titles(clients);
    }

    /// Shared percentage in `[0, 1]`.
    pub fn percentage(&self) -> f32 {
        self.bar.percentage()
    }

    pub fn percentage_for(&self, client: ClientId) -> f32 {
        self.percentages
            .get(&client)
            .copied()
            .unwrap_or_else(|| self.bar.percentage())
    }

    /// Change the shared percentage, clamped to `[0, 1]`, and push each
    /// subscriber its effective value.
    pub fn set_percentage(&mut self, percentage: f32) {
        let clamped = percentage.clamp(0.0, 1.0);
        self.bar.range.set_fraction(clamped);
        let targets: Vec<ClientId> = self.bar.subscribers.iter().copied().collect();
        self.send_percentages(&targets);
    }

    /// Override the percentage for the listed clients, clamped to `[0, 1]`.
    pub fn set_percentage_for(&mut self, clients: &[ClientId], percentage: f32) {
        let clamped = percentage.clamp(0.0, 1.0);
        for &client in clients {
            self.percentages.insert(client, clamped);
        }
        self.send_percentages(clients);
    }

    pub fn reset_percentage_for(&mut self, clients: &[ClientId]) {
        for client in clients {
            self.percentages.remove(client);
        }
        self.send_percentages(clients);
    }

    pub fn color(&self) -> BarColor {
        self.bar.color()
    }

    pub fn color_for(&self, client: ClientId) -> BarColor {
        self.colors
            .get(&client)
            .copied()
            .unwrap_or_else(|| self.bar.color())
    }

    /// Change the shared color and re-send each subscriber's full state.
    pub fn set_color(&mut self, color: BarColor) {
        self.bar.color = color;
        let targets: Vec<ClientId> = self.bar.subscribers.iter().copied().collect();
        self.send_shows(&targets);
    }

    pub fn set_color_for(&mut self, clients: &[ClientId], color: BarColor) {
        for &client in clients {
            self.colors.insert(client, color);
        }
        self.send_shows(clients);
    }

    pub fn reset_color_for(&mut self, clients: &[ClientId]) {
        for client in clients {
            self.colors.remove(client);
        }
        self.send_shows(clients);
    }

    /// Drop every override for the listed clients and re-send their full
    /// state, now matching the shared values.
    pub fn reset_for(&mut self, clients: &[ClientId]) {
        for &client in clients {
            self.drop_overrides(client);
        }
        self.send_shows(clients);
    }

    /// Drop all overrides for all clients and re-send the shared state to
    /// every subscriber.
    pub fn reset_all(&mut self) {
        self.titles.clear();
        self.subtitles.clear();
        self.percentages.clear();
        self.colors.clear();
        let targets: Vec<ClientId> = self.bar.subscribers.iter().copied().collect();
        self.send_shows(&targets);
    }

    pub fn hide_from(&self, clients: &[ClientId]) {
        self.bar.hide_from(clients);
    }

    pub fn hide_from_all(&self) {
        self.bar.hide_from_all();
    }

    /// Send each listed client its personalized full state.
    pub fn show_to(&self, clients: &[ClientId]) {
        self.send_shows(clients);
    }

    pub fn show_to_all(&self) {
        let targets: Vec<ClientId> = self.bar.subscribers.iter().copied().collect();
        self.send_shows(&targets);
    }

    /// Rebind to an entity or back to a synthetic id. Overrides survive a
    /// rebind; the shared percentage resyncs to the new entity.
    pub fn bind_entity(&mut self, entity: Option<EntityId>) -> Result<()> {
        self.bar.bind_entity(entity)
    }

    pub fn reset_entity(&mut self, also_destroy: bool) -> Result<()> {
        self.bar.reset_entity(also_destroy)
    }

    fn show_message_for(&self, client: ClientId) -> DisplayMessage {
        DisplayMessage::Show {
            bar_id: self.bar.id(),
            full_title: self.full_title_for(client),
            percentage: self.percentage_for(client),
            color: self.color_for(client),
        }
    }

    fn drop_overrides(&mut self, client: ClientId) {
        self.titles.remove(&client);
        self.subtitles.remove(&client);
        self.percentages.remove(&client);
        self.colors.remove(&client);
    }

    fn send_shows(&self, clients: &[ClientId]) {
        for &client in clients {
            let show = self.show_message_for(client);
            self.bar.send_to(&[client], &show);
        }
    }

    fn send_titles(&self, clients: &[ClientId]) {
        for &client in clients {
            let update = DisplayMessage::UpdateTitle {
                bar_id: self.bar.id(),
                full_title: self.full_title_for(client),
            };
            self.bar.send_to(&[client], &update);
        }
    }

    fn send_percentages(&self, clients: &[ClientId]) {
        for &client in clients {
            let update = DisplayMessage::UpdateHealth {
                bar_id: self.bar.id(),
                percentage: self.percentage_for(client),
            };
            self.bar.send_to(&[client], &update);
        }
    }

    fn broadcast_titles(&self) {
        let targets: Vec<ClientId> = self.bar.subscribers.iter().copied().collect();
        self.send_titles(&targets);
    }
}
