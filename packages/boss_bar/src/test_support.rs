//! Recording fakes for the two collaborator traits, shared by test modules.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::host::{EntityHost, HealthRange};
use crate::protocol::{BarId, ClientId, DisplayMessage, EntityId};
use crate::registry::SessionRegistry;

/// Registry fake that records every send and lets tests toggle connectivity.
pub(crate) struct RecordingRegistry {
    connected: RefCell<BTreeSet<ClientId>>,
    sent: RefCell<Vec<(ClientId, DisplayMessage)>>,
}

impl RecordingRegistry {
    pub(crate) fn new() -> Self {
        Self {
            connected: RefCell::new(BTreeSet::new()),
            sent: RefCell::new(Vec::new()),
        }
    }

    /// A registry with the given clients already connected.
    pub(crate) fn with_clients(clients: &[ClientId]) -> Self {
        let registry = Self::new();
        for &client in clients {
            registry.connect(client);
        }
        registry
    }

    pub(crate) fn connect(&self, client: ClientId) {
        self.connected.borrow_mut().insert(client);
    }

    pub(crate) fn disconnect(&self, client: ClientId) {
        self.connected.borrow_mut().remove(&client);
    }

    /// All messages sent so far, in send order.
    pub(crate) fn sent(&self) -> Vec<(ClientId, DisplayMessage)> {
        self.sent.borrow().clone()
    }

    /// Messages sent to one client, in send order.
    pub(crate) fn sent_to(&self, client: ClientId) -> Vec<DisplayMessage> {
        self.sent
            .borrow()
            .iter()
            .filter(|(target, _)| *target == client)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    pub(crate) fn clear_sent(&self) {
        self.sent.borrow_mut().clear();
    }
}

impl SessionRegistry for RecordingRegistry {
    fn is_connected(&self, client: ClientId) -> bool {
        self.connected.borrow().contains(&client)
    }

    fn send(&self, client: ClientId, message: &DisplayMessage) {
        self.sent.borrow_mut().push((client, message.clone()));
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FakeEntity {
    pub(crate) range: HealthRange,
    pub(crate) player: bool,
    pub(crate) flagged: bool,
    pub(crate) closed: bool,
}

/// Entity host fake with a handful of scripted entities.
///
/// Synthetic ids are minted from 1000 upward so tests can tell them apart
/// from entity ids.
pub(crate) struct FakeHost {
    entities: RefCell<BTreeMap<EntityId, FakeEntity>>,
    next_id: AtomicU64,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self {
            entities: RefCell::new(BTreeMap::new()),
            next_id: AtomicU64::new(1000),
        }
    }

    pub(crate) fn spawn_entity(&self, id: EntityId, range: HealthRange) {
        self.entities.borrow_mut().insert(
            id,
            FakeEntity {
                range,
                player: false,
                flagged: false,
                closed: false,
            },
        );
    }

    pub(crate) fn spawn_player(&self, id: EntityId) {
        self.entities.borrow_mut().insert(
            id,
            FakeEntity {
                range: HealthRange::new(0.0, 20.0, 20.0),
                player: true,
                flagged: false,
                closed: false,
            },
        );
    }

    pub(crate) fn is_flagged(&self, id: EntityId) -> bool {
        self.entities
            .borrow()
            .get(&id)
            .is_some_and(|e| e.flagged)
    }

    pub(crate) fn is_closed(&self, id: EntityId) -> bool {
        self.entities
            .borrow()
            .get(&id)
            .is_some_and(|e| e.closed)
    }
}

impl EntityHost for FakeHost {
    fn health_range(&self, entity: EntityId) -> Option<HealthRange> {
        let entities = self.entities.borrow();
        let found = entities.get(&entity)?;
        if found.closed {
            return None;
        }
        Some(found.range.clone())
    }

    fn is_player(&self, entity: EntityId) -> bool {
        self.entities
            .borrow()
            .get(&entity)
            .is_some_and(|e| e.player)
    }

    fn is_removed(&self, entity: EntityId) -> bool {
        match self.entities.borrow().get(&entity) {
            Some(found) => found.flagged || found.closed,
            None => true,
        }
    }

    fn flag_for_removal(&self, entity: EntityId) {
        if let Some(found) = self.entities.borrow_mut().get_mut(&entity) {
            found.flagged = true;
        }
    }

    fn close(&self, entity: EntityId) {
        if let Some(found) = self.entities.borrow_mut().get_mut(&entity) {
            found.closed = true;
        }
    }

    fn mint_bar_id(&self) -> BarId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}
