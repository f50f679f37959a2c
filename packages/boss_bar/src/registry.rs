//! Session registry boundary.

use std::rc::Rc;

use crate::protocol::{ClientId, DisplayMessage};

/// Access to the host's connection/session layer.
///
/// The bar asks whether a client is connected before every send and only
/// calls [`send`](SessionRegistry::send) for clients that answered yes.
/// Sends are fire-and-forget into the host transport; a registry must not
/// block and has no way to report a failure back.
pub trait SessionRegistry {
    fn is_connected(&self, client: ClientId) -> bool;

    fn send(&self, client: ClientId, message: &DisplayMessage);
}

impl<T: SessionRegistry + ?Sized> SessionRegistry for &T {
    fn is_connected(&self, client: ClientId) -> bool {
        (**self).is_connected(client)
    }

    fn send(&self, client: ClientId, message: &DisplayMessage) {
        (**self).send(client, message)
    }
}

impl<T: SessionRegistry + ?Sized> SessionRegistry for Rc<T> {
    fn is_connected(&self, client: ClientId) -> bool {
        (**self).is_connected(client)
    }

    fn send(&self, client: ClientId, message: &DisplayMessage) {
        (**self).send(client, message)
    }
}
