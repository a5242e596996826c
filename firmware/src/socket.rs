//! Fixed socket table for boards with soldered-in modules.

use module_core::{Discovery, ModuleId, Transport};

/// One module position: the module type fitted there and its transport.
pub struct Socket<T> {
    id: ModuleId,
    transport: Option<T>,
}

impl<T> Socket<T> {
    #[must_use]
    pub const fn new(id: ModuleId, transport: T) -> Self {
        Self {
            id,
            transport: Some(transport),
        }
    }

    /// Module type fitted in this socket.
    #[must_use]
    pub const fn id(&self) -> &ModuleId {
        &self.id
    }

    /// Whether a driver has taken the transport.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.transport.is_none()
    }
}

/// All sockets of a board. Each transport is handed out once.
pub struct Sockets<T, const N: usize> {
    sockets: [Socket<T>; N],
}

impl<T, const N: usize> Sockets<T, N> {
    #[must_use]
    pub const fn new(sockets: [Socket<T>; N]) -> Self {
        Self { sockets }
    }

    /// Number of sockets whose module is not bound yet.
    #[must_use]
    pub fn unbound(&self) -> usize {
        self.sockets.iter().filter(|s| !s.is_bound()).count()
    }
}

impl<T: Transport, const N: usize> Discovery for Sockets<T, N> {
    type Transport = T;

    fn locate(&mut self, id: &ModuleId) -> Option<T> {
        self.sockets
            .iter_mut()
            .filter(|socket| socket.id == *id)
            .find_map(|socket| socket.transport.take())
    }
}
