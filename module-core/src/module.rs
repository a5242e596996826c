//! Module lifecycle and discovery.
//!
//! A driver is bound to a transport that already talks to the right module
//! and hands it back on release. Locating that transport (which socket, which
//! chip select, which interrupt pin) is the board's business: implement
//! [`Discovery`] there and use [`discover`] to get a bound driver.
//!
//! The interrupt side of the lifecycle is the ready latch:
//! [`ReadySignal::on_signal`](crate::ReadySignal::on_signal) is the only call
//! an interrupt handler makes.

use crate::transport::Transport;

/// 16-byte module type identifier, as reported by the module's socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModuleId(pub [u8; 16]);

impl ModuleId {
    /// Character LCD module.
    pub const CHARACTER_LCD: Self = Self([
        0x80, 0xD9, 0x0E, 0x6C, 0x5F, 0xE6, 0x54, 0x49, 0xB1, 0xAD, 0x9F, 0xEC, 0x61, 0x6C, 0xCB,
        0xF7,
    ]);

    /// Seven-segment display module.
    pub const SEVEN_SEGMENT: Self = Self([
        0x80, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
        0x0F,
    ]);

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

/// A driver for one module type.
pub trait Module<T: Transport>: Sized {
    /// Identifier of the module type this driver speaks to.
    const ID: ModuleId;

    /// Take ownership of a transport connected to a module of type [`Self::ID`].
    fn bind(transport: T) -> Self;

    /// Stop driving the module and give the transport back.
    fn release(self) -> T;
}

/// Finds transports for module types.
pub trait Discovery {
    type Transport: Transport;

    /// A transport to the first unbound module matching `id`, if any.
    fn locate(&mut self, id: &ModuleId) -> Option<Self::Transport>;
}

/// Locate a module of type `M` and bind a driver to it.
pub fn discover<M, D>(discovery: &mut D) -> Option<M>
where
    D: Discovery,
    M: Module<D::Transport>,
{
    let transport = discovery.locate(&M::ID)?;
    debug!("module found, binding");
    Some(M::bind(transport))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testutil::FakeModule;
    use crate::{CharacterLcd, SevenSegmentDisplay};
    use module_proto::{character, segment};
    use std::vec::Vec;

    /// Board with a fixed list of populated sockets.
    struct Sockets {
        populated: Vec<ModuleId>,
        lookups: Vec<ModuleId>,
    }

    impl Discovery for Sockets {
        type Transport = FakeModule<{ segment::FRAME_LEN }>;

        fn locate(&mut self, id: &ModuleId) -> Option<Self::Transport> {
            self.lookups.push(*id);
            let index = self.populated.iter().position(|m| m == id)?;
            self.populated.remove(index);
            Some(FakeModule::new())
        }
    }

    struct LcdSockets;

    impl Discovery for LcdSockets {
        type Transport = FakeModule<{ character::FRAME_LEN }>;

        fn locate(&mut self, id: &ModuleId) -> Option<Self::Transport> {
            (*id == ModuleId::CHARACTER_LCD).then(FakeModule::new)
        }
    }

    #[test]
    fn test_discover_binds_matching_module() {
        let mut sockets = Sockets {
            populated: std::vec![ModuleId::SEVEN_SEGMENT],
            lookups: Vec::new(),
        };

        let display: Option<SevenSegmentDisplay<_>> = discover(&mut sockets);
        assert!(display.is_some());
        assert_eq!(sockets.lookups, std::vec![ModuleId::SEVEN_SEGMENT]);

        // The only module is taken now.
        let again: Option<SevenSegmentDisplay<_>> = discover(&mut sockets);
        assert!(again.is_none());
    }

    #[test]
    fn test_discover_uses_driver_id() {
        let lcd: Option<CharacterLcd<_>> = discover(&mut LcdSockets);
        assert!(lcd.is_some());
        assert_ne!(ModuleId::CHARACTER_LCD, ModuleId::SEVEN_SEGMENT);
    }

    #[test]
    fn test_release_returns_transport() {
        let mut module = FakeModule::<{ segment::FRAME_LEN }>::new();
        module.preload(segment::CODE_COLON, &[1]);

        let display = SevenSegmentDisplay::bind(module);
        let module = display.release();
        assert_eq!(module.stored(segment::CODE_COLON, None).map(|p| p[0]), Some(1));
    }
}
