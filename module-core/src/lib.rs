//! Platform-agnostic drivers for SPI-attached display modules.
//!
//! This crate provides the protocol engine and drivers, independent of any
//! board or HAL:
//!
//! - **Transport**: frame exchange plus the module's ready line
//!   - [`Transport`] - the trait a board implements (or uses [`SpiTransport`])
//!   - [`ReadySignal`] - latch raised from the interrupt handler
//!
//! - **Channel**: [`CommandChannel`] writes a value, reads it back and retries
//!   until the module confirms it, within a [`RetryPolicy`]
//!
//! - **Encoder**: [`encoder`] turns numbers, text, times and durations into
//!   seven-segment digits
//!
//! - **Drivers**: [`SevenSegmentDisplay`] and [`CharacterLcd`], bound through
//!   the [`Module`] lifecycle or found with [`discover`]
//!
//! # Errors
//!
//! Bad arguments are rejected with a [`ValueError`] before anything is sent.
//! Bus trouble never is: setters return `Ok(false)` and getters `None` once
//! the retry budget is spent.
//!
//! # Example
//!
//! ```ignore
//! static READY: ReadySignal = ReadySignal::new();
//!
//! // In the interrupt handler / edge task:
//! READY.on_signal();
//!
//! // In the task that owns the module:
//! let transport = SpiTransport::new(spi_device, delay, &READY);
//! let mut display = SevenSegmentDisplay::new(transport);
//! display.set_brightness(0.5).await?;
//! if !display.set_value(-42).await? {
//!     // display content unknown
//! }
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log through defmt (for embedded targets)
//! - **`log`**: Log through the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod channel;
pub mod character_lcd;
pub mod encoder;
pub mod error;
pub mod module;
pub mod seven_segment;
pub mod transport;

#[cfg(test)]
mod testutil;

// Re-export types at crate root for convenience
pub use channel::{ChannelStats, CommandChannel, RetryPolicy, TransactionState};
pub use character_lcd::{CharacterLcd, CustomCharacter};
pub use encoder::{DurationMode, TimeDisplay, TimeDisplayMode};
pub use error::ValueError;
pub use module::{discover, Discovery, Module, ModuleId};
pub use seven_segment::SevenSegmentDisplay;
pub use transport::{ReadySignal, SpiTransport, Transport, TransportError};

// Re-export the wire format so drivers and boards need one dependency
pub use module_proto;
pub use module_proto::character::{CharacterPattern, Color, LineText};
pub use module_proto::{Digit, FrameError};
