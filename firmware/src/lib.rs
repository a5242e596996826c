//! RP2040 board support for SPI display modules.
//!
//! This crate wires the platform-agnostic drivers to the RP2040: modules share
//! one SPI bus, each with its own chip select and ready line.

#![no_std]

// Re-export core types for convenience
pub use module_core::{
    discover, encoder, CharacterLcd, CharacterPattern, Color, CommandChannel, CustomCharacter,
    Digit, Discovery, DurationMode, Module, ModuleId, ReadySignal, RetryPolicy,
    SevenSegmentDisplay, SpiTransport, TimeDisplayMode, Transport, ValueError,
};

pub mod socket;

pub use socket::{Socket, Sockets};
