//! Transport trait, ready signal and the SPI transport.
//!
//! A transport moves whole frames over a full-duplex bus and waits for the
//! module's "data ready" line. The interrupt side only ever calls
//! [`ReadySignal::on_signal`]; everything else runs in the single task that
//! owns the module.

use core::future::Future;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;

/// Error type for transport operations.
///
/// The command channel treats every variant the same way: as a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Bus transfer failed.
    Bus,
    /// Transmit and receive buffers differ in length.
    LengthMismatch,
}

/// Frame exchange with one module.
///
/// Implementations own the bus handle and the module's ready latch. Calls
/// never overlap: the owner awaits each one to completion through `&mut self`.
pub trait Transport {
    /// Clock out `tx` while clocking in the same number of bytes into `rx`.
    fn exchange(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
    ) -> impl Future<Output = Result<(), TransportError>>;

    /// Wait up to `timeout_ms` for the module's ready signal.
    ///
    /// Returns `true` if the signal was raised, including before this call.
    /// Consumes the signal.
    ///
    /// A signal raised after an earlier wait timed out stays latched, so the
    /// next wait can return for the previous request. The response check in
    /// the channel rejects the stale answer and the read is retried.
    fn wait_for_signal(&mut self, timeout_ms: u32) -> impl Future<Output = bool>;
}

/// Single-slot latch for the module's interrupt line.
///
/// The interrupt handler raises it with [`on_signal`](Self::on_signal); a
/// raise that happens before anyone waits is kept until consumed, and a
/// second raise before consumption is absorbed into the first.
///
/// # Example
///
/// ```
/// use module_core::ReadySignal;
///
/// static READY: ReadySignal = ReadySignal::new();
///
/// // Interrupt arrives before anyone waits: it is not lost.
/// READY.on_signal();
/// assert!(READY.is_signaled());
/// assert!(READY.try_take());
/// assert!(!READY.try_take());
/// ```
pub struct ReadySignal {
    inner: Signal<CriticalSectionRawMutex, ()>,
}

impl ReadySignal {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Signal::new(),
        }
    }

    /// Latch the signal. Safe to call from interrupt context.
    #[inline]
    pub fn on_signal(&self) {
        self.inner.signal(());
    }

    /// Wait until the signal is latched, then consume it.
    pub async fn wait(&self) {
        self.inner.wait().await;
    }

    /// Consume the signal if it is latched.
    #[inline]
    pub fn try_take(&self) -> bool {
        self.inner.try_take().is_some()
    }

    /// Whether the signal is latched, without consuming it.
    #[inline]
    #[must_use]
    pub fn is_signaled(&self) -> bool {
        self.inner.signaled()
    }

    /// Drop a latched signal.
    #[inline]
    pub fn reset(&self) {
        self.inner.reset();
    }
}

impl Default for ReadySignal {
    fn default() -> Self {
        Self::new()
    }
}

/// [`Transport`] over an `embedded-hal-async` SPI device.
///
/// The device handles chip select. `delay` bounds the wait on `ready`, which
/// the board's interrupt handler raises on the module's falling edge.
pub struct SpiTransport<'a, S, D> {
    spi: S,
    delay: D,
    ready: &'a ReadySignal,
}

impl<'a, S: SpiDevice, D: DelayNs> SpiTransport<'a, S, D> {
    /// Create a new transport from a bound SPI device, a delay and the module's latch.
    #[must_use]
    pub fn new(spi: S, delay: D, ready: &'a ReadySignal) -> Self {
        Self { spi, delay, ready }
    }

    /// Get the ready latch this transport waits on.
    #[must_use]
    pub fn ready(&self) -> &'a ReadySignal {
        self.ready
    }

    /// Decompose the transport into its SPI device and delay.
    pub fn into_parts(self) -> (S, D) {
        (self.spi, self.delay)
    }
}

impl<S: SpiDevice, D: DelayNs> Transport for SpiTransport<'_, S, D> {
    async fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), TransportError> {
        if tx.len() != rx.len() {
            return Err(TransportError::LengthMismatch);
        }
        self.spi
            .transfer(rx, tx)
            .await
            .map_err(|_| TransportError::Bus)
    }

    async fn wait_for_signal(&mut self, timeout_ms: u32) -> bool {
        match select(self.ready.wait(), self.delay.delay_ms(timeout_ms)).await {
            Either::First(()) => true,
            Either::Second(()) => false,
        }
    }
}
