//! Command channel: verified writes and validated reads against one module.
//!
//! # Set
//!
//! ```text
//! for each write attempt (budget: write_attempts):
//!     WRITE frame  --->
//!     get() the same endpoint
//!     read-back == intended value  => success
//! budget exhausted                 => failure
//! ```
//!
//! # Get
//!
//! ```text
//! for each read attempt (budget: read_attempts):
//!     READ frame   --->
//!     wait for the ready signal (signal_timeout_ms)
//!     poll frame   <-->  response
//!     response valid, echoes READ|code (and selector), payload decodes => value
//! budget exhausted => none
//! ```
//!
//! Both loops are bounded and unpaced apart from the signal timeout. Bus
//! errors, timeouts, corrupted responses and mismatched read-backs all count
//! as one failed attempt of the loop they happen in.

use crate::transport::{Transport, TransportError};
use module_proto::{command_byte, Direction, Endpoint, Frame, FrameError, CODE_MASK};

/// Attempt budgets and pacing for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RetryPolicy {
    /// Write-and-verify attempts per set.
    pub write_attempts: u8,
    /// Request/poll attempts per get, including the verification inside a set.
    pub read_attempts: u8,
    /// Wait for the ready signal after each read request.
    pub signal_timeout_ms: u32,
}

impl RetryPolicy {
    pub const DEFAULT: Self = Self {
        write_attempts: 36,
        read_attempts: 4,
        signal_timeout_ms: 3,
    };
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Where the channel is in the current (or last) transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransactionState {
    Idle,
    Sending,
    AwaitingSignal,
    Polling,
    Validating,
    Success,
    /// A write was not confirmed; the next write attempt follows.
    RetryOuter,
    /// A read request got no usable answer; the next read attempt follows.
    RetryInner,
    Failed,
}

/// Running counters for one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelStats {
    /// Write frames sent (outer attempts).
    pub write_attempts: u32,
    /// Read requests sent (inner attempts).
    pub read_attempts: u32,
    pub sets_succeeded: u32,
    pub sets_failed: u32,
    pub gets_failed: u32,
}

/// Write-verify-retry protocol engine for one module.
///
/// Owns the transport and both frame buffers, so a channel serves exactly one
/// caller at a time. `LEN` is the module's frame length.
pub struct CommandChannel<T, const LEN: usize> {
    transport: T,
    policy: RetryPolicy,
    tx: Frame<LEN>,
    rx: [u8; LEN],
    message_id: u8,
    state: TransactionState,
    stats: ChannelStats,
}

impl<T: Transport, const LEN: usize> CommandChannel<T, LEN> {
    /// Create a channel with the default retry policy.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self::with_policy(transport, RetryPolicy::DEFAULT)
    }

    #[must_use]
    pub fn with_policy(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport,
            policy,
            tx: Frame::zeroed(),
            rx: [0; LEN],
            message_id: 0,
            state: TransactionState::Idle,
            stats: ChannelStats::default(),
        }
    }

    /// Write `value` to `endpoint` and verify it by reading it back.
    ///
    /// Returns `Ok(true)` once the module reports the value, `Ok(false)` when
    /// the write budget runs out. A failed set leaves the module's content
    /// unknown, not unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`FrameError`] if the value cannot be framed; nothing is
    /// sent in that case.
    pub async fn set<E: Endpoint>(
        &mut self,
        endpoint: &E,
        value: &E::Value,
    ) -> Result<bool, FrameError> {
        let code = endpoint.code();

        for attempt in 1..=self.policy.write_attempts {
            self.encode_write(endpoint, value)?;
            self.stats.write_attempts += 1;
            self.state = TransactionState::Sending;
            trace!("endpoint {} write attempt {}", code, attempt);

            if self.send().await.is_err() {
                debug!("endpoint {} write failed on the bus", code);
                self.state = TransactionState::RetryOuter;
                continue;
            }

            match self.read(endpoint).await {
                Some(ref reported) if reported == value => {
                    self.state = TransactionState::Success;
                    self.stats.sets_succeeded += 1;
                    return Ok(true);
                }
                Some(_) => debug!("endpoint {} reported a different value", code),
                None => debug!("endpoint {} did not confirm the write", code),
            }
            self.state = TransactionState::RetryOuter;
        }

        warn!(
            "endpoint {} not confirmed after {} writes",
            code,
            self.policy.write_attempts
        );
        self.state = TransactionState::Failed;
        self.stats.sets_failed += 1;
        Ok(false)
    }

    /// Read the value `endpoint` currently reports.
    ///
    /// Returns `None` when the read budget runs out.
    pub async fn get<E: Endpoint>(&mut self, endpoint: &E) -> Option<E::Value> {
        let value = self.read(endpoint).await;
        if value.is_some() {
            self.state = TransactionState::Success;
        } else {
            warn!(
                "endpoint {} did not answer after {} reads",
                endpoint.code(),
                self.policy.read_attempts
            );
            self.state = TransactionState::Failed;
            self.stats.gets_failed += 1;
        }
        value
    }

    /// Next raw-passthrough message id. Wraps after 255.
    pub fn next_message_id(&mut self) -> u8 {
        let id = self.message_id;
        self.message_id = id.wrapping_add(1);
        id
    }

    /// State of the current or most recent transaction.
    #[inline]
    #[must_use]
    pub fn state(&self) -> TransactionState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> &ChannelStats {
        &self.stats
    }

    #[inline]
    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back.
    pub fn release(self) -> T {
        self.transport
    }

    async fn read<E: Endpoint>(&mut self, endpoint: &E) -> Option<E::Value> {
        let code = endpoint.code();

        for attempt in 1..=self.policy.read_attempts {
            self.stats.read_attempts += 1;
            self.state = TransactionState::Sending;
            trace!("endpoint {} read attempt {}", code, attempt);

            self.tx.start(Direction::Read, code);
            if let Some(selector) = endpoint.selector() {
                self.tx.payload_mut()[0] = selector;
            }
            self.tx.seal();
            if self.send().await.is_err() {
                debug!("endpoint {} read request failed on the bus", code);
                self.state = TransactionState::RetryInner;
                continue;
            }

            self.state = TransactionState::AwaitingSignal;
            if !self
                .transport
                .wait_for_signal(self.policy.signal_timeout_ms)
                .await
            {
                debug!("endpoint {} no ready signal", code);
                self.state = TransactionState::RetryInner;
                continue;
            }

            self.state = TransactionState::Polling;
            self.tx = Frame::poll();
            if self.send().await.is_err() {
                debug!("endpoint {} poll failed on the bus", code);
                self.state = TransactionState::RetryInner;
                continue;
            }

            self.state = TransactionState::Validating;
            if let Some(value) = self.validate(endpoint) {
                return Some(value);
            }
            debug!("endpoint {} rejected response", code);
            self.state = TransactionState::RetryInner;
        }

        None
    }

    /// Check the received frame belongs to this read and decode it.
    fn validate<E: Endpoint>(&self, endpoint: &E) -> Option<E::Value> {
        let response = Frame::from_bytes(self.rx);
        if !response.is_valid() {
            return None;
        }
        if response.command() != command_byte(Direction::Read, endpoint.code()) {
            return None;
        }

        let payload = match endpoint.selector() {
            Some(selector) => {
                let (&echoed, rest) = response.payload().split_first()?;
                if echoed != selector {
                    return None;
                }
                rest
            }
            None => response.payload(),
        };
        endpoint.decode_value(payload)
    }

    fn encode_write<E: Endpoint>(&mut self, endpoint: &E, value: &E::Value) -> Result<(), FrameError> {
        let code = endpoint.code();
        if code & !CODE_MASK != 0 {
            return Err(FrameError::InvalidCode);
        }

        self.tx.start(Direction::Write, code);
        let payload = self.tx.payload_mut();
        let offset = match endpoint.selector() {
            Some(selector) => {
                *payload.first_mut().ok_or(FrameError::PayloadTooLong)? = selector;
                1
            }
            None => 0,
        };
        endpoint.encode_value(value, &mut payload[offset..])?;
        self.tx.seal();
        Ok(())
    }

    async fn send(&mut self) -> Result<(), TransportError> {
        self.transport
            .exchange(self.tx.as_bytes(), &mut self.rx)
            .await
    }
}
