//! Host test helpers: a blocking executor and a simulated module.

extern crate std;

use crate::transport::{Transport, TransportError};
use core::future::Future;
use core::pin::pin;
use core::ptr;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use module_proto::{command_byte, Direction, Frame, CMD_WRITE, CODE_MASK};
use std::collections::HashMap;
use std::vec::Vec;

/// Drive `future` with a waker that does nothing.
///
/// The fakes complete every call synchronously, so one poll must finish it.
pub fn block_on<F: Future>(future: F) -> F::Output {
    fn clone(_: *const ()) -> RawWaker {
        RawWaker::new(ptr::null(), &NOOP_WAKER)
    }
    fn ignore(_: *const ()) {}
    static NOOP_WAKER: RawWakerVTable = RawWakerVTable::new(clone, ignore, ignore, ignore);

    // SAFETY: every vtable entry ignores the data pointer.
    let waker = unsafe { Waker::from_raw(clone(ptr::null())) };
    let mut future = pin!(future);
    match future.as_mut().poll(&mut Context::from_waker(&waker)) {
        Poll::Ready(output) => output,
        Poll::Pending => panic!("test future stalled on a fake transport"),
    }
}

/// A module on the other end of the bus.
///
/// Stores written payloads per endpoint and answers reads with them. Fault
/// counters make the next N operations misbehave; each counter decrements as
/// it fires.
pub struct FakeModule<const LEN: usize> {
    /// Codes whose first payload byte is a selector.
    selector_codes: Vec<u8>,
    values: HashMap<(u8, Option<u8>), Vec<u8>>,
    pending: Option<[u8; LEN]>,
    signal: bool,

    /// Writes that are acknowledged on the bus but not applied.
    pub ignore_writes: usize,
    /// Endpoint codes whose writes are never applied.
    pub ignored_codes: Vec<u8>,
    /// Read requests that never raise the ready signal.
    pub missing_signals: usize,
    /// Responses with a flipped payload bit and a stale checksum.
    pub corrupt_responses: usize,
    /// Responses echoing the wrong endpoint code.
    pub wrong_command_responses: usize,
    /// Responses echoing the wrong selector.
    pub wrong_selector_responses: usize,
    /// Exchanges that fail on the bus.
    pub bus_errors: usize,

    /// Write frames received, in order.
    pub writes: Vec<[u8; LEN]>,
    /// Read requests received.
    pub reads: usize,
    /// Poll frames received.
    pub polls: usize,
    /// Every call to `exchange`.
    pub exchanges: usize,
}

impl<const LEN: usize> FakeModule<LEN> {
    pub fn new() -> Self {
        Self {
            selector_codes: Vec::new(),
            values: HashMap::new(),
            pending: None,
            signal: false,
            ignore_writes: 0,
            ignored_codes: Vec::new(),
            missing_signals: 0,
            corrupt_responses: 0,
            wrong_command_responses: 0,
            wrong_selector_responses: 0,
            bus_errors: 0,
            writes: Vec::new(),
            reads: 0,
            polls: 0,
            exchanges: 0,
        }
    }

    pub fn with_selector_codes(mut self, codes: &[u8]) -> Self {
        self.selector_codes = codes.to_vec();
        self
    }

    /// Payload stored for an endpoint (selector included), if any.
    pub fn stored(&self, code: u8, selector: Option<u8>) -> Option<&[u8]> {
        self.values.get(&(code, selector)).map(Vec::as_slice)
    }

    /// Preload an endpoint value, as if the module had been written earlier.
    pub fn preload(&mut self, code: u8, payload: &[u8]) {
        let key = self.key(code, payload);
        let mut full = std::vec![0u8; LEN - 3];
        full[..payload.len()].copy_from_slice(payload);
        self.values.insert(key, full);
    }

    fn key(&self, code: u8, payload: &[u8]) -> (u8, Option<u8>) {
        let selector = if self.selector_codes.contains(&code) {
            payload.first().copied()
        } else {
            None
        };
        (code, selector)
    }

    fn take(counter: &mut usize) -> bool {
        if *counter > 0 {
            *counter -= 1;
            true
        } else {
            false
        }
    }

    fn respond(&mut self, code: u8, request: &[u8]) -> [u8; LEN] {
        let key = self.key(code, request);
        let mut payload = self
            .values
            .get(&key)
            .cloned()
            .unwrap_or_else(|| std::vec![0u8; LEN - 3]);
        if let Some(selector) = key.1 {
            payload[0] = selector;
        }

        let mut echoed = code;
        if Self::take(&mut self.wrong_command_responses) {
            echoed = (code + 1) & CODE_MASK;
        }
        if key.1.is_some() && Self::take(&mut self.wrong_selector_responses) {
            payload[0] = payload[0].wrapping_add(1);
        }

        let frame = Frame::<LEN>::encode(Direction::Read, echoed, &payload)
            .expect("fake payload fits");
        let mut bytes = *frame.as_bytes();
        if Self::take(&mut self.corrupt_responses) {
            bytes[2] ^= 0x01;
        }
        bytes
    }
}

impl<const LEN: usize> Transport for FakeModule<LEN> {
    async fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), TransportError> {
        self.exchanges += 1;
        let tx: [u8; LEN] = tx.try_into().expect("frame length");
        let frame = Frame::from_bytes(tx);
        assert!(frame.is_valid(), "host sent a frame with a bad checksum");

        if Self::take(&mut self.bus_errors) {
            return Err(TransportError::Bus);
        }

        let command = frame.command();
        if command == 0 && frame.payload().iter().all(|&b| b == 0) {
            self.polls += 1;
            let reply = self.pending.take().unwrap_or([0u8; LEN]);
            rx.copy_from_slice(&reply);
            return Ok(());
        }

        rx.fill(0);
        let code = command & CODE_MASK;
        if command & CMD_WRITE != 0 {
            self.writes.push(tx);
            if !Self::take(&mut self.ignore_writes) && !self.ignored_codes.contains(&code) {
                let key = self.key(code, frame.payload());
                self.values.insert(key, frame.payload().to_vec());
            }
        } else {
            debug_assert_eq!(command, command_byte(Direction::Read, code));
            self.reads += 1;
            if !Self::take(&mut self.missing_signals) {
                self.pending = Some(self.respond(code, frame.payload()));
                self.signal = true;
            }
        }
        Ok(())
    }

    async fn wait_for_signal(&mut self, _timeout_ms: u32) -> bool {
        core::mem::take(&mut self.signal)
    }
}
