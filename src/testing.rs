//! Testing utilities and mock implementations
//!
//! This module provides mock hardware for testing the streaming driver
//! on the host without converter or DMA access.
//!
//! The central piece is [`MockTransferEngine`], which does not stub the
//! descriptor away but *interprets* it: each simulated trigger pulse
//! moves one element between the descriptor's addresses, honoring
//! strides, loop counters, the wrap adjustment, and the
//! interrupt-request re-arm rule. Tests therefore exercise the same
//! descriptor semantics real hardware would.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::dma::{TransferDescriptor, TransferEngine};
use crate::driver::config::Reference;
use crate::driver::error::ConfigResult;
use crate::driver::interrupt::Boundary;
use crate::hal::converter::{CalibrationStatus, Converter};
use crate::hal::trigger::PeriodicTrigger;
use crate::internal::constants::{CALIBRATION_POLL_BUDGET, CALIBRATION_POLL_INTERVAL_US};

// =============================================================================
// Mock Transfer Engine
// =============================================================================

#[derive(Debug, Default)]
struct EngineState {
    descriptor: Option<TransferDescriptor>,
    enabled: bool,
    pending: Option<Boundary>,
    acknowledged: Vec<Boundary>,
    /// Current source address (hardware-owned once enabled)
    src: usize,
    /// Current destination address (hardware-owned once enabled)
    dst: usize,
    /// Current major loop count (CITER mirror)
    citer: usize,
    pulses: usize,
    stalled: usize,
}

/// Software model of the trigger-gated transfer engine.
///
/// Owned by the stream under test; keep a [`MockEngineHandle`] (from
/// [`handle`](Self::handle)) to play the hardware role from the test
/// body.
///
/// # Example
///
/// ```ignore
/// let engine = MockTransferEngine::new();
/// let hw = engine.handle();
/// let mut stream: SampleStream<u16, _, _, 8> = SampleStream::new(engine, trigger);
/// // ... init/start ...
/// hw.pulse(); // one trigger period elapses
/// ```
#[derive(Debug, Default)]
pub struct MockTransferEngine {
    state: Rc<RefCell<EngineState>>,
}

/// Test-side handle playing the hardware role for a [`MockTransferEngine`].
#[derive(Debug, Clone)]
pub struct MockEngineHandle {
    state: Rc<RefCell<EngineState>>,
}

impl MockTransferEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle sharing this engine's state, for driving pulses and
    /// inspecting it after the engine moved into the stream.
    pub fn handle(&self) -> MockEngineHandle {
        MockEngineHandle {
            state: Rc::clone(&self.state),
        }
    }
}

impl TransferEngine for MockTransferEngine {
    fn configure(&mut self, descriptor: &TransferDescriptor) -> ConfigResult<()> {
        descriptor.validate()?;
        let mut st = self.state.borrow_mut();
        st.descriptor = Some(*descriptor);
        st.src = descriptor.source_addr;
        st.dst = descriptor.dest_addr;
        st.citer = descriptor.major_loop_count;
        st.pending = None;
        Ok(())
    }

    fn enable(&mut self) {
        self.state.borrow_mut().enabled = true;
    }

    fn disable(&mut self) {
        self.state.borrow_mut().enabled = false;
    }

    fn acknowledge(&mut self, boundary: Boundary) {
        let mut st = self.state.borrow_mut();
        st.pending = None;
        st.acknowledged.push(boundary);
    }
}

impl MockEngineHandle {
    /// Simulate one trigger pulse: move one element per the descriptor.
    ///
    /// Returns `false` without moving data when the engine is disabled
    /// or a pending boundary was never acknowledged (the request line
    /// has not re-armed).
    pub fn pulse(&self) -> bool {
        let mut st = self.state.borrow_mut();
        if !st.enabled {
            return false;
        }
        if st.pending.is_some() {
            st.stalled += 1;
            return false;
        }
        let Some(d) = st.descriptor else {
            return false;
        };

        // SAFETY: test code guarantees the descriptor's addresses point
        // at live, disjoint storage (the stream's buffer and a local
        // peripheral register variable).
        unsafe {
            core::ptr::copy_nonoverlapping(st.src as *const u8, st.dst as *mut u8, d.element_size);
        }
        st.src = (st.src as isize + d.source_stride) as usize;
        st.dst = (st.dst as isize + d.dest_stride) as usize;
        st.citer -= 1;
        st.pulses += 1;

        if st.citer == d.major_loop_count / 2 && d.interrupt_at_half {
            st.pending = Some(Boundary::Half);
        }
        if st.citer == 0 {
            // Major completion: wrap the traversing side back to base
            // and reload the loop counter.
            if d.is_memory_to_peripheral() {
                st.src = (st.src as isize + d.wrap_adjustment) as usize;
            } else {
                st.dst = (st.dst as isize + d.wrap_adjustment) as usize;
            }
            st.citer = d.major_loop_count;
            if d.interrupt_at_major {
                st.pending = Some(Boundary::Major);
            }
        }
        true
    }

    /// The boundary request currently awaiting acknowledgment.
    pub fn pending(&self) -> Option<Boundary> {
        self.state.borrow().pending
    }

    /// Descriptor the engine was configured with.
    pub fn configured(&self) -> Option<TransferDescriptor> {
        self.state.borrow().descriptor
    }

    /// Whether the engine is enabled.
    pub fn enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    /// Elements moved so far.
    pub fn pulses(&self) -> usize {
        self.state.borrow().pulses
    }

    /// Pulses dropped because the request line was not re-armed.
    pub fn stalled_pulses(&self) -> usize {
        self.state.borrow().stalled
    }

    /// Boundaries acknowledged so far, in order.
    pub fn acknowledged(&self) -> Vec<Boundary> {
        self.state.borrow().acknowledged.clone()
    }

    /// Current traversal address of the side that moves through memory.
    pub fn traversing_addr(&self) -> usize {
        let st = self.state.borrow();
        match st.descriptor {
            Some(d) if d.is_memory_to_peripheral() => st.src,
            Some(_) => st.dst,
            None => 0,
        }
    }
}

// =============================================================================
// Mock Periodic Trigger
// =============================================================================

#[derive(Debug, Default)]
struct TriggerState {
    period: Option<u32>,
    running: bool,
    starts: usize,
    stops: usize,
}

/// Mock periodic timer recording period and start/stop calls.
#[derive(Debug, Default)]
pub struct MockTrigger {
    state: Rc<RefCell<TriggerState>>,
}

/// Test-side handle for inspecting a [`MockTrigger`].
#[derive(Debug, Clone)]
pub struct MockTriggerHandle {
    state: Rc<RefCell<TriggerState>>,
}

impl MockTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> MockTriggerHandle {
        MockTriggerHandle {
            state: Rc::clone(&self.state),
        }
    }
}

impl PeriodicTrigger for MockTrigger {
    fn set_period(&mut self, ticks: u32) {
        self.state.borrow_mut().period = Some(ticks);
    }

    fn start(&mut self) {
        let mut st = self.state.borrow_mut();
        st.running = true;
        st.starts += 1;
    }

    fn stop(&mut self) {
        let mut st = self.state.borrow_mut();
        st.running = false;
        st.stops += 1;
    }
}

impl MockTriggerHandle {
    pub fn period(&self) -> Option<u32> {
        self.state.borrow().period
    }

    pub fn running(&self) -> bool {
        self.state.borrow().running
    }

    pub fn starts(&self) -> usize {
        self.state.borrow().starts
    }

    pub fn stops(&self) -> usize {
        self.state.borrow().stops
    }
}

// =============================================================================
// Mock Converter
// =============================================================================

/// Mock data peripheral recording its bring-up sequence.
///
/// Calibration runs the real bounded-polling shape: it consumes delay
/// budget until the configured completion point, or reports a timeout
/// when the budget is exhausted first.
#[derive(Debug)]
pub struct MockConverter {
    pub selected_channel: Option<u8>,
    pub reference: Option<Reference>,
    pub enabled: bool,
    pub dma_request_enabled: bool,
    pub calibrate_calls: usize,
    pub data_addr: usize,
    /// Poll iterations before calibration completes
    completes_after: u32,
    outcome: CalibrationStatus,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// A converter that calibrates successfully after a few polls.
    pub fn new() -> Self {
        Self {
            selected_channel: None,
            reference: None,
            enabled: false,
            dma_request_enabled: false,
            calibrate_calls: 0,
            data_addr: 0,
            completes_after: 3,
            outcome: CalibrationStatus::Success,
        }
    }

    /// A converter with a fixed calibration outcome. `TimedOut` is
    /// modeled by never completing, so the poll budget runs out.
    pub fn with_outcome(outcome: CalibrationStatus) -> Self {
        let mut converter = Self::new();
        match outcome {
            CalibrationStatus::TimedOut => converter.completes_after = u32::MAX,
            _ => converter.outcome = outcome,
        }
        converter
    }
}

impl Converter for MockConverter {
    fn select_channel(&mut self, id: u8) {
        self.selected_channel = Some(id);
    }

    fn set_reference(&mut self, reference: Reference) {
        self.reference = Some(reference);
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn enable_dma_request(&mut self) {
        self.dma_request_enabled = true;
    }

    fn calibrate<D: DelayNs>(&mut self, delay: &mut D) -> CalibrationStatus {
        self.calibrate_calls += 1;
        for i in 0..CALIBRATION_POLL_BUDGET {
            delay.delay_us(CALIBRATION_POLL_INTERVAL_US);
            if i >= self.completes_after {
                return self.outcome;
            }
        }
        CalibrationStatus::TimedOut
    }

    fn data_register_addr(&self) -> usize {
        self.data_addr
    }
}

// =============================================================================
// Delay
// =============================================================================

/// Delay provider that returns immediately, for host tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::error::ConfigError;

    #[test]
    fn mock_engine_rejects_invalid_descriptor() {
        let mut engine = MockTransferEngine::new();
        let mut d = TransferDescriptor::memory_to_peripheral(0x1000, 0x2000, 2, 16);
        d.wrap_adjustment = -8;

        assert_eq!(engine.configure(&d), Err(ConfigError::WrapMismatch));
        assert!(engine.handle().configured().is_none());
    }

    #[test]
    fn mock_engine_pulse_requires_enable() {
        let mut engine = MockTransferEngine::new();
        let hw = engine.handle();
        let src = [5u16; 4];
        let mut dst = 0u16;
        let d = TransferDescriptor::memory_to_peripheral(
            src.as_ptr() as usize,
            core::ptr::from_mut(&mut dst) as usize,
            2,
            4,
        );

        engine.configure(&d).unwrap();
        assert!(!hw.pulse());

        engine.enable();
        assert!(hw.pulse());
        assert_eq!(dst, 5);
        assert_eq!(hw.pulses(), 1);
    }

    #[test]
    fn mock_engine_traversal_wraps_to_base() {
        let mut engine = MockTransferEngine::new();
        let hw = engine.handle();
        let src = [1u16, 2, 3, 4];
        let mut dst = 0u16;
        let base = src.as_ptr() as usize;
        let d = TransferDescriptor::memory_to_peripheral(
            base,
            core::ptr::from_mut(&mut dst) as usize,
            2,
            4,
        )
        .with_interrupts(false, false);

        engine.configure(&d).unwrap();
        engine.enable();

        for _ in 0..4 {
            assert!(hw.pulse());
        }
        // Major loop complete: the traversing address is back at base.
        assert_eq!(hw.traversing_addr(), base);
        assert!(hw.pulse());
        assert_eq!(dst, 1);
    }

    #[test]
    fn mock_trigger_records_lifecycle() {
        let mut trigger = MockTrigger::new();
        let handle = trigger.handle();

        trigger.set_period(1249);
        trigger.start();
        assert_eq!(handle.period(), Some(1249));
        assert!(handle.running());

        trigger.stop();
        assert!(!handle.running());
        assert_eq!(handle.starts(), 1);
        assert_eq!(handle.stops(), 1);
    }

    #[test]
    fn mock_converter_times_out_when_never_completing() {
        let mut converter = MockConverter::with_outcome(CalibrationStatus::TimedOut);
        let mut delay = NoopDelay;

        assert_eq!(
            converter.calibrate(&mut delay),
            CalibrationStatus::TimedOut
        );
    }
}
