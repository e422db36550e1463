//! Core streaming driver implementation.
//!
//! This module contains the main [`SampleStream`] structure and core
//! operations:
//!
//! - Initialization and descriptor configuration
//! - Converter bring-up and calibration
//! - Start/stop control
//! - Boundary interrupt servicing (acknowledge + ownership swap)
//! - Refill/consume access to the ready half
//!
//! # Concurrency model
//!
//! Two actors share the double buffer: the transfer engine, an
//! autonomous hardware agent gated by the periodic trigger, and the
//! boundary interrupt handler, which runs to completion on the CPU.
//! There is no lock; correctness is the strict alternation of half
//! ownership plus one hard real-time obligation on the caller:
//!
//! **Deadline.** Processing of the newly owned half must complete
//! within `L / sample_rate` seconds of the swap. The hardware offers no
//! detection of a miss and this driver adds none; a late consumer reads
//! samples the engine is already overwriting (capture) or lets stale
//! samples reach the converter (render). Silent corruption, not a
//! fault. See [`SampleStream::deadline_micros`].
//!
//! **Acknowledge.** Every boundary interrupt must be serviced through
//! [`SampleStream::service`] (or [`SampleStream::on_boundary`]), which
//! acknowledges the request line. An unacknowledged boundary stops the
//! line from re-arming and streaming silently halts.

use embedded_hal::delay::DelayNs;

#[cfg(feature = "log")]
use log::warn;

use super::config::{Direction, State, StreamConfig};
use super::error::{ConfigError, Result, StreamError, StreamResult};
use super::interrupt::Boundary;
use crate::dma::{DoubleBuffer, Element, TransferDescriptor, TransferEngine};
use crate::dsp::SampleSource;
use crate::hal::converter::{CalibrationStatus, Converter};
use crate::hal::trigger::{PeriodicTrigger, period_ticks};

/// Double-buffered sample stream between a converter and memory.
///
/// Owns the ping-pong buffer (`2 * L` elements of `T`), the transfer
/// descriptor, and the engine/trigger handles. `L` is fixed for the
/// stream's lifetime; changing it means constructing a new stream.
///
/// The descriptor captures the buffer's address at
/// [`init`](Self::init) time, so the stream must not move between
/// `init` and [`stop`](Self::stop) — keep it in a `static` (see
/// `stream_static_sync!`) or otherwise pinned.
///
/// # Example
///
/// ```ignore
/// let mut stream: SampleStream<u16, _, _, 512> = SampleStream::new(edma, pit);
/// stream.init(
///     StreamConfig::new()
///         .with_peripheral_addr(DAC0_DAT0_ADDR)
///         .with_sample_rate_hz(48_000),
/// )?;
/// stream.setup_converter(&mut dac, &mut delay);
/// stream.prefill_from(&mut osc)?;
/// stream.start()?;
///
/// // In the boundary ISR:
/// stream.on_boundary(Boundary::Half, |half| {
///     for slot in half.iter_mut() {
///         *slot = to_dac(osc.render());
///     }
/// })?;
/// ```
pub struct SampleStream<T: Element, E: TransferEngine, P: PeriodicTrigger, const L: usize> {
    /// Ping-pong buffer shared with the engine
    buffer: DoubleBuffer<T, L>,
    /// Platform transfer engine
    engine: E,
    /// Periodic trigger gating one element per pulse
    trigger: P,
    /// Active configuration
    config: StreamConfig,
    /// Descriptor programmed into the engine, kept for inspection
    descriptor: Option<TransferDescriptor>,
    /// Lifecycle state
    state: State,
    /// Boundary interrupts serviced since the last init
    serviced: u32,
    /// Most recent converter calibration outcome
    calibration: Option<CalibrationStatus>,
}

impl<T: Element, E: TransferEngine, P: PeriodicTrigger, const L: usize> SampleStream<T, E, P, L> {
    /// Create an idle stream. Const-compatible for static allocation.
    #[must_use]
    pub const fn new(engine: E, trigger: P) -> Self {
        Self {
            buffer: DoubleBuffer::new(),
            engine,
            trigger,
            config: StreamConfig::new(),
            descriptor: None,
            state: State::Uninitialized,
            serviced: 0,
            calibration: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// The descriptor programmed at init, if any.
    pub fn descriptor(&self) -> Option<&TransferDescriptor> {
        self.descriptor.as_ref()
    }

    /// Most recent converter calibration outcome.
    pub fn calibration_status(&self) -> Option<CalibrationStatus> {
        self.calibration
    }

    /// Elements per buffer half.
    #[must_use]
    pub const fn half_len() -> usize {
        L
    }

    /// Boundary interrupts serviced since the last init.
    pub fn boundaries_serviced(&self) -> u32 {
        self.serviced
    }

    /// The per-half processing budget in microseconds: `L / sample_rate`.
    ///
    /// Informational only — nothing enforces it. Exceeding it corrupts
    /// the stream silently.
    pub fn deadline_micros(&self) -> u32 {
        (L as u64 * 1_000_000 / self.config.sample_rate_hz as u64) as u32
    }

    /// Index of the currently CPU-owned half.
    pub fn ready_half_index(&self) -> usize {
        self.buffer.cpu_half_index()
    }

    /// Index of the currently hardware-owned half.
    pub fn active_half_index(&self) -> usize {
        self.buffer.dma_half_index()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Validate the configuration, build and program the transfer
    /// descriptor, and set the trigger period.
    ///
    /// Allowed from any state except `Running`; re-initializing is the
    /// only way back to streaming after [`stop`](Self::stop). Rejected
    /// configurations are fatal: nothing is programmed on error.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::AlreadyInitialized`] while running
    /// - [`ConfigError::InvalidSampleRate`] if the trigger cannot
    ///   realize the rate
    /// - descriptor validation errors per
    ///   [`TransferDescriptor::validate`]
    pub fn init(&mut self, config: StreamConfig) -> Result<()> {
        if self.state == State::Running {
            return Err(ConfigError::AlreadyInitialized.into());
        }

        let ticks = period_ticks(config.bus_clock_hz, config.sample_rate_hz)?;

        let total = DoubleBuffer::<T, L>::total_len();
        let descriptor = match config.direction {
            Direction::Render => TransferDescriptor::memory_to_peripheral(
                self.buffer.base_addr(),
                config.peripheral_addr,
                T::SIZE,
                total,
            ),
            Direction::Capture => TransferDescriptor::peripheral_to_memory(
                config.peripheral_addr,
                self.buffer.base_addr(),
                T::SIZE,
                total,
            ),
        }
        .with_interrupts(config.interrupt_at_half, config.interrupt_at_major);

        descriptor.validate()?;
        self.engine.configure(&descriptor)?;
        self.trigger.set_period(ticks);

        self.descriptor = Some(descriptor);
        self.config = config;
        self.serviced = 0;
        self.state = State::Initialized;
        Ok(())
    }

    /// Bring up the data peripheral: channel, reference, power,
    /// DMA request routing, then bounded-blocking self-calibration.
    ///
    /// The calibration outcome is surfaced (and remembered, see
    /// [`calibration_status`](Self::calibration_status)) but never
    /// blocks startup; the converter applies best-effort gain
    /// correction regardless.
    pub fn setup_converter<C: Converter, D: DelayNs>(
        &mut self,
        converter: &mut C,
        delay: &mut D,
    ) -> CalibrationStatus {
        converter.select_channel(self.config.channel);
        converter.set_reference(self.config.reference);
        converter.enable();
        converter.enable_dma_request();

        let status = converter.calibrate(delay);
        #[cfg(feature = "log")]
        if status != CalibrationStatus::Success {
            warn!("converter calibration: {}", status.as_str());
        }
        self.calibration = Some(status);
        status
    }

    /// Enable the engine, then the trigger.
    ///
    /// Only valid from `Initialized`: a stream stopped mid-transfer has
    /// partial loop counters and must be re-initialized first.
    pub fn start(&mut self) -> StreamResult<()> {
        if self.state != State::Initialized {
            return Err(StreamError::InvalidState);
        }
        self.engine.enable();
        self.trigger.start();
        self.state = State::Running;
        Ok(())
    }

    /// Disable the trigger and the engine together.
    ///
    /// Loop counters are left partial; restart requires a full
    /// [`init`](Self::init) + [`start`](Self::start) cycle, not a
    /// resume.
    pub fn stop(&mut self) -> StreamResult<()> {
        if self.state != State::Running {
            return Err(StreamError::NotRunning);
        }
        self.trigger.stop();
        self.engine.disable();
        self.state = State::Stopped;
        Ok(())
    }

    // =========================================================================
    // Boundary servicing
    // =========================================================================

    /// Service one boundary interrupt: acknowledge the request line and
    /// atomically exchange the half roles.
    ///
    /// Call exactly once per boundary interrupt, from the handler.
    /// Returns `(ready_half, active_half)` indices; the ready half is
    /// then reachable through [`ready`](Self::ready) /
    /// [`ready_mut`](Self::ready_mut) and must be fully processed
    /// before the next boundary.
    pub fn service(&mut self, event: Boundary) -> StreamResult<(usize, usize)> {
        if self.state != State::Running {
            return Err(StreamError::NotRunning);
        }
        self.engine.acknowledge(event);
        let roles = self.buffer.swap();
        self.serviced = self.serviced.wrapping_add(1);
        Ok(roles)
    }

    /// Service a boundary and run the processing step on the half that
    /// just became CPU-owned.
    ///
    /// The closure must finish within the per-half deadline.
    pub fn on_boundary<R>(
        &mut self,
        event: Boundary,
        process: impl FnOnce(&mut [T; L]) -> R,
    ) -> StreamResult<R> {
        self.service(event)?;
        Ok(process(self.buffer.cpu_half_mut()))
    }

    /// The CPU-owned half, read-only (capture consumption).
    pub fn ready(&self) -> &[T; L] {
        self.buffer.cpu_half()
    }

    /// The CPU-owned half, writable (render refill).
    pub fn ready_mut(&mut self) -> &mut [T; L] {
        self.buffer.cpu_half_mut()
    }

    /// Refill the CPU-owned half with exactly `L` samples from `source`.
    pub fn fill_from<S: SampleSource<T>>(&mut self, source: &mut S) {
        for slot in self.buffer.cpu_half_mut().iter_mut() {
            *slot = source.next_sample();
        }
    }

    /// Fill the entire buffer (both halves, in engine traversal order)
    /// before starting a render stream.
    ///
    /// Only valid while the engine is idle; once running, the
    /// hardware-owned half belongs to the engine.
    pub fn prefill_from<S: SampleSource<T>>(&mut self, source: &mut S) -> StreamResult<()> {
        if self.state == State::Running {
            return Err(StreamError::InvalidState);
        }
        for half in self.buffer.all_halves_mut() {
            for slot in half.iter_mut() {
                *slot = source.next_sample();
            }
        }
        Ok(())
    }
}

impl<T, E, P, const L: usize> SampleStream<T, E, P, L>
where
    T: Element + core::fmt::Display,
    E: TransferEngine,
    P: PeriodicTrigger,
{
    /// Emit the ready half as a human-readable line: the `L` values,
    /// space-separated, newline-terminated.
    ///
    /// Development visibility only — not part of the functional
    /// contract, and far too slow to call inside a production handler.
    pub fn dump_ready<W: core::fmt::Write>(&self, w: &mut W) -> core::fmt::Result {
        for (i, sample) in self.ready().iter().enumerate() {
            if i > 0 {
                w.write_char(' ')?;
            }
            write!(w, "{sample}")?;
        }
        w.write_char('\n')
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
