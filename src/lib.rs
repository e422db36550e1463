//! Kinetis K64 Ping-Pong Sample Streaming
//!
//! A `no_std`, `no_alloc` Rust implementation of trigger-gated eDMA
//! ping-pong sample streaming between a data converter (DAC render or
//! ADC capture) and memory.
//!
//! A periodic trigger authorizes the transfer engine to move exactly
//! one element per sample period, entirely without CPU involvement. The
//! buffer is split into two halves: while the engine fills or drains
//! one half, the CPU processes the other, and every loop-boundary
//! interrupt atomically exchanges the two roles. CPU work on a half
//! must finish within `L / sample_rate` seconds — a hard real-time
//! deadline this design documents but, like the hardware, does not
//! police.
//!
//! # Architecture
//!
//! The driver is organized into four layers:
//!
//! 1. **Stream Layer** ([`driver`]): lifecycle, boundary servicing,
//!    refill/consume access
//! 2. **Engine Model** ([`dma`]): transfer descriptor, double buffer,
//!    and the [`TransferEngine`] platform boundary
//! 3. **HAL Layer** ([`hal`]): converter bring-up and the periodic
//!    trigger
//! 4. **Signal Layer** ([`dsp`]): wavetable oscillator and the
//!    [`SampleSource`] trait
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting for driver types
//! - `log`: Enable warn-level diagnostics (calibration failures)
//! - `critical-section`: Enable the ISR-safe `SharedStream` wrapper
//!
//! # Example
//!
//! ```ignore
//! use ph_k64_stream::{Boundary, Oscillator, SampleStream, StreamConfig};
//!
//! // Static allocation: the descriptor captures the buffer address at
//! // init, so the stream stays pinned.
//! ph_k64_stream::stream_static_sync!(STREAM, u16, Edma0, Pit0, 512,
//!     SampleStream::new(Edma0::take(), Pit0::take()));
//!
//! STREAM.with(|stream| {
//!     stream.init(
//!         StreamConfig::new()
//!             .with_peripheral_addr(DAC0_DAT0)
//!             .with_sample_rate_hz(48_000),
//!     ).unwrap();
//!     stream.setup_converter(&mut dac, &mut delay);
//!     stream.prefill_from(&mut osc).unwrap();
//!     stream.start().unwrap();
//! });
//!
//! // Boundary ISR: swap roles and refill within the half-period.
//! fn dma_isr(event: Boundary) {
//!     STREAM.with(|stream| {
//!         stream.on_boundary(event, |half| {
//!             for slot in half.iter_mut() {
//!                 *slot = to_dac(OSC.render());
//!             }
//!         }).ok();
//!     });
//! }
//! ```
//!
//! # Memory Requirements
//!
//! The stream owns its double buffer inline: `2 * L * size_of::<T>()`
//! bytes (2 KiB for 512-sample halves of `u16`), plus the 8 KiB
//! wavetable if the [`Oscillator`] is used.

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels and thresholds are configured in Cargo.toml.

// =============================================================================
// Modules
// =============================================================================

pub mod dma;
pub mod driver;
pub mod dsp;
pub mod hal;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use dma::{DoubleBuffer, Element, TransferDescriptor, TransferEngine};
pub use driver::config::{Direction, Reference, State, StreamConfig};
pub use driver::error::{
    ConfigError, ConfigResult, Error, Result, StreamError, StreamResult,
};
pub use driver::interrupt::{Boundary, BoundaryStatus};
pub use driver::stream::SampleStream;
pub use dsp::{FnSource, Oscillator, SampleSource, TABLE_LEN};
pub use hal::converter::{CalibrationStatus, Converter};
pub use hal::trigger::{PeriodicTrigger, period_ticks};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedStream;

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level
/// facade focused on driver types.
pub mod constants {
    pub use crate::internal::constants::{
        CALIBRATION_POLL_BUDGET, CALIBRATION_POLL_INTERVAL_US, DEFAULT_BUS_CLOCK_HZ,
        DEFAULT_SAMPLE_RATE_HZ, WAVETABLE_LEN,
    };
}

// =============================================================================
// Macro Helpers
// =============================================================================

/// Declare a static, ISR-safe stream instance for synchronous use.
///
/// This macro expands to a `SharedStream` static, reducing boilerplate
/// for bring-up while satisfying the stream's no-move requirement.
///
/// # Examples
///
/// ```ignore
/// ph_k64_stream::stream_static_sync!(STREAM, u16, Edma0, Pit0, 512,
///     SampleStream::new(Edma0::take(), Pit0::take()));
///
/// STREAM.with(|stream| {
///     stream.init(StreamConfig::new()).unwrap();
///     stream.start().unwrap();
/// });
/// ```
#[cfg(feature = "critical-section")]
#[macro_export]
macro_rules! stream_static_sync {
    ($name:ident, $elem:ty, $engine:ty, $trigger:ty, $half:expr, $init:expr) => {
        static $name: $crate::sync::SharedStream<$elem, $engine, $trigger, $half> =
            $crate::sync::SharedStream::new($init);
    };
}
