//! Periodic trigger abstraction and period derivation.
//!
//! The trigger is a timer reloading at a fixed period; each pulse
//! authorizes exactly one engine minor loop. It has no data coupling to
//! the core beyond that cadence, and its period is read-only to the
//! core once started.

use crate::driver::error::{ConfigError, ConfigResult};

/// A timer that fires once per period, gating one transfer per pulse.
///
/// Implementations wrap a hardware periodic timer (PIT channel or
/// similar) routed to the engine's trigger input.
pub trait PeriodicTrigger {
    /// Program the reload period in bus clock ticks.
    fn set_period(&mut self, ticks: u32);

    /// Start firing continuously.
    fn start(&mut self);

    /// Stop firing.
    fn stop(&mut self);
}

/// Derive the trigger reload value for a sample rate.
///
/// The timer counts `ticks + 1` bus clocks per period, so the reload
/// value is `bus_clock / sample_rate - 1`. Rates of zero or above the
/// bus clock cannot be realized and are rejected.
pub const fn period_ticks(bus_clock_hz: u32, sample_rate_hz: u32) -> ConfigResult<u32> {
    if sample_rate_hz == 0 || sample_rate_hz > bus_clock_hz {
        return Err(ConfigError::InvalidSampleRate);
    }
    Ok(bus_clock_hz / sample_rate_hz - 1)
}

// =============================================================================
// Unit Tests
// =============================================================================
