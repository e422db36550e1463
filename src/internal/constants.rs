//! Centralized Constants
//!
//! This module provides a single source of truth for the magic numbers
//! used throughout the streaming driver.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Rates**: default sample rate and trigger bus clock
//! - **Oscillator**: wavetable dimensions
//! - **Timing**: calibration poll budget
//!
//! Descriptor and status bit definitions live with their types
//! (`driver/interrupt.rs`) as they are specific to the engine model.

// =============================================================================
// Rates
// =============================================================================

/// Default audio sample rate in Hz
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 48_000;

/// Default trigger bus clock in Hz (K64 bus clock)
pub const DEFAULT_BUS_CLOCK_HZ: u32 = 60_000_000;

// =============================================================================
// Oscillator
// =============================================================================

/// Wavetable length in entries (one full period)
pub const WAVETABLE_LEN: usize = 2048;

// =============================================================================
// Timing
// =============================================================================

/// Poll interval while waiting for converter self-calibration, in µs
pub const CALIBRATION_POLL_INTERVAL_US: u32 = 25;

/// Maximum calibration poll iterations before reporting a timeout
pub const CALIBRATION_POLL_BUDGET: u32 = 4_000;
