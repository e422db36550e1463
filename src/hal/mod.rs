//! Hardware Abstraction Layer
//!
//! This module defines the traits the driver core consumes from
//! platform code, keeping converter- and timer-specific register
//! sequences entirely outside the core.
//!
//! # Modules
//!
//! - [`converter`]: data peripheral bring-up (channel mux, reference,
//!   calibration, DMA request routing)
//! - [`trigger`]: the periodic trigger gating one transfer per sample
//!   period, plus period derivation
//!
//! # Delay Integration
//!
//! Bounded blocking calls (converter calibration) use
//! `embedded_hal::delay::DelayNs` directly. Pass any delay
//! implementation from your HAL (e.g., `cortex_m::delay::Delay`).

pub mod converter;
pub mod trigger;

// Re-export commonly used types
pub use converter::{CalibrationStatus, Converter};
pub use trigger::{PeriodicTrigger, period_ticks};
