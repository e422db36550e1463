//! Data peripheral bring-up.
//!
//! The converter (DAC for render, ADC for capture) is configured once
//! before the transfer engine is enabled: channel selection, reference
//! voltage, power-up, and routing of its conversion-complete/request
//! signal to the trigger-gated engine channel. Self-calibration is a
//! bounded blocking call whose outcome is surfaced as a status, not an
//! error: a failed calibration is a diagnostic, best-effort gain
//! correction is still applied, and startup proceeds.

use embedded_hal::delay::DelayNs;

use crate::driver::config::Reference;

/// Outcome of converter self-calibration.
///
/// Calibration runs with a bounded poll budget; a converter that never
/// reports completion yields `TimedOut` rather than blocking forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationStatus {
    /// Calibration completed and gain/offset corrections were stored
    Success,
    /// The converter reported a calibration failure
    Failed,
    /// Calibration did not complete within the poll budget
    TimedOut,
}

impl core::fmt::Display for CalibrationStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CalibrationStatus {
    /// Returns a human-readable description of the outcome
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CalibrationStatus::Success => "calibration succeeded",
            CalibrationStatus::Failed => "calibration failed",
            CalibrationStatus::TimedOut => "calibration timed out",
        }
    }
}

/// A data peripheral the engine streams into or out of.
///
/// Implementations own the converter's register sequences. The driver
/// invokes these once, before enabling the engine, in the order:
/// channel, reference, enable, DMA request routing, calibration.
pub trait Converter {
    /// Select the input/output channel to stream on.
    fn select_channel(&mut self, id: u8);

    /// Select the reference voltage.
    fn set_reference(&mut self, reference: Reference);

    /// Power the converter up.
    fn enable(&mut self);

    /// Route the conversion-complete/request signal to the engine's
    /// trigger-gated channel.
    fn enable_dma_request(&mut self);

    /// Run self-calibration, polling with `delay` up to an
    /// implementation-defined budget.
    ///
    /// Must apply best-effort gain correction even on failure, and must
    /// return rather than spin when the hardware never completes.
    fn calibrate<D: DelayNs>(&mut self, delay: &mut D) -> CalibrationStatus;

    /// Address of the data register the engine reads or writes.
    fn data_register_addr(&self) -> usize;
}

// =============================================================================
// Unit Tests
// =============================================================================
