//! Configuration types for the streaming driver

use crate::internal::constants::{DEFAULT_BUS_CLOCK_HZ, DEFAULT_SAMPLE_RATE_HZ};

/// Streaming direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Memory to peripheral: the engine drains the buffer into an output
    /// converter; the CPU refills each half as it becomes ready.
    #[default]
    Render,
    /// Peripheral to memory: the engine fills the buffer from an input
    /// converter; the CPU consumes each half as it becomes ready.
    Capture,
}

/// Converter reference voltage selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reference {
    /// External reference pin pair (VREFH/VREFL)
    #[default]
    External,
    /// Internal bandgap-derived reference
    Internal,
}

/// Complete stream configuration
///
/// Rate and length arrive here as validated runtime values rather than
/// compile-time constants; `init` rejects combinations the trigger
/// cannot realize.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamConfig {
    /// Streaming direction (render or capture)
    pub direction: Direction,
    /// Sample rate in Hz; one element moves per sample period
    pub sample_rate_hz: u32,
    /// Bus clock feeding the periodic trigger, in Hz
    pub bus_clock_hz: u32,
    /// Address of the converter's data register
    pub peripheral_addr: usize,
    /// Converter input/output channel to select during bring-up
    pub channel: u8,
    /// Converter reference voltage
    pub reference: Reference,
    /// Request an interrupt at half-major-loop completion
    pub interrupt_at_half: bool,
    /// Request an interrupt at major-loop completion
    pub interrupt_at_major: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamConfig {
    /// Create a new configuration with defaults.
    ///
    /// The peripheral address defaults to zero and must be set with
    /// [`with_peripheral_addr`](Self::with_peripheral_addr) before use.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            direction: Direction::Render,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            bus_clock_hz: DEFAULT_BUS_CLOCK_HZ,
            peripheral_addr: 0,
            channel: 0,
            reference: Reference::External,
            interrupt_at_half: true,
            interrupt_at_major: true,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the streaming direction
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Set the sample rate in Hz
    #[must_use]
    pub const fn with_sample_rate_hz(mut self, hz: u32) -> Self {
        self.sample_rate_hz = hz;
        self
    }

    /// Set the trigger bus clock in Hz
    #[must_use]
    pub const fn with_bus_clock_hz(mut self, hz: u32) -> Self {
        self.bus_clock_hz = hz;
        self
    }

    /// Set the converter data register address
    #[must_use]
    pub const fn with_peripheral_addr(mut self, addr: usize) -> Self {
        self.peripheral_addr = addr;
        self
    }

    /// Set the converter channel
    #[must_use]
    pub const fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// Set the converter reference voltage
    #[must_use]
    pub const fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = reference;
        self
    }

    /// Select which boundary completions raise an interrupt
    #[must_use]
    pub const fn with_interrupts(mut self, at_half: bool, at_major: bool) -> Self {
        self.interrupt_at_half = at_half;
        self.interrupt_at_major = at_major;
        self
    }
}

/// Stream driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Not initialized
    #[default]
    Uninitialized,
    /// Descriptor configured and trigger period set, not started
    Initialized,
    /// Streaming (engine and trigger enabled)
    Running,
    /// Stopped mid-transfer; loop counters are partial and a full
    /// re-initialization is required before starting again
    Stopped,
}

// =============================================================================
// Unit Tests
// =============================================================================
