//! Error types for the streaming driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: descriptor and rate validation failures, rejected
//!   at configure time and fatal to startup
//! - [`StreamError`]: lifecycle violations at run time
//!
//! The unified [`Error`] enum wraps both domains and is returned by most
//! driver methods. Converter calibration outcomes are deliberately not
//! errors; see
//! [`CalibrationStatus`](crate::hal::converter::CalibrationStatus).
//!
//! Two fault classes have no representation here because the hardware
//! offers none: a missed processing deadline (silent data corruption)
//! and an unacknowledged boundary interrupt (silent stall). Both are
//! documented caller obligations.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and descriptor validation errors
///
/// These are detected when a stream is initialized or an engine is
/// configured, and must never be silently tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Stream is running; stop before re-initializing
    AlreadyInitialized,
    /// Sample rate is zero or exceeds the bus clock
    InvalidSampleRate,
    /// Wrap adjustment magnitude does not equal the traversed byte size
    WrapMismatch,
    /// Major loop count is zero or not a multiple of the minor loop
    IndivisibleMajorLoop,
    /// Minor loop is not exactly one element
    UnsupportedMinorLoop,
    /// Zero or two traversing sides; exactly one stride must be nonzero
    AmbiguousTraversal,
    /// Traversing stride does not match the element width
    StrideMismatch,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::AlreadyInitialized => "already initialized",
            ConfigError::InvalidSampleRate => "invalid sample rate",
            ConfigError::WrapMismatch => "wrap adjustment does not match buffer size",
            ConfigError::IndivisibleMajorLoop => "major loop not a multiple of minor loop",
            ConfigError::UnsupportedMinorLoop => "minor loop must be one element",
            ConfigError::AmbiguousTraversal => "exactly one side must traverse memory",
            ConfigError::StrideMismatch => "stride does not match element width",
        }
    }
}

// =============================================================================
// Stream Errors
// =============================================================================

/// Runtime lifecycle errors
///
/// These occur when operations are invoked from the wrong state, e.g.
/// starting a stream that was stopped mid-transfer without
/// re-initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamError {
    /// Operation not valid in the current state
    InvalidState,
    /// Boundary service requested while the stream is not running
    NotRunning,
}

impl core::fmt::Display for StreamError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StreamError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            StreamError::InvalidState => "invalid state for operation",
            StreamError::NotRunning => "stream not running",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::WrapMismatch)) => { /* ... */ }
///     Err(Error::Stream(StreamError::NotRunning)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// Stream lifecycle error
    Stream(StreamError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Stream(e) => write!(f, "stream: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<StreamError> for Error {
    fn from(e: StreamError) -> Self {
        Error::Stream(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for stream lifecycle operations
pub type StreamResult<T> = core::result::Result<T, StreamError>;

// =============================================================================
// Unit Tests
// =============================================================================
