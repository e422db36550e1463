//! Wavetable sine oscillator.
//!
//! A single-period sine table indexed by a floating-point phase that
//! advances by a frequency-derived increment each sample. The phase
//! wraps by a single subtraction, which holds as long as the increment
//! is below the table length (i.e. the fundamental stays below the
//! sample rate).

use libm::sinf;

use super::SampleSource;
use crate::internal::constants::WAVETABLE_LEN;

/// Wavetable length in entries (one full sine period).
pub const TABLE_LEN: usize = WAVETABLE_LEN;

const TWO_PI: f32 = 6.283_185_3;

/// Floating-point sine wave table oscillator.
///
/// Renders one sample per call as a function of the current phase, then
/// advances the phase by `TABLE_LEN * f0 / fs`. Lookup truncates the
/// phase to a table index; no interpolation.
///
/// # Example
///
/// ```ignore
/// let mut osc = Oscillator::new(48_000.0, 440.0);
/// let sample = osc.render();
/// ```
pub struct Oscillator {
    /// One period of the waveform
    wavetable: [f32; TABLE_LEN],
    /// Current wave table index
    idx: f32,
    /// Wave table index increment per sample
    idx_inc: f32,
    /// Audio sample rate in Hz
    fs: f32,
}

impl Oscillator {
    /// Create an oscillator at the given sample rate and fundamental.
    ///
    /// The table is filled with one period of `sin`; `f0` follows the
    /// rules of [`set_f0`](Self::set_f0).
    #[must_use]
    pub fn new(sample_rate: f32, f0: f32) -> Self {
        let mut wavetable = [0.0f32; TABLE_LEN];
        for (i, entry) in wavetable.iter_mut().enumerate() {
            *entry = sinf(TWO_PI * i as f32 / TABLE_LEN as f32);
        }

        let mut osc = Self {
            wavetable,
            idx: 0.0,
            idx_inc: 0.0,
            fs: sample_rate,
        };
        osc.set_f0(f0);
        osc
    }

    /// Set the fundamental frequency in Hz, within the range (0, fs/2).
    ///
    /// Maps (0, fs/2) onto a table increment in (0, TABLE_LEN/2). Values
    /// up to fs keep the single-subtraction wrap valid but alias.
    pub fn set_f0(&mut self, f0_hz: f32) {
        self.idx_inc = TABLE_LEN as f32 * f0_hz / self.fs;
    }

    /// Current table phase, in [0, TABLE_LEN).
    #[must_use]
    pub fn phase(&self) -> f32 {
        self.idx
    }

    /// Render one sample.
    #[inline]
    pub fn render(&mut self) -> f32 {
        self.idx += self.idx_inc;
        if self.idx >= TABLE_LEN as f32 {
            self.idx -= TABLE_LEN as f32;
        }
        self.wavetable[self.idx as usize]
    }
}

impl SampleSource<f32> for Oscillator {
    fn next_sample(&mut self) -> f32 {
        self.render()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
