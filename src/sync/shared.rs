//! ISR-safe stream wrapper using critical sections.

use super::primitives::CriticalSectionCell;
use crate::dma::{Element, TransferEngine};
use crate::driver::stream::SampleStream;
use crate::hal::trigger::PeriodicTrigger;

/// ISR-safe stream wrapper using critical sections.
///
/// All access goes through `critical_section::with()`, disabling
/// interrupts for the duration of the closure. This also pins the
/// stream in a `static`, satisfying the no-move requirement of
/// [`SampleStream::init`].
///
/// # Example
///
/// ```ignore
/// static STREAM: SharedStream<u16, Edma, Pit, 512> =
///     SharedStream::new(SampleStream::new(edma, pit));
///
/// STREAM.with(|stream| {
///     stream.service(Boundary::Half).ok();
/// });
/// ```
pub struct SharedStream<T, E, P, const L: usize>
where
    T: Element,
    E: TransferEngine,
    P: PeriodicTrigger,
{
    inner: CriticalSectionCell<SampleStream<T, E, P, L>>,
}

impl<T, E, P, const L: usize> SharedStream<T, E, P, L>
where
    T: Element,
    E: TransferEngine,
    P: PeriodicTrigger,
{
    /// Wrap a stream (const, suitable for static initialization).
    pub const fn new(stream: SampleStream<T, E, P, L>) -> Self {
        Self {
            inner: CriticalSectionCell::new(stream),
        }
    }

    /// Execute a closure with exclusive access to the stream.
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut SampleStream<T, E, P, L>) -> R,
    {
        self.inner.with(f)
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut SampleStream<T, E, P, L>) -> R,
    {
        self.inner.try_with(f)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
