//! Double buffer with atomic half ownership.
//!
//! One contiguous region of `2 * L` elements, split into two halves of
//! `L` elements. At all times exactly one half is hardware-owned (the
//! engine is filling or draining it) and the other is CPU-owned. The
//! role assignment is a single atomic index flipped by [`swap`];
//! ownership alternation replaces locking, and the swap is a role
//! exchange, never an element copy.
//!
//! [`swap`]: DoubleBuffer::swap

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicUsize, Ordering};

use super::element::Element;

/// Ping-pong sample buffer: two halves of `L` elements each.
///
/// The buffer is created once with `L` and the element type fixed for
/// its lifetime, and is the only shared resource between the transfer
/// engine and the interrupt handler. The engine addresses it through
/// [`base_addr`](Self::base_addr); the CPU side only ever touches the
/// half reported by [`cpu_half_index`](Self::cpu_half_index).
///
/// Writing the hardware-owned half from the CPU is a correctness
/// violation this type cannot detect; the accessors are shaped so that
/// safe code never obtains a reference to it.
pub struct DoubleBuffer<T: Element, const L: usize> {
    /// Backing storage. The engine writes/reads one half through raw
    /// addresses while the CPU holds references into the other.
    halves: UnsafeCell<[[T; L]; 2]>,
    /// Index of the CPU-owned half (0 or 1). Mutated only by `swap`.
    cpu_half: AtomicUsize,
}

// SAFETY: the ownership discipline partitions the storage: the engine
// accesses only the hardware-owned half, CPU code only the CPU-owned
// half, and the partition itself is an atomic index with acquire/release
// ordering.
unsafe impl<T: Element, const L: usize> Sync for DoubleBuffer<T, L> {}
// SAFETY: no thread affinity; see above.
unsafe impl<T: Element, const L: usize> Send for DoubleBuffer<T, L> {}

impl<T: Element, const L: usize> DoubleBuffer<T, L> {
    /// Create a zeroed buffer. Half 0 starts hardware-owned, half 1
    /// CPU-owned. Const-compatible for static allocation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            halves: UnsafeCell::new([[T::ZERO; L]; 2]),
            cpu_half: AtomicUsize::new(1),
        }
    }

    /// Elements per half.
    #[must_use]
    pub const fn half_len() -> usize {
        L
    }

    /// Elements in the whole region (`2 * L`).
    #[must_use]
    pub const fn total_len() -> usize {
        2 * L
    }

    /// Base address of the region, for descriptor configuration.
    #[inline(always)]
    pub fn base_addr(&self) -> usize {
        self.halves.get() as usize
    }

    /// Index of the currently CPU-owned half.
    #[inline(always)]
    pub fn cpu_half_index(&self) -> usize {
        self.cpu_half.load(Ordering::Acquire)
    }

    /// Index of the currently hardware-owned half.
    #[inline(always)]
    pub fn dma_half_index(&self) -> usize {
        self.cpu_half_index() ^ 1
    }

    /// Atomically exchange the half roles.
    ///
    /// This is the only mutator of the role state and must be called
    /// exactly once per boundary interrupt. Returns
    /// `(ready_half, active_half)`: the index that just became CPU-owned
    /// and the index now owned by the hardware.
    #[inline]
    pub fn swap(&self) -> (usize, usize) {
        let prev_cpu = self.cpu_half.fetch_xor(1, Ordering::AcqRel);
        (prev_cpu ^ 1, prev_cpu)
    }

    /// The CPU-owned half, read-only.
    #[inline]
    pub fn cpu_half(&self) -> &[T; L] {
        // SAFETY: the engine never touches the CPU-owned half, and the
        // index was published with release ordering by `swap`.
        unsafe { &(*self.halves.get())[self.cpu_half_index()] }
    }

    /// The CPU-owned half, writable.
    #[inline]
    pub fn cpu_half_mut(&mut self) -> &mut [T; L] {
        let idx = self.cpu_half_index();
        // SAFETY: `&mut self` excludes other CPU-side references, and
        // the engine only accesses the other half.
        unsafe { &mut (*self.halves.get())[idx] }
    }

    /// Both halves in address order, for prefilling while the engine is
    /// idle. Callers must not use this once transfers are enabled.
    pub(crate) fn all_halves_mut(&mut self) -> &mut [[T; L]; 2] {
        // SAFETY: `&mut self` excludes other CPU-side references; the
        // caller guarantees the engine is idle.
        unsafe { &mut *self.halves.get() }
    }
}

impl<T: Element, const L: usize> Default for DoubleBuffer<T, L> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
