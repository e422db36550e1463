//! Transfer descriptor: the in-memory model of one circular transfer.
//!
//! A descriptor describes a trigger-gated transfer between a
//! peripheral-mapped data register and the double buffer: one element
//! per minor loop, `total` elements per major loop, and an address wrap
//! applied to the traversing side at major-loop completion so the
//! engine returns exactly to the buffer base.
//!
//! The descriptor is configured once at initialization and handed to a
//! [`TransferEngine`](super::TransferEngine); from then on the loop
//! counters belong to the hardware until re-initialization.
//!
//! Addresses are kept as `usize` so the model stays exact on the host
//! (the test engine dereferences them); engine implementations narrow
//! to the bus width when programming registers.

use crate::driver::error::{ConfigError, ConfigResult};

/// In-memory model of a trigger-gated circular transfer.
///
/// A stride of zero denotes a fixed peripheral register address; a
/// nonzero stride denotes sequential traversal of the buffer. Exactly
/// one side traverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferDescriptor {
    /// Read address for the first element.
    pub source_addr: usize,
    /// Write address for the first element.
    pub dest_addr: usize,
    /// Element width in bytes.
    pub element_size: usize,
    /// Source address adjustment per element (0 = fixed register).
    pub source_stride: isize,
    /// Destination address adjustment per element (0 = fixed register).
    pub dest_stride: isize,
    /// Elements per minor loop. Must be 1: a sub-element or multi-element
    /// minor loop would decouple boundary timing from buffer-half size.
    pub minor_loop_elements: usize,
    /// Major loop reload count: elements per full buffer traversal.
    pub major_loop_count: usize,
    /// Major loop current count. Owned by the hardware once enabled.
    pub major_loop_current: usize,
    /// Byte adjustment applied to the traversing side at major-loop
    /// completion. Must equal the negative byte size of the traversed
    /// region or the address drifts undetected.
    pub wrap_adjustment: isize,
    /// Raise an interrupt request at half-major-loop completion.
    pub interrupt_at_half: bool,
    /// Raise an interrupt request at major-loop completion.
    pub interrupt_at_major: bool,
}

impl TransferDescriptor {
    /// Describe a render transfer: buffer memory to a fixed peripheral
    /// data register.
    ///
    /// The source traverses `total_elements` of `element_size` bytes and
    /// wraps back to `source_addr` at major-loop completion.
    #[must_use]
    pub const fn memory_to_peripheral(
        source_addr: usize,
        dest_addr: usize,
        element_size: usize,
        total_elements: usize,
    ) -> Self {
        Self {
            source_addr,
            dest_addr,
            element_size,
            source_stride: element_size as isize,
            dest_stride: 0,
            minor_loop_elements: 1,
            major_loop_count: total_elements,
            major_loop_current: total_elements,
            wrap_adjustment: -((total_elements * element_size) as isize),
            interrupt_at_half: true,
            interrupt_at_major: true,
        }
    }

    /// Describe a capture transfer: a fixed peripheral data register to
    /// buffer memory.
    ///
    /// The destination traverses `total_elements` of `element_size`
    /// bytes and wraps back to `dest_addr` at major-loop completion.
    #[must_use]
    pub const fn peripheral_to_memory(
        source_addr: usize,
        dest_addr: usize,
        element_size: usize,
        total_elements: usize,
    ) -> Self {
        Self {
            source_addr,
            dest_addr,
            element_size,
            source_stride: 0,
            dest_stride: element_size as isize,
            minor_loop_elements: 1,
            major_loop_count: total_elements,
            major_loop_current: total_elements,
            wrap_adjustment: -((total_elements * element_size) as isize),
            interrupt_at_half: true,
            interrupt_at_major: true,
        }
    }

    /// Select which boundary completions raise an interrupt request.
    #[must_use]
    pub const fn with_interrupts(mut self, at_half: bool, at_major: bool) -> Self {
        self.interrupt_at_half = at_half;
        self.interrupt_at_major = at_major;
        self
    }

    /// Total bytes moved per major loop.
    #[must_use]
    pub const fn total_bytes(&self) -> usize {
        self.major_loop_count * self.element_size
    }

    /// Whether this descriptor reads from memory and writes a peripheral.
    #[must_use]
    pub const fn is_memory_to_peripheral(&self) -> bool {
        self.source_stride != 0
    }

    /// Stride of the side that traverses memory.
    #[must_use]
    pub const fn traversing_stride(&self) -> isize {
        if self.source_stride != 0 {
            self.source_stride
        } else {
            self.dest_stride
        }
    }

    /// Validate the descriptor against the engine's boundary semantics.
    ///
    /// Rejected configurations are fatal to startup:
    ///
    /// - a minor loop other than exactly one element
    /// - a major loop count not a multiple of the minor loop count
    /// - zero strides on both sides, or nonzero strides on both sides
    /// - a traversing stride that does not match the element width
    /// - a wrap adjustment that does not return the traversing address
    ///   exactly to its starting value
    pub fn validate(&self) -> ConfigResult<()> {
        if self.minor_loop_elements != 1 {
            return Err(ConfigError::UnsupportedMinorLoop);
        }

        if self.major_loop_count == 0 || self.major_loop_count % self.minor_loop_elements != 0 {
            return Err(ConfigError::IndivisibleMajorLoop);
        }

        let src_moves = self.source_stride != 0;
        let dst_moves = self.dest_stride != 0;
        if src_moves == dst_moves {
            return Err(ConfigError::AmbiguousTraversal);
        }

        if self.traversing_stride().unsigned_abs() != self.element_size {
            return Err(ConfigError::StrideMismatch);
        }

        let expected = -((self.major_loop_count * self.element_size) as isize);
        if self.wrap_adjustment != expected {
            return Err(ConfigError::WrapMismatch);
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
