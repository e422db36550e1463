//! The platform boundary for autonomous transfer hardware.

use super::descriptor::TransferDescriptor;
use crate::driver::error::ConfigResult;
use crate::driver::interrupt::Boundary;

/// Capability boundary over a trigger-gated transfer engine.
///
/// Implementations own the platform-specific register sequences (eDMA
/// TCD programming, DMAMUX routing, ERQ bits); the driver core never
/// touches registers itself. The test suite substitutes a mock that
/// interprets the descriptor in software.
///
/// Once [`enable`](Self::enable) has been called the hardware owns the
/// descriptor's loop counters. Disabling mid-transfer leaves them in a
/// partial state: the only way back to streaming is a fresh
/// [`configure`](Self::configure) followed by `enable`, not a resume.
pub trait TransferEngine {
    /// Program the engine with a validated descriptor.
    ///
    /// Implementations must reject descriptors that fail
    /// [`TransferDescriptor::validate`]; address, stride, and wrap
    /// fields are programmed bit-exactly from the descriptor.
    fn configure(&mut self, descriptor: &TransferDescriptor) -> ConfigResult<()>;

    /// Start autonomous operation: each trigger pulse moves one element.
    fn enable(&mut self);

    /// Stop autonomous operation. Loop counters are left partial.
    fn disable(&mut self);

    /// Re-arm the interrupt request line after servicing a boundary.
    ///
    /// Must be called exactly once per serviced interrupt; a boundary
    /// that is never acknowledged stops the request line from re-arming
    /// and streaming silently halts.
    fn acknowledge(&mut self, boundary: Boundary);
}
