//! Transfer engine model
//!
//! This module holds the hardware-facing half of the driver:
//!
//! - [`TransferDescriptor`]: the in-memory model of one trigger-gated
//!   circular transfer (addresses, strides, loop counts, wrap behavior,
//!   interrupt requests)
//! - [`DoubleBuffer`]: the ping-pong sample buffer with atomic half
//!   ownership
//! - [`TransferEngine`]: the capability boundary behind which
//!   platform-specific register sequences live
//! - [`Element`]: fixed-width sample element types the engine can move
//!
//! All memory is statically allocated using const generics; nothing in
//! this module touches hardware registers directly.

mod buffer;
mod descriptor;
mod element;
mod engine;

pub use buffer::DoubleBuffer;
pub use descriptor::TransferDescriptor;
pub use element::Element;
pub use engine::TransferEngine;
