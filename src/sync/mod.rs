//! Synchronization and Concurrency Support
//!
//! This module provides synchronization primitives and concurrency-safe
//! wrappers for the streaming driver:
//!
//! - **Primitives** (`primitives`): [`CriticalSectionCell`] — ISR-safe
//!   interior mutability
//! - **Shared Wrappers** (`shared`): [`SharedStream`] — synchronous
//!   critical-section protected stream
//!
//! # Feature Flags
//!
//! - `critical-section`: enables this module
//!
//! # Example
//!
//! ```ignore
//! use ph_k64_stream::sync::SharedStream;
//!
//! static STREAM: SharedStream<u16, Edma, Pit, 512> =
//!     SharedStream::new(SampleStream::new(Edma::CH0, Pit::CH0));
//!
//! fn main() {
//!     STREAM.with(|stream| {
//!         stream.init(config).unwrap();
//!         stream.start().unwrap();
//!     });
//! }
//!
//! #[interrupt]
//! fn DMA0_IRQ() {
//!     STREAM.with(|stream| {
//!         stream.on_boundary(Boundary::Half, |half| fill(half)).ok();
//!     });
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedStream;
