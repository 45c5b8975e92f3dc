//! Hardware Abstraction Layer (HAL) for the media control kit
//!
//! This crate provides trait-based abstractions for the analog hardware the
//! firmware drives, enabling development and testing without physical
//! hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (media-proxy, firmware)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Register Layer (RegisterBlock: MMIO or mock)
//! ```
//!
//! # Modules
//!
//! - [`comparator`] - Analog comparator configuration and driver trait
//! - [`newtypes`] - Range-checked comparator parameters
//! - [`registers`] - 32-bit register block access
//! - [`mocks`] - In-memory registers and comparator (tests, `std` feature)
//!
//! # Features
//!
//! - `std`: Enable standard library support (for testing)
//! - `defmt`: Enable defmt logging
//!
//! # Example
//!
//! ```no_run
//! use platform::{AnalogComparator, ComparatorConfig, ComparatorInput};
//!
//! fn example<C: AnalogComparator>(cmp: &mut C) -> Result<bool, C::Error> {
//!     let config = ComparatorConfig {
//!         negative: ComparatorInput::VbDiv,
//!         ..ComparatorConfig::default()
//!     };
//!     cmp.configure(&config)?;
//!     cmp.sample()
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors; callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod comparator;
pub mod mocks;
pub mod newtypes;
pub mod registers;

// Re-export the comparator interface
pub use comparator::{
    Accuracy, AnalogComparator, AttributeKind, ComparatorAttribute, ComparatorConfig,
    ComparatorInput, EdgeTrigger, InputRange, PowerSource, VbReference,
};
pub use newtypes::{
    AportSelect, BiasProgram, FilterCount, HysteresisLevel, OutOfRangeError, OutputLocation,
    VaSelect, VddDivider,
};
pub use registers::{MmioRegisterBlock, RegisterBlock};
