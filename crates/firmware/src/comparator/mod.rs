//! Analog comparator support for the EFR32 ACMP block.
//!
//! [`registers`] holds the register map; [`driver`] turns a
//! [`platform::ComparatorConfig`] into register writes and services the
//! edge interrupt.

pub mod driver;
pub mod registers;

pub use driver::{handle_interrupt, Acmp, AcmpError, EdgeEvent, FILTER_SAMPLE_INTERVAL_US};
