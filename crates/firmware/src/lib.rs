//! Media control kit firmware drivers
//!
//! Concrete peripheral drivers behind the `platform` traits.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (media-proxy, playback)
//!         ↓
//! Platform HAL (platform: AnalogComparator, RegisterBlock)
//!         ↓
//! Peripheral drivers (this crate: comparator::Acmp)
//!         ↓
//! Registers (MmioRegisterBlock on target, MockRegisterBlock in tests)
//! ```
//!
//! # Features
//!
//! - `defmt` - Log driver activity and derive `defmt::Format`
//! - `std` - Enable standard library (for testing)

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// unsafe fn body is not implicitly unsafe block
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
// Pedantic lints too noisy for register-level code:
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
// Register field constants are documented by their names.
#![allow(missing_docs)]

pub mod comparator;

pub use comparator::{Acmp, AcmpError, EdgeEvent};
