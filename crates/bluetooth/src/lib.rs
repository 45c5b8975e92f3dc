//! Bluetooth media control vocabulary: MCS opcodes and states, search control
//! items and OTS object identifiers.
//!
//! This crate is `no_std` by default; it only uses `core` + `heapless`.
//! Nothing here talks to a radio. GATT and OTS transport are left to the host
//! stack, which moves the byte encodings defined here.

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![allow(missing_docs)]

pub mod mcs;
pub mod ots;
pub mod search;

pub use mcs::{Command, CommandNotification, MediaState, Opcode, PlayingOrder, ResultCode};
pub use ots::{ObjectId, ObjectType, NO_OBJECT};
pub use search::{parse_search, SearchBuilder, SearchControlItem, SearchError, SearchType};
