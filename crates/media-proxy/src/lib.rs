//! Media proxy: routes media control calls to a local or remote player,
//! plus the command shell and the position update task built on it.
#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![allow(missing_docs)]

// Must come first so the logging macros are visible to the other modules.
mod fmt;

pub mod config;
pub mod local;
pub mod position;
pub mod proxy;
pub mod shell;

pub use local::LocalMediaPlayer;
pub use position::{position_step, run_position_updates};
pub use proxy::{
    read_local, Controller, LocalPlayer, MediaProxy, NoRemote, PlayerHandle, Property, ProxyError, RemoteClient,
    Request, Value,
};
pub use shell::{Shell, ShellError, COMMANDS};
