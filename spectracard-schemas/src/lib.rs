//! Data model shared by the spectracard crates: channel definitions, card
//! configuration, host state snapshots and their on-disk file wrappers.

pub mod channel;
pub mod config;
pub mod file_formats;
pub mod host;
