//! Various utility modules.

pub mod base16;
pub mod base64;

#[cfg(feature = "resolv")]
pub(crate) mod config;
