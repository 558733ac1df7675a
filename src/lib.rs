//! A DNS message codec and stub resolver.
//!
//! This crate provides the building blocks for asking questions of the DNS
//! the way the resolver part of the C library does: it constructs queries,
//! sends them to a set of configured recursive name servers over UDP or
//! TCP, and parses the wire-format responses into resource records with
//! typed record data.
//!
//! # Modules
//!
//! A set of modules providing fundamental types and functionality is always
//! enabled:
//!
//! * [base] contains the types to deal with DNS data such as domain names,
//!   questions, records, and messages, as well as parsing and composing
//!   them in wire format,
//! * [rdata] contains the record data for the record types a stub
//!   resolver commonly encounters, and
//! * [utils] contains a few helpers for textual representations.
//!
#![cfg_attr(feature = "resolv", doc = "* [resolv]:")]
#![cfg_attr(not(feature = "resolv"), doc = "* resolv:")]
//!   An asynchronous stub resolver based on the
//!   [Tokio](https://tokio.rs/) async runtime, including a response cache.
//!
//! # Reference of Feature Flags
//!
//! * `resolv`: Enables the asynchronous stub resolver in the [resolv]
//!   module. This adds dependencies on tokio, moka, rand, and tracing.
//! * `resolv-sync`: Enables the synchronous wrappers around the stub
//!   resolver which run a query on a runtime of their own. Implies
//!   `resolv`.
//!
//! `resolv-sync` is enabled by default.

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod rdata;
#[cfg(feature = "resolv")]
#[cfg_attr(docsrs, doc(cfg(feature = "resolv")))]
pub mod resolv;
pub mod utils;

#[cfg(test)]
pub(crate) mod logging;
