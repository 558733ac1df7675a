//! An asynchronous stub resolver.
//!
//! A resolver is the component in the DNS that answers queries. A stub
//! resolver does so by simply relaying queries to a different resolver
//! chosen from a predefined set. This is how pretty much all user
//! applications use DNS.
//!
//! This module implements a simple stub resolver on top of tokio. It
//! queries the configured servers over UDP or TCP, one after another,
//! and keeps successful responses in a cache.
//!
//! The main type is [`StubResolver`]. It is configured through a
//! [`ResolvConf`] which, by default, is read from the system’s
//! `/etc/resolv.conf`. Queries return a [`Response`].
//!
//! The transports are available through the [`udp`] and [`tcp`] modules
//! for sending a single request to a single server.

pub use self::conf::ResolvConf;
pub use self::response::Response;
pub use self::stub::StubResolver;

pub mod cache;
pub mod clock;
pub mod conf;
pub mod error;
pub mod response;
pub mod stub;
pub mod tcp;
pub mod udp;
