//! Basics.
//!
//! This module provides types and traits for working with DNS data. The
//! types allow creating such data from scratch and processing it. Crucially,
//! the module provides means to extract the data from wire-format DNS
//! messages and assemble such messages.
//!
//!
//! ## Parsing and Composing Messages
//!
//! In order to easily distinguish the process of creating and disecting
//! wire-format messages from other forms of representation conversion, we
//! use the term *parsing* for extracting data from a wire-format
//! representation and *composing* for producing such a representation.
//!
//! Parsing happens through a [`Cursor`] over the complete message. This is
//! necessary since compressed domain names may refer to any earlier part
//! of the message. The cursor is lenient: reading past the end of the data
//! yields zeros and records an error rather than failing right away. Which
//! callers care about that error is up to them. [`Message::from_bytes`]
//! refuses truncated messages while [`Message::from_bytes_lenient`] keeps
//! whatever could be read.
//!
//! Composing is done through the [`Compose`] trait which writes a value
//! into any [`BufMut`][bytes::BufMut]. Domain names are never compressed
//! when composing.
//!
//! Instead of dealing with cursors directly, the types [`Message`] and
//! [`MessageBuilder`] are there to make parsing and constructing DNS
//! messages easy.
//!
//!
//! # Types for DNS Data
//!
//! The module contains a number of types for DNS data, both fundamental
//! and composed. Because they often come with a number of support types,
//! they are arranged in submodules. These are:
//!
//! * [charstr] for DNS character strings,
//! * [header] for the header of DNS messages,
//! * [iana] for the IANA registered parameters such as record types,
//! * [name] for domain names,
//! * [question] for questions,
//! * [record] for DNS resource records, and
//! * [rdata] for the basic traits of record data.
//!
//! The record data for the individual record types lives in the top-level
//! [rdata][crate::rdata] module.

//--- Re-exports

pub use self::charstr::CharStr;
pub use self::cursor::Cursor;
pub use self::header::{Header, HeaderCounts, HeaderSection};
pub use self::iana::{Class, Opcode, Rcode, Rtype};
pub use self::message::Message;
pub use self::message_builder::{MessageBuilder, PushError};
pub use self::name::Name;
pub use self::question::Question;
pub use self::rdata::{RecordData, UnknownRecordData};
pub use self::record::Record;
pub use self::wire::{Compose, FormError, ParseError};

//--- Modules

pub mod charstr;
pub mod cursor;
pub(crate) mod dig_printer;
pub mod header;
pub mod iana;
pub mod message;
pub mod message_builder;
pub mod name;
pub mod question;
pub mod rdata;
pub mod record;
pub mod wire;
