//! Resource record data.
//!
//! Each resource record type has it’s own definition of the content and
//! formatting of its data. This module provides the basics for implementing
//! specific types for this record data. The concrete implementations for
//! well-known record types live in the top-level [`rdata`][crate::rdata]
//! module.
//!
//! Any type that represents record data implements [`RecordData`]. The
//! module also provides a type, [`UnknownRecordData`], that keeps the raw
//! data of record types that are not implemented.
//!
//! Record data parsers are handed a cursor positioned at the start of the
//! record data, directly after the RDLENGTH field of the record. Parsers
//! of types with a variable-length trailing field reread that length via
//! [`reread_rdlen`] to find out how much data there is.

use super::cursor::Cursor;
use super::iana::Rtype;
use super::wire::Compose;
use bytes::{BufMut, Bytes};
use core::fmt;

//----------- RecordData -----------------------------------------------------

/// A type that represents record data.
///
/// The type needs to be able to to be able to provide the record type of a
/// record with a value’s data via the [`rtype`][Self::rtype] method. It
/// must be composable into wire format and displayable in presentation
/// format.
pub trait RecordData: Compose + fmt::Display {
    /// Returns the record type associated with this record data instance.
    ///
    /// This is a method rather than an associated function to allow one
    /// type to be used for several real record types.
    fn rtype(&self) -> Rtype;
}

//------------ Helpers for Parsers -------------------------------------------

/// Rereads the record data length.
///
/// The cursor must be positioned at the start of the record data. It is
/// moved back two octets to reread the RDLENGTH field which leaves it at the
/// start of the record data again.
pub fn reread_rdlen(cursor: &mut Cursor) -> usize {
    usize::from(cursor.read_u16_at_offset(-2))
}

/// Reads the rest of the record data.
///
/// The record data started at `start` and is `rdlen` octets long. If the
/// cursor has already moved past the end of the data, the result is empty.
pub fn read_remaining(cursor: &mut Cursor, start: usize, rdlen: usize) -> Bytes {
    let used = cursor.pos().saturating_sub(start);
    cursor.read_bytes(rdlen.saturating_sub(used))
}

//------------ UnknownRecordData ---------------------------------------------

/// A type for parsing any type of record data.
///
/// This type accepts any record type and stores the plain, unparsed record
/// data as an octets sequence. It is used for placeholder types that are
/// defined but not supported as well as for record types that are not known
/// at all.
///
/// The presentation format of this type is always the fixed marker
/// `not-used`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct UnknownRecordData {
    /// The record type of this data.
    rtype: Rtype,

    /// The record data.
    data: Bytes,
}

impl UnknownRecordData {
    /// Creates generic record data from a bytes slice.
    pub fn from_octets(rtype: Rtype, data: impl Into<Bytes>) -> Self {
        UnknownRecordData {
            rtype,
            data: data.into(),
        }
    }

    /// Returns a reference to the record data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Reads the complete record data of a record of the given type.
    pub fn parse(rtype: Rtype, cursor: &mut Cursor) -> Self {
        let rdlen = reread_rdlen(cursor);
        UnknownRecordData {
            rtype,
            data: cursor.read_bytes(rdlen),
        }
    }
}

//--- RecordData and Compose

impl RecordData for UnknownRecordData {
    fn rtype(&self) -> Rtype {
        self.rtype
    }
}

impl Compose for UnknownRecordData {
    fn compose_len(&self) -> usize {
        self.data.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        target.put_slice(self.data.as_ref())
    }
}

//--- Display

impl fmt::Display for UnknownRecordData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("not-used")
    }
}

//============ Testing =======================================================

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Returns a cursor positioned at the start of the given record data.
    ///
    /// The data is preceded by its RDLENGTH so it can be reread.
    pub(crate) fn rdata_cursor(rdata: &[u8]) -> Cursor {
        let mut wire = Vec::new();
        (rdata.len() as u16).compose(&mut wire);
        wire.extend_from_slice(rdata);
        let mut cursor = Cursor::new(wire);
        cursor.set_pos(2);
        cursor
    }

    #[test]
    fn parse_unknown() {
        let mut cursor = Cursor::new(&b"\x00\x03abcxyz"[..]);
        cursor.set_pos(2);
        let data = UnknownRecordData::parse(Rtype::from_int(65280), &mut cursor);
        assert_eq!(data.data().as_ref(), b"abc");
        assert_eq!(cursor.pos(), 5);
        assert_eq!(data.rtype(), Rtype::from_int(65280));
        assert_eq!(data.to_string(), "not-used");
    }

    #[test]
    fn read_remaining_after_fixed_fields() {
        let mut cursor = Cursor::new(&b"\x00\x05\x01\x02tail"[..]);
        cursor.set_pos(2);
        let start = cursor.pos();
        let rdlen = reread_rdlen(&mut cursor);
        assert_eq!(cursor.read_u16(), 0x0102);
        assert_eq!(read_remaining(&mut cursor, start, rdlen).as_ref(), b"tai");
        assert!(cursor.check().is_ok());
    }
}
