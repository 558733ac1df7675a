//! Decompressing domain names from DNS messages.
//!
//! A name in a message may end in a compression pointer: two octets with
//! the top two bits set, the remaining fourteen bits giving an absolute
//! offset into the message where the rest of the name continues. The name
//! may continue with more labels and another pointer there.
//!
//! Pointers may point forward as well as backward. To keep a crafted
//! message from sending the parser around in circles, the number of
//! pointers followed for a single name is limited and the total length of
//! the name is checked against the 255 octet limit as labels are added.

use super::{Name, MAX_NAME_LEN};
use crate::base::cursor::Cursor;
use crate::base::wire::{FormError, ParseError};
use bytes::{BufMut, BytesMut};
use core::fmt;

//------------ Module Configuration ------------------------------------------

/// The maximum number of compression pointers followed for one name.
///
/// A name of at most 255 octets can never need more than 127 pointers.
const MAX_COMPRESSION_POINTERS: usize = 127;

//------------ Name Parsing --------------------------------------------------

impl Name {
    /// Reads a possibly compressed name from a cursor.
    ///
    /// On success, the cursor is left right after the name, that is, after
    /// the root label or after the first compression pointer.
    pub fn parse(cursor: &mut Cursor) -> Result<Self, ParsedNameError> {
        let mut target = BytesMut::with_capacity(32);
        read_labels(cursor, &mut target, 0)?;
        target.put_u8(0);
        Ok(Name::from_wire_unchecked(target.freeze()))
    }

    /// Reads a name from a cursor without failing.
    ///
    /// If the name turns out to be malformed, the error is noted in the
    /// cursor and the labels read up to that point are returned.
    pub(crate) fn parse_lenient(cursor: &mut Cursor) -> Self {
        let mut target = BytesMut::with_capacity(32);
        if let Err(err) = read_labels(cursor, &mut target, 0) {
            cursor.note_error(err.into());
        }
        target.put_u8(0);
        Name::from_wire_unchecked(target.freeze())
    }
}

/// Appends the labels of the name at the cursor to `target`.
///
/// The final root label is not appended.
fn read_labels(
    cursor: &mut Cursor,
    target: &mut BytesMut,
    pointers: usize,
) -> Result<(), ParsedNameError> {
    loop {
        match LabelType::read(cursor)? {
            LabelType::Normal(0) => return Ok(()),
            LabelType::Normal(len) => {
                // Another length octet plus the root label must still fit.
                if target.len() + usize::from(len) + 2 > MAX_NAME_LEN {
                    return Err(ParsedNameError::LongName);
                }
                let label = cursor.read_bytes(usize::from(len));
                target.put_u8(len);
                target.put_slice(&label);
            }
            LabelType::Compressed(ptr) => {
                if pointers >= MAX_COMPRESSION_POINTERS {
                    return Err(ParsedNameError::ExcessiveCompression);
                }
                let mut sub = cursor.sub_cursor(ptr);
                let res = read_labels(&mut sub, target, pointers + 1);
                if let Some(err) = sub.error() {
                    cursor.note_error(err)
                }
                return res;
            }
        }
    }
}

//------------ LabelType -----------------------------------------------------

/// The type of a label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LabelType {
    /// A normal label with its size in octets.
    Normal(u8),

    /// A compressed label with the position of where to continue.
    Compressed(usize),
}

impl LabelType {
    /// Reads the label type at the cursor.
    pub fn read(cursor: &mut Cursor) -> Result<Self, ParsedNameError> {
        let ltype = cursor.read_u8();
        match ltype {
            0..=0x3F => Ok(LabelType::Normal(ltype)),
            0xC0..=0xFF => {
                let res = usize::from(cursor.read_u8());
                let res = res | ((usize::from(ltype) & 0x3F) << 8);
                Ok(LabelType::Compressed(res))
            }
            _ => Err(ParsedNameError::BadLabel),
        }
    }
}

//------------ ParsedNameError -----------------------------------------------

/// Parsing a domain name failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParsedNameError {
    /// A label of one of the reserved types was encountered.
    BadLabel,

    /// The name is longer than the 255 octets allowed.
    LongName,

    /// Too many compression pointers.
    ExcessiveCompression,
}

impl From<ParsedNameError> for FormError {
    fn from(err: ParsedNameError) -> FormError {
        match err {
            ParsedNameError::BadLabel => FormError::new("invalid label type"),
            ParsedNameError::LongName => FormError::new("long domain name"),
            ParsedNameError::ExcessiveCompression => {
                FormError::new("too many compression pointers")
            }
        }
    }
}

impl From<ParsedNameError> for ParseError {
    fn from(err: ParsedNameError) -> ParseError {
        ParseError::Form(err.into())
    }
}

impl fmt::Display for ParsedNameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        FormError::from(*self).fmt(f)
    }
}

impl std::error::Error for ParsedNameError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use bytes::Bytes;

    fn parse_at(
        octets: &'static [u8],
        pos: usize,
    ) -> (Result<Name, ParsedNameError>, Cursor) {
        let mut cursor = Cursor::new(Bytes::from_static(octets));
        cursor.set_pos(pos);
        let res = Name::parse(&mut cursor);
        (res, cursor)
    }

    #[test]
    fn flat() {
        let (name, cursor) =
            parse_at(b"\x03www\x07example\x03com\0\xc0\0", 0);
        assert_eq!(name.unwrap().to_string(), "www.example.com.");
        assert_eq!(cursor.pos(), 17);
    }

    #[test]
    fn root() {
        let (name, cursor) = parse_at(b"\0", 0);
        assert_eq!(name.unwrap().to_string(), ".");
        assert_eq!(cursor.pos(), 1);
    }

    #[test]
    fn pointer_to_earlier_name() {
        let (name, cursor) =
            parse_at(b"\x04test\x03com\0\x03www\x07example\xc0\0", 10);
        assert_eq!(name.unwrap().to_string(), "www.example.test.com.");
        assert_eq!(cursor.pos(), 24);
    }

    #[test]
    fn pointer_only() {
        let (name, cursor) = parse_at(b"\x03www\x07example\x03com\0\xc0\0", 17);
        assert_eq!(name.unwrap().to_string(), "www.example.com.");
        assert_eq!(cursor.pos(), 19);
    }

    #[test]
    fn chained_pointers() {
        let (name, cursor) =
            parse_at(b"\x03com\0\x07example\xc0\0\x03www\xc0\x05", 15);
        assert_eq!(name.unwrap().to_string(), "www.example.com.");
        assert_eq!(cursor.pos(), 21);
    }

    #[test]
    fn forward_pointer() {
        let (name, cursor) = parse_at(b"\x03www\xc0\x06\x03com\0", 0);
        assert_eq!(name.unwrap().to_string(), "www.com.");
        assert_eq!(cursor.pos(), 6);
    }

    #[test]
    fn pointer_to_itself() {
        let (name, _) = parse_at(b"\x03www\xc0\x04", 0);
        assert_eq!(name, Err(ParsedNameError::ExcessiveCompression));
    }

    #[test]
    fn pointer_loop_with_labels() {
        let (name, _) = parse_at(b"\x01a\xc0\x00", 0);
        assert_eq!(name, Err(ParsedNameError::LongName));
    }

    #[test]
    fn pointer_out_of_buffer() {
        let (name, cursor) = parse_at(b"\x03www\xc0\x40", 0);
        assert_eq!(name.unwrap().to_string(), "www.");
        assert!(cursor.overrun());
    }

    #[test]
    fn bad_label_type() {
        let (name, _) = parse_at(b"\x03www\x40", 0);
        assert_eq!(name, Err(ParsedNameError::BadLabel));
    }

    #[test]
    fn lenient_keeps_labels() {
        let mut cursor = Cursor::new(Bytes::from_static(b"\x03www\xc0\x04"));
        let name = cursor.read_name();
        assert_eq!(name.to_string(), "www.");
        assert_eq!(
            cursor.check(),
            Err(ParseError::form_error("too many compression pointers"))
        );
    }

    #[test]
    fn truncated_label() {
        let mut cursor = Cursor::new(Bytes::from_static(b"\x05ab"));
        let name = cursor.read_name();
        assert_eq!(name.as_slice(), b"\x05ab\0\0\0\0");
        assert!(cursor.overrun());
    }
}
