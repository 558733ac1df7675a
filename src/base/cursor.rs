//! Reading data in wire format.
//!
//! The [`Cursor`] reads big-endian integers, octet sequences, character
//! strings and domain names from a shared octets buffer.
//!
//! Reading is lenient. Any read that runs past the end of the buffer yields
//! zero octets instead of failing, so a truncated record degrades into
//! nonsensical field values rather than aborting the whole message. Every
//! such overrun, as well as every malformed domain name, is remembered by
//! the cursor. Strict consumers, such as [`Message::from_bytes`], check
//! [`Cursor::check`] once at the end of parsing and reject the message if
//! anything went wrong along the way.
//!
//! [`Message::from_bytes`]: crate::base::message::Message::from_bytes

use super::name::Name;
use super::wire::ParseError;
use bytes::{BufMut, Bytes, BytesMut};

//------------ Cursor --------------------------------------------------------

/// A read position into a buffer of wire data.
///
/// The buffer itself is a [`Bytes`] value so cursors are cheap to clone.
/// Following a compression pointer creates a new cursor over the same
/// buffer at the pointer's target.
#[derive(Clone, Debug)]
pub struct Cursor {
    /// The underlying octets.
    octets: Bytes,

    /// The current read position.
    pos: usize,

    /// The first error encountered while reading, if any.
    error: Option<ParseError>,
}

/// # Creation and Position
///
impl Cursor {
    /// Creates a new cursor at the start of the given octets.
    pub fn new(octets: impl Into<Bytes>) -> Self {
        Cursor {
            octets: octets.into(),
            pos: 0,
            error: None,
        }
    }

    /// Creates a cursor over the same octets at the given position.
    ///
    /// The new cursor starts out without an error.
    pub fn sub_cursor(&self, pos: usize) -> Self {
        let mut res = Cursor::new(self.octets.clone());
        res.set_pos(pos);
        res
    }

    /// Returns a reference to the underlying octets.
    pub fn octets(&self) -> &Bytes {
        &self.octets
    }

    /// Returns the current read position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Moves the read position.
    ///
    /// A position beyond the end of the octets is clamped to the end and
    /// noted as an overrun.
    pub fn set_pos(&mut self, pos: usize) {
        if pos > self.octets.len() {
            self.note_error(ParseError::ShortInput);
            self.pos = self.octets.len();
        } else {
            self.pos = pos
        }
    }

    /// Returns the length of the underlying octets.
    pub fn len(&self) -> usize {
        self.octets.len()
    }

    /// Returns whether the underlying octets are empty.
    pub fn is_empty(&self) -> bool {
        self.octets.is_empty()
    }

    /// Returns the number of octets left to read.
    pub fn remaining(&self) -> usize {
        self.octets.len() - self.pos
    }
}

/// # Error State
///
impl Cursor {
    /// Returns the first error noted while reading.
    pub fn error(&self) -> Option<ParseError> {
        self.error
    }

    /// Returns whether any read went past the end of the octets.
    pub fn overrun(&self) -> bool {
        matches!(self.error, Some(ParseError::ShortInput))
    }

    /// Returns an error if anything went wrong while reading.
    pub fn check(&self) -> Result<(), ParseError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Notes an error unless an earlier one has been noted already.
    pub fn note_error(&mut self, err: ParseError) {
        if self.error.is_none() {
            self.error = Some(err)
        }
    }
}

/// # Reading
///
impl Cursor {
    /// Reads a single octet.
    ///
    /// Returns zero without advancing if the cursor is at the end.
    pub fn read_u8(&mut self) -> u8 {
        match self.octets.get(self.pos) {
            Some(&octet) => {
                self.pos += 1;
                octet
            }
            None => {
                self.note_error(ParseError::ShortInput);
                0
            }
        }
    }

    /// Reads a big-endian 16 bit integer.
    pub fn read_u16(&mut self) -> u16 {
        let hi = u16::from(self.read_u8());
        let lo = u16::from(self.read_u8());
        (hi << 8) | lo
    }

    /// Reads a big-endian 32 bit integer.
    pub fn read_u32(&mut self) -> u32 {
        let hi = u32::from(self.read_u16());
        let lo = u32::from(self.read_u16());
        (hi << 16) | lo
    }

    /// Moves the position by `delta` octets and reads a 16 bit integer.
    ///
    /// The delta may be negative. This is used by record data parsers to
    /// reread the record data length that precedes the data.
    pub fn read_u16_at_offset(&mut self, delta: isize) -> u16 {
        match self.pos.checked_add_signed(delta) {
            Some(pos) => self.set_pos(pos),
            None => {
                self.note_error(ParseError::ShortInput);
                self.pos = 0;
            }
        }
        self.read_u16()
    }

    /// Reads exactly `len` octets.
    ///
    /// If fewer octets are left, the result is padded with zeros.
    pub fn read_bytes(&mut self, len: usize) -> Bytes {
        let end = self.pos + len;
        if end <= self.octets.len() {
            let res = self.octets.slice(self.pos..end);
            self.pos = end;
            res
        } else {
            let mut res = BytesMut::with_capacity(len);
            res.put_slice(&self.octets[self.pos..]);
            res.put_bytes(0, end - self.octets.len());
            self.pos = self.octets.len();
            self.note_error(ParseError::ShortInput);
            res.freeze()
        }
    }

    /// Reads a character string.
    ///
    /// A character string is a single length octet followed by that many
    /// octets of content. Only the content is returned.
    pub fn read_string(&mut self) -> Bytes {
        let len = self.read_u8();
        self.read_bytes(usize::from(len))
    }

    /// Reads a possibly compressed domain name.
    ///
    /// If the name is malformed, the labels read so far are returned and
    /// the error is noted.
    pub fn read_name(&mut self) -> Name {
        Name::parse_lenient(self)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn read_integers() {
        let mut cursor =
            Cursor::new(Bytes::from_static(b"\x01\x02\x03\x04\x05\x06\x07"));
        assert_eq!(cursor.read_u8(), 1);
        assert_eq!(cursor.read_u16(), 0x0203);
        assert_eq!(cursor.read_u32(), 0x0405_0607);
        assert_eq!(cursor.pos(), 7);
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.check().is_ok());
    }

    #[test]
    fn read_past_end_yields_zero() {
        let mut cursor = Cursor::new(Bytes::from_static(b"\x01"));
        assert_eq!(cursor.read_u16(), 0x0100);
        assert_eq!(cursor.read_u8(), 0);
        assert_eq!(cursor.read_u32(), 0);
        assert_eq!(cursor.pos(), 1);
        assert!(cursor.overrun());
        assert_eq!(cursor.check(), Err(ParseError::ShortInput));
    }

    #[test]
    fn rewind_and_reread() {
        let mut cursor = Cursor::new(Bytes::from_static(b"\x00\x04abcd"));
        assert_eq!(cursor.read_u16(), 4);
        assert_eq!(cursor.read_u16_at_offset(-2), 4);
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.read_bytes(4).as_ref(), b"abcd");
        assert!(cursor.check().is_ok());
    }

    #[test]
    fn rewind_before_start() {
        let mut cursor = Cursor::new(Bytes::from_static(b"\x12\x34"));
        assert_eq!(cursor.read_u16_at_offset(-4), 0x1234);
        assert!(cursor.overrun());
    }

    #[test]
    fn read_bytes_padded() {
        let mut cursor = Cursor::new(Bytes::from_static(b"ab"));
        assert_eq!(cursor.read_bytes(4).as_ref(), b"ab\0\0");
        assert_eq!(cursor.pos(), 2);
        assert!(cursor.overrun());
    }

    #[test]
    fn read_string() {
        let mut cursor = Cursor::new(Bytes::from_static(b"\x03foo\x00\x02"));
        assert_eq!(cursor.read_string().as_ref(), b"foo");
        assert_eq!(cursor.read_string().as_ref(), b"");
        assert_eq!(cursor.read_string().as_ref(), b"\0\0");
        assert!(cursor.overrun());
    }

    #[test]
    fn set_pos_clamps() {
        let mut cursor = Cursor::new(Bytes::from_static(b"abc"));
        cursor.set_pos(2);
        assert!(cursor.check().is_ok());
        cursor.set_pos(10);
        assert_eq!(cursor.pos(), 3);
        assert!(cursor.overrun());
    }
}
