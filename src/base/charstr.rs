//! Character strings.
//!
//! The somewhat ill-named `<character-string>` is defined in [RFC 1035] as
//! binary information of up to 255 octets. As such, it doesn’t necessarily
//! contain (ASCII-) characters nor is it a string in a Rust-sense.
//!
//! In wire-format, character strings are encoded as one octet giving the
//! length followed by the actual data in that many octets. The length octet
//! is not part of the content wrapped by [`CharStr`], it contains the data
//! only.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

use super::cursor::Cursor;
use super::wire::Compose;
use bytes::{BufMut, Bytes};
use core::{fmt, str};

//------------ CharStr -------------------------------------------------------

/// The content of a DNS character string.
///
/// A character string consists of up to 255 octets of binary data. The
/// type guarantees this limit.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
pub struct CharStr(Bytes);

impl CharStr {
    /// Creates a character string from octets.
    ///
    /// Returns an error if there are more than 255 octets.
    pub fn from_octets(octets: impl Into<Bytes>) -> Result<Self, LongString> {
        let octets = octets.into();
        if octets.len() > 255 {
            Err(LongString)
        } else {
            Ok(CharStr(octets))
        }
    }

    /// Returns the content as an octets slice.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns the length of the content in octets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the character string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads a character string from the cursor.
    pub fn read(cursor: &mut Cursor) -> Self {
        CharStr(cursor.read_string())
    }
}

//--- FromStr

impl str::FromStr for CharStr {
    type Err = LongString;

    /// Creates a character string from the octets of a Rust string.
    ///
    /// No escape sequences are processed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharStr::from_octets(Bytes::copy_from_slice(s.as_bytes()))
    }
}

//--- Compose

impl Compose for CharStr {
    fn compose_len(&self) -> usize {
        self.0.len() + 1
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        target.put_u8(self.0.len() as u8);
        target.put_slice(self.as_slice());
    }
}

//--- Display and Debug

impl fmt::Display for CharStr {
    /// Formats the content escaped for use within double quotes.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &ch in self.as_slice() {
            match ch {
                b'"' | b'\\' => write!(f, "\\{}", ch as char)?,
                0x20..=0x7E => write!(f, "{}", ch as char)?,
                _ => write!(f, "\\{:03}", ch)?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for CharStr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CharStr(\"{}\")", self)
    }
}

//------------ LongString ----------------------------------------------------

/// A character string has more than 255 octets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LongString;

impl fmt::Display for LongString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("character string with more than 255 octets")
    }
}

impl std::error::Error for LongString {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_escapes() {
        let s = CharStr::from_octets(&b"say \"hi\"\\\x07"[..]).unwrap();
        assert_eq!(s.to_string(), "say \\\"hi\\\"\\\\\\007");
    }

    #[test]
    fn length_limit() {
        assert!(CharStr::from_octets(vec![b'a'; 255]).is_ok());
        assert_eq!(CharStr::from_octets(vec![b'a'; 256]), Err(LongString));
    }

    #[test]
    fn compose_and_read() {
        let s: CharStr = "hello".parse().unwrap();
        let mut buf = Vec::new();
        s.compose(&mut buf);
        assert_eq!(buf.as_slice(), b"\x05hello");
        let mut cursor = Cursor::new(buf);
        assert_eq!(CharStr::read(&mut cursor), s);
    }
}
