//! Domain names.
//!
//! A domain name is a sequence of labels. In wire format, each label is
//! preceded by a length octet and the sequence is terminated by the empty
//! root label. Names can be compressed in messages by replacing a suffix
//! with a pointer to an earlier occurence of that suffix. This module
//! provides the owned, always absolute [`Name`] which keeps its labels in
//! uncompressed wire format. Decompressing a name out of a message is
//! implemented in the [`parsed`] submodule.
//!
//! In presentation format, labels are separated by dots and a name always
//! ends in a dot. Names given without the final dot are treated as
//! absolute anyway, so `"example.com"` and `"example.com."` are the same
//! name.
//!
//! Names compare and hash case-insensitively, as required by [RFC 4343].
//!
//! [RFC 4343]: https://tools.ietf.org/html/rfc4343

pub use self::parsed::{LabelType, ParsedNameError};

use super::wire::Compose;
use bytes::{BufMut, Bytes, BytesMut};
use core::{cmp, fmt, hash, str};
use std::net::IpAddr;

pub mod parsed;

//------------ Module Configuration ------------------------------------------

/// The maximum length of a label in octets.
pub const MAX_LABEL_LEN: usize = 63;

/// The maximum length of a name in wire format.
pub const MAX_NAME_LEN: usize = 255;

//------------ Name ----------------------------------------------------------

/// An absolute domain name.
///
/// The name keeps its labels in uncompressed wire format, including the
/// final root label. It is cheap to clone.
#[derive(Clone)]
pub struct Name {
    octets: Bytes,
}

/// # Creation
///
impl Name {
    /// Returns the root name.
    pub fn root() -> Self {
        Name {
            octets: Bytes::from_static(b"\0"),
        }
    }

    /// Creates a name from its uncompressed wire format.
    ///
    /// The caller has to make sure that the octets are a correctly encoded
    /// absolute name.
    pub(crate) fn from_wire_unchecked(octets: Bytes) -> Self {
        Name { octets }
    }

    /// Returns the reverse lookup name for an address.
    ///
    /// For IPv4 addresses this is a name under `in-addr.arpa.` with the
    /// octets in reverse order. For IPv6 addresses, it is a name under
    /// `ip6.arpa.` with one label for each nibble, again in reverse order.
    pub fn reverse_from_addr(addr: IpAddr) -> Self {
        let mut octets = BytesMut::with_capacity(74);
        match addr {
            IpAddr::V4(addr) => {
                for octet in addr.octets().iter().rev() {
                    let label = octet.to_string();
                    octets.put_u8(label.len() as u8);
                    octets.put_slice(label.as_bytes());
                }
                octets.put_slice(b"\x07in-addr\x04arpa\0");
            }
            IpAddr::V6(addr) => {
                for octet in addr.octets().iter().rev() {
                    octets.put_u8(1);
                    octets.put_u8(hex_digit(octet & 0x0F));
                    octets.put_u8(1);
                    octets.put_u8(hex_digit(octet >> 4));
                }
                octets.put_slice(b"\x03ip6\x04arpa\0");
            }
        }
        Name::from_wire_unchecked(octets.freeze())
    }

    /// Returns the ENUM name for a telephone number.
    ///
    /// The number is given in E.164 format. Plus signs, dashes, dots, and
    /// spaces are ignored. Each remaining digit becomes a label of the
    /// result in reverse order under `e164.arpa.` as described in
    /// [RFC 6116].
    ///
    /// [RFC 6116]: https://tools.ietf.org/html/rfc6116
    pub fn enum_from_number(number: &str) -> Result<Self, FromStrError> {
        let mut digits = Vec::new();
        for ch in number.chars() {
            match ch {
                '0'..='9' => digits.push(ch as u8),
                '+' | '-' | '.' | ' ' => {}
                _ => return Err(FromStrError::IllegalCharacter(ch)),
            }
        }
        if digits.is_empty() {
            return Err(FromStrError::EmptyLabel);
        }
        if digits.len() * 2 + 11 > MAX_NAME_LEN {
            return Err(FromStrError::LongName);
        }
        let mut octets = BytesMut::with_capacity(digits.len() * 2 + 11);
        for digit in digits.iter().rev() {
            octets.put_u8(1);
            octets.put_u8(*digit);
        }
        octets.put_slice(b"\x04e164\x04arpa\0");
        Ok(Name::from_wire_unchecked(octets.freeze()))
    }
}

/// # Properties and Labels
///
impl Name {
    /// Returns the uncompressed wire format of the name.
    pub fn as_slice(&self) -> &[u8] {
        self.octets.as_ref()
    }

    /// Returns whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.octets.len() == 1
    }

    /// Returns an iterator over the labels of the name.
    ///
    /// The final root label is not included.
    pub fn iter_labels(&self) -> LabelIter {
        LabelIter {
            slice: self.as_slice(),
        }
    }

    /// Returns the number of labels, not counting the root label.
    pub fn label_count(&self) -> usize {
        self.iter_labels().count()
    }

    /// Returns whether two names are equal ignoring ASCII case.
    pub fn name_eq(&self, other: &Self) -> bool {
        self.octets.eq_ignore_ascii_case(&other.octets)
    }

    /// Compares two names ignoring ASCII case.
    ///
    /// The labels are compared left to right, so `a.com.` sorts before
    /// `b.com.`. A name that is a prefix of another sorts first.
    pub fn name_cmp(&self, other: &Self) -> cmp::Ordering {
        let mut left = self.iter_labels();
        let mut right = other.iter_labels();
        loop {
            match (left.next(), right.next()) {
                (Some(l), Some(r)) => {
                    let ord = l
                        .iter()
                        .map(u8::to_ascii_lowercase)
                        .cmp(r.iter().map(u8::to_ascii_lowercase));
                    if ord != cmp::Ordering::Equal {
                        return ord;
                    }
                }
                (None, Some(_)) => return cmp::Ordering::Less,
                (Some(_), None) => return cmp::Ordering::Greater,
                (None, None) => return cmp::Ordering::Equal,
            }
        }
    }

    /// Returns whether `self` is `base` or a name below it.
    pub fn ends_with(&self, base: &Self) -> bool {
        let own: Vec<_> = self.iter_labels().collect();
        let base: Vec<_> = base.iter_labels().collect();
        if base.len() > own.len() {
            return false;
        }
        own[own.len() - base.len()..]
            .iter()
            .zip(base.iter())
            .all(|(l, r)| l.eq_ignore_ascii_case(r))
    }
}

//--- FromStr

impl str::FromStr for Name {
    type Err = FromStrError;

    /// Parses a name from its presentation format.
    ///
    /// A missing final dot is added. Backslash escapes of the form `\X`
    /// for a literal character and `\DDD` for a decimal octet value are
    /// recognized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "." {
            return Ok(Name::root());
        }
        let mut octets = BytesMut::with_capacity(s.len() + 2);
        let mut label = Vec::with_capacity(MAX_LABEL_LEN);
        let mut chars = s.chars();
        let mut last_was_dot = false;
        while let Some(ch) = chars.next() {
            last_was_dot = false;
            match ch {
                '.' => {
                    push_label(&mut octets, &label)?;
                    label.clear();
                    last_was_dot = true;
                }
                '\\' => label.push(parse_escape(&mut chars)?),
                ' '..='~' => label.push(ch as u8),
                _ => return Err(FromStrError::IllegalCharacter(ch)),
            }
        }
        if !last_was_dot {
            push_label(&mut octets, &label)?;
        }
        if octets.len() + 1 > MAX_NAME_LEN {
            return Err(FromStrError::LongName);
        }
        octets.put_u8(0);
        Ok(Name::from_wire_unchecked(octets.freeze()))
    }
}

fn push_label(octets: &mut BytesMut, label: &[u8]) -> Result<(), FromStrError> {
    if label.is_empty() {
        return Err(FromStrError::EmptyLabel);
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(FromStrError::LongLabel);
    }
    octets.put_u8(label.len() as u8);
    octets.put_slice(label);
    Ok(())
}

fn parse_escape(chars: &mut str::Chars) -> Result<u8, FromStrError> {
    let ch = chars.next().ok_or(FromStrError::BadEscape)?;
    if let Some(hundreds) = ch.to_digit(10) {
        let tens = chars
            .next()
            .and_then(|ch| ch.to_digit(10))
            .ok_or(FromStrError::BadEscape)?;
        let ones = chars
            .next()
            .and_then(|ch| ch.to_digit(10))
            .ok_or(FromStrError::BadEscape)?;
        u8::try_from(hundreds * 100 + tens * 10 + ones)
            .map_err(|_| FromStrError::BadEscape)
    } else if ch.is_ascii() {
        Ok(ch as u8)
    } else {
        Err(FromStrError::IllegalCharacter(ch))
    }
}

fn hex_digit(nibble: u8) -> u8 {
    b"0123456789abcdef"[usize::from(nibble & 0x0F)]
}

//--- Compose

impl Compose for Name {
    fn compose_len(&self) -> usize {
        self.octets.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        target.put_slice(self.as_slice())
    }
}

//--- PartialEq, Eq, PartialOrd, Ord, and Hash

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.name_eq(other)
    }
}

impl Eq for Name {}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.name_cmp(other)
    }
}

impl hash::Hash for Name {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for octet in self.octets.iter() {
            state.write_u8(octet.to_ascii_lowercase())
        }
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        for label in self.iter_labels() {
            for &octet in label {
                match octet {
                    b'.' | b'\\' => write!(f, "\\{}", octet as char)?,
                    0x21..=0x7E => write!(f, "{}", octet as char)?,
                    _ => write!(f, "\\{:03}", octet)?,
                }
            }
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({})", self)
    }
}

//------------ LabelIter -----------------------------------------------------

/// An iterator over the labels of a [`Name`].
#[derive(Clone, Debug)]
pub struct LabelIter<'a> {
    slice: &'a [u8],
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, rest) = self.slice.split_first()?;
        let len = usize::from(len);
        if len == 0 || len > rest.len() {
            self.slice = &[];
            return None;
        }
        let (label, rest) = rest.split_at(len);
        self.slice = rest;
        Some(label)
    }
}

//------------ FromStrError --------------------------------------------------

/// An error happened while converting a string into a name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FromStrError {
    /// The string contained an empty label.
    EmptyLabel,

    /// A label was longer than 63 octets.
    LongLabel,

    /// The name was longer than 255 octets in wire format.
    LongName,

    /// A backslash escape sequence was malformed.
    BadEscape,

    /// A character that is not allowed in a name was encountered.
    IllegalCharacter(char),
}

impl fmt::Display for FromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FromStrError::EmptyLabel => f.write_str("empty label"),
            FromStrError::LongLabel => f.write_str("label too long"),
            FromStrError::LongName => f.write_str("long domain name"),
            FromStrError::BadEscape => f.write_str("invalid escape sequence"),
            FromStrError::IllegalCharacter(ch) => {
                write!(f, "illegal character '{}'", ch)
            }
        }
    }
}

impl std::error::Error for FromStrError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn from_str_adds_final_dot() {
        assert_eq!(name("test.com").to_string(), "test.com.");
        assert_eq!(name("test.com.").to_string(), "test.com.");
        assert_eq!(name("test.com").as_slice(), b"\x04test\x03com\0");
        assert_eq!(name("").to_string(), ".");
        assert_eq!(name(".").to_string(), ".");
        assert!(name(".").is_root());
    }

    #[test]
    fn from_str_errors() {
        assert_eq!("a..b".parse::<Name>(), Err(FromStrError::EmptyLabel));
        assert_eq!(".a".parse::<Name>(), Err(FromStrError::EmptyLabel));
        let long = "a".repeat(64);
        assert_eq!(long.parse::<Name>(), Err(FromStrError::LongLabel));
        let long = ["a".repeat(63).as_str(); 4].join(".");
        assert_eq!(long.parse::<Name>(), Err(FromStrError::LongName));
        assert_eq!("a\\2".parse::<Name>(), Err(FromStrError::BadEscape));
        assert_eq!(
            "bäd".parse::<Name>(),
            Err(FromStrError::IllegalCharacter('ä'))
        );
    }

    #[test]
    fn escapes() {
        let n = name("a\\.b.c\\032d");
        assert_eq!(n.as_slice(), b"\x03a.b\x03c d\0");
        assert_eq!(n.to_string(), "a\\.b.c\\032d.");
        assert_eq!(n.label_count(), 2);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(name("Example.COM"), name("example.com."));
        let mut set = HashSet::new();
        set.insert(name("EXAMPLE.com"));
        assert!(set.contains(&name("example.COM")));
        assert_eq!(
            name("A.com").name_cmp(&name("a.com")),
            cmp::Ordering::Equal
        );
        assert!(name("a.com") < name("B.com"));
        assert!(name("a.com") < name("a.com.b"));
    }

    #[test]
    fn ends_with() {
        assert!(name("www.example.com").ends_with(&name("Example.com")));
        assert!(name("example.com").ends_with(&name("example.com")));
        assert!(name("example.com").ends_with(&Name::root()));
        assert!(!name("com").ends_with(&name("example.com")));
        assert!(!name("www.example.org").ends_with(&name("example.com")));
    }

    #[test]
    fn reverse_names() {
        assert_eq!(
            Name::reverse_from_addr("192.0.2.10".parse().unwrap())
                .to_string(),
            "10.2.0.192.in-addr.arpa."
        );
        assert_eq!(
            Name::reverse_from_addr("2001:db8::567:89ab".parse().unwrap())
                .to_string(),
            "b.a.9.8.7.6.5.0.0.0.0.0.0.0.0.0.\
             0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa."
        );
    }

    #[test]
    fn enum_names() {
        assert_eq!(
            Name::enum_from_number("+1-555-123 4567").unwrap().to_string(),
            "7.6.5.4.3.2.1.5.5.5.1.e164.arpa."
        );
        assert_eq!(
            Name::enum_from_number("+"),
            Err(FromStrError::EmptyLabel)
        );
        assert_eq!(
            Name::enum_from_number("12x"),
            Err(FromStrError::IllegalCharacter('x'))
        );
    }
}
