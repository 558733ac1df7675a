//! Creating and consuming data in wire format.
//!
//! Reading wire data is done through the [`Cursor`][crate::base::cursor]
//! type. Writing is done through the [`Compose`] trait, which any type
//! that can appear in a DNS message implements. Composing happens into any
//! [`BufMut`] which in practice will be a `BytesMut` or a `Vec<u8>`.

use bytes::BufMut;
use core::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

//------------ Compose -------------------------------------------------------

/// An extension trait to add composing to foreign types.
///
/// This trait can be used to add the `compose` method to a foreign type.
/// The method appends the wire format of the value to the end of `target`.
/// Domain names are always composed in their uncompressed form.
pub trait Compose {
    /// Returns the length of the composed value in octets.
    fn compose_len(&self) -> usize;

    /// Appends the wire format representation of the value to the target.
    fn compose<Target: BufMut>(&self, target: &mut Target);
}

impl<T: Compose + ?Sized> Compose for &T {
    fn compose_len(&self) -> usize {
        (*self).compose_len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        (*self).compose(target)
    }
}

impl Compose for u8 {
    fn compose_len(&self) -> usize {
        1
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        target.put_u8(*self)
    }
}

impl Compose for u16 {
    fn compose_len(&self) -> usize {
        2
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        target.put_u16(*self)
    }
}

impl Compose for u32 {
    fn compose_len(&self) -> usize {
        4
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        target.put_u32(*self)
    }
}

impl Compose for Ipv4Addr {
    fn compose_len(&self) -> usize {
        4
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        target.put_slice(&self.octets())
    }
}

impl Compose for Ipv6Addr {
    fn compose_len(&self) -> usize {
        16
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        target.put_slice(&self.octets())
    }
}

impl Compose for [u8] {
    fn compose_len(&self) -> usize {
        self.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        target.put_slice(self)
    }
}

//------------ ParseError ----------------------------------------------------

/// An error happened while parsing data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An attempt was made to go beyond the end of the input.
    ShortInput,

    /// A formatting error occurred.
    Form(FormError),
}

impl ParseError {
    /// Creates a new parse error as a form error with the given message.
    pub fn form_error(msg: &'static str) -> Self {
        FormError::new(msg).into()
    }
}

//--- From

impl From<FormError> for ParseError {
    fn from(err: FormError) -> Self {
        ParseError::Form(err)
    }
}

//--- Display and Error

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ParseError::ShortInput => f.write_str("unexpected end of input"),
            ParseError::Form(ref err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}

//------------ FormError -----------------------------------------------------

/// A formatting error occured.
///
/// This is a generic error for all kinds of error cases that result in data
/// not being accepted. For diagnostics, the error is being given a static
/// string describing the error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormError(&'static str);

impl FormError {
    /// Creates a new form error value with the given diagnostics string.
    pub fn new(msg: &'static str) -> Self {
        FormError(msg)
    }

    /// Returns the diagnostics string.
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

//--- Display and Error

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for FormError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compose_integers() {
        let mut buf = Vec::new();
        0x12u8.compose(&mut buf);
        0x3456u16.compose(&mut buf);
        0x789a_bcdeu32.compose(&mut buf);
        assert_eq!(buf, b"\x12\x34\x56\x78\x9a\xbc\xde");
        assert_eq!(0u32.compose_len(), 4);
    }

    #[test]
    fn form_error_display() {
        let err = ParseError::form_error("bad label");
        assert_eq!(err.to_string(), "bad label");
        assert_eq!(
            ParseError::ShortInput.to_string(),
            "unexpected end of input"
        );
    }
}
