//! Record data from [RFC 2845]: TSIG records.
//!
//! [RFC 2845]: https://tools.ietf.org/html/rfc2845

use crate::base::cursor::Cursor;
use crate::base::iana::{Rcode, Rtype};
use crate::base::name::Name;
use crate::base::rdata::{reread_rdlen, RecordData};
use crate::base::wire::Compose;
use crate::utils::base64;
use bytes::{BufMut, Bytes};
use core::fmt;

//------------ Tsig ----------------------------------------------------------

/// Tsig record data.
///
/// Tsig records carry a transaction signature. The time signed is a 48 bit
/// value of seconds since the Unix epoch. The MAC and the other data are
/// length-prefixed; lengths reaching past the end of the record data are
/// cut short.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tsig {
    algorithm: Name,
    time_signed: u64,
    fudge: u16,
    mac: Bytes,
    original_id: u16,
    error: u16,
    other: Bytes,
}

impl Tsig {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::TSIG;

    /// The largest value the time signed field can take.
    pub const MAX_TIME: u64 = 0xFFFF_FFFF_FFFF;

    /// Creates new Tsig record data.
    pub fn new(
        algorithm: Name,
        time_signed: u64,
        fudge: u16,
        mac: Bytes,
        original_id: u16,
        error: u16,
        other: Bytes,
    ) -> Self {
        Tsig {
            algorithm,
            time_signed: time_signed & Self::MAX_TIME,
            fudge,
            mac: clamp_blob(mac),
            original_id,
            error,
            other: clamp_blob(other),
        }
    }

    /// Returns the name of the MAC algorithm.
    pub fn algorithm(&self) -> &Name {
        &self.algorithm
    }

    /// Returns the time of signing in seconds since the Unix epoch.
    pub fn time_signed(&self) -> u64 {
        self.time_signed
    }

    /// Returns the permitted clock skew in seconds.
    pub fn fudge(&self) -> u16 {
        self.fudge
    }

    /// Returns the message authentication code.
    pub fn mac(&self) -> &Bytes {
        &self.mac
    }

    /// Returns the original message ID.
    pub fn original_id(&self) -> u16 {
        self.original_id
    }

    /// Returns the error code.
    pub fn error(&self) -> u16 {
        self.error
    }

    /// Returns the other data.
    pub fn other(&self) -> &Bytes {
        &self.other
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let end = cursor.pos() + reread_rdlen(cursor);
        let algorithm = cursor.read_name();
        let time_signed = (u64::from(cursor.read_u16()) << 32)
            | u64::from(cursor.read_u32());
        let fudge = cursor.read_u16();
        let mac = read_clamped(cursor, end);
        let original_id = cursor.read_u16();
        let error = cursor.read_u16();
        let other = read_clamped(cursor, end);
        Tsig::new(
            algorithm,
            time_signed,
            fudge,
            mac,
            original_id,
            error,
            other,
        )
    }
}

/// Cuts a blob down to what a 16 bit length prefix can describe.
pub(super) fn clamp_blob(blob: Bytes) -> Bytes {
    if blob.len() > usize::from(u16::MAX) {
        blob.slice(..usize::from(u16::MAX))
    } else {
        blob
    }
}

/// Composes a blob preceded by its 16 bit length.
///
/// The blob must have been clamped already.
pub(super) fn compose_blob<Target: BufMut>(
    blob: &Bytes,
    target: &mut Target,
) {
    let len = u16::try_from(blob.len()).unwrap_or(u16::MAX);
    len.compose(target);
    target.put_slice(&blob[..usize::from(len)]);
}

/// Reads a blob with a 16 bit length that may not go beyond `end`.
pub(super) fn read_clamped(cursor: &mut Cursor, end: usize) -> Bytes {
    let len = usize::from(cursor.read_u16());
    let avail = end.saturating_sub(cursor.pos());
    cursor.read_bytes(len.min(avail))
}

/// Writes a TSIG or TKEY error value, using the mnemonic where it has one.
pub(super) fn display_error(
    error: u16,
    f: &mut fmt::Formatter,
) -> fmt::Result {
    match u8::try_from(error) {
        Ok(error) => write!(f, "{}", Rcode::from_int(error)),
        Err(_) => write!(f, "{}", error),
    }
}

impl RecordData for Tsig {
    fn rtype(&self) -> Rtype {
        Tsig::RTYPE
    }
}

impl Compose for Tsig {
    fn compose_len(&self) -> usize {
        self.algorithm.compose_len() + 16 + self.mac.len() + self.other.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.algorithm.compose(target);
        ((self.time_signed >> 32) as u16).compose(target);
        (self.time_signed as u32).compose(target);
        self.fudge.compose(target);
        compose_blob(&self.mac, target);
        self.original_id.compose(target);
        self.error.compose(target);
        compose_blob(&self.other, target);
    }
}

impl fmt::Display for Tsig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} ",
            self.algorithm,
            self.time_signed,
            self.fudge,
            self.mac.len()
        )?;
        base64::display(&self.mac, f)?;
        write!(f, " {} ", self.original_id)?;
        display_error(self.error, f)?;
        write!(f, " {}", self.other.len())?;
        if !self.other.is_empty() {
            f.write_str(" ")?;
            base64::display(&self.other, f)?;
        }
        Ok(())
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::rdata_cursor;

    fn tsig() -> Tsig {
        Tsig::new(
            "hmac-sha256".parse().unwrap(),
            1704110400,
            300,
            Bytes::from_static(b"0123456789abcdef"),
            0x1234,
            0,
            Bytes::new(),
        )
    }

    #[test]
    fn compose_and_parse() {
        let tsig = tsig();
        let mut buf = Vec::new();
        tsig.compose(&mut buf);
        assert_eq!(buf.len(), tsig.compose_len());
        let mut cursor = rdata_cursor(&buf);
        assert_eq!(Tsig::parse(&mut cursor), tsig);
        assert!(cursor.check().is_ok());
    }

    #[test]
    fn display() {
        assert_eq!(
            tsig().to_string(),
            "hmac-sha256. 1704110400 300 16 MDEyMzQ1Njc4OWFiY2RlZg== \
             4660 NOERROR 0"
        );
    }

    #[test]
    fn mac_clamped_to_rdata() {
        let mut buf = Vec::new();
        tsig().compose(&mut buf);
        // Claim a MAC of 0xFFFF octets.
        let mac_len_pos = tsig().algorithm().compose_len() + 8;
        buf[mac_len_pos] = 0xFF;
        buf[mac_len_pos + 1] = 0xFF;
        let mut cursor = rdata_cursor(&buf);
        let parsed = Tsig::parse(&mut cursor);
        assert_eq!(parsed.mac().len(), buf.len() - mac_len_pos - 2);
        assert!(parsed.other().is_empty());
    }

    #[test]
    fn long_mac_is_cut_to_length_field() {
        let tsig = Tsig::new(
            "hmac-sha256".parse().unwrap(),
            1704110400,
            300,
            Bytes::from(vec![0xAB; 70000]),
            0x1234,
            0,
            Bytes::new(),
        );
        assert_eq!(tsig.mac().len(), usize::from(u16::MAX));

        let mut buf = Vec::new();
        tsig.compose(&mut buf);
        assert_eq!(buf.len(), tsig.compose_len());
        let mac_len_pos = tsig.algorithm().compose_len() + 8;
        assert_eq!(&buf[mac_len_pos..mac_len_pos + 2], b"\xFF\xFF");
    }
}
