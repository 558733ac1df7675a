//! Record data from [RFC 2535].
//!
//! This RFC defines the original DNS security extensions. The record types
//! have since been superseded by those of RFC 4034 but servers still hand
//! them out. Signatures are parsed and presented, never verified.
//!
//! [RFC 2535]: https://tools.ietf.org/html/rfc2535

use super::rfc1035::bitmap_positions;
use crate::base::cursor::Cursor;
use crate::base::iana::Rtype;
use crate::base::name::Name;
use crate::base::rdata::{read_remaining, reread_rdlen, RecordData};
use crate::base::wire::Compose;
use crate::utils::base64;
use bytes::{BufMut, Bytes};
use core::fmt;
use core::str::FromStr;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

//------------ Sig ----------------------------------------------------------

/// Sig record data.
///
/// A Sig record holds a signature over the record set of the type given in
/// `type_covered` made by the key of `signer_name`. The signature itself is
/// whatever is left of the record data after the fixed fields and the
/// signer name.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Sig {
    type_covered: Rtype,
    algorithm: u8,
    labels: u8,
    original_ttl: u32,
    expiration: Timestamp,
    inception: Timestamp,
    key_tag: u16,
    signer_name: Name,
    signature: Bytes,
}

impl Sig {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::SIG;

    #[allow(clippy::too_many_arguments)] // XXX Consider changing.
    pub fn new(
        type_covered: Rtype,
        algorithm: u8,
        labels: u8,
        original_ttl: u32,
        expiration: Timestamp,
        inception: Timestamp,
        key_tag: u16,
        signer_name: Name,
        signature: Bytes,
    ) -> Self {
        Sig {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        }
    }

    /// Returns the record type covered by the signature.
    pub fn type_covered(&self) -> Rtype {
        self.type_covered
    }

    /// Returns the algorithm of the signature.
    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// Returns the number of labels in the signed name.
    pub fn labels(&self) -> u8 {
        self.labels
    }

    /// Returns the TTL of the signed records.
    pub fn original_ttl(&self) -> u32 {
        self.original_ttl
    }

    /// Returns the time the signature expires.
    pub fn expiration(&self) -> Timestamp {
        self.expiration
    }

    /// Returns the time the signature becomes valid.
    pub fn inception(&self) -> Timestamp {
        self.inception
    }

    /// Returns the key tag.
    pub fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// Returns the name of the signer.
    pub fn signer_name(&self) -> &Name {
        &self.signer_name
    }

    /// Returns the signature.
    pub fn signature(&self) -> &Bytes {
        &self.signature
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let start = cursor.pos();
        let rdlen = reread_rdlen(cursor);
        let type_covered = Rtype::read(cursor);
        let algorithm = cursor.read_u8();
        let labels = cursor.read_u8();
        let original_ttl = cursor.read_u32();
        let expiration = Timestamp::read(cursor);
        let inception = Timestamp::read(cursor);
        let key_tag = cursor.read_u16();
        let signer_name = cursor.read_name();
        Sig::new(
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            read_remaining(cursor, start, rdlen),
        )
    }
}

impl RecordData for Sig {
    fn rtype(&self) -> Rtype {
        Sig::RTYPE
    }
}

impl Compose for Sig {
    fn compose_len(&self) -> usize {
        18 + self.signer_name.compose_len() + self.signature.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.type_covered.compose(target);
        self.algorithm.compose(target);
        self.labels.compose(target);
        self.original_ttl.compose(target);
        self.expiration.compose(target);
        self.inception.compose(target);
        self.key_tag.compose(target);
        self.signer_name.compose(target);
        target.put_slice(&self.signature);
    }
}

impl fmt::Display for Sig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} ",
            self.type_covered,
            self.algorithm,
            self.labels,
            self.original_ttl,
            self.expiration,
            self.inception,
            self.key_tag,
            self.signer_name
        )?;
        base64::display(&self.signature, f)
    }
}

//------------ Key ----------------------------------------------------------

/// Key record data.
///
/// The Key record holds a public key together with flags, the protocol it
/// is to be used with, and its algorithm.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Key {
    flags: u16,
    protocol: u8,
    algorithm: u8,
    public_key: Bytes,
}

impl Key {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::KEY;

    /// Creates new Key record data.
    pub fn new(
        flags: u16,
        protocol: u8,
        algorithm: u8,
        public_key: Bytes,
    ) -> Self {
        Key {
            flags,
            protocol,
            algorithm,
            public_key,
        }
    }

    /// Returns the flags.
    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// Returns the protocol.
    pub fn protocol(&self) -> u8 {
        self.protocol
    }

    /// Returns the algorithm of the key.
    pub fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// Returns the public key.
    pub fn public_key(&self) -> &Bytes {
        &self.public_key
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let start = cursor.pos();
        let rdlen = reread_rdlen(cursor);
        let flags = cursor.read_u16();
        let protocol = cursor.read_u8();
        let algorithm = cursor.read_u8();
        Key::new(
            flags,
            protocol,
            algorithm,
            read_remaining(cursor, start, rdlen),
        )
    }
}

impl RecordData for Key {
    fn rtype(&self) -> Rtype {
        Key::RTYPE
    }
}

impl Compose for Key {
    fn compose_len(&self) -> usize {
        4 + self.public_key.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.flags.compose(target);
        self.protocol.compose(target);
        self.algorithm.compose(target);
        target.put_slice(&self.public_key);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {} ", self.flags, self.protocol, self.algorithm)?;
        base64::display(&self.public_key, f)
    }
}

//------------ Nxt ----------------------------------------------------------

/// Nxt record data.
///
/// The Nxt record names the next domain name in the zone and lists the
/// record types present at the owner as a bitmap. Bit _n_ is set if type
/// _n_ exists.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Nxt {
    next_name: Name,
    types: Bytes,
}

impl Nxt {
    /// The record type of this record data type.
    pub const RTYPE: Rtype = Rtype::NXT;

    /// Creates new Nxt record data.
    pub fn new(next_name: Name, types: Bytes) -> Self {
        Nxt { next_name, types }
    }

    /// Returns the next name in the zone.
    pub fn next_name(&self) -> &Name {
        &self.next_name
    }

    /// Returns the raw type bitmap.
    pub fn bitmap(&self) -> &Bytes {
        &self.types
    }

    /// Returns an iterator over the types present in the bitmap.
    pub fn types(&self) -> impl Iterator<Item = Rtype> + '_ {
        bitmap_positions(&self.types)
            .filter_map(|n| u16::try_from(n).ok())
            .map(Rtype::from_int)
    }

    /// Parses the record data from the cursor.
    pub fn parse(cursor: &mut Cursor) -> Self {
        let start = cursor.pos();
        let rdlen = reread_rdlen(cursor);
        let next_name = cursor.read_name();
        Nxt::new(next_name, read_remaining(cursor, start, rdlen))
    }
}

impl RecordData for Nxt {
    fn rtype(&self) -> Rtype {
        Nxt::RTYPE
    }
}

impl Compose for Nxt {
    fn compose_len(&self) -> usize {
        self.next_name.compose_len() + self.types.len()
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.next_name.compose(target);
        target.put_slice(&self.types);
    }
}

impl fmt::Display for Nxt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.next_name)?;
        for rtype in self.types() {
            write!(f, " {}", rtype)?;
        }
        Ok(())
    }
}

//------------ Timestamp ----------------------------------------------------

/// A signature timestamp.
///
/// Timestamps are seconds since the Unix epoch as a 32 bit value. They are
/// presented as `YYYYMMDDHHmmSS` in UTC.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(u32);

impl Timestamp {
    /// Creates a timestamp from seconds since the Unix epoch.
    pub fn from_int(value: u32) -> Self {
        Timestamp(value)
    }

    /// Returns the seconds since the Unix epoch.
    pub fn to_int(self) -> u32 {
        self.0
    }

    /// Reads a timestamp from the cursor.
    pub fn read(cursor: &mut Cursor) -> Self {
        Timestamp(cursor.read_u32())
    }
}

impl From<u32> for Timestamp {
    fn from(value: u32) -> Self {
        Timestamp(value)
    }
}

impl Compose for Timestamp {
    fn compose_len(&self) -> usize {
        4
    }

    fn compose<Target: BufMut>(&self, target: &mut Target) {
        self.0.compose(target)
    }
}

impl FromStr for Timestamp {
    type Err = IllegalSignatureTime;

    /// Parses a timestamp value from a string.
    ///
    /// The presentation format can either be their integer value or a
    /// specific date in `YYYYMMDDHHmmSS` format.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if !src.is_ascii() {
            return Err(IllegalSignatureTime(()));
        }
        if src.len() != 14 {
            return u32::from_str(src)
                .map(Timestamp)
                .map_err(|_| IllegalSignatureTime(()));
        }
        let field = |range: core::ops::Range<usize>| {
            u8::from_str(&src[range]).map_err(|_| IllegalSignatureTime(()))
        };
        let year = u16::from_str(&src[0..4])
            .map_err(|_| IllegalSignatureTime(()))?;
        let month = Month::try_from(field(4..6)?)
            .map_err(|_| IllegalSignatureTime(()))?;
        let date =
            Date::from_calendar_date(i32::from(year), month, field(6..8)?)
                .map_err(|_| IllegalSignatureTime(()))?;
        let time =
            Time::from_hms(field(8..10)?, field(10..12)?, field(12..14)?)
                .map_err(|_| IllegalSignatureTime(()))?;
        let secs = PrimitiveDateTime::new(date, time)
            .assume_utc()
            .unix_timestamp();
        u32::try_from(secs)
            .map(Timestamp)
            .map_err(|_| IllegalSignatureTime(()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match OffsetDateTime::from_unix_timestamp(i64::from(self.0)) {
            Ok(time) => write!(
                f,
                "{:04}{:02}{:02}{:02}{:02}{:02}",
                time.year(),
                u8::from(time.month()),
                time.day(),
                time.hour(),
                time.minute(),
                time.second()
            ),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

//------------ IllegalSignatureTime ------------------------------------------

/// A string could not be converted into a timestamp.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IllegalSignatureTime(());

impl fmt::Display for IllegalSignatureTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("illegal signature time")
    }
}

impl std::error::Error for IllegalSignatureTime {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::rdata_cursor;

    #[test]
    fn timestamp() {
        let ts = Timestamp::from_str("20240101120000").unwrap();
        assert_eq!(ts.to_int(), 1704110400);
        assert_eq!(ts.to_string(), "20240101120000");
        assert_eq!(Timestamp::from_str("1704110400"), Ok(ts));
        assert!(Timestamp::from_str("20241301120000").is_err());
        assert!(Timestamp::from_str("tomorrow").is_err());
    }

    #[test]
    fn sig() {
        let sig = Sig::new(
            Rtype::A,
            5,
            2,
            3600,
            Timestamp::from_int(1704110400),
            Timestamp::from_int(1704024000),
            2642,
            "example.com".parse().unwrap(),
            Bytes::from_static(b"sig!"),
        );
        let mut buf = Vec::new();
        sig.compose(&mut buf);
        assert_eq!(buf.len(), sig.compose_len());

        let mut cursor = rdata_cursor(&buf);
        let parsed = Sig::parse(&mut cursor);
        assert!(cursor.check().is_ok());
        assert_eq!(parsed, sig);
        assert_eq!(
            parsed.to_string(),
            "A 5 2 3600 20240101120000 20231231120000 2642 \
             example.com. c2lnIQ=="
        );
    }

    #[test]
    fn key() {
        let key = Key::parse(&mut rdata_cursor(b"\x01\x00\x03\x05foobar"));
        assert_eq!(key.flags(), 256);
        assert_eq!(key.public_key().as_ref(), b"foobar");
        assert_eq!(key.to_string(), "256 3 5 Zm9vYmFy");
    }

    #[test]
    fn nxt() {
        // Bits 1 (A), 6 (SOA), and 24 (SIG) set.
        let mut cursor = rdata_cursor(b"\x04next\0\x42\x00\x00\x80");
        let nxt = Nxt::parse(&mut cursor);
        assert!(cursor.check().is_ok());
        assert_eq!(
            nxt.types().collect::<Vec<_>>(),
            [Rtype::A, Rtype::SOA, Rtype::SIG]
        );
        assert_eq!(nxt.to_string(), "next. A SOA SIG");
    }
}
