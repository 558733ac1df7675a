//! Resource data implementations.
//!
//! This module contains implementations for the record data of the record
//! types a stub resolver commonly encounters.
//!
//! The types are named identically to the [`Rtype`] constant they
//! implement. They are grouped into submodules for the RFCs they are
//! defined in. All types are also re-exported at the top level here. Ie.,
//! for the AAAA record type, you can simply `use dnsstub::rdata::Aaaa`
//! instead of `use dnsstub::rdata::rfc3596::Aaaa` which nobody could
//! possibly remember.
//!
//! The enum [`AllRecordData`] is a sum of all these types. Record types
//! that are registered but not implemented, such as DNSKEY or OPT, are
//! kept as raw data in its `Unused` variant, and entirely unknown types in
//! its `Other` variant. Both render as the marker `not-used`.
//!
//! [`Rtype`]: crate::base::iana::Rtype

#[macro_use]
mod macros;

rdata_types! {
    rfc1035::{
        A,
        Ns,
        Md,
        Mf,
        Cname,
        Soa,
        Mb,
        Mg,
        Mr,
        Null,
        Wks,
        Ptr,
        Hinfo,
        Minfo,
        Mx,
        Txt,
    }
    rfc1183::{
        Rp,
        Afsdb,
        X25,
        Isdn,
        Rt,
    }
    rfc1706::{
        Nsap,
        NsapPtr,
    }
    rfc1712::{
        Gpos,
    }
    rfc1876::{
        Loc,
    }
    rfc2163::{
        Px,
    }
    rfc2230::{
        Kx,
    }
    rfc2535::{
        Sig,
        Key,
        Nxt,
    }
    rfc2782::{
        Srv,
    }
    rfc2845::{
        Tsig,
    }
    rfc2915::{
        Naptr,
    }
    rfc2930::{
        Tkey,
    }
    rfc3596::{
        Aaaa,
    }
    rfc4034::{
        Ds,
    }
    rfc4398::{
        Cert,
    }
    rfc6672::{
        Dname,
    }
}

pub mod rfc1035;
pub mod rfc1183;
pub mod rfc1706;
pub mod rfc1712;
pub mod rfc1876;
pub mod rfc2163;
pub mod rfc2230;
pub mod rfc2535;
pub mod rfc2782;
pub mod rfc2845;
pub mod rfc2915;
pub mod rfc2930;
pub mod rfc3596;
pub mod rfc4034;
pub mod rfc4398;
pub mod rfc6672;

use crate::base::iana::Rtype;

//------------ FromAllRecordData ---------------------------------------------

/// A record data type that can be extracted from [`AllRecordData`].
///
/// This is used to pick records of a certain type out of a message.
pub trait FromAllRecordData: Sized {
    /// Returns a reference to the inner value if `data` is of this type.
    fn from_all(data: &AllRecordData) -> Option<&Self>;
}

//------------ Placeholder Types ---------------------------------------------

/// The record types that are registered but whose data is kept raw.
pub const PLACEHOLDER_TYPES: &[Rtype] = &[
    Rtype::A6,
    Rtype::APL,
    Rtype::ATMA,
    Rtype::DHCID,
    Rtype::DNSKEY,
    Rtype::EID,
    Rtype::GID,
    Rtype::HIP,
    Rtype::IPSECKEY,
    Rtype::NSEC,
    Rtype::NSEC3,
    Rtype::NSEC3PARAM,
    Rtype::NIMLOC,
    Rtype::OPT,
    Rtype::RRSIG,
    Rtype::SINK,
    Rtype::SPF,
    Rtype::SSHFP,
    Rtype::UID,
    Rtype::UINFO,
    Rtype::UNSPEC,
];

/// Returns whether the record type is a placeholder type.
pub fn is_placeholder(rtype: Rtype) -> bool {
    PLACEHOLDER_TYPES.contains(&rtype)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::rdata::test::rdata_cursor;
    use crate::base::rdata::RecordData;
    use crate::base::wire::Compose;

    fn parse(rtype: Rtype, rdata: &[u8]) -> AllRecordData {
        let mut cursor = rdata_cursor(rdata);
        let res = AllRecordData::parse(rtype, &mut cursor);
        assert_eq!(cursor.pos(), rdata.len() + 2);
        res
    }

    #[test]
    fn dispatch() {
        let data = parse(Rtype::A, &[192, 168, 0, 1]);
        assert!(matches!(data, AllRecordData::A(_)));
        assert_eq!(data.rtype(), Rtype::A);
        assert_eq!(data.to_string(), "192.168.0.1");
        assert_eq!(
            A::from_all(&data).map(A::addr),
            Some([192, 168, 0, 1].into())
        );
        assert!(Mx::from_all(&data).is_none());
    }

    #[test]
    fn placeholders_and_unknown() {
        let data = parse(Rtype::DNSKEY, b"\x01\x01\x03\x08abc");
        assert!(matches!(data, AllRecordData::Unused(_)));
        assert_eq!(data.rtype(), Rtype::DNSKEY);
        assert_eq!(data.to_string(), "not-used");

        let data = parse(Rtype::from_int(65280), b"xyz");
        assert!(matches!(data, AllRecordData::Other(_)));
        assert_eq!(data.rtype(), Rtype::from_int(65280));
        assert_eq!(data.to_string(), "not-used");

        let mut buf = Vec::new();
        data.compose(&mut buf);
        assert_eq!(buf.as_slice(), b"xyz");
    }

    #[test]
    fn every_placeholder_is_unused() {
        for rtype in PLACEHOLDER_TYPES {
            assert!(matches!(
                parse(*rtype, b"\x00"),
                AllRecordData::Unused(_)
            ));
        }
    }
}
