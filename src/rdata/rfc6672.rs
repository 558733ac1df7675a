//! Record data from [RFC 6672]: DNAME records.
//!
//! [RFC 6672]: https://tools.ietf.org/html/rfc6672

name_type! {
    /// Dname record data.
    ///
    /// The Dname record provides redirection for a subtree of the domain
    /// name tree in the DNS.
    (Dname, DNAME, target)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Rtype;
    use crate::base::name::Name;
    use crate::base::rdata::test::rdata_cursor;
    use crate::base::rdata::RecordData;
    use core::str::FromStr;

    #[test]
    fn dname() {
        let mut cursor = rdata_cursor(b"\x07example\x03net\0");
        let dname = Dname::parse(&mut cursor);
        assert!(cursor.check().is_ok());
        assert_eq!(dname.rtype(), Rtype::DNAME);
        assert_eq!(dname.to_string(), "example.net.");
        assert_eq!(dname.target(), &Name::from_str("EXAMPLE.net").unwrap());
    }
}
