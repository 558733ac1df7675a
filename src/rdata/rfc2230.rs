//! Record data from [RFC 2230].
//!
//! [RFC 2230]: https://tools.ietf.org/html/rfc2230

//------------ Kx -----------------------------------------------------------

preference_name_type! {
    /// Kx record data.
    ///
    /// The Kx record names a host willing to act as a key exchanger for
    /// the owner. As with Mx, lower preference values are tried first.
    (Kx, KX, exchanger)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::iana::Rtype;
    use crate::base::rdata::test::rdata_cursor;
    use crate::base::rdata::RecordData;
    use crate::base::wire::Compose;

    #[test]
    fn kx() {
        let kx = Kx::parse(&mut rdata_cursor(b"\x00\x05\x02kx\x03org\0"));
        assert_eq!(kx.preference(), 5);
        assert_eq!(kx.rtype(), Rtype::KX);
        assert_eq!(kx.to_string(), "5 kx.org.");
        let mut buf = Vec::new();
        kx.compose(&mut buf);
        assert_eq!(buf.as_slice(), b"\x00\x05\x02kx\x03org\0");
    }

    #[test]
    fn kx_ordering() {
        let a = Kx::new(10, "B.example".parse().unwrap());
        let b = Kx::new(10, "c.example".parse().unwrap());
        let c = Kx::new(5, "z.example".parse().unwrap());
        let mut list = vec![a.clone(), b.clone(), c.clone()];
        list.sort();
        assert_eq!(list, [c, a, b]);
    }
}
