//! DNS response codes.
//!
//! The original DNS specification in [RFC 1035] specified four bits of the
//! message header as response code. The type [`Rcode`] defined herein
//! represents these codes. Extended response codes transported in the OPT
//! pseudo-record are not supported.
//!
//! [RFC 1035]: https://tools.ietf.org/html/rfc1035

//------------ Rcode --------------------------------------------------------

int_enum! {
    /// DNS Response Codes.
    ///
    /// The response code of a response indicates what happend on the server
    /// when trying to answer the query. The code is a 4 bit value and part
    /// of the header of a DNS message.
    ///
    /// Values are defined in the [IANA DNS RCODEs] registry.
    ///
    /// [IANA DNS RCODEs]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6
    =>
    Rcode, u8, read_u8;

    /// No error condition.
    ///
    /// (Otherwise known as success.)
    (NOERROR => 0, "NOERROR")

    /// Format error.
    ///
    /// The name server was unable to interpret the query.
    (FORMERR => 1, "FORMERR")

    /// Server failure.
    ///
    /// The name server was unable to process this query due to a problem
    /// with the name server.
    (SERVFAIL => 2, "SERVFAIL")

    /// Name error.
    ///
    /// The domain name given in the query does not exist at the name server.
    (NXDOMAIN => 3, "NXDOMAIN")

    /// Not implemented.
    ///
    /// The name server does not support the requested kind of query.
    (NOTIMP => 4, "NOTIMP")

    /// Query refused.
    ///
    /// The name server refused to perform the operation requested by the
    /// query for policy reasons.
    (REFUSED => 5, "REFUSED")

    /// Name exists when it should not.
    ///
    /// See RFC 2136.
    (YXDOMAIN => 6, "YXDOMAIN")

    /// RR set exists when it should not.
    ///
    /// See RFC 2136.
    (YXRRSET => 7, "YXRRSET")

    /// RR set that should exist does not.
    ///
    /// See RFC 2136.
    (NXRRSET => 8, "NXRRSET")

    /// Server not authoritative for zone or client not authorized.
    ///
    /// See RFC 2136 and RFC 2845.
    (NOTAUTH => 9, "NOTAUTH")

    /// Name not contained in zone.
    ///
    /// See RFC 2136.
    (NOTZONE => 10, "NOTZONE")
}

int_enum_str_with_decimal!(Rcode, u8, "unknown response code");

impl Rcode {
    /// Returns whether this is the NOERROR code.
    pub fn is_success(self) -> bool {
        self == Rcode::NOERROR
    }
}

//============ Tests =========================================================
