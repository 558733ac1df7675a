//! DNS CLASSes.

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS CLASSes.
    ///
    /// The domain name space is partitioned into separate classes for
    /// different network types. In practice, only the IN class is really
    /// relevant.
    ///
    /// In addition, there are query classes that are used in questions,
    /// namely NONE and ANY (or `*`).
    ///
    /// See [RFC 1034] for the introduction of classes and the
    /// [DNS CLASSes IANA registry] for an overview of assigned values.
    ///
    /// [RFC 1034]: https://tools.ietf.org/html/rfc1034
    /// [DNS CLASSes IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-2
    =>
    Class, u16, read_u16;

    /// Internet (IN).
    (IN => 1, "IN")

    /// CSNET (CS).
    ///
    /// (Obsolete.)
    (CS => 2, "CS")

    /// Chaosnet (CH).
    (CH => 3, "CH")

    /// Hesiod (HS).
    (HS => 4, "HS")

    /// Query class None.
    ///
    /// Used in UPDATE queries to require that an RRset does not exist.
    (NONE => 0xFE, "NONE")

    /// Query class * (ANY).
    (ANY => 0xFF, "*")
}

int_enum_str_with_prefix!(Class, "CLASS", u16, "unknown class");

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Class::IN), "Class::IN");
        assert_eq!(format!("{:?}", Class::from_int(69)), "Class(69)");
    }

    #[test]
    fn from_str_and_display() {
        assert_eq!("in".parse::<Class>(), Ok(Class::IN));
        assert_eq!("*".parse::<Class>(), Ok(Class::ANY));
        assert_eq!("CLASS5".parse::<Class>(), Ok(Class::from_int(5)));
        assert_eq!(Class::from_int(5).to_string(), "CLASS5");
        assert_eq!(Class::CH.to_string(), "CH");
    }
}
