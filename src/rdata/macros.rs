//! Macros for use in rdata definitions.
//!
//! These macros are not public but are used by the super module only. They
//! are here so that `mod.rs` doesn’t become too unwieldly.

/// Creates the [`AllRecordData`] enum and its impls.
///
/// The macro takes a list of modules with the record data types defined in
/// each of them. Every type needs an associated constant `RTYPE`, a
/// function `parse(&mut Cursor) -> Self`, and impls of `Compose` and
/// `Display`.
macro_rules! rdata_types {
    ( $(
        $module:ident::{
            $( $rtype:ident, )*
        }
    )* ) => {
        $(
            pub use self::$module::{
                $( $rtype, )*
            };
        )*

        //------------- AllRecordData ----------------------------------------

        /// Record data for all record types.
        ///
        /// This enum collects the record data types for all currently
        /// implemented record types. Types that are defined but not
        /// supported end up as `Unused` and types that aren’t known at all
        /// as `Other`. Both keep the raw record data.
        #[derive(Clone, Debug, Eq, PartialEq)]
        pub enum AllRecordData {
            $( $(
                $rtype($rtype),
            )* )*
            Unused($crate::base::rdata::UnknownRecordData),
            Other($crate::base::rdata::UnknownRecordData),
        }

        impl AllRecordData {
            /// Parses record data of the given type.
            ///
            /// The cursor needs to be positioned at the start of the record
            /// data, right after the RDLENGTH field. Parsing never fails,
            /// short data results in zeroed fields and a noted error on the
            /// cursor.
            pub fn parse(
                rtype: $crate::base::iana::Rtype,
                cursor: &mut $crate::base::cursor::Cursor,
            ) -> Self {
                $( $(
                    if rtype == $rtype::RTYPE {
                        return AllRecordData::$rtype($rtype::parse(cursor))
                    }
                )* )*
                let data = $crate::base::rdata::UnknownRecordData::parse(
                    rtype, cursor
                );
                if is_placeholder(rtype) {
                    AllRecordData::Unused(data)
                }
                else {
                    AllRecordData::Other(data)
                }
            }
        }

        //--- From and FromAllRecordData

        $( $(
            impl From<$rtype> for AllRecordData {
                fn from(value: $rtype) -> Self {
                    AllRecordData::$rtype(value)
                }
            }

            impl FromAllRecordData for $rtype {
                fn from_all(data: &AllRecordData) -> Option<&Self> {
                    match *data {
                        AllRecordData::$rtype(ref inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )* )*

        //--- RecordData

        impl $crate::base::rdata::RecordData for AllRecordData {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                match *self {
                    $( $(
                        AllRecordData::$rtype(_) => $rtype::RTYPE,
                    )* )*
                    AllRecordData::Unused(ref inner)
                    | AllRecordData::Other(ref inner) => {
                        $crate::base::rdata::RecordData::rtype(inner)
                    }
                }
            }
        }

        //--- Compose

        impl $crate::base::wire::Compose for AllRecordData {
            fn compose_len(&self) -> usize {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            $crate::base::wire::Compose::compose_len(inner)
                        }
                    )* )*
                    AllRecordData::Unused(ref inner)
                    | AllRecordData::Other(ref inner) => {
                        $crate::base::wire::Compose::compose_len(inner)
                    }
                }
            }

            fn compose<Target: ::bytes::BufMut>(&self, target: &mut Target) {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            $crate::base::wire::Compose::compose(inner, target)
                        }
                    )* )*
                    AllRecordData::Unused(ref inner)
                    | AllRecordData::Other(ref inner) => {
                        $crate::base::wire::Compose::compose(inner, target)
                    }
                }
            }
        }

        //--- Display

        impl core::fmt::Display for AllRecordData {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                match *self {
                    $( $(
                        AllRecordData::$rtype(ref inner) => {
                            core::fmt::Display::fmt(inner, f)
                        }
                    )* )*
                    AllRecordData::Unused(ref inner)
                    | AllRecordData::Other(ref inner) => {
                        core::fmt::Display::fmt(inner, f)
                    }
                }
            }
        }
    }
}

/// Creates a record data type that consists of a single domain name.
macro_rules! name_type {
    ( $(#[$attr:meta])* (
        $target:ident, $rtype:ident, $field:ident
    ) ) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $target {
            $field: $crate::base::name::Name,
        }

        impl $target {
            /// The record type of this record data type.
            pub const RTYPE: $crate::base::iana::Rtype =
                $crate::base::iana::Rtype::$rtype;

            /// Creates the record data from the domain name.
            pub fn new($field: $crate::base::name::Name) -> Self {
                $target { $field }
            }

            /// Returns a reference to the domain name.
            pub fn $field(&self) -> &$crate::base::name::Name {
                &self.$field
            }

            /// Converts the record data into the domain name.
            pub fn into_name(self) -> $crate::base::name::Name {
                self.$field
            }

            /// Parses the record data from the cursor.
            pub fn parse(cursor: &mut $crate::base::cursor::Cursor) -> Self {
                Self::new(cursor.read_name())
            }
        }

        //--- From

        impl From<$crate::base::name::Name> for $target {
            fn from(name: $crate::base::name::Name) -> Self {
                Self::new(name)
            }
        }

        //--- RecordData, Compose

        impl $crate::base::rdata::RecordData for $target {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                $target::RTYPE
            }
        }

        impl $crate::base::wire::Compose for $target {
            fn compose_len(&self) -> usize {
                $crate::base::wire::Compose::compose_len(&self.$field)
            }

            fn compose<Target: ::bytes::BufMut>(&self, target: &mut Target) {
                $crate::base::wire::Compose::compose(&self.$field, target)
            }
        }

        //--- Display

        impl core::fmt::Display for $target {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(f, "{}", self.$field)
            }
        }
    }
}

/// Creates a record data type with a preference and a domain name.
///
/// Values are ordered by preference first and domain name second, so
/// sorting a list of them yields the order in which they should be tried.
macro_rules! preference_name_type {
    ( $(#[$attr:meta])* (
        $target:ident, $rtype:ident, $field:ident
    ) ) => {
        $(#[$attr])*
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        pub struct $target {
            preference: u16,
            $field: $crate::base::name::Name,
        }

        impl $target {
            /// The record type of this record data type.
            pub const RTYPE: $crate::base::iana::Rtype =
                $crate::base::iana::Rtype::$rtype;

            /// Creates the record data from its components.
            pub fn new(
                preference: u16, $field: $crate::base::name::Name
            ) -> Self {
                $target { preference, $field }
            }

            /// Returns the preference of this record.
            ///
            /// Lower values are preferred.
            pub fn preference(&self) -> u16 {
                self.preference
            }

            /// Returns a reference to the domain name.
            pub fn $field(&self) -> &$crate::base::name::Name {
                &self.$field
            }

            /// Parses the record data from the cursor.
            pub fn parse(cursor: &mut $crate::base::cursor::Cursor) -> Self {
                let preference = cursor.read_u16();
                Self::new(preference, cursor.read_name())
            }
        }

        //--- PartialOrd and Ord

        impl PartialOrd for $target {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $target {
            fn cmp(&self, other: &Self) -> core::cmp::Ordering {
                match self.preference.cmp(&other.preference) {
                    core::cmp::Ordering::Equal => {}
                    other => return other,
                }
                self.$field.name_cmp(&other.$field)
            }
        }

        //--- RecordData, Compose

        impl $crate::base::rdata::RecordData for $target {
            fn rtype(&self) -> $crate::base::iana::Rtype {
                $target::RTYPE
            }
        }

        impl $crate::base::wire::Compose for $target {
            fn compose_len(&self) -> usize {
                2 + $crate::base::wire::Compose::compose_len(&self.$field)
            }

            fn compose<Target: ::bytes::BufMut>(&self, target: &mut Target) {
                $crate::base::wire::Compose::compose(&self.preference, target);
                $crate::base::wire::Compose::compose(&self.$field, target);
            }
        }

        //--- Display

        impl core::fmt::Display for $target {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(f, "{} {}", self.preference, self.$field)
            }
        }
    }
}
