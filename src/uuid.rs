use std::{fmt, ops, str};

use crate::Error;

/// Represents a Universally Unique IDentifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Namespace UUID for fully-qualified domain names (RFC 9562 Section 6.6).
    pub const NAMESPACE_DNS: Self = Self([
        0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Namespace UUID for URLs.
    pub const NAMESPACE_URL: Self = Self([
        0x6b, 0xa7, 0xb8, 0x11, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Namespace UUID for ISO object identifiers.
    pub const NAMESPACE_OID: Self = Self([
        0x6b, 0xa7, 0xb8, 0x12, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Namespace UUID for X.500 distinguished names.
    pub const NAMESPACE_X500: Self = Self([
        0x6b, 0xa7, 0xb8, 0x14, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Stamps the version nibble and the `10` variant bits into a 16-byte buffer.
    ///
    /// This is the single bit-twiddling site shared by every generator; the low nibble of byte 6
    /// and the low six bits of byte 8 are preserved.
    pub(crate) const fn from_version_bytes(mut bytes: [u8; 16], version: u8) -> Self {
        bytes[6] = (version << 4) | (bytes[6] & 0x0f);
        bytes[8] = 0x80 | (bytes[8] & 0x3f);
        Self(bytes)
    }

    /// Creates a UUID byte array from version 1 field values.
    ///
    /// `ticks` is the 60-bit count of 100-nanosecond intervals since 1582-10-15T00:00:00Z, laid
    /// out as `time_low(32) | time_mid(16) | time_hi(12)`.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` or `clock_seq` exceeds its bit width.
    pub const fn from_rfc4122_timestamp(ticks: u64, clock_seq: u16, node: &[u8; 6]) -> Self {
        if ticks >= 1 << 60 || clock_seq >= 1 << 14 {
            panic!("invalid field value");
        }

        Self([
            (ticks >> 24) as u8,
            (ticks >> 16) as u8,
            (ticks >> 8) as u8,
            ticks as u8,
            (ticks >> 40) as u8,
            (ticks >> 32) as u8,
            0x10 | ((ticks >> 56) as u8 & 0x0f),
            (ticks >> 48) as u8,
            0x80 | (clock_seq >> 8) as u8,
            clock_seq as u8,
            node[0],
            node[1],
            node[2],
            node[3],
            node[4],
            node[5],
        ])
    }

    /// Creates a UUID byte array from version 6 field values.
    ///
    /// Takes the same 60-bit `ticks` as [`Uuid::from_rfc4122_timestamp`] but stores it from most-
    /// to least-significant chunk (`time_high(32) | time_mid(16) | time_low(12)`), which makes the
    /// result lexicographically sortable by timestamp.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` or `clock_seq` exceeds its bit width.
    pub const fn from_sorted_rfc4122_timestamp(ticks: u64, clock_seq: u16, node: &[u8; 6]) -> Self {
        if ticks >= 1 << 60 || clock_seq >= 1 << 14 {
            panic!("invalid field value");
        }

        Self([
            (ticks >> 52) as u8,
            (ticks >> 44) as u8,
            (ticks >> 36) as u8,
            (ticks >> 28) as u8,
            (ticks >> 20) as u8,
            (ticks >> 12) as u8,
            0x60 | ((ticks >> 8) as u8 & 0x0f),
            ticks as u8,
            0x80 | (clock_seq >> 8) as u8,
            clock_seq as u8,
            node[0],
            node[1],
            node[2],
            node[3],
            node[4],
            node[5],
        ])
    }

    /// Returns the version nibble, i.e. the high nibble of byte 6.
    ///
    /// The nibble is reported as is, whether or not it names a recognized version; call
    /// [`validate`] first when guaranteed validity is required.
    pub const fn version(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Returns the variant field of byte 8.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 5 {
            0b000..=0b011 => Variant::Var0,
            0b100 | 0b101 => Variant::Var10,
            0b110 => Variant::Var110,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid9562::Uuid;
    ///
    /// let x = "d9428888-122b-11e1-b85c-61cd3cbb3210".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "d9428888-122b-11e1-b85c-61cd3cbb3210");
    /// assert_eq!(format!("{}", y), "d9428888-122b-11e1-b85c-61cd3cbb3210");
    /// # Ok::<(), uuid9562::Error>(())
    /// ```
    pub fn encode(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for i in 0..16 {
            let e = self.0[i] as usize;
            *buf_iter.next().unwrap() = DIGITS[e >> 4];
            *buf_iter.next().unwrap() = DIGITS[e & 15];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        UuidStr(buffer)
    }
}

/// Reports whether the string is a valid RFC 9562 UUID representation.
///
/// Returns `true` iff the string matches the 8-4-4-4-12 grammar (case-insensitively) and carries a
/// version nibble in `1..=8` together with the `10` variant bits, or spells the Nil or Max UUID.
/// Never fails; any malformed input yields `false`.
///
/// # Examples
///
/// ```rust
/// assert!(uuid9562::validate("d9428888-122b-11e1-b85c-61cd3cbb3210"));
/// assert!(!uuid9562::validate("d9428888122b11e1b85c61cd3cbb3210"));
/// ```
pub fn validate(src: &str) -> bool {
    match src.parse::<Uuid>() {
        Ok(e) => {
            (matches!(e.version(), 1..=8) && matches!(e.variant(), Variant::Var10))
                || e == Uuid::NIL
                || e == Uuid::MAX
        }
        Err(_) => false,
    }
}

/// The reserved variant field values of byte 8.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Variant {
    /// The variant `0xx` (NCS backward compatibility, including the Nil UUID).
    Var0,
    /// The variant `10x` (RFC 9562).
    Var10,
    /// The variant `110` (Microsoft backward compatibility).
    Var110,
    /// The variant `111` (reserved for future definition, including the Max UUID).
    VarReserved,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    ///
    /// Parsing is purely syntactic and case-insensitive; it does not require a recognized version
    /// or variant. Use [`validate`] for the semantic check.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: Error = Error::Format;
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = Error;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// Concrete return type of [`Uuid::encode()`] containing the stack-allocated 8-4-4-4-12 string
/// representation.
struct UuidStr([u8; 36]);

impl ops::Deref for UuidStr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        debug_assert!(self.0.is_ascii());
        unsafe { str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for UuidStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{validate, Uuid, Variant};

    /// Returns a collection of prepared version 1 and version 6 cases
    fn prepare_cases() -> &'static [((u64, u16, [u8; 6]), &'static str, &'static str)] {
        const MAX_UINT60: u64 = (1 << 60) - 1;
        const MAX_UINT14: u16 = (1 << 14) - 1;

        &[
            (
                (0, 0, [0; 6]),
                "00000000-0000-1000-8000-000000000000",
                "00000000-0000-6000-8000-000000000000",
            ),
            (
                (MAX_UINT60, MAX_UINT14, [0xff; 6]),
                "ffffffff-ffff-1fff-bfff-ffffffffffff",
                "ffffffff-ffff-6fff-bfff-ffffffffffff",
            ),
            (
                (
                    0x01e1_122b_d942_8888,
                    0x385c,
                    [0x61, 0xcd, 0x3c, 0xbb, 0x32, 0x10],
                ),
                "d9428888-122b-11e1-b85c-61cd3cbb3210",
                "1e1122bd-9428-6888-b85c-61cd3cbb3210",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (fs, text_v1, text_v6) in prepare_cases() {
            let v1 = Uuid::from_rfc4122_timestamp(fs.0, fs.1, &fs.2);
            let v6 = Uuid::from_sorted_rfc4122_timestamp(fs.0, fs.1, &fs.2);
            assert_eq!(Ok(v1), text_v1.parse());
            assert_eq!(Ok(v1), text_v1.to_uppercase().parse());
            assert_eq!(&v1.encode() as &str, *text_v1);
            assert_eq!(&v1.to_string(), text_v1);
            assert_eq!(Ok(v6), text_v6.parse());
            assert_eq!(&v6.encode() as &str, *text_v6);
            assert_eq!(&v6.to_string(), text_v6);
        }
    }

    /// Recovers the byte array written by the textual codec
    #[test]
    fn recovers_the_byte_array_written_by_the_textual_codec() {
        let bytes = [
            85u8, 35, 141, 21, 201, 38, 69, 152, 180, 157, 207, 78, 145, 59, 161, 60,
        ];
        let text = "55238d15-c926-4598-b49d-cf4e913ba13c";
        assert_eq!(text.parse::<Uuid>().unwrap().as_bytes(), &bytes);
        assert_eq!(&Uuid::from(bytes).to_string(), text);
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " 0180a8f0-5b82-75b4-9fef-ecad657c30bb",
            "0180a8f0-5b84-7438-ab50-f0626f78002b ",
            " 0180a8f0-5b84-7438-ab50-f063bd5331af ",
            "+0180a8f0-5b84-7438-ab50-f06405d35edb",
            "-0180a8f0-5b84-7438-ab50-f06508df4c2d",
            "+180a8f0-5b84-7438-ab50-f066aa10a367",
            "-180a8f0-5b84-7438-ab50-f067cdce1d69",
            "0180a8f05b847438ab50f068decfbfd7",
            "0180a8f0-5b847438-ab50-f06991838802",
            "{0180a8f0-5b84-7438-ab50-f06ac2e5e082}",
            "0180a8f0-5b84-74 8-ab50-f06bed27bdc7",
            "0180a8g0-5b84-7438-ab50-f06c91175b8a",
            "0180a8f0-5b84-7438-ab50_f06d3ea24429",
        ];

        for e in cases {
            assert!(e.parse::<Uuid>().is_err());
            assert!(!validate(e));
        }
    }

    /// Returns Nil and Max UUIDs
    #[test]
    fn returns_nil_and_max_uuids() {
        assert_eq!(
            &Uuid::NIL.encode() as &str,
            "00000000-0000-0000-0000-000000000000"
        );

        assert_eq!(
            &Uuid::MAX.encode() as &str,
            "ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (fs, _, _) in prepare_cases() {
            for e in [
                Uuid::from_rfc4122_timestamp(fs.0, fs.1, &fs.2),
                Uuid::from_sorted_rfc4122_timestamp(fs.0, fs.1, &fs.2),
            ] {
                assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
                assert_eq!(Uuid::from(u128::from(e)), e);
                assert_eq!(e.encode().parse(), Ok(e));
                assert_eq!(e.encode().to_uppercase().parse(), Ok(e));
                assert_eq!(Uuid::try_from(e.to_string()), Ok(e));
                assert_eq!(Uuid::try_from(e.to_string().to_uppercase()), Ok(e));
            }
        }
    }

    /// Reads the version nibble without demanding a recognized version
    #[test]
    fn reads_the_version_nibble_without_demanding_a_recognized_version() {
        let cases = [
            ("00000000-0000-0000-0000-000000000000", 0),
            ("d9428888-122b-11e1-b85c-61cd3cbb3210", 1),
            ("9125a8dc-52ee-365b-a5aa-81b0b3681cf6", 3),
            ("55238d15-c926-4598-b49d-cf4e913ba13c", 4),
            ("fdda765f-fc57-5604-a269-52a7df8164ec", 5),
            ("1e1122bd-9428-6888-b85c-61cd3cbb3210", 6),
            ("017f22e2-79b0-7cc3-98c4-dc0c0c07398f", 7),
            ("55238d15-c926-f598-b49d-cf4e913ba13c", 15),
            ("ffffffff-ffff-ffff-ffff-ffffffffffff", 15),
        ];

        for (text, version) in cases {
            assert_eq!(text.parse::<Uuid>().unwrap().version(), version);
        }
    }

    /// Decodes the variant bits of byte 8
    #[test]
    fn decodes_the_variant_bits_of_byte_8() {
        let cases = [
            ("00000000-0000-0000-0000-000000000000", Variant::Var0),
            ("55238d15-c926-4598-349d-cf4e913ba13c", Variant::Var0),
            ("55238d15-c926-4598-849d-cf4e913ba13c", Variant::Var10),
            ("55238d15-c926-4598-b49d-cf4e913ba13c", Variant::Var10),
            ("55238d15-c926-4598-c49d-cf4e913ba13c", Variant::Var110),
            ("55238d15-c926-4598-e49d-cf4e913ba13c", Variant::VarReserved),
            ("ffffffff-ffff-ffff-ffff-ffffffffffff", Variant::VarReserved),
        ];

        for (text, variant) in cases {
            assert_eq!(text.parse::<Uuid>().unwrap().variant(), variant);
        }
    }

    /// Accepts conformant representations and sentinels only
    #[test]
    fn accepts_conformant_representations_and_sentinels_only() {
        let valid = [
            "00000000-0000-0000-0000-000000000000",
            "ffffffff-ffff-ffff-ffff-ffffffffffff",
            "FFFFFFFF-FFFF-FFFF-FFFF-FFFFFFFFFFFF",
            "d9428888-122b-11e1-b85c-61cd3cbb3210",
            "9125a8dc-52ee-365b-a5aa-81b0b3681cf6",
            "55238d15-c926-4598-b49d-cf4e913ba13c",
            "55238D15-C926-4598-B49D-CF4E913BA13C",
            "fdda765f-fc57-5604-a269-52a7df8164ec",
            "1e1122bd-9428-6888-b85c-61cd3cbb3210",
            "017f22e2-79b0-7cc3-98c4-dc0c0c07398f",
            "320c3d4d-cc00-875b-8ec9-32d5f69181c0",
        ];
        let invalid = [
            // version nibble outside 1..=8
            "55238d15-c926-0598-b49d-cf4e913ba13c",
            "55238d15-c926-9598-b49d-cf4e913ba13c",
            "55238d15-c926-f598-b49d-cf4e913ba13c",
            // non-RFC variant bits
            "55238d15-c926-4598-349d-cf4e913ba13c",
            "55238d15-c926-4598-c49d-cf4e913ba13c",
            "55238d15-c926-4598-e49d-cf4e913ba13c",
        ];

        for e in valid {
            assert!(validate(e), "{}", e);
        }
        for e in invalid {
            assert!(!validate(e), "{}", e);
        }
    }
}
