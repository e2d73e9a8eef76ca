//! Conversions between the version 1 and version 6 timestamp layouts.
//!
//! Both versions carry the same 60-bit Gregorian tick count; they differ only in the order of its
//! chunks. The converters permute the timestamp bytes, rewrite the version nibble, and copy the
//! clock-sequence, variant, and node bytes verbatim.

use crate::{Error, Uuid};

/// Reorders the timestamp of a version 1 UUID into the sortable version 6 layout.
///
/// # Errors
///
/// Returns `Error::UnsupportedVersion` if the source's version nibble is not 1.
///
/// # Examples
///
/// ```rust
/// use uuid9562::{v1_to_v6, Uuid};
///
/// let v1 = "f1207660-21d2-11ef-8c4f-419efbd44d48".parse::<Uuid>()?;
/// assert_eq!(
///     v1_to_v6(v1)?.to_string(),
///     "1ef21d2f-1207-6660-8c4f-419efbd44d48"
/// );
/// # Ok::<(), uuid9562::Error>(())
/// ```
pub fn v1_to_v6(uuid: Uuid) -> Result<Uuid, Error> {
    if uuid.version() != 1 {
        return Err(Error::UnsupportedVersion {
            expected: 1,
            found: uuid.version(),
        });
    }

    let b = uuid.as_bytes();
    let ticks = (((b[6] & 0x0f) as u64) << 56)
        | ((b[7] as u64) << 48)
        | ((b[4] as u64) << 40)
        | ((b[5] as u64) << 32)
        | ((b[0] as u64) << 24)
        | ((b[1] as u64) << 16)
        | ((b[2] as u64) << 8)
        | b[3] as u64;

    let mut bytes = *b;
    bytes[0] = (ticks >> 52) as u8;
    bytes[1] = (ticks >> 44) as u8;
    bytes[2] = (ticks >> 36) as u8;
    bytes[3] = (ticks >> 28) as u8;
    bytes[4] = (ticks >> 20) as u8;
    bytes[5] = (ticks >> 12) as u8;
    bytes[6] = 0x60 | ((ticks >> 8) as u8 & 0x0f);
    bytes[7] = ticks as u8;
    Ok(Uuid::from(bytes))
}

/// Reorders the timestamp of a version 6 UUID back into the version 1 layout.
///
/// Exact inverse of [`v1_to_v6`].
///
/// # Errors
///
/// Returns `Error::UnsupportedVersion` if the source's version nibble is not 6.
pub fn v6_to_v1(uuid: Uuid) -> Result<Uuid, Error> {
    if uuid.version() != 6 {
        return Err(Error::UnsupportedVersion {
            expected: 6,
            found: uuid.version(),
        });
    }

    let b = uuid.as_bytes();
    let ticks = ((b[0] as u64) << 52)
        | ((b[1] as u64) << 44)
        | ((b[2] as u64) << 36)
        | ((b[3] as u64) << 28)
        | ((b[4] as u64) << 20)
        | ((b[5] as u64) << 12)
        | (((b[6] & 0x0f) as u64) << 8)
        | b[7] as u64;

    let mut bytes = *b;
    bytes[0] = (ticks >> 24) as u8;
    bytes[1] = (ticks >> 16) as u8;
    bytes[2] = (ticks >> 8) as u8;
    bytes[3] = ticks as u8;
    bytes[4] = (ticks >> 40) as u8;
    bytes[5] = (ticks >> 32) as u8;
    bytes[6] = 0x10 | ((ticks >> 56) as u8 & 0x0f);
    bytes[7] = (ticks >> 48) as u8;
    Ok(Uuid::from(bytes))
}
