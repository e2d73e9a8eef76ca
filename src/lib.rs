//! Generation, parsing, validation, and conversion of RFC 9562 UUIDs
//!
//! This crate implements the 128-bit universally unique identifiers of the RFC 4122/9562 family:
//! the time-based version 1, the name-based versions 3 and 5, the random version 4, the reordered
//! time-based version 6, and the Unix-epoch-based version 7, plus the reserved Nil and Max
//! sentinel values.
//!
//! ```rust
//! use uuid9562::{uuid4, uuid7, Uuid};
//!
//! let uuid = uuid7();
//! println!("{}", uuid); // e.g. "01809424-3e59-7c05-9219-566f82fff672"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let uuid = uuid4();
//! assert_eq!(uuid.version(), 4);
//!
//! let parsed = "d9428888-122b-11e1-b85c-61cd3cbb3210".parse::<Uuid>()?;
//! assert_eq!(parsed.version(), 1);
//! # Ok::<(), uuid9562::Error>(())
//! ```
//!
//! # Field and bit layout
//!
//! Every identifier is sixteen big-endian bytes. The high nibble of byte 6 carries the version;
//! the top two bits of byte 8 are set at `10` for all RFC-conformant variants. The versions
//! differ in what fills the remaining 122 bits:
//!
//! - **v1**: a 60-bit count of 100-nanosecond ticks since 1582-10-15T00:00:00Z, stored
//!   least-significant chunk first (`time_low(32) | time_mid(16) | time_hi(12)`), followed by a
//!   14-bit clock sequence and a 48-bit node id.
//! - **v6**: the same fields as v1 with the timestamp chunks reordered from most- to
//!   least-significant, which makes identifiers lexicographically sortable by creation time.
//! - **v3 / v5**: an MD5 (v3) or truncated SHA-1 (v5) digest of a namespace UUID concatenated
//!   with a name; fully deterministic.
//! - **v4**: 122 random bits.
//! - **v7**: a 48-bit Unix millisecond timestamp followed by 74 random bits. Two identifiers
//!   drawn within the same millisecond may sort in either order; that is a deliberate tradeoff
//!   for statelessness, not a defect.
//!
//! # Generators and clock state
//!
//! The time-based versions 1 and 6 share mutable clock state: the timestamp of the last emitted
//! identifier, the clock sequence that disambiguates same-tick and clock-regressed calls, and the
//! process-stable node id. That state lives in an explicit [`Generator`] object; the crate-level
//! functions [`uuid1`], [`uuid4`], [`uuid6`], and [`uuid7`] route through one process-wide,
//! mutex-guarded instance. Instantiate a [`Generator`] directly to control the random source or
//! to fix the node id and clock sequence for reproducible output.
//!
//! ```rust
//! use uuid9562::{uuid1_with, uuid3, v1_to_v6, ClockOptions, Uuid};
//!
//! // deterministic name-based generation
//! let uuid = uuid3(&Uuid::NAMESPACE_DNS, "hello.example.com");
//! assert_eq!(uuid.to_string(), "9125a8dc-52ee-365b-a5aa-81b0b3681cf6");
//!
//! // explicit field overrides and the v1 -> v6 timestamp permutation
//! let v1 = uuid1_with(&ClockOptions {
//!     msecs: Some(1_321_651_533_573),
//!     nsecs: Some(543_200),
//!     node: Some([0x61, 0xcd, 0x3c, 0xbb, 0x32, 0x10]),
//!     clock_seq: Some(0x385c),
//! })?;
//! assert_eq!(v1.to_string(), "d9428888-122b-11e1-b85c-61cd3cbb3210");
//! assert_eq!(
//!     v1_to_v6(v1)?.to_string(),
//!     "1e1122bd-9428-6888-b85c-61cd3cbb3210"
//! );
//! # Ok::<(), uuid9562::Error>(())
//! ```
//!
//! # Crate features
//!
//! - `serde`: serialization and deserialization of [`Uuid`] (human-readable formats use the
//!   canonical string, compact formats the raw bytes).

#![cfg_attr(docsrs, feature(doc_cfg))]

mod uuid;
pub use uuid::{validate, Uuid, Variant};

mod error;
pub use error::Error;

pub mod generator;
#[doc(inline)]
pub use generator::{ClockOptions, Generator};

mod hashed;
pub use hashed::{uuid3, uuid5, uuid_with_digest};

mod convert;
pub use convert::{v1_to_v6, v6_to_v1};

mod global_gen;
pub use global_gen::{uuid1, uuid1_with, uuid4, uuid6, uuid6_with, uuid7, uuid7_with};
