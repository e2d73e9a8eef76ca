//! Name-based UUID generation (versions 3 and 5).

use digest::Digest;
use md5::Md5;
use sha1::Sha1;

use crate::Uuid;

/// Generates a UUIDv3 object by hashing the namespace UUID and name with MD5.
///
/// Fully deterministic: the same `(namespace, name)` pair always yields the same UUID.
///
/// # Examples
///
/// ```rust
/// use uuid9562::{uuid3, Uuid};
///
/// let uuid = uuid3(&Uuid::NAMESPACE_DNS, "hello.example.com");
/// assert_eq!(uuid.to_string(), "9125a8dc-52ee-365b-a5aa-81b0b3681cf6");
/// ```
pub fn uuid3(namespace: &Uuid, name: impl AsRef<[u8]>) -> Uuid {
    uuid_with_digest::<Md5>(3, namespace, name.as_ref())
}

/// Generates a UUIDv5 object by hashing the namespace UUID and name with SHA-1, truncated to
/// sixteen bytes.
///
/// Fully deterministic: the same `(namespace, name)` pair always yields the same UUID.
///
/// # Examples
///
/// ```rust
/// use uuid9562::{uuid5, Uuid};
///
/// let uuid = uuid5(&Uuid::NAMESPACE_DNS, "hello.example.com");
/// assert_eq!(uuid.to_string(), "fdda765f-fc57-5604-a269-52a7df8164ec");
/// ```
pub fn uuid5(namespace: &Uuid, name: impl AsRef<[u8]>) -> Uuid {
    uuid_with_digest::<Sha1>(5, namespace, name.as_ref())
}

/// Generates a name-based UUID with an arbitrary digest algorithm.
///
/// The digest is computed over the namespace bytes followed by the name bytes; its first sixteen
/// bytes receive the version nibble and variant bits. [`uuid3`] and [`uuid5`] are thin wrappers
/// over this function supplying the RFC-mandated algorithms.
///
/// # Panics
///
/// Panics if the digest output is shorter than sixteen bytes.
pub fn uuid_with_digest<D: Digest>(version: u8, namespace: &Uuid, name: &[u8]) -> Uuid {
    let mut hasher = D::new();
    hasher.update(namespace.as_bytes());
    hasher.update(name);
    let hash = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);
    Uuid::from_version_bytes(bytes, version)
}
