//! UUID generator and related types.

use std::time;

use rand::RngCore;

use crate::{Error, Uuid};

/// Tick-count difference between 1582-10-15T00:00:00Z and the Unix epoch, in 100-nanosecond
/// intervals.
pub(crate) const GREGORIAN_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

/// Represents a UUID generator that owns a random number source and, for the time-based versions
/// 1 and 6, the clock state required by RFC 9562: the tick count of the last emitted identifier,
/// a 14-bit clock sequence, and a 48-bit node id.
///
/// The clock sequence is randomized at construction and incremented (mod 2^14) whenever a newly
/// computed timestamp is less than or equal to the stored one, so that rapid or clock-regressed
/// calls still yield distinct `(timestamp, clock_seq)` pairs. The node id is fixed for the life of
/// the generator; when it is chosen at random, its multicast bit is forced on so it can never
/// collide with an IEEE 802 hardware address.
///
/// A generator is single-threaded by itself; share one across threads through Rust's standard
/// synchronization mechanism to obtain process-wide uniqueness. The crate-level entry points do
/// exactly that with a global mutex-guarded instance.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
/// use uuid9562::Generator;
///
/// let g = sync::Arc::new(sync::Mutex::new(Generator::new(OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate_v1(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Generator<R> {
    /// Gregorian tick count of the last version 1 or 6 identifier emitted.
    timestamp: u64,
    clock_seq: u16,
    node: [u8; 6],

    /// The random number generator used by the generator.
    rng: R,
}

impl<R: RngCore> Generator<R> {
    /// Creates a generator instance with a random node id and clock sequence.
    pub fn new(mut rng: R) -> Self {
        let mut node = [0u8; 6];
        rng.fill_bytes(&mut node);
        node[0] |= 0x01; // multicast bit marks the node id as randomly chosen
        let clock_seq = (rng.next_u32() & 0x3fff) as u16;
        Self {
            timestamp: 0,
            clock_seq,
            node,
            rng,
        }
    }

    /// Creates a generator instance with a fixed node id and initial clock sequence, e.g. for
    /// deterministic tests.
    ///
    /// # Errors
    ///
    /// Returns `Error::Range` if `clock_seq` is not a 14-bit integer.
    pub fn with_state(rng: R, node: [u8; 6], clock_seq: u16) -> Result<Self, Error> {
        if clock_seq >= 1 << 14 {
            return Err(Error::Range("clock_seq"));
        }
        Ok(Self {
            timestamp: 0,
            clock_seq,
            node,
            rng,
        })
    }

    /// Returns the node id of the generator.
    pub const fn node(&self) -> &[u8; 6] {
        &self.node
    }

    /// Returns the current clock sequence of the generator.
    pub const fn clock_seq(&self) -> u16 {
        self.clock_seq
    }

    /// Generates a new UUIDv1 object from the current system time.
    pub fn generate_v1(&mut self) -> Uuid {
        self.generate_v1_with(&ClockOptions::default())
            .expect("system clock out of UUID timestamp range")
    }

    /// Generates a new UUIDv1 object, honoring the explicit field overrides passed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Range` if an override exceeds its field's bit width.
    pub fn generate_v1_with(&mut self, options: &ClockOptions) -> Result<Uuid, Error> {
        let (ticks, clock_seq, node) = self.next_fields(options)?;
        Ok(Uuid::from_rfc4122_timestamp(ticks, clock_seq, &node))
    }

    /// Generates a new UUIDv6 object from the current system time.
    pub fn generate_v6(&mut self) -> Uuid {
        self.generate_v6_with(&ClockOptions::default())
            .expect("system clock out of UUID timestamp range")
    }

    /// Generates a new UUIDv6 object, honoring the explicit field overrides passed.
    ///
    /// Shares the clock state and timestamp computation with [`Generator::generate_v1_with`];
    /// only the output field order differs.
    ///
    /// # Errors
    ///
    /// Returns `Error::Range` if an override exceeds its field's bit width.
    pub fn generate_v6_with(&mut self, options: &ClockOptions) -> Result<Uuid, Error> {
        let (ticks, clock_seq, node) = self.next_fields(options)?;
        Ok(Uuid::from_sorted_rfc4122_timestamp(ticks, clock_seq, &node))
    }

    /// Computes the `(ticks, clock_seq, node)` triple for the next version 1 or 6 identifier,
    /// updating the clock state unless an explicit clock sequence bypasses it.
    fn next_fields(&mut self, options: &ClockOptions) -> Result<(u64, u16, [u8; 6]), Error> {
        let (msecs, nsecs) = match options.msecs {
            Some(msecs) => (msecs, options.nsecs.unwrap_or(0)),
            None => {
                let (msecs, wall_nsecs) = wall_clock();
                (msecs, options.nsecs.unwrap_or(wall_nsecs))
            }
        };
        let ticks = gregorian_ticks(msecs, nsecs)?;

        let clock_seq = match options.clock_seq {
            Some(seq) if seq >= 1 << 14 => return Err(Error::Range("clock_seq")),
            // an explicit sequence bypasses the stored one without disturbing it
            Some(seq) => seq,
            None => {
                if ticks <= self.timestamp {
                    self.clock_seq = (self.clock_seq + 1) & 0x3fff;
                }
                self.timestamp = ticks;
                self.clock_seq
            }
        };

        Ok((ticks, clock_seq, options.node.unwrap_or(self.node)))
    }

    /// Generates a new UUIDv4 object from sixteen random bytes.
    pub fn generate_v4(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        Uuid::from_version_bytes(bytes, 4)
    }

    /// Generates a new UUIDv7 object from the current system time.
    pub fn generate_v7(&mut self) -> Uuid {
        let (msecs, _) = wall_clock();
        self.generate_v7_core(msecs)
            .expect("system clock out of UUID timestamp range")
    }

    /// Generates a new UUIDv7 object from the `unix_ts_ms` passed.
    ///
    /// The 48-bit big-endian millisecond timestamp fills the first six bytes; the remaining ten
    /// are random. No clock state is consulted, so two calls within the same millisecond may sort
    /// in either order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Range` if `unix_ts_ms` is not a 48-bit integer.
    pub fn generate_v7_core(&mut self, unix_ts_ms: u64) -> Result<Uuid, Error> {
        if unix_ts_ms >= 1 << 48 {
            return Err(Error::Range("unix_ts_ms"));
        }
        let mut bytes = [0u8; 16];
        bytes[..6].copy_from_slice(&unix_ts_ms.to_be_bytes()[2..]);
        self.rng.fill_bytes(&mut bytes[6..]);
        Ok(Uuid::from_version_bytes(bytes, 7))
    }
}

impl<R: RngCore + Default> Default for Generator<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

/// Explicit field overrides for version 1 and 6 generation.
///
/// Every field defaults to `None`, in which case the generator substitutes the current system
/// time and its own clock state. An explicit `clock_seq` is used as given and leaves the stored
/// sequence untouched; explicit timestamps still go through the regression check so that repeated
/// or rewound timestamps draw fresh clock sequences.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct ClockOptions {
    /// Unix-epoch timestamp in milliseconds.
    pub msecs: Option<u64>,
    /// Sub-millisecond offset in nanoseconds, `0..1_000_000`.
    pub nsecs: Option<u32>,
    /// 48-bit node id.
    pub node: Option<[u8; 6]>,
    /// 14-bit clock sequence.
    pub clock_seq: Option<u16>,
}

/// Reads the wall clock as Unix milliseconds plus the sub-millisecond nanosecond remainder.
fn wall_clock() -> (u64, u32) {
    let d = time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .expect("clock may have gone backwards");
    (d.as_millis() as u64, d.subsec_nanos() % 1_000_000)
}

/// Converts a Unix millisecond timestamp and nanosecond offset into the 60-bit count of
/// 100-nanosecond intervals since 1582-10-15T00:00:00Z.
fn gregorian_ticks(msecs: u64, nsecs: u32) -> Result<u64, Error> {
    if nsecs >= 1_000_000 {
        return Err(Error::Range("nsecs"));
    }
    msecs
        .checked_mul(10_000)
        .and_then(|t| t.checked_add(nsecs as u64 / 100))
        .and_then(|t| t.checked_add(GREGORIAN_OFFSET))
        .filter(|t| *t < 1 << 60)
        .ok_or(Error::Range("msecs"))
}
