//! Default generator and entry point functions.

use std::sync;

use crate::generator::ClockOptions;
use crate::{Error, Uuid};
use inner::GlobalGenInner;

/// Returns the lock handle of the process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("uuid9562: could not lock global generator")
}

/// Generates a UUIDv1 object.
///
/// This function employs a process-wide generator, so concurrent callers never draw the same
/// `(timestamp, clock sequence)` pair and all threads share one node id. On Unix, the generator
/// is reset when the process ID changes (i.e., upon process forks) to prevent collisions across
/// processes.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid9562::uuid1();
/// println!("{}", uuid); // e.g., "d9428888-122b-11e1-b85c-61cd3cbb3210"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// ```
pub fn uuid1() -> Uuid {
    lock_global_gen().get_mut().generate_v1()
}

/// Generates a UUIDv1 object, honoring the explicit field overrides passed.
///
/// # Errors
///
/// Returns `Error::Range` if an override exceeds its field's bit width.
///
/// # Examples
///
/// ```rust
/// use uuid9562::ClockOptions;
///
/// let uuid = uuid9562::uuid1_with(&ClockOptions {
///     msecs: Some(1_321_651_533_573),
///     nsecs: Some(543_200),
///     node: Some([0x61, 0xcd, 0x3c, 0xbb, 0x32, 0x10]),
///     clock_seq: Some(0x385c),
/// })?;
/// assert_eq!(uuid.to_string(), "d9428888-122b-11e1-b85c-61cd3cbb3210");
/// # Ok::<(), uuid9562::Error>(())
/// ```
pub fn uuid1_with(options: &ClockOptions) -> Result<Uuid, Error> {
    lock_global_gen().get_mut().generate_v1_with(options)
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid9562::uuid4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> Uuid {
    lock_global_gen().get_mut().generate_v4()
}

/// Generates a UUIDv6 object.
///
/// Shares the clock state with [`uuid1`]; the output is lexicographically sortable by timestamp.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid9562::uuid6();
/// println!("{}", uuid); // e.g., "1e1122bd-9428-6888-b85c-61cd3cbb3210"
/// ```
pub fn uuid6() -> Uuid {
    lock_global_gen().get_mut().generate_v6()
}

/// Generates a UUIDv6 object, honoring the explicit field overrides passed.
///
/// # Errors
///
/// Returns `Error::Range` if an override exceeds its field's bit width.
pub fn uuid6_with(options: &ClockOptions) -> Result<Uuid, Error> {
    lock_global_gen().get_mut().generate_v6_with(options)
}

/// Generates a UUIDv7 object.
///
/// # Examples
///
/// ```rust
/// let uuid = uuid9562::uuid7();
/// println!("{}", uuid); // e.g., "01809424-3e59-7c05-9219-566f82fff672"
/// ```
pub fn uuid7() -> Uuid {
    lock_global_gen().get_mut().generate_v7()
}

/// Generates a UUIDv7 object from the Unix millisecond timestamp passed.
///
/// # Errors
///
/// Returns `Error::Range` if `unix_ts_ms` is not a 48-bit integer.
pub fn uuid7_with(unix_ts_ms: u64) -> Result<Uuid, Error> {
    lock_global_gen().get_mut().generate_v7_core(unix_ts_ms)
}

mod inner {
    use rand::rngs::adapter::ReseedingRng;
    use rand::rngs::OsRng;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha12Core;

    use crate::generator::Generator;

    /// The random number generator of the global generator.
    ///
    /// Employs [`ChaCha12Core`] with a [`ReseedingRng`] wrapper to emulate the strategy used by
    /// [`rand::rngs::ThreadRng`].
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl RngCore for GlobalGenRng {
        fn next_u32(&mut self) -> u32 {
            self.0.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.0.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.0.fill_bytes(dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.0.try_fill_bytes(dest)
        }
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: Generator<GlobalGenRng>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .expect("uuid9562: could not initialize global generator");
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: Generator::new(GlobalGenRng(ReseedingRng::new(core, 1024 * 64, OsRng))),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`Generator`] instance, resetting the state on
        /// Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut Generator<GlobalGenRng> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}


#[cfg(test)]
mod tests_v6 {
    use super::uuid6;

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| uuid6().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-6[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Generates sortable string representation by creation time
    #[test]
    fn generates_sortable_string_representation_by_creation_time() {
        SAMPLES.with(|samples| {
            for i in 1..N_SAMPLES {
                assert!(samples[i - 1] < samples[i]);
            }
        });
    }
}
