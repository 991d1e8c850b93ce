use crate::{Layout, SecflakeId, SystemClock, TimeSource};
use parking_lot::Mutex;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A lock-based generator of [`SecflakeId`]s for multi-threaded use.
///
/// The generator owns the last-issued identifier (which carries the last
/// second, last sequence, node id, and [`Layout`]) behind an
/// [`Arc<Mutex<_>>`], so clones share one sequence space and can be handed
/// to other threads safely.
///
/// [`SecflakeGenerator::generate`] never blocks, sleeps, or retries:
///
/// - a clock reading earlier than the last issued second is clamped, so
///   minted timestamps never decrease;
/// - exhausting the per-second sequence space borrows the next second
///   arithmetically instead of waiting for the real clock to reach it. Under
///   sustained load beyond `2^sequence_bits` mints per second, minted
///   timestamps run ahead of wall-clock time.
///
/// Together these make the `(second, sequence)` pairs of successive mints
/// strictly increasing in lexicographic order for one generator instance,
/// which is what uniqueness rests on. Node ids must be unique across
/// instances whose output meets; this crate does not verify that.
///
/// # Example
///
/// ```
/// use secflake::{SecflakeGenerator, SystemClock};
///
/// let generator = SecflakeGenerator::new(5, SystemClock);
/// let a = generator.generate();
/// let b = generator.generate();
/// assert_eq!(a.node(), 5);
/// assert!(a.to_u64() < b.to_u64());
/// ```
pub struct SecflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    state: Arc<Mutex<SecflakeId>>,
    time: T,
}

impl<T> Clone for SecflakeGenerator<T>
where
    T: TimeSource + Clone,
{
    /// Clones share the generator's state: both halves mint from the same
    /// `(second, sequence)` space.
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            time: self.time.clone(),
        }
    }
}

impl<T> SecflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator for `node` under the default [`Layout`].
    ///
    /// `node` values wider than the layout's node field are masked, not
    /// rejected.
    pub fn new(node: u64, time: T) -> Self {
        Self::with_layout(node, Layout::DEFAULT, time)
    }

    /// Creates a generator with an explicit bit [`Layout`].
    ///
    /// # Example
    ///
    /// ```
    /// use secflake::{Layout, SecflakeGenerator, SystemClock};
    ///
    /// let layout = Layout::new(13, 3, 1_515_000_000).unwrap();
    /// let generator = SecflakeGenerator::with_layout(6, layout, SystemClock);
    /// assert_eq!(generator.generate().node(), 6);
    /// ```
    pub fn with_layout(node: u64, layout: Layout, time: T) -> Self {
        let state = SecflakeId::from_parts(0, 0, node & layout.node_mask(), layout);
        Self {
            state: Arc::new(Mutex::new(state)),
            time,
        }
    }

    /// Mints the next identifier.
    ///
    /// The whole read-modify-write runs under the generator's lock: read the
    /// clock result against the last issued `(second, sequence)`, pick the
    /// successor pair, store it, return it. See the type-level docs for the
    /// clamp and borrow rules.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> SecflakeId {
        let now = self.time.current_second();
        let mut last = self.state.lock();
        let layout = last.layout();

        let next = if now <= last.second() {
            // Same tick, or the clock stepped backward: never hand out a
            // second earlier than one already issued.
            let second = last.second();
            let sequence = (last.sequence() + 1) & layout.sequence_mask();
            if sequence == 0 {
                // Sequence space exhausted; borrow the next second.
                SecflakeId::from_parts(second + 1, 0, last.node(), layout)
            } else {
                SecflakeId::from_parts(second, sequence, last.node(), layout)
            }
        } else {
            SecflakeId::from_parts(now, 0, last.node(), layout)
        };

        *last = next;
        next
    }

    /// The node identifier minted into every ID.
    pub fn node(&self) -> u64 {
        self.state.lock().node()
    }

    /// Re-targets the node identifier, masked to the layout's node field.
    ///
    /// Runs under the same lock as [`SecflakeGenerator::generate`], so a
    /// concurrent mint observes either the old or the new node, never a torn
    /// value.
    pub fn set_node(&self, node: u64) {
        let mut last = self.state.lock();
        let layout = last.layout();
        *last = SecflakeId::from_parts(
            last.second(),
            last.sequence(),
            node & layout.node_mask(),
            layout,
        );
    }

    /// The bit layout this generator packs with.
    pub fn layout(&self) -> Layout {
        self.state.lock().layout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::DEFAULT_EPOCH;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::thread::scope;

    struct MockTime {
        secs: u64,
    }

    impl TimeSource for MockTime {
        fn current_second(&self) -> u64 {
            self.secs
        }
    }

    #[derive(Clone)]
    struct SharedMockTime {
        secs: Arc<AtomicU64>,
    }

    impl SharedMockTime {
        fn at(secs: u64) -> Self {
            Self {
                secs: Arc::new(AtomicU64::new(secs)),
            }
        }

        fn set(&self, secs: u64) {
            self.secs.store(secs, Ordering::Relaxed);
        }
    }

    impl TimeSource for SharedMockTime {
        fn current_second(&self) -> u64 {
            self.secs.load(Ordering::Relaxed)
        }
    }

    #[test]
    fn sequence_increments_within_same_tick() {
        let generator = SecflakeGenerator::new(3, MockTime {
            secs: DEFAULT_EPOCH + 42,
        });
        let id1 = generator.generate();
        let id2 = generator.generate();
        let id3 = generator.generate();

        assert_eq!(id1.second(), DEFAULT_EPOCH + 42);
        assert_eq!(id2.second(), DEFAULT_EPOCH + 42);
        assert_eq!(id3.second(), DEFAULT_EPOCH + 42);
        assert_eq!(id1.sequence(), 0);
        assert_eq!(id2.sequence(), 1);
        assert_eq!(id3.sequence(), 2);
        assert!(id1 < id2 && id2 < id3);
    }

    #[test]
    fn first_id_at_the_epoch_instant() {
        let generator = SecflakeGenerator::new(5, MockTime {
            secs: DEFAULT_EPOCH,
        });
        let id = generator.generate();

        assert_eq!(id.second(), DEFAULT_EPOCH);
        assert_eq!(id.sequence(), 0);
        assert_eq!(id.node(), 5);
        // The time field is zero at the epoch, leaving only the node bits.
        assert_eq!(id.to_u64() >> id.layout().time_shift(), 0);
        assert_eq!(id.to_u64(), 5);
    }

    #[test]
    fn node_wider_than_its_field_is_masked() {
        // 37 & 0x1f == 5 under the default 5-bit node field.
        let generator = SecflakeGenerator::new(37, MockTime {
            secs: DEFAULT_EPOCH,
        });
        assert_eq!(generator.node(), 5);
        assert_eq!(generator.generate().node(), 5);
    }

    #[test]
    fn set_node_applies_to_subsequent_ids() {
        let generator = SecflakeGenerator::new(1, MockTime {
            secs: DEFAULT_EPOCH + 1,
        });
        assert_eq!(generator.generate().node(), 1);

        generator.set_node(7);
        assert_eq!(generator.node(), 7);
        assert_eq!(generator.generate().node(), 7);

        // Out-of-range reconfiguration masks too: 39 & 0x1f == 7.
        generator.set_node(39);
        assert_eq!(generator.node(), 7);
    }

    #[test]
    fn sequence_exhaustion_borrows_seconds() {
        // 4 sequence bits: the per-second space wraps after 16 mints.
        let layout = Layout::new(9, 5, DEFAULT_EPOCH).unwrap();
        let now = DEFAULT_EPOCH + 100;
        let generator = SecflakeGenerator::with_layout(1, layout, MockTime { secs: now });

        for i in 0..16 {
            let id = generator.generate();
            assert_eq!(id.second(), now);
            assert_eq!(id.sequence(), i);
        }

        // The 17th mint in the same real second borrows the next one.
        let id = generator.generate();
        assert_eq!(id.second(), now + 1);
        assert_eq!(id.sequence(), 0);

        // Each further wrap borrows exactly one more second.
        for i in 1..16 {
            let id = generator.generate();
            assert_eq!(id.second(), now + 1);
            assert_eq!(id.sequence(), i);
        }
        let id = generator.generate();
        assert_eq!(id.second(), now + 2);
        assert_eq!(id.sequence(), 0);
    }

    #[test]
    fn backward_clock_is_clamped() {
        let time = SharedMockTime::at(DEFAULT_EPOCH + 1000);
        let generator = SecflakeGenerator::new(2, time.clone());

        let id1 = generator.generate();
        assert_eq!(id1.second(), DEFAULT_EPOCH + 1000);

        time.set(DEFAULT_EPOCH + 900);
        let id2 = generator.generate();
        assert_eq!(id2.second(), DEFAULT_EPOCH + 1000);
        assert_eq!(id2.sequence(), 1);
        assert!(id2.to_u64() > id1.to_u64());

        time.set(DEFAULT_EPOCH + 1001);
        let id3 = generator.generate();
        assert_eq!(id3.second(), DEFAULT_EPOCH + 1001);
        assert_eq!(id3.sequence(), 0);
    }

    #[test]
    fn raw_values_strictly_increase_under_a_frozen_clock() {
        // 6 sequence bits: plenty of wraps over 1000 mints.
        let layout = Layout::new(8, 2, DEFAULT_EPOCH).unwrap();
        let generator = SecflakeGenerator::with_layout(1, layout, MockTime {
            secs: DEFAULT_EPOCH + 7,
        });

        let mut last = 0u64;
        for _ in 0..1000 {
            let raw = generator.generate().to_u64();
            assert!(raw > last);
            last = raw;
        }
    }

    #[test]
    fn pairs_stay_unique_across_sequence_exhaustion() {
        let layout = Layout::new(9, 5, DEFAULT_EPOCH).unwrap();
        let generator = SecflakeGenerator::with_layout(1, layout, MockTime {
            secs: DEFAULT_EPOCH + 3,
        });

        let mut seen = HashSet::new();
        for _ in 0..100 {
            let id = generator.generate();
            assert!(seen.insert((id.second(), id.sequence())));
        }
    }

    #[test]
    fn clones_share_sequence_state() {
        let time = SharedMockTime::at(DEFAULT_EPOCH + 5);
        let generator = SecflakeGenerator::new(1, time);
        let clone = generator.clone();

        assert_eq!(generator.generate().sequence(), 0);
        assert_eq!(clone.generate().sequence(), 1);
    }

    #[test]
    fn unique_under_concurrent_load() {
        const THREADS: usize = 8;
        const IDS_PER_THREAD: usize = 4096;

        // 10 sequence bits, so the total far exceeds one second's space and
        // the borrow path is exercised alongside real clock ticks.
        let layout = Layout::new(13, 3, DEFAULT_EPOCH).unwrap();
        let generator = SecflakeGenerator::with_layout(1, layout, SystemClock);

        let ids: Vec<u64> = scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let generator = generator.clone();
                    s.spawn(move || {
                        (0..IDS_PER_THREAD)
                            .map(|_| generator.generate().to_u64())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        let unique: HashSet<u64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), THREADS * IDS_PER_THREAD);
    }
}
