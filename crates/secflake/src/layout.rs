use crate::{Error, Result, time::DEFAULT_EPOCH};

/// The bit layout and epoch an identifier is packed with.
///
/// A layout splits an unsigned 64-bit word, from most to least significant
/// bit, into a seconds-since-epoch field, a per-second sequence field, and a
/// node field. `time_shift` is the total width of the two low-order fields;
/// `node_bits` is the node's share of it. The default layout:
///
/// ```text
///  Bit Index:  63             21 20              5 4           0
///              +----------------+-----------------+------------+
///  Field:      | seconds (43)   | sequence (16)   | node (5)   |
///              +----------------+-----------------+------------+
///              |<---- MSB --------- 64 bits --------- LSB ---->|
/// ```
///
/// With 32 bits of seconds in actual use, a default-layout identifier stays
/// within 53 bits and survives transport through IEEE-754 doubles.
///
/// Widths and epoch are instance-level configuration, validated once in
/// [`Layout::new`]; the pack/unpack arithmetic itself never fails.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Layout {
    time_shift: u32,
    node_bits: u32,
    epoch: u64,
}

impl Layout {
    /// Widest accepted time shift; keeps at least 32 bits for the seconds
    /// field.
    pub const MAX_TIME_SHIFT: u32 = 32;

    /// The documented default: 21 low-order bits split into a 16-bit
    /// sequence and a 5-bit node, measured from [`DEFAULT_EPOCH`].
    pub const DEFAULT: Self = Self {
        time_shift: 21,
        node_bits: 5,
        epoch: DEFAULT_EPOCH,
    };

    /// Creates a layout with explicit field widths and epoch.
    ///
    /// # Errors
    ///
    /// Returns an error if `time_shift` is outside `1..=32` or `node_bits`
    /// exceeds `time_shift`.
    ///
    /// # Example
    ///
    /// ```
    /// use secflake::Layout;
    ///
    /// let layout = Layout::new(21, 5, 1_515_000_000).unwrap();
    /// assert_eq!(layout.sequence_bits(), 16);
    /// assert_eq!(layout.max_node(), 31);
    /// ```
    pub const fn new(time_shift: u32, node_bits: u32, epoch: u64) -> Result<Self> {
        if time_shift == 0 || time_shift > Self::MAX_TIME_SHIFT {
            return Err(Error::TimeShiftOutOfRange(time_shift));
        }
        if node_bits > time_shift {
            return Err(Error::NodeBitsTooWide {
                node_bits,
                time_shift,
            });
        }
        Ok(Self {
            time_shift,
            node_bits,
            epoch,
        })
    }

    /// Total width of the sequence and node fields.
    pub const fn time_shift(&self) -> u32 {
        self.time_shift
    }

    /// Width of the node field.
    pub const fn node_bits(&self) -> u32 {
        self.node_bits
    }

    /// Width of the per-second sequence field.
    pub const fn sequence_bits(&self) -> u32 {
        self.time_shift - self.node_bits
    }

    /// The reference instant, in seconds since the Unix epoch, that the
    /// seconds field is measured from.
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Bitmask covering the node field.
    pub const fn node_mask(&self) -> u64 {
        (1 << self.node_bits) - 1
    }

    /// Bitmask covering the sequence field.
    pub const fn sequence_mask(&self) -> u64 {
        (1 << self.sequence_bits()) - 1
    }

    /// Largest node id the layout can carry.
    pub const fn max_node(&self) -> u64 {
        self.node_mask()
    }

    /// Largest sequence value a single second can hold.
    pub const fn max_sequence(&self) -> u64 {
        self.sequence_mask()
    }

    /// Packs a `(second, sequence, node)` triple into a single word.
    ///
    /// `second` is an absolute Unix second; values before the epoch wrap in
    /// two's complement. `sequence` is trusted to already be within its
    /// field (the generator maintains that); `node` is masked.
    pub const fn pack(&self, second: u64, sequence: u64, node: u64) -> u64 {
        (second.wrapping_sub(self.epoch) << self.time_shift)
            | (sequence << self.node_bits)
            | (node & self.node_mask())
    }

    /// Extracts the `(second, sequence, node)` triple from a packed word.
    pub const fn unpack(&self, raw: u64) -> (u64, u64, u64) {
        let second = (raw >> self.time_shift) + self.epoch;
        let sequence = (raw >> self.node_bits) & self.sequence_mask();
        let node = raw & self.node_mask();
        (second, sequence, node)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::DEFAULT
    }
}
