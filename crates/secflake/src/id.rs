use crate::{Layout, Result, human, radix};
use chrono::{DateTime, FixedOffset, Utc};
use core::fmt;

/// A decoded seconds-resolution snowflake identifier.
///
/// An identifier is an immutable `(second, sequence, node)` triple together
/// with the [`Layout`] that packs it. It is produced either by a
/// [`SecflakeGenerator`] (a fresh mint) or by decoding one of its external
/// representations: the packed integer, a radix string, or the fixed-width
/// human-readable string.
///
/// Identifiers order by `(second, sequence, node)`, which coincides with the
/// numeric order of [`SecflakeId::to_u64`] for in-range fields under a
/// common layout.
///
/// # Example
///
/// ```
/// use secflake::{Layout, SecflakeId};
///
/// let id = SecflakeId::from_parts(1_515_000_000, 42, 5, Layout::DEFAULT);
/// assert_eq!(id.sequence(), 42);
/// assert_eq!(SecflakeId::from_u64(id.to_u64()), id);
/// assert_eq!(SecflakeId::parse_radix(&id.to_radix_string(36), 36), id);
/// ```
///
/// [`SecflakeGenerator`]: crate::SecflakeGenerator
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SecflakeId {
    second: u64,
    sequence: u64,
    node: u64,
    layout: Layout,
}

impl SecflakeId {
    /// The explicit zero/empty identifier under the default layout.
    pub const fn zero() -> Self {
        Self::zero_with(Layout::DEFAULT)
    }

    /// The explicit zero/empty identifier under a custom layout.
    pub const fn zero_with(layout: Layout) -> Self {
        Self {
            second: 0,
            sequence: 0,
            node: 0,
            layout,
        }
    }

    /// Builds an identifier from raw fields, without masking.
    ///
    /// Fields wider than their layout slots are preserved as given; the
    /// codec truncates `node` at encode time and oversized fields overflow
    /// the fixed-width human format. Generator-minted identifiers are always
    /// in range.
    pub const fn from_parts(second: u64, sequence: u64, node: u64, layout: Layout) -> Self {
        Self {
            second,
            sequence,
            node,
            layout,
        }
    }

    /// Decodes an identifier from its packed unsigned form under the default
    /// layout.
    ///
    /// Note that the packed value `0` decodes to the epoch instant, not to
    /// the zero identifier: the zero identifier is a sentinel that no packed
    /// encoding maps back to.
    pub const fn from_u64(raw: u64) -> Self {
        Self::from_u64_with(raw, Layout::DEFAULT)
    }

    /// Decodes from the packed unsigned form under a custom layout.
    pub const fn from_u64_with(raw: u64, layout: Layout) -> Self {
        let (second, sequence, node) = layout.unpack(raw);
        Self {
            second,
            sequence,
            node,
            layout,
        }
    }

    /// Decodes from the signed view: the same bit pattern, reinterpreted.
    pub const fn from_i64(raw: i64) -> Self {
        Self::from_u64(raw as u64)
    }

    /// Signed-view decode under a custom layout.
    pub const fn from_i64_with(raw: i64, layout: Layout) -> Self {
        Self::from_u64_with(raw as u64, layout)
    }

    /// Parses a radix-encoded identifier under the default layout.
    ///
    /// Bases outside `2..=36` silently fall back to 36. A malformed string
    /// contributes the packed value `0` (so the result decodes to the epoch
    /// instant with zero sequence and node); no error is signaled. Use
    /// [`SecflakeId::try_parse_radix`] to surface malformed input instead.
    pub fn parse_radix(s: &str, radix: u32) -> Self {
        Self::parse_radix_with(s, radix, Layout::DEFAULT)
    }

    /// Radix parse under a custom layout.
    pub fn parse_radix_with(s: &str, radix: u32, layout: Layout) -> Self {
        Self::from_u64_with(radix::parse(s, radix), layout)
    }

    /// Strict counterpart of [`SecflakeId::parse_radix`].
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not a valid integer in the
    /// (clamped) base.
    pub fn try_parse_radix(s: &str, radix: u32) -> Result<Self> {
        radix::try_parse(s, radix).map(Self::from_u64)
    }

    /// Parses the fixed-width human-readable form under the default layout.
    ///
    /// A `zone` of `None` uses the default UTC+8 display zone. Each of the
    /// three fixed-offset segments parses independently; a malformed segment
    /// reads as `0` for its field while well-formed segments are still
    /// populated. Use [`SecflakeId::try_parse_human`] for strict behavior.
    pub fn parse_human(s: &str, zone: Option<FixedOffset>) -> Self {
        Self::parse_human_with(s, zone, Layout::DEFAULT)
    }

    /// Human-readable parse under a custom layout.
    pub fn parse_human_with(s: &str, zone: Option<FixedOffset>, layout: Layout) -> Self {
        let (second, sequence, node) = human::parse(s, zone);
        Self {
            second,
            sequence,
            node,
            layout,
        }
    }

    /// Strict counterpart of [`SecflakeId::parse_human`].
    ///
    /// # Errors
    ///
    /// Returns an error when the input is not exactly 21 characters or any
    /// segment fails to parse.
    pub fn try_parse_human(s: &str, zone: Option<FixedOffset>) -> Result<Self> {
        let (second, sequence, node) = human::try_parse(s, zone)?;
        Ok(Self {
            second,
            sequence,
            node,
            layout: Layout::DEFAULT,
        })
    }

    /// True for the explicit zero/empty identifier.
    pub const fn is_zero(&self) -> bool {
        self.second == 0
    }

    /// The wall-clock instant this identifier was minted, or `None` for the
    /// zero identifier.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        if self.is_zero() {
            return None;
        }
        DateTime::from_timestamp(self.second as i64, 0)
    }

    /// The absolute Unix second of the mint.
    pub const fn second(&self) -> u64 {
        self.second
    }

    /// The per-second sequence counter.
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The minting node's identifier.
    pub const fn node(&self) -> u64 {
        self.node
    }

    /// The bit layout this identifier encodes with.
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Packs into the unsigned numeric form.
    pub const fn to_u64(&self) -> u64 {
        self.layout.pack(self.second, self.sequence, self.node)
    }

    /// The signed view of the same bit pattern.
    pub const fn to_i64(&self) -> i64 {
        self.to_u64() as i64
    }

    /// Renders the packed value in the given base, lowercase; bases outside
    /// `2..=36` fall back to 36.
    pub fn to_radix_string(&self, radix: u32) -> String {
        radix::format(self.to_u64(), radix)
    }

    /// Renders the 21-character human-readable form; a `zone` of `None`
    /// uses the default UTC+8 display zone.
    ///
    /// Sequence values above 99999 or node ids above 99 widen their columns
    /// and no longer round-trip through [`SecflakeId::parse_human`].
    pub fn to_human_string(&self, zone: Option<FixedOffset>) -> String {
        human::format(self.second, self.sequence, self.node, zone)
    }
}

impl Default for SecflakeId {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for SecflakeId {
    /// The default human-readable form, in the default UTC+8 zone.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_human_string(None))
    }
}

impl fmt::Debug for SecflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecflakeId")
            .field("second", &self.second)
            .field("sequence", &self.sequence)
            .field("node", &self.node)
            .field("raw", &self.to_u64())
            .finish()
    }
}
