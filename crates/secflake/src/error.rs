use thiserror::Error;

/// A result type for the few fallible operations in this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `secflake` can emit.
///
/// The default surface is total: `generate()` and the default parse/decode
/// paths never fail, returning zero-valued fields for malformed input
/// instead. Errors only arise from [`Layout`] validation and from the strict
/// `try_parse_*` alternatives.
///
/// [`Layout`]: crate::Layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested time shift leaves no room for the low-order fields or
    /// for the seconds field.
    #[error("time shift must be in 1..=32 bits, got {0}")]
    TimeShiftOutOfRange(u32),

    /// The node field cannot be wider than the combined low-order field.
    #[error("node width of {node_bits} bits exceeds the time shift of {time_shift} bits")]
    NodeBitsTooWide { node_bits: u32, time_shift: u32 },

    /// Strict radix parsing rejected the input.
    #[error("{input:?} is not a valid base-{radix} integer")]
    MalformedRadix { input: String, radix: u32 },

    /// Strict human-readable parsing rejected one of the fixed-width
    /// segments.
    #[error("malformed {segment} segment in {input:?}")]
    MalformedHuman {
        input: String,
        segment: &'static str,
    },

    /// Strict human-readable parsing rejected the overall width.
    #[error("human-readable ids are exactly {expected} characters, got {got}")]
    HumanWidth { expected: usize, got: usize },
}
