//! Seconds-resolution snowflake identifiers.
//!
//! `secflake` mints compact, time-ordered, collision-resistant identifiers
//! for distributed services that need globally-unique, roughly-sortable keys
//! without a central coordinator. Each identifier packs a wall-clock second,
//! a per-second sequence counter, and a node id into one unsigned 64-bit
//! word; the default [`Layout`] stays within 53 bits, so values survive
//! transport through IEEE-754 doubles (JSON, JavaScript).
//!
//! The generator never blocks and never fails:
//!
//! - exhausting a second's sequence space **borrows** the next second
//!   arithmetically instead of sleeping until the clock catches up;
//! - a backward-stepping clock is clamped to the last issued second;
//! - malformed input to the default parsers decodes to a zero-valued
//!   identifier rather than an error (strict `try_parse_*` variants are
//!   available).
//!
//! Node ids must be unique across generators whose output is compared; that
//! is an operational responsibility, not something this crate coordinates.
//!
//! # Example
//!
//! ```
//! use secflake::{SecflakeGenerator, SecflakeId, SystemClock};
//!
//! let generator = SecflakeGenerator::new(5, SystemClock);
//! let id = generator.generate();
//! assert_eq!(id.node(), 5);
//!
//! // Numeric, radix-string, and human-readable views all round-trip.
//! assert_eq!(SecflakeId::from_u64(id.to_u64()), id);
//! assert_eq!(SecflakeId::parse_radix(&id.to_radix_string(36), 36), id);
//! assert_eq!(SecflakeId::parse_human(&id.to_human_string(None), None), id);
//! ```

mod error;
mod generator;
mod human;
mod id;
mod layout;
mod radix;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::human::*;
pub use crate::id::*;
pub use crate::layout::*;
pub use crate::time::*;
