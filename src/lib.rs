//! Incremental SHA-384 hashing over a shared memory arena
//!
//! All live hasher instances share one growable byte arena: each owns a
//! fixed-size slot holding its chaining state, while input bytes are
//! staged in a common scratch window above the slot region and folded by
//! the compression engine without per-call allocation. Slots are pooled
//! and recycled as instances finalize.
//!
//! # Example
//!
//! ```
//! use arenahash::Sha384;
//!
//! # fn main() -> arenahash::Result<()> {
//! let mut hasher = Sha384::new()?;
//! hasher.update(b"the quick brown fox")?;
//! let hex = hasher.digest_hex()?;
//! assert_eq!(hex.len(), 96);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Fixed algorithm and layout constants
pub mod params;

// Shared arena and slot pooling
pub mod arena;
pub use arena::Arena;

pub mod pool;
pub use pool::{Slot, SlotPool};

// Compression engine seam
pub mod engine;
pub use engine::{CompressionEngine, Sha384Engine};

// Streaming hash construction
pub mod hash;
pub use hash::Sha384;

// Type system
pub mod types;
pub use types::{Digest, InputEncoding};
