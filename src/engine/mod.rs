//! Compression engine interface and readiness handling
//!
//! The streaming layer talks to the engine through the
//! [`CompressionEngine`] trait: both the chaining-state slot and the
//! staged input range are addressed as offsets into the arena's flat
//! byte buffer, never as pointers.

use std::sync::OnceLock;

use crate::error::{Error, Result};

mod sha384;
pub use sha384::Sha384Engine;

/// Contract between the streaming layer and a block-compression engine.
pub trait CompressionEngine {
    /// Write a fresh chaining state into the slot region at `slot`.
    fn init(&self, bytes: &mut [u8], slot: usize);

    /// Fold staged bytes in `[start, end)` into the chaining state at
    /// `slot`.
    ///
    /// With `finalize` unset, every complete block in the range is
    /// processed and the count of unconsumed trailing bytes (always
    /// smaller than the block size) is returned. With `finalize` set, the
    /// range is the final tail: padding is applied internally, the digest
    /// is written over the first bytes of the slot as native-order words,
    /// and the return value is meaningless.
    fn process(
        &self,
        bytes: &mut [u8],
        slot: usize,
        start: usize,
        end: usize,
        finalize: bool,
    ) -> Result<usize>;
}

/// Reverse each 8-byte word in place, converting the engine's native
/// word layout into the big-endian digest representation. The reversal
/// is per word, not global.
pub(crate) fn swap_word_bytes(digest: &mut [u8]) {
    for word in digest.chunks_exact_mut(8) {
        word.reverse();
    }
}

static READINESS: OnceLock<core::result::Result<(), &'static str>> = OnceLock::new();

/// One-time readiness check of the built-in engine.
///
/// The first caller runs the self-test; every later caller and every
/// [`on_ready`] registrant observes the same memoized outcome.
pub fn ready() -> Result<()> {
    let outcome = *READINESS.get_or_init(sha384::self_test);
    outcome.map_err(|details| Error::EngineNotReady { details })
}

/// Register interest in engine readiness.
///
/// `f` is invoked exactly once with the shared readiness outcome,
/// running the self-test first if no caller has yet.
pub fn on_ready<F: FnOnce(Result<()>)>(f: F) {
    f(ready())
}
