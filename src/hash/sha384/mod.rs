//! Incremental SHA-384 over the process-wide arena
//!
//! Every live [`Sha384`] owns one chaining-state slot; input bytes are
//! staged in the arena's shared scratch window and folded by the
//! compression engine inside a single critical section per call, so the
//! window never outlives the call that filled it. Bytes that do not
//! complete a block are carried in the instance's own leftover buffer
//! and re-staged ahead of the next input.

use std::sync::{Mutex, MutexGuard, OnceLock};

use zeroize::Zeroize;

use crate::arena::Arena;
use crate::engine::{self, CompressionEngine, Sha384Engine};
use crate::error::{validate, Error, Result};
use crate::params::SHA384_OUTPUT_SIZE;
use crate::pool::{Slot, SlotPool};
use crate::types::{Digest, InputEncoding};

/// Arena, slot pool, and engine shared by all instances.
struct Context {
    arena: Arena,
    pool: SlotPool,
    engine: Sha384Engine,
}

impl Context {
    fn new() -> Self {
        Context {
            arena: Arena::new(),
            pool: SlotPool::new(),
            engine: Sha384Engine,
        }
    }
}

static CONTEXT: OnceLock<Mutex<Context>> = OnceLock::new();

/// Lock the shared context for the duration of one `update` or `digest`
/// call. Staging writes, arena growth, and the engine invocation all
/// happen under this one lock. Leftovers are copied out before the lock
/// drops, so a poisoned guard still holds a consistent arena.
fn context() -> MutexGuard<'static, Context> {
    CONTEXT
        .get_or_init(|| Mutex::new(Context::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Incremental SHA-384 hasher backed by the shared arena.
///
/// An instance is Active from construction until the single `digest`
/// call that finalizes it; any later `update` or `digest` fails with
/// [`Error::AlreadyFinalized`]. Dropping an unfinalized instance returns
/// its slot to the pool.
///
/// ```
/// use arenahash::Sha384;
///
/// # fn main() -> arenahash::Result<()> {
/// let mut hasher = Sha384::new()?;
/// hasher.update(b"hello ")?.update(b"world")?;
/// let digest = hasher.digest()?;
/// assert_eq!(digest.len(), 48);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Sha384 {
    /// `None` once finalized; the slot is back in the pool.
    slot: Option<Slot>,
    /// Bytes from the last call that did not complete a block;
    /// always shorter than the block size.
    leftover: Vec<u8>,
}

impl Sha384 {
    /// Create a new hash instance over a freshly initialized slot.
    ///
    /// Fails with [`Error::EngineNotReady`] if the engine's one-time
    /// self-test failed, or [`Error::OutOfMemory`] if the arena cannot
    /// grow to hold the slot.
    pub fn new() -> Result<Self> {
        engine::ready()?;

        let mut guard = context();
        let ctx = &mut *guard;

        let slot = ctx.pool.acquire(&mut ctx.arena)?;
        ctx.engine.init(ctx.arena.bytes_mut(), slot.offset());

        Ok(Sha384 {
            slot: Some(slot),
            leftover: Vec::new(),
        })
    }

    /// Engine readiness; see [`engine::ready`].
    pub fn ready() -> Result<()> {
        engine::ready()
    }

    /// Convenience: hash `data` in a single call.
    pub fn hash(data: &[u8]) -> Result<Digest<SHA384_OUTPUT_SIZE>> {
        let mut hasher = Sha384::new()?;
        hasher.update(data)?;
        hasher.digest()
    }

    /// Absorb `data`, returning `self` for chaining.
    pub fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        let slot = self.active_slot("Sha384::update")?;

        let mut guard = context();
        let ctx = &mut *guard;

        let base = ctx.arena.staging_base();
        let carried = self.leftover.len();
        let staged = carried + data.len();

        ctx.arena.ensure_capacity(base + staged)?;
        ctx.arena.write(base, &self.leftover);
        ctx.arena.write(base + carried, data);

        let trailing = ctx
            .engine
            .process(ctx.arena.bytes_mut(), slot, base, base + staged, false)?;

        // the staging window is rewritten by the next call on any
        // instance, so the unconsumed tail is copied out, not referenced
        self.leftover.zeroize();
        self.leftover.clear();
        self.leftover
            .extend_from_slice(&ctx.arena.bytes()[base + staged - trailing..base + staged]);

        Ok(self)
    }

    /// Absorb `text` decoded under `encoding`; see [`InputEncoding`].
    pub fn update_text(&mut self, text: &str, encoding: InputEncoding) -> Result<&mut Self> {
        let bytes = encoding.decode(text)?;
        self.update(&bytes)
    }

    /// Finalize and return the raw 48-byte digest.
    ///
    /// The instance transitions to Finalized and its slot returns to the
    /// pool; any further call fails with [`Error::AlreadyFinalized`].
    pub fn digest(&mut self) -> Result<Digest<SHA384_OUTPUT_SIZE>> {
        self.finalize_raw().map(Digest::new)
    }

    /// Finalize and render the digest as lowercase hexadecimal.
    pub fn digest_hex(&mut self) -> Result<String> {
        self.finalize_raw().map(hex::encode)
    }

    /// Finalize and write the digest into `buf` at `offset`.
    ///
    /// The capacity check runs before the Finalized transition, so a
    /// [`Error::BufferTooSmall`] failure leaves the instance Active and
    /// the call can be corrected and retried.
    pub fn digest_into(&mut self, buf: &mut [u8], offset: usize) -> Result<()> {
        validate::buffer(
            "Sha384::digest_into",
            buf.len().saturating_sub(offset),
            SHA384_OUTPUT_SIZE,
        )?;

        let raw = self.finalize_raw()?;
        buf[offset..offset + SHA384_OUTPUT_SIZE].copy_from_slice(&raw);
        Ok(())
    }

    /// Whether `digest` has already been taken.
    pub fn is_finalized(&self) -> bool {
        self.slot.is_none()
    }

    fn active_slot(&self, context: &'static str) -> Result<usize> {
        match &self.slot {
            Some(slot) => Ok(slot.offset()),
            None => Err(Error::AlreadyFinalized { context }),
        }
    }

    fn finalize_raw(&mut self) -> Result<[u8; SHA384_OUTPUT_SIZE]> {
        let offset = self.active_slot("Sha384::digest")?;

        let mut guard = context();
        let ctx = &mut *guard;

        let base = ctx.arena.staging_base();
        let tail = self.leftover.len();
        // grow before the Finalized transition; a failure leaves the
        // instance Active
        ctx.arena.ensure_capacity(base + tail)?;

        let slot = match self.slot.take() {
            Some(slot) => slot,
            None => return Err(Error::AlreadyFinalized { context: "Sha384::digest" }),
        };

        ctx.arena.write(base, &self.leftover);
        ctx.engine
            .process(ctx.arena.bytes_mut(), offset, base, base + tail, true)?;

        let mut digest = [0u8; SHA384_OUTPUT_SIZE];
        digest.copy_from_slice(&ctx.arena.bytes()[offset..offset + SHA384_OUTPUT_SIZE]);
        engine::swap_word_bytes(&mut digest);

        // release strictly after the digest bytes are read out
        ctx.pool.release(slot);
        self.leftover.zeroize();
        self.leftover.clear();

        Ok(digest)
    }
}

impl Drop for Sha384 {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            context().pool.release(slot);
        }
        self.leftover.zeroize();
    }
}
