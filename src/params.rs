//! Fixed constants for the SHA-384 arena layout

/// Output size of SHA-384 in bytes
pub const SHA384_OUTPUT_SIZE: usize = 48;

/// Internal block size of the SHA-512 family in bytes
pub const SHA512_BLOCK_SIZE: usize = 128;

/// Size in bytes of one chaining-state slot within the arena.
///
/// A slot holds the eight 64-bit state words, the 128-bit processed-byte
/// counter, and scratch headroom for the compression engine.
pub const SLOT_SIZE: usize = 512;

/// Alignment quantum for staging writes; the engine reads the staging
/// region as 64-bit words.
pub const WORD_ALIGN: usize = 8;

/// Byte offset of the chaining state within a slot
pub const STATE_OFFSET: usize = 0;

/// Size in bytes of the chaining state (eight 64-bit words)
pub const STATE_SIZE: usize = 64;

/// Byte offset of the 128-bit processed-byte counter within a slot
pub const COUNTER_OFFSET: usize = STATE_OFFSET + STATE_SIZE;

/// Size in bytes of the processed-byte counter
pub const COUNTER_SIZE: usize = 16;
