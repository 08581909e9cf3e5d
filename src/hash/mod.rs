//! Streaming hash constructions over the shared arena

pub mod sha384;

pub use sha384::Sha384;
