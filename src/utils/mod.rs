//! Utils Module - Helper Functions & Shared Utilities
//!
//! Constants, payload decoding and address validation shared across modules.

pub mod address;
pub mod constants;
pub mod decoder;

pub use address::*;
pub use constants::*;
pub use decoder::*;
