//! Models Module - Data Structures & Configuration
//!
//! Single source of truth for every data type and configuration struct.

pub mod config;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
