//! Data models

pub mod transaction;
pub mod record;
pub mod prediction;

pub use transaction::*;
pub use record::*;
pub use prediction::*;
