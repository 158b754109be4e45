//! Data models for the conversion client
//!
//! Wire DTOs for the remote services and the value types returned to callers.

pub mod conversion;
pub mod responses;

// Re-export commonly used types
pub use conversion::{Conversion, RateSource};
pub use responses::{CurrencyDirectoryResponse, PairResponse};
