/// HTTP middleware
pub mod legacy;

pub use legacy::legacy_responses;
