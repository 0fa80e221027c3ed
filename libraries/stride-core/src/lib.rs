//! Stride Core
//!
//! Storage-agnostic domain types, validation and error handling for the
//! Stride exercise tracker.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Exercise`, `LogQuery`
//! - **Validation**: pure predicates over raw request values
//! - **Formatting**: the long date form used in API responses
//! - **Storage Trait**: `Storage`, implemented by `stride-storage`
//! - **Error Handling**: unified `StrideError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use stride_core::format::format_long_date;
//! use stride_core::validation::{is_positive, parse_date, parse_number};
//!
//! let date = parse_date("2024-01-01").unwrap();
//! assert_eq!(format_long_date(date), "Monday January 1st 2024");
//!
//! assert!(is_positive(parse_number("30")));
//! assert!(!is_positive(parse_number("0")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod storage;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{Result, StrideError, ValidationError};
pub use storage::Storage;

pub use types::{CreateExercise, Exercise, LogQuery, Minutes, User, UserId};
