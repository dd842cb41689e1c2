//! Error types for validation failures.
//!
//! This module provides [`ValidationError`], the single kind of reported
//! failure (a message, the offending value, the expected descriptor and the
//! path), and [`ValidationErrors`], a non-empty collection of them.

mod validation_error;

pub use validation_error::{ValidationError, ValidationErrors};
