//! # Coerce Module
//!
//! Converts raw request strings (path variables, query/form parameters,
//! header values) into typed scalar values for argument binding.
//!
//! ## Supported Targets
//!
//! | Declared type | Rust value | Accepted input |
//! |---------------|------------|----------------|
//! | `int`         | `i32`      | decimal integer |
//! | `long`        | `i64`      | decimal integer |
//! | `float`       | `f32`      | decimal / exponent notation |
//! | `double`      | `f64`      | decimal / exponent notation |
//! | `boolean`     | `bool`     | `true` / `false` (any case) |
//! | `string`      | `String`   | anything (identity) |
//!
//! Parse failures always surface as
//! [`DispatchError::CoercionFailed`](crate::error::DispatchError::CoercionFailed)
//! carrying the raw input; a value is never silently replaced by `0` or
//! `false`. Context types and application types cannot be produced from a
//! string and fail with
//! [`DispatchError::UnsupportedCoercionType`](crate::error::DispatchError::UnsupportedCoercionType).

mod core;

pub use self::core::{coerce, DeclaredType, Scalar};
