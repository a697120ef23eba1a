//! Error types for the Scriptsmith workspace.
//!
//! This crate provides the foundation error types used by every Scriptsmith crate.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind (or a message) with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use scriptsmith_error::{HttpError, ScriptsmithResult};
//!
//! fn fetch_data() -> ScriptsmithResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod builder;
mod config;
mod error;
mod generation;
mod http;
mod json;
mod validation;

pub use backend::BackendError;
pub use builder::BuilderError;
pub use config::ConfigError;
pub use error::{ScriptsmithError, ScriptsmithErrorKind, ScriptsmithResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use validation::{ValidationError, ValidationErrorKind};
