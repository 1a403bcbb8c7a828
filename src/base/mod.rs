//! Foundation types for the corpus loader.
//!
//! - [`FileId`] - Handles for compilation-unit files
//! - [`TextSize`] - Byte positions inside a file
//! - [`LineCol`], [`LineIndex`] - Line/column conversion for display
//!
//! This module has NO dependencies on other crate modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex, TextSize};
