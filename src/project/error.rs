//! Error types for loading and lookups.

use std::path::PathBuf;

use smol_str::SmolStr;
use thiserror::Error;

use super::frontend::DiscoveryError;

/// Fatal load failures. A loader is never constructed when one occurs.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The root directory could not be made absolute.
    #[error("invalid root directory {}: {source}", .path.display())]
    RootDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The front-end could not produce a package set.
    #[error("package discovery failed: {0}")]
    Discovery(#[source] DiscoveryError),

    /// An import edge points outside the discovered package arena.
    #[error("package {package} imports {import} through unknown package index {index}")]
    DanglingImport {
        package: SmolStr,
        import: SmolStr,
        index: u32,
    },

    /// A root points outside the discovered package arena.
    #[error("unknown root package index {0}")]
    UnknownRoot(u32),
}

/// Failure of a `must_*` lookup.
///
/// These signal a programming error in the calling tool (it asked for
/// something it assumed exists), not a recoverable condition; callers are
/// expected to abort with it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("type not found: {0}")]
    TypeNotFound(String),

    #[error("package not found: {0}")]
    PackageNotFound(String),

    #[error("{member} not found in {ty}")]
    MemberNotFound { ty: String, member: String },

    #[error("ambiguous selector {member} in {ty}")]
    AmbiguousMember { ty: String, member: String },
}
