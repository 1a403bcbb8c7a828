//! Corpus loading and the queries over a loaded corpus.
//!
//! ## Module Structure
//!
//! ```text
//! visit, lookup, defuse → read-only queries over a Loader
//!   ↓
//! loader                → one-shot load, package index, generated cache
//!   ↓
//! config, frontend      → load options, discovery collaborator
//!   ↓
//! unit, generated       → compilation-unit view, marker detection
//! ```

mod config;
mod defuse;
mod error;
mod frontend;
mod generated;
mod loader;
mod lookup;
mod unit;
mod visit;

pub use config::{FileFilter, LoadConfig, PATTERN_ALL, PATTERN_STD, PackageFilter, TEST_MAIN_GENERATOR};
pub use defuse::DefUseMap;
pub use error::{LoadError, LookupError};
pub use frontend::{Discovery, DiscoveryError, DiscoveryRequest, FrontEnd, InMemoryFrontEnd};
pub use generated::{generator, is_generated};
pub use loader::{Loader, PackagePath};
pub use unit::CompilationUnit;
pub use visit::{PostVisit, PreVisit};
