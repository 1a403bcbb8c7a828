//! # corpus
//!
//! Loads a multi-package, statically typed source corpus through a
//! front-end and answers questions about the resolved program.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project → Loader: traversal, lookup, definition-use graph
//!   ↓
//! hir     → Packages, syntax trees, symbols, resolution tables
//!   ↓
//! base    → Primitives (FileId, TextSize, LineIndex)
//! ```
//!
//! ## Example
//!
//! ```
//! use corpus::{Discovery, InMemoryFrontEnd, LoadConfig, Loader};
//!
//! let front_end = InMemoryFrontEnd::new(Discovery::new());
//! let loader = Loader::new(".", LoadConfig::new(), &front_end).unwrap();
//! assert_eq!(loader.roots().count(), 0);
//! assert!(loader.def_uses().is_empty());
//! ```

/// Foundation types: FileId, text positions
pub mod base;

/// Resolved-program model supplied by the front-end
pub mod hir;

/// Loading, traversal, lookups, definition-use graph
pub mod project;

pub use base::{FileId, LineCol, LineIndex, TextSize};
pub use hir::{
    MemberLookup, OccurrenceId, Package, PackageId, ResolveResult, Symbol, SymbolId, SymbolKind,
};
pub use project::{
    CompilationUnit, DefUseMap, Discovery, DiscoveryRequest, FrontEnd, InMemoryFrontEnd,
    LoadConfig, LoadError, Loader, LookupError,
};
