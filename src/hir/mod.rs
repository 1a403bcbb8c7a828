//! Resolved-program model handed over by the front-end.
//!
//! ## Module Structure
//!
//! ```text
//! input       → syntax trees, packages, per-identifier resolution tables
//!   ↓
//! resolve     → field/method lookup through embedding
//!   ↓
//! symbols     → symbol + type arena, scopes
//!   ↓
//! ids, source → identity handles, file set
//! ```

mod diagnostics;
mod ids;
mod input;
mod resolve;
mod source;
mod symbols;

pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use ids::{OccurrenceId, PackageId, SymbolId, TypeId};
pub use input::{
    Comment, CommentGroup, Ident, ImportSpec, Package, PackageFile, SyntaxTree, TypesInfo,
};
pub use resolve::{MemberLookup, ResolveResult};
pub use source::FileSet;
pub use symbols::{Field, Scope, Symbol, SymbolKind, SymbolTable, TypeData, is_exported};
