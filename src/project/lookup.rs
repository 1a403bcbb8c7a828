//! Symbol lookup against the loaded corpus.
//!
//! - Qualified names: `error`, `string` (universe) or
//!   `encoding/json.Marshal` (package path, last `.`, identifier).
//! - Bare names: a package's own scope first, then its direct imports.
//! - Members: a field or method of a declared type.
//!
//! Absence is a normal result. The `must_*` variants turn it into a
//! [`LookupError`] for callers that treat absence as a bug.

use crate::hir::{MemberLookup, Package, ResolveResult, SymbolId, TypeId};

use super::error::LookupError;
use super::loader::Loader;

impl Loader {
    /// The indexed package with import path `path`.
    pub fn lookup_package(&self, path: &str) -> Option<&Package> {
        let &id = self.all.get(path)?;
        self.package(id)
    }

    /// Resolve a builtin or `package/path.Ident` name.
    pub fn lookup(&self, qualified: &str) -> Option<SymbolId> {
        match qualified.rfind('.') {
            None => self.universe().lookup(qualified),
            Some(idx) => {
                let (path, ident) = (&qualified[..idx], &qualified[idx + 1..]);
                self.lookup_package(path)?.scope.lookup(ident)
            }
        }
    }

    pub fn must_lookup(&self, qualified: &str) -> Result<SymbolId, LookupError> {
        self.lookup(qualified)
            .ok_or_else(|| LookupError::ObjectNotFound(qualified.to_string()))
    }

    /// The declared type of a qualified name.
    pub fn must_lookup_type(&self, qualified: &str) -> Result<TypeId, LookupError> {
        self.lookup(qualified)
            .and_then(|id| self.symbol(id))
            .and_then(|symbol| symbol.ty)
            .ok_or_else(|| LookupError::TypeNotFound(qualified.to_string()))
    }

    /// Resolve `name` in `package`'s own scope, falling back to the scopes
    /// of its direct imports. Several import matches are returned as
    /// [`ResolveResult::Ambiguous`].
    pub fn lookups(&self, package: &Package, name: &str) -> ResolveResult {
        if let Some(id) = package.scope.lookup(name) {
            return ResolveResult::Found(id);
        }
        let candidates = package
            .imports
            .values()
            .filter_map(|&import| self.package(import))
            .filter_map(|import| import.scope.lookup(name))
            .collect();
        ResolveResult::from_candidates(candidates)
    }

    /// Find field or method `member` of type `ty` declared in package `path`.
    ///
    /// Direct access is tried first; a pointer-receiver method that needs
    /// an addressable receiver is found by retrying with addressability.
    /// Collisions among promoted members come back as
    /// [`MemberLookup::Ambiguous`]. A missing package or type is
    /// [`MemberLookup::NotFound`].
    pub fn lookup_field_or_method(&self, path: &str, ty: &str, member: &str) -> MemberLookup {
        self.resolve_member(path, ty, member)
            .unwrap_or(MemberLookup::NotFound)
    }

    /// Like [`Loader::lookup_field_or_method`], but every outcome other than
    /// a single member is an error.
    pub fn must_lookup_field_or_method(
        &self,
        path: &str,
        ty: &str,
        member: &str,
    ) -> Result<SymbolId, LookupError> {
        let qualified = format!("{path}.{ty}");
        match self.resolve_member(path, ty, member)? {
            MemberLookup::Found { symbol, .. } => Ok(symbol),
            MemberLookup::Ambiguous { .. } => Err(LookupError::AmbiguousMember {
                ty: qualified,
                member: member.to_string(),
            }),
            MemberLookup::NotAddressable | MemberLookup::NotFound => {
                Err(LookupError::MemberNotFound {
                    ty: qualified,
                    member: member.to_string(),
                })
            }
        }
    }

    fn resolve_member(
        &self,
        path: &str,
        ty: &str,
        member: &str,
    ) -> Result<MemberLookup, LookupError> {
        if self.lookup_package(path).is_none() {
            return Err(LookupError::PackageNotFound(path.to_string()));
        }
        let ty = self.must_lookup_type(&format!("{path}.{ty}"))?;

        let symbols = self.symbols();
        let found = symbols.lookup_field_or_method(ty, false, path, member);
        if found == MemberLookup::NotAddressable {
            return Ok(symbols.lookup_field_or_method(ty, true, path, member));
        }
        Ok(found)
    }
}
