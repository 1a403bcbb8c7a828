//! Member resolution: finding a field or method of a type, directly or
//! promoted through embedded fields.
//!
//! # Algorithm
//!
//! The search is breadth-first over embedding depth:
//!
//! 1. Start with the (dereferenced) receiver type at depth 0.
//! 2. At each depth, look at every candidate type: methods declared on a
//!    named type, then fields of an underlying struct, then methods of an
//!    underlying interface. Embedded struct fields that did not match are
//!    queued for the next depth.
//! 3. The first depth with a match wins. Two matches at that depth, or a
//!    match reached through a type embedded more than once at that depth,
//!    is a collision and is reported as [`MemberLookup::Ambiguous`].
//!
//! Named types are visited at most once, so recursive embedding terminates.

use rustc_hash::FxHashSet;

use super::ids::{SymbolId, TypeId};
use super::symbols::{SymbolKind, SymbolTable, TypeData};

// ============================================================================
// RESULTS
// ============================================================================

/// Result of resolving a name that may have several candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    Found(SymbolId),
    /// Several equally ranked candidates; the caller decides.
    Ambiguous(Vec<SymbolId>),
    NotFound,
}

impl ResolveResult {
    pub(crate) fn from_candidates(mut candidates: Vec<SymbolId>) -> Self {
        match candidates.len() {
            0 => ResolveResult::NotFound,
            1 => ResolveResult::Found(candidates.remove(0)),
            _ => ResolveResult::Ambiguous(candidates),
        }
    }

    /// The single resolved symbol, if unambiguous.
    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            ResolveResult::Found(id) => Some(*id),
            _ => None,
        }
    }

    /// Every candidate, in lookup order.
    pub fn candidates(&self) -> &[SymbolId] {
        match self {
            ResolveResult::Found(id) => std::slice::from_ref(id),
            ResolveResult::Ambiguous(ids) => ids,
            ResolveResult::NotFound => &[],
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ResolveResult::Found(_))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ResolveResult::Ambiguous(_))
    }
}

/// Result of a field-or-method lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberLookup {
    Found {
        symbol: SymbolId,
        /// Field/method indices along the embedding path; the last entry
        /// indexes the member in its declaring type.
        index: Vec<usize>,
        /// Whether a pointer was dereferenced on the way.
        indirect: bool,
    },
    /// Colliding candidates at the shallowest depth.
    Ambiguous { index: Vec<usize> },
    /// A method with a pointer receiver exists, but the receiver is neither
    /// a pointer nor addressable. Retrying with `addressable` finds it.
    NotAddressable,
    NotFound,
}

impl MemberLookup {
    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            MemberLookup::Found { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }
}

// ============================================================================
// FIELD OR METHOD LOOKUP
// ============================================================================

#[derive(Clone, Debug)]
struct Embedded {
    ty: TypeId,
    index: Vec<usize>,
    indirect: bool,
    /// Reached through more than one path at this depth.
    multiples: bool,
}

/// A match at the current depth: member, index path, indirection.
type Hit = (SymbolId, Vec<usize>, bool);

impl SymbolTable {
    /// Look up a field or method `name` of `ty`, as seen from package `pkg`.
    ///
    /// `addressable` states that `ty` is the type of an addressable value,
    /// which makes pointer-receiver methods reachable from a non-pointer.
    pub fn lookup_field_or_method(
        &self,
        ty: TypeId,
        addressable: bool,
        pkg: &str,
        name: &str,
    ) -> MemberLookup {
        // A named type whose underlying type is a pointer has no methods.
        if let Some(TypeData::Named { .. }) = self.ty(ty) {
            if let Some(under) = self.underlying(ty) {
                if let Some(TypeData::Pointer { .. }) = self.ty(under) {
                    let found = self.lookup_impl(under, false, pkg, name);
                    if let MemberLookup::Found { symbol, .. } = &found {
                        if self.is_method(*symbol) {
                            return MemberLookup::NotFound;
                        }
                    }
                    return found;
                }
            }
        }
        self.lookup_impl(ty, addressable, pkg, name)
    }

    fn lookup_impl(&self, ty: TypeId, addressable: bool, pkg: &str, name: &str) -> MemberLookup {
        let (start, is_ptr) = self.deref(ty);
        // Pointers to interfaces have no methods.
        if is_ptr && self.is_interface(start) {
            return MemberLookup::NotFound;
        }

        let mut current = vec![Embedded {
            ty: start,
            index: Vec::new(),
            indirect: is_ptr,
            multiples: false,
        }];
        let mut seen: FxHashSet<TypeId> = FxHashSet::default();

        while !current.is_empty() {
            let mut next = Vec::new();
            let mut hit: Option<Hit> = None;

            for e in &current {
                if let Some(TypeData::Named { methods, .. }) = self.ty(e.ty) {
                    if !seen.insert(e.ty) {
                        continue;
                    }
                    if let Some(i) = self.find_member(methods, pkg, name) {
                        if let Err(collision) = record(&mut hit, e, i, methods[i]) {
                            return collision;
                        }
                        continue;
                    }
                }

                match self.underlying(e.ty).and_then(|u| self.ty(u)) {
                    Some(TypeData::Struct { fields }) => {
                        for (i, field) in fields.iter().enumerate() {
                            let Some(symbol) = self.symbol(field.symbol) else {
                                continue;
                            };
                            if symbol.same_id(pkg, name) {
                                if let Err(collision) = record(&mut hit, e, i, field.symbol) {
                                    return collision;
                                }
                                continue;
                            }
                            if hit.is_none() && field.embedded {
                                if let Some(field_ty) = symbol.ty {
                                    let (ty, is_ptr) = self.deref(field_ty);
                                    let mut index = e.index.clone();
                                    index.push(i);
                                    next.push(Embedded {
                                        ty,
                                        index,
                                        indirect: e.indirect || is_ptr,
                                        multiples: e.multiples,
                                    });
                                }
                            }
                        }
                    }
                    Some(TypeData::Interface { methods }) => {
                        if let Some(i) = self.find_member(methods, pkg, name) {
                            if let Err(collision) = record(&mut hit, e, i, methods[i]) {
                                return collision;
                            }
                        }
                    }
                    _ => {}
                }
            }

            if let Some((symbol, index, indirect)) = hit {
                if self.has_pointer_receiver(symbol) && !indirect && !addressable {
                    return MemberLookup::NotAddressable;
                }
                return MemberLookup::Found {
                    symbol,
                    index,
                    indirect,
                };
            }

            current = consolidate_multiples(next);
        }

        MemberLookup::NotFound
    }

    fn find_member(&self, members: &[SymbolId], pkg: &str, name: &str) -> Option<usize> {
        members.iter().position(|&m| {
            self.symbol(m)
                .is_some_and(|symbol| symbol.same_id(pkg, name))
        })
    }

    /// Strip one level of pointer.
    fn deref(&self, ty: TypeId) -> (TypeId, bool) {
        match self.ty(ty) {
            Some(TypeData::Pointer { elem }) => (*elem, true),
            _ => (ty, false),
        }
    }

    fn is_interface(&self, ty: TypeId) -> bool {
        matches!(
            self.underlying(ty).and_then(|u| self.ty(u)),
            Some(TypeData::Interface { .. })
        )
    }

    fn is_method(&self, symbol: SymbolId) -> bool {
        self.symbol(symbol).is_some_and(|s| s.kind.is_method())
    }

    fn has_pointer_receiver(&self, symbol: SymbolId) -> bool {
        matches!(
            self.symbol(symbol).map(|s| s.kind),
            Some(SymbolKind::Method {
                pointer_receiver: true
            })
        )
    }
}

/// Record a match at the current depth, or report the collision.
fn record(
    hit: &mut Option<Hit>,
    e: &Embedded,
    i: usize,
    symbol: SymbolId,
) -> Result<(), MemberLookup> {
    let mut index = e.index.clone();
    index.push(i);
    if hit.is_some() || e.multiples {
        return Err(MemberLookup::Ambiguous { index });
    }
    *hit = Some((symbol, index, e.indirect));
    Ok(())
}

/// Merge entries for the same type; a type reached twice is marked
/// `multiples` so that any match through it collides.
fn consolidate_multiples(list: Vec<Embedded>) -> Vec<Embedded> {
    let mut out: Vec<Embedded> = Vec::with_capacity(list.len());
    for e in list {
        match out.iter_mut().find(|o| o.ty == e.ty) {
            Some(existing) => existing.multiples = true,
            None => out.push(e),
        }
    }
    out
}
