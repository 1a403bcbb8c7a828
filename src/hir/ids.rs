//! Identity handles for the resolved program.
//!
//! The type checker assigns every declared entity an opaque identity; here
//! that identity is a [`SymbolId`], an index into the corpus-wide
//! [`SymbolTable`](super::SymbolTable). Equality of handles, never of names
//! or text, is what the graph builders compare.

use std::fmt;

use crate::base::FileId;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn index(self) -> u32 {
                self.0
            }

            #[inline]
            pub(crate) const fn slot(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

arena_id! {
    /// Checker-assigned identity of one declared entity.
    SymbolId
}

arena_id! {
    /// Handle for a type in the [`SymbolTable`](super::SymbolTable).
    TypeId
}

arena_id! {
    /// Position of a package in the discovered package arena.
    PackageId
}

/// One identifier token's appearance in a syntax tree.
///
/// Combines the file the token lives in with the token's index in that
/// file's [`SyntaxTree::idents`](super::SyntaxTree::idents). Whether the
/// occurrence defines or uses a symbol is recorded by the package's
/// [`TypesInfo`](super::TypesInfo), not here.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct OccurrenceId {
    pub file: FileId,
    pub local: u32,
}

impl OccurrenceId {
    #[inline]
    pub const fn new(file: FileId, local: u32) -> Self {
        Self { file, local }
    }
}

impl fmt::Debug for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Occurrence({:?}:{})", self.file, self.local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrence_equality() {
        let a = OccurrenceId::new(FileId::new(1), 0);
        let b = OccurrenceId::new(FileId::new(1), 0);
        let c = OccurrenceId::new(FileId::new(1), 1);
        let d = OccurrenceId::new(FileId::new(2), 0);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_id_sizes() {
        assert_eq!(std::mem::size_of::<SymbolId>(), 4);
        assert_eq!(std::mem::size_of::<OccurrenceId>(), 8);
    }

    #[test]
    fn test_id_debug() {
        assert_eq!(format!("{:?}", SymbolId::new(3)), "SymbolId(3)");
        assert_eq!(format!("{:?}", PackageId::new(0)), "PackageId(0)");
    }
}
