//! The type checker's symbol and type arena.
//!
//! Every declared entity across the corpus (functions, variables, types,
//! struct fields, methods, builtins) is a [`Symbol`] stored once in the
//! [`SymbolTable`] and referred to by [`SymbolId`]. Types are stored the
//! same way and referred to by [`TypeId`]. Scopes map names to symbol ids.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::ids::{SymbolId, TypeId};

// ============================================================================
// SYMBOLS
// ============================================================================

/// What kind of entity a symbol declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A builtin function (`len`, `append`, ...).
    Builtin,
    Const,
    Var,
    /// A struct field.
    Field,
    Func,
    Method {
        /// Whether the receiver is a pointer (`func (t *T) M()`).
        pointer_receiver: bool,
    },
    TypeName,
    /// An imported package name inside a file.
    PkgName,
    Label,
    Nil,
}

impl SymbolKind {
    pub fn is_method(&self) -> bool {
        matches!(self, SymbolKind::Method { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// Path of the declaring package; `None` for universe symbols.
    pub package: Option<SmolStr>,
    pub ty: Option<TypeId>,
}

impl Symbol {
    pub fn new(name: &str, kind: SymbolKind, package: Option<&str>) -> Self {
        Self {
            name: SmolStr::new(name),
            kind,
            package: package.map(SmolStr::new),
            ty: None,
        }
    }

    pub fn exported(&self) -> bool {
        is_exported(&self.name)
    }

    /// Whether this symbol is named `name` as seen from package `pkg`.
    ///
    /// Exported names match by spelling alone; unexported names also
    /// require the same declaring package.
    pub fn same_id(&self, pkg: &str, name: &str) -> bool {
        if self.name.as_str() != name {
            return false;
        }
        if is_exported(name) {
            return true;
        }
        self.package.as_deref() == Some(pkg)
    }
}

/// An identifier is exported if it starts with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

// ============================================================================
// TYPES
// ============================================================================

/// A struct field: the field's symbol (whose `ty` is the field type) and
/// whether it is embedded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub symbol: SymbolId,
    pub embedded: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeData {
    Basic {
        name: SmolStr,
    },
    /// A declared type.
    Named {
        symbol: SymbolId,
        underlying: Option<TypeId>,
        methods: Vec<SymbolId>,
    },
    Pointer {
        elem: TypeId,
    },
    Struct {
        fields: Vec<Field>,
    },
    /// An interface with its complete (flattened) method set.
    Interface {
        methods: Vec<SymbolId>,
    },
}

// ============================================================================
// SYMBOL TABLE
// ============================================================================

/// Arena of all symbols and types of one loaded corpus.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    types: Vec<TypeData>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_symbol(&mut self, symbol: Symbol) -> SymbolId {
        self.symbols.push(symbol);
        SymbolId::new((self.symbols.len() - 1) as u32)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.slot())
    }

    pub fn set_symbol_type(&mut self, id: SymbolId, ty: TypeId) {
        if let Some(symbol) = self.symbols.get_mut(id.slot()) {
            symbol.ty = Some(ty);
        }
    }

    pub fn add_type(&mut self, ty: TypeData) -> TypeId {
        self.types.push(ty);
        TypeId::new((self.types.len() - 1) as u32)
    }

    pub fn ty(&self, id: TypeId) -> Option<&TypeData> {
        self.types.get(id.slot())
    }

    /// Declare a named type for `symbol` and make it the symbol's type.
    ///
    /// The underlying type and methods are attached afterwards, so that
    /// self-referential declarations can be built.
    pub fn declare_named(&mut self, symbol: SymbolId) -> TypeId {
        let ty = self.add_type(TypeData::Named {
            symbol,
            underlying: None,
            methods: Vec::new(),
        });
        self.set_symbol_type(symbol, ty);
        ty
    }

    pub fn set_underlying(&mut self, named: TypeId, ty: TypeId) {
        if let Some(TypeData::Named { underlying, .. }) = self.types.get_mut(named.slot()) {
            *underlying = Some(ty);
        }
    }

    pub fn add_method(&mut self, named: TypeId, method: SymbolId) {
        if let Some(TypeData::Named { methods, .. }) = self.types.get_mut(named.slot()) {
            methods.push(method);
        }
    }

    /// The underlying type: `ty` itself unless it is a named type.
    pub fn underlying(&self, ty: TypeId) -> Option<TypeId> {
        match self.ty(ty)? {
            TypeData::Named { underlying, .. } => *underlying,
            _ => Some(ty),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

// ============================================================================
// SCOPE
// ============================================================================

/// Name → symbol map for a package's top level or the universe.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scope {
    names: IndexMap<SmolStr, SymbolId>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol; an existing binding for the name is kept and
    /// returned instead.
    pub fn insert(&mut self, name: &str, symbol: SymbolId) -> Option<SymbolId> {
        if let Some(&existing) = self.names.get(name) {
            return Some(existing);
        }
        self.names.insert(SmolStr::new(name), symbol);
        None
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.names.get(name).copied()
    }

    /// Names in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SymbolId)> {
        self.names.iter().map(|(name, &id)| (name.as_str(), id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_exported() {
        assert!(is_exported("Marshal"));
        assert!(is_exported("Élan"));
        assert!(!is_exported("marshal"));
        assert!(!is_exported("_X"));
        assert!(!is_exported(""));
    }

    #[test]
    fn test_same_id_respects_package_for_unexported() {
        let exported = Symbol::new("Name", SymbolKind::Field, Some("a"));
        let hidden = Symbol::new("name", SymbolKind::Field, Some("a"));

        assert!(exported.same_id("b", "Name"));
        assert!(hidden.same_id("a", "name"));
        assert!(!hidden.same_id("b", "name"));
        assert!(!hidden.same_id("a", "Name"));
    }

    #[test]
    fn test_scope_keeps_first_binding() {
        let mut scope = Scope::new();
        assert_eq!(scope.insert("F", SymbolId::new(0)), None);
        assert_eq!(scope.insert("F", SymbolId::new(1)), Some(SymbolId::new(0)));
        assert_eq!(scope.lookup("F"), Some(SymbolId::new(0)));
        assert_eq!(scope.lookup("G"), None);
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn test_declare_named_sets_symbol_type() {
        let mut table = SymbolTable::new();
        let sym = table.add_symbol(Symbol::new("T", SymbolKind::TypeName, Some("a")));
        let named = table.declare_named(sym);
        let st = table.add_type(TypeData::Struct { fields: Vec::new() });
        table.set_underlying(named, st);

        assert_eq!(table.symbol(sym).and_then(|s| s.ty), Some(named));
        assert_eq!(table.underlying(named), Some(st));
        assert_eq!(table.underlying(st), Some(st));
    }
}
