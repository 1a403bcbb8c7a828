//! Corpus fixtures for integration tests.
//!
//! Builds a [`Discovery`] the way a front-end would: packages with files,
//! import edges recorded both in the syntax trees and the import map,
//! top-level declarations and per-identifier resolution tables.

#![allow(dead_code)]

use corpus::hir::{Comment, CommentGroup, Symbol, SymbolKind, SyntaxTree};
use corpus::{
    Discovery, FileId, InMemoryFrontEnd, LoadConfig, Loader, OccurrenceId, PackageId, SymbolId,
    TextSize,
};

/// Position of the `package` keyword in fixture files.
pub const PACKAGE_POS: u32 = 40;

pub struct CorpusBuilder {
    pub discovery: Discovery,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self {
            discovery: Discovery::new(),
        }
    }

    /// Add a package without files. It is not a root until [`Self::root`].
    pub fn package(&mut self, path: &str) -> PackageId {
        let name = path.rsplit('/').next().unwrap_or(path);
        self.discovery
            .add_package(corpus::Package::new(path, name))
    }

    /// Add a package with a single `<name>.go` file and make it a root.
    pub fn root_package(&mut self, path: &str) -> (PackageId, FileId) {
        let id = self.package(path);
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        let file = self.file(id, &format!("{name}.go"), plain_tree());
        self.root(id);
        (id, file)
    }

    pub fn root(&mut self, package: PackageId) {
        self.discovery.add_root(package);
    }

    /// Add a file named `/src/<path>/<base>` to a package.
    pub fn file(&mut self, package: PackageId, base: &str, tree: SyntaxTree) -> FileId {
        let path = self.pkg(package).path.clone();
        let name = format!("/src/{path}/{base}");
        let file = self.discovery.files.file_id(&name);
        self.pkg(package).push_file(file, &name, tree);
        file
    }

    /// Record an import of `to` in `from`'s first file and import map.
    pub fn import(&mut self, from: PackageId, to: PackageId) {
        let path = self.pkg(to).path.clone();
        let importer = self.pkg(from);
        importer.add_import(&path, to);
        let file = importer
            .files
            .first_mut()
            .expect("importing package needs a file");
        let tree = std::mem::take(&mut file.tree);
        file.tree = tree.with_import(&path);
    }

    /// Declare a top-level symbol in a package scope.
    pub fn declare(&mut self, package: PackageId, name: &str, kind: SymbolKind) -> SymbolId {
        let path = self.pkg(package).path.clone();
        let symbol = self
            .discovery
            .symbols
            .add_symbol(Symbol::new(name, kind, Some(path.as_str())));
        self.pkg(package).scope.insert(name, symbol);
        symbol
    }

    /// Add a builtin to the universe scope.
    pub fn builtin(&mut self, name: &str, kind: SymbolKind) -> SymbolId {
        let symbol = self
            .discovery
            .symbols
            .add_symbol(Symbol::new(name, kind, None));
        self.discovery.universe.insert(name, symbol);
        symbol
    }

    /// Record a defining occurrence of `symbol` at `offset` in `file`.
    pub fn def(
        &mut self,
        package: PackageId,
        file: FileId,
        offset: u32,
        symbol: Option<SymbolId>,
    ) -> OccurrenceId {
        let name = symbol
            .and_then(|s| self.discovery.symbols.symbol(s))
            .map(|s| s.name.to_string())
            .unwrap_or_else(|| "_".to_string());
        let occurrence = self.ident(package, file, &name, offset);
        self.pkg(package).info.defs.insert(occurrence, symbol);
        occurrence
    }

    /// Record a use of `symbol` at `offset` in `file`.
    pub fn use_of(
        &mut self,
        package: PackageId,
        file: FileId,
        offset: u32,
        symbol: SymbolId,
    ) -> OccurrenceId {
        let name = self
            .discovery
            .symbols
            .symbol(symbol)
            .map(|s| s.name.to_string())
            .unwrap_or_default();
        let occurrence = self.ident(package, file, &name, offset);
        self.pkg(package).info.uses.insert(occurrence, symbol);
        occurrence
    }

    pub fn front_end(self) -> InMemoryFrontEnd {
        InMemoryFrontEnd::new(self.discovery)
    }

    pub fn load(self, config: LoadConfig) -> Loader {
        Loader::new("/src", config, &self.front_end()).expect("fixture corpus loads")
    }

    fn ident(&mut self, package: PackageId, file: FileId, name: &str, offset: u32) -> OccurrenceId {
        let tree = &mut self
            .pkg(package)
            .files
            .iter_mut()
            .find(|f| f.file == file)
            .expect("file belongs to package")
            .tree;
        let local = tree.push_ident(name, TextSize::from(offset));
        OccurrenceId::new(file, local)
    }

    fn pkg(&mut self, package: PackageId) -> &mut corpus::Package {
        self.discovery
            .package_mut(package)
            .expect("package was added to the builder")
    }
}

pub fn plain_tree() -> SyntaxTree {
    SyntaxTree::new(TextSize::from(PACKAGE_POS))
}

/// A tree whose header comment carries a `Code generated` marker.
pub fn generated_tree(generator: &str) -> SyntaxTree {
    plain_tree().with_comments(CommentGroup::new(vec![Comment {
        pos: TextSize::from(0),
        text: format!("// Code generated {generator} DO NOT EDIT."),
    }]))
}
