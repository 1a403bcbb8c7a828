//! Definition-use graph.
//!
//! The type checker records, per package, which symbol each identifier
//! occurrence defines or uses. [`Loader::def_uses`] inverts those forward
//! tables into a map from every defining occurrence to the occurrences
//! that reference the same symbol.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::hir::{OccurrenceId, Package, SymbolId};

use super::loader::Loader;

/// Defining occurrence → referencing occurrences, in collection order.
pub type DefUseMap = IndexMap<OccurrenceId, Vec<OccurrenceId>>;

#[derive(Debug, Default)]
struct DefUseBuilder {
    uses: FxHashMap<SymbolId, Vec<OccurrenceId>>,
    defs: IndexMap<OccurrenceId, Vec<SymbolId>>,
}

impl DefUseBuilder {
    fn collect(&mut self, package: &Package) {
        for (&occurrence, &symbol) in &package.info.uses {
            self.uses.entry(symbol).or_default().push(occurrence);
        }
        for (&occurrence, &symbol) in &package.info.defs {
            // Package clause names and similar define nothing.
            let Some(symbol) = symbol else { continue };
            self.defs.entry(occurrence).or_default().push(symbol);
        }
    }

    fn build(self) -> DefUseMap {
        let mut graph = DefUseMap::new();
        for (def, symbols) in self.defs {
            // Consistent checker output gives one symbol per definition.
            // Several are tolerated: the uses of each are concatenated.
            for symbol in symbols {
                let Some(uses) = self.uses.get(&symbol) else {
                    continue;
                };
                graph.entry(def).or_default().extend_from_slice(uses);
            }
        }
        graph
    }
}

impl Loader {
    /// Map every defining occurrence in the reachable packages to all
    /// occurrences using the same symbol.
    ///
    /// Definitions whose symbol is never used are absent from the map.
    pub fn def_uses(&self) -> DefUseMap {
        let mut builder = DefUseBuilder::default();
        self.visit_all_packages(None, Some(&mut |package: &Package| builder.collect(package)));
        let graph = builder.build();
        debug!(definitions = graph.len(), "built definition-use graph");
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, TextSize};
    use crate::hir::{Symbol, SymbolKind, SyntaxTree};
    use crate::project::{Discovery, InMemoryFrontEnd, LoadConfig};

    fn occ(file: u32, local: u32) -> OccurrenceId {
        OccurrenceId::new(FileId::new(file), local)
    }

    fn load(discovery: Discovery) -> Loader {
        let front = InMemoryFrontEnd::new(discovery);
        match Loader::new("/src", LoadConfig::new().with_load_deps(), &front) {
            Ok(loader) => loader,
            Err(err) => panic!("load failed: {err}"),
        }
    }

    fn package(discovery: &mut Discovery, path: &str, file: u32, imports: &[&str]) -> Package {
        let mut package = Package::new(path, path);
        let name = format!("/src/{path}/{path}.go");
        let id = discovery.files.file_id(&name);
        assert_eq!(id, FileId::new(file));
        let tree = imports
            .iter()
            .fold(SyntaxTree::new(TextSize::from(0)), |tree, import| tree.with_import(import));
        package.push_file(id, &name, tree);
        package
    }

    #[test]
    fn test_uses_across_packages() {
        let mut discovery = Discovery::new();
        let f = discovery
            .symbols
            .add_symbol(Symbol::new("F", SymbolKind::Func, Some("b")));
        let unused = discovery
            .symbols
            .add_symbol(Symbol::new("g", SymbolKind::Func, Some("b")));

        let mut b = package(&mut discovery, "b", 0, &[]);
        b.info.defs.insert(occ(0, 0), Some(f));
        b.info.defs.insert(occ(0, 1), Some(unused));
        b.info.defs.insert(occ(0, 2), None);
        b.info.uses.insert(occ(0, 3), f);
        let b = discovery.add_package(b);

        let mut a = package(&mut discovery, "a", 1, &["b"]);
        a.info.uses.insert(occ(1, 0), f);
        a.info.uses.insert(occ(1, 1), f);
        a.add_import("b", b);
        let a = discovery.add_package(a);
        discovery.add_root(a);

        let graph = load(discovery).def_uses();
        assert_eq!(graph.len(), 1);
        let mut uses = graph[&occ(0, 0)].clone();
        uses.sort();
        assert_eq!(uses, vec![occ(0, 3), occ(1, 0), occ(1, 1)]);
        assert!(!graph.contains_key(&occ(0, 1)));
        assert!(!graph.contains_key(&occ(0, 2)));
    }

    #[test]
    fn test_definition_with_several_symbols_fans_out() {
        let mut builder = DefUseBuilder::default();
        let x = SymbolId::new(0);
        let y = SymbolId::new(1);
        builder.defs.insert(occ(0, 0), vec![x, y]);
        builder.uses.insert(x, vec![occ(0, 1)]);
        builder.uses.insert(y, vec![occ(0, 2), occ(0, 3)]);

        let graph = builder.build();
        assert_eq!(graph[&occ(0, 0)], vec![occ(0, 1), occ(0, 2), occ(0, 3)]);
    }

    #[test]
    fn test_empty_corpus() {
        assert!(load(Discovery::new()).def_uses().is_empty());
    }
}
