//! Property-based tests for qualified lookup and the definition-use graph.
#![cfg(feature = "proptest")]

mod common;

use common::{CorpusBuilder, plain_tree};
use corpus::hir::SymbolKind;
use corpus::{FileId, LoadConfig, OccurrenceId, PackageId};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

/// Import paths such as `example.com/a_1/b` or `gopkg.in/yaml.v3`.
fn arb_path() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just(None), "[a-z]{2,6}\\.(com|org|in)".prop_map(Some)],
        prop::collection::vec("[a-z][a-z0-9_]{0,6}(\\.v[0-9])?", 1..4),
    )
        .prop_map(|(host, segments)| match host {
            Some(host) => format!("{host}/{}", segments.join("/")),
            None => segments.join("/"),
        })
}

fn arb_ident() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,10}"
}

/// Distinct packages, each with distinct declared names.
fn arb_corpus() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    prop::collection::btree_map(
        arb_path(),
        prop::collection::btree_set(arb_ident(), 0..6),
        1..6,
    )
    .prop_map(|packages| {
        packages
            .into_iter()
            .map(|(path, names)| (path, names.into_iter().collect()))
            .collect()
    })
}

/// Per symbol, the number of uses in each of three files.
fn arb_use_counts() -> impl Strategy<Value = Vec<[usize; 3]>> {
    prop::collection::vec(prop::array::uniform3(0usize..4), 1..8)
}

proptest! {
    #[test]
    fn prop_qualified_lookup_finds_every_declaration(packages in arb_corpus()) {
        let mut corpus = CorpusBuilder::new();
        let mut declared = Vec::new();
        for (path, names) in &packages {
            let (id, _) = corpus.root_package(path);
            for name in names {
                let symbol = corpus.declare(id, name, SymbolKind::Var);
                declared.push((format!("{path}.{name}"), symbol));
            }
        }
        let loader = corpus.load(LoadConfig::new());

        for (qualified, symbol) in declared {
            prop_assert_eq!(loader.lookup(&qualified), Some(symbol));
            prop_assert_eq!(loader.must_lookup(&qualified), Ok(symbol));
        }
    }

    #[test]
    fn prop_def_uses_complete(counts in arb_use_counts()) {
        let mut corpus = CorpusBuilder::new();
        let (main, main_go) = corpus.root_package("main");
        let lib: PackageId = corpus.package("lib");
        let lib_go = corpus.file(lib, "lib.go", plain_tree());
        let lib_extra = corpus.file(lib, "extra.go", plain_tree());
        corpus.import(main, lib);
        let files: [(PackageId, FileId); 3] = [(main, main_go), (lib, lib_go), (lib, lib_extra)];

        let mut expected = Vec::new();
        let mut offset = 100;
        for (i, per_file) in counts.iter().enumerate() {
            let symbol = corpus.declare(lib, &format!("S{i}"), SymbolKind::Func);
            let def = corpus.def(lib, lib_go, offset, Some(symbol));
            offset += 10;
            let mut uses = FxHashSet::default();
            for (&(package, file), &n) in files.iter().zip(per_file) {
                for _ in 0..n {
                    uses.insert(corpus.use_of(package, file, offset, symbol));
                    offset += 10;
                }
            }
            expected.push((def, uses));
        }
        let loader = corpus.load(LoadConfig::new().with_load_deps());
        let graph = loader.def_uses();

        for (def, uses) in expected {
            match graph.get(&def) {
                None => prop_assert!(uses.is_empty()),
                Some(found) => {
                    let found: FxHashSet<OccurrenceId> = found.iter().copied().collect();
                    prop_assert_eq!(found.len(), graph[&def].len());
                    prop_assert_eq!(found, uses);
                }
            }
        }
    }
}
