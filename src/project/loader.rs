//! The corpus loader.
//!
//! [`Loader::new`] asks the front-end for every package matching the
//! configured patterns, indexes the reachable packages by import path and
//! runs generated-file detection once per file. Everything after that is a
//! read-only query over the loaded corpus: traversal (`visit`), lookups
//! (`lookup`) and the definition-use graph (`defuse`).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::{debug, error, trace, warn};

use crate::base::FileId;
use crate::hir::{
    Diagnostic, FileSet, Ident, OccurrenceId, Package, PackageFile, PackageId, Scope, Symbol,
    SymbolId, SymbolTable,
};

use super::config::LoadConfig;
use super::error::LoadError;
use super::frontend::{Discovery, DiscoveryRequest, FrontEnd};
use super::generated::generator;
use super::unit::CompilationUnit;

pub type PackagePath = SmolStr;

/// A fully loaded, immutable corpus.
#[derive(Debug)]
pub struct Loader {
    pub(crate) config: LoadConfig,
    dir: PathBuf,
    files: FileSet,
    symbols: SymbolTable,
    universe: Scope,
    /// Discovery arena, indexed by `PackageId`.
    packages: Vec<Package>,
    /// Packages matched by the patterns; traversal roots.
    roots: Vec<PackageId>,
    /// Every package reachable under the load mode, by import path.
    pub(crate) all: IndexMap<PackagePath, PackageId>,
    /// File name → generator, for generated files only.
    generated: FxHashMap<Arc<str>, SmolStr>,
    /// File → (package, position in its file list).
    file_owners: FxHashMap<FileId, (PackageId, usize)>,
}

impl Loader {
    /// Load the packages under `dir` matching `config`'s patterns.
    pub fn new(
        dir: impl AsRef<Path>,
        config: LoadConfig,
        front_end: &dyn FrontEnd,
    ) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let dir = std::path::absolute(dir).map_err(|source| LoadError::RootDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let request = DiscoveryRequest {
            dir: dir.clone(),
            patterns: config.patterns.clone(),
            tests: config.tests,
            load_deps: config.load_deps,
            build_flags: config.build_flags(),
            env: config.env.clone(),
        };
        debug!(
            dir = %dir.display(),
            patterns = ?request.patterns,
            tests = request.tests,
            load_deps = request.load_deps,
            "loading packages"
        );

        let discovery = front_end.discover(&request).map_err(LoadError::Discovery)?;
        validate(&discovery)?;
        if discovery.roots.is_empty() {
            warn!("no packages found");
        }

        let Discovery {
            mut packages,
            roots,
            symbols,
            universe,
            files,
        } = discovery;
        for (i, package) in packages.iter_mut().enumerate() {
            package.id = PackageId::new(i as u32);
        }

        let mut loader = Self {
            config,
            dir,
            files,
            symbols,
            universe,
            packages,
            roots,
            all: IndexMap::new(),
            generated: FxHashMap::default(),
            file_owners: FxHashMap::default(),
        };
        let loaded = loader.index_packages();
        loader.generated = detect_generated(&loader.packages, &loaded);
        loader.file_owners = index_files(&loader.packages);

        debug!(
            roots = loader.roots.len(),
            packages = loader.all.len(),
            generated = loader.generated.len(),
            "load complete"
        );
        Ok(loader)
    }

    /// Gather every package reachable from the roots under the load mode.
    ///
    /// Without dependency loading only the roots themselves are indexed.
    /// Packages sharing an import path (test variants) resolve to the last
    /// one visited. Returns every package reached, shadowed ones included.
    fn index_packages(&mut self) -> Vec<PackageId> {
        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        for &root in &self.roots {
            self.collect_post_order(root, &mut seen, &mut order);
        }

        for &id in &order {
            let package = &self.packages[id.slot()];
            if self.config.print_errors {
                for diagnostic in &package.errors {
                    error!(package = %package.path, "{}", diagnostic);
                }
            }
            self.all.insert(package.path.clone(), id);
        }
        order
    }

    fn collect_post_order(
        &self,
        id: PackageId,
        seen: &mut FxHashSet<PackageId>,
        order: &mut Vec<PackageId>,
    ) {
        if !seen.insert(id) {
            return;
        }
        if self.config.load_deps {
            let package = &self.packages[id.slot()];
            let mut imports: Vec<(&SmolStr, &PackageId)> = package.imports.iter().collect();
            imports.sort_by(|a, b| a.0.cmp(b.0));
            for (_, &import) in imports {
                self.collect_post_order(import, seen, order);
            }
        }
        order.push(id);
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Absolute root directory the corpus was loaded from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.symbol(id)
    }

    pub fn universe(&self) -> &Scope {
        &self.universe
    }

    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.packages.get(id.slot())
    }

    /// The packages matched by the load patterns, in match order.
    pub fn roots(&self) -> impl Iterator<Item = &Package> {
        self.roots.iter().filter_map(|&id| self.package(id))
    }

    /// Every indexed package.
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.all.values().filter_map(|&id| self.package(id))
    }

    /// Generator of a file, if the file carries a `Code generated` marker.
    pub fn generated_by(&self, file_name: &str) -> Option<&str> {
        self.generated.get(file_name).map(SmolStr::as_str)
    }

    /// Front-end diagnostics of every indexed package.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&Package, &Diagnostic)> {
        self.packages()
            .flat_map(|package| package.errors.iter().map(move |d| (package, d)))
    }

    pub(crate) fn unit<'a>(&'a self, package: &'a Package, file: &'a PackageFile) -> CompilationUnit<'a> {
        let generated_by = self.generated_by(&file.name).unwrap_or("");
        CompilationUnit::new(package, file, generated_by)
    }

    // ========================================================================
    // OCCURRENCES
    // ========================================================================

    /// The identifier token behind an occurrence.
    pub fn ident(&self, occurrence: OccurrenceId) -> Option<&Ident> {
        let &(package, index) = self.file_owners.get(&occurrence.file)?;
        self.package(package)?
            .files
            .get(index)?
            .tree
            .idents
            .get(occurrence.local as usize)
    }

    /// The package whose files contain an occurrence.
    pub fn package_of(&self, occurrence: OccurrenceId) -> Option<&Package> {
        let &(package, _) = self.file_owners.get(&occurrence.file)?;
        self.package(package)
    }

    /// Human-readable position: `file:line:col` when the file contents are
    /// known, `file:@offset` otherwise, `-` for unknown occurrences.
    pub fn show_pos(&self, occurrence: OccurrenceId) -> String {
        let (Some(name), Some(ident)) = (self.files.name(occurrence.file), self.ident(occurrence))
        else {
            return "-".to_string();
        };
        match self.files.line_col(occurrence.file, ident.pos) {
            Some(line_col) => format!("{}:{}", name, line_col),
            None => format!("{}:@{}", name, u32::from(ident.pos)),
        }
    }
}

/// Check that every root and import edge points into the package arena.
fn validate(discovery: &Discovery) -> Result<(), LoadError> {
    let len = discovery.packages.len();
    if let Some(root) = discovery.roots.iter().find(|r| r.slot() >= len) {
        return Err(LoadError::UnknownRoot(root.index()));
    }
    for package in &discovery.packages {
        if let Some((path, target)) = package.imports.iter().find(|(_, t)| t.slot() >= len) {
            return Err(LoadError::DanglingImport {
                package: package.path.clone(),
                import: path.clone(),
                index: target.index(),
            });
        }
    }
    Ok(())
}

/// Run marker detection once per distinct file name of the loaded packages,
/// including packages whose path is shadowed in the index.
fn detect_generated(packages: &[Package], loaded: &[PackageId]) -> FxHashMap<Arc<str>, SmolStr> {
    let mut names = FxHashSet::default();
    let files: Vec<&PackageFile> = loaded
        .iter()
        .flat_map(|&id| packages[id.slot()].files.iter())
        .filter(|file| names.insert(file.name.clone()))
        .collect();

    files
        .par_iter()
        .filter_map(|file| {
            let by = generator(&file.tree)?;
            trace!(file = %file.name, generator = by, "generated file");
            Some((file.name.clone(), SmolStr::new(by)))
        })
        .collect()
}

fn index_files(packages: &[Package]) -> FxHashMap<FileId, (PackageId, usize)> {
    let mut owners = FxHashMap::default();
    for package in packages {
        for (index, file) in package.files.iter().enumerate() {
            owners.entry(file.file).or_insert((package.id, index));
        }
    }
    owners
}
