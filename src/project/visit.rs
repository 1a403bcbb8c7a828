//! Dependency-ordered traversal.
//!
//! Two walks over the loaded corpus:
//!
//! - [`Loader::visit_all_files`] visits the files of every root package,
//!   without following imports.
//! - [`Loader::visit_all_packages`] walks the import graph depth first:
//!   packages in root order, files in declaration order, imports in source
//!   order. An imported package is exhausted (its own imports first) before
//!   the importer's next import is looked at, so the post-visit hook sees
//!   dependencies before dependents.
//!
//! Each package is visited at most once per call, which collapses diamond
//! dependencies and would also stop an import cycle.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::hir::{Package, PackageId};

use super::loader::Loader;
use super::unit::CompilationUnit;

/// Pre-visit predicate: return `false` to skip a package's files and imports.
pub type PreVisit<'f> = &'f mut dyn FnMut(&Package) -> bool;
/// Post-visit callback.
pub type PostVisit<'f> = &'f mut dyn FnMut(&Package);

impl Loader {
    /// Visit every file of every root package accepted by the package
    /// filter, in declaration order, subject to the file filter.
    pub fn visit_all_files(&self, mut visitor: impl FnMut(&CompilationUnit<'_>)) {
        for package in self.roots() {
            if self.config.accepts_package(package) {
                self.visit_package_files(package, &mut visitor);
            }
        }
    }

    /// Walk the package graph from the root packages accepted by the
    /// package filter.
    ///
    /// `pre` decides whether to descend into a package's files and imports;
    /// the package counts as visited and `post` still fires either way.
    /// Imports naming packages outside the index are skipped.
    pub fn visit_all_packages<'f>(&self, pre: Option<PreVisit<'f>>, post: Option<PostVisit<'f>>) {
        let mut walk = PackageWalk {
            loader: self,
            seen: FxHashSet::default(),
            pre,
            post,
        };
        for package in self.roots() {
            if self.config.accepts_package(package) {
                walk.visit(package);
            }
        }
    }

    fn visit_package_files(
        &self,
        package: &Package,
        visitor: &mut dyn FnMut(&CompilationUnit<'_>),
    ) {
        for file in &package.files {
            let unit = self.unit(package, file);
            if self.config.accepts_file(&unit) {
                visitor(&unit);
            }
        }
    }
}

struct PackageWalk<'l, 'f> {
    loader: &'l Loader,
    seen: FxHashSet<PackageId>,
    pre: Option<PreVisit<'f>>,
    post: Option<PostVisit<'f>>,
}

impl<'l> PackageWalk<'l, '_> {
    fn visit(&mut self, package: &'l Package) {
        if !self.seen.insert(package.id()) {
            return;
        }
        trace!(package = %package.path, "visit package");

        let descend = match self.pre.as_mut() {
            Some(pre) => pre(package),
            None => true,
        };
        if descend {
            let loader = self.loader;
            for file in &package.files {
                if !loader.config.accepts_file(&loader.unit(package, file)) {
                    continue;
                }
                for spec in &file.tree.imports {
                    let Some(path) = spec.import_path() else {
                        continue;
                    };
                    if let Some(import) = loader.lookup_package(&path) {
                        self.visit(import);
                    }
                }
            }
        }

        if let Some(post) = self.post.as_mut() {
            post(package);
        }
    }
}
