//! The front-end collaborator: package discovery, parsing and type-checking.
//!
//! The loader never parses or type-checks anything itself. It asks a
//! [`FrontEnd`] for the packages matching a [`DiscoveryRequest`] and gets
//! back a [`Discovery`]: the package arena with syntax trees and resolution
//! tables, the shared symbol table and the universe scope.

use std::error::Error;
use std::path::PathBuf;

use parking_lot::Mutex;

use crate::hir::{FileSet, Package, PackageId, Scope, SymbolTable};

/// Error type front-ends report whole-call failures with.
pub type DiscoveryError = Box<dyn Error + Send + Sync>;

/// What the loader asks the front-end for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveryRequest {
    /// Absolute root directory.
    pub dir: PathBuf,
    pub patterns: Vec<String>,
    /// Include test variants of the matched packages.
    pub tests: bool,
    /// Resolve and return transitive dependencies.
    pub load_deps: bool,
    pub build_flags: Vec<String>,
    /// Environment overrides applied on top of the process environment.
    pub env: Vec<(String, String)>,
}

/// The front-end's answer.
#[derive(Clone, Debug, Default)]
pub struct Discovery {
    /// Package arena; a package's position is its [`PackageId`].
    pub packages: Vec<Package>,
    /// Packages matched by the request patterns, in match order.
    pub roots: Vec<PackageId>,
    pub symbols: SymbolTable,
    /// Builtin names (`error`, `string`, `len`, ...).
    pub universe: Scope,
    pub files: FileSet,
}

impl Discovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a package to the arena.
    pub fn add_package(&mut self, package: Package) -> PackageId {
        self.packages.push(package);
        PackageId::new((self.packages.len() - 1) as u32)
    }

    pub fn add_root(&mut self, package: PackageId) {
        self.roots.push(package);
    }

    pub fn package_mut(&mut self, package: PackageId) -> Option<&mut Package> {
        self.packages.get_mut(package.index() as usize)
    }
}

pub trait FrontEnd {
    /// Discover, parse and type-check the packages matching `request`.
    ///
    /// An `Err` means no package set could be produced at all. Problems with
    /// individual packages belong in [`Package::errors`] instead.
    fn discover(&self, request: &DiscoveryRequest) -> Result<Discovery, DiscoveryError>;
}

/// A front-end answering from prepared results.
///
/// Every request is recorded so callers can check what was asked for.
#[derive(Debug)]
pub struct InMemoryFrontEnd {
    result: Result<Discovery, String>,
    requests: Mutex<Vec<DiscoveryRequest>>,
}

impl InMemoryFrontEnd {
    pub fn new(discovery: Discovery) -> Self {
        Self {
            result: Ok(discovery),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A front-end whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<DiscoveryRequest> {
        self.requests.lock().clone()
    }
}

impl FrontEnd for InMemoryFrontEnd {
    fn discover(&self, request: &DiscoveryRequest) -> Result<Discovery, DiscoveryError> {
        self.requests.lock().push(request.clone());
        match &self.result {
            Ok(discovery) => Ok(discovery.clone()),
            Err(message) => Err(message.clone().into()),
        }
    }
}
