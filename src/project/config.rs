//! Load configuration.
//!
//! [`LoadConfig`] collects discovery patterns, load-mode flags and the
//! package/file filters applied during traversal:
//!
//! ```
//! let config = corpus::LoadConfig::new()
//!     .with_patterns(["./cmd/..."])
//!     .with_tests()
//!     .with_skip_generated();
//! assert_eq!(config.patterns(), ["./cmd/..."]);
//! ```

use std::fmt;
use std::path::Path;

use crate::hir::Package;

use super::unit::CompilationUnit;

/// Discovery pattern selecting every package under the root directory.
pub const PATTERN_ALL: &str = "./...";
/// Discovery pattern selecting the builtin standard library.
pub const PATTERN_STD: &str = "std";

/// Generator payload of the synthetic test-main unit the test harness
/// emits (`// Code generated by 'go test'. DO NOT EDIT.`).
pub const TEST_MAIN_GENERATOR: &str = "by 'go test'.";

pub type PackageFilter = Box<dyn Fn(&Package) -> bool + Send + Sync>;
pub type FileFilter = Box<dyn for<'a> Fn(&CompilationUnit<'a>) -> bool + Send + Sync>;

pub struct LoadConfig {
    pub(crate) patterns: Vec<String>,
    pub(crate) build_tags: String,
    pub(crate) env: Vec<(String, String)>,
    /// Include test package variants.
    pub(crate) tests: bool,
    /// Index transitive dependencies too; slow on large corpora.
    pub(crate) load_deps: bool,
    pub(crate) print_errors: bool,
    package_filters: Vec<PackageFilter>,
    file_filters: Vec<FileFilter>,
}

impl LoadConfig {
    pub fn new() -> Self {
        Self {
            patterns: vec![PATTERN_ALL.to_string()],
            build_tags: String::new(),
            env: Vec::new(),
            tests: false,
            load_deps: false,
            print_errors: true,
            package_filters: Vec::new(),
            file_filters: Vec::new(),
        }
    }

    /// Discovery patterns, e.g. `./...`, `std`, `bytes`, `example.com/m/...`.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_load_deps(mut self) -> Self {
        self.load_deps = true;
        self
    }

    /// Comma-separated list of extra build tags.
    pub fn with_build_tags(mut self, tags: impl Into<String>) -> Self {
        self.build_tags = tags.into();
        self
    }

    /// Override the module-resolution root (`GOPATH`).
    pub fn with_gopath(self, gopath: impl AsRef<Path>) -> Self {
        let value = gopath.as_ref().display().to_string();
        self.with_env("GOPATH", value)
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn with_tests(mut self) -> Self {
        self.tests = true;
        self
    }

    /// Do not log per-package front-end diagnostics.
    pub fn with_suppress_errors(mut self) -> Self {
        self.print_errors = false;
        self
    }

    /// Add a root package filter. Filters combine with logical AND in
    /// registration order.
    pub fn with_package_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Package) -> bool + Send + Sync + 'static,
    {
        self.package_filters.push(Box::new(filter));
        self
    }

    /// Add a file filter. Filters combine with logical AND in registration
    /// order, after the built-in test-main exclusion.
    pub fn with_file_filter<F>(mut self, filter: F) -> Self
    where
        F: for<'a> Fn(&CompilationUnit<'a>) -> bool + Send + Sync + 'static,
    {
        self.file_filters.push(Box::new(filter));
        self
    }

    /// Skip every file carrying a `Code generated` marker.
    pub fn with_skip_generated(self) -> Self {
        self.with_file_filter(|unit| !unit.is_generated())
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub(crate) fn build_flags(&self) -> Vec<String> {
        vec![format!("-tags={}", self.build_tags)]
    }

    pub(crate) fn accepts_package(&self, package: &Package) -> bool {
        self.package_filters.iter().all(|f| f(package))
    }

    pub(crate) fn accepts_file(&self, unit: &CompilationUnit<'_>) -> bool {
        unit.generated_by != TEST_MAIN_GENERATOR && self.file_filters.iter().all(|f| f(unit))
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadConfig")
            .field("patterns", &self.patterns)
            .field("build_tags", &self.build_tags)
            .field("env", &self.env)
            .field("tests", &self.tests)
            .field("load_deps", &self.load_deps)
            .field("print_errors", &self.print_errors)
            .field("package_filters", &self.package_filters.len())
            .field("file_filters", &self.file_filters.len())
            .finish()
    }
}
