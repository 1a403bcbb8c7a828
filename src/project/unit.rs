//! The compilation-unit view handed to visitors and file filters.

use crate::base::FileId;
use crate::hir::{Package, PackageFile, SyntaxTree};

/// One source file of a loaded package, with load-time metadata.
#[derive(Clone, Copy, Debug)]
pub struct CompilationUnit<'a> {
    pub tree: &'a SyntaxTree,
    pub package: &'a Package,
    pub file: FileId,
    pub name: &'a str,
    /// Generator name from the file's `Code generated` marker; empty for
    /// hand-written files.
    pub generated_by: &'a str,
}

impl<'a> CompilationUnit<'a> {
    pub(crate) fn new(package: &'a Package, file: &'a PackageFile, generated_by: &'a str) -> Self {
        Self {
            tree: &file.tree,
            package,
            file: file.file,
            name: &file.name,
            generated_by,
        }
    }

    pub fn is_generated(&self) -> bool {
        !self.generated_by.is_empty()
    }

    /// Base name of the file (`main.go` for `/src/cmd/main.go`).
    pub fn base_name(&self) -> &'a str {
        self.name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TextSize;

    #[test]
    fn test_unit_metadata() {
        let mut pkg = Package::new("example.com/cmd", "main");
        pkg.push_file(FileId::new(0), "/src/cmd/main.go", SyntaxTree::new(TextSize::from(0)));
        let file = &pkg.files[0];

        let unit = CompilationUnit::new(&pkg, file, "");
        assert_eq!(unit.base_name(), "main.go");
        assert!(!unit.is_generated());

        let unit = CompilationUnit::new(&pkg, file, "by stringer");
        assert!(unit.is_generated());
    }
}
