//! Front-end output: syntax trees, packages and resolution tables.
//!
//! Parsing and type-checking happen outside this crate. What the front-end
//! hands over is described here, deliberately narrow: just enough of each
//! syntax tree for generated-file detection (leading comments, package
//! clause position), dependency traversal (import specs in source order)
//! and occurrence bookkeeping (identifier tokens).

use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::diagnostics::Diagnostic;
use super::ids::{OccurrenceId, PackageId, SymbolId};
use super::symbols::Scope;
use crate::base::{FileId, TextSize};

// ============================================================================
// SYNTAX
// ============================================================================

/// A single comment, with its text exactly as written (including `//` or
/// `/* */` delimiters).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub pos: TextSize,
    pub text: String,
}

/// A run of adjacent comments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    pub fn new(list: Vec<Comment>) -> Self {
        Self { list }
    }
}

/// An import declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpec {
    /// Local rename (`alias "path"`), `_`, or `.`.
    pub name: Option<SmolStr>,
    /// The path literal as written, quotes included.
    pub path: SmolStr,
    pub pos: TextSize,
}

impl ImportSpec {
    /// The import path with the literal's quoting removed.
    ///
    /// Returns `None` for a malformed literal.
    pub fn import_path(&self) -> Option<String> {
        unquote(&self.path)
    }
}

/// An identifier token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub name: SmolStr,
    pub pos: TextSize,
}

/// The parts of a parsed compilation unit the loader works with.
#[derive(Clone, Debug, Default)]
pub struct SyntaxTree {
    /// Position of the `package` keyword.
    pub package: TextSize,
    /// Comment groups in position order.
    pub comments: Vec<CommentGroup>,
    /// Import specs in source order.
    pub imports: Vec<ImportSpec>,
    /// Identifier tokens; an [`OccurrenceId`]'s `local` indexes this list.
    pub idents: Vec<Ident>,
}

impl SyntaxTree {
    pub fn new(package: TextSize) -> Self {
        Self {
            package,
            ..Self::default()
        }
    }

    pub fn with_comments(mut self, group: CommentGroup) -> Self {
        self.comments.push(group);
        self
    }

    pub fn with_import(mut self, path: &str) -> Self {
        let pos = self.package;
        self.imports.push(ImportSpec {
            name: None,
            path: SmolStr::from(format!("\"{path}\"")),
            pos,
        });
        self
    }

    /// Append an identifier token, returning its local index.
    pub fn push_ident(&mut self, name: &str, pos: TextSize) -> u32 {
        self.idents.push(Ident {
            name: SmolStr::new(name),
            pos,
        });
        (self.idents.len() - 1) as u32
    }
}

/// Unquote a path literal: `"..."` with escapes, or a raw `` `...` `` string.
fn unquote(literal: &str) -> Option<String> {
    let literal = literal.trim();
    if literal.len() < 2 {
        return None;
    }
    if let Some(raw) = literal.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        return (!raw.contains('`')).then(|| raw.to_string());
    }
    let body = literal.strip_prefix('"')?.strip_suffix('"')?;

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => {
                let escaped = match chars.next()? {
                    'a' => '\u{7}',
                    'b' => '\u{8}',
                    'f' => '\u{c}',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'v' => '\u{b}',
                    '\\' => '\\',
                    '"' => '"',
                    'x' => hex_escape(&mut chars, 2)?,
                    'u' => hex_escape(&mut chars, 4)?,
                    'U' => hex_escape(&mut chars, 8)?,
                    _ => return None,
                };
                out.push(escaped);
            }
            c => out.push(c),
        }
    }
    Some(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}

// ============================================================================
// PACKAGES
// ============================================================================

/// The type checker's per-identifier resolution tables for one package.
#[derive(Clone, Debug, Default)]
pub struct TypesInfo {
    /// Defining occurrences. `None` marks a definition with no object of its
    /// own (e.g. the package clause name).
    pub defs: IndexMap<OccurrenceId, Option<SymbolId>>,
    /// Referencing occurrences.
    pub uses: IndexMap<OccurrenceId, SymbolId>,
}

impl TypesInfo {
    /// The symbol an occurrence defines or uses.
    pub fn object_of(&self, occurrence: OccurrenceId) -> Option<SymbolId> {
        if let Some(&def) = self.defs.get(&occurrence) {
            return def;
        }
        self.uses.get(&occurrence).copied()
    }
}

/// One compiled file of a package.
#[derive(Clone, Debug)]
pub struct PackageFile {
    pub file: FileId,
    pub name: Arc<str>,
    pub tree: SyntaxTree,
}

/// A loaded package.
#[derive(Clone, Debug, Default)]
pub struct Package {
    pub(crate) id: PackageId,
    /// Front-end identifier; distinguishes test variants of the same path.
    pub key: SmolStr,
    /// Import path.
    pub path: SmolStr,
    /// Declared package name.
    pub name: SmolStr,
    /// Compiled files in declaration order.
    pub files: Vec<PackageFile>,
    /// Direct imports: import path → package in the discovery arena.
    pub imports: IndexMap<SmolStr, PackageId>,
    /// Top-level declarations.
    pub scope: Scope,
    pub info: TypesInfo,
    /// Front-end errors; never fatal.
    pub errors: Vec<Diagnostic>,
}

impl Package {
    pub fn new(path: &str, name: &str) -> Self {
        Self {
            key: SmolStr::new(path),
            path: SmolStr::new(path),
            name: SmolStr::new(name),
            ..Self::default()
        }
    }

    /// Position in the loader's package arena.
    pub fn id(&self) -> PackageId {
        self.id
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = SmolStr::new(key);
        self
    }

    pub fn push_file(&mut self, file: FileId, name: &str, tree: SyntaxTree) {
        self.files.push(PackageFile {
            file,
            name: Arc::from(name),
            tree,
        });
    }

    pub fn add_import(&mut self, path: &str, target: PackageId) {
        self.imports.insert(SmolStr::new(path), target);
    }

    pub fn object_of(&self, occurrence: OccurrenceId) -> Option<SymbolId> {
        self.info.object_of(occurrence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#""fmt""#, Some("fmt"))]
    #[case(r#""example.com/a/b""#, Some("example.com/a/b"))]
    #[case("`example.com/raw`", Some("example.com/raw"))]
    #[case(r#""café""#, Some("café"))]
    #[case(r#""a\"b""#, Some("a\"b"))]
    #[case(r#""unterminated"#, None)]
    #[case(r#""bad\q""#, None)]
    #[case("fmt", None)]
    #[case(r#""""#, Some(""))]
    fn test_import_path_unquote(#[case] literal: &str, #[case] expected: Option<&str>) {
        let spec = ImportSpec {
            name: None,
            path: SmolStr::new(literal),
            pos: TextSize::from(0),
        };
        assert_eq!(spec.import_path().as_deref(), expected);
    }

    #[test]
    fn test_object_of_prefers_defs() {
        let occ = OccurrenceId::new(FileId::new(0), 0);
        let other = OccurrenceId::new(FileId::new(0), 1);
        let mut info = TypesInfo::default();
        info.defs.insert(occ, Some(SymbolId::new(1)));
        info.uses.insert(other, SymbolId::new(1));

        assert_eq!(info.object_of(occ), Some(SymbolId::new(1)));
        assert_eq!(info.object_of(other), Some(SymbolId::new(1)));
        assert_eq!(info.object_of(OccurrenceId::new(FileId::new(0), 2)), None);
    }

    #[test]
    fn test_object_of_objectless_def() {
        let occ = OccurrenceId::new(FileId::new(0), 0);
        let mut info = TypesInfo::default();
        info.defs.insert(occ, None);

        assert_eq!(info.object_of(occ), None);
    }

    #[test]
    fn test_with_import_quotes_path() {
        let tree = SyntaxTree::new(TextSize::from(0)).with_import("pkgB");
        assert_eq!(tree.imports[0].path.as_str(), "\"pkgB\"");
        assert_eq!(tree.imports[0].import_path().as_deref(), Some("pkgB"));
    }
}
