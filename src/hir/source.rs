//! The corpus file set: file names, their [`FileId`]s and, optionally,
//! their contents.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::base::{FileId, LineCol, LineIndex, TextSize};

/// Assigns stable [`FileId`]s to file names.
///
/// The front-end interns every compilation unit it hands over here, so that
/// occurrences can refer to their file by id. Contents are optional: when
/// present they let [`FileSet::line_col`] render human positions.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
}

#[derive(Clone, Debug, Default)]
struct FileSetInner {
    /// Name → FileId
    by_name: IndexMap<Arc<str>, FileId>,
    /// FileId → Name; position is the id
    names: Vec<Arc<str>>,
    /// FileId → line index over the file contents
    lines: IndexMap<FileId, LineIndex>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the FileId for a file name.
    pub fn file_id(&self, name: &str) -> FileId {
        // Fast path: read lock
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.by_name.get(name) {
                return id;
            }
        }

        let mut inner = self.inner.write();
        // Double-check
        if let Some(&id) = inner.by_name.get(name) {
            return id;
        }

        let id = FileId::new(inner.names.len() as u32);
        let name: Arc<str> = Arc::from(name);
        inner.names.push(name.clone());
        inner.by_name.insert(name, id);
        id
    }

    /// Look up an already interned name without assigning a new id.
    pub fn lookup(&self, name: &str) -> Option<FileId> {
        self.inner.read().by_name.get(name).copied()
    }

    /// Get the name for a FileId.
    pub fn name(&self, file: FileId) -> Option<Arc<str>> {
        self.inner.read().names.get(file.index() as usize).cloned()
    }

    /// Record the contents of a file so positions can be shown as `line:col`.
    pub fn set_contents(&self, file: FileId, contents: &str) {
        self.inner.write().lines.insert(file, LineIndex::new(contents));
    }

    /// Convert an offset in `file` to a line/column, if contents are known.
    pub fn line_col(&self, file: FileId, offset: TextSize) -> Option<LineCol> {
        self.inner.read().lines.get(&file)?.line_col(offset)
    }

    pub fn len(&self) -> usize {
        self.inner.read().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for FileSet {
    fn clone(&self) -> Self {
        Self {
            inner: RwLock::new(self.inner.read().clone()),
        }
    }
}
