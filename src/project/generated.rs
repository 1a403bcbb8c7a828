//! Generated-file detection.
//!
//! A file is machine-generated when a comment before its package clause
//! contains a whole line of the form
//!
//! ```text
//! // Code generated <generator> DO NOT EDIT.
//! ```
//!
//! Absence of the marker is the normal case, not an error.

use crate::hir::SyntaxTree;

const PREFIX: &str = "// Code generated ";
const SUFFIX: &str = " DO NOT EDIT.";

/// The generator named by the file's marker, if any.
pub fn generator(tree: &SyntaxTree) -> Option<&str> {
    for group in &tree.comments {
        for comment in &group.list {
            // Comments are position-ordered: nothing after the package
            // clause can qualify.
            if comment.pos > tree.package {
                return None;
            }
            if !comment.text.contains(PREFIX) {
                continue;
            }
            let found = comment.text.lines().find_map(|line| {
                line.strip_prefix(PREFIX)
                    .and_then(|rest| rest.strip_suffix(SUFFIX))
            });
            if found.is_some() {
                return found;
            }
        }
    }
    None
}

pub fn is_generated(tree: &SyntaxTree) -> bool {
    generator(tree).is_some()
}
