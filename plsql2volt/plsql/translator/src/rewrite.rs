//! Span-based rewriting of source text.

use std::ops::Range;

use crate::error::{TranslateError, TranslateResult};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    span: Range<usize>,
    replacement: String,
}

/// An ordered set of non-overlapping replacements inside `bounds` of a source text.
///
/// Text outside of the edited spans is copied verbatim when the list is applied.
#[derive(Debug, Clone)]
pub struct EditList {
    bounds: Range<usize>,
    edits: Vec<Edit>,
}

impl EditList {
    pub fn new(bounds: Range<usize>) -> Self {
        Self {
            bounds,
            edits: Vec::new(),
        }
    }

    /// Replaces `span` with `replacement`.
    ///
    /// # Errors
    /// Returns [`TranslateError::OverlappingEdits`] if `span` is not inside the bounds of the list
    /// or intersects a span that has already been edited.
    pub fn replace(&mut self, span: Range<usize>, replacement: impl Into<String>) -> TranslateResult<()> {
        let overlapping = || TranslateError::OverlappingEdits {
            span: span.clone(),
            bounds: self.bounds.clone(),
        };
        if span.start > span.end || span.start < self.bounds.start || span.end > self.bounds.end {
            return Err(overlapping());
        }
        let index = self
            .edits
            .partition_point(|edit| edit.span.start < span.start);
        let after_previous = index == 0 || self.edits[index - 1].span.end <= span.start;
        let before_next = self
            .edits
            .get(index)
            .is_none_or(|next| span.end <= next.span.start && next.span.start != span.start);
        if !(after_previous && before_next) {
            return Err(overlapping());
        }
        self.edits.insert(index, Edit {
            span,
            replacement: replacement.into(),
        });
        Ok(())
    }

    #[inline]
    pub fn delete(&mut self, span: Range<usize>) -> TranslateResult<()> {
        self.replace(span, String::new())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Produces the edited text of `source[bounds]`.
    pub fn apply(&self, source: &str) -> String {
        let slice = |range: Range<usize>| source.get(range).unwrap_or_default();
        let mut output = String::with_capacity(self.bounds.len());
        let mut cursor = self.bounds.start;
        for edit in &self.edits {
            output.push_str(slice(cursor..edit.span.start));
            output.push_str(&edit.replacement);
            cursor = edit.span.end;
        }
        output.push_str(slice(cursor..self.bounds.end));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_preserves_untouched_text() {
        let source = "x := a = 'b';";
        let mut edits = EditList::new(5..12);
        assert_eq!(edits.apply(source), "a = 'b'");
        edits.replace(9..12, "\"b\"").unwrap();
        edits.replace(7..8, "==").unwrap();
        assert_eq!(edits.len(), 2);
        assert_eq!(edits.apply(source), "a == \"b\"");
    }

    #[test]
    fn test_delete() {
        let source = "select a into b from t";
        let mut edits = EditList::new(0..source.len());
        edits.delete(9..16).unwrap();
        assert_eq!(edits.apply(source), "select a from t");
    }

    #[test]
    fn test_overlap_fails_fast() {
        let mut edits = EditList::new(0..10);
        edits.replace(2..5, "x").unwrap();
        assert!(edits.replace(4..6, "y").is_err());
        assert!(edits.replace(0..3, "y").is_err());
        assert!(edits.replace(2..5, "y").is_err());
        assert!(edits.replace(8..11, "y").is_err());
        edits.replace(5..6, "z").unwrap();
        edits.replace(0..2, "w").unwrap();
        assert_eq!(edits.apply("0123456789"), "wxz6789");
    }
}
