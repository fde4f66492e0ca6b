//! Contains the definition of [`Spanned`], an AST wrapper providing span information.

use std::ops::Range;

use crate::macros::base;

/// A wrapper around a value that contains its byte span in the source text.
///
/// The translator rewrites source text by span, so every node that may be rewritten or copied
/// verbatim carries one.
#[apply(base)]
pub struct Spanned<T>(pub T, pub Range<usize>);

impl<T> Spanned<T> {
    /// Returns the span of the value.
    #[inline(always)]
    pub fn span(&self) -> Range<usize> {
        self.1.clone()
    }

    /// Returns the inner value.
    #[inline(always)]
    pub fn value(&self) -> &T {
        &self.0
    }

    /// Takes a closure and applies it to the inner value while preserving the span.
    #[inline(always)]
    pub fn map<F, O>(self, f: F) -> Spanned<O>
    where
        F: FnOnce(T) -> O,
    {
        let Spanned(value, span) = self;
        Spanned(f(value), span)
    }

    /// Returns the slice of `source` covered by this value.
    #[inline]
    pub fn source_text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.1.clone()).unwrap_or_default()
    }
}

/// Type alias for vectors of spanned values.
pub type VecSpanned<T> = Vec<Spanned<T>>;

/// Type alias for boxed spanned values.
pub type BoxSpanned<T> = Box<Spanned<T>>;

/// Type alias for optional spanned values.
pub type OptSpanned<T> = Option<Spanned<T>>;
