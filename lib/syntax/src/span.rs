use std::hash::{Hash, Hasher};

/// The byte range of a syntax element in the source text.
///
/// Spans are diagnostic metadata. Two spans always compare equal and hash identically, such that
/// two syntax trees that only differ in their source positions are equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct SourceSpan {
    pub start: usize,
    pub end: usize,
}

impl SourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl PartialEq for SourceSpan {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for SourceSpan {}

impl Hash for SourceSpan {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}
