//! Highlight overlay value types: categories, half-open text ranges, and per-pass buckets.

use crate::line_index::LineIndex;

/// The closed set of semantic categories this system highlights.
///
/// Anything a token legend or fixed code table cannot map into this set is unclassified
/// (`Option::None` at the classification seam) and dropped before output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticCategory {
    /// Variable symbols.
    Variable,
    /// Parameter symbols.
    Parameter,
    /// Function symbols.
    Function,
    /// Field / property symbols.
    Field,
    /// Struct / class symbols.
    Struct,
    /// Enum symbols.
    Enum,
    /// Enum member symbols.
    EnumMember,
    /// Type alias symbols.
    TypeAlias,
    /// Macro symbols.
    Macro,
}

/// All categories, in bucket order.
pub const SEMANTIC_CATEGORIES: &[SemanticCategory] = &[
    SemanticCategory::Variable,
    SemanticCategory::Parameter,
    SemanticCategory::Function,
    SemanticCategory::Field,
    SemanticCategory::Struct,
    SemanticCategory::Enum,
    SemanticCategory::EnumMember,
    SemanticCategory::TypeAlias,
    SemanticCategory::Macro,
];

impl SemanticCategory {
    /// Stable key string under which a frontend registers this category's overlay regions.
    pub fn overlay_key(self) -> &'static str {
        match self {
            SemanticCategory::Variable => "semantic_var",
            SemanticCategory::Parameter => "semantic_param",
            SemanticCategory::Function => "semantic_func",
            SemanticCategory::Field => "semantic_field",
            SemanticCategory::Struct => "semantic_struct",
            SemanticCategory::Enum => "semantic_enum",
            SemanticCategory::EnumMember => "semantic_enumfield",
            SemanticCategory::TypeAlias => "semantic_type",
            SemanticCategory::Macro => "semantic_macro",
        }
    }

    fn bucket_index(self) -> usize {
        match self {
            SemanticCategory::Variable => 0,
            SemanticCategory::Parameter => 1,
            SemanticCategory::Function => 2,
            SemanticCategory::Field => 3,
            SemanticCategory::Struct => 4,
            SemanticCategory::Enum => 5,
            SemanticCategory::EnumMember => 6,
            SemanticCategory::TypeAlias => 7,
            SemanticCategory::Macro => 8,
        }
    }
}

/// Half-open `[start, end)` range of character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl TextRange {
    /// Create a new range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Check if the range contains a position.
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Check if two ranges overlap.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Range length in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// `true` when the range covers nothing.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// One decode pass's highlight output: an ordered range sequence per category.
///
/// A bucket set is produced fresh on every pass and replaces the previous set as a whole
/// value. Ranges are appended in decode order and never merged or deduplicated; overlapping
/// ranges are the frontend's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightBuckets {
    buckets: [Vec<TextRange>; 9],
}

impl HighlightBuckets {
    /// Create an empty bucket set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a range to a category's bucket.
    pub fn push(&mut self, category: SemanticCategory, range: TextRange) {
        self.buckets[category.bucket_index()].push(range);
    }

    /// The ordered ranges collected for one category.
    pub fn ranges(&self, category: SemanticCategory) -> &[TextRange] {
        &self.buckets[category.bucket_index()]
    }

    /// Iterate `(category, ranges)` pairs in bucket order, including empty buckets.
    ///
    /// Frontends apply every bucket each pass: an empty bucket clears that category's
    /// previous overlay rather than leaving it in place.
    pub fn iter(&self) -> impl Iterator<Item = (SemanticCategory, &[TextRange])> {
        SEMANTIC_CATEGORIES
            .iter()
            .map(|category| (*category, self.ranges(*category)))
    }

    /// Total number of ranges across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// `true` when no bucket holds any range.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}

/// Line/column → character-offset conversion over the current document snapshot.
///
/// This is the seam between token decoding and the document: implementations decide the
/// column unit (the `LineIndex` impl takes character columns; protocol layers may wrap it
/// to accept wire units).
pub trait OffsetLookup {
    /// Returns the char offset for `(line, column)`, or `None` when the position does not
    /// exist in the snapshot - the signature of a stale document version.
    fn char_offset(&self, line: usize, column: usize) -> Option<usize>;
}

impl OffsetLookup for LineIndex {
    fn char_offset(&self, line: usize, column: usize) -> Option<usize> {
        let line_len = self.line_char_len(line)?;
        if column > line_len {
            return None;
        }
        Some(self.position_to_char_offset(line, column))
    }
}
