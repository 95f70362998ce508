use super::{is_fuzzy_match, smith_waterman, IndelBounds, SwAlignment, SwScoring};
use crate::oligo::Oligo;
use crate::utils::OligoError;

/// Tolerances for mismatch- and indel-aware searches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub mismatches: usize,
    pub indels: IndelBounds,
    /// Shortest key accepted as a match
    pub min_key_len: usize,
    pub scoring: SwScoring,
}

impl SearchParams {
    pub fn new(mismatches: usize, max_ins: usize, max_del: usize, min_key_len: usize) -> Self {
        Self {
            mismatches,
            indels: IndelBounds::new(max_ins, max_del),
            min_key_len,
            scoring: SwScoring::default(),
        }
    }

    pub fn with_scoring(mut self, scoring: SwScoring) -> Self {
        self.scoring = scoring;
        self
    }
}

/// Aligns `query` against `source` and validates the resulting key.
///
/// The key is accepted when it fuzzy-matches `source` within the mismatch
/// budget and is at least `min_key_len` long. Both a failed alignment and a
/// rejected key are reported as [`OligoError::NoMatch`].
pub fn composite_match(
    source: &Oligo,
    query: &Oligo,
    params: &SearchParams,
) -> Result<SwAlignment, OligoError> {
    let alignment = smith_waterman(source, query, params.indels, &params.scoring)?;
    if alignment.key.len() >= params.min_key_len
        && is_fuzzy_match(source, &alignment.key, params.mismatches)
    {
        Ok(alignment)
    } else {
        Err(OligoError::NoMatch)
    }
}

pub fn is_composite_match(source: &Oligo, query: &Oligo, params: &SearchParams) -> bool {
    composite_match(source, query, params).is_ok()
}
