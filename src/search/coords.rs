use super::{
    fuzzy::{fuzzy_hits, window_starts},
    is_composite_match, is_fuzzy_match, smith_waterman, SearchParams,
};
use crate::oligo::Oligo;
use rayon::prelude::*;

/// Every start offset where `query` matches `source` with at most `mismatches`,
/// in increasing order. Overlapping hits are all reported.
pub fn all_match_coords(source: &Oligo, query: &Oligo, mismatches: usize) -> Vec<usize> {
    fuzzy_hits(source, query, mismatches).collect()
}

pub fn first_match_coord(source: &Oligo, query: &Oligo, mismatches: usize) -> Option<usize> {
    fuzzy_hits(source, query, mismatches).next()
}

pub fn last_match_coord(source: &Oligo, query: &Oligo, mismatches: usize) -> Option<usize> {
    fuzzy_hits(source, query, mismatches).last()
}

/// Checks the indel-aware match starting at `start`.
///
/// The window spans the query plus the allowed insertions; it is narrowed to
/// the key found by alignment, which must then pass the composite check
/// against the query and match the key itself.
fn indel_match_at(source: &Oligo, query: &Oligo, params: &SearchParams, start: usize) -> bool {
    let window_len = query.len() + params.indels.max_ins;
    let window = source.subsequence(start..start + window_len);
    let Ok(alignment) = smith_waterman(&window, query, params.indels, &params.scoring) else {
        return false;
    };
    let key_end = start + alignment.key.len();
    if key_end > source.len() {
        return false;
    }
    let narrowed = source.subsequence(start..key_end);
    is_composite_match(&narrowed, query, params)
        && is_fuzzy_match(&narrowed, &alignment.key, params.mismatches)
}

/// Indel-aware counterpart of [`all_match_coords`].
///
/// Offsets are evaluated in parallel on the current rayon pool; the result is
/// in increasing offset order. Each offset runs its own alignments, so the
/// cost per offset grows cubically with `query.len() + max_ins`.
pub fn all_indel_match_coords(source: &Oligo, query: &Oligo, params: &SearchParams) -> Vec<usize> {
    let starts = window_starts(source.len(), query.len() + params.indels.max_ins);
    log::debug!(
        "Scanning {} offsets for {} (mismatches={}, ins={}, del={}, min key={})",
        starts.len(),
        query,
        params.mismatches,
        params.indels.max_ins,
        params.indels.max_del,
        params.min_key_len
    );
    let hits: Vec<usize> = starts
        .into_par_iter()
        .filter(|&start| indel_match_at(source, query, params, start))
        .collect();
    debug_assert!(hits.windows(2).all(|w| w[0] < w[1]));
    log::debug!("Found {} indel-aware hits", hits.len());
    hits
}

pub fn first_indel_match_coord(
    source: &Oligo,
    query: &Oligo,
    params: &SearchParams,
) -> Option<usize> {
    window_starts(source.len(), query.len() + params.indels.max_ins)
        .into_par_iter()
        .find_first(|&start| indel_match_at(source, query, params, start))
}

pub fn last_indel_match_coord(
    source: &Oligo,
    query: &Oligo,
    params: &SearchParams,
) -> Option<usize> {
    window_starts(source.len(), query.len() + params.indels.max_ins)
        .into_par_iter()
        .find_last(|&start| indel_match_at(source, query, params, start))
}
