use crate::oligo::Oligo;
use std::ops::Range;

/// Compares a source window with an equally long query.
///
/// Pairs involving the wildcard are excluded from scoring: they count neither
/// as a match nor as a mismatch, shrinking the effective comparison length.
/// The window is accepted when `matches >= len - max_mismatches - wildcard_pairs`.
#[inline]
pub fn window_matches(window: &[u8], query: &[u8], max_mismatches: usize, wildcard: u8) -> bool {
    debug_assert_eq!(window.len(), query.len());
    let wildcard = wildcard.to_ascii_uppercase();
    let mut nt_matches = 0;
    let mut wildcard_pairs = 0;
    for (s, q) in window.iter().zip(query) {
        let (s, q) = (s.to_ascii_uppercase(), q.to_ascii_uppercase());
        if s == wildcard || q == wildcard {
            wildcard_pairs += 1;
        } else if s == q {
            nt_matches += 1;
        }
    }
    nt_matches + wildcard_pairs + max_mismatches >= query.len()
}

/// Start offsets at which a window of `query_len` fits inside `source_len`
pub(crate) fn window_starts(source_len: usize, query_len: usize) -> Range<usize> {
    0..source_len
        .checked_sub(query_len)
        .map_or(0, |last_start| last_start + 1)
}

/// Left-to-right iterator over every start offset where `query` fuzzy-matches `source`
pub(crate) fn fuzzy_hits<'a>(
    source: &'a Oligo,
    query: &'a Oligo,
    max_mismatches: usize,
) -> impl Iterator<Item = usize> + 'a {
    let query_len = query.len();
    window_starts(source.len(), query_len).filter(move |&start| {
        window_matches(
            &source.as_bytes()[start..start + query_len],
            query.as_bytes(),
            max_mismatches,
            source.wildcard(),
        )
    })
}

/// True if any window of `source` matches `query` with at most `max_mismatches`.
///
/// Wildcards are those of `source`. A query longer than the source never matches.
pub fn is_fuzzy_match(source: &Oligo, query: &Oligo, max_mismatches: usize) -> bool {
    fuzzy_hits(source, query, max_mismatches).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oligo::random_oligo;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn oligo(seq: &str) -> Oligo {
        Oligo::new(seq).unwrap()
    }

    #[test]
    fn identical_window_matches_without_budget() {
        assert!(window_matches(b"ACGTACGT", b"ACGTACGT", 0, b'N'));
        assert!(window_matches(b"acgtACGT", b"ACGTacgt", 0, b'N'));
    }

    #[test]
    fn mismatch_budget_is_respected() {
        assert!(!window_matches(b"ACGTACGT", b"ACGAACGA", 1, b'N'));
        assert!(window_matches(b"ACGTACGT", b"ACGAACGA", 2, b'N'));
    }

    #[test]
    fn wildcard_pairs_shrink_comparison() {
        assert!(window_matches(b"ACGTNCGT", b"ACGTACGT", 0, b'N'));
        assert!(window_matches(b"ACGTACGT", b"ANNTACGT", 0, b'n'));
        assert!(window_matches(b"NNNN", b"ACGT", 0, b'N'));
        // N is an ordinary symbol once another wildcard is configured
        assert!(!window_matches(b"ACGTNCGT", b"ACGTACGT", 0, b'X'));
    }

    #[test]
    fn wildcard_never_turns_match_into_miss() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..500 {
            let len = rng.random_range(1..20);
            let window = random_oligo(&mut rng, len);
            let mut query = window.as_bytes().to_vec();
            for _ in 0..rng.random_range(0..4) {
                let i = rng.random_range(0..len);
                query[i] = b"ACGT"[rng.random_range(0..4)];
            }
            let budget = rng.random_range(0..3);
            if window_matches(window.as_bytes(), &query, budget, b'N') {
                let pos = rng.random_range(0..len);
                query[pos] = b'N';
                assert!(window_matches(window.as_bytes(), &query, budget, b'N'));
            }
        }
    }

    #[test]
    fn fuzzy_match_slides_over_source() {
        let source = oligo("TTTTACGTTTTT");
        assert!(is_fuzzy_match(&source, &oligo("ACGT"), 0));
        assert!(is_fuzzy_match(&source, &oligo("ACGA"), 1));
        assert!(!is_fuzzy_match(&source, &oligo("GGGG"), 1));
    }

    #[test]
    fn longer_query_never_matches() {
        assert!(!is_fuzzy_match(&oligo("ACG"), &oligo("ACGT"), 4));
    }

    #[test]
    fn empty_query_matches_everywhere() {
        let source = oligo("ACG");
        assert_eq!(fuzzy_hits(&source, &Oligo::empty(), 0).count(), 4);
    }

    #[test]
    fn source_wildcard_is_used() {
        let source = oligo("ACGTACGT").with_wildcard(b'G');
        assert!(is_fuzzy_match(&source, &oligo("ACTT"), 0));
        assert!(!is_fuzzy_match(&oligo("ACGTACGT"), &oligo("ACTT"), 0));
    }
}
