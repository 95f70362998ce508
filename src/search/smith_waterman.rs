//! Gapped local alignment used to recover the "key": the form of the query
//! that actually occurs in the source once insertions and deletions are
//! accounted for.
//!
//! The recurrence is a Smith–Waterman variant that rescans every gap length
//! instead of keeping affine gap matrices, so a single call costs
//! O(L·N·(L+N)) time and O(L·N) memory for a query of length L against a
//! source of length N.

use crate::oligo::Oligo;
use crate::utils::OligoError;

/// Placeholder occupying index 0 of the padded query and source
const SENTINEL: u8 = b'#';

/// Alignment scores. Penalties are given as non-negative magnitudes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwScoring {
    pub match_scr: f64,
    pub mism_scr: f64,
    pub gapo_scr: f64,
    pub gape_scr: f64,
}

impl Default for SwScoring {
    fn default() -> Self {
        Self {
            match_scr: 1.0,
            mism_scr: 0.3,
            gapo_scr: 1.0,
            gape_scr: 0.3,
        }
    }
}

impl SwScoring {
    /// Cost of skipping `gap_len` symbols; evaluated in f64 and narrowed once
    fn gap_cost(&self, gap_len: usize) -> f32 {
        (self.gapo_scr + self.gape_scr * gap_len as f64) as f32
    }
}

/// Maximum numbers of insertions and deletions in the source relative to the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndelBounds {
    pub max_ins: usize,
    pub max_del: usize,
}

impl IndelBounds {
    pub fn new(max_ins: usize, max_del: usize) -> Self {
        Self { max_ins, max_del }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwAlignment {
    /// Query as found in the source; source insertions appear as wildcards
    pub key: Oligo,
    pub ins_in_source: usize,
    pub del_in_source: usize,
    /// Score of the cell the traceback started from
    pub score: f32,
}

struct ScoreMatrix {
    ncols: usize,
    cells: Vec<f32>,
}

impl ScoreMatrix {
    fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            ncols,
            cells: vec![0.0; nrows * ncols],
        }
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> f32 {
        self.cells[i * self.ncols + j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, score: f32) {
        self.cells[i * self.ncols + j] = score;
    }
}

fn padded_upper(seq: &Oligo) -> Vec<u8> {
    std::iter::once(SENTINEL)
        .chain(seq.as_bytes().iter().map(|b| b.to_ascii_uppercase()))
        .collect()
}

/// Aligns `query` locally against `source` and reconstructs the key.
///
/// Fails with [`OligoError::NoMatch`] when no cell scores above zero or when
/// the traceback needs more insertions or deletions than `bounds` allow.
pub fn smith_waterman(
    source: &Oligo,
    query: &Oligo,
    bounds: IndelBounds,
    scoring: &SwScoring,
) -> Result<SwAlignment, OligoError> {
    let s = padded_upper(source);
    let q = padded_upper(query);

    // One spare row and column beyond the padded sequences are never scored
    let mut matrix = ScoreMatrix::new(q.len() + 1, s.len() + 1);
    let gap_costs: Vec<f32> = (0..=q.len().max(s.len()))
        .map(|gap_len| scoring.gap_cost(gap_len))
        .collect();
    let match_scr = scoring.match_scr as f32;
    let mism_scr = -(scoring.mism_scr as f32);

    let mut max = 0f32;
    let (mut imax, mut jmax) = (0, 0);
    for i in 1..q.len() {
        for j in 1..s.len() {
            let diag_scr = if q[i] == s[j] { match_scr } else { mism_scr };
            let mut best = matrix.get(i - 1, j - 1) + diag_scr;

            for gap in 0..=i {
                let score = matrix.get(i - gap, j) - gap_costs[gap];
                if score > best {
                    best = score;
                }
            }
            for gap in 0..=j {
                let score = matrix.get(i, j - gap) - gap_costs[gap];
                if score > best {
                    best = score;
                }
            }

            let cell = if best > 0.0 { best } else { 0.0 };
            matrix.set(i, j, cell);
            if cell > max {
                max = cell;
                imax = i;
                jmax = j;
            }
        }
    }

    if max <= 0.0 {
        log::trace!("No positive alignment score for {} in {}", query, source);
        return Err(OligoError::NoMatch);
    }
    log::trace!("Alignment anchor ({}, {}) score {}", imax, jmax, max);

    let (mut i, mut j) = (imax, jmax);
    let mut ins_in_source = 0;
    let mut del_in_source = 0;
    // Built back to front
    let mut key = vec![q[i]];
    loop {
        let above = matrix.get(i - 1, j);
        let diag = matrix.get(i - 1, j - 1);
        let left = matrix.get(i, j - 1);

        if diag >= above && diag >= left {
            i -= 1;
            j -= 1;
            if i > 0 {
                key.push(q[i]);
            }
        } else if above >= left {
            i -= 1;
            del_in_source += 1;
        } else {
            j -= 1;
            key.push(source.wildcard());
            ins_in_source += 1;
        }

        if matrix.get(i, j) <= 0.0 {
            break;
        }
    }
    key.reverse();

    if ins_in_source > bounds.max_ins || del_in_source > bounds.max_del {
        log::trace!(
            "Traceback needs {} insertions and {} deletions, allowed {} and {}",
            ins_in_source,
            del_in_source,
            bounds.max_ins,
            bounds.max_del
        );
        return Err(OligoError::NoMatch);
    }

    Ok(SwAlignment {
        key: Oligo::from_bases(key, source.wildcard()),
        ins_in_source,
        del_in_source,
        score: max,
    })
}
