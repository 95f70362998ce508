use super::{composite_match, first_indel_match_coord, first_match_coord, SearchParams};
use crate::oligo::Oligo;
use crate::utils::OligoError;
use std::str::FromStr;

/// How a query is located before cutting
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchMode {
    /// Equal-length windows with a mismatch budget
    Fuzzy { mismatches: usize },
    /// Insertions and deletions allowed on top of the mismatch budget
    Indel(SearchParams),
}

impl MatchMode {
    fn mismatches(&self) -> usize {
        match self {
            MatchMode::Fuzzy { mismatches } => *mismatches,
            MatchMode::Indel(params) => params.mismatches,
        }
    }
}

/// First located occurrence: start offset and length of the matched region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub start: usize,
    pub len: usize,
}

impl Hit {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Locates the first occurrence of `query` in `source`.
///
/// In indel mode the query is first turned into its key, which is then looked
/// up like an ordinary fuzzy query; the hit spans the key's length.
pub fn locate_first(
    source: &Oligo,
    query: &Oligo,
    mode: &MatchMode,
) -> Result<Hit, OligoError> {
    let key = match mode {
        MatchMode::Fuzzy { .. } => query.clone(),
        MatchMode::Indel(params) => composite_match(source, query, params)?.key,
    };
    let start = first_match_coord(source, &key, mode.mismatches()).ok_or(OligoError::NoMatch)?;
    Ok(Hit {
        start,
        len: key.len(),
    })
}

/// First start offset reported by the coordinate scanner for `mode`.
///
/// In indel mode the length is that of the composite key aligned against the
/// whole source, which need not be the occurrence found at `start`.
pub fn scan_first(source: &Oligo, query: &Oligo, mode: &MatchMode) -> Result<Hit, OligoError> {
    match mode {
        MatchMode::Fuzzy { mismatches } => {
            let start = first_match_coord(source, query, *mismatches).ok_or(OligoError::NoMatch)?;
            Ok(Hit {
                start,
                len: query.len(),
            })
        }
        MatchMode::Indel(params) => {
            let key = composite_match(source, query, params)?.key;
            let start =
                first_indel_match_coord(source, query, params).ok_or(OligoError::NoMatch)?;
            Ok(Hit {
                start,
                len: key.len(),
            })
        }
    }
}

fn scan_first_start(
    source: &Oligo,
    query: &Oligo,
    mode: &MatchMode,
) -> Result<usize, OligoError> {
    match mode {
        MatchMode::Fuzzy { .. } => scan_first(source, query, mode).map(|hit| hit.start),
        MatchMode::Indel(params) => {
            first_indel_match_coord(source, query, params).ok_or(OligoError::NoMatch)
        }
    }
}

/// Cut applied around a located query.
///
/// `LeftFrom`, `Extract` and `SpliceOut` cut at [`locate_first`]; `LeftOf`,
/// `RightFrom` and `RightOf` cut at [`scan_first`]. The two agree in fuzzy
/// mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExciseOp {
    /// Drop everything up to and including the match
    LeftFrom,
    /// Drop everything before the match
    LeftOf,
    /// Drop the match and everything after it
    RightFrom,
    /// Drop everything after the match
    RightOf,
    /// Keep only the match
    Extract,
    /// Remove the match and join the flanks
    SpliceOut,
}

impl FromStr for ExciseOp {
    type Err = &'static str;
    fn from_str(op: &str) -> Result<Self, Self::Err> {
        match op {
            "left-from" => Ok(ExciseOp::LeftFrom),
            "left-of" => Ok(ExciseOp::LeftOf),
            "right-from" => Ok(ExciseOp::RightFrom),
            "right-of" => Ok(ExciseOp::RightOf),
            "extract" => Ok(ExciseOp::Extract),
            "splice-out" => Ok(ExciseOp::SpliceOut),
            _ => Err(
                "Invalid excision. Options are: left-from, left-of, right-from, right-of, extract, splice-out",
            ),
        }
    }
}

impl ExciseOp {
    pub fn apply(
        self,
        source: &Oligo,
        query: &Oligo,
        mode: &MatchMode,
    ) -> Result<Oligo, OligoError> {
        let excised = match self {
            ExciseOp::LeftFrom => {
                let hit = locate_first(source, query, mode)?;
                source.subsequence(hit.end()..source.len())
            }
            ExciseOp::LeftOf => {
                let start = scan_first_start(source, query, mode)?;
                source.subsequence(start..source.len())
            }
            ExciseOp::RightFrom => {
                let start = scan_first_start(source, query, mode)?;
                source.subsequence(0..start)
            }
            ExciseOp::RightOf => {
                let hit = scan_first(source, query, mode)?;
                source.subsequence(0..hit.end().min(source.len()))
            }
            ExciseOp::Extract => {
                let hit = locate_first(source, query, mode)?;
                source.subsequence(hit.start..hit.end())
            }
            ExciseOp::SpliceOut => {
                let hit = locate_first(source, query, mode)?;
                source
                    .subsequence(0..hit.start)
                    .ligate(&source.subsequence(hit.end()..source.len()))
            }
        };
        Ok(excised)
    }
}

pub fn excise_left_from(
    source: &Oligo,
    query: &Oligo,
    mode: &MatchMode,
) -> Result<Oligo, OligoError> {
    ExciseOp::LeftFrom.apply(source, query, mode)
}

pub fn excise_left_of(
    source: &Oligo,
    query: &Oligo,
    mode: &MatchMode,
) -> Result<Oligo, OligoError> {
    ExciseOp::LeftOf.apply(source, query, mode)
}

pub fn excise_right_from(
    source: &Oligo,
    query: &Oligo,
    mode: &MatchMode,
) -> Result<Oligo, OligoError> {
    ExciseOp::RightFrom.apply(source, query, mode)
}

pub fn excise_right_of(
    source: &Oligo,
    query: &Oligo,
    mode: &MatchMode,
) -> Result<Oligo, OligoError> {
    ExciseOp::RightOf.apply(source, query, mode)
}

pub fn extract_match(
    source: &Oligo,
    query: &Oligo,
    mode: &MatchMode,
) -> Result<Oligo, OligoError> {
    ExciseOp::Extract.apply(source, query, mode)
}

pub fn splice_out_match(
    source: &Oligo,
    query: &Oligo,
    mode: &MatchMode,
) -> Result<Oligo, OligoError> {
    ExciseOp::SpliceOut.apply(source, query, mode)
}

/// Inclusive end coordinate of the first match
pub fn last_index(source: &Oligo, query: &Oligo, mode: &MatchMode) -> Option<usize> {
    locate_first(source, query, mode)
        .ok()
        .and_then(|hit| hit.end().checked_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oligo(seq: &str) -> Oligo {
        Oligo::new(seq).unwrap()
    }

    const EXACT: MatchMode = MatchMode::Fuzzy { mismatches: 0 };

    #[test]
    fn fuzzy_excisions() {
        let source = oligo("GGACGTCC");
        let query = oligo("ACGT");
        let cut = |op: ExciseOp| op.apply(&source, &query, &EXACT).unwrap().to_string();
        assert_eq!(cut(ExciseOp::LeftFrom), "CC");
        assert_eq!(cut(ExciseOp::LeftOf), "ACGTCC");
        assert_eq!(cut(ExciseOp::RightFrom), "GG");
        assert_eq!(cut(ExciseOp::RightOf), "GGACGT");
        assert_eq!(cut(ExciseOp::Extract), "ACGT");
        assert_eq!(cut(ExciseOp::SpliceOut), "GGCC");
        assert_eq!(last_index(&source, &query, &EXACT), Some(5));
    }

    #[test]
    fn excision_uses_first_hit() {
        let source = oligo("ACGTTTACGT");
        let query = oligo("ACGT");
        assert_eq!(excise_left_from(&source, &query, &EXACT).unwrap().to_string(), "TTACGT");
        assert_eq!(excise_right_from(&source, &query, &EXACT).unwrap().to_string(), "");
    }

    #[test]
    fn mismatch_tolerant_extraction() {
        let source = oligo("TTTTGACCTTTT");
        let mode = MatchMode::Fuzzy { mismatches: 1 };
        assert_eq!(
            extract_match(&source, &oligo("GACG"), &mode).unwrap().to_string(),
            "GACC"
        );
    }

    #[test]
    fn missing_query_err() {
        let source = oligo("TTTTTTTT");
        let query = oligo("GGG");
        assert_eq!(excise_left_of(&source, &query, &EXACT), Err(OligoError::NoMatch));
        assert_eq!(splice_out_match(&source, &query, &EXACT), Err(OligoError::NoMatch));
        assert_eq!(last_index(&source, &query, &EXACT), None);
    }

    #[test]
    fn indel_excisions_span_key() {
        let source = oligo("GGGGACGTTACGTCCCC");
        let query = oligo("ACGTACGT");
        let mode = MatchMode::Indel(SearchParams::new(0, 1, 0, 8));
        assert_eq!(
            locate_first(&source, &query, &mode),
            Ok(Hit { start: 4, len: 9 })
        );
        assert_eq!(extract_match(&source, &query, &mode).unwrap().to_string(), "ACGTTACGT");
        assert_eq!(excise_right_of(&source, &query, &mode).unwrap().to_string(), "GGGGACGTTACGT");
        assert_eq!(splice_out_match(&source, &query, &mode).unwrap().to_string(), "GGGGCCCC");
    }

    #[test]
    fn indel_scan_drives_left_and_right_cuts() {
        // A one-deletion copy at 0 precedes an exact copy at 12
        let source = oligo("GATCAGGATTTTGATCCAGGA");
        let query = oligo("GATCCAGGA");
        let mode = MatchMode::Indel(SearchParams::new(0, 0, 1, 8));
        assert_eq!(scan_first(&source, &query, &mode), Ok(Hit { start: 0, len: 9 }));
        assert_eq!(
            locate_first(&source, &query, &mode),
            Ok(Hit { start: 12, len: 9 })
        );
        assert_eq!(excise_left_of(&source, &query, &mode).unwrap(), source);
        assert!(excise_right_from(&source, &query, &mode).unwrap().is_empty());
        assert_eq!(
            excise_right_of(&source, &query, &mode).unwrap().to_string(),
            "GATCAGGAT"
        );
        assert!(excise_left_from(&source, &query, &mode).unwrap().is_empty());
        assert_eq!(
            extract_match(&source, &query, &mode).unwrap().to_string(),
            "GATCCAGGA"
        );
    }

    #[test]
    fn indel_excision_rejected_key_err() {
        let source = oligo("GGGGACGTTACGTCCCC");
        let mode = MatchMode::Indel(SearchParams::new(0, 0, 0, 8));
        assert_eq!(
            excise_left_from(&source, &oligo("ACGTACGT"), &mode),
            Err(OligoError::NoMatch)
        );
    }

    #[test]
    fn parse_excise_op() {
        assert_eq!("left-of".parse::<ExciseOp>(), Ok(ExciseOp::LeftOf));
        assert!("middle".parse::<ExciseOp>().is_err());
    }
}
