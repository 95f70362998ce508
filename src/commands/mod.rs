pub mod align;
pub mod excise;
pub mod generate;
pub mod locate;

pub use locate::Report;

use crate::cli::{InputArgs, SearchArgs};
use crate::oligo::Oligo;
use crate::search::{MatchMode, SearchParams};
use crate::utils::{read_sequence, Result};

/// Loads the source and query named on the command line
pub(crate) fn load_input(input: &InputArgs) -> Result<(Oligo, Oligo)> {
    let raw_source = match (&input.source.sequence, &input.source.path) {
        (Some(seq), _) => seq.clone(),
        (None, Some(path)) => read_sequence(path)?,
        (None, None) => return Err("No source sequence given".into()),
    };
    let source = Oligo::new_with_wildcard(&raw_source, input.wildcard)?;
    let query = Oligo::new_with_wildcard(&input.query, input.wildcard)?;
    log::debug!(
        "Source length {}, query {} (length {})",
        source.len(),
        query,
        query.len()
    );
    Ok((source, query))
}

/// Indel-aware matching as soon as any indel bound is given
pub(crate) fn match_mode(search: &SearchArgs, query: &Oligo) -> MatchMode {
    if search.max_ins.is_none() && search.max_del.is_none() {
        return MatchMode::Fuzzy {
            mismatches: search.mismatches,
        };
    }
    let max_ins = search.max_ins.unwrap_or(0);
    let max_del = search.max_del.unwrap_or(0);
    let min_key_len = search
        .min_key_len
        .unwrap_or_else(|| query.len().saturating_sub(max_del));
    MatchMode::Indel(
        SearchParams::new(search.mismatches, max_ins, max_del, min_key_len)
            .with_scoring(search.aln_scoring),
    )
}
