mod composite;
mod coords;
mod excise;
mod fuzzy;
mod smith_waterman;

pub use composite::{composite_match, is_composite_match, SearchParams};
pub use coords::{
    all_indel_match_coords, all_match_coords, first_indel_match_coord, first_match_coord,
    last_indel_match_coord, last_match_coord,
};
pub use excise::{
    excise_left_from, excise_left_of, excise_right_from, excise_right_of, extract_match,
    last_index, locate_first, scan_first, splice_out_match, ExciseOp, Hit, MatchMode,
};
pub use fuzzy::{is_fuzzy_match, window_matches};
pub use smith_waterman::{smith_waterman, IndelBounds, SwAlignment, SwScoring};
