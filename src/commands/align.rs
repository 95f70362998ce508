use super::load_input;
use crate::cli::AlignArgs;
use crate::search::{smith_waterman, IndelBounds};
use crate::utils::Result;

pub fn align(args: AlignArgs) -> Result<()> {
    let (source, query) = load_input(&args.input)?;
    let bounds = IndelBounds::new(args.max_ins, args.max_del);
    let alignment = smith_waterman(&source, &query, bounds, &args.aln_scoring)?;
    log::debug!(
        "Key {} with {} insertions and {} deletions",
        alignment.key,
        alignment.ins_in_source,
        alignment.del_in_source
    );
    println!(
        "{}\t{}\t{}\t{}",
        alignment.key, alignment.ins_in_source, alignment.del_in_source, alignment.score
    );
    Ok(())
}
