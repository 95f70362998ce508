use super::{load_input, match_mode};
use crate::cli::ExciseArgs;
use crate::utils::Result;

pub fn excise(args: ExciseArgs) -> Result<()> {
    let (source, query) = load_input(&args.input)?;
    let mode = match_mode(&args.search, &query);
    log::debug!("Excising {:?} around {} using {:?}", args.op, query, mode);
    let excised = args.op.apply(&source, &query, &mode)?;
    println!("{}", excised);
    Ok(())
}
