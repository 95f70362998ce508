use super::{load_input, match_mode};
use crate::cli::LocateArgs;
use crate::search::{
    all_indel_match_coords, all_match_coords, first_indel_match_coord, first_match_coord,
    last_indel_match_coord, last_match_coord, MatchMode,
};
use crate::utils::Result;
use rayon::ThreadPoolBuilder;
use std::io::{BufWriter, Write};
use std::str::FromStr;

/// Which coordinates `locate` prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    All,
    First,
    Last,
}

impl FromStr for Report {
    type Err = &'static str;
    fn from_str(report: &str) -> std::result::Result<Self, Self::Err> {
        match report {
            "all" => Ok(Report::All),
            "first" => Ok(Report::First),
            "last" => Ok(Report::Last),
            _ => Err("Invalid report. Options are: all, first, last"),
        }
    }
}

pub fn locate(args: LocateArgs) -> Result<()> {
    let (source, query) = load_input(&args.input)?;

    let coords: Vec<usize> = match match_mode(&args.search, &query) {
        MatchMode::Fuzzy { mismatches } => match args.report {
            Report::All => all_match_coords(&source, &query, mismatches),
            Report::First => first_match_coord(&source, &query, mismatches)
                .into_iter()
                .collect(),
            Report::Last => last_match_coord(&source, &query, mismatches)
                .into_iter()
                .collect(),
        },
        MatchMode::Indel(params) => {
            log::debug!(
                "Initializing thread pool with {} threads...",
                args.num_threads
            );
            let pool = initialize_thread_pool(args.num_threads)?;
            pool.install(|| match args.report {
                Report::All => all_indel_match_coords(&source, &query, &params),
                Report::First => first_indel_match_coord(&source, &query, &params)
                    .into_iter()
                    .collect(),
                Report::Last => last_indel_match_coord(&source, &query, &params)
                    .into_iter()
                    .collect(),
            })
        }
    };

    if coords.is_empty() {
        log::info!("No match found for {}", query);
    }

    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    for coord in &coords {
        writeln!(writer, "{}", coord).map_err(|e| format!("Failed to write output: {}", e))?;
    }
    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;
    Ok(())
}

fn initialize_thread_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("oligomatch-{}", i))
        .start_handler(|_thread_index| {
            log::trace!("Initialized thread {:?}", std::thread::current().id());
        })
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))
}
