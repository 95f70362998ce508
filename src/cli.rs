use crate::commands::Report;
use crate::search::{ExciseOp, SwScoring};
use crate::utils::Result;
use chrono::Datelike;
use clap::{ArgAction, Args, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="oligomatch",
          version=&**FULL_VERSION,
          about="Approximate oligo search tolerating mismatches, insertions and deletions",
          long_about = None,
          disable_help_subcommand = true,
          after_help = format!("Copyright (C) {}     oligomatch developers", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Report match coordinates of a query")]
    Locate(LocateArgs),
    #[clap(about = "Align a query locally and print the key found in the source")]
    Align(AlignArgs),
    #[clap(about = "Cut the source around the first match of a query")]
    Excise(ExciseArgs),
    #[clap(about = "Generate a random oligo")]
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SourceInput {
    #[clap(short = 's')]
    #[clap(long = "source")]
    #[clap(help = "Source sequence")]
    #[clap(value_name = "SEQUENCE")]
    pub sequence: Option<String>,

    #[clap(short = 'f')]
    #[clap(long = "source-file")]
    #[clap(help = "Plain or FASTA file (optionally gzipped) holding the source sequence")]
    #[clap(value_name = "FILE")]
    #[arg(value_parser = check_file_exists)]
    pub path: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InputArgs {
    #[command(flatten)]
    pub source: SourceInput,

    #[clap(required = true)]
    #[clap(short = 'q')]
    #[clap(long = "query")]
    #[clap(help = "Query sequence")]
    #[clap(value_name = "QUERY")]
    pub query: String,

    #[clap(long = "wildcard")]
    #[clap(value_name = "SYMBOL")]
    #[clap(help = "Symbol matching any base")]
    #[clap(default_value = "N")]
    #[arg(value_parser = parse_wildcard)]
    pub wildcard: u8,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    #[clap(short = 'm')]
    #[clap(long = "mismatches")]
    #[clap(value_name = "MISMATCHES")]
    #[clap(help = "Maximum number of mismatches")]
    #[clap(default_value = "0")]
    pub mismatches: usize,

    #[clap(help_heading("Indels"))]
    #[clap(long = "max-ins")]
    #[clap(value_name = "INS")]
    #[clap(help = "Maximum insertions in the source; enables indel-aware search")]
    pub max_ins: Option<usize>,

    #[clap(help_heading("Indels"))]
    #[clap(long = "max-del")]
    #[clap(value_name = "DEL")]
    #[clap(help = "Maximum deletions in the source; enables indel-aware search")]
    pub max_del: Option<usize>,

    #[clap(help_heading("Indels"))]
    #[clap(long = "min-key-len")]
    #[clap(value_name = "LEN")]
    #[clap(help = "Minimum length of the found key [default: query length - max deletions]")]
    pub min_key_len: Option<usize>,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "aln-scoring")]
    #[clap(value_name = "SCORING")]
    #[clap(help = "Local alignment scoring (non-negative values): MATCH,MISM,GAPO,GAPE")]
    #[clap(default_value = "1,0.3,1,0.3")]
    #[arg(value_parser = scoring_from_string)]
    pub aln_scoring: SwScoring,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct LocateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub search: SearchArgs,

    #[clap(long = "report")]
    #[clap(value_name = "REPORT")]
    #[clap(help = "Coordinates to report (all, first or last)")]
    #[clap(default_value = "all")]
    pub report: Report,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads for indel-aware search")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct AlignArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[clap(long = "max-ins")]
    #[clap(value_name = "INS")]
    #[clap(help = "Maximum insertions in the source")]
    #[clap(default_value = "0")]
    pub max_ins: usize,

    #[clap(long = "max-del")]
    #[clap(value_name = "DEL")]
    #[clap(help = "Maximum deletions in the source")]
    #[clap(default_value = "0")]
    pub max_del: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "aln-scoring")]
    #[clap(value_name = "SCORING")]
    #[clap(help = "Local alignment scoring (non-negative values): MATCH,MISM,GAPO,GAPE")]
    #[clap(default_value = "1,0.3,1,0.3")]
    #[arg(value_parser = scoring_from_string)]
    pub aln_scoring: SwScoring,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct ExciseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub search: SearchArgs,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "op")]
    #[clap(value_name = "OP")]
    #[clap(help = "Excision: left-from, left-of, right-from, right-of, extract or splice-out")]
    pub op: ExciseOp,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct GenerateArgs {
    #[clap(required = true)]
    #[clap(short = 'l')]
    #[clap(long = "length")]
    #[clap(value_name = "LENGTH")]
    #[clap(help = "Length of the oligo")]
    pub length: usize,

    #[clap(long = "seed")]
    #[clap(value_name = "SEED")]
    #[clap(help = "Seed for reproducible output")]
    pub seed: Option<u64>,

    #[clap(long = "mutate")]
    #[clap(value_name = "PERCENT")]
    #[clap(help = "Probability in percent of substituting one random base")]
    #[clap(default_value = "0")]
    #[arg(value_parser = percent_in_range)]
    pub mutate_percent: u8,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn percent_in_range(s: &str) -> Result<u8> {
    let percent: u8 = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid percentage", s))?;
    if percent <= 100 {
        Ok(percent)
    } else {
        Err(format!("Percentage must be at most 100, got: {}", percent))
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn parse_wildcard(s: &str) -> Result<u8> {
    match s.as_bytes() {
        [symbol] if symbol.is_ascii_alphabetic() => Ok(symbol.to_ascii_uppercase()),
        _ => Err(format!("Wildcard must be a single letter, got: {}", s)),
    }
}

fn scoring_from_string(s: &str) -> Result<SwScoring> {
    const NUM_EXPECTED_VALUES: usize = 4;
    let values: Vec<f64> = s.split(',').filter_map(|x| x.trim().parse().ok()).collect();
    if values.len() != NUM_EXPECTED_VALUES {
        return Err(format!(
            "Expected {} comma-separated values in scoring. Got {} -> {}",
            NUM_EXPECTED_VALUES,
            values.len(),
            s
        ));
    }

    if values.iter().any(|&val| val < 0.0 || !val.is_finite()) {
        return Err(format!(
            "Negative values are not allowed in scoring. Got {}.",
            s
        ));
    }

    Ok(SwScoring {
        match_scr: values[0],
        mism_scr: values[1],
        gapo_scr: values[2],
        gape_scr: values[3],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_scoring() {
        assert_eq!(scoring_from_string("1,0.3,1,0.3"), Ok(SwScoring::default()));
    }

    #[test]
    fn parse_scoring_wrong_arity_err() {
        assert_eq!(
            scoring_from_string("1,0.3,1"),
            Err("Expected 4 comma-separated values in scoring. Got 3 -> 1,0.3,1".to_string())
        );
    }

    #[test]
    fn parse_scoring_negative_err() {
        assert!(scoring_from_string("1,-0.3,1,0.3").is_err());
    }

    #[test]
    fn parse_wildcard_symbol() {
        assert_eq!(parse_wildcard("x"), Ok(b'X'));
        assert!(parse_wildcard("xy").is_err());
        assert!(parse_wildcard("1").is_err());
    }

    #[test]
    fn threads_must_be_positive() {
        assert_eq!(threads_in_range("4"), Ok(4));
        assert!(threads_in_range("0").is_err());
        assert!(threads_in_range("many").is_err());
    }

    #[test]
    fn locate_args_parse() {
        let cli = Cli::try_parse_from([
            "oligomatch", "locate", "-s", "ACGTACGTAC", "-q", "ACGT", "--max-ins", "1", "--report", "first",
        ])
        .unwrap();
        match cli.command {
            Command::Locate(args) => {
                assert_eq!(args.input.source.sequence.as_deref(), Some("ACGTACGTAC"));
                assert_eq!(args.search.max_ins, Some(1));
                assert_eq!(args.search.max_del, None);
                assert_eq!(args.report, Report::First);
                assert_eq!(args.num_threads, 1);
            }
            _ => panic!("Expected locate command"),
        }
    }

    #[test]
    fn source_inputs_are_exclusive() {
        assert!(Cli::try_parse_from([
            "oligomatch", "locate", "-s", "ACGT", "-f", "Cargo.toml", "-q", "ACGT",
        ])
        .is_err());
        assert!(Cli::try_parse_from(["oligomatch", "locate", "-q", "ACGT"]).is_err());
    }
}
