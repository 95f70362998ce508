use clap::Parser;
use oligomatch::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{align, excise, generate, locate},
    utils::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Locate(_) => "locate",
        Command::Align(_) => "align",
        Command::Excise(_) => "excise",
        Command::Generate(_) => "generate",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Locate(args) => locate::locate(args)?,
        Command::Align(args) => align::align(args)?,
        Command::Excise(args) => excise::excise(args)?,
        Command::Generate(args) => generate::generate(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
