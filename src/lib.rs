pub mod cli;
pub mod commands;
pub mod oligo;
pub mod search;
pub mod utils;
