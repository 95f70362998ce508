mod error;
mod readers;

pub use error::{handle_error_and_exit, OligoError, Result};
pub use readers::{open_sequence_reader, read_sequence};
