use std::fmt;

/// Application-level result; library errors are converted into their message.
pub type Result<T> = std::result::Result<T, String>;

pub fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}

/// Recoverable failures of the oligo and search layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OligoError {
    /// Search exhausted without satisfying the acceptance condition
    NoMatch,
    StartIndexOutOfBounds {
        start: isize,
    },
    EndIndexOutOfBounds {
        end: isize,
        len: usize,
    },
    BothIndicesOutOfBounds {
        start: isize,
        end: isize,
        len: usize,
    },
    /// Both bounds are valid but describe a negative-length range
    InvalidRange {
        start: isize,
        end: isize,
    },
    InvalidAlphabet {
        sequence: String,
    },
    CutSiteOutOfBounds {
        site: usize,
        len: usize,
    },
    EncodingOverflow {
        sequence: String,
    },
    /// No A, C, G or T to encode
    NothingToEncode {
        sequence: String,
    },
}

impl fmt::Display for OligoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OligoError::NoMatch => write!(f, "MatchNotFound"),
            OligoError::StartIndexOutOfBounds { start } => {
                write!(f, "StartIndexOutOfBounds: start {} < 0", start)
            }
            OligoError::EndIndexOutOfBounds { end, len } => {
                write!(f, "EndIndexOutOfBounds: end {} >= length {}", end, len)
            }
            OligoError::BothIndicesOutOfBounds { start, end, len } => write!(
                f,
                "BothIndicesOutOfBounds: start {} < 0 and end {} >= length {}",
                start, end, len
            ),
            OligoError::InvalidRange { start, end } => {
                write!(f, "Invalid range: start {} > end {} + 1", start, end)
            }
            OligoError::InvalidAlphabet { sequence } => write!(
                f,
                "Oligo cannot be created. Input [{}] contains invalid characters",
                sequence
            ),
            OligoError::CutSiteOutOfBounds { site, len } => write!(
                f,
                "Cut coordinate {} larger than last index of oligo of length {}",
                site, len
            ),
            OligoError::EncodingOverflow { sequence } => {
                write!(f, "Encoded value of [{}] does not fit in 64 bits", sequence)
            }
            OligoError::NothingToEncode { sequence } => {
                write!(f, "No nucleotides to encode in [{}]", sequence)
            }
        }
    }
}

impl std::error::Error for OligoError {}

impl From<OligoError> for String {
    fn from(err: OligoError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_message() {
        assert_eq!(OligoError::NoMatch.to_string(), "MatchNotFound");
    }

    #[test]
    fn converts_into_application_error() {
        fn fails() -> Result<()> {
            let extracted: std::result::Result<(), OligoError> =
                Err(OligoError::StartIndexOutOfBounds { start: -1 });
            extracted?;
            Ok(())
        }
        assert_eq!(
            fails(),
            Err("StartIndexOutOfBounds: start -1 < 0".to_string())
        );
    }
}
