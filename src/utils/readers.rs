use super::Result;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read as ioRead};
use std::path::Path;

pub fn open_sequence_reader(path: &Path) -> Result<BufReader<Box<dyn ioRead>>> {
    fn is_gzipped(path: &Path) -> bool {
        let path_str = path.to_string_lossy().to_lowercase();
        path_str.ends_with(".gz") || path_str.ends_with(".gzip")
    }
    let file = File::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(BufReader::new(Box::new(gz_decoder)))
        } else {
            Err(format!("Invalid gzip header: {}", path.to_string_lossy()))
        }
    } else {
        Ok(BufReader::new(Box::new(file)))
    }
}

/// Reads the first record of a plain or FASTA sequence file.
///
/// Header lines (`>`) and whitespace are skipped; reading stops at the header
/// of the second record.
pub fn read_sequence(path: &Path) -> Result<String> {
    let reader = open_sequence_reader(path)?;
    let mut sequence = String::new();
    let mut seen_header = false;
    for line in reader.lines() {
        let line = line.map_err(|e| format!("{}: {}", path.display(), e))?;
        let line = line.trim();
        if line.starts_with('>') {
            if seen_header || !sequence.is_empty() {
                break;
            }
            seen_header = true;
            continue;
        }
        sequence.extend(line.chars().filter(|c| !c.is_whitespace()));
    }
    if sequence.is_empty() {
        return Err(format!("No sequence found in {}", path.display()));
    }
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    #[test]
    fn read_plain_sequence_joins_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ACGT\nacgt\n  TTGG ").unwrap();
        assert_eq!(read_sequence(file.path()).unwrap(), "ACGTacgtTTGG");
    }

    #[test]
    fn read_fasta_keeps_first_record() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">first\nACGT\nAC\n>second\nTTTT").unwrap();
        assert_eq!(read_sequence(file.path()).unwrap(), "ACGTAC");
    }

    #[test]
    fn read_gzipped_fasta() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seq.fa.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b">seq\nGATTACA\n").unwrap();
        encoder.finish().unwrap();
        assert_eq!(read_sequence(&path).unwrap(), "GATTACA");
    }

    #[test]
    fn read_empty_file_err() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = read_sequence(file.path()).unwrap_err();
        assert!(err.starts_with("No sequence found in"));
    }

    #[test]
    fn open_missing_file_err() {
        assert!(open_sequence_reader(Path::new("/definitely/not/here.fa")).is_err());
    }
}
