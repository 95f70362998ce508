//! Decimal digit encoding of nucleotide sequences: A=1, C=2, G=3, T=4.

use super::Oligo;
use crate::utils::OligoError;

fn digit(base: u8) -> Option<u64> {
    match base.to_ascii_uppercase() {
        b'A' => Some(1),
        b'C' => Some(2),
        b'G' => Some(3),
        b'T' => Some(4),
        _ => None,
    }
}

/// Encodes the nucleotides of `oligo` as a decimal number; other symbols are skipped.
///
/// Fails when nothing is left to encode or the value does not fit in a `u64`.
pub fn encode_to_u64(oligo: &Oligo) -> Result<u64, OligoError> {
    let mut digits = oligo.as_bytes().iter().filter_map(|&b| digit(b)).peekable();
    if digits.peek().is_none() {
        return Err(OligoError::NothingToEncode {
            sequence: oligo.to_string(),
        });
    }
    digits
        .try_fold(0u64, |acc, d| acc.checked_mul(10)?.checked_add(d))
        .ok_or_else(|| OligoError::EncodingOverflow {
            sequence: oligo.to_string(),
        })
}

/// Inverse of [`encode_to_u64`]; digits outside 1-4 are skipped.
pub fn decode_from_u64(value: u64) -> Oligo {
    let bases = value
        .to_string()
        .bytes()
        .filter_map(|d| match d {
            b'1' => Some(b'A'),
            b'2' => Some(b'C'),
            b'3' => Some(b'G'),
            b'4' => Some(b'T'),
            _ => None,
        })
        .collect();
    Oligo::from_bases(bases, super::DEFAULT_WILDCARD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_skips_wildcards() {
        let seq = Oligo::new("ACgtN").unwrap();
        assert_eq!(encode_to_u64(&seq), Ok(1234));
    }

    #[test]
    fn decode_encoded_value() {
        let seq = Oligo::new("TTGCA").unwrap();
        let value = encode_to_u64(&seq).unwrap();
        assert_eq!(value, 44321);
        assert_eq!(decode_from_u64(value), seq);
    }

    #[test]
    fn encode_without_nucleotides_err() {
        assert_eq!(
            encode_to_u64(&Oligo::new("NNN").unwrap()),
            Err(OligoError::NothingToEncode {
                sequence: "NNN".to_string()
            })
        );
        assert!(encode_to_u64(&Oligo::empty()).is_err());
        assert!(decode_from_u64(0).is_empty());
    }

    #[test]
    fn encode_overflow_err() {
        let seq = Oligo::new(&"T".repeat(20)).unwrap();
        assert!(matches!(
            encode_to_u64(&seq),
            Err(OligoError::EncodingOverflow { .. })
        ));
        let fits = Oligo::new(&"T".repeat(19)).unwrap();
        assert!(encode_to_u64(&fits).is_ok());
    }
}
