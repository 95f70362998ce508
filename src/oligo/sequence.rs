use crate::utils::OligoError;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Symbol ignored during matching unless another one is configured
pub const DEFAULT_WILDCARD: u8 = b'N';

const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Immutable nucleotide sequence. All coordinates are zero-based.
///
/// Case is preserved for display but never significant for comparisons. Each
/// oligo carries the wildcard symbol that matchers treat as a universal match;
/// sequences derived from it inherit that wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oligo {
    bases: Vec<u8>,
    wildcard: u8,
}

impl Oligo {
    pub fn new(seq: &str) -> Result<Self, OligoError> {
        Self::new_with_wildcard(seq, DEFAULT_WILDCARD)
    }

    /// Validates `seq` against {A,C,G,T,N} plus `wildcard`, case-insensitively
    pub fn new_with_wildcard(seq: &str, wildcard: u8) -> Result<Self, OligoError> {
        let wildcard = wildcard.to_ascii_uppercase();
        let valid = !seq.is_empty()
            && seq.bytes().all(|b| {
                let b = b.to_ascii_uppercase();
                NUCLEOTIDES.contains(&b) || b == b'N' || b == wildcard
            });
        if !valid {
            return Err(OligoError::InvalidAlphabet {
                sequence: seq.to_string(),
            });
        }
        Ok(Self {
            bases: seq.as_bytes().to_vec(),
            wildcard,
        })
    }

    pub fn empty() -> Self {
        Self {
            bases: Vec::new(),
            wildcard: DEFAULT_WILDCARD,
        }
    }

    pub(crate) fn from_bases(bases: Vec<u8>, wildcard: u8) -> Self {
        Self { bases, wildcard }
    }

    pub fn with_wildcard(mut self, wildcard: u8) -> Self {
        self.wildcard = wildcard.to_ascii_uppercase();
        self
    }

    pub fn wildcard(&self) -> u8 {
        self.wildcard
    }

    #[inline]
    pub fn is_wildcard(&self, base: u8) -> bool {
        base.to_ascii_uppercase() == self.wildcard
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    pub fn base_at(&self, index: usize) -> Option<u8> {
        self.bases.get(index).copied()
    }

    pub fn to_uppercase(&self) -> Oligo {
        self.derive(self.bases.to_ascii_uppercase())
    }

    pub fn to_lowercase(&self) -> Oligo {
        self.derive(self.bases.to_ascii_lowercase())
    }

    pub fn complement(&self) -> Oligo {
        self.derive(self.bases.iter().map(|&b| complement_base(b)).collect())
    }

    pub fn reverse(&self) -> Oligo {
        self.derive(self.bases.iter().rev().copied().collect())
    }

    /// Reverse complement
    pub fn antiparallel(&self) -> Oligo {
        self.derive(self.bases.iter().rev().map(|&b| complement_base(b)).collect())
    }

    /// Counts of A, C, G and T regardless of case
    pub fn base_content(&self) -> BTreeMap<char, usize> {
        let counts = self.bases.iter().map(|b| b.to_ascii_uppercase()).counts();
        NUCLEOTIDES
            .iter()
            .map(|&b| (b as char, counts.get(&b).copied().unwrap_or(0)))
            .collect()
    }

    pub fn count_base(&self, base: u8) -> usize {
        self.bases
            .iter()
            .filter(|b| b.eq_ignore_ascii_case(&base))
            .count()
    }

    /// Exact (case-insensitive) containment of `other`
    pub fn contains(&self, other: &Oligo) -> bool {
        if other.is_empty() {
            return true;
        }
        self.bases
            .windows(other.len())
            .any(|w| w.eq_ignore_ascii_case(&other.bases))
    }

    /// True if every symbol is A, C, G, T or this oligo's wildcard
    pub fn is_dna(&self) -> bool {
        self.bases
            .iter()
            .all(|&b| NUCLEOTIDES.contains(&b.to_ascii_uppercase()) || self.is_wildcard(b))
    }

    /// Inserts `insert` immediately before `index`
    pub fn insert(&self, insert: &Oligo, index: usize) -> Result<Oligo, OligoError> {
        if index > self.len() {
            return Err(OligoError::EndIndexOutOfBounds {
                end: index as isize,
                len: self.len(),
            });
        }
        let mut bases = Vec::with_capacity(self.len() + insert.len());
        bases.extend_from_slice(&self.bases[..index]);
        bases.extend_from_slice(&insert.bases);
        bases.extend_from_slice(&self.bases[index..]);
        Ok(self.derive(bases))
    }

    /// Joins the 5' end of `other` to the 3' end of this oligo
    pub fn ligate(&self, other: &Oligo) -> Oligo {
        let mut bases = self.bases.clone();
        bases.extend_from_slice(&other.bases);
        self.derive(bases)
    }

    /// Extracts `[start, end]` inclusively.
    pub fn extract(&self, start: isize, end: isize) -> Result<Oligo, OligoError> {
        let range = self.checked_range(start, end)?;
        Ok(self.subsequence(range))
    }

    /// Removes `[start, end]` inclusively and joins what is left.
    pub fn splice_out(&self, start: isize, end: isize) -> Result<Oligo, OligoError> {
        let range = self.checked_range(start, end)?;
        let mut bases = self.bases[..range.start].to_vec();
        bases.extend_from_slice(&self.bases[range.end..]);
        Ok(self.derive(bases))
    }

    /// Cuts after each of `sites` and returns the fragments in coordinate order.
    ///
    /// A cut after the last base yields a trailing empty fragment.
    pub fn cut_at(&self, sites: &[usize]) -> Result<Vec<Oligo>, OligoError> {
        let sites = sites.iter().copied().sorted().collect_vec();
        let Some(&max_site) = sites.last() else {
            return Ok(vec![self.clone()]);
        };
        if max_site >= self.len() {
            return Err(OligoError::CutSiteOutOfBounds {
                site: max_site,
                len: self.len(),
            });
        }

        let mut fragments = Vec::with_capacity(sites.len() + 1);
        let mut start = 0;
        for site in sites {
            fragments.push(self.subsequence(start.min(site + 1)..site + 1));
            start = site + 1;
        }
        fragments.push(self.subsequence(start..self.len()));
        Ok(fragments)
    }

    pub(crate) fn subsequence(&self, range: Range<usize>) -> Oligo {
        self.derive(self.bases[range].to_vec())
    }

    fn derive(&self, bases: Vec<u8>) -> Oligo {
        Oligo::from_bases(bases, self.wildcard)
    }

    fn checked_range(&self, start: isize, end: isize) -> Result<Range<usize>, OligoError> {
        let len = self.len();
        let start_oob = start < 0;
        let end_oob = end > len as isize - 1;
        match (start_oob, end_oob) {
            (true, true) => Err(OligoError::BothIndicesOutOfBounds { start, end, len }),
            (true, false) => Err(OligoError::StartIndexOutOfBounds { start }),
            (false, true) => Err(OligoError::EndIndexOutOfBounds { end, len }),
            (false, false) if start > end + 1 => Err(OligoError::InvalidRange { start, end }),
            (false, false) => Ok(start as usize..(end + 1) as usize),
        }
    }
}

fn complement_base(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'a' => b't',
        b'C' => b'G',
        b'c' => b'g',
        b'G' => b'C',
        b'g' => b'c',
        b'T' => b'A',
        b't' => b'a',
        other => other,
    }
}

impl fmt::Display for Oligo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Construction guarantees ASCII
        write!(f, "{}", String::from_utf8_lossy(&self.bases))
    }
}

impl FromStr for Oligo {
    type Err = OligoError;
    fn from_str(seq: &str) -> Result<Self, Self::Err> {
        Oligo::new(seq)
    }
}
