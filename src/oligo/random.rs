use super::Oligo;
use rand::{seq::SliceRandom, Rng};

const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Uniformly drawn nucleotide
pub fn random_base<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    BASES[rng.random_range(0..BASES.len())]
}

pub fn random_oligo<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Oligo {
    let bases = (0..length).map(|_| random_base(rng)).collect();
    Oligo::from_bases(bases, super::DEFAULT_WILDCARD)
}

/// Substitutes one random position with probability `percent`/100.
///
/// The substituted base is drawn uniformly and may equal the original one.
pub fn mutate<R: Rng + ?Sized>(rng: &mut R, oligo: &Oligo, percent: u8) -> Oligo {
    let roll: u8 = rng.random_range(0..100);
    if oligo.is_empty() || roll >= percent {
        return oligo.clone();
    }
    let mut bases = oligo.as_bytes().to_vec();
    let index = rng.random_range(0..bases.len());
    bases[index] = random_base(rng);
    Oligo::from_bases(bases, oligo.wildcard())
}

/// Random permutation of the bases of `oligo`
pub fn randomize<R: Rng + ?Sized>(rng: &mut R, oligo: &Oligo) -> Oligo {
    let mut bases = oligo.as_bytes().to_vec();
    bases.shuffle(rng);
    Oligo::from_bases(bases, oligo.wildcard())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn random_oligo_has_requested_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let seq = random_oligo(&mut rng, 50);
        assert_eq!(seq.len(), 50);
        assert!(seq.is_dna());
        assert!(random_oligo(&mut rng, 0).is_empty());
    }

    #[test]
    fn random_oligo_is_seed_deterministic() {
        let a = random_oligo(&mut StdRng::seed_from_u64(42), 30);
        let b = random_oligo(&mut StdRng::seed_from_u64(42), 30);
        assert_eq!(a, b);
    }

    #[test]
    fn mutate_changes_at_most_one_base() {
        let mut rng = StdRng::seed_from_u64(3);
        let seq = random_oligo(&mut rng, 40);
        for _ in 0..100 {
            let mutated = mutate(&mut rng, &seq, 100);
            let diffs = seq
                .as_bytes()
                .iter()
                .zip(mutated.as_bytes())
                .filter(|(a, b)| a != b)
                .count();
            assert!(diffs <= 1);
        }
    }

    #[test]
    fn mutate_with_zero_percent_never_fires() {
        let mut rng = StdRng::seed_from_u64(11);
        let seq = Oligo::new("AAAAAAAAAA").unwrap();
        assert!((0..1000).all(|_| mutate(&mut rng, &seq, 0) == seq));
    }

    #[test]
    fn randomize_preserves_content() {
        let mut rng = StdRng::seed_from_u64(5);
        let seq = Oligo::new("AACCCGGGGT").unwrap();
        let shuffled = randomize(&mut rng, &seq);
        assert_eq!(shuffled.len(), seq.len());
        assert_eq!(shuffled.base_content(), seq.base_content());
    }
}
