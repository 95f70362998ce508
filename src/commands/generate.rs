use crate::cli::GenerateArgs;
use crate::oligo::{mutate, random_oligo};
use crate::utils::Result;
use rand::{rngs::StdRng, SeedableRng};

pub fn generate(args: GenerateArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => {
            log::debug!("Seeding generator with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    let mut oligo = random_oligo(&mut rng, args.length);
    if args.mutate_percent > 0 {
        oligo = mutate(&mut rng, &oligo, args.mutate_percent);
    }
    println!("{}", oligo);
    Ok(())
}
