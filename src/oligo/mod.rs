mod encode;
mod random;
mod sequence;

pub use encode::{decode_from_u64, encode_to_u64};
pub use random::{mutate, random_base, random_oligo, randomize};
pub use sequence::{Oligo, DEFAULT_WILDCARD};
