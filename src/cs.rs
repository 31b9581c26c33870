pub mod ecc;

pub use ecc::{NoisyChannel, ReedMullerCode};
