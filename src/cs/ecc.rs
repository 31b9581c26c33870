//! Error correction over a simulated noisy binary channel.
//!
//! This module provides:
//! - First-order Reed-Muller codes with a fast Hadamard transform decoder
//! - A memoizing store for the code's generator and transform matrices
//! - A binary symmetric channel with replayable randomness
//! - Framing of byte and text messages into fixed-width bit vectors
//! - Validation of user-supplied parameters
//! - A transmission pipeline tying the pieces together
//!
//! # Error Correction Algorithms
//!
//! Error correction codes add structured redundancy so a receiver can recover the
//! original message even when some transmitted bits are corrupted.
//!
//! # Examples
//!
//! ```rust
//! use rm_channel::cs::ecc::{ReedMullerCode, NoisyChannel};
//!
//! let code = ReedMullerCode::new(4).unwrap();
//! let mut channel = NoisyChannel::with_seed(11);
//!
//! let message = vec![1, 0, 0, 1, 1];
//! let codeword = code.encode(&message).unwrap();
//! let received = channel.transmit(&codeword, 0.0);
//! assert_eq!(code.decode(&received).unwrap(), message);
//! ```

use crate::error::Error;

/// Result type for error correction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for error correction code implementations working on bit vectors
pub trait ErrorCorrection {
    /// Encode a message vector into a codeword
    fn encode(&self, data: &[i32]) -> Result<Vec<i32>>;

    /// Decode a received word, correcting errors if possible
    fn decode(&self, data: &[i32]) -> Result<Vec<i32>>;
}

/// Binary symmetric channel simulation
pub mod channel;
/// Byte stream framing into fixed-width vectors
pub mod framing;
/// Memoizing matrix store
pub mod matrix_cache;
/// First-order Reed-Muller codes
pub mod reed_muller;
/// Encode/channel/decode pipeline
pub mod transmission;
/// Parsing of user-supplied parameters
pub mod validation;

pub use channel::{distorted_positions, NoisyChannel};
pub use framing::{frame_bytes, frame_text, unframe_bytes, unframe_text, FramedMessage};
pub use matrix_cache::{MatrixCache, MatrixKey, MatrixStore};
pub use reed_muller::{CodeMatrixBuilder, ReedMullerCode};
pub use transmission::{
    MessageTransmission, RawTransmission, SimulationConfig, Transmission, VectorTransmission,
};
