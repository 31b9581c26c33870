//! First-order Reed-Muller (biorthogonal) codes RM(1, m).
//!
//! RM(1, m) maps `m + 1` message bits to `2^m` codeword bits and has minimum
//! distance `2^(m-1)`, so it corrects up to `2^(m-2) - 1` bit errors per codeword.
//! It was famously used on the Mariner 9 mission (RM(1, 5)) to transmit images
//! from Mars.
//!
//! This implementation provides:
//! - Generator and transform matrix construction with memoization
//! - Encoding as a GF(2) vector-matrix product
//! - Maximum-likelihood decoding via the fast Hadamard transform
//!
//! # Examples
//!
//! ```rust
//! use rm_channel::cs::ecc::reed_muller::ReedMullerCode;
//!
//! let code = ReedMullerCode::new(3).unwrap();
//! let codeword = code.encode(&[1, 0, 1, 1]).unwrap();
//! assert_eq!(codeword.len(), 8);
//! assert_eq!(code.decode(&codeword).unwrap(), vec![1, 0, 1, 1]);
//! ```

pub mod builder;
pub mod decoder;
pub mod encoder;

pub use builder::CodeMatrixBuilder;
pub use decoder::{decode, locate_peak, reconstruct, Peak};
pub use encoder::encode;

use crate::cs::ecc::matrix_cache::{MatrixCache, MatrixStore};
use crate::cs::ecc::{ErrorCorrection, Result};
use crate::math::matrix::Matrix;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// RM(1, m) encoder/decoder bound to a fixed `m`
#[derive(Debug)]
pub struct ReedMullerCode<S: MatrixStore = MatrixCache> {
    /// Code parameter
    m: usize,
    /// Source of the generator and transform matrices
    builder: CodeMatrixBuilder<S>,
}

impl ReedMullerCode<MatrixCache> {
    /// Creates an RM(1, m) code with its own matrix cache
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `m` is zero or too large.
    pub fn new(m: usize) -> Result<Self> {
        Self::with_builder(m, CodeMatrixBuilder::new())
    }
}

impl<S: MatrixStore> Clone for ReedMullerCode<S> {
    fn clone(&self) -> Self {
        Self {
            m: self.m,
            builder: self.builder.clone(),
        }
    }
}

impl<S: MatrixStore> ReedMullerCode<S> {
    /// Creates an RM(1, m) code that shares matrices through `builder`
    pub fn with_builder(m: usize, builder: CodeMatrixBuilder<S>) -> Result<Self> {
        builder::validate_m(m)?;
        Ok(Self { m, builder })
    }

    /// Code parameter m
    pub fn m(&self) -> usize {
        self.m
    }

    /// Message length (m + 1)
    pub fn message_length(&self) -> usize {
        self.m + 1
    }

    /// Codeword length (2^m)
    pub fn codeword_length(&self) -> usize {
        1 << self.m
    }

    /// Minimum Hamming distance between distinct codewords (2^(m-1))
    pub fn minimum_distance(&self) -> usize {
        1 << (self.m - 1)
    }

    /// Code rate (m + 1) / 2^m
    pub fn rate(&self) -> f64 {
        self.message_length() as f64 / self.codeword_length() as f64
    }

    /// The builder this code draws its matrices from
    pub fn builder(&self) -> &CodeMatrixBuilder<S> {
        &self.builder
    }

    /// Generator matrix G(m)
    pub fn generator_matrix(&self) -> Result<Arc<Matrix>> {
        self.builder.generator_matrix(self.m)
    }

    /// Transform matrices H_1(m)..H_m(m)
    pub fn h_matrices(&self) -> Result<Arc<Vec<Matrix>>> {
        self.builder.h_matrices(self.m)
    }

    /// Encodes `m + 1` message bits into a `2^m` bit codeword
    pub fn encode(&self, message: &[i32]) -> Result<Vec<i32>> {
        let generator = self.generator_matrix()?;
        encode(message, &generator)
    }

    /// Decodes a `2^m` bit received word into `m + 1` message bits
    pub fn decode(&self, received: &[i32]) -> Result<Vec<i32>> {
        let h_matrices = self.h_matrices()?;
        decode(received, self.m, &h_matrices)
    }
}

impl<S: MatrixStore> ErrorCorrection for ReedMullerCode<S> {
    fn encode(&self, data: &[i32]) -> Result<Vec<i32>> {
        ReedMullerCode::encode(self, data)
    }

    fn decode(&self, data: &[i32]) -> Result<Vec<i32>> {
        ReedMullerCode::decode(self, data)
    }
}

impl<S: MatrixStore> Display for ReedMullerCode<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RM(1,{}) [n={}, k={}]",
            self.m,
            self.codeword_length(),
            self.message_length()
        )
    }
}
