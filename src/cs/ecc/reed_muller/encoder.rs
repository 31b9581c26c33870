//! RM(1, m) encoding: codeword = message · G(m) over GF(2).

use crate::cs::ecc::Result;
use crate::error::Error;
use crate::math::matrix::{vector_matrix_product, Matrix};

/// Encodes an `m + 1` bit message into a `2^m` bit codeword.
///
/// # Arguments
///
/// * `message` - Message bits, one entry per generator row
/// * `generator` - Generator matrix G(m)
///
/// # Errors
///
/// Returns `DimensionMismatch` if the message length differs from the generator's
/// row count.
pub fn encode(message: &[i32], generator: &Matrix) -> Result<Vec<i32>> {
    if message.len() != generator.nrows() {
        return Err(Error::dimension_mismatch(
            "message",
            generator.nrows(),
            message.len(),
        ));
    }

    vector_matrix_product(message, generator, true)
}
