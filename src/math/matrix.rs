//! Integer matrix primitives used by the Reed-Muller engine.
//!
//! Matrices are dense `ndarray::Array2<i32>` values. Only the three operations the
//! coding engine needs are provided:
//! - Vector-by-matrix product, optionally reduced modulo 2
//! - Identity matrix construction
//! - Kronecker product of two matrices
//!
//! Vectors are plain integer slices; they hold bits before encoding and after
//! decoding, and bipolar sums while the decoder runs its transform.

use crate::error::{Error, Result};
use ndarray::{s, Array2, ArrayView1};

/// Dense integer matrix
pub type Matrix = Array2<i32>;

/// Multiplies a row vector by a matrix.
///
/// `result[j]` is the sum over `i` of `vector[i] * matrix[i][j]`. When `binary` is
/// set, every entry is reduced modulo 2 so the result stays in {0, 1}.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the vector length differs from the number of rows.
pub fn vector_matrix_product(vector: &[i32], matrix: &Matrix, binary: bool) -> Result<Vec<i32>> {
    if vector.len() != matrix.nrows() {
        return Err(Error::DimensionMismatch(format!(
            "vector of length {} cannot multiply a matrix with {} rows",
            vector.len(),
            matrix.nrows()
        )));
    }

    let product = ArrayView1::from(vector).dot(matrix);

    if binary {
        Ok(product.iter().map(|sum| sum.rem_euclid(2)).collect())
    } else {
        Ok(product.to_vec())
    }
}

/// Checks that a `rows x cols` matrix can be allocated.
///
/// # Errors
///
/// Returns `InvalidParameter` if the element count overflows `isize`.
pub fn checked_shape(rows: usize, cols: usize) -> Result<(usize, usize)> {
    match rows.checked_mul(cols) {
        Some(len) if len <= isize::MAX as usize => Ok((rows, cols)),
        _ => Err(Error::InvalidParameter(format!(
            "a {} x {} matrix is too large to allocate",
            rows, cols
        ))),
    }
}

/// Creates an `n x n` identity matrix.
///
/// # Errors
///
/// Returns `InvalidParameter` if `n` is zero or `n x n` is too large.
pub fn identity(n: usize) -> Result<Matrix> {
    if n == 0 {
        return Err(Error::InvalidParameter(
            "Identity matrix size must be positive".to_string(),
        ));
    }

    checked_shape(n, n)?;
    Ok(Array2::eye(n))
}

/// Computes the Kronecker product `a ⊗ b`.
///
/// The result has `rows(a) * rows(b)` rows and `cols(a) * cols(b)` columns. Block
/// `(i, j)` of the result is `b` scaled by `a[i][j]`.
///
/// # Errors
///
/// Returns `InvalidParameter` if either operand has no rows or no columns, or if
/// the product is too large.
pub fn kronecker_product(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.is_empty() || b.is_empty() {
        return Err(Error::InvalidParameter(
            "Kronecker product operands must have positive dimensions".to_string(),
        ));
    }

    let (rows_b, cols_b) = b.dim();
    let rows = a.nrows().checked_mul(rows_b);
    let cols = a.ncols().checked_mul(cols_b);
    let shape = match (rows, cols) {
        (Some(rows), Some(cols)) => checked_shape(rows, cols)?,
        _ => {
            return Err(Error::InvalidParameter(
                "Kronecker product dimensions overflow".to_string(),
            ))
        }
    };
    let mut result = Array2::zeros(shape);

    for ((block_row, block_col), &scale) in a.indexed_iter() {
        let row_start = block_row * rows_b;
        let col_start = block_col * cols_b;
        result
            .slice_mut(s![row_start..row_start + rows_b, col_start..col_start + cols_b])
            .assign(&b.mapv(|value| scale * value));
    }

    Ok(result)
}
