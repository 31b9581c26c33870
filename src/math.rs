pub mod matrix;

pub use matrix::{checked_shape, identity, kronecker_product, vector_matrix_product, Matrix};
