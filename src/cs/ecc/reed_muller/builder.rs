//! Construction of the RM(1, m) generator matrix and the decoder's transform matrices.
//!
//! Every matrix is looked up in a [`MatrixStore`] first and only built on a miss.
//! The transform matrices are
//!
//! ```text
//! H_i(m) = I(2^(m-i)) ⊗ H ⊗ I(2^(i-1)),   i = 1..m,   H = [[1, 1], [1, -1]]
//! ```
//!
//! and multiplying a bipolar vector by all of them in order is the fast
//! Hadamard transform the decoder relies on.

use crate::cs::ecc::matrix_cache::{MatrixCache, MatrixKey, MatrixStore};
use crate::cs::ecc::Result;
use crate::error::Error;
use crate::math::matrix::{checked_shape, identity, kronecker_product, Matrix};
use log::{debug, trace};
use ndarray::{array, Array2};
use std::sync::Arc;

/// Builds and caches the matrices of a first-order Reed-Muller code
#[derive(Debug)]
pub struct CodeMatrixBuilder<S: MatrixStore = MatrixCache> {
    store: Arc<S>,
}

impl CodeMatrixBuilder<MatrixCache> {
    /// Creates a builder backed by a fresh in-memory cache
    pub fn new() -> Self {
        Self::with_store(Arc::new(MatrixCache::new()))
    }
}

impl Default for CodeMatrixBuilder<MatrixCache> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MatrixStore> Clone for CodeMatrixBuilder<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: MatrixStore> CodeMatrixBuilder<S> {
    /// Creates a builder that reads and populates the given store
    pub fn with_store(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The store this builder memoizes into
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the generator matrix G(m).
    ///
    /// G(m) has `m + 1` rows and `2^m` columns. Row `i` repeats a block of length
    /// `2^i` whose first half is 0 and second half is 1, so row 0 is all ones and
    /// row `i > 0` holds bit `i - 1` of the column index.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `m` is zero or G(m) is too large to allocate.
    pub fn generator_matrix(&self, m: usize) -> Result<Arc<Matrix>> {
        validate_m(m)?;
        let shape = checked_shape(m + 1, 1usize << m)?;
        let key = MatrixKey::Generator(m);

        if let Some(matrix) = self.store.matrix(&key) {
            trace!("cache hit for {}", key);
            return Ok(matrix);
        }

        debug!("building {}", key);
        let matrix = Array2::from_shape_fn(shape, |(row, col)| {
            let period = 1usize << row;
            if col % period < period / 2 {
                0
            } else {
                1
            }
        });

        Ok(self.store.put_matrix(key, Arc::new(matrix)))
    }

    /// Returns the identity matrix I(size).
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `size` is zero.
    pub fn identity_matrix(&self, size: usize) -> Result<Arc<Matrix>> {
        let key = MatrixKey::Identity(size);

        if let Some(matrix) = self.store.matrix(&key) {
            trace!("cache hit for {}", key);
            return Ok(matrix);
        }

        debug!("building {}", key);
        let matrix = identity(size)?;
        Ok(self.store.put_matrix(key, Arc::new(matrix)))
    }

    /// Returns the ordered transform matrices `[H_1(m), .., H_m(m)]`, each `2^m x 2^m`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `m` is zero or a `2^m x 2^m` matrix is too
    /// large to allocate.
    pub fn h_matrices(&self, m: usize) -> Result<Arc<Vec<Matrix>>> {
        validate_m(m)?;
        checked_shape(1usize << m, 1usize << m)?;
        let key = MatrixKey::HMatrices(m);

        if let Some(matrices) = self.store.matrices(&key) {
            trace!("cache hit for {}", key);
            return Ok(matrices);
        }

        debug!("building {}", key);
        let base = base_transform();
        let mut matrices = Vec::with_capacity(m);
        for i in 1..=m {
            let left = self.identity_matrix(1usize << (m - i))?;
            let right = self.identity_matrix(1usize << (i - 1))?;
            let h_i = kronecker_product(&kronecker_product(&left, &base)?, &right)?;
            matrices.push(h_i);
        }

        Ok(self.store.put_matrices(key, Arc::new(matrices)))
    }
}

/// The 2x2 kernel [[1, 1], [1, -1]] every transform matrix is built around
pub fn base_transform() -> Matrix {
    array![[1, 1], [1, -1]]
}

/// Checks that `m` describes a code whose length `2^m` fits in `usize`.
pub(crate) fn validate_m(m: usize) -> Result<()> {
    if m == 0 {
        return Err(Error::InvalidParameter(
            "Parameter m must be at least 1".to_string(),
        ));
    }

    if m >= usize::BITS as usize {
        return Err(Error::InvalidParameter(format!(
            "Parameter m must be less than {}",
            usize::BITS
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    /// Store double that counts how often values are written
    #[derive(Default)]
    struct CountingStore {
        inner: MatrixCache,
        matrix_puts: AtomicUsize,
        list_puts: AtomicUsize,
    }

    impl MatrixStore for CountingStore {
        fn has_matrix(&self, key: &MatrixKey) -> bool {
            self.inner.has_matrix(key)
        }

        fn matrix(&self, key: &MatrixKey) -> Option<Arc<Matrix>> {
            self.inner.matrix(key)
        }

        fn put_matrix(&self, key: MatrixKey, matrix: Arc<Matrix>) -> Arc<Matrix> {
            self.matrix_puts.fetch_add(1, Ordering::SeqCst);
            self.inner.put_matrix(key, matrix)
        }

        fn has_matrices(&self, key: &MatrixKey) -> bool {
            self.inner.has_matrices(key)
        }

        fn matrices(&self, key: &MatrixKey) -> Option<Arc<Vec<Matrix>>> {
            self.inner.matrices(key)
        }

        fn put_matrices(&self, key: MatrixKey, matrices: Arc<Vec<Matrix>>) -> Arc<Vec<Matrix>> {
            self.list_puts.fetch_add(1, Ordering::SeqCst);
            self.inner.put_matrices(key, matrices)
        }
    }

    #[test]
    fn test_generator_matrix_m2() {
        let builder = CodeMatrixBuilder::new();
        let g = builder.generator_matrix(2).unwrap();
        assert_eq!(*g, array![[1, 1, 1, 1], [0, 1, 0, 1], [0, 0, 1, 1]]);
    }

    #[test]
    fn test_generator_matrix_shape_and_pattern() {
        let builder = CodeMatrixBuilder::new();
        for m in 1..=6 {
            let g = builder.generator_matrix(m).unwrap();
            assert_eq!(g.dim(), (m + 1, 1 << m));
            assert!(g.iter().all(|&v| v == 0 || v == 1));

            for (i, row) in g.rows().into_iter().enumerate() {
                let period = 1usize << i;
                for (j, &value) in row.iter().enumerate() {
                    let expected = if j % period < period / 2 { 0 } else { 1 };
                    assert_eq!(value, expected, "m={} row={} col={}", m, i, j);
                }
            }
        }
    }

    #[test]
    fn test_invalid_m() {
        let builder = CodeMatrixBuilder::new();
        assert!(matches!(
            builder.generator_matrix(0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(builder.h_matrices(0), Err(Error::InvalidParameter(_))));
        assert!(matches!(
            builder.generator_matrix(usize::BITS as usize),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            builder.identity_matrix(0),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_oversized_m_is_rejected() {
        let builder = CodeMatrixBuilder::new();
        let half = usize::BITS as usize / 2;

        // 2^half x 2^half elements overflow usize
        assert!(matches!(
            builder.h_matrices(half),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            builder.generator_matrix(usize::BITS as usize - 2),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            builder.generator_matrix(usize::BITS as usize - 1),
            Err(Error::InvalidParameter(_))
        ));
        assert!(builder.store().is_empty());
    }

    #[test]
    fn test_h_matrices_shape() {
        let builder = CodeMatrixBuilder::new();
        for m in 1..=5 {
            let hs = builder.h_matrices(m).unwrap();
            assert_eq!(hs.len(), m);
            for h in hs.iter() {
                assert_eq!(h.dim(), (1 << m, 1 << m));
            }
        }
    }

    #[test]
    fn test_h_matrices_m2() {
        let builder = CodeMatrixBuilder::new();
        let hs = builder.h_matrices(2).unwrap();

        // I(2) ⊗ H
        assert_eq!(
            hs[0],
            array![[1, 1, 0, 0], [1, -1, 0, 0], [0, 0, 1, 1], [0, 0, 1, -1]]
        );
        // H ⊗ I(2)
        assert_eq!(
            hs[1],
            array![[1, 0, 1, 0], [0, 1, 0, 1], [1, 0, -1, 0], [0, 1, 0, -1]]
        );
    }

    #[test]
    fn test_h_matrices_product_is_hadamard() {
        // H_1 * H_2 * H_3 equals the Sylvester-Hadamard matrix of order 8
        let builder = CodeMatrixBuilder::new();
        let hs = builder.h_matrices(3).unwrap();
        let product = hs[0].dot(&hs[1]).dot(&hs[2]);

        let base = base_transform();
        let sylvester = kronecker_product(&kronecker_product(&base, &base).unwrap(), &base).unwrap();
        assert_eq!(product, sylvester);
    }

    #[test]
    fn test_repeated_calls_hit_cache() {
        let store = Arc::new(CountingStore::default());
        let builder = CodeMatrixBuilder::with_store(Arc::clone(&store));

        let first = builder.generator_matrix(3).unwrap();
        assert_eq!(store.matrix_puts.load(Ordering::SeqCst), 1);
        let second = builder.generator_matrix(3).unwrap();
        assert_eq!(store.matrix_puts.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);

        let hs_first = builder.h_matrices(3).unwrap();
        assert_eq!(store.list_puts.load(Ordering::SeqCst), 1);
        let puts_after_first = store.matrix_puts.load(Ordering::SeqCst);

        let hs_second = builder.h_matrices(3).unwrap();
        assert_eq!(store.list_puts.load(Ordering::SeqCst), 1);
        assert_eq!(store.matrix_puts.load(Ordering::SeqCst), puts_after_first);
        assert_eq!(hs_first, hs_second);
    }

    #[test]
    fn test_identity_matrices_shared_between_h_lists() {
        let store = Arc::new(CountingStore::default());
        let builder = CodeMatrixBuilder::with_store(Arc::clone(&store));

        // m = 2 needs I(1) and I(2)
        builder.h_matrices(2).unwrap();
        assert_eq!(store.matrix_puts.load(Ordering::SeqCst), 2);

        // m = 3 additionally needs only I(4)
        builder.h_matrices(3).unwrap();
        assert_eq!(store.matrix_puts.load(Ordering::SeqCst), 3);
        assert!(store.has_matrix(&MatrixKey::Identity(4)));
    }

    #[test]
    fn test_concurrent_builders_share_one_value() {
        let builder = CodeMatrixBuilder::new();

        let results: Vec<Arc<Vec<Matrix>>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let builder = builder.clone();
                    scope.spawn(move || builder.h_matrices(3).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let stored = builder.h_matrices(3).unwrap();
        assert!(results.iter().all(|hs| Arc::ptr_eq(hs, &stored)));
    }
}
