//! Memoizing store for code matrices.
//!
//! Generator, identity and transform matrices are pure functions of a single size
//! parameter, so each one is computed at most once per cache and then shared. Single
//! matrices and matrix lists live in two separately typed stores keyed by
//! [`MatrixKey`].
//!
//! Entries are never overwritten or evicted: the first value stored under a key wins
//! and every later `put` for that key returns the stored value instead.

use crate::math::matrix::Matrix;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, PoisonError, RwLock};

/// Logical identity of a cached matrix or matrix list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixKey {
    /// Generator matrix G(m)
    Generator(usize),
    /// Identity matrix I(n)
    Identity(usize),
    /// Ordered transform matrices H1(m)..Hm(m)
    HMatrices(usize),
}

impl Display for MatrixKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixKey::Generator(m) => write!(f, "GeneratorMatrix_{}", m),
            MatrixKey::Identity(size) => write!(f, "IdentityMatrix_{}", size),
            MatrixKey::HMatrices(m) => write!(f, "HMatrices_{}", m),
        }
    }
}

/// Lookup/store contract used by the code matrix builder.
///
/// Implementations must be safe to share between threads, and `put_*` must keep the
/// first stored value for a key: racing writers may both compute a value, but all of
/// them get back the same stored `Arc`.
pub trait MatrixStore: Send + Sync {
    /// Whether a single matrix is stored under `key`
    fn has_matrix(&self, key: &MatrixKey) -> bool;

    /// Returns the single matrix stored under `key`
    fn matrix(&self, key: &MatrixKey) -> Option<Arc<Matrix>>;

    /// Stores `matrix` unless the key is taken; returns the stored value
    fn put_matrix(&self, key: MatrixKey, matrix: Arc<Matrix>) -> Arc<Matrix>;

    /// Whether a matrix list is stored under `key`
    fn has_matrices(&self, key: &MatrixKey) -> bool;

    /// Returns the matrix list stored under `key`
    fn matrices(&self, key: &MatrixKey) -> Option<Arc<Vec<Matrix>>>;

    /// Stores `matrices` unless the key is taken; returns the stored value
    fn put_matrices(&self, key: MatrixKey, matrices: Arc<Vec<Matrix>>) -> Arc<Vec<Matrix>>;
}

/// In-memory [`MatrixStore`] that lives as long as its owner
#[derive(Debug, Default)]
pub struct MatrixCache {
    single: RwLock<HashMap<MatrixKey, Arc<Matrix>>>,
    lists: RwLock<HashMap<MatrixKey, Arc<Vec<Matrix>>>>,
}

impl MatrixCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored entries across both stores
    pub fn len(&self) -> usize {
        let single = self.single.read().unwrap_or_else(PoisonError::into_inner);
        let lists = self.lists.read().unwrap_or_else(PoisonError::into_inner);
        single.len() + lists.len()
    }

    /// Returns true if nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Maps are insert-only, so a poisoned lock still guards consistent data.
fn lookup<V>(store: &RwLock<HashMap<MatrixKey, Arc<V>>>, key: &MatrixKey) -> Option<Arc<V>> {
    store
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(key)
        .cloned()
}

fn insert_first<V>(store: &RwLock<HashMap<MatrixKey, Arc<V>>>, key: MatrixKey, value: Arc<V>) -> Arc<V> {
    let mut map = store.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(map.entry(key).or_insert(value))
}

impl MatrixStore for MatrixCache {
    fn has_matrix(&self, key: &MatrixKey) -> bool {
        lookup(&self.single, key).is_some()
    }

    fn matrix(&self, key: &MatrixKey) -> Option<Arc<Matrix>> {
        lookup(&self.single, key)
    }

    fn put_matrix(&self, key: MatrixKey, matrix: Arc<Matrix>) -> Arc<Matrix> {
        insert_first(&self.single, key, matrix)
    }

    fn has_matrices(&self, key: &MatrixKey) -> bool {
        lookup(&self.lists, key).is_some()
    }

    fn matrices(&self, key: &MatrixKey) -> Option<Arc<Vec<Matrix>>> {
        lookup(&self.lists, key)
    }

    fn put_matrices(&self, key: MatrixKey, matrices: Arc<Vec<Matrix>>) -> Arc<Vec<Matrix>> {
        insert_first(&self.lists, key, matrices)
    }
}
