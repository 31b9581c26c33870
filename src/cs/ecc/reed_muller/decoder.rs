//! Maximum-likelihood decoding of RM(1, m) with the fast Hadamard transform.
//!
//! The received word is mapped to the bipolar domain (0 -> -1, 1 -> 1) and
//! multiplied by H_1(m) .. H_m(m) in turn. Entry `k` of the result is the
//! correlation of the received word with the codeword whose affine part is the bit
//! pattern of `k`, so the entry with the largest magnitude identifies the closest
//! codeword. Its sign gives the constant (first) message bit.

use crate::cs::ecc::reed_muller::builder::validate_m;
use crate::cs::ecc::Result;
use crate::error::Error;
use crate::math::matrix::{vector_matrix_product, Matrix};

/// Location of the strongest correlation in a transformed vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Peak {
    /// Index of the first entry with maximal magnitude
    pub position: usize,
    /// Signed value at that index
    pub value: i32,
}

/// Decodes a received word back to its `m + 1` message bits.
///
/// # Arguments
///
/// * `received` - Received word of length `2^m`, entries in {0, 1}
/// * `m` - Code parameter
/// * `h_matrices` - Transform matrices `[H_1(m), .., H_m(m)]`
///
/// # Errors
///
/// Returns `InvalidParameter` for an invalid `m` and `DimensionMismatch` if the
/// received word or the transform list has the wrong length.
pub fn decode(received: &[i32], m: usize, h_matrices: &[Matrix]) -> Result<Vec<i32>> {
    validate_m(m)?;

    let length = 1usize << m;
    if received.len() != length {
        return Err(Error::dimension_mismatch(
            "received vector",
            length,
            received.len(),
        ));
    }
    if h_matrices.len() != m {
        return Err(Error::dimension_mismatch(
            "transform matrix list",
            m,
            h_matrices.len(),
        ));
    }

    let mut w = bipolarize(received);
    for h in h_matrices {
        w = vector_matrix_product(&w, h, false)?;
    }

    let peak = locate_peak(&w).ok_or_else(|| {
        Error::DimensionMismatch("transformed vector is empty".to_string())
    })?;

    Ok(reconstruct(peak, m))
}

/// Maps bits to the bipolar domain: 0 becomes -1, anything else is kept.
pub fn bipolarize(bits: &[i32]) -> Vec<i32> {
    bits.iter().map(|&b| if b == 0 { -1 } else { b }).collect()
}

/// Finds the first entry (in index order) whose magnitude is maximal.
///
/// Ties between equal magnitudes, including entries of opposite sign, always go
/// to the lowest index. Returns `None` for an empty vector.
pub fn locate_peak(w: &[i32]) -> Option<Peak> {
    let mut peak: Option<Peak> = None;

    for (position, &value) in w.iter().enumerate() {
        match peak {
            Some(best) if value.unsigned_abs() <= best.value.unsigned_abs() => {}
            _ => peak = Some(Peak { position, value }),
        }
    }

    peak
}

/// Turns a peak into message bits.
///
/// The first bit is 1 only for a strictly positive peak value (a zero peak yields
/// 0). The remaining `m` bits are the peak position, least significant bit first.
pub fn reconstruct(peak: Peak, m: usize) -> Vec<i32> {
    let mut message = Vec::with_capacity(m + 1);
    message.push(i32::from(peak.value > 0));
    message.extend((0..m).map(|bit| ((peak.position >> bit) & 1) as i32));
    message
}
