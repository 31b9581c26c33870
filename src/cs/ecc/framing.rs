//! Splitting byte streams into fixed-width bit vectors and reassembling them.
//!
//! A message is viewed as one bit stream (most significant bit of each byte
//! first) and cut into vectors of the code's message width. The last vector is
//! padded with zero bits; the number of padding bits travels alongside the vectors
//! so the receiver can strip it again.

use crate::cs::ecc::Result;
use crate::error::Error;
use bitvec::prelude::*;

/// A byte stream cut into equal-width bit vectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramedMessage {
    /// Bit vectors, all of the same width
    pub vectors: Vec<Vec<i32>>,
    /// Number of zero bits appended to the last vector
    pub padding: usize,
}

impl FramedMessage {
    /// Total number of message bits, padding excluded
    pub fn payload_bits(&self) -> usize {
        self.vectors.iter().map(Vec::len).sum::<usize>() - self.padding
    }
}

/// Cuts `data` into vectors of `width` bits.
///
/// # Errors
///
/// Returns `InvalidParameter` if `width` is zero.
pub fn frame_bytes(data: &[u8], width: usize) -> Result<FramedMessage> {
    if width == 0 {
        return Err(Error::InvalidParameter(
            "Frame width must be positive".to_string(),
        ));
    }

    let bits = data.view_bits::<Msb0>();
    let padding = (width - bits.len() % width) % width;

    let vectors = bits
        .chunks(width)
        .map(|chunk| {
            let mut vector: Vec<i32> = chunk.iter().map(|bit| i32::from(*bit)).collect();
            vector.resize(width, 0);
            vector
        })
        .collect();

    Ok(FramedMessage { vectors, padding })
}

/// Cuts the UTF-8 bytes of `text` into vectors of `width` bits.
pub fn frame_text(text: &str, width: usize) -> Result<FramedMessage> {
    frame_bytes(text.as_bytes(), width)
}

/// Reassembles bytes from framed vectors, dropping `padding` trailing bits.
///
/// # Errors
///
/// Returns `InvalidInput` if a vector holds something other than 0 or 1, the
/// padding exceeds the number of bits, or the remaining bits do not form whole
/// bytes.
pub fn unframe_bytes(vectors: &[Vec<i32>], padding: usize) -> Result<Vec<u8>> {
    let mut bits: BitVec<u8, Msb0> = BitVec::new();
    for vector in vectors {
        for &value in vector {
            match value {
                0 => bits.push(false),
                1 => bits.push(true),
                other => {
                    return Err(Error::InvalidInput(format!(
                        "Framed vectors must contain only bits, found {}",
                        other
                    )))
                }
            }
        }
    }

    if padding > bits.len() {
        return Err(Error::InvalidInput(format!(
            "Padding of {} bits exceeds the {} framed bits",
            padding,
            bits.len()
        )));
    }
    bits.truncate(bits.len() - padding);

    if bits.len() % 8 != 0 {
        return Err(Error::InvalidInput(format!(
            "{} payload bits do not form whole bytes",
            bits.len()
        )));
    }

    Ok(bits.into_vec())
}

/// Reassembles text from framed vectors.
///
/// Invalid UTF-8 sequences, which a noisy channel readily produces, are replaced
/// with U+FFFD.
pub fn unframe_text(vectors: &[Vec<i32>], padding: usize) -> Result<String> {
    let bytes = unframe_bytes(vectors, padding)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
