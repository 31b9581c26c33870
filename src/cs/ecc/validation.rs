//! Parsing and checking of user-supplied parameters and vectors.

use crate::cs::ecc::Result;
use crate::error::Error;

/// Parses the code parameter `m`, which must be an integer of at least 1.
pub fn parse_m(text: &str) -> Result<usize> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("Parameter m is empty".to_string()));
    }

    match trimmed.parse::<usize>() {
        Ok(m) if m >= 1 => Ok(m),
        _ => Err(Error::InvalidInput(format!(
            "Parameter m must be a positive integer, got '{}'",
            trimmed
        ))),
    }
}

/// Parses a flip probability in `[0, 1]`. Both `.` and `,` are accepted as the
/// decimal separator.
pub fn parse_flip_probability(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("Probability is empty".to_string()));
    }

    match trimmed.replace(',', ".").parse::<f64>() {
        Ok(p) if (0.0..=1.0).contains(&p) => Ok(p),
        _ => Err(Error::InvalidInput(format!(
            "Probability must be a number in [0, 1], got '{}'",
            trimmed
        ))),
    }
}

/// Parses a string of '0' and '1' characters into a bit vector. Spaces are
/// ignored so grouped input such as `0110 1001` is accepted.
pub fn parse_bit_vector(text: &str) -> Result<Vec<i32>> {
    let bits: Vec<i32> = text
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(Error::InvalidInput(format!(
                "Bit vector may contain only '0' and '1', found '{}'",
                other
            ))),
        })
        .collect::<Result<_>>()?;

    if bits.is_empty() {
        return Err(Error::InvalidInput("Bit vector is empty".to_string()));
    }

    Ok(bits)
}

/// Checks that a message vector has the `m + 1` bits RM(1, m) encodes.
pub fn check_input_length(vector: &[i32], m: usize) -> Result<()> {
    let expected = m + 1;
    if vector.len() != expected {
        return Err(Error::InvalidInput(format!(
            "Input vector must have {} bits for m = {}, got {}",
            expected,
            m,
            vector.len()
        )));
    }
    Ok(())
}

/// Checks that a received vector has the `2^m` bits of an RM(1, m) codeword.
pub fn check_received_length(vector: &[i32], m: usize) -> Result<()> {
    let expected = u32::try_from(m)
        .ok()
        .and_then(|shift| 1usize.checked_shl(shift));
    match expected {
        Some(len) if vector.len() == len => Ok(()),
        Some(len) => Err(Error::InvalidInput(format!(
            "Received vector must have {} bits for m = {}, got {}",
            len,
            m,
            vector.len()
        ))),
        None => Err(Error::InvalidInput(format!(
            "Codeword length 2^{} is not addressable",
            m
        ))),
    }
}
