//! End-to-end transmission over the noisy channel, with and without coding.
//!
//! A [`Transmission`] owns one RM(1, m) code and one channel. Single vectors go
//! through encode -> channel -> decode; whole messages are framed into message
//! vectors and sent twice, once raw and once coded, so the effect of the code on
//! the same channel can be compared.

use crate::cs::ecc::channel::{distorted_positions, NoisyChannel};
use crate::cs::ecc::framing::{frame_bytes, unframe_bytes};
use crate::cs::ecc::reed_muller::{decode, encode, ReedMullerCode};
use crate::cs::ecc::Result;
use crate::error::Error;
use log::{debug, info};
use rayon::prelude::*;

/// Parameters of a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Reed-Muller parameter m
    pub m: usize,
    /// Per-bit flip probability of the channel
    pub flip_probability: f64,
    /// Channel seed; a fresh one is drawn when `None`
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            m: 3,
            flip_probability: 0.05,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Checks that `m` is positive and the probability lies in `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        if self.m == 0 {
            return Err(Error::InvalidParameter(
                "Parameter m must be at least 1".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.flip_probability) {
            return Err(Error::InvalidParameter(format!(
                "Flip probability must be in [0, 1], got {}",
                self.flip_probability
            )));
        }

        Ok(())
    }
}

/// Outcome of sending one message vector through the coded path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorTransmission {
    /// Message vector that was sent
    pub input: Vec<i32>,
    /// Codeword put on the channel
    pub codeword: Vec<i32>,
    /// Word taken off the channel
    pub received: Vec<i32>,
    /// Codeword positions flipped by the channel
    pub distorted_positions: Vec<usize>,
    /// Decoder output for `received`
    pub decoded: Vec<i32>,
}

impl VectorTransmission {
    /// Whether decoding recovered the original vector
    pub fn is_corrected(&self) -> bool {
        self.decoded == self.input
    }
}

/// Outcome of sending one vector through the channel without coding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransmission {
    /// Vector put on the channel
    pub input: Vec<i32>,
    /// Vector taken off the channel
    pub received: Vec<i32>,
    /// Positions flipped by the channel
    pub distorted_positions: Vec<usize>,
}

/// Outcome of sending a whole message both raw and coded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTransmission {
    /// Message reassembled from the uncoded path
    pub raw_output: Vec<u8>,
    /// Message reassembled from the decoded path
    pub decoded_output: Vec<u8>,
    /// Number of message vectors sent on each path
    pub vectors: usize,
    /// Bits flipped on the uncoded path
    pub raw_bit_errors: usize,
    /// Bits flipped on the coded path, counted over codewords
    pub channel_bit_errors: usize,
    /// Message vectors the decoder failed to recover
    pub uncorrected_vectors: usize,
}

impl MessageTransmission {
    /// Uncoded output as text
    pub fn raw_text(&self) -> String {
        String::from_utf8_lossy(&self.raw_output).into_owned()
    }

    /// Decoded output as text
    pub fn decoded_text(&self) -> String {
        String::from_utf8_lossy(&self.decoded_output).into_owned()
    }
}

/// A code and a channel configured for one simulation
#[derive(Debug)]
pub struct Transmission {
    config: SimulationConfig,
    code: ReedMullerCode,
    channel: NoisyChannel,
}

impl Transmission {
    /// Creates a transmission from a validated configuration
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let code = ReedMullerCode::new(config.m)?;
        Self::with_code(config, code)
    }

    /// Creates a transmission around an existing code, e.g. one sharing a cache.
    ///
    /// The code's own `m` takes precedence over `config.m`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the flip probability lies outside `[0, 1]`.
    pub fn with_code(mut config: SimulationConfig, code: ReedMullerCode) -> Result<Self> {
        config.m = code.m();
        config.validate()?;
        let channel = config
            .seed
            .map_or_else(NoisyChannel::new, NoisyChannel::with_seed);
        info!(
            "{} over channel p={} seed={}",
            code,
            config.flip_probability,
            channel.seed()
        );

        Ok(Self {
            config,
            code,
            channel,
        })
    }

    /// Configuration in effect, with `m` taken from the code
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The code used on the coded path
    pub fn code(&self) -> &ReedMullerCode {
        &self.code
    }

    /// Seed of the channel, for replaying this run
    pub fn channel_seed(&self) -> u64 {
        self.channel.seed()
    }

    /// Encodes, transmits and decodes one `m + 1` bit vector
    pub fn send_vector(&mut self, input: &[i32]) -> Result<VectorTransmission> {
        let codeword = self.code.encode(input)?;
        let received = self
            .channel
            .transmit(&codeword, self.config.flip_probability);
        let distorted = distorted_positions(&codeword, &received)?;
        let decoded = self.code.decode(&received)?;

        debug!(
            "sent {:?}: {} distorted positions {:?}, decoded {:?}",
            input,
            distorted.len(),
            distorted,
            decoded
        );

        Ok(VectorTransmission {
            input: input.to_vec(),
            codeword,
            received,
            distorted_positions: distorted,
            decoded,
        })
    }

    /// Transmits a vector as is, without coding
    pub fn send_raw(&mut self, input: &[i32]) -> Result<RawTransmission> {
        let received = self.channel.transmit(input, self.config.flip_probability);
        let distorted = distorted_positions(input, &received)?;

        Ok(RawTransmission {
            input: input.to_vec(),
            received,
            distorted_positions: distorted,
        })
    }

    /// Sends a byte message over the channel both raw and coded.
    ///
    /// The message is framed into `m + 1` bit vectors. Each vector goes through the
    /// channel once unencoded and once as a codeword; the received codewords are
    /// decoded in parallel and both paths are reassembled into bytes.
    pub fn send_message(&mut self, data: &[u8]) -> Result<MessageTransmission> {
        let framed = frame_bytes(data, self.code.message_length())?;
        let p = self.config.flip_probability;

        let mut raw_received = Vec::with_capacity(framed.vectors.len());
        let mut raw_bit_errors = 0;
        for vector in &framed.vectors {
            let sent = self.send_raw(vector)?;
            raw_bit_errors += sent.distorted_positions.len();
            raw_received.push(sent.received);
        }

        let generator = self.code.generator_matrix()?;
        let mut coded_received = Vec::with_capacity(framed.vectors.len());
        let mut channel_bit_errors = 0;
        for vector in &framed.vectors {
            let codeword = encode(vector, &generator)?;
            let received = self.channel.transmit(&codeword, p);
            channel_bit_errors += distorted_positions(&codeword, &received)?.len();
            coded_received.push(received);
        }

        let m = self.code.m();
        let h_matrices = self.code.h_matrices()?;
        let decoded: Vec<Vec<i32>> = coded_received
            .par_iter()
            .map(|received| decode(received, m, &h_matrices))
            .collect::<Result<_>>()?;

        let uncorrected_vectors = decoded
            .iter()
            .zip(&framed.vectors)
            .filter(|(out, sent)| out != sent)
            .count();

        info!(
            "sent {} vectors: {} raw bit errors, {} channel bit errors on codewords, {} vectors uncorrected",
            framed.vectors.len(),
            raw_bit_errors,
            channel_bit_errors,
            uncorrected_vectors
        );

        Ok(MessageTransmission {
            raw_output: unframe_bytes(&raw_received, framed.padding)?,
            decoded_output: unframe_bytes(&decoded, framed.padding)?,
            vectors: framed.vectors.len(),
            raw_bit_errors,
            channel_bit_errors,
            uncorrected_vectors,
        })
    }

    /// Sends UTF-8 text; see [`Transmission::send_message`]
    pub fn send_text(&mut self, text: &str) -> Result<MessageTransmission> {
        self.send_message(text.as_bytes())
    }
}
