use clap::{Parser, Subcommand};
use log::error;
use rm_channel::cs::ecc::validation::{
    check_input_length, check_received_length, parse_bit_vector, parse_flip_probability, parse_m,
};
use rm_channel::cs::ecc::{ReedMullerCode, SimulationConfig, Transmission};
use rm_channel::{Error, Result};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Reed-Muller parameter m (messages of m+1 bits, codewords of 2^m bits)
    #[clap(short, long, default_value = "3", value_parser = parse_m)]
    m: usize,

    /// Per-bit flip probability of the channel
    #[clap(short, long, default_value = "0.05", value_parser = parse_flip_probability)]
    probability: f64,

    /// Channel seed for reproducible runs
    #[clap(short, long)]
    seed: Option<u64>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encodes a bit vector, sends it through the channel and decodes it
    Vector {
        /// Message bits, e.g. 1011
        #[clap(required = true)]
        bits: String,
    },
    /// Sends text both uncoded and coded and compares the results
    Text {
        #[clap(required = true)]
        text: String,
    },
    /// Sends the bytes of a file both uncoded and coded and compares the results
    File {
        #[clap(required = true)]
        path: PathBuf,
    },
    /// Decodes a received word of 2^m bits
    Decode {
        /// Received bits, spaces allowed
        #[clap(required = true)]
        received: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = SimulationConfig {
        m: cli.m,
        flip_probability: cli.probability,
        seed: cli.seed,
    };

    match &cli.command {
        Commands::Vector { bits } => {
            let bits = parse_bit_vector(bits)?;
            check_input_length(&bits, cli.m)?;
            let mut transmission = Transmission::new(config)?;
            let result = transmission.send_vector(&bits)?;

            println!("code:      {}", transmission.code());
            println!("seed:      {}", transmission.channel_seed());
            println!("input:     {}", render(&result.input));
            println!("codeword:  {}", render(&result.codeword));
            println!("received:  {}", render(&result.received));
            println!(
                "distorted: {} {:?}",
                result.distorted_positions.len(),
                result.distorted_positions
            );
            println!("decoded:   {}", render(&result.decoded));
            println!("corrected: {}", result.is_corrected());
        }
        Commands::Text { text } => {
            let mut transmission = Transmission::new(config)?;
            let result = transmission.send_text(text)?;

            println!("code:      {}", transmission.code());
            println!("seed:      {}", transmission.channel_seed());
            println!("vectors:   {}", result.vectors);
            println!("uncoded:   {} ({} bit errors)", result.raw_text(), result.raw_bit_errors);
            println!(
                "decoded:   {} ({} channel bit errors, {} vectors uncorrected)",
                result.decoded_text(),
                result.channel_bit_errors,
                result.uncorrected_vectors
            );
        }
        Commands::File { path } => {
            let data = std::fs::read(path).map_err(|e| {
                Error::InvalidInput(format!("cannot read {}: {}", path.display(), e))
            })?;
            let mut transmission = Transmission::new(config)?;
            let result = transmission.send_message(&data)?;
            let differing = |output: &[u8]| {
                output
                    .iter()
                    .zip(&data)
                    .filter(|(out, sent)| out != sent)
                    .count()
            };

            println!("code:      {}", transmission.code());
            println!("seed:      {}", transmission.channel_seed());
            println!("bytes:     {}", data.len());
            println!("vectors:   {}", result.vectors);
            println!(
                "uncoded:   {} bit errors, {} bytes differ",
                result.raw_bit_errors,
                differing(&result.raw_output)
            );
            println!(
                "decoded:   {} channel bit errors, {} vectors uncorrected, {} bytes differ",
                result.channel_bit_errors,
                result.uncorrected_vectors,
                differing(&result.decoded_output)
            );
        }
        Commands::Decode { received } => {
            let received = parse_bit_vector(received)?;
            check_received_length(&received, cli.m)?;
            let code = ReedMullerCode::new(cli.m)?;
            println!("decoded:   {}", render(&code.decode(&received)?));
        }
    }

    Ok(())
}

fn render(bits: &[i32]) -> String {
    bits.iter().map(|b| b.to_string()).collect()
}
