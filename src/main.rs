use base64::{engine::general_purpose, Engine as _};
use clap::Parser;
use ptsevidence::attr::{PaTncAttr, SimpleCompEvid};
use ptsevidence::evidence::{EvidenceJson, EvidenceRecord};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::error::Error;
use std::fs;

#[derive(Parser)]
#[command(author, version, about = "TCG PTS Simple Component Evidence tool")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: PtsEvidenceCli,
}

#[derive(clap::Subcommand)]
enum PtsEvidenceCli {
    Decode(DecodeArgs),
    Encode(EncodeArgs),
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Encoding {
    Binary,
    Hex,
    Base64,
}

#[derive(Debug, clap::Args)]
#[command(author, version, long_about = None,
    about = "Decode a Simple Component Evidence attribute value and print the \
    evidence record as JSON")]
struct DecodeArgs {
    #[arg(short, long, default_value = "evidence.bin")]
    input: String,

    #[arg(short, long, value_enum, default_value_t = Encoding::Binary)]
    encoding: Encoding,
}

#[derive(Debug, clap::Args)]
#[command(author, version, long_about = None,
    about = "Encode the evidence record described in the supplied JSON file \
    as a Simple Component Evidence attribute value")]
struct EncodeArgs {
    #[arg(short, long, default_value = "evidence.json")]
    description: String,

    #[arg(short, long, default_value = "evidence.bin")]
    output: String,

    #[arg(short, long, value_enum, default_value_t = Encoding::Binary)]
    encoding: Encoding,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("logger initialisation failed: {e}");
    }

    match cli.command {
        PtsEvidenceCli::Decode(args) => match decode(&args) {
            Ok(j) => println!("{j}"),
            Err(e) => eprintln!("decoding failed: {e}"),
        },

        PtsEvidenceCli::Encode(args) => match encode(&args) {
            Ok(n) => println!("encoding successful, {n} bytes written to {}", args.output),
            Err(e) => eprintln!("encoding failed: {e}"),
        },
    }
}

fn decode(args: &DecodeArgs) -> Result<String, Box<dyn Error>> {
    let raw: Vec<u8> = fs::read(&args.input)?;

    let value = match args.encoding {
        Encoding::Binary => raw,
        Encoding::Hex => hex::decode(String::from_utf8(raw)?.trim())?,
        Encoding::Base64 => general_purpose::STANDARD.decode(String::from_utf8(raw)?.trim())?,
    };

    let e: EvidenceRecord = SimpleCompEvid::decode(&value)?;

    let j = EvidenceJson::try_from(&e)?.to_json()?;

    Ok(j)
}

fn encode(args: &EncodeArgs) -> Result<usize, Box<dyn Error>> {
    let j = fs::read_to_string(&args.description)?;

    let e = EvidenceRecord::try_from(EvidenceJson::parse(&j)?)?;

    let mut attr = SimpleCompEvid::new(e);
    attr.build()?;

    let out = match args.encoding {
        Encoding::Binary => attr.value().to_vec(),
        Encoding::Hex => hex::encode(attr.value()).into_bytes(),
        Encoding::Base64 => general_purpose::STANDARD.encode(attr.value()).into_bytes(),
    };

    fs::write(&args.output, &out)?;

    Ok(out.len())
}
