//! `osd`: inspect and convert LLSD documents.
//!
//! Usage:
//!   osd detect <file|->
//!   osd convert <file|-> --to binary|xml|json|notation [--pretty] [--no-header] [--declaration]
//!   osd get <file|-> <path>

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use osd::binary::BinaryOptions;
use osd::json::JsonOptions;
use osd::notation::NotationOptions;
use osd::xml::XmlOptions;
use osd::{Osd, OsdFormat};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "osd", about = "LLSD structured data tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sniffed wire format.
    Detect { input: PathBuf },
    /// Re-encode a document in another format.
    Convert {
        input: PathBuf,
        #[arg(long)]
        to: OsdFormat,
        #[arg(long)]
        pretty: bool,
        /// Omit the binary header line.
        #[arg(long)]
        no_header: bool,
        /// Emit an XML declaration.
        #[arg(long)]
        declaration: bool,
    },
    /// Print the value at a `/`-separated path, in notation.
    Get { input: PathBuf, path: String },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> osd::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect { input } => {
            let data = read_input(&input)?;
            println!("{}", osd::detect(&data));
        }
        Commands::Convert {
            input,
            to,
            pretty,
            no_header,
            declaration,
        } => {
            let value = osd::deserialize(&read_input(&input)?)?;
            let out = encode(&value, to, pretty, no_header, declaration);
            debug!(format = %to, len = out.len(), "converted");
            let mut stdout = io::stdout().lock();
            stdout.write_all(&out)?;
            if to != OsdFormat::Binary {
                stdout.write_all(b"\n")?;
            }
        }
        Commands::Get { input, path } => {
            let value = osd::deserialize(&read_input(&input)?)?;
            println!("{}", osd::notation::serialize(&value.pointer(&path)));
        }
    }
    Ok(())
}

fn encode(value: &Osd, to: OsdFormat, pretty: bool, no_header: bool, declaration: bool) -> Vec<u8> {
    match to {
        OsdFormat::Binary => {
            osd::binary::serialize_with(value, BinaryOptions { header: !no_header })
        }
        OsdFormat::Xml => osd::xml::serialize_with(
            value,
            XmlOptions {
                declaration,
                indent: pretty.then_some(2),
            },
        )
        .into_bytes(),
        OsdFormat::Json => osd::json::serialize_with(value, JsonOptions { pretty }).into_bytes(),
        OsdFormat::Notation => osd::notation::serialize_with(
            value,
            NotationOptions {
                pretty,
                ..NotationOptions::default()
            },
        )
        .into_bytes(),
    }
}

/// `-` reads stdin.
fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    if path.as_os_str() == "-" {
        io::stdin().read_to_end(&mut data)?;
    } else {
        File::open(path)?.read_to_end(&mut data)?;
    }
    Ok(data)
}
