use std::{
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
};

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{error, info};
use shared::serialization::{encoding_by_name, BitWriter};

pub mod script;


/// Encodes a value script into a big-endian bit stream.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Text encoding for `char` and `str` directives.
    #[arg(short, long, default_value = "utf-8")]
    encoding: String,

    /// Write here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a hex dump instead of raw bytes.
    #[arg(short = 'x', long)]
    hex: bool,

    /// Script to read; stdin when absent or `-`.
    script: Option<PathBuf>,
}

impl Args {
    fn script_path(&self) -> Option<&PathBuf> {
        self.script.as_ref().filter(|path| path.as_os_str() != "-")
    }
}

fn main() {
    if let Err(e) = init_logger() {
        eprintln!("Logger setup failed: {e}");
    }

    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let text = match args.script_path() {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("cannot read stdin")?;
            text
        }
    };
    let directives = script::parse_script(&text)?;

    let label = args.encoding.as_str();
    let encoding = encoding_by_name(label).ok_or_else(|| anyhow!("unknown encoding '{label}'"))?;
    info!("Encoding {} directives with {}", directives.len(), encoding.name());

    if args.hex {
        let bytes = script::encode(&directives, BitWriter::with_encoding(Vec::new(), encoding))?;
        let dump = script::to_hex(&bytes);
        match &args.output {
            Some(path) => std::fs::write(path, dump + "\n").with_context(|| format!("cannot write {}", path.display()))?,
            None => println!("{dump}"),
        }
        return Ok(());
    }

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path).with_context(|| format!("cannot create {}", path.display()))?),
        None => Box::new(io::stdout().lock()),
    };
    let mut sink = script::encode(&directives, BitWriter::with_encoding(BufWriter::new(sink), encoding))?;
    sink.flush()?;
    Ok(())
}

fn init_logger() -> anyhow::Result<()> {
    let level = std::env::var("BITDUMP_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(log::LevelFilter::Info);

    // Stdout carries the encoded stream, so logs go to stderr.
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{} : {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;

    Ok(())
}
