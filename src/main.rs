//! huffpack CLI
//!
//! ```bash
//! huffpack compress notes.txt notes.huff
//! huffpack decompress notes.huff notes.txt
//! huffpack --log-level debug --no-annotate compress notes.txt notes.huff
//! huffpack queue insert 5:2 insert 9:1 extract build 3:3 4:1 peek
//! ```

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use huffpack::{queue_script, CodecConfig, HuffmanCodec, ScriptQueue};

#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(version)]
#[command(about = "Huffman file compressor", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Leave printable-symbol annotations out of the header
    #[arg(long, global = true)]
    no_annotate: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file
    Compress { input: PathBuf, output: PathBuf },
    /// Decompress a file produced by `compress`
    Decompress { input: PathBuf, output: PathBuf },
    /// Run a priority queue script: insert v:p, extract, peek, decrease v:p, build v:p..., empty, dump
    Queue {
        #[arg(allow_hyphen_values = true)]
        ops: Vec<String>,
    },
}

fn main() {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to set tracing subscriber");
    }

    if let Err(e) = run(args) {
        error!(category = e.category(), "{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> huffpack::Result<()> {
    let mut config = match &args.config {
        Some(path) => CodecConfig::from_file(path)?,
        None => CodecConfig::default(),
    };
    if args.no_annotate {
        config = config.with_annotations(false);
    }
    let codec = HuffmanCodec::new(config);

    match &args.command {
        Command::Compress { input, output } => {
            let summary = codec.compress_file(input, output)?;
            println!(
                "Done. {} bytes -> {} bytes ({} codes)",
                summary.total_symbols,
                summary.compressed_bytes(),
                summary.dictionary_size
            );
        }
        Command::Decompress { input, output } => {
            let summary = codec.decompress_file(input, output)?;
            println!("Done. Recovered {} bytes", summary.symbols_decoded);
        }
        Command::Queue { ops } => {
            let script = queue_script::parse_script(ops.as_slice())?;
            let mut queue = ScriptQueue::new();
            queue_script::run_script(&mut queue, &script, &mut io::stdout().lock())?;
        }
    }
    Ok(())
}
