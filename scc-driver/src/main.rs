//! SubC Compiler Driver
//!
//! Main entry point for the SubC compiler: reads a source file, parses
//! it, generates 68000 assembly, and writes the result next to the
//! input (or wherever `--output` points).

use clap::Parser;
use scc_backend::CodeGen;
use scc_common::CompilerError;
use scc_frontend::Frontend;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "scc")]
#[command(about = "SubC Compiler")]
#[command(version = "0.1.0")]
struct Cli {
    /// Input SubC source file
    input: PathBuf,

    /// Output assembly file (default: input with .X68 extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the parsed AST as JSON to stdout before generating code
    #[arg(long)]
    dump_ast: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = compile(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn compile(cli: &Cli) -> Result<(), CompilerError> {
    let source = fs::read_to_string(&cli.input)?;
    let program = Frontend::parse_source(&source)?;

    if cli.dump_ast {
        let json = serde_json::to_string_pretty(&program).map_err(|e| {
            CompilerError::IoError {
                message: e.to_string(),
            }
        })?;
        println!("{json}");
    }

    let emit = CodeGen::new().generate(&program)?;

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input));
    emit.save(&output_path)?;
    println!("Assembly written to: {}", output_path.display());

    Ok(())
}

/// Derive the output path from the input path: same name, `.X68`
/// extension (the EASy68K source suffix)
fn default_output(input: &Path) -> PathBuf {
    let mut path = input.to_path_buf();
    path.set_extension("X68");
    path
}
