//! ELF inspection tool.
//!
//! Prints the headers of an ELF32/ELF64 file, or extracts the contents of a
//! single section by name.

mod cli;
mod print;
mod verbose;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use elfhdr::{ElfError, ElfFile, Options};

use crate::verbose::dprintln;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    verbose::init(cli.quiet, cli.verbose);
    let options = Options::new().verbose(verbose::is_verbose());

    match cli.command {
        cli::Command::Headers(ref args) => cmd_headers(&args.file, options),
        cli::Command::Section(ref args) => {
            cmd_section(&args.file, &args.name, args.output.as_deref(), options)
        }
    }
}

/// Tags a reader error with its stable code so scripts can match on it.
fn tagged(err: ElfError) -> anyhow::Error {
    anyhow::anyhow!("[{}] {err}", err.code())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("failed to open {}", path.display()))
}

// ===========================================================================
// Commands
// ===========================================================================

/// Print the identification, file header, section and program headers.
fn cmd_headers(path: &Path, options: Options) -> Result<()> {
    let mut file = open(path)?;
    let elf = ElfFile::read(&mut file, options)
        .map_err(tagged)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut out = BufWriter::new(io::stdout().lock());
    print::print_elf(&mut out, &elf)?;
    out.flush()?;
    Ok(())
}

/// Extract one section, to a file when `output` is given, else as a hex dump.
fn cmd_section(path: &Path, name: &str, output: Option<&Path>, options: Options) -> Result<()> {
    let file = open(path)?;
    let data = elfhdr::read_section(file, name, options)
        .map_err(tagged)
        .with_context(|| format!("failed to extract {name} from {}", path.display()))?;

    match output {
        Some(out_path) => {
            fs::write(out_path, &data)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            dprintln!("wrote {} bytes of {name} to {}", data.len(), out_path.display());
        }
        None => {
            let mut out = BufWriter::new(io::stdout().lock());
            print::hexdump(&mut out, &data)?;
            out.flush()?;
        }
    }
    Ok(())
}
