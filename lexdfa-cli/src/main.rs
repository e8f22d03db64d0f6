use clap::Parser;
use lexdfa::{CompileError, Pattern};
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

/// Compiles a patterns file into a minimized lexer table and prints it.
///
/// Each non-blank, non-comment line of the input file is `LABEL<TAB>PATTERN`:
/// a positive integer label followed by a tab and a `lexdfa` pattern. Lines
/// starting with `#` are treated as comments.
#[derive(Debug, Parser)]
#[command(name = "lexdfa", version, about)]
struct Args {
    /// Path to the patterns file.
    patterns: PathBuf,
}

#[derive(Debug, Error)]
enum Error {
    #[error("error reading {0}: {1}")]
    File(PathBuf, io::Error),
    #[error("{path}:{line}: expected LABEL<TAB>PATTERN")]
    Malformed { path: PathBuf, line: usize },
    #[error("{path}:{line}: label {label:?} is not a valid non-negative integer")]
    BadLabel { path: PathBuf, line: usize, label: String },
    #[error("compiling patterns from {path}: {source}")]
    Compile { path: PathBuf, source: CompileError },
}

fn load_patterns(path: &Path) -> Result<Vec<Pattern>, Error> {
    let contents = fs::read_to_string(path).map_err(|e| Error::File(path.to_path_buf(), e))?;

    let mut patterns = Vec::new();
    for (index, raw_line) in contents.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (label, pattern) = line.split_once('\t').ok_or_else(|| Error::Malformed {
            path: path.to_path_buf(),
            line: index + 1,
        })?;

        let label = label.parse().map_err(|_| Error::BadLabel {
            path: path.to_path_buf(),
            line: index + 1,
            label: label.to_string(),
        })?;

        patterns.push(Pattern::from_ascii(pattern, label));
    }

    Ok(patterns)
}

fn run(args: &Args) -> Result<(), Error> {
    let patterns = load_patterns(&args.patterns)?;
    let machine = lexdfa::compile(&patterns).map_err(|source| Error::Compile {
        path: args.patterns.clone(),
        source,
    })?;
    println!("{}", machine.to_text());
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
