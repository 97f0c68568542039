use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use viewtree::io_utils::{io_cli_error, simple_cli_error};
use viewtree::{build_from_base64, extract_viewstate, render_text};

/// Decode an ASP.NET `__VIEWSTATE` value into an inspectable tree.
#[derive(Parser)]
struct Args {
    /// File holding the URL-decoded base64 value, or `-` for stdin.
    input: Option<PathBuf>,
    /// Treat the input as a whole urlencoded request body and extract the
    /// `__VIEWSTATE` field from it first.
    #[arg(long)]
    form: bool,
    /// Emit the result as JSON instead of an indented text tree.
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let text = read_input(args.input.as_deref())?;
    let field = if args.form {
        match extract_viewstate(&text) {
            Some(value) => value,
            None => return Err(simple_cli_error("no __VIEWSTATE field in body").into()),
        }
    } else {
        text
    };

    // Undecodable content is still a result: the tree is empty, the
    // diagnostic says why, and the exit status stays zero.
    let result = build_from_base64(&field);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_text(&result));
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        Some(p) if p != Path::new("-") => {
            Ok(fs::read_to_string(p).map_err(|e| io_cli_error("reading input file", p, e))?)
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
