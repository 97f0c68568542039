use clap::Parser;
use std::fs;
use std::path::PathBuf;

use viewtree::io_utils::{cli_hint, io_cli_error};
use viewtree::{decode_payload, envelope, extract_viewstate};

/// Triage a captured request body: report whether it carries a decodable
/// `__VIEWSTATE` and show the trailing signature.
#[derive(Parser)]
struct Args {
    /// Captured urlencoded request body file.
    body: PathBuf,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let body = fs::read_to_string(&args.body)
        .map_err(|e| io_cli_error("reading body file", &args.body, e))?;

    let field = match extract_viewstate(&body) {
        Some(field) => field,
        None => {
            println!("no __VIEWSTATE field");
            return Ok(());
        }
    };
    println!("__VIEWSTATE present ({} chars)", field.len());

    let raw = match decode_payload(&field) {
        Ok(raw) => raw,
        Err(e) => {
            println!("undecodable: {e}");
            return Ok(());
        }
    };
    match envelope::split(&raw) {
        Ok(env) => {
            println!("envelope ok, {} body bytes", env.body.len());
            println!("signature {}", envelope::signature_hex(env.signature));
        }
        Err(e) => println!("invalid envelope: {}", cli_hint(&e)),
    }
    Ok(())
}
