//! fencematch - a small terminal editor that highlights matching fences
//!
//! Every cursor move or edit is reported to the fence highlighter, which
//! marks the bracket left of the cursor and its partner.

mod command;
mod display;
mod document;
mod editor;
mod input;
mod logging;
mod surface;
mod terminal;

use std::env;
use std::path::PathBuf;
use std::process;

use fencematch::{Result, Settings, ViewId};
use tracing::{info, warn};

use document::Document;
use editor::EditorState;
use terminal::Terminal;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            _ => {}
        }
    }

    let _log_guard = logging::init();

    let view = ViewId(0);
    let document = match args.get(1).filter(|a| !a.starts_with('-')) {
        Some(arg) => {
            let path = PathBuf::from(arg);
            match Document::from_file(view, &path) {
                Ok(doc) => doc,
                Err(e) => {
                    // Start empty under that name
                    warn!(path = %path.display(), "could not open file: {}", e);
                    Document::new(view, arg.as_str())
                }
            }
        }
        None => Document::new(view, "*scratch*"),
    };

    let settings = Settings::load();
    info!(?settings, document = document.name(), "starting");

    let mut terminal = Terminal::new()?;
    let mut editor = EditorState::new(document, settings);
    editor.run(&mut terminal)?;

    Ok(())
}

fn print_usage() {
    println!("fencematch {} - matching fence highlighter", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: fencematch [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!();
    println!("Key bindings:");
    println!("  C-f, Right     Move forward one character");
    println!("  C-b, Left      Move backward one character");
    println!("  C-n, Down      Move to next line");
    println!("  C-p, Up        Move to previous line");
    println!("  C-a, Home      Move to beginning of line");
    println!("  C-e, End       Move to end of line");
    println!("  M-<  M->       Move to beginning / end of buffer");
    println!("  M-C-f          Jump past the matching fence");
    println!("  C-x f          Toggle fence highlighting");
    println!("  C-x c          Cycle highlight color");
    println!("  C-x C-s        Save settings to {}", settings_location());
    println!("  C-x C-c        Quit");
    println!();
    println!("Logs are written to {}", env::temp_dir().join(logging::LOG_FILE).display());
}

fn settings_location() -> String {
    Settings::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "~/.fencematch.toml".to_string())
}

fn print_version() {
    println!("fencematch {}", env!("CARGO_PKG_VERSION"));
}
