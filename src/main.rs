use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use motion_profile_editor::console::{execute, Command, TextSink, HELP};
use motion_profile_editor::{EditorConfig, MotionProfileEditor, ScurvePlanner};

/// Interactive S-curve motion profile editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// read commands from file instead of from stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// enable debug messages
    #[arg(short, long)]
    verbose: bool,

    /// print without ANSI colours
    #[arg(long)]
    plain: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter(None, log::LevelFilter::Debug);
    } else {
        builder.filter(None, log::LevelFilter::Warn);
    }
    builder.init();

    let config = match &args.config {
        Some(path) => {
            info!("loading settings from {}", path.display());
            EditorConfig::load(path)?
        }
        None => EditorConfig::default(),
    };

    let mut sink = TextSink::new(io::stdout(), config.theme);
    if args.plain {
        sink = sink.plain();
    }
    let mut editor = MotionProfileEditor::new(&config, ScurvePlanner, sink)?;

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(command) => {
                execute(&mut editor, &command);
            }
            Err(err) => warn!("{err}"),
        }
    }
    Ok(())
}
