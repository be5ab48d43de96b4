//! CLI entry point for the quadtree image vectorizer

use clap::Parser;
use quadtile::io::cli::{Cli, FileProcessor};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    if let Err(error) = processor.process() {
        log::error!("{error}");
    }
}
