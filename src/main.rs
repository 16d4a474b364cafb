// ABOUTME: Main entry point for the slideshow-agent program.
// ABOUTME: Provides CLI interface and writes the generated slideshow to disk.

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::{info, LevelFilter};
use std::path::PathBuf;

use slideshow_agent::{serve, utils, Config, SlideshowAgent};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Topic of the presentation
    topic: String,

    /// Number of slides to generate (capped at 70)
    #[arg(short = 'n', long, default_value_t = 10)]
    slides: u32,

    /// Path to output HTML file (defaults to slideshow_<topic>_<timestamp>.html)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Model identifier to request from the LLM service
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature for the LLM service
    #[arg(long)]
    temperature: Option<f32>,

    /// Serve the generated file on a local HTTP server after writing it
    #[arg(long)]
    serve: bool,

    /// Port for the local preview server
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Output verbosity: info (default), debug (-v), trace (-vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env().with_overrides(cli.model, cli.temperature);
    let agent = SlideshowAgent::from_config(&config)?;
    info!("Agent initialized successfully");

    let state = agent.generate_state(&cli.topic, cli.slides)?;

    let output = cli
        .output
        .unwrap_or_else(|| utils::default_output_path(&cli.topic));
    let size = utils::write_html_to_file(&state.html_output, &output)
        .with_context(|| format!("Failed to write output file {:?}", output))?;

    println!("Slideshow created successfully!");
    println!("File: {}", output.display());
    println!("Size: {} bytes", size);
    println!("Slides: {}", state.slides_content.len());

    if cli.serve {
        let server = serve::bind("127.0.0.1", cli.port)?;
        serve::serve_file(&server, &output, None)?;
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(level_for(cli.verbose))
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
