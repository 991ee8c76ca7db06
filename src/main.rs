use clap::{Parser, ValueEnum};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

// 导入库模块
use algotrace::config::{Config, PlaybackConfig};
use algotrace::core::{Trace, TraceStep, VizResult};
use algotrace::services::{
    run_algorithm_with, AlgorithmRequest, AlgorithmTrace, PlaybackController, PlaybackPhase,
};
use algotrace::utils::logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser)]
#[command(version, author = "AlgoTrace Contributors", about = "Algorithm execution traces")]
enum Cli {
    /// Run an algorithm request and print its trace
    Run {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run an algorithm request and auto-play its trace
    Play {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the default configuration file
    InitConfig {
        #[arg(short, long, default_value = "algotrace.toml")]
        output: PathBuf,
    },
}

fn load_config(path: Option<&Path>) -> VizResult<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

fn load_request(path: &Path) -> VizResult<AlgorithmRequest> {
    let content = fs::read_to_string(path)?;
    AlgorithmRequest::from_json(&content)
}

fn print_text(trace: &AlgorithmTrace) {
    if trace.is_empty() {
        println!("(empty trace: input cannot be satisfied)");
        return;
    }
    for (index, description) in trace.descriptions() {
        println!("{:>4}. {}", index, description);
    }
    if let AlgorithmTrace::Huffman(outcome) = trace {
        println!();
        for (symbol, code) in &outcome.codes {
            println!("  {:?}: {}", symbol, code);
        }
        println!(
            "  {} bits -> {} bits",
            outcome.original_bits(),
            outcome.compressed_bits()
        );
    }
}

fn print_step<S>(controller: &PlaybackController<S>, total: usize)
where
    S: TraceStep + Send + Sync + 'static,
{
    controller.with_current_step(|step| {
        if let Some(step) = step {
            println!("[{}/{}] {}", step.index(), total, step.description());
        }
    });
}

async fn play<S>(trace: Trace<S>, config: &PlaybackConfig) -> VizResult<()>
where
    S: TraceStep + Send + Sync + 'static,
{
    let controller = PlaybackController::from_config(config);
    let mut updates = controller.subscribe();
    controller.load(trace);
    if controller.is_empty() {
        println!("(empty trace: input cannot be satisfied)");
        return Ok(());
    }

    let total = controller.len();
    let mut printed = updates.borrow_and_update().index;
    print_step(&controller, total);

    if !controller.start_auto_play()? {
        return Ok(());
    }
    while updates.changed().await.is_ok() {
        let position = *updates.borrow_and_update();
        if position.index != printed {
            printed = position.index;
            print_step(&controller, total);
        }
        if position.phase != PlaybackPhase::Playing {
            break;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli {
        Cli::Run {
            input,
            format,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            logging::init(&config.log)?;

            let request = load_request(&input)?;
            info!("Running {} from {}", request.name(), input.display());
            let trace = run_algorithm_with(request, &config.rabin_karp)?;
            match format {
                OutputFormat::Json => println!("{}", trace.to_json()?),
                OutputFormat::Text => print_text(&trace),
            }
            logging::shutdown();
        }
        Cli::Play { input, config } => {
            let config = load_config(config.as_deref())?;
            logging::init(&config.log)?;

            let request = load_request(&input)?;
            info!("Playing {} from {}", request.name(), input.display());
            let playback = &config.playback;
            match run_algorithm_with(request, &config.rabin_karp)? {
                AlgorithmTrace::ShortestPath(trace) => play(trace, playback).await?,
                AlgorithmTrace::AllPairs(trace) => play(trace, playback).await?,
                AlgorithmTrace::Mst(trace) => play(trace, playback).await?,
                AlgorithmTrace::Match(trace) => play(trace, playback).await?,
                AlgorithmTrace::Huffman(outcome) => play(outcome.trace, playback).await?,
            }
            logging::shutdown();
        }
        Cli::InitConfig { output } => {
            Config::default().save(&output)?;
            println!("Default configuration written to {}", output.display());
        }
    }

    Ok(())
}
