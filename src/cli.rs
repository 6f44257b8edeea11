use crate::{
    config::Config,
    engine::python::PythonPipeline,
    extract::extract_text_from_pdf,
    pipeline::Pipeline,
    report,
    util::ensure_dir,
};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const USAGE: &str = "Usage: pdf-quizgen <pdf_path>";

#[derive(Parser, Debug)]
#[command(name = "pdf-quizgen")]
#[command(about = "Generate quiz questions from the text of a PDF")]
pub struct Args {
    /// PDF file to read.
    pub input: Option<PathBuf>,

    /// Anything after the PDF path is ignored.
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// Path to config TOML. If omitted, uses ./pdf-quizgen.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Runs the program and returns the process exit code.
pub fn dispatch(args: Args) -> Result<i32> {
    let mut stdout = std::io::stdout().lock();
    let Some(input) = args.input.as_deref() else {
        return Ok(usage(&mut stdout)?);
    };

    let cfg = Config::resolve(args.config.as_deref())?;
    let _guard = init_logging(&args, &cfg)?;

    info!("input={}", input.display());
    if !args.extra.is_empty() {
        debug!("ignoring extra arguments: {:?}", args.extra);
    }
    let text = extract_text_from_pdf(input)?;

    let generator = PythonPipeline::spawn(&cfg)?;
    let mut pipeline = Pipeline::new(generator);
    let questions = pipeline.run_text(&text)?;

    report::write_questions(&mut stdout, &questions)?;
    Ok(0)
}

pub fn usage<W: Write>(out: &mut W) -> std::io::Result<i32> {
    writeln!(out, "{USAGE}")?;
    Ok(1)
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries the questions, so console logs go to stderr.
    let ansi = resolve_ansi(&cfg.logging.color, std::io::stderr().is_terminal());
    let console_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(ansi)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = match resolve_log_path(cfg) {
        Some(path) => {
            let parent = path.parent().unwrap_or_else(|| Path::new("."));
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent)?;
            }
            let file = std::fs::File::create(&path)
                .with_context(|| format!("create log file: {}", path.display()))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

/// `logging.color`: "always", "never", or anything else for auto-detection.
fn resolve_ansi(mode: &str, is_terminal: bool) -> bool {
    match mode.trim().to_ascii_lowercase().as_str() {
        "always" => true,
        "never" => false,
        _ => is_terminal,
    }
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file || cfg.logging.file_path.is_empty() {
        return None;
    }
    Some(PathBuf::from(&cfg.logging.file_path))
}
