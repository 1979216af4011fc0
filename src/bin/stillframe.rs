use std::io::BufRead as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use stillframe::{
    BatchReport, Config, EncodeJob, EncodeProgress, ErrorLog, ProgressSink, WatermarkComposer,
    run_batch,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stillframe", version, about)]
struct Cli {
    /// Configuration file; created with defaults when missing.
    #[arg(long, default_value = Config::FILE_NAME)]
    config: PathBuf,

    /// Exit without waiting for Enter.
    #[arg(long, default_value_t = false)]
    no_wait: bool,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let log = ErrorLog::in_dir(Path::new("."));
    if let Err(e) = log.ensure() {
        tracing::warn!(error = %e, "could not create error log");
    }

    let code = match run(&cli) {
        Ok(report) => {
            println!("Done: {} video(s) written.", report.outputs.len());
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            let msg = format!("{e:#}");
            if let Err(log_err) = log.append(&msg) {
                tracing::warn!(error = %log_err, "could not append to error log");
            }
            eprintln!("error: {msg}");
            std::process::ExitCode::FAILURE
        }
    };

    if !cli.no_wait {
        wait_for_enter();
    }
    code
}

fn run(cli: &Cli) -> anyhow::Result<BatchReport> {
    let cfg = Config::load_or_create(&cli.config)
        .with_context(|| format!("load config '{}'", cli.config.display()))?;

    let mut encoder = cfg.encoder();
    if !encoder.is_available() {
        tracing::warn!(
            program = %encoder.program().display(),
            "ffmpeg did not answer -version; encoding will likely fail"
        );
    }
    let mut progress = BarProgress::default();

    let report = run_batch(
        &cfg,
        || WatermarkComposer::load(&cfg.background_path(), cfg.watermark_style()),
        &mut encoder,
        &mut progress,
    )
    .context("batch failed")?;
    Ok(report)
}

fn wait_for_enter() {
    println!("Press Enter to exit...");
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}

#[derive(Default)]
struct BarProgress {
    bar: Option<ProgressBar>,
}

impl ProgressSink for BarProgress {
    fn begin(&mut self, job: &EncodeJob, total: Option<Duration>) {
        let bar = match total {
            Some(_) => {
                let bar = ProgressBar::new(100);
                bar.set_style(
                    ProgressStyle::with_template(
                        "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {wide_msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            }
        };
        let name = job
            .output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        bar.set_message(name);
        self.bar = Some(bar);
    }

    fn progress(&mut self, progress: &EncodeProgress) {
        let Some(bar) = &self.bar else {
            return;
        };
        match progress.percent {
            Some(p) => bar.set_position(p.round() as u64),
            None => bar.tick(),
        }
    }

    fn finish(&mut self, _job: &EncodeJob, ok: bool) {
        if let Some(bar) = self.bar.take() {
            if ok {
                bar.finish();
            } else {
                bar.abandon();
            }
        }
    }
}
