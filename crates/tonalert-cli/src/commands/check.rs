//! Spectral peak check of a WAV file.

use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;
use tonalert_analysis::{AnalysisConfig, AnalysisMode, AnalysisReport, Analyzer, export_csv};
use tonalert_config::{Profile, ProfileMode, RangeConfig, resolve_profile};
use tonalert_io::read_waveform;

use super::common::{ModeArg, format_db, parse_range};

/// Exit status when the warning level is exceeded and `--fail-on-warning` is set.
const WARNING_EXIT_CODE: u8 = 2;

/// Analyse a WAV file against a warning level.
#[derive(Args)]
pub struct CheckArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Profile name or path to a profile TOML file
    #[arg(short, long, value_name = "NAME|PATH")]
    pub profile: Option<String>,

    /// Analysis mode (overrides the profile)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// FFT window length in samples (fixed mode)
    #[arg(long)]
    pub window_size: Option<usize>,

    /// Warning level in dB (dBFS in fixed mode, dB above baseline in full mode)
    #[arg(long, allow_hyphen_values = true)]
    pub threshold: Option<f32>,

    /// Restrict the peak search to LOW:HIGH Hz (inclusive)
    #[arg(long, value_name = "LOW:HIGH", value_parser = parse_range)]
    pub range: Option<(f64, f64)>,

    /// Print the peak/warning summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the spectrum to a CSV file
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Exit with status 2 when the warning level is exceeded
    #[arg(long)]
    pub fail_on_warning: bool,
}

/// Run the check command.
pub fn run(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let config = build_config(&args)?;
    let waveform = read_waveform(&args.input)
        .map_err(|e| anyhow::anyhow!("failed to read '{}': {e}", args.input.display()))?;

    tracing::info!(
        file = %args.input.display(),
        sample_rate = waveform.sample_rate(),
        samples = waveform.len(),
        "loaded waveform"
    );

    let report = Analyzer::new(config).analyze(&waveform)?;

    if let Some(path) = &args.csv {
        export_csv(&report, path)
            .map_err(|e| anyhow::anyhow!("failed to write '{}': {e}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.summary())?);
    } else {
        print_report(&args, &config, &report);
    }

    if args.fail_on_warning && report.verdict.exceeded {
        return Ok(ExitCode::from(WARNING_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

/// Profile (or built-in defaults) with command-line overrides applied.
fn build_config(args: &CheckArgs) -> anyhow::Result<AnalysisConfig> {
    let mut profile = match &args.profile {
        Some(name) => resolve_profile(name)?,
        None => Profile::new("default"),
    };

    if let Some(mode) = args.mode {
        let mode = ProfileMode::from(mode);
        if mode != profile.mode {
            // The profile's level belongs to the other scale
            profile.mode = mode;
            profile.warning_threshold_db = None;
        }
    }
    if let Some(window_size) = args.window_size {
        if profile.mode == ProfileMode::FullSignal {
            tracing::warn!(window_size, "--window-size has no effect in full mode");
        }
        profile.window_size = window_size;
    }
    if let Some(threshold) = args.threshold {
        profile.warning_threshold_db = Some(threshold);
    }
    if let Some((low_hz, high_hz)) = args.range {
        profile.frequency_range = Some(RangeConfig { low_hz, high_hz });
    }

    Ok(profile.to_analysis_config()?)
}

fn print_report(args: &CheckArgs, config: &AnalysisConfig, report: &AnalysisReport) {
    let mode = match config.mode() {
        AnalysisMode::FixedWindow { window_size } => {
            format!("fixed window ({window_size} samples, Hann)")
        }
        AnalysisMode::FullSignal => "full signal".to_string(),
    };

    println!("File:       {}", args.input.display());
    println!("Mode:       {mode}");
    println!("Bins:       {}", report.searched().len());
    if let Some(offset) = report.baseline_offset_db {
        println!("Baseline:   {} dB offset", format_db(offset));
    }
    println!(
        "Peak:       {} {} at {:.2} Hz",
        format_db(report.peak.amplitude_db),
        report.scale,
        report.peak.frequency_hz
    );
    println!();
    println!("{}", report.verdict.message);
}
