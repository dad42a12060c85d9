//! Test signal generation command.

use clap::{Args, Subcommand};
use std::f64::consts::PI;
use std::path::PathBuf;
use tonalert_io::{WavSpec, write_wav};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a 16-bit mono sine tone
    Tone {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "1000.0")]
        freq: f64,

        /// Peak level in dBFS
        #[arg(long, default_value = "-6.0", allow_hyphen_values = true)]
        level_db: f64,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f64,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Tone {
            output,
            freq,
            level_db,
            sample_rate,
            duration,
        } => {
            if sample_rate == 0 {
                anyhow::bail!("sample rate must be positive");
            }
            if !duration.is_finite() || duration <= 0.0 {
                anyhow::bail!("duration must be positive, got {duration}");
            }
            if !freq.is_finite() || freq < 0.0 {
                anyhow::bail!("frequency must be a non-negative number, got {freq}");
            }

            let spec = WavSpec {
                channels: 1,
                sample_rate,
                bits_per_sample: 16,
            };
            let samples = sine(freq, level_db, sample_rate, duration, spec.full_scale());

            println!(
                "Generating {freq} Hz tone at {level_db} dBFS ({duration}s, {sample_rate} Hz)..."
            );
            write_wav(&output, &samples, spec)?;
            println!("Saved to {}", output.display());
            Ok(())
        }
    }
}

fn sine(freq: f64, level_db: f64, sample_rate: u32, duration: f64, full_scale: u32) -> Vec<i32> {
    let amplitude = 10f64.powf(level_db / 20.0) * f64::from(full_scale);
    let num_samples = (duration * f64::from(sample_rate)).round() as usize;
    (0..num_samples)
        .map(|i| {
            let phase = 2.0 * PI * freq * i as f64 / f64::from(sample_rate);
            (amplitude * phase.sin()).round() as i32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_level() {
        let samples = sine(1000.0, -6.0, 48000, 0.01, 32767);
        assert_eq!(samples.len(), 480);
        let peak = samples.iter().map(|s| s.abs()).max().unwrap();
        // -6 dBFS of 32767
        assert!((16400..=16423).contains(&peak), "peak {peak}");
    }

    #[test]
    fn test_sine_zero_dbfs_reaches_full_scale() {
        let samples = sine(12000.0, 0.0, 48000, 0.001, 32767);
        assert_eq!(samples[1], 32767);
    }
}
