mod logging;

use aprs_core::config::TxConfig;
use aprs_core::output::write_samples;
use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use logging::{forward_signal_log, LogFormat, StructuredLogger};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// Generate an APRS AFSK/FM baseband signal as raw IQ or audio samples.
#[derive(Parser, Debug)]
#[command(author, version, about = "APRS IQ baseband signal generator", long_about = None)]
struct Cli {
    /// Source callsign, optionally with an SSID (e.g. N0CALL-9)
    #[arg(short = 'c', long)]
    callsign: String,

    /// Destination callsign
    #[arg(short = 'd', long, default_value = "APRS")]
    destination: String,

    /// Comma-separated digipeater path, up to 8 entries
    #[arg(short = 'p', long, default_value = "WIDE1-1,WIDE2-1")]
    path: String,

    /// Output file path; defaults to stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output sample format: f32, s8 or pcm
    #[arg(short = 'f', long, default_value = "f32")]
    format: String,

    /// Log the raw framed bit sequence to the diagnostic stream
    #[arg(short = 'v', long)]
    debug: bool,

    /// Structured log line format
    #[arg(long, default_value = "pretty")]
    log_format: String,

    /// APRS information-field payload text
    payload: String,
}

fn run(cli: Cli, logger: &mut StructuredLogger) -> Result<()> {
    let cfg = TxConfig::build(
        &cli.callsign,
        Some(cli.destination.as_str()),
        Some(cli.path.as_str()),
        cli.payload.into_bytes(),
        &cli.format,
        cli.debug,
        None,
    )
    .map_err(|e| eyre!(e))?;

    logger.info(format!(
        "generating {:?} samples for {} -> {}",
        cfg.format,
        cfg.callsign.base(),
        cfg.destination.base()
    ))?;

    let output = aprs_core::generate_iq(&cfg).map_err(|e| eyre!(e))?;
    forward_signal_log(&output.log, logger)?;

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout()),
    };

    write_samples(cfg.format, &output.audio, output.iq.as_deref(), &mut writer)?;
    writer.flush()?;

    logger.info(format!(
        "wrote {} audio samples{}",
        output.audio.len(),
        output
            .iq
            .as_ref()
            .map(|iq| format!(", {} iq samples", iq.len()))
            .unwrap_or_default()
    ))?;

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let log_format = LogFormat::from_str(&cli.log_format).unwrap_or(LogFormat::Pretty);
    let mut logger = StructuredLogger::new(log_format);

    if let Err(err) = run(cli, &mut logger) {
        logger.error(err.to_string()).ok();
        std::process::exit(1);
    }

    Ok(())
}
