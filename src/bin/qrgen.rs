//! Command-line QR code generator.
//!
//! Encodes a URL into SVG and/or PNG files. With `--server`, the URL is first
//! shortened through a running qr-shortlink instance; otherwise the
//! normalized URL is encoded directly.
//!
//! # Usage
//!
//! ```bash
//! # Prompt for the URL, write an SVG into the current directory
//! cargo run --bin qrgen
//!
//! # PNG and SVG, 1024 px, transparent background
//! cargo run --bin qrgen -- example.com/page --format both --size 1024 --transparent
//!
//! # Shorten through a running server first
//! cargo run --bin qrgen -- example.com/page --server http://localhost:3000
//! ```
//!
//! # Features
//!
//! - **Interactive Prompts**: URL input and overwrite confirmation
//! - **Retries**: Server errors are retried with linear backoff
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use qr_shortlink::application::services::QrService;
use qr_shortlink::client::ShortenApiClient;
use qr_shortlink::qr::{ExportFormat, ExportOptions, MAX_PNG_SIZE, MIN_PNG_SIZE, parse_hex_color};
use qr_shortlink::utils::url_normalizer::normalize_valid;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use colored::*;
use dialoguer::{Confirm, Input};
use std::path::{Path, PathBuf};

/// Generate QR codes for URLs.
#[derive(Parser)]
#[command(name = "qrgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL to encode (prompted for when omitted)
    url: Option<String>,

    /// Base URL of a qr-shortlink server used to shorten the URL first
    #[arg(short, long)]
    server: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Svg)]
    format: FormatArg,

    /// Edge length in pixels
    #[arg(long, default_value_t = 512,
          value_parser = clap::value_parser!(u32).range(MIN_PNG_SIZE as i64..=MAX_PNG_SIZE as i64))]
    size: u32,

    /// Drop the white background
    #[arg(short, long)]
    transparent: bool,

    /// PNG background colour (#rgb or #rrggbb)
    #[arg(short, long)]
    background: Option<String>,

    /// Directory for the generated files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Overwrite existing files without asking
    #[arg(short = 'y', long)]
    yes: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Svg,
    Png,
    Both,
}

impl FormatArg {
    fn formats(self) -> Vec<ExportFormat> {
        match self {
            FormatArg::Svg => vec![ExportFormat::Svg],
            FormatArg::Png => vec![ExportFormat::Png],
            FormatArg::Both => vec![ExportFormat::Png, ExportFormat::Svg],
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    println!("{}", "🔳 QR Code Generator".bright_blue().bold());
    println!();

    let raw_url = match cli.url.clone() {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL to encode")
            .interact_text()?,
    };

    let Some(long_url) = normalize_valid(&raw_url) else {
        bail!("Invalid URL: '{}'", raw_url.trim());
    };

    let payload = match &cli.server {
        Some(server) => shorten_via_server(server, &long_url).await?,
        None => {
            println!("  {} {}", "Encoding:".bright_white(), long_url.cyan());
            long_url
        }
    };

    let background = match cli.background.as_deref() {
        Some(raw) => {
            Some(parse_hex_color(raw).with_context(|| format!("Invalid background colour '{raw}'"))?)
        }
        None => None,
    };

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Failed to create {}", cli.out_dir.display()))?;

    let service = QrService::new();
    println!();

    for format in cli.format.formats() {
        let options = ExportOptions {
            format,
            size: cli.size,
            transparent: cli.transparent,
            background,
        };

        let exported = service
            .export(&payload, &options)
            .map_err(|e| anyhow::anyhow!("Failed to render QR code: {e}"))?;

        let path = cli.out_dir.join(&exported.filename);

        if !confirm_overwrite(&path, cli.yes)? {
            println!("  {} {}", "⏭  Skipped".yellow(), path.display());
            continue;
        }

        std::fs::write(&path, &exported.bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        println!(
            "  {} {} ({} bytes)",
            "✅ Saved".green().bold(),
            path.display().to_string().cyan(),
            exported.bytes.len().to_string().bright_black()
        );
    }

    println!();
    Ok(())
}

/// Shortens through a running server and returns the string to encode.
async fn shorten_via_server(server: &str, long_url: &str) -> Result<String> {
    let client = ShortenApiClient::new(server)?;

    println!(
        "  {} {}",
        "Shortening via".bright_white(),
        client.endpoint().bright_black()
    );

    let response = client
        .shorten(long_url)
        .await
        .context("Shorten request failed")?;

    if let Some(warning) = &response.warning {
        println!("  {} {}", "⚠️  Shortening failed:".yellow(), warning);
    }

    if let Some(short_url) = &response.short_url {
        println!("  {} {}", "Short URL:".bright_white(), short_url.bright_yellow().bold());
    }

    println!("  {} {}", "Encoding:".bright_white(), response.qr_url.cyan());

    Ok(response.qr_url)
}

/// Asks before replacing an existing file unless `skip_confirm`.
fn confirm_overwrite(path: &Path, skip_confirm: bool) -> Result<bool> {
    if skip_confirm || !path.exists() {
        return Ok(true);
    }

    Ok(Confirm::new()
        .with_prompt(format!("{} exists. Overwrite?", path.display()))
        .default(false)
        .interact()?)
}
