mod config;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use yt_scrape_core::{export_channel_comments_blocking, ExportProgress, ExportResult, FIELDNAMES};

use config::ScrapeConfig;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Append every comment of a YouTube channel's videos to a pipe-delimited file",
    long_about = None
)]
struct Cli {
    /// Channel to collect; overrides the config file
    channel_id: Option<String>,

    /// Output file (appended to; the header is written only when it does not exist)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// YouTube Data API key
    #[arg(long = "api-key", env = "YOUTUBE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// JSON config file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Follow search pagination instead of reading only the first page of videos
    #[arg(long = "all-videos")]
    all_videos: bool,

    /// Results per search page
    #[arg(long = "search-page-size")]
    search_page_size: Option<u32>,

    /// Request timeout in seconds
    #[arg(long = "timeout")]
    timeout: Option<u64>,

    /// API root, e.g. a local mock server
    #[arg(long = "base-url")]
    base_url: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut ScrapeConfig) {
        if let Some(channel_id) = self.channel_id {
            config.channel_id = channel_id;
        }
        if let Some(output) = self.output {
            config.output_path = output.display().to_string();
        }
        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }
        if self.all_videos {
            config.all_videos = true;
        }
        if let Some(size) = self.search_page_size {
            config.search_page_size = Some(size);
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        config.apply_defaults();
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();
    if cli.search_page_size == Some(0) {
        bail!("--search-page-size must be greater than 0");
    }

    let mut config = ScrapeConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    if config.api_key.trim().is_empty() {
        bail!("no API key: pass --api-key, set YOUTUBE_API_KEY or add api_key to the config file");
    }
    if config.channel_id.trim().is_empty() {
        bail!("no channel id: pass it as an argument or add channel_id to the config file");
    }

    println!(
        "{} {}",
        style("Collecting channel").cyan(),
        style(&config.channel_id).bold()
    );

    let progress_bar = ProgressBar::new(0);
    progress_bar.set_style(
        ProgressStyle::with_template("{bar:30.green} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let bar = progress_bar.clone();
    let mut options = config.to_export_options();
    options.progress_callback = Some(Arc::new(move |progress: ExportProgress| {
        bar.set_length(progress.total);
        bar.set_position(progress.current.saturating_sub(1));
        // println on a hidden bar (stderr not a terminal) drops the line
        bar.suspend(|| println!("{}", progress_line(&progress)));
        bar.set_message(progress.title.clone());
    }));

    let result = export_channel_comments_blocking(options);
    progress_bar.finish_and_clear();
    let result = result.with_context(|| format!("collecting channel {}", config.channel_id))?;
    print_summary(&result);
    Ok(())
}

fn progress_line(progress: &ExportProgress) -> String {
    let count = |value: Option<u64>| value.map_or_else(|| "?".to_string(), |v| v.to_string());
    format!(
        "{} : {} views ({} Comments)",
        progress.title,
        count(progress.view_count),
        count(progress.comment_count)
    )
}

fn print_summary(result: &ExportResult) {
    println!(
        "{} {} ({})",
        style("Channel:").green().bold(),
        result.channel.name,
        result.channel.channel_id
    );
    if result.comments_written == 0 {
        println!(
            "{}",
            style(format!(
                "No comments found across {} videos.",
                result.videos_processed
            ))
            .yellow()
        );
    } else {
        println!(
            "{} {} comments from {} videos to {}",
            style("Wrote").green(),
            result.comments_written,
            result.videos_processed,
            result.output_path.display()
        );
    }
    println!("{} {}", style("Columns:").dim(), FIELDNAMES.join(" | "));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(view_count: Option<u64>, comment_count: Option<u64>) -> ExportProgress {
        ExportProgress {
            current: 1,
            total: 2,
            title: "T1".to_string(),
            view_count,
            comment_count,
        }
    }

    #[test]
    fn progress_line_shows_views_and_comments() {
        assert_eq!(
            progress_line(&progress(Some(10), Some(2))),
            "T1 : 10 views (2 Comments)"
        );
    }

    #[test]
    fn progress_line_marks_hidden_counts() {
        assert_eq!(
            progress_line(&progress(None, Some(0))),
            "T1 : ? views (0 Comments)"
        );
        assert_eq!(progress_line(&progress(Some(5), None)), "T1 : 5 views (? Comments)");
    }
}
