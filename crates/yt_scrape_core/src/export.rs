use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Builder;
use tracing::info;

use crate::client::{
    ClientOptions, YouTubeApi, YouTubeClient, DEFAULT_API_VERSION, DEFAULT_BASE_URL,
    DEFAULT_SERVICE_NAME,
};
use crate::csv_utils::append_rows;
use crate::errors::{ExportError, ScrapeError};
use crate::fetch::{fetch_channel_info, fetch_video_comments, fetch_video_list, VideoListOptions};
use crate::models::ChannelInfo;
use crate::rows::{merge_list, Record, Row, FIELDNAMES};

#[derive(Debug, Clone)]
pub struct ExportProgress {
    pub current: u64,
    pub total: u64,
    pub title: String,
    pub view_count: Option<u64>,
    pub comment_count: Option<u64>,
}

pub type ProgressCallback = Arc<dyn Fn(ExportProgress) + Send + Sync + 'static>;

#[derive(Clone)]
pub struct ExportOptions {
    pub channel_id: String,
    pub output_path: PathBuf,
    pub api_key: String,
    pub service_name: String,
    pub api_version: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub all_videos: bool,
    pub search_page_size: Option<u32>,
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            channel_id: String::new(),
            output_path: PathBuf::new(),
            api_key: String::new(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            all_videos: false,
            search_page_size: None,
            progress_callback: None,
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.channel_id.trim().is_empty() {
            return Err(ScrapeError::InvalidConfig("channel id is empty".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ScrapeError::InvalidConfig("output path is empty".to_string()));
        }
        if self.search_page_size == Some(0) {
            return Err(ScrapeError::InvalidConfig(
                "search page size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone(),
            service_name: self.service_name.clone(),
            api_version: self.api_version.clone(),
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    fn video_list_options(&self) -> VideoListOptions {
        VideoListOptions {
            with_info: true,
            all_pages: self.all_videos,
            page_size: self.search_page_size,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportResult {
    pub output_path: PathBuf,
    pub channel: ChannelInfo,
    pub videos_processed: u64,
    pub comments_written: u64,
}

pub async fn export_channel_comments(options: ExportOptions) -> Result<ExportResult, ExportError> {
    options.validate()?;
    let client = YouTubeClient::new(options.client_options())?;
    export_with_api(&client, &options).await
}

/// Runs the export against any [`YouTubeApi`] implementation.
///
/// Each video's rows are appended as soon as its comments are fetched, so a
/// failure on one video leaves the rows of every earlier video in the file.
pub async fn export_with_api<A: YouTubeApi>(
    api: &A,
    options: &ExportOptions,
) -> Result<ExportResult, ExportError> {
    options.validate()?;
    let channel_id = options.channel_id.as_str();

    let channel = fetch_channel_info(api, channel_id)
        .await
        .map_err(|err| ExportError::from(err).context(format!("fetching channel {channel_id}")))?;
    info!(
        channel_id,
        name = %channel.name,
        videos = channel.video_count,
        "channel resolved"
    );

    let videos = fetch_video_list(api, channel_id, options.video_list_options())
        .await
        .map_err(|err| ExportError::from(err).context("listing channel videos"))?;
    let video_cells: Vec<Row> = videos.iter().map(Record::cells).collect();
    let video_rows = merge_list(&channel.cells(), &video_cells);

    let total = videos.len() as u64;
    let mut comments_written: u64 = 0;
    let mut videos_processed: u64 = 0;
    for (video, video_row) in videos.iter().zip(&video_rows) {
        let stats = video.statistics.as_ref();
        let view_count = stats.and_then(|s| s.view_count);
        let comment_count = stats.and_then(|s| s.comment_count);
        info!(
            video_id = %video.video_id,
            title = %video.title,
            views = ?view_count,
            comments = ?comment_count,
            "collecting comments"
        );
        if let Some(callback) = options.progress_callback.as_ref() {
            callback(ExportProgress {
                current: videos_processed + 1,
                total,
                title: video.title.clone(),
                view_count,
                comment_count,
            });
        }

        let comments = fetch_video_comments(api, &video.video_id, true)
            .await
            .map_err(|err| {
                ExportError::from(err)
                    .context(format!("fetching comments for video {}", video.video_id))
            })?;
        let comment_cells: Vec<Row> = comments.iter().map(Record::cells).collect();
        let rows = merge_list(video_row, &comment_cells);
        let written = append_rows(&options.output_path, &FIELDNAMES, &rows).map_err(|err| {
            ExportError::from(err).context(format!(
                "writing {}",
                options.output_path.display()
            ))
        })?;

        comments_written += written as u64;
        videos_processed += 1;
    }

    Ok(ExportResult {
        output_path: options.output_path.clone(),
        channel,
        videos_processed,
        comments_written,
    })
}

/// Same as [`export_channel_comments`], on a single-threaded runtime.
pub fn export_channel_comments_blocking(
    options: ExportOptions,
) -> Result<ExportResult, ExportError> {
    let rt = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| ScrapeError::Other(format!("failed to start tokio runtime: {err}")))?;
    rt.block_on(export_channel_comments(options))
}
