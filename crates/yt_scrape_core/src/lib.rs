pub mod client;
pub mod csv_utils;
pub mod errors;
pub mod export;
pub mod fetch;
pub mod models;
pub mod rows;
pub mod text;

pub use client::{
    ChannelsList, ClientOptions, CommentThreadsList, SearchList, VideosList, YouTubeApi,
    YouTubeClient, COMMENT_PAGE_SIZE, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_SERVICE_NAME,
};
pub use csv_utils::{append_rows, read_rows, DELIMITER};
pub use errors::{ExportError, ScrapeError};
pub use export::{
    export_channel_comments,
    export_channel_comments_blocking,
    export_with_api,
    ExportOptions,
    ExportProgress,
    ExportResult,
    ProgressCallback,
};
pub use fetch::{
    fetch_channel_info, fetch_video_comments, fetch_video_list, fetch_video_statistics,
    VideoListOptions,
};
pub use models::{ChannelInfo, CommentRecord, ReplyRecord, VideoRecord, VideoStatistics};
pub use rows::{merge_list, Record, Row, FIELDNAMES};
pub use text::collapse_whitespace;
