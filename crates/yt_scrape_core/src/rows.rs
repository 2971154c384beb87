use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::{ChannelInfo, CommentRecord, VideoRecord};

pub const CHANNEL_COLUMNS: [&str; 5] = [
    "id_channel",
    "channel_name",
    "subscriber",
    "total_videos",
    "total_views",
];

pub const VIDEO_COLUMNS: [&str; 6] = [
    "id_video",
    "title",
    "video_published_at",
    "view_count",
    "video_like_count",
    "comment_count",
];

pub const COMMENT_COLUMNS: [&str; 7] = [
    "id_comment",
    "display_name",
    "text_comment",
    "comment_published_at",
    "comment_like_count",
    "total_reply",
    "replies",
];

/// Header of the exported table: channel, video and comment columns in row order.
pub const FIELDNAMES: [&str; 18] = [
    CHANNEL_COLUMNS[0],
    CHANNEL_COLUMNS[1],
    CHANNEL_COLUMNS[2],
    CHANNEL_COLUMNS[3],
    CHANNEL_COLUMNS[4],
    VIDEO_COLUMNS[0],
    VIDEO_COLUMNS[1],
    VIDEO_COLUMNS[2],
    VIDEO_COLUMNS[3],
    VIDEO_COLUMNS[4],
    VIDEO_COLUMNS[5],
    COMMENT_COLUMNS[0],
    COMMENT_COLUMNS[1],
    COMMENT_COLUMNS[2],
    COMMENT_COLUMNS[3],
    COMMENT_COLUMNS[4],
    COMMENT_COLUMNS[5],
    COMMENT_COLUMNS[6],
];

pub type Row = Vec<String>;

/// A flat record that renders as an ordered sequence of output cells.
pub trait Record {
    fn cells(&self) -> Row;
}

impl Record for ChannelInfo {
    fn cells(&self) -> Row {
        vec![
            self.channel_id.clone(),
            self.name.clone(),
            optional_cell(self.subscriber_count),
            self.video_count.to_string(),
            self.view_count.to_string(),
        ]
    }
}

impl Record for VideoRecord {
    fn cells(&self) -> Row {
        let mut cells = vec![
            self.video_id.clone(),
            self.title.clone(),
            timestamp_cell(&self.published_at),
        ];
        if let Some(stats) = &self.statistics {
            cells.push(optional_cell(stats.view_count));
            cells.push(optional_cell(stats.like_count));
            cells.push(optional_cell(stats.comment_count));
        }
        cells
    }
}

impl Record for CommentRecord {
    fn cells(&self) -> Row {
        let mut cells = vec![
            self.comment_id.clone(),
            self.author_name.clone(),
            self.text.clone(),
            timestamp_cell(&self.published_at),
            self.like_count.to_string(),
            self.reply_count.to_string(),
        ];
        if let Some(replies) = &self.replies {
            // Plain string fields only, serialization cannot fail.
            cells.push(serde_json::to_string(replies).unwrap_or_else(|_| "[]".to_string()));
        }
        cells
    }
}

/// Prepends `parent` to each of `children`, keeping child order.
pub fn merge_list<T: Clone>(parent: &[T], children: &[Vec<T>]) -> Vec<Vec<T>> {
    children
        .iter()
        .map(|child| {
            let mut row = Vec::with_capacity(parent.len() + child.len());
            row.extend_from_slice(parent);
            row.extend_from_slice(child);
            row
        })
        .collect()
}

pub fn timestamp_cell(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn optional_cell(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
