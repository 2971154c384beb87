use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::text::collapse_whitespace;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelInfo {
    pub channel_id: String,
    pub name: String,
    /// `None` when the channel hides its subscriber count.
    pub subscriber_count: Option<u64>,
    pub video_count: u64,
    pub view_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoStatistics {
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    /// Filled only when the video list was fetched with statistics.
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentRecord {
    pub comment_id: String,
    pub author_name: String,
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub like_count: u64,
    pub reply_count: u64,
    /// `None` unless replies were requested; an empty list when requested but absent.
    pub replies: Option<Vec<ReplyRecord>>,
}

/// One embedded reply.
///
/// Fields are named after what they hold. The collector this tool replaces
/// labelled the second slot "reply name" and the third "reply text" while
/// filling them with the reply text and the author name respectively; the
/// slot order and the whitespace collapsing of the author name are kept as
/// it produced them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplyRecord {
    pub parent_comment_id: String,
    pub text: String,
    pub author_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(rename = "nextPageToken", default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelItem {
    pub id: String,
    pub snippet: ChannelSnippet,
    pub statistics: ChannelStatistics,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelSnippet {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelStatistics {
    #[serde(rename = "subscriberCount", default, deserialize_with = "optional_count")]
    pub subscriber_count: Option<u64>,
    #[serde(rename = "videoCount", deserialize_with = "count")]
    pub video_count: u64,
    #[serde(rename = "viewCount", deserialize_with = "count")]
    pub view_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
    pub snippet: SearchSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItemId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSnippet {
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub statistics: VideoStatisticsPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoStatisticsPayload {
    #[serde(rename = "viewCount", default, deserialize_with = "optional_count")]
    pub view_count: Option<u64>,
    #[serde(rename = "likeCount", default, deserialize_with = "optional_count")]
    pub like_count: Option<u64>,
    #[serde(rename = "commentCount", default, deserialize_with = "optional_count")]
    pub comment_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThreadItem {
    pub snippet: CommentThreadSnippet,
    #[serde(default)]
    pub replies: Option<CommentThreadReplies>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: CommentResource,
    #[serde(rename = "totalReplyCount")]
    pub total_reply_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThreadReplies {
    #[serde(default)]
    pub comments: Vec<CommentResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentResource {
    pub id: String,
    pub snippet: CommentSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentSnippet {
    #[serde(rename = "authorDisplayName", default)]
    pub author_display_name: String,
    #[serde(rename = "textOriginal", default)]
    pub text_original: String,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
    #[serde(rename = "likeCount", default)]
    pub like_count: u64,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<String>,
}

impl ChannelItem {
    pub fn into_channel_info(self) -> ChannelInfo {
        ChannelInfo {
            channel_id: self.id,
            name: self.snippet.title,
            subscriber_count: self.statistics.subscriber_count,
            video_count: self.statistics.video_count,
            view_count: self.statistics.view_count,
        }
    }
}

impl SearchItem {
    pub fn into_video_record(self, statistics: Option<VideoStatistics>) -> VideoRecord {
        VideoRecord {
            video_id: self.id.video_id,
            title: self.snippet.title,
            published_at: self.snippet.published_at,
            statistics,
        }
    }
}

impl From<VideoStatisticsPayload> for VideoStatistics {
    fn from(payload: VideoStatisticsPayload) -> Self {
        Self {
            view_count: payload.view_count,
            like_count: payload.like_count,
            comment_count: payload.comment_count,
        }
    }
}

impl CommentThreadItem {
    pub fn into_comment_record(self, with_reply: bool) -> CommentRecord {
        let total_reply = self.snippet.total_reply_count;
        let top = self.snippet.top_level_comment;
        let replies = with_reply.then(|| match self.replies {
            Some(block) if total_reply > 0 => block
                .comments
                .into_iter()
                .map(|reply| reply.into_reply_record(&top.id))
                .collect(),
            _ => Vec::new(),
        });

        CommentRecord {
            comment_id: top.id,
            author_name: top.snippet.author_display_name,
            text: collapse_whitespace(&top.snippet.text_original),
            published_at: top.snippet.published_at,
            like_count: top.snippet.like_count,
            reply_count: total_reply,
            replies,
        }
    }
}

impl CommentResource {
    fn into_reply_record(self, thread_id: &str) -> ReplyRecord {
        ReplyRecord {
            parent_comment_id: self
                .snippet
                .parent_id
                .unwrap_or_else(|| thread_id.to_string()),
            text: self.snippet.text_original,
            author_name: collapse_whitespace(&self.snippet.author_display_name),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CountRepr {
    Number(u64),
    Text(String),
}

impl CountRepr {
    fn into_count<E: de::Error>(self) -> Result<u64, E> {
        match self {
            CountRepr::Number(value) => Ok(value),
            CountRepr::Text(text) => text
                .trim()
                .parse::<u64>()
                .map_err(|err| E::custom(format!("invalid count {text:?}: {err}"))),
        }
    }
}

// Statistics counts are sent as decimal strings.
fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    CountRepr::deserialize(deserializer)?.into_count()
}

fn optional_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<CountRepr>::deserialize(deserializer)?
        .map(CountRepr::into_count)
        .transpose()
}
