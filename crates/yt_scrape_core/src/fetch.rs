use tracing::{debug, warn};

use crate::client::{
    ChannelsList, CommentThreadsList, SearchList, VideosList, YouTubeApi, COMMENT_PAGE_SIZE,
};
use crate::errors::ScrapeError;
use crate::models::{ChannelInfo, CommentRecord, VideoRecord, VideoStatistics};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoListOptions {
    /// Issue one `videos.list` call per video to attach view/like/comment counts.
    pub with_info: bool,
    /// Follow `nextPageToken` on the search endpoint instead of stopping after the first page.
    pub all_pages: bool,
    /// `maxResults` for the search call; the platform default applies when unset.
    pub page_size: Option<u32>,
}

pub async fn fetch_channel_info<A: YouTubeApi>(
    api: &A,
    channel_id: &str,
) -> Result<ChannelInfo, ScrapeError> {
    let response = api
        .list_channels(&ChannelsList {
            part: "snippet,statistics".to_string(),
            id: channel_id.to_string(),
        })
        .await?;
    let item = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| ScrapeError::NotFound(format!("channel {channel_id}")))?;
    Ok(item.into_channel_info())
}

pub async fn fetch_video_list<A: YouTubeApi>(
    api: &A,
    channel_id: &str,
    options: VideoListOptions,
) -> Result<Vec<VideoRecord>, ScrapeError> {
    let mut request = SearchList {
        part: "snippet".to_string(),
        channel_id: channel_id.to_string(),
        max_results: options.page_size,
        page_token: None,
    };
    let mut videos = Vec::new();
    loop {
        let page = api.search(&request).await?;
        debug!(channel_id, items = page.items.len(), "search page");
        for item in page.items {
            let statistics = if options.with_info {
                Some(fetch_video_statistics(api, &item.id.video_id).await?)
            } else {
                None
            };
            videos.push(item.into_video_record(statistics));
        }
        match page.next_page_token {
            Some(token) if options.all_pages => request.page_token = Some(token),
            _ => break,
        }
    }
    Ok(videos)
}

pub async fn fetch_video_statistics<A: YouTubeApi>(
    api: &A,
    video_id: &str,
) -> Result<VideoStatistics, ScrapeError> {
    let response = api
        .list_videos(&VideosList {
            part: "statistics".to_string(),
            id: video_id.to_string(),
        })
        .await?;
    let item = response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| ScrapeError::NotFound(format!("statistics for video {video_id}")))?;
    Ok(item.statistics.into())
}

/// Reads every comment thread of a video, one request per page of 100 threads.
///
/// With `with_reply` each record carries the replies embedded in its thread
/// (an empty list when there are none); without it `replies` stays `None`.
pub async fn fetch_video_comments<A: YouTubeApi>(
    api: &A,
    video_id: &str,
    with_reply: bool,
) -> Result<Vec<CommentRecord>, ScrapeError> {
    let mut request = CommentThreadsList {
        part: "snippet,replies".to_string(),
        video_id: video_id.to_string(),
        max_results: COMMENT_PAGE_SIZE,
        page_token: None,
    };
    let mut comments = Vec::new();
    let mut pages = 0usize;
    loop {
        let page = api.list_comment_threads(&request).await?;
        pages += 1;
        debug!(video_id, page = pages, items = page.items.len(), "comment thread page");
        comments.extend(
            page.items
                .into_iter()
                .map(|item| item.into_comment_record(with_reply)),
        );
        match page.next_page_token {
            Some(token) if !token.is_empty() => request.page_token = Some(token),
            Some(_) => {
                warn!(video_id, "empty nextPageToken, stopping pagination");
                break;
            }
            None => break,
        }
    }
    Ok(comments)
}
