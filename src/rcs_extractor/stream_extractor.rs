use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::super::downloader_trait::Downloader;
use super::super::utils::utils::js_to_json;
use super::error::ParsingError;
use super::fix_protocol;
use super::formats::{create_formats, StreamFormat};
use super::stream_urls::get_media_urls;
use super::variants::{extract_embed_url, match_site};

lazy_static! {
    static ref VIDEO_DATA_URL: Regex = Regex::new(
        r#"var url = "(//video\.rcs\.it/fragment-includes/video-includes/.+?\.json)";"#
    )
    .unwrap();
    static ref INLINE_VIDEO_DATA: Regex =
        Regex::new(r"[\s;]video\s*=\s*(\{[\s\S]+?\})(?:;|,playlist=)").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub uploader: String,
    pub formats: Vec<StreamFormat>,
}

pub struct RCSStreamExtractor<D: Downloader> {
    downloader: D,
}

impl<D: Downloader> RCSStreamExtractor<D> {
    pub fn new(downloader: D) -> Self {
        RCSStreamExtractor { downloader }
    }

    /// Runs a full extraction for a page url belonging to one of the site
    /// families.
    pub async fn extract(&self, url: &str) -> Result<MediaInfo, ParsingError> {
        let (variant, matched) = match_site(url).ok_or_else(|| ParsingError::UnsupportedUrl {
            url: url.to_string(),
        })?;
        debug!("{} matched by {}", url, variant.name());

        let cdn = matched
            .cdn
            .clone()
            .filter(|cdn| !cdn.is_empty())
            .ok_or_else(|| ParsingError::CdnNotFound {
                url: url.to_string(),
            })?;
        let video_id = matched.id;

        // leitv pages carry the player inline, everything else goes
        // through the canonical embed page
        let page_url = if cdn != "leitv.it" {
            format!("https://video.{}/video-embed/{}", cdn, video_id)
        } else {
            url.to_string()
        };
        let page = self.downloader.download(&page_url).await?;
        let video_data = self.resolve_descriptor(&page).await?;

        let urls = get_media_urls(&video_data)?;
        let formats = create_formats(&self.downloader, &urls, &video_id).await?;

        let title = video_data
            .get("title")
            .and_then(|title| title.as_str())
            .ok_or("title not in video data")?
            .to_string();
        let description = video_data
            .get("description")
            .and_then(|description| description.as_str())
            .unwrap_or_default()
            .to_string();
        let uploader = video_data
            .get("provider")
            .and_then(|provider| provider.as_str())
            .filter(|provider| !provider.is_empty())
            .map(str::to_string)
            .unwrap_or(cdn);

        Ok(MediaInfo {
            id: video_id,
            title,
            description,
            uploader,
            formats,
        })
    }

    /// Secondary dispatch for article pages that only carry the player in
    /// an iframe: find the embed url and extract through it.
    pub async fn extract_from_page(&self, url: &str) -> Result<MediaInfo, ParsingError> {
        let page = self.downloader.download(url).await?;
        let embed_url = extract_embed_url(&page).ok_or(ParsingError::EmbedNotFound)?;
        debug!("{} embeds {}", url, embed_url);
        self.extract(&embed_url).await
    }

    /// The descriptor either sits behind a side-channel json url or is
    /// assigned inline as a javascript object literal.
    async fn resolve_descriptor(&self, page: &str) -> Result<Value, ParsingError> {
        if let Some(caps) = VIDEO_DATA_URL.captures(page) {
            let json_url = fix_protocol(caps.get(1).map(|url| url.as_str()).unwrap_or_default());
            let body = self.downloader.download(&json_url).await?;
            return serde_json::from_str(&body)
                .map_err(|er| ParsingError::from(format!("cannot decode video data json : {}", er)));
        }
        if let Some(caps) = INLINE_VIDEO_DATA.captures(page) {
            let raw = caps.get(1).map(|data| data.as_str()).unwrap_or_default();
            return serde_json::from_str(&js_to_json(raw))
                .map_err(|er| ParsingError::from(format!("cannot decode inline video data : {}", er)));
        }
        Err(ParsingError::VideoDataNotFound)
    }
}
