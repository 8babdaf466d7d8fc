use std::convert::TryFrom;

use hls_m3u8::tags::VariantStream;
use hls_m3u8::MasterPlaylist;
use log::warn;
use serde::{Deserialize, Serialize};
use url::Url;

use super::super::downloader_trait::Downloader;
use super::error::ParsingError;
use super::stream_urls::StreamUrlSet;

/// A single playable rendition, either one hls variant or the direct mp4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamFormat {
    pub format_id: String,
    pub url: String,
    pub ext: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

/// Expands the manifest into one format per variant, falling back to the
/// direct mp4 when the manifest is missing or unusable. An empty result is
/// left to the caller to judge.
pub async fn create_formats<D: Downloader>(
    downloader: &D,
    urls: &StreamUrlSet,
    video_id: &str,
) -> Result<Vec<StreamFormat>, ParsingError> {
    let mut formats = vec![];
    if let Some(manifest_url) = &urls.m3u8 {
        match expand_m3u8_formats(downloader, manifest_url).await {
            Ok(found) => formats = found,
            Err(er) => warn!("cannot expand hls manifest for {} : {}", video_id, er),
        }
    }
    if formats.is_empty() {
        if let Some(mp4_url) = &urls.mp4 {
            formats.push(StreamFormat {
                format_id: "http-mp4".to_string(),
                url: mp4_url.clone(),
                ext: "mp4".to_string(),
                bandwidth: None,
                resolution: None,
            });
        }
    }
    sort_formats(&mut formats);
    Ok(formats)
}

async fn expand_m3u8_formats<D: Downloader>(
    downloader: &D,
    manifest_url: &str,
) -> Result<Vec<StreamFormat>, ParsingError> {
    let body = downloader.download(manifest_url).await?;
    parse_master_formats(&body, manifest_url)
}

/// Reads the master playlist and lifts every `EXT-X-STREAM-INF` variant
/// into a format, with its uri resolved against the manifest url.
pub fn parse_master_formats(
    body: &str,
    manifest_url: &str,
) -> Result<Vec<StreamFormat>, ParsingError> {
    let master = MasterPlaylist::try_from(body)
        .map_err(|er| ParsingError::from(format!("invalid master playlist : {}", er)))?;
    let base = Url::parse(manifest_url).map_err(|er| ParsingError::from(er.to_string()))?;

    let mut formats = vec![];
    for stream in &master.variant_streams {
        if let VariantStream::ExtXStreamInf {
            uri, stream_data, ..
        } = stream
        {
            let variant_url = base
                .join(uri.as_ref())
                .map(|joined| joined.to_string())
                .unwrap_or_else(|_| uri.to_string());
            formats.push(StreamFormat {
                format_id: format!("hls-{}", stream_data.bandwidth() / 1000),
                url: variant_url,
                ext: "mp4".to_string(),
                bandwidth: Some(stream_data.bandwidth()),
                resolution: stream_data.resolution().map(|res| res.to_string()),
            });
        }
    }
    Ok(formats)
}

/// Preference order used everywhere: worst rendition first, best last.
pub fn sort_formats(formats: &mut [StreamFormat]) {
    formats.sort_by_key(|format| format.bandwidth.unwrap_or(0));
}
