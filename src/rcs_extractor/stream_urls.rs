use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use super::error::ParsingError;
use super::host_maps::{ALL_REPLACE, MIGRATION_MAP, MIGRATION_MEDIA, MP4_REPLACE};

const HLS_MIME: &str = "application/vnd.apple.mpegurl";
const MP4_MIME: &str = "video/mp4";
const VOD_BASE: &str = "https://vod.rcsobjects.it";
const MEDIA_BASE: &str = "https://media2.corriereobjects.it";
const MEDIA_BASE_IT: &str = "https://media2-it.corriereobjects.it";
const QUOTIDIANI_MARKER: &str = "fcs.quotidiani_!";

lazy_static! {
    /// Legacy akamai stream urls all share the `<host>.net/i<path>` shape,
    /// the `i` prefix is part of the cdn convention and never carried over.
    static ref STREAM_HOST: Regex =
        Regex::new(r"(?:https?:)?//(?P<host>.*)\.net/i(?P<path>.*)$").unwrap();
}

/// Per-kind stream urls collected from a media descriptor. A `None` slot
/// means the descriptor published no source of that kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamUrlSet {
    pub mp3: Option<String>,
    pub mp4: Option<String>,
    pub m3u8: Option<String>,
}

/// Collects the candidate urls from a decoded media descriptor and runs
/// them through the migration pipeline.
pub fn get_media_urls(video: &Value) -> Result<StreamUrlSet, ParsingError> {
    let profile = video
        .get("mediaProfile")
        .ok_or("mediaProfile not in video data")?;
    let media_files = profile
        .get("mediaFile")
        .and_then(|files| files.as_array())
        .ok_or("mediaFile not in media profile")?;

    let mut src = StreamUrlSet::default();
    if video.get("mediaType").and_then(|t| t.as_str()) == Some("AUDIO") {
        // every entry is a candidate, the last one published wins
        for entry in media_files {
            if let Some(value) = entry.get("value").and_then(|v| v.as_str()) {
                src.mp3 = Some(value.to_string());
            }
        }
    } else {
        for entry in media_files {
            let mime = entry
                .get("mimeType")
                .and_then(|m| m.as_str())
                .unwrap_or_default();
            let value = entry.get("value").and_then(|v| v.as_str());
            if let Some(value) = value {
                if mime == HLS_MIME {
                    src.m3u8 = Some(value.to_string());
                }
                if mime == MP4_MIME {
                    src.mp4 = Some(value.to_string());
                }
            }
        }
    }

    let geoblocked = profile.get("geoblocking").is_some();
    rewrite_stream_urls(src, geoblocked)
}

/// Rewrites every url of the set onto the presently valid endpoints. The
/// pipeline is a pinned sequence: host aliases, cdn switch, per-kind
/// fixups, geoblocking fixup, manifest suffix fixup. Running it over an
/// already migrated set is a no-op.
pub fn rewrite_stream_urls(
    mut src: StreamUrlSet,
    geoblocked: bool,
) -> Result<StreamUrlSet, ParsingError> {
    for slot in vec![&mut src.mp3, &mut src.mp4, &mut src.m3u8] {
        if let Some(url) = slot.as_mut() {
            let replaced = apply_host_aliases(url);
            *url = replaced;
        }
    }

    // switch the hls manifest over to the unified object store
    if let Some(m3u8) = src.m3u8.clone() {
        if !m3u8.contains("-lh.akamaihd") {
            if let Some(caps) = STREAM_HOST.captures(&m3u8) {
                let host = &caps["host"];
                let code = migration_code(host)?;
                let path = caps["path"]
                    .replace("///", "/")
                    .replace("//", "/")
                    .replace(".csmil", ".urlset");
                src.m3u8 = Some(format!("{}/hls/{}{}", VOD_BASE, code, path));
            }
        }
    }

    // switch the direct mp4 off the retired akamai hosts
    if let Some(mp4) = src.mp4.clone() {
        if mp4.contains("akamai") {
            if let Some(caps) = STREAM_HOST.captures(&mp4) {
                let host = &caps["host"];
                let path = caps["path"].replace("///", "/").replace("//", "/");
                if MIGRATION_MEDIA.contains(host) {
                    let base = if mp4.contains(QUOTIDIANI_MARKER) {
                        MEDIA_BASE_IT
                    } else {
                        MEDIA_BASE
                    };
                    let path = path
                        .replace("/fcs.quotidiani/mediacenter", "")
                        .replace("/fcs.quotidiani_!/mediacenter", "")
                        .replace("corriere/content/mediacenter/", "")
                        .replace("gazzetta/content/mediacenter/", "");
                    src.mp4 = Some(format!("{}{}", base, path));
                } else {
                    let code = migration_code(host)?;
                    src.mp4 = Some(format!("{}/{}{}", VOD_BASE, code, path));
                }
            }
        }
    }

    if let Some(mp3) = src.mp3.take() {
        src.mp3 = Some(mp3.replace(
            "media2vam-corriere-it.akamaized.net",
            "vod.rcsobjects.it/corriere",
        ));
    }
    if let Some(mp4) = src.mp4.take() {
        src.mp4 = Some(if mp4.contains(QUOTIDIANI_MARKER) {
            mp4.replace("vod.rcsobjects", "vod-it.rcsobjects")
        } else {
            mp4
        });
    }
    if let Some(m3u8) = src.m3u8.take() {
        src.m3u8 = Some(if m3u8.contains(QUOTIDIANI_MARKER) {
            m3u8.replace("vod.rcsobjects", "vod-it.rcsobjects")
        } else {
            m3u8
        });
    }

    // geoblocked media is only served from the country-restricted store
    if geoblocked {
        if let Some(m3u8) = src.m3u8.take() {
            src.m3u8 = Some(m3u8.replace("vod.rcsobjects", "vod-it.rcsobjects"));
        }
        if let Some(mp4) = src.mp4.take() {
            src.mp4 = Some(mp4.replace("vod.rcsobjects", "vod-it.rcsobjects"));
        }
    }

    if let Some(m3u8) = src.m3u8.take() {
        src.m3u8 = Some(if m3u8.contains("csmil") && m3u8.contains("vod") {
            m3u8.replace(".csmil", ".urlset")
        } else {
            m3u8
        });
    }

    Ok(src)
}

fn apply_host_aliases(url: &str) -> String {
    let mut out = url.to_string();
    for (legacy, current) in ALL_REPLACE {
        out = out.replace(legacy, current);
    }
    for (legacy, current) in MP4_REPLACE {
        out = out.replace(legacy, current);
    }
    out
}

fn migration_code(host: &str) -> Result<&'static str, ParsingError> {
    MIGRATION_MAP
        .get(host)
        .copied()
        .ok_or_else(|| ParsingError::UnknownMigrationHost {
            host: host.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn video_descriptor(files: Value) -> Value {
        json!({
            "mediaType": "VIDEO",
            "mediaProfile": { "mediaFile": files }
        })
    }

    #[test]
    fn mp4_only_descriptor_never_gains_a_manifest() {
        let video = video_descriptor(json!([
            {"mimeType": "video/mp4",
             "value": "https://media2vam.corriere.it.edgesuite.net//fcs.quotidiani/vod/video.mp4"}
        ]));
        let src = get_media_urls(&video).unwrap();
        assert!(src.m3u8.is_none());
        assert!(src.mp3.is_none());
        assert_eq!(
            src.mp4.unwrap(),
            "https://media2vam-corriere-it.akamaized.net/fcs.quotidiani/vod/video.mp4"
        );
    }

    #[test]
    fn audio_takes_the_last_entry() {
        let video = json!({
            "mediaType": "AUDIO",
            "mediaProfile": { "mediaFile": [
                {"mimeType": "audio/mpeg",
                 "value": "https://media2vam-corriere-it.akamaized.net/podcast/ep1.mp3"},
                {"mimeType": "audio/mpeg",
                 "value": "https://media2vam-corriere-it.akamaized.net/podcast/ep2.mp3"}
            ]}
        });
        let src = get_media_urls(&video).unwrap();
        assert_eq!(
            src.mp3.unwrap(),
            "https://vod.rcsobjects.it/corriere/podcast/ep2.mp3"
        );
        assert!(src.mp4.is_none());
    }

    #[test]
    fn manifest_only_descriptor_is_migrated_to_the_object_store() {
        let video = video_descriptor(json!([
            {"mimeType": "application/vnd.apple.mpegurl",
             "value": "https://media2vam-corriere-it.akamaized.net/i/some/path.csmil"}
        ]));
        let src = get_media_urls(&video).unwrap();
        assert_eq!(
            src.m3u8.unwrap(),
            "https://vod.rcsobjects.it/hls/corriere/some/path.urlset"
        );
    }

    #[test]
    fn legacy_media_host_skips_the_migration_map() {
        // gazzetta-f.akamaihd has no site code on purpose, it must resolve
        // through the shared media store and not error out
        let video = video_descriptor(json!([
            {"mimeType": "application/vnd.apple.mpegurl",
             "value": "https://gazzettavam-vh.akamaihd.net/i/gazzetta/2020/clip.csmil/master.m3u8"},
            {"mimeType": "video/mp4",
             "value": "https://gazzetta-f.akamaihd.net/i/gazzetta/content/mediacenter//clip.mp4"}
        ]));
        let src = get_media_urls(&video).unwrap();
        assert_eq!(
            src.mp4.unwrap(),
            "https://media2.corriereobjects.it/clip.mp4"
        );
        assert_eq!(
            src.m3u8.unwrap(),
            "https://vod.rcsobjects.it/hls/gazzetta/gazzetta/2020/clip.urlset/master.m3u8"
        );
    }

    #[test]
    fn quotidiani_marker_selects_the_it_media_store() {
        let video = video_descriptor(json!([
            {"mimeType": "application/vnd.apple.mpegurl",
             "value": "https://corrierevam-vh.akamaihd.net/i/content/2020/clip.csmil/master.m3u8"},
            {"mimeType": "video/mp4",
             "value": "https://corriere-f.akamaihd.net/i/fcs.quotidiani_!/mediacenter/2020/clip.mp4"}
        ]));
        let src = get_media_urls(&video).unwrap();
        assert_eq!(
            src.mp4.unwrap(),
            "https://media2-it.corriereobjects.it/2020/clip.mp4"
        );
    }

    #[test]
    fn unknown_streaming_host_aborts() {
        let video = video_descriptor(json!([
            {"mimeType": "application/vnd.apple.mpegurl",
             "value": "https://mystery-vh.akamaihd.net/i/some/clip.csmil"}
        ]));
        let err = get_media_urls(&video).unwrap_err();
        assert_eq!(
            err,
            ParsingError::UnknownMigrationHost {
                host: "mystery-vh.akamaihd".to_string()
            }
        );
    }

    #[test]
    fn live_manifests_are_left_alone() {
        let video = video_descriptor(json!([
            {"mimeType": "application/vnd.apple.mpegurl",
             "value": "https://corriere-lh.akamaihd.net/i/live/stream.csmil/master.m3u8"}
        ]));
        let src = get_media_urls(&video).unwrap();
        // not on the object store, so neither the cdn switch nor the
        // manifest suffix fixup may touch it
        assert_eq!(
            src.m3u8.unwrap(),
            "https://corriere-lh.akamaihd.net/i/live/stream.csmil/master.m3u8"
        );
    }

    #[test]
    fn alias_order_collapses_doubled_slashes_last() {
        let set = StreamUrlSet {
            mp4: Some(
                "https://corrierepmd.corriere.it.edgesuite.net//mp4/2020/clip.mp4".to_string(),
            ),
            ..StreamUrlSet::default()
        };
        let out = rewrite_stream_urls(set, false).unwrap();
        assert_eq!(
            out.mp4.unwrap(),
            "https://corrierepmd-corriere-it.akamaized.net/mp4/2020/clip.mp4"
        );
    }

    #[test]
    fn vr360_alias_applies_after_the_host_alias() {
        let set = StreamUrlSet {
            mp4: Some(
                "https://media2vam.corriere.it.edgesuite.net/fcs.quotidiani/vr/videos/clip.mp4"
                    .to_string(),
            ),
            ..StreamUrlSet::default()
        };
        let out = rewrite_stream_urls(set, false).unwrap();
        assert_eq!(
            out.mp4.unwrap(),
            "https://video.corriere.it/vr360/videos/clip.mp4"
        );
    }

    #[test]
    fn geoblocking_forces_the_restricted_store() {
        let video = json!({
            "mediaType": "VIDEO",
            "mediaProfile": {
                "geoblocking": true,
                "mediaFile": [
                    {"mimeType": "application/vnd.apple.mpegurl",
                     "value": "https://media2vam-corriere-it.akamaized.net/i/some/path.csmil"}
                ]
            }
        });
        let src = get_media_urls(&video).unwrap();
        assert_eq!(
            src.m3u8.unwrap(),
            "https://vod-it.rcsobjects.it/hls/corriere/some/path.urlset"
        );
    }

    #[test]
    fn geoblocking_fires_on_key_presence_alone() {
        let video = json!({
            "mediaType": "VIDEO",
            "mediaProfile": {
                "geoblocking": false,
                "mediaFile": [
                    {"mimeType": "application/vnd.apple.mpegurl",
                     "value": "https://media2vam-corriere-it.akamaized.net/i/some/path.csmil"}
                ]
            }
        });
        let src = get_media_urls(&video).unwrap();
        assert_eq!(
            src.m3u8.unwrap(),
            "https://vod-it.rcsobjects.it/hls/corriere/some/path.urlset"
        );
    }

    #[test]
    fn rewriting_a_migrated_set_is_a_noop() {
        let migrated = StreamUrlSet {
            mp3: Some("https://vod.rcsobjects.it/corriere/podcast/ep2.mp3".to_string()),
            mp4: Some("https://media2.corriereobjects.it/2020/clip.mp4".to_string()),
            m3u8: Some("https://vod.rcsobjects.it/hls/corriere/some/path.urlset".to_string()),
        };
        let out = rewrite_stream_urls(migrated.clone(), false).unwrap();
        assert_eq!(out, migrated);
    }
}
