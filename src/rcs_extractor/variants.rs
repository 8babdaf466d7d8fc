use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use super::fix_protocol;

lazy_static! {
    static ref EMBEDS_URL: Regex = Regex::new(
        r"^https?://video\.(?P<cdn>(?:rcs|(?:corriere\w+\.)?corriere|(?:gazzanet\.)?gazzetta)\.it)/video-embed/(?P<id>[^/=&\?]+?)(?:$|\?)"
    )
    .unwrap();
    static ref CORRIERE_URL: Regex = Regex::new(
        r"^https?://video\.(?P<cdn>(?:corrieredelmezzogiorno\.|corrieredelveneto\.|corrieredibologna\.|corrierefiorentino\.)?corriere\.it)/(?:.+?)/(?P<id>[^/]+?)(?:$|\?)"
    )
    .unwrap();
    static ref GAZZETTA_URL: Regex = Regex::new(
        r"^https?://video\.(?P<cdn>(?:gazzanet\.)?gazzetta\.it)/(?:.+?)/(?P<id>[^/]+?)(?:$|\?)"
    )
    .unwrap();
    static ref LEITV_URL: Regex =
        Regex::new(r"^https?://www\.(?P<cdn>leitv\.it)/video/(?P<id>[^/]+?)(?:$|\?|/)").unwrap();
    static ref EMBED_TAG: Regex = Regex::new(
        r#"(?:data-frame-src=|<iframe[^\n]+src=)["']((?:https?:)?//video\.(?:rcs|(?:corriere\w+\.)?corriere|(?:gazzanet\.)?gazzetta)\.it/video-embed/[^"']+)["']"#
    )
    .unwrap();
}

/// What a variant pattern pulled out of a page url: the video identifier
/// and the cdn label naming the site family.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlMatch {
    pub id: String,
    pub cdn: Option<String>,
}

/// One url shape per site family. All variants share the descriptor fetch
/// and rewrite logic, they only differ in how a page url is recognized.
pub trait SiteVariant: Sync {
    fn name(&self) -> &'static str;
    fn match_url(&self, url: &str) -> Option<UrlMatch>;
}

fn capture_match(pattern: &Regex, url: &str) -> Option<UrlMatch> {
    let caps = pattern.captures(url)?;
    Some(UrlMatch {
        id: caps.name("id")?.as_str().to_string(),
        cdn: caps.name("cdn").map(|cdn| cdn.as_str().to_string()),
    })
}

/// Union matcher for the shared `video-embed` player pages.
pub struct RcsEmbeds;
pub struct Corriere;
pub struct Gazzetta;
pub struct LeiTv;

impl SiteVariant for RcsEmbeds {
    fn name(&self) -> &'static str {
        "rcs:embeds"
    }
    fn match_url(&self, url: &str) -> Option<UrlMatch> {
        capture_match(&EMBEDS_URL, url)
    }
}

impl SiteVariant for Corriere {
    fn name(&self) -> &'static str {
        "rcs:corriere"
    }
    fn match_url(&self, url: &str) -> Option<UrlMatch> {
        capture_match(&CORRIERE_URL, url)
    }
}

impl SiteVariant for Gazzetta {
    fn name(&self) -> &'static str {
        "rcs:gazzetta"
    }
    fn match_url(&self, url: &str) -> Option<UrlMatch> {
        capture_match(&GAZZETTA_URL, url)
    }
}

impl SiteVariant for LeiTv {
    fn name(&self) -> &'static str {
        "rcs:leitv"
    }
    fn match_url(&self, url: &str) -> Option<UrlMatch> {
        capture_match(&LEITV_URL, url)
    }
}

/// Dispatch order: the embed matcher goes first so player urls resolve to
/// it even when a site matcher would also accept them.
pub static VARIANTS: [&'static dyn SiteVariant; 4] = [&RcsEmbeds, &Corriere, &Gazzetta, &LeiTv];

pub fn match_site(url: &str) -> Option<(&'static dyn SiteVariant, UrlMatch)> {
    for variant in VARIANTS.iter() {
        if let Some(matched) = variant.match_url(url) {
            return Some((*variant, matched));
        }
    }
    None
}

/// Scans a page for iframes pointing at an embeddable player and returns
/// the cleaned urls, in document order.
pub fn extract_embed_urls(page: &str) -> Vec<String> {
    EMBED_TAG
        .captures_iter(page)
        .filter_map(|caps| sanitize_embed_url(caps.get(1)?.as_str()))
        .collect()
}

pub fn extract_embed_url(page: &str) -> Option<String> {
    extract_embed_urls(page).into_iter().next()
}

/// Iframe src attributes carry player state in the query string, re-join
/// base and basename to get the bare embed url back.
fn sanitize_embed_url(raw: &str) -> Option<String> {
    let parsed = Url::parse(&fix_protocol(raw)).ok()?;
    let basename = parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()?
        .to_string();
    parsed.join(&basename).ok().map(|joined| joined.to_string())
}
