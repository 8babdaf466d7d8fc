pub mod error;
pub mod formats;
pub mod host_maps;
pub mod stream_extractor;
pub mod stream_urls;
pub mod variants;

/// The sites publish plenty of protocol-relative urls.
fn fix_protocol(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    }
}
