pub mod downloader_trait;
pub mod rcs_extractor;
pub mod utils;
