use failure::Fail;

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum ParsingError {
    #[fail(display = "Unsupported url : {}", url)]
    UnsupportedUrl { url: String },

    #[fail(display = "CDN not found in url : {}", url)]
    CdnNotFound { url: String },

    #[fail(display = "Video data not found in the page")]
    VideoDataNotFound,

    #[fail(display = "No embeddable video found in the page")]
    EmbedNotFound,

    #[fail(display = "No migration mapping for streaming host : {}", host)]
    UnknownMigrationHost { host: String },

    #[fail(display = "Parsing Error : {}", cause)]
    ParsingError { cause: String },

    #[fail(display = "Download Error : {}", cause)]
    DownloadError { cause: String },
}

impl ParsingError {
    pub fn parsing_error_from_str(cause: &str) -> Self {
        ParsingError::ParsingError {
            cause: cause.to_string(),
        }
    }
}

impl From<&str> for ParsingError {
    fn from(cause: &str) -> Self {
        ParsingError::parsing_error_from_str(cause)
    }
}

impl From<String> for ParsingError {
    fn from(cause: String) -> Self {
        ParsingError::ParsingError { cause }
    }
}
