use std::time::Duration;

use crate::output_type::OutputType;

/// Default base URL of the transcription vendor's REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.assemblyai.com/v2";

/// Default delay between transcript status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Default cap on status polls (ten minutes at the default interval).
pub const DEFAULT_MAX_POLLS: u32 = 200;

/// Options that control how a transcription is performed and rendered.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (tests, batch jobs, editor integrations) can construct options programmatically
#[derive(Debug, Clone)]
pub struct Opts {
    /// The desired output format for transcript segments.
    pub output_type: OutputType,

    /// Optional language hint (e.g. `"en"`, `"es"`).
    ///
    /// When `None`, the vendor auto-detects or uses its default language.
    pub language: Option<String>,

    /// Fixed delay between status polls.
    pub poll_interval: Duration,

    /// Maximum number of status polls before giving up.
    ///
    /// `None` polls until the job reaches a terminal status, however long that takes.
    pub max_polls: Option<u32>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            output_type: OutputType::Text,
            language: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: Some(DEFAULT_MAX_POLLS),
        }
    }
}

/// Connection settings for the HTTP vendor.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    /// Per-request timeout. Uploads of long recordings need a generous value.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            request_timeout: Duration::from_secs(300),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_polling_is_bounded() {
        let opts = Opts::default();
        assert_eq!(opts.max_polls, Some(DEFAULT_MAX_POLLS));
        assert_eq!(opts.poll_interval, Duration::from_secs(3));
    }
}
