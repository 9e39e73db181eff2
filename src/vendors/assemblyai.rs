use std::io::Read;

use reqwest::blocking::{Body, Client, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::opts::ClientConfig;
use crate::vendor::{CreateTranscriptRequest, TranscriptResponse, UploadResponse, Vendor};
use crate::{Error, Result};

const USER_AGENT: &str = concat!("reviewscribe/", env!("CARGO_PKG_VERSION"));

/// Built-in vendor backed by a blocking `reqwest` client.
pub struct HttpVendor {
    client: Client,
    /// Unauthenticated client for media hosts; the API key never leaves the vendor.
    media_client: Client,
    base_url: String,
}

impl HttpVendor {
    /// Build a client that authenticates every request with the configured API key.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| Error::msg("API key contains characters not allowed in a header"))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, key);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        let media_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            media_client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Vendor for HttpVendor {
    fn upload(&self, media: Box<dyn Read + Send>) -> Result<String> {
        let url = self.endpoint("upload");
        debug!(%url, "uploading media");

        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(Body::new(media))
            .send()?;

        let uploaded: UploadResponse = parse_json(resp)?;
        Ok(uploaded.upload_url)
    }

    fn create_transcript(&self, req: &CreateTranscriptRequest) -> Result<TranscriptResponse> {
        let url = self.endpoint("transcript");
        debug!(%url, "creating transcript");

        let resp = self.client.post(&url).json(req).send()?;
        parse_json(resp)
    }

    fn get_transcript(&self, id: &str) -> Result<TranscriptResponse> {
        let url = self.endpoint(&format!("transcript/{id}"));
        let resp = self.client.get(&url).send()?;
        parse_json(resp)
    }

    fn fetch_media(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        debug!(%url, "fetching media");
        let resp = check_status(self.media_client.get(url).send()?)?;
        Ok(Box::new(resp))
    }
}

fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().unwrap_or_default();
    warn!(status = status.as_u16(), %body, "vendor returned an error status");
    Err(Error::Http {
        status: status.as_u16(),
        body,
    })
}

fn parse_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    Ok(check_status(resp)?.json::<T>()?)
}
