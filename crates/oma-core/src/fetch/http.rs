//! libcurl-backed [`BeatmapSource`].

use anyhow::{Context, Result};
use std::time::Duration;

use super::wire;
use super::{BeatmapSource, RemoteError};
use crate::config::OmaConfig;
use crate::model::{AnalysisRequest, AnalysisVariant, BeatmapMetadata};

/// Talks to the analysis backend over HTTP.
///
/// Each lookup uses its own blocking curl handle, so one `HttpSource` can be
/// shared between threads. Call from `spawn_blocking` when used from async code.
#[derive(Debug, Clone)]
pub struct HttpSource {
    /// Backend origin without trailing slash.
    base: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(backend_url: &str, connect_timeout: Duration, timeout: Duration) -> Result<Self> {
        let parsed = url::Url::parse(backend_url)
            .with_context(|| format!("invalid backend URL {:?}", backend_url))?;
        Ok(Self {
            base: parsed.as_str().trim_end_matches('/').to_string(),
            connect_timeout,
            timeout,
        })
    }

    pub fn from_config(cfg: &OmaConfig) -> Result<Self> {
        cfg.validate()?;
        Self::new(
            &cfg.backend_url,
            Duration::from_secs(cfg.connect_timeout_secs),
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    pub fn details_url(&self, beatmap_id: u32) -> String {
        format!("{}/api/beatmaps/{}/details", self.base, beatmap_id)
    }

    pub fn analyze_url(&self, beatmap_id: u32, request: AnalysisRequest) -> String {
        format!(
            "{}/api/beatmaps/{}/analyze/{}",
            self.base,
            beatmap_id,
            request.as_path_segment()
        )
    }

    /// GET `url` and return the body of a 2xx response.
    fn get(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        let transport = |source: curl::Error| RemoteError::Transport {
            url: url.to_string(),
            source,
        };
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(transport)?;
        easy.follow_location(true).map_err(transport)?;
        easy.max_redirections(10).map_err(transport)?;
        easy.connect_timeout(self.connect_timeout).map_err(transport)?;
        easy.timeout(self.timeout).map_err(transport)?;

        let mut list = curl::easy::List::new();
        list.append("Accept: application/json").map_err(transport)?;
        easy.http_headers(list).map_err(transport)?;

        tracing::debug!(url, "GET");
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(transport)?;
            transfer.perform().map_err(transport)?;
        }

        let code = easy.response_code().map_err(transport)?;
        if !(200..300).contains(&code) {
            tracing::warn!(url, code, "backend returned non-success status");
            return Err(RemoteError::Status {
                url: url.to_string(),
                code,
            });
        }
        tracing::debug!(url, code, bytes = body.len(), "GET done");
        Ok(body)
    }
}

impl BeatmapSource for HttpSource {
    fn fetch_metadata(&self, beatmap_id: u32) -> Result<BeatmapMetadata, RemoteError> {
        let url = self.details_url(beatmap_id);
        let body = self.get(&url)?;
        wire::decode_details(&body).map_err(|source| RemoteError::Decode { url, source })
    }

    fn fetch_analysis(
        &self,
        beatmap_id: u32,
        request: AnalysisRequest,
    ) -> Result<Vec<AnalysisVariant>, RemoteError> {
        let url = self.analyze_url(beatmap_id, request);
        let body = self.get(&url)?;
        wire::decode_analyses(&body, request).map_err(|source| RemoteError::Decode { url, source })
    }
}
