use crate::config::ExtractionConfig;
use crate::error::AgentError;
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::time::sleep;

/// Outcome of one extraction call. `Success` carries the payload shaped by the
/// requested schema; `Failure` carries nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionEnvelope {
    Success(Value),
    Failure,
}

/// Schema-constrained extraction over a set of web sources.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(
        &self,
        sources: &[String],
        directive: &str,
        schema: &Value,
    ) -> Result<ExtractionEnvelope, AgentError>;
}

pub struct FirecrawlExtractor {
    client: reqwest::Client,
    config: ExtractionConfig,
}

impl FirecrawlExtractor {
    pub fn new(config: ExtractionConfig) -> Result<Self, AgentError> {
        if config.api_key.trim().is_empty() {
            return Err(AgentError::ClientInit(
                "No API key provided for Firecrawl".into(),
            ));
        }
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            AgentError::ClientInit(format!(
                "Invalid Firecrawl base URL '{}': {e}",
                config.base_url
            ))
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::ClientInit(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn fetch(&self, request: reqwest::RequestBuilder) -> Result<Value, AgentError> {
        let res = request.bearer_auth(&self.config.api_key).send().await?;

        if !res.status().is_success() {
            let status = res.status();
            let err_text = res.text().await.unwrap_or_default();
            log::error!("Firecrawl API Error: {}", err_text);
            return Err(AgentError::ExtractionFailed(format!(
                "API Error {status}: {err_text}"
            )));
        }

        Ok(res.json().await?)
    }

    async fn wait_for_job(&self, id: &str) -> Result<ExtractionEnvelope, AgentError> {
        let url = self.endpoint(&format!("extract/{id}"));

        for attempt in 1..=self.config.max_polls {
            let body = self.fetch(self.client.get(&url)).await?;
            match JobState::from_body(&body) {
                JobState::Done(envelope) => return Ok(envelope),
                JobState::Pending if attempt < self.config.max_polls => {
                    log::debug!(
                        "Extract job {id} still running (poll {attempt}/{})",
                        self.config.max_polls
                    );
                    sleep(self.config.poll_interval).await;
                }
                JobState::Pending => {}
            }
        }

        Err(AgentError::ExtractionFailed(format!(
            "Extract job {id} did not finish after {} polls",
            self.config.max_polls
        )))
    }
}

#[async_trait]
impl Extractor for FirecrawlExtractor {
    async fn extract(
        &self,
        sources: &[String],
        directive: &str,
        schema: &Value,
    ) -> Result<ExtractionEnvelope, AgentError> {
        let payload = json!({
            "urls": sources,
            "prompt": directive,
            "schema": schema,
        });

        let body = self
            .fetch(self.client.post(self.endpoint("extract")).json(&payload))
            .await?;

        match JobState::from_body(&body) {
            JobState::Done(envelope) => Ok(envelope),
            JobState::Pending => match body.get("id").and_then(Value::as_str) {
                Some(id) => self.wait_for_job(id).await,
                None => Ok(ExtractionEnvelope::Failure),
            },
        }
    }
}

#[derive(Debug, PartialEq)]
enum JobState {
    Done(ExtractionEnvelope),
    Pending,
}

impl JobState {
    /// Reads a Firecrawl extract response, either the initial submit or a
    /// status poll.
    fn from_body(body: &Value) -> Self {
        if body.get("success").and_then(Value::as_bool) != Some(true) {
            let reason = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            log::warn!("Firecrawl reported an unsuccessful extraction: {reason}");
            return JobState::Done(ExtractionEnvelope::Failure);
        }

        match body.get("status").and_then(Value::as_str) {
            Some("failed") | Some("cancelled") => JobState::Done(ExtractionEnvelope::Failure),
            Some("completed") | None => match body.get("data") {
                Some(data) if !data.is_null() => {
                    JobState::Done(ExtractionEnvelope::Success(data.clone()))
                }
                _ if body.get("id").is_some() => JobState::Pending,
                _ => JobState::Done(ExtractionEnvelope::Failure),
            },
            Some(_) => JobState::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::canned_http::CannedServer;
    use std::time::{Duration, Instant};

    fn extractor_for(server: &CannedServer, max_polls: u32) -> FirecrawlExtractor {
        let mut config = ExtractionConfig::new("fc-test");
        config.base_url = server.base_url.clone();
        config.poll_interval = Duration::from_millis(20);
        config.max_polls = max_polls;
        FirecrawlExtractor::new(config).unwrap()
    }

    fn sources() -> Vec<String> {
        vec!["https://www.99acres.com/property-in-pune-ffid/*".to_string()]
    }

    #[test]
    fn inline_data_is_success() {
        let body = json!({ "success": true, "data": { "properties": [] } });
        assert_eq!(
            JobState::from_body(&body),
            JobState::Done(ExtractionEnvelope::Success(json!({ "properties": [] })))
        );
    }

    #[test]
    fn submitted_job_is_pending() {
        let body = json!({ "success": true, "id": "job-1" });
        assert_eq!(JobState::from_body(&body), JobState::Pending);

        let body = json!({ "success": true, "status": "processing", "data": null });
        assert_eq!(JobState::from_body(&body), JobState::Pending);
    }

    #[test]
    fn failed_jobs_become_failure() {
        for body in [
            json!({ "success": false, "error": "Unauthorized" }),
            json!({ "success": true, "status": "failed" }),
            json!({ "success": true, "status": "cancelled" }),
            json!({ "success": true, "status": "completed" }),
            json!("not an object"),
        ] {
            assert_eq!(
                JobState::from_body(&body),
                JobState::Done(ExtractionEnvelope::Failure),
                "{body}"
            );
        }
    }

    #[test]
    fn construction_fails_fast_without_key() {
        let err = FirecrawlExtractor::new(ExtractionConfig::new("")).err().unwrap();
        assert!(matches!(err, AgentError::ClientInit(_)));
    }

    #[test]
    fn construction_rejects_bad_base_url() {
        let mut config = ExtractionConfig::new("fc-test");
        config.base_url = "not a url".into();
        assert!(matches!(FirecrawlExtractor::new(config), Err(AgentError::ClientInit(_))));
    }

    #[test]
    fn endpoints_tolerate_trailing_slash() {
        let mut config = ExtractionConfig::new("fc-test");
        config.base_url = "http://localhost:3002/".into();
        let extractor = FirecrawlExtractor::new(config).unwrap();
        assert_eq!(extractor.endpoint("extract/abc"), "http://localhost:3002/v1/extract/abc");
    }

    #[tokio::test]
    async fn submitted_job_is_polled_until_completed() {
        let server = CannedServer::start(|req| match (req.method.as_str(), req.path.as_str()) {
            ("POST", "/v1/extract") => (200, json!({ "success": true, "id": "j1" }).to_string()),
            ("GET", "/v1/extract/j1") => (
                200,
                json!({
                    "success": true,
                    "status": "completed",
                    "data": { "properties": [{ "Building_name": "Amanora Gold" }] }
                })
                .to_string(),
            ),
            _ => (404, "{}".to_string()),
        })
        .await;

        let envelope = extractor_for(&server, 3)
            .extract(&sources(), "Extract flats", &json!({ "type": "object" }))
            .await
            .unwrap();

        let expected = json!({ "properties": [{ "Building_name": "Amanora Gold" }] });
        assert_eq!(envelope, ExtractionEnvelope::Success(expected));

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        let submitted: Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(submitted["urls"], json!(sources()));
        assert_eq!(submitted["prompt"], "Extract flats");
        assert_eq!(submitted["schema"], json!({ "type": "object" }));
    }

    #[tokio::test]
    async fn poll_ceiling_is_an_extraction_error() {
        let server = CannedServer::start(|req| match req.method.as_str() {
            "POST" => (200, json!({ "success": true, "id": "j1" }).to_string()),
            _ => (200, json!({ "success": true, "status": "processing" }).to_string()),
        })
        .await;

        let started = Instant::now();
        let err = extractor_for(&server, 2)
            .extract(&sources(), "Extract flats", &json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::ExtractionFailed(_)));
        assert!(err.to_string().contains("did not finish after 2 polls"));
        // One interval between the two polls, none after the last.
        assert!(started.elapsed() < Duration::from_millis(500));
        let polls = server.requests().iter().filter(|r| r.method == "GET").count();
        assert_eq!(polls, 2);
    }

    #[tokio::test]
    async fn http_error_status_is_an_extraction_error() {
        let server = CannedServer::start(|_| {
            (402, json!({ "success": false, "error": "Payment required" }).to_string())
        })
        .await;

        let err = extractor_for(&server, 3)
            .extract(&sources(), "Extract flats", &json!({}))
            .await
            .unwrap_err();

        match err {
            AgentError::ExtractionFailed(message) => {
                assert!(message.contains("402"));
                assert!(message.contains("Payment required"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn failed_job_status_is_a_failure_envelope() {
        let server = CannedServer::start(|req| match req.method.as_str() {
            "POST" => (200, json!({ "success": true, "id": "j2" }).to_string()),
            _ => (200, json!({ "success": true, "status": "failed" }).to_string()),
        })
        .await;

        let envelope = extractor_for(&server, 3)
            .extract(&sources(), "Extract flats", &json!({}))
            .await
            .unwrap();

        assert_eq!(envelope, ExtractionEnvelope::Failure);
    }
}
