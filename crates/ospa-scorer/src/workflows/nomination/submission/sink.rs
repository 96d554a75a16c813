use std::future::Future;

use tracing::debug;

use super::payload::SubmissionPayload;

/// Outbound destination for finished nominations.
///
/// Implementations report only whether the request went out. The endpoint's
/// answer carries no contract, so it is never parsed.
pub trait SubmissionSink: Send + Sync {
    fn deliver(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<(), SinkError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("submission endpoint unreachable: {0}")]
    Transport(String),
    #[error("no submission endpoint configured")]
    NotConfigured,
}

/// Posts the payload as JSON to a spreadsheet web-app endpoint.
#[derive(Debug, Clone)]
pub struct HttpSubmissionSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmissionSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SubmissionSink for HttpSubmissionSink {
    fn deliver(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<(), SinkError>> + Send {
        async move {
            let response = self
                .client
                .post(&self.endpoint)
                .json(payload)
                .send()
                .await
                .map_err(|err| SinkError::Transport(err.to_string()))?;

            debug!(status = %response.status(), endpoint = %self.endpoint, "submission endpoint answered");
            Ok(())
        }
    }
}

/// Sink used when no endpoint is configured; every delivery fails loudly.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSink;

impl SubmissionSink for UnconfiguredSink {
    fn deliver(
        &self,
        _payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<(), SinkError>> + Send {
        async { Err(SinkError::NotConfigured) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_endpoint_surfaces_transport_error() {
        let sink = HttpSubmissionSink::new("http://127.0.0.1:9/ospa");
        let payload = SubmissionPayload {
            timestamp: "1/1/2025, 8:00:00 AM".to_string(),
            nomination_type: "Outstanding Campus Journalist".to_string(),
            candidate_name: "Ana".to_string(),
            division: "Manila".to_string(),
            school_name: "Rizal High".to_string(),
            average_rating: None,
            rating_band: None,
            grand_total: "0.00".to_string(),
            details: Default::default(),
            categories: Default::default(),
            mov_file: crate::workflows::nomination::domain::MovFile {
                name: "Manila_Rizal_High_Ana.pdf".to_string(),
                data: String::new(),
                mime_type: "application/pdf".to_string(),
            },
            raw_json: "{}".to_string(),
        };

        let err = sink.deliver(&payload).await.expect_err("nothing listens on port 9");

        assert!(matches!(err, SinkError::Transport(_)));
    }

    #[tokio::test]
    async fn unconfigured_sink_refuses_delivery() {
        let payload: SubmissionPayload = serde_json::from_value(serde_json::json!({
            "timestamp": "now",
            "nominationType": "Outstanding School Paper Adviser",
            "candidateName": "Ana",
            "division": "Manila",
            "schoolName": "Rizal High",
            "grandTotal": "0.00",
            "details": {},
            "categories": {},
            "movFile": { "name": "a.pdf", "data": "", "mimeType": "application/pdf" },
            "rawJson": "{}"
        }))
        .expect("payload parses");

        assert_eq!(
            UnconfiguredSink.deliver(&payload).await,
            Err(SinkError::NotConfigured)
        );
    }
}
