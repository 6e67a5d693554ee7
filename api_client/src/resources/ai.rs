use chrono::NaiveDate;
use entity::analysis::{AiHealth, FullAnalysis};

use crate::client::ApiClient;
use crate::error::Error;

pub struct AiApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn ai(&self) -> AiApi<'_> {
        AiApi { client: self }
    }
}

impl AiApi<'_> {
    pub async fn full_analysis(&self, date: NaiveDate) -> Result<FullAnalysis, Error> {
        self.client.get(&format!("/ai/analyze/{date}")).await
    }

    /// Whether the backend has an AI provider configured.
    pub async fn health(&self) -> Result<AiHealth, Error> {
        self.client.get("/ai/health").await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use chrono::NaiveDate;
    use mockito::Server;
    use serde_json::json;

    #[tokio::test]
    async fn test_full_analysis_keeps_extra_keys() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/ai/analyze/2025-02-10")
            .match_header("authorization", BEARER)
            .with_status(200)
            .with_body(
                json!({
                    "date": "2025-02-10",
                    "metrics": {"execution_accuracy": 0.5},
                    "issues_detected": [],
                    "ai_summary": "Fewer steps would help"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let analysis = client(&server)
            .ai()
            .full_analysis(NaiveDate::from_ymd_opt(2025, 2, 10).unwrap())
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(analysis.metrics.is_some());
        assert_eq!(
            analysis.extra.get("ai_summary"),
            Some(&json!("Fewer steps would help"))
        );
    }

    #[tokio::test]
    async fn test_health() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/ai/health")
            .with_status(200)
            .with_body(r#"{"configured": false, "model": null}"#)
            .create_async()
            .await;

        let health = client(&server).ai().health().await.unwrap();

        assert!(!health.configured);
        assert!(health.model.is_none());
    }
}
