use chrono::NaiveDate;
use entity::measurements::{IssuesReport, Measurement};

use crate::client::ApiClient;
use crate::error::Error;

pub struct MeasurementsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn measurements(&self) -> MeasurementsApi<'_> {
        MeasurementsApi { client: self }
    }
}

impl MeasurementsApi<'_> {
    /// The day's metrics. The backend computes them on the fly when none
    /// were stored.
    pub async fn get_daily(&self, date: NaiveDate) -> Result<Measurement, Error> {
        self.client
            .get(&format!("/measurements/daily/{date}"))
            .await
    }

    /// Computes and stores the day's metrics.
    pub async fn create_daily(&self, date: NaiveDate) -> Result<Measurement, Error> {
        self.client
            .post_with_query(
                "/measurements/daily",
                &[("measurement_date", date.to_string())],
            )
            .await
    }

    pub async fn get_issues(&self, date: NaiveDate) -> Result<IssuesReport, Error> {
        self.client
            .get(&format!("/measurements/issues/{date}"))
            .await
    }

    pub async fn list_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Measurement>, Error> {
        self.client
            .get_with_query(
                "/measurements/range",
                &[("start_date", start.to_string()), ("end_date", end.to_string())],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use chrono::NaiveDate;
    use entity::Reading;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()
    }

    #[tokio::test]
    async fn test_get_daily_decodes_unknown_readings() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/measurements/daily/2025-02-10")
            .match_header("authorization", BEARER)
            .with_status(200)
            .with_body(measurement_json("2025-02-10").to_string())
            .create_async()
            .await;

        let measurement = client(&server).measurements().get_daily(day()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(measurement.execution_accuracy, Reading::Known(0.75));
        assert_eq!(measurement.quality_compliance, Reading::Unknown);
        assert_eq!(measurement.completed_steps(), 3);
        assert_eq!(measurement.total_steps(), 4);
    }

    #[tokio::test]
    async fn test_create_daily_uses_query_parameter() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/measurements/daily")
            .match_query(Matcher::UrlEncoded(
                "measurement_date".into(),
                "2025-02-10".into(),
            ))
            .with_status(201)
            .with_body(measurement_json("2025-02-10").to_string())
            .create_async()
            .await;

        let measurement = client(&server)
            .measurements()
            .create_daily(day())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(measurement.measurement_date, day());
    }

    #[tokio::test]
    async fn test_get_issues() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/measurements/issues/2025-02-10")
            .with_status(200)
            .with_body(
                json!({
                    "date": "2025-02-10",
                    "issues": [{"type": "skipped", "log_id": "l1", "step_id": "s1"}],
                    "count": 1
                })
                .to_string(),
            )
            .create_async()
            .await;

        let report = client(&server).measurements().get_issues(day()).await.unwrap();

        assert_eq!(report.count, 1);
        assert_eq!(report.issues[0].issue_type, "skipped");
    }
}
