//! Daily operations: the selected date's logs and their lifecycle.

use api_client::ApiClient;
use chrono::{NaiveDate, Utc};
use log::*;

pub use entity::daily_logs::{DailyLog, Deviation, LogCompletion, NewDailyLog, NewDeviation};
use entity::status::ExecutionStatus;

use crate::error::Error;
use crate::load_state::LoadState;

pub struct OperationsPage<'a> {
    client: &'a ApiClient,
    date: NaiveDate,
    logs: LoadState<Vec<DailyLog>>,
}

impl<'a> OperationsPage<'a> {
    pub fn new(client: &'a ApiClient, date: NaiveDate) -> Self {
        Self {
            client,
            date,
            logs: LoadState::Loading,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn logs(&self) -> &LoadState<Vec<DailyLog>> {
        &self.logs
    }

    /// Logs that have been started but not finished.
    pub fn in_progress(&self) -> Vec<&DailyLog> {
        self.logs
            .items()
            .iter()
            .filter(|log| log.status == ExecutionStatus::InProgress)
            .collect()
    }

    /// Switches to another date and loads it.
    pub async fn select_date(&mut self, date: NaiveDate) -> Result<(), Error> {
        if date != self.date {
            self.date = date;
            self.logs = LoadState::Loading;
        }
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> Result<(), Error> {
        match self.client.operations().list_by_date(self.date).await {
            Ok(logs) => {
                self.logs = LoadState::from_items(logs);
                Ok(())
            }
            Err(e) => {
                warn!("Error fetching logs for {}: {e}", self.date);
                self.logs.settle_failed();
                Err(e.into())
            }
        }
    }

    /// Logs a step for the selected date.
    pub async fn create(&mut self, step_id: &str) -> Result<DailyLog, Error> {
        let new_log = NewDailyLog {
            step_id: step_id.to_string(),
            execution_date: self.date,
            planned_start: None,
        };
        let log = self
            .client
            .operations()
            .create(&new_log)
            .await
            .map_err(|e| {
                warn!("Error creating log: {e}");
                Error::from(e)
            })?;
        let _ = self.refresh().await;
        Ok(log)
    }

    /// Marks a log started now.
    pub async fn start(&mut self, id: &str) -> Result<DailyLog, Error> {
        let now = Utc::now().fixed_offset();
        let log = self
            .client
            .operations()
            .start(id, now)
            .await
            .map_err(|e| {
                warn!("Error starting log {id}: {e}");
                Error::from(e)
            })?;
        let _ = self.refresh().await;
        Ok(log)
    }

    pub async fn complete(
        &mut self,
        id: &str,
        completion: &LogCompletion,
    ) -> Result<DailyLog, Error> {
        if completion.actual_execution.trim().is_empty() {
            return Err(Error::validation("Describe what was actually done"));
        }
        if let Some(score) = completion.quality_score {
            if !(0.0..=1.0).contains(&score) {
                return Err(Error::validation("Quality score must be between 0 and 1"));
            }
        }

        let log = self
            .client
            .operations()
            .complete(id, completion)
            .await
            .map_err(|e| {
                warn!("Error completing log {id}: {e}");
                Error::from(e)
            })?;
        let _ = self.refresh().await;
        Ok(log)
    }

    pub async fn add_deviation(
        &mut self,
        id: &str,
        deviation: &NewDeviation,
    ) -> Result<Deviation, Error> {
        if deviation.description.trim().is_empty() {
            return Err(Error::validation("Deviation description is required"));
        }
        let deviation = self
            .client
            .operations()
            .add_deviation(id, deviation)
            .await
            .map_err(|e| {
                warn!("Error recording deviation on log {id}: {e}");
                Error::from(e)
            })?;
        let _ = self.refresh().await;
        Ok(deviation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::test_support::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()
    }

    async fn mock_list(server: &mut mockito::Server, body: serde_json::Value) -> mockito::Mock {
        server
            .mock("GET", "/api/operations/logs")
            .match_query(Matcher::UrlEncoded(
                "execution_date".into(),
                "2025-02-10".into(),
            ))
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_refresh_loads_selected_date() {
        let mut server = Server::new_async().await;
        let list = mock_list(
            &mut server,
            json!([daily_log_json("l1", "in_progress"), daily_log_json("l2", "pending")]),
        )
        .await;
        let client = client(&server);
        let mut page = OperationsPage::new(&client, date());

        page.refresh().await.unwrap();

        list.assert_async().await;
        assert_eq!(page.logs().items().len(), 2);
        assert_eq!(page.in_progress().len(), 1);
    }

    #[tokio::test]
    async fn test_start_stamps_now_and_refetches() {
        let mut server = Server::new_async().await;
        let start = server
            .mock("POST", "/api/operations/logs/l1/start")
            .match_header("authorization", BEARER)
            .match_body(Matcher::Regex("actual_start".to_string()))
            .with_status(200)
            .with_body(daily_log_json("l1", "in_progress").to_string())
            .create_async()
            .await;
        let list = mock_list(&mut server, json!([daily_log_json("l1", "in_progress")])).await;
        let client = client(&server);
        let mut page = OperationsPage::new(&client, date());

        let log = page.start("l1").await.unwrap();

        start.assert_async().await;
        list.assert_async().await;
        assert_eq!(log.status, ExecutionStatus::InProgress);
        assert_eq!(page.in_progress().len(), 1);
    }

    #[tokio::test]
    async fn test_complete_rejects_out_of_range_score() {
        let mut server = Server::new_async().await;
        let complete = server
            .mock("POST", "/api/operations/logs/l1/complete")
            .expect(0)
            .create_async()
            .await;
        let client = client(&server);
        let mut page = OperationsPage::new(&client, date());

        let completion = LogCompletion {
            actual_end: Utc::now().fixed_offset(),
            actual_execution: "Ran 5k".to_string(),
            output_produced: None,
            quality_score: Some(1.5),
            quality_notes: None,
        };
        let err = page.complete("l1", &completion).await.unwrap_err();

        complete.assert_async().await;
        assert_eq!(err.user_message(), "Quality score must be between 0 and 1");
    }

    #[tokio::test]
    async fn test_create_logs_step_for_selected_date() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", "/api/operations/logs")
            .match_body(Matcher::Json(json!({"step_id": "s1", "execution_date": "2025-02-10"})))
            .with_status(201)
            .with_body(daily_log_json("l1", "pending").to_string())
            .create_async()
            .await;
        mock_list(&mut server, json!([daily_log_json("l1", "pending")])).await;
        let client = client(&server);
        let mut page = OperationsPage::new(&client, date());

        page.create("s1").await.unwrap();

        create.assert_async().await;
        assert_eq!(page.logs().items().len(), 1);
    }
}
