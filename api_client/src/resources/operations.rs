use chrono::NaiveDate;
use entity::daily_logs::{
    DailyLog, Deviation, LogCompletion, LogStart, LogUpdate, NewDailyLog, NewDeviation,
};
use entity::Timestamp;

use crate::client::ApiClient;
use crate::error::Error;

pub struct OperationsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn operations(&self) -> OperationsApi<'_> {
        OperationsApi { client: self }
    }
}

impl OperationsApi<'_> {
    pub async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<DailyLog>, Error> {
        self.client
            .get_with_query("/operations/logs", &[("execution_date", date.to_string())])
            .await
    }

    /// Logs between `start` and `end`, both inclusive.
    pub async fn list_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyLog>, Error> {
        self.client
            .get_with_query(
                "/operations/logs/range",
                &[("start_date", start.to_string()), ("end_date", end.to_string())],
            )
            .await
    }

    pub async fn create(&self, log: &NewDailyLog) -> Result<DailyLog, Error> {
        self.client.post_json("/operations/logs", log).await
    }

    pub async fn start(&self, id: &str, actual_start: Timestamp) -> Result<DailyLog, Error> {
        self.client
            .post_json(
                &format!("/operations/logs/{id}/start"),
                &LogStart { actual_start },
            )
            .await
    }

    pub async fn complete(&self, id: &str, completion: &LogCompletion) -> Result<DailyLog, Error> {
        self.client
            .post_json(&format!("/operations/logs/{id}/complete"), completion)
            .await
    }

    pub async fn update(&self, id: &str, update: &LogUpdate) -> Result<DailyLog, Error> {
        self.client
            .patch_json(&format!("/operations/logs/{id}"), update)
            .await
    }

    pub async fn add_deviation(
        &self,
        id: &str,
        deviation: &NewDeviation,
    ) -> Result<Deviation, Error> {
        self.client
            .post_json(&format!("/operations/logs/{id}/deviations"), deviation)
            .await
    }
}
