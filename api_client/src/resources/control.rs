use chrono::NaiveDate;
use entity::analysis::ImprovementAnalysis;
use entity::improvements::{Improvement, ImprovementUpdate};

use crate::client::ApiClient;
use crate::error::Error;

pub struct ControlApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn control(&self) -> ControlApi<'_> {
        ControlApi { client: self }
    }
}

impl ControlApi<'_> {
    pub async fn list_improvements(&self) -> Result<Vec<Improvement>, Error> {
        self.client.get("/control/improvements").await
    }

    pub async fn get_improvement(&self, id: &str) -> Result<Improvement, Error> {
        self.client
            .get(&format!("/control/improvements/{id}"))
            .await
    }

    /// Runs the backend's improvement analysis for a date.
    pub async fn analyze(&self, date: NaiveDate) -> Result<ImprovementAnalysis, Error> {
        self.client
            .get_with_query("/control/analyze", &[("target_date", date.to_string())])
            .await
    }

    pub async fn update_improvement(
        &self,
        id: &str,
        update: &ImprovementUpdate,
    ) -> Result<Improvement, Error> {
        self.client
            .patch_json(&format!("/control/improvements/{id}"), update)
            .await
    }
}
