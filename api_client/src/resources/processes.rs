use entity::analysis::AutoDesignResult;
use entity::processes::{NewProcess, Process};

use crate::client::ApiClient;
use crate::error::Error;

pub struct ProcessesApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn processes(&self) -> ProcessesApi<'_> {
        ProcessesApi { client: self }
    }
}

impl ProcessesApi<'_> {
    pub async fn list_by_goal(&self, goal_id: &str) -> Result<Vec<Process>, Error> {
        self.client
            .get(&format!("/processes/goals/{goal_id}/processes"))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Process, Error> {
        self.client.get(&format!("/processes/{id}")).await
    }

    pub async fn create(&self, goal_id: &str, process: &NewProcess) -> Result<Process, Error> {
        self.client
            .post_json(&format!("/processes/goals/{goal_id}/processes"), process)
            .await
    }

    /// Asks the backend's AI to design processes for a goal. Fails with a 400
    /// when no AI provider is configured.
    pub async fn auto_design(&self, goal_id: &str) -> Result<AutoDesignResult, Error> {
        self.client
            .post(&format!("/ai/goals/{goal_id}/auto-design"))
            .await
    }
}
