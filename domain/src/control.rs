//! Improvement review: approve, reject, implement and analyse.

use api_client::ApiClient;
use chrono::NaiveDate;
use log::*;

pub use entity::analysis::ImprovementAnalysis;
pub use entity::improvements::{Improvement, ImprovementUpdate};
use entity::status::ImprovementStatus;

use crate::error::Error;
use crate::load_state::LoadState;

pub struct ControlPage<'a> {
    client: &'a ApiClient,
    improvements: LoadState<Vec<Improvement>>,
}

impl<'a> ControlPage<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            improvements: LoadState::Loading,
        }
    }

    pub fn improvements(&self) -> &LoadState<Vec<Improvement>> {
        &self.improvements
    }

    /// Improvements in `status`, in backend order.
    pub fn with_status(&self, status: ImprovementStatus) -> Vec<&Improvement> {
        self.improvements
            .items()
            .iter()
            .filter(|improvement| improvement.status == status)
            .collect()
    }

    pub async fn refresh(&mut self) -> Result<(), Error> {
        match self.client.control().list_improvements().await {
            Ok(improvements) => {
                self.improvements = LoadState::from_items(improvements);
                Ok(())
            }
            Err(e) => {
                warn!("Error fetching improvements: {e}");
                self.improvements.settle_failed();
                Err(e.into())
            }
        }
    }

    pub async fn approve(&mut self, id: &str) -> Result<Improvement, Error> {
        self.transition(id, ImprovementStatus::Approved, None).await
    }

    pub async fn reject(&mut self, id: &str) -> Result<Improvement, Error> {
        self.transition(id, ImprovementStatus::Rejected, None).await
    }

    pub async fn implement(
        &mut self,
        id: &str,
        notes: Option<String>,
    ) -> Result<Improvement, Error> {
        self.transition(id, ImprovementStatus::Implemented, notes).await
    }

    /// Runs the backend's improvement analysis for `date`, then refetches
    /// since the analysis may have proposed new improvements.
    pub async fn analyze(&mut self, date: NaiveDate) -> Result<ImprovementAnalysis, Error> {
        let analysis = self.client.control().analyze(date).await.map_err(|e| {
            warn!("Error analyzing {date}: {e}");
            Error::from(e)
        })?;
        let _ = self.refresh().await;
        Ok(analysis)
    }

    async fn transition(
        &mut self,
        id: &str,
        next: ImprovementStatus,
        notes: Option<String>,
    ) -> Result<Improvement, Error> {
        let current = self.current_status(id).await?;
        if !current.can_transition_to(next) {
            return Err(Error::invalid_transition(current, next));
        }

        let update = ImprovementUpdate {
            status: Some(next),
            implementation_notes: notes,
        };
        let improvement = self
            .client
            .control()
            .update_improvement(id, &update)
            .await
            .map_err(|e| {
                warn!("Error updating improvement {id}: {e}");
                Error::from(e)
            })?;
        info!("Improvement {id} is now {next}");
        let _ = self.refresh().await;
        Ok(improvement)
    }

    // Prefer the loaded list; fall back to fetching the single improvement.
    async fn current_status(&self, id: &str) -> Result<ImprovementStatus, Error> {
        if let Some(improvement) = self.improvements.items().iter().find(|i| i.id == id) {
            return Ok(improvement.status);
        }
        let improvement = self.client.control().get_improvement(id).await?;
        Ok(improvement.status)
    }
}
