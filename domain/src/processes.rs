//! Processes of the selected goal and the step-by-step flow view.

use api_client::ApiClient;
use log::*;

pub use entity::processes::{NewProcess, NewProcessStep, Process, ProcessStep};

use crate::error::Error;
use crate::load_state::LoadState;

/// How a step is marked in the flow view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMarker {
    /// The step being worked on now.
    Current,
    /// Disabled steps are shown dimmed.
    Inactive,
    Pending,
}

pub fn step_marker(step: &ProcessStep, current_step_id: Option<&str>) -> StepMarker {
    if current_step_id == Some(step.id.as_str()) {
        StepMarker::Current
    } else if !step.is_active {
        StepMarker::Inactive
    } else {
        StepMarker::Pending
    }
}

/// The steps of `process` in sequence order, each with its marker.
pub fn flow<'p>(
    process: &'p Process,
    current_step_id: Option<&str>,
) -> Vec<(&'p ProcessStep, StepMarker)> {
    process
        .ordered_steps()
        .into_iter()
        .map(|step| (step, step_marker(step, current_step_id)))
        .collect()
}

pub struct ProcessesPage<'a> {
    client: &'a ApiClient,
    goal_id: Option<String>,
    processes: LoadState<Vec<Process>>,
}

impl<'a> ProcessesPage<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            goal_id: None,
            processes: LoadState::Loading,
        }
    }

    pub fn processes(&self) -> &LoadState<Vec<Process>> {
        &self.processes
    }

    pub fn goal_id(&self) -> Option<&str> {
        self.goal_id.as_deref()
    }

    /// Loads the processes of `goal_id`. Without a selected goal there is
    /// nothing to load.
    pub async fn load(&mut self, goal_id: Option<&str>) -> Result<(), Error> {
        if self.goal_id.as_deref() != goal_id {
            self.goal_id = goal_id.map(str::to_string);
            self.processes = LoadState::Loading;
        }
        self.refresh().await
    }

    pub async fn refresh(&mut self) -> Result<(), Error> {
        let Some(goal_id) = self.goal_id.clone() else {
            self.processes = LoadState::Empty;
            return Ok(());
        };

        match self.client.processes().list_by_goal(&goal_id).await {
            Ok(processes) => {
                self.processes = LoadState::from_items(processes);
                Ok(())
            }
            Err(e) => {
                warn!("Error fetching processes for goal {goal_id}: {e}");
                self.processes.settle_failed();
                Err(e.into())
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<Process, Error> {
        Ok(self.client.processes().get(id).await?)
    }

    pub async fn create(&mut self, process: &NewProcess) -> Result<Process, Error> {
        let Some(goal_id) = self.goal_id.clone() else {
            return Err(Error::validation("Select a goal first"));
        };
        if process.name.trim().is_empty() {
            return Err(Error::validation("Process name is required"));
        }

        let created = self
            .client
            .processes()
            .create(&goal_id, process)
            .await
            .map_err(|e| {
                warn!("Error creating process: {e}");
                Error::from(e)
            })?;
        let _ = self.refresh().await;
        Ok(created)
    }
}
