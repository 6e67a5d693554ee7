//! The goals page: list, create, activate, delete and AI auto-design.

use api_client::ApiClient;
use chrono::NaiveDate;
use log::*;

pub use entity::analysis::AutoDesignResult;
pub use entity::goals::{Goal, GoalUpdate, NewGoal, NewResource, Resource};
use entity::status::GoalStatus;

use crate::error::Error;
use crate::load_state::LoadState;

pub const DELETE_GOAL_PROMPT: &str = "Are you sure you want to delete this goal?";
pub const AUTO_DESIGN_SUCCESS: &str = "Processes designed successfully! Check the Processes page.";
pub const AUTO_DESIGN_FAILURE: &str = "Error designing processes. Make sure AI is configured.";

/// A synchronous yes/no prompt shown before a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// What the user typed into the new-goal form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalForm {
    pub title: String,
    pub purpose: String,
    pub description: String,
    pub target_date: Option<NaiveDate>,
}

impl GoalForm {
    /// Title and purpose are required. Blank optional fields are left out of
    /// the request.
    pub fn validate(&self) -> Result<NewGoal, Error> {
        let title = self.title.trim();
        let purpose = self.purpose.trim();
        if title.is_empty() {
            return Err(Error::validation("Goal title is required"));
        }
        if purpose.is_empty() {
            return Err(Error::validation("Purpose is required"));
        }

        let description = self.description.trim();
        Ok(NewGoal {
            title: title.to_string(),
            purpose: purpose.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            target_date: self.target_date,
            ..Default::default()
        })
    }
}

pub struct GoalsPage<'a> {
    client: &'a ApiClient,
    goals: LoadState<Vec<Goal>>,
}

impl<'a> GoalsPage<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            goals: LoadState::Loading,
        }
    }

    pub fn goals(&self) -> &LoadState<Vec<Goal>> {
        &self.goals
    }

    pub fn find(&self, id: &str) -> Option<&Goal> {
        self.goals.items().iter().find(|goal| goal.id == id)
    }

    /// Refetches the list. On failure the previous list stays.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        match self.client.goals().list().await {
            Ok(goals) => {
                self.goals = LoadState::from_items(goals);
                Ok(())
            }
            Err(e) => {
                warn!("Error fetching goals: {e}");
                self.goals.settle_failed();
                Err(e.into())
            }
        }
    }

    pub async fn create(&mut self, form: &GoalForm) -> Result<Goal, Error> {
        let new_goal = form.validate()?;
        let goal = self.client.goals().create(&new_goal).await.map_err(|e| {
            warn!("Error creating goal: {e}");
            Error::from(e)
        })?;
        info!("Created goal {}", goal.id);
        self.refresh_after_write().await;
        Ok(goal)
    }

    /// Deletes a goal once the user confirms. A declined prompt sends nothing
    /// and returns a cancelled error.
    pub async fn delete(&mut self, id: &str, confirm: &dyn Confirm) -> Result<(), Error> {
        if !confirm.confirm(DELETE_GOAL_PROMPT) {
            debug!("Delete of goal {id} declined");
            return Err(Error::cancelled());
        }

        self.client.goals().delete(id).await.map_err(|e| {
            warn!("Error deleting goal: {e}");
            Error::from(e)
        })?;
        info!("Deleted goal {id}");
        self.refresh_after_write().await;
        Ok(())
    }

    pub async fn activate(&mut self, id: &str) -> Result<Goal, Error> {
        let goal = self
            .client
            .goals()
            .update(id, &GoalUpdate::status(GoalStatus::Active))
            .await
            .map_err(|e| {
                warn!("Error activating goal: {e}");
                Error::from(e)
            })?;
        self.refresh_after_write().await;
        Ok(goal)
    }

    pub async fn add_resource(
        &mut self,
        goal_id: &str,
        resource: &NewResource,
    ) -> Result<Resource, Error> {
        if resource.name.trim().is_empty() {
            return Err(Error::validation("Resource name is required"));
        }
        let resource = self
            .client
            .goals()
            .add_resource(goal_id, resource)
            .await
            .map_err(|e| {
                warn!("Error adding resource: {e}");
                Error::from(e)
            })?;
        self.refresh_after_write().await;
        Ok(resource)
    }

    /// Asks the backend to design processes for a goal. The goal list is not
    /// affected, so nothing is refetched.
    pub async fn auto_design(&self, id: &str) -> Result<AutoDesignResult, Error> {
        self.client
            .processes()
            .auto_design(id)
            .await
            .map_err(|e| {
                warn!("Error auto-designing processes: {e}");
                Error::from(e)
            })
    }

    // A failed refetch is already logged; the write itself succeeded.
    async fn refresh_after_write(&mut self) {
        let _ = self.refresh().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::test_support::*;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_form_requires_title_and_purpose() {
        let form = GoalForm {
            title: "  ".to_string(),
            purpose: "Stay healthy".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().user_message(), "Goal title is required");

        let form = GoalForm {
            title: "Run".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().user_message(), "Purpose is required");
    }

    #[test]
    fn test_form_drops_blank_description() {
        let form = GoalForm {
            title: " Run ".to_string(),
            purpose: "Stay healthy".to_string(),
            description: "   ".to_string(),
            target_date: None,
        };
        let new_goal = form.validate().unwrap();
        assert_eq!(new_goal.title, "Run");
        assert!(new_goal.description.is_none());
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let mut server = Server::new_async().await;
        let delete = server
            .mock("DELETE", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let client = client(&server);
        let mut page = GoalsPage::new(&client);
        let asked = Cell::new(None);

        let err = page
            .delete("g1", &|prompt: &str| {
                asked.set(Some(prompt.to_string()));
                false
            })
            .await
            .unwrap_err();

        delete.assert_async().await;
        assert!(err.is_cancelled());
        assert_eq!(asked.take().as_deref(), Some(DELETE_GOAL_PROMPT));
    }

    #[tokio::test]
    async fn test_confirmed_delete_then_refetches() {
        let mut server = Server::new_async().await;
        let delete = server
            .mock("DELETE", "/api/inputs/goals/g1")
            .match_header("authorization", BEARER)
            .with_status(204)
            .expect(1)
            .create_async()
            .await;
        let list = server
            .mock("GET", "/api/inputs/goals")
            .with_status(200)
            .with_body(json!([goal_json("g2", "draft")]).to_string())
            .expect(1)
            .create_async()
            .await;
        let client = client(&server);
        let mut page = GoalsPage::new(&client);

        page.delete("g1", &|_: &str| true).await.unwrap();

        delete.assert_async().await;
        list.assert_async().await;
        assert_eq!(page.goals().items().len(), 1);
        assert!(page.find("g1").is_none());
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", "/api/inputs/goals")
            .expect(0)
            .create_async()
            .await;
        let client = client(&server);
        let mut page = GoalsPage::new(&client);

        let err = page.create(&GoalForm::default()).await.unwrap_err();

        create.assert_async().await;
        assert!(err.user_message().contains("required"));
    }

    #[tokio::test]
    async fn test_create_then_refetches() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", "/api/inputs/goals")
            .match_body(Matcher::Json(json!({"title": "Run", "purpose": "Stay healthy"})))
            .with_status(201)
            .with_body(goal_json("g1", "draft").to_string())
            .create_async()
            .await;
        let list = server
            .mock("GET", "/api/inputs/goals")
            .with_status(200)
            .with_body(json!([goal_json("g1", "draft")]).to_string())
            .create_async()
            .await;
        let client = client(&server);
        let mut page = GoalsPage::new(&client);

        let form = GoalForm {
            title: "Run".to_string(),
            purpose: "Stay healthy".to_string(),
            ..Default::default()
        };
        let goal = page.create(&form).await.unwrap();

        create.assert_async().await;
        list.assert_async().await;
        assert_eq!(goal.id, "g1");
        assert!(page.find("g1").is_some());
    }

    #[tokio::test]
    async fn test_activate_patches_status() {
        let mut server = Server::new_async().await;
        let patch = server
            .mock("PATCH", "/api/inputs/goals/g1")
            .match_body(Matcher::Json(json!({"status": "active"})))
            .with_status(200)
            .with_body(goal_json("g1", "active").to_string())
            .create_async()
            .await;
        server
            .mock("GET", "/api/inputs/goals")
            .with_status(200)
            .with_body(json!([goal_json("g1", "active")]).to_string())
            .create_async()
            .await;
        let client = client(&server);
        let mut page = GoalsPage::new(&client);

        let goal = page.activate("g1").await.unwrap();

        patch.assert_async().await;
        assert_eq!(goal.status, GoalStatus::Active);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_goals() {
        let mut server = Server::new_async().await;
        let ok = server
            .mock("GET", "/api/inputs/goals")
            .with_status(200)
            .with_body(json!([goal_json("g1", "active")]).to_string())
            .create_async()
            .await;
        let client = client(&server);
        let mut page = GoalsPage::new(&client);
        assert!(page.goals().is_loading());
        page.refresh().await.unwrap();
        ok.remove_async().await;

        server
            .mock("GET", "/api/inputs/goals")
            .with_status(503)
            .create_async()
            .await;
        assert!(page.refresh().await.is_err());

        assert_eq!(page.goals().items().len(), 1);
    }

    #[tokio::test]
    async fn test_auto_design_failure_is_reported() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/ai/goals/g1/auto-design")
            .with_status(400)
            .with_body(r#"{"detail":"AI provider not configured"}"#)
            .create_async()
            .await;
        let client = client(&server);
        let page = GoalsPage::new(&client);

        let err = page.auto_design("g1").await.unwrap_err();

        assert_eq!(err.detail(), Some("AI provider not configured"));
    }
}
