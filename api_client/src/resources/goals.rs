use entity::goals::{Goal, GoalUpdate, NewGoal, NewResource, Resource};

use crate::client::ApiClient;
use crate::error::Error;

pub struct GoalsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn goals(&self) -> GoalsApi<'_> {
        GoalsApi { client: self }
    }
}

impl GoalsApi<'_> {
    pub async fn list(&self) -> Result<Vec<Goal>, Error> {
        self.client.get("/inputs/goals").await
    }

    pub async fn get(&self, id: &str) -> Result<Goal, Error> {
        self.client.get(&format!("/inputs/goals/{id}")).await
    }

    pub async fn create(&self, goal: &NewGoal) -> Result<Goal, Error> {
        self.client.post_json("/inputs/goals", goal).await
    }

    pub async fn update(&self, id: &str, update: &GoalUpdate) -> Result<Goal, Error> {
        self.client
            .patch_json(&format!("/inputs/goals/{id}"), update)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.client.delete(&format!("/inputs/goals/{id}")).await
    }

    pub async fn add_resource(
        &self,
        goal_id: &str,
        resource: &NewResource,
    ) -> Result<Resource, Error> {
        self.client
            .post_json(&format!("/inputs/goals/{goal_id}/resources"), resource)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use chrono::NaiveDate;
    use entity::goals::{GoalUpdate, NewGoal, NewResource};
    use entity::status::{GoalStatus, ResourceType};
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_goals() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/inputs/goals")
            .match_header("authorization", BEARER)
            .with_status(200)
            .with_body(json!([goal_json("g1", "active"), goal_json("g2", "draft")]).to_string())
            .create_async()
            .await;

        let goals = client(&server).goals().list().await.unwrap();

        mock.assert_async().await;
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].status, GoalStatus::Active);
        assert_eq!(goals[1].status, GoalStatus::Draft);
    }

    #[tokio::test]
    async fn test_create_goal_sends_only_set_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/inputs/goals")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "title": "Run a marathon",
                "purpose": "Stay healthy",
                "target_date": "2025-10-01"
            })))
            .with_status(201)
            .with_body(goal_json("g1", "draft").to_string())
            .create_async()
            .await;

        let new_goal = NewGoal {
            title: "Run a marathon".to_string(),
            purpose: "Stay healthy".to_string(),
            target_date: NaiveDate::from_ymd_opt(2025, 10, 1),
            ..Default::default()
        };
        let goal = client(&server).goals().create(&new_goal).await.unwrap();

        mock.assert_async().await;
        assert_eq!(goal.id, "g1");
    }

    #[tokio::test]
    async fn test_update_status_patches_goal() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PATCH", "/api/inputs/goals/g1")
            .match_body(Matcher::Json(json!({"status": "active"})))
            .with_status(200)
            .with_body(goal_json("g1", "active").to_string())
            .create_async()
            .await;

        let goal = client(&server)
            .goals()
            .update("g1", &GoalUpdate::status(GoalStatus::Active))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(goal.status, GoalStatus::Active);
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/inputs/goals/g1")
            .match_header("authorization", BEARER)
            .with_status(204)
            .create_async()
            .await;

        client(&server).goals().delete("g1").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_add_resource() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/inputs/goals/g1/resources")
            .match_body(Matcher::Json(json!({
                "resource_type": "time",
                "name": "Morning hours",
                "quantity": 2.0,
                "unit": "hours"
            })))
            .with_status(201)
            .with_body(
                json!({
                    "id": "r1",
                    "goal_id": "g1",
                    "resource_type": "time",
                    "name": "Morning hours",
                    "quantity": 2.0,
                    "unit": "hours",
                    "created_at": "2025-01-01T08:00:00Z"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let resource = client(&server)
            .goals()
            .add_resource(
                "g1",
                &NewResource {
                    resource_type: ResourceType::Time,
                    name: "Morning hours".to_string(),
                    description: None,
                    quantity: Some(2.0),
                    unit: Some("hours".to_string()),
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(resource.goal_id, "g1");
    }
}
