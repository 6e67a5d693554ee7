//! Fixtures shared by the tests of this crate and of crates built on it.
//! Enabled for dependents with the `test-support` feature.

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::{json, Value};
use store::auth::TOKEN_KEY;
use store::{MemoryStorage, Storage};

use crate::auth::BearerTokenAuth;
use crate::client::ApiClient;
use crate::http::ApiClientBuilder;

pub const TOKEN: &str = "test-token";
pub const BEARER: &str = "Bearer test-token";

/// Client pointed at `<server>/api`, with `TOKEN` in storage.
pub fn client(server: &mockito::Server) -> ApiClient {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, TOKEN).unwrap();
    client_with_storage(server, storage)
}

pub fn client_with_storage(server: &mockito::Server, storage: Arc<dyn Storage>) -> ApiClient {
    ApiClientBuilder::new(format!("{}/api", server.url()))
        .with_auth(Box::new(BearerTokenAuth::new(storage)))
        .build()
        .unwrap()
}

pub fn password(value: &str) -> SecretString {
    SecretString::new(value.to_string())
}

pub fn goal_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "user_id": "u1",
        "title": format!("Goal {id}"),
        "purpose": "Stay healthy",
        "status": status,
        "created_at": "2025-01-01T08:00:00Z",
        "resources": []
    })
}

pub fn improvement_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "user_id": "u1",
        "target_type": "step",
        "target_id": "s1",
        "improvement_type": "merge",
        "title": format!("Improvement {id}"),
        "description": "Merge the two warm-up steps",
        "status": status,
        "created_at": "2025-01-01T08:00:00Z"
    })
}

pub fn daily_log_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "step_id": "s1",
        "user_id": "u1",
        "execution_date": "2025-02-10",
        "status": status,
        "created_at": "2025-02-10T06:00:00Z",
        "deviations": []
    })
}

pub fn measurement_json(date: &str) -> Value {
    json!({
        "id": "m1",
        "user_id": "u1",
        "measurement_type": "daily",
        "measurement_date": date,
        "execution_accuracy": 0.75,
        "time_deviation": 1.3,
        "quality_compliance": null,
        "process_efficiency": 0.5,
        "raw_data": {"total_steps": 4, "completed_steps": 3},
        "created_at": "2025-02-10T23:00:00Z"
    })
}

pub fn process_json(id: &str, goal_id: &str) -> Value {
    json!({
        "id": id,
        "goal_id": goal_id,
        "name": "Morning routine",
        "sequence_order": 0,
        "status": "active",
        "created_at": "2025-01-01T08:00:00Z",
        "steps": [
            {"id": "s2", "process_id": id, "name": "Stretch", "sequence_order": 2,
             "frequency": "daily", "is_active": false, "created_at": "2025-01-01T08:00:00Z"},
            {"id": "s1", "process_id": id, "name": "Wake up", "sequence_order": 1,
             "frequency": "daily", "is_active": true, "created_at": "2025-01-01T08:00:00Z"},
            {"id": "s3", "process_id": id, "name": "Run", "sequence_order": 3,
             "frequency": "daily", "is_active": true, "created_at": "2025-01-01T08:00:00Z"}
        ]
    })
}

pub fn user_json() -> Value {
    json!({
        "id": "u1",
        "email": "ada@example.com",
        "full_name": "Ada Lovelace",
        "is_active": true,
        "created_at": "2025-01-01T08:00:00Z"
    })
}
