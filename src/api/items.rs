use serde::Serialize;
use serde_json::Value;

use super::{with_query, ApiClient, ApiRequest};
use crate::error::ClientResult;

pub const DEFAULT_PANEL_TYPE: &str = "Final Interview Panel";
pub const DEFAULT_PANEL_ROLE: &str = "Member";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompleteBoard {
    pub expert_ids: Vec<String>,
    pub panel_type: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PanelInvite {
    pub expert_id: String,
    pub panel_role: String,
}

pub struct Items<'a> {
    client: &'a ApiClient,
}

impl<'a> Items<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    pub async fn get_all(&self, status: Option<&str>) -> ClientResult<Value> {
        self.client.send(ApiRequest::get(with_query("/items", "status", status))).await
    }

    pub async fn get_by_id(&self, id: &str) -> ClientResult<Value> {
        self.client.send(ApiRequest::get(format!("/items/{}", id))).await
    }

    pub async fn update(&self, id: &str, data: Value) -> ClientResult<Value> {
        self.client.send(ApiRequest::put(format!("/items/{}", id)).json(data)).await
    }

    /// `panel_type` defaults to "Final Interview Panel".
    pub async fn complete_board(&self, item_id: &str, expert_ids: &[String], panel_type: Option<&str>) -> ClientResult<Value> {
        let body = CompleteBoard {
            expert_ids: expert_ids.to_vec(),
            panel_type: panel_type.unwrap_or(DEFAULT_PANEL_TYPE).to_string(),
        };
        self.client.send(ApiRequest::post(format!("/items/{}/complete-board", item_id)).body(&body)).await
    }

    pub async fn get_panel(&self, item_id: &str) -> ClientResult<Value> {
        self.client.send(ApiRequest::get(format!("/items/{}/panel", item_id))).await
    }

    pub async fn create(&self, data: Value) -> ClientResult<Value> {
        self.client.send(ApiRequest::post("/items").json(data)).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Value> {
        self.client.send(ApiRequest::delete(format!("/items/{}", id))).await
    }

    pub async fn delete_panel(&self, item_id: &str) -> ClientResult<Value> {
        self.client.send(ApiRequest::delete(format!("/items/{}/panel", item_id))).await
    }

    pub async fn remove_panel_expert(&self, item_id: &str, expert_id: &str) -> ClientResult<Value> {
        self.client
            .send(ApiRequest::delete(format!("/items/{}/panel/expert/{}", item_id, expert_id)))
            .await
    }

    /// `panel_role` defaults to "Member".
    pub async fn invite_expert(&self, item_id: &str, expert_id: &str, panel_role: Option<&str>) -> ClientResult<Value> {
        let body = PanelInvite {
            expert_id: expert_id.to_string(),
            panel_role: panel_role.unwrap_or(DEFAULT_PANEL_ROLE).to_string(),
        };
        self.client.send(ApiRequest::post(format!("/items/{}/invite", item_id)).body(&body)).await
    }
}
