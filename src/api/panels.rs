use serde::Serialize;
use serde_json::{json, Value};

use super::{with_query, ApiClient, ApiRequest};
use crate::error::ClientResult;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPanel {
    pub item_id: String,
    pub expert_ids: Vec<String>,
    pub board_type: String,
}

pub struct Panels<'a> {
    client: &'a ApiClient,
}

impl<'a> Panels<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    pub async fn create(&self, item_id: &str, expert_ids: &[String], board_type: &str) -> ClientResult<Value> {
        let body = NewPanel {
            item_id: item_id.to_string(),
            expert_ids: expert_ids.to_vec(),
            board_type: board_type.to_string(),
        };
        self.client.send(ApiRequest::post("/panels").body(&body)).await
    }

    pub async fn get_by_id(&self, id: &str) -> ClientResult<Value> {
        self.client.send(ApiRequest::get(format!("/panels/{}", id))).await
    }

    pub async fn list(&self, item_id: Option<&str>) -> ClientResult<Value> {
        self.client.send(ApiRequest::get(with_query("/panels", "itemId", item_id))).await
    }

    pub async fn update_invite_status(&self, panel_id: &str, expert_id: &str, status: &str) -> ClientResult<Value> {
        let req = ApiRequest::put(format!("/panels/{}/invite", panel_id))
            .json(json!({ "expertId": expert_id, "status": status }));
        self.client.send(req).await
    }

    /// Accept or decline an invitation with a free-text reason.
    pub async fn respond_to_invite(&self, panel_id: &str, expert_id: &str, status: &str, reason: &str) -> ClientResult<Value> {
        let req = ApiRequest::put(format!("/panels/{}/invite", panel_id))
            .json(json!({ "expertId": expert_id, "status": status, "reason": reason }));
        self.client.send(req).await
    }
}
