use serde_json::{json, Value};

use super::{with_query, ApiClient, ApiRequest};
use crate::error::ClientResult;

pub struct Advertisements<'a> {
    client: &'a ApiClient,
}

impl<'a> Advertisements<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    pub async fn get_all(&self, status: Option<&str>) -> ClientResult<Value> {
        self.client.send(ApiRequest::get(with_query("/advertisements", "status", status))).await
    }

    pub async fn get_by_id(&self, id: &str) -> ClientResult<Value> {
        self.client.send(ApiRequest::get(format!("/advertisements/{}", id))).await
    }

    pub async fn get_items(&self, advertisement_id: &str) -> ClientResult<Value> {
        self.client.send(ApiRequest::get(format!("/advertisements/{}/items", advertisement_id))).await
    }

    pub async fn update_status(&self, id: &str, status: &str) -> ClientResult<Value> {
        let req = ApiRequest::put(format!("/advertisements/{}", id)).json(json!({ "status": status }));
        self.client.send(req).await
    }

    pub async fn create(&self, data: Value) -> ClientResult<Value> {
        self.client.send(ApiRequest::post("/advertisements").json(data)).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Value> {
        self.client.send(ApiRequest::delete(format!("/advertisements/{}", id))).await
    }
}
