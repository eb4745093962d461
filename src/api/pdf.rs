//! Advertisement document upload. Upload and preview send multipart bodies and
//! have their own fallback messages; the error shape is the shared one.

use serde_json::Value;

use super::{ApiClient, ApiRequest, UploadFile};
use crate::error::{ClientResult, PREVIEW_FAILURE, UPLOAD_FAILURE};

pub struct Pdf<'a> {
    client: &'a ApiClient,
}

impl<'a> Pdf<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self { Self { client } }

    pub async fn upload(&self, file: UploadFile) -> ClientResult<Value> {
        self.client.send(ApiRequest::post("/pdf/upload").multipart(file, UPLOAD_FAILURE)).await
    }

    pub async fn preview(&self, file: UploadFile) -> ClientResult<Value> {
        self.client.send(ApiRequest::post("/pdf/preview").multipart(file, PREVIEW_FAILURE)).await
    }

    pub async fn reprocess(&self, advertisement_id: &str) -> ClientResult<Value> {
        self.client.send(ApiRequest::post(format!("/pdf/reprocess/{}", advertisement_id))).await
    }
}
