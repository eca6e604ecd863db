use masking::ErasedMaskSerialize;
use serde::Serialize;

/// Masked capture of one connector exchange, recorded for logging. Secrets
/// never reach the captured value: bodies pass through `masked_serialize`.
#[derive(Debug)]
pub struct ConnectorEvent {
    connector_name: String,
    flow: String,
    request_id: String,
    request_body: Option<serde_json::Value>,
    response_body: Option<serde_json::Value>,
    error_body: Option<serde_json::Value>,
    created_at: time::OffsetDateTime,
}

impl ConnectorEvent {
    pub fn new(connector_name: &str, flow: &str, request_id: &str) -> Self {
        Self {
            connector_name: connector_name.to_string(),
            flow: flow.to_string(),
            request_id: request_id.to_string(),
            request_body: None,
            response_body: None,
            error_body: None,
            created_at: time::OffsetDateTime::now_utc(),
        }
    }

    pub fn set_connector_request<T: ErasedMaskSerialize>(&mut self, request: &T) {
        self.request_body = Some(
            request
                .masked_serialize()
                .unwrap_or_else(|_| serde_json::json!({"error": "failed to mask serialize request"})),
        );
    }

    pub fn set_connector_response<T: ErasedMaskSerialize>(&mut self, response: &T) {
        self.response_body = Some(
            response.masked_serialize().unwrap_or_else(
                |_| serde_json::json!({"error": "failed to mask serialize response"}),
            ),
        );
    }

    pub fn set_error_response_body<T: Serialize>(&mut self, error: &T) {
        self.error_body = Some(
            serde_json::to_value(error)
                .unwrap_or_else(|_| serde_json::json!({"error": "failed to serialize error"})),
        );
    }

    pub fn connector_name(&self) -> &str {
        &self.connector_name
    }

    pub fn flow(&self) -> &str {
        &self.flow
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn created_at(&self) -> time::OffsetDateTime {
        self.created_at
    }

    pub fn request_body(&self) -> Option<&serde_json::Value> {
        self.request_body.as_ref()
    }

    pub fn response_body(&self) -> Option<&serde_json::Value> {
        self.response_body.as_ref()
    }

    pub fn error_body(&self) -> Option<&serde_json::Value> {
        self.error_body.as_ref()
    }
}
