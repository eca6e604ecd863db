use common_enums::AttemptStatus;
use common_utils::consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE};
use masking::Secret;
use serde::{Deserialize, Serialize};

/// Credentials handed to the connector for one request cycle. Resolved fresh
/// from the host settings store per invocation; never cached process-wide.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "auth_type")]
pub enum ConnectorAuthType {
    HeaderKey {
        api_key: Secret<String>,
    },
    BodyKey {
        api_key: Secret<String>,
        key1: Secret<String>,
    },
    NoKey,
}

/// Error reply from the connector, normalized across flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status_code: u16,
    pub code: String,
    pub message: String,
    pub reason: Option<String>,
    pub attempt_status: Option<AttemptStatus>,
    pub connector_transaction_id: Option<String>,
}

impl Default for ErrorResponse {
    fn default() -> Self {
        Self {
            status_code: 500,
            code: NO_ERROR_CODE.to_string(),
            message: NO_ERROR_MESSAGE.to_string(),
            reason: None,
            attempt_status: None,
            connector_transaction_id: None,
        }
    }
}
