use std::collections::HashMap;

use common_utils::request::Method;
use serde::{Deserialize, Serialize};

/// Raw reply captured from the connector before flow-specific handling.
#[derive(Clone, Debug)]
pub struct Response {
    pub headers: Option<http::HeaderMap>,
    pub response: bytes::Bytes,
    pub status_code: u16,
}

/// Instruction to send the shopper's browser somewhere else, produced from a
/// connector reply and handed back to the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RedirectForm {
    Form {
        endpoint: String,
        method: Method,
        form_fields: HashMap<String, String>,
    },
    Uri {
        uri: String,
    },
}

impl RedirectForm {
    /// The URL the browser should be sent to, regardless of variant.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Form { endpoint, .. } => endpoint,
            Self::Uri { uri } => uri,
        }
    }
}
