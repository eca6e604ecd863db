//! Request and response data for each payment flow, plus the common data
//! shared by all flows of one payment attempt.

use common_enums::{AttemptStatus, Currency};
use common_utils::{
    errors::{CustomResult, ValidationError},
    types::MinorUnit,
};
use masking::Secret;

use crate::{
    payment_method_data::PaymentMethodData,
    router_response_types::RedirectForm,
    types::Connectors,
};

/// Payment connectors the gateway can route to.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectorEnum {
    Adyen,
}

/// Transaction identifier returned by the connector, when one was returned.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ResponseId {
    ConnectorTransactionId(String),
    NoResponseId,
}

impl ResponseId {
    pub fn get_connector_transaction_id(&self) -> CustomResult<String, ValidationError> {
        match self {
            Self::ConnectorTransactionId(txn_id) => Ok(txn_id.to_string()),
            Self::NoResponseId => Err(error_stack::report!(
                ValidationError::IncorrectValueProvided {
                    field_name: "connector_transaction_id",
                }
            )),
        }
    }
}

/// Data common to every flow of one payment attempt. Carried through the
/// connector pipeline and handed back with the flow response; the connector
/// updates `status` while transformers run.
#[derive(Debug, Clone)]
pub struct PaymentFlowData {
    pub payment_id: String,
    pub attempt_id: String,
    pub status: AttemptStatus,
    pub description: Option<String>,
    pub return_url: Option<String>,
    /// Reference sent to the connector; the host order id.
    pub connector_request_reference_id: String,
    pub test_mode: Option<bool>,
    pub connector_http_status_code: Option<u16>,
    pub connector_response_headers: Option<http::HeaderMap>,
    pub connectors: Connectors,
    pub raw_connector_response: Option<Secret<String>>,
}

pub trait RawConnectorResponse {
    fn set_raw_connector_response(&mut self, response: Option<String>);
}

impl RawConnectorResponse for PaymentFlowData {
    fn set_raw_connector_response(&mut self, response: Option<String>) {
        self.raw_connector_response = response.map(Secret::new);
    }
}

pub trait ConnectorResponseHeaders {
    fn set_connector_response_headers(&mut self, headers: Option<http::HeaderMap>);
}

impl ConnectorResponseHeaders for PaymentFlowData {
    fn set_connector_response_headers(&mut self, headers: Option<http::HeaderMap>) {
        self.connector_response_headers = headers;
    }
}

/// Request data for the onsite card payment flow.
#[derive(Debug, Clone)]
pub struct PaymentsAuthorizeData {
    pub payment_method_data: PaymentMethodData,
    /// Cart total in minor units.
    pub amount: MinorUnit,
    pub currency: Currency,
    /// Where the connector sends the shopper back after any additional
    /// authentication step.
    pub router_return_url: Option<String>,
}

impl PaymentsAuthorizeData {
    pub fn get_router_return_url(&self) -> CustomResult<String, ValidationError> {
        self.router_return_url
            .clone()
            .ok_or_else(|| {
                error_stack::report!(ValidationError::MissingRequiredField {
                    field_name: "router_return_url",
                })
            })
    }
}

/// Request data for hosted-session creation.
#[derive(Debug, Clone)]
pub struct SessionTokenRequestData {
    pub amount: MinorUnit,
    pub currency: Currency,
    /// Identifier of the hosted checkout theme configured with the gateway.
    pub theme_id: Option<String>,
    pub router_return_url: Option<String>,
}

/// Hosted-session descriptor returned by the connector: the session to poll
/// later and the page the shopper is sent to.
#[derive(Debug, Clone)]
pub struct SessionTokenResponseData {
    pub session_id: String,
    pub session_url: String,
}

/// Request data for polling the final status of a hosted session.
#[derive(Debug, Clone)]
pub struct PaymentsSyncData {
    pub connector_transaction_id: ResponseId,
    /// Opaque result blob the connector appended to the return URL; echoed
    /// back on the status query.
    pub session_result: Option<String>,
    pub amount: MinorUnit,
    pub currency: Currency,
}

impl PaymentsSyncData {
    pub fn get_connector_transaction_id(&self) -> CustomResult<String, ValidationError> {
        self.connector_transaction_id.get_connector_transaction_id()
    }
}

/// Response data shared by the authorize and sync flows.
#[derive(Debug, Clone)]
pub enum PaymentsResponseData {
    TransactionResponse {
        resource_id: ResponseId,
        redirection_data: Option<Box<RedirectForm>>,
        connector_response_reference_id: Option<String>,
        status_code: u16,
    },
}

impl PaymentsResponseData {
    pub fn get_redirection_data(&self) -> Option<&RedirectForm> {
        match self {
            Self::TransactionResponse {
                redirection_data, ..
            } => redirection_data.as_deref(),
        }
    }
}
