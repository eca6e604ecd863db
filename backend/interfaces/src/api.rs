use common_utils::errors::CustomResult;
use domain_types::{
    errors::ConnectorError,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_response_types::Response,
    types::Connectors,
};
use masking::Maskable;

use crate::events::ConnectorEvent;

/// Denomination in which the connector expects amounts on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyUnit {
    Base,
    Minor,
}

/// Properties shared by every flow of one connector.
pub trait ConnectorCommon {
    /// Connector identifier, also the gateway id registered with the host.
    fn id(&self) -> &'static str;

    fn get_currency_unit(&self) -> CurrencyUnit {
        CurrencyUnit::Minor
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError>;

    fn base_url<'a>(&self, connectors: &'a Connectors) -> &'a str;

    fn build_error_response(
        &self,
        res: Response,
        event_builder: Option<&mut ConnectorEvent>,
    ) -> CustomResult<ErrorResponse, ConnectorError> {
        if let Some(event) = event_builder {
            event.set_error_response_body(&serde_json::json!({
                "status_code": res.status_code
            }));
        }
        Ok(ErrorResponse {
            status_code: res.status_code,
            ..ErrorResponse::default()
        })
    }
}
