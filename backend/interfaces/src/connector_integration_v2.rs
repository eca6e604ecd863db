use std::time::Duration;

use common_utils::{
    errors::CustomResult,
    request::{Method, Request, RequestBuilder, RequestContent},
};
use domain_types::{
    errors::ConnectorError,
    router_data::ErrorResponse,
    router_data_v2::RouterDataV2,
    router_response_types::Response,
};
use masking::Maskable;

use crate::events::ConnectorEvent;

pub type BoxedConnectorIntegrationV2<'a, Flow, ResourceCommonData, Req, Resp> =
    Box<&'a (dyn ConnectorIntegrationV2<Flow, ResourceCommonData, Req, Resp> + Send + Sync)>;

/// Object-safe accessor letting callers that hold a connector behind a
/// service trait pull one flow's integration out of it.
pub trait ConnectorIntegrationAnyV2<Flow, ResourceCommonData, Req, Resp> {
    fn get_connector_integration_v2(
        &self,
    ) -> BoxedConnectorIntegrationV2<'_, Flow, ResourceCommonData, Req, Resp>;
}

impl<S, Flow, ResourceCommonData, Req, Resp>
    ConnectorIntegrationAnyV2<Flow, ResourceCommonData, Req, Resp> for S
where
    S: ConnectorIntegrationV2<Flow, ResourceCommonData, Req, Resp> + Send + Sync,
{
    fn get_connector_integration_v2(
        &self,
    ) -> BoxedConnectorIntegrationV2<'_, Flow, ResourceCommonData, Req, Resp> {
        Box::new(self)
    }
}

/// One connector flow: how to build the outbound request and how to fold the
/// reply back into the router data. The default `build_request_v2` composes
/// the per-flow getters; a flow without a request (no `get_url`) yields
/// `None` and the pipeline passes the router data through untouched.
pub trait ConnectorIntegrationV2<Flow, ResourceCommonData, Req, Resp>:
    ConnectorIntegrationAnyV2<Flow, ResourceCommonData, Req, Resp> + Send + Sync + 'static
{
    fn get_headers(
        &self,
        _req: &RouterDataV2<Flow, ResourceCommonData, Req, Resp>,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(vec![])
    }

    fn get_content_type(&self) -> &'static str {
        "application/json"
    }

    fn get_http_method(&self) -> Method {
        Method::Post
    }

    fn get_url(
        &self,
        _req: &RouterDataV2<Flow, ResourceCommonData, Req, Resp>,
    ) -> CustomResult<String, ConnectorError> {
        Ok(String::new())
    }

    fn get_request_body(
        &self,
        _req: &RouterDataV2<Flow, ResourceCommonData, Req, Resp>,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        Ok(None)
    }

    /// Per-request timeout applied by the transport; `None` leaves the
    /// client default in place.
    fn get_request_timeout(&self) -> Option<Duration> {
        None
    }

    fn build_request_v2(
        &self,
        req: &RouterDataV2<Flow, ResourceCommonData, Req, Resp>,
    ) -> CustomResult<Option<Request>, ConnectorError> {
        let url = self.get_url(req)?;
        if url.is_empty() {
            return Ok(None);
        }
        let mut request_builder = RequestBuilder::new()
            .method(self.get_http_method())
            .url(&url)
            .headers(self.get_headers(req)?)
            .set_optional_body(self.get_request_body(req)?);
        if let Some(timeout) = self.get_request_timeout() {
            request_builder = request_builder.timeout(timeout);
        }
        Ok(Some(request_builder.build()))
    }

    fn handle_response_v2(
        &self,
        _data: &RouterDataV2<Flow, ResourceCommonData, Req, Resp>,
        _event_builder: Option<&mut ConnectorEvent>,
        _res: Response,
    ) -> CustomResult<RouterDataV2<Flow, ResourceCommonData, Req, Resp>, ConnectorError> {
        Err(ConnectorError::NotImplemented("handle_response_v2".to_string()).into())
    }

    fn get_error_response_v2(
        &self,
        res: Response,
        _event_builder: Option<&mut ConnectorEvent>,
    ) -> CustomResult<ErrorResponse, ConnectorError> {
        Ok(ErrorResponse {
            status_code: res.status_code,
            ..ErrorResponse::default()
        })
    }

    fn get_5xx_error_response(
        &self,
        res: Response,
        event_builder: Option<&mut ConnectorEvent>,
    ) -> CustomResult<ErrorResponse, ConnectorError> {
        self.get_error_response_v2(res, event_builder)
    }
}
