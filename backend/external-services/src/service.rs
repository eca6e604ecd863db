use std::{str::FromStr, time::Duration};

use common_utils::request::{Method, Request, RequestContent};
use domain_types::{
    connector_types::{ConnectorResponseHeaders, RawConnectorResponse},
    errors::{ApiClientError, ConnectorError},
    router_data_v2::RouterDataV2,
    router_response_types::Response,
    types::Proxy,
};
use error_stack::{report, ResultExt};
use interfaces::connector_integration_v2::BoxedConnectorIntegrationV2;
use masking::{ErasedMaskSerialize, Maskable};
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::json;
use tracing::field::Empty;

pub type CustomResult<T, E> = error_stack::Result<T, E>;
pub type Headers = std::collections::HashSet<(String, Maskable<String>)>;

/// Outbound transport. Injected into the processing pipeline so tests and
/// alternative deployments can swap the HTTP stack without touching the
/// orchestration code.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    /// Send one request. `Ok(Ok(_))` is a success-range reply, `Ok(Err(_))`
    /// an error-range reply with a readable body, `Err(_)` a transport
    /// failure (DNS, TLS, timeout, refusal).
    async fn send(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError>;
}

/// `reqwest`-backed [`ApiClient`]. Clients are pooled process-wide; the
/// proxied and non-proxied variants are built once and reused.
#[derive(Debug, Clone, Default)]
pub struct ReqwestApiClient {
    proxy: Proxy,
}

impl ReqwestApiClient {
    pub fn new(proxy: Proxy) -> Self {
        Self { proxy }
    }
}

#[async_trait::async_trait]
impl ApiClient for ReqwestApiClient {
    async fn send(
        &self,
        request: Request,
    ) -> CustomResult<Result<Response, Response>, ApiClientError> {
        let url =
            reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;

        let should_bypass_proxy = self.proxy.bypass_proxy_urls.contains(&url.to_string());
        let client = get_base_client(&self.proxy, should_bypass_proxy)?;

        let headers = request.headers.construct_header_map()?;

        let mut request_builder = match request.method {
            Method::Get => client.get(url),
            Method::Post => {
                let client = client.post(url);
                match request.body {
                    Some(RequestContent::Json(payload)) => client.json(&payload),
                    None => client,
                }
            }
        }
        .add_headers(headers);

        if let Some(timeout) = request.timeout {
            request_builder = request_builder.timeout(timeout);
        }

        let response = request_builder.send().await.map_err(|error| {
            let api_error = match error {
                error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
                _ => ApiClientError::RequestNotSent(error.to_string()),
            };
            tracing::error!(?api_error, "unable to send request to connector");
            report!(api_error)
        })?;

        handle_response(response).await
    }
}

#[tracing::instrument(
    name = "execute_connector_processing_step",
    skip_all,
    fields(
        request.headers = Empty,
        request.body = Empty,
        request.url = Empty,
        request.method = Empty,
        response.body = Empty,
        response.error_message = Empty,
        response.status_code = Empty,
        latency = Empty,
    )
)]
pub async fn execute_connector_processing_step<F, ResourceCommonData, Req, Resp>(
    client: &dyn ApiClient,
    connector: BoxedConnectorIntegrationV2<'_, F, ResourceCommonData, Req, Resp>,
    router_data: RouterDataV2<F, ResourceCommonData, Req, Resp>,
) -> CustomResult<RouterDataV2<F, ResourceCommonData, Req, Resp>, ConnectorError>
where
    F: Clone + 'static,
    Req: Clone + std::fmt::Debug + 'static,
    Resp: Clone + std::fmt::Debug + 'static,
    ResourceCommonData: Clone + RawConnectorResponse + ConnectorResponseHeaders + 'static,
{
    let start = tokio::time::Instant::now();
    let connector_request = connector.build_request_v2(&router_data)?;

    let Some(request) = connector_request else {
        return Ok(router_data);
    };

    let masked_headers =
        request
            .headers
            .iter()
            .fold(serde_json::Map::new(), |mut acc, (k, v)| {
                let value = match v {
                    Maskable::Masked(_) => {
                        serde_json::Value::String("*** alloc::string::String ***".to_string())
                    }
                    Maskable::Normal(iv) => serde_json::Value::String(iv.to_owned()),
                };
                acc.insert(k.clone(), value);
                acc
            });
    tracing::Span::current().record(
        "request.headers",
        tracing::field::display(serde_json::Value::Object(masked_headers)),
    );

    let masked_request = match request.body.as_ref() {
        Some(RequestContent::Json(i)) => (**i)
            .masked_serialize()
            .unwrap_or(json!({ "error": "failed to mask serialize connector request"})),
        None => serde_json::Value::Null,
    };
    tracing::Span::current().record("request.body", tracing::field::display(&masked_request));
    tracing::Span::current().record("request.url", tracing::field::display(&request.url));
    tracing::Span::current().record("request.method", tracing::field::display(request.method));

    let response = client.send(request).await;

    let result = match response {
        Ok(body) => match body {
            Ok(body) => {
                tracing::Span::current()
                    .record("response.status_code", tracing::field::display(body.status_code));
                if let Ok(parsed) = parse_json_with_bom_handling(&body.response) {
                    tracing::Span::current().record(
                        "response.body",
                        tracing::field::display(parsed.masked_serialize().unwrap_or(
                            json!({ "error": "failed to mask serialize connector response"}),
                        )),
                    );
                }

                let mut updated_router_data = router_data.clone();
                updated_router_data
                    .resource_common_data
                    .set_raw_connector_response(strip_bom_and_convert_to_string(&body.response));
                updated_router_data
                    .resource_common_data
                    .set_connector_response_headers(body.headers.clone());

                connector.handle_response_v2(&updated_router_data, None, body)?
            }
            Err(body) => {
                let mut updated_router_data = router_data.clone();
                updated_router_data
                    .resource_common_data
                    .set_raw_connector_response(strip_bom_and_convert_to_string(&body.response));
                updated_router_data
                    .resource_common_data
                    .set_connector_response_headers(body.headers.clone());

                let error = match body.status_code {
                    500..=511 => connector.get_5xx_error_response(body, None)?,
                    _ => connector.get_error_response_v2(body, None)?,
                };
                tracing::Span::current()
                    .record("response.error_message", tracing::field::display(&error.message));
                tracing::Span::current()
                    .record("response.status_code", tracing::field::display(error.status_code));
                updated_router_data.response = Err(error);
                updated_router_data
            }
        },
        Err(err) => {
            return Err(err.change_context(ConnectorError::ProcessingStepFailed(None)));
        }
    };

    tracing::Span::current().record("latency", start.elapsed().as_millis());
    tracing::info!(log_type = "api", "outgoing connector request completed");
    Ok(result)
}

static NON_PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();
static PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();

fn get_base_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    Ok(if should_bypass_proxy
        || (proxy_config.http_url.is_none() && proxy_config.https_url.is_none())
    {
        &NON_PROXIED_CLIENT
    } else {
        &PROXIED_CLIENT
    }
    .get_or_try_init(|| {
        get_client_builder(proxy_config, should_bypass_proxy)?
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)
            .inspect_err(|err| {
                tracing::error!(?err, "failed to construct base client");
            })
    })?
    .clone())
}

fn get_client_builder(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let mut client_builder = Client::builder()
        .use_rustls_tls()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    if should_bypass_proxy {
        return Ok(client_builder);
    }

    // Proxy all HTTPS traffic through the configured HTTPS proxy
    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url).change_context(ApiClientError::InvalidProxyConfiguration)?,
        );
    }

    // Proxy all HTTP traffic through the configured HTTP proxy
    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url).change_context(ApiClientError::InvalidProxyConfiguration)?,
        );
    }

    Ok(client_builder)
}

async fn handle_response(
    resp: reqwest::Response,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let status_code = resp.status().as_u16();
    let headers = Some(resp.headers().to_owned());
    match status_code {
        200..=202 | 204 | 302 => {
            let response = resp
                .bytes()
                .await
                .change_context(ApiClientError::ResponseDecodingFailed)?;
            Ok(Ok(Response {
                headers,
                response,
                status_code,
            }))
        }
        400..=599 => {
            let bytes = resp
                .bytes()
                .await
                .change_context(ApiClientError::ResponseDecodingFailed)?;
            Ok(Err(Response {
                headers,
                response: bytes,
                status_code,
            }))
        }
        _ => {
            tracing::error!(status_code, "unexpected response from server");
            Err(report!(ApiClientError::UnexpectedServerResponse))
        }
    }
}

/// Helper function to remove BOM from response bytes and convert to string
fn strip_bom_and_convert_to_string(response_bytes: &[u8]) -> Option<String> {
    String::from_utf8(response_bytes.to_vec())
        .ok()
        .map(|s| s.trim_start_matches('\u{FEFF}').to_string())
}

/// Helper function to parse JSON from response bytes with BOM handling
fn parse_json_with_bom_handling(
    response_bytes: &[u8],
) -> Result<serde_json::Value, serde_json::Error> {
    match serde_json::from_slice::<serde_json::Value>(response_bytes) {
        Ok(value) => Ok(value),
        Err(_) => {
            let cleaned_response = if response_bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
                &response_bytes[3..]
            } else {
                response_bytes
            };
            serde_json::from_slice::<serde_json::Value>(cleaned_response)
        }
    }
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = header_value.into_inner();
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

pub(super) trait RequestBuilderExt {
    fn add_headers(self, headers: reqwest::header::HeaderMap) -> Self;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn add_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self = self.headers(headers);
        self
    }
}
