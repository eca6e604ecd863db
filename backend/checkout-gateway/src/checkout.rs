//! Checkout-submission handling: create the pending order, drive the
//! connector flow the configured processing style asks for, and map the
//! outcome onto a redirect plus an optional recorded error.

use std::marker::PhantomData;

use common_enums::{AttemptStatus, Currency};
use common_utils::types::{
    AmountConvertor, FloatMajorUnit, FloatMajorUnitForConnector, MinorUnit,
};
use connector_integration::types::ConnectorData;
use domain_types::{
    connector_flow::{Authorize, CreateSessionToken},
    connector_types::{
        ConnectorEnum, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData,
        SessionTokenRequestData, SessionTokenResponseData,
    },
    errors::ConnectorError,
    payment_method_data::{EncryptedCard, PaymentMethodData},
    router_data::ErrorResponse,
    router_data_v2::RouterDataV2,
};
use external_services::service::{execute_connector_processing_step, ApiClient};
use interfaces::connector_integration_v2::{
    BoxedConnectorIntegrationV2, ConnectorIntegrationAnyV2,
};
use masking::{PeekInterface, Secret};

use crate::{
    config::{AdyenConfig, GatewayMode, ProcessingStyle},
    errors::{GatewayError, RecordedError},
    order::{NewOrder, OrderId, OrderStore},
    settings::{SettingsProvider, GATEWAY_ID},
    signing::ReturnUrlSigner,
};

/// Card fields as submitted from the checkout page: opaque blobs produced by
/// the gateway's client-side encryption SDK, plus the holder name. Never
/// persisted, never logged.
#[derive(Clone)]
pub struct CardFields {
    pub holder_name: Secret<String>,
    pub encrypted_number: Secret<String>,
    pub encrypted_expiry_month: Secret<String>,
    pub encrypted_expiry_year: Secret<String>,
    pub encrypted_security_code: Secret<String>,
}

impl CardFields {
    /// All five fields are required; any empty one invalidates the whole
    /// submission before a request is built.
    fn validate(&self) -> Result<(), GatewayError> {
        let fields = [
            &self.holder_name,
            &self.encrypted_number,
            &self.encrypted_expiry_month,
            &self.encrypted_expiry_year,
            &self.encrypted_security_code,
        ];
        if fields.iter().any(|field| field.peek().trim().is_empty()) {
            return Err(GatewayError::InvalidCardData);
        }
        Ok(())
    }
}

impl std::fmt::Debug for CardFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CardFields")
    }
}

/// Cart and shopper data the host hands over when the shopper submits
/// checkout with this gateway selected.
#[derive(Debug, Clone)]
pub struct PurchaseData {
    /// Cart total in the major denomination, as the host reports it.
    pub total: FloatMajorUnit,
    pub currency: Currency,
    pub email: Option<String>,
    pub description: Option<String>,
    /// Present only for onsite submissions.
    pub card: Option<CardFields>,
}

/// Host page URLs the orchestrator redirects to.
#[derive(Debug, Clone)]
pub struct StorefrontPages {
    pub checkout_url: String,
    pub success_url: String,
    pub confirmation_url: String,
}

/// What the host should do after one checkout submission: send the browser
/// to `redirect_url`, showing `error` on the checkout page if set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub redirect_url: String,
    pub error: Option<RecordedError>,
}

/// The payment orchestrator. Stateless and freely constructible; every
/// collaborator is injected and configuration is resolved fresh per call.
pub struct PaymentOrchestrator<'a> {
    settings: &'a dyn SettingsProvider,
    orders: &'a dyn OrderStore,
    client: &'a dyn ApiClient,
    pages: StorefrontPages,
}

impl<'a> PaymentOrchestrator<'a> {
    pub fn new(
        settings: &'a dyn SettingsProvider,
        orders: &'a dyn OrderStore,
        client: &'a dyn ApiClient,
        pages: StorefrontPages,
    ) -> Self {
        Self {
            settings,
            orders,
            client,
            pages,
        }
    }

    /// Entry point for the host's gateway dispatch. Never fails outward:
    /// every error collapses to a recorded message and a redirect back to
    /// checkout with this gateway pre-selected.
    #[tracing::instrument(skip_all, fields(processing_style = tracing::field::Empty))]
    pub async fn process_payment(&self, purchase: PurchaseData) -> CheckoutOutcome {
        match self.try_process(purchase).await {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(?error, "checkout submission failed");
                self.failure_outcome(&error)
            }
        }
    }

    async fn try_process(&self, purchase: PurchaseData) -> Result<CheckoutOutcome, GatewayError> {
        let config = AdyenConfig::resolve(self.settings);
        tracing::Span::current().record(
            "processing_style",
            tracing::field::display(config.processing_style),
        );

        match config.processing_style {
            ProcessingStyle::Onsite => self.process_onsite(&config, purchase).await,
            ProcessingStyle::Hosted => self.process_hosted(&config, purchase).await,
        }
    }

    async fn process_onsite(
        &self,
        config: &AdyenConfig,
        purchase: PurchaseData,
    ) -> Result<CheckoutOutcome, GatewayError> {
        let card = purchase.card.clone().ok_or(GatewayError::InvalidCardData)?;
        card.validate()?;

        let order_id = self.create_order(&purchase)?;
        let return_url = self.signed_return_url(order_id)?;
        let amount = minor_amount(purchase.total, purchase.currency)?;

        let router_data: RouterDataV2<
            Authorize,
            PaymentFlowData,
            PaymentsAuthorizeData,
            PaymentsResponseData,
        > = RouterDataV2 {
            flow: PhantomData,
            resource_common_data: self.payment_flow_data(
                config,
                order_id,
                Some(&return_url),
                purchase.description.clone(),
            ),
            connector_auth_type: config.auth_type(),
            request: PaymentsAuthorizeData {
                payment_method_data: PaymentMethodData::EncryptedCard(EncryptedCard {
                    number: card.encrypted_number,
                    expiry_month: card.encrypted_expiry_month,
                    expiry_year: card.encrypted_expiry_year,
                    security_code: card.encrypted_security_code,
                    holder_name: card.holder_name,
                }),
                amount,
                currency: purchase.currency,
                router_return_url: Some(return_url),
            },
            response: Err(ErrorResponse::default()),
        };

        let connector_data = ConnectorData::get_connector_by_name(&ConnectorEnum::Adyen);
        let connector_integration: BoxedConnectorIntegrationV2<
            '_,
            Authorize,
            PaymentFlowData,
            PaymentsAuthorizeData,
            PaymentsResponseData,
        > = connector_data.connector.get_connector_integration_v2();

        let response =
            execute_connector_processing_step(self.client, connector_integration, router_data)
                .await
                .map_err(|report| {
                    tracing::warn!(?report, "authorize call failed");
                    map_connector_error(&report, GatewayError::PaymentDeclined)
                })?;

        match response.resource_common_data.status {
            AttemptStatus::Charged => {
                self.orders
                    .mark_paid(order_id)
                    .map_err(|_| GatewayError::OrderStoreFailed)?;
                tracing::info!(%order_id, "payment authorised, order marked paid");
                Ok(CheckoutOutcome {
                    redirect_url: self.pages.success_url.clone(),
                    error: None,
                })
            }
            AttemptStatus::AuthenticationPending => {
                let redirect_url = response
                    .response
                    .as_ref()
                    .ok()
                    .and_then(|data| data.get_redirection_data())
                    .map(|form| form.endpoint().to_string())
                    .ok_or(GatewayError::InvalidGatewayResponse)?;
                tracing::info!(%order_id, "shopper sent to authentication step");
                Ok(CheckoutOutcome {
                    redirect_url,
                    error: None,
                })
            }
            _ => Err(GatewayError::PaymentDeclined),
        }
    }

    async fn process_hosted(
        &self,
        config: &AdyenConfig,
        purchase: PurchaseData,
    ) -> Result<CheckoutOutcome, GatewayError> {
        let order_id = self.create_order(&purchase)?;
        let return_url = self.signed_return_url(order_id)?;
        let amount = minor_amount(purchase.total, purchase.currency)?;

        let router_data: RouterDataV2<
            CreateSessionToken,
            PaymentFlowData,
            SessionTokenRequestData,
            SessionTokenResponseData,
        > = RouterDataV2 {
            flow: PhantomData,
            resource_common_data: self.payment_flow_data(
                config,
                order_id,
                Some(&return_url),
                purchase.description.clone(),
            ),
            connector_auth_type: config.auth_type(),
            request: SessionTokenRequestData {
                amount,
                currency: purchase.currency,
                theme_id: config.theme_id.clone(),
                router_return_url: Some(return_url),
            },
            response: Err(ErrorResponse::default()),
        };

        let connector_data = ConnectorData::get_connector_by_name(&ConnectorEnum::Adyen);
        let connector_integration: BoxedConnectorIntegrationV2<
            '_,
            CreateSessionToken,
            PaymentFlowData,
            SessionTokenRequestData,
            SessionTokenResponseData,
        > = connector_data.connector.get_connector_integration_v2();

        let response =
            execute_connector_processing_step(self.client, connector_integration, router_data)
                .await
                .map_err(|report| {
                    tracing::warn!(?report, "session creation call failed");
                    map_connector_error(&report, GatewayError::SessionCreationFailed)
                })?;

        let session = response
            .response
            .map_err(|_| GatewayError::SessionCreationFailed)?;

        // Persist the session id before handing the browser over, so the
        // confirmation handler has something to match against.
        self.orders
            .set_hosted_session_id(order_id, &session.session_id)
            .map_err(|_| GatewayError::OrderStoreFailed)?;
        tracing::info!(%order_id, "hosted session created");

        Ok(CheckoutOutcome {
            redirect_url: session.session_url,
            error: None,
        })
    }

    fn create_order(&self, purchase: &PurchaseData) -> Result<OrderId, GatewayError> {
        self.orders
            .create_pending_order(&NewOrder {
                total: purchase.total,
                currency: purchase.currency,
                email: purchase.email.clone(),
                description: purchase.description.clone(),
            })
            .map_err(|_| GatewayError::OrderStoreFailed)
    }

    fn signed_return_url(&self, order_id: OrderId) -> Result<String, GatewayError> {
        ReturnUrlSigner::new(&self.settings.signing_secret())
            .build_return_url(&self.pages.confirmation_url, order_id)
    }

    pub(crate) fn payment_flow_data(
        &self,
        config: &AdyenConfig,
        order_id: OrderId,
        return_url: Option<&str>,
        description: Option<String>,
    ) -> PaymentFlowData {
        PaymentFlowData {
            payment_id: order_id.to_string(),
            attempt_id: format!("{order_id}-1"),
            status: AttemptStatus::Pending,
            description,
            return_url: return_url.map(str::to_string),
            connector_request_reference_id: order_id.to_string(),
            test_mode: Some(config.mode == GatewayMode::Test),
            connector_http_status_code: None,
            connector_response_headers: None,
            connectors: config.connectors(),
            raw_connector_response: None,
        }
    }

    pub(crate) fn checkout_redirect_url(&self) -> String {
        format!("{}?payment-mode={}", self.pages.checkout_url, GATEWAY_ID)
    }

    pub(crate) fn success_url(&self) -> &str {
        &self.pages.success_url
    }

    pub(crate) fn settings(&self) -> &dyn SettingsProvider {
        self.settings
    }

    pub(crate) fn orders(&self) -> &dyn OrderStore {
        self.orders
    }

    pub(crate) fn client(&self) -> &dyn ApiClient {
        self.client
    }

    pub(crate) fn failure_outcome(&self, error: &GatewayError) -> CheckoutOutcome {
        CheckoutOutcome {
            redirect_url: self.checkout_redirect_url(),
            error: Some(RecordedError::from(error)),
        }
    }
}

fn minor_amount(total: FloatMajorUnit, currency: Currency) -> Result<MinorUnit, GatewayError> {
    FloatMajorUnitForConnector
        .convert_back(total, currency)
        .map_err(|report| {
            tracing::warn!(?report, "cart total could not be converted to minor units");
            GatewayError::PaymentDeclined
        })
}

pub(crate) fn map_connector_error(
    report: &error_stack::Report<ConnectorError>,
    fallback: GatewayError,
) -> GatewayError {
    match report.current_context() {
        ConnectorError::ProcessingStepFailed(_) => GatewayError::GatewayUnreachable,
        ConnectorError::ResponseDeserializationFailed | ConnectorError::ResponseHandlingFailed => {
            GatewayError::InvalidGatewayResponse
        }
        ConnectorError::MissingConnectorRedirectionUrl => GatewayError::SessionCreationFailed,
        ConnectorError::FailedToObtainAuthType => GatewayError::ConfigurationIncomplete,
        _ => fallback,
    }
}
