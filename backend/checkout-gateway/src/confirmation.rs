//! Return-navigation handling. Runs only on the storefront's dedicated
//! confirmation route; no-ops unless the gateway's signal parameters are
//! present, and refuses anything that does not match the session recorded at
//! checkout time.

use std::marker::PhantomData;

use common_enums::AttemptStatus;
use common_utils::types::MinorUnit;
use connector_integration::types::ConnectorData;
use domain_types::{
    connector_flow::PSync,
    connector_types::{
        ConnectorEnum, PaymentFlowData, PaymentsResponseData, PaymentsSyncData, ResponseId,
    },
    router_data::ErrorResponse,
    router_data_v2::RouterDataV2,
};
use interfaces::connector_integration_v2::{
    BoxedConnectorIntegrationV2, ConnectorIntegrationAnyV2,
};

use crate::{
    checkout::{map_connector_error, PaymentOrchestrator},
    config::AdyenConfig,
    errors::{GatewayError, RecordedError},
    order::{OrderId, OrderStatus},
    settings::GATEWAY_ID,
    signing::{query_keys, ReturnUrlSigner},
};

/// Query parameters consumed on return navigation.
#[derive(Debug, Clone, Default)]
pub struct ReturnQuery {
    pub confirmation_marker: Option<String>,
    pub payment_id: Option<String>,
    pub session_id: Option<String>,
    pub session_result: Option<String>,
    pub token: Option<String>,
}

impl ReturnQuery {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key {
                query_keys::CONFIRMATION_MARKER => {
                    query.confirmation_marker = Some(value.to_string())
                }
                query_keys::PAYMENT_ID => query.payment_id = Some(value.to_string()),
                "sessionId" => query.session_id = Some(value.to_string()),
                "sessionResult" => query.session_result = Some(value.to_string()),
                query_keys::TOKEN => query.token = Some(value.to_string()),
                _ => {}
            }
        }
        query
    }

    /// Whether this navigation is addressed to the gateway at all.
    fn has_confirmation_signal(&self) -> bool {
        self.payment_id.is_some() || self.session_id.is_some() || self.session_result.is_some()
    }
}

/// What the host should do after a return navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// The navigation was not addressed to this gateway; render the page as
    /// usual.
    NotApplicable,
    /// The order is paid; send the shopper to the success page.
    Completed { redirect_url: String },
    /// The attempt could not be confirmed; the order is unchanged.
    Failed {
        redirect_url: String,
        error: RecordedError,
    },
}

impl PaymentOrchestrator<'_> {
    /// Entry point for the host's confirmation route.
    #[tracing::instrument(skip_all)]
    pub async fn handle_return_navigation(&self, query: &ReturnQuery) -> ConfirmationOutcome {
        if !query.has_confirmation_signal() {
            return ConfirmationOutcome::NotApplicable;
        }

        match self.try_confirm(query).await {
            Ok(redirect_url) => ConfirmationOutcome::Completed { redirect_url },
            Err(error) => {
                tracing::warn!(?error, "confirmation failed");
                ConfirmationOutcome::Failed {
                    redirect_url: self.checkout_redirect_url(),
                    error: RecordedError::from(&error),
                }
            }
        }
    }

    async fn try_confirm(&self, query: &ReturnQuery) -> Result<String, GatewayError> {
        // Proceed only when the navigation names an order we issued a
        // return URL for and its session id matches the one stored at
        // checkout time; anything else aborts with no state change.
        let order_id: OrderId = query
            .payment_id
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .ok_or(GatewayError::SessionMismatch)?;

        if query
            .confirmation_marker
            .as_deref()
            .is_some_and(|marker| marker != GATEWAY_ID)
        {
            return Err(GatewayError::SessionMismatch);
        }

        let signer = ReturnUrlSigner::new(&self.settings().signing_secret());
        let token_valid = query
            .token
            .as_deref()
            .is_some_and(|token| signer.verify(order_id, token));
        if !token_valid {
            return Err(GatewayError::SessionMismatch);
        }

        let session_id = query
            .session_id
            .as_deref()
            .ok_or(GatewayError::SessionMismatch)?;
        let stored_session_id = self
            .orders()
            .hosted_session_id(order_id)
            .map_err(|_| GatewayError::OrderStoreFailed)?;
        if stored_session_id.as_deref() != Some(session_id) {
            return Err(GatewayError::SessionMismatch);
        }

        // Replays of an already-finalized confirmation succeed without
        // another gateway call; Paid is terminal.
        let status = self
            .orders()
            .status(order_id)
            .map_err(|_| GatewayError::OrderStoreFailed)?;
        if status == OrderStatus::Paid {
            return Ok(self.success_url().to_string());
        }

        let config = AdyenConfig::resolve(self.settings());
        let router_data: RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData> =
            RouterDataV2 {
                flow: PhantomData,
                resource_common_data: self.payment_flow_data(&config, order_id, None, None),
                connector_auth_type: config.auth_type(),
                request: PaymentsSyncData {
                    connector_transaction_id: ResponseId::ConnectorTransactionId(
                        session_id.to_string(),
                    ),
                    session_result: query.session_result.clone(),
                    amount: MinorUnit::zero(),
                    currency: Default::default(),
                },
                response: Err(ErrorResponse::default()),
            };

        let connector_data = ConnectorData::get_connector_by_name(&ConnectorEnum::Adyen);
        let connector_integration: BoxedConnectorIntegrationV2<
            '_,
            PSync,
            PaymentFlowData,
            PaymentsSyncData,
            PaymentsResponseData,
        > = connector_data.connector.get_connector_integration_v2();

        let response =
            execute_sync(self.client(), connector_integration, router_data).await?;

        match response.resource_common_data.status {
            AttemptStatus::Charged => {
                self.orders()
                    .mark_paid(order_id)
                    .map_err(|_| GatewayError::OrderStoreFailed)?;
                tracing::info!(%order_id, "hosted session completed, order marked paid");
                Ok(self.success_url().to_string())
            }
            _ => Err(GatewayError::PaymentDeclined),
        }
    }
}

async fn execute_sync(
    client: &dyn external_services::service::ApiClient,
    connector_integration: BoxedConnectorIntegrationV2<
        '_,
        PSync,
        PaymentFlowData,
        PaymentsSyncData,
        PaymentsResponseData,
    >,
    router_data: RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
) -> Result<
    RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>,
    GatewayError,
> {
    external_services::service::execute_connector_processing_step(
        client,
        connector_integration,
        router_data,
    )
    .await
    .map_err(|report| {
        tracing::warn!(?report, "session status call failed");
        map_connector_error(&report, GatewayError::PaymentDeclined)
    })
}
