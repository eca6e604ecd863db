use common_enums::{AttemptStatus, Currency};
use common_utils::{
    consts::{NO_ERROR_CODE, NO_ERROR_MESSAGE},
    types::MinorUnit,
};
use domain_types::{
    connector_flow::{Authorize, CreateSessionToken, PSync},
    connector_types::{
        PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData, PaymentsSyncData,
        ResponseId, SessionTokenRequestData, SessionTokenResponseData,
    },
    errors,
    payment_method_data::PaymentMethodData,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_data_v2::RouterDataV2,
    router_response_types::RedirectForm,
};
use masking::Secret;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::ResponseRouterData;

type Error = error_stack::Report<errors::ConnectorError>;

pub trait ForeignTryFrom<F>: Sized {
    type Error;

    fn foreign_try_from(from: F) -> Result<Self, Self::Error>;
}

/// Router data paired with the amount already converted to the denomination
/// the connector expects.
pub struct AdyenRouterData<T> {
    pub amount: MinorUnit,
    pub router_data: T,
}

impl<T> TryFrom<(MinorUnit, T)> for AdyenRouterData<T> {
    type Error = Error;

    fn try_from((amount, router_data): (MinorUnit, T)) -> Result<Self, Self::Error> {
        Ok(Self {
            amount,
            router_data,
        })
    }
}

pub struct AdyenAuthType {
    pub(super) api_key: Secret<String>,
    pub(super) merchant_account: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for AdyenAuthType {
    type Error = errors::ConnectorError;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                api_key: api_key.to_owned(),
                merchant_account: key1.to_owned(),
            }),
            _ => Err(errors::ConnectorError::FailedToObtainAuthType),
        }
    }
}

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct Amount {
    pub currency: Currency,
    pub value: MinorUnit,
}

/// Card fields as produced by the gateway's client-side encryption SDK. The
/// holder name is the only field that travels in the clear.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenCard {
    encrypted_card_number: Secret<String>,
    encrypted_expiry_month: Secret<String>,
    encrypted_expiry_year: Secret<String>,
    encrypted_security_code: Secret<String>,
    holder_name: Option<Secret<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AdyenPaymentMethod {
    #[serde(rename = "scheme")]
    AdyenCard(Box<AdyenCard>),
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenPaymentRequest {
    amount: Amount,
    merchant_account: Secret<String>,
    payment_method: AdyenPaymentMethod,
    reference: String,
    return_url: String,
}

impl
    TryFrom<
        &AdyenRouterData<
            &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    > for AdyenPaymentRequest
{
    type Error = Error;

    fn try_from(
        item: &AdyenRouterData<
            &RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>,
        >,
    ) -> Result<Self, Self::Error> {
        let auth_type = AdyenAuthType::try_from(&item.router_data.connector_auth_type)?;
        let return_url = item.router_data.request.get_router_return_url().map_err(|_| {
            errors::ConnectorError::MissingRequiredField {
                field_name: "router_return_url",
            }
        })?;
        let payment_method = match &item.router_data.request.payment_method_data {
            PaymentMethodData::EncryptedCard(card) => {
                AdyenPaymentMethod::AdyenCard(Box::new(AdyenCard {
                    encrypted_card_number: card.number.clone(),
                    encrypted_expiry_month: card.expiry_month.clone(),
                    encrypted_expiry_year: card.expiry_year.clone(),
                    encrypted_security_code: card.security_code.clone(),
                    holder_name: Some(card.holder_name.clone()),
                }))
            }
        };

        Ok(Self {
            amount: Amount {
                currency: item.router_data.request.currency,
                value: item.amount,
            },
            merchant_account: auth_type.merchant_account,
            payment_method,
            reference: item
                .router_data
                .resource_common_data
                .connector_request_reference_id
                .clone(),
            return_url,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdyenSessionMode {
    Hosted,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenSessionRequest {
    merchant_account: Secret<String>,
    amount: Amount,
    mode: AdyenSessionMode,
    theme_id: Option<String>,
    reference: String,
    return_url: String,
}

impl
    TryFrom<
        &AdyenRouterData<
            &RouterDataV2<
                CreateSessionToken,
                PaymentFlowData,
                SessionTokenRequestData,
                SessionTokenResponseData,
            >,
        >,
    > for AdyenSessionRequest
{
    type Error = Error;

    fn try_from(
        item: &AdyenRouterData<
            &RouterDataV2<
                CreateSessionToken,
                PaymentFlowData,
                SessionTokenRequestData,
                SessionTokenResponseData,
            >,
        >,
    ) -> Result<Self, Self::Error> {
        let auth_type = AdyenAuthType::try_from(&item.router_data.connector_auth_type)?;
        let return_url = item
            .router_data
            .request
            .router_return_url
            .clone()
            .ok_or(errors::ConnectorError::MissingRequiredField {
                field_name: "router_return_url",
            })?;

        Ok(Self {
            merchant_account: auth_type.merchant_account,
            amount: Amount {
                currency: item.router_data.request.currency,
                value: item.amount,
            },
            mode: AdyenSessionMode::Hosted,
            theme_id: item.router_data.request.theme_id.clone(),
            reference: item
                .router_data
                .resource_common_data
                .connector_request_reference_id
                .clone(),
            return_url,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AdyenStatus {
    AuthenticationFinished,
    AuthenticationNotRequired,
    Authorised,
    Cancelled,
    ChallengeShopper,
    Error,
    Pending,
    Received,
    RedirectShopper,
    Refused,
    PresentToShopper,
    /// Result codes this integration does not drive are treated as a
    /// declined attempt rather than a parse failure.
    #[serde(other)]
    Unrecognised,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenRedirectAction {
    pub url: Option<Url>,
    pub method: Option<String>,
    #[serde(rename = "type")]
    pub type_of_response: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenPaymentResponse {
    pub result_code: Option<AdyenStatus>,
    pub action: Option<AdyenRedirectAction>,
    pub psp_reference: Option<String>,
    pub merchant_reference: Option<String>,
    pub refusal_reason: Option<String>,
    pub refusal_reason_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenSessionResponse {
    pub id: String,
    pub url: Option<String>,
    pub session_data: Option<Secret<String>>,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdyenSessionStatus {
    Active,
    Completed,
    Expired,
    PaymentPending,
    Canceled,
    Refused,
    #[serde(other)]
    Unrecognised,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenSessionStatusResponse {
    pub id: Option<String>,
    pub status: Option<AdyenSessionStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdyenErrorResponse {
    pub status: i32,
    pub error_code: String,
    pub message: String,
    pub error_type: Option<String>,
    pub psp_reference: Option<String>,
}

fn get_adyen_payment_status(adyen_status: Option<&AdyenStatus>) -> AttemptStatus {
    match adyen_status {
        Some(AdyenStatus::Authorised) => AttemptStatus::Charged,
        Some(AdyenStatus::AuthenticationFinished) => AttemptStatus::AuthenticationSuccessful,
        Some(
            AdyenStatus::ChallengeShopper
            | AdyenStatus::RedirectShopper
            | AdyenStatus::PresentToShopper,
        ) => AttemptStatus::AuthenticationPending,
        Some(
            AdyenStatus::AuthenticationNotRequired | AdyenStatus::Pending | AdyenStatus::Received,
        ) => AttemptStatus::Pending,
        Some(AdyenStatus::Cancelled) => AttemptStatus::Voided,
        Some(AdyenStatus::Error | AdyenStatus::Refused | AdyenStatus::Unrecognised) | None => {
            AttemptStatus::Failure
        }
    }
}

fn get_session_attempt_status(status: Option<&AdyenSessionStatus>) -> AttemptStatus {
    match status {
        Some(AdyenSessionStatus::Completed) => AttemptStatus::Charged,
        Some(
            AdyenSessionStatus::Expired
            | AdyenSessionStatus::Canceled
            | AdyenSessionStatus::Refused,
        ) => AttemptStatus::Failure,
        Some(
            AdyenSessionStatus::Active
            | AdyenSessionStatus::PaymentPending
            | AdyenSessionStatus::Unrecognised,
        )
        | None => AttemptStatus::Pending,
    }
}

// Shared by the authorize and sync flows.
impl<F, Req> ForeignTryFrom<ResponseRouterData<AdyenPaymentResponse, Self>>
    for RouterDataV2<F, PaymentFlowData, Req, PaymentsResponseData>
where
    F: Clone,
    Req: Clone,
{
    type Error = Error;

    fn foreign_try_from(
        value: ResponseRouterData<AdyenPaymentResponse, Self>,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            mut router_data,
            http_code,
        } = value;

        let redirection_data = response
            .action
            .as_ref()
            .and_then(|action| action.url.as_ref())
            .map(|url| RedirectForm::Uri {
                uri: url.to_string(),
            });

        let mut status = get_adyen_payment_status(response.result_code.as_ref());
        // A further-action result without a URL to send the shopper to is a
        // dead end; treat it as a declined attempt.
        if matches!(status, AttemptStatus::AuthenticationPending) && redirection_data.is_none() {
            status = AttemptStatus::Failure;
        }

        let resource_id = match response.psp_reference.clone() {
            Some(reference) => ResponseId::ConnectorTransactionId(reference),
            None => ResponseId::NoResponseId,
        };

        router_data.resource_common_data.status = status;
        router_data.resource_common_data.connector_http_status_code = Some(http_code);
        router_data.response = if let AttemptStatus::Failure = status {
            Err(ErrorResponse {
                status_code: http_code,
                code: response
                    .refusal_reason_code
                    .unwrap_or_else(|| NO_ERROR_CODE.to_string()),
                message: response
                    .refusal_reason
                    .clone()
                    .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
                reason: response.refusal_reason,
                attempt_status: Some(AttemptStatus::Failure),
                connector_transaction_id: response.psp_reference,
            })
        } else {
            Ok(PaymentsResponseData::TransactionResponse {
                resource_id,
                redirection_data: redirection_data.map(Box::new),
                connector_response_reference_id: response.merchant_reference,
                status_code: http_code,
            })
        };
        Ok(router_data)
    }
}

impl ForeignTryFrom<ResponseRouterData<AdyenSessionResponse, Self>>
    for RouterDataV2<
        CreateSessionToken,
        PaymentFlowData,
        SessionTokenRequestData,
        SessionTokenResponseData,
    >
{
    type Error = Error;

    fn foreign_try_from(
        value: ResponseRouterData<AdyenSessionResponse, Self>,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            mut router_data,
            http_code,
        } = value;

        let session_url = response
            .url
            .ok_or(errors::ConnectorError::MissingConnectorRedirectionUrl)?;

        router_data.resource_common_data.status = AttemptStatus::AuthenticationPending;
        router_data.resource_common_data.connector_http_status_code = Some(http_code);
        router_data.response = Ok(SessionTokenResponseData {
            session_id: response.id,
            session_url,
        });
        Ok(router_data)
    }
}

impl ForeignTryFrom<ResponseRouterData<AdyenSessionStatusResponse, Self>>
    for RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
{
    type Error = Error;

    fn foreign_try_from(
        value: ResponseRouterData<AdyenSessionStatusResponse, Self>,
    ) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            mut router_data,
            http_code,
        } = value;

        let resource_id = match response.id.clone() {
            Some(id) => ResponseId::ConnectorTransactionId(id),
            None => ResponseId::NoResponseId,
        };

        router_data.resource_common_data.status =
            get_session_attempt_status(response.status.as_ref());
        router_data.resource_common_data.connector_http_status_code = Some(http_code);
        router_data.response = Ok(PaymentsResponseData::TransactionResponse {
            resource_id,
            redirection_data: None,
            connector_response_reference_id: response.id,
            status_code: http_code,
        });
        Ok(router_data)
    }
}
