use domain_types::{
    connector_flow::{Authorize, CreateSessionToken, PSync},
    connector_types::{
        PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData, PaymentsSyncData,
        SessionTokenRequestData, SessionTokenResponseData,
    },
};

use crate::{api::ConnectorCommon, connector_integration_v2::ConnectorIntegrationV2};

/// The full set of flows a connector must support to serve checkout.
pub trait ConnectorServiceTrait:
    ConnectorCommon + PaymentAuthorizeV2 + PaymentSessionToken + PaymentSyncV2
{
}

pub trait PaymentAuthorizeV2:
    ConnectorIntegrationV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
{
}

pub trait PaymentSessionToken:
    ConnectorIntegrationV2<
    CreateSessionToken,
    PaymentFlowData,
    SessionTokenRequestData,
    SessionTokenResponseData,
>
{
}

pub trait PaymentSyncV2:
    ConnectorIntegrationV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData>
{
}

pub type BoxedConnector = Box<&'static (dyn ConnectorServiceTrait + Sync)>;
