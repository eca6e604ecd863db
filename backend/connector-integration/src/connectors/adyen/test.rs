#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::expect_used)]
#[allow(clippy::panic)]
mod tests {
    use std::marker::PhantomData;

    use common_utils::{request::RequestContent, types::MinorUnit};
    use domain_types::{
        connector_flow::{Authorize, CreateSessionToken, PSync},
        connector_types::{
            ConnectorEnum, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData,
            PaymentsSyncData, ResponseId, SessionTokenRequestData, SessionTokenResponseData,
        },
        payment_method_data::{EncryptedCard, PaymentMethodData},
        router_data::{ConnectorAuthType, ErrorResponse},
        router_data_v2::RouterDataV2,
        types::{ConnectorParams, Connectors},
    };
    use interfaces::connector_integration_v2::{
        BoxedConnectorIntegrationV2, ConnectorIntegrationAnyV2,
    };
    use masking::Secret;

    use crate::types::ConnectorData;

    const BASE_URL: &str = "https://checkout-test.adyen.com/v71/";

    fn payment_flow_data(reference: &str) -> PaymentFlowData {
        PaymentFlowData {
            payment_id: reference.to_string(),
            attempt_id: format!("{reference}_1"),
            status: common_enums::AttemptStatus::Pending,
            description: Some("Digital downloads purchase".to_string()),
            return_url: Some("https://shop.example.com/checkout/confirm".to_string()),
            connector_request_reference_id: reference.to_string(),
            test_mode: Some(true),
            connector_http_status_code: None,
            connector_response_headers: None,
            connectors: Connectors {
                adyen: ConnectorParams {
                    base_url: BASE_URL.to_string(),
                },
            },
            raw_connector_response: None,
        }
    }

    fn auth_type() -> ConnectorAuthType {
        ConnectorAuthType::BodyKey {
            api_key: Secret::new("test_adyen_api_key".to_string()),
            key1: Secret::new("TestMerchantAccount".to_string()),
        }
    }

    fn encrypted_card() -> PaymentMethodData {
        PaymentMethodData::EncryptedCard(EncryptedCard {
            number: Secret::new("adyenjs_0_1_25$encrypted_number".to_string()),
            expiry_month: Secret::new("adyenjs_0_1_25$encrypted_month".to_string()),
            expiry_year: Secret::new("adyenjs_0_1_25$encrypted_year".to_string()),
            security_code: Secret::new("adyenjs_0_1_25$encrypted_cvc".to_string()),
            holder_name: Secret::new("John Doe".to_string()),
        })
    }

    fn json_body(body: &RequestContent) -> serde_json::Value {
        match body {
            RequestContent::Json(payload) => masking::ErasedMaskSerialize::masked_serialize(
                &**payload,
            )
            .expect("failed to serialize request body"),
        }
    }

    mod authorize {
        use super::*;

        fn router_data(
            return_url: Option<String>,
        ) -> RouterDataV2<Authorize, PaymentFlowData, PaymentsAuthorizeData, PaymentsResponseData>
        {
            RouterDataV2 {
                flow: PhantomData::<Authorize>,
                resource_common_data: payment_flow_data("174"),
                connector_auth_type: auth_type(),
                request: PaymentsAuthorizeData {
                    payment_method_data: encrypted_card(),
                    amount: MinorUnit::new(1999),
                    currency: common_enums::Currency::USD,
                    router_return_url: return_url,
                },
                response: Err(ErrorResponse::default()),
            }
        }

        #[test]
        fn builds_payment_request_with_order_reference_and_minor_amount() {
            let req = router_data(Some(
                "https://shop.example.com/checkout/confirm?payment-confirmation=adyen".to_string(),
            ));
            let connector_data = ConnectorData::get_connector_by_name(&ConnectorEnum::Adyen);
            let connector_integration: BoxedConnectorIntegrationV2<
                '_,
                Authorize,
                PaymentFlowData,
                PaymentsAuthorizeData,
                PaymentsResponseData,
            > = connector_data.connector.get_connector_integration_v2();

            let request = connector_integration
                .build_request_v2(&req)
                .expect("request should build")
                .expect("authorize flow always has a request");

            assert_eq!(request.url, format!("{BASE_URL}payments"));
            let body = json_body(request.body.as_ref().unwrap());
            assert_eq!(body["reference"], "174");
            assert_eq!(body["amount"]["value"], 1999);
            assert_eq!(body["amount"]["currency"], "USD");
            assert_eq!(body["paymentMethod"]["type"], "scheme");
            assert!(request
                .headers
                .iter()
                .any(|(name, _)| name == "X-Api-Key"));
        }

        #[test]
        fn missing_return_url_fails_before_any_request_is_sent() {
            let req = router_data(None);
            let connector_data = ConnectorData::get_connector_by_name(&ConnectorEnum::Adyen);
            let connector_integration: BoxedConnectorIntegrationV2<
                '_,
                Authorize,
                PaymentFlowData,
                PaymentsAuthorizeData,
                PaymentsResponseData,
            > = connector_data.connector.get_connector_integration_v2();

            let result = connector_integration.build_request_v2(&req);
            assert!(result.is_err(), "expected error for missing return url");
        }
    }

    mod session {
        use super::*;

        #[test]
        fn builds_hosted_session_request() {
            let req: RouterDataV2<
                CreateSessionToken,
                PaymentFlowData,
                SessionTokenRequestData,
                SessionTokenResponseData,
            > = RouterDataV2 {
                flow: PhantomData::<CreateSessionToken>,
                resource_common_data: payment_flow_data("175"),
                connector_auth_type: auth_type(),
                request: SessionTokenRequestData {
                    amount: MinorUnit::new(4500),
                    currency: common_enums::Currency::EUR,
                    theme_id: Some("theme_12345".to_string()),
                    router_return_url: Some(
                        "https://shop.example.com/checkout/confirm?payment-confirmation=adyen"
                            .to_string(),
                    ),
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

            let request = connector_integration
                .build_request_v2(&req)
                .expect("request should build")
                .expect("session flow always has a request");

            assert_eq!(request.url, format!("{BASE_URL}sessions"));
            let body = json_body(request.body.as_ref().unwrap());
            assert_eq!(body["mode"], "hosted");
            assert_eq!(body["themeId"], "theme_12345");
            assert_eq!(body["reference"], "175");
            assert_eq!(body["amount"]["value"], 4500);
        }
    }

    mod psync {
        use super::*;

        #[test]
        fn session_status_url_carries_session_id_and_result() {
            let req: RouterDataV2<PSync, PaymentFlowData, PaymentsSyncData, PaymentsResponseData> =
                RouterDataV2 {
                    flow: PhantomData::<PSync>,
                    resource_common_data: payment_flow_data("176"),
                    connector_auth_type: auth_type(),
                    request: PaymentsSyncData {
                        connector_transaction_id: ResponseId::ConnectorTransactionId(
                            "CS_abc123".to_string(),
                        ),
                        session_result: Some("Ab02b4c0".to_string()),
                        amount: MinorUnit::new(1999),
                        currency: common_enums::Currency::USD,
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

            let request = connector_integration
                .build_request_v2(&req)
                .expect("request should build")
                .expect("sync flow always has a request");

            assert_eq!(
                request.url,
                format!("{BASE_URL}sessions/CS_abc123?sessionResult=Ab02b4c0")
            );
            assert_eq!(request.method, common_utils::request::Method::Get);
            assert!(request.body.is_none());
        }
    }
}
