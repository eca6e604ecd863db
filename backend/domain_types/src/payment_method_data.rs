use masking::Secret;
use serde::Serialize;

/// Payment method details collected on the storefront checkout page.
///
/// Card fields arrive as opaque blobs produced by the gateway's client-side
/// encryption SDK; the orchestrator never sees or stores raw PANs. The holder
/// name is the only plain-text field.
#[derive(Debug, Clone, Serialize)]
pub enum PaymentMethodData {
    EncryptedCard(EncryptedCard),
}

#[derive(Debug, Clone, Serialize)]
pub struct EncryptedCard {
    pub number: Secret<String>,
    pub expiry_month: Secret<String>,
    pub expiry_year: Secret<String>,
    pub security_code: Secret<String>,
    pub holder_name: Secret<String>,
}
