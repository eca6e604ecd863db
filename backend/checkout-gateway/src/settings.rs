//! Settings fields and the gateway registry entry the host renders. The
//! host owns storage and the admin screen; this module only describes what
//! to register.

use masking::Secret;

use crate::config::ProcessingStyle;

/// Gateway id registered with the host's gateway registry.
pub const GATEWAY_ID: &str = "adyen";

pub mod setting_keys {
    pub const TEST_MODE: &str = "adyen_test_mode";
    pub const API_LIVE_KEY: &str = "adyen_api_live_key";
    pub const LIVE_URL: &str = "adyen_live_url";
    pub const API_TEST_KEY: &str = "adyen_api_test_key";
    pub const MERCHANT_ACCOUNT: &str = "adyen_merchant_account";
    pub const THEME_ID: &str = "adyen_theme_id";
    pub const PAYMENT_MODE: &str = "adyen_payment_mode";
}

/// Read access to the host's settings store. Values are read fresh at the
/// start of every checkout or confirmation cycle; nothing is cached here.
pub trait SettingsProvider: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Host-held secret used to sign return-URL tokens.
    fn signing_secret(&self) -> Secret<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingFieldKind {
    Text,
    Password,
    Select {
        options: &'static [(&'static str, &'static str)],
    },
}

/// One admin-screen field, as plain data the host renders.
#[derive(Debug, Clone)]
pub struct SettingDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: SettingFieldKind,
}

/// The fields the host registers on its gateway settings screen. The test
/// endpoint is a fixed constant and deliberately not a field.
pub fn settings_descriptors() -> Vec<SettingDescriptor> {
    vec![
        SettingDescriptor {
            id: setting_keys::TEST_MODE,
            name: "Mode",
            description: "Whether payments are sent to the live or the test environment.",
            kind: SettingFieldKind::Select {
                options: &[("live", "Live"), ("test", "Test")],
            },
        },
        SettingDescriptor {
            id: setting_keys::API_LIVE_KEY,
            name: "Live API Key",
            description: "API key for the live Adyen environment.",
            kind: SettingFieldKind::Password,
        },
        SettingDescriptor {
            id: setting_keys::LIVE_URL,
            name: "Live API URL",
            description: "Endpoint URL of your live Adyen environment, including the API version.",
            kind: SettingFieldKind::Text,
        },
        SettingDescriptor {
            id: setting_keys::API_TEST_KEY,
            name: "Test API Key",
            description: "API key for the test Adyen environment.",
            kind: SettingFieldKind::Password,
        },
        SettingDescriptor {
            id: setting_keys::MERCHANT_ACCOUNT,
            name: "Merchant Account",
            description: "The Adyen merchant account payments are booked against.",
            kind: SettingFieldKind::Text,
        },
        SettingDescriptor {
            id: setting_keys::THEME_ID,
            name: "Theme ID",
            description: "Theme applied to the hosted checkout page (hosted mode only).",
            kind: SettingFieldKind::Text,
        },
        SettingDescriptor {
            id: setting_keys::PAYMENT_MODE,
            name: "Payment Mode",
            description: "Collect card details on the checkout page, or redirect to a page hosted by Adyen.",
            kind: SettingFieldKind::Select {
                options: &[("hosted", "Hosted"), ("onsite", "Onsite")],
            },
        },
    ]
}

/// Entry for the host's gateway registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRegistration {
    pub id: &'static str,
    pub admin_label: &'static str,
    pub checkout_label: &'static str,
    /// Query fragment of the admin settings screen this gateway's section
    /// lives under, for the registry's settings link.
    pub settings_url_fragment: &'static str,
}

pub fn gateway_registration(processing_style: ProcessingStyle) -> GatewayRegistration {
    GatewayRegistration {
        id: GATEWAY_ID,
        admin_label: "Adyen",
        checkout_label: match processing_style {
            ProcessingStyle::Hosted => "Pay with Adyen",
            ProcessingStyle::Onsite => "Credit Card (Adyen)",
        },
        settings_url_fragment: "tab=gateways&section=adyen",
    }
}
