//! Per-cycle resolution of the gateway configuration from the host settings
//! store.

use domain_types::{
    router_data::ConnectorAuthType,
    types::{ConnectorParams, Connectors},
};
use masking::Secret;

use crate::{
    errors::GatewayError,
    settings::{setting_keys, SettingsProvider},
};

/// Endpoint used whenever the gateway runs in test mode. Fixed, not
/// operator-configurable.
pub const ADYEN_TEST_ENDPOINT: &str = "https://checkout-test.adyen.com/v71/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum GatewayMode {
    Live,
    #[default]
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ProcessingStyle {
    #[default]
    Hosted,
    Onsite,
}

/// Configuration for one request cycle. Exactly one credential pair is
/// active, chosen by `mode`; missing values degrade to empty strings and
/// surface later as an upstream failure unless [`AdyenConfig::validate`] is
/// called first.
#[derive(Debug, Clone)]
pub struct AdyenConfig {
    pub mode: GatewayMode,
    pub endpoint: String,
    pub api_key: Secret<String>,
    pub merchant_account: Secret<String>,
    pub theme_id: Option<String>,
    pub processing_style: ProcessingStyle,
}

impl AdyenConfig {
    /// Read the mode-matched credential pair and the shared fields out of
    /// the host settings store.
    pub fn resolve(settings: &dyn SettingsProvider) -> Self {
        let mode = settings
            .get(setting_keys::TEST_MODE)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        let (endpoint, api_key) = match mode {
            GatewayMode::Live => (
                normalize_endpoint(&settings.get(setting_keys::LIVE_URL).unwrap_or_default()),
                settings.get(setting_keys::API_LIVE_KEY).unwrap_or_default(),
            ),
            GatewayMode::Test => (
                ADYEN_TEST_ENDPOINT.to_string(),
                settings.get(setting_keys::API_TEST_KEY).unwrap_or_default(),
            ),
        };

        let processing_style = settings
            .get(setting_keys::PAYMENT_MODE)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        Self {
            mode,
            endpoint,
            api_key: Secret::new(html_entity_decode(&api_key)),
            merchant_account: Secret::new(html_entity_decode(
                &settings
                    .get(setting_keys::MERCHANT_ACCOUNT)
                    .unwrap_or_default(),
            )),
            theme_id: settings
                .get(setting_keys::THEME_ID)
                .filter(|value| !value.is_empty()),
            processing_style,
        }
    }

    /// Fail-fast check for callers that prefer a configuration error over a
    /// later upstream HTTP failure.
    pub fn validate(&self) -> Result<(), GatewayError> {
        use masking::PeekInterface;

        if self.endpoint.is_empty()
            || self.api_key.peek().is_empty()
            || self.merchant_account.peek().is_empty()
        {
            return Err(GatewayError::ConfigurationIncomplete);
        }
        if self.processing_style == ProcessingStyle::Hosted && self.theme_id.is_none() {
            return Err(GatewayError::ConfigurationIncomplete);
        }
        Ok(())
    }

    pub fn connectors(&self) -> Connectors {
        Connectors {
            adyen: ConnectorParams::new(self.endpoint.clone()),
        }
    }

    pub fn auth_type(&self) -> ConnectorAuthType {
        ConnectorAuthType::BodyKey {
            api_key: self.api_key.clone(),
            key1: self.merchant_account.clone(),
        }
    }
}

/// Validate the operator-supplied endpoint and give it the trailing slash
/// the path-building code relies on. Anything that does not parse as an
/// http(s) URL degrades to an empty string.
fn normalize_endpoint(raw: &str) -> String {
    let decoded = html_entity_decode(raw.trim());
    match url::Url::parse(&decoded) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            if decoded.ends_with('/') {
                decoded
            } else {
                format!("{decoded}/")
            }
        }
        _ => String::new(),
    }
}

/// Decode the named and numeric HTML entities the host settings store may
/// have applied to stored values.
pub(crate) fn html_entity_decode(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('&') {
        output.push_str(&rest[..start]);
        let candidate = &rest[start..];
        match candidate.find(';') {
            Some(end) => {
                let entity = &candidate[1..end];
                match decode_entity(entity) {
                    Some(decoded) => output.push(decoded),
                    None => output.push_str(&candidate[..=end]),
                }
                rest = &candidate[end + 1..];
            }
            None => {
                output.push_str(candidate);
                rest = "";
            }
        }
    }
    output.push_str(rest);
    output
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X"));
            let code_point = match code {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => entity.strip_prefix('#')?.parse::<u32>().ok()?,
            };
            char::from_u32(code_point)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_decoding_handles_named_and_numeric_forms() {
        assert_eq!(html_entity_decode("a&amp;b"), "a&b");
        assert_eq!(html_entity_decode("&quot;key&quot;"), "\"key\"");
        assert_eq!(html_entity_decode("it&#039;s"), "it's");
        assert_eq!(html_entity_decode("&#x41;BC"), "ABC");
        assert_eq!(html_entity_decode("no entities"), "no entities");
        assert_eq!(html_entity_decode("dangling &amp"), "dangling &amp");
    }

    #[test]
    fn endpoint_normalization_appends_trailing_slash() {
        assert_eq!(
            normalize_endpoint("https://checkout-live.example.com/v71"),
            "https://checkout-live.example.com/v71/"
        );
        assert_eq!(
            normalize_endpoint("https://checkout-live.example.com/v71/"),
            "https://checkout-live.example.com/v71/"
        );
    }

    #[test]
    fn invalid_endpoint_degrades_to_empty() {
        assert_eq!(normalize_endpoint("not a url"), "");
        assert_eq!(normalize_endpoint("ftp://example.com/"), "");
        assert_eq!(normalize_endpoint(""), "");
    }
}
