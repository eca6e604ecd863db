use serde::{Deserialize, Serialize};

/// The status of a single payment attempt, as tracked by the gateway while a
/// checkout submission or confirmation cycle is in flight.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttemptStatus {
    /// Further shopper authentication is required before the attempt can
    /// complete (3-D Secure redirect, hosted page, ...).
    AuthenticationPending,
    AuthenticationSuccessful,
    /// The attempt has been authorised and captured.
    Charged,
    Failure,
    #[default]
    Pending,
    Voided,
}

impl AttemptStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Charged | Self::Failure | Self::Voided)
    }
}

/// ISO 4217 currency codes accepted by the gateway.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Currency {
    AED,
    AUD,
    BHD,
    BRL,
    CAD,
    CHF,
    CLP,
    CNY,
    CZK,
    DKK,
    EUR,
    GBP,
    HKD,
    HUF,
    IDR,
    ILS,
    INR,
    JOD,
    JPY,
    KRW,
    KWD,
    MXN,
    MYR,
    NOK,
    NZD,
    OMR,
    PHP,
    PLN,
    SAR,
    SEK,
    SGD,
    THB,
    TND,
    TRY,
    #[default]
    USD,
    VND,
    ZAR,
}

impl Currency {
    /// Currencies whose minor unit equals the major unit.
    pub fn is_zero_decimal_currency(self) -> bool {
        matches!(self, Self::CLP | Self::JPY | Self::KRW | Self::VND)
    }

    /// Currencies with a thousandth minor unit.
    pub fn is_three_decimal_currency(self) -> bool {
        matches!(
            self,
            Self::BHD | Self::JOD | Self::KWD | Self::OMR | Self::TND
        )
    }

    pub fn number_of_digits_after_decimal_point(self) -> u8 {
        if self.is_zero_decimal_currency() {
            0
        } else if self.is_three_decimal_currency() {
            3
        } else {
            2
        }
    }
}
