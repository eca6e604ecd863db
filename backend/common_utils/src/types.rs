//! Amount types shared between the storefront side and the connector side.

use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Sub},
};

use common_enums::Currency;
use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal,
};

use crate::errors::ParsingError;

/// Converts between the core minor-unit amount and whatever denomination a
/// connector expects on the wire.
pub trait AmountConvertor: Send {
    type Output;

    fn convert(
        &self,
        amount: MinorUnit,
        currency: Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>>;

    fn convert_back(
        &self,
        amount: Self::Output,
        currency: Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>>;
}

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct MinorUnitForConnector;

impl AmountConvertor for MinorUnitForConnector {
    type Output = MinorUnit;

    fn convert(
        &self,
        amount: MinorUnit,
        _currency: Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>> {
        Ok(amount)
    }

    fn convert_back(
        &self,
        amount: MinorUnit,
        _currency: Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        Ok(amount)
    }
}

#[derive(Default, Debug, serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq)]
pub struct FloatMajorUnitForConnector;

impl AmountConvertor for FloatMajorUnitForConnector {
    type Output = FloatMajorUnit;

    fn convert(
        &self,
        amount: MinorUnit,
        currency: Currency,
    ) -> Result<Self::Output, error_stack::Report<ParsingError>> {
        amount.to_major_unit_as_f64(currency)
    }

    fn convert_back(
        &self,
        amount: FloatMajorUnit,
        currency: Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        amount.to_minor_unit_as_i64(currency)
    }
}

/// Core amount unit. All amounts move through the gateway as integer minor
/// units (cents for two-decimal currencies).
#[derive(
    Default,
    Debug,
    serde::Deserialize,
    serde::Serialize,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
)]
pub struct MinorUnit(i64);

impl MinorUnit {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }

    /// Convert the amount to its major denomination based on the currency.
    fn to_major_unit_as_f64(
        self,
        currency: Currency,
    ) -> Result<FloatMajorUnit, error_stack::Report<ParsingError>> {
        let amount_decimal =
            Decimal::from_i64(self.0).ok_or(ParsingError::I64ToDecimalConversionFailure)?;

        let amount = if currency.is_zero_decimal_currency() {
            amount_decimal
        } else if currency.is_three_decimal_currency() {
            amount_decimal / Decimal::from(1000)
        } else {
            amount_decimal / Decimal::from(100)
        };
        let amount_f64 = amount
            .to_f64()
            .ok_or(ParsingError::FloatToDecimalConversionFailure)?;
        Ok(FloatMajorUnit::new(amount_f64))
    }
}

impl Display for MinorUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for MinorUnit {
    type Output = Self;
    fn add(self, a2: Self) -> Self {
        Self(self.0 + a2.0)
    }
}

impl Sub for MinorUnit {
    type Output = Self;
    fn sub(self, a2: Self) -> Self {
        Self(self.0 - a2.0)
    }
}

impl Sum for MinorUnit {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self(0), |a, b| a + b)
    }
}

/// Major-denomination amount as a float, the form in which the host
/// storefront reports cart totals.
#[derive(Default, Debug, serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq)]
pub struct FloatMajorUnit(pub f64);

impl FloatMajorUnit {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(0.0)
    }

    fn to_minor_unit_as_i64(
        self,
        currency: Currency,
    ) -> Result<MinorUnit, error_stack::Report<ParsingError>> {
        let amount_decimal =
            Decimal::from_f64(self.0).ok_or(ParsingError::FloatToDecimalConversionFailure)?;

        let amount = if currency.is_zero_decimal_currency() {
            amount_decimal
        } else if currency.is_three_decimal_currency() {
            amount_decimal * Decimal::from(1000)
        } else {
            amount_decimal * Decimal::from(100)
        };

        let amount_i64 = amount
            .to_i64()
            .ok_or(ParsingError::DecimalToI64ConversionFailure)?;
        Ok(MinorUnit::new(amount_i64))
    }
}

#[cfg(test)]
mod amount_conversion_tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    const CONVERTER: FloatMajorUnitForConnector = FloatMajorUnitForConnector;

    #[test]
    fn major_to_minor_two_decimal_currency() {
        let minor = CONVERTER
            .convert_back(FloatMajorUnit::new(19.99), Currency::USD)
            .unwrap();
        assert_eq!(minor, MinorUnit::new(1999));
    }

    #[test]
    fn minor_to_major_round_trip() {
        let major = CONVERTER
            .convert(MinorUnit::new(1999), Currency::USD)
            .unwrap();
        assert_eq!(major, FloatMajorUnit::new(19.99));

        let back = CONVERTER.convert_back(major, Currency::USD).unwrap();
        assert_eq!(back, MinorUnit::new(1999));
    }

    #[test]
    fn zero_decimal_currency_is_not_scaled() {
        let minor = CONVERTER
            .convert_back(FloatMajorUnit::new(1250.0), Currency::JPY)
            .unwrap();
        assert_eq!(minor, MinorUnit::new(1250));
    }

    #[test]
    fn three_decimal_currency_scales_by_thousand() {
        let minor = CONVERTER
            .convert_back(FloatMajorUnit::new(4.575), Currency::KWD)
            .unwrap();
        assert_eq!(minor, MinorUnit::new(4575));
    }
}
