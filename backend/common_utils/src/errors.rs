/// Result type shorthand carrying an `error_stack` report.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    #[error("Failed to parse {0}")]
    StructParseFailure(&'static str),
    #[error("Failed to convert i64 value to decimal")]
    I64ToDecimalConversionFailure,
    #[error("Failed to convert decimal value to i64")]
    DecimalToI64ConversionFailure,
    #[error("Failed to convert float value to decimal")]
    FloatToDecimalConversionFailure,
    #[error("Failed to convert string value to decimal: {error}")]
    StringToDecimalConversionFailure { error: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Incorrect value provided for field: {field_name}")]
    IncorrectValueProvided { field_name: &'static str },
}
