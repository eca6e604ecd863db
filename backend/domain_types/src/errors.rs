/// Errors raised while building requests for, or interpreting replies from,
/// the payment connector.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ConnectorError {
    #[error("Error while obtaining URL for the integration")]
    FailedToObtainIntegrationUrl,
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Failed to handle connector response")]
    ResponseHandlingFailed,
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Missing connector transaction ID")]
    MissingConnectorTransactionID,
    #[error("Missing redirection URL in connector response")]
    MissingConnectorRedirectionUrl,
    #[error("Failed at connector's API call step")]
    ProcessingStepFailed(Option<String>),
    #[error("{message} is not supported by {connector}")]
    NotSupported {
        message: String,
        connector: &'static str,
    },
    #[error("{0} is not implemented")]
    NotImplemented(String),
}

/// Transport-level failures while talking to the connector.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ApiClientError {
    #[error("URL encoding of request failed")]
    UrlEncodingFailed,
    #[error("Failed to construct the HTTP client")]
    ClientConstructionFailed,
    #[error("Failed to construct header map")]
    HeaderMapConstructionFailed,
    #[error("Connection closed before a message could complete")]
    RequestTimeoutReceived,
    #[error("Unable to send request to connector: {0}")]
    RequestNotSent(String),
    #[error("Failed to decode the response body")]
    ResponseDecodingFailed,
    #[error("Server responded with an unexpected status")]
    UnexpectedServerResponse,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
}

impl ApiClientError {
    pub fn is_upstream_timeout(&self) -> bool {
        matches!(self, Self::RequestTimeoutReceived)
    }
}
