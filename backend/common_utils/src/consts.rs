/// Timeout for payment and hosted-session creation calls, in seconds.
pub const PAYMENT_REQUEST_TIMEOUT_SECS: u64 = 45;

/// Timeout for session status polling during confirmation, in seconds.
pub const SESSION_STATUS_TIMEOUT_SECS: u64 = 20;

/// Placeholder error code when the gateway reply carries none.
pub const NO_ERROR_CODE: &str = "No error code";

/// Placeholder error message when the gateway reply carries none.
pub const NO_ERROR_MESSAGE: &str = "No error message";
