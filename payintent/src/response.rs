//! Classification of the payment app's activity result.
//!
//! A single stateless function turns the raw result code plus the optional
//! response intent into either a parsed [`PaymentResponse`] or a
//! [`ResponseError`]. The rules are evaluated in strict precedence order;
//! the first matching rule wins.

use serde::{Deserialize, Serialize};

use crate::error::ResponseError;
use crate::extras::Extras;
use crate::json::EMPTY_JSON_DATA;

/// Raw activity result code for a successful payment (Android `RESULT_OK`).
pub const RESULT_OK: i32 = -1;

/// Raw activity result code for a canceled payment
/// (Android `RESULT_CANCELED`).
pub const RESULT_CANCELED: i32 = 0;

/// Current key for the instrument details in the response extras.
pub const EXTRA_RESPONSE_DETAILS: &str = "details";

/// Deprecated key for the instrument details in the response extras.
pub const EXTRA_DEPRECATED_RESPONSE_INSTRUMENT_DETAILS: &str = "instrumentDetails";

/// Key for the method name in the response extras.
pub const EXTRA_RESPONSE_METHOD_NAME: &str = "methodName";

/// Result status delivered by the transport layer with the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    /// The payment app reported success.
    Ok,
    /// The payment app reported cancellation.
    Canceled,
    /// Any other result code, carried raw.
    Other(i32),
}

impl ResultCode {
    /// Maps a raw Android activity result code to a status.
    #[must_use]
    pub const fn from_raw(code: i32) -> Self {
        match code {
            RESULT_OK => Self::Ok,
            RESULT_CANCELED => Self::Canceled,
            code => Self::Other(code),
        }
    }

    /// Returns the raw activity result code.
    #[must_use]
    pub const fn raw(self) -> i32 {
        match self {
            Self::Ok => RESULT_OK,
            Self::Canceled => RESULT_CANCELED,
            Self::Other(code) => code,
        }
    }
}

/// The response intent handed back by the payment app activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseIntent {
    /// The response extras, if the payment app attached any.
    pub extras: Option<Extras>,
}

impl ResponseIntent {
    /// Creates a response intent carrying the given extras.
    #[must_use]
    pub const fn with_extras(extras: Extras) -> Self {
        Self {
            extras: Some(extras),
        }
    }
}

/// A successfully parsed payment app response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// The payment method the app used. Empty if the app did not report one.
    pub method_name: String,
    /// Opaque JSON text with the instrument details. `"{}"` if the app did
    /// not report any.
    pub details: String,
}

/// Classifies a payment app response.
///
/// Precedence: no intent at all, then no extras, then a canceled status,
/// then any unrecognized status, and only then success. On success the
/// details are read from the current key, falling back to the deprecated
/// `instrumentDetails` key, falling back to `"{}"`; the method name
/// defaults to the empty string.
///
/// # Errors
///
/// Returns the first matching [`ResponseError`] per the precedence above.
pub fn parse_payment_response(
    result: ResultCode,
    data: Option<&ResponseIntent>,
) -> Result<PaymentResponse, ResponseError> {
    let Some(data) = data else {
        return Err(ResponseError::MissingData);
    };
    let Some(extras) = data.extras.as_ref() else {
        return Err(ResponseError::MissingExtras);
    };
    match result {
        ResultCode::Canceled => Err(ResponseError::Canceled),
        ResultCode::Other(code) => Err(ResponseError::UnrecognizedResult(code)),
        ResultCode::Ok => {
            let details = extras
                .get_str(EXTRA_RESPONSE_DETAILS)
                .or_else(|| extras.get_str(EXTRA_DEPRECATED_RESPONSE_INSTRUMENT_DETAILS))
                .unwrap_or(EMPTY_JSON_DATA)
                .to_owned();
            let method_name = extras
                .get_str(EXTRA_RESPONSE_METHOD_NAME)
                .unwrap_or_default()
                .to_owned();
            Ok(PaymentResponse {
                method_name,
                details,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_code_from_raw() {
        assert_eq!(ResultCode::from_raw(-1), ResultCode::Ok);
        assert_eq!(ResultCode::from_raw(0), ResultCode::Canceled);
        assert_eq!(ResultCode::from_raw(2), ResultCode::Other(2));
        assert_eq!(ResultCode::Other(2).raw(), 2);
    }

    #[test]
    fn test_missing_data_outranks_canceled() {
        let result = parse_payment_response(ResultCode::Canceled, None);
        assert_eq!(result, Err(ResponseError::MissingData));
    }

    #[test]
    fn test_missing_extras() {
        let intent = ResponseIntent::default();
        let result = parse_payment_response(ResultCode::Ok, Some(&intent));
        assert_eq!(result, Err(ResponseError::MissingExtras));
    }

    #[test]
    fn test_canceled() {
        let intent = ResponseIntent::with_extras(Extras::new());
        let result = parse_payment_response(ResultCode::Canceled, Some(&intent));
        assert_eq!(result, Err(ResponseError::Canceled));
    }

    #[test]
    fn test_unrecognized_result_carries_code() {
        let intent = ResponseIntent::with_extras(Extras::new());
        let result = parse_payment_response(ResultCode::Other(5), Some(&intent));
        assert_eq!(result, Err(ResponseError::UnrecognizedResult(5)));
    }

    #[test]
    fn test_success_with_method_name_and_details() {
        let mut extras = Extras::new();
        extras.put_string(EXTRA_RESPONSE_METHOD_NAME, "m");
        extras.put_string(EXTRA_RESPONSE_DETAILS, r#"{"k":1}"#);
        let intent = ResponseIntent::with_extras(extras);
        let response = parse_payment_response(ResultCode::Ok, Some(&intent)).unwrap();
        assert_eq!(response.method_name, "m");
        assert_eq!(response.details, r#"{"k":1}"#);
    }

    #[test]
    fn test_success_with_empty_extras_defaults_both_fields() {
        let intent = ResponseIntent::with_extras(Extras::new());
        let response = parse_payment_response(ResultCode::Ok, Some(&intent)).unwrap();
        assert_eq!(response.method_name, "");
        assert_eq!(response.details, "{}");
    }

    #[test]
    fn test_success_falls_back_to_instrument_details() {
        let mut extras = Extras::new();
        extras.put_string(EXTRA_DEPRECATED_RESPONSE_INSTRUMENT_DETAILS, r#"{"old":true}"#);
        let intent = ResponseIntent::with_extras(extras);
        let response = parse_payment_response(ResultCode::Ok, Some(&intent)).unwrap();
        assert_eq!(response.details, r#"{"old":true}"#);
    }

    #[test]
    fn test_success_prefers_current_details_key() {
        let mut extras = Extras::new();
        extras.put_string(EXTRA_RESPONSE_DETAILS, r#"{"new":true}"#);
        extras.put_string(EXTRA_DEPRECATED_RESPONSE_INSTRUMENT_DETAILS, r#"{"old":true}"#);
        let intent = ResponseIntent::with_extras(extras);
        let response = parse_payment_response(ResultCode::Ok, Some(&intent)).unwrap();
        assert_eq!(response.details, r#"{"new":true}"#);
    }
}
