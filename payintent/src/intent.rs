//! Fail-fast builders for the outbound payment app intents.
//!
//! Each entry point gets its own input struct so the differing
//! required/optional policies are explicit in the types instead of being
//! implied by nullable fields. All validation completes before any extras
//! are written: a failed build never produces a partial message.

use serde::{Deserialize, Serialize};

use crate::encoding::Base64Bytes;
use crate::error::InvalidFieldError;
use crate::extras::{self, Extras, RequestExtras};
use crate::types::{MethodDataMap, ModifierMap, PaymentItem};

/// Action name for the pay intent.
pub const ACTION_PAY: &str = "org.chromium.intent.action.PAY";

/// Action name for the is-ready-to-pay service intent.
pub const ACTION_IS_READY_TO_PAY: &str = "org.chromium.intent.action.IS_READY_TO_PAY";

/// Identity of the payment app component to invoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentName {
    /// Package name of the payment app.
    pub package: String,
    /// Name of the activity or service inside the package.
    pub class_name: String,
}

impl ComponentName {
    /// Creates a new component identity.
    #[must_use]
    pub fn new(package: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class_name: class_name.into(),
        }
    }
}

/// An outbound intent message, ready for the transport layer to deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    /// The intent action identifier.
    pub action: &'static str,
    /// The payment app component to invoke.
    pub component: ComponentName,
    /// The request payload under both the current and deprecated schemes.
    pub extras: Extras,
}

/// Input for [`build_is_ready_to_pay_intent`].
///
/// The preflight query asks a payment app whether it can service a request
/// without committing to a transaction, so it carries no request id,
/// merchant name, total, display items or modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IsReadyToPayRequest {
    /// The merchant's schemeless origin. Must be non-empty.
    pub schemeless_origin: String,
    /// The schemeless origin of the iframe that invoked the request.
    /// Must be non-empty.
    pub schemeless_iframe_origin: String,
    /// The merchant's certificate chain. Absent for localhost and local
    /// files, which are secure contexts without SSL. Carried opaquely, not
    /// validated here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_chain: Option<Vec<Base64Bytes>>,
    /// Method-specific data per payment method. Must be non-empty.
    pub method_data: MethodDataMap,
}

/// Input for [`build_pay_intent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest {
    /// Unique identifier of the payment request. Must be non-empty.
    pub id: String,
    /// The merchant's name. May be empty, but always present (this is the
    /// one required string that is not checked for emptiness).
    pub merchant_name: String,
    /// The merchant's schemeless origin. Must be non-empty.
    pub schemeless_origin: String,
    /// The schemeless origin of the iframe that invoked the request.
    /// Must be non-empty.
    pub schemeless_iframe_origin: String,
    /// The merchant's certificate chain, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_chain: Option<Vec<Base64Bytes>>,
    /// Method-specific data per payment method. Must be non-empty.
    pub method_data: MethodDataMap,
    /// The total amount of the request.
    pub total: PaymentItem,
    /// The shopping cart items. Optional; never forwarded in the deprecated
    /// details payload regardless of content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_items: Option<Vec<PaymentItem>>,
    /// Method-specific overrides of the total. Optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<ModifierMap>,
}

/// Builds the intent that invokes a payment app activity to pay.
///
/// # Errors
///
/// Returns [`InvalidFieldError`] naming the first violated field, in the
/// order: `activityName`, `packageName`, `id`, `schemelessOrigin`,
/// `schemelessIframeOrigin`, `methodDataMap`.
pub fn build_pay_intent(
    component: &ComponentName,
    request: &PayRequest,
) -> Result<PaymentIntent, InvalidFieldError> {
    check_not_empty(&component.class_name, "activityName")?;
    check_not_empty(&component.package, "packageName")?;
    check_not_empty(&request.id, "id")?;
    check_not_empty(&request.schemeless_origin, "schemelessOrigin")?;
    check_not_empty(&request.schemeless_iframe_origin, "schemelessIframeOrigin")?;
    if request.method_data.is_empty() {
        return Err(InvalidFieldError::new("methodDataMap"));
    }

    #[cfg(feature = "telemetry")]
    tracing::debug!(
        package = %component.package,
        methods = request.method_data.len(),
        "building pay intent"
    );

    let extras = extras::encode_request_extras(&RequestExtras {
        id: Some(&request.id),
        merchant_name: Some(&request.merchant_name),
        schemeless_origin: &request.schemeless_origin,
        schemeless_iframe_origin: &request.schemeless_iframe_origin,
        certificate_chain: request.certificate_chain.as_deref(),
        method_data: &request.method_data,
        total: Some(&request.total),
        display_items: request.display_items.as_deref(),
        modifiers: request.modifiers.as_ref(),
    });

    Ok(PaymentIntent {
        action: ACTION_PAY,
        component: component.clone(),
        extras,
    })
}

/// Builds the intent that queries a payment app service for readiness.
///
/// # Errors
///
/// Returns [`InvalidFieldError`] naming the first violated field, in the
/// order: `serviceName`, `packageName`, `schemelessOrigin`,
/// `schemelessIframeOrigin`, `methodDataMap`.
pub fn build_is_ready_to_pay_intent(
    component: &ComponentName,
    request: &IsReadyToPayRequest,
) -> Result<PaymentIntent, InvalidFieldError> {
    check_not_empty(&component.class_name, "serviceName")?;
    check_not_empty(&component.package, "packageName")?;
    check_not_empty(&request.schemeless_origin, "schemelessOrigin")?;
    check_not_empty(&request.schemeless_iframe_origin, "schemelessIframeOrigin")?;
    if request.method_data.is_empty() {
        return Err(InvalidFieldError::new("methodDataMap"));
    }

    #[cfg(feature = "telemetry")]
    tracing::debug!(
        package = %component.package,
        methods = request.method_data.len(),
        "building is-ready-to-pay intent"
    );

    let extras = extras::encode_request_extras(&RequestExtras {
        id: None,
        merchant_name: None,
        schemeless_origin: &request.schemeless_origin,
        schemeless_iframe_origin: &request.schemeless_iframe_origin,
        certificate_chain: request.certificate_chain.as_deref(),
        method_data: &request.method_data,
        total: None,
        display_items: None,
        modifiers: None,
    });

    Ok(PaymentIntent {
        action: ACTION_IS_READY_TO_PAY,
        component: component.clone(),
        extras,
    })
}

fn check_not_empty(value: &str, field: &'static str) -> Result<(), InvalidFieldError> {
    if value.is_empty() {
        Err(InvalidFieldError::new(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extras::{EXTRA_MERCHANT_NAME, EXTRA_PAYMENT_REQUEST_ID, EXTRA_TOTAL};
    use crate::types::{OrderedMap, PaymentCurrencyAmount, PaymentMethodData};

    fn component() -> ComponentName {
        ComponentName::new("com.example.pay", "com.example.pay.PayActivity")
    }

    fn method_data() -> MethodDataMap {
        let mut map = OrderedMap::new();
        map.insert(
            "https://pay.example",
            PaymentMethodData::new("https://pay.example", "{}"),
        );
        map
    }

    fn pay_request() -> PayRequest {
        PayRequest {
            id: "request-1".to_owned(),
            merchant_name: "Example Shop".to_owned(),
            schemeless_origin: "merchant.example".to_owned(),
            schemeless_iframe_origin: "iframe.example".to_owned(),
            certificate_chain: None,
            method_data: method_data(),
            total: PaymentItem::new(PaymentCurrencyAmount::new("USD", "5.00")),
            display_items: None,
            modifiers: None,
        }
    }

    #[test]
    fn test_build_pay_intent_sets_action_and_component() {
        let intent = build_pay_intent(&component(), &pay_request()).unwrap();
        assert_eq!(intent.action, ACTION_PAY);
        assert_eq!(intent.component, component());
        assert_eq!(
            intent.extras.get_str(EXTRA_PAYMENT_REQUEST_ID),
            Some("request-1")
        );
        assert_eq!(
            intent.extras.get_str(EXTRA_TOTAL),
            Some(r#"{"currency":"USD","value":"5.00"}"#)
        );
    }

    #[test]
    fn test_build_pay_intent_rejects_empty_id() {
        let mut request = pay_request();
        request.id = String::new();
        let err = build_pay_intent(&component(), &request).unwrap_err();
        assert_eq!(err, InvalidFieldError::new("id"));
    }

    #[test]
    fn test_build_pay_intent_allows_empty_merchant_name() {
        let mut request = pay_request();
        request.merchant_name = String::new();
        let intent = build_pay_intent(&component(), &request).unwrap();
        assert_eq!(intent.extras.get_str(EXTRA_MERCHANT_NAME), Some(""));
    }

    #[test]
    fn test_build_pay_intent_rejects_empty_method_data() {
        let mut request = pay_request();
        request.method_data = OrderedMap::new();
        let err = build_pay_intent(&component(), &request).unwrap_err();
        assert_eq!(err, InvalidFieldError::new("methodDataMap"));
    }

    #[test]
    fn test_build_pay_intent_component_checked_first() {
        let bad_component = ComponentName::new("com.example.pay", "");
        let mut request = pay_request();
        request.id = String::new();
        let err = build_pay_intent(&bad_component, &request).unwrap_err();
        assert_eq!(err, InvalidFieldError::new("activityName"));
    }

    #[test]
    fn test_build_pay_intent_rejects_empty_origins() {
        let mut request = pay_request();
        request.schemeless_origin = String::new();
        let err = build_pay_intent(&component(), &request).unwrap_err();
        assert_eq!(err, InvalidFieldError::new("schemelessOrigin"));

        let mut request = pay_request();
        request.schemeless_iframe_origin = String::new();
        let err = build_pay_intent(&component(), &request).unwrap_err();
        assert_eq!(err, InvalidFieldError::new("schemelessIframeOrigin"));
    }

    #[test]
    fn test_build_is_ready_to_pay_intent_without_pay_only_fields() {
        let request = IsReadyToPayRequest {
            schemeless_origin: "merchant.example".to_owned(),
            schemeless_iframe_origin: "iframe.example".to_owned(),
            certificate_chain: None,
            method_data: method_data(),
        };
        let intent = build_is_ready_to_pay_intent(&component(), &request).unwrap();
        assert_eq!(intent.action, ACTION_IS_READY_TO_PAY);
        assert!(intent.extras.get(EXTRA_PAYMENT_REQUEST_ID).is_none());
        assert!(intent.extras.get(EXTRA_MERCHANT_NAME).is_none());
        assert!(intent.extras.get(EXTRA_TOTAL).is_none());
    }

    #[test]
    fn test_build_is_ready_to_pay_intent_names_service_field() {
        let bad_component = ComponentName::new("", "");
        let request = IsReadyToPayRequest {
            schemeless_origin: "merchant.example".to_owned(),
            schemeless_iframe_origin: "iframe.example".to_owned(),
            certificate_chain: None,
            method_data: method_data(),
        };
        let err = build_is_ready_to_pay_intent(&bad_component, &request).unwrap_err();
        assert_eq!(err, InvalidFieldError::new("serviceName"));
    }

    #[test]
    fn test_build_is_ready_to_pay_intent_rejects_empty_method_data() {
        let request = IsReadyToPayRequest {
            schemeless_origin: "merchant.example".to_owned(),
            schemeless_iframe_origin: "iframe.example".to_owned(),
            certificate_chain: None,
            method_data: OrderedMap::new(),
        };
        let err = build_is_ready_to_pay_intent(&component(), &request).unwrap_err();
        assert_eq!(err, InvalidFieldError::new("methodDataMap"));
    }
}
