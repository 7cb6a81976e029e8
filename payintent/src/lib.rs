#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Intent codec for invoking Android payment apps from Web Payments.
//!
//! This crate encodes a merchant's payment request into the flat key/value
//! intent payload understood by Android payment apps, and classifies the
//! payment app's activity result. The payload is written under two
//! field-naming schemes at once — the current keys and a deprecated mirror —
//! so that both up-to-date and legacy payment apps can consume the same
//! message unmodified.
//!
//! Delivering the intent (binding, launching, waiting for the result) is the
//! transport layer's job and is out of scope here; every operation in this
//! crate is synchronous, stateless, and performs no I/O.
//!
//! # Overview
//!
//! The outbound path validates the request, serializes the structured
//! entities into [`extras`], and hand-rolls the JSON-shaped sub-strings in
//! [`json`]. The inbound path is a single classification function in
//! [`response`]. The two directions share no mutable state.
//!
//! # Modules
//!
//! - [`encoding`] - Base64 wrapper for certificate-chain bytes
//! - [`error`] - Construction-time and response-time error families
//! - [`extras`] - The flat key/value payload and its dual-scheme encoder
//! - [`intent`] - Fail-fast builders for the pay and is-ready-to-pay intents
//! - [`json`] - Byte-exact emitters for amounts, items, and modifiers
//! - [`response`] - Activity result classification
//! - [`types`] - Payment entities and the insertion-ordered map
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring
//!
//! # Example
//!
//! ```rust
//! use payintent::intent::{ComponentName, PayRequest, build_pay_intent};
//! use payintent::types::{
//!     OrderedMap, PaymentCurrencyAmount, PaymentItem, PaymentMethodData,
//! };
//!
//! let mut method_data = OrderedMap::new();
//! method_data.insert(
//!     "https://pay.example",
//!     PaymentMethodData::new("https://pay.example", "{}"),
//! );
//!
//! let request = PayRequest {
//!     id: "order-42".into(),
//!     merchant_name: "Example Shop".into(),
//!     schemeless_origin: "shop.example".into(),
//!     schemeless_iframe_origin: "shop.example".into(),
//!     certificate_chain: None,
//!     method_data,
//!     total: PaymentItem::new(PaymentCurrencyAmount::new("USD", "5.00")),
//!     display_items: None,
//!     modifiers: None,
//! };
//!
//! let component = ComponentName::new("com.example.pay", "com.example.pay.PayActivity");
//! let intent = build_pay_intent(&component, &request)?;
//! assert_eq!(intent.action, payintent::intent::ACTION_PAY);
//! # Ok::<(), payintent::error::InvalidFieldError>(())
//! ```

pub mod encoding;
pub mod error;
pub mod extras;
pub mod intent;
pub mod json;
pub mod response;
pub mod types;

pub use encoding::Base64Bytes;
pub use error::{InvalidFieldError, ResponseError};
pub use extras::{ExtraValue, Extras};
pub use intent::{
    ComponentName, IsReadyToPayRequest, PayRequest, PaymentIntent, build_is_ready_to_pay_intent,
    build_pay_intent,
};
pub use response::{PaymentResponse, ResponseIntent, ResultCode, parse_payment_response};
pub use types::{
    MethodDataMap, ModifierMap, OrderedMap, PaymentCurrencyAmount, PaymentDetailsModifier,
    PaymentItem, PaymentMethodData,
};
