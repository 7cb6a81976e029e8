//! Flat key/value payload for payment app intents.
//!
//! The extras container carries the request under two field-naming schemes
//! at once: the current keys and a deprecated mirror kept for payment apps
//! built against the legacy contract. Both schemes are populated from the
//! same validated input by two independent passes, so they cannot silently
//! diverge.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::encoding::Base64Bytes;
use crate::json;
use crate::types::{MethodDataMap, ModifierMap, PaymentItem};

/// Key for one certificate entry inside a chain sub-container.
pub const EXTRA_CERTIFICATE: &str = "certificate";
/// Key for the merchant name.
pub const EXTRA_MERCHANT_NAME: &str = "merchantName";
/// Key for the nested method-name to method-data container.
pub const EXTRA_METHOD_DATA: &str = "methodData";
/// Key for the ordered list of method names.
pub const EXTRA_METHOD_NAMES: &str = "methodNames";
/// Key for the serialized modifier list.
pub const EXTRA_MODIFIERS: &str = "modifiers";
/// Key for the payment request identifier.
pub const EXTRA_PAYMENT_REQUEST_ID: &str = "paymentRequestId";
/// Key for the schemeless origin of the iframe that invoked the request.
pub const EXTRA_PAYMENT_REQUEST_ORIGIN: &str = "paymentRequestOrigin";
/// Key for the merchant's certificate chain.
pub const EXTRA_TOP_CERTIFICATE_CHAIN: &str = "topLevelCertificateChain";
/// Key for the merchant's schemeless origin.
pub const EXTRA_TOP_ORIGIN: &str = "topLevelOrigin";
/// Key for the serialized total amount.
pub const EXTRA_TOTAL: &str = "total";

/// Deprecated mirror of [`EXTRA_TOP_CERTIFICATE_CHAIN`].
pub const EXTRA_DEPRECATED_CERTIFICATE_CHAIN: &str = "certificateChain";
/// Deprecated key for the first method's stringified data.
pub const EXTRA_DEPRECATED_DATA: &str = "data";
/// Deprecated mirror of [`EXTRA_METHOD_DATA`].
pub const EXTRA_DEPRECATED_DATA_MAP: &str = "dataMap";
/// Deprecated key for the serialized details payload.
pub const EXTRA_DEPRECATED_DETAILS: &str = "details";
/// Deprecated mirror of [`EXTRA_PAYMENT_REQUEST_ID`].
pub const EXTRA_DEPRECATED_ID: &str = "id";
/// Deprecated mirror of [`EXTRA_PAYMENT_REQUEST_ORIGIN`].
pub const EXTRA_DEPRECATED_IFRAME_ORIGIN: &str = "iframeOrigin";
/// Deprecated key for the first method's name.
pub const EXTRA_DEPRECATED_METHOD_NAME: &str = "methodName";
/// Deprecated mirror of [`EXTRA_TOP_ORIGIN`].
pub const EXTRA_DEPRECATED_ORIGIN: &str = "origin";

/// A single value stored in [`Extras`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtraValue {
    /// A UTF-8 string.
    String(String),
    /// An ordered list of strings.
    StringList(Vec<String>),
    /// Raw bytes; base64 text on the serialized payload.
    Bytes(Base64Bytes),
    /// A nested key/value container.
    Extras(Extras),
    /// An ordered list of nested containers.
    ExtrasList(Vec<Extras>),
}

/// A flat, string-keyed, insertion-ordered container of intent extras.
///
/// This is the payload handed to the transport layer for delivery to the
/// payment app. Nesting goes at most one level deep (method data and
/// certificate-chain sub-containers).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extras(Vec<(String, ExtraValue)>);

impl Extras {
    /// Creates an empty container.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Stores a string value under `key`.
    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.put(key.into(), ExtraValue::String(value.into()));
    }

    /// Stores a string list under `key`.
    pub fn put_string_list(&mut self, key: impl Into<String>, value: Vec<String>) {
        self.put(key.into(), ExtraValue::StringList(value));
    }

    /// Stores raw bytes under `key`.
    pub fn put_bytes(&mut self, key: impl Into<String>, value: Base64Bytes) {
        self.put(key.into(), ExtraValue::Bytes(value));
    }

    /// Stores a nested container under `key`.
    pub fn put_extras(&mut self, key: impl Into<String>, value: Self) {
        self.put(key.into(), ExtraValue::Extras(value));
    }

    /// Stores a list of nested containers under `key`.
    pub fn put_extras_list(&mut self, key: impl Into<String>, value: Vec<Self>) {
        self.put(key.into(), ExtraValue::ExtrasList(value));
    }

    fn put(&mut self, key: String, value: ExtraValue) {
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ExtraValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the string stored under `key`, if the key holds a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(ExtraValue::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtraValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the container has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Extras {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Validated request fields shared by both encoding passes.
///
/// `id`, `merchant_name` and `total` are only present for the pay request;
/// the ready-to-pay query omits them.
pub(crate) struct RequestExtras<'a> {
    pub id: Option<&'a str>,
    pub merchant_name: Option<&'a str>,
    pub schemeless_origin: &'a str,
    pub schemeless_iframe_origin: &'a str,
    pub certificate_chain: Option<&'a [Base64Bytes]>,
    pub method_data: &'a MethodDataMap,
    pub total: Option<&'a PaymentItem>,
    pub display_items: Option<&'a [PaymentItem]>,
    pub modifiers: Option<&'a ModifierMap>,
}

/// Encodes the request into an extras container, current scheme first,
/// deprecated mirror second.
pub(crate) fn encode_request_extras(input: &RequestExtras<'_>) -> Extras {
    let mut extras = Extras::new();
    write_current(&mut extras, input);
    write_deprecated(&mut extras, input);
    extras
}

fn write_current(extras: &mut Extras, input: &RequestExtras<'_>) {
    if let Some(id) = input.id {
        extras.put_string(EXTRA_PAYMENT_REQUEST_ID, id);
    }
    if let Some(merchant_name) = input.merchant_name {
        extras.put_string(EXTRA_MERCHANT_NAME, merchant_name);
    }

    extras.put_string(EXTRA_TOP_ORIGIN, input.schemeless_origin);
    extras.put_string(EXTRA_PAYMENT_REQUEST_ORIGIN, input.schemeless_iframe_origin);

    if let Some(chain) = input.certificate_chain
        && !chain.is_empty()
    {
        extras.put_extras_list(EXTRA_TOP_CERTIFICATE_CHAIN, certificate_chain_extras(chain));
    }

    extras.put_string_list(
        EXTRA_METHOD_NAMES,
        input.method_data.keys().map(str::to_owned).collect(),
    );
    extras.put_extras(EXTRA_METHOD_DATA, method_data_extras(input.method_data));

    if let Some(modifiers) = input.modifiers {
        extras.put_string(EXTRA_MODIFIERS, json::serialize_modifiers(modifiers.values()));
    }

    if let Some(total) = input.total {
        extras.put_string(EXTRA_TOTAL, json::serialize_total_amount(&total.amount));
    }
}

fn write_deprecated(extras: &mut Extras, input: &RequestExtras<'_>) {
    if let Some(id) = input.id {
        extras.put_string(EXTRA_DEPRECATED_ID, id);
    }

    extras.put_string(EXTRA_DEPRECATED_ORIGIN, input.schemeless_origin);
    extras.put_string(EXTRA_DEPRECATED_IFRAME_ORIGIN, input.schemeless_iframe_origin);

    if let Some(chain) = input.certificate_chain
        && !chain.is_empty()
    {
        extras.put_extras_list(
            EXTRA_DEPRECATED_CERTIFICATE_CHAIN,
            certificate_chain_extras(chain),
        );
    }

    // The single-method fields reflect whichever entry was inserted first.
    if let Some((method_name, method_data)) = input.method_data.first() {
        extras.put_string(EXTRA_DEPRECATED_METHOD_NAME, method_name);
        extras.put_string(EXTRA_DEPRECATED_DATA, &method_data.stringified_data);
    }

    extras.put_extras(EXTRA_DEPRECATED_DATA_MAP, method_data_extras(input.method_data));

    extras.put_string(
        EXTRA_DEPRECATED_DETAILS,
        json::serialize_deprecated_details(input.total, input.display_items),
    );
}

fn method_data_extras(method_data: &MethodDataMap) -> Extras {
    let mut extras = Extras::new();
    for (name, data) in method_data.iter() {
        extras.put_string(name, &data.stringified_data);
    }
    extras
}

fn certificate_chain_extras(chain: &[Base64Bytes]) -> Vec<Extras> {
    chain
        .iter()
        .map(|entry| {
            let mut extras = Extras::new();
            extras.put_bytes(EXTRA_CERTIFICATE, entry.clone());
            extras
        })
        .collect()
}
