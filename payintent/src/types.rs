//! Payment entities exchanged between the merchant page and the payment app.
//!
//! These are immutable value objects: each one is constructed for a single
//! encode or decode call and discarded afterwards. Amount values are kept as
//! decimal text and never parsed into numbers, so the exact textual
//! precision supplied by the merchant survives the trip to the payment app.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A currency amount as defined by the Payment Request API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCurrencyAmount {
    /// ISO 4217 currency code (e.g., `"USD"`).
    pub currency: String,
    /// Decimal amount as text (e.g., `"5.00"`). Never parsed as a number.
    pub value: String,
}

impl PaymentCurrencyAmount {
    /// Creates a new amount.
    #[must_use]
    pub fn new(currency: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            value: value.into(),
        }
    }
}

/// A single line item (total or cart entry).
///
/// There is no label field: labels are never forwarded to the payment app,
/// so the codec blanks them at the wire boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentItem {
    /// The monetary amount of this item.
    pub amount: PaymentCurrencyAmount,
}

impl PaymentItem {
    /// Creates a new item from an amount.
    #[must_use]
    pub const fn new(amount: PaymentCurrencyAmount) -> Self {
        Self { amount }
    }
}

/// Method-specific data for one payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodData {
    /// The payment method identifier (e.g., `"https://pay.example"`).
    pub supported_method: String,
    /// Opaque JSON text with method-specific configuration. Carried
    /// verbatim; never re-parsed by this codec.
    pub stringified_data: String,
}

impl PaymentMethodData {
    /// Creates new method data.
    #[must_use]
    pub fn new(supported_method: impl Into<String>, stringified_data: impl Into<String>) -> Self {
        Self {
            supported_method: supported_method.into(),
            stringified_data: stringified_data.into(),
        }
    }
}

/// A method-specific override of the total, applied when that payment
/// method is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailsModifier {
    /// The overridden total, if the modifier changes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<PaymentItem>,
    /// The method this modifier applies to. Always present.
    pub method_data: PaymentMethodData,
}

/// Method data keyed by method name, in insertion order.
pub type MethodDataMap = OrderedMap<PaymentMethodData>;

/// Details modifiers keyed by method name, in insertion order.
pub type ModifierMap = OrderedMap<PaymentDetailsModifier>;

/// A string-keyed map that preserves insertion order.
///
/// The deprecated single-method fields of the wire format are populated from
/// whichever entry iterates first, so iteration order is part of the
/// observable contract. Backing the map with a `Vec` makes that order the
/// caller's insertion order, deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts an entry, replacing the value in place if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns the first-inserted entry, if any.
    #[must_use]
    pub fn first(&self) -> Option<(&str, &V)> {
        self.0.first().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.iter().map(|(_, v)| v)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
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

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for MapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a string-keyed map")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_map_preserves_insertion_order() {
        let mut map: MethodDataMap = OrderedMap::new();
        map.insert("https://b.example", PaymentMethodData::new("https://b.example", "{}"));
        map.insert("https://a.example", PaymentMethodData::new("https://a.example", "{}"));
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["https://b.example", "https://a.example"]);
        assert_eq!(map.first().map(|(k, _)| k), Some("https://b.example"));
    }

    #[test]
    fn test_ordered_map_insert_replaces_in_place() {
        let mut map = OrderedMap::new();
        map.insert("first", 1);
        map.insert("second", 2);
        map.insert("first", 10);
        let entries: Vec<(&str, &i32)> = map.iter().collect();
        assert_eq!(entries, vec![("first", &10), ("second", &2)]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_ordered_map_serializes_in_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("zeta", "1");
        map.insert("alpha", "2");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }

    #[test]
    fn test_ordered_map_deserialize_roundtrip() {
        let json = r#"{"b":"x","a":"y"}"#;
        let map: OrderedMap<String> = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&map).unwrap(), json);
    }

    #[test]
    fn test_modifier_serde_skips_absent_total() {
        let modifier = PaymentDetailsModifier {
            total: None,
            method_data: PaymentMethodData::new("https://pay.example", "{}"),
        };
        let json = serde_json::to_string(&modifier).unwrap();
        assert_eq!(
            json,
            r#"{"methodData":{"supportedMethod":"https://pay.example","stringifiedData":"{}"}}"#
        );
    }
}
