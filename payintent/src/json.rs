//! Hand-rolled JSON emitters for the intent payload sub-structures.
//!
//! Only a handful of fixed shapes are ever produced and nothing written
//! here is parsed back by this crate, so each shape gets its own small
//! formatter instead of a serde tree. The output bytes are part of the
//! wire contract with payment apps and must not change.

use crate::types::{PaymentCurrencyAmount, PaymentDetailsModifier, PaymentItem};

/// The empty-object literal used when no JSON payload applies.
pub const EMPTY_JSON_DATA: &str = "{}";

/// Emits an amount as `{"currency":"<currency>","value":"<value>"}`.
#[must_use]
pub fn serialize_total_amount(amount: &PaymentCurrencyAmount) -> String {
    let mut out = String::from("{\"currency\":");
    push_json_string(&mut out, &amount.currency);
    out.push_str(",\"value\":");
    push_json_string(&mut out, &amount.value);
    out.push('}');
    out
}

/// Emits a total item as `{"label":"","amount":{...}}`.
///
/// The label is always blank: the payment app does not need it to complete
/// the transaction. Matches
/// <https://w3c.github.io/payment-handler/#total-attribute>.
#[must_use]
pub fn serialize_total(item: &PaymentItem) -> String {
    let mut out = String::from("{\"label\":\"\",\"amount\":");
    out.push_str(&serialize_total_amount(&item.amount));
    out.push('}');
    out
}

/// Emits a modifier list as a JSON array.
///
/// Each element is `{"total":...,"supportedMethods":[...],"data":"..."}`
/// with `total` a total item or the literal `null`.
#[must_use]
pub fn serialize_modifiers<'a, I>(modifiers: I) -> String
where
    I: IntoIterator<Item = &'a PaymentDetailsModifier>,
{
    let mut out = String::from("[");
    for (index, modifier) in modifiers.into_iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_modifier(&mut out, modifier);
    }
    out.push(']');
    out
}

fn push_modifier(out: &mut String, modifier: &PaymentDetailsModifier) {
    out.push_str("{\"total\":");
    match &modifier.total {
        Some(total) => out.push_str(&serialize_total(total)),
        None => out.push_str("null"),
    }

    // supportedMethods stays a single-element array for payment apps that
    // predate the string form of the field.
    out.push_str(",\"supportedMethods\":[");
    push_json_string(out, &modifier.method_data.supported_method);
    out.push_str("],\"data\":");
    push_json_string(out, &modifier.method_data.stringified_data);
    out.push('}');
}

/// Emits the deprecated `details` payload.
///
/// Display items are never forwarded to the payment app: when the caller
/// supplies any, the emitted `displayItems` array is still empty. This is a
/// sanitization rule of the wire contract, not an omission.
#[must_use]
pub fn serialize_deprecated_details(
    total: Option<&PaymentItem>,
    display_items: Option<&[PaymentItem]>,
) -> String {
    let mut out = String::from("{");
    if let Some(total) = total {
        out.push_str("\"total\":");
        out.push_str(&serialize_total(total));
    }
    if display_items.is_some() {
        if total.is_some() {
            out.push(',');
        }
        out.push_str("\"displayItems\":[]");
    }
    out.push('}');
    out
}

/// Appends `value` as a quoted JSON string, escaped the way Android's
/// `JsonWriter` escapes (including the JavaScript line separators).
fn push_json_string(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}
