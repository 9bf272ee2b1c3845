//! Volume Records
//!
//! The unit of data returned by the inventory endpoint. Nothing about a
//! record is validated on arrival: every field may be absent or carry any
//! JSON shape, and rendering must still succeed.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Text shown in place of a field the server did not send.
pub const MISSING_FIELD: &str = "undefined";

/// One inventory entry describing a storage volume.
///
/// Fields hold the raw JSON value so that a `size` of `100` and a `size` of
/// `"100GB"` both survive untouched. `None` means the key was absent;
/// an explicit `null` is kept as `Some(Value::Null)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeRecord {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub size: Option<Value>,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub volume_type: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub service_name: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub storage_provider_name: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<Value>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<Value>,

    /// Anything else the server attached (labels, status, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keeps `null` distinguishable from an absent key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl VolumeRecord {
    /// Build a record from one element of the response array.
    ///
    /// Elements that are not JSON objects have no fields at all, so they
    /// become a record with every field absent.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn id_text(&self) -> String {
        field_text(self.id.as_ref())
    }

    pub fn name_text(&self) -> String {
        field_text(self.name.as_ref())
    }

    pub fn size_text(&self) -> String {
        field_text(self.size.as_ref())
    }

    pub fn type_text(&self) -> String {
        field_text(self.volume_type.as_ref())
    }

    pub fn service_name_text(&self) -> String {
        field_text(self.service_name.as_ref())
    }

    pub fn storage_provider_name_text(&self) -> String {
        field_text(self.storage_provider_name.as_ref())
    }

    pub fn availability_zone_text(&self) -> String {
        field_text(self.availability_zone.as_ref())
    }

    pub fn scheduler_text(&self) -> String {
        field_text(self.scheduler.as_ref())
    }
}

/// Convert a raw field into the text a browser would show when the value is
/// concatenated into markup.
pub fn field_text(value: Option<&Value>) -> String {
    match value {
        None => MISSING_FIELD.to_string(),
        Some(v) => value_text(v),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                // Holes and nulls join as empty strings
                Value::Null => String::new(),
                other => value_text(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Largest integer a browser holds exactly (`Number.MAX_SAFE_INTEGER`)
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        if i.unsigned_abs() <= MAX_SAFE_INTEGER {
            return i.to_string();
        }
    } else if let Some(u) = n.as_u64() {
        if u <= MAX_SAFE_INTEGER {
            return u.to_string();
        }
    }

    // Everything else is a double on the browser side, including integers
    // past 2^53, which lose their low bits.
    match n.as_f64() {
        Some(f) => float_text(f),
        None => n.to_string(),
    }
}

/// `Number.prototype.toString()` for a finite double: shortest round-trip
/// digits, positional between 1e-7 and 1e21, exponent form outside.
fn float_text(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if f < 0.0 {
        return format!("-{}", float_text(-f));
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "1.2345e3"
    let sci = format!("{:e}", f);
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return f.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return f.to_string();
    };

    let digits = mantissa.replace('.', "");
    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let sign = if e >= 0 { '+' } else { '-' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, e.abs())
        }
    }
}
