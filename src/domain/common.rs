//! Shared serde helpers for persisted fee records.

use serde::{de::IgnoredAny, Deserialize, Deserializer};

/// Decodes a money field that older snapshots may have stored as a string,
/// a number, `null`, or garbage. Anything unusable becomes `0`.
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    let value = Option::<RawAmount>::deserialize(deserializer)?;
    let amount = match value {
        Some(RawAmount::Number(number)) => number,
        Some(RawAmount::Text(text)) => text.trim().parse::<f64>().unwrap_or(0.0),
        Some(RawAmount::Other(_)) | None => 0.0,
    };
    Ok(if amount.is_finite() { amount } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "super::lenient_amount")]
        value: f64,
    }

    fn probe(json: &str) -> f64 {
        serde_json::from_str::<Probe>(json).unwrap().value
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(probe(r#"{"value": 500}"#), 500.0);
        assert_eq!(probe(r#"{"value": "750.5"}"#), 750.5);
    }

    #[test]
    fn falls_back_to_zero() {
        assert_eq!(probe(r#"{"value": "abc"}"#), 0.0);
        assert_eq!(probe(r#"{"value": null}"#), 0.0);
        assert_eq!(probe(r#"{"value": [1]}"#), 0.0);
        assert_eq!(probe(r#"{}"#), 0.0);
    }
}
