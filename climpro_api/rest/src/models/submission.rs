use climpro_models::submission::SubmissionForm;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Contact form payload as sent by the website.
///
/// Every field is optional and unknown fields are ignored. Numbers and
/// booleans in text fields are accepted and converted to their string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiSubmissionForm {
    #[serde(deserialize_with = "text")]
    pub fullname: Option<String>,
    #[serde(deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "text")]
    pub postal: Option<String>,
    #[serde(deserialize_with = "text")]
    pub service: Option<String>,
    #[serde(deserialize_with = "text")]
    pub appareils: Option<String>,
    #[serde(deserialize_with = "text")]
    pub message: Option<String>,
    #[serde(deserialize_with = "text")]
    pub page_source: Option<String>,
    /// Honeypot
    #[serde(deserialize_with = "honeypot")]
    pub hp: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub consent: bool,
}

impl From<ApiSubmissionForm> for SubmissionForm {
    fn from(value: ApiSubmissionForm) -> Self {
        Self {
            full_name: value.fullname,
            email: value.email,
            phone: value.phone,
            postal_code: value.postal,
            service_type: value.service,
            device_count: value.appareils,
            message: value.message,
            page_source: value.page_source,
            honeypot: value.hp,
            consent: value.consent,
        }
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// The website posts its `FormData`, where the hidden `hp` input is always
/// sent as a string and stays empty unless a bot fills it in. Json clients
/// may send other values: null, `false` and `0` leave the honeypot empty,
/// anything else fills it.
fn honeypot<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s),
        value => Some(value.to_string()),
    })
}

/// The consent checkbox is sent as `on` when checked and left out of the
/// `FormData` otherwise. Json clients may send booleans, numbers or strings.
/// Strings spelling a negative answer (`false`, `0`, `off`, `no`) do not
/// count as consent.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "" | "false" | "0" | "off" | "no"
        ),
        Value::Array(_) | Value::Object(_) => true,
    })
}
