use serde::Serialize;

pub mod submission;

/// Body of every response, e.g. `{"ok": false, "error": "Consentement requis"}`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn error(error: &'static str) -> Self {
        Self {
            ok: false,
            error: Some(error),
        }
    }
}
