use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-field validation messages keyed by field name.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    DocumentUnavailable,
    Internal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: FieldErrors,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            fields: FieldErrors::new(),
        }
    }

    pub fn with_fields(mut self, fields: FieldErrors) -> Self {
        self.fields = fields;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Service,
    Document,
    Expert,
    Page,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentKind::Service => "service",
            ContentKind::Document => "document",
            ContentKind::Expert => "expert",
            ContentKind::Page => "page",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("{kind} not found: {slug}")]
    NotFound { kind: ContentKind, slug: String },
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),
    #[error("document unavailable: {url}")]
    DocumentUnavailable { url: String },
    #[error("render failed: {0}")]
    Render(String),
    #[error("content error: {0}")]
    Content(String),
}

impl SiteError {
    pub fn not_found(kind: ContentKind, slug: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            slug: slug.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SiteError::NotFound { .. } => ErrorCode::NotFound,
            SiteError::Validation(_) => ErrorCode::Validation,
            SiteError::DocumentUnavailable { .. } => ErrorCode::DocumentUnavailable,
            SiteError::Render(_) | SiteError::Content(_) => ErrorCode::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SiteError::NotFound { .. })
    }
}

impl From<SiteError> for ApiError {
    fn from(value: SiteError) -> Self {
        let code = value.code();
        let message = value.to_string();
        match value {
            SiteError::Validation(fields) => ApiError::new(code, message).with_fields(fields),
            _ => ApiError::new(code, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_api_error() {
        let err = SiteError::not_found(ContentKind::Service, "does-not-exist");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "service not found: does-not-exist");

        let api: ApiError = err.into();
        assert_eq!(api.code, ErrorCode::NotFound);
        assert!(api.fields.is_empty());
    }

    #[test]
    fn validation_error_keeps_field_messages() {
        let mut fields = FieldErrors::new();
        fields.insert("email".into(), "invalid format".into());
        let api: ApiError = SiteError::Validation(fields).into();

        assert_eq!(api.code, ErrorCode::Validation);
        assert_eq!(api.fields.get("email").map(String::as_str), Some("invalid format"));

        let json = serde_json::to_value(&api).expect("json");
        assert_eq!(json["code"], "validation");
        assert_eq!(json["fields"]["email"], "invalid format");
    }
}
