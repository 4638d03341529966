use serde::{Deserialize, Serialize};

use crate::{
    domain::{ContentItem, IconToken, LayoutKind, ServiceSlug, DEFAULT_COUNTRY_CODE},
    error::FieldErrors,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub slug: ServiceSlug,
    pub title: String,
    pub short_title: String,
    pub description: String,
    pub layout: LayoutKind,
    pub icon: IconToken,
    pub href: String,
}

impl From<&ContentItem> for ServiceSummary {
    fn from(item: &ContentItem) -> Self {
        Self {
            slug: item.slug.clone(),
            title: item.title.clone(),
            short_title: item.short_title.clone(),
            description: item.description.clone(),
            layout: item.layout,
            icon: item.icon,
            href: item.href(),
        }
    }
}

/// Contact form payload, accepted both form-urlencoded and as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

impl ContactSubmission {
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("country_code", self.country_code.as_str()),
            ("subject", self.subject.as_str()),
            ("message", self.message.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubmission {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormOutcome {
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}

impl FormOutcome {
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            errors: FieldErrors::new(),
        }
    }

    pub fn rejected(errors: FieldErrors) -> Self {
        Self {
            accepted: false,
            errors,
        }
    }
}
