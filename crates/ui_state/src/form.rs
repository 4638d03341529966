//! Form field state and synchronous validation.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use shared::{
    domain::{DEFAULT_COUNTRY_CODE, DIAL_CODES},
    error::{FieldErrors, SiteError},
};
use tracing::debug;

pub const REQUIRED: &str = "required";
pub const INVALID_FORMAT: &str = "invalid format";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Optional,
    Required,
    /// Empty is allowed; anything else must look like an address.
    Email,
    RequiredEmail,
    /// Must be one of the known dialling codes.
    DialCode,
}

impl FieldRule {
    pub fn check(self, value: &str) -> Option<&'static str> {
        let value = value.trim();
        match self {
            FieldRule::Optional => None,
            FieldRule::Required => value.is_empty().then_some(REQUIRED),
            FieldRule::Email => {
                (!value.is_empty() && !is_valid_email(value)).then_some(INVALID_FORMAT)
            }
            FieldRule::RequiredEmail if value.is_empty() => Some(REQUIRED),
            FieldRule::RequiredEmail => (!is_valid_email(value)).then_some(INVALID_FORMAT),
            FieldRule::DialCode => {
                let known = DIAL_CODES.iter().any(|(code, _, _)| *code == value);
                (!known).then_some(INVALID_FORMAT)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rule: FieldRule,
    pub initial: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, rule: FieldRule) -> Self {
        Self {
            name,
            rule,
            initial: "",
        }
    }

    pub const fn with_initial(mut self, initial: &'static str) -> Self {
        self.initial = initial;
        self
    }
}

pub const CONTACT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", FieldRule::Required),
    FieldSpec::new("email", FieldRule::RequiredEmail),
    FieldSpec::new("phone", FieldRule::Optional),
    FieldSpec::new("country_code", FieldRule::DialCode).with_initial(DEFAULT_COUNTRY_CODE),
    FieldSpec::new("subject", FieldRule::Optional),
    FieldSpec::new("message", FieldRule::Optional),
];

pub const NEWSLETTER_FIELDS: &[FieldSpec] = &[FieldSpec::new("email", FieldRule::RequiredEmail)];

/// Field values captured at submit time.
pub type FormSnapshot = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    schema: &'static [FieldSpec],
    fields: BTreeMap<String, String>,
    errors: FieldErrors,
}

impl FormState {
    pub fn new(schema: &'static [FieldSpec]) -> Self {
        let mut state = Self {
            schema,
            fields: BTreeMap::new(),
            errors: FieldErrors::new(),
        };
        state.reset();
        state
    }

    pub fn contact() -> Self {
        Self::new(CONTACT_FIELDS)
    }

    pub fn newsletter() -> Self {
        Self::new(NEWSLETTER_FIELDS)
    }

    /// Updates a field and clears its error. Returns `false` for names the
    /// schema does not know.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                self.errors.remove(name);
                true
            }
            None => {
                debug!(field = name, "ignoring unknown form field");
                false
            }
        }
    }

    pub fn fill<'a>(&mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (name, value) in pairs {
            self.set(name, value);
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Runs every validator and replaces the error map. Returns `true` when
    /// the form is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = self
            .schema
            .iter()
            .filter_map(|spec| {
                let value = self.fields.get(spec.name).map_or("", String::as_str);
                spec.rule
                    .check(value)
                    .map(|message| (spec.name.to_string(), message.to_string()))
            })
            .collect();
        self.errors.is_empty()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.fields.clone()
    }

    /// Validates and, on success, hands back the submitted values and resets
    /// the form. On failure the values are kept and the errors populated.
    pub fn finish(&mut self) -> Result<FormSnapshot, SiteError> {
        if !self.validate() {
            return Err(SiteError::Validation(self.errors.clone()));
        }
        let snapshot = self.snapshot();
        self.reset();
        Ok(snapshot)
    }

    /// `finish` followed by a synchronous send.
    pub fn submit(&mut self, send: impl FnOnce(&FormSnapshot)) -> Result<(), SiteError> {
        let snapshot = self.finish()?;
        send(&snapshot);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.fields = self
            .schema
            .iter()
            .map(|spec| (spec.name.to_string(), spec.initial.to_string()))
            .collect();
        self.errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_form_reports_each_failing_field_once() {
        let mut form = FormState::contact();
        form.set("name", "   ");
        form.set("email", "not-an-email");

        let mut sent = false;
        let err = form.submit(|_| sent = true).expect_err("invalid form");
        assert!(!sent);
        assert!(matches!(err, SiteError::Validation(ref fields) if fields.len() == 2));
        assert_eq!(form.error("name"), Some(REQUIRED));
        assert_eq!(form.error("email"), Some(INVALID_FORMAT));
        assert_eq!(form.value("email"), Some("not-an-email"));
    }

    #[test]
    fn valid_submission_sends_snapshot_and_resets() {
        let mut form = FormState::contact();
        form.fill([("name", "A"), ("email", "a@b.com"), ("subject", "Audit")]);

        let mut captured = None;
        form.submit(|snapshot| captured = Some(snapshot.clone()))
            .expect("valid form");

        let captured = captured.expect("sink called");
        assert_eq!(captured.get("name").map(String::as_str), Some("A"));
        assert_eq!(captured.get("country_code").map(String::as_str), Some("+970"));

        assert!(!form.has_errors());
        assert_eq!(form.value("name"), Some(""));
        assert_eq!(form.value("email"), Some(""));
        assert_eq!(form.value("subject"), Some(""));
        assert_eq!(form.value("country_code"), Some(DEFAULT_COUNTRY_CODE));
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        let mut form = FormState::contact();
        assert!(!form.validate());
        assert!(form.error("name").is_some());
        assert!(form.error("email").is_some());

        form.set("name", "Sami");
        assert_eq!(form.error("name"), None);
        assert_eq!(form.error("email"), Some(REQUIRED));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut form = FormState::newsletter();
        assert!(!form.set("company", "Titan"));
        assert_eq!(form.value("company"), None);
        assert_eq!(form.snapshot().len(), 1);
    }

    #[test]
    fn country_code_must_be_known() {
        let mut form = FormState::contact();
        form.fill([("name", "A"), ("email", "a@b.com"), ("country_code", "+999")]);
        assert!(!form.validate());
        assert_eq!(form.error("country_code"), Some(INVALID_FORMAT));

        form.set("country_code", "+44");
        assert!(form.validate());
    }

    #[test]
    fn email_rule_matches_local_at_domain_dot_tld() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@b.com"));
        assert_eq!(FieldRule::Email.check(""), None);
        assert_eq!(FieldRule::RequiredEmail.check(" "), Some(REQUIRED));
    }
}
