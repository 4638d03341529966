use std::{path::PathBuf, sync::Arc, time::Duration};

use async_trait::async_trait;
use content::ContentRegistry;
use serde::Serialize;
use shared::error::{FieldErrors, SiteError};
use site_api::{PageBuilder, Renderer};
use tracing::{error, info};
use ui_state::{FormSnapshot, FormState};

/// A validated form ready to leave the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", content = "fields", rename_all = "snake_case")]
pub(crate) enum Submission {
    Contact(FormSnapshot),
    Newsletter(FormSnapshot),
}

impl Submission {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Submission::Contact(_) => "contact",
            Submission::Newsletter(_) => "newsletter",
        }
    }

    pub(crate) fn fields(&self) -> &FormSnapshot {
        match self {
            Submission::Contact(fields) | Submission::Newsletter(fields) => fields,
        }
    }
}

/// Where accepted submissions go. There is no backend integration; the
/// default sink only records them in the log.
#[async_trait]
pub(crate) trait SubmissionSink: Send + Sync {
    async fn deliver(&self, submission: Submission) -> anyhow::Result<()>;
}

#[derive(Debug, Default)]
pub(crate) struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    async fn deliver(&self, submission: Submission) -> anyhow::Result<()> {
        info!(
            form = submission.kind(),
            fields = ?submission.fields(),
            "form submitted"
        );
        Ok(())
    }
}

/// Result of pushing a form through validation and the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SubmitOutcome {
    Accepted,
    Invalid(FieldErrors),
    DeliveryFailed,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) registry: Arc<ContentRegistry>,
    pub(crate) renderer: Renderer,
    pub(crate) sink: Arc<dyn SubmissionSink>,
    pub(crate) static_dir: PathBuf,
    pub(crate) public_url: Option<String>,
    pub(crate) autoplay: Duration,
}

impl AppState {
    pub(crate) fn pages(&self) -> PageBuilder<'_> {
        let builder = PageBuilder::new(&self.registry).with_autoplay(self.autoplay);
        match self.public_url.as_deref() {
            Some(url) => builder.with_public_url(url),
            None => builder,
        }
    }

    /// Validates `form` and delivers it. On `Invalid` the form keeps the
    /// visitor's values and errors for redisplay; on `Accepted` it is reset.
    pub(crate) async fn submit(
        &self,
        form: &mut FormState,
        wrap: fn(FormSnapshot) -> Submission,
    ) -> SubmitOutcome {
        let snapshot = match form.finish() {
            Ok(snapshot) => snapshot,
            Err(SiteError::Validation(errors)) => return SubmitOutcome::Invalid(errors),
            Err(err) => {
                error!(error = %err, "form could not be finished");
                return SubmitOutcome::DeliveryFailed;
            }
        };
        match self.sink.deliver(wrap(snapshot)).await {
            Ok(()) => SubmitOutcome::Accepted,
            Err(err) => {
                error!(error = %err, "submission delivery failed");
                SubmitOutcome::DeliveryFailed
            }
        }
    }
}
