//! Webhook event handling.
//!
//! Turns a raw GitHub delivery (event type plus JSON body) into calls on the
//! reconciliation engine. Transport concerns stay in the HTTP adapter; this
//! module only decides the outcome and its message.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::IssueEvent;
use crate::infrastructure::logging::SecretScrubber;
use crate::services::reconciliation::{ReconciliationService, SyncOutcome};

/// Event type GitHub sends for issue activity.
pub const ISSUES_EVENT: &str = "issues";

/// Outcome class of a handled delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// Processed or acknowledged.
    Accepted,
    /// Rejected before any side effect (sender or payload shape).
    Rejected,
    /// Processing started and failed.
    Failed,
}

impl EventStatus {
    /// HTTP status code reported to the webhook caller.
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Accepted => 200,
            Self::Rejected => 400,
            Self::Failed => 500,
        }
    }
}

/// Status and message returned for a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventResponse {
    pub status: EventStatus,
    pub message: String,
}

impl EventResponse {
    fn accepted(message: impl Into<String>) -> Self {
        Self {
            status: EventStatus::Accepted,
            message: message.into(),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            status: EventStatus::Rejected,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            status: EventStatus::Failed,
            message: message.into(),
        }
    }
}

/// Authorizes deliveries and routes `issues` events into the engine.
pub struct WebhookEventHandler {
    engine: Arc<ReconciliationService>,
    allowed_sender: String,
    workspace_id: String,
    scrubber: SecretScrubber,
}

impl WebhookEventHandler {
    pub fn new(
        engine: Arc<ReconciliationService>,
        allowed_sender: impl Into<String>,
        workspace_id: impl Into<String>,
        scrubber: SecretScrubber,
    ) -> Self {
        Self {
            engine,
            allowed_sender: allowed_sender.into(),
            workspace_id: workspace_id.into(),
            scrubber,
        }
    }

    /// Handle one delivery.
    ///
    /// The sender check runs before anything touches the store or Motion.
    #[instrument(skip(self, payload))]
    pub async fn handle(&self, event_type: &str, payload: &Value) -> EventResponse {
        let Some(sender) = payload.pointer("/sender/login").and_then(Value::as_str) else {
            warn!("delivery has no sender login");
            return EventResponse::rejected("Sender not found");
        };

        if sender != self.allowed_sender {
            warn!(sender, "rejecting delivery from unauthorized sender");
            return EventResponse::rejected("Bad user");
        }

        if event_type != ISSUES_EVENT {
            debug!("ignoring event type");
            return EventResponse::accepted("Event processed");
        }

        let event: IssueEvent = match serde_json::from_value(payload.clone()) {
            Ok(event) => event,
            Err(e) => {
                let err = DomainError::InvalidPayload(e.to_string());
                warn!(error = %err, "malformed issues payload");
                return EventResponse::rejected(err.to_string());
            }
        };

        match self.process_issue(&event).await {
            Ok(outcome) => {
                info!(task_id = outcome.task_id(), ?outcome, "issue synced");
                EventResponse::accepted("Event processed")
            }
            Err(e) => {
                let message = self.scrubber.scrub_message(&e.to_string());
                error!(error = %message, "failed to process issue event");
                EventResponse::failed(format!("Error processing event: {message}"))
            }
        }
    }

    async fn process_issue(&self, event: &IssueEvent) -> DomainResult<SyncOutcome> {
        info!(
            action = event.action.as_deref().unwrap_or("unknown"),
            repo = %event.repository.full_name,
            issue_id = event.issue.id,
            "processing issues event"
        );

        let owner = &event.sender.login;
        let project_id = self
            .engine
            .resolve_project(&event.repository, &self.workspace_id, owner)
            .await?;

        self.engine
            .sync_issue(
                &event.issue,
                event.repository.id,
                &project_id,
                &self.workspace_id,
                owner,
            )
            .await
    }
}
