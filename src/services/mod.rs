pub mod event_handler;
pub mod reconciliation;
pub mod status_resolver;

pub use event_handler::{EventResponse, EventStatus, WebhookEventHandler};
pub use reconciliation::{ReconciliationService, SyncOutcome};
pub use status_resolver::StatusResolver;
