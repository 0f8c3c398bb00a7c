//! Batch Dispatcher: fans a webhook batch out to the Reply Generator and
//! joins the per-event outcomes back in input order.

use futures::future::join_all;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use super::generator::ReplyGenerator;
use crate::core::models::{DispatchOutcome, DispatchResponse};
use crate::line::{InboundEvent, parse_webhook_body};

pub struct Dispatcher {
    generator: ReplyGenerator,
}

impl Dispatcher {
    #[must_use]
    pub fn new(generator: ReplyGenerator) -> Self {
        Self { generator }
    }

    /// Decodes a raw webhook body and dispatches it. A body that does not
    /// decode is rejected as a whole; nothing is processed.
    pub async fn dispatch_body(&self, body: &str) -> DispatchResponse {
        match parse_webhook_body(body) {
            Ok(webhook) => self.dispatch(webhook.events).await,
            Err(e) => {
                error!("Malformed webhook batch: {}", e);
                DispatchResponse::Error
            }
        }
    }

    /// Runs every event concurrently and returns one outcome per event, at
    /// the same index as its event.
    pub async fn dispatch(&self, batch: Vec<InboundEvent>) -> DispatchResponse {
        let batch_id = Uuid::new_v4().to_string();
        info!(batch_id = %batch_id, events = batch.len(), "Dispatching webhook batch");

        let handles = batch.into_iter().enumerate().map(|(index, event)| {
            let generator = self.generator.clone();
            let span = info_span!("event", batch_id = %batch_id, index, kind = event.kind());
            tokio::spawn(async move { generator.generate(&event).await }.instrument(span))
        });

        let results: Vec<DispatchOutcome> = join_all(handles)
            .await
            .into_iter()
            .enumerate()
            .map(|(index, joined)| {
                joined.unwrap_or_else(|e| {
                    error!(batch_id = %batch_id, index, "Event task panicked: {}", e);
                    DispatchOutcome::DeliveryFailed {
                        error: format!("event task panicked before a reply was confirmed: {e}"),
                    }
                })
            })
            .collect();

        let delivered = results.iter().filter(|o| o.is_delivered()).count();
        info!(batch_id = %batch_id, delivered, "Webhook batch complete");

        DispatchResponse::Success { results }
    }
}
