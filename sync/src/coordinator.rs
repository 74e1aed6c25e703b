use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use async_stream::stream;
use futures::{Stream, StreamExt};
use tracing::info;

use docstream_connectors::ProviderRegistry;
use docstream_models::{Catalog, CursorValue, Message, StreamDefinition, SyncMode};

use crate::error::SyncError;
use crate::runner::StreamRunner;
use crate::{MessageStream, DEFAULT_FAILURE_BUDGET};

/// One sync invocation: validates the catalog, then runs and drains one
/// [`StreamRunner`] per stream, in catalog order. Sequential draining
/// means at most one stream is ever in flight, so a crash mid-run leaves
/// a trivially resumable state; an interleaved fair-merge behind a
/// bounded channel would raise throughput but is deliberately not done
/// here.
///
/// A coordinator is constructed fresh per invocation and consumed by
/// [`run`](Self::run); the returned sequence is single-pass.
pub struct SyncCoordinator {
    registry: ProviderRegistry,
    catalog: Catalog,
    prior_state: HashMap<String, CursorValue>,
    failure_budget: usize,
}

impl SyncCoordinator {
    /// `prior_state` maps namespace → last persisted cursor, as handed
    /// back by the caller's state store from earlier STATE messages.
    pub fn new(
        registry: ProviderRegistry,
        catalog: Catalog,
        prior_state: HashMap<String, CursorValue>,
    ) -> Self {
        Self {
            registry,
            catalog,
            prior_state,
            failure_budget: DEFAULT_FAILURE_BUDGET,
        }
    }

    pub fn with_failure_budget(mut self, failure_budget: usize) -> Self {
        self.failure_budget = failure_budget.max(1);
        self
    }

    /// Pre-flight validation plus stream construction. Returns `Err` only
    /// for configuration problems, before any extraction starts; all
    /// later failures surface as LOG messages on the output channel.
    pub fn run(self) -> Result<SyncRun, SyncError> {
        let mut runners = Vec::with_capacity(self.catalog.streams.len());
        for definition in &self.catalog.streams {
            validate_stream(definition)?;
            let provider = self.registry.get(definition.provider).ok_or_else(|| {
                SyncError::Configuration {
                    stream: definition.name.clone(),
                    reason: format!("no provider registered for '{}'", definition.provider),
                }
            })?;
            let prior = self
                .prior_state
                .get(definition.effective_namespace())
                .cloned();
            runners.push(StreamRunner::new(
                definition.clone(),
                provider,
                prior,
                self.failure_budget,
            ));
        }

        let outcome = SyncOutcome {
            failure_flags: Arc::new(runners.iter().map(StreamRunner::failure_flag).collect()),
        };

        info!(streams = runners.len(), "starting sync");
        let messages: MessageStream = Box::pin(stream! {
            for runner in runners {
                let mut stream = runner.run();
                while let Some(message) = stream.next().await {
                    yield message;
                }
            }
        });

        Ok(SyncRun { messages, outcome })
    }
}

/// The live output of one sync: a pull-driven message sequence plus a
/// handle for the completion status once the sequence is drained.
pub struct SyncRun {
    messages: MessageStream,
    outcome: SyncOutcome,
}

impl SyncRun {
    pub fn outcome(&self) -> SyncOutcome {
        self.outcome.clone()
    }
}

impl Stream for SyncRun {
    type Item = Message;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().messages.as_mut().poll_next(cx)
    }
}

/// Meaningful once the message sequence has been drained.
#[derive(Clone)]
pub struct SyncOutcome {
    failure_flags: Arc<Vec<Arc<AtomicBool>>>,
}

impl SyncOutcome {
    pub fn failed_streams(&self) -> usize {
        self.failure_flags
            .iter()
            .filter(|flag| flag.load(Ordering::SeqCst))
            .count()
    }

    /// Non-success only when every stream failed; partial failures are
    /// carried as LOG messages instead.
    pub fn status(&self) -> SyncStatus {
        let total = self.failure_flags.len();
        if total > 0 && self.failed_streams() == total {
            SyncStatus::Failed
        } else {
            SyncStatus::Succeeded
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Succeeded,
    Failed,
}

fn validate_stream(definition: &StreamDefinition) -> Result<(), SyncError> {
    let fail = |reason: String| {
        Err(SyncError::Configuration {
            stream: definition.name.clone(),
            reason,
        })
    };

    if definition.name.trim().is_empty() {
        return fail("stream name must not be empty".to_string());
    }
    if definition.effective_namespace().trim().is_empty() {
        return fail("namespace must not be empty".to_string());
    }
    if definition.scope.is_empty() {
        return fail("scope must list at least one prefix, table or URL".to_string());
    }
    if definition.sync_mode == SyncMode::Incremental
        && definition
            .cursor_field
            .as_deref()
            .map_or(true, |f| f.trim().is_empty())
    {
        return fail("INCREMENTAL streams require a cursor_field".to_string());
    }
    if definition.upsert_keys.iter().any(|k| k.trim().is_empty()) {
        return fail("upsert_keys must not contain empty entries".to_string());
    }
    if definition.splitter.chunk_size == 0 {
        return fail("splitter chunk_size must be positive".to_string());
    }
    if definition.splitter.chunk_overlap >= definition.splitter.chunk_size {
        return fail("splitter chunk_overlap must be smaller than chunk_size".to_string());
    }
    if let Some(schema) = &definition.schema {
        if schema.keys().any(|field| field.trim().is_empty()) {
            return fail("schema field names must not be empty".to_string());
        }
    }
    Ok(())
}
