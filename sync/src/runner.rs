use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_stream::stream;
use tracing::{error, info, warn};

use docstream_chunker::{splitter_for, DocumentSplitter};
use docstream_connectors::ExtractorProvider;
use docstream_models::{
    CursorValue, DocumentChunk, LogLevel, Message, SourceItem, StateMessage, StreamDefinition,
};

use crate::cursor::CursorTracker;
use crate::emitter::RecordEmitter;
use crate::error::SyncError;
use crate::MessageStream;

/// Runs one stream's full pass:
///
/// ```text
/// LISTING -> FILTERING -> (FETCHING -> SPLITTING -> EMITTING)* -> CHECKPOINTING -> DONE
/// ```
///
/// with FAILED reachable from any state. The runner exclusively owns its
/// stream's [`CursorTracker`]; checkpoints are appended to the output
/// only after every record of the corresponding item has been yielded,
/// so a consumer that persists a STATE message can resume without loss
/// or duplication.
pub struct StreamRunner {
    definition: StreamDefinition,
    provider: Arc<dyn ExtractorProvider>,
    splitter: Box<dyn DocumentSplitter>,
    tracker: CursorTracker,
    emitter: RecordEmitter,
    failure_budget: usize,
    failed: Arc<AtomicBool>,
}

impl StreamRunner {
    pub fn new(
        definition: StreamDefinition,
        provider: Arc<dyn ExtractorProvider>,
        prior_cursor: Option<CursorValue>,
        failure_budget: usize,
    ) -> Self {
        let splitter = splitter_for(&definition.splitter);
        let tracker = CursorTracker::new(definition.sync_mode, prior_cursor);
        let emitter = RecordEmitter::new(&definition);
        Self {
            definition,
            provider,
            splitter,
            tracker,
            emitter,
            failure_budget,
            failed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set once the stream terminates in FAILED; the coordinator reads
    /// these to decide the overall completion status.
    pub fn failure_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.failed)
    }

    /// FETCHING, SPLITTING and EMITTING for a single item. Records are
    /// buffered here so that nothing reaches the output channel for an
    /// item that fails mid-split.
    async fn process_item(&self, item: &SourceItem) -> Result<Vec<Message>, SyncError> {
        let content =
            self.provider
                .fetch(item)
                .await
                .map_err(|source| SyncError::ItemProcessing {
                    entity: item.entity.clone(),
                    source,
                })?;

        let records = self
            .splitter
            .split(&content)
            .into_iter()
            .enumerate()
            .map(|(ordinal, text)| {
                let chunk = DocumentChunk::new(text, ordinal);
                self.emitter.emit(item, &chunk, item.extra.clone())
            })
            .collect();
        Ok(records)
    }

    pub fn run(mut self) -> MessageStream {
        Box::pin(stream! {
            let namespace = self.definition.effective_namespace().to_string();
            let cursor_field = self.definition.cursor_field_name().to_string();
            info!(stream = %namespace, provider = %self.definition.provider, "starting stream");

            if let Err(source) = self.provider.check_connection().await {
                let err = SyncError::ProviderUnavailable {
                    stream: namespace.clone(),
                    source,
                };
                error!(error = %err, "provider connection check failed");
                self.failed.store(true, Ordering::SeqCst);
                yield Message::log(LogLevel::Error, err.to_string());
                return;
            }

            // LISTING: the full candidate set, sorted ascending by cursor
            // before anything else happens. The sort is stable, so ties
            // keep the provider's listing order.
            let mut items = match self.provider.list(&self.definition.scope).await {
                Ok(items) => items,
                Err(e) => {
                    error!(stream = %namespace, error = %e, "listing failed");
                    self.failed.store(true, Ordering::SeqCst);
                    yield Message::log(
                        LogLevel::Error,
                        format!("Stream '{}': listing failed: {}", namespace, e),
                    );
                    return;
                }
            };
            items.sort_by(|a, b| a.cursor_value.cmp(&b.cursor_value));

            // FILTERING against the persisted floor
            let candidates = items.len();
            let work: Vec<SourceItem> = items
                .into_iter()
                .filter(|item| self.tracker.should_process(item))
                .collect();
            info!(
                stream = %namespace,
                candidates,
                new = work.len(),
                "filtered work list"
            );

            let mut consecutive_failures = 0usize;
            // once an item fails, the watermark must not move past it:
            // later items still emit records (at-least-once on the next
            // sync), but checkpoints freeze at the last fully-delivered
            // point so the failed item is retried after resume
            let mut checkpoints_frozen = false;
            for item in work {
                match self.process_item(&item).await {
                    Ok(records) => {
                        consecutive_failures = 0;
                        let emitted = records.len();
                        for record in records {
                            yield record;
                        }
                        if emitted == 0 {
                            // empty document: processed, no records
                            warn!(stream = %namespace, entity = %item.entity, "item produced no chunks");
                        }
                        if checkpoints_frozen {
                            continue;
                        }
                        // CHECKPOINTING: only after every record of this
                        // item is out.
                        if let Err(e) = self.tracker.advance(&item) {
                            error!(stream = %namespace, entity = %item.entity, error = %e, "cursor regression");
                            self.failed.store(true, Ordering::SeqCst);
                            yield Message::log(
                                LogLevel::Error,
                                format!("Stream '{}': {}", namespace, e),
                            );
                            return;
                        }
                        if let Some(cursor) = self.tracker.checkpoint() {
                            yield Message::state(StateMessage::single(
                                namespace.clone(),
                                cursor_field.clone(),
                                cursor,
                            ));
                        }
                    }
                    Err(e) => {
                        // the item is skipped and the cursor does not
                        // advance past it; the next sync retries it
                        checkpoints_frozen = true;
                        consecutive_failures += 1;
                        error!(stream = %namespace, entity = %item.entity, error = %e, "item failed");
                        yield Message::log(
                            LogLevel::Error,
                            format!("Stream '{}': skipping item '{}': {}", namespace, item.entity, e),
                        );
                        if consecutive_failures >= self.failure_budget {
                            let budget_err = SyncError::FailureBudgetExceeded {
                                count: consecutive_failures,
                            };
                            error!(stream = %namespace, error = %budget_err, "stream failed");
                            self.failed.store(true, Ordering::SeqCst);
                            yield Message::log(
                                LogLevel::Error,
                                format!("Stream '{}': {}", namespace, budget_err),
                            );
                            return;
                        }
                    }
                }
            }

            info!(stream = %namespace, "stream complete");
        })
    }
}
