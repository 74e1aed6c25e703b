use docstream_models::{CursorValue, SourceItem, SyncMode};

use crate::error::SyncError;

/// Owns one stream's watermark for the duration of a run.
///
/// The floor is the cursor persisted by a previous sync; items at or
/// below it are considered already delivered and are filtered out with
/// strict `>`, which is what makes resume duplicate-free. The watermark
/// only ever moves forward; in strict mode (incremental streams) a
/// regressing advance is an [`SyncError::OrderingViolation`], guarding
/// against providers that break the sorted-listing contract.
#[derive(Debug)]
pub struct CursorTracker {
    sync_mode: SyncMode,
    floor: Option<CursorValue>,
    watermark: Option<CursorValue>,
}

impl CursorTracker {
    pub fn new(sync_mode: SyncMode, prior: Option<CursorValue>) -> Self {
        Self {
            sync_mode,
            watermark: prior.clone(),
            floor: prior,
        }
    }

    /// Whether the item is new relative to the floor. Always true for
    /// full refresh.
    pub fn should_process(&self, item: &SourceItem) -> bool {
        match self.sync_mode {
            SyncMode::FullRefresh => true,
            SyncMode::Incremental => match &self.floor {
                None => true,
                Some(floor) => item.cursor_value > *floor,
            },
        }
    }

    /// Moves the watermark to `max(current, item.cursor_value)`.
    pub fn advance(&mut self, item: &SourceItem) -> Result<(), SyncError> {
        if self.sync_mode == SyncMode::Incremental {
            if let Some(watermark) = &self.watermark {
                if item.cursor_value < *watermark {
                    return Err(SyncError::OrderingViolation {
                        got: item.cursor_value.clone(),
                        watermark: watermark.clone(),
                    });
                }
            }
        }
        let advanced = match self.watermark.take() {
            Some(current) => current.max(item.cursor_value.clone()),
            None => item.cursor_value.clone(),
        };
        self.watermark = Some(advanced);
        Ok(())
    }

    /// Current watermark, ready to emit as a STATE message.
    pub fn checkpoint(&self) -> Option<CursorValue> {
        self.watermark.clone()
    }
}
