use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;

use docstream_models::{
    DocumentChunk, Message, RecordData, RecordMessage, RecordMetadata, SourceItem,
    StreamDefinition, RECORD_ID_NOT_SET,
};

/// Wraps (item, chunk, metadata) triples into RECORD messages with
/// provenance stamped on. Pure construction; no side effects beyond the
/// emission timestamp.
#[derive(Debug, Clone)]
pub struct RecordEmitter {
    namespace: String,
    upsert_keys: Vec<String>,
}

impl RecordEmitter {
    pub fn new(definition: &StreamDefinition) -> Self {
        Self {
            namespace: definition.effective_namespace().to_string(),
            upsert_keys: definition.upsert_keys.clone(),
        }
    }

    pub fn emit(
        &self,
        item: &SourceItem,
        chunk: &DocumentChunk,
        extra_metadata: BTreeMap<String, String>,
    ) -> Message {
        let mut extra = extra_metadata;
        // downstream dedup keys on origin + chunk ordinal
        extra.insert("chunk_index".to_string(), chunk.ordinal.to_string());

        Message::record(RecordMessage {
            namespace: self.namespace.clone(),
            data: RecordData {
                document_chunk: chunk.content.clone(),
                metadata: RecordMetadata {
                    origin_entity: item.entity.clone(),
                    emitted_at: Utc::now().timestamp(),
                    record_id: self.record_id(item),
                    extra,
                },
            },
        })
    }

    /// Deterministic join of the stream's upsert-key values, or the
    /// `not_set` sentinel when the stream declared none — such records
    /// cannot be deduplicated and rely on append semantics.
    fn record_id(&self, item: &SourceItem) -> String {
        if self.upsert_keys.is_empty() {
            return RECORD_ID_NOT_SET.to_string();
        }
        self.upsert_keys
            .iter()
            .map(|key| match key.as_str() {
                "origin_entity" => item.entity.clone(),
                _ => item.extra.get(key).cloned().unwrap_or_else(|| {
                    debug!(key = %key, entity = %item.entity, "upsert key missing on item");
                    "null".to_string()
                }),
            })
            .collect::<Vec<_>>()
            .join(":")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstream_models::{MessageType, ProviderKind};

    fn definition(upsert_keys: &[&str]) -> StreamDefinition {
        let mut def = StreamDefinition::new("txt", ProviderKind::LocalFile);
        def.namespace = Some("bucket_docs".to_string());
        def.upsert_keys = upsert_keys.iter().map(|s| s.to_string()).collect();
        def
    }

    #[test]
    fn stamps_provenance() {
        let emitter = RecordEmitter::new(&definition(&[]));
        let item = SourceItem::new("bucket/a.txt", 100).with_extra("updated_at", "100");
        let chunk = DocumentChunk::new("hello", 2);

        let msg = emitter.emit(&item, &chunk, item.extra.clone());
        assert_eq!(msg.message_type, MessageType::Record);
        let record = msg.record.unwrap();
        assert_eq!(record.namespace, "bucket_docs");
        assert_eq!(record.data.document_chunk, "hello");
        assert_eq!(record.data.metadata.origin_entity, "bucket/a.txt");
        assert_eq!(record.data.metadata.extra["chunk_index"], "2");
        assert_eq!(record.data.metadata.extra["updated_at"], "100");
        assert!(record.data.metadata.emitted_at > 0);
    }

    #[test]
    fn record_id_not_set_without_upsert_keys() {
        let emitter = RecordEmitter::new(&definition(&[]));
        let item = SourceItem::new("bucket/a.txt", 100);
        let msg = emitter.emit(&item, &DocumentChunk::new("x", 0), BTreeMap::new());
        assert_eq!(msg.record.unwrap().data.metadata.record_id, "not_set");
    }

    #[test]
    fn record_id_joins_upsert_key_values() {
        let emitter = RecordEmitter::new(&definition(&["origin_entity", "revision"]));
        let item = SourceItem::new("bucket/a.txt", 100).with_extra("revision", "7");
        let msg = emitter.emit(&item, &DocumentChunk::new("x", 0), BTreeMap::new());
        assert_eq!(
            msg.record.unwrap().data.metadata.record_id,
            "bucket/a.txt:7"
        );
    }

    #[test]
    fn missing_upsert_key_is_deterministic() {
        let emitter = RecordEmitter::new(&definition(&["revision"]));
        let item = SourceItem::new("bucket/a.txt", 100);
        let first = emitter.emit(&item, &DocumentChunk::new("x", 0), BTreeMap::new());
        let second = emitter.emit(&item, &DocumentChunk::new("x", 0), BTreeMap::new());
        assert_eq!(
            first.record.unwrap().data.metadata.record_id,
            second.record.unwrap().data.metadata.record_id,
        );
    }
}
