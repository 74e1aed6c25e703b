use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cursor field used when an incremental stream does not name one.
pub const DEFAULT_CURSOR_FIELD: &str = "last_modified";

/// Variant tag selecting the extractor capability for a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    LocalFile,
    UrlScraper,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::LocalFile => "local_file",
            ProviderKind::UrlScraper => "url_scraper",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncMode {
    #[default]
    FullRefresh,
    Incremental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriteMode {
    #[default]
    Append,
    Replace,
}

/// Declared type for one schema field, checked once at catalog build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Integer,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitterStrategy {
    /// One chunk per document.
    Identity,
    /// Fixed-size character windows with overlap, breaking at whitespace.
    #[default]
    SlidingWindow,
    /// Blank-line separated paragraphs, capped at the chunk size.
    Paragraph,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitterConfig {
    #[serde(default)]
    pub strategy: SplitterStrategy,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            strategy: SplitterStrategy::default(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

impl SplitterConfig {
    pub fn identity() -> Self {
        Self {
            strategy: SplitterStrategy::Identity,
            ..Self::default()
        }
    }
}

/// One logical extraction unit, immutable once a sync starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDefinition {
    pub name: String,
    /// Partition key for cursor state; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub provider: ProviderKind,
    #[serde(default)]
    pub sync_mode: SyncMode,
    #[serde(default)]
    pub write_mode: WriteMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_field: Option<String>,
    /// Fields whose values identify a record for downstream dedup/replace.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub upsert_keys: Vec<String>,
    /// What to list: directory prefixes, table names, URLs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope: Vec<String>,
    #[serde(default)]
    pub splitter: SplitterConfig,
    /// Optional field-name → declared-type map for row-shaped sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<BTreeMap<String, FieldType>>,
}

impl StreamDefinition {
    pub fn new(name: impl Into<String>, provider: ProviderKind) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            provider,
            sync_mode: SyncMode::default(),
            write_mode: WriteMode::default(),
            cursor_field: None,
            upsert_keys: Vec::new(),
            scope: Vec::new(),
            splitter: SplitterConfig::default(),
            schema: None,
        }
    }

    /// The namespace cursor state is partitioned under.
    pub fn effective_namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(&self.name)
    }

    /// The state-message key the cursor is emitted under.
    pub fn cursor_field_name(&self) -> &str {
        self.cursor_field.as_deref().unwrap_or(DEFAULT_CURSOR_FIELD)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub streams: Vec<StreamDefinition>,
}

impl Catalog {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_from_yaml_with_defaults() {
        let yaml = r#"
streams:
  - name: txt
    namespace: bucket_docs
    provider: local_file
    sync_mode: INCREMENTAL
    cursor_field: last_modified
    scope:
      - /srv/docs
  - name: url_crawler
    provider: url_scraper
    scope:
      - https://example.org
    splitter:
      strategy: identity
"#;
        let catalog = Catalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.streams.len(), 2);

        let txt = &catalog.streams[0];
        assert_eq!(txt.effective_namespace(), "bucket_docs");
        assert_eq!(txt.sync_mode, SyncMode::Incremental);
        assert_eq!(txt.splitter.chunk_size, 1000);
        assert_eq!(txt.splitter.chunk_overlap, 200);

        let crawler = &catalog.streams[1];
        assert_eq!(crawler.effective_namespace(), "url_crawler");
        assert_eq!(crawler.sync_mode, SyncMode::FullRefresh);
        assert_eq!(crawler.splitter.strategy, SplitterStrategy::Identity);
        assert_eq!(crawler.cursor_field_name(), DEFAULT_CURSOR_FIELD);
    }

    #[test]
    fn sync_modes_use_wire_names() {
        assert_eq!(
            serde_json::to_string(&SyncMode::FullRefresh).unwrap(),
            "\"FULL_REFRESH\""
        );
        assert_eq!(
            serde_json::to_string(&WriteMode::Replace).unwrap(),
            "\"REPLACE\""
        );
    }

    #[test]
    fn schema_map_round_trips() {
        let mut def = StreamDefinition::new("rows", ProviderKind::LocalFile);
        let mut schema = BTreeMap::new();
        schema.insert("id".to_string(), FieldType::Integer);
        schema.insert("payload".to_string(), FieldType::Object);
        def.schema = Some(schema);

        let json = serde_json::to_string(&def).unwrap();
        let parsed: StreamDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.schema.unwrap()["id"], FieldType::Integer);
    }
}
