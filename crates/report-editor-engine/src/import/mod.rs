//! Analysis report import.
//!
//! A report is JSON of the form
//! `{"final_output": {"youtube_url": "...", "sections": [{"type": "...", "content": "..."}]}}`.
//! Every field is optional and unknown fields are ignored; only text that is
//! not JSON at all is an error.

use serde::Deserialize;
use serde_json::Value;

use crate::editing::{BlockStore, Patch};
use crate::models::{BlockType, NewBlock, RichText};
use crate::parsing::parse_blocks;

pub const DEFAULT_TITLE: &str = "📺 YouTube Video Analysis";
pub const DEFAULT_SUMMARY_HEADING: &str = "📋 Video Summary";

/// Section types that already carry the video, case-insensitive.
pub const MEDIA_SECTION_TYPES: [&str; 4] = ["youtube", "video", "media", "media-embed"];

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Invalid report JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// One titled chunk of analysis text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportSection {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: String,
}

impl ReportSection {
    pub fn new(kind: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            content: content.into(),
        }
    }

    pub fn is_media(&self) -> bool {
        MEDIA_SECTION_TYPES
            .iter()
            .any(|t| self.kind.eq_ignore_ascii_case(t))
    }
}

/// The parts of an analysis result the editor cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    pub source_url: Option<String>,
    pub sections: Vec<ReportSection>,
}

impl AnalysisReport {
    /// Parse report JSON text. Structural problems inside valid JSON are
    /// tolerated; see [`AnalysisReport::from_value`].
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    /// Lenient extraction: missing or mistyped fields are skipped with a
    /// warning instead of failing the whole import.
    pub fn from_value(value: &Value) -> Self {
        let Some(output) = value.get("final_output") else {
            log::warn!("report has no final_output; importing an empty analysis");
            return Self::default();
        };

        let source_url = match output.get("youtube_url") {
            None | Some(Value::Null) => None,
            Some(Value::String(url)) => Some(url.clone()),
            Some(other) => {
                log::warn!("ignoring non-string youtube_url: {other}");
                None
            }
        };

        let sections = match output.get("sections") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| match ReportSection::deserialize(item) {
                    Ok(section) => Some(section),
                    Err(e) => {
                        log::warn!("skipping malformed section {i}: {e}");
                        None
                    }
                })
                .collect(),
            Some(other) => {
                log::warn!("ignoring non-array sections: {other}");
                Vec::new()
            }
        };

        Self {
            source_url,
            sections,
        }
    }

    /// The source URL, unless it is blank or a section already embeds media.
    pub fn embeddable_url(&self) -> Option<&str> {
        let url = self.source_url.as_deref().map(str::trim)?;
        if url.is_empty() || self.sections.iter().any(ReportSection::is_media) {
            return None;
        }
        Some(url)
    }
}

/// Fixed heading text placed around imported sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub title: String,
    pub summary_heading: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            summary_heading: DEFAULT_SUMMARY_HEADING.to_string(),
        }
    }
}

/// Turns an analysis report into a fresh document.
#[derive(Debug, Clone, Default)]
pub struct AnalysisImporter {
    options: ImportOptions,
}

impl AnalysisImporter {
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Title, optional media embed, summary heading, then every section's
    /// parsed blocks in order.
    pub fn blocks_for(&self, report: &AnalysisReport) -> Vec<NewBlock> {
        let mut blocks = vec![NewBlock::new(
            BlockType::Heading1,
            RichText::plain(self.options.title.as_str()),
        )];
        if let Some(url) = report.embeddable_url() {
            blocks.push(NewBlock::new(BlockType::MediaEmbed, RichText::plain(url)));
        }
        blocks.push(NewBlock::new(
            BlockType::Heading2,
            RichText::plain(self.options.summary_heading.as_str()),
        ));
        for section in &report.sections {
            blocks.extend(parse_blocks(&section.content));
        }
        blocks
    }

    /// Replace the store's whole sequence with the imported blocks.
    pub fn import(&self, report: &AnalysisReport, store: &mut BlockStore) -> Patch {
        let blocks = self.blocks_for(report);
        log::debug!(
            "importing {} sections as {} blocks",
            report.sections.len(),
            blocks.len()
        );
        store.replace_all(blocks)
    }
}
