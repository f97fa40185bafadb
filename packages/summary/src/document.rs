//! Printable document description.
//!
//! Serializes to the JSON document-definition format understood by
//! pdfmake-style renderers: a `content` array of blocks plus page setup and
//! named styles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Page margins as `[left, top, right, bottom]` points.
pub type Margins = [u16; 4];

/// Page margins used for every quote document.
pub const PAGE_MARGINS: Margins = [40, 60, 40, 60];

/// Page size used for every quote document.
pub const PAGE_SIZE: &str = "A4";

/// A complete document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    /// Top-level blocks in reading order.
    pub content: Vec<Block>,
    /// Paper size, e.g. `"A4"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<String>,
    /// Page margins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_margins: Option<Margins>,
    /// Named styles referenced by blocks.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, Style>,
    /// Style applied to everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_style: Option<Style>,
}

/// Text formatting, either named in [`DocumentModel::styles`] or inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Font size in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Bold weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// `left`, `center` or `right`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    /// Line height multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    /// Text colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Block {
    /// Vertical group of blocks.
    Stack(StackBlock),
    /// Table.
    Table(TableBlock),
    /// Paragraph.
    Text(TextBlock),
}

/// A paragraph of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    /// The text.
    pub text: String,
    /// Named style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Outer margin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margins>,
    /// Inline formatting.
    #[serde(flatten)]
    pub format: Style,
}

impl TextBlock {
    /// Plain paragraph.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Applies a named style.
    #[must_use]
    pub fn style(mut self, name: &str) -> Self {
        self.style = Some(name.to_string());
        self
    }

    /// Sets the outer margin.
    #[must_use]
    pub const fn margin(mut self, margin: Margins) -> Self {
        self.margin = Some(margin);
        self
    }

    /// Sets an inline font size.
    #[must_use]
    pub const fn font_size(mut self, size: f64) -> Self {
        self.format.font_size = Some(size);
        self
    }

    /// Makes the text bold.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.format.bold = Some(true);
        self
    }

    /// Sets an inline colour.
    #[must_use]
    pub fn color(mut self, color: &str) -> Self {
        self.format.color = Some(color.to_string());
        self
    }
}

impl From<TextBlock> for Block {
    fn from(value: TextBlock) -> Self {
        Self::Text(value)
    }
}

/// A vertical group of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackBlock {
    /// Children in order.
    pub stack: Vec<Block>,
    /// Outer margin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margins>,
}

impl From<StackBlock> for Block {
    fn from(value: StackBlock) -> Self {
        Self::Stack(value)
    }
}

/// A table cell: bare text or a formatted paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Unformatted text.
    Plain(String),
    /// Formatted text.
    Styled(TextBlock),
}

impl Cell {
    /// The cell's text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Styled(block) => &block.text,
        }
    }
}

/// Column widths and rows of a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// `"*"` (fill) or `"auto"` per column.
    pub widths: Vec<String>,
    /// Rows, header first.
    pub body: Vec<Vec<Cell>>,
}

/// A table with its layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    /// The table.
    pub table: Table,
    /// Named rule layout, e.g. `lightHorizontalLines`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    /// Outer margin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margins>,
}

impl From<TableBlock> for Block {
    fn from(value: TableBlock) -> Self {
        Self::Table(value)
    }
}

impl Block {
    /// Whether the block would print anything: non-blank text, or a stack
    /// or table containing something.
    #[must_use]
    pub fn is_meaningful(&self) -> bool {
        match self {
            Self::Text(block) => !block.text.trim().is_empty(),
            Self::Stack(block) => block.stack.iter().any(Self::is_meaningful),
            Self::Table(block) => block
                .table
                .body
                .iter()
                .flatten()
                .any(|c| !c.text().trim().is_empty()),
        }
    }
}
