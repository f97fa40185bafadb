#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Quote summary rendering.
//!
//! [`render`] projects a [`QuoteState`] and its [`PricingResult`] into a
//! [`DocumentModel`], showing only the sections the state's visibility
//! flags enable. Rendering is deterministic: the same inputs always
//! serialize to the same bytes.

pub mod document;
pub mod export;

use std::collections::BTreeMap;
use std::fmt::Write as _;

use charter_quote_models::money::{format_brl, format_decimal_br};
use charter_quote_models::{AdjustmentKind, PricingResult, QuoteState};
use charter_quote_pricing::PricingError;
use serde::Serialize;

pub use document::{
    Block, Cell, DocumentModel, Margins, PAGE_MARGINS, PAGE_SIZE, StackBlock, Style, Table,
    TableBlock, TextBlock,
};
pub use export::{
    DocumentExporter, ExportError, ExportOutcome, JsonFileExporter, error_document, export,
};

/// Document title.
pub const TITLE: &str = "Charter Flight Quote";

const ROW_SPACING: Margins = [0, 0, 0, 5];
const SECTION_SPACING: Margins = [0, 0, 0, 15];

fn styles() -> BTreeMap<String, Style> {
    BTreeMap::from([
        (
            "header".to_string(),
            Style {
                font_size: Some(18.0),
                bold: Some(true),
                alignment: Some("center".to_string()),
                ..Style::default()
            },
        ),
        (
            "subheader".to_string(),
            Style {
                font_size: Some(14.0),
                bold: Some(true),
                ..Style::default()
            },
        ),
        (
            "tableHeaderBold".to_string(),
            Style {
                bold: Some(true),
                ..Style::default()
            },
        ),
    ])
}

fn default_style() -> Style {
    Style {
        font_size: Some(10.0),
        line_height: Some(1.2),
        ..Style::default()
    }
}

fn row(text: String) -> Block {
    TextBlock::new(text).margin(ROW_SPACING).into()
}

fn route_line(state: &QuoteState) -> String {
    state.route_codes().join(" → ")
}

fn header_section(state: &QuoteState) -> Option<Block> {
    let visibility = &state.visibility;
    let mut rows = Vec::new();

    if visibility.route {
        rows.push(row(format!("Route: {}", route_line(state))));
    }
    if visibility.aircraft {
        rows.push(row(format!("Aircraft: {}", state.aircraft)));
    }
    if visibility.dates {
        rows.push(row(format!("Outbound date: {}", state.outbound_date)));
        rows.push(row(format!("Return date: {}", state.return_date)));
    }

    (!rows.is_empty()).then(|| {
        StackBlock {
            stack: rows,
            margin: Some(SECTION_SPACING),
        }
        .into()
    })
}

fn flight_section(state: &QuoteState, pricing: &PricingResult) -> Option<Block> {
    let visibility = &state.visibility;
    let mut rows = Vec::new();

    if visibility.distance {
        rows.push(row(format!(
            "Distance: {} NM ({} km)",
            format_decimal_br(state.distance_nm.value(), 2),
            format_decimal_br(pricing.distance_km, 1)
        )));
    }
    if visibility.tariff {
        rows.push(row(format!(
            "Tariff per km: {}",
            format_brl(state.tariff_per_km.value())
        )));
    }

    (!rows.is_empty()).then(|| {
        StackBlock {
            stack: rows,
            margin: Some(SECTION_SPACING),
        }
        .into()
    })
}

fn pricing_table(state: &QuoteState, pricing: &PricingResult) -> Block {
    let pair = |label: String, value: f64| vec![Cell::Plain(label), Cell::Plain(format_brl(value))];

    let mut body = vec![
        vec![
            Cell::Plain("Description".to_string()),
            Cell::Plain("Value".to_string()),
        ],
        pair("Subtotal".to_string(), pricing.subtotal),
    ];

    let adjustment = pricing.signed_adjustment.abs();
    if state.visibility.adjustment && adjustment > 0.0 {
        let label = match state.adjustment.kind {
            AdjustmentKind::Add => "Other expenses",
            AdjustmentKind::Subtract => "Discount",
        };
        body.push(pair(label.to_string(), adjustment));
    }

    if state.visibility.commission {
        for (i, line) in pricing.commission_breakdown.iter().enumerate() {
            body.push(pair(format!("Commission {}", i + 1), line.amount));
        }
        if pricing.commission_component_amount > 0.0 {
            body.push(pair(
                "Commission".to_string(),
                pricing.commission_component_amount,
            ));
        }
    }

    body.push(vec![
        Cell::Styled(TextBlock::new("Total").style("tableHeaderBold")),
        Cell::Styled(TextBlock::new(format_brl(pricing.total)).style("tableHeaderBold")),
    ]);

    TableBlock {
        table: Table {
            widths: vec!["*".to_string(), "auto".to_string()],
            body,
        },
        layout: Some("lightHorizontalLines".to_string()),
        margin: Some(SECTION_SPACING),
    }
    .into()
}

fn titled_text(content: &mut Vec<Block>, title: &str, text: &str) {
    content.push(TextBlock::new(title).style("subheader").margin([0, 10, 0, 5]).into());
    content.push(TextBlock::new(text).margin([0, 0, 0, 10]).into());
}

/// Renders the quote document.
///
/// Sections, in order: title; route, aircraft and dates; distance and
/// tariff; the pricing table (subtotal, adjustment, commission lines,
/// total); notes; payment details. Each section except the title and the
/// table is gated by its visibility flag, and notes and payment are also
/// skipped when empty.
#[must_use]
pub fn render(state: &QuoteState, pricing: &PricingResult) -> DocumentModel {
    let mut content: Vec<Block> = vec![TextBlock::new(TITLE)
        .style("header")
        .margin([0, 0, 0, 20])
        .into()];

    content.extend(header_section(state));
    content.extend(flight_section(state, pricing));
    content.push(pricing_table(state, pricing));

    if state.visibility.notes && !state.notes.trim().is_empty() {
        titled_text(&mut content, "Notes:", &state.notes);
    }
    if state.visibility.payment && !state.payment.trim().is_empty() {
        titled_text(&mut content, "Payment details:", &state.payment);
    }

    DocumentModel {
        content,
        page_size: Some(PAGE_SIZE.to_string()),
        page_margins: Some(PAGE_MARGINS),
        styles: styles(),
        default_style: Some(default_style()),
    }
}

/// Whether `document` would print anything.
#[must_use]
pub fn is_meaningful(document: &DocumentModel) -> bool {
    document.content.iter().any(Block::is_meaningful)
}

#[derive(Serialize)]
struct FallbackEcho<'a> {
    aircraft: &'a str,
    nm: f64,
    origin: &'a str,
    destination: &'a str,
}

/// Minimal document used when the full layout comes out empty.
///
/// Echoes the aircraft, distance and endpoints as JSON so the user still
/// sees what was entered.
#[must_use]
pub fn fallback(state: &QuoteState) -> DocumentModel {
    let echo = FallbackEcho {
        aircraft: &state.aircraft,
        nm: state.distance_nm.value(),
        origin: &state.origin,
        destination: &state.destination,
    };

    DocumentModel {
        content: vec![
            TextBlock::new("Quote")
                .font_size(16.0)
                .bold()
                .margin([0, 0, 0, 12])
                .into(),
            TextBlock::new(
                "The full document layout could not be built. This is an automatic fallback.",
            )
            .font_size(9.0)
            .color("red")
            .margin([0, 0, 0, 12])
            .into(),
            TextBlock::new(serde_json::to_string_pretty(&echo).unwrap_or_default())
                .font_size(8.0)
                .into(),
        ],
        page_size: Some(PAGE_SIZE.to_string()),
        page_margins: Some(PAGE_MARGINS),
        ..DocumentModel::default()
    }
}

/// Returns `document` if it is meaningful, else [`fallback`] for `state`.
#[must_use]
pub fn or_fallback(document: DocumentModel, state: &QuoteState) -> DocumentModel {
    if is_meaningful(&document) {
        return document;
    }
    log::warn!("Rendered document is empty; using fallback for {state:?}");
    fallback(state)
}

/// [`render`] followed by [`or_fallback`].
#[must_use]
pub fn render_or_fallback(state: &QuoteState, pricing: &PricingResult) -> DocumentModel {
    or_fallback(render(state, pricing), state)
}

/// Inline message shown instead of a summary when pricing cannot run.
#[must_use]
pub fn advisory(error: &PricingError) -> String {
    match error {
        PricingError::MissingTariff => {
            "Select an aircraft or enter the tariff per km.".to_string()
        }
        PricingError::MissingDistance => {
            "Enter the distance (NM or km) or fill in the airports to calculate it automatically."
                .to_string()
        }
    }
}

/// Renders a document as plain text for terminal display.
///
/// Tables become two aligned columns; styling is dropped.
#[must_use]
pub fn to_plain_text(document: &DocumentModel) -> String {
    let mut out = String::new();
    for block in &document.content {
        write_block(&mut out, block);
    }
    out
}

fn write_block(out: &mut String, block: &Block) {
    match block {
        Block::Text(text) => {
            if !text.text.is_empty() {
                out.push_str(&text.text);
                out.push('\n');
            }
        }
        Block::Stack(stack) => {
            for child in &stack.stack {
                write_block(out, child);
            }
            out.push('\n');
        }
        Block::Table(table) => {
            let width = table
                .table
                .body
                .iter()
                .filter_map(|row| row.first())
                .map(|cell| cell.text().chars().count())
                .max()
                .unwrap_or(0);

            for row in &table.table.body {
                let mut cells = row.iter();
                let Some(first) = cells.next() else {
                    continue;
                };
                let rest: Vec<&str> = cells.map(Cell::text).collect();
                if rest.is_empty() {
                    let _ = writeln!(out, "{}", first.text());
                } else {
                    let _ = writeln!(out, "{:<width$}  {}", first.text(), rest.join("  "));
                }
            }
            out.push('\n');
        }
    }
}
