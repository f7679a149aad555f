//! PDF rendering for test designs
//!
//! Produces an A4 document with the user story, the acceptance criteria,
//! design notes, traceability, a test case summary and one step table per
//! case. Text uses the standard Helvetica faces with WinAnsi encoding, so no
//! font files are embedded. Tables wrap cell text, shade alternate rows,
//! move whole rows to the next page when they do not fit, and repeat their
//! header row after every page break.
//!
//! Every section is always present; empty input renders as an em-dash.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::ops::Range;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::types::{TestCase, TestDesign};

/// Placeholder for anything empty
pub const PLACEHOLDER: &str = "—";

/// Title fallback when the design has no source id
pub const DEFAULT_SOURCE_LABEL: &str = "User Story";

const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN_LEFT: f32 = 36.0;
const MARGIN_RIGHT: f32 = 36.0;
const MARGIN_TOP: f32 = 40.0;
const MARGIN_BOTTOM: f32 = 36.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
const TOP: f32 = PAGE_HEIGHT - MARGIN_TOP;

const CELL_PAD_X: f32 = 6.0;
const CELL_PAD_Y: f32 = 4.0;
const GRID_WIDTH: f32 = 0.3;
const BULLET_INDENT: f32 = 18.0;
/// Room reserved below a heading so it is not stranded at a page bottom.
const KEEP_WITH_NEXT: f32 = 40.0;

// ============================================================================
// Fonts and text measurement
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

/// Helvetica advance widths for bytes 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for bytes 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    fn byte_width(self, byte: u8) -> u16 {
        let bold = self == Font::Bold;
        match byte {
            32..=126 => {
                let table = if bold { &HELVETICA_BOLD_WIDTHS } else { &HELVETICA_WIDTHS };
                table[(byte - 32) as usize]
            }
            0x85 | 0x97 => 1000,
            0x95 => 350,
            0x91 | 0x92 => if bold { 278 } else { 222 },
            0x93 | 0x94 => if bold { 500 } else { 333 },
            _ => 556,
        }
    }
}

/// Encode text for a WinAnsi font. Characters outside the encoding become
/// `?`, except a few common arrows which are spelled out.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let byte = match ch {
            '\t' => b' ',
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            '→' => {
                out.extend_from_slice(b"->");
                continue;
            }
            '←' => {
                out.extend_from_slice(b"<-");
                continue;
            }
            _ => b'?',
        };
        out.push(byte);
    }
    out
}

fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|b| u32::from(font.byte_width(b)))
        .sum();
    units as f32 * size / 1000.0
}

/// Greedy word wrap. Explicit newlines start new lines; words wider than
/// the line are broken between characters. Always returns at least one
/// line.
fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let fits = |s: &str| text_width(s, font, size) <= max_width;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if fits(word) {
                current = word.to_string();
                continue;
            }
            for ch in word.chars() {
                let mut next = current.clone();
                next.push(ch);
                if !current.is_empty() && !fits(&next) {
                    lines.push(std::mem::replace(&mut current, ch.to_string()));
                } else {
                    current = next;
                }
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// ============================================================================
// Styles
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Rgb(f32, f32, f32);

impl Rgb {
    fn operands(self) -> Vec<Object> {
        vec![self.0.into(), self.1.into(), self.2.into()]
    }
}

const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);
const GREY: Rgb = Rgb(0.5, 0.5, 0.5);
/// #9fd2ff
const HEADER_FILL: Rgb = Rgb(0.624, 0.824, 1.0);
/// whitesmoke, #eef7ff
const ROW_FILLS: [Rgb; 2] = [Rgb(0.961, 0.961, 0.961), Rgb(0.933, 0.969, 1.0)];

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    font: Font,
    size: f32,
    leading: f32,
}

const TITLE: TextStyle = TextStyle { font: Font::Bold, size: 20.0, leading: 26.0 };
const HEADING: TextStyle = TextStyle { font: Font::Bold, size: 14.0, leading: 18.0 };
const SUBHEADING: TextStyle = TextStyle { font: Font::Bold, size: 12.0, leading: 16.0 };
const BODY: TextStyle = TextStyle { font: Font::Regular, size: 11.0, leading: 14.0 };
const CELL: TextStyle = TextStyle { font: Font::Regular, size: 9.0, leading: 12.0 };
const CELL_HEADER: TextStyle = TextStyle { font: Font::Bold, size: 9.0, leading: 12.0 };
const FOOTER: TextStyle = TextStyle { font: Font::Regular, size: 8.0, leading: 10.0 };

// ============================================================================
// Layout
// ============================================================================

/// A table: fixed column widths, one header row, any number of body rows.
struct Table {
    widths: Vec<f32>,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(widths: &[f32], header: &[&str]) -> Self {
        Self {
            widths: widths.to_vec(),
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn row(mut self, cells: Vec<String>) -> Self {
        self.rows.push(cells);
        self
    }
}

/// Wrapped cell lines of one table row.
type WrappedRow = Vec<Vec<String>>;

/// Page-by-page content stream builder with a vertical cursor.
struct Layout {
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            y: TOP,
        }
    }

    fn remaining(&self) -> f32 {
        self.y - MARGIN_BOTTOM
    }

    fn at_page_top(&self) -> bool {
        TOP - self.y < 0.5
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.ops));
        self.y = TOP;
    }

    /// Break the page unless `height` fits below the cursor.
    fn ensure(&mut self, height: f32) {
        if height > self.remaining() && !self.at_page_top() {
            self.new_page();
        }
    }

    fn space(&mut self, height: f32) {
        if height >= self.remaining() {
            self.new_page();
        } else {
            self.y -= height;
        }
    }

    fn draw_text(&mut self, x: f32, baseline: f32, text: &str, style: TextStyle, color: Rgb) {
        if text.is_empty() {
            return;
        }
        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("rg", color.operands()),
            Operation::new("Tf", vec![style.font.resource_name().into(), style.size.into()]),
            Operation::new("Td", vec![x.into(), baseline.into()]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.ops.extend([
            Operation::new("q", vec![]),
            Operation::new("rg", color.operands()),
            Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.ops.extend([
            Operation::new("q", vec![]),
            Operation::new("RG", color.operands()),
            Operation::new("w", vec![GRID_WIDTH.into()]),
            Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn lines_at(&mut self, x: f32, width: f32, text: &str, style: TextStyle) {
        for line in wrap_text(text, style.font, style.size, width) {
            self.ensure(style.leading);
            let baseline = self.y - style.size;
            self.draw_text(x, baseline, &line, style, BLACK);
            self.y -= style.leading;
        }
    }

    fn paragraph(&mut self, text: &str, style: TextStyle) {
        self.lines_at(MARGIN_LEFT, CONTENT_WIDTH, text, style);
    }

    fn heading(&mut self, text: &str, style: TextStyle) {
        self.ensure(style.leading + KEEP_WITH_NEXT);
        self.paragraph(text, style);
    }

    fn bullets(&mut self, items: &[String], style: TextStyle) {
        for item in items {
            self.ensure(style.leading);
            let baseline = self.y - style.size;
            self.draw_text(MARGIN_LEFT + 6.0, baseline, "•", style, BLACK);
            self.lines_at(
                MARGIN_LEFT + BULLET_INDENT,
                CONTENT_WIDTH - BULLET_INDENT,
                item,
                style,
            );
        }
    }

    fn wrap_row(cells: &[String], widths: &[f32], style: TextStyle) -> WrappedRow {
        widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let text = cells.get(i).map(String::as_str).unwrap_or_default();
                wrap_text(text, style.font, style.size, w - 2.0 * CELL_PAD_X)
            })
            .collect()
    }

    fn row_lines(row: &WrappedRow) -> usize {
        row.iter().map(Vec::len).max().unwrap_or(1).max(1)
    }

    fn row_height(lines: usize, style: TextStyle) -> f32 {
        lines as f32 * style.leading + 2.0 * CELL_PAD_Y
    }

    /// How many body lines of a row fit above the bottom margin.
    fn lines_that_fit(&self, style: TextStyle) -> usize {
        let room = self.remaining() - 2.0 * CELL_PAD_Y;
        if room <= 0.0 {
            0
        } else {
            (room / style.leading).floor() as usize
        }
    }

    fn draw_row(
        &mut self,
        row: &WrappedRow,
        widths: &[f32],
        lines: Range<usize>,
        style: TextStyle,
        fill: Rgb,
        text_color: Rgb,
    ) {
        let height = Self::row_height(lines.len(), style);
        let top = self.y;
        let bottom = top - height;

        let mut x = MARGIN_LEFT;
        for w in widths {
            self.fill_rect(x, bottom, *w, height, fill);
            x += w;
        }
        let mut x = MARGIN_LEFT;
        for w in widths {
            self.stroke_rect(x, bottom, *w, height, GREY);
            x += w;
        }

        let mut x = MARGIN_LEFT;
        for (cell, w) in row.iter().zip(widths) {
            let visible = cell.iter().skip(lines.start).take(lines.len());
            for (k, line) in visible.enumerate() {
                let baseline = top - CELL_PAD_Y - style.size - k as f32 * style.leading;
                self.draw_text(x + CELL_PAD_X, baseline, line, style, text_color);
            }
            x += w;
        }

        self.y = bottom;
    }

    fn table(&mut self, table: &Table) {
        let header = Self::wrap_row(&table.header, &table.widths, CELL_HEADER);
        let header_lines = Self::row_lines(&header);
        let draw_header = |layout: &mut Layout| {
            layout.draw_row(
                &header,
                &table.widths,
                0..header_lines,
                CELL_HEADER,
                HEADER_FILL,
                WHITE,
            );
        };

        let bodies: Vec<WrappedRow> = table
            .rows
            .iter()
            .map(|r| Self::wrap_row(r, &table.widths, CELL))
            .collect();

        // Keep the header with the start of the first row.
        let first = bodies
            .first()
            .map(|r| Self::row_height(Self::row_lines(r).min(3), CELL))
            .unwrap_or(0.0);
        self.ensure(Self::row_height(header_lines, CELL_HEADER) + first);
        draw_header(self);

        let mut rows_on_page = 0usize;
        for (i, row) in bodies.iter().enumerate() {
            let fill = ROW_FILLS[i % ROW_FILLS.len()];
            let total = Self::row_lines(row);
            let mut start = 0;
            let mut fresh_page = false;

            while start < total {
                let mut fits = self.lines_that_fit(CELL);
                if fresh_page {
                    fits = fits.max(1);
                }
                let rest = total - start;

                if rest <= fits {
                    self.draw_row(row, &table.widths, start..total, CELL, fill, BLACK);
                    start = total;
                } else if rows_on_page == 0 && fits > 0 {
                    // Taller than a page: split inside the row.
                    self.draw_row(row, &table.widths, start..start + fits, CELL, fill, BLACK);
                    start += fits;
                    self.new_page();
                    draw_header(self);
                    fresh_page = true;
                } else {
                    self.new_page();
                    draw_header(self);
                    rows_on_page = 0;
                    fresh_page = true;
                }
            }
            rows_on_page += 1;
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.new_page();
        }

        let total = self.pages.len();
        let mut pages = std::mem::take(&mut self.pages);
        for (i, page) in pages.iter_mut().enumerate() {
            let label = format!("Page {} of {}", i + 1, total);
            let x = PAGE_WIDTH - MARGIN_RIGHT - text_width(&label, FOOTER.font, FOOTER.size);
            self.draw_text(x, MARGIN_BOTTOM / 2.0, &label, FOOTER, GREY);
            page.append(&mut self.ops);
        }
        pages
    }
}

// ============================================================================
// Document sections
// ============================================================================

fn or_placeholder(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

fn joined_or_placeholder(items: &[String], separator: &str) -> String {
    let items: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        items.join(separator)
    }
}

/// Document title for a design.
pub fn document_title(design: &TestDesign) -> String {
    format!(
        "Test Design for: {}",
        design.source_id().unwrap_or(DEFAULT_SOURCE_LABEL)
    )
}

fn case_heading(tc: &TestCase) -> String {
    format!("{} {} {}", or_placeholder(&tc.id), PLACEHOLDER, or_placeholder(&tc.title))
}

fn design_table(design: &TestDesign) -> Table {
    let notes = design.design.clone().unwrap_or_default();
    Table::new(&[150.0, 350.0], &["Section", "Items"])
        .row(vec![
            "Equivalence classes".to_string(),
            joined_or_placeholder(&notes.equivalence_classes, "\n"),
        ])
        .row(vec![
            "Boundary values".to_string(),
            joined_or_placeholder(&notes.boundary_values, "\n"),
        ])
        .row(vec![
            "Negative cases".to_string(),
            joined_or_placeholder(&notes.negative_cases, "\n"),
        ])
}

fn traceability_table(design: &TestDesign) -> Table {
    let mut table = Table::new(&[300.0, 200.0], &["Acceptance Criterion", "Covered By (TC IDs)"]);
    let entries = design.traceability.as_deref().unwrap_or_default();
    for entry in entries {
        table = table.row(vec![
            or_placeholder(&entry.criterion),
            joined_or_placeholder(&entry.covered_by, ", "),
        ]);
    }
    if table.rows.is_empty() {
        table = table.row(vec![PLACEHOLDER.to_string(), PLACEHOLDER.to_string()]);
    }
    table
}

fn summary_table(cases: &[TestCase]) -> Table {
    let mut table = Table::new(&[50.0, 300.0, 70.0, 70.0], &["ID", "Title", "Priority", "Type"]);
    for tc in cases {
        table = table.row(vec![
            or_placeholder(&tc.id),
            or_placeholder(&tc.title),
            or_placeholder(&tc.priority),
            or_placeholder(&tc.case_type),
        ]);
    }
    if table.rows.is_empty() {
        table = table.row(vec![PLACEHOLDER.to_string(); 4]);
    }
    table
}

fn steps_table(tc: &TestCase) -> Table {
    let mut table = Table::new(&[35.0, 230.0, 255.0], &["Step", "Action", "Expected Result"]);
    for (i, step) in tc.steps.iter().enumerate() {
        table = table.row(vec![
            (i + 1).to_string(),
            or_placeholder(&step.action),
            or_placeholder(&step.expected),
        ]);
    }
    if table.rows.is_empty() {
        table = table.row(vec![PLACEHOLDER.to_string(); 3]);
    }
    table
}

fn lay_out(story: &str, criteria: &[String], design: &TestDesign) -> Vec<Vec<Operation>> {
    let mut layout = Layout::new();

    layout.paragraph(&document_title(design), TITLE);
    layout.space(10.0);

    layout.heading("User Story", HEADING);
    layout.paragraph(&or_placeholder(story), BODY);
    layout.space(8.0);

    layout.heading("Acceptance Criteria", HEADING);
    let criteria: Vec<String> = criteria
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if criteria.is_empty() {
        layout.paragraph(PLACEHOLDER, BODY);
    } else {
        layout.bullets(&criteria, BODY);
    }
    layout.space(12.0);

    layout.heading("Test Design Notes", HEADING);
    layout.table(&design_table(design));
    layout.space(14.0);

    layout.heading("Traceability", HEADING);
    layout.table(&traceability_table(design));
    layout.space(16.0);

    layout.heading("Test Case Summary", HEADING);
    layout.table(&summary_table(&design.test_cases));
    layout.space(10.0);

    for (i, tc) in design.test_cases.iter().enumerate() {
        if i > 0 {
            layout.space(8.0);
        }
        layout.heading(&case_heading(tc), SUBHEADING);
        layout.table(&steps_table(tc));
    }

    layout.finish()
}

// ============================================================================
// PDF assembly
// ============================================================================

fn assemble(pages: Vec<Vec<Operation>>, title: &str) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Font::Regular.base_font(),
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Font::Bold.base_font(),
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource_name() => regular_id,
            Font::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(title)),
        "Producer" => Object::string_literal(format!("storycase {}", crate::VERSION)),
        "CreationDate" => Object::string_literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}

/// Render a design, together with the raw story and acceptance criteria,
/// into PDF bytes.
pub fn render_pdf(story: &str, criteria: &[String], design: &TestDesign) -> Result<Vec<u8>> {
    let pages = lay_out(story, criteria, design);
    debug!(
        "rendering {} test cases onto {} pages",
        design.test_cases.len(),
        pages.len()
    );
    assemble(pages, &document_title(design))
}

/// Render to a file.
pub fn write_pdf(
    path: &Path,
    story: &str,
    criteria: &[String],
    design: &TestDesign,
) -> Result<()> {
    let bytes = render_pdf(story, criteria, design)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
