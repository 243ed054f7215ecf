//! Paginated PDF report of the search history.
//!
//! Text is drawn with the built-in Helvetica faces, which only cover
//! Latin-1, so every string passes through [`pdf_safe`] first.
use super::columns;
use crate::core::movie::{MovieRecord, NOT_AVAILABLE, display_or_na};
use crate::core::poster::PosterFetcher;
use anyhow::{Result, anyhow};
use image::{DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};
use tracing::debug;

const DOCUMENT_TITLE: &str = "Bollywood Movie Info";
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const LINE_HEIGHT: f32 = 8.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;
const POSTER_WIDTH: f32 = 50.0;
const IMAGE_DPI: f32 = 300.0;
/// Helvetica at 11pt averages a little over 2mm per glyph across 190mm.
const WRAP_COLUMNS: usize = 90;
const REPLACEMENT: char = '?';

/// Fetches posters for every record, then lays out the document.
///
/// A poster that fails to download or decode is left out; the record's
/// text is still rendered.
pub async fn to_pdf(records: &[MovieRecord], posters: &dyn PosterFetcher) -> Result<Vec<u8>> {
    let mut images = Vec::with_capacity(records.len());
    for record in records {
        let image = match record.poster_url.as_deref() {
            Some(url) => match posters.fetch_poster(url).await {
                Ok(image) => Some(image),
                Err(e) => {
                    debug!(title = %record.title, error = %e, "Skipping poster");
                    None
                }
            },
            None => None,
        };
        images.push(image);
    }
    render(records, &images)
}

/// Lays out `records` alongside their already-fetched posters.
pub fn render(records: &[MovieRecord], posters: &[Option<DynamicImage>]) -> Result<Vec<u8>> {
    let mut writer = PdfWriter::new(DOCUMENT_TITLE)?;
    writer.heading(DOCUMENT_TITLE);
    writer.gap(5.0);

    for (index, record) in records.iter().enumerate() {
        if let Some(Some(poster)) = posters.get(index) {
            writer.image(poster);
            writer.gap(5.0);
        }

        for line in record_lines(record) {
            writer.line(&line);
        }
        writer.gap(5.0);
    }

    writer.finish()
}

/// Labeled text lines for one record, before wrapping and transliteration.
fn record_lines(record: &MovieRecord) -> Vec<String> {
    let field = |label: &str, value: &str| format!("{label}: {value}");

    let mut lines = vec![
        field(columns::TITLE, &record.title),
        field(columns::DIRECTOR, display_or_na(record.director.as_deref())),
    ];
    if record.actors.is_empty() {
        lines.push(field(columns::ACTORS, NOT_AVAILABLE));
    } else {
        lines.push(format!("{}:", columns::ACTORS));
        lines.extend(record.actors.iter().map(|actor| format!("- {actor}")));
    }
    lines.extend([
        field(
            columns::RELEASE_DATE,
            display_or_na(record.release_date.as_deref()),
        ),
        field(
            columns::IMDB_RATING,
            display_or_na(record.imdb_rating.as_deref()),
        ),
        field(columns::BOX_OFFICE, &record.box_office.to_string()),
        field(columns::HIT_STATUS, &record.hit_status.to_string()),
    ]);
    lines
}

/// Maps text onto Latin-1: the rupee sign becomes `Rs. `, anything else
/// outside the range becomes `?`.
pub fn pdf_safe(value: &str) -> String {
    value
        .replace('₹', "Rs. ")
        .chars()
        .map(|c| if (c as u32) <= 0xFF { c } else { REPLACEMENT })
        .collect()
}

/// Greedy word wrap on character count. Words longer than a line are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let word: String = word.into_iter().collect();
        let separator = usize::from(!current.is_empty());
        let needed = current.chars().count() + separator + word.chars().count();
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Top-down cursor over an A4 document, adding pages as content overflows.
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor: f32,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow!("Failed to load PDF font: {}", e))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| anyhow!("Failed to load PDF font: {}", e))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: PAGE_HEIGHT - MARGIN,
        })
    }

    fn ensure_space(&mut self, height: f32) {
        if self.cursor - height >= MARGIN {
            return;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    fn heading(&mut self, text: &str) {
        let text = pdf_safe(text);
        self.ensure_space(LINE_HEIGHT + 2.0);
        self.cursor -= LINE_HEIGHT + 2.0;
        // Centered using an average glyph width of half the point size
        let approx_width = text.chars().count() as f32 * HEADING_SIZE * 0.5 * 0.3528;
        let x = ((PAGE_WIDTH - approx_width) / 2.0).max(MARGIN);
        self.layer
            .use_text(text, HEADING_SIZE, Mm(x), Mm(self.cursor), &self.bold);
    }

    fn line(&mut self, text: &str) {
        for wrapped in wrap(&pdf_safe(text), WRAP_COLUMNS) {
            self.ensure_space(LINE_HEIGHT);
            self.cursor -= LINE_HEIGHT;
            self.layer.use_text(
                wrapped,
                BODY_SIZE,
                Mm(MARGIN),
                Mm(self.cursor + 2.0),
                &self.regular,
            );
        }
    }

    fn image(&mut self, poster: &DynamicImage) {
        let (width, height) = poster.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        let natural_width = width as f32 / IMAGE_DPI * 25.4;
        let scale = POSTER_WIDTH / natural_width;
        let height = height as f32 / IMAGE_DPI * 25.4 * scale;

        self.ensure_space(height);
        self.cursor -= height;

        let rgb = DynamicImage::ImageRgb8(poster.to_rgb8());
        Image::from_dynamic_image(&rgb).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN)),
                translate_y: Some(Mm(self.cursor)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );
    }

    fn gap(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| anyhow!("Failed to assemble PDF: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::movie::{BoxOffice, HitStatus};
    use image::RgbImage;

    fn record(title: &str, actors: usize) -> MovieRecord {
        MovieRecord {
            title: title.to_string(),
            director: Some("Sanjay Leela Bhansali".to_string()),
            actors: (0..actors).map(|i| format!("Actor {i}")).collect(),
            release_date: Some("25 Jan 2018".to_string()),
            imdb_rating: Some("7.0".to_string()),
            box_office: BoxOffice::Converted { inr: 500_000.0 },
            hit_status: HitStatus::Hit,
            poster_url: Some("https://example.com/poster.jpg".to_string()),
            plot: None,
        }
    }

    #[test]
    fn test_pdf_safe_replaces_rupee_and_unencodable() {
        assert_eq!(pdf_safe("₹1,079,000,000"), "Rs. 1,079,000,000");
        assert_eq!(pdf_safe("Café"), "Café");
        assert_eq!(pdf_safe("दंगल"), "????");
        assert_eq!(pdf_safe("plain"), "plain");
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
        assert!(wrap("abcdefghij", 4).iter().all(|l| l.chars().count() <= 4));
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_record_lines_bullet_actors() {
        let lines = record_lines(&record("Padmaavat", 2));
        assert_eq!(lines[1], "Director: Sanjay Leela Bhansali");
        assert_eq!(lines[2], "Actors:");
        assert_eq!(lines[3], "- Actor 0");
        assert_eq!(lines[4], "- Actor 1");
        assert_eq!(lines.last().unwrap(), "Hit Status: Hit");
    }

    #[test]
    fn test_record_lines_without_actors() {
        let mut tumbbad = record("Tumbbad", 0);
        tumbbad.director = None;

        let lines = record_lines(&tumbbad);
        assert_eq!(lines[1], "Director: N/A");
        assert_eq!(lines[2], "Actors: N/A");
        assert!(!lines.iter().any(|line| line.starts_with("- ")));
    }

    #[test]
    fn test_render_produces_pdf() {
        let records = vec![record("Padmaavat", 3), record("Tumbbad", 0)];
        let posters = vec![
            Some(DynamicImage::ImageRgb8(RgbImage::new(60, 90))),
            None,
        ];

        let bytes = render(&records, &posters).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_overflows_onto_new_pages() {
        let records: Vec<_> = (0..12).map(|i| record(&format!("Movie {i}"), 8)).collect();
        let posters: Vec<_> = records.iter().map(|_| None).collect();

        let bytes = render(&records, &posters).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_empty_history() {
        let bytes = render(&[], &[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
