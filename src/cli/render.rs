//! Text views of records and history.
use super::ui;
use crate::core::movie::{MovieRecord, display_or_na};
use comfy_table::Cell;

/// Full detail view of one record.
pub fn record_details(record: &MovieRecord) -> String {
    let label = |text: &str| ui::style_text(text, ui::StyleType::Label);
    let mut out = format!("{}\n", ui::style_text(&record.title, ui::StyleType::Title));

    if let Some(poster) = &record.poster_url {
        out.push_str(&format!(
            "{}\n",
            ui::style_text(&format!("Poster: {poster}"), ui::StyleType::Subtle)
        ));
    }
    out.push_str(&format!(
        "{} {}\n",
        label("Director:"),
        display_or_na(record.director.as_deref())
    ));

    out.push_str(&format!("{}\n", label("Actors:")));
    for actor in &record.actors {
        out.push_str(&format!("  - {actor}\n"));
    }

    out.push_str(&format!(
        "{} {}\n",
        label("Release Date:"),
        display_or_na(record.release_date.as_deref())
    ));
    out.push_str(&format!(
        "{} {}",
        label("IMDb Rating:"),
        display_or_na(record.imdb_rating.as_deref())
    ));
    if let Some(rating) = record.rating_value() {
        out.push_str(&format!(" {}", ui::rating_bar(rating)));
    }
    out.push('\n');
    out.push_str(&format!(
        "{} {}\n",
        label("Box Office (INR):"),
        record.box_office
    ));
    out.push_str(&format!("{} {}\n", label("Hit Status:"), record.hit_status));
    out.push_str(&format!(
        "{}\n{}\n",
        label("About this movie:"),
        record.plot.as_deref().unwrap_or("No plot available")
    ));
    out
}

/// Numbered list of recent searches. `offset` is the history position of the first entry.
pub fn recent_list(records: &[MovieRecord], offset: usize) -> String {
    if records.is_empty() {
        return ui::style_text("No searches yet.", ui::StyleType::Subtle);
    }
    let mut out = format!("{}\n", ui::style_text("Recent Searches", ui::StyleType::Title));
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", offset + i + 1, record.title));
    }
    out
}

/// Summary table of the full history with the best IMDb rating highlighted.
pub fn summary_table(records: &[MovieRecord]) -> String {
    let best = records
        .iter()
        .filter_map(MovieRecord::rating_value)
        .fold(None, |acc: Option<f64>, r| Some(acc.map_or(r, |a| a.max(r))));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Title"),
        ui::header_cell("Director"),
        ui::header_cell("Release Date"),
        ui::header_cell("IMDb Rating"),
        ui::header_cell("Box Office (INR)"),
        ui::header_cell("Hit Status"),
    ]);

    for (i, record) in records.iter().enumerate() {
        let is_best = record.rating_value().is_some() && record.rating_value() == best;
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&record.title),
            ui::optional_cell(record.director.as_deref()),
            ui::optional_cell(record.release_date.as_deref()),
            ui::numeric_cell(display_or_na(record.imdb_rating.as_deref()), is_best),
            ui::numeric_cell(&record.box_office.to_string(), false),
            Cell::new(record.hit_status),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Movie Summary", ui::StyleType::Title),
        table
    )
}
