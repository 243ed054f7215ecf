use super::columns;
use crate::core::movie::{MovieRecord, NOT_AVAILABLE, display_or_na};
use anyhow::{Context, Result};

const HEADER: [&str; 9] = [
    columns::TITLE,
    columns::DIRECTOR,
    columns::ACTORS,
    columns::RELEASE_DATE,
    columns::IMDB_RATING,
    columns::BOX_OFFICE,
    columns::HIT_STATUS,
    columns::POSTER,
    columns::PLOT,
];

/// Writes a header row plus one UTF-8 row per record.
pub fn to_csv(records: &[MovieRecord]) -> Result<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .context("Failed to write CSV header")?;

    for record in records {
        let actors = if record.actors.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            record.actors.join(", ")
        };
        writer
            .write_record([
                record.title.as_str(),
                display_or_na(record.director.as_deref()),
                actors.as_str(),
                display_or_na(record.release_date.as_deref()),
                display_or_na(record.imdb_rating.as_deref()),
                record.box_office.to_string().as_str(),
                record.hit_status.to_string().as_str(),
                display_or_na(record.poster_url.as_deref()),
                display_or_na(record.plot.as_deref()),
            ])
            .with_context(|| format!("Failed to write CSV row for {}", record.title))?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))
}
