use super::{export, render, ui};
use crate::core::Session;
use crate::export::ExportFormat;
use anyhow::Result;
use std::path::Path;

/// One-shot lookups: prints each result, then writes any requested exports.
pub async fn run(
    session: &mut Session,
    titles: &[String],
    csv_path: Option<&Path>,
    pdf_path: Option<&Path>,
) -> Result<()> {
    if session.current_rate().await.is_none() {
        println!(
            "{}",
            ui::style_text("Live USD to INR rate unavailable.", ui::StyleType::Warning)
        );
    }

    for title in titles {
        let spinner = ui::new_spinner(&format!("Fetching {title}..."));
        let result = session.search(title).await;
        spinner.finish_and_clear();

        match result {
            Ok(record) => println!("{}", render::record_details(record)),
            Err(e) => println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error)),
        }
    }

    if session.history().len() > 1 {
        println!("{}", render::summary_table(session.history().all()));
    }

    let exports = [(ExportFormat::Csv, csv_path), (ExportFormat::Pdf, pdf_path)];
    for (format, path) in exports {
        let Some(path) = path else { continue };
        if session.history().is_empty() {
            println!(
                "{}",
                ui::style_text(
                    &format!("Nothing to export to {}.", path.display()),
                    ui::StyleType::Subtle
                )
            );
            continue;
        }
        let written = export::save(session, format, Some(path)).await?;
        println!(
            "{}",
            ui::style_text(
                &format!("Saved {} to {}", format, written.display()),
                ui::StyleType::Success
            )
        );
    }

    Ok(())
}
