//! Serializers for the search history.

pub mod csv;
pub mod pdf;

use anyhow::anyhow;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "movies.csv",
            ExportFormat::Pdf => "movies.pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ExportFormat::Csv => "CSV",
                ExportFormat::Pdf => "PDF",
            }
        )
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(anyhow!("Invalid export format: {} (expected csv or pdf)", s)),
        }
    }
}

/// Column labels shared by the exporters, in output order.
pub(crate) mod columns {
    pub const TITLE: &str = "Title";
    pub const DIRECTOR: &str = "Director";
    pub const ACTORS: &str = "Actors";
    pub const RELEASE_DATE: &str = "Release Date";
    pub const IMDB_RATING: &str = "IMDb Rating";
    pub const BOX_OFFICE: &str = "Box Office (INR)";
    pub const HIT_STATUS: &str = "Hit Status";
    pub const POSTER: &str = "Poster";
    pub const PLOT: &str = "Plot";
}
