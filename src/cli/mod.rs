//! Terminal front end

pub mod export;
pub mod lookup;
pub mod render;
pub mod setup;
pub mod shell;
pub mod ui;
