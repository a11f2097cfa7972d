//! youth-programs: Browse youth programs and send an inquiry to the team.

pub mod assets;
pub mod catalog;
pub mod delivery;
pub mod form;
pub mod report;
pub mod rich_text;
pub mod tui;
pub mod types;
