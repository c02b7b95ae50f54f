//! CLI subcommand implementations for the rackspec binary.

pub mod delete_cmd;
pub mod doctor;
pub mod export_cmd;
pub mod fetch_cmd;
pub mod list_cmd;
pub mod output;
pub mod show_cmd;
