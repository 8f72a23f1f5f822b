// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to turn one command line into one
// operation against a Notion database.
//
// Module responsibilities:
// - `config`: Reads the bearer token, database ID and endpoint settings
//   from the environment into an explicit `Config` value.
// - `model`: Typed request and response shapes for the Notion page and
//   database-query endpoints.
// - `api`: Encapsulates HTTP interactions (create, list, update, archive).
// - `cli`: Argument parsing and the per-command handlers that print results.
pub mod api;
pub mod cli;
pub mod config;
pub mod model;
