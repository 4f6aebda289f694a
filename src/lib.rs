//! # hackstories
//!
//! Search Hacker News stories from the terminal.
//!
//! ## Architecture
//!
//! ```text
//! input → SearchSession ─(SearchRequest)→ SearchClient ─(SearchCompletion)→ SearchSession → UI
//!                 │
//!                 └→ PreferenceStore (last search term)
//! ```
//!
//! The session decides when a request is issued (see
//! [`TriggerPolicy`](domain::TriggerPolicy)), the client runs it on a spawned
//! task, and only the completion of the most recent request is applied to the
//! story list.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! hackstories tui
//!
//! # One-shot search, remembered as the last term
//! hackstories search rust
//!
//! # Show the remembered term
//! hackstories term
//! ```

/// Application context, error type and the search session.
///
/// [`SearchSession`](app::SearchSession) owns the search term, the story list
/// state machine and the request sequence.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI
/// - `search [query]` - Run one search and print the results
/// - `term` - Print the stored search term
pub mod cli;

/// Configuration loaded from `~/.config/hackstories/config.toml`:
/// search endpoint and trigger policy, colors, keybindings.
pub mod config;

/// Core domain models.
///
/// - [`Story`](domain::Story): one search hit
/// - [`SearchState`](domain::SearchState): the story list state machine
/// - [`TriggerPolicy`](domain::TriggerPolicy): when input issues a search
pub mod domain;

/// Story search over HTTP.
///
/// - [`SearchClient`](search::SearchClient): async trait for running a query
/// - [`HttpSearchClient`](search::HttpSearchClient): reqwest-based implementation
pub mod search;

/// SQLite-backed preference store.
pub mod store;

/// Terminal user interface.
///
/// A search field over a story table. Tab switches focus; in the list,
/// j/k navigate, d dismisses, o opens the story, q quits.
pub mod tui;
