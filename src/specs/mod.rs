// src/specs/mod.rs
//! # Captured-page parsers
//!
//! Each parser knows how to read **one kind of page** and nothing else:
//!
//! - `following` – the "Following" dialog of the target account → handles.
//! - `profile`   – one account's profile page → `ProfileRecord`
//!   (raw count text, biography, or the reason nothing could be read).
//!
//! Parsers work on HTML text that has already been captured; loading files,
//! persisting results and progress reporting live in `collect`. They never
//! fail: a page they cannot make sense of yields an empty list or a record
//! of `NO_ENCONTRADO` fields.
//!
//! Selectors are case-insensitive and tolerant of attribute order, quoting
//! and whitespace (see `core::html`). Test against saved fixtures.
pub mod following;
pub mod profile;

pub use following::parse_following;
pub use profile::parse_profile;
