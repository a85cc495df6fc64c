// src/specs/following.rs
//! Page parser for the following-list dialog.
//!
//! Input is the captured HTML of a profile's "Following" dialog after it has
//! been scrolled to the end. Every followed account appears as an anchor to
//! its profile:
//!
//! ```text
//! <a href="/some.handle/" role="link">…some.handle…</a>
//! <a href="https://www.instagram.com/other_one/">…</a>
//! ```
//!
//! Rules:
//! - single-segment profile paths only (`/p/…`, `/explore/…` and friends are skipped);
//! - the captured account itself is skipped;
//! - first occurrence wins, document order is kept;
//! - `limit == 0` means no limit.

use std::collections::HashSet;

use crate::core::html::{attr_value, open_tags};
use crate::core::sanitize::is_handle;

/// First path segments that are site sections, not accounts.
const RESERVED_PATHS: &[&str] = &[
    "accounts", "direct", "explore", "p", "reel", "reels", "stories", "tv",
    "about", "legal", "developer", "privacy", "terms", "web", "challenge",
];

const SITE_ORIGINS: &[&str] = &[
    "https://www.instagram.com",
    "http://www.instagram.com",
    "https://instagram.com",
    "//www.instagram.com",
];

pub fn parse_following(doc: &str, target: &str, limit: usize) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for (_, opener) in open_tags(doc, "a") {
        let Some(href) = attr_value(opener, "href") else { continue };
        let Some(handle) = handle_from_href(&href) else { continue };

        if handle.eq_ignore_ascii_case(target) { continue; }
        if !seen.insert(handle.to_ascii_lowercase()) { continue; }

        out.push(handle);
        if limit != 0 && out.len() >= limit { break; }
    }
    out
}

/// `/name/` (optionally prefixed by the site origin, optionally without the
/// trailing slash) → `name`.
fn handle_from_href(href: &str) -> Option<String> {
    let mut path = href.trim();
    for origin in SITE_ORIGINS {
        if let Some(rest) = path.strip_prefix(origin) {
            path = rest;
            break;
        }
    }
    let path = path.split(['?', '#']).next().unwrap_or("");
    let inner = path.strip_prefix('/')?;
    let inner = inner.strip_suffix('/').unwrap_or(inner);

    if inner.contains('/') || !is_handle(inner) { return None; }
    if RESERVED_PATHS.iter().any(|r| r.eq_ignore_ascii_case(inner)) { return None; }
    Some(inner.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIALOG: &str = r##"
        <div role="dialog">
          <a href="/nayeli.nxx/">me</a>
          <a href="/ana_01/" role="link"><span>ana_01</span></a>
          <a href="/ana_01/" role="link"><img alt="ana"></a>
          <a href="https://www.instagram.com/bob.b/?hl=es">bob.b</a>
          <a href="/explore/">Explore</a>
          <a href="/p/Cxyz123/">post</a>
          <a href="/carla/followers/">carla followers</a>
          <a href="#">nothing</a>
          <a href='/Carla'>Carla</a>
        </div>"##;

    #[test]
    fn extracts_handles_in_order() {
        let got = parse_following(DIALOG, "nayeli.nxx", 0);
        assert_eq!(got, vec!["ana_01", "bob.b", "Carla"]);
    }

    #[test]
    fn limit_truncates() {
        assert_eq!(parse_following(DIALOG, "nayeli.nxx", 2), vec!["ana_01", "bob.b"]);
    }

    #[test]
    fn href_shapes() {
        assert_eq!(handle_from_href("/x/").as_deref(), Some("x"));
        assert_eq!(handle_from_href("/x").as_deref(), Some("x"));
        assert_eq!(handle_from_href("/x/y/"), None);
        assert_eq!(handle_from_href("/reels/"), None);
        assert_eq!(handle_from_href("https://example.com/x/"), None);
    }
}
