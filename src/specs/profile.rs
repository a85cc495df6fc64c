// src/specs/profile.rs
//! Page parser for a captured profile page.
//!
//! Produces one `ProfileRecord` from the page HTML:
//! - private account  → every field `PRIVADA`;
//! - missing account  → every field `NO_EXISTE`;
//! - otherwise counts from the `og:description` meta
//!   (`"1,234 Followers, 56 Following, 7 Posts - …"`, English or Spanish),
//!   falling back to the `/followers/` and `/following/` anchors;
//!   a count that cannot be located is `NO_ENCONTRADO`;
//! - biography from the header spans (empty when nothing qualifies).
//!
//! Counts are kept as shown ("12.3K", "1.234") and left to `normalize`.

use crate::core::html::{attr_value, next_tag_block_ci, open_tags, slice_between_ci, strip_tags, to_lower};
use crate::model::{Measurement, ProfileRecord, Reason};

const PRIVATE_MARKERS: &[&str] = &["this account is private", "esta cuenta es privada"];
const MISSING_MARKERS: &[&str] = &["sorry, this page isn", "lo sentimos, no pudimos encontrar"];

/// Words that give a span away as stats rather than a biography.
const STATS_WORDS: &[&str] = &["seguidores", "seguidos", "following", "followers", "publicaciones", "posts"];
/// Header classes that hold the biography.
const BIO_CLASSES: &[&str] = &["-vdig", "_aacl"];

#[derive(Clone, Copy, PartialEq, Eq)]
enum CountKind { Followers, Following }

pub fn parse_profile(username: &str, doc: &str) -> ProfileRecord {
    let lc = to_lower(doc);
    if PRIVATE_MARKERS.iter().any(|m| lc.contains(m)) {
        return ProfileRecord::unmeasurable(username, Reason::Private);
    }
    if MISSING_MARKERS.iter().any(|m| lc.contains(m)) {
        return ProfileRecord::unmeasurable(username, Reason::NotExists);
    }

    let (mut followers, mut following) = counts_from_meta(doc);
    if followers.is_none() {
        followers = count_from_anchor(doc, CountKind::Followers);
    }
    if following.is_none() {
        following = count_from_anchor(doc, CountKind::Following);
    }

    let measured = |c: Option<String>| match c {
        Some(tok) => Measurement::Measured(tok),
        None => Measurement::Unmeasurable(Reason::NotFound),
    };

    ProfileRecord {
        username: username.to_string(),
        followers: measured(followers),
        following: measured(following),
        biography: Measurement::Measured(biography(doc).unwrap_or_default()),
    }
}

/// Count tokens from `<meta property="og:description" content="…">`
/// (or `name="description"`).
fn counts_from_meta(doc: &str) -> (Option<String>, Option<String>) {
    let mut followers = None;
    let mut following = None;

    for (_, opener) in open_tags(doc, "meta") {
        let key = attr_value(opener, "property")
            .or_else(|| attr_value(opener, "name"))
            .unwrap_or_default()
            .to_ascii_lowercase();
        if key != "og:description" && key != "description" { continue; }
        let Some(content) = attr_value(opener, "content") else { continue };

        // "<stats> - See Instagram photos…"; stats are ", "-separated
        let stats = content.split(" - ").next().unwrap_or("");
        for part in stats.split(", ") {
            let part_lc = part.to_lowercase();
            let Some(kind) = label_kind(&part_lc) else { continue };
            let Some(tok) = count_token(part) else { continue };
            match kind {
                CountKind::Followers if followers.is_none() => followers = Some(tok),
                CountKind::Following if following.is_none() => following = Some(tok),
                _ => {}
            }
        }
        if followers.is_some() && following.is_some() { break; }
    }
    (followers, following)
}

fn label_kind(part_lc: &str) -> Option<CountKind> {
    // "seguidores" must be tested before "seguidos"; "followers" before "following"
    if part_lc.contains("follower") || part_lc.contains("seguidor") {
        Some(CountKind::Followers)
    } else if part_lc.contains("following") || part_lc.contains("seguido") {
        Some(CountKind::Following)
    } else {
        None
    }
}

/// Text of the first `<a href=".../followers/">` (or following) anchor with a number in it.
fn count_from_anchor(doc: &str, kind: CountKind) -> Option<String> {
    let suffix = match kind {
        CountKind::Followers => "/followers",
        CountKind::Following => "/following",
    };
    for (start, opener) in open_tags(doc, "a") {
        let Some(href) = attr_value(opener, "href") else { continue };
        if !href.to_ascii_lowercase().trim_end_matches('/').ends_with(suffix) { continue; }

        // Prefer the span title (exact count) when present.
        if let Some((s, e)) = next_tag_block_ci(doc, "<a", "</a>", start) {
            let block = &doc[s..e];
            for (_, span) in open_tags(block, "span") {
                if let Some(tok) = attr_value(span, "title").as_deref().and_then(count_token) {
                    return Some(tok);
                }
            }
            if let Some(tok) = count_token(&strip_tags(block)) {
                return Some(tok);
            }
        }
    }
    None
}

/// First numeric token of `text`, keeping separators and a K/M suffix.
/// Spanish "mil"/"mill." after the number map to K/M.
pub fn count_token(text: &str) -> Option<String> {
    let mut words = text.split_whitespace();
    while let Some(w) = words.next() {
        if !w.chars().any(|c| c.is_ascii_digit()) { continue; }

        let mut tok: String = w
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | 'k' | 'K' | 'm' | 'M'))
            .collect();
        // "1,234," → "1,234"
        while tok.ends_with(['.', ',']) { tok.pop(); }

        if !tok.ends_with(['k', 'K', 'm', 'M']) {
            let suffix = match words.next().map(|n| n.to_lowercase()) {
                Some(n) if n == "mil" => Some('K'),
                Some(n) if n.starts_with("mill") => Some('M'),
                _ => None,
            };
            if let Some(suffix) = suffix {
                // Spanish decimal comma: "2,1 mill." is 2.1M, "1.234,5 mil" is 1234.5K
                let comma = tok.rfind(',');
                if tok.matches(',').count() == 1 && tok.rfind('.') < comma {
                    tok = tok.replace('.', "").replace(',', ".");
                }
                tok.push(suffix);
            }
        }
        return Some(tok);
    }
    None
}

/// Biography text from the page header, using the classic bio classes first
/// and any plausible header span second.
fn biography(doc: &str) -> Option<String> {
    let header = slice_between_ci(doc, "<header", "</header>")?;
    let spans = header_spans(header);

    let by_class = spans
        .iter()
        .filter(|(class, _)| BIO_CLASSES.iter().any(|c| class.contains(c)))
        .map(|(_, text)| text)
        .find(|t| looks_like_bio(t, 5, true));
    if let Some(t) = by_class {
        return Some(t.clone());
    }

    spans
        .into_iter()
        .map(|(_, text)| text)
        .find(|t| looks_like_bio(t, 10, false))
}

/// `(class context, text)` for every `<span>` in the header. The class context
/// is the span's own class plus the class of the closest `<div>` opened before it.
fn header_spans(header: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(header, "<span", "</span>", pos) {
        pos = e;
        let opener_end = header[s..].find('>').map_or(e, |g| s + g + 1);
        let mut class = attr_value(&header[s..opener_end], "class").unwrap_or_default();
        if let Some((_, div)) = open_tags(&header[..s], "div").last() {
            class.push(' ');
            class.push_str(&attr_value(div, "class").unwrap_or_default());
        }
        let text = strip_tags(&header[s..e]);
        if !text.is_empty() {
            out.push((class.to_ascii_lowercase(), text));
        }
    }
    out
}

fn looks_like_bio(text: &str, min_len: usize, strict: bool) -> bool {
    let len = text.chars().count();
    if len <= min_len || len >= 500 { return false; }
    if text.chars().take(10).any(|c| c.is_ascii_digit()) { return false; }
    if text.starts_with("http") { return false; }

    let lc = text.to_lowercase();
    let words: &[&str] = if strict { STATS_WORDS } else { &STATS_WORDS[..4] };
    !words.iter().any(|w| lc.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_tokens() {
        assert_eq!(count_token("1,234 Followers").as_deref(), Some("1,234"));
        assert_eq!(count_token("12.3K followers").as_deref(), Some("12.3K"));
        assert_eq!(count_token("seguidores: 1.5 mil").as_deref(), Some("1.5K"));
        assert_eq!(count_token("2,1 mill. seguidores").as_deref(), Some("2.1M"));
        assert_eq!(count_token("1,5 mil seguidores").as_deref(), Some("1.5K"));
        assert_eq!(count_token("1.234,5 mil").as_deref(), Some("1234.5K"));
        assert_eq!(count_token("(987)").as_deref(), Some("987"));
        assert_eq!(count_token("no numbers"), None);
    }

    #[test]
    fn label_order() {
        assert!(label_kind("10 seguidores") == Some(CountKind::Followers));
        assert!(label_kind("10 seguidos") == Some(CountKind::Following));
        assert!(label_kind("10 following") == Some(CountKind::Following));
        assert!(label_kind("10 posts").is_none());
    }
}
