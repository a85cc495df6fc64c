// src/core/html.rs
//
// Tolerant, case-insensitive slicing of captured HTML. No DOM: just byte
// offsets into the original text (lowercasing is ASCII-only, so offsets in
// the lowered copy are valid in the original).

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Inner text of the first `open_pat ... close_pat` block (after the opener's `>`).
pub fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = to_lower(s);
    let open = to_lower(open_pat);
    let close = to_lower(close_pat);
    let o = lc.find(&open)?;
    let after = s[o..].find('>')? + o + 1;
    let cr = lc[after..].find(&close)?;
    Some(&s[after..after + cr])
}

/// `(start, end)` of the next `o ... c` block at or after `from`; `end` is past `c`.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

/// Opening tags named `tag` (e.g. `"a"`, `"meta"`), as `(start, opener_text)`.
/// The opener text runs from `<` to `>` inclusive.
pub fn open_tags<'a>(s: &'a str, tag: &str) -> Vec<(usize, &'a str)> {
    let lc = to_lower(s);
    let needle = format!("<{}", to_lower(tag));
    let mut out = Vec::new();
    let mut from = 0usize;

    while let Some(rel) = lc[from..].find(&needle) {
        let start = from + rel;
        let after_name = start + needle.len();
        // "<a" must not match "<abbr"
        let boundary = lc[after_name..].chars().next();
        let Some(gt) = s[start..].find('>').map(|g| start + g) else { break };
        if matches!(boundary, Some(ch) if ch.is_ascii_whitespace() || ch == '>' || ch == '/') {
            out.push((start, &s[start..=gt]));
        }
        from = gt + 1;
    }
    out
}

/// Value of attribute `name` in an opening tag; quotes optional.
pub fn attr_value(opener: &str, name: &str) -> Option<String> {
    let lc = to_lower(opener);
    let pat = format!("{}=", to_lower(name));
    let mut search = 0usize;

    let pos = loop {
        let p = lc[search..].find(&pat)? + search;
        // attribute names start after whitespace ("data-href" is not "href")
        if p > 0 && lc.as_bytes()[p - 1].is_ascii_whitespace() { break p; }
        search = p + pat.len();
    };

    let val = opener[pos + pat.len()..].trim_start();
    let (quote, start_off) = match val.as_bytes().first() {
        Some(b'"') => (Some('"'), 1),
        Some(b'\'') => (Some('\''), 1),
        _ => (None, 0),
    };
    let end = match quote {
        Some(q) => val[start_off..].find(q).map(|e| start_off + e),
        None => val.find(|c: char| c.is_ascii_whitespace() || c == '>'),
    }
    .unwrap_or(val.len());
    Some(super::sanitize::normalize_entities(&val[start_off..end]))
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&super::sanitize::normalize_entities(&out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_tags_respects_name_boundary() {
        let doc = r#"<abbr>x</abbr><A HREF="/ana/">Ana</A><a>b</a>"#;
        let tags = open_tags(doc, "a");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].1, r#"<A HREF="/ana/">"#);
    }

    #[test]
    fn attr_value_quoting() {
        assert_eq!(attr_value(r#"<a href="/x/">"#, "href").as_deref(), Some("/x/"));
        assert_eq!(attr_value("<a href='/y/'>", "href").as_deref(), Some("/y/"));
        assert_eq!(attr_value("<a href=/z/ class=b>", "href").as_deref(), Some("/z/"));
        assert_eq!(attr_value(r#"<a data-href="/no/">"#, "href"), None);
        assert_eq!(
            attr_value(r#"<meta content="1 &amp; 2">"#, "content").as_deref(),
            Some("1 & 2")
        );
    }

    #[test]
    fn strip_tags_collapses_whitespace() {
        assert_eq!(strip_tags("<span> hola&nbsp;<b>mundo</b>\n</span>"), "hola mundo");
    }

    #[test]
    fn block_and_slice() {
        let doc = "<HEADER class=x><span>a</span></header>";
        assert_eq!(slice_between_ci(doc, "<header", "</header>"), Some("<span>a</span>"));
        let (s, e) = next_tag_block_ci(doc, "<span", "</span>", 0).unwrap();
        assert_eq!(&doc[s..e], "<span>a</span>");
    }
}
