// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') { return s.to_string(); }
    s.replace("&nbsp;", " ")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Account handles: 1–30 of `[A-Za-z0-9._]`.
pub fn is_handle(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 30
        && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'_')
}

/// Safe file stem for a handle (handles are already safe; anything else is replaced).
pub fn handle_file_stem(handle: &str) -> String {
    let out: String = handle
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' { c } else { '_' })
        .collect();
    let out = out.trim_matches('.').to_string();
    if out.is_empty() { s!("_") } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_and_whitespace() {
        assert_eq!(normalize_entities("a &amp;lt; b &#39;c&#39;"), "a &lt; b 'c'");
        assert_eq!(normalize_ws("  a \n\t b  "), "a b");
    }

    #[test]
    fn handles() {
        assert!(is_handle("nayeli.nxx"));
        assert!(is_handle("a_b_1"));
        assert!(!is_handle(""));
        assert!(!is_handle("with space"));
        assert!(!is_handle(&"x".repeat(31)));
        assert_eq!(handle_file_stem("../etc"), "_etc");
    }
}
