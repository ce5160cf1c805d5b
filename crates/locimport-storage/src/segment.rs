//! URL segment generation.
//!
//! Folders are looked up by segment rather than display name, so "North Sea",
//! "north sea" and "North  Sea" all resolve to `north-sea`.

/// Segment used when a name has no usable characters at all.
pub const FALLBACK_SEGMENT: &str = "content";

fn is_segment_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

/// Normalize a display name into a URL segment.
///
/// Lowercases, keeps alphanumerics and `-_.~`, turns every other run of
/// characters into a single `-`, and trims dashes from both ends.
pub fn url_segment(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if is_segment_char(c) && c != '-' {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if out.is_empty() {
        FALLBACK_SEGMENT.to_string()
    } else {
        out
    }
}

/// First of `base`, `base-2`, `base-3`, ... for which `taken` is false.
pub(crate) fn unique_segment(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    let mut n = 2usize;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
