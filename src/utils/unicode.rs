use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn prev_char_boundary(s: &str, byte_index: usize) -> usize {
    if byte_index == 0 {
        return 0;
    }
    s.char_indices()
        .rev()
        .find(|(i, _)| *i < byte_index)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub fn next_char_boundary(s: &str, byte_index: usize) -> usize {
    if byte_index >= s.len() {
        return s.len();
    }
    s.char_indices()
        .find(|(i, _)| *i > byte_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Cut `s` to at most `max_width` terminal columns, marking the cut with `…`.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
