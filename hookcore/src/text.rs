//! Text helpers that never slice through a UTF-8 character.

/// Snap a byte position back to the nearest char boundary at or before it.
pub fn snap_to_char_boundary(s: &str, byte_pos: usize) -> usize {
    if byte_pos >= s.len() {
        return s.len();
    }
    (0..=byte_pos).rev().find(|&pos| s.is_char_boundary(pos)).unwrap_or(0)
}

/// Shorten `s` to at most `max_bytes` bytes by keeping its tail and
/// prefixing `…`. Paths keep their file name this way.
pub fn elide_start(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let ellipsis = '…';
    let budget = max_bytes.saturating_sub(ellipsis.len_utf8());
    let mut start = s.len() - budget;
    // Walk forward to a boundary so the tail stays within budget
    while !s.is_char_boundary(start) {
        start += 1;
    }
    format!("{}{}", ellipsis, &s[start..])
}

/// Shorten `s` to at most `max_bytes` bytes by keeping its head and
/// appending `…`.
pub fn elide_end(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let ellipsis = '…';
    let end = snap_to_char_boundary(s, max_bytes.saturating_sub(ellipsis.len_utf8()));
    format!("{}{}", &s[..end], ellipsis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_ascii() {
        let s = "hello";
        assert_eq!(snap_to_char_boundary(s, 0), 0);
        assert_eq!(snap_to_char_boundary(s, 3), 3);
        assert_eq!(snap_to_char_boundary(s, 100), 5);
    }

    #[test]
    fn test_snap_cjk() {
        // '中' is 3 bytes in UTF-8
        let s = "中文";
        assert_eq!(snap_to_char_boundary(s, 1), 0);
        assert_eq!(snap_to_char_boundary(s, 2), 0);
        assert_eq!(snap_to_char_boundary(s, 3), 3);
        assert_eq!(snap_to_char_boundary(s, 5), 3);
    }

    #[test]
    fn test_elide_start_keeps_file_name() {
        let path = "/home/reader/novels/chapter_one.txt";
        let short = elide_start(path, 18);
        assert!(short.len() <= 18);
        assert!(short.starts_with('…'));
        assert!(short.ends_with("chapter_one.txt"));
        assert_eq!(elide_start("short.txt", 40), "short.txt");
    }

    #[test]
    fn test_elide_multibyte() {
        let s = "こんにちは世界";
        let head = elide_end(s, 10);
        assert!(head.len() <= 10);
        assert!(head.ends_with('…'));
        let tail = elide_start(s, 10);
        assert!(tail.len() <= 10);
        assert!(tail.ends_with('界'));
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(snap_to_char_boundary("", 5), 0);
        assert_eq!(elide_end("", 3), "");
        assert_eq!(elide_start("", 3), "");
    }
}
