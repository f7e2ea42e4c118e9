//! Blue sky cleanup: strip inline script markup from a line so it reads
//! as plain dialogue.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\[%[pe]\]",
        r"|\[(?:margin|color|evaluate expr).+?\]",
        r"|\[(?:ruby-base|center)\]",
        r"|\[ruby-text-start\].*\[ruby-text-end\]",
    ))
    .expect("markup pattern compiles")
});

static SPEAKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[name\](.+)\[line\]").expect("speaker pattern compiles")
});

/// Remove markup codes and ruby annotations, turn `[name]X[line]` into
/// `X: `, and normalise a couple of glyph sequences.
pub fn clean_text(line: &str) -> String {
    let cleaned = MARKUP
        .replace_all(line, "")
        .replace("③⑤", "-")
        .replace("[...]", "…");

    SPEAKER.replace_all(&cleaned, "${1}: ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_and_ellipsis() {
        assert_eq!(
            clean_text("[name]Alice[line]Hello [...] world"),
            "Alice: Hello … world"
        );
    }

    #[test]
    fn test_strips_codes() {
        assert_eq!(clean_text("[%p]Wait.[%e]"), "Wait.");
        assert_eq!(clean_text("[margin top=3]Far[color index=\"2\"] away"), "Far away");
        assert_eq!(clean_text("[evaluate expr=\"f.x=1\"]ok"), "ok");
        assert_eq!(clean_text("[center]Title"), "Title");
    }

    #[test]
    fn test_strips_ruby() {
        assert_eq!(
            clean_text("[ruby-base]漢字[ruby-text-start]かんじ[ruby-text-end]を読む"),
            "漢字を読む"
        );
    }

    #[test]
    fn test_dash_sequence() {
        assert_eq!(clean_text("no③⑤way"), "no-way");
    }

    #[test]
    fn test_plain_line_unchanged() {
        assert_eq!(clean_text("just text"), "just text");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "[name]Alice[line]Hello [...] world",
            "[%p][center]Chapter ③⑤ one[%e]",
            "[ruby-base]字[ruby-text-start]じ[ruby-text-end] [name]Bob[line]hi",
            "plain",
        ];
        for raw in samples {
            let once = clean_text(raw);
            assert_eq!(clean_text(&once), once, "not idempotent for {raw:?}");
        }
    }
}
