//! Body text filtering.

use regex::Regex;

use crate::error::{AppError, Result};

/// Glyph opening the "posted from" line.
pub const POSTED_FROM_GLYPH: char = '※';

/// Glyph opening the "updated from" line.
pub const UPDATED_FROM_GLYPH: char = '◆';

/// Signature separator prefix.
const SIGNATURE_PREFIX: &str = "--";

/// Everything outside: CJK ideographs, CJK punctuation (。；，：“”（）、？《》),
/// whitespace, word characters and `:/-_.?~%()`.
const DISALLOWED_CHARS: &str = r"[^\x{4e00}-\x{9fa5}\x{3002}\x{ff1b}\x{ff0c}\x{ff1a}\x{201c}\x{201d}\x{ff08}\x{ff09}\x{3001}\x{ff1f}\x{300a}\x{300b}\s\w:/\-_.?~%()]";

/// Compiled filters for article body text.
#[derive(Debug, Clone)]
pub struct BodySanitizer {
    disallowed: Regex,
    whitespace: Regex,
}

impl BodySanitizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            disallowed: compile(DISALLOWED_CHARS)?,
            whitespace: compile(r"\s+")?,
        })
    }

    /// Build the body text from trimmed text nodes.
    ///
    /// Drops marker lines and signature separators, strips characters
    /// outside the allow-list, drops nodes left empty or mentioning
    /// `item_id`, then joins with single spaces.
    pub fn body_text<S: AsRef<str>>(&self, strings: &[S], item_id: &str) -> String {
        let kept: Vec<String> = strings
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|s| !is_marker_line(s))
            .map(|s| self.disallowed.replace_all(s, "").into_owned())
            .filter(|s| !s.is_empty())
            .filter(|s| !s.contains(item_id))
            .collect();

        self.whitespace
            .replace_all(&kept.join(" "), " ")
            .into_owned()
    }

    /// Whether `c` survives the allow-list.
    pub fn is_allowed(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        !self.disallowed.is_match(c.encode_utf8(&mut buf))
    }
}

/// Lines starting with a marker glyph or a signature separator.
fn is_marker_line(s: &str) -> bool {
    s.starts_with(POSTED_FROM_GLYPH)
        || s.starts_with(UPDATED_FROM_GLYPH)
        || s.starts_with(SIGNATURE_PREFIX)
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| AppError::config(format!("invalid pattern {pattern}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "M.1127742013.A.240";

    #[test]
    fn test_drops_marker_lines() {
        let sanitizer = BodySanitizer::new().unwrap();
        let strings = [
            "內文",
            "※ 發信站: 批踢踢實業坊(ptt.cc)",
            "◆ From: 140.112.1.1",
            "--",
            "-- 簽名檔",
            "結尾",
        ];
        assert_eq!(sanitizer.body_text(&strings, ID), "內文 結尾");
    }

    #[test]
    fn test_strips_disallowed_characters() {
        let sanitizer = BodySanitizer::new().unwrap();
        let strings = ["★☆ 你好！「引號」 hello_world 100% (ok)", "♥♥♥"];
        assert_eq!(
            sanitizer.body_text(&strings, ID),
            " 你好引號 hello_world 100% (ok)"
        );
    }

    #[test]
    fn test_keeps_allowed_punctuation_and_urls() {
        let sanitizer = BodySanitizer::new().unwrap();
        let strings = ["問題：為什麼？《書名》、“引”（註）。；，", "https://example.com/a-b_c.html?x=1~2"];
        assert_eq!(
            sanitizer.body_text(&strings, ID),
            "問題：為什麼？《書名》、“引”（註）。；， https://example.com/a-b_c.html?x1~2"
        );
    }

    #[test]
    fn test_drops_self_link() {
        let sanitizer = BodySanitizer::new().unwrap();
        let strings = [
            "內文",
            "https://www.ptt.cc/bbs/PublicServan/M.1127742013.A.240.html",
        ];
        assert_eq!(sanitizer.body_text(&strings, ID), "內文");
    }

    #[test]
    fn test_collapses_whitespace() {
        let sanitizer = BodySanitizer::new().unwrap();
        let strings = ["a \t\n b", "c"];
        assert_eq!(sanitizer.body_text(&strings, ID), "a b c");
    }

    #[test]
    fn test_output_within_allow_list() {
        let sanitizer = BodySanitizer::new().unwrap();
        let strings = ["混合 ♪ text ✔ 123 @#$ [x] {y} <z>", "※ 不要", "中文。"];
        let body = sanitizer.body_text(&strings, ID);
        assert!(body.chars().all(|c| sanitizer.is_allowed(c)));
        assert!(!body.contains('※'));
    }

    #[test]
    fn test_dash_in_allow_list_is_literal() {
        // `/-_` lists three characters; it is not the `/`..`_` range, so
        // brackets and the symbols between them are stripped.
        let sanitizer = BodySanitizer::new().unwrap();
        for c in ['/', '-', '_'] {
            assert!(sanitizer.is_allowed(c), "{c} should be kept");
        }
        for c in ['[', ']', '@', ';', '<', '=', '>', '^'] {
            assert!(!sanitizer.is_allowed(c), "{c} should be stripped");
        }

        let strings = ["[問題] 職等", "a@b;c<d=e>"];
        assert_eq!(sanitizer.body_text(&strings, ID), "問題 職等 abcde");
    }

    #[test]
    fn test_empty_input() {
        let sanitizer = BodySanitizer::new().unwrap();
        let strings: [&str; 0] = [];
        assert_eq!(sanitizer.body_text(&strings, ID), "");
    }
}
