//! Article body markup to plain text.
//!
//! The rules run in a fixed order over the whole fragment before it is split
//! into lines. Ads and links (`<a>`), emphasis (`<em>`, usually photo
//! captions) and scripts are dropped together with their contents; `<b>` and
//! `<p>` become line breaks. Non-breaking spaces, which html5ever serializes
//! as `&nbsp;`, are restored to U+00A0 so they trim like any other whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

const LINE_BREAK: &str = "<br/>";
const NBSP_ENTITY: &str = "&nbsp;";

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<!--[^>]*-->").unwrap());
// html5ever serializes void elements as `<br>`.
static BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static ANCHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"<a.*/a>").unwrap());
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<em.*/em>").unwrap());
static SCRIPT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<script.*/script>").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?b>").unwrap());
static PARAGRAPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?p>").unwrap());
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Convert raw body markup into newline-separated plain text.
///
/// Never fails; markup with no surviving text yields an empty string.
pub fn cleanup(markup: &str) -> String {
    let html = COMMENT.replace_all(markup, "");
    let html = BREAK.replace_all(&html, LINE_BREAK);
    let html = html.replace('\n', LINE_BREAK);
    let html = ANCHOR.replace_all(&html, "");
    let html = EMPHASIS.replace_all(&html, "");
    let html = SCRIPT.replace_all(&html, "");
    let html = BOLD.replace_all(&html, LINE_BREAK);
    let html = PARAGRAPH.replace_all(&html, LINE_BREAK);
    let html = html.replace(NBSP_ENTITY, "\u{a0}");

    html.split(LINE_BREAK)
        .map(|line| ANY_TAG.replace_all(line, "").trim().to_string())
        .filter(|line| keep_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drops empty lines and leftovers of inline scripts and styles.
fn keep_line(line: &str) -> bool {
    match (line.chars().next(), line.chars().last()) {
        (None, _) => false,
        (Some('\\' | '/'), _) => false,
        (_, Some(';')) => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_body() {
        let html = r#"<div id="articleBodyContents"><!--c--><p>Hello</p><script>x</script></div>"#;
        assert_eq!(cleanup(html), "Hello");
    }

    #[test]
    fn test_preserves_line_structure() {
        let html = "<div>First line\nSecond line<br/>Third<b>Bold</b>Fourth</div>";
        assert_eq!(cleanup(html), "First line\nSecond line\nThird\nBold\nFourth");
    }

    #[test]
    fn test_void_break_variants() {
        assert_eq!(cleanup("one<br>two<BR />three"), "one\ntwo\nthree");
    }

    #[test]
    fn test_trailing_nbsp_keeps_line() {
        assert_eq!(cleanup("<div>Body text&nbsp;<br>More</div>"), "Body text\nMore");
    }

    #[test]
    fn test_inner_nbsp_is_restored() {
        assert_eq!(cleanup("<p>Big&nbsp;news</p>"), "Big\u{a0}news");
    }

    #[test]
    fn test_removes_anchors_and_emphasis() {
        let html = r#"<div>Body text<br/><a href="http://ad">Buy now</a><br/><em class="img_desc">Photo</em>Tail</div>"#;
        assert_eq!(cleanup(html), "Body text\nTail");
    }

    #[test]
    fn test_anchor_removal_is_greedy() {
        let html = "Keep<a>one</a>middle<a>two</a>end";
        assert_eq!(cleanup(html), "Keepend");
    }

    #[test]
    fn test_drops_script_residue_lines() {
        let html = "<div>// flash workaround<br/>function _f() {};<br/>\\escaped<br/>Real text</div>";
        assert_eq!(cleanup(html), "Real text");
    }

    #[test]
    fn test_trims_and_drops_blank_lines() {
        let html = "<p>   </p>\n\n<p>  padded  </p>";
        assert_eq!(cleanup(html), "padded");
    }

    #[test]
    fn test_empty_result_is_empty_string() {
        assert_eq!(cleanup(""), "");
        assert_eq!(cleanup("<div><script>var a = 1;</script></div>"), "");
    }

    #[test]
    fn test_idempotent_on_output() {
        let html = "<div><!-- x --><p>One</p>\nTwo<b>Three</b><a href='#'>ad</a></div>";
        let once = cleanup(html);
        assert_eq!(once, "One\nTwo\nThree");
        assert_eq!(cleanup(&once), once);
    }

    #[test]
    fn test_never_panics_on_malformed_markup() {
        for input in ["<", "<<>>", "<!--", "</a>", "<a", "<p", ";", "/", "\\", "<em></em"] {
            let _ = cleanup(input);
        }
    }
}
