//! Title, timestamp and body extraction from article pages.
//!
//! Articles are served from three page templates, recognized by the shape of
//! the article URL. Each [`PageVariant`] carries the selectors for its
//! template; the first match of each selector wins.

use crate::error::CrawlError;
use crate::scrapers::cleanup::cleanup;
use scraper::{ElementRef, Html, Selector};

/// The article page templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageVariant {
    Sport,
    Entertainment,
    Basic,
}

/// Selectors for the title, written-time and body nodes of one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSelectors {
    pub title: &'static str,
    pub written_time: &'static str,
    pub body: &'static str,
}

impl PageVariant {
    /// Pick the template for an article URL. `sports` outranks `entertain`.
    pub fn classify(url: &str) -> Self {
        if url.contains("sports") {
            PageVariant::Sport
        } else if url.contains("entertain") {
            PageVariant::Entertainment
        } else {
            PageVariant::Basic
        }
    }

    pub fn selectors(self) -> VariantSelectors {
        match self {
            PageVariant::Sport => VariantSelectors {
                title: "div[class=news_headline] h4",
                written_time: "div[class=news_headline] div[class=info] span",
                body: "div[id=newsEndContents]",
            },
            PageVariant::Entertainment => VariantSelectors {
                title: "p[class=end_tit]",
                written_time: "div[class=article_info] span",
                body: "div[class=end_body_wrp]",
            },
            PageVariant::Basic => VariantSelectors {
                title: "h3[id=articleTitle]",
                written_time: "span[class=t11]",
                body: "div[id=articleBodyContents]",
            },
        }
    }
}

/// Fields pulled out of one article page. `None` means "not on the page".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: Option<String>,
    /// Raw text of the timestamp node, not normalized.
    pub written_time: Option<String>,
    /// Serialized body node.
    pub content_html: Option<String>,
    /// Plain text of the body node.
    pub content: Option<String>,
}

impl ExtractedArticle {
    pub fn into_fields(self) -> [(&'static str, Option<String>); 4] {
        [
            ("title", self.title),
            ("writtenTime", self.written_time),
            ("contentHtml", self.content_html),
            ("content", self.content),
        ]
    }
}

/// Run the selectors of `variant` against a parsed article page.
///
/// Only an invalid selector is an error; missing nodes come back as `None`.
pub fn extract(document: &Html, variant: PageVariant) -> Result<ExtractedArticle, CrawlError> {
    let selectors = variant.selectors();

    let title = first_match(document, selectors.title)?.map(node_text);
    let written_time = first_match(document, selectors.written_time)?.map(node_text);
    let content_html = first_match(document, selectors.body)?.map(|body| body.html());
    let content = content_html.as_deref().map(cleanup);

    Ok(ExtractedArticle {
        title,
        written_time,
        content_html,
        content,
    })
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector, CrawlError> {
    Selector::parse(selector).map_err(|e| CrawlError::Selector(format!("{selector}: {e:?}")))
}

fn first_match<'a>(document: &'a Html, selector: &str) -> Result<Option<ElementRef<'a>>, CrawlError> {
    let selector = parse_selector(selector)?;
    Ok(document.select(&selector).next())
}

fn node_text(node: ElementRef<'_>) -> String {
    node.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            PageVariant::classify("https://sports.news.naver.com/news.nhn?oid=1"),
            PageVariant::Sport
        );
        assert_eq!(
            PageVariant::classify("https://entertain.naver.com/read?oid=1"),
            PageVariant::Entertainment
        );
        assert_eq!(
            PageVariant::classify("https://news.naver.com/main/read.nhn?oid=1"),
            PageVariant::Basic
        );
    }

    #[test]
    fn test_classify_sport_dominates_entertain() {
        assert_eq!(
            PageVariant::classify("https://entertain.naver.com/sports/read?oid=1"),
            PageVariant::Sport
        );
    }

    #[test]
    fn test_all_selectors_parse() {
        for variant in [PageVariant::Sport, PageVariant::Entertainment, PageVariant::Basic] {
            let s = variant.selectors();
            for sel in [s.title, s.written_time, s.body] {
                assert!(parse_selector(sel).is_ok(), "{sel}");
            }
        }
    }

    #[test]
    fn test_extract_basic() {
        let html = r#"<html><body>
            <h3 id="articleTitle">Budget passes</h3>
            <span class="t11">2018.03.05. 오후 3:12</span>
            <div id="articleBodyContents"><!--c--><p>Hello</p><script>x</script></div>
        </body></html>"#;
        let document = Html::parse_document(html);

        let article = extract(&document, PageVariant::Basic).unwrap();
        assert_eq!(article.title.as_deref(), Some("Budget passes"));
        assert_eq!(article.written_time.as_deref(), Some("2018.03.05. 오후 3:12"));
        assert_eq!(article.content.as_deref(), Some("Hello"));
        assert!(article.content_html.unwrap().starts_with(r#"<div id="articleBodyContents">"#));
    }

    #[test]
    fn test_extract_sport() {
        let html = r#"<html><body>
            <div class="news_headline"><h4>Final score</h4><div class="info"><span>2018.03.05 21:00</span></div></div>
            <div id="newsEndContents">Line one<br>Line two</div>
        </body></html>"#;
        let document = Html::parse_document(html);

        let article = extract(&document, PageVariant::Sport).unwrap();
        assert_eq!(article.title.as_deref(), Some("Final score"));
        assert_eq!(article.written_time.as_deref(), Some("2018.03.05 21:00"));
        assert_eq!(article.content.as_deref(), Some("Line one\nLine two"));
    }

    #[test]
    fn test_extract_entertainment() {
        let html = r#"<html><body>
            <p class="end_tit">Premiere night</p>
            <div class="article_info"><span>2018.03.05</span></div>
            <div class="end_body_wrp"><p>Stars arrived.</p></div>
        </body></html>"#;
        let document = Html::parse_document(html);

        let article = extract(&document, PageVariant::Entertainment).unwrap();
        assert_eq!(article.title.as_deref(), Some("Premiere night"));
        assert_eq!(article.content.as_deref(), Some("Stars arrived."));
    }

    #[test]
    fn test_extract_body_with_non_breaking_spaces() {
        let document = Html::parse_document(
            "<div id=\"articleBodyContents\">Body text\u{a0}<br>Big\u{a0}news</div>",
        );

        let article = extract(&document, PageVariant::Basic).unwrap();
        assert_eq!(article.content.as_deref(), Some("Body text\nBig\u{a0}news"));
    }

    #[test]
    fn test_missing_body_is_absent_not_error() {
        let document = Html::parse_document("<html><body><h3 id=\"articleTitle\">Only a title</h3></body></html>");

        let article = extract(&document, PageVariant::Basic).unwrap();
        assert_eq!(article.title.as_deref(), Some("Only a title"));
        assert_eq!(article.written_time, None);
        assert_eq!(article.content_html, None);
        assert_eq!(article.content, None);
    }

    #[test]
    fn test_wrong_variant_finds_nothing() {
        let document = Html::parse_document(r#"<div id="articleBodyContents">text</div>"#);
        assert_eq!(
            extract(&document, PageVariant::Sport).unwrap(),
            ExtractedArticle::default()
        );
    }
}
