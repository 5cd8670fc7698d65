use scraper::{ElementRef, Selector};
use tracing::{debug, instrument};

use crate::error::{Result, VlrError};
use crate::model::{NewsItem, SegmentList};
use crate::scrape::{self, full_text, node_text, require_attr, require_first, select_text, BASE_URL};

#[instrument(skip(client))]
pub(crate) async fn get_recent_news(client: &reqwest::Client) -> Result<SegmentList<NewsItem>> {
    let url = format!("{BASE_URL}/news");
    let (document, status) = scrape::get_document(client, &url).await?;
    let items = parse_news(&document);
    scrape::assert_success(&url, status)?;
    let items = items?;
    debug!(count = items.len(), "parsed news page");
    Ok(SegmentList {
        status: status.as_u16(),
        segments: items,
    })
}

fn parse_news(document: &scraper::Html) -> Result<Vec<NewsItem>> {
    let item_selector = Selector::parse("a.wf-module-item")?;
    document
        .select(&item_selector)
        .enumerate()
        .map(|(index, element)| parse_news_item(element, index))
        .collect()
}

fn parse_news_item(element: ElementRef, index: usize) -> Result<NewsItem> {
    let url_path = require_attr(element, "href", "news url", index)?;

    // Date and author share one text node shaped like
    // `\u{2022} May 4, 2025 by Author`; both markers are load-bearing.
    let date_author_selector = Selector::parse("div.ge-text-light")?;
    let date_author = full_text(&require_first(
        element,
        &date_author_selector,
        "news date/author",
        index,
    )?);
    let (date_part, author) =
        date_author
            .split_once("by")
            .ok_or(VlrError::Extraction {
                field: "news author",
                index,
            })?;
    let date = date_part
        .split('\u{2022}')
        .nth(1)
        .ok_or(VlrError::Extraction {
            field: "news date",
            index,
        })?
        .trim()
        .to_string();
    let author = author.trim().to_string();

    let title_selector = Selector::parse("div:nth-child(1)")?;
    let title = select_text(&element, &title_selector);

    let body_selector = Selector::parse("div")?;
    let body = require_first(element, &body_selector, "news body", index)?;
    let desc_selector = Selector::parse("div:nth-child(2)")?;
    let description = node_text(&require_first(
        body,
        &desc_selector,
        "news description",
        index,
    )?);

    Ok(NewsItem {
        title,
        description,
        date,
        author,
        url_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const NEWS_PAGE: &str = r#"
    <div id="wrapper">
      <a href="/498188/loud-win-the-rematch" class="wf-module-item mod-first">
        <div style="padding: 12px;">
          <div style="font-weight: 700;">
            LOUD win the rematch
          </div>
          <div style="margin-top: 4px;">
            A dominant display on Icebox seals the series
          </div>
          <div class="ge-text-light" style="font-size: 11px;">
            &#8226; May 4, 2025
            by LeoTheWhiff
          </div>
        </div>
      </a>
      <a href="/498190/patch-notes-breakdown" class="wf-module-item">
        <div style="padding: 12px;">
          <div style="font-weight: 700;">
            Patch notes breakdown
          </div>
          <div style="margin-top: 4px;">
            Every agent change, ranked by impact
          </div>
          <div class="ge-text-light" style="font-size: 11px;">
            &#8226; May 3, 2025
            by staxx
          </div>
        </div>
      </a>
    </div>"#;

    #[test]
    fn parses_news_items() {
        let document = Html::parse_document(NEWS_PAGE);
        let items = parse_news(&document).unwrap();

        assert_eq!(items.len(), 2);

        let first = &items[0];
        assert_eq!(first.title, "LOUD win the rematch");
        assert_eq!(
            first.description,
            "A dominant display on Icebox seals the series"
        );
        assert_eq!(first.date, "May 4, 2025");
        assert_eq!(first.author, "LeoTheWhiff");
        assert_eq!(first.url_path, "/498188/loud-win-the-rematch");

        assert_eq!(items[1].author, "staxx");
    }

    #[test]
    fn missing_bullet_fails_with_item_index() {
        let page = r#"
        <a href="/1/x" class="wf-module-item">
          <div>
            <div>Title</div>
            <div>Description</div>
            <div class="ge-text-light">May 4, 2025 by Someone</div>
          </div>
        </a>"#;
        let document = Html::parse_document(page);
        let err = parse_news(&document).unwrap_err();
        assert!(matches!(
            err,
            VlrError::Extraction {
                field: "news date",
                index: 0
            }
        ));
    }

    #[test]
    fn missing_author_token_fails() {
        let page = r#"
        <a href="/1/x" class="wf-module-item">
          <div>
            <div>Title</div>
            <div>Description</div>
            <div class="ge-text-light">&#8226; May 4, 2025</div>
          </div>
        </a>"#;
        let document = Html::parse_document(page);
        let err = parse_news(&document).unwrap_err();
        assert!(matches!(
            err,
            VlrError::Extraction {
                field: "news author",
                index: 0
            }
        ));
    }
}
