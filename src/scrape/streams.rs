use scraper::Selector;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::{SegmentList, StreamInfo};
use crate::scrape::{self, infer_platform, node_text, BASE_URL};

#[instrument(skip(client))]
pub(crate) async fn get_streams(
    client: &reqwest::Client,
    match_path: &str,
) -> Result<SegmentList<StreamInfo>> {
    let url = format!("{BASE_URL}/{}", match_path.trim_start_matches('/'));
    let (document, status) = scrape::get_document(client, &url).await?;
    let streams = parse_streams(&document);
    scrape::assert_success(&url, status)?;
    let streams = streams?;
    debug!(count = streams.len(), match_path, "parsed match streams");
    Ok(SegmentList {
        status: status.as_u16(),
        segments: streams,
    })
}

fn parse_streams(document: &scraper::Html) -> Result<Vec<StreamInfo>> {
    let button_selector =
        Selector::parse("div.match-streams-container .match-streams-btn:not(.mod-expand)")?;
    let span_selector = Selector::parse("span")?;
    let link_selector = Selector::parse("a")?;

    Ok(document
        .select(&button_selector)
        .map(|button| {
            let title = button
                .select(&span_selector)
                .next()
                .map(|s| node_text(&s))
                .unwrap_or_default();
            // Some stream buttons are themselves anchors instead of
            // wrapping one.
            let href = button
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .filter(|h| !h.is_empty())
                .or_else(|| button.value().attr("href"))
                .unwrap_or_default()
                .to_string();
            let platform = infer_platform(&href);
            StreamInfo {
                title,
                href,
                platform,
            }
        })
        .collect())
}
