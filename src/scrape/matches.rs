use itertools::Itertools;
use scraper::{ElementRef, Selector};
use tracing::{debug, instrument};

use crate::error::{Result, VlrError};
use crate::model::{SegmentList, UpcomingMatch};
use crate::scrape::{
    self, flag_key, format_eta, full_text, node_text, normalize_img_url, require_attr,
    require_first, streams, BASE_URL,
};

#[instrument(skip(client))]
pub(crate) async fn get_upcoming_matches(
    client: &reqwest::Client,
) -> Result<SegmentList<UpcomingMatch>> {
    fetch_all_pages(client, &format!("{BASE_URL}/matches")).await
}

/// Walk every page of the schedule: page 1 reveals the page count, the rest
/// are fetched sequentially and concatenated in page order.
async fn fetch_all_pages(
    client: &reqwest::Client,
    url: &str,
) -> Result<SegmentList<UpcomingMatch>> {
    let (mut matches, total_pages, status) = {
        let (document, status) = scrape::get_document(client, url).await?;
        let total_pages = parse_total_pages(&document);
        let matches = parse_match_page(&document);
        scrape::assert_success(url, status)?;
        (matches?, total_pages?, status.as_u16())
    };

    for page in 2..=total_pages {
        let page_url = format!("{url}?page={page}");
        matches.extend(fetch_page(client, &page_url).await?);
    }

    let matches = attach_streams(client, matches).await?;
    debug!(count = matches.len(), total_pages, "parsed upcoming matches");
    Ok(SegmentList {
        status,
        segments: matches,
    })
}

async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<Vec<UpcomingMatch>> {
    let (document, status) = scrape::get_document(client, url).await?;
    let matches = parse_match_page(&document);
    scrape::assert_success(url, status)?;
    matches
}

/// Highest page number in the pagination control; a missing control means a
/// single page.
fn parse_total_pages(document: &scraper::Html) -> Result<usize> {
    let page_selector = Selector::parse(".action-container-pages a.mod-page")?;
    Ok(document
        .select(&page_selector)
        .filter_map(|e| e.text().next().and_then(|t| t.trim().parse::<usize>().ok()))
        .max()
        .unwrap_or(1))
}

fn parse_match_page(document: &scraper::Html) -> Result<Vec<UpcomingMatch>> {
    let item_selector = Selector::parse("a.wf-module-item")?;
    document
        .select(&item_selector)
        .enumerate()
        .map(|(index, element)| parse_match_item(element, index))
        .collect()
}

fn parse_match_item(element: ElementRef, index: usize) -> Result<UpcomingMatch> {
    let match_page = require_attr(element, "href", "match link", index)?;

    let team_selector = Selector::parse(".match-item-vs-team-name")?;
    let (team1, team2) = element
        .select(&team_selector)
        .map(|t| node_text(&t))
        .collect_tuple()
        .ok_or(VlrError::Extraction {
            field: "team names",
            index,
        })?;

    let flag_selector = Selector::parse(".flag")?;
    let (flag1, flag2) = element
        .select(&flag_selector)
        .map(|f| flag_key(f.value().attr("class").unwrap_or_default()))
        .collect_tuple()
        .ok_or(VlrError::Extraction {
            field: "team flags",
            index,
        })?;

    let score_selector = Selector::parse(".match-item-vs-team-score")?;
    let (score1, score2) = element
        .select(&score_selector)
        .map(|s| node_text(&s))
        .collect_tuple()
        .ok_or(VlrError::Extraction {
            field: "team scores",
            index,
        })?;

    let eta_selector = Selector::parse(".match-item-eta")?;
    let eta = full_text(&require_first(element, &eta_selector, "match eta", index)?);
    let time_until_match = format_eta(&eta, " from now");

    let series_selector = Selector::parse(".match-item-event-series")?;
    let round_info = node_text(&require_first(
        element,
        &series_selector,
        "round info",
        index,
    )?);

    // The event block renders the series on its first line and the
    // tournament on the second; single-line blocks are the name itself.
    let event_selector = Selector::parse(".match-item-event")?;
    let tournament_name = element.select(&event_selector).next().map(|event| {
        let text = full_text(&event).replace('\t', " ");
        let text = text.trim();
        match text.lines().nth(1) {
            Some(second) => second.trim().to_string(),
            None => text.to_string(),
        }
    });

    let icon_selector = Selector::parse("img")?;
    let tournament_icon = require_first(element, &icon_selector, "tournament icon", index)
        .and_then(|img| require_attr(img, "src", "tournament icon", index))
        .map(|src| normalize_img_url(&src))?;

    Ok(UpcomingMatch {
        team1,
        team2,
        flag1,
        flag2,
        score1,
        score2,
        time_until_match,
        round_info,
        tournament_name,
        tournament_icon,
        match_page,
        match_stream: Vec::new(),
    })
}

/// Fetch stream lists for matches whose time-state is live or imminent.
async fn attach_streams(
    client: &reqwest::Client,
    matches: Vec<UpcomingMatch>,
) -> Result<Vec<UpcomingMatch>> {
    let mut out = Vec::with_capacity(matches.len());
    for mut item in matches {
        if item.time_until_match == "LIVE" || item.time_until_match.contains("Upcoming") {
            item.match_stream = streams::get_streams(client, &item.match_page).await?.segments;
        }
        out.push(item);
    }
    Ok(out)
}
