use scraper::{ElementRef, Selector};
use tracing::{debug, instrument};

use crate::error::{Result, VlrError};
use crate::model::{RankRegion, SegmentList, TeamRanking};
use crate::scrape::{self, clean_text, full_text, node_text, require_attr, require_first, BASE_URL};

// Teams the site has no real logo for point at this placeholder.
const PLACEHOLDER_LOGO: &str = "/img/vlr/tmp/vlr.png";

#[instrument(skip(client))]
pub(crate) async fn get_rankings(
    client: &reqwest::Client,
    region: RankRegion,
) -> Result<SegmentList<TeamRanking>> {
    let url = format!("{BASE_URL}/rankings/{region}");
    let (document, status) = scrape::get_document(client, &url).await?;
    let rows = parse_rankings(&document);
    scrape::assert_success(&url, status)?;
    let rows = rows?;
    debug!(count = rows.len(), %region, "parsed team rankings");
    Ok(SegmentList {
        status: status.as_u16(),
        segments: rows,
    })
}

fn parse_rankings(document: &scraper::Html) -> Result<Vec<TeamRanking>> {
    let item_selector = Selector::parse("div.rank-item")?;
    document
        .select(&item_selector)
        .enumerate()
        .map(|(index, element)| parse_rank_item(element, index))
        .collect()
}

fn parse_rank_item(element: ElementRef, index: usize) -> Result<TeamRanking> {
    let rank_selector = Selector::parse("div.rank-item-rank-num")?;
    let rank = node_text(&require_first(element, &rank_selector, "rank", index)?);

    // The name cell appends the rank as a fragment (`Sentinels#1`).
    let team_selector = Selector::parse("div.ge-text")?;
    let team_raw = full_text(&require_first(element, &team_selector, "team name", index)?);
    let team = team_raw
        .split('#')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let logo_selector = Selector::parse("a.rank-item-team img")?;
    let logo = require_first(element, &logo_selector, "team logo", index)
        .and_then(|img| require_attr(img, "src", "team logo", index))?
        .replace(PLACEHOLDER_LOGO, "");

    let country_selector = Selector::parse("div.rank-item-team-country")?;
    let country = node_text(&require_first(element, &country_selector, "country", index)?);

    // The last-played cell collapses to text like `3w agovs.Fnatic`; the
    // first `v` begins the vs marker and the `o` split lands after `ago`.
    let last_selector = Selector::parse("a.rank-item-last")?;
    let last = require_first(element, &last_selector, "last played", index)?;
    let last_text = full_text(&last).replace(['\n', '\t'], "");
    let last_played = last_text
        .split('v')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();
    let last_played_team = last_text
        .split('o')
        .nth(1)
        .ok_or(VlrError::Extraction {
            field: "last played opponent",
            index,
        })?
        .replace('.', ". ")
        .trim()
        .to_string();

    let last_logo_selector = Selector::parse("a.rank-item-last img")?;
    let last_played_team_logo = require_first(
        element,
        &last_logo_selector,
        "last played logo",
        index,
    )
    .and_then(|img| require_attr(img, "src", "last played logo", index))?;

    let record_selector = Selector::parse("div.rank-item-record")?;
    let record = clean_text(&full_text(&require_first(
        element,
        &record_selector,
        "record",
        index,
    )?));

    let earnings_selector = Selector::parse("div.rank-item-earnings")?;
    let earnings = clean_text(&full_text(&require_first(
        element,
        &earnings_selector,
        "earnings",
        index,
    )?));

    Ok(TeamRanking {
        rank,
        team,
        country,
        last_played,
        last_played_team,
        last_played_team_logo,
        record,
        earnings,
        logo,
    })
}
