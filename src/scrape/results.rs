use itertools::Itertools;
use scraper::{ElementRef, Selector};
use tracing::{debug, instrument};

use crate::error::{Result, VlrError};
use crate::model::{CompletedMatch, SegmentList};
use crate::scrape::{
    self, clean_text, flag_key, full_text, node_text, normalize_img_url, require_attr,
    require_first, BASE_URL,
};

#[instrument(skip(client))]
pub(crate) async fn get_match_results(
    client: &reqwest::Client,
) -> Result<SegmentList<CompletedMatch>> {
    let url = format!("{BASE_URL}/matches/results");
    let (document, status) = scrape::get_document(client, &url).await?;
    let matches = parse_results(&document);
    scrape::assert_success(&url, status)?;
    let matches = matches?;
    debug!(count = matches.len(), "parsed match results");
    Ok(SegmentList {
        status: status.as_u16(),
        segments: matches,
    })
}

fn parse_results(document: &scraper::Html) -> Result<Vec<CompletedMatch>> {
    let item_selector = Selector::parse("a.wf-module-item")?;
    document
        .select(&item_selector)
        .enumerate()
        .map(|(index, element)| parse_result_item(element, index))
        .collect()
}

fn parse_result_item(element: ElementRef, index: usize) -> Result<CompletedMatch> {
    let match_page = require_attr(element, "href", "match link", index)?;

    let eta_selector = Selector::parse("div.ml-eta")?;
    let eta = node_text(&require_first(
        element,
        &eta_selector,
        "completion time",
        index,
    )?);
    let time_completed = format!("{eta} ago");

    let series_selector = Selector::parse("div.match-item-event-series")?;
    let round_info = clean_text(
        &full_text(&require_first(
            element,
            &series_selector,
            "round info",
            index,
        )?)
        .replace('\u{2013}', "-"),
    );

    // Unlike the schedule pages, results always render the series line above
    // the tournament line, so the second line is required here.
    let event_selector = Selector::parse("div.match-item-event")?;
    let event_text = full_text(&require_first(
        element,
        &event_selector,
        "tournament name",
        index,
    )?)
    .replace('\t', " ");
    let tournament_name = event_text
        .trim()
        .lines()
        .nth(1)
        .ok_or(VlrError::Extraction {
            field: "tournament name",
            index,
        })?
        .trim()
        .to_string();

    let icon_selector = Selector::parse("img")?;
    let tournament_icon = require_first(element, &icon_selector, "tournament icon", index)
        .and_then(|img| require_attr(img, "src", "tournament icon", index))
        .map(|src| normalize_img_url(&src))?;

    let vs_selector = Selector::parse("div.match-item-vs")?;
    let vs = require_first(element, &vs_selector, "team columns", index)?;
    let columns_selector = Selector::parse("div:nth-child(2)")?;
    let blob = full_text(&require_first(
        vs,
        &columns_selector,
        "team columns",
        index,
    )?);
    let (team1, score1, team2, score2) = split_team_score_columns(&clean_text(&blob), index)?;

    let flag_selector = Selector::parse(".flag")?;
    let (flag1, flag2) = element
        .select(&flag_selector)
        .map(|f| flag_key(f.value().attr("class").unwrap_or_default()))
        .collect_tuple()
        .ok_or(VlrError::Extraction {
            field: "team flags",
            index,
        })?;

    Ok(CompletedMatch {
        team1,
        team2,
        flag1,
        flag2,
        score1,
        score2,
        time_completed,
        round_info,
        tournament_name,
        tournament_icon,
        match_page,
    })
}

// Width of the space run the results page leaves between its two
// team/score columns.
const COLUMN_SEPARATOR: &str = "                                  ";

/// Split the combined team/score text of a results row into
/// `(team1, score1, team2, score2)`.
///
/// The row is whitespace-formatted text, so the split is purely positional:
/// `[team1, score1, filler.., team2, score2]`. Sensitive to the exact column
/// widths of the upstream page; a layout change surfaces here as an
/// extraction error rather than garbled names.
pub(crate) fn split_team_score_columns(
    blob: &str,
    index: usize,
) -> Result<(String, String, String, String)> {
    let fields = blob.split(COLUMN_SEPARATOR).collect_vec();
    if fields.len() < 5 {
        return Err(VlrError::Extraction {
            field: "team/score columns",
            index,
        });
    }
    let team1 = fields[0].trim().to_string();
    let score1 = fields[1].replace(' ', "");
    let team2 = fields[4].trim().to_string();
    let score2 = fields[fields.len() - 1].replace(' ', "");
    Ok((team1, score1, team2, score2))
}
