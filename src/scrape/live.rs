use itertools::Itertools;
use scraper::{ElementRef, Selector};
use tracing::{debug, instrument};

use crate::error::{Result, VlrError};
use crate::model::{LiveScoreItem, SegmentList};
use crate::scrape::{
    self, format_eta, full_text, home_flag_key, node_text, require_attr, require_first, BASE_URL,
};

#[instrument(skip(client))]
pub(crate) async fn get_live_score(client: &reqwest::Client) -> Result<SegmentList<LiveScoreItem>> {
    let url = BASE_URL.to_string();
    let (document, status) = scrape::get_document(client, &url).await?;
    let items = parse_live_score(&document);
    scrape::assert_success(&url, status)?;
    let items = items?;
    debug!("parsed home-page live match");
    Ok(SegmentList {
        status: status.as_u16(),
        segments: items,
    })
}

/// The home page lists several upcoming matches; only the first entry is
/// the current or next live match.
fn parse_live_score(document: &scraper::Html) -> Result<Vec<LiveScoreItem>> {
    let item_selector = Selector::parse(".js-home-matches-upcoming a.wf-module-item")?;
    let first = document
        .select(&item_selector)
        .next()
        .ok_or(VlrError::Extraction {
            field: "live match module",
            index: 0,
        })?;
    Ok(vec![parse_live_item(first)?])
}

fn parse_live_item(element: ElementRef) -> Result<LiveScoreItem> {
    let index = 0;

    let team_selector = Selector::parse(".h-match-team")?;
    let name_selector = Selector::parse(".h-match-team-name")?;
    let flag_selector = Selector::parse(".flag")?;
    let score_selector = Selector::parse(".h-match-team-score")?;
    let rounds_selector = Selector::parse(".h-match-team-rounds span.mod-t")?;

    let mut teams = Vec::new();
    for team in element.select(&team_selector) {
        let name = node_text(&require_first(team, &name_selector, "team name", index)?);
        let flag = require_first(team, &flag_selector, "team flag", index)
            .and_then(|f| require_attr(f, "class", "team flag", index))
            .map(|class| home_flag_key(&class))?;
        let score = node_text(&require_first(team, &score_selector, "team score", index)?);
        let rounds = team
            .select(&rounds_selector)
            .next()
            .map(|r| node_text(&r))
            .unwrap_or_else(|| "N/A".to_string());
        teams.push((name, flag, score, rounds));
    }
    let ((team1, flag1, score1, round1), (team2, flag2, score2, round2)) = teams
        .into_iter()
        .collect_tuple()
        .ok_or(VlrError::Extraction {
            field: "match teams",
            index,
        })?;

    let eta_selector = Selector::parse(".h-match-eta")?;
    let time_until_match = format_eta(
        &full_text(&require_first(element, &eta_selector, "match eta", index)?),
        " from now",
    );

    let event_selector = Selector::parse(".h-match-preview-event")?;
    let round_info = node_text(&require_first(element, &event_selector, "round info", index)?);

    let series_selector = Selector::parse(".h-match-preview-series")?;
    let tournament_name = node_text(&require_first(
        element,
        &series_selector,
        "tournament name",
        index,
    )?);

    let timestamp_selector = Selector::parse(".moment-tz-convert")?;
    let timestamp_raw = require_first(element, &timestamp_selector, "match timestamp", index)
        .and_then(|e| require_attr(e, "data-utc-ts", "match timestamp", index))?;
    let unix_timestamp =
        timestamp_raw
            .trim()
            .parse::<i64>()
            .map_err(|_| VlrError::MalformedData {
                field: "match timestamp",
                index,
                value: timestamp_raw.clone(),
            })?;

    let href = require_attr(element, "href", "match link", index)?;
    let match_page = format!("{BASE_URL}{href}");

    Ok(LiveScoreItem {
        team1,
        team2,
        flag1,
        flag2,
        score1,
        score2,
        round1,
        round2,
        time_until_match,
        round_info,
        tournament_name,
        unix_timestamp,
        match_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn home_page(timestamp: &str, with_rounds: bool) -> String {
        let rounds = if with_rounds {
            r#"<div class="h-match-team-rounds"><span class="mod-t">7</span></div>"#
        } else {
            ""
        };
        format!(
            r#"
            <div class="js-home-matches-upcoming">
              <a href="/531650/drx-vs-t1" class="wf-module-item mod-match">
                <div class="h-match-team">
                  <div class="h-match-team-name">DRX</div>
                  <span class="flag mod-16 mod-kr"></span>
                  <div class="h-match-team-score">1</div>
                  {rounds}
                </div>
                <div class="h-match-team">
                  <div class="h-match-team-name">T1</div>
                  <span class="flag mod-16 mod-kr"></span>
                  <div class="h-match-team-score">0</div>
                </div>
                <div class="h-match-eta">LIVE</div>
                <div class="h-match-preview">
                  <div class="h-match-preview-event">Playoffs: Grand Final</div>
                  <div class="h-match-preview-series">Pacific Stage 1</div>
                  <span class="moment-tz-convert" data-utc-ts="{timestamp}"></span>
                </div>
              </a>
              <a href="/531651/other-match" class="wf-module-item mod-match">
                <div class="h-match-team">
                  <div class="h-match-team-name">GenG</div>
                  <span class="flag mod-16 mod-kr"></span>
                  <div class="h-match-team-score">-</div>
                </div>
                <div class="h-match-team">
                  <div class="h-match-team-name">PRX</div>
                  <span class="flag mod-16 mod-sg"></span>
                  <div class="h-match-team-score">-</div>
                </div>
                <div class="h-match-eta">2h 10m</div>
                <div class="h-match-preview">
                  <div class="h-match-preview-event">Playoffs: Bronze</div>
                  <div class="h-match-preview-series">Pacific Stage 1</div>
                  <span class="moment-tz-convert" data-utc-ts="1746372600"></span>
                </div>
              </a>
            </div>"#
        )
    }

    #[test]
    fn parses_first_live_match_only() {
        let document = Html::parse_document(&home_page("1746352800", true));
        let items = parse_live_score(&document).unwrap();

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.team1, "DRX");
        assert_eq!(item.team2, "T1");
        assert_eq!(item.flag1, "flag_kr");
        assert_eq!(item.flag2, "flag_kr");
        assert_eq!(item.score1, "1");
        assert_eq!(item.score2, "0");
        assert_eq!(item.round1, "7");
        assert_eq!(item.round2, "N/A");
        assert_eq!(item.time_until_match, "LIVE");
        assert_eq!(item.round_info, "Playoffs: Grand Final");
        assert_eq!(item.tournament_name, "Pacific Stage 1");
        assert_eq!(item.unix_timestamp, 1746352800);
        assert_eq!(item.match_page, "https://www.vlr.gg/531650/drx-vs-t1");
    }

    #[test]
    fn malformed_timestamp_fails() {
        let document = Html::parse_document(&home_page("soon", false));
        let err = parse_live_score(&document).unwrap_err();
        assert!(matches!(
            err,
            VlrError::MalformedData {
                field: "match timestamp",
                ..
            }
        ));
    }

    #[test]
    fn empty_module_fails() {
        let document = Html::parse_document("<div class='js-home-matches-upcoming'></div>");
        let err = parse_live_score(&document).unwrap_err();
        assert!(matches!(
            err,
            VlrError::Extraction {
                field: "live match module",
                index: 0
            }
        ));
    }
}
