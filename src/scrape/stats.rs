use itertools::Itertools;
use scraper::{ElementRef, Selector};
use tracing::{debug, instrument};

use crate::error::{Result, VlrError};
use crate::model::{PlayerStatRow, SegmentList, StatsRegion, StatsTimespan};
use crate::scrape::{self, full_text, node_text, require_first, BASE_URL};

#[instrument(skip(client))]
pub(crate) async fn get_player_stats(
    client: &reqwest::Client,
    region: StatsRegion,
    timespan: StatsTimespan,
) -> Result<SegmentList<PlayerStatRow>> {
    let url = format!(
        "{BASE_URL}/stats/?event_group_id=all&event_id=all&region={region}&country=all\
         &min_rounds=200&min_rating=1550&agent=all&map_id=all&timespan={timespan}d"
    );
    let (document, status) = scrape::get_document(client, &url).await?;
    let rows = parse_stats(&document);
    scrape::assert_success(&url, status)?;
    let rows = rows?;
    debug!(count = rows.len(), %region, %timespan, "parsed player stats");
    Ok(SegmentList {
        status: status.as_u16(),
        segments: rows,
    })
}

fn parse_stats(document: &scraper::Html) -> Result<Vec<PlayerStatRow>> {
    let row_selector = Selector::parse("tbody tr")?;
    document
        .select(&row_selector)
        .enumerate()
        .map(|(index, row)| parse_stat_row(row, index))
        .collect()
}

fn parse_stat_row(element: ElementRef, index: usize) -> Result<PlayerStatRow> {
    // The leading cell holds alias and org as its first two words; teams
    // without an org simply omit the second word.
    let player_cell_selector = Selector::parse("td")?;
    let player_cell = require_first(element, &player_cell_selector, "player name", index)?;
    let cell_text = full_text(&player_cell).replace('\t', "").replace('\n', " ");
    let mut words = cell_text.split_whitespace();
    let player = words
        .next()
        .ok_or(VlrError::Extraction {
            field: "player name",
            index,
        })?
        .to_string();
    let org = words.next().unwrap_or("N/A").to_string();

    // The metric cells carry no distinguishing classes, so position is the
    // only contract: exactly ten, in table order.
    let cell_selector = Selector::parse("td.mod-color-sq")?;
    let (acs, kd, kast, adr, kpr, apr, fkpr, fdpr, hs, cl) = element
        .select(&cell_selector)
        .map(|cell| node_text(&cell))
        .collect_tuple()
        .ok_or(VlrError::Extraction {
            field: "stat cells",
            index,
        })?;

    Ok(PlayerStatRow {
        player,
        org,
        average_combat_score: acs,
        kill_deaths: kd,
        kill_assists_survived_traded: kast,
        average_damage_per_round: adr,
        kills_per_round: kpr,
        assists_per_round: apr,
        first_kills_per_round: fkpr,
        first_deaths_per_round: fdpr,
        headshot_percentage: hs,
        clutch_success_percentage: cl,
    })
}
