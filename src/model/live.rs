use serde::Serialize;

/// The single current or next live match from the vlr.gg home page.
#[derive(Debug, Clone, Serialize)]
pub struct LiveScoreItem {
    pub team1: String,
    pub team2: String,
    pub flag1: String,
    pub flag2: String,
    pub score1: String,
    pub score2: String,
    /// In-progress round counts; `"N/A"` when the match has not started.
    pub round1: String,
    pub round2: String,
    pub time_until_match: String,
    pub round_info: String,
    pub tournament_name: String,
    pub unix_timestamp: i64,
    pub match_page: String,
}
