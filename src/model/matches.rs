use serde::Serialize;

/// A match scheduled (or live) on the /matches pages.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingMatch {
    pub team1: String,
    pub team2: String,
    pub flag1: String,
    pub flag2: String,
    pub score1: String,
    pub score2: String,
    pub time_until_match: String,
    pub round_info: String,
    pub tournament_name: Option<String>,
    pub tournament_icon: String,
    pub match_page: String,
    /// Only populated when the match is live or about to start; far-future
    /// matches skip the extra page fetch.
    pub match_stream: Vec<StreamInfo>,
}

/// A finished match from the /matches/results pages.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedMatch {
    pub team1: String,
    pub team2: String,
    pub flag1: String,
    pub flag2: String,
    pub score1: String,
    pub score2: String,
    pub time_completed: String,
    pub round_info: String,
    pub tournament_name: String,
    pub tournament_icon: String,
    pub match_page: String,
}

/// A stream advertised on a match page.
#[derive(Debug, Clone, Serialize)]
pub struct StreamInfo {
    pub title: String,
    pub href: String,
    pub platform: String,
}
