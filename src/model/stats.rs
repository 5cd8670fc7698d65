use serde::Serialize;

/// One row of the player statistics table. All metrics are kept as the
/// display text the site renders; the API forwards them untouched.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatRow {
    pub player: String,
    pub org: String,
    pub average_combat_score: String,
    pub kill_deaths: String,
    pub kill_assists_survived_traded: String,
    pub average_damage_per_round: String,
    pub kills_per_round: String,
    pub assists_per_round: String,
    pub first_kills_per_round: String,
    pub first_deaths_per_round: String,
    pub headshot_percentage: String,
    pub clutch_success_percentage: String,
}

/// Region filter for the player statistics table.
///
/// `FromStr` accepts the short codes the API exposes; the display form is
/// what the upstream query string expects.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum StatsRegion {
    #[strum(serialize = "na")]
    NorthAmerica,
    #[strum(serialize = "eu")]
    Europe,
    #[strum(serialize = "ap")]
    AsiaPacific,
    #[strum(serialize = "sa")]
    LatinAmerica,
    #[strum(serialize = "jp")]
    Japan,
    #[strum(serialize = "oce")]
    Oceania,
    #[strum(serialize = "mn")]
    Mena,
}

/// Time window for the player statistics table.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum StatsTimespan {
    #[default]
    #[strum(serialize = "30")]
    Days30,
    #[strum(serialize = "60")]
    Days60,
    #[strum(serialize = "90")]
    Days90,
}
