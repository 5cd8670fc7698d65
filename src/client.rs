use std::time::Duration;

use reqwest::StatusCode;
use tracing::instrument;

use crate::cache::ResultsCache;
use crate::error::Result;
use crate::model::*;
use crate::scrape;

/// The main entry point for the vlr.gg data core.
///
/// `VlrClient` wraps a [`reqwest::Client`], owns the results cache, and
/// exposes one method per public operation. Construct it once at process
/// start and hand it to the HTTP layer; every method returns a
/// JSON-serializable [`SegmentList`] the routes can forward verbatim.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> vlrgg_api::Result<()> {
/// use vlrgg_api::VlrClient;
///
/// let client = VlrClient::new();
/// let news = client.recent_news().await?;
/// println!("{} articles", news.segments.len());
/// # Ok(())
/// # }
/// ```
pub struct VlrClient {
    http: reqwest::Client,
    results_cache: ResultsCache,
}

impl VlrClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http: client,
            results_cache: ResultsCache::new(),
        }
    }

    /// Override the results cache TTL and retained-entry bound.
    pub fn with_results_cache(mut self, ttl: Duration, max_entries: usize) -> Self {
        self.results_cache = ResultsCache::with_config(ttl, max_entries);
        self
    }

    /// Fetch the most recent news articles.
    #[instrument(skip(self))]
    pub async fn recent_news(&self) -> Result<SegmentList<NewsItem>> {
        scrape::news::get_recent_news(&self.http).await
    }

    /// Fetch every page of upcoming matches, with stream lists attached to
    /// live and imminent ones.
    #[instrument(skip(self))]
    pub async fn upcoming_matches(&self) -> Result<SegmentList<UpcomingMatch>> {
        scrape::matches::get_upcoming_matches(&self.http).await
    }

    /// Fetch completed match results through the time-boxed cache.
    ///
    /// Within the TTL this performs no network traffic; on refresh, newly
    /// completed matches are merged ahead of everything already cached. A
    /// refresh that fails against a warm cache serves the stale snapshot.
    #[instrument(skip(self))]
    pub async fn match_results(&self) -> Result<SegmentList<CompletedMatch>> {
        let segments = self
            .results_cache
            .get_with(async {
                scrape::results::get_match_results(&self.http)
                    .await
                    .map(|r| r.segments)
            })
            .await?;
        Ok(SegmentList {
            status: StatusCode::OK.as_u16(),
            segments,
        })
    }

    /// Fetch the current or next live match from the home page.
    #[instrument(skip(self))]
    pub async fn live_score(&self) -> Result<SegmentList<LiveScoreItem>> {
        scrape::live::get_live_score(&self.http).await
    }

    /// Fetch the team ranking table for a region.
    #[instrument(skip(self))]
    pub async fn rankings(&self, region: RankRegion) -> Result<SegmentList<TeamRanking>> {
        scrape::rankings::get_rankings(&self.http, region).await
    }

    /// Fetch the player statistics table for a region and time window.
    #[instrument(skip(self))]
    pub async fn player_stats(
        &self,
        region: StatsRegion,
        timespan: StatsTimespan,
    ) -> Result<SegmentList<PlayerStatRow>> {
        scrape::stats::get_player_stats(&self.http, region, timespan).await
    }

    /// Fetch the stream list for a match, given its site-relative path
    /// (`{id}/{slug}`).
    #[instrument(skip(self))]
    pub async fn streams(&self, match_path: &str) -> Result<SegmentList<StreamInfo>> {
        scrape::streams::get_streams(&self.http, match_path).await
    }
}

impl Default for VlrClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "hits live vlr.gg"]
    async fn live_recent_news() {
        let client = VlrClient::new();
        let news = client.recent_news().await.unwrap();

        assert_eq!(news.status, 200);
        assert!(!news.segments.is_empty());
        assert!(!news.segments[0].title.is_empty());
        assert!(!news.segments[0].author.is_empty());
    }

    #[tokio::test]
    #[ignore = "hits live vlr.gg"]
    async fn live_match_results_are_cached() {
        let client = VlrClient::new();
        let first = client.match_results().await.unwrap();
        let second = client.match_results().await.unwrap();

        assert!(!first.segments.is_empty());
        assert_eq!(first.segments.len(), second.segments.len());
    }

    #[tokio::test]
    #[ignore = "hits live vlr.gg"]
    async fn live_rankings() {
        let client = VlrClient::new();
        let rankings = client.rankings(RankRegion::Europe).await.unwrap();

        assert!(!rankings.segments.is_empty());
        assert!(!rankings.segments[0].team.is_empty());
    }

    #[tokio::test]
    #[ignore = "hits live vlr.gg"]
    async fn live_player_stats() {
        let client = VlrClient::new();
        let stats = client
            .player_stats(StatsRegion::Europe, StatsTimespan::Days30)
            .await
            .unwrap();

        assert!(!stats.segments.is_empty());
        assert!(!stats.segments[0].player.is_empty());
    }
}
