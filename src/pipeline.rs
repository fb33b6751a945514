//! Scrape pipeline
//!
//! Walks every team page, fetches each team's awards through the cache,
//! summarizes them and writes the ranked results.

use chrono::{DateTime, Datelike, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::time::Duration;

use crate::aggregate::{default_rookie_year, summarize};
use crate::cache::{CacheStore, FetchCoordinator, Partition};
use crate::client::TbaApi;
use crate::client::models::{Award, Team};
use crate::error::{Error, Result};
use crate::report::{AwardsReport, TeamAwards};

/// Settings for one scrape run
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub cache_file: PathBuf,
    pub output: PathBuf,
    pub sentinel_team: u32,
    pub request_delay: Duration,
    pub show_progress: bool,
}

/// Teams gathered by [`collect`]
#[derive(Debug, Default)]
pub struct Collected {
    pub teams: BTreeMap<u32, TeamAwards>,
    /// Confirmation time of the final team page fetch
    pub last_updated: Option<DateTime<Utc>>,
}

/// Coordinator whose store is written to the snapshot when dropped.
///
/// Covers early returns, cancellation and panics; [`SnapshotGuard::persist`]
/// saves explicitly and skips the save on drop.
pub struct SnapshotGuard<C: TbaApi> {
    coordinator: FetchCoordinator<C>,
    path: PathBuf,
    saved: bool,
}

impl<C: TbaApi> SnapshotGuard<C> {
    pub fn new(coordinator: FetchCoordinator<C>, path: PathBuf) -> Self {
        Self {
            coordinator,
            path,
            saved: false,
        }
    }

    pub fn persist(&mut self) {
        if let Err(e) = self.coordinator.store().save(&self.path) {
            log::warn!("Failed to save cache snapshot: {}", e);
        }
        self.saved = true;
    }
}

impl<C: TbaApi> Deref for SnapshotGuard<C> {
    type Target = FetchCoordinator<C>;

    fn deref(&self) -> &Self::Target {
        &self.coordinator
    }
}

impl<C: TbaApi> DerefMut for SnapshotGuard<C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.coordinator
    }
}

impl<C: TbaApi> Drop for SnapshotGuard<C> {
    fn drop(&mut self) {
        if !self.saved {
            log::debug!("Saving cache snapshot on early exit");
            self.persist();
        }
    }
}

/// Run a full scrape and write the results.
///
/// The cache snapshot is saved whether the scrape succeeds, fails or is
/// interrupted with Ctrl-C.
pub async fn run<C: TbaApi>(client: C, settings: &ScrapeSettings) -> Result<AwardsReport> {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    run_until(client, settings, ctrl_c).await
}

/// [`run`], abandoning the scrape with [`Error::Interrupted`] once
/// `interrupt` completes.
pub async fn run_until<C, F>(
    client: C,
    settings: &ScrapeSettings,
    interrupt: F,
) -> Result<AwardsReport>
where
    C: TbaApi,
    F: Future<Output = ()>,
{
    let store = CacheStore::open(&settings.cache_file);
    let mut coordinator = SnapshotGuard::new(
        FetchCoordinator::new(client, store).with_request_delay(settings.request_delay),
        settings.cache_file.clone(),
    );

    let result = tokio::select! {
        result = collect(&mut *coordinator, Utc::now().year(), settings.show_progress) => result,
        () = interrupt => {
            log::warn!("Interrupted, saving cache snapshot");
            Err(Error::Interrupted)
        }
    };
    coordinator.persist();

    let stats = coordinator.stats();
    log::info!(
        "Requests: {} cache hits, {} revalidated, {} fetched, {} failed",
        stats.cache_hits,
        stats.revalidated,
        stats.fetched,
        stats.failures
    );

    let collected = result?;
    if collected.teams.is_empty() {
        return Err(Error::NoData);
    }

    let report = AwardsReport::new(
        collected.teams,
        collected.last_updated,
        settings.sentinel_team,
    );
    report.save(&settings.output)?;
    log::info!(
        "Wrote {} teams to {}",
        report.teams.len(),
        settings.output.display()
    );

    Ok(report)
}

/// Fetch every team page and each listed team's awards.
pub async fn collect<C: TbaApi>(
    coordinator: &mut FetchCoordinator<C>,
    current_year: i32,
    show_progress: bool,
) -> Result<Collected> {
    let mut collected = Collected::default();

    for page in 0u32.. {
        let key = page.to_string();
        let Some(fetched) = coordinator
            .fetch(Partition::TeamPages, &key, &format!("/teams/{}", page))
            .await
        else {
            break;
        };

        let teams: Vec<Team> = match serde_json::from_value(fetched.payload) {
            Ok(teams) => teams,
            Err(e) => {
                log::warn!("Team page {} is not a list of teams: {}", page, e);
                break;
            }
        };
        collected.last_updated = Some(fetched.retrieved_at);
        if teams.is_empty() {
            log::debug!("Team page {} is empty, done", page);
            break;
        }

        let progress = progress_bar(teams.len() as u64, page, show_progress);
        for team in &teams {
            progress.set_message(team.key.clone());
            if let Some(awards) = team_awards(coordinator, team, current_year).await {
                collected.teams.insert(team.team_number, awards);
            }
            progress.inc(1);
        }
        progress.finish_and_clear();
    }

    log::info!("Collected awards for {} teams", collected.teams.len());
    Ok(collected)
}

async fn team_awards<C: TbaApi>(
    coordinator: &mut FetchCoordinator<C>,
    team: &Team,
    current_year: i32,
) -> Option<TeamAwards> {
    let path = format!("/team/{}/awards", team.key);
    let fetched = coordinator
        .fetch(Partition::TeamAwards, &team.key, &path)
        .await;

    let Some(fetched) = fetched else {
        log::warn!("Award search for team {} returned None.", team.key);
        return None;
    };

    let awards: Vec<Award> = match serde_json::from_value(fetched.payload) {
        Ok(awards) => awards,
        Err(e) => {
            log::warn!("Awards for team {} did not decode: {}", team.key, e);
            return None;
        }
    };

    let summaries = summarize(team, &awards, current_year);
    let rookie_year = team
        .rookie_year
        .unwrap_or_else(|| default_rookie_year(current_year));
    Some(TeamAwards {
        team_number: team.team_number,
        team_name: team.nickname.clone(),
        rookie_year: Some(rookie_year),
        last_updated: fetched.retrieved_at,
        awards,
        summaries,
    })
}

fn progress_bar(len: u64, page: u32, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template("page {prefix} [{bar:40}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let bar = ProgressBar::new(len).with_style(style);
    bar.set_prefix(page.to_string());
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheEntry;
    use crate::client::MockTbaClient;
    use crate::error::ApiError;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn team_json(number: u32, rookie_year: Option<i32>) -> Value {
        json!({
            "key": format!("frc{}", number),
            "team_number": number,
            "nickname": format!("Team {}", number),
            "rookie_year": rookie_year,
            "city": "Ignored",
        })
    }

    fn award_json(name: &str, award_type: u16, year: i32) -> Value {
        json!({
            "name": name,
            "award_type": award_type,
            "year": year,
            "event_key": format!("{}test", year),
            "recipient_list": [],
        })
    }

    fn hexfecta_json(year: i32) -> Value {
        json!([
            award_json("Engineering Excellence Award", 21, year),
            award_json("Quality Award", 17, year),
            award_json("Industrial Design Award", 16, year),
            award_json("Creativity Award", 20, year),
            award_json("Autonomous Award", 71, year),
            award_json("Innovation in Control Award", 29, year),
        ])
    }

    fn settings(dir: &TempDir) -> ScrapeSettings {
        ScrapeSettings {
            cache_file: dir.path().join("tba_api_cache.json"),
            output: dir.path().join("frc_team_awards.json"),
            sentinel_team: 2200,
            request_delay: Duration::ZERO,
            show_progress: false,
        }
    }

    fn coordinator(mock: MockTbaClient) -> FetchCoordinator<MockTbaClient> {
        FetchCoordinator::new(mock, CacheStore::default()).with_request_delay(Duration::ZERO)
    }

    fn coordinator_with(store: CacheStore) -> FetchCoordinator<MockTbaClient> {
        FetchCoordinator::new(MockTbaClient::new(), store).with_request_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_collect_walks_pages_until_empty() {
        let mock = MockTbaClient::new()
            .with_fresh(
                "/teams/0",
                json!([team_json(1, Some(1997)), team_json(2200, Some(2007))]),
                Some("p0"),
            )
            .with_fresh("/teams/1", json!([team_json(254, Some(1999))]), None)
            .with_fresh("/teams/2", json!([]), None)
            .with_fresh("/team/frc1/awards", json!([]), None)
            .with_fresh("/team/frc2200/awards", hexfecta_json(2019), Some("a"))
            .with_fresh("/team/frc254/awards", hexfecta_json(2018), None);
        let mut coord = coordinator(mock);

        let collected = collect(&mut coord, 2025, false).await.unwrap();

        assert_eq!(
            collected.teams.keys().copied().collect::<Vec<_>>(),
            vec![1, 254, 2200]
        );
        assert_eq!(collected.teams[&2200].summaries.tracked_set_completions, 1);
        assert_eq!(collected.teams[&1].summaries.total_awards, 0);
        assert_eq!(coord.client().call_count(), 6);
        assert_eq!(coord.store().partition_len(Partition::TeamPages), 3);
        assert_eq!(coord.store().partition_len(Partition::TeamAwards), 3);
        assert!(collected.last_updated.is_some());
    }

    #[tokio::test]
    async fn test_collect_skips_failed_team() {
        let mock = MockTbaClient::new()
            .with_fresh(
                "/teams/0",
                json!([team_json(1, Some(1997)), team_json(2, Some(1998))]),
                None,
            )
            .with_fresh("/teams/1", json!([]), None)
            .with_error("/team/frc1/awards", || ApiError::ServerError("503".into()))
            .with_fresh("/team/frc2/awards", json!([]), None);
        let mut coord = coordinator(mock);

        let collected = collect(&mut coord, 2025, false).await.unwrap();

        assert_eq!(collected.teams.keys().copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(coord.stats().failures, 1);
    }

    #[tokio::test]
    async fn test_collect_stops_on_failed_page() {
        let mock = MockTbaClient::new()
            .with_fresh("/teams/0", json!([team_json(1, Some(1997))]), None)
            .with_error("/teams/1", || ApiError::Network("down".into()))
            .with_fresh("/team/frc1/awards", json!([]), None);
        let mut coord = coordinator(mock);

        let collected = collect(&mut coord, 2025, false).await.unwrap();

        assert_eq!(collected.teams.len(), 1);
        assert_eq!(coord.client().call_count(), 3);
    }

    #[tokio::test]
    async fn test_collect_stops_on_undecodable_page() {
        let mock = MockTbaClient::new().with_fresh("/teams/0", json!({"error": "nope"}), None);
        let mut coord = coordinator(mock);

        let collected = collect(&mut coord, 2025, false).await.unwrap();

        assert!(collected.teams.is_empty());
        assert_eq!(coord.client().call_count(), 1);
    }

    #[tokio::test]
    async fn test_collect_skips_undecodable_awards() {
        let mock = MockTbaClient::new()
            .with_fresh("/teams/0", json!([team_json(1, Some(1997))]), None)
            .with_fresh("/teams/1", json!([]), None)
            .with_fresh("/team/frc1/awards", json!({"not": "a list"}), None);
        let mut coord = coordinator(mock);

        let collected = collect(&mut coord, 2025, false).await.unwrap();

        assert!(collected.teams.is_empty());
    }

    #[tokio::test]
    async fn test_collect_missing_rookie_year() {
        let mock = MockTbaClient::new()
            .with_fresh("/teams/0", json!([team_json(9999, None)]), None)
            .with_fresh("/teams/1", json!([]), None)
            .with_fresh(
                "/team/frc9999/awards",
                json!([award_json("Spirit Award", 30, 2024)]),
                None,
            );
        let mut coord = coordinator(mock);

        let collected = collect(&mut coord, 2025, false).await.unwrap();

        assert_eq!(collected.teams[&9999].summaries.years_active, 2);
        assert_eq!(collected.teams[&9999].rookie_year, Some(2024));
    }

    #[tokio::test]
    async fn test_collect_last_updated_from_final_page() {
        let page0_at = Utc::now() - chrono::Duration::hours(3);
        let page1_at = Utc::now() - chrono::Duration::hours(1);
        let mut store = CacheStore::default();
        store.put(
            Partition::TeamPages,
            "0",
            CacheEntry::new(json!([team_json(2200, Some(2007))]), None, page0_at),
        );
        store.put(
            Partition::TeamPages,
            "1",
            CacheEntry::new(json!([]), None, page1_at),
        );
        store.put(
            Partition::TeamAwards,
            "frc2200",
            CacheEntry::new(hexfecta_json(2019), None, page0_at),
        );
        let mut coord = FetchCoordinator::new(MockTbaClient::new(), store)
            .with_request_delay(Duration::ZERO);

        let collected = collect(&mut coord, 2025, false).await.unwrap();

        assert_eq!(coord.client().call_count(), 0);
        assert_eq!(collected.last_updated, Some(page1_at));
        assert_eq!(collected.teams[&2200].last_updated, page0_at);
    }

    #[tokio::test]
    async fn test_run_writes_report_and_snapshot() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let mock = MockTbaClient::new()
            .with_fresh("/teams/0", json!([team_json(2200, Some(2007))]), Some("p0"))
            .with_fresh("/teams/1", json!([]), None)
            .with_fresh("/team/frc2200/awards", hexfecta_json(2019), Some("a1"));

        let report = run(mock, &settings).await.unwrap();

        assert_eq!(report.summaries.top_n.len(), 1);
        assert_eq!(AwardsReport::load(&settings.output).unwrap(), report);

        let store = CacheStore::open(&settings.cache_file);
        assert_eq!(store.len(), 3);
        assert_eq!(
            store
                .get(Partition::TeamAwards, "frc2200")
                .and_then(|e| e.validator.clone()),
            Some("a1".to_string())
        );
    }

    #[tokio::test]
    async fn test_run_uses_fresh_snapshot_without_requests() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);

        let mut store = CacheStore::default();
        store.put(
            Partition::TeamPages,
            "0",
            CacheEntry::new(json!([team_json(2200, Some(2007))]), None, Utc::now()),
        );
        store.put(
            Partition::TeamPages,
            "1",
            CacheEntry::new(json!([]), None, Utc::now()),
        );
        store.put(
            Partition::TeamAwards,
            "frc2200",
            CacheEntry::new(hexfecta_json(2019), None, Utc::now()),
        );
        store.save(&settings.cache_file).unwrap();

        let mock = MockTbaClient::new();
        let report = run(mock.clone(), &settings).await.unwrap();

        assert_eq!(mock.call_count(), 0);
        assert_eq!(report.teams[&2200].summaries.tracked_set_completions, 1);
    }

    #[tokio::test]
    async fn test_run_interrupted_keeps_fetched_responses() {
        let dir = TempDir::new().unwrap();
        let settings = ScrapeSettings {
            request_delay: Duration::from_secs(5),
            ..settings(&dir)
        };
        let mock = MockTbaClient::new()
            .with_fresh("/teams/0", json!([team_json(2200, Some(2007))]), Some("p0"))
            .with_fresh("/team/frc2200/awards", hexfecta_json(2019), None);

        let interrupt = tokio::time::sleep(Duration::from_millis(100));
        let err = run_until(mock.clone(), &settings, interrupt)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Interrupted));
        assert_eq!(mock.call_count(), 1);
        assert!(!settings.output.exists());
        let store = CacheStore::open(&settings.cache_file);
        assert_eq!(
            store
                .get(Partition::TeamPages, "0")
                .and_then(|e| e.validator.clone()),
            Some("p0".to_string())
        );
    }

    #[test]
    fn test_snapshot_guard_saves_on_panic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tba_api_cache.json");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut store = CacheStore::default();
            store.put(
                Partition::TeamPages,
                "0",
                CacheEntry::new(json!([]), Some("p0".to_string()), Utc::now()),
            );
            let _guard = SnapshotGuard::new(coordinator_with(store), path.clone());
            panic!("scrape blew up");
        }));

        assert!(result.is_err());
        let store = CacheStore::open(&path);
        assert_eq!(store.partition_len(Partition::TeamPages), 1);
    }

    #[test]
    fn test_snapshot_guard_persist_skips_drop_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tba_api_cache.json");

        let mut guard = SnapshotGuard::new(coordinator_with(CacheStore::default()), path.clone());
        guard.persist();
        std::fs::remove_file(&path).unwrap();
        drop(guard);

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_run_no_data_still_saves_snapshot() {
        let dir = TempDir::new().unwrap();
        let settings = settings(&dir);
        let mock = MockTbaClient::new().with_fresh("/teams/0", json!([]), Some("p0"));

        let err = run(mock, &settings).await.unwrap_err();

        assert!(matches!(err, Error::NoData));
        assert!(!settings.output.exists());
        let store = CacheStore::open(&settings.cache_file);
        assert_eq!(store.partition_len(Partition::TeamPages), 1);
    }
}
