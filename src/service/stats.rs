use std::collections::{HashMap, HashSet};

use sea_orm::ConnectionTrait;

use crate::{
    data::{
        driver::DriverRepository,
        driver_session::DriverSessionRepository,
        lap::LapRepository,
        session::SessionRepository,
        stats::{SessionResultInsert, StatsRepository},
    },
    error::Error,
    model::db::{
        ConstructorStatsModel, DriverModel, DriverSessionModel, DriverSessionStatsModel,
        DriverStatsModel, SessionModel,
    },
};

/// Championship points for race finishing positions 1 through 10.
pub const RACE_POINTS: [i32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// Championship points for sprint finishing positions 1 through 8.
pub const SPRINT_POINTS: [i32; 8] = [8, 7, 6, 5, 4, 3, 2, 1];

/// Whether a session scores championship points (grand prix or sprint race).
pub fn is_race(session_type: &str) -> bool {
    session_type == "Race"
}

/// Whether a session is a sprint race, which uses the reduced points table.
pub fn is_sprint(session_type: &str, session_name: &str) -> bool {
    session_type == "Race" && session_name == "Sprint"
}

/// Championship points awarded for a finishing position in the given session.
///
/// Unclassified finishes, positions outside the scoring range, and non-race
/// sessions all score zero.
pub fn points_for(session_type: &str, session_name: &str, final_position: Option<i32>) -> i32 {
    let Some(position) = final_position else {
        return 0;
    };

    if position < 1 || !is_race(session_type) {
        return 0;
    }

    let table: &[i32] = if is_sprint(session_type, session_name) {
        &SPRINT_POINTS
    } else {
        &RACE_POINTS
    };

    table.get(position as usize - 1).copied().unwrap_or(0)
}

/// Accumulated season totals for one driver, keyed by car number.
#[derive(Default)]
struct DriverTotals {
    full_name: String,
    team_name: Option<String>,
    team_colour: Option<String>,
    country_code: Option<String>,
    headshot_url: Option<String>,
    is_active: bool,
    points: i32,
    races: i32,
    wins: i32,
    podiums: i32,
    fastest_laps: i32,
    position_sum: i32,
    position_count: i32,
}

/// Accumulated season totals for one constructor, keyed by team name.
#[derive(Default)]
struct ConstructorTotals {
    team_colour: Option<String>,
    points: i32,
    wins: i32,
    podiums: i32,
    fastest_laps: i32,
    race_sessions: HashSet<i32>,
}

/// Recomputes the derived statistics tables for a season.
///
/// Statistics are a pure function of the raw tables: each refresh rewrites the
/// season's partition of `driver_stats`, `constructor_stats` and
/// `driver_session_stats` from scratch, so a refresh after any data change
/// converges on the same result.
pub struct StatsService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StatsService<'a, C> {
    /// Creates a new instance of [`StatsService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Rewrites all derived statistics for a season.
    ///
    /// Standings rank by points descending with ties broken by car number for
    /// drivers and by team name for constructors, so ranks are deterministic.
    /// Drivers with no race participation in the season are excluded, as are
    /// constructor rows for drivers without a team.
    pub async fn refresh_year(&self, year: i32) -> Result<(), Error> {
        let session_repo = SessionRepository::new(self.db);
        let driver_repo = DriverRepository::new(self.db);
        let driver_session_repo = DriverSessionRepository::new(self.db);
        let stats_repo = StatsRepository::new(self.db);

        let sessions = session_repo.find_by_year(year).await?;
        let session_ids: Vec<i32> = sessions.iter().map(|session| session.id).collect();
        let participations = driver_session_repo.find_by_session_ids(&session_ids).await?;

        let driver_ids: Vec<i32> = participations
            .iter()
            .map(|participation| participation.driver_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let driver_by_id: HashMap<i32, DriverModel> = driver_repo
            .find_by_ids(&driver_ids)
            .await?
            .into_iter()
            .map(|driver| (driver.id, driver))
            .collect();
        let session_by_id: HashMap<i32, &SessionModel> =
            sessions.iter().map(|session| (session.id, session)).collect();

        let fastest_links = self
            .refresh_fastest_laps(&sessions, &participations, &driver_by_id)
            .await?;

        let mut results: Vec<SessionResultInsert> = Vec::new();
        let mut driver_totals: HashMap<i32, DriverTotals> = HashMap::new();
        let mut constructor_totals: HashMap<String, ConstructorTotals> = HashMap::new();

        for participation in &participations {
            let Some(session) = session_by_id.get(&participation.session_id) else {
                continue;
            };
            let Some(driver) = driver_by_id.get(&participation.driver_id) else {
                continue;
            };

            let fastest_lap = fastest_links.contains(&participation.id);
            let points = points_for(
                &session.session_type,
                &session.session_name,
                participation.final_position,
            );

            results.push(SessionResultInsert {
                driver_number: driver.driver_number,
                full_name: driver.full_name.clone(),
                team_name: driver.team_name.clone(),
                session_key: session.session_key,
                session_name: session.session_name.clone(),
                session_type: session.session_type.clone(),
                location: session.location.clone(),
                date_start: session.date_start,
                final_position: participation.final_position,
                fastest_lap,
                points,
                year,
            });

            if !is_race(&session.session_type) {
                continue;
            }

            let totals = driver_totals
                .entry(driver.driver_number)
                .or_insert_with(|| DriverTotals {
                    full_name: driver.full_name.clone(),
                    team_name: driver.team_name.clone(),
                    team_colour: driver.team_colour.clone(),
                    country_code: driver.country_code.clone(),
                    headshot_url: driver.headshot_url.clone(),
                    is_active: driver.is_active,
                    ..Default::default()
                });

            totals.races += 1;
            totals.points += points;
            if participation.final_position == Some(1) {
                totals.wins += 1;
            }
            if matches!(participation.final_position, Some(position) if (1..=3).contains(&position))
            {
                totals.podiums += 1;
            }
            if fastest_lap {
                totals.fastest_laps += 1;
            }
            if let Some(position) = participation.final_position {
                totals.position_sum += position;
                totals.position_count += 1;
            }

            if let Some(team_name) = &driver.team_name {
                let team = constructor_totals
                    .entry(team_name.clone())
                    .or_insert_with(|| ConstructorTotals {
                        team_colour: driver.team_colour.clone(),
                        ..Default::default()
                    });

                team.points += points;
                if participation.final_position == Some(1) {
                    team.wins += 1;
                }
                if matches!(participation.final_position, Some(position) if (1..=3).contains(&position))
                {
                    team.podiums += 1;
                }
                if fastest_lap {
                    team.fastest_laps += 1;
                }
                team.race_sessions.insert(session.id);
            }
        }

        let mut driver_rows: Vec<(i32, DriverTotals)> = driver_totals.into_iter().collect();
        driver_rows.sort_by(|(a_number, a), (b_number, b)| {
            b.points.cmp(&a.points).then(a_number.cmp(b_number))
        });
        let driver_rows: Vec<DriverStatsModel> = driver_rows
            .into_iter()
            .enumerate()
            .map(|(index, (driver_number, totals))| DriverStatsModel {
                driver_number,
                year,
                full_name: totals.full_name,
                team_name: totals.team_name,
                team_colour: totals.team_colour,
                country_code: totals.country_code,
                headshot_url: totals.headshot_url,
                is_active: totals.is_active,
                races: totals.races,
                points: totals.points,
                wins: totals.wins,
                podiums: totals.podiums,
                fastest_laps: totals.fastest_laps,
                average_position: (totals.position_count > 0)
                    .then(|| f64::from(totals.position_sum) / f64::from(totals.position_count)),
                position: index as i32 + 1,
            })
            .collect();

        let mut constructor_rows: Vec<(String, ConstructorTotals)> =
            constructor_totals.into_iter().collect();
        constructor_rows.sort_by(|(a_name, a), (b_name, b)| {
            b.points.cmp(&a.points).then(a_name.cmp(b_name))
        });
        let constructor_rows: Vec<ConstructorStatsModel> = constructor_rows
            .into_iter()
            .enumerate()
            .map(|(index, (team_name, totals))| ConstructorStatsModel {
                team_name,
                year,
                team_colour: totals.team_colour,
                position: index as i32 + 1,
                points: totals.points,
                podiums: totals.podiums,
                wins: totals.wins,
                fastest_laps: totals.fastest_laps,
                races: totals.race_sessions.len() as i32,
            })
            .collect();

        results.sort_by(|a, b| {
            a.date_start
                .cmp(&b.date_start)
                .then(a.driver_number.cmp(&b.driver_number))
        });

        stats_repo.replace_driver_stats(year, driver_rows).await?;
        stats_repo
            .replace_constructor_stats(year, constructor_rows)
            .await?;
        stats_repo.replace_session_results(year, results).await?;

        Ok(())
    }

    /// Recomputes fastest lap flags for every race session in the season.
    ///
    /// All flags in scope are cleared first, then the quickest timed lap per race
    /// session is flagged on both the lap and its participation. A timing tie
    /// resolves to the lower car number.
    ///
    /// # Returns
    /// Participation link ids holding a fastest lap after the refresh.
    async fn refresh_fastest_laps(
        &self,
        sessions: &[SessionModel],
        participations: &[DriverSessionModel],
        driver_by_id: &HashMap<i32, DriverModel>,
    ) -> Result<HashSet<i32>, Error> {
        let driver_session_repo = DriverSessionRepository::new(self.db);
        let lap_repo = LapRepository::new(self.db);

        let race_session_ids: HashSet<i32> = sessions
            .iter()
            .filter(|session| is_race(&session.session_type))
            .map(|session| session.id)
            .collect();
        let race_link_ids: Vec<i32> = participations
            .iter()
            .filter(|participation| race_session_ids.contains(&participation.session_id))
            .map(|participation| participation.id)
            .collect();

        let race_session_ids: Vec<i32> = race_session_ids.into_iter().collect();
        driver_session_repo
            .reset_fastest_laps(&race_session_ids)
            .await?;
        lap_repo.reset_fastest(&race_link_ids).await?;

        let link_info: HashMap<i32, (i32, i32)> = participations
            .iter()
            .filter_map(|participation| {
                let driver = driver_by_id.get(&participation.driver_id)?;
                Some((
                    participation.id,
                    (participation.session_id, driver.driver_number),
                ))
            })
            .collect();

        let timed_laps = lap_repo
            .find_timed_by_driver_session_ids(&race_link_ids)
            .await?;

        // Per race session: (lap_time, driver_number, lap_id, link_id) of the best lap.
        let mut best: HashMap<i32, (f64, i32, i32, i32)> = HashMap::new();
        for (lap_id, link_id, lap_time) in timed_laps {
            let Some((session_id, driver_number)) = link_info.get(&link_id) else {
                continue;
            };

            match best.get(session_id) {
                Some((best_time, best_number, _, _))
                    if lap_time > *best_time
                        || (lap_time == *best_time && driver_number >= best_number) => {}
                _ => {
                    best.insert(*session_id, (lap_time, *driver_number, lap_id, link_id));
                }
            }
        }

        let mut fastest_links = HashSet::new();
        for (_, _, lap_id, link_id) in best.into_values() {
            driver_session_repo.mark_fastest_lap(link_id).await?;
            lap_repo.mark_fastest(lap_id).await?;
            fastest_links.insert(link_id);
        }

        Ok(fastest_links)
    }

    /// Fetches the stored driver standings for a season, ordered by rank.
    pub async fn get_driver_standings(&self, year: i32) -> Result<Vec<DriverStatsModel>, Error> {
        let standings = StatsRepository::new(self.db).get_driver_stats(year).await?;

        Ok(standings)
    }

    /// Fetches the stored constructor standings for a season, ordered by rank.
    pub async fn get_constructor_standings(
        &self,
        year: i32,
    ) -> Result<Vec<ConstructorStatsModel>, Error> {
        let standings = StatsRepository::new(self.db)
            .get_constructor_stats(year)
            .await?;

        Ok(standings)
    }

    /// Fetches a driver's stored per-session results for a season in calendar order.
    pub async fn get_driver_season(
        &self,
        driver_number: i32,
        year: i32,
    ) -> Result<Vec<DriverSessionStatsModel>, Error> {
        let results = StatsRepository::new(self.db)
            .get_session_results(driver_number, year)
            .await?;

        Ok(results)
    }

    /// Fetches the stored classification for one session, winner first.
    ///
    /// Unclassified entries trail the placed ones. An unknown session key
    /// returns an empty classification rather than an error.
    pub async fn get_session_classification(
        &self,
        session_key: i32,
    ) -> Result<Vec<DriverSessionStatsModel>, Error> {
        let classification = StatsRepository::new(self.db)
            .get_by_session_key(session_key)
            .await?;

        Ok(classification)
    }
}
