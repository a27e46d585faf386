use std::fmt::Debug;

use chrono::{DateTime, TimeZone};
use log::*;

use crate::{
    api::errors::LeaderboardApiError,
    leaderboard::{build_leaderboard, LeaderboardControls, LeaderboardView},
    traits::DonationManagement,
};

/// The public leaderboard. A thin read-only facade: it fetches the raw donor, donation and department records and
/// hands them to the pure aggregation pipeline in [`leaderboard`](crate::leaderboard), so every page load reflects
/// the current records and nothing is served from a stored aggregate.
pub struct LeaderboardApi<B> {
    db: B,
}

impl<B> Debug for LeaderboardApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LeaderboardApi")
    }
}

impl<B> LeaderboardApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B> LeaderboardApi<B>
where B: DonationManagement
{
    /// Builds the complete leaderboard view for the given controls. `now` anchors the time window and is supplied
    /// by the caller, in the timezone the boundaries should be drawn in.
    pub async fn view<Tz: TimeZone>(
        &self,
        controls: &LeaderboardControls,
        now: &DateTime<Tz>,
    ) -> Result<LeaderboardView, LeaderboardApiError<B>> {
        let donors = self.db.fetch_donors().await.map_err(LeaderboardApiError::DatabaseError)?;
        let donations = self.db.fetch_donations().await.map_err(LeaderboardApiError::DatabaseError)?;
        let departments =
            self.db.fetch_fire_departments().await.map_err(LeaderboardApiError::DatabaseError)?;
        trace!(
            "🏆️ Building leaderboard over {} donors, {} donations, {} departments",
            donors.len(),
            donations.len(),
            departments.len()
        );
        Ok(build_leaderboard(&donors, &donations, &departments, controls.query(), controls.cursors(), now))
    }
}
