//! The leaderboard aggregation engine.
//!
//! Derives donor rankings, matched-donation and chronological-donation views, and live aggregate counters from raw
//! donor/donation records. The pipeline is pure: the backend supplies the authoritative records and the caller
//! supplies `now`, so every stage is deterministic and testable without a database.
//!
//! Stages run in a fixed order, because later stages operate on the already-windowed data:
//!
//! 1. time-window re-derivation (totals re-summed from in-window donations only),
//! 2. zero-value filter,
//! 3. case-insensitive search on donor name, city or state,
//! 4. stable sort,
//! 5. pagination.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use hearth_common::Cents;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::db_types::{Donor, FireDepartment, ProductDonation};

/// Donors, matched donations and latest donations all page in blocks of ten.
pub const PAGE_SIZE: usize = 10;

//--------------------------------------      TimeWindow       -------------------------------------------------------
/// The time range used to scope leaderboard aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    #[default]
    All,
    /// Since 00:00 on the first day of the current month.
    Month,
    /// Since 00:00 on the most recent Sunday.
    Week,
}

impl TimeWindow {
    /// The instant this window opens, given the caller's local clock, or `None` for the unbounded window.
    ///
    /// The calendar arithmetic happens in the timezone of `now`; the engine never consults a clock itself.
    pub fn start_utc<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Utc>> {
        let midnight = |date: NaiveDate| {
            date.and_hms_opt(0, 0, 0)
                .and_then(|dt| now.timezone().from_local_datetime(&dt).earliest())
                .map(|dt| dt.with_timezone(&Utc))
        };
        match self {
            TimeWindow::All => None,
            TimeWindow::Week => {
                let days_back = i64::from(now.weekday().num_days_from_sunday());
                midnight(now.date_naive() - Duration::days(days_back))
            },
            TimeWindow::Month => now.date_naive().with_day(1).and_then(midnight),
        }
    }
}

//--------------------------------------      Sort order       -------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// Total donated value over the window.
    #[default]
    Amount,
    /// The donor's most recent donation timestamp (the max, not array order).
    Date,
    /// Total number of products donated over the window.
    Products,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDir {
    Ascending,
    #[default]
    Descending,
}

//--------------------------------------   LeaderboardQuery    -------------------------------------------------------
/// Filter and sort inputs for the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub window: TimeWindow,
    pub search: Option<String>,
    pub sort: SortKey,
    pub direction: SortDir,
}

impl LeaderboardQuery {
    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_direction(mut self, direction: SortDir) -> Self {
        self.direction = direction;
        self
    }
}

//--------------------------------------     Page cursors      -------------------------------------------------------
/// The three independent 1-based page cursors over the leaderboard's views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursors {
    pub donors: usize,
    pub matched: usize,
    pub latest: usize,
}

impl Default for PageCursors {
    fn default() -> Self {
        Self { donors: 1, matched: 1, latest: 1 }
    }
}

/// The query plus its page cursors. Mutating any filter or sort input resets *all three* cursors to page 1, so a
/// narrowed result set is never viewed through a stale cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardControls {
    query: LeaderboardQuery,
    cursors: PageCursors,
}

impl LeaderboardControls {
    pub fn new(query: LeaderboardQuery) -> Self {
        Self { query, cursors: PageCursors::default() }
    }

    pub fn query(&self) -> &LeaderboardQuery {
        &self.query
    }

    pub fn cursors(&self) -> PageCursors {
        self.cursors
    }

    pub fn set_window(&mut self, window: TimeWindow) {
        self.query.window = window;
        self.cursors = PageCursors::default();
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.query.search = search;
        self.cursors = PageCursors::default();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
        self.cursors = PageCursors::default();
    }

    pub fn set_direction(&mut self, direction: SortDir) {
        self.query.direction = direction;
        self.cursors = PageCursors::default();
    }

    pub fn set_donor_page(&mut self, page: usize) {
        self.cursors.donors = page.max(1);
    }

    pub fn set_matched_page(&mut self, page: usize) {
        self.cursors.matched = page.max(1);
    }

    pub fn set_latest_page(&mut self, page: usize) {
        self.cursors.latest = page.max(1);
    }
}

//--------------------------------------     View models       -------------------------------------------------------
/// A donor row with totals re-derived from the windowed donation set. Never read from stored totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorSummary {
    pub donor_id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub total_donated_value: Cents,
    pub total_products_donated: i64,
    pub latest_donation: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedDonationEntry {
    pub donation_id: i64,
    pub donor_name: String,
    pub product_name: String,
    pub quantity: i64,
    pub value: Cents,
    pub fire_department_id: i64,
    pub fire_department_name: String,
    pub donation_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationEntry {
    pub donation_id: i64,
    pub donor_name: String,
    pub product_name: String,
    pub quantity: i64,
    pub value: Cents,
    /// Derived against the live department set; a dangling reference displays as unmatched.
    pub matched: bool,
    pub donation_date: DateTime<Utc>,
}

/// Aggregate counters over the *currently filtered* donor set. These update live as filters change. The animated
/// counter in the presentation layer interpolates towards these values; the contract here is only that they are
/// exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardTotals {
    pub total_raised: Cents,
    pub total_products: i64,
    pub fire_departments_reached: usize,
}

/// One page of a derived view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slices `items` into 1-based pages of `page_size`. An out-of-range cursor clamps to the nearest valid page, so an
/// emptied result set yields page 1 of 1 rather than an error.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let items = items.into_iter().skip((page - 1) * page_size).take(page_size).collect();
    Page { items, page, total_items, total_pages }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardView {
    pub donors: Page<DonorSummary>,
    pub matched: Page<MatchedDonationEntry>,
    pub latest: Page<DonationEntry>,
    pub totals: LeaderboardTotals,
}

//--------------------------------------      The pipeline     -------------------------------------------------------
/// Runs the full aggregation pipeline and materialises all three paginated views plus the aggregate counters.
pub fn build_leaderboard<Tz: TimeZone>(
    donors: &[Donor],
    donations: &[ProductDonation],
    departments: &[FireDepartment],
    query: &LeaderboardQuery,
    cursors: PageCursors,
    now: &DateTime<Tz>,
) -> LeaderboardView {
    let window_start = query.window.start_utc(now);
    let in_window = |d: &&ProductDonation| window_start.map(|start| d.donation_date >= start).unwrap_or(true);

    // Stage 1+2: re-derive totals from the windowed donations and drop donors with no positive in-window value.
    // A donor whose only donations fall outside the window disappears entirely from this view.
    let mut windowed: HashMap<i64, Vec<&ProductDonation>> = HashMap::new();
    for donation in donations.iter().filter(in_window) {
        windowed.entry(donation.donor_id).or_default().push(donation);
    }
    let mut rows: Vec<DonorSummary> = donors
        .iter()
        .filter_map(|donor| {
            let donations = windowed.get(&donor.id)?;
            let total_donated_value: Cents = donations.iter().map(|d| d.total_value()).sum();
            if !total_donated_value.is_positive() {
                return None;
            }
            Some(DonorSummary {
                donor_id: donor.id,
                name: donor.name.clone(),
                city: donor.city.clone(),
                state: donor.state.clone(),
                total_donated_value,
                total_products_donated: donations.iter().map(|d| d.quantity).sum(),
                latest_donation: donations.iter().map(|d| d.donation_date).max(),
            })
        })
        .collect();

    // Stage 3: case-insensitive substring search on name, city or state.
    if let Some(needle) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let needle = needle.to_lowercase();
        rows.retain(|r| {
            r.name.to_lowercase().contains(&needle) ||
                r.city.to_lowercase().contains(&needle) ||
                r.state.to_lowercase().contains(&needle)
        });
    }

    // Stage 4: stable sort. Reversing the comparator (rather than the result) keeps tied entries in input order in
    // both directions, so repeated renders are deterministic.
    let key_cmp = |a: &DonorSummary, b: &DonorSummary| match query.sort {
        SortKey::Amount => a.total_donated_value.cmp(&b.total_donated_value),
        SortKey::Date => a.latest_donation.cmp(&b.latest_donation),
        SortKey::Products => a.total_products_donated.cmp(&b.total_products_donated),
    };
    match query.direction {
        SortDir::Ascending => rows.sort_by(key_cmp),
        SortDir::Descending => rows.sort_by(|a, b| key_cmp(b, a)),
    }

    // Derived views are built from the same filtered, sorted donor set.
    let department_names: HashMap<i64, &str> = departments.iter().map(|d| (d.id, d.name.as_str())).collect();
    let mut matched = Vec::new();
    let mut latest = Vec::new();
    let mut departments_reached = HashSet::new();
    for row in &rows {
        for donation in windowed.get(&row.donor_id).into_iter().flatten() {
            let live_department =
                donation.fire_department_id.and_then(|id| department_names.get(&id).map(|name| (id, *name)));
            if let Some((id, name)) = live_department {
                departments_reached.insert(id);
                matched.push(MatchedDonationEntry {
                    donation_id: donation.id,
                    donor_name: row.name.clone(),
                    product_name: donation.product_name.clone(),
                    quantity: donation.quantity,
                    value: donation.total_value(),
                    fire_department_id: id,
                    fire_department_name: name.to_string(),
                    donation_date: donation.donation_date,
                });
            }
            latest.push(DonationEntry {
                donation_id: donation.id,
                donor_name: row.name.clone(),
                product_name: donation.product_name.clone(),
                quantity: donation.quantity,
                value: donation.total_value(),
                matched: live_department.is_some(),
                donation_date: donation.donation_date,
            });
        }
    }
    matched.sort_by(|a, b| b.donation_date.cmp(&a.donation_date));
    latest.sort_by(|a, b| b.donation_date.cmp(&a.donation_date));

    let totals = LeaderboardTotals {
        total_raised: rows.iter().map(|r| r.total_donated_value).sum(),
        total_products: rows.iter().map(|r| r.total_products_donated).sum(),
        fire_departments_reached: departments_reached.len(),
    };

    LeaderboardView {
        donors: paginate(rows, cursors.donors, PAGE_SIZE),
        matched: paginate(matched, cursors.matched, PAGE_SIZE),
        latest: paginate(latest, cursors.latest, PAGE_SIZE),
        totals,
    }
}

#[cfg(test)]
mod test {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use hearth_common::Cents;

    use super::*;
    use crate::db_types::{Donor, FireDepartment, ProductDonation};

    // Wednesday 2024-06-19, 12:00 UTC. The week window opens Sunday 2024-06-16 00:00; the month window opens
    // 2024-06-01 00:00.
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 19, 12, 0, 0).unwrap()
    }

    fn donor(id: i64, name: &str, city: &str, state: &str) -> Donor {
        Donor {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: format!("{id} Main St"),
            created_at: now() - Duration::days(300),
        }
    }

    fn donation(id: i64, donor_id: i64, dollars: i64, quantity: i64, date: DateTime<Utc>) -> ProductDonation {
        ProductDonation {
            id,
            donor_id,
            product_name: "Cold Plunge".to_string(),
            unit_value: Cents::from_dollars(dollars),
            quantity,
            fire_department_id: None,
            donation_date: date,
            created_at: date,
            updated_at: date,
        }
    }

    fn department(id: i64, name: &str) -> FireDepartment {
        FireDepartment {
            id,
            name: name.to_string(),
            city: "Boise".to_string(),
            county: "Ada".to_string(),
            address: "1 Station Rd".to_string(),
            latitude: None,
            longitude: None,
            created_at: now() - Duration::days(400),
        }
    }

    fn view(
        donors: &[Donor],
        donations: &[ProductDonation],
        departments: &[FireDepartment],
        query: &LeaderboardQuery,
    ) -> LeaderboardView {
        build_leaderboard(donors, donations, departments, query, PageCursors::default(), &now())
    }

    #[test]
    fn window_boundaries() {
        let week = TimeWindow::Week.start_utc(&now()).unwrap();
        assert_eq!(week, Utc.with_ymd_and_hms(2024, 6, 16, 0, 0, 0).unwrap());
        let month = TimeWindow::Month.start_utc(&now()).unwrap();
        assert_eq!(month, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        assert!(TimeWindow::All.start_utc(&now()).is_none());

        // a Sunday is its own week start
        let sunday_noon = Utc.with_ymd_and_hms(2024, 6, 16, 12, 0, 0).unwrap();
        assert_eq!(
            TimeWindow::Week.start_utc(&sunday_noon).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 16, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn week_view_re_derives_totals() {
        // donor A has $500 from 3 weeks ago and $200 from this week; the week view must show 200, not 700
        let donors = vec![donor(1, "Alpine Wellness", "Boise", "ID")];
        let donations = vec![
            donation(1, 1, 500, 1, now() - Duration::weeks(3)),
            donation(2, 1, 200, 1, now() - Duration::days(1)),
        ];
        let all = view(&donors, &donations, &[], &LeaderboardQuery::default());
        assert_eq!(all.donors.items[0].total_donated_value, Cents::from_dollars(700));

        let week = view(&donors, &donations, &[], &LeaderboardQuery::default().with_window(TimeWindow::Week));
        assert_eq!(week.donors.items[0].total_donated_value, Cents::from_dollars(200));
        assert_eq!(week.donors.items[0].total_products_donated, 1);
        assert_eq!(week.totals.total_raised, Cents::from_dollars(200));
    }

    #[test]
    fn donor_outside_window_disappears() {
        let donors = vec![donor(1, "Old Timer", "Reno", "NV"), donor(2, "Fresh Giver", "Reno", "NV")];
        let donations = vec![
            donation(1, 1, 900, 2, now() - Duration::weeks(5)),
            donation(2, 2, 100, 1, now() - Duration::days(1)),
        ];
        let all = view(&donors, &donations, &[], &LeaderboardQuery::default());
        assert_eq!(all.donors.total_items, 2);

        let week = view(&donors, &donations, &[], &LeaderboardQuery::default().with_window(TimeWindow::Week));
        assert_eq!(week.donors.total_items, 1);
        assert_eq!(week.donors.items[0].name, "Fresh Giver");
        assert!(week.latest.items.iter().all(|e| e.donor_name == "Fresh Giver"));
    }

    #[test]
    fn zero_value_donors_are_dropped() {
        let donors = vec![donor(1, "Zero Corp", "Ogden", "UT"), donor(2, "Giver", "Ogden", "UT")];
        let donations = vec![donation(1, 1, 0, 3, now()), donation(2, 2, 50, 1, now())];
        let v = view(&donors, &donations, &[], &LeaderboardQuery::default());
        assert_eq!(v.donors.total_items, 1);
        assert_eq!(v.donors.items[0].name, "Giver");
    }

    #[test]
    fn search_matches_name_city_and_state() {
        let donors = vec![
            donor(1, "Summit Saunas", "Bend", "OR"),
            donor(2, "River Co", "Portland", "OR"),
            donor(3, "Desert Co", "Phoenix", "AZ"),
        ];
        let donations =
            vec![donation(1, 1, 100, 1, now()), donation(2, 2, 100, 1, now()), donation(3, 3, 100, 1, now())];
        let q = LeaderboardQuery::default().with_search("or");
        let v = view(&donors, &donations, &[], &q);
        // "or" hits "OR" (state) and "Portland" (city), case-insensitively
        let names: Vec<&str> = v.donors.items.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Summit Saunas") && names.contains(&"River Co"));

        let v = view(&donors, &donations, &[], &LeaderboardQuery::default().with_search("summit"));
        assert_eq!(v.donors.items.len(), 1);
        assert_eq!(v.totals.total_raised, Cents::from_dollars(100));
    }

    #[test]
    fn sort_descending_is_reverse_of_ascending() {
        let donors = vec![donor(1, "A", "X", "XX"), donor(2, "B", "X", "XX"), donor(3, "C", "X", "XX")];
        let donations =
            vec![donation(1, 1, 300, 1, now()), donation(2, 2, 100, 1, now()), donation(3, 3, 200, 1, now())];
        let asc = view(
            &donors,
            &donations,
            &[],
            &LeaderboardQuery::default().with_sort(SortKey::Amount).with_direction(SortDir::Ascending),
        );
        let desc = view(
            &donors,
            &donations,
            &[],
            &LeaderboardQuery::default().with_sort(SortKey::Amount).with_direction(SortDir::Descending),
        );
        let asc_names: Vec<&str> = asc.donors.items.iter().map(|d| d.name.as_str()).collect();
        let mut desc_names: Vec<&str> = desc.donors.items.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(asc_names, ["B", "C", "A"]);
        desc_names.reverse();
        assert_eq!(asc_names, desc_names);
    }

    #[test]
    fn sort_by_date_uses_latest_donation() {
        let donors = vec![donor(1, "Early Bird", "X", "XX"), donor(2, "Late Riser", "X", "XX")];
        // Early Bird's *latest* donation is newer even though their first is the oldest in the array
        let donations = vec![
            donation(1, 1, 100, 1, now() - Duration::days(20)),
            donation(2, 2, 100, 1, now() - Duration::days(5)),
            donation(3, 1, 100, 1, now() - Duration::days(1)),
        ];
        let v = view(&donors, &donations, &[], &LeaderboardQuery::default().with_sort(SortKey::Date));
        assert_eq!(v.donors.items[0].name, "Early Bird");
    }

    #[test]
    fn ties_preserve_input_order_in_both_directions() {
        let donors = vec![donor(1, "First", "X", "XX"), donor(2, "Second", "X", "XX")];
        let donations = vec![donation(1, 1, 100, 1, now()), donation(2, 2, 100, 1, now())];
        for dir in [SortDir::Ascending, SortDir::Descending] {
            let v = view(&donors, &donations, &[], &LeaderboardQuery::default().with_direction(dir));
            let names: Vec<&str> = v.donors.items.iter().map(|d| d.name.as_str()).collect();
            assert_eq!(names, ["First", "Second"]);
        }
    }

    #[test]
    fn matched_view_and_dangling_references() {
        let donors = vec![donor(1, "Giver", "X", "XX")];
        let mut d1 = donation(1, 1, 100, 1, now() - Duration::days(2));
        d1.fire_department_id = Some(7);
        let mut d2 = donation(2, 1, 100, 1, now() - Duration::days(1));
        d2.fire_department_id = Some(999); // department no longer exists
        let d3 = donation(3, 1, 100, 1, now());
        let departments = vec![department(7, "Boise Station 4")];
        let v = view(&donors, &[d1, d2, d3], &departments, &LeaderboardQuery::default());

        assert_eq!(v.matched.total_items, 1);
        assert_eq!(v.matched.items[0].fire_department_name, "Boise Station 4");
        assert_eq!(v.totals.fire_departments_reached, 1);

        // chronological view lists all three, latest first, with the dangling reference shown as unmatched
        assert_eq!(v.latest.total_items, 3);
        assert_eq!(v.latest.items.iter().map(|e| e.donation_id).collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(v.latest.items.iter().map(|e| e.matched).collect::<Vec<_>>(), vec![false, false, true]);
    }

    #[test]
    fn pagination_clamps_and_slices() {
        let donors: Vec<Donor> = (1..=25).map(|i| donor(i, &format!("Donor {i:02}"), "X", "XX")).collect();
        let donations: Vec<ProductDonation> =
            (1..=25).map(|i| donation(i, i, 100 + i, 1, now() - Duration::minutes(i))).collect();
        let mut controls = LeaderboardControls::default();
        controls.set_donor_page(3);
        let v = build_leaderboard(
            &donors,
            &donations,
            &[],
            controls.query(),
            controls.cursors(),
            &now(),
        );
        assert_eq!(v.donors.total_pages, 3);
        assert_eq!(v.donors.page, 3);
        assert_eq!(v.donors.items.len(), 5);

        // out-of-range cursors clamp instead of erroring
        controls.set_donor_page(99);
        let v = build_leaderboard(&donors, &donations, &[], controls.query(), controls.cursors(), &now());
        assert_eq!(v.donors.page, 3);

        let empty = paginate(Vec::<i64>::new(), 5, PAGE_SIZE);
        assert_eq!((empty.page, empty.total_pages, empty.total_items), (1, 1, 0));
    }

    #[test]
    fn changing_any_filter_resets_all_cursors() {
        let mut controls = LeaderboardControls::default();
        controls.set_donor_page(3);
        controls.set_matched_page(2);
        controls.set_latest_page(4);
        controls.set_window(TimeWindow::Month);
        assert_eq!(controls.cursors(), PageCursors::default());

        controls.set_latest_page(4);
        controls.set_search(Some("sauna".to_string()));
        assert_eq!(controls.cursors(), PageCursors::default());

        controls.set_donor_page(2);
        controls.set_sort(SortKey::Products);
        assert_eq!(controls.cursors(), PageCursors::default());

        controls.set_matched_page(5);
        controls.set_direction(SortDir::Ascending);
        assert_eq!(controls.cursors(), PageCursors::default());
    }

    #[test]
    fn totals_follow_the_filtered_set() {
        let donors = vec![donor(1, "Summit Saunas", "Bend", "OR"), donor(2, "Desert Co", "Phoenix", "AZ")];
        let mut d1 = donation(1, 1, 400, 2, now());
        d1.fire_department_id = Some(7);
        let mut d2 = donation(2, 2, 600, 3, now());
        d2.fire_department_id = Some(8);
        let departments = vec![department(7, "Station 7"), department(8, "Station 8")];

        let unfiltered = view(&donors, &[d1.clone(), d2.clone()], &departments, &LeaderboardQuery::default());
        assert_eq!(unfiltered.totals.total_raised, Cents::from_dollars(800 + 1800));
        assert_eq!(unfiltered.totals.total_products, 5);
        assert_eq!(unfiltered.totals.fire_departments_reached, 2);

        let filtered =
            view(&donors, &[d1, d2], &departments, &LeaderboardQuery::default().with_search("summit"));
        assert_eq!(filtered.totals.total_raised, Cents::from_dollars(800));
        assert_eq!(filtered.totals.total_products, 2);
        assert_eq!(filtered.totals.fire_departments_reached, 1);
    }
}
