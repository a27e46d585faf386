use chrono::{TimeZone, Utc};
use hearth_common::Cents;
use hearth_engine::{
    db_types::*,
    leaderboard::{LeaderboardControls, LeaderboardQuery, SortKey, TimeWindow},
    test_utils::prepare_env::prepare_test_env,
    DonationApi,
    LeaderboardApi,
    SqliteDatabase,
};
use tokio::runtime::Runtime;

fn donation_on(donor: &str, product: &str, value: Cents, day: u32) -> NewDonation {
    NewDonation {
        donor: NewDonor {
            name: donor.to_string(),
            city: "Cedar Rapids".to_string(),
            state: "IA".to_string(),
            address: "42 Industry Way".to_string(),
        },
        product_name: product.to_string(),
        unit_value: value,
        quantity: 1,
        fire_department_id: None,
        donation_date: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
    }
}

#[test]
fn leaderboard_reflects_the_stored_records() {
    let sys = Runtime::new().unwrap();
    sys.block_on(async move {
        let url = "sqlite://../data/test_leaderboard_view.db";
        prepare_test_env(url).await;
        let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating database");
        let donations = DonationApi::new(db.clone());
        let leaderboard = LeaderboardApi::new(db);

        let station = donations
            .add_fire_department(NewFireDepartment {
                name: "Station One".to_string(),
                city: "Cedar Rapids".to_string(),
                county: "Linn".to_string(),
                address: "1 Station Rd".to_string(),
                latitude: None,
                longitude: None,
            })
            .await
            .unwrap();

        // Acme donates twice in May, Bravo once in April (outside the month window used below).
        let first = donations
            .create_donation(donation_on("Acme", "Sauna Heater", Cents::from_dollars(500), 2))
            .await
            .unwrap();
        donations.create_donation(donation_on("Acme", "Plunge Tub", Cents::from_dollars(200), 20)).await.unwrap();
        let mut april = donation_on("Bravo", "Towel Set", Cents::from_dollars(50), 1);
        april.donation_date = Utc.with_ymd_and_hms(2024, 4, 15, 12, 0, 0).unwrap();
        donations.create_donation(april).await.unwrap();
        donations.match_donation(first.id, station.id).await.unwrap();

        let now = Utc.with_ymd_and_hms(2024, 5, 25, 9, 0, 0).unwrap();

        let controls = LeaderboardControls::new(LeaderboardQuery::default());
        let view = leaderboard.view(&controls, &now).await.unwrap();
        assert_eq!(view.donors.items.len(), 2);
        assert_eq!(view.donors.total_items, 2);
        assert_eq!(view.totals.total_raised, Cents::from_dollars(750));
        assert_eq!(view.totals.total_products, 3);
        assert_eq!(view.totals.fire_departments_reached, 1);
        assert_eq!(view.matched.items.len(), 1);
        assert_eq!(view.matched.items[0].fire_department_name, "Station One");

        // The month window drops Bravo entirely and re-derives Acme's total from the two May donations.
        let controls = LeaderboardControls::new(
            LeaderboardQuery::default().with_window(TimeWindow::Month).with_sort(SortKey::Amount),
        );
        let view = leaderboard.view(&controls, &now).await.unwrap();
        assert_eq!(view.donors.items.len(), 1);
        assert_eq!(view.donors.items[0].name, "Acme");
        assert_eq!(view.donors.items[0].total_donated_value, Cents::from_dollars(700));

        // Search narrows by donor name, case-insensitively.
        let controls = LeaderboardControls::new(LeaderboardQuery::default().with_search("bra"));
        let view = leaderboard.view(&controls, &now).await.unwrap();
        assert_eq!(view.donors.items.len(), 1);
        assert_eq!(view.donors.items[0].name, "Bravo");
    });
}
