use oews_explorer::format::{format_annual, format_hourly, format_metric};
use oews_explorer::ingestion::{load_dataset, IngestionOptions};
use oews_explorer::query::{
    compare_salaries, location_quotient, location_quotients, resolve, select, state_rollup,
    GeoFilter, GeoLevel, IndustryFilter, RememberedSelection, SelectionQuery,
};
use oews_explorer::schema::{self, Categorical};
use oews_explorer::store::OewsDataset;

const RN: &str = "Registered Nurses";

fn dataset() -> OewsDataset {
    load_dataset("tests/fixtures/oews_sample.csv", &IngestionOptions::default()).unwrap()
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.unwrap();
    assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

#[test]
fn distinct_values_are_sorted_and_exact() {
    let ds = dataset();
    assert_eq!(
        ds.distinct_values(Categorical::OccTitle),
        ["Actors", "Cashiers", RN, "Software Developers"]
    );
    assert_eq!(
        ds.distinct_values(Categorical::AreaTitle),
        ["California", "Columbus, OH", "Ohio", "U.S."]
    );
    assert_eq!(ds.distinct_values(Categorical::NaicsTitle), ["Cross-industry", "Hospitals"]);
    assert_eq!(
        Categorical::from_column_name(schema::O_GROUP).map(|c| ds.distinct_values(c).to_vec()),
        Some(vec!["detailed".to_string()])
    );

    // A row with a blank state is kept but its state is not offered as a choice.
    let mut records = ds.records().to_vec();
    let mut blank_state = records[10].clone();
    blank_state.prim_state = String::new();
    records.push(blank_state);
    let with_blank = OewsDataset::from_records(records);
    assert_eq!(with_blank.len(), 15);
    assert_eq!(with_blank.distinct_values(Categorical::PrimState), ["CA", "OH", "US"]);
}

#[test]
fn national_selection_only_returns_us_rows() {
    let ds = dataset();
    let query = SelectionQuery {
        geo: GeoFilter::National,
        occupation: RN.to_string(),
        industry: IndustryFilter::All,
    };
    let sel = select(&ds, &query);
    assert_eq!(sel.len(), 2);
    assert!(sel.rows().iter().all(|r| r.area_title == schema::NATIONAL_AREA_TITLE));
    assert_eq!(sel.annual_mean_wages(), vec![94_480.0, 97_970.0]);

    let wages = sel.wage_percentiles().unwrap();
    assert_eq!(format_hourly(wages.median.hourly), "$41.38");
    assert_eq!(format_annual(wages.pct90.annual), "$129,030");
    let labels: Vec<&str> = wages.labeled().iter().map(|(l, _)| *l).collect();
    assert_eq!(labels, ["10th", "25th", "50th (Median)", "75th", "90th"]);
}

#[test]
fn industry_and_geography_filters_combine() {
    let ds = dataset();
    let hospitals = select(
        &ds,
        &SelectionQuery {
            geo: GeoFilter::National,
            occupation: RN.to_string(),
            industry: IndustryFilter::Title("Hospitals".to_string()),
        },
    );
    assert_eq!(hospitals.len(), 1);
    assert_eq!(hospitals.first().unwrap().pct_total, Some(17.65));
    assert_eq!(hospitals.first().unwrap().pct_rpt, Some(100.0));

    let ohio = select(
        &ds,
        &SelectionQuery {
            geo: GeoFilter::State("OH".to_string()),
            occupation: RN.to_string(),
            industry: IndustryFilter::All,
        },
    );
    assert_eq!(ohio.len(), 2);

    let columbus = select(
        &ds,
        &SelectionQuery {
            geo: GeoFilter::new(GeoLevel::Metropolitan, "Columbus, OH"),
            occupation: RN.to_string(),
            industry: IndustryFilter::All,
        },
    );
    let summary = columbus.employment_summary().unwrap();
    assert_eq!(format_metric(summary.total_employment), "25,000.00");
    assert_eq!(summary.location_quotient, Some(1.2));
}

#[test]
fn suppressed_and_hourly_only_cells_are_missing() {
    let ds = dataset();
    let actors_oh = select(
        &ds,
        &SelectionQuery {
            geo: GeoFilter::State("OH".to_string()),
            occupation: "Actors".to_string(),
            industry: IndustryFilter::All,
        },
    );
    let row = actors_oh.first().unwrap();
    assert_eq!(row.tot_emp, None);
    assert_eq!(row.a_mean, None);
    assert_eq!(row.h_mean, Some(22.10));
    assert_eq!(format_annual(row.a_mean), "N/A");

    let report = ds.normalization_report();
    assert_eq!(report.columns[schema::TOT_EMP].not_releasable, 1);
    assert_eq!(report.columns[schema::A_PCT90].wage_capped, 3);
    assert_eq!(report.columns[schema::A_MEAN].unparseable, 3);
}

#[test]
fn state_rollup_skips_missing_but_keeps_present_values() {
    let ds = dataset();
    let rollup = state_rollup(&ds, RN);
    let states: Vec<&str> = rollup.iter().map(|s| s.state.as_str()).collect();
    assert_eq!(states, ["CA", "OH"]);

    let ca = &rollup[0];
    assert_eq!(ca.average_salary, Some(137_690.0));
    assert_eq!(ca.total_employment, Some(300_000.0));
    assert_eq!(ca.lower_wage, Some(93_600.0));
    // `#` top-coded.
    assert_eq!(ca.upper_wage, None);

    // Ohio state row plus the Columbus metro row.
    let oh = &rollup[1];
    assert_close(oh.average_salary, 83_750.0);
    assert_close(oh.total_employment, 145_000.0);
    assert_close(oh.lower_wage, 59_280.0);
    assert_close(oh.upper_wage, 114_400.0);

    let actors = state_rollup(&ds, "Actors");
    let oh_actors = actors.iter().find(|s| s.state == "OH").unwrap();
    assert_eq!(oh_actors.total_employment, None);
    assert_eq!(oh_actors.average_salary, None);
}

#[test]
fn location_quotients_follow_the_published_formula() {
    let ds = dataset();

    // National share of nurses: 3,000,000 / 6,000,000.
    assert_close(location_quotient(&ds, RN, "CA"), (300_000.0 / 1_000_000.0) / 0.5);
    assert_close(location_quotient(&ds, RN, "OH"), (145_000.0 / 225_000.0) / 0.5);
    assert_eq!(location_quotient(&ds, RN, "TX"), None);
    assert_eq!(location_quotient(&ds, "Pilots", "CA"), None);

    let all = location_quotients(&ds, RN);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].state, "CA");
    assert_eq!(all[0].job_employment, Some(300_000.0));
    assert_eq!(all[0].total_employment, Some(1_000_000.0));
    assert_close(all[0].location_quotient, 0.6);
}

#[test]
fn compare_salaries_preserves_order_and_reports_missing() {
    let ds = dataset();
    let rows = compare_salaries(
        &ds,
        &GeoFilter::National,
        &["Software Developers", "Actors", RN, "Pilots"],
    );
    let rendered: Vec<String> = rows.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        [
            "Software Developers: $144,570",
            "Actors: N/A",
            "Registered Nurses: $96,225",
            "Pilots: N/A",
        ]
    );

    let ca = compare_salaries(&ds, &GeoFilter::State("CA".to_string()), &["Cashiers"]);
    assert_eq!(ca[0].mean_annual_wage, Some(36_000.0));
}

#[test]
fn stale_selection_falls_back_to_first_candidate() {
    let ds = dataset();

    let remembered = RememberedSelection {
        geo_level: GeoLevel::State,
        geo_value: Some("WY".to_string()),
        occupation: Some("Pilots".to_string()),
        industry: Some("Hospitals".to_string()),
    };
    let resolved = resolve(&ds, &remembered);
    assert_eq!(resolved.geo, Some(GeoFilter::State("CA".to_string())));
    assert_eq!(resolved.industry, IndustryFilter::Title("Hospitals".to_string()));
    // Only nurses are published under Hospitals.
    assert_eq!(resolved.occupation.as_deref(), Some(RN));

    // California has no Hospitals rows in this extract, so the query is well-formed but empty.
    let query = resolved.query().unwrap();
    assert!(select(&ds, &query).is_empty());

    let valid = RememberedSelection {
        geo_level: GeoLevel::Metropolitan,
        geo_value: Some("Columbus, OH".to_string()),
        occupation: Some("Cashiers".to_string()),
        industry: None,
    };
    let resolved = resolve(&ds, &valid);
    assert_eq!(resolved.geo, Some(GeoFilter::Metropolitan("Columbus, OH".to_string())));
    assert_eq!(resolved.occupation.as_deref(), Some("Cashiers"));
}

#[test]
fn search_matches_occupation_titles_case_insensitively() {
    let ds = dataset();
    let hits = ds.search_occupations("nurse");
    assert_eq!(hits.len(), 5);
    assert!(hits.iter().all(|r| r.occ_title == RN));
}
