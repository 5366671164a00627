use chrono::NaiveDate;
use rusqlite::Connection;
use timereg_core::db::open_db_in_memory;
use timereg_core::period::today;
use timereg_core::{
    DurationMatch, Hours, NotFound, PeriodError, ReportedTime, ServiceError,
    SqliteRegistryService, SqliteTimeEntryService, TimeEntryRequest,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn hours(value: &str) -> Hours {
    value.parse().unwrap()
}

/// Acme/Design, Acme/Build, Globex/Audit and persons Ada Lovelace, Grace Hopper.
fn seeded() -> Connection {
    let conn = open_db_in_memory().unwrap();
    let registry = SqliteRegistryService::sqlite(&conn).unwrap();
    registry.create_project("Acme", None).unwrap();
    registry.create_project("Globex", None).unwrap();
    registry.create_activity("Acme", "Design", None).unwrap();
    registry.create_activity("Acme", "Build", None).unwrap();
    registry.create_activity("Globex", "Audit", None).unwrap();
    registry.create_person("Ada", "Lovelace").unwrap();
    registry.create_person("Grace", "Hopper").unwrap();
    conn
}

fn request(
    project: &str,
    activity: &str,
    person: (&str, &str),
    on: NaiveDate,
    duration: &str,
) -> TimeEntryRequest {
    TimeEntryRequest {
        project_name: project.to_string(),
        activity_name: activity.to_string(),
        first_name: person.0.to_string(),
        last_name: person.1.to_string(),
        date: on,
        duration: hours(duration),
    }
}

fn durations(entries: &[ReportedTime]) -> Vec<String> {
    entries.iter().map(|entry| entry.duration.to_string()).collect()
}

fn march(entries: &SqliteTimeEntryService<'_>) -> Vec<ReportedTime> {
    entries
        .list_by_person_and_timespan("Ada", "Lovelace", date(2024, 3, 1), date(2024, 3, 31))
        .unwrap()
}

const ADA: (&str, &str) = ("Ada", "Lovelace");
const GRACE: (&str, &str) = ("Grace", "Hopper");

#[test]
fn create_then_list_by_timespan() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();

    let created = entries
        .create_reported_time(&request("Acme", "Design", ADA, date(2024, 3, 5), "8"))
        .unwrap();

    let listed = march(&entries);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
    assert_eq!(listed[0].duration.to_string(), "8");
    assert_eq!(listed[0].date, date(2024, 3, 5));
}

#[test]
fn create_resolves_names_case_insensitively() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();

    entries
        .create_reported_time(&request(
            "ACME",
            "design",
            ("ada", "LOVELACE"),
            date(2024, 3, 5),
            "2.5",
        ))
        .unwrap();

    assert_eq!(durations(&march(&entries)), vec!["2.5"]);
}

#[test]
fn timespan_bounds_are_inclusive() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    for (day, duration) in [(29, "1"), (1, "2"), (31, "3")] {
        let month = if day == 29 { 2 } else { 3 };
        entries
            .create_reported_time(&request(
                "Acme",
                "Design",
                ADA,
                date(2024, month, day),
                duration,
            ))
            .unwrap();
    }
    entries
        .create_reported_time(&request("Acme", "Design", ADA, date(2024, 4, 1), "4"))
        .unwrap();

    assert_eq!(durations(&march(&entries)), vec!["2", "3"]);
}

#[test]
fn identical_entries_are_kept_separately() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    let same = request("Acme", "Design", ADA, date(2024, 3, 5), "1");

    let first = entries.create_reported_time(&same).unwrap();
    let second = entries.create_reported_time(&same).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(march(&entries).len(), 2);
}

#[test]
fn negative_and_zero_durations_are_stored_as_given() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    entries
        .create_reported_time(&request("Acme", "Design", ADA, date(2024, 3, 5), "-1.5"))
        .unwrap();
    entries
        .create_reported_time(&request("Acme", "Design", ADA, date(2024, 3, 6), "0"))
        .unwrap();

    assert_eq!(durations(&march(&entries)), vec!["-1.5", "0"]);
}

#[test]
fn create_with_unknown_project_inserts_nothing() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    entries
        .create_reported_time(&request("Acme", "Design", ADA, today(), "2"))
        .unwrap();
    let before = entries
        .list_by_person_and_timespan("Ada", "Lovelace", today(), today())
        .unwrap()
        .len();

    let err = entries
        .create_reported_time(&request("NoSuchProject", "Design", ADA, today(), "1"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound(NotFound::Project { ref name }) if name == "NoSuchProject"
    ));

    let after = entries
        .list_by_person_and_timespan("Ada", "Lovelace", today(), today())
        .unwrap()
        .len();
    assert_eq!(before, after);
}

#[test]
fn create_reports_person_before_project_and_activity() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    let on = date(2024, 3, 5);

    let err = entries
        .create_reported_time(&request("Nowhere", "Nothing", ("No", "Body"), on, "1"))
        .unwrap_err();
    assert_eq!(err.error_code(), "person_not_found");

    let err = entries
        .create_reported_time(&request("Nowhere", "Nothing", ADA, on, "1"))
        .unwrap_err();
    assert_eq!(err.error_code(), "project_not_found");

    let err = entries
        .create_reported_time(&request("Acme", "Nothing", ADA, on, "1"))
        .unwrap_err();
    assert_eq!(err.error_code(), "activity_not_found");
}

#[test]
fn create_rejects_activity_from_other_project() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();

    let err = entries
        .create_reported_time(&request("Globex", "Design", ADA, date(2024, 3, 5), "1"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Activity Design not found in project Globex"
    );
    assert!(march(&entries).is_empty());
}

#[test]
fn delete_removes_only_matching_duration() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    let on = date(2024, 3, 5);
    entries
        .create_reported_time(&request("Acme", "Design", ADA, on, "5"))
        .unwrap();
    entries
        .create_reported_time(&request("Acme", "Design", ADA, on, "8"))
        .unwrap();

    let deleted = entries
        .delete_reported_time(&request("Acme", "Design", ADA, on, "5"))
        .unwrap();

    assert!(deleted);
    assert_eq!(durations(&march(&entries)), vec!["8"]);
}

#[test]
fn delete_removes_one_of_identical_entries() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    let same = request("Acme", "Design", ADA, date(2024, 3, 5), "3");
    let first = entries.create_reported_time(&same).unwrap();
    let second = entries.create_reported_time(&same).unwrap();

    assert!(entries.delete_reported_time(&same).unwrap());

    let remaining = march(&entries);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);
    assert_ne!(remaining[0].id, first.id);
}

#[test]
fn create_then_delete_round_trip() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    let entry = request("Acme", "Design", ADA, date(2024, 3, 12), "7.5");
    entries.create_reported_time(&entry).unwrap();

    assert!(entries.delete_reported_time(&entry).unwrap());

    assert!(march(&entries).is_empty());
    assert!(entries
        .list_by_person_and_project("Ada", "Lovelace", "Acme")
        .unwrap()
        .is_empty());
    assert!(entries
        .list_by_project_and_timespan("Acme", date(2024, 1, 1), date(2024, 12, 31))
        .unwrap()
        .is_empty());
    assert!(entries
        .list_by_person_and_period_at("Ada", "Lovelace", "THIS_MONTH", date(2024, 3, 20))
        .unwrap()
        .is_empty());
}

#[test]
fn delete_without_match_returns_false() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    let on = date(2024, 3, 5);
    entries
        .create_reported_time(&request("Acme", "Design", ADA, on, "8"))
        .unwrap();

    let wrong_day = request("Acme", "Design", ADA, date(2024, 3, 6), "8");
    let wrong_activity = request("Acme", "Build", ADA, on, "8");
    let wrong_person = request("Acme", "Design", GRACE, on, "8");
    for miss in [wrong_day, wrong_activity, wrong_person] {
        assert!(!entries.delete_reported_time(&miss).unwrap());
    }
    assert_eq!(march(&entries).len(), 1);
}

#[test]
fn delete_with_unknown_names_is_an_error() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();

    let err = entries
        .delete_reported_time(&request("Acme", "Nothing", ADA, date(2024, 3, 5), "1"))
        .unwrap_err();
    assert_eq!(err.error_code(), "activity_not_found");
}

#[test]
fn exact_delete_ignores_near_durations() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    let on = date(2024, 3, 5);
    entries
        .create_reported_time(&request("Acme", "Design", ADA, on, "7.5"))
        .unwrap();

    assert!(!entries
        .delete_reported_time(&request("Acme", "Design", ADA, on, "7.504"))
        .unwrap());
    assert_eq!(march(&entries).len(), 1);
}

#[test]
fn tolerance_delete_accepts_near_durations() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn)
        .unwrap()
        .with_duration_match(DurationMatch::Tolerance {
            hours: hours("0.01"),
        });
    let on = date(2024, 3, 5);
    entries
        .create_reported_time(&request("Acme", "Design", ADA, on, "7.5"))
        .unwrap();

    assert!(!entries
        .delete_reported_time(&request("Acme", "Design", ADA, on, "7.6"))
        .unwrap());
    assert!(entries
        .delete_reported_time(&request("Acme", "Design", ADA, on, "7.504"))
        .unwrap());
    assert!(march(&entries).is_empty());
}

#[test]
fn exact_delete_compares_every_stored_digit() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    let on = date(2024, 3, 5);
    entries
        .create_reported_time(&request("Acme", "Design", ADA, on, "0.30000000000000001"))
        .unwrap();

    assert!(!entries
        .delete_reported_time(&request("Acme", "Design", ADA, on, "0.3"))
        .unwrap());
    assert!(entries
        .delete_reported_time(&request("Acme", "Design", ADA, on, "0.30000000000000001"))
        .unwrap());
    assert!(march(&entries).is_empty());
}

#[test]
fn exact_delete_treats_trailing_zeros_as_same_value() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    let on = date(2024, 3, 5);
    entries
        .create_reported_time(&request("Acme", "Design", ADA, on, "8.0"))
        .unwrap();

    assert!(entries
        .delete_reported_time(&request("Acme", "Design", ADA, on, "8"))
        .unwrap());
    assert!(march(&entries).is_empty());
}

#[test]
fn long_decimal_durations_list_unchanged() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    entries
        .create_reported_time(&request(
            "Acme",
            "Design",
            ADA,
            date(2024, 3, 5),
            "8.123456789012345678",
        ))
        .unwrap();

    assert_eq!(durations(&march(&entries)), vec!["8.123456789012345678"]);
}

#[test]
fn create_rejects_dates_past_year_9999() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();

    let err = entries
        .create_reported_time(&request("Acme", "Design", ADA, date(10000, 1, 1), "8"))
        .unwrap_err();
    assert_eq!(err.error_code(), "date_out_of_range");
    assert!(entries
        .list_by_person_and_project("Ada", "Lovelace", "Acme")
        .unwrap()
        .is_empty());
}

#[test]
fn timespan_reaching_past_year_9999_keeps_earlier_entries() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    entries
        .create_reported_time(&request("Acme", "Design", ADA, date(9999, 12, 15), "2"))
        .unwrap();

    let listed = entries
        .list_by_person_and_timespan("Ada", "Lovelace", date(9999, 12, 1), date(10000, 12, 31))
        .unwrap();
    assert_eq!(durations(&listed), vec!["2"]);

    assert!(entries
        .list_by_person_and_timespan("Ada", "Lovelace", date(10000, 1, 1), date(10000, 12, 31))
        .unwrap()
        .is_empty());
}

#[test]
fn list_by_person_and_project_filters_both() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    let on = date(2024, 3, 5);
    entries
        .create_reported_time(&request("Acme", "Design", ADA, on, "1"))
        .unwrap();
    entries
        .create_reported_time(&request("Acme", "Build", ADA, date(2023, 11, 2), "2"))
        .unwrap();
    entries
        .create_reported_time(&request("Globex", "Audit", ADA, on, "3"))
        .unwrap();
    entries
        .create_reported_time(&request("Acme", "Design", GRACE, on, "4"))
        .unwrap();

    let listed = entries
        .list_by_person_and_project("ada", "lovelace", "acme")
        .unwrap();
    assert_eq!(durations(&listed), vec!["1", "2"]);
}

#[test]
fn list_by_person_and_project_resolves_project_first() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();

    let err = entries
        .list_by_person_and_project("No", "Body", "Nowhere")
        .unwrap_err();
    assert_eq!(err.error_code(), "project_not_found");

    let err = entries
        .list_by_person_and_project("No", "Body", "Acme")
        .unwrap_err();
    assert_eq!(err.error_code(), "person_not_found");
}

#[test]
fn list_by_project_and_timespan_covers_all_persons() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    entries
        .create_reported_time(&request("Acme", "Design", ADA, date(2024, 3, 5), "1"))
        .unwrap();
    entries
        .create_reported_time(&request("Acme", "Build", GRACE, date(2024, 3, 6), "2"))
        .unwrap();
    entries
        .create_reported_time(&request("Globex", "Audit", GRACE, date(2024, 3, 6), "3"))
        .unwrap();
    entries
        .create_reported_time(&request("Acme", "Build", GRACE, date(2024, 4, 1), "4"))
        .unwrap();

    let listed = entries
        .list_by_project_and_timespan("Acme", date(2024, 3, 1), date(2024, 3, 31))
        .unwrap();
    assert_eq!(durations(&listed), vec!["1", "2"]);

    let err = entries
        .list_by_project_and_timespan("Nowhere", date(2024, 3, 1), date(2024, 3, 31))
        .unwrap_err();
    assert_eq!(err.error_code(), "project_not_found");
}

#[test]
fn inverted_timespan_lists_nothing() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    entries
        .create_reported_time(&request("Acme", "Design", ADA, date(2024, 3, 5), "1"))
        .unwrap();

    assert!(entries
        .list_by_person_and_timespan("Ada", "Lovelace", date(2024, 3, 31), date(2024, 3, 1))
        .unwrap()
        .is_empty());
}

#[test]
fn list_by_period_resolves_tokens_against_reference() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    for (on, duration) in [
        (date(2024, 2, 20), "2"),
        (date(2024, 3, 4), "8"),
        (date(2024, 3, 12), "5"),
        (date(2024, 3, 31), "1"),
    ] {
        entries
            .create_reported_time(&request("Acme", "Design", ADA, on, duration))
            .unwrap();
    }
    let wednesday = date(2024, 3, 13);

    let cases = [
        ("THIS_WEEK", vec!["5"]),
        (" this_week ", vec!["5"]),
        ("LAST_WEEK", vec!["8"]),
        ("WEEK_NUMBER:10", vec!["8"]),
        ("THIS_MONTH", vec!["8", "5", "1"]),
        ("LAST_MONTH", vec!["2"]),
        ("MONTH:2", vec!["2"]),
        ("month:1", vec![]),
    ];
    for (token, expected) in cases {
        let listed = entries
            .list_by_person_and_period_at("Ada", "Lovelace", token, wednesday)
            .unwrap();
        assert_eq!(durations(&listed), expected, "token {token}");
    }
}

#[test]
fn list_by_period_rejects_unknown_token() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();

    let err = entries
        .list_by_person_and_period("Ada", "Lovelace", "INVALID_TOKEN")
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::InvalidPeriod(PeriodError::UnrecognizedToken(_))
    ));
    assert!(err.to_string().contains("Invalid period format"));
    assert_eq!(err.error_code(), "invalid_period");
}

#[test]
fn list_by_period_rejects_bad_numbers() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();
    let reference = date(2021, 6, 1);

    for token in ["WEEK_NUMBER:abc", "MONTH:13", "MONTH:0", "WEEK_NUMBER:53"] {
        let err = entries
            .list_by_person_and_period_at("Ada", "Lovelace", token, reference)
            .unwrap_err();
        assert_eq!(err.error_code(), "invalid_period", "token {token}");
    }
}

#[test]
fn list_by_period_resolves_person_first() {
    let conn = seeded();
    let entries = SqliteTimeEntryService::sqlite(&conn).unwrap();

    let err = entries
        .list_by_person_and_period("No", "Body", "INVALID_TOKEN")
        .unwrap_err();
    assert_eq!(err.error_code(), "person_not_found");
}
