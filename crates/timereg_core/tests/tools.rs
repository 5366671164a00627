use rusqlite::Connection;
use serde_json::{json, Map, Value};
use timereg_core::db::open_db_in_memory;
use timereg_core::tools::{call_tool, find_tool, tool_definitions, ParameterKind, ToolError};
use timereg_core::{invoke, DurationMatch, EngineConfig};

fn call(conn: &Connection, name: &str, args: Value) -> Value {
    let response = invoke(conn, &EngineConfig::default(), name, &args);
    assert!(response.ok, "{name} failed: {}", response.message);
    response.result
}

fn seeded() -> Connection {
    let conn = open_db_in_memory().unwrap();
    call(&conn, "create_project", json!({ "project_name": "Acme" }));
    call(
        &conn,
        "create_activity",
        json!({ "project_name": "Acme", "activity_name": "Design", "description": "Mockups" }),
    );
    call(
        &conn,
        "create_person",
        json!({ "first_name": "Ada", "last_name": "Lovelace" }),
    );
    conn
}

fn sample_argument(name: &str, kind: ParameterKind) -> Value {
    match (name, kind) {
        ("first_name", _) => json!("Ada"),
        ("last_name", _) => json!("Lovelace"),
        ("project_name", _) => json!("Acme"),
        ("activity_name", _) => json!("Design"),
        (_, ParameterKind::Date) => json!("2024-03-05"),
        (_, ParameterKind::Decimal) => json!("8.0"),
        (_, ParameterKind::Period) => json!("THIS_MONTH"),
        (_, ParameterKind::Text) => json!("sample"),
    }
}

#[test]
fn catalog_names_are_unique_and_described() {
    let tools = tool_definitions();
    assert_eq!(tools.len(), 16);
    for tool in tools {
        assert!(!tool.description.is_empty(), "{} has no description", tool.name);
        assert_eq!(find_tool(tool.name), Some(tool));
        let same_name = tools.iter().filter(|other| other.name == tool.name).count();
        assert_eq!(same_name, 1, "{} listed twice", tool.name);
    }
    assert!(find_tool("drop_all_tables").is_none());
}

#[test]
fn every_catalog_tool_dispatches() {
    let conn = seeded();
    let config = EngineConfig::default();

    for tool in tool_definitions() {
        let args: Map<String, Value> = tool
            .parameters
            .iter()
            .map(|param| (param.name.to_string(), sample_argument(param.name, param.kind)))
            .collect();
        let response = invoke(&conn, &config, tool.name, &Value::Object(args));

        match response.error_code {
            None => assert!(response.ok),
            Some(code) => assert_eq!(code, "conflict", "{} failed: {}", tool.name, response.message),
        }
    }
}

#[test]
fn unknown_tool_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let response = invoke(&conn, &EngineConfig::default(), "launch_rockets", &Value::Null);

    assert!(!response.ok);
    assert_eq!(response.error_code, Some("unknown_tool"));
    assert_eq!(response.result, Value::Null);
}

#[test]
fn argument_errors_are_reported() {
    let conn = seeded();
    let config = EngineConfig::default();

    let err = call_tool(&conn, &config, "find_person_by_name", &json!({ "first_name": "Ada" }))
        .unwrap_err();
    assert!(matches!(err, ToolError::MissingArgument("last_name")));

    let err = call_tool(&conn, &config, "list_all_persons", &json!(["Ada"])).unwrap_err();
    assert_eq!(err.error_code(), "invalid_argument");

    let err = call_tool(
        &conn,
        &config,
        "list_reported_times_for_person_and_timespan",
        &json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "start_date": "03/01/2024",
            "end_date": "2024-03-31"
        }),
    )
    .unwrap_err();
    assert!(matches!(err, ToolError::InvalidArgument { name: "start_date", .. }));

    let err = call_tool(
        &conn,
        &config,
        "create_reported_time",
        &json!({
            "project_name": "Acme",
            "activity_name": "Design",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "date": "2024-03-05",
            "duration": "eight"
        }),
    )
    .unwrap_err();
    assert!(matches!(err, ToolError::InvalidArgument { name: "duration", .. }));
}

#[test]
fn time_entry_flow_through_tools() {
    let conn = seeded();
    let entry = json!({
        "project_name": "acme",
        "activity_name": "design",
        "first_name": "ADA",
        "last_name": "lovelace",
        "date": "2024-03-05",
        "duration": 8
    });

    let created = call(&conn, "create_reported_time", entry.clone());
    assert_eq!(created["date"], json!("2024-03-05"));
    assert_eq!(created["duration"], json!("8"));

    let listed = call(
        &conn,
        "list_reported_times_for_person_and_timespan",
        json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "start_date": "2024-03-01",
            "end_date": "2024-03-31"
        }),
    );
    assert_eq!(listed, json!([created]));

    assert_eq!(call(&conn, "delete_reported_time", entry.clone()), json!(true));
    assert_eq!(call(&conn, "delete_reported_time", entry), json!(false));
}

#[test]
fn durations_travel_as_decimal_text() {
    let conn = seeded();
    let created = call(
        &conn,
        "create_reported_time",
        json!({
            "project_name": "Acme",
            "activity_name": "Design",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "date": "2024-03-05",
            "duration": "0.30000000000000001"
        }),
    );
    assert_eq!(created["duration"], json!("0.30000000000000001"));
}

#[test]
fn service_errors_keep_their_codes() {
    let conn = seeded();

    let response = invoke(
        &conn,
        &EngineConfig::default(),
        "list_reported_times_for_person_and_period",
        &json!({ "first_name": "Ada", "last_name": "Lovelace", "period": "INVALID_TOKEN" }),
    );
    assert!(!response.ok);
    assert_eq!(response.error_code, Some("invalid_period"));
    assert!(response.message.contains("Invalid period format"));

    let response = invoke(
        &conn,
        &EngineConfig::default(),
        "find_person_by_name",
        &json!({ "first_name": "Grace", "last_name": "Hopper" }),
    );
    assert_eq!(response.error_code, Some("person_not_found"));
    assert_eq!(
        response.message,
        "Person with first name Grace and last name Hopper not found"
    );
}

#[test]
fn configured_tolerance_applies_to_delete_tool() {
    let conn = seeded();
    let mut config = EngineConfig::default();
    config.duration_match = DurationMatch::Tolerance {
        hours: "0.01".parse().unwrap(),
    };
    let mut entry = json!({
        "project_name": "Acme",
        "activity_name": "Design",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "date": "2024-03-05",
        "duration": "7.5"
    });
    assert!(invoke(&conn, &config, "create_reported_time", &entry).ok);

    entry["duration"] = json!(7.504);
    let response = invoke(&conn, &config, "delete_reported_time", &entry);
    assert_eq!(response.result, json!(true));
}
