//! Tool catalog: names, descriptions and parameter shapes.

use serde::Serialize;

/// Wire type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Free text, matched case-insensitively where it names a record.
    Text,
    /// ISO-8601 calendar date, `YYYY-MM-DD`.
    Date,
    /// Decimal number of hours, as string or number.
    Decimal,
    /// Period token such as `THIS_WEEK` or `MONTH:3`.
    Period,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolParameter {
    pub name: &'static str,
    pub kind: ParameterKind,
    pub required: bool,
}

/// One callable operation exposed to orchestrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [ToolParameter],
}

const fn required(name: &'static str, kind: ParameterKind) -> ToolParameter {
    ToolParameter {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: ParameterKind) -> ToolParameter {
    ToolParameter {
        name,
        kind,
        required: false,
    }
}

const PERSON_NAME: [ToolParameter; 2] = [
    required("first_name", ParameterKind::Text),
    required("last_name", ParameterKind::Text),
];

const TIME_ENTRY: [ToolParameter; 6] = [
    required("project_name", ParameterKind::Text),
    required("activity_name", ParameterKind::Text),
    required("first_name", ParameterKind::Text),
    required("last_name", ParameterKind::Text),
    required("date", ParameterKind::Date),
    required("duration", ParameterKind::Decimal),
];

const TOOLS: &[ToolDefinition] = &[
    ToolDefinition {
        name: "list_all_persons",
        description: "List all persons registered in the system.",
        parameters: &[],
    },
    ToolDefinition {
        name: "create_person",
        description: "Add a person by first name and last name. Does not check for an existing person with the same name.",
        parameters: &PERSON_NAME,
    },
    ToolDefinition {
        name: "find_person_by_name",
        description: "Get a person by first name and last name (case-insensitive). Fails with person_not_found if no such person exists.",
        parameters: &PERSON_NAME,
    },
    ToolDefinition {
        name: "list_all_projects",
        description: "List all projects.",
        parameters: &[],
    },
    ToolDefinition {
        name: "find_project_by_name",
        description: "Get a project by name (case-insensitive). Fails with project_not_found if the project does not exist.",
        parameters: &[required("project_name", ParameterKind::Text)],
    },
    ToolDefinition {
        name: "create_project",
        description: "Create a project with a unique name and an optional description.",
        parameters: &[
            required("project_name", ParameterKind::Text),
            optional("description", ParameterKind::Text),
        ],
    },
    ToolDefinition {
        name: "list_all_activities",
        description: "List all activities across all projects.",
        parameters: &[],
    },
    ToolDefinition {
        name: "get_activity_by_name",
        description: "Get an activity by activity name and project name (both case-insensitive). The activity must belong to that project.",
        parameters: &[
            required("activity_name", ParameterKind::Text),
            required("project_name", ParameterKind::Text),
        ],
    },
    ToolDefinition {
        name: "list_activities_for_project",
        description: "List all activities of a project, given the project name (case-insensitive).",
        parameters: &[required("project_name", ParameterKind::Text)],
    },
    ToolDefinition {
        name: "create_activity",
        description: "Create an activity with a unique name under an existing project.",
        parameters: &[
            required("project_name", ParameterKind::Text),
            required("activity_name", ParameterKind::Text),
            optional("description", ParameterKind::Text),
        ],
    },
    ToolDefinition {
        name: "create_reported_time",
        description: "Create a time entry. Project, activity and person names are case-insensitive and must exist; the activity must belong to the project. Date is YYYY-MM-DD, duration is a decimal number of hours. Returns the created entry.",
        parameters: &TIME_ENTRY,
    },
    ToolDefinition {
        name: "delete_reported_time",
        description: "Delete one time entry matching project, activity, person, date and duration exactly. Returns true if an entry was deleted and false if none matched. Unknown names are errors.",
        parameters: &TIME_ENTRY,
    },
    ToolDefinition {
        name: "list_reported_times_for_person_and_timespan",
        description: "List a person's time entries between start_date and end_date, both inclusive (YYYY-MM-DD). Empty when nothing matches.",
        parameters: &[
            required("first_name", ParameterKind::Text),
            required("last_name", ParameterKind::Text),
            required("start_date", ParameterKind::Date),
            required("end_date", ParameterKind::Date),
        ],
    },
    ToolDefinition {
        name: "list_reported_times_for_person_and_period",
        description: "List a person's time entries for a period relative to today. Period is one of THIS_WEEK, LAST_WEEK, WEEK_NUMBER:<n> (ISO week in the current year), THIS_MONTH, LAST_MONTH or MONTH:<n> (1-12, current year).",
        parameters: &[
            required("first_name", ParameterKind::Text),
            required("last_name", ParameterKind::Text),
            required("period", ParameterKind::Period),
        ],
    },
    ToolDefinition {
        name: "list_reported_times_for_person_and_project",
        description: "List a person's time entries on activities of one project. Empty when nothing matches.",
        parameters: &[
            required("first_name", ParameterKind::Text),
            required("last_name", ParameterKind::Text),
            required("project_name", ParameterKind::Text),
        ],
    },
    ToolDefinition {
        name: "list_reported_times_for_project_and_timespan",
        description: "List all time entries on a project between start_date and end_date, both inclusive (YYYY-MM-DD).",
        parameters: &[
            required("project_name", ParameterKind::Text),
            required("start_date", ParameterKind::Date),
            required("end_date", ParameterKind::Date),
        ],
    },
];

/// Returns every tool in catalog order.
pub fn tool_definitions() -> &'static [ToolDefinition] {
    TOOLS
}

/// Looks a tool up by exact name.
pub fn find_tool(name: &str) -> Option<&'static ToolDefinition> {
    TOOLS.iter().find(|tool| tool.name == name)
}
