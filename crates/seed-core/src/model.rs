//! Entity records for the work-management dataset.
//!
//! Every struct here maps to exactly one table. Foreign keys are plain
//! [`Id`] values; generators are responsible for only ever pointing at rows
//! that exist (or will exist by the time the row is persisted).

use crate::record::Record;
use crate::values::{Id, SqlValue, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Enumerations
// ============================================================================

/// Project board layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    List,
    Board,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::List, Layout::Board];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::List => "list",
            Layout::Board => "board",
        }
    }
}

/// Task priority label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::P0, Priority::P1, Priority::P2, Priority::P3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
            Priority::P3 => "P3",
        }
    }
}

/// Declared type of a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Enum,
    People,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Enum => "enum",
            FieldType::People => "people",
        }
    }
}

// ============================================================================
// Organization, people and teams
// ============================================================================

/// The single organization a run generates.
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub workspace_id: Id,
    pub name: String,
    pub domain: String,
    pub is_organization: bool,
    pub created_at: Timestamp,
}

impl Record for Workspace {
    const TABLE: &'static str = "workspaces";
    const COLUMNS: &'static [&'static str] =
        &["workspace_id", "name", "domain", "is_organization", "created_at"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.workspace_id.into(),
            self.name.as_str().into(),
            self.domain.as_str().into(),
            self.is_organization.into(),
            self.created_at.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub team_id: Id,
    pub workspace_id: Id,
    pub name: String,
    pub description: Option<String>,
    pub visibility: String,
    pub created_at: Timestamp,
}

impl Record for Team {
    const TABLE: &'static str = "teams";
    const COLUMNS: &'static [&'static str] = &[
        "team_id",
        "workspace_id",
        "name",
        "description",
        "visibility",
        "created_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.team_id.into(),
            self.workspace_id.into(),
            self.name.as_str().into(),
            self.description.clone().into(),
            self.visibility.as_str().into(),
            self.created_at.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: Id,
    pub workspace_id: Id,
    pub full_name: String,
    pub email: String,
    pub title: String,
    pub department: String,
    pub location: String,
    pub is_active: bool,
    pub role: String,
    pub created_at: Timestamp,
}

impl Record for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "user_id",
        "workspace_id",
        "full_name",
        "email",
        "title",
        "department",
        "location",
        "is_active",
        "role",
        "created_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.user_id.into(),
            self.workspace_id.into(),
            self.full_name.as_str().into(),
            self.email.as_str().into(),
            self.title.as_str().into(),
            self.department.as_str().into(),
            self.location.as_str().into(),
            self.is_active.into(),
            self.role.as_str().into(),
            self.created_at.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMembership {
    pub team_id: Id,
    pub user_id: Id,
    pub is_team_admin: bool,
    pub joined_at: Timestamp,
}

impl Record for TeamMembership {
    const TABLE: &'static str = "team_memberships";
    const COLUMNS: &'static [&'static str] = &["team_id", "user_id", "is_team_admin", "joined_at"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.team_id.into(),
            self.user_id.into(),
            self.is_team_admin.into(),
            self.joined_at.into(),
        ]
    }
}

// ============================================================================
// Projects and sections
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub project_id: Id,
    pub workspace_id: Id,
    pub team_id: Id,
    pub name: String,
    pub description: Option<String>,
    pub privacy: String,
    pub layout: Layout,
    pub status: String,
    pub color: Option<String>,
    pub created_by: Id,
    pub created_at: Timestamp,
    pub archived_at: Option<Timestamp>,
}

impl Record for Project {
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static [&'static str] = &[
        "project_id",
        "workspace_id",
        "team_id",
        "name",
        "description",
        "privacy",
        "layout",
        "status",
        "color",
        "created_by",
        "created_at",
        "archived_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.project_id.into(),
            self.workspace_id.into(),
            self.team_id.into(),
            self.name.as_str().into(),
            self.description.clone().into(),
            self.privacy.as_str().into(),
            self.layout.as_str().into(),
            self.status.as_str().into(),
            self.color.clone().into(),
            self.created_by.into(),
            self.created_at.into(),
            self.archived_at.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub section_id: Id,
    pub project_id: Id,
    pub name: String,
    pub sort_order: u32,
    pub created_at: Timestamp,
}

impl Record for Section {
    const TABLE: &'static str = "sections";
    const COLUMNS: &'static [&'static str] =
        &["section_id", "project_id", "name", "sort_order", "created_at"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.section_id.into(),
            self.project_id.into(),
            self.name.as_str().into(),
            self.sort_order.into(),
            self.created_at.into(),
        ]
    }
}

// ============================================================================
// Tasks
// ============================================================================

/// A work item. `parent_task_id` is the only self-reference in the model.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub task_id: Id,
    pub workspace_id: Id,
    pub project_id: Id,
    pub section_id: Id,
    pub parent_task_id: Option<Id>,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Id,
    pub assignee_id: Option<Id>,
    pub due_on: Option<NaiveDate>,
    pub start_on: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub priority: Option<Priority>,
}

impl Task {
    /// Copy of this task with the parent reference cleared.
    ///
    /// Tasks are first persisted detached so that the self-referencing
    /// foreign key never points at a row that is not there yet.
    pub fn detached(&self) -> Task {
        Task {
            parent_task_id: None,
            ..self.clone()
        }
    }

    /// The deferred parent assignment for this task, if it has one.
    pub fn parent_link(&self) -> Option<ParentLink> {
        self.parent_task_id.map(|parent_task_id| ParentLink {
            task_id: self.task_id,
            parent_task_id,
        })
    }
}

impl Record for Task {
    const TABLE: &'static str = "tasks";
    const COLUMNS: &'static [&'static str] = &[
        "task_id",
        "workspace_id",
        "project_id",
        "section_id",
        "parent_task_id",
        "name",
        "description",
        "created_by",
        "assignee_id",
        "due_on",
        "start_on",
        "created_at",
        "updated_at",
        "completed",
        "completed_at",
        "priority",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.task_id.into(),
            self.workspace_id.into(),
            self.project_id.into(),
            self.section_id.into(),
            self.parent_task_id.into(),
            self.name.as_str().into(),
            self.description.clone().into(),
            self.created_by.into(),
            self.assignee_id.into(),
            self.due_on.into(),
            self.start_on.into(),
            self.created_at.into(),
            self.updated_at.into(),
            self.completed.into(),
            self.completed_at.into(),
            self.priority.map(|p| p.as_str()).into(),
        ]
    }
}

/// Second-pass update wiring a subtask to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLink {
    pub task_id: Id,
    pub parent_task_id: Id,
}

// ============================================================================
// Tags and comments
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub tag_id: Id,
    pub workspace_id: Id,
    pub name: String,
    pub color: Option<String>,
    pub created_at: Timestamp,
}

impl Record for Tag {
    const TABLE: &'static str = "tags";
    const COLUMNS: &'static [&'static str] =
        &["tag_id", "workspace_id", "name", "color", "created_at"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.tag_id.into(),
            self.workspace_id.into(),
            self.name.as_str().into(),
            self.color.clone().into(),
            self.created_at.into(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTag {
    pub task_id: Id,
    pub tag_id: Id,
}

impl Record for TaskTag {
    const TABLE: &'static str = "task_tags";
    const COLUMNS: &'static [&'static str] = &["task_id", "tag_id"];

    fn values(&self) -> Vec<SqlValue> {
        vec![self.task_id.into(), self.tag_id.into()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub comment_id: Id,
    pub task_id: Id,
    pub author_id: Id,
    pub body: String,
    pub created_at: Timestamp,
}

impl Record for Comment {
    const TABLE: &'static str = "comments";
    const COLUMNS: &'static [&'static str] =
        &["comment_id", "task_id", "author_id", "body", "created_at"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.comment_id.into(),
            self.task_id.into(),
            self.author_id.into(),
            self.body.as_str().into(),
            self.created_at.into(),
        ]
    }
}

// ============================================================================
// Custom fields
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CustomFieldDefinition {
    pub custom_field_id: Id,
    pub workspace_id: Id,
    pub name: String,
    pub field_type: FieldType,
    pub description: Option<String>,
    pub created_by: Id,
    pub created_at: Timestamp,
}

impl Record for CustomFieldDefinition {
    const TABLE: &'static str = "custom_field_definitions";
    const COLUMNS: &'static [&'static str] = &[
        "custom_field_id",
        "workspace_id",
        "name",
        "field_type",
        "description",
        "created_by",
        "created_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.custom_field_id.into(),
            self.workspace_id.into(),
            self.name.as_str().into(),
            self.field_type.as_str().into(),
            self.description.clone().into(),
            self.created_by.into(),
            self.created_at.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumOption {
    pub option_id: Id,
    pub custom_field_id: Id,
    pub name: String,
    pub color: Option<String>,
    pub sort_order: u32,
}

impl Record for EnumOption {
    const TABLE: &'static str = "custom_field_enum_options";
    const COLUMNS: &'static [&'static str] =
        &["option_id", "custom_field_id", "name", "color", "sort_order"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.option_id.into(),
            self.custom_field_id.into(),
            self.name.as_str().into(),
            self.color.clone().into(),
            self.sort_order.into(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectCustomField {
    pub project_id: Id,
    pub custom_field_id: Id,
    pub is_required: bool,
    pub sort_order: u32,
}

impl Record for ProjectCustomField {
    const TABLE: &'static str = "project_custom_fields";
    const COLUMNS: &'static [&'static str] =
        &["project_id", "custom_field_id", "is_required", "sort_order"];

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.project_id.into(),
            self.custom_field_id.into(),
            self.is_required.into(),
            self.sort_order.into(),
        ]
    }
}

/// The populated slot of a custom field value.
///
/// Exactly one slot is ever set; the enum makes any other state
/// unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    EnumOption(Id),
    Person(Id),
}

impl FieldValue {
    /// The field type this value may be attached to.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Number(_) => FieldType::Number,
            FieldValue::Date(_) => FieldType::Date,
            FieldValue::EnumOption(_) => FieldType::Enum,
            FieldValue::Person(_) => FieldType::People,
        }
    }

    /// Expand into the five nullable value columns.
    fn slots(&self) -> [SqlValue; 5] {
        let mut slots = [
            SqlValue::Null,
            SqlValue::Null,
            SqlValue::Null,
            SqlValue::Null,
            SqlValue::Null,
        ];
        match self {
            FieldValue::Text(s) => slots[0] = s.as_str().into(),
            FieldValue::Number(n) => slots[1] = (*n).into(),
            FieldValue::Date(d) => slots[2] = (*d).into(),
            FieldValue::EnumOption(id) => slots[3] = (*id).into(),
            FieldValue::Person(id) => slots[4] = (*id).into(),
        }
        slots
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskFieldValue {
    pub task_id: Id,
    pub custom_field_id: Id,
    pub value: FieldValue,
    pub updated_at: Timestamp,
}

impl Record for TaskFieldValue {
    const TABLE: &'static str = "task_custom_field_values";
    const COLUMNS: &'static [&'static str] = &[
        "task_id",
        "custom_field_id",
        "text_value",
        "number_value",
        "date_value",
        "enum_option_id",
        "people_user_id",
        "updated_at",
    ];

    fn values(&self) -> Vec<SqlValue> {
        let mut values = vec![self.task_id.into(), self.custom_field_id.into()];
        values.extend(self.value.slots());
        values.push(self.updated_at.into());
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn id(n: u128) -> Id {
        Id::from_uuid(Uuid::from_u128(n))
    }

    fn ts() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    fn task() -> Task {
        Task {
            task_id: id(1),
            workspace_id: id(2),
            project_id: id(3),
            section_id: id(4),
            parent_task_id: Some(id(5)),
            name: "Fix flaky integration test".to_string(),
            description: None,
            created_by: id(6),
            assignee_id: None,
            due_on: None,
            start_on: None,
            created_at: ts(),
            updated_at: ts(),
            completed: false,
            completed_at: None,
            priority: Some(Priority::P2),
        }
    }

    #[test]
    fn test_values_match_columns() {
        let t = task();
        assert_eq!(t.values().len(), Task::COLUMNS.len());

        let value = TaskFieldValue {
            task_id: id(1),
            custom_field_id: id(2),
            value: FieldValue::Number(5.0),
            updated_at: ts(),
        };
        assert_eq!(value.values().len(), TaskFieldValue::COLUMNS.len());
    }

    #[test]
    fn test_detached_clears_only_parent() {
        let t = task();
        let flat = t.detached();
        assert_eq!(flat.parent_task_id, None);
        assert_eq!(flat.section_id, t.section_id);
        assert_eq!(flat.task_id, t.task_id);
    }

    #[test]
    fn test_parent_link() {
        let t = task();
        assert_eq!(
            t.parent_link(),
            Some(ParentLink {
                task_id: id(1),
                parent_task_id: id(5)
            })
        );
        assert_eq!(t.detached().parent_link(), None);
    }

    #[test]
    fn test_field_value_single_slot() {
        let value = TaskFieldValue {
            task_id: id(1),
            custom_field_id: id(2),
            value: FieldValue::EnumOption(id(9)),
            updated_at: ts(),
        };
        let values = value.values();
        let populated: Vec<_> = values[2..7].iter().filter(|v| !v.is_null()).collect();
        assert_eq!(populated, vec![&SqlValue::Id(id(9))]);
        assert_eq!(value.value.field_type(), FieldType::Enum);
    }
}
