//! In-memory invariant checks over a generated [`Dataset`].
//!
//! These mirror the constraints the store enforces, plus the temporal and
//! hierarchy rules it cannot express. The populator refuses to write a
//! dataset that reports any violation.

use crate::dataset::Dataset;
use seed_core::{FieldType, FieldValue, Id};
use std::collections::{HashMap, HashSet};

/// Number of sections every project carries.
pub const SECTIONS_PER_PROJECT: usize = 4;

/// Maximum tags attached to a single task.
pub const MAX_TAGS_PER_TASK: usize = 3;

/// A single broken invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("{table}.{column} references missing row {id}")]
    DanglingReference {
        table: &'static str,
        column: &'static str,
        id: Id,
    },

    #[error("Duplicate {table} row for ({left}, {right})")]
    DuplicatePair {
        table: &'static str,
        left: Id,
        right: Id,
    },

    #[error("Duplicate {table} primary key {id}")]
    DuplicateId { table: &'static str, id: Id },

    #[error("Duplicate user email {0}")]
    DuplicateEmail(String),

    #[error("Project {project_id} has {count} sections")]
    SectionCount { project_id: Id, count: usize },

    #[error("Task {task_id}: {detail}")]
    TaskTimeline { task_id: Id, detail: &'static str },

    #[error("Task {task_id} has invalid parent: {detail}")]
    InvalidParent { task_id: Id, detail: &'static str },

    #[error("Task {task_id} has {count} tags")]
    TooManyTags { task_id: Id, count: usize },

    #[error("Value for field {custom_field_id} on task {task_id}: {detail}")]
    FieldValueMismatch {
        task_id: Id,
        custom_field_id: Id,
        detail: &'static str,
    },
}

struct Check {
    violations: Vec<Violation>,
}

impl Check {
    fn reference(&mut self, known: &HashSet<Id>, table: &'static str, column: &'static str, id: Id) {
        if !known.contains(&id) {
            self.violations
                .push(Violation::DanglingReference { table, column, id });
        }
    }

    fn pair(&mut self, seen: &mut HashSet<(Id, Id)>, table: &'static str, left: Id, right: Id) {
        if !seen.insert((left, right)) {
            self.violations
                .push(Violation::DuplicatePair { table, left, right });
        }
    }

    /// Collect a table's primary keys, reporting any repeated one.
    fn keys(&mut self, table: &'static str, ids: impl IntoIterator<Item = Id>) -> HashSet<Id> {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                self.violations.push(Violation::DuplicateId { table, id });
            }
        }
        seen
    }

    fn task(&mut self, task_id: Id, detail: &'static str) {
        self.violations
            .push(Violation::TaskTimeline { task_id, detail });
    }
}

impl Dataset {
    /// Check every cross-row invariant, returning all violations found.
    pub fn validate(&self) -> Vec<Violation> {
        let mut check = Check {
            violations: Vec::new(),
        };
        let workspaces: HashSet<Id> = [self.workspace.workspace_id].into_iter().collect();
        let teams = check.keys("teams", self.teams.iter().map(|t| t.team_id));
        let users = check.keys("users", self.users.iter().map(|u| u.user_id));
        let projects = check.keys("projects", self.projects.iter().map(|p| p.project_id));
        check.keys("sections", self.sections.iter().map(|s| s.section_id));
        let tags = check.keys("tags", self.tags.iter().map(|t| t.tag_id));

        for team in &self.teams {
            check.reference(&workspaces, "teams", "workspace_id", team.workspace_id);
        }

        let mut emails = HashSet::new();
        for user in &self.users {
            check.reference(&workspaces, "users", "workspace_id", user.workspace_id);
            if !emails.insert(user.email.as_str()) {
                check
                    .violations
                    .push(Violation::DuplicateEmail(user.email.clone()));
            }
        }

        let mut memberships = HashSet::new();
        for m in &self.team_memberships {
            check.reference(&teams, "team_memberships", "team_id", m.team_id);
            check.reference(&users, "team_memberships", "user_id", m.user_id);
            check.pair(&mut memberships, "team_memberships", m.team_id, m.user_id);
        }

        for project in &self.projects {
            check.reference(&workspaces, "projects", "workspace_id", project.workspace_id);
            check.reference(&teams, "projects", "team_id", project.team_id);
            check.reference(&users, "projects", "created_by", project.created_by);
        }

        let mut section_project: HashMap<Id, Id> = HashMap::new();
        let mut section_counts: HashMap<Id, usize> = HashMap::new();
        for section in &self.sections {
            check.reference(&projects, "sections", "project_id", section.project_id);
            section_project.insert(section.section_id, section.project_id);
            *section_counts.entry(section.project_id).or_default() += 1;
        }
        for project in &self.projects {
            let count = section_counts
                .get(&project.project_id)
                .copied()
                .unwrap_or(0);
            if count != SECTIONS_PER_PROJECT {
                check.violations.push(Violation::SectionCount {
                    project_id: project.project_id,
                    count,
                });
            }
        }

        self.check_tasks(&mut check, &workspaces, &projects, &users, &section_project);
        let task_ids = check.keys("tasks", self.tasks.iter().map(|t| t.task_id));

        let mut task_tags = HashSet::new();
        let mut tags_per_task: HashMap<Id, usize> = HashMap::new();
        for link in &self.task_tags {
            check.reference(&task_ids, "task_tags", "task_id", link.task_id);
            check.reference(&tags, "task_tags", "tag_id", link.tag_id);
            check.pair(&mut task_tags, "task_tags", link.task_id, link.tag_id);
            *tags_per_task.entry(link.task_id).or_default() += 1;
        }
        let mut overloaded: Vec<_> = tags_per_task
            .into_iter()
            .filter(|(_, count)| *count > MAX_TAGS_PER_TASK)
            .collect();
        overloaded.sort();
        for (task_id, count) in overloaded {
            check
                .violations
                .push(Violation::TooManyTags { task_id, count });
        }

        check.keys("comments", self.comments.iter().map(|c| c.comment_id));
        for comment in &self.comments {
            check.reference(&task_ids, "comments", "task_id", comment.task_id);
            check.reference(&users, "comments", "author_id", comment.author_id);
        }

        self.check_custom_fields(&mut check, &workspaces, &projects, &users, &task_ids);

        check.violations
    }

    fn check_tasks(
        &self,
        check: &mut Check,
        workspaces: &HashSet<Id>,
        projects: &HashSet<Id>,
        users: &HashSet<Id>,
        section_project: &HashMap<Id, Id>,
    ) {
        let by_id: HashMap<Id, &seed_core::Task> =
            self.tasks.iter().map(|t| (t.task_id, t)).collect();

        for task in &self.tasks {
            check.reference(workspaces, "tasks", "workspace_id", task.workspace_id);
            check.reference(projects, "tasks", "project_id", task.project_id);
            check.reference(users, "tasks", "created_by", task.created_by);
            if let Some(assignee) = task.assignee_id {
                check.reference(users, "tasks", "assignee_id", assignee);
            }

            match section_project.get(&task.section_id) {
                None => check.violations.push(Violation::DanglingReference {
                    table: "tasks",
                    column: "section_id",
                    id: task.section_id,
                }),
                Some(project_id) if *project_id != task.project_id => {
                    check.task(task.task_id, "section belongs to another project")
                }
                Some(_) => {}
            }

            if task.updated_at < task.created_at {
                check.task(task.task_id, "updated_at precedes created_at");
            }
            match (task.completed, task.completed_at) {
                (true, None) => check.task(task.task_id, "completed without completed_at"),
                (true, Some(at)) if at < task.created_at => {
                    check.task(task.task_id, "completed_at precedes created_at")
                }
                (false, Some(_)) => check.task(task.task_id, "completed_at on open task"),
                _ => {}
            }

            let Some(parent_id) = task.parent_task_id else {
                continue;
            };
            let detail = if parent_id == task.task_id {
                Some("task is its own parent")
            } else {
                match by_id.get(&parent_id) {
                    None => Some("parent does not exist"),
                    Some(parent) if parent.project_id != task.project_id => {
                        Some("parent is in another project")
                    }
                    Some(parent) if parent.section_id != task.section_id => {
                        Some("parent is in another section")
                    }
                    Some(_) => None,
                }
            };
            if let Some(detail) = detail {
                check.violations.push(Violation::InvalidParent {
                    task_id: task.task_id,
                    detail,
                });
            }
        }
    }

    fn check_custom_fields(
        &self,
        check: &mut Check,
        workspaces: &HashSet<Id>,
        projects: &HashSet<Id>,
        users: &HashSet<Id>,
        task_ids: &HashSet<Id>,
    ) {
        let field_types: HashMap<Id, FieldType> = self
            .custom_fields
            .iter()
            .map(|f| (f.custom_field_id, f.field_type))
            .collect();
        let fields = check.keys(
            "custom_field_definitions",
            self.custom_fields.iter().map(|f| f.custom_field_id),
        );
        for field in &self.custom_fields {
            check.reference(
                workspaces,
                "custom_field_definitions",
                "workspace_id",
                field.workspace_id,
            );
            check.reference(
                users,
                "custom_field_definitions",
                "created_by",
                field.created_by,
            );
        }

        check.keys(
            "custom_field_enum_options",
            self.enum_options.iter().map(|o| o.option_id),
        );
        let mut option_field: HashMap<Id, Id> = HashMap::new();
        for option in &self.enum_options {
            check.reference(
                &fields,
                "custom_field_enum_options",
                "custom_field_id",
                option.custom_field_id,
            );
            option_field.insert(option.option_id, option.custom_field_id);
        }

        let mut attached = HashSet::new();
        for link in &self.project_custom_fields {
            check.reference(projects, "project_custom_fields", "project_id", link.project_id);
            check.reference(
                &fields,
                "project_custom_fields",
                "custom_field_id",
                link.custom_field_id,
            );
            check.pair(
                &mut attached,
                "project_custom_fields",
                link.project_id,
                link.custom_field_id,
            );
        }

        let mut values = HashSet::new();
        for value in &self.task_field_values {
            check.reference(task_ids, "task_custom_field_values", "task_id", value.task_id);
            check.pair(
                &mut values,
                "task_custom_field_values",
                value.task_id,
                value.custom_field_id,
            );

            let mismatch = |detail| Violation::FieldValueMismatch {
                task_id: value.task_id,
                custom_field_id: value.custom_field_id,
                detail,
            };
            match field_types.get(&value.custom_field_id) {
                None => check.violations.push(Violation::DanglingReference {
                    table: "task_custom_field_values",
                    column: "custom_field_id",
                    id: value.custom_field_id,
                }),
                Some(field_type) if *field_type != value.value.field_type() => check
                    .violations
                    .push(mismatch("slot does not match the field type")),
                Some(_) => {}
            }
            match &value.value {
                FieldValue::EnumOption(option_id) => {
                    if option_field.get(option_id) != Some(&value.custom_field_id) {
                        check
                            .violations
                            .push(mismatch("option does not belong to the field"));
                    }
                }
                FieldValue::Person(user_id) => check.reference(
                    users,
                    "task_custom_field_values",
                    "people_user_id",
                    *user_id,
                ),
                FieldValue::Number(n) if !n.is_finite() => {
                    check.violations.push(mismatch("number is not finite"))
                }
                _ => {}
            }
        }
    }
}
