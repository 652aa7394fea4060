//! Custom field definitions, enum options, project associations and task values.

use super::{choose_parent, vocab};
use crate::context::SeedContext;
use crate::error::GeneratorError;
use rand::seq::SliceRandom;
use rand::Rng;
use seed_core::{
    CustomFieldDefinition, EnumOption, FieldType, FieldValue, Id, Priority, Project,
    ProjectCustomField, Task, TaskFieldValue, User, Workspace,
};
use std::collections::HashMap;

/// Probability that a task carries a value for an enum field.
pub const ENUM_VALUE_PROBABILITY: f64 = 0.7;

/// Probability that a task carries a value for a number field.
pub const NUMBER_VALUE_PROBABILITY: f64 = 0.5;

/// The two workspace-wide fields: an enum priority and a numeric effort.
pub fn generate_custom_fields(
    ctx: &mut SeedContext,
    workspace: &Workspace,
    users: &[User],
    history_days: u32,
) -> Result<Vec<CustomFieldDefinition>, GeneratorError> {
    let creator = choose_parent(ctx.rng(), users, "custom_field_definitions", "users")?.user_id;
    let fields = [
        ("Priority", FieldType::Enum, "Task priority"),
        ("Effort (pts)", FieldType::Number, "Story points / effort estimate"),
    ];
    Ok(fields
        .into_iter()
        .map(|(name, field_type, description)| CustomFieldDefinition {
            custom_field_id: ctx.next_id(),
            workspace_id: workspace.workspace_id,
            name: name.to_string(),
            field_type,
            description: Some(description.to_string()),
            created_by: creator,
            created_at: ctx.recent(history_days),
        })
        .collect())
}

/// Options for an enum field; other field types have none.
pub fn generate_enum_options(
    ctx: &mut SeedContext,
    field: &CustomFieldDefinition,
) -> Vec<EnumOption> {
    if field.field_type != FieldType::Enum {
        return Vec::new();
    }
    (0u32..)
        .zip(Priority::ALL)
        .map(|(sort_order, priority)| EnumOption {
            option_id: ctx.next_id(),
            custom_field_id: field.custom_field_id,
            name: priority.as_str().to_string(),
            color: None,
            sort_order,
        })
        .collect()
}

/// Attach every field to every project, in field order.
pub fn generate_project_custom_fields(
    projects: &[Project],
    fields: &[CustomFieldDefinition],
) -> Vec<ProjectCustomField> {
    projects
        .iter()
        .flat_map(|project| {
            (0u32..).zip(fields).map(|(sort_order, field)| ProjectCustomField {
                project_id: project.project_id,
                custom_field_id: field.custom_field_id,
                is_required: false,
                sort_order,
            })
        })
        .collect()
}

/// Sparse task values whose populated slot always matches the field type.
pub fn generate_task_field_values(
    ctx: &mut SeedContext,
    tasks: &[Task],
    fields: &[CustomFieldDefinition],
    options_by_field: &HashMap<Id, Vec<EnumOption>>,
    history_days: u32,
) -> Vec<TaskFieldValue> {
    let mut out = Vec::new();
    for task in tasks {
        for field in fields {
            let value = match field.field_type {
                FieldType::Enum if ctx.rng().gen_bool(ENUM_VALUE_PROBABILITY) => {
                    options_by_field
                        .get(&field.custom_field_id)
                        .and_then(|options| options.choose(ctx.rng()))
                        .map(|option| FieldValue::EnumOption(option.option_id))
                }
                FieldType::Number if ctx.rng().gen_bool(NUMBER_VALUE_PROBABILITY) => {
                    vocab::EFFORT_POINTS
                        .choose(ctx.rng())
                        .map(|points| FieldValue::Number(*points))
                }
                _ => None,
            };
            if let Some(value) = value {
                out.push(TaskFieldValue {
                    task_id: task.task_id,
                    custom_field_id: field.custom_field_id,
                    value,
                    updated_at: ctx.after(task.created_at, history_days),
                });
            }
        }
    }
    out
}
