//! Tasks and the subtask hierarchy.
//!
//! Tasks are generated flat. [`assign_subtasks`] then picks children per
//! project and points them at a top-level task of the same project. The
//! populator persists tasks detached and wires parents in a second pass.

use super::projects::sections_by_project;
use super::{choose_parent, pick, vocab};
use crate::context::SeedContext;
use crate::dates::offset_date;
use crate::error::GeneratorError;
use rand::seq::SliceRandom;
use rand::Rng;
use seed_core::{Id, Priority, Project, Section, Task, User, Workspace};
use std::collections::{HashMap, HashSet};

pub const COMPLETED_PROBABILITY: f64 = 0.55;
pub const UNTOUCHED_PROBABILITY: f64 = 0.2;
pub const DUE_DATE_PROBABILITY: f64 = 0.75;
pub const START_DATE_PROBABILITY: f64 = 0.3;
pub const UNASSIGNED_PROBABILITY: f64 = 0.15;

/// Due dates land this many days around the creation date.
pub const DUE_OFFSET_DAYS: std::ops::RangeInclusive<i64> = -14..=60;

/// Share of a project's tasks that become subtasks.
pub const SUBTASK_FRACTION: f64 = 0.25;

/// Projects with fewer tasks than this get no subtasks.
pub const MIN_TASKS_FOR_SUBTASKS: usize = 5;

/// Minimum number of top-level tasks left to act as parents.
pub const MIN_PARENT_CANDIDATES: usize = 2;

pub fn generate_tasks(
    ctx: &mut SeedContext,
    workspace: &Workspace,
    projects: &[Project],
    sections: &[Section],
    users: &[User],
    n_tasks: u32,
    history_days: u32,
) -> Result<Vec<Task>, GeneratorError> {
    let sections = sections_by_project(sections);
    let mut out = Vec::with_capacity(n_tasks as usize);

    for _ in 0..n_tasks {
        let project = choose_parent(ctx.rng(), projects, "tasks", "projects")?;
        let project_sections = sections
            .get(&project.project_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let section = choose_parent(ctx.rng(), project_sections, "tasks", "sections")?;

        let created_at = ctx.recent(history_days);
        let updated_at = if ctx.rng().gen_bool(UNTOUCHED_PROBABILITY) {
            created_at
        } else {
            ctx.after(created_at, history_days)
        };

        let completed = ctx.rng().gen_bool(COMPLETED_PROBABILITY);
        let completed_at = if completed {
            Some(ctx.after(created_at, history_days))
        } else {
            None
        };

        let due_on = if ctx.rng().gen_bool(DUE_DATE_PROBABILITY) {
            let offset = ctx.rng().gen_range(DUE_OFFSET_DAYS);
            Some(offset_date(created_at, offset))
        } else {
            None
        };

        let created_on = created_at.date_naive();
        let start_on = match due_on {
            Some(due) if due >= created_on && ctx.rng().gen_bool(START_DATE_PROBABILITY) => {
                Some(created_on)
            }
            _ => None,
        };

        let assignee_id = if ctx.rng().gen_bool(UNASSIGNED_PROBABILITY) {
            None
        } else {
            Some(choose_parent(ctx.rng(), users, "tasks", "users")?.user_id)
        };

        let priority = match ctx.rng().gen_range(0..=Priority::ALL.len()) {
            0 => None,
            n => Some(Priority::ALL[n - 1]),
        };

        out.push(Task {
            task_id: ctx.next_id(),
            workspace_id: workspace.workspace_id,
            project_id: project.project_id,
            section_id: section.section_id,
            parent_task_id: None,
            name: pick(ctx.rng(), vocab::TASK_NAMES).to_string(),
            description: None,
            created_by: project.created_by,
            assignee_id,
            due_on,
            start_on,
            created_at,
            updated_at,
            completed,
            completed_at,
            priority,
        });
    }

    Ok(out)
}

/// Turn roughly `fraction` of each project's tasks into subtasks.
///
/// Per project, `floor(n * fraction)` children are drawn without
/// replacement; the remaining tasks are the parent pool, so a parent is
/// never itself a child and never the child it is assigned to. Each child
/// moves into its parent's section. Returns the number of links made.
pub fn assign_subtasks(ctx: &mut SeedContext, tasks: &mut [Task], fraction: f64) -> usize {
    // Group by project in first-seen order so the draw is deterministic.
    let mut order: Vec<Id> = Vec::new();
    let mut by_project: HashMap<Id, Vec<usize>> = HashMap::new();
    for (idx, task) in tasks.iter().enumerate() {
        by_project
            .entry(task.project_id)
            .or_insert_with(|| {
                order.push(task.project_id);
                Vec::new()
            })
            .push(idx);
    }

    let mut linked = 0;
    for project_id in order {
        let members = &by_project[&project_id];
        if members.len() < MIN_TASKS_FOR_SUBTASKS {
            continue;
        }

        let top_level: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| tasks[i].parent_task_id.is_none())
            .collect();
        let n_children = (members.len() as f64 * fraction) as usize;
        let children: HashSet<usize> = top_level
            .choose_multiple(ctx.rng(), n_children)
            .copied()
            .collect();
        let parents: Vec<usize> = top_level
            .iter()
            .copied()
            .filter(|i| !children.contains(i))
            .collect();
        if parents.len() < MIN_PARENT_CANDIDATES {
            continue;
        }

        // Visit children in task order, not hash order.
        let mut children: Vec<usize> = children.into_iter().collect();
        children.sort_unstable();

        for child in children {
            let Some(&parent) = parents.choose(ctx.rng()) else {
                continue;
            };
            let (parent_id, parent_section) = (tasks[parent].task_id, tasks[parent].section_id);
            let task = &mut tasks[child];
            task.parent_task_id = Some(parent_id);
            task.section_id = parent_section;
            linked += 1;
        }
    }

    linked
}
