//! Workspace tags and task/tag links.

use super::{cycled_name, vocab};
use crate::context::SeedContext;
use crate::error::GeneratorError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use seed_core::{Tag, Task, TaskTag, Workspace};

/// Tags per task, as `(count, weight)`.
pub const TAGS_PER_TASK: [(usize, f64); 4] = [(0, 0.35), (1, 0.4), (2, 0.2), (3, 0.05)];

pub fn generate_tags(
    ctx: &mut SeedContext,
    workspace: &Workspace,
    n_tags: u32,
    history_days: u32,
) -> Vec<Tag> {
    (0..n_tags as usize)
        .map(|i| Tag {
            tag_id: ctx.next_id(),
            workspace_id: workspace.workspace_id,
            name: cycled_name(vocab::TAG_NAMES, i, |name, i| format!("{name}-{i}")),
            color: None,
            created_at: ctx.recent(history_days),
        })
        .collect()
}

/// Attach 0-3 distinct tags to every task.
pub fn generate_task_tags(
    ctx: &mut SeedContext,
    tasks: &[Task],
    tags: &[Tag],
) -> Result<Vec<TaskTag>, GeneratorError> {
    let weights = WeightedIndex::new(TAGS_PER_TASK.iter().map(|(_, w)| *w))?;
    let mut out = Vec::new();

    for task in tasks {
        let k = TAGS_PER_TASK[weights.sample(ctx.rng())].0;
        out.extend(
            tags.choose_multiple(ctx.rng(), k.min(tags.len()))
                .map(|tag| TaskTag {
                    task_id: task.task_id,
                    tag_id: tag.tag_id,
                }),
        );
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::Clock;
    use crate::generators::organization::generate_workspace;
    use chrono::{TimeZone, Utc};
    use seed_core::Id;
    use std::collections::{HashMap, HashSet};

    fn ctx() -> SeedContext {
        SeedContext::new(42, Clock::new(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()))
    }

    fn bare_task(ctx: &mut SeedContext, workspace: &Workspace) -> Task {
        let now = ctx.clock().now();
        Task {
            task_id: ctx.next_id(),
            workspace_id: workspace.workspace_id,
            project_id: ctx.next_id(),
            section_id: ctx.next_id(),
            parent_task_id: None,
            name: "task".to_string(),
            description: None,
            created_by: ctx.next_id(),
            assignee_id: None,
            due_on: None,
            start_on: None,
            created_at: now,
            updated_at: now,
            completed: false,
            completed_at: None,
            priority: None,
        }
    }

    #[test]
    fn test_tag_names_are_unique() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let tags = generate_tags(&mut ctx, &workspace, 20, 30);

        let names: HashSet<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), 20);
        assert_eq!(tags[8].name, "tech-debt-8");
    }

    #[test]
    fn test_task_tags_have_no_duplicates() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let tags = generate_tags(&mut ctx, &workspace, 5, 30);
        let tasks: Vec<Task> = (0..500).map(|_| bare_task(&mut ctx, &workspace)).collect();
        let links = generate_task_tags(&mut ctx, &tasks, &tags).unwrap();

        let mut per_task: HashMap<Id, HashSet<Id>> = HashMap::new();
        for link in &links {
            assert!(per_task.entry(link.task_id).or_default().insert(link.tag_id));
        }
        assert!(per_task.values().all(|t| t.len() <= 3));
        // ~35% of tasks get no tags at all
        assert!(per_task.len() < 500);
    }

    #[test]
    fn test_task_tags_capped_by_tag_count() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let tags = generate_tags(&mut ctx, &workspace, 1, 30);
        let tasks: Vec<Task> = (0..200).map(|_| bare_task(&mut ctx, &workspace)).collect();
        let links = generate_task_tags(&mut ctx, &tasks, &tags).unwrap();

        assert!(links.len() <= 200);
    }
}
