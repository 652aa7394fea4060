//! Task comments.

use super::{choose_parent, pick, vocab};
use crate::context::SeedContext;
use crate::error::GeneratorError;
use rand::Rng;
use seed_core::{Comment, Task, User};

/// Between 0 and `max_comments_per_task` comments per task, each written
/// no earlier than the task itself.
pub fn generate_comments(
    ctx: &mut SeedContext,
    tasks: &[Task],
    users: &[User],
    max_comments_per_task: u32,
    history_days: u32,
) -> Result<Vec<Comment>, GeneratorError> {
    let mut out = Vec::new();
    for task in tasks {
        let k = ctx.rng().gen_range(0..=max_comments_per_task);
        for _ in 0..k {
            let author = choose_parent(ctx.rng(), users, "comments", "users")?;
            out.push(Comment {
                comment_id: ctx.next_id(),
                task_id: task.task_id,
                author_id: author.user_id,
                body: pick(ctx.rng(), vocab::COMMENT_BODIES).to_string(),
                created_at: ctx.after(task.created_at, history_days),
            });
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::Clock;
    use crate::generators::organization::{generate_users, generate_workspace};
    use chrono::{Duration, TimeZone, Utc};
    use std::collections::HashMap;

    fn ctx() -> SeedContext {
        SeedContext::new(42, Clock::new(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()))
    }

    fn task_at(ctx: &mut SeedContext, days_ago: i64) -> Task {
        let created_at = ctx.clock().now() - Duration::days(days_ago);
        Task {
            task_id: ctx.next_id(),
            workspace_id: ctx.next_id(),
            project_id: ctx.next_id(),
            section_id: ctx.next_id(),
            parent_task_id: None,
            name: "task".to_string(),
            description: None,
            created_by: ctx.next_id(),
            assignee_id: None,
            due_on: None,
            start_on: None,
            created_at,
            updated_at: created_at,
            completed: false,
            completed_at: None,
            priority: None,
        }
    }

    #[test]
    fn test_comment_counts_and_ordering() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let users = generate_users(&mut ctx, &workspace, 3, 30);
        let tasks: Vec<Task> = (0..300).map(|i| task_at(&mut ctx, i % 30)).collect();
        let comments = generate_comments(&mut ctx, &tasks, &users, 3, 30).unwrap();

        let by_task: HashMap<_, &Task> = tasks.iter().map(|t| (t.task_id, t)).collect();
        let mut counts: HashMap<_, usize> = HashMap::new();
        for c in &comments {
            let task = by_task[&c.task_id];
            assert!(c.created_at >= task.created_at);
            assert!(users.iter().any(|u| u.user_id == c.author_id));
            *counts.entry(c.task_id).or_default() += 1;
        }
        assert!(counts.values().all(|&n| n <= 3));
        assert!(counts.values().any(|&n| n == 3));
    }

    #[test]
    fn test_comments_without_users_fail() {
        let mut ctx = ctx();
        let tasks: Vec<Task> = (0..50).map(|_| task_at(&mut ctx, 1)).collect();
        let result = generate_comments(&mut ctx, &tasks, &[], 3, 30);
        assert!(matches!(
            result,
            Err(GeneratorError::MissingParents { parent: "users", .. })
        ));
    }
}
