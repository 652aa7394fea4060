//! Dependency-ordered generation of a complete dataset.

use crate::context::SeedContext;
use crate::error::GeneratorError;
use crate::generators::{comments, custom_fields, organization, projects, tags, tasks};
use seed_core::{
    Comment, CustomFieldDefinition, EnumOption, ParentLink, Project, ProjectCustomField, Record,
    SeedConfig, Section, Tag, Task, TaskFieldValue, TaskTag, Team, TeamMembership, User,
    Workspace,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Every row of one generation run, grouped by table.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub workspace: Workspace,
    pub teams: Vec<Team>,
    pub users: Vec<User>,
    pub team_memberships: Vec<TeamMembership>,
    pub projects: Vec<Project>,
    pub sections: Vec<Section>,
    /// Tasks with their final parent and section assignments.
    pub tasks: Vec<Task>,
    pub tags: Vec<Tag>,
    pub task_tags: Vec<TaskTag>,
    pub comments: Vec<Comment>,
    pub custom_fields: Vec<CustomFieldDefinition>,
    pub enum_options: Vec<EnumOption>,
    pub project_custom_fields: Vec<ProjectCustomField>,
    pub task_field_values: Vec<TaskFieldValue>,
}

impl Dataset {
    /// Parent assignments to apply after the flat task insert.
    pub fn parent_links(&self) -> Vec<ParentLink> {
        self.tasks.iter().filter_map(Task::parent_link).collect()
    }

    /// Row count per table, in insertion order.
    pub fn row_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            (Workspace::TABLE, 1),
            (Team::TABLE, self.teams.len()),
            (User::TABLE, self.users.len()),
            (TeamMembership::TABLE, self.team_memberships.len()),
            (Project::TABLE, self.projects.len()),
            (Section::TABLE, self.sections.len()),
            (Task::TABLE, self.tasks.len()),
            (Tag::TABLE, self.tags.len()),
            (TaskTag::TABLE, self.task_tags.len()),
            (Comment::TABLE, self.comments.len()),
            (CustomFieldDefinition::TABLE, self.custom_fields.len()),
            (EnumOption::TABLE, self.enum_options.len()),
            (ProjectCustomField::TABLE, self.project_custom_fields.len()),
            (TaskFieldValue::TABLE, self.task_field_values.len()),
        ]
    }

    pub fn total_rows(&self) -> usize {
        self.row_counts().iter().map(|(_, n)| n).sum()
    }
}

/// Generates a [`Dataset`] from a config and a seeded context.
///
/// Entities are produced strictly parent-first, so every reference a row
/// carries points at a row generated earlier in the same run.
pub struct DatasetGenerator {
    config: SeedConfig,
    ctx: SeedContext,
}

impl DatasetGenerator {
    /// Create a generator anchored at the current time.
    pub fn new(config: SeedConfig, seed: u64) -> Self {
        Self::with_context(config, SeedContext::from_seed(seed))
    }

    /// Create a generator with an explicit context (fixed clock in tests).
    pub fn with_context(config: SeedConfig, ctx: SeedContext) -> Self {
        Self { config, ctx }
    }

    pub fn config(&self) -> &SeedConfig {
        &self.config
    }

    /// Run every generator in dependency order.
    pub fn generate(&mut self) -> Result<Dataset, GeneratorError> {
        self.config.validate()?;
        let cfg = self.config.clone();
        let days = cfg.history_days;
        let ctx = &mut self.ctx;

        info!(
            "Generating dataset: {} users, {} teams, {} projects, {} tasks, {} tags over {} days",
            cfg.n_users, cfg.n_teams, cfg.n_projects, cfg.n_tasks, cfg.n_tags, days
        );

        let workspace = organization::generate_workspace(ctx);
        let teams = organization::generate_teams(ctx, &workspace, cfg.n_teams, days);
        let users = organization::generate_users(ctx, &workspace, cfg.n_users, days);
        let team_memberships =
            organization::generate_team_memberships(ctx, &teams, &users, days)?;

        let projects =
            projects::generate_projects(ctx, &workspace, &teams, &users, cfg.n_projects, days)?;
        let sections = projects::generate_sections(ctx, &projects, days);

        let mut tasks = tasks::generate_tasks(
            ctx,
            &workspace,
            &projects,
            &sections,
            &users,
            cfg.n_tasks,
            days,
        )?;
        let linked = tasks::assign_subtasks(ctx, &mut tasks, tasks::SUBTASK_FRACTION);
        debug!("Linked {} subtasks to parents", linked);

        let tags = tags::generate_tags(ctx, &workspace, cfg.n_tags, days);
        let task_tags = tags::generate_task_tags(ctx, &tasks, &tags)?;

        let comments = comments::generate_comments(
            ctx,
            &tasks,
            &users,
            cfg.max_comments_per_task,
            days,
        )?;

        let custom_fields = custom_fields::generate_custom_fields(ctx, &workspace, &users, days)?;
        let mut options_by_field = HashMap::new();
        let mut enum_options = Vec::new();
        for field in &custom_fields {
            let options = custom_fields::generate_enum_options(ctx, field);
            enum_options.extend(options.iter().cloned());
            options_by_field.insert(field.custom_field_id, options);
        }
        let project_custom_fields =
            custom_fields::generate_project_custom_fields(&projects, &custom_fields);
        let task_field_values = custom_fields::generate_task_field_values(
            ctx,
            &tasks,
            &custom_fields,
            &options_by_field,
            days,
        );

        let dataset = Dataset {
            workspace,
            teams,
            users,
            team_memberships,
            projects,
            sections,
            tasks,
            tags,
            task_tags,
            comments,
            custom_fields,
            enum_options,
            project_custom_fields,
            task_field_values,
        };

        info!(
            "Generated {} rows ({} identifiers issued)",
            dataset.total_rows(),
            ctx.ids_issued()
        );

        Ok(dataset)
    }
}
