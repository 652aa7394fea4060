//! Projects and their sections.

use super::{choose_parent, pick, vocab};
use crate::context::SeedContext;
use crate::error::GeneratorError;
use rand::seq::SliceRandom;
use rand::Rng;
use seed_core::{Id, Layout, Project, Section, Team, User, Workspace};
use std::collections::HashMap;

pub fn generate_projects(
    ctx: &mut SeedContext,
    workspace: &Workspace,
    teams: &[Team],
    users: &[User],
    n_projects: u32,
    history_days: u32,
) -> Result<Vec<Project>, GeneratorError> {
    let mut out = Vec::with_capacity(n_projects as usize);
    for _ in 0..n_projects {
        let team = choose_parent(ctx.rng(), teams, "projects", "teams")?;
        let creator = choose_parent(ctx.rng(), users, "projects", "users")?;
        let name = project_name(ctx.rng());
        let layout = Layout::ALL.choose(ctx.rng()).copied().unwrap_or(Layout::List);
        out.push(Project {
            project_id: ctx.next_id(),
            workspace_id: workspace.workspace_id,
            team_id: team.team_id,
            name,
            description: None,
            privacy: "organization".to_string(),
            layout,
            status: "active".to_string(),
            color: None,
            created_by: creator.user_id,
            created_at: ctx.recent(history_days),
            archived_at: None,
        });
    }
    Ok(out)
}

fn project_name<R: Rng>(rng: &mut R) -> String {
    match rng.gen_range(0..5) {
        0 => format!(
            "Q{} Roadmap - {}",
            rng.gen_range(1..=4),
            pick(rng, vocab::PROJECT_AREAS)
        ),
        1 => format!("{} Reliability Improvements", pick(rng, vocab::PROJECT_AREAS)),
        2 => format!(
            "Launch: {} - {}",
            pick(rng, vocab::PRODUCTS),
            pick(rng, vocab::QUARTERS)
        ),
        3 => format!("Ops Intake - {}", pick(rng, vocab::QUARTERS)),
        _ => format!("Content Calendar - {}", pick(rng, vocab::MONTHS)),
    }
}

/// Give every project the fixed workflow of [`vocab::SECTION_NAMES`].
pub fn generate_sections(
    ctx: &mut SeedContext,
    projects: &[Project],
    history_days: u32,
) -> Vec<Section> {
    let mut out = Vec::with_capacity(projects.len() * vocab::SECTION_NAMES.len());
    for project in projects {
        for (sort_order, name) in (0u32..).zip(vocab::SECTION_NAMES) {
            out.push(Section {
                section_id: ctx.next_id(),
                project_id: project.project_id,
                name: name.to_string(),
                sort_order,
                created_at: ctx.recent(history_days),
            });
        }
    }
    out
}

/// Index sections by owning project, preserving sort order.
pub fn sections_by_project(sections: &[Section]) -> HashMap<Id, Vec<&Section>> {
    let mut by_project: HashMap<Id, Vec<&Section>> = HashMap::new();
    for section in sections {
        by_project.entry(section.project_id).or_default().push(section);
    }
    by_project
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::Clock;
    use crate::generators::organization::{generate_teams, generate_users, generate_workspace};
    use chrono::{TimeZone, Utc};

    fn ctx() -> SeedContext {
        SeedContext::new(42, Clock::new(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()))
    }

    #[test]
    fn test_projects_reference_teams_and_users() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let teams = generate_teams(&mut ctx, &workspace, 3, 30);
        let users = generate_users(&mut ctx, &workspace, 4, 30);
        let projects = generate_projects(&mut ctx, &workspace, &teams, &users, 12, 30).unwrap();

        assert_eq!(projects.len(), 12);
        for p in &projects {
            assert!(teams.iter().any(|t| t.team_id == p.team_id));
            assert!(users.iter().any(|u| u.user_id == p.created_by));
            assert!(!p.name.is_empty());
        }
    }

    #[test]
    fn test_every_project_has_four_ordered_sections() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let teams = generate_teams(&mut ctx, &workspace, 1, 30);
        let users = generate_users(&mut ctx, &workspace, 1, 30);
        let projects = generate_projects(&mut ctx, &workspace, &teams, &users, 3, 30).unwrap();
        let sections = generate_sections(&mut ctx, &projects, 30);

        let by_project = sections_by_project(&sections);
        assert_eq!(by_project.len(), 3);
        for project in &projects {
            let names: Vec<&str> = by_project[&project.project_id]
                .iter()
                .map(|s| s.name.as_str())
                .collect();
            assert_eq!(names, vec!["Backlog", "In Progress", "Blocked", "Done"]);
        }
    }

    #[test]
    fn test_projects_without_users_fail() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let teams = generate_teams(&mut ctx, &workspace, 1, 30);

        let result = generate_projects(&mut ctx, &workspace, &teams, &[], 1, 30);
        assert!(matches!(
            result,
            Err(GeneratorError::MissingParents { parent: "users", .. })
        ));
    }
}
