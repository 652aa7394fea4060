//! Workspace, teams, users and team memberships.

use super::{cycled_name, pick, vocab};
use crate::context::SeedContext;
use crate::error::GeneratorError;
use faker_rand::en_us::addresses::CityName;
use faker_rand::en_us::names::{FirstName, LastName};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use seed_core::{Team, TeamMembership, User, Workspace};

/// The workspace predates everything else by up to this many days.
pub const WORKSPACE_HISTORY_DAYS: u32 = 900;

/// Teams per user, as `(count, weight)`.
pub const TEAMS_PER_USER: [(usize, f64); 3] = [(1, 0.7), (2, 0.25), (3, 0.05)];

/// Probability that a membership carries team admin rights.
pub const TEAM_ADMIN_PROBABILITY: f64 = 0.03;

pub fn generate_workspace(ctx: &mut SeedContext) -> Workspace {
    Workspace {
        workspace_id: ctx.next_id(),
        name: vocab::WORKSPACE_NAME.to_string(),
        domain: vocab::WORKSPACE_DOMAIN.to_string(),
        is_organization: true,
        created_at: ctx.recent(WORKSPACE_HISTORY_DAYS),
    }
}

pub fn generate_teams(
    ctx: &mut SeedContext,
    workspace: &Workspace,
    n_teams: u32,
    history_days: u32,
) -> Vec<Team> {
    let words = vocab::TEAM_NAMES;
    (0..n_teams as usize)
        .map(|i| Team {
            team_id: ctx.next_id(),
            workspace_id: workspace.workspace_id,
            name: cycled_name(words, i, |name, i| {
                format!("{name} ({})", i / words.len() + 1)
            }),
            description: None,
            visibility: "organization".to_string(),
            created_at: ctx.recent(history_days),
        })
        .collect()
}

/// Users get a faker name and city; the email embeds the user's ordinal,
/// which keeps it unique across the run.
pub fn generate_users(
    ctx: &mut SeedContext,
    workspace: &Workspace,
    n_users: u32,
    history_days: u32,
) -> Vec<User> {
    (0..n_users)
        .map(|i| {
            let first = ctx.rng().gen::<FirstName>().to_string();
            let last = ctx.rng().gen::<LastName>().to_string();
            User {
                user_id: ctx.next_id(),
                workspace_id: workspace.workspace_id,
                email: format!(
                    "{}.{}{i}@{}",
                    email_part(&first),
                    email_part(&last),
                    vocab::WORKSPACE_DOMAIN
                ),
                full_name: format!("{first} {last}"),
                title: pick(ctx.rng(), vocab::TITLES).to_string(),
                department: pick(ctx.rng(), vocab::DEPARTMENTS).to_string(),
                location: ctx.rng().gen::<CityName>().to_string(),
                is_active: true,
                role: "member".to_string(),
                created_at: ctx.recent(history_days),
            }
        })
        .collect()
}

/// Lowercase ASCII letters and digits of a name, for an email local part.
fn email_part(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Place every user on 1-3 distinct teams.
pub fn generate_team_memberships(
    ctx: &mut SeedContext,
    teams: &[Team],
    users: &[User],
    history_days: u32,
) -> Result<Vec<TeamMembership>, GeneratorError> {
    if users.is_empty() {
        return Ok(Vec::new());
    }
    if teams.is_empty() {
        return Err(GeneratorError::MissingParents {
            child: "team_memberships",
            parent: "teams",
        });
    }

    let weights = WeightedIndex::new(TEAMS_PER_USER.iter().map(|(_, w)| *w))?;
    let mut out = Vec::with_capacity(users.len() * 2);

    for user in users {
        let k = TEAMS_PER_USER[weights.sample(ctx.rng())].0;
        let picked: Vec<&Team> = teams.choose_multiple(ctx.rng(), k).collect();
        for team in picked {
            let is_team_admin = ctx.rng().gen_bool(TEAM_ADMIN_PROBABILITY);
            out.push(TeamMembership {
                team_id: team.team_id,
                user_id: user.user_id,
                is_team_admin,
                joined_at: ctx.recent(history_days),
            });
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::Clock;
    use chrono::{Duration, TimeZone, Utc};
    use std::collections::{HashMap, HashSet};

    fn ctx() -> SeedContext {
        SeedContext::new(42, Clock::new(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()))
    }

    #[test]
    fn test_team_names_stay_unique_past_vocabulary() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let teams = generate_teams(&mut ctx, &workspace, 25, 30);

        let names: HashSet<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), 25);
        assert_eq!(teams[0].name, "Core Platform");
        assert_eq!(teams[11].name, "Core Platform (2)");
        assert!(teams.iter().all(|t| t.workspace_id == workspace.workspace_id));
    }

    #[test]
    fn test_user_emails_are_unique() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let users = generate_users(&mut ctx, &workspace, 500, 30);

        let emails: HashSet<&str> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails.len(), 500);
        assert!(users[0].email.ends_with("0@northstarsaas.com"));
    }

    #[test]
    fn test_user_names_vary_and_emails_are_plain_ascii() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let users = generate_users(&mut ctx, &workspace, 1000, 30);

        let names: HashSet<&str> = users.iter().map(|u| u.full_name.as_str()).collect();
        assert!(names.len() > 500, "only {} distinct names", names.len());
        for user in &users {
            let (local, domain) = user.email.split_once('@').unwrap();
            assert_eq!(domain, "northstarsaas.com");
            assert!(local
                .chars()
                .all(|c| c == '.' || c.is_ascii_lowercase() || c.is_ascii_digit()));
            assert!(!user.location.is_empty());
        }
    }

    #[test]
    fn test_users_are_deterministic_for_a_seed() {
        let workspace = generate_workspace(&mut ctx());
        let a = generate_users(&mut ctx(), &workspace, 20, 30);
        let b = generate_users(&mut ctx(), &workspace, 20, 30);
        assert_eq!(a, b);
    }

    #[test]
    fn test_email_part() {
        assert_eq!(email_part("O'Connell"), "oconnell");
        assert_eq!(email_part("Mary Ann"), "maryann");
    }

    #[test]
    fn test_memberships_reference_existing_rows_within_window() {
        let mut ctx = ctx();
        let now = ctx.clock().now();
        let workspace = generate_workspace(&mut ctx);
        let teams = generate_teams(&mut ctx, &workspace, 2, 30);
        let users = generate_users(&mut ctx, &workspace, 5, 30);
        let memberships = generate_team_memberships(&mut ctx, &teams, &users, 30).unwrap();

        let floor = now - Duration::days(30);
        let team_ids: HashSet<_> = teams.iter().map(|t| t.team_id).collect();
        let user_ids: HashSet<_> = users.iter().map(|u| u.user_id).collect();

        for user in &users {
            assert!(user.created_at >= floor && user.created_at <= now);
        }
        for m in &memberships {
            assert!(team_ids.contains(&m.team_id));
            assert!(user_ids.contains(&m.user_id));
            assert!(m.joined_at >= floor && m.joined_at <= now);
        }
    }

    #[test]
    fn test_each_user_joins_one_to_three_distinct_teams() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let teams = generate_teams(&mut ctx, &workspace, 10, 30);
        let users = generate_users(&mut ctx, &workspace, 300, 30);
        let memberships = generate_team_memberships(&mut ctx, &teams, &users, 30).unwrap();

        let mut per_user: HashMap<_, HashSet<_>> = HashMap::new();
        for m in &memberships {
            assert!(per_user.entry(m.user_id).or_default().insert(m.team_id));
        }
        assert_eq!(per_user.len(), 300);
        assert!(per_user.values().all(|t| (1..=3).contains(&t.len())));
    }

    #[test]
    fn test_memberships_capped_by_team_count() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let teams = generate_teams(&mut ctx, &workspace, 1, 30);
        let users = generate_users(&mut ctx, &workspace, 50, 30);
        let memberships = generate_team_memberships(&mut ctx, &teams, &users, 30).unwrap();

        assert_eq!(memberships.len(), 50);
    }

    #[test]
    fn test_memberships_without_teams_fail() {
        let mut ctx = ctx();
        let workspace = generate_workspace(&mut ctx);
        let users = generate_users(&mut ctx, &workspace, 3, 30);

        let result = generate_team_memberships(&mut ctx, &[], &users, 30);
        assert!(matches!(
            result,
            Err(GeneratorError::MissingParents { parent: "teams", .. })
        ));
    }
}
