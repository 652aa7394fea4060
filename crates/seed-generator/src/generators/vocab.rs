//! Fixed vocabularies used to dress generated rows.

pub const WORKSPACE_NAME: &str = "Northstar SaaS, Inc.";
pub const WORKSPACE_DOMAIN: &str = "northstarsaas.com";

pub const TEAM_NAMES: &[&str] = &[
    "Core Platform",
    "Billing & Subscriptions",
    "Data Engineering",
    "Security",
    "Product Marketing",
    "Demand Gen",
    "Content & Creative",
    "Sales Ops",
    "Customer Support Ops",
    "IT Operations",
    "People Ops",
];

pub const TITLES: &[&str] = &[
    "Software Engineer",
    "Senior Software Engineer",
    "Engineering Manager",
    "Product Manager",
    "Product Designer",
    "Data Analyst",
    "Marketing Manager",
    "Content Strategist",
    "Account Executive",
    "Operations Specialist",
    "Financial Analyst",
    "Recruiter",
];

pub const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Marketing",
    "Operations",
    "Sales",
    "Finance",
    "People",
];

pub const PROJECT_AREAS: &[&str] = &[
    "Billing",
    "Auth",
    "Onboarding",
    "Data Platform",
    "Integrations",
    "Mobile",
];

pub const PRODUCTS: &[&str] = &["Northstar AI", "Northstar Sync", "Northstar Cloud"];

pub const QUARTERS: &[&str] = &["Q1", "Q2", "Q3", "Q4"];

pub const MONTHS: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Ordered workflow every project starts with.
pub const SECTION_NAMES: [&str; 4] = ["Backlog", "In Progress", "Blocked", "Done"];

pub const TASK_NAMES: &[&str] = &[
    "Fix flaky integration test",
    "Draft launch email copy",
    "Review Q2 OKR alignment",
    "Investigate latency regression",
    "Update onboarding checklist",
    "Prepare stakeholder demo",
];

pub const TAG_NAMES: &[&str] = &[
    "tech-debt",
    "customer-ask",
    "security",
    "launch",
    "blocked",
    "urgent",
    "design",
    "legal",
];

pub const COMMENT_BODIES: &[&str] = &[
    "Blocked on review from Legal.",
    "Can someone confirm the acceptance criteria?",
    "Deployed to staging; monitoring metrics.",
    "Customer reported this again, raising priority.",
    "I'll take this after finishing the current task.",
];

/// Story-point scale for the effort field.
pub const EFFORT_POINTS: &[f64] = &[1.0, 2.0, 3.0, 5.0, 8.0, 13.0];
