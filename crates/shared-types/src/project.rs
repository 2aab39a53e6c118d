use serde::{Deserialize, Serialize};

use crate::models::User;

/// Project lifecycle status. Closed set; any value is settable by any
/// role with access — no transition rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Pending,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Cancelled,
    ];

    /// Parse a status string. Unknown values default to `Pending`.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "in_progress" => ProjectStatus::InProgress,
            "completed" => ProjectStatus::Completed,
            "cancelled" => ProjectStatus::Cancelled,
            _ => ProjectStatus::Pending,
        }
    }

    /// Snake_case string as the backend stores it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "Pending",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }
}

/// A project record. `users` is the set of assignees; `creator` is
/// populated by the richer list endpoints and absent elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub creator: Option<User>,
    #[serde(default)]
    pub users: Vec<User>,
}

/// `{ "project": ... }` envelope returned by project create/update
/// endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEnvelope {
    pub project: Project,
}

/// Per-status counts over an in-memory project collection. Purely
/// derived; recomputed on every render, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl ProjectStats {
    pub fn from_projects(projects: &[Project]) -> Self {
        let count = |status: ProjectStatus| {
            projects.iter().filter(|p| p.status == status).count()
        };
        Self {
            total: projects.len(),
            pending: count(ProjectStatus::Pending),
            in_progress: count(ProjectStatus::InProgress),
            completed: count(ProjectStatus::Completed),
            cancelled: count(ProjectStatus::Cancelled),
        }
    }
}
