use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::error;

use crate::error::AppError;
use crate::models::RepeatRule;
use crate::services::{Progress, Reward};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    View,
    Edit,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::View => "view",
            Permission::Edit => "edit",
        }
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Permission::View),
            "edit" => Ok(Permission::Edit),
            other => Err(format!("unknown permission: {}", other)),
        }
    }
}

/// The user a task is shared with, and what they may do with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub user_id: String,
    pub permission: Permission,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_editable")]
    pub editable: bool,
}

fn default_editable() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// `YYYY-MM-DD`. Not guaranteed to parse for imported tasks.
    pub date: String,
    pub time: Option<String>,
    #[serde(default)]
    pub repeat: RepeatRule,
    #[serde(default)]
    pub completed: bool,
    pub created_at: String,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub collaborator: Option<Collaborator>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Task {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Permission `user_id` holds through collaboration, if any.
    pub fn permission_for(&self, user_id: &str) -> Option<Permission> {
        self.collaborator
            .as_ref()
            .filter(|c| c.user_id == user_id)
            .map(|c| c.permission)
    }

    pub fn can_edit(&self, user_id: &str) -> bool {
        self.is_owned_by(user_id) || self.permission_for(user_id) == Some(Permission::Edit)
    }

    pub fn can_view(&self, user_id: &str) -> bool {
        self.is_owned_by(user_id) || self.permission_for(user_id).is_some()
    }
}

/// Flat storage shape of a task.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub date: String,
    pub time: Option<String>,
    pub repeat_rule: String,
    pub completed: bool,
    pub created_at: String,
    pub subtasks: String,
    pub collaborator_id: Option<String>,
    pub permission: Option<String>,
    pub difficulty: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = AppError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let repeat: RepeatRule = serde_json::from_str(&row.repeat_rule)?;
        let subtasks: Vec<Subtask> = serde_json::from_str(&row.subtasks)?;
        let difficulty = row.difficulty.parse::<Difficulty>().map_err(|e| {
            error!("corrupt task row {}: {}", row.id, e);
            AppError::InternalServerError
        })?;

        let collaborator = match (row.collaborator_id, row.permission) {
            (Some(user_id), Some(permission)) => Some(Collaborator {
                user_id,
                permission: permission.parse::<Permission>().map_err(|e| {
                    error!("corrupt task row {}: {}", row.id, e);
                    AppError::InternalServerError
                })?,
            }),
            _ => None,
        };

        Ok(Task {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            date: row.date,
            time: row.time,
            repeat,
            completed: row.completed,
            created_at: row.created_at,
            subtasks,
            collaborator,
            difficulty,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTaskRequest {
    pub name: String,
    pub date: String,
    pub time: Option<String>,
    #[serde(default)]
    pub repeat: RepeatRule,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    pub collaborator: Option<Collaborator>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub repeat: Option<RepeatRule>,
    pub subtasks: Option<Vec<Subtask>>,
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtaskUpdateRequest {
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteTaskResponse {
    pub task: Task,
    pub reward: Reward,
    pub progress: Progress,
    pub leveled_up: bool,
}
