/// Task model and database operations
///
/// This module provides the Task model and the owner-scoped CRUD operations
/// that make up the task store. Every task belongs to exactly one user for
/// its whole life; all mutations check ownership inside a single UPDATE
/// statement so the check-then-mutate sequence is atomic per row.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_category AS ENUM (
///     'spring', 'summer', 'autumn', 'winter', 'general'
/// );
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     content VARCHAR(500) NOT NULL,
///     category task_category NOT NULL DEFAULT 'general',
///     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The enum declaration order is the display order: listing and export
/// group tasks by category in this order, newest first within a category.
///
/// # Example
///
/// ```no_run
/// use seasonplan_shared::models::task::{Category, CreateTask, Task};
/// use uuid::Uuid;
///
/// # async fn example(pool: sqlx::PgPool, owner_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let task = Task::create(&pool, CreateTask {
///     owner_id,
///     content: "Plant seeds".to_string(),
///     category: Category::Spring,
/// }).await?;
///
/// let toggled = Task::toggle_completed(&pool, task.id, owner_id).await?;
/// assert!(toggled.is_completed);
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{PlannerError, PlannerResult};

/// Fixed task category set
///
/// Declaration order is significant: it is both the Postgres enum order and
/// the grouping order for list/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Spring,
    Summer,
    Autumn,
    Winter,
    General,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 5] = [
        Category::Spring,
        Category::Summer,
        Category::Autumn,
        Category::Winter,
        Category::General,
    ];

    /// Converts category to its wire/database identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Spring => "spring",
            Category::Summer => "summer",
            Category::Autumn => "autumn",
            Category::Winter => "winter",
            Category::General => "general",
        }
    }

    /// Display label shown in the UI and in exports
    pub fn label(&self) -> &'static str {
        match self {
            Category::Spring => "Spring 🌱",
            Category::Summer => "Summer ☀️",
            Category::Autumn => "Autumn 🍂",
            Category::Winter => "Winter ❄️",
            Category::General => "General 📌",
        }
    }

    /// Parses a category identifier, returning None for unknown input
    pub fn parse(input: &str) -> Option<Category> {
        match input {
            "spring" => Some(Category::Spring),
            "summer" => Some(Category::Summer),
            "autumn" => Some(Category::Autumn),
            "winter" => Some(Category::Winter),
            "general" => Some(Category::General),
            _ => None,
        }
    }

    /// Parses a category identifier, coercing unknown input to General
    ///
    /// This is the create-path fallback. The edit path uses [`Category::parse`]
    /// instead and keeps the task's current category on unknown input.
    pub fn parse_or_general(input: &str) -> Category {
        Self::parse(input).unwrap_or(Category::General)
    }
}

/// Task model representing a single to-do item
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning user; never changes after creation
    pub owner_id: Uuid,

    /// Task text, non-empty
    pub content: String,

    /// Category bucket for grouping
    pub category: Category,

    /// Completion flag, toggled by the owner
    pub is_completed: bool,

    /// When the task was created (set once)
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning user
    pub owner_id: Uuid,

    /// Task text (must be non-blank)
    pub content: String,

    /// Category bucket
    pub category: Category,
}

impl Task {
    /// Creates a new task for a user
    ///
    /// # Errors
    ///
    /// Returns `EmptyContent` if the content is blank (whitespace-only
    /// counts as blank), or `Store` on database failure.
    pub async fn create(pool: &PgPool, data: CreateTask) -> PlannerResult<Self> {
        if data.content.trim().is_empty() {
            return Err(PlannerError::EmptyContent);
        }

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (owner_id, content, category)
            VALUES ($1, $2, $3)
            RETURNING id, owner_id, content, category, is_completed, created_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.content)
        .bind(data.category)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> PlannerResult<Option<Self>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, content, category, is_completed, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks belonging to a user
    ///
    /// Ordered by category (enum declaration order), then creation time
    /// descending within each category. Callers bucket the flat sequence
    /// for per-category display.
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> PlannerResult<Vec<Self>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, owner_id, content, category, is_completed, created_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY category, created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Flips the completion flag of a task
    ///
    /// The ownership check and the flip happen in one UPDATE statement, so
    /// no concurrent reader ever observes a partial state.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no task has this id
    /// - `Forbidden` if the task belongs to another user
    pub async fn toggle_completed(
        pool: &PgPool,
        id: Uuid,
        requester_id: Uuid,
    ) -> PlannerResult<Self> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET is_completed = NOT is_completed
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, content, category, is_completed, created_at
            "#,
        )
        .bind(id)
        .bind(requester_id)
        .fetch_optional(pool)
        .await?;

        match task {
            Some(task) => Ok(task),
            None => Err(Self::ownership_failure(pool, id).await),
        }
    }

    /// Replaces a task's content and (optionally) category
    ///
    /// `new_category: None` keeps the stored category. This is the edit
    /// path's fallback for unrecognized category input; the create path
    /// coerces to General instead.
    ///
    /// # Errors
    ///
    /// - `EmptyContent` if the new content is blank (the row is untouched)
    /// - `NotFound` / `Forbidden` as for [`Task::toggle_completed`]
    pub async fn update_content(
        pool: &PgPool,
        id: Uuid,
        requester_id: Uuid,
        new_content: &str,
        new_category: Option<Category>,
    ) -> PlannerResult<Self> {
        if new_content.trim().is_empty() {
            return Err(PlannerError::EmptyContent);
        }

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET content = $3,
                category = COALESCE($4, category)
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, content, category, is_completed, created_at
            "#,
        )
        .bind(id)
        .bind(requester_id)
        .bind(new_content)
        .bind(new_category)
        .fetch_optional(pool)
        .await?;

        match task {
            Some(task) => Ok(task),
            None => Err(Self::ownership_failure(pool, id).await),
        }
    }

    /// Deletes a task permanently
    ///
    /// No soft delete: the row ceases to exist.
    ///
    /// # Errors
    ///
    /// `NotFound` / `Forbidden` as for [`Task::toggle_completed`].
    pub async fn delete(pool: &PgPool, id: Uuid, requester_id: Uuid) -> PlannerResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(requester_id)
            .execute(pool)
            .await?;

        if result.rows_affected() > 0 {
            Ok(())
        } else {
            Err(Self::ownership_failure(pool, id).await)
        }
    }

    /// Classifies an ownership-guarded miss as NotFound or Forbidden
    ///
    /// Called after a guarded UPDATE/DELETE matched zero rows. A lookup
    /// failure here degrades to the store error itself.
    async fn ownership_failure(pool: &PgPool, id: Uuid) -> PlannerError {
        match Self::find_by_id(pool, id).await {
            Ok(Some(_)) => PlannerError::Forbidden,
            Ok(None) => PlannerError::NotFound,
            Err(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_as_str() {
        assert_eq!(Category::Spring.as_str(), "spring");
        assert_eq!(Category::Summer.as_str(), "summer");
        assert_eq!(Category::Autumn.as_str(), "autumn");
        assert_eq!(Category::Winter.as_str(), "winter");
        assert_eq!(Category::General.as_str(), "general");
    }

    #[test]
    fn test_category_parse_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
        assert_eq!(Category::parse("monsoon"), None);
        assert_eq!(Category::parse(""), None);
        assert_eq!(Category::parse("Spring"), None); // case-sensitive
    }

    #[test]
    fn test_category_coercion_to_general() {
        assert_eq!(Category::parse_or_general("summer"), Category::Summer);
        assert_eq!(Category::parse_or_general("monsoon"), Category::General);
        assert_eq!(Category::parse_or_general(""), Category::General);
    }

    #[test]
    fn test_category_display_order() {
        // The declaration order drives grouping in list/export.
        let mut sorted = vec![
            Category::General,
            Category::Winter,
            Category::Spring,
            Category::Autumn,
            Category::Summer,
        ];
        sorted.sort();
        assert_eq!(sorted, Category::ALL.to_vec());
    }

    #[test]
    fn test_category_labels_carry_emoji() {
        assert!(Category::Spring.label().starts_with("Spring"));
        assert!(Category::General.label().contains('📌'));
    }

    #[test]
    fn test_category_serde_identifiers() {
        let json = serde_json::to_string(&Category::Autumn).unwrap();
        assert_eq!(json, "\"autumn\"");
        let back: Category = serde_json::from_str("\"winter\"").unwrap();
        assert_eq!(back, Category::Winter);
    }

    #[test]
    fn test_create_task_struct() {
        let data = CreateTask {
            owner_id: Uuid::new_v4(),
            content: "Water the garden".to_string(),
            category: Category::Summer,
        };
        assert_eq!(data.content, "Water the garden");
        assert_eq!(data.category, Category::Summer);
    }

    // Integration tests for the database operations are in
    // seasonplan-api/tests/integration_test.rs
}
