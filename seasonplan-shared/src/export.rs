/// Plain-text export rendering
///
/// Renders a user's store-ordered task list into the shareable report the
/// web UI hands to the chat bot: a header naming the user, then one section
/// per category present, each task on its own line behind a completion
/// glyph.
///
/// # Example
///
/// ```text
/// 📋 Task list for alice
///
/// --- Spring 🌱 ---
/// ⭕ Plant seeds
///
/// --- General 📌 ---
/// ✔️ Sharpen shears
/// ```
use crate::models::task::{Category, Task};

/// Glyph for a completed task
const DONE_GLYPH: &str = "✔️";

/// Glyph for a still-open task
const OPEN_GLYPH: &str = "⭕";

/// Renders a category-grouped plain-text report
///
/// `tasks` must already be in store order (category, then newest first);
/// the renderer emits a section heading whenever the category changes and
/// never reorders. Empty categories produce no section.
pub fn render_report(username: &str, tasks: &[Task]) -> String {
    let mut lines = vec![format!("📋 Task list for {}", username)];

    let mut current: Option<Category> = None;
    for task in tasks {
        if current != Some(task.category) {
            lines.push(String::new());
            lines.push(format!("--- {} ---", task.category.label()));
            current = Some(task.category);
        }

        let glyph = if task.is_completed {
            DONE_GLYPH
        } else {
            OPEN_GLYPH
        };
        lines.push(format!("{} {}", glyph, task.content));
    }

    lines.join("\n")
}
