/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, logout)
/// - `tasks`: Task planner endpoints (list, add, toggle, edit, delete, export)

pub mod auth;
pub mod health;
pub mod tasks;
