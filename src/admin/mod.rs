// ABOUTME: Admin panel module for answering and deleting submitted questions
// ABOUTME: Provides routes at /admin/* rendered with askama and driven by htmx

pub mod routes;
pub mod templates;
pub mod view;

pub use routes::{admin_router, AdminState};
