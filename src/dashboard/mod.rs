//! Dashboard module
//!
//! Provides the overview page with charts, headline metrics, upcoming events
//! and recent activity across donors and volunteers.

mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
