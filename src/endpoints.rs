//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with the overview charts and metrics.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for managing donors.
pub const DONORS_VIEW: &str = "/donors";
/// The page for managing volunteers.
pub const VOLUNTEERS_VIEW: &str = "/volunteers";
/// The page for managing events.
pub const EVENTS_VIEW: &str = "/events";
/// The page for managing expenses.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page with the reports for each collection.
pub const REPORTS_VIEW: &str = "/reports";
/// The page for sending messages and viewing sent messages.
pub const COMMUNICATIONS_VIEW: &str = "/communications";
/// The page for backing up and restoring data.
pub const SETTINGS_VIEW: &str = "/settings";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create (POST) and update (PUT) donors.
pub const DONORS_API: &str = "/api/donors";
/// The route to delete donors by name.
pub const DELETE_DONORS: &str = "/api/donors/delete";
/// The route to create (POST) and update (PUT) volunteers.
pub const VOLUNTEERS_API: &str = "/api/volunteers";
/// The route to delete volunteers by name.
pub const DELETE_VOLUNTEERS: &str = "/api/volunteers/delete";
/// The route to create (POST) and update (PUT) events.
pub const EVENTS_API: &str = "/api/events";
/// The route to delete events by name.
pub const DELETE_EVENTS: &str = "/api/events/delete";
/// The route to create (POST) and update (PUT) expenses.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route to delete expenses by name.
pub const DELETE_EXPENSES: &str = "/api/expenses/delete";
/// The route to send a message to a recipient group.
pub const COMMUNICATIONS_API: &str = "/api/communications";
/// The route to save a backup of every collection.
pub const BACKUP: &str = "/api/backup";
/// The route to restore every collection from the latest backup.
pub const RESTORE: &str = "/api/restore";
/// The route to restore every collection to the start-up data.
pub const RESEED: &str = "/api/reseed";
/// The route to download every collection as JSON.
pub const EXPORT: &str = "/api/backup.json";
