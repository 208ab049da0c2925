pub mod admin_add_event;
pub mod admin_dashboard;
pub mod not_found;

pub use admin_add_event::AdminAddEventPage;
pub use admin_dashboard::AdminDashboardPage;
pub use not_found::NotFoundPage;
