//! Dashboard view model: everything the dashboard derives from a fetched
//! (current conditions, forecast) pair, plus the recent-search history.

pub mod alerts;
pub mod forecast;
pub mod history;
pub mod render;
pub mod session;
pub mod units;
pub mod view;

pub use alerts::detect_alert;
pub use history::{FileHistoryStore, HistoryStore, SearchHistory};
pub use render::Theme;
pub use session::DashboardSession;
pub use units::TemperatureUnit;
pub use view::{DashboardView, SearchTicket, ViewState};
