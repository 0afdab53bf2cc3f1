//! Reusable UI components

mod dialog;
mod feedback;
mod fields;
mod layout;
mod loading;
mod lot_manager;
mod nav;
mod paginator;
mod redirect;
mod search_overlay;

pub use dialog::{ConfirmDialog, Modal};
pub use feedback::{EmptyState, ErrorBanner, ErrorPanel, SuccessBanner};
pub use fields::{CheckboxField, FieldRow, TextField};
pub use layout::AppLayout;
pub use loading::{LoadingDots, LoadingSpinner};
pub use lot_manager::LotManager;
pub use nav::{SideNav, TopBar};
pub use paginator::{Paginator, SearchBox};
pub use redirect::Redirect;
pub use search_overlay::SearchOverlay;

/// Primary action button.
pub const BTN_PRIMARY: &str = "px-4 py-2 bg-amber-600 text-white text-sm font-medium rounded-lg hover:bg-amber-700 disabled:opacity-50 disabled:cursor-not-allowed";
/// Secondary action button.
pub const BTN_SECONDARY: &str = "px-4 py-2 bg-white border border-gray-300 text-gray-700 text-sm font-medium rounded-lg hover:bg-gray-50 disabled:opacity-50";
/// Destructive action button.
pub const BTN_DANGER: &str = "px-4 py-2 bg-red-600 text-white text-sm font-medium rounded-lg hover:bg-red-700 disabled:opacity-50";
/// Small inline link-style button inside table rows.
pub const BTN_LINK: &str = "text-sm text-amber-700 hover:text-amber-900 font-medium";
/// Text inputs and selects.
pub const INPUT: &str = "w-full px-3 py-2 border border-gray-300 rounded-lg text-sm focus:outline-none focus:ring-2 focus:ring-amber-500";
/// Table header cell.
pub const TH: &str = "px-4 py-3 text-left text-xs font-medium text-gray-500 uppercase tracking-wider";
/// Table body cell.
pub const TD: &str = "px-4 py-3 text-sm text-gray-700";
