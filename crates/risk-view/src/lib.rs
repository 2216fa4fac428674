//! Table view controller for prediction reports.
//!
//! A loaded [`risk_model::Dataset`] never changes. What the user sees is
//! derived from it by [`compose`] using three small stores:
//!
//! - [`ColumnVisibilityStore`] - which columns are shown, per report
//! - [`ValueFilterStore`] - which values are hidden, per report and column
//! - [`SortState`] - at most one sort column
//!
//! [`ViewSession`] ties them together and applies user intents.

pub mod compose;
pub mod filter;
pub mod session;
pub mod sort;
pub mod visibility;

pub use compose::{ComposedView, compose};
pub use filter::{ValueFilterStore, Veto};
pub use session::{ValueOption, ViewIntent, ViewSession};
pub use sort::{SortDirection, SortKey, SortState};
pub use visibility::{ColumnVisibility, ColumnVisibilityStore, default_visible_columns};
