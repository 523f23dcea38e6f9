//! Data models for the statistics dashboard.
//!
//! This module contains the core data structures shared across the
//! application: the merged statistics view model, categories, the
//! dashboard payload, and the presentation view state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product category as returned by the backend.
///
/// The backend returns categories as an ordered list; that order is
/// preserved everywhere downstream (chart labels depend on it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier.
    pub category_id: u64,
    /// Display name of the category.
    pub category_name: String,
}

/// Number of orders in one status, e.g. ("pending", 3).
///
/// Stored as an ordered sequence rather than a map so that the
/// enumeration order of the backend response survives the merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    /// Status label as the backend names it.
    pub status: String,
    /// Number of orders currently in this status.
    pub count: u64,
}

/// The merged statistics view model.
///
/// Every field is always present after a successful aggregation;
/// missing or null backend fields are coalesced to 0/empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatisticsViewModel {
    /// Total number of products.
    pub total_products: u64,
    /// Total number of registered users.
    pub total_users: u64,
    /// Total number of categories.
    pub total_categories: u64,
    /// Total number of orders.
    pub total_orders: u64,
    /// Total revenue across all orders.
    pub total_revenue: f64,
    /// Order count as reported by the revenue summary endpoint.
    pub order_count: u64,
    /// Orders per status, in the response's enumeration order.
    pub order_count_by_status: Vec<StatusCount>,
}

/// Metadata about one dashboard fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardMetadata {
    /// Base URL of the API the data came from.
    pub api_url: String,
    /// When the fetch completed.
    pub fetched_at: DateTime<Utc>,
    /// Duration of the aggregation in seconds.
    pub duration_seconds: f64,
}

/// The complete dashboard: everything the success view renders.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Metadata about this fetch.
    pub metadata: DashboardMetadata,
    /// The merged statistics.
    pub stats: StatisticsViewModel,
    /// Category list in backend order.
    pub categories: Vec<Category>,
    /// Derived chart projections.
    pub charts: crate::charts::DashboardCharts,
}

/// Presentation state of the dashboard view.
///
/// `Loading` is the initial state while the aggregation is pending.
/// It resolves to exactly one of `Success` or `Error`, and both are
/// terminal: the only way back to `Loading` is a fresh view (a new
/// run of the aggregation with a new `ViewState`).
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Aggregation in flight; nothing to render yet.
    Loading,
    /// Aggregation failed; holds the user-facing message.
    Error(String),
    /// Aggregation succeeded; holds the renderable payload.
    Success(T),
}

impl<T> ViewState<T> {
    /// Resolve a pending view with the aggregation outcome.
    ///
    /// Only a `Loading` view transitions; `Success` and `Error` are
    /// terminal and ignore further resolutions.
    pub fn resolve<E: std::fmt::Display>(self, outcome: Result<T, E>) -> Self {
        match self {
            ViewState::Loading => match outcome {
                Ok(value) => ViewState::Success(value),
                Err(_) => ViewState::Error(GENERIC_FETCH_ERROR.to_string()),
            },
            terminal => terminal,
        }
    }

    /// Whether the view is still waiting on the aggregation.
    #[allow(dead_code)] // Utility accessor used by tests
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// The single user-facing message for any aggregation failure.
///
/// Which request failed (and why) goes to the logs only; the view
/// deliberately does not distinguish.
pub const GENERIC_FETCH_ERROR: &str =
    "Unable to fetch statistics at this time. Please try again later.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_model_defaults_to_zero() {
        let vm = StatisticsViewModel::default();
        assert_eq!(vm.total_products, 0);
        assert_eq!(vm.total_users, 0);
        assert_eq!(vm.total_categories, 0);
        assert_eq!(vm.total_orders, 0);
        assert_eq!(vm.total_revenue, 0.0);
        assert_eq!(vm.order_count, 0);
        assert!(vm.order_count_by_status.is_empty());
    }

    #[test]
    fn test_category_deserializes_backend_shape() {
        let json = r#"[{"category_id": 1, "category_name": "A"},
                       {"category_id": 2, "category_name": "B"}]"#;
        let categories: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].category_id, 1);
        assert_eq!(categories[1].category_name, "B");
    }

    #[test]
    fn test_view_state_resolves_to_success() {
        let view: ViewState<u32> = ViewState::Loading;
        let view = view.resolve(Ok::<_, String>(42));
        assert_eq!(view, ViewState::Success(42));
    }

    #[test]
    fn test_view_state_resolves_to_error() {
        let view: ViewState<u32> = ViewState::Loading;
        let view = view.resolve(Err::<u32, _>("boom".to_string()));
        assert_eq!(view, ViewState::Error(GENERIC_FETCH_ERROR.to_string()));
    }

    #[test]
    fn test_view_state_terminal_states_stay_put() {
        let view: ViewState<u32> = ViewState::Success(1);
        let view = view.resolve(Err::<u32, _>("late failure".to_string()));
        assert_eq!(view, ViewState::Success(1));

        let view: ViewState<u32> = ViewState::Error("e".to_string());
        let view = view.resolve(Ok::<_, String>(2));
        assert_eq!(view, ViewState::Error("e".to_string()));
    }

    #[test]
    fn test_loading_is_loading() {
        assert!(ViewState::<u32>::Loading.is_loading());
        assert!(!ViewState::Success(1).is_loading());
    }
}
