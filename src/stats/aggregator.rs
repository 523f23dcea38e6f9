//! The statistics aggregation core.
//!
//! Six independent resource summaries are fetched concurrently and
//! merged into one `StatisticsViewModel`. The operation is strictly
//! all-or-nothing: a single failed request fails the whole view, and
//! no partial result ever reaches the caller.

use crate::api::{ApiClient, ApiError};
use crate::models::{Category, StatisticsViewModel, StatusCount};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Endpoint paths, matching the backend's route layout.
const PRODUCT_COUNT_PATH: &str = "/product/products/count";
const USER_TOTAL_PATH: &str = "/user/users/total";
const CATEGORY_COUNT_PATH: &str = "/category/categories/count";
const ORDER_TOTAL_PATH: &str = "/orders/orders/total";
const REVENUE_SUMMARY_PATH: &str = "/orders/sum/total-revenue";
const CATEGORY_LIST_PATH: &str = "/category";

/// Failure of the aggregation as a whole.
///
/// There is exactly one user-facing kind: one or more of the six
/// required requests failed. The underlying `ApiError` is carried as
/// the source for logging, not for the view.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// At least one resource fetch failed or returned a non-success status.
    #[error("one or more statistics requests failed")]
    PartialFailure(#[source] ApiError),
}

/// Result of a successful aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOutput {
    /// The merged view model.
    pub stats: StatisticsViewModel,
    /// The raw category list, in backend order.
    pub categories: Vec<Category>,
}

/// `{ totalProducts: number }`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductCountResponse {
    total_products: Option<u64>,
}

/// `{ totalUsers: number }`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserTotalResponse {
    total_users: Option<u64>,
}

/// `{ total: number }`
#[derive(Debug, Default, Deserialize)]
struct CategoryCountResponse {
    total: Option<u64>,
}

/// `{ totalOrders: number }`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderTotalResponse {
    total_orders: Option<u64>,
}

/// `{ totalRevenue, orderCount, orderCountByStatus }`
///
/// The status map stays a raw JSON map here: serde_json is built with
/// `preserve_order`, so key order is the response's enumeration order.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RevenueSummaryResponse {
    total_revenue: Option<f64>,
    order_count: Option<u64>,
    order_count_by_status: Option<serde_json::Map<String, Value>>,
}

/// Fetch all six resource summaries concurrently and merge them.
///
/// The requests are issued without any ordering dependency and joined
/// at a single await point. `try_join!` is fail-fast: the first error
/// drops the in-flight siblings and the whole aggregation returns
/// `PartialFailure`. Re-invocable; nothing is cached between calls.
pub async fn aggregate(api: &ApiClient) -> Result<AggregateOutput, AggregationError> {
    debug!("Aggregating statistics from {}", api.base_url());

    let (products, users, category_count, orders, revenue, categories) = futures::try_join!(
        api.get_json::<ProductCountResponse>(PRODUCT_COUNT_PATH),
        api.get_json::<UserTotalResponse>(USER_TOTAL_PATH),
        api.get_json::<CategoryCountResponse>(CATEGORY_COUNT_PATH),
        api.get_json::<OrderTotalResponse>(ORDER_TOTAL_PATH),
        api.get_json::<RevenueSummaryResponse>(REVENUE_SUMMARY_PATH),
        api.get_json::<Vec<Category>>(CATEGORY_LIST_PATH),
    )
    .map_err(|e| {
        warn!("Statistics fetch failed: {}", e);
        AggregationError::PartialFailure(e)
    })?;

    let stats = merge(products, users, category_count, orders, revenue);
    debug!(
        "Merged statistics: {} products, {} users, {} categories, {} orders",
        stats.total_products, stats.total_users, stats.total_categories, stats.total_orders
    );

    Ok(AggregateOutput { stats, categories })
}

/// Merge the five summary responses into the view model.
///
/// Each response writes to disjoint fields, so the merge is
/// commutative over resource identity. Missing and null numeric
/// fields coalesce to 0.
fn merge(
    products: ProductCountResponse,
    users: UserTotalResponse,
    category_count: CategoryCountResponse,
    orders: OrderTotalResponse,
    revenue: RevenueSummaryResponse,
) -> StatisticsViewModel {
    StatisticsViewModel {
        total_products: products.total_products.unwrap_or(0),
        total_users: users.total_users.unwrap_or(0),
        total_categories: category_count.total.unwrap_or(0),
        total_orders: orders.total_orders.unwrap_or(0),
        total_revenue: revenue.total_revenue.unwrap_or(0.0),
        order_count: revenue.order_count.unwrap_or(0),
        order_count_by_status: status_counts(
            &revenue.order_count_by_status.unwrap_or_default(),
        ),
    }
}

/// Convert the raw status map into an ordered sequence of counts.
///
/// Key order is preserved; non-numeric or negative values coalesce
/// to 0 rather than dropping the entry, so labels and values stay
/// aligned positionally.
fn status_counts(map: &serde_json::Map<String, Value>) -> Vec<StatusCount> {
    map.iter()
        .map(|(status, value)| StatusCount {
            status: status.clone(),
            count: value.as_u64().unwrap_or(0),
        })
        .collect()
}
