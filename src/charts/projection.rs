//! Chart projection builder.
//!
//! Pure derivation of four chart-ready structures from the view model
//! and the category list: two single-value bar charts (revenue, order
//! count) and two pie charts (orders by status, categories). No
//! rendering happens here; a projection is just labels, values, and
//! colors with matching indices.

use crate::models::{Category, StatisticsViewModel};
use serde::Serialize;

/// How a projection is meant to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
}

/// Fill and border color of one chart entry, as rgba() strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartColor {
    pub fill: String,
    pub border: String,
}

/// A chart-ready projection: label[i], value[i], and color[i] always
/// describe the same entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartProjection {
    pub kind: ChartKind,
    /// Display name of the dataset.
    pub name: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<ChartColor>,
}

/// The four projections the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    /// Single-bar total revenue chart.
    pub revenue: ChartProjection,
    /// Single-bar order count chart.
    pub order_count: ChartProjection,
    /// Pie chart of orders per status.
    pub status: ChartProjection,
    /// Pie chart over the category list.
    pub category: ChartProjection,
}

/// The fixed six-color palette for the status pie chart, cycled by
/// entry index (`palette[i % 6]`).
const STATUS_PALETTE: [(u8, u8, u8); 6] = [
    (255, 99, 132),
    (54, 162, 235),
    (255, 206, 86),
    (75, 192, 192),
    (153, 102, 255),
    (255, 159, 64),
];

/// Fill alpha used by every chart; borders are fully opaque.
const FILL_ALPHA: &str = "0.6";

fn rgba(r: u16, g: u16, b: u16, alpha: &str) -> String {
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

fn fixed_color(r: u8, g: u8, b: u8) -> ChartColor {
    ChartColor {
        fill: rgba(r.into(), g.into(), b.into(), FILL_ALPHA),
        border: rgba(r.into(), g.into(), b.into(), "1"),
    }
}

/// Palette color for entry `index`, wrapping past the sixth entry.
fn palette_color(index: usize) -> ChartColor {
    let (r, g, b) = STATUS_PALETTE[index % STATUS_PALETTE.len()];
    fixed_color(r, g, b)
}

/// Deterministic per-index color for the category chart:
/// `rgb((i*50) % 255, (i*100) % 255, (i*150) % 255)`.
fn procedural_color(index: usize) -> ChartColor {
    let r = ((index * 50) % 255) as u16;
    let g = ((index * 100) % 255) as u16;
    let b = ((index * 150) % 255) as u16;
    ChartColor {
        fill: rgba(r, g, b, FILL_ALPHA),
        border: rgba(r, g, b, "1"),
    }
}

/// Build all four chart projections.
///
/// Pure: no I/O, no shared state; identical inputs yield identical
/// output. Empty inputs yield empty but well-formed projections.
pub fn project(stats: &StatisticsViewModel, categories: &[Category]) -> DashboardCharts {
    DashboardCharts {
        revenue: ChartProjection {
            kind: ChartKind::Bar,
            name: "Tổng doanh thu".to_string(),
            labels: vec!["Doanh thu".to_string()],
            values: vec![stats.total_revenue],
            colors: vec![fixed_color(75, 192, 192)],
        },
        order_count: ChartProjection {
            kind: ChartKind::Bar,
            name: "Tổng số đơn hàng".to_string(),
            labels: vec!["Số lượng đơn hàng".to_string()],
            values: vec![stats.order_count as f64],
            colors: vec![fixed_color(153, 102, 255)],
        },
        status: ChartProjection {
            kind: ChartKind::Pie,
            name: "Số lượng đơn hàng theo trạng thái".to_string(),
            labels: stats
                .order_count_by_status
                .iter()
                .map(|c| c.status.clone())
                .collect(),
            values: stats
                .order_count_by_status
                .iter()
                .map(|c| c.count as f64)
                .collect(),
            colors: (0..stats.order_count_by_status.len())
                .map(palette_color)
                .collect(),
        },
        category: ChartProjection {
            kind: ChartKind::Pie,
            name: "Danh mục".to_string(),
            labels: categories.iter().map(|c| c.category_name.clone()).collect(),
            // Category ids stand in for weights until the backend
            // exposes a per-category product count.
            values: categories.iter().map(|c| c.category_id as f64).collect(),
            colors: (0..categories.len()).map(procedural_color).collect(),
        },
    }
}
