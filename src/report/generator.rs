//! Markdown and JSON dashboard reports.
//!
//! Renders the aggregated dashboard into a report file: summary tiles
//! first, then one section per chart projection.

use crate::charts::{ChartKind, ChartProjection};
use crate::models::{Dashboard, StatisticsViewModel};
use anyhow::Result;

/// One summary tile: a title and a formatted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub title: String,
    pub value: String,
}

/// The five summary tiles, in display order.
pub fn summary_tiles(stats: &StatisticsViewModel) -> Vec<Tile> {
    vec![
        Tile {
            title: "Tổng sản phẩm".to_string(),
            value: stats.total_products.to_string(),
        },
        Tile {
            title: "Tổng thành viên".to_string(),
            value: stats.total_users.to_string(),
        },
        Tile {
            title: "Tổng danh mục".to_string(),
            value: stats.total_categories.to_string(),
        },
        Tile {
            title: "Tổng đơn hàng".to_string(),
            value: stats.total_orders.to_string(),
        },
        Tile {
            title: "Tổng doanh thu".to_string(),
            value: format_amount(stats.total_revenue),
        },
    ]
}

/// Format a monetary amount: whole numbers without a decimal part,
/// everything else with two digits. Zero renders as `0`, never blank.
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(dashboard: &Dashboard) -> String {
    let mut output = String::new();

    output.push_str("# ShopDash Report\n\n");
    output.push_str(&generate_metadata_section(dashboard));
    output.push_str(&generate_tiles_section(&dashboard.stats));

    output.push_str(&generate_chart_section(&dashboard.charts.revenue));
    output.push_str(&generate_chart_section(&dashboard.charts.order_count));
    output.push_str(&generate_chart_section(&dashboard.charts.status));
    output.push_str(&generate_chart_section(&dashboard.charts.category));

    output.push_str(&generate_footer());

    output
}

/// Generate a JSON report (the dashboard serialized verbatim).
pub fn generate_json_report(dashboard: &Dashboard) -> Result<String> {
    Ok(serde_json::to_string_pretty(dashboard)?)
}

fn generate_metadata_section(dashboard: &Dashboard) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **API:** {}\n", dashboard.metadata.api_url));
    section.push_str(&format!(
        "- **Fetched:** {}\n",
        dashboard.metadata.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        dashboard.metadata.duration_seconds
    ));
    section.push_str(&format!(
        "- **Categories:** {}\n",
        dashboard.categories.len()
    ));
    section.push('\n');

    section
}

fn generate_tiles_section(stats: &StatisticsViewModel) -> String {
    let mut section = String::new();
    let tiles = summary_tiles(stats);

    section.push_str("## Summary\n\n");
    section.push('|');
    for tile in &tiles {
        section.push_str(&format!(" {} |", tile.title));
    }
    section.push('\n');
    section.push('|');
    for _ in &tiles {
        section.push_str(":---:|");
    }
    section.push('\n');
    section.push('|');
    for tile in &tiles {
        section.push_str(&format!(" {} |", tile.value));
    }
    section.push_str("\n\n");

    section
}

/// One section per chart: a table of entries, with a share column for
/// pie charts.
fn generate_chart_section(chart: &ChartProjection) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", chart.name));

    if chart.labels.is_empty() {
        section.push_str("*No data.*\n\n");
        return section;
    }

    let total: f64 = chart.values.iter().sum();

    match chart.kind {
        ChartKind::Bar => {
            section.push_str("| Label | Value |\n");
            section.push_str("|:---|---:|\n");
            for (label, value) in chart.labels.iter().zip(&chart.values) {
                section.push_str(&format!("| {} | {} |\n", label, format_amount(*value)));
            }
        }
        ChartKind::Pie => {
            section.push_str("| Label | Value | Share | Color |\n");
            section.push_str("|:---|---:|---:|:---|\n");
            for i in 0..chart.labels.len() {
                let value = chart.values[i];
                let share = if total > 0.0 {
                    format!("{:.1}%", value / total * 100.0)
                } else {
                    "-".to_string()
                };
                section.push_str(&format!(
                    "| {} | {} | {} | `{}` |\n",
                    chart.labels[i],
                    format_amount(value),
                    share,
                    chart.colors[i].fill
                ));
            }
        }
    }
    section.push('\n');

    section
}

fn generate_footer() -> String {
    format!(
        "---\n\n*Generated by ShopDash v{}*\n",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::project;
    use crate::models::{Category, DashboardMetadata, StatusCount};
    use chrono::Utc;

    fn sample_dashboard() -> Dashboard {
        let stats = StatisticsViewModel {
            total_products: 10,
            total_users: 20,
            total_categories: 2,
            total_orders: 8,
            total_revenue: 0.0,
            order_count: 8,
            order_count_by_status: vec![StatusCount {
                status: "pending".to_string(),
                count: 8,
            }],
        };
        let categories = vec![Category {
            category_id: 1,
            category_name: "A".to_string(),
        }];
        let charts = project(&stats, &categories);

        Dashboard {
            metadata: DashboardMetadata {
                api_url: "http://localhost:8000".to_string(),
                fetched_at: Utc::now(),
                duration_seconds: 0.3,
            },
            stats,
            categories,
            charts,
        }
    }

    #[test]
    fn test_summary_tiles_order_and_titles() {
        let tiles = summary_tiles(&sample_dashboard().stats);
        let titles: Vec<&str> = tiles.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Tổng sản phẩm",
                "Tổng thành viên",
                "Tổng danh mục",
                "Tổng đơn hàng",
                "Tổng doanh thu",
            ]
        );
    }

    #[test]
    fn test_zero_revenue_renders_as_zero() {
        let tiles = summary_tiles(&sample_dashboard().stats);
        let revenue = tiles.last().unwrap();
        assert_eq!(revenue.title, "Tổng doanh thu");
        assert_eq!(revenue.value, "0");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(1500.0), "1500");
        assert_eq!(format_amount(999.5), "999.50");
    }

    #[test]
    fn test_markdown_report_contains_all_sections() {
        let report = generate_markdown_report(&sample_dashboard());
        assert!(report.contains("# ShopDash Report"));
        assert!(report.contains("## Summary"));
        assert!(report.contains("## Tổng doanh thu"));
        assert!(report.contains("## Tổng số đơn hàng"));
        assert!(report.contains("## Số lượng đơn hàng theo trạng thái"));
        assert!(report.contains("## Danh mục"));
        assert!(report.contains("pending"));
    }

    #[test]
    fn test_markdown_report_handles_empty_charts() {
        let mut dashboard = sample_dashboard();
        dashboard.stats.order_count_by_status.clear();
        dashboard.categories.clear();
        dashboard.charts = project(&dashboard.stats, &dashboard.categories);

        let report = generate_markdown_report(&dashboard);
        assert!(report.contains("*No data.*"));
    }

    #[test]
    fn test_json_report_is_valid_json() {
        let json = generate_json_report(&sample_dashboard()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stats"]["total_products"], 10);
        assert_eq!(value["charts"]["revenue"]["kind"], "bar");
    }
}
