use dioxus::prelude::*;

use crate::app::Services;
use crate::infra::sqlite::store::DashboardStats;

#[component]
fn StatCard(title: String, value: String) -> Element {
    rsx! {
        div {
            style: "flex: 1; min-width: 180px; background: #fff; border: 1px solid #e5e5e5; border-radius: 8px; padding: 16px;",
            div { style: "color: #888;", "{title}" }
            div { style: "font-size: 26px; font-weight: 600; margin-top: 6px;", "{value}" }
        }
    }
}

fn stat_cards(stats: &DashboardStats) -> Vec<(&'static str, String)> {
    vec![
        ("Total users", stats.total_users.to_string()),
        ("Active users", stats.active_users.to_string()),
        ("Total products", stats.total_products.to_string()),
        ("Low stock products", stats.low_stock_products.to_string()),
        ("Inventory value", format!("{:.2}", stats.inventory_value)),
    ]
}

#[component]
pub fn DashboardPage() -> Element {
    let services = use_context::<Services>();
    let stats = use_hook(|| {
        services.store.dashboard_stats().map_err(|err| {
            tracing::error!(error = %err, "failed to load dashboard stats");
            err.to_string()
        })
    });

    match stats {
        Ok(stats) => rsx! {
            div {
                style: "display: flex; flex-wrap: wrap; gap: 12px;",
                for (title, value) in stat_cards(&stats) {
                    StatCard { key: "{title}", title: title.to_string(), value }
                }
            }
        },
        Err(_) => rsx! {
            p { style: "color: #ff4d4f;", "Failed to load statistics." }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_format_inventory_with_two_decimals() {
        let stats = DashboardStats {
            total_users: 3,
            inventory_value: 1234.5,
            ..DashboardStats::default()
        };
        let cards = stat_cards(&stats);
        assert_eq!(cards[0], ("Total users", "3".to_string()));
        assert_eq!(cards[4].1, "1234.50");
    }
}
