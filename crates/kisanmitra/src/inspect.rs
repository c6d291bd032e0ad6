// SPDX-FileCopyrightText: 2026 KisanMitra Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `kisanmitra stats|activity|cart|orders|seed` command implementations.

use std::fmt::Write as _;
use std::io::IsTerminal;

use colored::Colorize;
use kisanmitra_cart::CartManager;
use kisanmitra_config::KisanConfig;
use kisanmitra_core::{CartItem, KisanError, Order, UserActivity, UserId};
use kisanmitra_stats::{StatsEngine, UserStats};
use kisanmitra_storage::{DataService, LoginRequest, SeedSummary};
use rust_decimal::Decimal;

fn heading(title: &str) -> String {
    if std::io::stdout().is_terminal() {
        title.bold().to_string()
    } else {
        title.to_string()
    }
}

fn open(config: &KisanConfig) -> Result<(DataService, CartManager), KisanError> {
    let service = DataService::open(config)?;
    let cart = CartManager::with_config(service.database().shared_store(), config);
    Ok((service, cart))
}

pub fn run_stats(config: &KisanConfig, user: &UserId, json: bool) -> Result<(), KisanError> {
    let (service, _) = open(config)?;
    let stats = StatsEngine::from_config(config).calculate_user_stats(&service, user);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", render_stats(user, &stats));
    }
    Ok(())
}

pub fn run_activity(
    config: &KisanConfig,
    user: &UserId,
    limit: Option<usize>,
) -> Result<(), KisanError> {
    let (service, _) = open(config)?;
    let entries = service.user_activities(user);
    let skip = limit.map_or(0, |n| entries.len().saturating_sub(n));
    print!("{}", render_activity(&entries[skip..]));
    Ok(())
}

pub fn run_cart(config: &KisanConfig) -> Result<(), KisanError> {
    let (_, cart) = open(config)?;
    print!(
        "{}",
        render_cart(&cart.get_cart(), cart.get_cart_subtotal(), cart.get_cart_savings())
    );
    Ok(())
}

pub fn run_orders(config: &KisanConfig) -> Result<(), KisanError> {
    let (_, cart) = open(config)?;
    print!("{}", render_orders(&cart.get_orders()));
    Ok(())
}

pub fn run_seed(config: &KisanConfig, login: LoginRequest) -> Result<(), KisanError> {
    let (service, _) = open(config)?;
    let user = service.login_or_create(&login)?;
    let summary = service.seed_sample_data()?;
    print!("{}", render_seed(&user.id, &summary));
    Ok(())
}

fn render_stats(user: &UserId, stats: &UserStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading(&format!("Stats for {user}")));
    let rows: [(&str, String); 10] = [
        ("Level", stats.level.to_string()),
        ("Total earnings", format!("₹{}", stats.total_earnings)),
        ("Active listings", stats.active_listings.to_string()),
        ("Successful sales", stats.successful_sales.to_string()),
        ("Total views", stats.total_views.to_string()),
        ("Rating", format!("{:.1}", stats.avg_rating)),
        ("Diagnoses", stats.diagnosis_count.to_string()),
        ("Active treatments", stats.active_treatments.to_string()),
        ("Saved advisories", stats.advisory_saved.to_string()),
        ("Joined", stats.joined_date.format("%Y-%m-%d").to_string()),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<18} {value}");
    }
    out
}

fn render_activity(entries: &[UserActivity]) -> String {
    if entries.is_empty() {
        return "No activity recorded.\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "  {}  {:<26} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.action,
            entry.data
        );
    }
    out
}

fn render_cart(items: &[CartItem], subtotal: Decimal, savings: Decimal) -> String {
    if items.is_empty() {
        return "Cart is empty.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading("Cart"));
    for item in items {
        let _ = writeln!(
            out,
            "  {:<28} {:>3} x ₹{:<8} = ₹{}",
            item.name,
            item.quantity,
            item.price,
            item.line_total()
        );
    }
    let _ = writeln!(out, "  Subtotal: ₹{subtotal}");
    if savings > Decimal::ZERO {
        let _ = writeln!(out, "  You save: ₹{savings}");
    }
    out
}

fn render_orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet.\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading("Orders"));
    for order in orders {
        let units: u64 = order.items.iter().map(|i| u64::from(i.quantity)).sum();
        let _ = writeln!(
            out,
            "  {:<18} {:<10} {} item(s)  ₹{}  placed {}",
            order.id,
            order.status,
            units,
            order.total,
            order.order_date.format("%Y-%m-%d")
        );
    }
    out
}

fn render_seed(user: &UserId, summary: &SeedSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Seeded sample data for {user}:");
    let _ = writeln!(out, "  listings:  {}", summary.listing_ids.join(", "));
    if let Some(sold) = &summary.sold_listing_id {
        let _ = writeln!(out, "  sold:      {sold}");
    }
    let _ = writeln!(out, "  diagnosis: {}", summary.diagnosis_id);
    let _ = writeln!(out, "  advisory:  {}", summary.advisory_id);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kisanmitra_test_utils::{TestHarness, fixtures};

    #[test]
    fn stats_table_lists_level_and_earnings() {
        let h = TestHarness::new();
        let user = UserId::new("u1");
        h.service.add_listing(&fixtures::sold_listing(&user, 2_500));
        let stats = StatsEngine::default().calculate_user_stats(&h.service, &user);

        let out = render_stats(&user, &stats);
        assert!(out.contains("Active Farmer"));
        assert!(out.contains("₹2500"));
        assert!(out.contains("Successful sales   1"));
    }

    #[test]
    fn cart_rendering_shows_savings() {
        let h = TestHarness::new();
        h.cart.add_to_cart(&fixtures::product("p1", 100, 120)).expect("add");
        h.cart.add_to_cart(&fixtures::product("p1", 100, 120)).expect("add");

        let out = render_cart(
            &h.cart.get_cart(),
            h.cart.get_cart_subtotal(),
            h.cart.get_cart_savings(),
        );
        assert!(out.contains("Subtotal: ₹200"));
        assert!(out.contains("You save: ₹40"));
        assert_eq!(render_cart(&[], Decimal::ZERO, Decimal::ZERO), "Cart is empty.\n");
    }

    #[test]
    fn empty_views_have_placeholders() {
        assert_eq!(render_activity(&[]), "No activity recorded.\n");
        assert_eq!(render_orders(&[]), "No orders yet.\n");
    }

    #[test]
    fn seeded_store_renders_summary() {
        let h = TestHarness::new();
        let user = h
            .service
            .login_or_create(&fixtures::login("9800000009"))
            .expect("login");
        let summary = h.service.seed_sample_data().expect("seed");
        let out = render_seed(&user.id, &summary);
        assert!(out.contains(&summary.diagnosis_id));
        assert!(out.contains("sold:"));
    }
}
