//! Plain-text rendering of the console state.

use std::fmt::Write as _;

use client_core::{ConsoleCoordinator, FormDraft, FormField, ModalMode, Screen};
use shared::domain::{Product, MAX_PRODUCT_IMAGES};

pub fn render(console: &ConsoleCoordinator, status: &str) -> String {
    let mut out = match console.screen() {
        Screen::LoggedOut => render_login(console.login_message()),
        Screen::LoggedIn => {
            let mut screen = String::from("== Products ==\n");
            screen.push_str(&render_product_table(console.products()));
            if let (Some(mode), Some(draft)) = (console.overlay().mode(), console.draft()) {
                screen.push('\n');
                screen.push_str(&render_modal(mode, console.overlay().error(), draft));
            }
            screen
        }
    };
    if !status.is_empty() {
        out.push('\n');
        out.push_str(status);
        out.push('\n');
    }
    out
}

pub fn render_login(message: &str) -> String {
    let mut out = String::from("== Sign in ==\n");
    if !message.is_empty() {
        let _ = writeln!(out, "{message}");
    }
    out.push_str("login <username> <password>\n");
    out
}

pub fn render_product_table(products: &[Product]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<12} {:<24} {:>12} {:>12}  {}",
        "#", "Category", "Title", "Original", "Price", "Status"
    );
    if products.is_empty() {
        out.push_str("     No products yet\n");
        return out;
    }
    for (row, product) in products.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<12} {:<24} {:>12} {:>12}  {}",
            row + 1,
            product.category,
            product.title,
            format_amount(product.origin_price),
            format_amount(product.price),
            if product.is_enabled { "Enabled" } else { "Disabled" },
        );
    }
    out
}

pub fn render_modal(mode: ModalMode, error: Option<&str>, draft: &FormDraft) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-- {} --", mode.title());

    if mode == ModalMode::Delete {
        let _ = writeln!(
            out,
            "Delete '{}'? This cannot be undone.",
            draft.field(FormField::Title)
        );
    } else {
        for field in FormField::ALL {
            let _ = writeln!(out, "{:<16} {}", format!("{}:", field.label()), draft.field(field));
        }
        let _ = writeln!(
            out,
            "{:<16} {}",
            "Enabled:",
            if draft.is_enabled() { "yes" } else { "no" }
        );
        let _ = writeln!(out, "Images ({}/{}):", draft.images().len(), MAX_PRODUCT_IMAGES);
        for (index, url) in draft.images().iter().enumerate() {
            let shown = if url.is_empty() { "(empty)" } else { url.as_str() };
            let _ = writeln!(out, "  [{index}] {shown}");
        }
        if draft.can_add_image() {
            out.push_str("  [image add]\n");
        } else {
            out.push_str("  [image add] disabled, limit reached\n");
        }
    }

    if let Some(message) = error {
        let _ = writeln!(out, "Notice: {message}");
    }
    let _ = writeln!(out, "[{}] [Cancel]", mode.confirm_label());
    out
}

/// Groups the integer part in thousands and keeps up to three decimals.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && (whole != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
