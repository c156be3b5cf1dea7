//! Output formatting for the CLI.

use cart_core::prelude::*;
use cart_store::Notifier;
use console::style;

/// Output handler for CLI messages.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print a cart as a table followed by its totals, or as JSON.
    pub fn cart(&self, cart: &Cart) {
        if self.json {
            self.json(&serde_json::json!({
                "items": cart,
                "itemCount": cart.item_count(),
                "total": cart_total(cart),
            }));
            return;
        }

        if cart.is_empty() {
            self.info("Cart is empty");
            return;
        }

        let widths = [6, 40, 5, 12, 12];
        self.table_row(&["ID", "PRODUCT", "QTY", "PRICE", "SUBTOTAL"], &widths);
        for item in cart {
            self.table_row(
                &[
                    item.id().to_string().as_str(),
                    truncate(&item.product.title, widths[1]).as_str(),
                    item.amount.to_string().as_str(),
                    format_price(item.product.price).as_str(),
                    format_price(item.product.price * item.amount as f64).as_str(),
                ],
                &widths,
            );
        }
        println!();
        self.kv("items", &cart.item_count().to_string());
        self.kv("total", &format_price(cart_total(cart)));
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

impl Notifier for Output {
    fn error(&self, message: &str) {
        Output::error(self, message);
    }
}

/// Sum of price times amount over every line.
pub fn cart_total(cart: &Cart) -> f64 {
    cart.iter()
        .map(|item| item.product.price * item.amount as f64)
        .sum()
}

/// Format a price in reais, e.g. `R$ 179,90`.
pub fn format_price(price: f64) -> String {
    format!("R$ {:.2}", price).replace('.', ",")
}

/// Stock level badge.
pub fn stock_badge(amount: i64) -> String {
    match amount {
        a if a <= 0 => style("sold out").red().to_string(),
        1..=2 => style(amount).yellow().to_string(),
        _ => style(amount).green().to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}
