//! Catalog listing.

use anyhow::Result;
use serde::Serialize;

use crate::context::Context;
use crate::output::{format_price, stock_badge};

#[derive(Serialize)]
struct CatalogEntry<'a> {
    id: i64,
    title: &'a str,
    price: f64,
    stock: i64,
}

/// List fixture products with their stock levels.
pub async fn run(ctx: &Context) -> Result<()> {
    let mut products: Vec<_> = ctx.config.products.iter().collect();
    products.sort_by_key(|p| p.id);

    if ctx.output.is_json() {
        let entries: Vec<_> = products
            .iter()
            .map(|p| CatalogEntry {
                id: p.id,
                title: &p.title,
                price: p.price,
                stock: p.stock,
            })
            .collect();
        ctx.output.json(&entries);
        return Ok(());
    }

    ctx.output.header("Catalog");
    if products.is_empty() {
        ctx.output.info("No products configured");
        return Ok(());
    }

    let widths = [6, 56, 12, 8];
    ctx.output
        .table_row(&["ID", "PRODUCT", "PRICE", "STOCK"], &widths);
    for product in products {
        ctx.output.table_row(
            &[
                product.id.to_string().as_str(),
                product.title.as_str(),
                format_price(product.price).as_str(),
                stock_badge(product.stock).as_str(),
            ],
            &widths,
        );
    }

    Ok(())
}
