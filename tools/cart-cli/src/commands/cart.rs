//! Cart commands.

use anyhow::Result;
use cart_store::UpdateProductAmount;

use super::{AddArgs, RemoveArgs, UpdateArgs};
use crate::context::Context;

/// Print the current cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    ctx.output.header("Cart");
    ctx.output.cart(&store.cart());
    Ok(())
}

/// Add one unit of a product.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let cart = store.add_product(args.id).await?;

    ctx.output.success(&format!("Added product {}", args.id));
    ctx.output.cart(&cart);
    Ok(())
}

/// Remove a product's line.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let cart = store.remove_product(args.id).await?;

    ctx.output.success(&format!("Removed product {}", args.id));
    ctx.output.cart(&cart);
    Ok(())
}

/// Set a product's quantity.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let cart = store
        .update_product_amount(UpdateProductAmount::new(args.id, args.amount))
        .await?;

    ctx.output
        .success(&format!("Product {} now at {}", args.id, args.amount));
    ctx.output.cart(&cart);
    Ok(())
}
