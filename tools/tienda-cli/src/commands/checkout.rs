//! Checkout summary and order link.

use anyhow::Result;
use tienda_commerce::checkout::{storage_notice, CheckoutView, EMPTY_CART_MESSAGE};
use tracing::warn;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let (cart, ephemeral) = ctx.open_cart();
    if let Some(notice) = storage_notice(cart.storage_available() && !ephemeral) {
        ctx.output.warn(notice);
    }

    // Lines carry their own names and prices; the catalog only fills gaps.
    let catalog = match ctx.load_catalog() {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            warn!(error = %e, "checkout without catalog");
            None
        }
    };

    let view = CheckoutView::from_snapshot(&cart.snapshot(), catalog.as_ref(), &ctx.order_links());

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    if args.link_only {
        println!("{}", view.order_link);
        return Ok(());
    }

    ctx.output.header("Tu pedido");
    if view.is_empty() {
        ctx.output.info(EMPTY_CART_MESSAGE);
    }
    for line in &view.lines {
        ctx.output.list_item(&format!("{}: {}", line.label, line.line_total.display()));
    }
    ctx.output.kv("Total", &view.total.display());
    ctx.output.kv("Productos", &view.item_count.to_string());

    println!();
    ctx.output.info("Envía tu pedido por WhatsApp:");
    println!("  {}", view.order_link);

    Ok(())
}
