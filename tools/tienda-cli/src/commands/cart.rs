//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use tienda_commerce::cart::CartSnapshot;
use tienda_commerce::catalog::add_product;
use tienda_commerce::checkout::{storage_notice, EMPTY_CART_MESSAGE, FALLBACK_PRODUCT_NAME};
use tienda_commerce::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::{Cart, Context};

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let (mut cart, ephemeral) = ctx.open_cart();
    warn_if_unsaved(&cart, ephemeral, ctx);

    // Badge follows every change, like the header counter on each page.
    let output = ctx.output.clone();
    let _badge = cart.subscribe(move |snapshot| output.cart_badge(snapshot.item_count()));

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {
            print_cart(&cart.snapshot(), ctx);
            Ok(())
        }
        CartCommand::Add { id } => {
            let catalog = ctx.load_catalog()?;
            let id = ProductId::new(id);
            let snapshot = add_product(&mut cart, &catalog, &id)?;
            ctx.output.success(&format!(
                "Agregado: {}",
                catalog.get(&id).map_or(id.as_str(), |p| p.name.as_str())
            ));
            print_json(&snapshot, ctx);
            Ok(())
        }
        CartCommand::Remove { id } => {
            let id = ProductId::new(id);
            if cart.snapshot().get(&id).is_none() {
                ctx.output.warn(&format!("El producto {} no está en el carrito", id));
            }
            let snapshot = cart.remove_one(&id);
            print_json(&snapshot, ctx);
            Ok(())
        }
        CartCommand::Clear { yes } => {
            if cart.snapshot().is_empty() {
                ctx.output.info(EMPTY_CART_MESSAGE);
                return Ok(());
            }

            if !yes {
                if !ctx.output.is_interactive() {
                    bail!("Refusing to clear the cart without a terminal; pass --yes");
                }
                let confirmed = Confirm::new()
                    .with_prompt("¿Seguro que quieres vaciar el carrito?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    ctx.output.info("Cancelado");
                    return Ok(());
                }
            }

            let snapshot = cart.clear();
            ctx.output.success("Carrito vaciado");
            print_json(&snapshot, ctx);
            Ok(())
        }
    }
}

fn warn_if_unsaved(cart: &Cart, ephemeral: bool, ctx: &Context) {
    if let Some(notice) = storage_notice(cart.storage_available() && !ephemeral) {
        ctx.output.warn(notice);
    }
}

fn print_json(snapshot: &CartSnapshot, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(snapshot);
    }
}

fn print_cart(snapshot: &CartSnapshot, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(snapshot);
        return;
    }

    ctx.output.header("Carrito");
    if snapshot.is_empty() {
        ctx.output.info(EMPTY_CART_MESSAGE);
        return;
    }

    let widths = [6, 32, 6, 12];
    ctx.output.table_row(&["ID", "PRODUCTO", "CANT.", "SUBTOTAL"], &widths);
    for item in &snapshot.items {
        ctx.output.table_row(
            &[
                item.id.as_str(),
                item.name.as_deref().unwrap_or(FALLBACK_PRODUCT_NAME),
                &item.quantity.to_string(),
                &item.line_total().display(),
            ],
            &widths,
        );
    }

    ctx.output.kv("Total", &snapshot.total.display());
    if let Some(updated) = snapshot.last_updated {
        ctx.output.kv("Actualizado", &updated.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    }
    if has_unpriced_lines(snapshot) {
        ctx.output.debug("some lines have no recorded price and count as $0");
    }
}

/// Whether any line lacks a recorded price, as legacy saved carts can.
fn has_unpriced_lines(snapshot: &CartSnapshot) -> bool {
    snapshot.items.iter().any(|item| item.unit_price.is_none())
}
