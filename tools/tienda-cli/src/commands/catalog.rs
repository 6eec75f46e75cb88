//! Catalog browsing.

use anyhow::{bail, Result};
use serde_json::json;
use tienda_commerce::catalog::{CatalogView, Product, ProductStatus};
use tienda_commerce::search::{CategoryFilter, ProductFilter};
use tienda_commerce::ProductId;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::{status_badge, truncate};

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;

    match args.command {
        Some(CatalogCommand::Categories) => {
            let (cart, _) = ctx.open_cart();
            let view = CatalogView::build(&catalog, &ProductFilter::new(), &cart.snapshot());

            if ctx.output.is_json() {
                ctx.output.json(&view.categories);
                return Ok(());
            }

            ctx.output.header("Categorías");
            for button in &view.categories {
                ctx.output.list_item(&format!("{} ({})", button.label, button.filter));
            }
            Ok(())
        }
        Some(CatalogCommand::Show { id }) => {
            let id = ProductId::new(id);
            let Some(product) = catalog.get(&id) else {
                bail!("Producto no encontrado: {}", id);
            };
            show_product(product, ctx);
            Ok(())
        }
        None => {
            let filter = ProductFilter::new()
                .with_category(CategoryFilter::parse(&args.category))
                .with_text(&args.search);
            let (cart, _) = ctx.open_cart();
            let view = CatalogView::build(&catalog, &filter, &cart.snapshot());

            if ctx.output.is_json() {
                ctx.output.json(&view);
                return Ok(());
            }

            ctx.output.header(&format!("Catálogo ({})", filter.category()));
            if let Some(message) = view.empty_message() {
                ctx.output.info(message);
            }

            let widths = [6, 32, 24, 10, 12];
            for card in &view.cards {
                let in_cart = if card.in_cart > 0 {
                    format!("x{} en carrito", card.in_cart)
                } else {
                    String::new()
                };
                let status = if card.sold {
                    status_badge(ProductStatus::Sold)
                } else {
                    in_cart
                };
                ctx.output.table_row(
                    &[
                        card.id.as_str(),
                        &truncate(&card.name, 32),
                        &truncate(card.artist.as_deref().unwrap_or(""), 24),
                        &card.price,
                        &status,
                    ],
                    &widths,
                );
            }

            ctx.output.cart_badge(view.cart_count);
            Ok(())
        }
    }
}

fn show_product(product: &Product, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "price": product.unit_price.display(),
        }));
        return;
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    if let Some(artist) = &product.artist {
        ctx.output.kv("artista", artist);
    }
    ctx.output.kv("categoría", &product.category.label());
    ctx.output.kv("precio", &product.unit_price.display());
    ctx.output.kv("estado", &status_badge(product.status));
    if let Some(description) = &product.description {
        ctx.output.kv("descripción", description);
    }
}
