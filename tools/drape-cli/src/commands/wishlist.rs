//! Wishlist commands.

use std::sync::Arc;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use drape_commerce::catalog::CatalogProvider;
use drape_commerce::notify::Notifier;
use drape_commerce::wishlist::{KvWishlistRepository, WishlistStore};
use drape_commerce::ProductId;

use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let notifier: Arc<dyn Notifier> = ctx.output.clone();
    let mut wishlist = WishlistStore::open(KvWishlistRepository::new(ctx.cache()?), notifier)
        .with_catalog(catalog.clone());

    match args.command {
        WishlistCommand::Add { id } => {
            let id = ProductId::new(id);
            if catalog.get_product_by_id(&id).is_none() {
                bail!("Product not found: {}", id);
            }
            wishlist.add_item(&id)?;
        }
        WishlistCommand::Remove { id } => {
            let id = ProductId::new(id);
            if !wishlist.remove_item(&id)? {
                ctx.output.warn(&format!("{} is not in your wishlist", id));
            }
        }
        WishlistCommand::List => {}
        WishlistCommand::Clear { yes } => {
            if wishlist.item_count() == 0 {
                ctx.output.info("Your wishlist is already empty");
                return Ok(());
            }
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} saved items?", wishlist.item_count()))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    ctx.output.warn("Wishlist left unchanged");
                    return Ok(());
                }
            }
            wishlist.clear_wishlist()?;
        }
    }

    print_wishlist(&wishlist, catalog.as_ref(), ctx);
    Ok(())
}

fn print_wishlist(wishlist: &WishlistStore, catalog: &dyn CatalogProvider, ctx: &Context) {
    let products: Vec<_> = wishlist
        .items()
        .iter()
        .filter_map(|entry| catalog.get_product_by_id(&entry.id))
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return;
    }

    ctx.output
        .header(&format!("Wishlist ({})", wishlist.item_count()));
    if wishlist.item_count() == 0 {
        ctx.output.info("Nothing saved yet");
        return;
    }
    for product in &products {
        ctx.output.list_item(&format!(
            "{} {} by {} ({}/day)",
            product.id,
            product.name,
            product.brand,
            product.price_per_day.display()
        ));
    }
}
