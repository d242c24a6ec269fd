//! Catalog browsing commands.

use anyhow::{anyhow, Result};
use drape_commerce::catalog::{
    CatalogProvider, Filter, Product, ProductFilter, SortOption, DEFAULT_RELATED_LIMIT,
};
use drape_commerce::{Money, ProductId};
use serde_json::json;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CatalogCommand::List {
            query,
            category,
            brand,
            min_price,
            max_price,
            new,
            sort,
            limit,
        } => {
            let currency = ctx.config.storefront.currency;
            let mut filter = build_filter(query, category, brand, new, sort, limit);
            if min_price.is_some() || max_price.is_some() {
                filter = filter.with_filter(Filter::price_range(
                    min_price.map(|p| Money::from_major(p, currency)),
                    max_price.map(|p| Money::from_major(p, currency)),
                ));
            }
            list_products(&filter, ctx)
        }
        CatalogCommand::Show { id } => show_product(&ProductId::new(id), ctx),
    }
}

fn build_filter(
    query: Option<String>,
    category: Option<String>,
    brand: Option<String>,
    new: bool,
    sort: SortOption,
    limit: Option<usize>,
) -> ProductFilter {
    let mut filter = ProductFilter::new().with_sort(sort);
    if let Some(q) = query {
        filter = filter.with_query(q);
    }
    if let Some(c) = category {
        filter = filter.with_filter(Filter::category(c));
    }
    if let Some(b) = brand {
        filter = filter.with_filter(Filter::brand(b));
    }
    if new {
        filter = filter.with_filter(Filter::NewOnly);
    }
    if let Some(n) = limit {
        filter = filter.with_limit(n);
    }
    filter
}

fn list_products(filter: &ProductFilter, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let products = catalog.list_products(filter);
    tracing::debug!(count = products.len(), sort = filter.sort.as_str(), "listed products");

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", filter.sort.display_name()));
    if products.is_empty() {
        ctx.output.info("No products match these filters");
        return Ok(());
    }

    let name_width = ctx.output.term_width().saturating_sub(50).clamp(16, 40);
    let widths = [4, name_width, 18, 12, 4];
    ctx.output
        .table_row(&["ID", "NAME", "BRAND", "PER DAY", ""], &widths);
    for product in &products {
        let name = truncate(&product.name, name_width);
        let brand = truncate(&product.brand, 18);
        let price = price_label(product);
        let badge = if product.is_new { "new" } else { "" };
        ctx.output.table_row(
            &[product.id.as_str(), &name, &brand, &price, badge],
            &widths,
        );
    }

    Ok(())
}

fn show_product(id: &ProductId, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog();
    let product = catalog
        .get_product_by_id(id)
        .ok_or_else(|| anyhow!("Product not found: {}", id))?;
    let related = catalog.get_related_products(id, &product.category, DEFAULT_RELATED_LIMIT);
    let blocked = catalog.unavailable_ranges(id);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "related": related,
            "unavailable": blocked,
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Brand", &product.brand);
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Price", &price_label(&product));
    if let Some(ref retail) = product.retail_price {
        ctx.output.kv("Retail", &retail.display());
    }
    ctx.output.kv("Sizes", &product.available_sizes.join(", "));
    if product.is_rental() {
        ctx.output.kv(
            "Rental",
            &format!(
                "{} to {} days",
                product.rental_policy.min_days, product.rental_policy.max_days
            ),
        );
    }
    if let Some(ref description) = product.description {
        ctx.output.kv("About", description);
    }

    if !blocked.is_empty() {
        ctx.output.header("Unavailable");
        for range in &blocked {
            ctx.output
                .list_item(&format!("{} to {}", range.start, range.end));
        }
    }

    if !related.is_empty() {
        ctx.output.header("You may also like");
        for other in &related {
            ctx.output.list_item(&format!(
                "{} {} ({})",
                other.id,
                other.name,
                price_label(other)
            ));
        }
    }

    Ok(())
}

fn price_label(product: &Product) -> String {
    if product.is_rental() {
        format!("{}/day", product.price_per_day.display())
    } else {
        product.price_per_day.display()
    }
}
