//! Cart commands.

use anyhow::{bail, Result};
use kiosk_catalog::CatalogCache;
use kiosk_commerce::{
    build_lines, can_admit_to_cart, cart_total, find_item, format_eur, CatalogItem, ItemId,
};

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CartCommand::Show) | None => show(ctx).await,
        Some(CartCommand::Add { id }) => add(ItemId::new(id), ctx).await,
        Some(CartCommand::Remove { id }) => remove(ItemId::new(id), ctx).await,
        Some(CartCommand::Clear) => clear(ctx).await,
    }
}

async fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.cart();
    let ids = cart.ids();

    let mut cache = CatalogCache::new(ctx.catalog_source());
    let spinner = ctx.output.spinner("Fetching sessions...");
    let fetched = cache.ensure_loaded().await.map(<[CatalogItem]>::to_vec);
    spinner.finish_and_clear();

    let catalog = match fetched {
        Ok(items) => items,
        Err(e) => {
            ctx.output.error(&e.to_string());
            Vec::new()
        }
    };

    let lines = build_lines(&ids, &catalog);
    let total = cart_total(&lines);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "lines": lines,
            "total": total,
            "units": ids.len(),
        }));
        return Ok(());
    }

    ctx.output.header("Cart");

    if ids.is_empty() {
        ctx.output.info("Cart is empty.");
        return Ok(());
    }

    if lines.is_empty() {
        // Units persisted, but no catalog to price them against.
        ctx.output.info(&format!(
            "{} unit(s) in the cart; session details unavailable.",
            ids.len()
        ));
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "SESSION", "QTY", "SUBTOTAL"], &[4, 24, 4, 10]);
    for line in &lines {
        ctx.output.table_row(
            &[
                &line.id.to_string(),
                &line.name,
                &line.qty.to_string(),
                &format_eur(line.subtotal),
            ],
            &[4, 24, 4, 10],
        );
    }

    ctx.output.info("");
    ctx.output.kv("Units", &ids.len().to_string());
    ctx.output.kv("Total", &format_eur(total));

    Ok(())
}

async fn add(id: ItemId, ctx: &Context) -> Result<()> {
    let mut cache = CatalogCache::new(ctx.catalog_source());
    let spinner = ctx.output.spinner("Fetching sessions...");
    let fetched = cache.ensure_loaded().await.map(<[CatalogItem]>::to_vec);
    spinner.finish_and_clear();

    // Admission needs prices, so a fetch failure aborts before any write.
    let catalog = fetched?;

    let cart = ctx.cart();
    let prefs = ctx.prefs().load();

    let verdict = can_admit_to_cart(&catalog, &cart.ids(), id, &prefs);
    if !verdict.admitted {
        let reason = verdict
            .reason
            .unwrap_or_else(|| "Not allowed.".to_string());
        bail!("{}", reason);
    }

    cart.add_one(id)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "admitted": true,
            "units": cart.count(),
        }));
        return Ok(());
    }

    let name = find_item(&catalog, id)
        .map(|item| item.name.as_str())
        .unwrap_or("session");
    ctx.output.success(&format!(
        "Added {} to the cart ({} unit(s) total)",
        name,
        cart.count()
    ));

    Ok(())
}

async fn remove(id: ItemId, ctx: &Context) -> Result<()> {
    let cart = ctx.cart();
    let removed = cart.remove_one(id)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "removed": removed,
            "units": cart.count(),
        }));
        return Ok(());
    }

    if removed {
        ctx.output
            .success(&format!("Removed one unit of session {}", id));
    } else {
        ctx.output
            .warn(&format!("Session {} is not in the cart", id));
    }

    Ok(())
}

async fn clear(ctx: &Context) -> Result<()> {
    ctx.cart().clear()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "units": 0 }));
        return Ok(());
    }

    ctx.output.success("Cart cleared");
    Ok(())
}
