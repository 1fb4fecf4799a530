//! Session listing command.

use anyhow::Result;
use kiosk_catalog::CatalogCache;
use kiosk_commerce::{apply_preferences, format_eur, search_catalog, CatalogItem};

use super::SessionsArgs;
use crate::context::Context;

/// Run the sessions command.
pub async fn run(args: SessionsArgs, ctx: &Context) -> Result<()> {
    let mut cache = CatalogCache::new(ctx.catalog_source());

    let spinner = ctx.output.spinner("Fetching sessions...");
    let fetched = cache.ensure_loaded().await.map(<[CatalogItem]>::to_vec);
    spinner.finish_and_clear();

    // A fetch failure degrades to an empty listing instead of aborting.
    let catalog = match fetched {
        Ok(items) => items,
        Err(e) => {
            ctx.output.error(&e.to_string());
            Vec::new()
        }
    };

    let prefs = ctx.prefs().load();
    let mut view = apply_preferences(&catalog, &prefs);
    if let Some(query) = &args.search {
        view = search_catalog(&view, query);
    }

    if ctx.output.is_json() {
        ctx.output.json(&view);
        return Ok(());
    }

    match prefs.display_name() {
        Some(name) => ctx.output.header(&format!("Sessions for {}", name)),
        None => ctx.output.header("Sessions"),
    }

    if view.is_empty() {
        ctx.output.info("No sessions to show.");
    } else {
        ctx.output
            .table_row(&["ID", "SESSION", "PRICE", "DESCRIPTION"], &[4, 24, 8, 36]);
        for item in &view {
            ctx.output.table_row(
                &[
                    &item.id.to_string(),
                    &item.name,
                    &format_eur(item.price),
                    item.description.as_deref().unwrap_or("-"),
                ],
                &[4, 24, 8, 36],
            );
        }
    }

    ctx.output.info("");
    ctx.output
        .info(&format!("Cart: {} unit(s)", ctx.cart().count()));
    if let Some(budget) = prefs.active_budget() {
        ctx.output.info(&format!("Budget: {}", format_eur(budget)));
    }

    Ok(())
}
