//! Preferences commands.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Select};
use kiosk_commerce::{
    format_eur, parse_budget, validate, PrefsDraft, PrefsErrors, PrefsForm, Preferences, SortDir,
    SortKey,
};

use super::{PrefsArgs, PrefsCommand, PrefsSetArgs};
use crate::context::Context;

/// Run the prefs command.
pub async fn run(args: PrefsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(PrefsCommand::Show) | None => show(ctx).await,
        Some(PrefsCommand::Edit) => edit(ctx).await,
        Some(PrefsCommand::Set(set_args)) => set(set_args, ctx).await,
        Some(PrefsCommand::Reset) => reset(ctx).await,
    }
}

async fn show(ctx: &Context) -> Result<()> {
    let prefs = ctx.prefs().load();

    if ctx.output.is_json() {
        ctx.output.json(&prefs);
        return Ok(());
    }

    ctx.output.header("Preferences");
    ctx.output
        .kv("Name", prefs.display_name().unwrap_or("(anonymous)"));
    ctx.output.kv(
        "Budget",
        &prefs
            .max_budget
            .map(format_eur)
            .unwrap_or_else(|| "none".to_string()),
    );
    ctx.output.kv(
        "Sort",
        &format!("{} {}", prefs.sort_key.as_str(), prefs.sort_dir.as_str()),
    );
    ctx.output.kv(
        "Filter under budget",
        &prefs.filter_under_budget.to_string(),
    );

    Ok(())
}

async fn edit(ctx: &Context) -> Result<()> {
    let store = ctx.prefs();
    let mut form = PrefsForm::from_prefs(&store.load());

    // One field at a time, re-prompting until it validates.
    loop {
        let name: String = Input::new()
            .with_prompt("Display name (blank for anonymous)")
            .with_initial_text(form.name())
            .allow_empty(true)
            .interact_text()?;
        form.set_name(name);
        match &form.errors().name {
            Some(msg) => ctx.output.error(msg),
            None => break,
        }
    }

    loop {
        let budget: String = Input::new()
            .with_prompt("Max budget in euros (blank for none)")
            .with_initial_text(form.budget())
            .allow_empty(true)
            .interact_text()?;
        form.set_budget(budget);
        match &form.errors().max_budget {
            Some(msg) => ctx.output.error(msg),
            None => break,
        }
    }

    let keys = [SortKey::Id, SortKey::Name, SortKey::Price];
    let key_idx = Select::new()
        .with_prompt("Sort sessions by")
        .items(&["id", "name", "price"])
        .default(keys.iter().position(|k| *k == form.sort_key()).unwrap_or(0))
        .interact()?;
    form.set_sort_key(keys[key_idx]);

    let dirs = [SortDir::Asc, SortDir::Desc];
    let dir_idx = Select::new()
        .with_prompt("Direction")
        .items(&["asc", "desc"])
        .default(dirs.iter().position(|d| *d == form.sort_dir()).unwrap_or(0))
        .interact()?;
    form.set_sort_dir(dirs[dir_idx]);

    if form.filter_enabled() {
        let on = Confirm::new()
            .with_prompt("Hide sessions above your budget?")
            .default(form.filter_under_budget())
            .interact()?;
        form.set_filter(on);
    } else {
        // The form keeps the filter off on its own; just say why.
        ctx.output
            .info("No valid budget, so the under-budget filter stays off.");
    }

    match form.submit() {
        Ok(prefs) => {
            store.save(&prefs)?;
            ctx.output.success("Preferences saved");
            Ok(())
        }
        Err(errors) => {
            print_errors(&errors, ctx);
            bail!("Preferences not saved")
        }
    }
}

async fn set(args: PrefsSetArgs, ctx: &Context) -> Result<()> {
    let store = ctx.prefs();
    let current = store.load();

    let sort_key = match args.sort_key.as_deref() {
        Some(raw) => match SortKey::from_str(&raw.to_lowercase()) {
            Some(key) => key,
            None => bail!("Unknown sort key: {} (expected id, name, or price)", raw),
        },
        None => current.sort_key,
    };
    let sort_dir = match args.sort_dir.as_deref() {
        Some(raw) => match SortDir::from_str(&raw.to_lowercase()) {
            Some(dir) => dir,
            None => bail!("Unknown sort direction: {} (expected asc or desc)", raw),
        },
        None => current.sort_dir,
    };

    // Unset flags keep their stored values; the merged record is validated
    // as a whole, same as a form submit.
    let name = args.name.unwrap_or(current.name);
    let budget_raw = match args.max_budget {
        Some(raw) => raw,
        None => current
            .max_budget
            .map(|b| b.to_string())
            .unwrap_or_default(),
    };
    let filter = args
        .filter_under_budget
        .unwrap_or(current.filter_under_budget);

    let draft = PrefsDraft {
        name,
        max_budget: parse_budget(&budget_raw),
        filter_under_budget: filter,
    };

    let errors = validate(&draft);
    if !errors.is_empty() {
        if ctx.output.is_json() {
            ctx.output.json(&errors);
        } else {
            print_errors(&errors, ctx);
        }
        bail!("Preferences not saved");
    }

    let prefs = Preferences {
        name: draft.name.trim().to_string(),
        max_budget: draft.max_budget.as_positive_int(),
        sort_key,
        sort_dir,
        filter_under_budget: draft.filter_under_budget,
    };
    store.save(&prefs)?;

    if ctx.output.is_json() {
        ctx.output.json(&prefs);
        return Ok(());
    }

    ctx.output.success("Preferences saved");
    Ok(())
}

async fn reset(ctx: &Context) -> Result<()> {
    let prefs = Preferences::default();
    ctx.prefs().save(&prefs)?;

    if ctx.output.is_json() {
        ctx.output.json(&prefs);
        return Ok(());
    }

    ctx.output.success("Preferences reset to defaults");
    Ok(())
}

fn print_errors(errors: &PrefsErrors, ctx: &Context) {
    for (field, msg) in [
        ("name", &errors.name),
        ("maxBudget", &errors.max_budget),
        ("filterUnderBudget", &errors.filter_under_budget),
    ] {
        if let Some(msg) = msg {
            ctx.output.list_item(&format!("{}: {}", field, msg));
        }
    }
}
