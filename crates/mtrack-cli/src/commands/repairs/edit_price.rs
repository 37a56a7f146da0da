use chrono::Utc;

use mtrack_core::model::PriceUpdate;
use mtrack_core::TrackerApi;

use crate::app::AppContext;
use crate::cli::RepairEditPriceArgs;
use crate::helpers::{confirm, parse_price, parse_record_id, prompt_text};
use crate::output::print_repair;
use crate::ui::{badge, blank_line, format_price, print, receipt, Badge, OutputMode, Spinner};

use super::{fetch_repair, require_write_access};

pub fn handle_edit_price(ctx: &AppContext, args: &RepairEditPriceArgs) -> anyhow::Result<()> {
    let id = parse_record_id(&args.id, "Repair")?;
    let interactive = ctx.interactive();
    let session = ctx.require_session()?;
    let api = ctx.api()?;
    require_write_access(api, &session)?;

    let current = fetch_repair(api, &session, &id)?;
    let price = parse_price(&prompt_text(
        interactive,
        "New price",
        "--price",
        args.price.as_deref(),
    )?)?;

    let ui = ctx.ui_context(false, None);
    let old_display = format_price(&current.price, &ui.currency);
    let new_display = format_price(&price, &ui.currency);
    let prompt = format!(
        "Your price has changed from {} to {}",
        old_display, new_display
    );

    if !confirm(interactive, &prompt, args.yes)? {
        if !ctx.quiet() {
            match ui.mode {
                OutputMode::Pretty => print(&ui, &badge(&ui, Badge::Info, "Cancelled")),
                OutputMode::Plain | OutputMode::Json => println!("status=cancelled"),
            }
        }
        return Ok(());
    }

    let update = PriceUpdate::from_repair(&current, price, session.username.clone(), Utc::now());
    let spinner = Spinner::start(&ui, "Processing...");
    let result = api.update_repair_price(&session, &id, &update);
    spinner.finish();
    result?;
    tracing::info!(id = %id, old = %current.price, new = %update.price, "repair price updated");

    // Re-read so the output reflects what the API stored.
    let updated = fetch_repair(api, &session, &id)?;
    if !ctx.quiet() {
        let stored = format_price(&updated.price, &ui.currency);
        print(
            &ui,
            &receipt(
                &ui,
                "Price updated",
                &[
                    ("ID", id.as_str()),
                    ("Old Price", old_display.as_str()),
                    ("New Price", stored.as_str()),
                ],
            ),
        );
        if ui.mode.is_pretty() {
            blank_line(&ui);
            print_repair(&ui, &updated);
        }
    }
    Ok(())
}
