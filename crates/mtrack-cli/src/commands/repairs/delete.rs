use mtrack_core::TrackerApi;

use crate::app::AppContext;
use crate::cli::RepairDeleteArgs;
use crate::helpers::{confirm, parse_record_id};
use crate::ui::{badge, print, Badge, OutputMode, Spinner};

use super::{fetch_repair, require_write_access};

const DELETE_WARNING: &str = "This repair will be permanently deleted!";

pub fn handle_delete(ctx: &AppContext, args: &RepairDeleteArgs) -> anyhow::Result<()> {
    let id = parse_record_id(&args.id, "Repair")?;
    let session = ctx.require_session()?;
    let api = ctx.api()?;
    require_write_access(api, &session)?;

    // Fails with not-found before asking for confirmation.
    let repair = fetch_repair(api, &session, &id)?;
    let ui = ctx.ui_context(false, None);

    if !confirm(ctx.interactive(), DELETE_WARNING, args.yes)? {
        if !ctx.quiet() {
            match ui.mode {
                OutputMode::Pretty => print(&ui, &badge(&ui, Badge::Info, "Cancelled")),
                OutputMode::Plain | OutputMode::Json => println!("status=cancelled"),
            }
        }
        return Ok(());
    }

    let spinner = Spinner::start(&ui, "Processing...");
    let result = api.delete_repair(&session, &id);
    spinner.finish();
    result?;
    tracing::info!(id = %id, "repair deleted");

    if !ctx.quiet() {
        match ui.mode {
            OutputMode::Pretty => {
                let label = repair.type_label().unwrap_or("repair");
                print(
                    &ui,
                    &badge(&ui, Badge::Ok, &format!("Deleted {} #{}", label, id)),
                );
            }
            OutputMode::Plain | OutputMode::Json => {
                println!("status=ok");
                println!("deleted={}", id);
            }
        }
    }
    Ok(())
}
