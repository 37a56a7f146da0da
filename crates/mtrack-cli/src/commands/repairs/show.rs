use crate::app::AppContext;
use crate::cli::RepairShowArgs;
use crate::helpers::parse_record_id;
use crate::output::{print_repair, repair_json};
use crate::ui::{blank_line, header, print};

use super::fetch_repair;

pub fn handle_show(ctx: &AppContext, args: &RepairShowArgs) -> anyhow::Result<()> {
    let id = parse_record_id(&args.id, "Repair")?;
    let session = ctx.require_session()?;
    let repair = fetch_repair(ctx.api()?, &session, &id)?;

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&repair_json(&repair))?);
        return Ok(());
    }

    if !ctx.quiet() && ui.mode.is_pretty() {
        print(&ui, &header(&ui, "repair", Some(id.as_str())));
        blank_line(&ui);
    }
    print_repair(&ui, &repair);
    Ok(())
}
