use mtrack_core::TrackerApi;

use crate::app::AppContext;
use crate::cli::RepairTypesArgs;
use crate::output::{print_repair_types, repair_types_json};
use crate::ui::theme::{styled, styles};
use crate::ui::{blank_line, header, print};

pub fn handle_types(ctx: &AppContext, args: &RepairTypesArgs) -> anyhow::Result<()> {
    let session = ctx.require_session()?;
    let types = ctx.api()?.list_repair_types(&session)?;

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&repair_types_json(&types))?);
        return Ok(());
    }

    if !ctx.quiet() && ui.mode.is_pretty() {
        print(&ui, &header(&ui, "repair types", None));
        blank_line(&ui);
    }
    if types.is_empty() {
        if ui.mode.is_pretty() {
            print(&ui, &styled("No repair types defined", styles::dim(), ui.color));
        }
        return Ok(());
    }
    print_repair_types(&ui, &types);
    Ok(())
}
