use std::path::PathBuf;

use mtrack_core::engine::filter_machines_by_name;
use mtrack_core::model::{NewMachine, DEFAULT_MACHINE_DESCRIPTION};
use mtrack_core::TrackerApi;

use crate::app::AppContext;
use crate::cli::{MachineAddArgs, MachineListArgs};
use crate::errors::CliError;
use crate::helpers::prompt_text;
use crate::output::{machines_json, print_machine_list};
use crate::ui::theme::{styled, styles};
use crate::ui::{blank_line, header, hint, print, receipt, Spinner};

pub fn handle_list(ctx: &AppContext, args: &MachineListArgs) -> anyhow::Result<()> {
    let session = ctx.require_session()?;
    let machines = ctx.api()?.list_machines(&session)?;
    let search = args.search.as_deref().map(str::trim).unwrap_or_default();
    let machines = filter_machines_by_name(&machines, search);

    let ui = ctx.ui_context(args.json, args.format);
    if ui.mode.is_json() {
        let output = serde_json::to_string_pretty(&machines_json(&machines))?;
        println!("{}", output);
        return Ok(());
    }

    let context = (!search.is_empty()).then(|| format!("\"{}\"", search));
    if !ctx.quiet() && ui.mode.is_pretty() {
        print(&ui, &header(&ui, "machines", context.as_deref()));
        blank_line(&ui);
    }

    if machines.is_empty() {
        if ui.mode.is_pretty() {
            print(&ui, &styled("No machines found", styles::dim(), ui.color));
        }
        return Ok(());
    }

    print_machine_list(&ui, &machines);
    if !ctx.quiet() && ui.mode.is_pretty() {
        blank_line(&ui);
        print(&ui, &hint(&ui, "mtrack report --machine <id>"));
    }
    Ok(())
}

pub fn handle_add(ctx: &AppContext, args: &MachineAddArgs) -> anyhow::Result<()> {
    let interactive = ctx.interactive();
    let name = prompt_text(interactive, "Machine name", "--name", args.name.as_deref())?;

    let mut machine = NewMachine::new(name);
    if let Some(description) = args.description.as_deref() {
        machine = machine.with_description(description.trim());
    }
    if let Some(image) = args.image.as_deref() {
        let path = PathBuf::from(image);
        if !path.is_file() {
            return Err(CliError::invalid_input(format!("Image not found: {}", path.display())).into());
        }
        machine = machine.with_image(path);
    }

    let session = ctx.require_session()?;
    let ui = ctx.ui_context(false, None);
    let api = ctx.api()?;
    let spinner = Spinner::start(&ui, "Processing...");
    let result = api.create_machine(&session, &machine);
    spinner.finish();
    let created = result?;
    tracing::info!(id = %created.id, name = %created.name, "machine added");

    if !ctx.quiet() {
        let id = created.id.to_string();
        let description = created
            .description
            .clone()
            .unwrap_or_else(|| DEFAULT_MACHINE_DESCRIPTION.to_string());
        print(
            &ui,
            &receipt(
                &ui,
                "Machine added",
                &[
                    ("ID", id.as_str()),
                    ("Name", created.name.as_str()),
                    ("Description", description.as_str()),
                ],
            ),
        );
        if ui.mode.is_pretty() {
            blank_line(&ui);
            print(&ui, &hint(&ui, "mtrack machines list"));
        }
    }
    Ok(())
}
