use chrono::Utc;

use mtrack_core::model::{NewRepair, RecordId, RepairKind, Session};
use mtrack_core::{HttpApi, TrackerApi};

use crate::app::AppContext;
use crate::cli::RepairAddArgs;
use crate::errors::CliError;
use crate::helpers::{parse_price, parse_record_id, prompt_select, prompt_text};
use crate::ui::{blank_line, format_price, hint, print, receipt, Spinner};

/// Label of the trailing "free text" choice in the type picker.
const CUSTOM_CHOICE: &str = "Other (enter a custom type)";

pub fn handle_add(ctx: &AppContext, args: &RepairAddArgs) -> anyhow::Result<()> {
    let interactive = ctx.interactive();
    let session = ctx.require_session()?;
    let api = ctx.api()?;

    let machine = match args.machine.as_deref() {
        Some(value) => parse_record_id(value, "Machine")?,
        None => select_machine(api, &session, interactive)?,
    };
    let kind = match (args.repair_type.as_deref(), args.custom.as_deref()) {
        (Some(id), _) => RepairKind::Known(parse_record_id(id, "Repair type")?),
        (None, Some(label)) => custom_kind(label)?,
        (None, None) => select_kind(api, &session, interactive)?,
    };
    let price = parse_price(&prompt_text(
        interactive,
        "Price",
        "--price",
        args.price.as_deref(),
    )?)?;

    let mut repair = NewRepair::new(machine, kind, price, Utc::now());
    if let Some(description) = args.description.as_deref() {
        repair = repair.with_description(description.trim());
    }

    let ui = ctx.ui_context(false, None);
    let spinner = Spinner::start(&ui, "Processing...");
    let result = api.create_repair(&session, &repair);
    spinner.finish();
    let created = result?;
    tracing::info!(id = %created.id, machine = %repair.machine, "repair added");

    if !ctx.quiet() {
        let id = created.id.to_string();
        let machine_id = repair.machine.to_string();
        let label = created
            .type_label()
            .map(str::to_string)
            .or_else(|| {
                (!repair.custom_repair_type.is_empty()).then(|| repair.custom_repair_type.clone())
            })
            .or_else(|| repair.repair_type.as_ref().map(|t| format!("#{}", t)))
            .unwrap_or_else(|| "-".to_string());
        let price = format_price(&repair.price, &ui.currency);
        print(
            &ui,
            &receipt(
                &ui,
                "Repair added",
                &[
                    ("ID", id.as_str()),
                    ("Machine", machine_id.as_str()),
                    ("Type", label.as_str()),
                    ("Price", price.as_str()),
                ],
            ),
        );
        if ui.mode.is_pretty() {
            blank_line(&ui);
            print(&ui, &hint(&ui, &format!("mtrack report --machine {}", machine_id)));
        }
    }
    Ok(())
}

fn custom_kind(label: &str) -> anyhow::Result<RepairKind> {
    let label = label.trim();
    if label.is_empty() {
        return Err(CliError::invalid_input("--custom cannot be empty").into());
    }
    Ok(RepairKind::Custom(label.to_string()))
}

fn select_machine(api: &HttpApi, session: &Session, interactive: bool) -> anyhow::Result<RecordId> {
    if !interactive {
        return Err(CliError::invalid_input("Machine is required. Pass --machine.").into());
    }
    let machines = api.list_machines(session)?;
    let items: Vec<String> = machines
        .iter()
        .map(|m| format!("{} (#{})", m.name, m.id))
        .collect();
    let index = prompt_select(interactive, "Machine", "--machine", &items)?;
    Ok(machines[index].id.clone())
}

fn select_kind(api: &HttpApi, session: &Session, interactive: bool) -> anyhow::Result<RepairKind> {
    if !interactive {
        return Err(CliError::invalid_input("Repair type is required. Pass --type or --custom.").into());
    }
    let types = api.list_repair_types(session)?;
    let mut items: Vec<String> = types.iter().map(|t| t.name.clone()).collect();
    items.push(CUSTOM_CHOICE.to_string());

    let index = prompt_select(interactive, "Repair type", "--type", &items)?;
    match types.get(index) {
        Some(repair_type) => Ok(RepairKind::Known(repair_type.id.clone())),
        None => custom_kind(&prompt_text(interactive, "Custom repair type", "--custom", None)?),
    }
}
