//! Text and table output for reports, machines and repairs.

use mtrack_core::engine::MachineReport;
use mtrack_core::model::{Machine, Repair, RepairType, Session, UserDetails, UserProfile};
use mtrack_core::{Report, ReportView};

use crate::app::is_read_only_role;
use crate::ui::theme::{styled, styles};
use crate::ui::{
    blank_line, divider, format_money, format_price, format_timestamp, kv, print, simple_table,
    single_line, table, truncate, Column, UiContext,
};

const DESCRIPTION_MAX: usize = 40;

const REPAIR_COLUMNS: [Column; 5] = [
    Column::new("ID"),
    Column::new("Added"),
    Column::new("Type"),
    Column::new("Description"),
    Column::numeric("Price"),
];

/// One table row for a repair.
///
/// Pretty rows carry display formatting. Plain rows stay machine friendly:
/// raw timestamp, numeric amount, `-` for blanks.
fn repair_row(ui: &UiContext, repair: &Repair) -> Vec<String> {
    let label = repair.type_label().unwrap_or("-");
    let description = repair
        .description
        .as_deref()
        .map(single_line)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "-".to_string());

    if ui.mode.is_pretty() {
        vec![
            repair.id.to_string(),
            format_timestamp(repair.time_added.as_deref(), ui.timezone),
            label.to_string(),
            truncate(&description, DESCRIPTION_MAX),
            format_price(&repair.price, &ui.currency),
        ]
    } else {
        vec![
            repair.id.to_string(),
            repair.time_added.clone().unwrap_or_else(|| "-".to_string()),
            label.replace(' ', "_"),
            format!("{}", repair.price.amount()),
        ]
    }
}

fn money(ui: &UiContext, amount: f64) -> String {
    if ui.mode.is_pretty() {
        styled(&format_money(amount, &ui.currency), styles::amount(), ui.color)
    } else {
        format!("{}", amount)
    }
}

fn print_machine_block(ui: &UiContext, row: &MachineReport, show_machine_title: bool) {
    if ui.mode.is_pretty() {
        if show_machine_title {
            let title = styled(&row.machine.name, styles::bold(), ui.color);
            let id = styled(&format!("#{}", row.machine.id), styles::dim(), ui.color);
            print(ui, &format!("{} {}", title, id));
        }
        if row.repairs.is_empty() {
            print(ui, &styled("  No matching repairs", styles::dim(), ui.color));
        } else {
            let rows: Vec<Vec<String>> = row.repairs.iter().map(|r| repair_row(ui, r)).collect();
            print(ui, &simple_table(ui, &REPAIR_COLUMNS, &rows));
        }
        print(ui, &kv(ui, "Subtotal", &money(ui, row.subtotal)));
    } else {
        print(
            ui,
            &format!(
                "machine={} name={} repairs={} subtotal={}",
                row.machine.id,
                row.machine.name.replace(' ', "_"),
                row.repairs.len(),
                row.subtotal
            ),
        );
        for repair in &row.repairs {
            print(ui, &format!("  {}", repair_row(ui, repair).join(" ")));
        }
    }
}

/// Print a report in plain or pretty mode.
pub fn print_report(ui: &UiContext, report: &Report) {
    if report.machines.is_empty() {
        let message = match &report.view {
            ReportView::AllMachines => "No machines match".to_string(),
            ReportView::MachineDetail(id) => format!("Machine {} has no record", id),
        };
        if ui.mode.is_pretty() {
            print(ui, &styled(&message, styles::dim(), ui.color));
        } else {
            print(ui, &format!("machines=0 grand_total={}", report.grand_total));
        }
        return;
    }

    let detail = matches!(report.view, ReportView::MachineDetail(_));
    for (i, row) in report.machines.iter().enumerate() {
        if i > 0 {
            blank_line(ui);
        }
        if detail && ui.mode.is_pretty() {
            print_machine_summary(ui, &row.machine);
            blank_line(ui);
        }
        print_machine_block(ui, row, !detail);
    }

    if ui.mode.is_pretty() {
        print(ui, &divider(ui));
        print(
            ui,
            &kv(
                ui,
                "Grand Total",
                &styled(&money(ui, report.grand_total), styles::bold(), ui.color),
            ),
        );
    } else {
        print(ui, &format!("grand_total={}", report.grand_total));
    }
}

fn print_machine_summary(ui: &UiContext, machine: &Machine) {
    print(ui, &kv(ui, "Machine", &format!("{} (#{})", machine.name, machine.id)));
    if let Some(description) = machine.description.as_deref().filter(|d| !d.trim().is_empty()) {
        print(ui, &kv(ui, "Description", &single_line(description)));
    }
    if let Some(image) = machine.image.as_deref().filter(|i| !i.trim().is_empty()) {
        print(ui, &kv(ui, "Image", image));
    }
}

/// Print the machine list (dashboard grid).
pub fn print_machine_list(ui: &UiContext, machines: &[Machine]) {
    let columns = [Column::new("ID"), Column::new("Name"), Column::new("Description")];
    let rows: Vec<Vec<String>> = machines
        .iter()
        .map(|m| {
            let description = m
                .description
                .as_deref()
                .map(single_line)
                .unwrap_or_default();
            if ui.mode.is_pretty() {
                vec![m.id.to_string(), m.name.clone(), truncate(&description, DESCRIPTION_MAX)]
            } else {
                vec![m.id.to_string(), m.name.replace(' ', "_")]
            }
        })
        .collect();
    print(ui, &simple_table(ui, &columns, &rows));
}

/// Print one repair with all of its fields.
pub fn print_repair(ui: &UiContext, repair: &Repair) {
    let machine = match (&repair.machine_name, &repair.machine) {
        (Some(name), Some(id)) => format!("{} (#{})", name, id),
        (None, Some(id)) => id.to_string(),
        (Some(name), None) => name.clone(),
        (None, None) => "-".to_string(),
    };
    let price = if ui.mode.is_pretty() {
        format_price(&repair.price, &ui.currency)
    } else {
        format!("{}", repair.price.amount())
    };
    let timestamp = |raw: Option<&str>| {
        if ui.mode.is_pretty() {
            format_timestamp(raw, ui.timezone)
        } else {
            raw.unwrap_or("-").to_string()
        }
    };

    print(ui, &kv(ui, "ID", repair.id.as_str()));
    print(ui, &kv(ui, "Machine", &machine));
    print(ui, &kv(ui, "Type", repair.type_label().unwrap_or("-")));
    print(ui, &kv(ui, "Price", &price));
    print(
        ui,
        &kv(
            ui,
            "Description",
            &repair
                .description
                .as_deref()
                .map(single_line)
                .unwrap_or_else(|| "-".to_string()),
        ),
    );
    print(ui, &kv(ui, "Added", &timestamp(repair.time_added.as_deref())));
    print(ui, &kv(ui, "Updated", &timestamp(repair.time_updated.as_deref())));
    print(ui, &kv(ui, "Created By", repair.created_by.as_deref().unwrap_or("-")));
    print(ui, &kv(ui, "Updated By", repair.updated_by.as_deref().unwrap_or("-")));
}

pub fn print_repair_types(ui: &UiContext, types: &[RepairType]) {
    let columns = [Column::new("ID"), Column::new("Name")];
    let rows: Vec<Vec<String>> = types
        .iter()
        .map(|t| {
            if ui.mode.is_pretty() {
                vec![t.id.to_string(), t.name.clone()]
            } else {
                vec![t.id.to_string(), t.name.replace(' ', "_")]
            }
        })
        .collect();
    print(ui, &table(ui, &columns, &rows));
}

/// Print the signed-in user, as greeted in the navigation bar.
pub fn print_whoami(ui: &UiContext, session: &Session, profile: &UserProfile, details: &UserDetails) {
    let name = details
        .display_name()
        .unwrap_or_else(|| session.username.clone());
    if ui.mode.is_pretty() {
        print(ui, &format!("Hi, {}", styled(&name, styles::bold(), ui.color)));
    }
    print(ui, &kv(ui, "Username", &session.username));
    if let Some(email) = details.email.as_deref().filter(|e| !e.trim().is_empty()) {
        print(ui, &kv(ui, "Email", email));
    }
    print(ui, &kv(ui, "Role", profile.role.as_deref().unwrap_or("-")));
    if is_read_only_role(profile.role.as_deref()) {
        print(ui, &kv(ui, "Access", "read-only"));
    }
}
