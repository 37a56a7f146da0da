//! JSON output formatting for reports, machines and repairs.

use mtrack_core::engine::MachineReport;
use mtrack_core::model::{Machine, Repair, RepairType, Session, UserDetails, UserProfile};
use mtrack_core::Report;

use crate::app::is_read_only_role;

/// Convert a repair to JSON for output.
///
/// Adds the numeric `amount` used in totals and the resolved type label
/// next to the raw fields.
pub fn repair_json(repair: &Repair) -> serde_json::Value {
    serde_json::json!({
        "id": repair.id,
        "machine": repair.machine,
        "machine_name": repair.machine_name,
        "repair_type": repair.repair_type,
        "repair_type_name": repair.repair_type_name,
        "custom_repair_type": repair.custom_repair_type,
        "type_label": repair.type_label(),
        "description": repair.description,
        "price": repair.price,
        "amount": repair.price.amount(),
        "created_by": repair.created_by,
        "updated_by": repair.updated_by,
        "time_added": repair.time_added,
        "time_updated": repair.time_updated,
    })
}

pub fn machine_json(machine: &Machine) -> serde_json::Value {
    serde_json::json!({
        "id": machine.id,
        "name": machine.name,
        "description": machine.description,
        "image": machine.image,
    })
}

pub fn machines_json(machines: &[Machine]) -> Vec<serde_json::Value> {
    machines.iter().map(machine_json).collect()
}

fn machine_report_json(row: &MachineReport) -> serde_json::Value {
    serde_json::json!({
        "machine": machine_json(&row.machine),
        "subtotal": row.subtotal,
        "repairs": row.repairs.iter().map(repair_json).collect::<Vec<_>>(),
    })
}

/// Convert a full report to JSON for output.
pub fn report_json(report: &Report) -> serde_json::Value {
    serde_json::json!({
        "view": report.view,
        "filter": report.filter,
        "machines": report.machines.iter().map(machine_report_json).collect::<Vec<_>>(),
        "repair_count": report.repair_count(),
        "grand_total": report.grand_total,
    })
}

/// Flatten a report into one record per surviving repair.
///
/// Ghost machines (name matched, nothing survived) have no repairs and so
/// contribute no records.
pub fn export_records(report: &Report) -> Vec<serde_json::Value> {
    report
        .machines
        .iter()
        .flat_map(|row| {
            row.repairs.iter().map(move |repair| {
                let mut record = repair_json(repair);
                if let Some(obj) = record.as_object_mut() {
                    obj.insert("machine".to_string(), serde_json::json!(row.machine.id));
                    obj.insert("machine_name".to_string(), serde_json::json!(row.machine.name));
                }
                record
            })
        })
        .collect()
}

pub fn repair_types_json(types: &[RepairType]) -> Vec<serde_json::Value> {
    types
        .iter()
        .map(|t| serde_json::json!({ "id": t.id, "name": t.name }))
        .collect()
}

pub fn whoami_json(
    session: &Session,
    profile: &UserProfile,
    details: &UserDetails,
) -> serde_json::Value {
    serde_json::json!({
        "username": session.username,
        "role": profile.role,
        "read_only": is_read_only_role(profile.role.as_deref()),
        "details": details,
    })
}
