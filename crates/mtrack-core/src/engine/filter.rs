//! Association, predicates and totals.

use std::cmp::Ordering;

use chrono::Datelike;
use serde::Serialize;

use super::report::MachineReport;
use super::{FilterState, YearMonth};
use crate::model::{Machine, Repair};

/// A machine paired with the repairs recorded against it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineWithRepairs {
    pub machine: Machine,
    pub repairs: Vec<Repair>,
}

/// Attach to each machine the repairs that reference it, in fetch order.
///
/// Repairs whose machine is missing or unknown are not attached anywhere.
pub fn associate(machines: &[Machine], repairs: &[Repair]) -> Vec<MachineWithRepairs> {
    machines
        .iter()
        .map(|machine| MachineWithRepairs {
            machine: machine.clone(),
            repairs: repairs
                .iter()
                .filter(|repair| repair.belongs_to(&machine.id))
                .cloned()
                .collect(),
        })
        .collect()
}

/// Whether the repair was added in `month`, read in its recorded offset.
///
/// Always true without a month; always false for an unparseable timestamp.
pub fn matches_month(repair: &Repair, month: Option<YearMonth>) -> bool {
    let Some(month) = month else {
        return true;
    };
    match repair.added_at() {
        Some(added) => added.year() == month.year() && added.month() == month.month(),
        None => false,
    }
}

/// Case-insensitive substring match on the repair's type label or the
/// owning machine's name. An empty term matches everything.
pub fn matches_search(repair: &Repair, machine: &Machine, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    repair
        .type_label()
        .is_some_and(|label| contains_folded(label, &needle))
        || contains_folded(&machine.name, &needle)
}

/// Repairs of one machine surviving both the month and search constraints.
pub fn filter_repairs(entry: &MachineWithRepairs, filter: &FilterState) -> Vec<Repair> {
    entry
        .repairs
        .iter()
        .filter(|repair| {
            matches_month(repair, filter.month)
                && matches_search(repair, &entry.machine, &filter.search)
        })
        .cloned()
        .collect()
}

/// Machines to show under `filter`, each with its surviving repairs and
/// subtotal.
///
/// A machine is kept when its name matches the search or at least one of its
/// repairs survives. A name match with no surviving repairs still yields a
/// row (with an empty list and a zero subtotal).
pub fn filter_machines(entries: &[MachineWithRepairs], filter: &FilterState) -> Vec<MachineReport> {
    let needle = filter.search.to_lowercase();
    let included: Vec<MachineReport> = entries
        .iter()
        .filter_map(|entry| {
            let repairs = filter_repairs(entry, filter);
            let name_matches = contains_folded(&entry.machine.name, &needle);
            if !name_matches && repairs.is_empty() {
                return None;
            }
            Some(MachineReport::new(entry.machine.clone(), repairs))
        })
        .collect();

    tracing::trace!(
        machines = entries.len(),
        included = included.len(),
        "filtered machines"
    );
    included
}

/// Sum of the repairs' prices. Non-numeric prices count as zero.
pub fn subtotal(repairs: &[Repair]) -> f64 {
    repairs.iter().map(|repair| repair.price.amount()).sum()
}

/// Sum of the subtotals of the included machines.
pub fn grand_total(machines: &[MachineReport]) -> f64 {
    machines.iter().map(|machine| machine.subtotal).sum()
}

/// Dashboard search: machines whose name contains `search`, ignoring case.
pub fn filter_machines_by_name(machines: &[Machine], search: &str) -> Vec<Machine> {
    let needle = search.to_lowercase();
    machines
        .iter()
        .filter(|machine| contains_folded(&machine.name, &needle))
        .cloned()
        .collect()
}

/// Order repairs newest first by creation time. Stable; repairs without a
/// readable timestamp go last.
pub fn sort_newest_first(repairs: &mut [Repair]) {
    repairs.sort_by(|a, b| match (a.added_at(), b.added_at()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}
