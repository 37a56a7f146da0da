//! Report assembly for the all-machines and single-machine views.

use serde::Serialize;

use super::filter::{
    associate, filter_machines, filter_repairs, grand_total, sort_newest_first, subtotal,
    MachineWithRepairs,
};
use super::FilterState;
use crate::model::{Machine, RecordId, Repair};

/// One machine row of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineReport {
    pub machine: Machine,
    pub repairs: Vec<Repair>,
    pub subtotal: f64,
}

impl MachineReport {
    pub fn new(machine: Machine, repairs: Vec<Repair>) -> Self {
        let total = subtotal(&repairs);
        Self {
            machine,
            repairs,
            subtotal: total,
        }
    }
}

/// Which screen the report is built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "machine", rename_all = "snake_case")]
pub enum ReportView {
    /// Every machine, in fetch order
    AllMachines,
    /// One machine, repairs newest first
    MachineDetail(RecordId),
}

/// Filtered rows plus the grand total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub view: ReportView,
    pub filter: FilterState,
    pub machines: Vec<MachineReport>,
    pub grand_total: f64,
}

impl Report {
    pub fn repair_count(&self) -> usize {
        self.machines.iter().map(|m| m.repairs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }
}

/// Build the report for `view` from freshly fetched collections.
///
/// The detail view only looks at the selected machine, sorts its repairs
/// newest first before filtering and always keeps the machine row, even when
/// nothing survives the filter. An unknown machine yields an empty report.
pub fn build_report(
    machines: &[Machine],
    repairs: &[Repair],
    filter: &FilterState,
    view: &ReportView,
) -> Report {
    let rows = match view {
        ReportView::AllMachines => filter_machines(&associate(machines, repairs), filter),
        ReportView::MachineDetail(id) => machines
            .iter()
            .filter(|machine| &machine.id == id)
            .take(1)
            .map(|machine| {
                let mut entry = MachineWithRepairs {
                    machine: machine.clone(),
                    repairs: repairs
                        .iter()
                        .filter(|repair| repair.belongs_to(id))
                        .cloned()
                        .collect(),
                };
                sort_newest_first(&mut entry.repairs);
                let surviving = filter_repairs(&entry, filter);
                MachineReport::new(entry.machine, surviving)
            })
            .collect(),
    };

    let total = grand_total(&rows);
    tracing::debug!(view = ?view, machines = rows.len(), total, "built report");

    Report {
        view: view.clone(),
        filter: filter.clone(),
        machines: rows,
        grand_total: total,
    }
}
