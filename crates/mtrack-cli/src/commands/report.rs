use mtrack_core::{build_report, fetch_machine_detail, fetch_snapshot, FilterState, ReportView};

use crate::app::AppContext;
use crate::cli::{ExportArgs, ExportFormat, ReportArgs};
use crate::helpers::{build_filter, parse_record_id};
use crate::output::{export_records, print_report, report_json};
use crate::ui::{blank_line, header_with_context, hint, print};

pub fn handle_report(ctx: &AppContext, args: &ReportArgs) -> anyhow::Result<()> {
    let filter = build_filter(args.month.as_deref(), args.search.as_deref())?;
    let view = match args.machine.as_deref() {
        Some(value) => ReportView::MachineDetail(parse_record_id(value, "Machine")?),
        None => ReportView::AllMachines,
    };

    let session = ctx.require_session()?;
    let api = ctx.api()?;
    let snapshot = match &view {
        ReportView::AllMachines => fetch_snapshot(api, &session)?,
        ReportView::MachineDetail(id) => fetch_machine_detail(api, &session, id)?,
    };
    let report = build_report(&snapshot.machines, &snapshot.repairs, &filter, &view);

    let ui = ctx.ui_context(args.json, args.format);
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
        return Ok(());
    }

    if !ctx.quiet() && ui.mode.is_pretty() {
        let context = filter_context(&filter);
        print(
            &ui,
            &header_with_context(
                &ui,
                "report",
                context.as_deref(),
                Some(api.base_url().as_str()),
            ),
        );
        blank_line(&ui);
    }

    print_report(&ui, &report);

    if !ctx.quiet() && ui.mode.is_pretty() && report.repair_count() == 0 && filter.is_active() {
        blank_line(&ui);
        print(&ui, &hint(&ui, "Drop --month or --search to see every repair."));
    }
    Ok(())
}

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let filter = build_filter(args.month.as_deref(), args.search.as_deref())?;
    let session = ctx.require_session()?;
    let snapshot = fetch_snapshot(ctx.api()?, &session)?;
    let report = build_report(
        &snapshot.machines,
        &snapshot.repairs,
        &filter,
        &ReportView::AllMachines,
    );

    match args.format {
        ExportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
        }
        ExportFormat::Jsonl => {
            for record in export_records(&report) {
                println!("{}", serde_json::to_string(&record)?);
            }
        }
    }
    Ok(())
}

/// Header context describing the active filter, e.g. `2024-03, "tractor"`.
fn filter_context(filter: &FilterState) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(month) = filter.month {
        parts.push(month.to_string());
    }
    if !filter.search.is_empty() {
        parts.push(format!("\"{}\"", filter.search));
    }
    (!parts.is_empty()).then(|| parts.join(", "))
}
