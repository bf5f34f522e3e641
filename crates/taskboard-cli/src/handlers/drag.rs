use crate::cli::DragArgs;
use crate::context::CliContext;
use crate::output;
use serde::Serialize;
use std::collections::BTreeMap;
use taskboard_core::Notification;
use taskboard_sync::{DragOutcome, SyncOutcome};

#[derive(Serialize)]
struct DragResult {
    outcome: DragOutcome,
    sync: &'static str,
    stale: bool,
    column_order: Vec<String>,
    task_order: BTreeMap<String, Vec<String>>,
    notifications: Vec<Notification>,
}

pub async fn handle(ctx: &CliContext, args: DragArgs) -> anyhow::Result<()> {
    ctx.open_board(&args.board).await?;
    let coordinator = ctx.coordinator();
    let report = coordinator
        .handle_drop(&args.dragged, args.target.as_deref())
        .await;

    if let SyncOutcome::RolledBack(e) | SyncOutcome::Kept(e) | SyncOutcome::Diverged(e) =
        &report.sync
    {
        output::output_error(&format!("{} ({})", e.user_message(), report.sync.label()));
    }

    let state = coordinator.state();
    let result = {
        let state = state.lock();
        let order = state.order();
        DragResult {
            sync: report.sync.label(),
            stale: state.is_stale(),
            column_order: order.column_order().to_vec(),
            task_order: order
                .column_order()
                .iter()
                .map(|id| (id.clone(), order.tasks_in(id).unwrap_or(&[]).to_vec()))
                .collect(),
            outcome: report.outcome,
            notifications: coordinator.drain_notifications(),
        }
    };
    output::output_success(result);
    Ok(())
}
