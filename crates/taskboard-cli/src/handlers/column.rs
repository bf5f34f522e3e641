use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::output;
use taskboard_domain::PriorityFilter;

pub async fn handle(ctx: &CliContext, action: ColumnAction) -> anyhow::Result<()> {
    let coordinator = ctx.coordinator();
    match action {
        ColumnAction::List { board } => {
            ctx.open_board(&board).await?;
            let columns: Vec<_> = ctx
                .board_view(None, &PriorityFilter::new())
                .into_iter()
                .map(|view| view.column)
                .collect();
            output::output_list(columns);
        }
        ColumnAction::Create { board, title } => {
            ctx.open_board(&board).await?;
            let column = coordinator.create_column(&title).await?;
            output::output_success(&column);
        }
        ColumnAction::Rename { board, id, title } => {
            ctx.open_board(&board).await?;
            let column = coordinator.rename_column(&id, &title).await?;
            output::output_success(&column);
        }
        ColumnAction::Delete { board, id } => {
            ctx.open_board(&board).await?;
            coordinator.delete_column(&id).await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
    }
    Ok(())
}
