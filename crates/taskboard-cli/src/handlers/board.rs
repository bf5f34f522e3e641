use crate::cli::{BoardAction, BoardUpdateArgs};
use crate::context::CliContext;
use crate::output;
use taskboard_domain::{BoardUpdate, NewBoard};

pub async fn handle(ctx: &CliContext, action: BoardAction) -> anyhow::Result<()> {
    let coordinator = ctx.coordinator();
    match action {
        BoardAction::List => {
            let boards = coordinator.refresh_boards().await?;
            output::output_list(boards);
        }
        BoardAction::Create {
            title,
            icon,
            background,
        } => {
            let mut board = NewBoard::new(title);
            if let Some(icon) = icon {
                board.icon = icon;
            }
            board.background = background;
            let created = coordinator.create_board(&board).await?;
            output::output_success(&created);
        }
        BoardAction::Update(args) => {
            let (id, update) = into_update(args);
            if update.is_empty() {
                output::output_error("Nothing to update: pass --title, --icon or --background");
            }
            let board = coordinator.update_board(&id, &update).await?;
            output::output_success(&board);
        }
        BoardAction::Delete { id } => {
            coordinator.delete_board(&id).await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
    }
    Ok(())
}

fn into_update(args: BoardUpdateArgs) -> (String, BoardUpdate) {
    let update = BoardUpdate {
        title: args.title,
        icon: args.icon,
        background: args.background,
    };
    (args.id, update)
}
