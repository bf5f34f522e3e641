use crate::cli::{TaskAction, TaskCreateArgs, TaskListArgs, TaskUpdateArgs};
use crate::context::CliContext;
use crate::output;
use chrono::{Local, NaiveDate};
use taskboard_domain::{
    CompositeFilter, DeadlineFilter, FieldUpdate, NewTask, OverdueFilter, PriorityFilter,
    TaskUpdate,
};

pub async fn handle(ctx: &CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::List(args) => handle_list(ctx, args).await?,
        TaskAction::Create(args) => handle_create(ctx, args).await?,
        TaskAction::Update(args) => handle_update(ctx, args).await?,
        TaskAction::Delete { board, id } => {
            ctx.open_board(&board).await?;
            ctx.coordinator().delete_task(&id).await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
    }
    Ok(())
}

async fn handle_list(ctx: &CliContext, args: TaskListArgs) -> anyhow::Result<()> {
    ctx.open_board(&args.board).await?;
    let filter = list_filter(&args, Local::now().date_naive());
    let columns = ctx.board_view(args.column.as_deref(), &filter);
    if let Some(column) = &args.column {
        if columns.is_empty() {
            output::output_error(&format!("Column not found: {}", column));
        }
    }
    output::output_list(columns);
    Ok(())
}

fn list_filter(args: &TaskListArgs, today: NaiveDate) -> CompositeFilter {
    let mut filter = CompositeFilter::new();
    if !args.priority.is_empty() {
        filter = filter.with_filter(PriorityFilter::only(args.priority.iter().copied()));
    }
    if let Some(due_by) = args.due_by {
        filter = filter.with_filter(DeadlineFilter::due_by(due_by));
    }
    if args.overdue {
        filter = filter.with_filter(OverdueFilter::as_of(today));
    }
    filter
}

async fn handle_create(ctx: &CliContext, args: TaskCreateArgs) -> anyhow::Result<()> {
    ctx.open_board(&args.board).await?;
    let mut task = NewTask::new(args.title);
    task.description = args.description;
    task.deadline = args.deadline;
    if let Some(priority) = args.priority {
        task.priority = priority;
    }
    let created = ctx.coordinator().create_task(&args.column, &task).await?;
    output::output_success(&created);
    Ok(())
}

async fn handle_update(ctx: &CliContext, args: TaskUpdateArgs) -> anyhow::Result<()> {
    let update = TaskUpdate {
        title: args.title,
        description: FieldUpdate::from_parts(args.description, args.clear_description),
        priority: args.priority,
        deadline: FieldUpdate::from_parts(args.deadline, args.clear_deadline),
        column: args.column,
    };
    if update.is_empty() {
        output::output_error("Nothing to update");
    }
    ctx.open_board(&args.board).await?;
    let task = ctx.coordinator().update_task(&args.id, &update).await?;
    output::output_success(&task);
    Ok(())
}
