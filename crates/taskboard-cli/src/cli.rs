use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use taskboard_domain::{parse_deadline, TaskPriority};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Client for a remote kanban board service", long_about = None)]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TASKBOARD_COMMIT"), ")"))]
pub struct Cli {
    /// Base URL of the board service (overrides the config file)
    #[arg(long, global = true, env = "TASKBOARD_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true, env = "TASKBOARD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Column operations
    Column(ColumnCommand),
    /// Task operations
    Task(TaskCommand),
    /// Drop a column or task onto a target, as a drag-and-drop would
    Drag(DragArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// List all boards
    List,
    /// Create a new board
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        background: Option<String>,
    },
    /// Update a board
    Update(BoardUpdateArgs),
    /// Delete a board
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct BoardUpdateArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub background: Option<String>,
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// List a board's columns in display order
    List {
        #[arg(long)]
        board: String,
    },
    /// Create a new column at the end of the board
    Create {
        #[arg(long)]
        board: String,
        #[arg(long)]
        title: String,
    },
    /// Rename a column
    Rename {
        #[arg(long)]
        board: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        title: String,
    },
    /// Delete a column and its tasks
    Delete {
        #[arg(long)]
        board: String,
        #[arg(long)]
        id: String,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// List tasks per column, optionally narrowed to priorities
    List(TaskListArgs),
    /// Create a task at the end of a column
    Create(TaskCreateArgs),
    /// Update a task
    Update(TaskUpdateArgs),
    /// Delete a task
    Delete {
        #[arg(long)]
        board: String,
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
pub struct TaskListArgs {
    #[arg(long)]
    pub board: String,
    #[arg(long)]
    pub column: Option<String>,
    /// Only show these priorities (repeatable, or comma separated)
    #[arg(long, value_delimiter = ',')]
    pub priority: Vec<TaskPriority>,
    /// Only show tasks due on or before this day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_deadline)]
    pub due_by: Option<NaiveDate>,
    /// Only show tasks whose deadline has passed
    #[arg(long)]
    pub overdue: bool,
}

#[derive(Args)]
pub struct TaskCreateArgs {
    #[arg(long)]
    pub board: String,
    #[arg(long)]
    pub column: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<TaskPriority>,
    /// Due date as YYYY-MM-DD
    #[arg(long, value_parser = parse_deadline)]
    pub deadline: Option<NaiveDate>,
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    #[arg(long)]
    pub board: String,
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,
    #[arg(long)]
    pub clear_description: bool,
    #[arg(long)]
    pub priority: Option<TaskPriority>,
    /// Due date as YYYY-MM-DD
    #[arg(long, value_parser = parse_deadline, conflicts_with = "clear_deadline")]
    pub deadline: Option<NaiveDate>,
    #[arg(long)]
    pub clear_deadline: bool,
    /// Move the task to the top of another column
    #[arg(long)]
    pub column: Option<String>,
}

#[derive(Args)]
pub struct DragArgs {
    #[arg(long)]
    pub board: String,
    /// Id of the dragged column or task
    #[arg(long)]
    pub dragged: String,
    /// Id of the column or task it is dropped on; omit for a drop outside any target
    #[arg(long)]
    pub target: Option<String>,
}
