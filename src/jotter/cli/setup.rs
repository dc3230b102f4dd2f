use clap::{Parser, Subcommand};
use jotter::model::{NoteField, NoteId, TodoId};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "jot", bin_name = "jot", version = get_version())]
#[command(about = "Notes with checklists in one local slot", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all notes with their to-dos
    #[command(alias = "ls")]
    List,

    /// Create a note (title or content must be non-blank)
    #[command(alias = "n")]
    Add {
        /// Title of the note
        title: String,

        /// Body of the note
        #[arg(required = false)]
        content: Option<String>,
    },

    /// Show a single note
    #[command(alias = "v")]
    View {
        /// Note id
        note: NoteId,
    },

    /// Replace a note's title or content
    #[command(alias = "e")]
    Edit {
        /// Note id
        note: NoteId,

        /// Field to edit: title or content
        field: NoteField,

        /// New text (may be empty)
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Delete a note and all of its to-dos
    #[command(alias = "rm")]
    Delete {
        /// Note id
        note: NoteId,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Manage a note's to-dos
    #[command(alias = "t")]
    Todo {
        #[command(subcommand)]
        action: TodoCommands,
    },

    /// Print the location of the storage slot
    Path,

    /// Get or set configuration
    Config {
        /// Configuration key (storage-key, confirm-delete, log-level)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TodoCommands {
    /// Add a to-do to a note
    Add {
        /// Note id
        note: NoteId,

        /// To-do text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Mark a to-do as done
    Done { note: NoteId, todo: TodoId },

    /// Mark a to-do as not done
    Undo { note: NoteId, todo: TodoId },

    /// Remove a to-do
    #[command(alias = "delete")]
    Rm { note: NoteId, todo: TodoId },
}
