use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "notestore")]
#[command(version, about = "A flat-file notes store with tagging, search and link sharing")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Notes file (defaults to $NOTESTORE_FILE or ./notes.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Fields accepted when creating or rewriting a note.
#[derive(Args, Debug, Default)]
pub struct NoteFields {
    /// Note title (defaults to "Note N")
    pub title: Option<String>,

    /// Note content (markup is stored as-is)
    #[arg(long, conflicts_with = "stdin")]
    pub content: Option<String>,

    /// Read content from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Comma separated tags, e.g. "home, errands"
    #[arg(long, short = 't')]
    pub tags: Option<String>,

    /// Checklist items, one per line
    #[arg(long, short = 'c')]
    pub checklist: Option<String>,

    /// Date as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// YAML frontmatter, content and checklist
    Markdown,
    /// The content as plain text
    Pdf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new note
    Add {
        #[command(flatten)]
        fields: NoteFields,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List notes, optionally filtered
    List {
        /// Only notes carrying this tag ("All" for no filter)
        #[arg(long)]
        tag: Option<String>,

        /// Case-insensitive search in note content; a "tag:NAME" word also
        /// narrows by tag
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note by ID
    Get {
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a note; omitted fields reset to their defaults
    Update {
        id: String,

        #[command(flatten)]
        fields: NoteFields,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note by ID
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List all tags in use
    Tags {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the shared view of a note and its share link
    Share {
        id: String,

        /// Base URL the share link points at
        #[arg(long, default_value = "http://localhost:8501/")]
        base_url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign IDs to notes that lack one
    Backfill,

    /// Export a note as Markdown or PDF
    Export {
        id: String,

        #[arg(long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Serve the notes over HTTP
    Serve {
        /// Address to bind (defaults to $NOTESTORE_BIND or 127.0.0.1:8501)
        #[arg(long)]
        bind: Option<String>,
    },
}
