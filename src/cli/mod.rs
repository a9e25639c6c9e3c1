mod commands;
mod handlers;

pub use commands::{Cli, Commands, ExportFormat, NoteFields};
pub use handlers::{
    handle_add, handle_backfill, handle_delete, handle_export, handle_get, handle_list,
    handle_serve, handle_share, handle_tags, handle_update,
};
