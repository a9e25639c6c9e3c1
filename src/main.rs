use clap::Parser;
use notestore::cli::{
    handle_add, handle_backfill, handle_delete, handle_export, handle_get, handle_list,
    handle_serve, handle_share, handle_tags, handle_update, Cli, Commands,
};
use notestore::config::Config;
use notestore::storage::NoteStore;

fn main() {
    // Logs go to stderr so stdout stays clean for --json output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.file, None);
    let store = NoteStore::open(config.notes_file.clone());

    let result = match cli.command {
        Commands::Add { fields, json } => handle_add(&store, fields, json),
        Commands::List { tag, search, json } => handle_list(&store, tag, search, json),
        Commands::Get { id, json } => handle_get(&store, id, json),
        Commands::Update { id, fields, json } => handle_update(&store, id, fields, json),
        Commands::Delete { id, force } => handle_delete(&store, id, force),
        Commands::Tags { json } => handle_tags(&store, json),
        Commands::Share { id, base_url, json } => handle_share(&store, id, base_url, json),
        Commands::Backfill => handle_backfill(&store),
        Commands::Export { id, format, output } => handle_export(&store, id, format, output),
        Commands::Serve { bind } => handle_serve(&config.with_overrides(None, bind)),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
