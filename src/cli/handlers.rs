use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::entity::{parse_checklist, parse_date, parse_tags, Note, NoteDraft};
use crate::error::{NotesError, Result};
use crate::export::{export_markdown, export_pdf, write_export};
use crate::search::NoteFilter;
use crate::share::{resolve_shared, share_link};
use crate::storage::NoteStore;
use crate::tags::all_tags;

use super::{ExportFormat, NoteFields};

impl NoteFields {
    /// Turn command-line fields into a draft, reading stdin when asked.
    pub fn into_draft(self) -> Result<NoteDraft> {
        let content = if self.stdin {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Some(content)
        } else {
            self.content
        };

        Ok(NoteDraft {
            title: self.title,
            content,
            tags: self.tags.as_deref().map(parse_tags).unwrap_or_default(),
            checklist: self
                .checklist
                .as_deref()
                .map(parse_checklist)
                .unwrap_or_default(),
            date: self.date.as_deref().map(parse_date).transpose()?,
        })
    }
}

fn print_note(note: &Note) {
    println!("{} ({})", note.title, note.date);
    println!("  id: {}", note.id.as_deref().unwrap_or("-"));
    if !note.tags.is_empty() {
        println!("  tags: {}", note.tags.join(", "));
    }
    if !note.checklist.is_empty() {
        println!("  checklist:");
        for item in &note.checklist {
            println!("    [{}] {}", if item.done { "x" } else { " " }, item.text);
        }
    }
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
}

pub fn handle_add(store: &NoteStore, fields: NoteFields, json: bool) -> Result<()> {
    let note = store.create(fields.into_draft()?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created note ({}) - {}", note.short_id(), note.title);
    }
    Ok(())
}

pub fn handle_list(
    store: &NoteStore,
    tag: Option<String>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let notes = store.list()?;
    let mut filter = NoteFilter::parse(search.as_deref().unwrap_or_default());
    if let Some(tag) = tag.as_deref() {
        filter.tag = tag.into();
    }
    let matched = filter.apply(&notes);

    if json {
        println!("{}", serde_json::to_string_pretty(&matched)?);
    } else if matched.is_empty() {
        println!("No notes found.");
    } else {
        println!("Notes:\n");
        for n in matched {
            println!("  ({}) {} {}", n.short_id(), n.date, n.title);
            if !n.tags.is_empty() {
                println!("      tags: {}", n.tags.join(", "));
            }
        }
    }
    Ok(())
}

pub fn handle_get(store: &NoteStore, id: String, json: bool) -> Result<()> {
    let note = store.get(&id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        print_note(&note);
    }
    Ok(())
}

pub fn handle_update(store: &NoteStore, id: String, fields: NoteFields, json: bool) -> Result<()> {
    let note = store.replace(&id, fields.into_draft()?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Updated note ({}) - {}", note.short_id(), note.title);
    }
    Ok(())
}

pub fn handle_delete(store: &NoteStore, id: String, force: bool) -> Result<()> {
    let note = store.get(&id)?;

    // Confirm deletion unless --force is used
    if !force {
        eprintln!("Delete note ({}) - {}? [y/N] ", note.short_id(), note.title);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(NotesError::InvalidInput(
                "Use --force to delete in non-interactive mode".to_string(),
            ));
        }
    }

    if !store.delete_by_id(&id)? {
        return Err(NotesError::NotFound(id));
    }
    println!("Deleted note ({}) - {}", note.short_id(), note.title);
    Ok(())
}

pub fn handle_tags(store: &NoteStore, json: bool) -> Result<()> {
    let tags = all_tags(&store.load()?);

    if json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
    } else if tags.is_empty() {
        println!("No tags found.");
    } else {
        for tag in tags {
            println!("{}", tag);
        }
    }
    Ok(())
}

pub fn handle_share(store: &NoteStore, id: String, base_url: String, json: bool) -> Result<()> {
    let shared = resolve_shared(&id, &store.load()?)?;
    let link = share_link(&base_url, &id);

    if json {
        #[derive(serde::Serialize)]
        struct ShareJson<'a> {
            link: &'a str,
            #[serde(flatten)]
            note: &'a crate::share::SharedNote,
        }
        let out = ShareJson {
            link: &link,
            note: &shared,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Shared note: {}", shared.title);
        println!("Link: {}", link);
        if !shared.tags.is_empty() {
            println!("Tags: {}", shared.tags.join(", "));
        }
    }
    Ok(())
}

pub fn handle_backfill(store: &NoteStore) -> Result<()> {
    let (_, assigned) = store.backfill()?;

    if assigned == 0 {
        println!("All notes already have IDs.");
    } else {
        println!("Assigned IDs to {} note(s).", assigned);
    }
    Ok(())
}

pub fn handle_export(
    store: &NoteStore,
    id: String,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let note = store.get(&id)?;
    let body = match format {
        ExportFormat::Markdown => export_markdown(&note)?.into_bytes(),
        ExportFormat::Pdf => export_pdf(&note)?,
    };

    match output {
        Some(path) => {
            write_export(&path, &body)?;
            println!("Exported '{}' to {}", note.title, path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&body)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

pub fn handle_serve(config: &Config) -> Result<()> {
    let addr = config.bind_addr()?;
    let store = NoteStore::open(config.notes_file.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(crate::server::serve(store, addr))
}
