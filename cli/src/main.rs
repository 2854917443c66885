use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use noteleaf_core::models::{Note, NoteColor, NoteDraft, NotePatch};
use noteleaf_core::stats::{recently_updated, CollectionStats};
use noteleaf_core::storage::Database;
use noteleaf_core::{run_query, NoteStore, QuerySpec, SortKey, SortOrder};
use std::path::PathBuf;
use std::sync::Arc;

mod config;
use config::load_config;

#[derive(Parser)]
#[command(name = "noteleaf", version, about = "Personal notes from the terminal")]
struct Cli {
    /// Path to the config file
    #[arg(long, default_value = "noteleaf.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a note
    Add {
        title: String,
        /// Note body
        #[arg(long, default_value = "")]
        content: String,
        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Folder name
        #[arg(long)]
        folder: Option<String>,
        #[arg(long)]
        color: Option<NoteColor>,
        /// Star the note immediately
        #[arg(long)]
        favorite: bool,
        /// Protect the note with a password (soft lock, stored in plain text)
        #[arg(long)]
        password: Option<String>,
    },
    /// List notes, filtered and sorted
    List {
        /// Substring to search for in titles, contents and tags
        #[arg(long)]
        search: Option<String>,
        /// Required tag (repeatable; a note must carry every one)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Restrict to a folder by name
        #[arg(long)]
        folder: Option<String>,
        #[arg(long)]
        color: Option<NoteColor>,
        /// Only favorites
        #[arg(long)]
        favorites: bool,
        /// Sort key: updated, created or title
        #[arg(long, default_value = "updated")]
        sort: SortKey,
        /// Sort order: asc or desc
        #[arg(long, default_value = "desc")]
        order: SortOrder,
    },
    /// Show a single note
    Show {
        id: String,
        /// Password for a protected note
        #[arg(long)]
        password: Option<String>,
    },
    /// Edit fields of a note
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// Replacement tag set (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Move into a folder by name
        #[arg(long)]
        folder: Option<String>,
        /// Remove the note from its folder
        #[arg(long, conflicts_with = "folder")]
        no_folder: bool,
        #[arg(long)]
        color: Option<NoteColor>,
        /// Clear the color
        #[arg(long, conflicts_with = "color")]
        no_color: bool,
    },
    /// Delete a note
    Rm { id: String },
    /// Toggle a note's favorite flag
    Favorite { id: String },
    /// Manage folders
    Folder {
        #[command(subcommand)]
        action: FolderCommand,
    },
    /// Collection overview
    Stats,
}

#[derive(Subcommand)]
enum FolderCommand {
    /// Create a folder
    Add { name: String },
    /// Rename a folder
    Rename { name: String, new_name: String },
    /// Delete a folder; its notes become uncategorized
    Rm { name: String },
    /// List folders
    List,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli.config);
    let gateway = Arc::new(Database::new(&config.database_path));
    let mut store = NoteStore::open(gateway).context("failed to open note store")?;

    match cli.command {
        Command::Add {
            title,
            content,
            tags,
            folder,
            color,
            favorite,
            password,
        } => {
            let folder_id = folder
                .map(|name| resolve_folder(&store, &name))
                .transpose()?;
            let note = store.create(NoteDraft {
                title,
                content,
                tags,
                folder_id,
                color,
                is_favorite: favorite,
                is_protected: password.is_some(),
                password,
                ..Default::default()
            })?;
            println!("Created note {}", note.id);
        }
        Command::List {
            search,
            tags,
            folder,
            color,
            favorites,
            sort,
            order,
        } => {
            let folder_id = folder
                .map(|name| resolve_folder(&store, &name))
                .transpose()?;
            let spec = QuerySpec {
                search_term: search,
                tags,
                folder_id,
                color,
                favorites_only: favorites,
                sort_key: sort,
                sort_order: order,
            };
            let notes = run_query(&store.all(), &spec);
            if notes.is_empty() {
                println!("No notes match.");
            }
            for note in &notes {
                print_row(note);
            }
        }
        Command::Show { id, password } => {
            let note = store.get(&id)?;
            print_note(&note, password.as_deref());
        }
        Command::Edit {
            id,
            title,
            content,
            tags,
            folder,
            no_folder,
            color,
            no_color,
        } => {
            let folder_id = match (folder, no_folder) {
                (Some(name), _) => Some(Some(resolve_folder(&store, &name)?)),
                (None, true) => Some(None),
                (None, false) => None,
            };
            let color = match (color, no_color) {
                (Some(c), _) => Some(Some(c)),
                (None, true) => Some(None),
                (None, false) => None,
            };
            let patch = NotePatch {
                title,
                content,
                tags: (!tags.is_empty()).then_some(tags),
                folder_id,
                color,
                ..Default::default()
            };
            let note = store.update(&id, patch)?;
            println!("Updated note {}", note.id);
        }
        Command::Rm { id } => {
            store.remove(&id)?;
            println!("Deleted note {}", id);
        }
        Command::Favorite { id } => {
            let note = store.toggle_favorite(&id)?;
            println!(
                "{} {}",
                if note.is_favorite { "Starred" } else { "Unstarred" },
                note.title
            );
        }
        Command::Folder { action } => match action {
            FolderCommand::Add { name } => {
                let folder = store.create_folder(&name)?;
                println!("Created folder '{}'", folder.name);
            }
            FolderCommand::Rename { name, new_name } => {
                let id = resolve_folder(&store, &name)?;
                let folder = store.rename_folder(&id, &new_name)?;
                println!("Renamed folder to '{}'", folder.name);
            }
            FolderCommand::Rm { name } => {
                let id = resolve_folder(&store, &name)?;
                store.remove_folder(&id)?;
                println!("Deleted folder '{}'", name);
            }
            FolderCommand::List => {
                let folders = store.folders();
                if folders.is_empty() {
                    println!("No folders.");
                }
                for folder in folders {
                    let members = store
                        .all()
                        .iter()
                        .filter(|n| n.folder_id.as_deref() == Some(folder.id.as_str()))
                        .count();
                    println!("{}  {} ({} notes)", folder.id, folder.name, members);
                }
            }
        },
        Command::Stats => {
            let notes = store.all();
            let stats = CollectionStats::collect(&notes);
            println!("Notes:     {}", stats.total);
            println!("Favorites: {}", stats.favorites);
            println!("Tags:      {}", stats.distinct_tags);
            println!("Folders:   {}", store.folders().len());
            for (color, count) in &stats.by_color {
                println!("  {}: {}", color, count);
            }
            let recent = recently_updated(&notes, 3);
            if !recent.is_empty() {
                println!("Recently updated:");
                for note in &recent {
                    print_row(note);
                }
            }
        }
    }

    store.flush()?;
    Ok(())
}

fn resolve_folder(store: &NoteStore, name: &str) -> Result<String> {
    store
        .folders()
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.id.clone())
        .with_context(|| format!("no folder named '{}'", name))
}

fn print_row(note: &Note) {
    let star = if note.is_favorite { "*" } else { " " };
    let tags = note
        .tags
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "{}  {} {:<40} {:<30} {}",
        note.id,
        star,
        note.title,
        tags,
        time_ago(note.updated_at)
    );
}

fn print_note(note: &Note, password: Option<&str>) {
    print_row(note);
    if note.is_protected && password != note.password.as_deref() {
        println!("(protected - pass --password to view the content)");
        return;
    }
    if !note.content.is_empty() {
        println!("{}", note.content);
    }
    if let Some(color) = note.color {
        println!("Color: {}", color);
    }
    if let Some(location) = &note.location {
        println!(
            "Location: {:.4}, {:.4}{}",
            location.latitude,
            location.longitude,
            location
                .label
                .as_deref()
                .map(|l| format!(" ({})", l))
                .unwrap_or_default()
        );
    }
    if let Some(attachment) = &note.attachment {
        println!("Attachment: {} {}", attachment.kind, attachment.uri);
    }
    println!("Created: {}", note.created_at.format("%Y-%m-%d %H:%M"));
    println!("Updated: {}", note.updated_at.format("%Y-%m-%d %H:%M"));
}

fn time_ago(stamp: DateTime<Utc>) -> String {
    let seconds = (Utc::now() - stamp).num_seconds().max(0);
    match seconds {
        s if s < 60 => format!("{}s ago", s),
        s if s < 3600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3600),
        s if s < 604_800 => format!("{}d ago", s / 86_400),
        s => format!("{}w ago", s / 604_800),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_time_ago_buckets() {
        let now = Utc::now();
        assert!(time_ago(now).ends_with("s ago"));
        assert_eq!(time_ago(now - Duration::minutes(5)), "5m ago");
        assert_eq!(time_ago(now - Duration::hours(3)), "3h ago");
        assert_eq!(time_ago(now - Duration::days(2)), "2d ago");
        assert_eq!(time_ago(now - Duration::days(21)), "3w ago");
    }

    #[test]
    fn test_future_timestamps_clamp_to_now() {
        assert_eq!(time_ago(Utc::now() + Duration::hours(1)), "0s ago");
    }
}
