//! LIST command - List notes a page at a time.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notes_core::Note;
use serde::Serialize;

use super::{HumanReadable, make_request, output, truncate};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Number of notes to skip
    #[arg(long, default_value_t = 0)]
    pub page: u32,

    /// Keep fetching pages until the server returns an empty one
    #[arg(long)]
    pub all: bool,
}

/// Notes returned by one or more list calls.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct NoteList {
    pub notes: Vec<Note>,
}

impl HumanReadable for NoteList {
    fn print_human(&self) {
        println!("{}", "Notes".green().bold());
        println!("{}", "=".repeat(80));
        println!();

        if self.notes.is_empty() {
            println!("  {}", "(No notes)".dimmed());
            return;
        }

        for note in &self.notes {
            println!(
                "  {}  {}  {}",
                note.id.to_string().yellow(),
                truncate(&note.title, 24).bold(),
                truncate(&note.content.replace('\n', " "), 40).dimmed()
            );
        }

        println!();
        println!("  {} note(s)", self.notes.len());
    }
}

/// Execute the list command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: ListArgs,
) -> Result<()> {
    let url = format!("{}/notes", base_url);
    let mut offset = args.page;
    let mut notes = Vec::new();

    loop {
        let page: Vec<Note> =
            make_request(client.get(&url).query(&[("page", offset)])).await?;
        let fetched = page.len();
        notes.extend(page);

        if !args.all || fetched == 0 {
            break;
        }
        offset = offset.saturating_add(u32::try_from(fetched)?);
    }

    output(&NoteList { notes }, human)
}
