//! CREATE command - Create a note.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use notes_core::{NoteId, NoteRequest};
use serde::Serialize;

use super::{HumanReadable, make_request, output};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Note title
    pub title: String,

    /// Note content. Read from stdin when omitted
    pub content: Option<String>,
}

/// Result of creating a note.
#[derive(Debug, Serialize)]
pub struct CreateNoteResponse {
    pub id: NoteId,
}

impl HumanReadable for CreateNoteResponse {
    fn print_human(&self) {
        println!("{} {}", "Created note".green().bold(), self.id);
    }
}

/// Execute the create command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: CreateArgs,
) -> Result<()> {
    let content = match args.content {
        Some(content) => content,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read note content from stdin")?;
            buffer
        }
    };

    let body = NoteRequest {
        title: args.title,
        content,
    };

    let url = format!("{}/notes", base_url);
    let id: NoteId = make_request(client.post(&url).json(&body)).await?;

    output(&CreateNoteResponse { id }, human)
}
