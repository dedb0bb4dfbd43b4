//! GET command - Fetch one note.

use anyhow::Result;
use clap::Args;
use notes_core::Note;

use super::{make_request, output};

/// Arguments for the get command.
#[derive(Args)]
pub struct GetArgs {
    /// Note identifier (36-character canonical form)
    pub id: String,
}

/// Execute the get command.
///
/// The identifier is passed through as typed; the server decides whether it
/// is well formed.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: GetArgs,
) -> Result<()> {
    let url = format!("{}/notes/{}", base_url, args.id);
    let note: Note = make_request(client.get(&url)).await?;

    output(&note, human)
}
