use anyhow::{Result, anyhow};
use securemail_core::{Folder, Mailbox, log_debug};
use serde_json::{Value as JsonValue, json};

use super::{
    CliCommand, FoldersCommand, MessageCommand, MessagesCommand, message_to_json, output_ok,
    summary_to_json,
};

pub(crate) fn run_cli(command: CliCommand, mailbox: &Mailbox) -> Result<()> {
    let result = command_result(command, mailbox)?;
    output_ok(result)
}

pub(crate) fn command_result(command: CliCommand, mailbox: &Mailbox) -> Result<JsonValue> {
    match command {
        CliCommand::Folders(cmd) => match cmd.command {
            FoldersCommand::List => {
                log_debug("cli folders.list");
                let out: Vec<JsonValue> = Folder::ALL
                    .iter()
                    .map(|folder| {
                        json!({
                            "id": folder.id(),
                            "label": folder.label(),
                            "count": mailbox.messages_in(*folder).len(),
                        })
                    })
                    .collect();
                Ok(json!(out))
            }
        },
        CliCommand::Messages(cmd) => match cmd.command {
            MessagesCommand::List(args) => {
                let folder = match args.folder.as_deref() {
                    Some(raw) => Folder::parse(raw)
                        .ok_or_else(|| anyhow!("Unknown folder '{}'", raw))?,
                    None => Folder::default(),
                };
                log_debug(&format!(
                    "cli messages.list folder={} unread={} starred={}",
                    folder.id(),
                    args.unread,
                    args.starred
                ));
                let messages: Vec<JsonValue> = mailbox
                    .messages_in(folder)
                    .iter()
                    .filter(|m| !args.unread || !m.read)
                    .filter(|m| !args.starred || m.starred)
                    .take(args.limit)
                    .map(summary_to_json)
                    .collect();
                Ok(json!({
                    "folder": folder.id(),
                    "messages": messages,
                }))
            }
        },
        CliCommand::Message(cmd) => match cmd.command {
            MessageCommand::Get(args) => {
                log_debug(&format!("cli message.get id={}", args.id));
                let message = mailbox
                    .get(&args.id)
                    .ok_or_else(|| anyhow!("Message '{}' not found", args.id))?;
                Ok(message_to_json(message, args.body))
            }
        },
    }
}
