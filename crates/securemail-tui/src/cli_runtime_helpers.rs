use anyhow::Result;
use clap::Parser;
use securemail_core::Message;
use serde_json::{Value as JsonValue, json};

use super::{CLI_SCHEMA_VERSION, Cli, CliCommand, shell_split};

pub(crate) fn output_ok(value: JsonValue) -> Result<()> {
    println!("{}", serde_json::to_string(&ok_envelope(value))?);
    Ok(())
}

pub(crate) fn output_error(message: &str) -> Result<()> {
    println!("{}", serde_json::to_string(&error_envelope(message))?);
    Ok(())
}

pub(crate) fn ok_envelope(value: JsonValue) -> JsonValue {
    json!({
        "schema": CLI_SCHEMA_VERSION,
        "ok": true,
        "result": value
    })
}

pub(crate) fn error_envelope(message: &str) -> JsonValue {
    json!({
        "schema": CLI_SCHEMA_VERSION,
        "ok": false,
        "error": message
    })
}

pub(crate) fn resolve_cli_command(cli: Cli) -> Result<(bool, Option<CliCommand>)> {
    let cli_requested = cli.cmd.is_some() || cli.command.is_some();
    if let Some(cmd) = cli.cmd {
        let parts = shell_split(&cmd).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if parts.is_empty() {
            return Ok((true, None));
        }
        let mut args = Vec::with_capacity(parts.len() + 1);
        args.push("securemail".to_string());
        args.extend(parts);
        let parsed = Cli::try_parse_from(args).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        return Ok((true, parsed.command));
    }
    Ok((cli_requested, cli.command))
}

/// List entry; the body and link details stay behind `message get`.
pub(crate) fn summary_to_json(message: &Message) -> JsonValue {
    json!({
        "id": message.id,
        "from": message.from,
        "subject": message.subject,
        "preview": message.preview,
        "date": message.date,
        "read": message.read,
        "starred": message.starred,
        "url_count": message.urls.len(),
        "attachment_count": message.attachments.len(),
    })
}

pub(crate) fn message_to_json(message: &Message, include_body: bool) -> JsonValue {
    let mut value = summary_to_json(message);
    if let Some(map) = value.as_object_mut() {
        map.remove("url_count");
        map.remove("attachment_count");
        map.insert("urls".to_string(), json!(message.urls));
        map.insert("attachments".to_string(), json!(message.attachments));
        if include_body {
            map.insert("body".to_string(), json!(message.body));
        }
    }
    value
}
