use clap::{Args, Parser, Subcommand};

use super::{
    CLI_SCHEMA_VERSION, DEFAULT_SIDEBAR_WIDTH, UiConfig, ViewerConfig, load_config_text,
    normalize_ui_theme, parse_ui_palette, shell_split,
};

#[path = "cli_command_handlers.rs"]
mod cli_command_handlers;
#[path = "cli_config.rs"]
mod cli_config;
#[path = "cli_runtime_helpers.rs"]
mod cli_runtime_helpers;
pub(crate) use cli_command_handlers::run_cli;
pub(crate) use cli_config::{load_ui_config, load_viewer_config};
pub(crate) use cli_runtime_helpers::{
    message_to_json, output_error, output_ok, resolve_cli_command, summary_to_json,
};

#[derive(Parser, Debug)]
#[command(name = "securemail", version, about = "Terminal secure mail viewer")]
pub(crate) struct Cli {
    #[arg(short = 'c', long = "cmd")]
    cmd: Option<String>,
    /// Theme name, overrides SECUREMAIL_THEME and the config file.
    #[arg(long, global = true)]
    pub(crate) theme: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum CliCommand {
    Folders(FoldersCmd),
    Messages(MessagesCmd),
    Message(MessageCmd),
}

#[derive(Args, Debug)]
pub(crate) struct FoldersCmd {
    #[command(subcommand)]
    command: FoldersCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum FoldersCommand {
    List,
}

#[derive(Args, Debug)]
pub(crate) struct MessagesCmd {
    #[command(subcommand)]
    command: MessagesCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum MessagesCommand {
    List(MessagesList),
}

#[derive(Args, Debug)]
pub(crate) struct MessagesList {
    /// Accepted and echoed; every folder lists the same messages.
    #[arg(long)]
    folder: Option<String>,
    #[arg(long, default_value_t = 50)]
    limit: usize,
    #[arg(long)]
    unread: bool,
    #[arg(long)]
    starred: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MessageCmd {
    #[command(subcommand)]
    command: MessageCommand,
}

#[derive(Subcommand, Debug)]
pub(crate) enum MessageCommand {
    Get(MessageGet),
}

#[derive(Args, Debug)]
pub(crate) struct MessageGet {
    #[arg(long)]
    id: String,
    #[arg(long)]
    body: bool,
}
