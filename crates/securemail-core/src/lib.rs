use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub media_type: String,
    pub size: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub from: String,
    pub subject: String,
    pub preview: String,
    /// Display string only; never parsed or compared.
    pub date: String,
    pub read: bool,
    pub starred: bool,
    pub body: String,
    pub urls: Vec<String>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folder {
    #[default]
    Inbox,
    Sent,
    Starred,
    Trash,
}

impl Folder {
    pub const ALL: [Folder; 4] = [Folder::Inbox, Folder::Sent, Folder::Starred, Folder::Trash];

    pub fn id(self) -> &'static str {
        match self {
            Folder::Inbox => "inbox",
            Folder::Sent => "sent",
            Folder::Starred => "starred",
            Folder::Trash => "trash",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Folder::Inbox => "Inbox",
            Folder::Sent => "Sent",
            Folder::Starred => "Starred",
            Folder::Trash => "Trash",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Folder> {
        Self::ALL.get(index).copied()
    }

    pub fn parse(raw: &str) -> Option<Folder> {
        let lowered = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.id() == lowered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsolatedKind {
    Url,
    Attachment,
}

impl IsolatedKind {
    pub fn heading(self) -> &'static str {
        match self {
            IsolatedKind::Url => "URL Preview",
            IsolatedKind::Attachment => "File Preview",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolatedContent {
    pub kind: IsolatedKind,
    /// URL verbatim for `Url`, file name for `Attachment`.
    pub content: String,
}

/// Whether isolated view state survives switching to another message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsolatedScope {
    #[default]
    Global,
    Message,
}

impl IsolatedScope {
    pub fn parse(raw: &str) -> Option<IsolatedScope> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "global" => Some(IsolatedScope::Global),
            "message" | "per-message" => Some(IsolatedScope::Message),
            _ => None,
        }
    }
}

/// Somewhere messages come from. Only the built-in seed exists today; a real
/// mail backend would implement this.
pub trait MessageSource {
    fn load(&self) -> Result<Vec<Message>>;
}

pub struct SeedSource;

impl MessageSource for SeedSource {
    fn load(&self) -> Result<Vec<Message>> {
        Ok(seed_messages())
    }
}

pub fn seed_messages() -> Vec<Message> {
    vec![
        Message {
            id: "1".to_string(),
            from: "security@company.com".to_string(),
            subject: "Important Security Update".to_string(),
            preview: "We have detected unusual activity...".to_string(),
            date: "10:30 AM".to_string(),
            read: false,
            starred: true,
            body: "Please review the security report and attached documents carefully."
                .to_string(),
            urls: vec![
                "https://security-report.example.com".to_string(),
                "https://update.example.com".to_string(),
            ],
            attachments: vec![
                Attachment {
                    name: "security-report.pdf".to_string(),
                    media_type: "application/pdf".to_string(),
                    size: "2.4 MB".to_string(),
                },
                Attachment {
                    name: "update-instructions.docx".to_string(),
                    media_type: "document".to_string(),
                    size: "1.1 MB".to_string(),
                },
            ],
        },
        Message {
            id: "2".to_string(),
            from: "team@project.com".to_string(),
            subject: "Project Timeline Update".to_string(),
            preview: "Here are the latest changes to our timeline...".to_string(),
            date: "9:15 AM".to_string(),
            read: true,
            starred: false,
            body: "Please review the updated project timeline and resources.".to_string(),
            urls: vec!["https://project-timeline.example.com".to_string()],
            attachments: vec![Attachment {
                name: "timeline-v2.xlsx".to_string(),
                media_type: "spreadsheet".to_string(),
                size: "856 KB".to_string(),
            }],
        },
    ]
}

/// Read-only message collection for one session.
#[derive(Debug, Clone)]
pub struct Mailbox {
    messages: Vec<Message>,
}

impl Mailbox {
    pub fn new(messages: Vec<Message>) -> Result<Self> {
        for (idx, message) in messages.iter().enumerate() {
            if messages[..idx].iter().any(|m| m.id == message.id) {
                bail!("duplicate message id '{}'", message.id);
            }
        }
        Ok(Self { messages })
    }

    pub fn from_source(source: &dyn MessageSource) -> Result<Self> {
        Self::new(source.load()?)
    }

    pub fn seed() -> Self {
        Self {
            messages: seed_messages(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Folders are not wired to any filtering, so every folder holds every message.
    pub fn messages_in(&self, _folder: Folder) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    ViewUrl(String),
    PreviewAttachment(Attachment),
}

impl DetailAction {
    pub fn label(&self) -> &'static str {
        match self {
            DetailAction::ViewUrl(_) => "View Safely",
            DetailAction::PreviewAttachment(_) => "Preview Safely",
        }
    }
}

/// Actions offered by the normal detail panel: URLs first, then attachments.
pub fn detail_actions(message: &Message) -> Vec<DetailAction> {
    message
        .urls
        .iter()
        .cloned()
        .map(DetailAction::ViewUrl)
        .chain(
            message
                .attachments
                .iter()
                .cloned()
                .map(DetailAction::PreviewAttachment),
        )
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPanel<'a> {
    Hidden,
    Normal(&'a Message),
    Isolated(Option<&'a IsolatedContent>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerState {
    pub folder: Folder,
    pub selected: Option<String>,
    pub isolated_view: bool,
    pub isolated: Option<IsolatedContent>,
    #[serde(default)]
    pub scope: IsolatedScope,
}

impl ViewerState {
    pub fn new(scope: IsolatedScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    pub fn select_folder(&mut self, folder: Folder) {
        self.folder = folder;
    }

    /// Returns false and leaves the selection alone when `id` is not in `mailbox`.
    pub fn select_message(&mut self, mailbox: &Mailbox, id: &str) -> bool {
        if mailbox.get(id).is_none() {
            log_debug(&format!("select ignored unknown message id={}", id));
            return false;
        }
        let changed = self.selected.as_deref() != Some(id);
        if changed && self.scope == IsolatedScope::Message {
            self.isolated_view = false;
            self.isolated = None;
        }
        self.selected = Some(id.to_string());
        true
    }

    pub fn open_isolated(&mut self, kind: IsolatedKind, content: impl Into<String>) {
        self.isolated = Some(IsolatedContent {
            kind,
            content: content.into(),
        });
        self.isolated_view = true;
    }

    pub fn view_url(&mut self, url: &str) {
        self.open_isolated(IsolatedKind::Url, url);
    }

    pub fn preview_attachment(&mut self, attachment: &Attachment) {
        self.open_isolated(IsolatedKind::Attachment, attachment.name.as_str());
    }

    pub fn apply_action(&mut self, action: &DetailAction) {
        match action {
            DetailAction::ViewUrl(url) => self.view_url(url),
            DetailAction::PreviewAttachment(attachment) => self.preview_attachment(attachment),
        }
    }

    /// Leaves the descriptor in place; only the flag is cleared.
    pub fn close_isolated(&mut self) {
        self.isolated_view = false;
    }

    pub fn selected_message<'a>(&self, mailbox: &'a Mailbox) -> Option<&'a Message> {
        self.selected.as_deref().and_then(|id| mailbox.get(id))
    }

    pub fn detail_panel<'a>(&'a self, mailbox: &'a Mailbox) -> DetailPanel<'a> {
        let Some(message) = self.selected_message(mailbox) else {
            return DetailPanel::Hidden;
        };
        if self.isolated_view {
            DetailPanel::Isolated(self.isolated.as_ref())
        } else {
            DetailPanel::Normal(message)
        }
    }
}

static LOG_FILE: OnceLock<Mutex<Option<std::fs::File>>> = OnceLock::new();

pub fn log_debug(msg: &str) {
    if std::env::var("SECUREMAIL_LOG").is_err() {
        return;
    }
    let base = std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
        })
        .unwrap_or_else(|| PathBuf::from("/tmp"));
    let path = base.join("securemail").join("securemail.log");
    let lock = LOG_FILE.get_or_init(|| {
        let _ = std::fs::create_dir_all(
            path.parent()
                .unwrap_or_else(|| std::path::Path::new("/tmp")),
        );
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .ok();
        Mutex::new(file)
    });
    if let Ok(mut guard) = lock.lock() {
        if let Some(file) = guard.as_mut() {
            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            let _ = writeln!(file, "[{}] {}", ts, msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Attachment, DetailAction, DetailPanel, Folder, IsolatedContent, IsolatedKind,
        IsolatedScope, Mailbox, Message, SeedSource, ViewerState, detail_actions,
    };

    fn plain_message(id: &str) -> Message {
        Message {
            id: id.to_string(),
            from: format!("sender{}@example.com", id),
            subject: format!("Subject {}", id),
            preview: String::new(),
            date: "noon".to_string(),
            read: true,
            starred: false,
            body: "hello".to_string(),
            urls: Vec::new(),
            attachments: Vec::new(),
        }
    }

    #[test]
    fn seed_matches_builtin_dataset() {
        let mailbox = Mailbox::from_source(&SeedSource).unwrap();
        let ids: Vec<&str> = mailbox.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);

        let first = mailbox.get("1").unwrap();
        assert_eq!(first.from, "security@company.com");
        assert_eq!(first.urls.len(), 2);
        assert_eq!(first.attachments.len(), 2);
        assert!(!first.read);
        assert!(first.starred);

        let second = mailbox.get("2").unwrap();
        assert_eq!(second.urls, vec!["https://project-timeline.example.com"]);
        assert_eq!(second.attachments.len(), 1);
        assert_eq!(second.attachments[0].name, "timeline-v2.xlsx");
        assert_eq!(second.attachments[0].size, "856 KB");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Mailbox::new(vec![plain_message("a"), plain_message("a")]).unwrap_err();
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn folder_selection_never_filters_messages() {
        let mailbox = Mailbox::seed();
        let mut state = ViewerState::default();
        assert_eq!(state.folder, Folder::Inbox);
        for folder in Folder::ALL {
            state.select_folder(folder);
            assert_eq!(state.folder, folder);
            assert_eq!(mailbox.messages_in(state.folder), mailbox.messages());
        }
    }

    #[test]
    fn folder_parse_accepts_ids_case_insensitively() {
        assert_eq!(Folder::parse("Trash"), Some(Folder::Trash));
        assert_eq!(Folder::parse(" starred "), Some(Folder::Starred));
        assert_eq!(Folder::parse("drafts"), None);
        assert_eq!(Folder::from_index(1), Some(Folder::Sent));
        assert_eq!(Folder::Trash.index(), 3);
    }

    #[test]
    fn selecting_message_shows_normal_panel() {
        let mailbox = Mailbox::seed();
        let mut state = ViewerState::default();
        assert_eq!(state.detail_panel(&mailbox), DetailPanel::Hidden);

        assert!(state.select_message(&mailbox, "2"));
        match state.detail_panel(&mailbox) {
            DetailPanel::Normal(message) => {
                assert_eq!(message.subject, "Project Timeline Update");
                assert!(message.read);
            }
            other => panic!("unexpected panel: {:?}", other),
        }
    }

    #[test]
    fn unknown_ids_do_not_change_selection() {
        let mailbox = Mailbox::seed();
        let mut state = ViewerState::default();
        assert!(state.select_message(&mailbox, "1"));
        assert!(!state.select_message(&mailbox, "99"));
        assert_eq!(state.selected.as_deref(), Some("1"));
    }

    #[test]
    fn dangling_selection_renders_nothing() {
        let mailbox = Mailbox::seed();
        let state = ViewerState {
            selected: Some("gone".to_string()),
            ..ViewerState::default()
        };
        assert_eq!(state.detail_panel(&mailbox), DetailPanel::Hidden);
    }

    #[test]
    fn view_url_round_trip_keeps_url_verbatim() {
        let mailbox = Mailbox::seed();
        let mut state = ViewerState::default();
        state.select_message(&mailbox, "1");
        state.view_url("https://update.example.com");

        let expected = IsolatedContent {
            kind: IsolatedKind::Url,
            content: "https://update.example.com".to_string(),
        };
        assert_eq!(
            state.detail_panel(&mailbox),
            DetailPanel::Isolated(Some(&expected))
        );
        assert_eq!(expected.kind.heading(), "URL Preview");

        state.close_isolated();
        assert!(!state.isolated_view);
        assert!(matches!(state.detail_panel(&mailbox), DetailPanel::Normal(_)));
        // descriptor is left behind on close
        assert_eq!(state.isolated, Some(expected));
    }

    #[test]
    fn preview_attachment_uses_file_name_only() {
        let mut state = ViewerState::default();
        let attachment = Attachment {
            name: "security-report.pdf".to_string(),
            media_type: "application/pdf".to_string(),
            size: "2.4 MB".to_string(),
        };
        state.preview_attachment(&attachment);
        let isolated = state.isolated.clone().unwrap();
        assert!(state.isolated_view);
        assert_eq!(isolated.kind, IsolatedKind::Attachment);
        assert_eq!(isolated.content, "security-report.pdf");
        assert_eq!(isolated.kind.heading(), "File Preview");
    }

    #[test]
    fn global_scope_keeps_isolated_view_across_messages() {
        let mailbox = Mailbox::seed();
        let mut state = ViewerState::new(IsolatedScope::Global);
        state.select_message(&mailbox, "1");
        state.view_url("https://security-report.example.com");
        state.select_message(&mailbox, "2");
        assert!(state.isolated_view);
        assert_eq!(
            state.isolated.as_ref().map(|c| c.content.as_str()),
            Some("https://security-report.example.com")
        );
    }

    #[test]
    fn message_scope_resets_isolated_view_on_switch() {
        let mailbox = Mailbox::seed();
        let mut state = ViewerState::new(IsolatedScope::Message);
        state.select_message(&mailbox, "1");
        state.view_url("https://update.example.com");

        state.select_message(&mailbox, "1");
        assert!(state.isolated_view, "reselecting the same message keeps the view");

        state.select_message(&mailbox, "2");
        assert!(!state.isolated_view);
        assert!(state.isolated.is_none());
    }

    #[test]
    fn detail_actions_list_urls_before_attachments() {
        let mailbox = Mailbox::seed();
        let actions = detail_actions(mailbox.get("1").unwrap());
        let labels: Vec<&str> = actions.iter().map(DetailAction::label).collect();
        assert_eq!(
            labels,
            vec!["View Safely", "View Safely", "Preview Safely", "Preview Safely"]
        );
        assert!(detail_actions(&plain_message("x")).is_empty());

        let mut state = ViewerState::default();
        state.apply_action(&actions[3]);
        assert_eq!(
            state.isolated.map(|c| c.content),
            Some("update-instructions.docx".to_string())
        );
    }

    #[test]
    fn viewer_state_round_trips_through_json() {
        let mailbox = Mailbox::seed();
        let mut state = ViewerState::default();
        state.select_folder(Folder::Starred);
        state.select_message(&mailbox, "1");
        state.view_url("https://update.example.com");

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"folder\":\"starred\""));
        assert!(json.contains("\"kind\":\"url\""));
        let back: ViewerState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
