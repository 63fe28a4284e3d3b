//! Settings screen session
//!
//! A [`Session`] owns everything one open settings screen needs: the
//! cascade editor, the tag and document-type tables, and the router. Hosts
//! drive it with [`Request`] values (or their JSON form, one per line) and
//! render from the returned [`Response`].

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::editor::{CascadeEditor, Command, EditorView, Response};
use crate::nav::{NavView, Router};
use crate::records::{PageView, RecordTable, seed};
use crate::{NameplateError, Result};

/// Operation on a record table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TableCommand {
    Create {
        name: String,
        #[serde(default)]
        chips: Vec<String>,
    },
    Update {
        id: u64,
        name: String,
        #[serde(default)]
        chips: Vec<String>,
    },
    Delete { id: u64 },
    Get { id: u64 },
    Page,
    NextPage,
    PrevPage,
    SetPage { page: usize },
    ToggleSort,
}

/// Operation on the router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum NavCommand {
    Navigate { route: String },
    ToggleSubmenu,
    Current,
}

/// One request addressed to a part of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "request", rename_all = "snake_case")]
pub enum Request {
    Catalog(Command),
    Tags(TableCommand),
    DocTypes(TableCommand),
    Nav(NavCommand),
}

impl Request {
    /// Target name for logs
    #[must_use]
    pub const fn target(&self) -> &'static str {
        match self {
            Self::Catalog(_) => "catalog",
            Self::Tags(_) => "tags",
            Self::DocTypes(_) => "doc_types",
            Self::Nav(_) => "nav",
        }
    }
}

/// Render-ready state of the whole screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub nav: NavView,
    pub catalog: EditorView,
    pub tags: PageView,
    pub doc_types: PageView,
}

/// State of one settings screen
#[derive(Debug)]
pub struct Session {
    editor: CascadeEditor,
    tags: RecordTable,
    doc_types: RecordTable,
    router: Router,
}

impl Session {
    /// Build a session from configuration, with seeded tables
    ///
    /// # Errors
    /// Returns an error if the configured seed catalog is inconsistent.
    pub fn new(config: &EditorConfig) -> Result<Self> {
        let session = Self {
            editor: CascadeEditor::from_config(config)?,
            tags: seed::tag_table(config),
            doc_types: seed::doc_type_table(config),
            router: Router::new(),
        };
        info!(
            types = session.editor.store().len(),
            tags = session.tags.len(),
            doc_types = session.doc_types.len(),
            "session started"
        );
        Ok(session)
    }

    #[must_use]
    pub const fn editor(&self) -> &CascadeEditor {
        &self.editor
    }

    #[must_use]
    pub const fn tags(&self) -> &RecordTable {
        &self.tags
    }

    #[must_use]
    pub const fn doc_types(&self) -> &RecordTable {
        &self.doc_types
    }

    #[must_use]
    pub const fn router(&self) -> &Router {
        &self.router
    }

    /// Handle one request
    pub fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::Catalog(command) => self.editor.apply(command),
            Request::Tags(command) => table_response(&mut self.tags, command),
            Request::DocTypes(command) => table_response(&mut self.doc_types, command),
            Request::Nav(command) => Response::from_result(self.navigate(command)),
        }
    }

    /// Parse and handle one JSON request
    ///
    /// A line that does not parse yields an `InvalidRequest` failure.
    pub fn handle_line(&mut self, line: &str) -> Response {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => {
                debug!(target_name = request.target(), "handling request");
                self.handle(request)
            }
            Err(err) => {
                warn!(error = %err, "unparseable request");
                Response::failure(&NameplateError::Json(err))
            }
        }
    }

    /// Render-ready state of the whole screen
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            nav: self.router.snapshot(),
            catalog: self.editor.view(),
            tags: self.tags.page(),
            doc_types: self.doc_types.page(),
        }
    }

    fn navigate(&mut self, command: NavCommand) -> Result<Value> {
        match command {
            NavCommand::Navigate { route } => {
                if !self.router.navigate(&route) {
                    return Err(NameplateError::InvalidInput(format!("unknown route '{route}'")));
                }
            }
            NavCommand::ToggleSubmenu => {
                self.router.toggle_submenu();
            }
            NavCommand::Current => {}
        }
        Ok(serde_json::to_value(self.router.snapshot())?)
    }
}

fn table_response(table: &mut RecordTable, command: TableCommand) -> Response {
    let result = run_table(table, command);
    if let Err(err) = &result {
        warn!(table = table.label(), kind = %err.kind(), error = %err.message(), "table command rejected");
    }
    Response::from_result(result)
}

fn run_table(table: &mut RecordTable, command: TableCommand) -> Result<Value> {
    let data = match command {
        TableCommand::Create { name, chips } => serde_json::to_value(table.create(&name, &chips)?)?,
        TableCommand::Update { id, name, chips } => {
            serde_json::to_value(table.update(id, &name, &chips)?)?
        }
        TableCommand::Delete { id } => serde_json::to_value(table.delete(id)?)?,
        TableCommand::Get { id } => serde_json::to_value(table.get(id)?)?,
        TableCommand::Page => serde_json::to_value(table.page())?,
        TableCommand::NextPage => {
            table.next_page();
            serde_json::to_value(table.page())?
        }
        TableCommand::PrevPage => {
            table.prev_page();
            serde_json::to_value(table.page())?
        }
        TableCommand::SetPage { page } => {
            table.set_page(page);
            serde_json::to_value(table.page())?
        }
        TableCommand::ToggleSort => json!({ "sort": table.toggle_sort() }),
    };
    Ok(data)
}
