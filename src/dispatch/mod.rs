//! Menu action registration and routing
//!
//! Actions are identified by [`ActionId`]. Each id is bound to one
//! [`ActionHandler`] through [`Dispatcher::register_handler`]; invoking an
//! action looks the handler up and calls it.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::host::{MenuContext, MenuHost, MenuItem};

pub mod handlers;

pub use handlers::{ReportScamHandler, ScanLinkHandler};

/// User-invokable actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    ReportScam,
    ScanLink,
}

impl ActionId {
    /// All actions, in menu order
    pub const ALL: [ActionId; 2] = [ActionId::ReportScam, ActionId::ScanLink];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::ReportScam => "report-scam",
            ActionId::ScanLink => "scan-link",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ActionId::ReportScam => "Report a Scam",
            ActionId::ScanLink => "Scan this link with VirusTotal",
        }
    }

    pub fn context(&self) -> MenuContext {
        match self {
            ActionId::ReportScam => MenuContext::All,
            ActionId::ScanLink => MenuContext::Link,
        }
    }

    fn menu_item(&self) -> MenuItem {
        MenuItem {
            id: self.as_str().to_string(),
            title: self.title().to_string(),
            context: self.context(),
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionId {
    type Err = Error;

    /// Accepts the kebab-case ids and the legacy extension ids.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "report-scam" | "reportScam" => Ok(ActionId::ReportScam),
            "scan-link" | "scanUrl" => Ok(ActionId::ScanLink),
            other => Err(Error::Other(format!("Unknown action id: {}", other))),
        }
    }
}

/// Event context delivered with an invoked action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionContext {
    /// Target hyperlink, when the action was invoked on a link
    pub link_url: Option<String>,
}

impl ActionContext {
    pub fn for_link(url: impl Into<String>) -> Self {
        Self {
            link_url: Some(url.into()),
        }
    }
}

/// Handles one kind of action
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn handle(&self, context: &ActionContext) -> Result<()>;
}

/// How an invocation was routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// A handler ran
    Handled(ActionId),
    /// Known action with no handler bound
    Unhandled(ActionId),
    /// Unrecognised action id
    Unknown,
}

/// Registers menu actions and routes invocations to their handlers
pub struct Dispatcher {
    menu: Arc<dyn MenuHost>,
    handlers: HashMap<ActionId, Arc<dyn ActionHandler>>,
}

impl Dispatcher {
    pub fn new(menu: Arc<dyn MenuHost>) -> Self {
        Self {
            menu,
            handlers: HashMap::new(),
        }
    }

    /// Bind a handler to an action, replacing any previous one
    pub fn register_handler(&mut self, action: ActionId, handler: Arc<dyn ActionHandler>) {
        self.handlers.insert(action, handler);
    }

    /// Declare every action on the host menu.
    ///
    /// Existing entries are removed first, so repeated calls never leave
    /// duplicates behind.
    pub fn register_actions(&self) -> Result<()> {
        for action in ActionId::ALL {
            self.menu.remove(action.as_str())?;
        }
        for action in ActionId::ALL {
            self.menu.create(action.menu_item())?;
        }
        log::debug!("Registered {} menu actions", ActionId::ALL.len());
        Ok(())
    }

    /// Route an invoked action. Unknown ids are ignored.
    pub async fn on_action_invoked(&self, action_id: &str, context: &ActionContext) -> Invocation {
        log::debug!("Action invoked: {} {:?}", action_id, context);

        let action = match action_id.parse::<ActionId>() {
            Ok(action) => action,
            Err(_) => {
                log::debug!("Ignoring unknown action {}", action_id);
                return Invocation::Unknown;
            }
        };

        let Some(handler) = self.handlers.get(&action) else {
            log::warn!("No handler registered for {}", action);
            return Invocation::Unhandled(action);
        };

        if let Err(e) = handler.handle(context).await {
            log::error!("Handler for {} failed: {}", action, e);
        }
        Invocation::Handled(action)
    }
}
