//! Click dispatch.
//!
//! Every activated button hands its resolved action identifier to a
//! [`Dispatcher`]. Identifiers starting with `nav_to:` drive screen
//! navigation locally; everything else is forwarded to the business layer
//! through an [`EventSink`] and never awaited.

use std::rc::Rc;

use crate::error::DispatchError;
use crate::state::{
    DEFAULT_CREDENTIAL_FIELD, LOGIN_ERROR, PASSWORD_MIRROR_KEY, SCREEN_LOGIN, SCREEN_START,
    StateStore,
};

pub const NAV_PREFIX: &str = "nav_to:";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavTarget {
    Start,
    Login,
    /// Parsed but not routable; navigating to it changes nothing.
    Other(String),
}

impl NavTarget {
    pub fn parse(s: &str) -> NavTarget {
        match s {
            "start" => NavTarget::Start,
            "login" => NavTarget::Login,
            other => NavTarget::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NavTarget::Start => "start",
            NavTarget::Login => "login",
            NavTarget::Other(s) => s,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Navigate(NavTarget),
    Forward(String),
}

impl Action {
    pub fn parse(event_id: &str) -> Action {
        if event_id.is_empty() {
            Action::None
        } else if let Some(target) = event_id.strip_prefix(NAV_PREFIX) {
            Action::Navigate(NavTarget::parse(target))
        } else {
            Action::Forward(event_id.to_string())
        }
    }
}

/// Gate for leaving the login screen.
pub trait CredentialCheck {
    fn check(&self, candidate: &str) -> bool;
}

impl<F> CredentialCheck for F
where
    F: Fn(&str) -> bool,
{
    fn check(&self, candidate: &str) -> bool {
        self(candidate)
    }
}

/// Compares against one fixed secret. Suitable for demos and kiosks only;
/// real deployments plug in their own [`CredentialCheck`].
#[derive(Clone, Debug)]
pub struct FixedCredential {
    expected: String,
}

impl FixedCredential {
    pub const DEMO_SECRET: &'static str = "password123#";

    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl Default for FixedCredential {
    fn default() -> Self {
        Self::new(Self::DEMO_SECRET)
    }
}

impl CredentialCheck for FixedCredential {
    fn check(&self, candidate: &str) -> bool {
        candidate == self.expected
    }
}

/// Outbound channel to the business layer. Implementations must not block:
/// the dispatcher fires and forgets.
pub trait EventSink {
    fn forward(&self, event_id: &str) -> Result<(), DispatchError>;
}

#[derive(Clone, Debug)]
pub struct DispatchConfig {
    /// Input the login gate reads the candidate password from.
    pub credential_field: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            credential_field: DEFAULT_CREDENTIAL_FIELD.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Empty identifier.
    Ignored,
    Navigated(NavTarget),
    /// Unroutable target; the login gate (if any) already ran.
    NavigationIgnored(String),
    LoginRejected,
    Forwarded(String),
    ForwardFailed(String),
    /// No business layer attached; the event was dropped.
    NoSink(String),
}

#[derive(Clone)]
pub struct Dispatcher {
    store: StateStore,
    credentials: Rc<dyn CredentialCheck>,
    sink: Option<Rc<dyn EventSink>>,
    config: Rc<DispatchConfig>,
}

impl Dispatcher {
    pub fn new(store: StateStore) -> Self {
        Self {
            store,
            credentials: Rc::new(FixedCredential::default()),
            sink: None,
            config: Rc::new(DispatchConfig::default()),
        }
    }

    pub fn with_credentials(mut self, check: impl CredentialCheck + 'static) -> Self {
        self.credentials = Rc::new(check);
        self
    }

    pub fn with_sink(mut self, sink: Rc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = Rc::new(config);
        self
    }

    pub fn set_sink(&mut self, sink: Option<Rc<dyn EventSink>>) {
        self.sink = sink;
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn click(&self, event_id: &str) -> DispatchOutcome {
        match Action::parse(event_id) {
            Action::None => DispatchOutcome::Ignored,
            Action::Navigate(target) => self.navigate(target),
            Action::Forward(id) => self.forward(id),
        }
    }

    fn navigate(&self, target: NavTarget) -> DispatchOutcome {
        let on_login = self.store.flag(SCREEN_LOGIN) == Some(true);

        if on_login && target != NavTarget::Login {
            let candidate = self.candidate_password();
            if !self.credentials.check(candidate.trim()) {
                log::info!("login rejected");
                self.store.set_flag(LOGIN_ERROR, true);
                return DispatchOutcome::LoginRejected;
            }
            self.store.set_flag(LOGIN_ERROR, false);
        }

        match target {
            NavTarget::Start => {
                self.store.set_flag(SCREEN_LOGIN, false);
                self.store.set_flag(SCREEN_START, true);
            }
            NavTarget::Login => {
                self.store.set_flag(SCREEN_LOGIN, true);
                self.store.set_flag(SCREEN_START, false);
                self.store.set_flag(LOGIN_ERROR, false);
            }
            NavTarget::Other(name) => {
                log::debug!("no route for nav target '{name}'");
                return DispatchOutcome::NavigationIgnored(name);
            }
        }
        log::debug!("navigated to {}", target.as_str());
        DispatchOutcome::Navigated(target)
    }

    /// The configured field, else the mirror key, else empty.
    fn candidate_password(&self) -> String {
        self.store
            .input(&self.config.credential_field)
            .or_else(|| self.store.input(PASSWORD_MIRROR_KEY))
            .unwrap_or_default()
    }

    fn forward(&self, id: String) -> DispatchOutcome {
        let Some(sink) = &self.sink else {
            log::debug!("no event sink attached; dropping '{id}'");
            return DispatchOutcome::NoSink(id);
        };
        match sink.forward(&id) {
            Ok(()) => DispatchOutcome::Forwarded(id),
            Err(e) => {
                log::warn!("forwarding '{id}' failed: {e}");
                DispatchOutcome::ForwardFailed(id)
            }
        }
    }
}
