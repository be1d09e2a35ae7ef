use serde::{Deserialize, Serialize};

use crate::types::Provider;

/// What the user can do with a chosen provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Open,
    Copy,
    Share,
    Back
}

impl Action {
    /// Action sheet order
    pub const ALL: [Action; 4] = [Action::Open, Action::Copy, Action::Share, Action::Back];

    /// Untranslated title; hosts localize it
    pub fn title(self) -> &'static str {
        match self {
            Action::Open => "Open",
            Action::Copy => "Copy",
            Action::Share => "Share",
            Action::Back => "Back",
        }
    }
}

/// Kind of device the host runs on, picks which app deep link applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    Mobile,
    Desktop
}

/// What the host reports back after the user picks a provider and an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub action: Action,
    pub provider: Provider
}

impl Selection {
    pub fn new(action: Action, provider: Provider) -> Self {
        Self { action, provider }
    }

    /// Url to open, copy or share. `Back` returns to the provider picker
    /// and has nothing to act on.
    pub fn target(&self) -> Option<&str> {
        match self.action {
            Action::Back => None,
            _ => Some(self.provider.url.as_str())
        }
    }

    /// Like `target`, but `Open` prefers the provider's app deep link for
    /// `device` when the lookup returned one. Copy and Share keep the web
    /// url since it works for whoever receives it.
    pub fn target_for(&self, device: Device) -> Option<&str> {
        if self.action != Action::Open {
            return self.target();
        }
        let app_uri = match device {
            Device::Mobile => self.provider.native_app_uri_mobile.as_deref(),
            Device::Desktop => self.provider.native_app_uri_desktop.as_deref(),
        };
        app_uri.or(self.target())
    }
}
