use serde::{Deserialize, Serialize};

use crate::handle::SlotId;
use crate::transaction::{Transition, DEFAULT_TAG};

/// Controller configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Container slot used when options do not name one.
    #[serde(default)]
    pub default_slot: Option<i32>,
    /// Tag used when neither options nor the handle carry one.
    #[serde(default = "default_tag")]
    pub default_tag: String,
    /// Trace every recorded transaction op (default: false).
    #[serde(default)]
    pub log_transactions: bool,
    /// Enable the options menu of an existing unit kept by a
    /// `replace_same = false` show (default: true).
    #[serde(default = "default_enable_menu_on_existing")]
    pub enable_menu_on_existing: bool,
    /// Named transition presets.
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

fn default_enable_menu_on_existing() -> bool {
    true
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_slot: None,
            default_tag: default_tag(),
            log_transactions: false,
            enable_menu_on_existing: default_enable_menu_on_existing(),
            transitions: Vec::new(),
        }
    }
}

impl ControllerConfig {
    pub fn with_default_slot(mut self, slot: SlotId) -> Self {
        self.default_slot = Some(slot.0);
        self
    }

    pub fn default_slot(&self) -> Option<SlotId> {
        self.default_slot.map(SlotId)
    }

    /// Look up a transition preset by name.
    pub fn transition(&self, name: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.name == name)
    }
}
