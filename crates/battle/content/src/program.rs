//! Rule programs as authored: trigger and action ids, not resolved values.

/// One authored protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolSpec {
    pub trigger: String,
    pub action: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    #[cfg_attr(feature = "serde", serde(default = "enabled_by_default"))]
    pub enabled: bool,
}

#[cfg(feature = "serde")]
fn enabled_by_default() -> bool {
    true
}

impl ProtocolSpec {
    pub fn new(trigger: impl Into<String>, action: impl Into<String>, priority: i32) -> Self {
        Self {
            trigger: trigger.into(),
            action: action.into(),
            priority,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// An authored rule program.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgramSpec {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub protocols: Vec<ProtocolSpec>,
}

impl ProgramSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            protocols: Vec::new(),
        }
    }

    pub fn with(mut self, protocol: ProtocolSpec) -> Self {
        self.protocols.push(protocol);
        self
    }
}
