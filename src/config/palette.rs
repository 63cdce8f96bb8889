use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Behaviour of the palette front end.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PaletteSettings {
    /// Fold leading argument tokens that name a subcommand into the command
    /// path, so `git commit -m x` resolves to `git.commit`.
    #[serde(default = "default_resolve_subcommands")]
    pub resolve_subcommands: bool,

    /// Maximum number of history entries kept. Unbounded when absent.
    #[serde(default)]
    pub history_limit: Option<usize>,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            resolve_subcommands: default_resolve_subcommands(),
            history_limit: None,
        }
    }
}

fn default_resolve_subcommands() -> bool {
    true
}
