//! Show/hide state and its resolution against the parent

use serde::{Deserialize, Serialize};

/// Explicit visibility setting of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    /// Always culled
    Hide,
    /// Never culled, even below a hidden parent
    Show,
    /// Culled exactly when the parent is
    #[default]
    Inherit,
}

/// A node's cull mode and the flag resolved from it
///
/// The resolved flag is only meaningful right after a resolve pass. Changing
/// the mode leaves the previous flag in place until the next pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalCullState {
    mode: CullMode,
    culled: Option<bool>,
}

impl LocalCullState {
    /// Unresolved state with the given mode
    pub fn new(mode: CullMode) -> Self {
        Self { mode, culled: None }
    }

    /// Current mode
    pub fn mode(&self) -> CullMode {
        self.mode
    }

    /// Change the mode, taking effect on the next resolve
    pub fn set(&mut self, mode: CullMode) {
        self.mode = mode;
    }

    /// Forget the resolved flag
    pub fn invalidate(&mut self) {
        self.culled = None;
    }

    /// Resolve the culled flag against the parent's resolved flag
    ///
    /// A node without a parent that inherits resolves to not culled.
    pub fn update(&mut self, parent_culled: Option<bool>) -> bool {
        let culled = match self.mode {
            CullMode::Hide => true,
            CullMode::Show => false,
            CullMode::Inherit => parent_culled.unwrap_or(false),
        };
        self.culled = Some(culled);
        culled
    }

    /// The resolved flag, `None` before the first resolve
    pub fn culled(&self) -> Option<bool> {
        self.culled
    }
}
