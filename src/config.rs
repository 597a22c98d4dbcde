//! Menu definition files.
//!
//! A menu file is JSON: a list of variables (name, kind, initial value)
//! and a list of named layouts whose labels refer to layouts and
//! variables by name. Loading is two-phase: every layout is created
//! first, then links are resolved, so files may describe cycles freely.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::cell::{Kind, VariableCell};
use crate::error::ConfigError;
use crate::label::{Label, LabelStyle, TextStyle};
use crate::layout::{Layout, LayoutId, Menu};
use crate::navigator::{DEFAULT_LOG_COLUMN, DEFAULT_LOG_LENGTH};
use crate::theme;

/// Menu file name inside the config directory.
const MENU_FILENAME: &str = "menu.json";

// ============================================================================
// FILE FORMAT
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MenuConfig {
    /// Layout to start on. Defaults to the first one.
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default = "default_log_length")]
    pub debug_log_length: usize,
    #[serde(default = "default_log_column")]
    pub debug_log_column: u16,
    #[serde(default)]
    pub variables: Vec<VariableConfig>,
    pub layouts: Vec<LayoutConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariableConfig {
    pub name: String,
    /// Type name, e.g. `"bool"`, `"f32"` or `"uint8_t"`.
    pub kind: String,
    #[serde(default)]
    pub initial: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub labels: Vec<LabelConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelConfig {
    pub title: String,
    #[serde(default)]
    pub text: String,
    /// Name of the layout entered from this label.
    #[serde(default)]
    pub next: Option<String>,
    /// Name of the bound variable.
    #[serde(default)]
    pub variable: Option<String>,
    #[serde(default)]
    pub style: StyleConfig,
}

/// Partial label style; missing states keep the theme default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub normal: Option<TextStyle>,
    #[serde(default)]
    pub selected: Option<TextStyle>,
}

fn default_log_length() -> usize {
    DEFAULT_LOG_LENGTH
}

fn default_log_column() -> u16 {
    DEFAULT_LOG_COLUMN
}

impl StyleConfig {
    fn resolve(&self) -> LabelStyle {
        LabelStyle {
            normal: self.normal.unwrap_or(theme::STYLE_NORMAL),
            selected: self.selected.unwrap_or(theme::STYLE_SELECTED),
        }
    }
}

// ============================================================================
// ASSEMBLED MENU
// ============================================================================

/// A menu built from a file, together with the storage it binds to.
#[derive(Debug)]
pub struct LoadedMenu {
    pub menu: Menu,
    pub start: LayoutId,
    pub variables: BTreeMap<String, VariableCell>,
    pub debug_log_length: usize,
    pub debug_log_column: u16,
}

/// Default menu file: `<config dir>/termenu/menu.json`.
pub fn default_menu_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("termenu")
        .join(MENU_FILENAME)
}

/// Read and assemble a menu file.
pub fn load_menu(path: &Path) -> Result<LoadedMenu, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: MenuConfig = serde_json::from_str(&contents)?;
    debug!(path = %path.display(), layouts = config.layouts.len(), "menu file parsed");
    config.build()
}

impl MenuConfig {
    /// Allocate variables, create layouts, then resolve links.
    pub fn build(&self) -> Result<LoadedMenu, ConfigError> {
        if self.layouts.is_empty() {
            return Err(ConfigError::EmptyMenu);
        }

        let mut variables = BTreeMap::new();
        for var in &self.variables {
            let cell = var
                .kind
                .parse::<Kind>()
                .and_then(|kind| VariableCell::allocate(kind, var.initial.as_deref()))
                .map_err(|source| ConfigError::Variable {
                    name: var.name.clone(),
                    source,
                })?;
            if variables.insert(var.name.clone(), cell).is_some() {
                return Err(ConfigError::DuplicateVariable(var.name.clone()));
            }
        }

        // Phase 1: every layout gets an id
        let mut menu = Menu::new();
        let mut ids: HashMap<&str, LayoutId> = HashMap::new();
        for layout in &self.layouts {
            let labels = layout
                .labels
                .iter()
                .map(|label| build_label(label, &variables))
                .collect::<Result<Vec<_>, _>>()?;
            let built = match &layout.title {
                Some(title) => Layout::titled(title.clone(), labels),
                None => Layout::new(labels),
            };
            let id = menu.add(built);
            if ids.insert(layout.name.as_str(), id).is_some() {
                return Err(ConfigError::DuplicateLayout(layout.name.clone()));
            }
        }

        // Phase 2: links, now that every target exists
        for layout in &self.layouts {
            let from = ids[layout.name.as_str()];
            for (index, label) in layout.labels.iter().enumerate() {
                if let Some(next) = &label.next {
                    let to = *ids
                        .get(next.as_str())
                        .ok_or_else(|| ConfigError::UnknownLayout(next.clone()))?;
                    menu.link(from, index, to)
                        .map_err(|_| ConfigError::UnknownLayout(next.clone()))?;
                }
            }
        }

        let start = match &self.start {
            Some(name) => *ids
                .get(name.as_str())
                .ok_or_else(|| ConfigError::UnknownLayout(name.clone()))?,
            None => ids[self.layouts[0].name.as_str()],
        };

        Ok(LoadedMenu {
            menu,
            start,
            variables,
            debug_log_length: self.debug_log_length,
            debug_log_column: self.debug_log_column,
        })
    }
}

fn build_label(
    config: &LabelConfig,
    variables: &BTreeMap<String, VariableCell>,
) -> Result<Label, ConfigError> {
    let mut label = Label::new(config.title.clone(), config.text.clone())
        .with_style(config.style.resolve());
    if let Some(name) = &config.variable {
        let cell = variables
            .get(name)
            .ok_or_else(|| ConfigError::UnknownVariable(name.clone()))?;
        label.set_variable(cell.clone());
    }
    Ok(label)
}

// ============================================================================
// TESTS
// ============================================================================
