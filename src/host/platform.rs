use std::path::Path;
use std::sync::Arc;

use include_dir::{
    include_dir,
    Dir,
};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::{
    debug,
    warn,
};

use crate::types::{
    RuntimeVersion,
    Type,
};
use crate::utils::FastDashMap;

use super::TemplateRegistry;

pub const PLATFORM: Dir = include_dir!("$CARGO_MANIFEST_DIR/resources/platform");

/// Directory with a `templates.json` that replaces the embedded set.
pub const TEMPLATES_DIR_ENV: &str = "BSL_TYPES_TEMPLATES_DIR";

const TEMPLATES_FILE: &str = "templates.json";

// Templates reference each other by name; nesting deeper than this is cut off.
const MAX_NESTING: usize = 4;

#[derive(thiserror::Error, Debug)]
pub enum TemplateError {
    #[error("Template resource '{0}' is missing")]
    MissingResource(String),
    #[error("Template resource '{0}' is not valid UTF-8")]
    InvalidEncoding(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A template together with the runtime versions it is available in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    #[serde(flatten)]
    pub ty: Type,
    /// First runtime version that has the type. Absent means every supported version.
    #[serde(default)]
    pub since: Option<RuntimeVersion>,
    /// Properties and methods, by either name, added after the type itself.
    #[serde(default)]
    pub members_since: FxHashMap<String, RuntimeVersion>,
}

impl TemplateEntry {
    fn available_in(&self, version: RuntimeVersion) -> bool {
        !matches!(self.since, Some(since) if since > version)
    }

    fn member_available(&self, name: &str, name_ru: &str, version: RuntimeVersion) -> bool {
        [name, name_ru]
            .into_iter()
            .filter_map(|name| self.members_since.get(&name.to_lowercase()))
            .all(|since| *since <= version)
    }
}

impl From<Type> for TemplateEntry {
    fn from(ty: Type) -> Self {
        TemplateEntry {
            ty,
            since: None,
            members_since: FxHashMap::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TemplateFile {
    types: Vec<TemplateEntry>,
}

/// Built-in platform type templates.
#[derive(Debug, Default)]
pub struct PlatformTemplates {
    declared: FxHashMap<String, TemplateEntry>,
    resolved: FastDashMap<(RuntimeVersion, String), Arc<Type>>,
}

impl PlatformTemplates {
    pub fn from_types(types: Vec<Type>) -> Self {
        PlatformTemplates::from_entries(types.into_iter().map(TemplateEntry::from).collect())
    }

    pub fn from_entries(entries: Vec<TemplateEntry>) -> Self {
        let mut declared = FxHashMap::default();
        for mut entry in entries {
            entry.members_since = entry
                .members_since
                .into_iter()
                .map(|(name, since)| (name.to_lowercase(), since))
                .collect();
            if !entry.ty.name_ru.is_empty() {
                declared.insert(entry.ty.name_ru.to_lowercase(), entry.clone());
            }
            declared.insert(entry.ty.name.to_lowercase(), entry);
        }

        PlatformTemplates {
            declared,
            resolved: FastDashMap::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        let file: TemplateFile = serde_json::from_str(json)?;
        Ok(PlatformTemplates::from_entries(file.types))
    }

    pub fn embedded() -> Result<Self, TemplateError> {
        let file = PLATFORM
            .get_file(TEMPLATES_FILE)
            .ok_or_else(|| TemplateError::MissingResource(TEMPLATES_FILE.to_string()))?;
        let json = file
            .contents_utf8()
            .ok_or_else(|| TemplateError::InvalidEncoding(TEMPLATES_FILE.to_string()))?;

        PlatformTemplates::from_json(json)
    }

    pub fn from_dir(dir: &Path) -> Result<Self, TemplateError> {
        let json = std::fs::read_to_string(dir.join(TEMPLATES_FILE))?;
        PlatformTemplates::from_json(&json)
    }

    /// Templates from the directory named by the environment, falling back to the embedded set.
    pub fn load() -> Self {
        if let Ok(dir) = std::env::var(TEMPLATES_DIR_ENV) {
            match PlatformTemplates::from_dir(Path::new(&dir)) {
                Ok(templates) => return templates,
                Err(err) => warn!("Unable to load templates from {dir}: {err}"),
            }
        }

        PlatformTemplates::embedded().unwrap_or_else(|err| {
            warn!("Embedded templates are unusable: {err}");
            PlatformTemplates::default()
        })
    }

    /// The declared type as `version` sees it, without members added later.
    fn declared_in(&self, name: &str, version: RuntimeVersion) -> Option<Type> {
        let entry = self.declared.get(&name.to_lowercase())?;
        if !entry.available_in(version) {
            return None;
        }

        let mut ty = entry.ty.clone();
        ty.properties
            .retain(|p| entry.member_available(&p.name, &p.name_ru, version));
        ty.methods
            .retain(|m| entry.member_available(&m.name, &m.name_ru, version));
        Some(ty)
    }

    fn expand(&self, ty: &Type, version: RuntimeVersion, depth: usize) -> Type {
        let mut expanded = match self.declared_in(&ty.name, version) {
            Some(declared) if is_bare(ty) => declared,
            _ => ty.clone(),
        };
        if depth >= MAX_NESTING {
            return expanded;
        }

        for element in expanded.element_types.iter_mut() {
            *element = self.expand(element, version, depth + 1);
        }
        for property in expanded.properties.iter_mut() {
            for ty in property.types.iter_mut() {
                *ty = self.expand(ty, version, depth + 1);
            }
        }

        expanded
    }
}

fn is_bare(ty: &Type) -> bool {
    ty.element_types.is_empty() && ty.properties.is_empty() && ty.methods.is_empty()
}

impl TemplateRegistry for PlatformTemplates {
    fn template(&self, name: &str, version: RuntimeVersion) -> Option<Arc<Type>> {
        let key = (version, name.to_lowercase());
        if let Some(template) = self.resolved.get(&key) {
            return Some(template.clone());
        }

        let Some(declared) = self.declared_in(&key.1, version) else {
            debug!("No template for {name} ({version})");
            return None;
        };
        let template = Arc::new(self.expand(&declared, version, 0));
        self.resolved.insert(key, template.clone());

        Some(template)
    }
}
