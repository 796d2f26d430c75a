use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::types::{
    Property,
    RuntimeVersion,
    Type,
};

use super::{
    MemoryHost,
    PlatformTemplates,
};

#[derive(thiserror::Error, Debug)]
pub enum FixtureError {
    #[error("Unable to read fixture '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid fixture: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObjectFixture {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    properties: Vec<Property>,
}

/// Metadata and variable typing a [`MemoryHost`] is seeded with.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    runtime_version: Option<RuntimeVersion>,
    #[serde(default)]
    objects: Vec<ObjectFixture>,
    #[serde(default)]
    managers: Vec<String>,
    #[serde(default)]
    common_modules: Vec<String>,
    #[serde(default)]
    variables: IndexMap<String, Vec<Type>>,
}

impl Fixture {
    pub fn runtime_version(&self) -> Option<RuntimeVersion> {
        self.runtime_version
    }

    pub fn into_host(self, templates: PlatformTemplates) -> MemoryHost {
        let mut host = MemoryHost::with_templates(templates)
            .with_version(self.runtime_version.unwrap_or_default());

        for object in self.objects {
            host = host.with_object(&object.type_name, object.properties);
        }
        for fqn in self.managers.iter() {
            host = host.with_manager(fqn);
        }
        for name in self.common_modules.iter() {
            host = host.with_common_module(name);
        }
        for (name, types) in self.variables {
            host = host.with_variable(&name, types);
        }

        host
    }
}

impl MemoryHost {
    pub fn from_fixture_str(json: &str) -> Result<MemoryHost, FixtureError> {
        let fixture: Fixture = serde_json::from_str(json)?;
        Ok(fixture.into_host(PlatformTemplates::load()))
    }

    pub fn from_fixture(path: &Path) -> Result<MemoryHost, FixtureError> {
        let json = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.display().to_string(),
            source,
        })?;

        MemoryHost::from_fixture_str(&json)
    }
}
