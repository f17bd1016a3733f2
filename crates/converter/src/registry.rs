//! Template registry loading.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use ucd2harness_schema::Registry;

/// Registry location tried when none is given on the command line.
pub const DEFAULT_REGISTRY_PATH: &str = ".harness/template-registry.yaml";

/// Where the active registry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryOrigin {
    File(PathBuf),
    Builtin,
    /// The configured file could not be used; no templates are injected.
    Empty,
}

impl fmt::Display for RegistryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryOrigin::File(path) => write!(f, "{}", path.display()),
            RegistryOrigin::Builtin => write!(f, "builtin"),
            RegistryOrigin::Empty => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedRegistry {
    pub registry: Registry,
    pub origin: RegistryOrigin,
}

/// Load the registry relative to the current directory.
pub fn load_registry(explicit: Option<&Path>) -> LoadedRegistry {
    load_registry_in(Path::new("."), explicit)
}

/// Load the registry.
///
/// An explicit path that is missing or unparsable yields an empty registry
/// and a warning. Without one, `<base>/.harness/template-registry.yaml` is
/// used when present, and the builtin Java/Gradle rule otherwise.
pub fn load_registry_in(base: &Path, explicit: Option<&Path>) -> LoadedRegistry {
    if let Some(path) = explicit {
        return match read_registry(path) {
            Some(registry) => loaded_from(path, registry),
            None => LoadedRegistry {
                registry: Registry::default(),
                origin: RegistryOrigin::Empty,
            },
        };
    }

    let default_path = base.join(DEFAULT_REGISTRY_PATH);
    if default_path.is_file() {
        if let Some(registry) = read_registry(&default_path) {
            return loaded_from(&default_path, registry);
        }
        return LoadedRegistry {
            registry: Registry::default(),
            origin: RegistryOrigin::Empty,
        };
    }

    debug!("No registry at {}, using builtin rules", default_path.display());
    LoadedRegistry {
        registry: Registry::builtin(),
        origin: RegistryOrigin::Builtin,
    }
}

fn loaded_from(path: &Path, registry: Registry) -> LoadedRegistry {
    info!(
        "Loaded {} template rule(s) from {}",
        registry.templates.len(),
        path.display()
    );
    LoadedRegistry {
        registry,
        origin: RegistryOrigin::File(path.to_path_buf()),
    }
}

fn read_registry(path: &Path) -> Option<Registry> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(
                "Template registry {} not readable ({}); no templates will be injected",
                path.display(),
                e
            );
            return None;
        }
    };

    match Registry::from_yaml(&content) {
        Ok(registry) => Some(registry),
        Err(e) => {
            warn!(
                "Template registry {} is invalid ({}); no templates will be injected",
                path.display(),
                e
            );
            None
        }
    }
}
