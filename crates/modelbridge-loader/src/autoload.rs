use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use modelbridge_builder::{Builder, transfer};
use modelbridge_config::BridgeConfig;
use modelbridge_core::{Namespace, SourceApps};
use modelbridge_mapping::Registry;
use tracing::{debug, info, warn};

use crate::modules::{app_dir, load_app_modules};

/// Path of the pre-built namespace of `app`.
fn prebuilt_path(root: &Path, app: &str, module: &str) -> PathBuf {
    root.join(app_dir(app)).join(format!("{}.json", module))
}

fn load_prebuilt(path: &Path) -> Result<Namespace> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read pre-built namespace: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parse pre-built namespace: {}", path.display()))
}

/// Produce the target namespace of every installed app, keyed by app entry.
///
/// A pre-built `<app>/<autoload module>.json` is used as-is when it can be
/// read. Otherwise the app's source module is transferred with the
/// configured autoload options; one builder is shared across apps so models
/// referenced from several apps are built once.
pub fn autoload(root: &Path, config: &BridgeConfig) -> Result<IndexMap<String, Namespace>> {
    let autoload = config.autoload();
    let modules = load_app_modules(root, config)?;

    let mut apps = SourceApps::new();
    let mut module_names = IndexMap::new();
    for (app, module) in modules {
        module_names.insert(app, module.name.clone());
        apps.insert(module);
    }

    let registry = Registry::with_defaults().with_aliases(config.aliases());
    let mut builder =
        Builder::new(&registry, &apps).with_missing_type_policy(config.missing_type_policy());

    let mut namespaces = IndexMap::new();
    for app in config.installed_apps() {
        let path = prebuilt_path(root, app, &autoload.module);
        if path.is_file() {
            match load_prebuilt(&path) {
                Ok(namespace) => {
                    info!(app = %app, path = %path.display(), "using pre-built namespace");
                    namespaces.insert(app.clone(), namespace);
                    continue;
                }
                Err(err) => warn!(app = %app, error = %format!("{:#}", err), "ignoring pre-built namespace"),
            }
        }

        let Some(module) = module_names.get(app).and_then(|name| apps.module(name)) else {
            debug!(app = %app, "nothing to autoload");
            continue;
        };

        info!(app = %app, module = %module.name, "building namespace");
        let mut namespace = Namespace::new();
        transfer(
            &mut builder,
            module,
            &mut namespace,
            &autoload.option,
            None,
            config.database_engine(),
        )
        .with_context(|| format!("autoload {}", app))?;
        namespaces.insert(app.clone(), namespace);
    }
    Ok(namespaces)
}
