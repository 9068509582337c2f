//! Local metrics config and template files for `metrics sync`

use crate::api::models::{MetricsConfigInput, MetricsTemplate};
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = ".resim/metrics/config.resim.yml";
pub const DEFAULT_TEMPLATES_DIR: &str = ".resim/metrics/templates";

/// Read the config file and every template under `templates_dir`.
///
/// The config file is required. A missing or empty templates directory is
/// logged and synced as an empty template set.
pub fn load(config_path: &Path, templates_dir: &Path) -> Result<MetricsConfigInput> {
    let config = fs::read_to_string(config_path)
        .with_context(|| format!("failed to read metrics config file: {:?}", config_path))?;

    let templates = collect_templates(templates_dir)?;
    if templates.is_empty() {
        warn!("No metrics templates found in {:?}", templates_dir);
    }

    Ok(MetricsConfigInput { config, templates })
}

/// Walk `dir` recursively; names are relative paths with `/` separators, sorted
pub fn collect_templates(dir: &Path) -> Result<Vec<MetricsTemplate>> {
    if !dir.is_dir() {
        debug!("Templates directory {:?} does not exist", dir);
        return Ok(Vec::new());
    }

    let mut templates = Vec::new();
    let mut pending: Vec<PathBuf> = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current)
            .with_context(|| format!("failed to read templates directory: {:?}", current))?;

        for entry in entries {
            let path = entry
                .with_context(|| format!("failed to read entry in {:?}", current))?
                .path();

            if path.is_dir() {
                pending.push(path);
                continue;
            }

            let contents = fs::read_to_string(&path)
                .with_context(|| format!("failed to read template: {:?}", path))?;
            let name = template_name(dir, &path);
            debug!("Found metrics template {}", name);
            templates.push(MetricsTemplate { name, contents });
        }
    }

    templates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(templates)
}

fn template_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
