//! Local asset manifest
//!
//! During local development third-party stylesheets come from the
//! `dependencyMap` of `bower.json` rather than a built bundle.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::consts::MANIFEST_COMPONENTS_DIR;
use crate::error::Result;
use crate::is_absolute_url;

/// Assets one dependency contributes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DependencyAssets {
    /// Stylesheets, either absolute URLs or extension-less component paths
    pub css: Vec<String>,
}

/// The parts of `bower.json` the widget reads
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetManifest {
    pub dependency_map: BTreeMap<String, DependencyAssets>,
}

impl AssetManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Stylesheet hrefs, in dependency name order
    pub fn stylesheet_hrefs(&self) -> Vec<String> {
        self.dependency_map
            .values()
            .flat_map(|deps| deps.css.iter())
            .map(|css| {
                if is_absolute_url(css) {
                    css.clone()
                } else {
                    format!("{}{}.css", MANIFEST_COMPONENTS_DIR, css)
                }
            })
            .collect()
    }
}
