//! Asset path resolution
//!
//! Turns a card identifier into the URL of its image for the active
//! deployment and device, and lists the stylesheets the page needs.

use crate::capabilities::Capabilities;
use crate::config::{AssetPaths, BingoOptions, Deployment};
use crate::consts::{DEFAULT_EXTENSION, SMALL_EXTENSION};
use crate::is_absolute_url;
use crate::manifest::AssetManifest;

/// Resolves card and stylesheet URLs for one deployment
#[derive(Debug, Clone)]
pub struct PathResolver {
    deployment: Deployment,
    paths: AssetPaths,
    capabilities: Capabilities,
    /// Directory URL of the page, prefixed onto relative images
    page_base: Option<String>,
}

impl PathResolver {
    pub fn new(deployment: Deployment, paths: AssetPaths, capabilities: Capabilities) -> Self {
        Self {
            deployment,
            paths,
            capabilities,
            page_base: None,
        }
    }

    /// Resolver using the option's path set for `deployment`
    pub fn from_options(
        options: &BingoOptions,
        deployment: Deployment,
        capabilities: Capabilities,
    ) -> Self {
        let paths = options.available_paths.get(deployment).clone();
        Self::new(deployment, paths, capabilities)
    }

    /// Make relative image URLs absolute against the page
    pub fn with_page_base(mut self, base: impl Into<String>) -> Self {
        self.page_base = Some(base.into());
        self
    }

    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    pub fn paths(&self) -> &AssetPaths {
        &self.paths
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Image extension for this device
    pub fn extension(&self) -> &'static str {
        if self.capabilities.cannot_load_large_images {
            SMALL_EXTENSION
        } else {
            DEFAULT_EXTENSION
        }
    }

    /// URL of the image for `card`
    pub fn image_url(&self, card: &str) -> String {
        let url = format!("{}{}{}", self.paths.images, card, self.extension());
        match &self.page_base {
            Some(base) if !is_absolute_url(&url) => format!("{}{}", base, url),
            _ => url,
        }
    }

    /// Stylesheets to append to the document head: manifest entries first,
    /// then the deployment's own.
    pub fn stylesheets(&self, manifest: Option<&AssetManifest>) -> Vec<String> {
        let mut hrefs = manifest.map(AssetManifest::stylesheet_hrefs).unwrap_or_default();
        hrefs.extend(self.paths.css.iter().cloned());
        hrefs
    }
}

/// Directory URL of the current page, from `location` parts
pub fn page_base(protocol: &str, host: &str, pathname: &str) -> String {
    let dir = match pathname.rfind('/') {
        Some(i) => &pathname[..=i],
        None => "/",
    };
    format!("{}//{}{}", protocol, host, dir)
}
