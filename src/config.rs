//! Widget options and deployment paths
//!
//! Options can be passed in from JS as a camelCase object; anything left out
//! falls back to the defaults below.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Where the widget is running, which decides the asset base paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deployment {
    Local,
    Build,
    #[default]
    Deploy,
}

impl Deployment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Deployment::Local => "local",
            Deployment::Build => "build",
            Deployment::Deploy => "deploy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "local" => Some(Deployment::Local),
            "build" => Some(Deployment::Build),
            "deploy" => Some(Deployment::Deploy),
            _ => None,
        }
    }

    /// Like `from_str`, but reports the rejected name
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| Error::UnknownDeployment(s.to_string()))
    }
}

/// Asset locations for one deployment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct AssetPaths {
    /// Stylesheets appended to the document head
    pub css: Vec<String>,
    /// Prefix for card images
    pub images: String,
    /// Prefix for data files
    pub data: String,
}

/// Asset locations for every deployment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AvailablePaths {
    pub local: AssetPaths,
    pub build: AssetPaths,
    pub deploy: AssetPaths,
}

const PROJECT_NAME: &str = "minnpost-state-fair-bingo-2015";
const DEPLOY_BASE: &str =
    "https://s3.amazonaws.com/data.minnpost/projects/minnpost-state-fair-bingo-2015/";
const FONT_AWESOME_CSS: &str = "//netdna.bootstrapcdn.com/font-awesome/4.0.3/css/font-awesome.css";

impl Default for AvailablePaths {
    fn default() -> Self {
        Self {
            local: AssetPaths {
                css: vec![".tmp/css/main.css".to_string()],
                images: "images/".to_string(),
                data: "data/".to_string(),
            },
            build: AssetPaths {
                css: vec![
                    FONT_AWESOME_CSS.to_string(),
                    format!("dist/{PROJECT_NAME}.libs.min.css"),
                    format!("dist/{PROJECT_NAME}.latest.min.css"),
                ],
                images: "dist/images/".to_string(),
                data: "dist/data/".to_string(),
            },
            deploy: AssetPaths {
                css: vec![
                    FONT_AWESOME_CSS.to_string(),
                    format!("{DEPLOY_BASE}{PROJECT_NAME}.libs.min.css"),
                    format!("{DEPLOY_BASE}{PROJECT_NAME}.latest.min.css"),
                ],
                images: format!("{DEPLOY_BASE}images/"),
                data: format!("{DEPLOY_BASE}data/"),
            },
        }
    }
}

impl AvailablePaths {
    /// Path set for a deployment
    pub fn get(&self, deployment: Deployment) -> &AssetPaths {
        match deployment {
            Deployment::Local => &self.local,
            Deployment::Build => &self.build,
            Deployment::Deploy => &self.deploy,
        }
    }
}

/// Widget options
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BingoOptions {
    pub project_name: String,
    /// Card identifiers, in display order
    pub cards: Vec<String>,
    /// Mount selector
    pub el: String,
    /// URL prefix for cross-origin fetches
    pub remote_proxy: Option<String>,
    pub available_paths: AvailablePaths,
}

impl Default for BingoOptions {
    fn default() -> Self {
        Self {
            project_name: PROJECT_NAME.to_string(),
            cards: (1..=4)
                .map(|i| format!("minnpost-state-fair-bingo-card-{:02}", i))
                .collect(),
            el: format!(".{PROJECT_NAME}-container"),
            remote_proxy: None,
            available_paths: AvailablePaths::default(),
        }
    }
}

impl BingoOptions {
    /// Parse options from JSON, defaulting missing fields
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check the options can drive a widget
    pub fn validate(&self) -> Result<()> {
        if self.cards.is_empty() {
            return Err(Error::EmptyCardList);
        }
        Ok(())
    }

    /// Route a fetch URL through the remote proxy, if one is set.
    ///
    /// Only absolute `http(s)` URLs are cross-origin and get proxied; relative
    /// URLs such as the local manifest are returned unchanged.
    pub fn proxied_url(&self, url: &str) -> String {
        match &self.remote_proxy {
            Some(proxy) if url.starts_with("http") => {
                format!("{}{}", proxy, urlencoding::encode(url))
            }
            _ => url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_from_str() {
        assert_eq!(Deployment::from_str("local"), Some(Deployment::Local));
        assert_eq!(Deployment::from_str(" Build "), Some(Deployment::Build));
        assert_eq!(Deployment::from_str("DEPLOY"), Some(Deployment::Deploy));
        assert_eq!(Deployment::from_str("staging"), None);
        assert!(matches!(
            Deployment::parse("staging"),
            Err(Error::UnknownDeployment(name)) if name == "staging"
        ));
    }

    #[test]
    fn test_default_options() {
        let options = BingoOptions::default();
        assert_eq!(options.cards.len(), 4);
        assert_eq!(options.cards[0], "minnpost-state-fair-bingo-card-01");
        assert_eq!(options.cards[3], "minnpost-state-fair-bingo-card-04");
        assert_eq!(options.el, ".minnpost-state-fair-bingo-2015-container");
        assert!(options.remote_proxy.is_none());
        assert_eq!(options.available_paths.get(Deployment::Local).images, "images/");
        assert_eq!(
            options.available_paths.get(Deployment::Build).images,
            "dist/images/"
        );
        assert!(
            options
                .available_paths
                .get(Deployment::Deploy)
                .images
                .starts_with("https://s3.amazonaws.com/")
        );
    }

    #[test]
    fn test_options_from_partial_json() {
        let json = r##"{
            "cards": ["a", "b"],
            "el": "#bingo",
            "remoteProxy": "https://proxy.example/?url=",
            "availablePaths": { "local": { "images": "img/" } }
        }"##;
        let options = BingoOptions::from_json(json).expect("valid options");
        assert_eq!(options.cards, vec!["a", "b"]);
        assert_eq!(options.el, "#bingo");
        assert_eq!(options.project_name, "minnpost-state-fair-bingo-2015");
        assert_eq!(options.available_paths.local.images, "img/");
        assert!(options.available_paths.local.css.is_empty());
        // Untouched deployments keep their defaults
        assert_eq!(options.available_paths.build.images, "dist/images/");
    }

    #[test]
    fn test_options_reject_empty_cards() {
        let result = BingoOptions::from_json(r#"{ "cards": [] }"#);
        assert!(matches!(result, Err(Error::EmptyCardList)));
    }

    #[test]
    fn test_options_reject_bad_json() {
        let result = BingoOptions::from_json("{ cards: ");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_proxied_url() {
        let mut options = BingoOptions::default();
        assert_eq!(options.proxied_url("https://a.b/c?d=e"), "https://a.b/c?d=e");

        options.remote_proxy = Some("https://proxy/?u=".to_string());
        assert_eq!(
            options.proxied_url("https://a.b/c?d=e"),
            "https://proxy/?u=https%3A%2F%2Fa.b%2Fc%3Fd%3De"
        );
        // Relative URLs are same-origin and never proxied
        assert_eq!(options.proxied_url("bower.json"), "bower.json");
    }
}
