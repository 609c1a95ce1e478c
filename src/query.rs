//! Query string handling and deployment detection

use std::collections::HashMap;

use crate::config::Deployment;
use crate::consts::DEPLOYMENT_QUERY_KEY;

/// Parse a `location.search` style string into key/value pairs.
///
/// A leading `?` is optional. `+` decodes to a space. Entries without an `=`
/// are dropped. Later duplicates win.
pub fn parse_query_string(search: &str) -> HashMap<String, String> {
    let search = search.strip_prefix('?').unwrap_or(search);
    search
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((decode(key), decode(value)))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

/// Work out the deployment from the page host and query.
///
/// Anything served from `localhost` is local, everything else is a deploy.
/// The `mpDeployment` query parameter overrides either.
pub fn determine_deployment(host: &str, query: &HashMap<String, String>) -> Deployment {
    let detected = if host.contains("localhost") {
        Deployment::Local
    } else {
        Deployment::Deploy
    };

    match query.get(DEPLOYMENT_QUERY_KEY) {
        Some(forced) => match Deployment::parse(forced) {
            Ok(deployment) => {
                log::info!("Deployment forced by query: {}", deployment.as_str());
                deployment
            }
            Err(e) => {
                log::warn!("Ignoring deployment override: {}", e);
                detected
            }
        },
        None => detected,
    }
}
