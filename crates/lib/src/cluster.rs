//! # URL Clustering
//!
//! Groups URLs by one level of their directory hierarchy. Level 1 is the host,
//! level N is the (N-1)th path segment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use crate::errors::AnalysisError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clusters {
    /// The column the URLs were grouped by, e.g. `dir_2`.
    pub cluster_by: String,
    pub clusters: BTreeMap<String, usize>,
}

/// The directory labels of a URL, host first.
fn levels(url: &Url) -> Vec<String> {
    let host = url.host_str().map(str::to_string);
    let segments = url
        .path_segments()
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    host.into_iter().chain(segments).collect()
}

/// Counts URLs per label at the given level.
///
/// URLs shallower than the level are not counted. Unparseable URLs are
/// ignored. Asking for a level deeper than every URL is a validation error.
pub fn cluster_by_level<S: AsRef<str>>(
    urls: &[S],
    level: usize,
) -> Result<Clusters, AnalysisError> {
    if level == 0 {
        return Err(AnalysisError::Validation(
            "Invalid level: 0. Levels start at 1".to_string(),
        ));
    }

    let parsed: Vec<Vec<String>> = urls
        .iter()
        .filter_map(|u| Url::parse(u.as_ref().trim()).ok())
        .map(|u| levels(&u))
        .collect();

    let deepest = parsed.iter().map(Vec::len).max().unwrap_or(0);
    if !parsed.is_empty() && level > deepest {
        return Err(AnalysisError::Validation(format!(
            "Invalid level: {level}. Available: dir_1 to dir_{deepest}"
        )));
    }

    let mut clusters = BTreeMap::new();
    for label in parsed.into_iter().filter_map(|mut l| {
        if l.len() >= level {
            Some(l.swap_remove(level - 1))
        } else {
            None
        }
    }) {
        *clusters.entry(label).or_insert(0) += 1;
    }

    Ok(Clusters {
        cluster_by: format!("dir_{level}"),
        clusters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URLS: [&str; 4] = [
        "https://example.com/blog/a",
        "https://example.com/blog/b",
        "https://example.com/products/x",
        "https://example.com/",
    ];

    #[test]
    fn level_two_groups_first_directory() {
        let result = cluster_by_level(&URLS, 2).unwrap();
        assert_eq!(result.cluster_by, "dir_2");
        assert_eq!(
            result.clusters,
            BTreeMap::from([("blog".to_string(), 2), ("products".to_string(), 1)])
        );
    }

    #[test]
    fn level_one_is_the_host() {
        let result = cluster_by_level(&URLS, 1).unwrap();
        assert_eq!(result.clusters, BTreeMap::from([("example.com".to_string(), 4)]));
    }

    #[test]
    fn too_deep_level_is_rejected() {
        let err = cluster_by_level(&URLS, 4).unwrap_err();
        assert_eq!(err.to_string(), "Invalid level: 4. Available: dir_1 to dir_3");
        assert!(cluster_by_level(&URLS, 0).is_err());
    }

    #[test]
    fn empty_input_yields_no_clusters() {
        let result = cluster_by_level::<String>(&[], 3).unwrap();
        assert!(result.clusters.is_empty());
    }
}
