use serde::{Deserialize, Serialize};
use std::fmt;

/// One row per known Node version, as reported by fnm.
///
/// Records are rebuilt from scratch on every parse; no identity is kept
/// across refreshes. Within the installed set at most one entry has
/// `is_default` and at most one has `is_current`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeVersion {
    /// Canonical `vMAJOR.MINOR.PATCH` identifier, leading `v` included.
    pub name: String,
    pub is_installed: bool,
    pub is_default: bool,
    pub is_current: bool,
    pub is_lts: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lts_name: Option<String>,
    /// User-assigned tags, excluding `default` and LTS-indicating tags.
    pub aliases: Vec<String>,
}

impl NodeVersion {
    #[must_use]
    pub fn remote(name: impl Into<String>, lts_name: Option<String>, is_installed: bool) -> Self {
        Self {
            name: name.into(),
            is_installed,
            is_default: false,
            is_current: false,
            is_lts: lts_name.is_some(),
            lts_name,
            aliases: Vec::new(),
        }
    }
}

impl fmt::Display for NodeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Narrowing criteria for [`crate::filter_versions`]. The default imposes no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionFilter {
    pub lts_only: bool,
    pub installed_only: bool,
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionFileStrategy {
    #[default]
    Local,
    Recursive,
}

impl VersionFileStrategy {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "local" => Some(Self::Local),
            "recursive" => Some(Self::Recursive),
            _ => None,
        }
    }
}

impl fmt::Display for VersionFileStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Recursive => f.write_str("recursive"),
        }
    }
}

/// Snapshot of the fnm environment configuration, as reported by `fnm env`.
/// Replaced wholesale on reload; no partial-field mutation exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FnmEnv {
    pub fnm_dir: String,
    pub node_dist_mirror: String,
    pub version_file_strategy: VersionFileStrategy,
    pub corepack_enabled: bool,
    pub resolve_engines: bool,
    pub arch: String,
    pub loglevel: String,
}

impl Default for FnmEnv {
    fn default() -> Self {
        Self {
            fnm_dir: String::new(),
            node_dist_mirror: "https://nodejs.org/dist".to_string(),
            version_file_strategy: VersionFileStrategy::Local,
            corepack_enabled: false,
            resolve_engines: true,
            arch: String::new(),
            loglevel: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_constructor_derives_lts_flag_from_codename() {
        let with = NodeVersion::remote("v20.12.2", Some("Jod".to_string()), true);
        let without = NodeVersion::remote("v21.0.0", None, false);

        assert!(with.is_lts);
        assert_eq!(with.lts_name.as_deref(), Some("Jod"));
        assert!(with.is_installed);
        assert!(!with.is_default);
        assert!(!with.is_current);
        assert!(with.aliases.is_empty());

        assert!(!without.is_lts);
        assert!(without.lts_name.is_none());
        assert!(!without.is_installed);
    }

    #[test]
    fn node_version_serializes_with_camel_case_fields() {
        let version = NodeVersion::remote("v20.12.2", Some("Jod".to_string()), true);
        let json = serde_json::to_value(&version).expect("version should serialize");

        assert_eq!(json["name"], "v20.12.2");
        assert_eq!(json["isInstalled"], true);
        assert_eq!(json["isLts"], true);
        assert_eq!(json["ltsName"], "Jod");
    }

    #[test]
    fn strategy_parse_accepts_known_values_only() {
        assert_eq!(
            VersionFileStrategy::parse("local"),
            Some(VersionFileStrategy::Local)
        );
        assert_eq!(
            VersionFileStrategy::parse("recursive"),
            Some(VersionFileStrategy::Recursive)
        );
        assert_eq!(VersionFileStrategy::parse("global"), None);
    }

    #[test]
    fn fnm_env_defaults_match_fnm_documented_defaults() {
        let env = FnmEnv::default();

        assert_eq!(env.node_dist_mirror, "https://nodejs.org/dist");
        assert_eq!(env.version_file_strategy, VersionFileStrategy::Local);
        assert!(!env.corepack_enabled);
        assert!(env.resolve_engines);
        assert_eq!(env.loglevel, "info");
    }
}
