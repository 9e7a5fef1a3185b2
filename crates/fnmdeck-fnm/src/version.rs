use std::collections::{BTreeMap, HashSet};

use fnmdeck_backend::{NodeVersion, compare_versions};

/// Parses `fnm list` output into version records.
///
/// Expected shape, one installed version per line, the active one marked
/// with a `*` prefix and tags appended after the name:
///
/// ```text
/// * v22.21.1 default
///   v20.12.2 lts-latest
///   v18.20.8 work-project
///   system
/// ```
///
/// Lines carrying the `system` sentinel are excluded entirely; the host
/// runtime is not a manageable version. `current_version` must already be
/// trimmed by the caller. Input order is preserved and malformed lines
/// degrade best-effort rather than erroring.
#[must_use]
pub fn parse_installed_versions(output: &str, current_version: &str) -> Vec<NodeVersion> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains("system"))
        .filter_map(|line| {
            let line = line.strip_prefix('*').map_or(line, str::trim_start);
            let mut parts = line.split_whitespace();
            let name = parts.next()?.to_string();
            let tags: Vec<&str> = parts.collect();

            let is_default = tags.contains(&"default");
            let lts_name = tags
                .iter()
                .find(|tag| is_lts_tag(tag))
                .map(|tag| (*tag).to_string());
            let aliases = tags
                .iter()
                .filter(|tag| **tag != "default" && !is_lts_tag(tag))
                .map(|tag| (*tag).to_string())
                .collect();

            Some(NodeVersion {
                is_current: name == current_version,
                is_installed: true,
                is_default,
                is_lts: lts_name.is_some(),
                lts_name,
                aliases,
                name,
            })
        })
        .collect()
}

fn is_lts_tag(tag: &str) -> bool {
    tag.to_lowercase().contains("lts")
}

/// Parses `fnm list-remote` output into version records.
///
/// A line matches iff it starts with `v` followed by digits and dots,
/// optionally followed by whitespace and a parenthesized LTS codename
/// (`v20.12.2 (Jod)`). Non-matching lines are dropped silently. Remote
/// entries never carry selection state or aliases; `is_installed` is a join
/// against `installed_names` by exact name.
#[must_use]
pub fn parse_remote_versions(output: &str, installed_names: &HashSet<String>) -> Vec<NodeVersion> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let rest = line.strip_prefix('v')?;
            let end = rest
                .find(|c: char| !c.is_ascii_digit() && c != '.')
                .unwrap_or(rest.len());
            if end == 0 {
                return None;
            }

            let name = format!("v{}", &rest[..end]);
            let lts_name = lts_codename(&rest[end..]).map(str::to_string);
            let is_installed = installed_names.contains(&name);

            Some(NodeVersion::remote(name, lts_name, is_installed))
        })
        .collect()
}

// The codename is only recognized when separated from the version by
// whitespace and fully parenthesized; anything else is trailing noise.
fn lts_codename(rest: &str) -> Option<&str> {
    let rest = rest.strip_prefix(char::is_whitespace)?;
    let inner = rest.trim_start().strip_prefix('(')?;
    let end = inner.find(')')?;
    if end == 0 { None } else { Some(&inner[..end]) }
}

/// Groups versions by the leading major number of their name. Entries whose
/// name carries no number are skipped.
#[must_use]
pub fn group_versions_by_major(versions: &[NodeVersion]) -> BTreeMap<u32, Vec<NodeVersion>> {
    let mut groups: BTreeMap<u32, Vec<NodeVersion>> = BTreeMap::new();

    for version in versions {
        if let Some(major) = leading_major(&version.name) {
            groups.entry(major).or_default().push(version.clone());
        }
    }

    groups
}

/// The newest entry of each major line, majors descending.
#[must_use]
pub fn latest_by_major(versions: &[NodeVersion]) -> Vec<NodeVersion> {
    group_versions_by_major(versions)
        .into_iter()
        .rev()
        .filter_map(|(_, mut group)| {
            group.sort_by(|a, b| compare_versions(&a.name, &b.name));
            group.into_iter().next()
        })
        .collect()
}

fn leading_major(name: &str) -> Option<u32> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: &str = &name[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}
