use crate::types::{NodeVersion, VersionFilter};

/// Narrows `versions` by the criteria in `filter`, combined with logical
/// AND. Survivors keep their relative order; the input is never mutated.
///
/// Keyword matching is a case-insensitive substring test against the name,
/// the LTS codename, and every alias; any hit keeps the version.
#[must_use]
pub fn filter_versions(versions: &[NodeVersion], filter: &VersionFilter) -> Vec<NodeVersion> {
    let keyword = filter
        .keyword
        .as_deref()
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_lowercase);

    versions
        .iter()
        .filter(|version| !filter.lts_only || version.is_lts)
        .filter(|version| !filter.installed_only || version.is_installed)
        .filter(|version| {
            keyword
                .as_deref()
                .is_none_or(|keyword| matches_keyword(version, keyword))
        })
        .cloned()
        .collect()
}

fn matches_keyword(version: &NodeVersion, keyword: &str) -> bool {
    version.name.to_lowercase().contains(keyword)
        || version
            .lts_name
            .as_ref()
            .is_some_and(|name| name.to_lowercase().contains(keyword))
        || version
            .aliases
            .iter()
            .any(|alias| alias.to_lowercase().contains(keyword))
}
