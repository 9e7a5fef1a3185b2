use fnmdeck_backend::{FnmEnv, VersionFileStrategy};

use crate::paths::default_fnm_dir;

/// Parses `fnm env` output into a settings snapshot.
///
/// The output shape depends on the shell fnm targets: `export KEY="value"`
/// (bash/zsh), `set KEY value-ish` (fish), or bare `KEY=value`. Unknown
/// lines are ignored and absent keys keep their defaults, so this never
/// fails; an empty directory falls back to the platform default and an
/// empty arch falls back to the compile target.
#[must_use]
pub fn parse_fnm_env(output: &str) -> FnmEnv {
    let mut env = FnmEnv::default();

    for line in output.lines() {
        let line = line.trim();

        if let Some(value) = extract_env_value(line, "FNM_DIR") {
            env.fnm_dir = value;
        } else if let Some(value) = extract_env_value(line, "FNM_NODE_DIST_MIRROR") {
            env.node_dist_mirror = value;
        } else if let Some(value) = extract_env_value(line, "FNM_VERSION_FILE_STRATEGY") {
            env.version_file_strategy =
                VersionFileStrategy::parse(&value).unwrap_or_default();
        } else if let Some(value) = extract_env_value(line, "FNM_COREPACK_ENABLED") {
            env.corepack_enabled = parse_flag(&value);
        } else if let Some(value) = extract_env_value(line, "FNM_RESOLVE_ENGINES") {
            env.resolve_engines = parse_flag(&value);
        } else if let Some(value) = extract_env_value(line, "FNM_ARCH") {
            env.arch = value;
        } else if let Some(value) = extract_env_value(line, "FNM_LOGLEVEL") {
            env.loglevel = value;
        }
    }

    if env.fnm_dir.is_empty()
        && let Some(dir) = default_fnm_dir()
    {
        env.fnm_dir = dir.to_string_lossy().into_owned();
    }

    if env.arch.is_empty() {
        env.arch = system_arch().to_string();
    }

    env
}

fn extract_env_value(line: &str, key: &str) -> Option<String> {
    for shell_prefix in ["export ", "set ", ""] {
        let pattern = format!("{shell_prefix}{key}=");
        if let Some(idx) = line.find(&pattern) {
            let value = line[idx + pattern.len()..]
                .trim()
                .trim_end_matches(';')
                .trim_matches('"')
                .trim_matches('\'')
                .to_string();
            return Some(value);
        }
    }

    None
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn system_arch() -> &'static str {
    #[cfg(target_arch = "x86_64")]
    {
        "x64"
    }

    #[cfg(target_arch = "aarch64")]
    {
        "arm64"
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        "unknown"
    }
}
