use std::cmp::Ordering;

/// Orders version strings newest-first: sorting ascending with this
/// comparator puts `v20.2.0` before `v20.1.0`.
///
/// The first `MAJOR.MINOR.PATCH` numeric triple found anywhere in each
/// string is compared component-wise; a string with no triple ranks as
/// `0.0.0`. Trailing content after the triple is ignored, so two distinct
/// strings can compare `Equal` (total preorder, not a strict total order).
/// This is deliberately looser than full semver precedence: fnm output never
/// carries pre-release or build metadata.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    extract_triple(b).cmp(&extract_triple(a))
}

fn extract_triple(input: &str) -> (u32, u32, u32) {
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            if let Some(triple) = triple_at(bytes, i) {
                return triple;
            }
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        } else {
            i += 1;
        }
    }

    (0, 0, 0)
}

fn triple_at(bytes: &[u8], start: usize) -> Option<(u32, u32, u32)> {
    let (major, rest) = component_at(bytes, start)?;
    if bytes.get(rest) != Some(&b'.') {
        return None;
    }
    let (minor, rest) = component_at(bytes, rest + 1)?;
    if bytes.get(rest) != Some(&b'.') {
        return None;
    }
    let (patch, _) = component_at(bytes, rest + 1)?;
    Some((major, minor, patch))
}

fn component_at(bytes: &[u8], start: usize) -> Option<(u32, usize)> {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == start {
        return None;
    }
    // Safe: the range is all ASCII digits.
    std::str::from_utf8(&bytes[start..end])
        .ok()?
        .parse()
        .ok()
        .map(|value| (value, end))
}
