use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub fn kebab_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::{kebab_case, stable_pair};

    #[test]
    fn kebab_case_joins_word_runs() {
        assert_eq!(kebab_case("Network Mapper 2.0"), "network-mapper-2-0");
        assert_eq!(kebab_case("  trailing!! "), "trailing");
        assert_eq!(kebab_case(""), "");
    }

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let (x, y) = stable_pair("suricata");
        assert_eq!(stable_pair("suricata"), (x, y));
        assert!((-1.0..=1.0).contains(&x));
        assert!((-1.0..=1.0).contains(&y));
    }
}
