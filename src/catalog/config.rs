use std::collections::BTreeMap;

use serde::Deserialize;

/// Immutable visualization configuration: which attribute groups records into
/// regions, how raw column names map onto record fields, and the icon
/// metadata used by the info panel and the filter controls.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub region_attribute: String,
    pub columns: ColumnMap,
    pub icons: IconSets,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMap {
    pub domain: ColumnSpec,
    pub name: ColumnSpec,
    pub project_name: ColumnSpec,
    pub organization: ColumnSpec,
    pub sectors: ColumnSpec,
    pub language: ColumnSpec,
    pub license: ColumnSpec,
    pub os: ColumnSpec,
    pub program: ColumnSpec,
    pub start_date: ColumnSpec,
    pub last_update: ColumnSpec,
    pub code_location: ColumnSpec,
    pub description: ColumnSpec,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    pub src: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl ColumnSpec {
    fn new(src: &str) -> Self {
        Self {
            src: src.to_string(),
            label: None,
        }
    }

    fn labeled(src: &str, label: &str) -> Self {
        Self {
            src: src.to_string(),
            label: Some(label.to_string()),
        }
    }

    pub fn display_label<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(fallback)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IconSets {
    pub os: BTreeMap<String, IconSpec>,
    pub license: BTreeMap<String, IconSpec>,
    pub languages: BTreeMap<String, IconSpec>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IconSpec {
    pub src: String,
    pub label: String,
}

impl IconSets {
    pub fn find_by_label<'a>(
        set: &'a BTreeMap<String, IconSpec>,
        label: &str,
    ) -> Option<&'a IconSpec> {
        set.values().find(|icon| icon.label.eq_ignore_ascii_case(label))
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            region_attribute: "domain".to_string(),
            columns: ColumnMap::default(),
            icons: default_icons(),
        }
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            domain: ColumnSpec::new("Domain"),
            name: ColumnSpec::new("SOFTWARE"),
            project_name: ColumnSpec::labeled("PROJECT NAME", "Project"),
            organization: ColumnSpec::new("Organization"),
            sectors: ColumnSpec::labeled("Organization Type", "Sectors"),
            language: ColumnSpec::labeled("LANG", "Language"),
            license: ColumnSpec::labeled("LICENSE", "License"),
            os: ColumnSpec::labeled("OS", "Environment"),
            program: ColumnSpec::new("Program"),
            start_date: ColumnSpec::labeled("Date of Release", "Release Date"),
            last_update: ColumnSpec::labeled("Date of Last Update", "Last Update"),
            code_location: ColumnSpec::labeled("Source Code URL", "Code Location"),
            description: ColumnSpec::new("Description"),
        }
    }
}

fn icon_set(entries: &[(&str, &str, &str)]) -> BTreeMap<String, IconSpec> {
    entries
        .iter()
        .map(|(key, src, label)| {
            (
                key.to_string(),
                IconSpec {
                    src: src.to_string(),
                    label: label.to_string(),
                },
            )
        })
        .collect()
}

fn default_icons() -> IconSets {
    IconSets {
        os: icon_set(&[
            ("windows", "windows7", "Windows"),
            ("linux", "linux", "Linux"),
            ("mac", "mac", "Mac"),
            ("android", "android", "Android"),
        ]),
        license: icon_set(&[
            ("apache", "apache", "Apache 2.0"),
            ("bsd", "bsd", "BSD"),
            ("geni", "geni", "GENI"),
            ("gpl", "gpl", "GPL"),
            ("jhu", "jhu", "JHU/APL"),
            ("mit", "mit", "MIT"),
            ("mozilla", "mozilla", "Mozilla 2.0"),
            ("uiuc", "uiuc", "UIUC"),
            ("usc", "usc", "USC"),
            ("w3c", "w3c", "W3C"),
        ]),
        languages: icon_set(&[
            ("python", "python", "Python"),
            ("java", "java", "Java"),
            ("ruby", "ruby", "Ruby"),
            ("scala", "scala", "Scala"),
            ("postgresql", "postgresql", "PostgreSQL"),
            ("perl", "perl", "Perl"),
            ("c", "c", "C"),
            ("cpp", "c2", "C++"),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogConfig, IconSets};

    #[test]
    fn default_config_groups_by_domain() {
        let config = CatalogConfig::default();
        assert_eq!(config.region_attribute, "domain");
        assert_eq!(config.columns.name.src, "SOFTWARE");
        assert_eq!(config.columns.license.display_label("License"), "License");
        assert_eq!(config.columns.domain.display_label("Domain"), "Domain");
    }

    #[test]
    fn icon_lookup_by_label_is_case_insensitive() {
        let config = CatalogConfig::default();
        let icon = IconSets::find_by_label(&config.icons.license, "apache 2.0")
            .expect("apache license icon");
        assert_eq!(icon.src, "apache");
        assert!(IconSets::find_by_label(&config.icons.license, "Proprietary").is_none());
    }

    #[test]
    fn config_deserializes_partial_overrides() {
        let parsed: CatalogConfig = serde_json::from_str(
            r#"{
                "region_attribute": "organization",
                "columns": { "name": { "src": "Title", "label": "Name" } }
            }"#,
        )
        .expect("partial config should parse");
        assert_eq!(parsed.region_attribute, "organization");
        assert_eq!(parsed.columns.name.src, "Title");
        assert_eq!(parsed.columns.domain.src, "Domain");
        assert!(!parsed.icons.os.is_empty());
    }
}
