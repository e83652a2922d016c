use crate::catalog::ProjectRecord;

/// Currently accepted values per filter category. Empty categories filter
/// nothing; the `others` list backs the special `other` choice and never
/// activates filtering on its own.
#[derive(Clone, Debug, Default)]
pub(in crate::app) struct FilterSet {
    pub(in crate::app) license: Vec<String>,
    pub(in crate::app) os: Vec<String>,
    pub(in crate::app) keyword: String,
    pub(in crate::app) others: Vec<String>,
}

impl FilterSet {
    pub(in crate::app) fn with_others(others: Vec<String>) -> Self {
        Self {
            others,
            ..Self::default()
        }
    }

    pub(in crate::app) fn is_empty(&self) -> bool {
        self.license.is_empty() && self.os.is_empty() && self.keyword.trim().is_empty()
    }

    pub(in crate::app) fn clear(&mut self) {
        self.license.clear();
        self.os.clear();
        self.keyword.clear();
    }

    /// A record is visible iff every non-empty category matches at least one
    /// of its own values.
    pub(in crate::app) fn accepts(&self, record: &ProjectRecord) -> bool {
        if self.is_empty() {
            return true;
        }

        let keyword = self.keyword.trim().to_lowercase();
        if !keyword.is_empty() {
            let haystack = serde_json::to_string(record)
                .unwrap_or_default()
                .to_lowercase();
            if !haystack.contains(&keyword) {
                return false;
            }
        }

        if !self.license.is_empty() && !self.value_matches(&record.license, &self.license) {
            return false;
        }

        if !self.os.is_empty()
            && !record
                .os
                .iter()
                .any(|value| self.value_matches(value, &self.os))
        {
            return false;
        }

        true
    }

    fn value_matches(&self, value: &str, kept: &[String]) -> bool {
        let lowered = value.to_lowercase();
        kept.iter().any(|kept_value| {
            if kept_value == "other" {
                self.others
                    .iter()
                    .any(|other| lowered == other.to_lowercase())
            } else {
                lowered.contains(kept_value.as_str())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::FilterSet;
    use crate::catalog::{CalendarDate, ProjectRecord};

    fn record(license: &str, os: &[&str]) -> ProjectRecord {
        ProjectRecord {
            domain: "Forensics".to_string(),
            name: "volatility".to_string(),
            project_name: "Volatility Framework".to_string(),
            organization: "Volatility Foundation".to_string(),
            sectors: vec!["Non-profit".to_string()],
            language: vec!["Python".to_string()],
            license: license.to_string(),
            os: os.iter().map(|value| value.to_string()).collect(),
            program: "Memory analysis".to_string(),
            start_date: CalendarDate::parse("2011-03-01").expect("start date"),
            last_update: CalendarDate::parse("2015-09-01").expect("last update"),
            code_location: "https://example.org/volatility".to_string(),
            description: Some("Memory forensics framework.".to_string()),
        }
    }

    #[test]
    fn empty_filters_accept_everything() {
        let filters = FilterSet::default();
        assert!(filters.is_empty());
        assert!(filters.accepts(&record("GPL", &["Linux"])));
    }

    #[test]
    fn unmatched_value_hides_every_record() {
        let filters = FilterSet {
            license: vec!["proprietary".to_string()],
            ..FilterSet::default()
        };
        assert!(!filters.accepts(&record("GPL", &["Linux"])));
        assert!(!filters.accepts(&record("Apache 2.0", &["Windows"])));
    }

    #[test]
    fn license_matches_by_substring_case_insensitively() {
        let filters = FilterSet {
            license: vec!["apache".to_string()],
            ..FilterSet::default()
        };
        assert!(filters.accepts(&record("Apache 2.0", &["Linux"])));
        assert!(!filters.accepts(&record("GPL", &["Linux"])));
    }

    #[test]
    fn os_matches_any_list_element() {
        let filters = FilterSet {
            os: vec!["mac".to_string()],
            ..FilterSet::default()
        };
        assert!(filters.accepts(&record("GPL", &["Linux", "Mac"])));
        assert!(!filters.accepts(&record("GPL", &["Linux"])));
    }

    #[test]
    fn categories_combine_with_and() {
        let filters = FilterSet {
            license: vec!["gpl".to_string()],
            os: vec!["windows".to_string()],
            ..FilterSet::default()
        };
        assert!(filters.accepts(&record("GPL", &["Windows", "Linux"])));
        assert!(!filters.accepts(&record("GPL", &["Linux"])));
        assert!(!filters.accepts(&record("MIT", &["Windows"])));
    }

    #[test]
    fn other_choice_matches_against_the_others_list() {
        let filters = FilterSet {
            license: vec!["other".to_string()],
            others: vec!["custom research license".to_string()],
            ..FilterSet::default()
        };
        assert!(filters.accepts(&record("Custom Research License", &["Linux"])));
        assert!(!filters.accepts(&record("GPL", &["Linux"])));
    }

    #[test]
    fn keyword_searches_the_serialized_record() {
        let mut filters = FilterSet {
            keyword: "memory forensics".to_string(),
            ..FilterSet::default()
        };
        assert!(filters.accepts(&record("GPL", &["Linux"])));

        filters.keyword = "2011-03".to_string();
        assert!(filters.accepts(&record("GPL", &["Linux"])));

        filters.keyword = "no such phrase".to_string();
        assert!(!filters.accepts(&record("GPL", &["Linux"])));
    }

    #[test]
    fn populated_others_alone_keeps_the_filter_set_empty() {
        let filters = FilterSet::with_others(vec!["weird license".to_string()]);
        assert!(filters.is_empty());
        assert!(filters.accepts(&record("GPL", &["Linux"])));
    }

    #[test]
    fn clear_resets_categories_but_keeps_others() {
        let mut filters = FilterSet::with_others(vec!["weird license".to_string()]);
        filters.license.push("gpl".to_string());
        filters.keyword = "volatility".to_string();
        filters.clear();
        assert!(filters.is_empty());
        assert_eq!(filters.others, vec!["weird license".to_string()]);
    }
}
