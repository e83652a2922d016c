use serde::Serialize;

use super::date::CalendarDate;

#[derive(Clone, Debug, Serialize)]
pub struct ProjectRecord {
    pub domain: String,
    pub name: String,
    pub project_name: String,
    pub organization: String,
    pub sectors: Vec<String>,
    pub language: Vec<String>,
    pub license: String,
    pub os: Vec<String>,
    pub program: String,
    pub start_date: CalendarDate,
    pub last_update: CalendarDate,
    pub code_location: String,
    pub description: Option<String>,
}

impl ProjectRecord {
    /// Scalar attribute lookup for the configurable grouping attribute.
    /// Unknown attribute names fall back to the domain.
    pub fn region(&self, attribute: &str) -> &str {
        match attribute {
            "domain" => &self.domain,
            "organization" => &self.organization,
            "license" => &self.license,
            "program" => &self.program,
            _ => &self.domain,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub records: Vec<ProjectRecord>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Display order used by both layouts: region ascending, then start date
    /// descending within a region.
    pub fn sort_for_display(&mut self, region_attribute: &str) {
        self.records.sort_by(|a, b| {
            a.region(region_attribute)
                .cmp(b.region(region_attribute))
                .then_with(|| b.start_date.cmp(&a.start_date))
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    /// Distinct region values in display order.
    pub fn regions(&self, region_attribute: &str) -> Vec<String> {
        let mut regions: Vec<String> = Vec::new();
        for record in &self.records {
            let region = record.region(region_attribute);
            if regions.last().map(String::as_str) != Some(region)
                && !regions.iter().any(|known| known == region)
            {
                regions.push(region.to_string());
            }
        }
        regions
    }

    pub fn region_count(&self, region_attribute: &str, region: &str) -> usize {
        self.records
            .iter()
            .filter(|record| record.region(region_attribute) == region)
            .count()
    }

    /// Min start date and max last-update date across all records.
    pub fn date_extent(&self) -> Option<(CalendarDate, CalendarDate)> {
        let min = self.records.iter().map(|record| record.start_date).min()?;
        let max = self.records.iter().map(|record| record.last_update).max()?;
        Some((min, max))
    }

    pub fn find_by_kebab_name(&self, kebab: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| crate::util::kebab_case(&record.name) == kebab)
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, ProjectRecord};
    use crate::catalog::CalendarDate;

    fn record(domain: &str, name: &str, start: &str, last: &str) -> ProjectRecord {
        ProjectRecord {
            domain: domain.to_string(),
            name: name.to_string(),
            project_name: format!("{name} project"),
            organization: "Example Org".to_string(),
            sectors: vec!["Academia".to_string()],
            language: vec!["C".to_string()],
            license: "Apache 2.0".to_string(),
            os: vec!["Linux".to_string()],
            program: "Example".to_string(),
            start_date: CalendarDate::parse(start).expect("start date"),
            last_update: CalendarDate::parse(last).expect("last update"),
            code_location: "https://example.org/code".to_string(),
            description: None,
        }
    }

    fn sample() -> Catalog {
        let mut catalog = Catalog {
            records: vec![
                record("Forensics", "volatility", "2011-03-01", "2015-09-01"),
                record("Architecture", "openstack", "2010-07-01", "2016-01-01"),
                record("Forensics", "sleuthkit", "2008-02-01", "2014-12-01"),
                record("Network Security", "suricata", "2009-12-01", "2016-02-01"),
            ],
        };
        catalog.sort_for_display("domain");
        catalog
    }

    #[test]
    fn sorts_by_region_then_newest_first() {
        let catalog = sample();
        let names: Vec<&str> = catalog
            .records
            .iter()
            .map(|record| record.name.as_str())
            .collect();
        assert_eq!(names, ["openstack", "volatility", "sleuthkit", "suricata"]);
    }

    #[test]
    fn regions_are_distinct_and_ordered() {
        let catalog = sample();
        assert_eq!(
            catalog.regions("domain"),
            ["Architecture", "Forensics", "Network Security"]
        );
    }

    #[test]
    fn region_counts_sum_to_record_count() {
        let catalog = sample();
        let total: usize = catalog
            .regions("domain")
            .iter()
            .map(|region| catalog.region_count("domain", region))
            .sum();
        assert_eq!(total, catalog.len());
    }

    #[test]
    fn date_extent_spans_all_records() {
        let catalog = sample();
        let (min, max) = catalog.date_extent().expect("non-empty catalog");
        assert_eq!(min, CalendarDate::parse("2008-02-01").expect("min"));
        assert_eq!(max, CalendarDate::parse("2016-02-01").expect("max"));
    }

    #[test]
    fn finds_records_by_kebab_name() {
        let catalog = sample();
        let index = catalog.find_by_kebab_name("suricata").expect("known name");
        assert_eq!(catalog.records[index].name, "suricata");
        assert!(catalog.find_by_kebab_name("no-such-project").is_none());
    }

    #[test]
    fn region_attribute_falls_back_to_domain() {
        let catalog = sample();
        let record = &catalog.records[0];
        assert_eq!(record.region("organization"), "Example Org");
        assert_eq!(record.region("unknown attribute"), record.domain);
    }
}
