use std::collections::HashMap;

use crate::catalog::CalendarDate;

use super::BAR_HEIGHT;

pub const BAND_PADDING: f32 = 20.0;
const BAR_SPACING: f32 = 1.05;

/// Linear layout: a shared time axis plus one stacked horizontal band per
/// region, each band sized by its member count.
#[derive(Clone, Debug)]
pub struct TimelineGeometry {
    pub x: TimeScale,
    pub bands: Vec<RegionBand>,
    pub total_height: f32,
}

#[derive(Clone, Debug)]
pub struct RegionBand {
    pub region: String,
    /// Label anchor at the top of the band.
    pub label_y: f32,
    pub first_bar: f32,
    pub last_bar: f32,
    slots: HashMap<String, f32>,
}

impl RegionBand {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn height(&self) -> f32 {
        self.last_bar - self.first_bar
    }

    /// Ordinal sub-scale: the unique y offset assigned to a member name.
    pub fn slot_y(&self, name: &str) -> Option<f32> {
        self.slots.get(name).copied()
    }
}

/// Maps day numbers onto a horizontal pixel range.
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    domain: (i32, i32),
    range: (f32, f32),
}

impl TimeScale {
    pub fn new(domain: (i32, i32), range: (f32, f32)) -> Self {
        let domain = if domain.1 > domain.0 {
            domain
        } else {
            (domain.0, domain.0 + 1)
        };
        Self { domain, range }
    }

    pub fn position(&self, day: i32) -> f32 {
        let span = (self.domain.1 - self.domain.0) as f32;
        let t = (day - self.domain.0) as f32 / span;
        self.range.0 + (self.range.1 - self.range.0) * t
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    /// January-first ticks for every year inside the domain.
    pub fn year_ticks(&self) -> Vec<(i32, f32)> {
        let first = CalendarDate::from_day_number(self.domain.0).year();
        let last = CalendarDate::from_day_number(self.domain.1).year();

        let mut ticks = Vec::new();
        for year in first..=last + 1 {
            let Some(start) = CalendarDate::from_ymd(year, 1, 1) else {
                continue;
            };
            let day = start.day_number();
            if day >= self.domain.0 && day <= self.domain.1 {
                ticks.push((year, self.position(day)));
            }
        }
        ticks
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TimelineItem<'a> {
    pub region: &'a str,
    pub name: &'a str,
    pub start_day: i32,
    pub last_day: i32,
}

/// Items must already be in display order; bands come out in `regions` order
/// with members keeping their relative order inside each band.
pub fn compute_timeline(
    items: &[TimelineItem<'_>],
    regions: &[String],
    x_range: (f32, f32),
) -> TimelineGeometry {
    let min_day = items.iter().map(|item| item.start_day).min().unwrap_or(0);
    let max_day = items.iter().map(|item| item.last_day).max().unwrap_or(1);
    let x = TimeScale::new((min_day, max_day), x_range);

    let mut bands = Vec::with_capacity(regions.len());
    let mut y_position = 0.0_f32;
    for region in regions {
        let members: Vec<&str> = items
            .iter()
            .filter(|item| item.region == region)
            .map(|item| item.name)
            .collect();
        let count = members.len().max(1) as f32;

        let first_bar = y_position + BAND_PADDING;
        let last_bar = first_bar + count * BAR_HEIGHT * BAR_SPACING;
        let step = (last_bar - first_bar) / count;

        let slots = members
            .iter()
            .enumerate()
            .map(|(index, name)| (name.to_string(), first_bar + index as f32 * step))
            .collect();

        bands.push(RegionBand {
            region: region.clone(),
            label_y: y_position,
            first_bar,
            last_bar,
            slots,
        });

        y_position = last_bar + BAND_PADDING;
    }

    TimelineGeometry {
        x,
        bands,
        total_height: y_position,
    }
}

#[cfg(test)]
mod tests {
    use super::{BAND_PADDING, TimeScale, TimelineItem, compute_timeline};
    use crate::catalog::CalendarDate;
    use crate::layout::BAR_HEIGHT;

    fn day(value: &str) -> i32 {
        CalendarDate::parse(value).expect("test date").day_number()
    }

    fn sample_items() -> Vec<TimelineItem<'static>> {
        vec![
            TimelineItem {
                region: "Architecture",
                name: "openstack",
                start_day: day("2010-07-01"),
                last_day: day("2016-01-01"),
            },
            TimelineItem {
                region: "Architecture",
                name: "mesos",
                start_day: day("2011-04-01"),
                last_day: day("2015-11-01"),
            },
            TimelineItem {
                region: "Forensics",
                name: "volatility",
                start_day: day("2011-03-01"),
                last_day: day("2015-09-01"),
            },
            TimelineItem {
                region: "Forensics",
                name: "sleuthkit",
                start_day: day("2008-02-01"),
                last_day: day("2014-12-01"),
            },
            TimelineItem {
                region: "Forensics",
                name: "plaso",
                start_day: day("2012-06-01"),
                last_day: day("2016-02-01"),
            },
            TimelineItem {
                region: "Network Security",
                name: "suricata",
                start_day: day("2009-12-01"),
                last_day: day("2016-02-01"),
            },
        ]
    }

    fn regions() -> Vec<String> {
        vec![
            "Architecture".to_string(),
            "Forensics".to_string(),
            "Network Security".to_string(),
        ]
    }

    #[test]
    fn bands_are_sized_by_member_count_with_fixed_padding() {
        let timeline = compute_timeline(&sample_items(), &regions(), (10.0, 960.0));
        assert_eq!(timeline.bands.len(), 3);

        let counts = [2.0_f32, 3.0, 1.0];
        for (band, count) in timeline.bands.iter().zip(counts) {
            assert!((band.height() - count * BAR_HEIGHT * 1.05).abs() < 1e-3);
        }

        for pair in timeline.bands.windows(2) {
            assert!((pair[1].first_bar - pair[0].last_bar - 2.0 * BAND_PADDING).abs() < 1e-3);
            assert!((pair[1].label_y - pair[0].last_bar - BAND_PADDING).abs() < 1e-3);
        }
    }

    #[test]
    fn slots_cover_every_member_uniquely() {
        let items = sample_items();
        let timeline = compute_timeline(&items, &regions(), (10.0, 960.0));

        let total_slots: usize = timeline.bands.iter().map(|band| band.len()).sum();
        assert_eq!(total_slots, items.len());

        for band in &timeline.bands {
            let mut ys: Vec<f32> = items
                .iter()
                .filter(|item| item.region == band.region)
                .map(|item| band.slot_y(item.name).expect("member has a slot"))
                .collect();
            ys.sort_by(f32::total_cmp);
            for pair in ys.windows(2) {
                assert!(pair[1] - pair[0] > BAR_HEIGHT - 1e-3);
            }
            for y in ys {
                assert!(y >= band.first_bar - 1e-3 && y < band.last_bar);
            }
        }
    }

    #[test]
    fn time_scale_spans_the_date_extent() {
        let timeline = compute_timeline(&sample_items(), &regions(), (10.0, 960.0));
        let earliest = day("2008-02-01");
        let latest = day("2016-02-01");
        assert!((timeline.x.position(earliest) - 10.0).abs() < 1e-3);
        assert!((timeline.x.position(latest) - 960.0).abs() < 1e-3);

        let middle = timeline.x.position((earliest + latest) / 2);
        assert!(middle > 10.0 && middle < 960.0);
    }

    #[test]
    fn year_ticks_fall_inside_the_domain_in_order() {
        let timeline = compute_timeline(&sample_items(), &regions(), (0.0, 900.0));
        let ticks = timeline.x.year_ticks();
        assert_eq!(ticks.first().map(|tick| tick.0), Some(2009));
        assert_eq!(ticks.last().map(|tick| tick.0), Some(2016));
        for pair in ticks.windows(2) {
            assert_eq!(pair[1].0, pair[0].0 + 1);
            assert!(pair[1].1 > pair[0].1);
        }
    }

    #[test]
    fn degenerate_domain_does_not_collapse_the_scale() {
        let scale = TimeScale::new((100, 100), (0.0, 500.0));
        let at_start = scale.position(100);
        assert!(at_start.is_finite());
        assert!((at_start - 0.0).abs() < 1e-3);
    }
}
