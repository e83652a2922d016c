use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

pub const INNER_RADIUS: f32 = 100.0;
pub const OUTER_RADIUS: f32 = 225.0;
pub const PAD_ANGLE: f32 = 0.1;
pub const LABEL_DISTANCE: f32 = 30.0;

const ARC_SAMPLES: usize = 24;

/// Radial layout of the grouping attribute: one equal-angle annular slice per
/// region, each with a sampled boundary polygon and a centroid.
#[derive(Clone, Debug)]
pub struct WheelGeometry {
    pub slices: Vec<RegionSlice>,
}

#[derive(Clone, Debug)]
pub struct RegionSlice {
    pub region: String,
    /// Angles follow the pie convention: zero at 12 o'clock, clockwise.
    pub start_angle: f32,
    pub end_angle: f32,
    /// Annular-sector outline around the wheel center: padded outer arc
    /// forward, padded inner arc backward.
    pub polygon: Vec<Vec2>,
    pub centroid: Vec2,
}

impl RegionSlice {
    pub fn mid_angle(&self) -> f32 {
        (self.start_angle + self.end_angle) * 0.5
    }

    pub fn angular_span(&self) -> f32 {
        self.end_angle - self.start_angle
    }
}

/// Unit direction for a clockwise-from-noon angle.
pub fn slice_direction(angle: f32) -> Vec2 {
    vec2(angle.sin(), -angle.cos())
}

pub fn compute_wheel(regions: &[String]) -> WheelGeometry {
    let count = regions.len().max(1);
    let step = TAU / count as f32;

    let slices = regions
        .iter()
        .enumerate()
        .map(|(index, region)| {
            let start_angle = index as f32 * step;
            let end_angle = start_angle + step;
            RegionSlice {
                region: region.clone(),
                start_angle,
                end_angle,
                polygon: sector_polygon(start_angle, end_angle),
                centroid: sector_centroid(start_angle, end_angle),
            }
        })
        .collect();

    WheelGeometry { slices }
}

fn padded(start_angle: f32, end_angle: f32) -> (f32, f32) {
    let half_pad = (PAD_ANGLE * 0.5).min((end_angle - start_angle) * 0.5);
    (start_angle + half_pad, end_angle - half_pad)
}

fn sector_polygon(start_angle: f32, end_angle: f32) -> Vec<Vec2> {
    let (a0, a1) = padded(start_angle, end_angle);
    let mut points = Vec::with_capacity(2 * (ARC_SAMPLES + 1));

    for sample in 0..=ARC_SAMPLES {
        let t = sample as f32 / ARC_SAMPLES as f32;
        let angle = a0 + (a1 - a0) * t;
        points.push(slice_direction(angle) * OUTER_RADIUS);
    }
    for sample in (0..=ARC_SAMPLES).rev() {
        let t = sample as f32 / ARC_SAMPLES as f32;
        let angle = a0 + (a1 - a0) * t;
        points.push(slice_direction(angle) * INNER_RADIUS);
    }

    points
}

/// Centroid of the padded annular sector:
/// `r = (2/3) * (R^3 - r^3) / (R^2 - r^2) * sin(h) / h`
/// along the mid-angle direction, with `h` the half-angle of the sector.
fn sector_centroid(start_angle: f32, end_angle: f32) -> Vec2 {
    let (a0, a1) = padded(start_angle, end_angle);
    let mid = (a0 + a1) * 0.5;
    let half = (a1 - a0) * 0.5;

    let chord_ratio = if half.abs() < 1e-4 {
        1.0
    } else {
        half.sin() / half
    };
    let radial = (2.0 / 3.0)
        * (OUTER_RADIUS.powi(3) - INNER_RADIUS.powi(3))
        / (OUTER_RADIUS.powi(2) - INNER_RADIUS.powi(2))
        * chord_ratio;
    // A near-full slice pulls the raw formula inside the hole; the centroid
    // must stay inside the annular band so nodes can seed there.
    let radial = radial.clamp(
        INNER_RADIUS + super::BAR_HEIGHT,
        OUTER_RADIUS - super::BAR_HEIGHT,
    );

    slice_direction(mid) * radial
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use super::{INNER_RADIUS, OUTER_RADIUS, compute_wheel};
    use crate::layout::point_in_polygon;

    fn regions(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn three_regions_make_equal_third_slices() {
        let wheel = compute_wheel(&regions(&["Architecture", "Forensics", "Framework"]));
        assert_eq!(wheel.slices.len(), 3);
        for slice in &wheel.slices {
            assert!((slice.angular_span() - TAU / 3.0).abs() < 1e-5);
        }
        assert!((wheel.slices[1].start_angle - TAU / 3.0).abs() < 1e-5);
        assert!((wheel.slices[2].end_angle - TAU).abs() < 1e-4);
    }

    #[test]
    fn centroid_lies_inside_its_slice_polygon() {
        for count in 1..=8 {
            let names: Vec<String> = (0..count).map(|index| format!("region-{index}")).collect();
            let wheel = compute_wheel(&names);
            for slice in &wheel.slices {
                assert!(
                    point_in_polygon(slice.centroid, &slice.polygon),
                    "centroid of {} escaped its polygon with {count} regions",
                    slice.region
                );
            }
        }
    }

    #[test]
    fn centroid_sits_between_inner_and_outer_radius() {
        let wheel = compute_wheel(&regions(&["a", "b", "c", "d"]));
        for slice in &wheel.slices {
            let radial = slice.centroid.length();
            assert!(radial > INNER_RADIUS && radial < OUTER_RADIUS);
        }
    }

    #[test]
    fn polygon_stays_in_the_annular_band() {
        let wheel = compute_wheel(&regions(&["a", "b", "c"]));
        for slice in &wheel.slices {
            for point in &slice.polygon {
                let radial = point.length();
                assert!(radial > INNER_RADIUS - 1e-3 && radial < OUTER_RADIUS + 1e-3);
            }
        }
    }

    #[test]
    fn neighboring_centroids_do_not_coincide() {
        let wheel = compute_wheel(&regions(&["a", "b"]));
        let gap = (wheel.slices[0].centroid - wheel.slices[1].centroid).length();
        assert!(gap > INNER_RADIUS);
    }
}
