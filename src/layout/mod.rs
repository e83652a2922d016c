//! Pure geometry for the two layout modes. Nothing in here touches the
//! rendering surface; the chart adapter consumes the positions and outlines
//! these modules produce.

mod polygon;
mod timeline;
mod wheel;

pub use polygon::point_in_polygon;
pub use timeline::{
    BAND_PADDING, RegionBand, TimeScale, TimelineGeometry, TimelineItem, compute_timeline,
};
pub use wheel::{
    INNER_RADIUS, LABEL_DISTANCE, OUTER_RADIUS, PAD_ANGLE, RegionSlice, WheelGeometry,
    compute_wheel, slice_direction,
};

/// Node marks share one fixed footprint in both modes.
pub const BAR_HEIGHT: f32 = 15.0;
pub const NODE_RADIUS: f32 = BAR_HEIGHT / 2.0;
pub const COLLISION_PADDING: f32 = 5.0;
