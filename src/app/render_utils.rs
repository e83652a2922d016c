use eframe::egui::{Color32, Pos2, Rect, Vec2};

/// Ordinal region palette, assigned in region display order and cycled past
/// six regions.
const REGION_PALETTE: [Color32; 6] = [
    Color32::from_rgb(0x4d, 0x61, 0x62),
    Color32::from_rgb(0x0f, 0x75, 0x72),
    Color32::from_rgb(0x77, 0x9d, 0x9d),
    Color32::from_rgb(0x22, 0x32, 0x42),
    Color32::from_rgb(0x66, 0x69, 0x76),
    Color32::from_rgb(0xbe, 0xbe, 0xc4),
];

pub(super) const LABEL_BAND_COLOR: Color32 = Color32::from_rgb(0xb5, 0xbd, 0xc3);
pub(super) const BACKDROP_COLOR: Color32 = Color32::from_rgb(19, 23, 29);

pub(super) fn region_color(index: usize) -> Color32 {
    REGION_PALETTE[index % REGION_PALETTE.len()]
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn with_opacity(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * factor) as u8,
    )
}

pub(super) fn rotate_vec(value: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos * value.x - sin * value.y, sin * value.x + cos * value.y)
}

/// Uniformly scales the virtual canvas into the available rect, centered.
#[derive(Clone, Copy, Debug)]
pub(super) struct CanvasTransform {
    offset: Vec2,
    pub(super) scale: f32,
}

impl CanvasTransform {
    pub(super) fn fit(rect: Rect, virtual_size: Vec2) -> Self {
        let scale = (rect.width() / virtual_size.x)
            .min(rect.height() / virtual_size.y)
            .clamp(0.05, 1.6);
        let offset = rect.center().to_vec2() - virtual_size * 0.5 * scale;
        Self { offset, scale }
    }

    pub(super) fn to_screen(&self, virtual_pos: Vec2) -> Pos2 {
        (self.offset + virtual_pos * self.scale).to_pos2()
    }

    pub(super) fn from_screen(&self, screen: Pos2) -> Vec2 {
        (screen.to_vec2() - self.offset) / self.scale
    }
}
