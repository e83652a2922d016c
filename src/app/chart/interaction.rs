use eframe::egui::{Pos2, Rect};

/// Picks the mark under the pointer; overlapping marks resolve to the one
/// whose center is closest, matching circle hit-testing in domain mode.
pub(super) fn hovered_mark(marks: &[(usize, Rect, f32)], pointer: Option<Pos2>) -> Option<usize> {
    let pointer_pos = pointer?;
    marks
        .iter()
        .filter(|(_, mark, _)| mark.contains(pointer_pos))
        .map(|(index, mark, _)| (*index, mark.center().distance(pointer_pos)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::hovered_mark;
    use eframe::egui::{Rect, pos2, vec2};

    fn mark(x: f32, y: f32) -> Rect {
        Rect::from_min_size(pos2(x, y), vec2(15.0, 15.0))
    }

    #[test]
    fn picks_the_closest_overlapping_mark() {
        let marks = vec![(0, mark(0.0, 0.0), 1.0), (1, mark(10.0, 0.0), 1.0)];
        assert_eq!(hovered_mark(&marks, Some(pos2(12.0, 7.0))), Some(1));
        assert_eq!(hovered_mark(&marks, Some(pos2(3.0, 7.0))), Some(0));
    }

    #[test]
    fn misses_outside_every_mark() {
        let marks = vec![(0, mark(0.0, 0.0), 1.0)];
        assert_eq!(hovered_mark(&marks, Some(pos2(100.0, 100.0))), None);
        assert_eq!(hovered_mark(&marks, None), None);
    }
}
