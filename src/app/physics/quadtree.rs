use eframe::egui::{Vec2, vec2};

const QUADTREE_LEAF_CAPACITY: usize = 8;
const QUADTREE_MAX_DEPTH: usize = 10;

#[derive(Clone, Copy)]
pub(super) struct QuadBounds {
    pub(super) center: Vec2,
    pub(super) half_extent: f32,
}

impl QuadBounds {
    fn from_points(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let center = (min + max) * 0.5;
        let span_x = (max.x - min.x).max(1.0);
        let span_y = (max.y - min.y).max(1.0);
        let half_extent = (span_x.max(span_y) * 0.5) + 1.0;

        Some(Self {
            center,
            half_extent,
        })
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let offset = match quadrant {
            0 => vec2(-quarter, -quarter),
            1 => vec2(quarter, -quarter),
            2 => vec2(-quarter, quarter),
            _ => vec2(quarter, quarter),
        };

        Self {
            center: self.center + offset,
            half_extent: quarter,
        }
    }

    fn quadrant_for(self, point: Vec2) -> usize {
        let right = point.x >= self.center.x;
        let upper = point.y >= self.center.y;
        match (right, upper) {
            (false, false) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (true, true) => 3,
        }
    }

    fn intersects_range(self, min: Vec2, max: Vec2) -> bool {
        !(self.center.x + self.half_extent < min.x
            || self.center.x - self.half_extent > max.x
            || self.center.y + self.half_extent < min.y
            || self.center.y - self.half_extent > max.y)
    }
}

pub(super) struct QuadNode {
    bounds: QuadBounds,
    indices: Vec<usize>,
    children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let bounds = QuadBounds::from_points(positions)?;
        let indices = (0..positions.len()).collect::<Vec<_>>();
        Some(Self::build_node(bounds, indices, positions, 0))
    }

    fn build_node(
        bounds: QuadBounds,
        indices: Vec<usize>,
        positions: &[Vec2],
        depth: usize,
    ) -> Self {
        let mut node = Self {
            bounds,
            indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= QUADTREE_MAX_DEPTH || node.indices.len() <= QUADTREE_LEAF_CAPACITY {
            return node;
        }

        let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
        for &index in &node.indices {
            let quadrant = bounds.quadrant_for(positions[index]);
            buckets[quadrant].push(index);
        }

        let non_empty = buckets.iter().filter(|bucket| !bucket.is_empty()).count();
        if non_empty <= 1 {
            return node;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }

            let child_bounds = bounds.child(quadrant);
            node.children[quadrant] = Some(Box::new(Self::build_node(
                child_bounds,
                bucket,
                positions,
                depth + 1,
            )));
        }
        node.indices.clear();
        node
    }

    /// Visits every stored index whose quadrant could intersect the query
    /// box, skipping whole subtrees whose bounds fall outside it.
    pub(super) fn visit_range(&self, min: Vec2, max: Vec2, visit: &mut impl FnMut(usize)) {
        if !self.bounds.intersects_range(min, max) {
            return;
        }

        for &index in &self.indices {
            visit(index);
        }

        for child in self.children.iter().flatten() {
            child.visit_range(min, max, visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QuadNode;
    use eframe::egui::{Vec2, vec2};

    fn grid(side: usize, spacing: f32) -> Vec<Vec2> {
        let mut points = Vec::new();
        for row in 0..side {
            for col in 0..side {
                points.push(vec2(col as f32 * spacing, row as f32 * spacing));
            }
        }
        points
    }

    fn collect_range(tree: &QuadNode, min: Vec2, max: Vec2) -> Vec<usize> {
        let mut found = Vec::new();
        tree.visit_range(min, max, &mut |index| found.push(index));
        found.sort_unstable();
        found.dedup();
        found
    }

    #[test]
    fn empty_input_builds_no_tree() {
        assert!(QuadNode::build(&[]).is_none());
    }

    #[test]
    fn range_visit_finds_every_point_in_range() {
        let points = grid(10, 10.0);
        let tree = QuadNode::build(&points).expect("tree over grid");

        let min = vec2(15.0, 15.0);
        let max = vec2(45.0, 45.0);
        let found = collect_range(&tree, min, max);

        let expected: Vec<usize> = points
            .iter()
            .enumerate()
            .filter(|(_, point)| {
                point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
            })
            .map(|(index, _)| index)
            .collect();

        for index in &expected {
            assert!(found.contains(index), "missing point {index}");
        }
    }

    #[test]
    fn out_of_bounds_query_visits_nothing() {
        let points = grid(4, 10.0);
        let tree = QuadNode::build(&points).expect("tree over grid");
        let found = collect_range(&tree, vec2(1000.0, 1000.0), vec2(1100.0, 1100.0));
        assert!(found.is_empty());
    }

    #[test]
    fn coincident_points_are_all_reachable() {
        let points = vec![vec2(3.0, 3.0); 40];
        let tree = QuadNode::build(&points).expect("tree over coincident points");
        let found = collect_range(&tree, vec2(0.0, 0.0), vec2(6.0, 6.0));
        assert_eq!(found.len(), points.len());
    }
}
