//! Bounding boxes, canvas ↔ world conversion and the background tile grid.

use bevy::prelude::*;

/// Axis-aligned box in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes. Boxes that only touch do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max().x
            && self.max().x > other.min.x
            && self.min.y < other.max().y
            && self.max().y > other.min.y
    }
}

/// Clamp a box's top-left corner so the whole box stays inside the canvas.
pub fn clamp_to_canvas(position: Vec2, size: Vec2, canvas: Vec2) -> Vec2 {
    Vec2::new(
        position.x.clamp(0.0, (canvas.x - size.x).max(0.0)),
        position.y.clamp(0.0, (canvas.y - size.y).max(0.0)),
    )
}

/// World-space center of a canvas box, for a 2D camera at the origin.
pub fn canvas_to_world(position: Vec2, size: Vec2, canvas: Vec2) -> Vec2 {
    Vec2::new(
        position.x + size.x * 0.5 - canvas.x * 0.5,
        canvas.y * 0.5 - position.y - size.y * 0.5,
    )
}

/// Top-left corners of every background cell. Partial cells at the right and
/// bottom edges are included.
pub fn tile_grid(canvas: Vec2, tile_size: f32) -> impl Iterator<Item = Vec2> {
    let tiles_x = (canvas.x / tile_size).ceil() as u32;
    let tiles_y = (canvas.y / tile_size).ceil() as u32;
    (0..tiles_y).flat_map(move |y| {
        (0..tiles_x).map(move |x| Vec2::new(x as f32 * tile_size, y as f32 * tile_size))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn overlap_is_symmetric() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(32.0, 32.0));
        let b = Aabb::new(Vec2::new(20.0, 25.0), Vec2::new(12.0, 16.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(32.0, 32.0));
        let right = Aabb::new(Vec2::new(32.0, 0.0), Vec2::new(12.0, 16.0));
        let below = Aabb::new(Vec2::new(0.0, 32.0), Vec2::new(12.0, 16.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn overlap_needs_both_axes() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(32.0, 32.0));
        let same_column = Aabb::new(Vec2::new(10.0, 100.0), Vec2::new(12.0, 16.0));
        assert!(!a.overlaps(&same_column));
    }

    #[test]
    fn clamp_keeps_box_inside() {
        let size = Vec2::splat(32.0);
        assert_eq!(clamp_to_canvas(Vec2::new(-5.0, -9.0), size, CANVAS), Vec2::ZERO);
        assert_eq!(
            clamp_to_canvas(Vec2::new(900.0, 700.0), size, CANVAS),
            Vec2::new(768.0, 568.0)
        );
        assert_eq!(
            clamp_to_canvas(Vec2::new(100.0, 200.0), size, CANVAS),
            Vec2::new(100.0, 200.0)
        );
    }

    #[test]
    fn world_center_of_canvas_corners() {
        let size = Vec2::splat(32.0);
        assert_eq!(canvas_to_world(Vec2::ZERO, size, CANVAS), Vec2::new(-384.0, 284.0));
        assert_eq!(
            canvas_to_world(Vec2::new(768.0, 568.0), size, CANVAS),
            Vec2::new(384.0, -284.0)
        );
    }

    #[test]
    fn tile_grid_covers_partial_rows() {
        let tiles: Vec<Vec2> = tile_grid(CANVAS, 32.0).collect();
        // 800/32 = 25 columns, 600/32 = 18.75 -> 19 rows
        assert_eq!(tiles.len(), 25 * 19);
        assert_eq!(tiles[0], Vec2::ZERO);
        assert_eq!(*tiles.last().unwrap(), Vec2::new(768.0, 576.0));
    }
}
