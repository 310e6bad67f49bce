//! Mouse steering for the top view.
//!
//! The top view is a straight-down orthographic picture of the field, so a
//! terminal cell inside it can be turned into a pointer for the core's pointer
//! targeting: the camera looks down the -y axis with row 0 at the top edge,
//! and one viewport pixel is one terminal cell.

use glam::{Mat4, Vec2, Vec3};

use crate::core::{Camera, GameConfig, PointerInput};
use crate::game_view::Rect;

/// Orthographic camera matching a top view rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopDownCamera {
    rect: Rect,
    camera: Camera,
}

impl TopDownCamera {
    /// Camera for the field of `config` drawn into `rect`
    pub fn new(config: &GameConfig, rect: Rect) -> Self {
        let t = config.field_transform;
        let cols = config.num_cols.max(1) as f32;
        let rows = config.num_rows.max(1) as f32;
        let levels = config.num_levels.max(1) as f32;

        let half_w = cols * t.cell_size * 0.5;
        let half_h = rows * t.cell_size * 0.5;
        let center = t.origin + Vec3::new((cols - 1.0) * 0.5, 0.0, (rows - 1.0) * 0.5) * t.cell_size;

        let height = (levels + 4.0) * t.cell_size;
        let eye = Vec3::new(center.x, t.origin.y + height, center.z);
        let target = Vec3::new(center.x, t.origin.y, center.z);
        let view = Mat4::look_at_rh(eye, target, Vec3::NEG_Z);
        let projection =
            Mat4::orthographic_rh_gl(-half_w, half_w, -half_h, half_h, 0.1, height + 2.0 * t.cell_size);

        Self {
            rect,
            camera: Camera::new(view, projection, Vec2::new(rect.w as f32, rect.h as f32)),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Pointer for a mouse position in terminal cells, `None` outside the top view
    pub fn pointer(&self, column: u16, row: u16) -> Option<PointerInput> {
        if !self.rect.contains(column, row) {
            return None;
        }
        // aim at the middle of the terminal cell
        let x = (column - self.rect.x) as f32 + 0.5;
        let y = (row - self.rect.y) as f32 + 0.5;
        Some(PointerInput::new(x, y, self.camera))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pointer::target_cell;
    use crate::core::Field;

    #[test]
    fn mouse_cells_map_to_field_columns() {
        let config = GameConfig::default();
        let rect = Rect {
            x: 10,
            y: 3,
            w: config.num_cols as u16 * 2,
            h: config.num_rows as u16,
        };
        let camera = TopDownCamera::new(&config, rect);
        let field = Field::new(8, 6, 6);

        for (col, row) in [(0u16, 0u16), (3, 2), (5, 5)] {
            for half in 0..2 {
                let pointer = camera.pointer(rect.x + col * 2 + half, rect.y + row).unwrap();
                assert_eq!(
                    target_cell(&pointer, &field, &config.field_transform),
                    Some((col as i32, row as i32))
                );
            }
        }
    }

    #[test]
    fn outside_the_view_has_no_pointer() {
        let config = GameConfig::default();
        let rect = Rect {
            x: 10,
            y: 3,
            w: 12,
            h: 6,
        };
        let camera = TopDownCamera::new(&config, rect);
        assert!(camera.pointer(9, 3).is_none());
        assert!(camera.pointer(22, 3).is_none());
        assert!(camera.pointer(10, 9).is_none());
        assert!(camera.pointer(21, 8).is_some());
    }
}
