use beyond_tetris::core::rotation::rotated_offsets;
use beyond_tetris::core::{check_bounds, check_collision, fix_bounds, template, Field, Piece};
use beyond_tetris::types::{Axis, PieceKind};
use glam::{IVec3, Vec3};
use proptest::prelude::*;

fn arb_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn arb_axis() -> impl Strategy<Value = Axis> {
    prop::sample::select(vec![Axis::X, Axis::Y, Axis::Z])
}

/// Template offsets after a few arbitrary quarter turns
fn arb_offsets() -> impl Strategy<Value = [IVec3; 4]> {
    (arb_kind(), prop::collection::vec(arb_axis(), 0..6)).prop_map(|(kind, turns)| {
        let shape = template(kind);
        turns.iter().fold(shape.offsets, |offsets, &axis| {
            rotated_offsets(&offsets, shape.rotation_center, axis)
        })
    })
}

fn span(offsets: &[IVec3; 4], axis: usize) -> i32 {
    let values = offsets.map(|o| o.to_array()[axis]);
    values.iter().max().unwrap() - values.iter().min().unwrap()
}

proptest! {
    // Correcting a corrected position changes nothing.
    #[test]
    fn fix_bounds_is_idempotent(
        offsets in arb_offsets(),
        x in -12i32..12,
        z in -12i32..12,
        rows in 1usize..9,
        cols in 1usize..9,
    ) {
        let position = Vec3::new(x as f32, 5.0, z as f32);
        let once = fix_bounds(rows, cols, position, &offsets);
        let twice = fix_bounds(rows, cols, once, &offsets);
        prop_assert_eq!(once, twice);
        prop_assert_eq!(once.y, position.y);

        if span(&offsets, 0) < cols as i32 && span(&offsets, 2) < rows as i32 {
            prop_assert!(check_bounds(rows, cols, once, &offsets));
        }
    }

    // Four quarter turns about one axis restore the offsets exactly.
    #[test]
    fn four_turns_are_identity(offsets in arb_offsets(), axis in arb_axis()) {
        let center = Vec3::new(0.0, -1.0, 0.0);
        let mut turned = offsets;
        for _ in 0..4 {
            turned = rotated_offsets(&turned, center, axis);
        }
        prop_assert_eq!(turned, offsets);
    }

    // Clearing level L moves every higher level down by one and empties the top.
    #[test]
    fn compaction_shifts_higher_levels_down(
        fill in prop::collection::vec(any::<bool>(), 6 * 3 * 3),
        cleared in 0usize..6,
    ) {
        let mut field = Field::new(6, 3, 3);
        for (i, filled) in fill.iter().enumerate() {
            if *filled {
                let (level, rest) = (i / 9, i % 9);
                field.set(level as i32, (rest / 3) as i32, (rest % 3) as i32, Some(PieceKind::S));
            }
        }
        let before = field.clone();

        field.clear_and_compact(cleared);

        for level in 0..cleared {
            prop_assert_eq!(field.level(level), before.level(level));
        }
        for level in cleared..5 {
            prop_assert_eq!(field.level(level), before.level(level + 1));
        }
        prop_assert!(field.level(5).iter().all(Option::is_none));
    }

    // A placed piece can never be placed again on the same cells.
    #[test]
    fn placed_cells_block_the_same_piece(
        offsets in arb_offsets(),
        x in 0i32..6,
        z in 0i32..6,
    ) {
        let mut field = Field::new(8, 6, 6);
        let position = fix_bounds(6, 6, Vec3::new(x as f32, 4.0, z as f32), &offsets);
        let piece = Piece { offsets, ..Piece::new(PieceKind::Branch, position) };

        prop_assert!(check_collision(&field, piece.position, &piece.offsets));
        field.place(&piece);
        prop_assert!(!check_collision(&field, piece.position, &piece.offsets));
        prop_assert_eq!(
            field.cells().iter().filter(|c| c.is_some()).count(),
            4
        );
    }
}
