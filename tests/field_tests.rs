//! Field, catalog, collision and rotation behavior through the public API

use beyond_tetris::core::rotation::{rotated_offsets, try_rotate};
use beyond_tetris::core::{
    check_bounds, check_collision, detect_collision, fix_bounds, template, Field, Piece, CATALOG,
};
use beyond_tetris::types::{Axis, PieceKind};
use glam::{IVec3, Vec3};

#[test]
fn test_new_field_is_empty() {
    let field = Field::new(8, 6, 6);
    assert_eq!(field.cells().len(), 8 * 6 * 6);
    assert!(field.cells().iter().all(Option::is_none));
    assert_eq!(field.get(8, 0, 0), None);
    assert_eq!(field.get(0, 0, 0), Some(None));
}

#[test]
fn test_clearing_a_level_drops_everything_above() {
    let mut field = Field::new(5, 3, 3);
    field.fill_level(1, PieceKind::O);
    field.set(2, 0, 0, Some(PieceKind::T));
    field.set(4, 2, 2, Some(PieceKind::I));

    assert_eq!(field.scan_and_clear_all(), 1);

    assert_eq!(field.get(1, 0, 0), Some(Some(PieceKind::T)));
    assert_eq!(field.get(3, 2, 2), Some(Some(PieceKind::I)));
    assert!(field.level(4).iter().all(Option::is_none));
    assert!(!field.is_level_full(1));
}

#[test]
fn test_adjacent_full_levels_clear_in_one_scan() {
    let mut field = Field::new(6, 2, 2);
    field.fill_level(0, PieceKind::L);
    field.fill_level(1, PieceKind::S);
    field.fill_level(2, PieceKind::T);
    field.set(3, 1, 1, Some(PieceKind::I));

    assert_eq!(field.scan_and_clear_all(), 3);
    assert_eq!(field.get(0, 1, 1), Some(Some(PieceKind::I)));
    assert_eq!(field.column_height(1, 1), 1);
    assert_eq!(field.column_height(0, 0), 0);
}

#[test]
fn test_catalog_is_ordered_by_id() {
    for (i, shape) in CATALOG.iter().enumerate() {
        assert_eq!(shape.id() as usize, i + 1);
        assert_eq!(template(shape.kind), shape);
        assert!(shape.offsets.contains(&IVec3::ZERO));
        assert_eq!(shape.rotation_center, Vec3::new(0.0, -1.0, 0.0));
    }
}

#[test]
fn test_bounds_check_matches_footprint() {
    let i = template(PieceKind::I).offsets;
    let s = template(PieceKind::S).offsets;

    assert!(check_bounds(6, 6, Vec3::new(5.0, 7.0, 5.0), &i));
    assert!(!check_bounds(6, 6, Vec3::new(6.0, 7.0, 5.0), &i));
    assert!(!check_bounds(6, 6, Vec3::new(4.0, 7.0, 0.0), &s));
    assert!(check_bounds(6, 6, Vec3::new(3.0, 7.0, 0.0), &s));
}

#[test]
fn test_fix_bounds_pulls_pieces_back_inside() {
    let s = template(PieceKind::S).offsets;
    let fixed = fix_bounds(6, 6, Vec3::new(5.0, 7.0, -2.0), &s);
    assert_eq!(fixed, Vec3::new(3.0, 7.0, 0.0));
    assert!(check_bounds(6, 6, fixed, &s));
}

#[test]
fn test_collision_with_stack_and_floor() {
    let mut field = Field::new(8, 6, 6);
    field.set(0, 2, 2, Some(PieceKind::O));
    let o = template(PieceKind::O).offsets;

    // resting right above the occupied cell
    assert!(check_collision(&field, Vec3::new(2.0, 2.0, 2.0), &o));
    assert!(!check_collision(&field, Vec3::new(2.0, 1.0, 2.0), &o));
    assert!(detect_collision(&field, Vec3::new(2.0, 2.0, 2.0), &o, 1.0));
    assert!(!detect_collision(&field, Vec3::new(3.0, 2.0, 3.0), &o, 1.0));
    assert!(detect_collision(&field, Vec3::new(3.0, 1.0, 3.0), &o, 1.0));
}

#[test]
fn test_rotation_is_reversible_and_stays_inside() {
    let field = Field::new(8, 6, 6);
    let piece = Piece::new(PieceKind::L, Vec3::new(2.0, 6.0, 2.0));

    let mut turned = piece;
    for _ in 0..4 {
        turned = try_rotate(&turned, &field, Axis::Y).expect("open field");
        assert!(check_bounds(6, 6, turned.position, &turned.offsets));
    }
    assert_eq!(turned.offsets, piece.offsets);
}

#[test]
fn test_rotation_into_wall_is_shifted_back() {
    let field = Field::new(8, 6, 6);
    // S spans x 0..=2; a quarter turn about y swings it to negative z
    let piece = Piece::new(PieceKind::S, Vec3::new(0.0, 6.0, 0.0));
    let rotated = try_rotate(&piece, &field, Axis::Y).expect("shifted inside");

    assert_eq!(
        rotated.offsets,
        rotated_offsets(&piece.offsets, piece.rotation_center, Axis::Y)
    );
    assert!(check_bounds(6, 6, rotated.position, &rotated.offsets));
    assert!(rotated.cells().iter().all(|c| c.z >= 0));
}
