//! Moving and resizing windows, and following terminal size changes.

mod common;

use common::screen::Screen;
use proptest::prelude::*;
use termwin::{Error, WindowSpec};

#[test]
fn test_move_carries_content() {
    let mut surface = common::surface(40, 12);
    let win = surface
        .create_window(WindowSpec::new(10, 4).at(1, 1))
        .unwrap();
    surface.print(win, 1, 1, "moving").unwrap();

    let mut screen = Screen::new(40, 12);
    screen.feed(&mut surface);
    assert_eq!(screen.row(2), " │moving  │");

    surface.move_window(win, 20, 6).unwrap();
    screen.feed(&mut surface);

    // Old area is blank on the terminal.
    for row in 1..5 {
        assert_eq!(screen.row(row), "", "row {row} not cleared");
    }
    assert_eq!(screen.row(6), format!("{}┌────────┐", " ".repeat(20)));
    assert_eq!(screen.row(7), format!("{}│moving  │", " ".repeat(20)));
    assert_eq!(screen.row(9), format!("{}└────────┘", " ".repeat(20)));
    assert_eq!(surface.char_at(win, 1, 1).unwrap(), Some('m'));
}

#[test]
fn test_move_stores_x_and_y_independently() {
    let mut surface = common::surface(40, 12);
    let win = surface.create_window(WindowSpec::new(5, 3)).unwrap();
    surface.move_window(win, 7, 2).unwrap();
    let window = surface.window(win).unwrap();
    assert_eq!((window.x(), window.y()), (7, 2));
}

#[test]
fn test_move_overlapping_own_area() {
    let mut surface = common::surface(40, 12);
    let win = surface.create_window(WindowSpec::new(10, 4)).unwrap();
    surface.print(win, 1, 1, "abcdefgh").unwrap();
    surface.move_window(win, 2, 1).unwrap();

    let mut screen = Screen::new(40, 12);
    screen.feed(&mut surface);
    assert_eq!(screen.row(0), "");
    assert_eq!(screen.row(2), "  │abcdefgh│");
}

#[test]
fn test_move_out_of_bounds_is_rejected() {
    let mut surface = common::surface(40, 12);
    let win = surface
        .create_window(WindowSpec::new(10, 4).at(1, 1))
        .unwrap();
    surface.print(win, 1, 1, "stay").unwrap();

    let err = surface.move_window(win, 35, 1).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidGeometry {
            x: 35,
            bounds: (40, 12),
            ..
        }
    ));
    let window = surface.window(win).unwrap();
    assert_eq!((window.x(), window.y()), (1, 1));
    assert_eq!(surface.char_at(win, 1, 1).unwrap(), Some('s'));
}

#[test]
fn test_resize_changes_size_without_redrawing_border() {
    let mut surface = common::surface(40, 12);
    let win = surface.create_window(WindowSpec::new(6, 3)).unwrap();
    surface.resize(win, 10, 5).unwrap();

    let window = surface.window(win).unwrap();
    assert_eq!((window.width(), window.height()), (10, 5));
    // The old bottom-right corner stays where it was drawn.
    assert_eq!(surface.char_at(win, 5, 2).unwrap(), Some('┘'));
    assert_eq!(surface.char_at(win, 9, 4).unwrap(), Some(' '));
    surface.print(win, 8, 4, "ok").unwrap();
    assert_eq!(surface.char_at(win, 9, 4).unwrap(), Some('k'));
}

#[test]
fn test_resize_shrink_limits_printing() {
    let mut surface = common::surface(40, 12);
    let win = surface.create_window(WindowSpec::new(10, 5)).unwrap();
    surface.resize(win, 4, 2).unwrap();
    assert!(matches!(
        surface.print(win, 5, 1, "x"),
        Err(Error::InvalidGeometry { .. })
    ));
    surface.print(win, 1, 1, "xyz").unwrap();
    assert_eq!(surface.char_at(win, 3, 1).unwrap(), Some('z'));
}

#[test]
fn test_resize_rejects_bad_sizes() {
    let mut surface = common::surface(40, 12);
    let win = surface
        .create_window(WindowSpec::new(10, 5).at(30, 0))
        .unwrap();
    assert!(surface.resize(win, 11, 5).is_err());
    assert!(surface.resize(win, 0, 5).is_err());
    assert!(surface.resize(win, 10, 13).is_err());
    assert_eq!(surface.window(win).unwrap().width(), 10);
}

#[test]
fn test_terminal_shrink_is_followed() {
    let mut surface = common::surface(40, 12);
    let win = surface.create_window(WindowSpec::new(30, 5)).unwrap();
    surface.print(win, 1, 1, "kept").unwrap();

    surface.backend_mut().resize(20, 8);
    assert_eq!(surface.root().size().unwrap(), (20, 8));
    assert!(surface.create_window(WindowSpec::new(25, 3)).is_err());
    assert_eq!(surface.screen().size(), (20, 8));
    // Content inside the remaining area survives.
    assert_eq!(surface.char_at(win, 1, 1).unwrap(), Some('k'));
    surface.refresh(win).unwrap();
}

#[test]
fn test_terminal_growth_repaints_every_window() {
    let mut surface = common::surface(40, 10);
    let left = surface.create_window(WindowSpec::new(10, 3)).unwrap();
    let right = surface
        .create_window(WindowSpec::new(10, 3).at(20, 0))
        .unwrap();
    surface.print(left, 1, 1, "left").unwrap();
    surface.print(right, 1, 1, "right").unwrap();

    surface.backend_mut().resize(50, 10);
    surface.print(left, 1, 1, "LEFT").unwrap();

    // The resize cleared the terminal; untouched windows come back too.
    let mut screen = Screen::new(50, 10);
    screen.feed(&mut surface);
    assert_eq!(screen.row(0), "┌────────┐          ┌────────┐");
    assert_eq!(screen.row(1), "│LEFT    │          │right   │");
}

#[test]
fn test_create_window_filling_terminal() {
    let mut surface = common::surface(40, 12);
    let win = surface.create_window(WindowSpec::new(40, 12)).unwrap();
    surface.print(win, 38, 10, "x").unwrap();
    assert!(surface.create_window(WindowSpec::new(41, 12)).is_err());
    assert!(surface.create_window(WindowSpec::new(40, 12).at(0, 1)).is_err());
}

// ============================================================================
// Properties
// ============================================================================

/// Window geometry, a target position, and a line of text, all inside 40x20.
fn move_case() -> impl Strategy<Value = (u32, u32, u32, u32, u32, u32, String)> {
    (3u32..=12, 3u32..=8).prop_flat_map(|(w, h)| {
        (
            Just(w),
            Just(h),
            0..=40 - w,
            0..=20 - h,
            0..=40 - w,
            0..=20 - h,
            "[a-z ]{0,12}",
        )
    })
}

proptest! {
    #[test]
    fn prop_move_preserves_every_cell((w, h, x, y, tx, ty, text) in move_case()) {
        let mut surface = common::surface(40, 20);
        let win = surface.create_window(WindowSpec::new(w, h).at(x, y)).unwrap();
        surface.print(win, 1, 1, &text).unwrap();

        let before: Vec<_> = (0..h)
            .flat_map(|ly| (0..w).map(move |lx| (lx, ly)))
            .map(|(lx, ly)| surface.char_at(win, lx, ly).unwrap())
            .collect();

        surface.move_window(win, tx, ty).unwrap();

        let after: Vec<_> = (0..h)
            .flat_map(|ly| (0..w).map(move |lx| (lx, ly)))
            .map(|(lx, ly)| surface.char_at(win, lx, ly).unwrap())
            .collect();
        prop_assert_eq!(before, after);

        let window = surface.window(win).unwrap();
        prop_assert_eq!((window.x(), window.y()), (tx, ty));
    }

    #[test]
    fn prop_geometry_validation_matches_bounds(
        x in 0u32..50,
        y in 0u32..30,
        w in 0u32..50,
        h in 0u32..30,
    ) {
        let mut surface = common::surface(40, 20);
        let fits = w > 0 && h > 0 && x + w <= 40 && y + h <= 20;
        let result = surface.create_window(WindowSpec::new(w, h).at(x, y));
        prop_assert_eq!(result.is_ok(), fits);
    }
}
