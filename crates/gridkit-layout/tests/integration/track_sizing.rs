//! Track sizing integration tests
//!
//! These tests verify that resolved tracks:
//! - Never report less than the requested minimum
//! - Split Star space by weight
//! - Apply the scale factor to padding, margins and Absolute lengths

use gridkit_layout::{
    layout_grid, EdgeSizes, Grid, GridLayoutEngine, GridTrack, ItemStyle, Rect, Size,
};

use crate::support::{
    assert_contiguous, assert_near, assert_rect_near, assert_track_sizes, init_tracing, TestElement,
};

#[test]
fn test_result_never_below_minimum() {
    init_tracing();
    let bounds = [
        (Size::ZERO, Size::INFINITE),
        (Size::new(100.0, 80.0), Size::INFINITE),
        (Size::new(10.0, 5.0), Size::new(20.0, 10.0)),
        (Size::new(500.0, 500.0), Size::new(500.0, 500.0)),
    ];

    for (minimum, maximum) in bounds {
        let mut grid = Grid::new(vec![GridTrack::auto(), GridTrack::star(1.0)], vec![]);
        grid.push(TestElement::fixed(ItemStyle::default(), 30.0, 20.0));

        let result = layout_grid(&mut grid, minimum, maximum).unwrap();

        assert!(
            result.size.width >= minimum.width && result.size.height >= minimum.height,
            "size {:?} below minimum {:?}",
            result.size,
            minimum
        );
    }
}

#[test]
fn test_minimum_grows_content_track() {
    init_tracing();
    let mut grid = Grid::new(vec![GridTrack::auto()], vec![GridTrack::auto()]);
    grid.push(TestElement::fixed(ItemStyle::default(), 30.0, 20.0));

    let result = layout_grid(&mut grid, Size::new(100.0, 80.0), Size::INFINITE).unwrap();

    assert_track_sizes(&result.column_spaces, &[100.0]);
    assert_track_sizes(&result.row_spaces, &[80.0]);
    assert_eq!(result.size, Size::new(100.0, 80.0));
}

#[test]
fn test_empty_grid_reports_minimum() {
    init_tracing();
    let mut grid: Grid<TestElement> = Grid::default();

    let result = layout_grid(&mut grid, Size::new(50.0, 60.0), Size::INFINITE).unwrap();

    assert_eq!(result.size, Size::new(50.0, 60.0));
    assert_track_sizes(&result.column_spaces, &[0.0]);
}

#[test]
fn test_auto_column_matches_margin_box() {
    init_tracing();
    let mut grid = Grid::new(vec![GridTrack::auto()], vec![GridTrack::auto()]);
    let mut style = ItemStyle::default();
    style.margin = EdgeSizes::new(2.0, 3.0, 4.0, 5.0);
    grid.push(TestElement::fixed(style, 40.0, 10.0));

    let result = layout_grid(&mut grid, Size::ZERO, Size::INFINITE).unwrap();

    assert_track_sizes(&result.column_spaces, &[48.0]);
    assert_track_sizes(&result.row_spaces, &[16.0]);
    assert_rect_near(grid.children[0].frame(), Rect::new(5.0, 2.0, 40.0, 10.0));
}

#[test]
fn test_star_columns_split_by_weight() {
    init_tracing();
    let mut grid: Grid<TestElement> = Grid::new(
        vec![GridTrack::star(1.0), GridTrack::star(2.0), GridTrack::star(5.0)],
        vec![],
    );

    let result = layout_grid(&mut grid, Size::ZERO, Size::new(800.0, 100.0)).unwrap();

    assert_track_sizes(&result.column_spaces, &[100.0, 200.0, 500.0]);
    assert_contiguous(&result.column_spaces, 0.0);
    let total: f32 = result.column_spaces.iter().map(|s| s.size).sum();
    assert_near(total, 800.0, "star total");
}

#[test]
fn test_star_share_excludes_absolute_and_auto() {
    init_tracing();
    let mut grid = Grid::new(
        vec![
            GridTrack::absolute(100.0),
            GridTrack::auto(),
            GridTrack::star(1.0),
            GridTrack::star(3.0),
        ],
        vec![],
    );
    grid.push(TestElement::fixed(ItemStyle::at(0, 1), 60.0, 10.0));

    let result = layout_grid(&mut grid, Size::ZERO, Size::new(400.0, 100.0)).unwrap();

    assert_track_sizes(&result.column_spaces, &[100.0, 60.0, 60.0, 180.0]);
    assert_contiguous(&result.column_spaces, 0.0);
}

#[test]
fn test_auto_tracks_clipped_to_budget() {
    init_tracing();
    let mut grid = Grid::new(
        vec![GridTrack::absolute(50.0), GridTrack::auto(), GridTrack::auto()],
        vec![],
    );
    grid.push(TestElement::fixed(ItemStyle::at(0, 1), 40.0, 10.0));
    grid.push(TestElement::fixed(ItemStyle::at(0, 2), 40.0, 10.0));

    let result = layout_grid(&mut grid, Size::ZERO, Size::new(110.0, 100.0)).unwrap();

    assert_track_sizes(&result.column_spaces, &[50.0, 40.0, 20.0]);
    assert_rect_near(grid.children[1].frame(), Rect::new(90.0, 0.0, 20.0, 10.0));
}

#[test]
fn test_scale_factor_applies_to_padding_margins_and_lengths() {
    init_tracing();
    let mut grid = Grid::new(vec![GridTrack::absolute(50.0), GridTrack::auto()], vec![])
        .with_padding(EdgeSizes::uniform(5.0))
        .with_scale_factor(2.0);
    let mut style = ItemStyle::at(0, 1);
    style.margin = EdgeSizes::new(0.0, 0.0, 0.0, 5.0);
    grid.push(TestElement::fixed(style, 30.0, 10.0));

    let result = layout_grid(&mut grid, Size::ZERO, Size::new(1000.0, 1000.0)).unwrap();

    assert_track_sizes(&result.column_spaces, &[100.0, 40.0]);
    assert_contiguous(&result.column_spaces, 10.0);
    assert_near(result.row_spaces[0].origin, 10.0, "row origin");
    assert_eq!(result.size, Size::new(160.0, 30.0));
    assert_rect_near(grid.children[0].frame(), Rect::new(120.0, 10.0, 30.0, 10.0));
}

#[test]
fn test_tracks_grow_for_out_of_range_indices() {
    init_tracing();
    let mut grid = Grid::new(vec![GridTrack::auto()], vec![GridTrack::auto()]);
    grid.push(TestElement::fixed(ItemStyle::at(2, 1), 10.0, 10.0));

    let result = layout_grid(&mut grid, Size::ZERO, Size::INFINITE).unwrap();

    assert_eq!(grid.column_count(), 2);
    assert_eq!(grid.row_count(), 3);
    assert_track_sizes(&result.row_spaces, &[0.0, 0.0, 10.0]);
    assert_rect_near(grid.children[0].frame(), Rect::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_measure_matches_layout_without_committing() {
    init_tracing();
    let build = || {
        let mut grid = Grid::new(vec![GridTrack::auto(), GridTrack::star(1.0)], vec![]);
        grid.push(TestElement::label(ItemStyle::default(), 120.0, 10.0));
        grid.push(TestElement::fixed(ItemStyle::default(), 20.0, 40.0));
        grid
    };
    let engine = GridLayoutEngine::default();
    let minimum = Size::new(10.0, 10.0);
    let maximum = Size::new(150.0, f32::INFINITY);

    let measured_grid = build();
    let measured = engine.measure(&measured_grid, minimum, maximum).unwrap();
    assert!(measured_grid.children.iter().all(|c| c.frame.is_none()));
    assert!(measured_grid.columns.iter().all(|t| t.space.size == 0.0));

    let mut laid_out = build();
    let result = engine.layout(&mut laid_out, minimum, maximum).unwrap();
    assert_eq!(measured, result.size);
}
