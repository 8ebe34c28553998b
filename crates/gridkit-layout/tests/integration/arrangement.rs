//! Arrangement integration tests
//!
//! These tests verify committed frames:
//! - Alignment within the available area
//! - Content stretch for image-like children
//! - Collapsed children and dynamic element types

use gridkit_layout::{
    layout_grid, Alignment, ContentStretch, EdgeSizes, Grid, GridElement, GridTrack, ItemStyle,
    Rect, Size, Visibility,
};

use crate::support::{assert_rect_near, assert_track_sizes, init_tracing, TestElement};

/// Lay out one child in a single 100x50 Absolute cell and return its frame.
fn frame_in_fixed_cell(child: TestElement) -> Rect {
    let mut grid = Grid::new(vec![GridTrack::absolute(100.0)], vec![GridTrack::absolute(50.0)]);
    grid.push(child);
    layout_grid(&mut grid, Size::ZERO, Size::INFINITE).unwrap();
    grid.children[0].frame()
}

#[test]
fn test_alignment_in_cell() {
    init_tracing();
    let cases = [
        (Alignment::Start, Alignment::Start, Rect::new(0.0, 0.0, 20.0, 10.0)),
        (Alignment::End, Alignment::End, Rect::new(80.0, 40.0, 20.0, 10.0)),
        (Alignment::Center, Alignment::Center, Rect::new(40.0, 20.0, 20.0, 10.0)),
        (Alignment::Stretch, Alignment::Start, Rect::new(0.0, 0.0, 100.0, 10.0)),
        (Alignment::End, Alignment::Stretch, Rect::new(80.0, 0.0, 20.0, 50.0)),
    ];

    for (horizontal, vertical, expected) in cases {
        let style = ItemStyle::default().aligned(horizontal, vertical);
        let frame = frame_in_fixed_cell(TestElement::fixed(style, 20.0, 10.0));
        assert_rect_near(frame, expected);
    }
}

#[test]
fn test_oversized_child_clamped_to_cell() {
    init_tracing();
    let style = ItemStyle::default().aligned(Alignment::Center, Alignment::End);
    let frame = frame_in_fixed_cell(TestElement::fixed(style, 300.0, 90.0));
    assert_rect_near(frame, Rect::new(0.0, 0.0, 100.0, 50.0));
}

#[test]
fn test_stretch_fills_area_minus_margins() {
    init_tracing();
    let mut grid = Grid::new(
        vec![GridTrack::star(1.0), GridTrack::star(1.0)],
        vec![GridTrack::absolute(50.0)],
    );
    let mut style = ItemStyle::at(0, 1);
    style.margin = EdgeSizes::uniform(5.0);
    grid.push(TestElement::fixed(style, 10.0, 10.0));

    layout_grid(&mut grid, Size::ZERO, Size::new(200.0, 50.0)).unwrap();

    assert_rect_near(grid.children[0].frame(), Rect::new(105.0, 5.0, 90.0, 40.0));
}

#[test]
fn test_image_stretch_policies() {
    init_tracing();
    let intrinsic = Size::new(100.0, 50.0);
    let in_square = |stretch| {
        let mut grid = Grid::new(
            vec![GridTrack::absolute(200.0)],
            vec![GridTrack::absolute(200.0)],
        );
        grid.push(TestElement::picture(ItemStyle::default(), intrinsic, stretch));
        layout_grid(&mut grid, Size::ZERO, Size::INFINITE).unwrap();
        grid.children[0].frame()
    };

    assert_rect_near(in_square(ContentStretch::Fill), Rect::new(0.0, 0.0, 200.0, 200.0));
    assert_rect_near(in_square(ContentStretch::UniformToFill), Rect::new(0.0, 0.0, 200.0, 200.0));
    assert_rect_near(in_square(ContentStretch::Uniform), Rect::new(0.0, 50.0, 200.0, 100.0));
    assert_rect_near(in_square(ContentStretch::None), Rect::new(50.0, 75.0, 100.0, 50.0));
}

#[test]
fn test_image_respects_explicit_alignment() {
    init_tracing();
    let style = ItemStyle::default().aligned(Alignment::Start, Alignment::End);
    let frame = frame_in_fixed_cell(TestElement::picture(
        style,
        Size::new(40.0, 40.0),
        ContentStretch::Uniform,
    ));
    assert_rect_near(frame, Rect::new(0.0, 0.0, 50.0, 50.0));
}

#[test]
fn test_collapsed_child_is_skipped() {
    init_tracing();
    let mut grid = Grid::new(vec![GridTrack::auto()], vec![GridTrack::auto()]);
    let mut hidden = ItemStyle::default();
    hidden.visibility = Visibility::Collapsed;
    grid.push(TestElement::fixed(hidden, 100.0, 100.0));
    grid.push(TestElement::fixed(ItemStyle::default(), 20.0, 10.0));

    let result = layout_grid(&mut grid, Size::ZERO, Size::INFINITE).unwrap();

    assert_eq!(result.size, Size::new(20.0, 10.0));
    assert_eq!(result.placements[1], result.placements[0]);
    assert_eq!(grid.children[0].measure_calls.get(), 0);
    assert_rect_near(grid.children[0].frame(), Rect::new(0.0, 0.0, 0.0, 0.0));
    assert_rect_near(grid.children[1].frame(), Rect::new(0.0, 0.0, 20.0, 10.0));
}

#[test]
fn test_boxed_trait_objects() {
    init_tracing();
    let mut grid: Grid<Box<dyn GridElement>> =
        Grid::new(vec![GridTrack::auto(), GridTrack::auto()], vec![]);
    grid.push(Box::new(TestElement::fixed(ItemStyle::default(), 30.0, 10.0)));
    grid.push(Box::new(TestElement::picture(
        ItemStyle::default(),
        Size::new(16.0, 16.0),
        ContentStretch::None,
    )));

    let result = layout_grid(&mut grid, Size::ZERO, Size::INFINITE).unwrap();

    assert_track_sizes(&result.column_spaces, &[30.0, 16.0]);
    assert_track_sizes(&result.row_spaces, &[16.0]);
}
