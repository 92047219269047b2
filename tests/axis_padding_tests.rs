use approx::assert_relative_eq;
use bubble_chart_rs::core::{
    AxisDim, AxisExtent, AxisKind, BubblePoint, BubbleSeries, PlotArea, SizeBy, SizeConfig,
    SizePaddingContributor, SizeValue, pad_axis,
};

fn pixel_series(name: &str, points: Vec<BubblePoint>, min_px: f64, max_px: f64) -> BubbleSeries {
    BubbleSeries::new(name, points).with_size_config(SizeConfig {
        min_size: SizeValue::Pixels(min_px),
        max_size: SizeValue::Pixels(max_px),
        size_by: SizeBy::Width,
        ..SizeConfig::default()
    })
}

fn edge_points() -> Vec<BubblePoint> {
    vec![
        BubblePoint::new(0.0, 1.0, 1.0),
        BubblePoint::new(5.0, 2.0, 5.0),
        BubblePoint::new(10.0, 3.0, 9.0),
    ]
}

#[test]
fn padding_keeps_edge_bubbles_inside_the_axis() {
    let mut axis = AxisExtent::new(0.0, 10.0, 400.0).expect("axis");
    let mut series = pixel_series("s", edge_points(), 10.0, 60.0);
    let plot = PlotArea::new(400.0, 300.0);

    let outcome = pad_axis(&mut axis, AxisDim::X, plot, &mut [&mut series]).expect("pad");
    assert!(outcome.applied);

    let state = SizePaddingContributor::radius_state(&series).expect("radius state");
    for (index, point) in series.points().iter().enumerate() {
        let radius = state.radius_at(index).expect("sized point");
        let position = axis.data_to_pixel(point.x);
        assert!(position - radius >= -1e-9, "left overflow at point {index}");
        assert!(
            position + radius <= axis.len() + 1e-9,
            "right overflow at point {index}"
        );
    }
}

#[test]
fn padding_is_idempotent_without_intervening_changes() {
    let mut axis = AxisExtent::new(0.0, 10.0, 400.0).expect("axis");
    let mut series = pixel_series("s", edge_points(), 10.0, 60.0);
    let plot = PlotArea::new(400.0, 300.0);

    pad_axis(&mut axis, AxisDim::X, plot, &mut [&mut series]).expect("first pass");
    let (min_after_first, max_after_first) = (axis.min(), axis.max());

    pad_axis(&mut axis, AxisDim::X, plot, &mut [&mut series]).expect("second pass");
    assert_relative_eq!(axis.min(), min_after_first, max_relative = 1e-9);
    assert_relative_eq!(axis.max(), max_after_first, max_relative = 1e-9);
}

#[test]
fn logarithmic_axis_is_never_padded() {
    let mut axis = AxisExtent::new(1.0, 100.0, 400.0)
        .expect("axis")
        .with_kind(AxisKind::Logarithmic);
    let mut series = pixel_series(
        "s",
        vec![BubblePoint::new(1.0, 1.0, 1.0), BubblePoint::new(100.0, 2.0, 9.0)],
        10.0,
        60.0,
    );
    let plot = PlotArea::new(400.0, 300.0);

    let outcome = pad_axis(&mut axis, AxisDim::X, plot, &mut [&mut series]).expect("pad");
    assert!(!outcome.applied);
    assert_eq!(axis.min(), 1.0);
    assert_eq!(axis.max(), 100.0);
    // Radii are still computed for rendering.
    assert!(SizePaddingContributor::radius_state(&series).is_some());
}

#[test]
fn degenerate_data_range_skips_padding() {
    let mut axis = AxisExtent::new(5.0, 5.0, 400.0).expect("axis");
    let mut series = pixel_series("s", vec![BubblePoint::new(5.0, 1.0, 3.0)], 10.0, 60.0);
    let plot = PlotArea::new(400.0, 300.0);

    let outcome = pad_axis(&mut axis, AxisDim::X, plot, &mut [&mut series]).expect("pad");
    assert!(!outcome.applied);
    assert_eq!(axis.min(), 5.0);
    assert_eq!(axis.max(), 5.0);
}

#[test]
fn hidden_series_and_all_null_series_contribute_nothing() {
    let mut axis = AxisExtent::new(0.0, 10.0, 400.0).expect("axis");
    let mut hidden = pixel_series("hidden", edge_points(), 10.0, 200.0);
    hidden.set_visible(false);
    let mut r#unsized = pixel_series(
        "unsized",
        vec![BubblePoint::sizeless(0.0, 1.0), BubblePoint::sizeless(10.0, 2.0)],
        10.0,
        200.0,
    );
    let plot = PlotArea::new(400.0, 300.0);

    let outcome = pad_axis(
        &mut axis,
        AxisDim::X,
        plot,
        &mut [&mut hidden, &mut r#unsized],
    )
    .expect("pad");
    assert!(!outcome.applied);
    assert_eq!((axis.min(), axis.max()), (0.0, 10.0));
}

#[test]
fn global_z_range_is_shared_across_series() {
    // The small-z series must size against the combined range, so its
    // largest bubble stays below the other series' maximum.
    let mut axis = AxisExtent::new(0.0, 10.0, 800.0).expect("axis");
    let mut small = pixel_series("small", vec![BubblePoint::new(2.0, 1.0, 10.0)], 10.0, 100.0);
    let mut large = pixel_series("large", vec![BubblePoint::new(8.0, 1.0, 100.0)], 10.0, 100.0);
    let plot = PlotArea::new(800.0, 600.0);

    pad_axis(&mut axis, AxisDim::X, plot, &mut [&mut small, &mut large]).expect("pad");

    let small_radius = SizePaddingContributor::radius_state(&small)
        .and_then(|state| state.radius_at(0))
        .expect("sized");
    let large_radius = SizePaddingContributor::radius_state(&large)
        .and_then(|state| state.radius_at(0))
        .expect("sized");
    assert!(small_radius < large_radius);
}

#[test]
fn user_pins_survive_padding_on_both_sides() {
    let mut axis = AxisExtent::new(0.0, 10.0, 400.0)
        .expect("axis")
        .with_user_min(0.0)
        .with_user_max(10.0);
    let mut series = pixel_series("s", edge_points(), 10.0, 60.0);
    let plot = PlotArea::new(400.0, 300.0);

    let outcome = pad_axis(&mut axis, AxisDim::X, plot, &mut [&mut series]).expect("pad");
    assert!(outcome.applied);
    assert_eq!(axis.min(), 0.0);
    assert_eq!(axis.max(), 10.0);
}

#[test]
fn percent_bounds_resolve_with_minimum_winning() {
    let config = SizeConfig {
        min_size: SizeValue::Percent(50.0),
        max_size: SizeValue::Percent(10.0),
        ..SizeConfig::default()
    };
    let bounds = config
        .resolve_px_bounds(PlotArea::new(200.0, 100.0))
        .expect("resolve");
    assert_eq!(bounds.min_px, 50.0);
    assert_eq!(bounds.max_px, 50.0);
}
