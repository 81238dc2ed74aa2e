use plotaxes_common::range::{AxisRange, AxisScalar};
use plotaxes_common::types::{AxisTruncationConfig, BoundTruncation, PlotOrientation, TruncatedBound};
use plotaxes_guides::truncation::{
    truncation_layout, truncation_shapes, HighlightStyle, ShapeRef, ShapeSpan,
};
use plotaxes_scales::config::ExtensionOptions;
use plotaxes_scales::truncation::{derive_truncation_config, LogScaleAxes, PlotAxisRanges};
use rstest::rstest;

fn config_from_bits(bits: u8) -> AxisTruncationConfig {
    AxisTruncationConfig {
        independent_axis: BoundTruncation::new(bits & 1 != 0, bits & 2 != 0),
        dependent_axis: BoundTruncation::new(bits & 4 != 0, bits & 8 != 0),
    }
}

#[rstest]
fn test_one_shape_per_flag(
    #[values(PlotOrientation::Vertical, PlotOrientation::Horizontal)] orientation: PlotOrientation,
    #[values(0, 1, 2, 3, 5, 6, 9, 10, 12, 15)] bits: u8,
) {
    let raw = AxisRange::number(10.0, 20.0);
    let extended = AxisRange::number(9.5, 20.5);
    let config = config_from_bits(bits);

    let shapes = truncation_shapes(
        orientation,
        Some(&raw),
        Some(&raw),
        Some(&extended),
        Some(&extended),
        &config,
        &HighlightStyle::default(),
    );

    assert_eq!(shapes.len(), bits.count_ones() as usize);
    for shape in &shapes {
        let on_x = bound_on_x(orientation, shape.bound);
        let (data, across) = if on_x {
            (&shape.x, &shape.y)
        } else {
            (&shape.y, &shape.x)
        };
        assert_eq!(data.reference, if on_x { ShapeRef::X } else { ShapeRef::Y });
        assert_eq!(*across, ShapeSpan::paper());
        if shape.bound.is_min() {
            assert_eq!(data.start, AxisScalar::Number(9.5));
            assert_eq!(data.end, AxisScalar::Number(10.0));
        } else {
            assert_eq!(data.start, AxisScalar::Number(20.5));
            assert_eq!(data.end, AxisScalar::Number(20.0));
        }
    }
}

fn bound_on_x(orientation: PlotOrientation, bound: TruncatedBound) -> bool {
    bound.is_independent() == (orientation == PlotOrientation::Vertical)
}

#[test]
fn test_requested_range_to_layout() {
    let data = PlotAxisRanges::new(
        Some(AxisRange::number(0.0, 50.0)),
        Some(AxisRange::number(0.0, 1000.0)),
    );
    let requested = PlotAxisRanges::new(
        Some(AxisRange::number(10.0, 50.0)),
        Some(AxisRange::number(0.0, 200.0)),
    );
    let config = derive_truncation_config(&data, &requested, &LogScaleAxes::default());
    assert_eq!(config.independent_axis, BoundTruncation::new(true, false));
    assert_eq!(config.dependent_axis, BoundTruncation::new(false, true));

    let layout = truncation_layout(
        PlotOrientation::Horizontal,
        &requested,
        &config,
        &ExtensionOptions::default(),
        &ExtensionOptions::default(),
        &HighlightStyle::default(),
    )
    .unwrap();

    let bounds: Vec<_> = layout.shapes.iter().map(|shape| shape.bound).collect();
    assert_eq!(
        bounds,
        vec![TruncatedBound::IndependentMin, TruncatedBound::DependentMax]
    );
    // Horizontal bars put the independent axis on y
    assert_eq!(layout.shapes[0].y.reference, ShapeRef::Y);
    assert_eq!(layout.shapes[0].y.end, AxisScalar::Number(10.0));
    assert_eq!(layout.shapes[1].x.reference, ShapeRef::X);
    assert_eq!(layout.shapes[1].x.end, AxisScalar::Number(200.0));

    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["shapes"].as_array().map(Vec::len), Some(2));
}

#[test]
fn test_layout_json_dates_match_plotly_shapes() {
    let raw = PlotAxisRanges::new(
        Some(AxisRange::parse_date("2020-01-01", "2020-01-08").unwrap()),
        Some(AxisRange::number(0.0, 10.0)),
    );
    let config = AxisTruncationConfig {
        independent_axis: BoundTruncation::new(false, true),
        dependent_axis: BoundTruncation::default(),
    };
    let layout = truncation_layout(
        PlotOrientation::Vertical,
        &raw,
        &config,
        &ExtensionOptions::default(),
        &ExtensionOptions::default(),
        &HighlightStyle::default(),
    )
    .unwrap();

    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["independentAxisRange"]["max"], "2020-01-08T08:00:00.000Z");
    assert_eq!(json["shapes"][0]["x"]["start"], "2020-01-08T08:00:00.000Z");
    assert_eq!(
        json["shapes"][0]["x"]["start"],
        layout.shapes[0].to_plotly()["x0"]
    );
}
