use survey_core::{
    add_point, is_polygon, remove_point, validate_coordinate, BoundaryEditor, BoundaryShape,
    Coordinate, CoordinateError,
};

fn point(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).unwrap()
}

#[test]
fn validate_accepts_every_in_range_grid_point() {
    for lat in (-90..=90).step_by(15) {
        for lng in (-180..=180).step_by(30) {
            let result = validate_coordinate(&lat.to_string(), &lng.to_string());
            assert!(result.is_ok(), "({lat}, {lng}) should be valid");
        }
    }
}

#[test]
fn validate_rejects_out_of_range_and_names_the_bound() {
    let cases = [
        ("-90.5", "0", CoordinateError::LatitudeOutOfRange(-90.5)),
        ("90.01", "0", CoordinateError::LatitudeOutOfRange(90.01)),
        ("0", "-181", CoordinateError::LongitudeOutOfRange(-181.0)),
        ("0", "180.0001", CoordinateError::LongitudeOutOfRange(180.0001)),
    ];
    for (lat, lng, expected) in cases {
        assert_eq!(validate_coordinate(lat, lng).unwrap_err(), expected);
    }

    let message = validate_coordinate("0", "200").unwrap_err().to_string();
    assert!(message.contains("longitude"), "unexpected message: {message}");
    assert!(message.contains("-180"), "unexpected message: {message}");
}

#[test]
fn validate_rejects_non_numeric_input() {
    for (lat, lng) in [("", ""), ("abc", "1"), ("1", "1,5"), ("NaN", "0")] {
        assert!(
            matches!(
                validate_coordinate(lat, lng),
                Err(CoordinateError::NotANumber { .. })
            ),
            "({lat:?}, {lng:?}) should be rejected as non-numeric"
        );
    }
}

#[test]
fn remove_point_on_four_points_keeps_order() {
    let points = vec![
        point(1.0, 1.0),
        point(2.0, 2.0),
        point(3.0, 3.0),
        point(4.0, 4.0),
    ];
    for index in 0..points.len() {
        let next = remove_point(&points, index);
        assert_eq!(next.len(), 3);
        let expected: Vec<_> = points
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, p)| *p)
            .collect();
        assert_eq!(next, expected);
    }
}

#[test]
fn polygon_needs_three_points() {
    let two = add_point(&[point(1.0, 1.0)], "2", "2").unwrap();
    assert!(!is_polygon(&two));
    assert_eq!(BoundaryShape::of(&two), BoundaryShape::Markers(2));

    let three = add_point(&two, "3", "1").unwrap();
    assert!(is_polygon(&three));
    assert_eq!(BoundaryShape::of(&three).point_count(), 3);
}

#[test]
fn editor_mirrors_map_clicks_and_typed_points() {
    let mut editor = BoundaryEditor::new();
    editor.add_clicked_point(34.0489, -111.0937).unwrap();
    editor.add_point("34.05", "-111.0937").unwrap();
    assert_eq!(editor.shape(), BoundaryShape::Markers(2));

    editor.add_point("34.05", "-111.095").unwrap();
    assert_eq!(
        editor.to_pairs(),
        vec![
            [34.0489, -111.0937],
            [34.05, -111.0937],
            [34.05, -111.095],
        ]
    );
    assert!(editor.shape().is_polygon());

    editor.remove_point(1);
    assert_eq!(editor.shape(), BoundaryShape::Markers(2));
    assert_eq!(editor.into_points()[1].to_pair(), [34.05, -111.095]);
}
