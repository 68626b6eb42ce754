use scanfill::*;

fn stroke_mask(path: &Path, stroke: &Stroke, width: u32, height: u32) -> Mask {
    let mut mask = Mask::new(width, height).unwrap();
    let clip = IntRect::from_xywh(0, 0, width, height).unwrap();
    let mut rasterizer = Rasterizer::new();
    rasterizer
        .stroke_path(path, stroke, Transform::identity(), clip, &mut mask)
        .unwrap();
    mask
}

#[test]
fn dashed_line_with_phase() {
    // Pattern [10, 5] with phase 5: a half dash first, then the full
    // rhythm. On-runs: [5,10), [15,25), [30,40), [45,55).
    let mut pb = PathBuilder::new();
    pb.move_to(5.0, 32.0);
    pb.line_to(59.0, 32.0);
    let path = pb.finish().unwrap();

    let stroke = Stroke {
        width: 4.0,
        dash: StrokeDash::new(vec![10.0, 5.0], 5.0),
        ..Stroke::default()
    };
    let mask = stroke_mask(&path, &stroke, 64, 64);

    let expect_on = |x: u32| {
        (x >= 5 && x < 10) || (x >= 15 && x < 25) || (x >= 30 && x < 40) || (x >= 45 && x < 55)
    };
    for x in 0..64 {
        let expected = if expect_on(x) { 255 } else { 0 };
        assert_eq!(mask.pixel(x, 31), Some(expected), "pixel {}", x);
    }

    // The band has the stroke width: y in [30, 34).
    assert_eq!(mask.pixel(7, 30), Some(255));
    assert_eq!(mask.pixel(7, 29), Some(0));
    assert_eq!(mask.pixel(7, 33), Some(255));
    assert_eq!(mask.pixel(7, 34), Some(0));
}

#[test]
fn solid_stroke_when_dash_is_none() {
    let mut pb = PathBuilder::new();
    pb.move_to(5.0, 32.0);
    pb.line_to(59.0, 32.0);
    let path = pb.finish().unwrap();

    let stroke = Stroke {
        width: 4.0,
        ..Stroke::default()
    };
    let mask = stroke_mask(&path, &stroke, 64, 64);
    for x in 5..59 {
        assert_eq!(mask.pixel(x, 31), Some(255), "pixel {}", x);
    }
}

#[test]
fn negative_phase_wraps() {
    // Phase -5 on a [10, 5] pattern equals phase 10: the line starts in
    // the gap.
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 32.0);
    pb.line_to(60.0, 32.0);
    let path = pb.finish().unwrap();

    let stroke = Stroke {
        width: 4.0,
        dash: StrokeDash::new(vec![10.0, 5.0], -5.0),
        ..Stroke::default()
    };
    let mask = stroke_mask(&path, &stroke, 64, 64);

    // Gap [0,5), then on-runs [5,15), [20,30), [35,45), [50,60).
    assert_eq!(mask.pixel(2, 31), Some(0));
    assert_eq!(mask.pixel(7, 31), Some(255));
    assert_eq!(mask.pixel(17, 31), Some(0));
    assert_eq!(mask.pixel(25, 31), Some(255));
}

#[test]
fn odd_pattern_doubles() {
    // [8] behaves as [8, 8].
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 32.0);
    pb.line_to(64.0, 32.0);
    let path = pb.finish().unwrap();

    let stroke = Stroke {
        width: 4.0,
        dash: StrokeDash::new(vec![8.0], 0.0),
        ..Stroke::default()
    };
    let mask = stroke_mask(&path, &stroke, 64, 64);

    assert_eq!(mask.pixel(4, 31), Some(255));
    assert_eq!(mask.pixel(12, 31), Some(0));
    assert_eq!(mask.pixel(20, 31), Some(255));
    assert_eq!(mask.pixel(28, 31), Some(0));
}

#[test]
fn dash_crossing_a_corner_is_joined() {
    // The second on-run spans the corner at (40, 32), so the join must
    // fill the outer corner square.
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 32.0);
    pb.line_to(40.0, 32.0);
    pb.line_to(40.0, 62.0);
    let path = pb.finish().unwrap();

    let stroke = Stroke {
        width: 8.0,
        dash: StrokeDash::new(vec![20.0, 5.0], 0.0),
        ..Stroke::default()
    };
    let mask = stroke_mask(&path, &stroke, 64, 64);

    // On-runs along the walk: [0,20), [25,45), [50,60] in arc length;
    // distance 30 is the corner, inside the second run.
    assert_eq!(mask.pixel(15, 32), Some(255)); // first dash
    assert_eq!(mask.pixel(32, 32), Some(0)); // gap
    assert_eq!(mask.pixel(37, 32), Some(255)); // second dash, before corner
    assert_eq!(mask.pixel(43, 30), Some(255)); // outer miter corner
    assert_eq!(mask.pixel(40, 40), Some(255)); // second dash, after corner
    assert_eq!(mask.pixel(40, 50), Some(0)); // gap on the vertical leg
    assert_eq!(mask.pixel(40, 56), Some(255)); // third dash
}

#[test]
fn closed_contour_wraps_across_the_seam() {
    // The walk starts and ends mid-dash, so the seam at (10, 10) gets a
    // join instead of two butt caps.
    let mut pb = PathBuilder::new();
    pb.push_rect(10.0, 10.0, 20.0, 20.0);
    let path = pb.finish().unwrap();

    let stroke = Stroke {
        width: 4.0,
        dash: StrokeDash::new(vec![12.0, 8.0], 6.0),
        ..Stroke::default()
    };
    let mask = stroke_mask(&path, &stroke, 64, 64);

    // The outer miter corner at the seam is filled.
    assert_eq!(mask.pixel(8, 8), Some(255));
    // Both sides of the seam are drawn.
    assert_eq!(mask.pixel(12, 9), Some(255));
    assert_eq!(mask.pixel(9, 12), Some(255));
}

#[test]
fn open_contour_does_not_wrap() {
    // The same square drawn as an open polyline back to its start: the
    // seam gets two butt caps and the outer corner stays empty.
    let mut pb = PathBuilder::new();
    pb.move_to(10.0, 10.0);
    pb.line_to(30.0, 10.0);
    pb.line_to(30.0, 30.0);
    pb.line_to(10.0, 30.0);
    pb.line_to(10.0, 10.0);
    let path = pb.finish().unwrap();

    let stroke = Stroke {
        width: 4.0,
        dash: StrokeDash::new(vec![12.0, 8.0], 6.0),
        ..Stroke::default()
    };
    let mask = stroke_mask(&path, &stroke, 64, 64);

    assert_eq!(mask.pixel(8, 8), Some(0));
}

#[test]
fn zero_length_dashes_draw_round_dots() {
    // A [0, 10] pattern with round caps is a dotted line.
    let mut pb = PathBuilder::new();
    pb.move_to(5.0, 32.0);
    pb.line_to(46.0, 32.0);
    let path = pb.finish().unwrap();

    let stroke = Stroke {
        width: 6.0,
        line_cap: LineCap::Round,
        dash: StrokeDash::new(vec![0.0, 10.0], 0.0),
        ..Stroke::default()
    };
    let mask = stroke_mask(&path, &stroke, 64, 64);

    // Dots at x = 5, 15, 25, 35, 45.
    assert_eq!(mask.pixel(5, 32), Some(255));
    assert_eq!(mask.pixel(15, 32), Some(255));
    assert_eq!(mask.pixel(25, 32), Some(255));
    assert_eq!(mask.pixel(45, 32), Some(255));
    // Between the dots.
    assert_eq!(mask.pixel(10, 32), Some(0));
    assert_eq!(mask.pixel(20, 32), Some(0));

    // The same pattern with butt caps draws nothing.
    let stroke = Stroke {
        width: 6.0,
        dash: StrokeDash::new(vec![0.0, 10.0], 0.0),
        ..Stroke::default()
    };
    let mask = stroke_mask(&path, &stroke, 64, 64);
    assert!(mask.data().iter().all(|v| *v == 0));
}

#[test]
fn dash_lengths_are_in_user_units() {
    // Under a 2x transform the dashes land at doubled device positions.
    let mut pb = PathBuilder::new();
    pb.move_to(0.0, 16.0);
    pb.line_to(30.0, 16.0);
    let path = pb.finish().unwrap();

    let stroke = Stroke {
        width: 4.0,
        dash: StrokeDash::new(vec![5.0, 5.0], 0.0),
        ..Stroke::default()
    };

    let mut mask = Mask::new(64, 64).unwrap();
    let clip = IntRect::from_xywh(0, 0, 64, 64).unwrap();
    let mut rasterizer = Rasterizer::new();
    rasterizer
        .stroke_path(
            &path,
            &stroke,
            Transform::from_scale(2.0, 2.0),
            clip,
            &mut mask,
        )
        .unwrap();

    // Device on-runs: [0,10), [20,30), [40,50).
    assert_eq!(mask.pixel(5, 31), Some(255));
    assert_eq!(mask.pixel(15, 31), Some(0));
    assert_eq!(mask.pixel(25, 31), Some(255));
    assert_eq!(mask.pixel(35, 31), Some(0));
    assert_eq!(mask.pixel(45, 31), Some(255));
}
