use geo::{Coord, Polygon, Rect, coord, polygon};
use shapetween::{
    Error, Geometry, Interpolator, Keyframe, Point, ResamplePolicy, interpolate_1d,
    interpolate_points,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ring(geometry: &Geometry) -> Vec<Coord<f64>> {
    let exterior = geometry.as_polygon().unwrap().exterior();
    exterior.0[..exterior.0.len() - 1].to_vec()
}

#[test]
fn test_rectangle_track() {
    init_logs();
    let keys = vec![
        Keyframe::new(
            3,
            Rect::new(coord! { x: 0.0, y: 10.0 }, coord! { x: 10.0, y: 20.0 }),
        ),
        Keyframe::new(
            6,
            Rect::new(coord! { x: 10.0, y: 20.0 }, coord! { x: 33.0, y: 35.0 }),
        ),
    ];

    let frames = Interpolator::default()
        .interpolate(&[3, 4, 5, 6], &keys)
        .unwrap();

    let corners: Vec<_> = frames
        .iter()
        .map(|g| {
            let r = g.as_rect().unwrap();
            (r.min().x, r.min().y, r.max().x, r.max().y)
        })
        .collect();
    assert_eq!(
        corners,
        vec![
            (0.0, 10.0, 10.0, 20.0),
            (3.0, 13.0, 18.0, 25.0),
            (7.0, 17.0, 25.0, 30.0),
            (10.0, 20.0, 33.0, 35.0),
        ]
    );
}

#[test]
fn test_triangle_to_pentagon() {
    init_logs();
    let triangle: Polygon = polygon![(x: 0.0, y: 0.0), (x: 30.0, y: 0.0), (x: 15.0, y: 30.0)];
    let pentagon: Polygon = polygon![
        (x: 15.0, y: 0.0),
        (x: 25.0, y: 8.0),
        (x: 21.0, y: 20.0),
        (x: 9.0, y: 20.0),
        (x: 5.0, y: 8.0),
    ];
    let keys = vec![
        Keyframe::new(0, triangle.clone()),
        Keyframe::new(4, pentagon.clone()),
    ];

    let frames = Interpolator::with_policy(ResamplePolicy::Uniform)
        .interpolate(&[0, 1, 2, 3, 4], &keys)
        .unwrap();

    assert_eq!(frames.len(), 5);
    assert_eq!(ring(&frames[0]).len(), 3);
    assert_eq!(frames[0], Geometry::Polygon(triangle));
    assert_eq!(ring(&frames[4]).len(), 5);
    assert_eq!(frames[4], Geometry::Polygon(pentagon));

    for frame in &frames[1..4] {
        let points = ring(frame);
        assert!(points.len() >= 3);
        assert!(points.iter().all(|c| c.x.fract() == 0.0 && c.y.fract() == 0.0));
    }
}

#[test]
fn test_greedy_square_to_octagon() {
    init_logs();
    let square: Polygon = polygon![
        (x: 0.0, y: 0.0),
        (x: 20.0, y: 0.0),
        (x: 20.0, y: 20.0),
        (x: 0.0, y: 20.0),
    ];
    let octagon: Polygon = polygon![
        (x: 6.0, y: 0.0),
        (x: 14.0, y: 0.0),
        (x: 20.0, y: 6.0),
        (x: 20.0, y: 14.0),
        (x: 14.0, y: 20.0),
        (x: 6.0, y: 20.0),
        (x: 0.0, y: 14.0),
        (x: 0.0, y: 6.0),
    ];
    let keys = vec![Keyframe::new(0, square.clone()), Keyframe::new(6, octagon)];

    let frames = Interpolator::with_policy(ResamplePolicy::Greedy)
        .interpolate(&(0..=6).collect::<Vec<_>>(), &keys)
        .unwrap();

    assert_eq!(frames[0], Geometry::Polygon(square));
    for frame in &frames[1..] {
        assert_eq!(ring(frame).len(), 8);
    }
}

#[test]
fn test_point_track() {
    init_logs();
    let keys = vec![
        Keyframe::new(3, Point::new(1.0, 1.0)),
        Keyframe::new(6, Point::new(7.0, 4.0)),
    ];

    let frames = Interpolator::default()
        .interpolate(&[3, 4, 5, 6], &keys)
        .unwrap();

    let points: Vec<_> = frames.iter().map(|g| *g.as_point().unwrap()).collect();
    assert_eq!(
        points,
        vec![
            Point::new(1.0, 1.0),
            Point::new(3.0, 2.0),
            Point::new(5.0, 3.0),
            Point::new(7.0, 4.0),
        ]
    );
}

#[test]
fn test_single_keyframe_produces_nothing() {
    let keys = vec![Keyframe::new(3, Point::new(1.0, 1.0))];
    let result = Interpolator::default().interpolate(&[3, 4, 5], &keys);
    let err = result.unwrap_err();
    assert!(matches!(err.root(), Error::InsufficientKeyframes { found: 1 }));
}

#[test]
fn test_polygon_with_hole_is_rejected() {
    let outer = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)];
    let hole = vec![(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 2.0)];
    let holed = Polygon::new(outer.clone().into(), vec![hole.into()]);
    let plain = Polygon::new(outer.into(), vec![]);

    let keys = vec![Keyframe::new(0, holed), Keyframe::new(4, plain)];
    let err = Interpolator::default().interpolate(&[2], &keys).unwrap_err();
    assert!(matches!(err.root(), Error::UnsupportedTopology { holes: 1 }));
}

#[test]
fn test_unrounded_output() {
    let keys = vec![
        Keyframe::new(0, Point::new(0.0, 0.0)),
        Keyframe::new(4, Point::new(1.0, 3.0)),
    ];
    let interp = Interpolator::builder().round_output(false).build().unwrap();
    let frames = interp.interpolate(&[1], &keys).unwrap();
    assert_eq!(frames[0].as_point(), Some(&Point::new(0.25, 0.75)));
}

#[test]
fn test_low_level_interpolation() {
    let values = interpolate_1d(&[0, 1, 2, 3, 4], &[0, 4], &[10.0, 30.0]).unwrap();
    assert_eq!(values, vec![10.0, 15.0, 20.0, 25.0, 30.0]);

    let snapshots = vec![
        vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 4.0, y: 0.0 }],
        vec![coord! { x: 8.0, y: 4.0 }, coord! { x: 12.0, y: 4.0 }],
    ];
    let frames = interpolate_points(
        &[2],
        &[0, 4],
        &snapshots,
        shapetween::InterpolationLaw::Linear,
    )
    .unwrap();
    assert_eq!(
        frames[0],
        vec![coord! { x: 4.0, y: 2.0 }, coord! { x: 8.0, y: 2.0 }]
    );
}

#[test]
fn test_shrinking_polygon_track_hits_every_keyframe() {
    init_logs();
    let triangle: Polygon = polygon![(x: 0.0, y: 0.0), (x: 30.0, y: 0.0), (x: 15.0, y: 30.0)];
    let pentagon: Polygon = polygon![
        (x: 15.0, y: 0.0),
        (x: 25.0, y: 8.0),
        (x: 21.0, y: 20.0),
        (x: 9.0, y: 20.0),
        (x: 5.0, y: 8.0),
    ];
    let interp = Interpolator::with_policy(ResamplePolicy::Uniform);

    let keys = vec![
        Keyframe::new(0, pentagon.clone()),
        Keyframe::new(4, triangle.clone()),
    ];
    let frames = interp.interpolate(&[0, 1, 2, 3, 4], &keys).unwrap();
    assert_eq!(ring(&frames[0]).len(), 5);
    assert_eq!(ring(&frames[4]).len(), 3);
    assert_eq!(frames[4], Geometry::Polygon(triangle.clone()));

    let keys = vec![
        Keyframe::new(0, triangle.clone()),
        Keyframe::new(4, pentagon.clone()),
        Keyframe::new(8, triangle.clone()),
    ];
    let frames = interp
        .interpolate(&(0..=8).collect::<Vec<_>>(), &keys)
        .unwrap();
    let lengths: Vec<_> = frames.iter().map(|g| ring(g).len()).collect();
    assert_eq!((lengths[0], lengths[4], lengths[8]), (3, 5, 3));
    assert_eq!(frames[4], Geometry::Polygon(pentagon));
    assert_eq!(frames[8], Geometry::Polygon(triangle));
}
