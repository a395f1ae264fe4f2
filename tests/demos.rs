use glam::Vec3;

use shapes_wasm::demos::{
    CylinderDemo, CylinderParams, HelixDemo, HelixParams, PolygonFieldDemo, PolygonFieldParams, BAR_COLOR, BLUE,
    ORANGE,
};
use shapes_wasm::render::{DrawRange, Primitive, ShaderKind};
use shapes_wasm::{AnimationDriver, DemoKind, FixedStepScheduler, FrameRecorder, GeometryError};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

#[test]
fn cylinder_draws_one_indexed_line_loop() {
    let mut backend = FrameRecorder::new();
    let demo = CylinderDemo::new(CylinderParams::default()).unwrap();
    assert_eq!(demo.mesh().vertex_count(), 44);
    let mut driver = AnimationDriver::new(demo, &mut backend, 0.0).unwrap();

    driver.run(&mut FixedStepScheduler::new(0.0, 500.0, 2), &mut backend).unwrap();

    let frame = backend.last_frame().unwrap();
    assert_eq!(frame.draws.len(), 1);
    let call = frame.draws[0];
    assert_eq!(call.shader, ShaderKind::FixedMagenta);
    assert_eq!(call.primitive, Primitive::LineLoop);
    assert_eq!(call.range, DrawRange::Elements { count: 240 });
    assert_eq!(call.transform, driver.demo().mvp());

    // one second at 30°/s and 60°/s
    assert!(approx_eq(driver.demo().yaw(), 30.0, 1e-4));
    assert!(approx_eq(driver.demo().pitch(), 60.0, 1e-4));
}

#[test]
fn cylinder_params_are_validated() {
    let err = CylinderDemo::new(CylinderParams::default().with_segments(2)).err();
    assert_eq!(err, Some(GeometryError::TooFewSides { what: "cylinder", got: 2 }));
    assert!(CylinderDemo::new(CylinderParams::default().with_size(0.0, 1.0)).is_err());
}

#[test]
fn polygon_field_packs_twenty_polygons_without_overlap() {
    let demo = PolygonFieldDemo::new(PolygonFieldParams::default().with_seed(7)).unwrap();
    let layout = demo.layout();
    assert_eq!(layout.len(), 20);

    let mut expected_offset = 0;
    for shape in layout {
        let sides = shape.vertex_count - 2;
        assert!((3..=9).contains(&sides), "sides={sides}");
        assert_eq!(shape.offset, expected_offset);
        expected_offset += shape.vertex_count;

        assert!(shape.center.x.abs() <= 1.0 && shape.center.y.abs() <= 1.0);
        let color = shape.color.expect("polygons carry their own color");
        assert!(color.iter().all(|c| (0.0..=1.0).contains(c)));

        // the first perimeter point tells the radius
        let g = demo.geometry();
        let p = g.vertex(shape.offset + 1).unwrap();
        let r = Vec3::new(p[0], p[1], 0.0).distance(shape.center);
        assert!(r >= 0.10 - 1e-5 && r <= 0.30 + 1e-5, "r={r}");
    }
    assert_eq!(expected_offset, layout.total_vertices());
    assert_eq!(demo.geometry().vertex_count(), layout.total_vertices());
}

#[test]
fn polygon_field_is_reproducible_from_a_seed() {
    let a = PolygonFieldDemo::new(PolygonFieldParams::default().with_seed(42)).unwrap();
    let b = PolygonFieldDemo::new(PolygonFieldParams::default().with_seed(42)).unwrap();
    assert_eq!(a.layout(), b.layout());
    assert_eq!(a.geometry(), b.geometry());
}

#[test]
fn polygon_field_rejects_empty_ranges() {
    let mut params = PolygonFieldParams::default().with_seed(1);
    let low = 3;
    params.sides = low..=low - 1;
    assert_eq!(
        PolygonFieldDemo::new(params).err(),
        Some(GeometryError::EmptyRange { what: "sides" })
    );

    let mut params = PolygonFieldParams::default().with_seed(1);
    params.sides = 2..=5;
    assert!(matches!(
        PolygonFieldDemo::new(params).err(),
        Some(GeometryError::TooFewSides { got: 2, .. })
    ));

    let mut params = PolygonFieldParams::default().with_seed(1);
    params.radius = 0.3..0.1;
    assert_eq!(
        PolygonFieldDemo::new(params).err(),
        Some(GeometryError::EmptyRange { what: "radius" })
    );

    let mut params = PolygonFieldParams::default().with_seed(1);
    params.radius = 0.1..f32::INFINITY;
    assert_eq!(
        PolygonFieldDemo::new(params).err(),
        Some(GeometryError::EmptyRange { what: "radius" })
    );

    let mut params = PolygonFieldParams::default().with_seed(1);
    params.radius = f32::NAN..0.3;
    assert!(matches!(
        PolygonFieldDemo::new(params).err(),
        Some(GeometryError::NonPositive { what: "radius", .. })
    ));
}

#[test]
fn polygon_field_accepts_a_single_size() {
    let mut params = PolygonFieldParams::default().with_seed(3).with_count(5);
    params.sides = 6..=6;
    params.radius = 0.2..0.2;
    let demo = PolygonFieldDemo::new(params).unwrap();
    for shape in demo.layout() {
        assert_eq!(shape.vertex_count, 8);
    }
}

#[test]
fn polygons_spin_about_their_own_centers() {
    let mut backend = FrameRecorder::new();
    let demo = PolygonFieldDemo::new(PolygonFieldParams::default().with_seed(3)).unwrap();
    let mut driver = AnimationDriver::new(demo, &mut backend, 0.0).unwrap();

    driver.run(&mut FixedStepScheduler::new(0.0, 1000.0, 1), &mut backend).unwrap();
    assert!(approx_eq(driver.demo().angle(), 45.0, 1e-4));

    let frame = backend.last_frame().unwrap();
    let layout = driver.demo().layout();
    assert_eq!(frame.draws.len(), layout.len());
    for (call, shape) in frame.draws.iter().zip(layout) {
        assert_eq!(call.primitive, Primitive::TriangleFan);
        assert_eq!(
            call.range,
            DrawRange::Arrays {
                offset: shape.offset,
                count: shape.vertex_count
            }
        );
        assert_eq!(call.color, shape.color);
        let moved = call.transform.transform_point3(shape.center);
        assert!(moved.abs_diff_eq(shape.center, 1e-5));
    }
}

#[test]
fn helix_layout_matches_its_parameters() {
    let demo = HelixDemo::new(HelixParams::default()).unwrap();
    assert_eq!(demo.bars().len(), 15);
    assert_eq!(demo.bars().total_vertices(), 15 * 4);
    assert_eq!(demo.circles().len(), 15);
    assert_eq!(demo.circles().total_vertices(), 15 * 32);
    assert_eq!(demo.bars().get(0).unwrap().center, Vec3::new(0.0, -7.0 * 0.3, 0.0));

    let [a, b] = demo.strand_offsets();
    assert_eq!(a, 0.0);
    assert!(approx_eq(b, -4.2, 1e-6));
}

#[test]
fn helix_issues_bars_then_circles_for_both_strands() {
    let mut backend = FrameRecorder::new();
    let demo = HelixDemo::new(HelixParams::default()).unwrap();
    let mut driver = AnimationDriver::new(demo, &mut backend, 0.0).unwrap();
    driver.run(&mut FixedStepScheduler::sixty_hz(10), &mut backend).unwrap();

    assert_eq!(backend.buffer_count(), 2);
    let draws = &backend.last_frame().unwrap().draws;
    assert_eq!(draws.len(), 2 * 15 + 4 * 15);

    let (bars, circles) = draws.split_at(30);
    assert!(bars.iter().all(|d| d.primitive == Primitive::TriangleStrip && d.color == Some(BAR_COLOR)));
    assert!(circles.iter().all(|d| d.primitive == Primitive::TriangleFan));
    let colors: Vec<_> = circles.chunks(15).map(|c| c[0].color.unwrap()).collect();
    assert_eq!(colors, vec![BLUE, ORANGE, BLUE, ORANGE]);
}

#[test]
fn helix_bar_ends_carry_the_circles() {
    let mut backend = FrameRecorder::new();
    let demo = HelixDemo::new(HelixParams::default()).unwrap();
    let mut driver = AnimationDriver::new(demo, &mut backend, 0.0).unwrap();
    driver.run(&mut FixedStepScheduler::new(0.0, 250.0, 1), &mut backend).unwrap();

    let demo = driver.demo();
    assert!(approx_eq(demo.time(), 0.25, 1e-6));
    let ty = demo.strand_offsets()[0];
    assert!(approx_eq(ty, 0.05, 1e-6));

    let draws = &backend.last_frame().unwrap().draws;
    for (k, i) in (-7..=7).enumerate() {
        let bar = demo.bars().get(k).unwrap();
        let sx = demo.bar_scale(i);

        // right end of the bar after scaling and lifting
        let right = draws[k]
            .transform
            .transform_point3(bar.center + Vec3::new(0.6, 0.0, 0.0));
        assert!(approx_eq(right.x, sx * 0.6, 1e-5));
        assert!(approx_eq(right.y, bar.center.y + ty, 1e-5));

        // blue circle of strand 0 sits on that end
        let circle = demo.circles().get(k).unwrap();
        let blue = draws[30 + k].transform.transform_point3(circle.center);
        assert!(blue.abs_diff_eq(right, 1e-5), "{blue:?} vs {right:?}");
        let orange = draws[45 + k].transform.transform_point3(circle.center);
        assert!(approx_eq(orange.x, -right.x, 1e-5));
    }
}

#[test]
fn helix_strands_loop_instead_of_bouncing() {
    let mut backend = FrameRecorder::new();
    let demo = HelixDemo::new(HelixParams::default().with_scroll_rate(1.0)).unwrap();
    let mut driver = AnimationDriver::new(demo, &mut backend, 0.0).unwrap();

    // 33 steps of 0.13 carry strand 0 from 4.16 past +4.2 on the last tick
    driver.run(&mut FixedStepScheduler::new(0.0, 130.0, 33), &mut backend).unwrap();
    let [a, b] = driver.demo().strand_offsets();
    assert!(approx_eq(a, -4.2, 1e-4), "a={a}");
    assert!(approx_eq(b, 0.09, 1e-3), "b={b}");
}

#[test]
fn every_demo_kind_builds_and_runs() {
    for kind in DemoKind::ALL {
        assert_eq!(kind.name().parse::<DemoKind>(), Ok(kind));
        let mut backend = FrameRecorder::new();
        let demo = kind.build().unwrap();
        let mut driver = AnimationDriver::new(demo, &mut backend, 0.0).unwrap();
        assert_eq!(driver.run(&mut FixedStepScheduler::sixty_hz(5), &mut backend).unwrap(), 5);
        assert!(!backend.last_frame().unwrap().draws.is_empty());
    }
    assert_eq!("dna".parse::<DemoKind>(), Ok(DemoKind::Helix));
    assert_eq!(" Cone ".parse::<DemoKind>(), Ok(DemoKind::Cylinder));
    assert!("teapot".parse::<DemoKind>().is_err());
}
