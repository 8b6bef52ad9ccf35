use approx::assert_abs_diff_eq;
use image::Rgba;
use seascape::frame::default_camera_position;
use seascape::{FrameState, PlaneMesh, SoftwareRenderer};
use shared::glam::Vec3;

const WIDTH: u32 = 48;
const HEIGHT: u32 = 36;

fn frame() -> FrameState {
    FrameState::new(WIDTH, HEIGHT, default_camera_position()).unwrap()
}

fn is_clear(pixel: &Rgba<u8>) -> bool {
    pixel.0 == [0, 0, 0, 255]
}

#[test]
fn upper_half_is_sky_lower_half_is_sea() {
    let image = SoftwareRenderer::new(PlaneMesh::ocean()).render(&frame());
    assert_eq!(image.dimensions(), (WIDTH, HEIGHT));
    assert!(image.pixels().all(|p| p.0[3] == 255));

    // The camera looks along -Z, so nothing above the horizon hits the plane.
    for y in 0..HEIGHT / 2 {
        for x in 0..WIDTH {
            assert!(is_clear(image.get_pixel(x, y)), "({x}, {y}) is covered");
        }
    }
    for x in 0..WIDTH {
        let pixel = image.get_pixel(x, HEIGHT - 1);
        assert!(!is_clear(pixel), "({x}, {}) is not covered", HEIGHT - 1);
        // Water body is blue-green.
        assert!(pixel.0[2] > 0 && pixel.0[1] > 0);
    }
}

#[test]
fn frames_differ_as_time_advances() {
    let renderer = SoftwareRenderer::new(PlaneMesh::ocean());
    let mut frame = frame();
    let first = renderer.render(&frame);
    for _ in 0..25 {
        frame.advance();
    }
    let later = renderer.render(&frame);
    assert_abs_diff_eq!(frame.time(), 0.5, epsilon = 1e-5);
    assert_ne!(first, later);
}

#[test]
fn rendering_is_repeatable() {
    let renderer = SoftwareRenderer::new(PlaneMesh::ocean());
    let frame = frame().with_time(3.0).unwrap();
    assert_eq!(renderer.render(&frame), renderer.render(&frame));
}

#[test]
fn distant_camera_sees_only_clear_color() {
    let renderer = SoftwareRenderer::new(PlaneMesh::ocean());
    let frame = FrameState::new(16, 12, Vec3::new(0.0, 10.0, 500.0)).unwrap();
    let image = renderer.render(&frame);
    // Too far from the plane for any downward ray inside the frustum to land on it.
    assert!(image.pixels().all(is_clear));
}

#[test]
fn sequence_writes_numbered_pngs() {
    let dir = std::env::temp_dir().join(format!("seascape-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let renderer = SoftwareRenderer::new(PlaneMesh::new(100.0, 100.0, 4, 4).with_model(
        PlaneMesh::ocean().model(),
    ));
    let mut frame = FrameState::new(8, 6, default_camera_position()).unwrap();

    let written = renderer
        .render_sequence(&mut frame, 2, &dir.join("sea.png"))
        .unwrap();
    assert_eq!(written, vec![dir.join("sea_0000.png"), dir.join("sea_0001.png")]);
    for path in &written {
        let image = image::open(path).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (8, 6));
    }
    assert_abs_diff_eq!(frame.time(), 0.04, epsilon = 1e-6);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn resize_changes_output_size_only() {
    let renderer = SoftwareRenderer::new(PlaneMesh::ocean());
    let mut frame = frame();
    let small = renderer.render(&frame);
    frame.resize(WIDTH * 2, HEIGHT * 2).unwrap();
    let large = renderer.render(&frame);
    assert_eq!(large.dimensions(), (WIDTH * 2, HEIGHT * 2));
    // Same framing: the sky rows stay empty at either size.
    assert!(is_clear(small.get_pixel(WIDTH / 2, 0)));
    assert!(is_clear(large.get_pixel(WIDTH, 0)));
    assert!(!is_clear(large.get_pixel(WIDTH, HEIGHT * 2 - 1)));
}
