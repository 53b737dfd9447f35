// tests/turtle_frames.rs
use glam::{Mat4, Vec3};
use lsystem_flora::{TurtleOp, TurtleState, rotate_around_axis};
use std::f32::consts::FRAC_PI_2;

const EPS: f32 = 1e-5;

#[test]
fn test_rodrigues_quarter_turn() {
    let v = rotate_around_axis(Vec3::X, Vec3::Z, FRAC_PI_2);
    assert!(v.abs_diff_eq(Vec3::Y, EPS), "got {v}");

    // Axis is normalized internally
    let v = rotate_around_axis(Vec3::X, Vec3::Z * 5.0, FRAC_PI_2);
    assert!(v.abs_diff_eq(Vec3::Y, EPS), "got {v}");

    // Vectors along the axis are unchanged
    let v = rotate_around_axis(Vec3::Z, Vec3::Z, 1.234);
    assert!(v.abs_diff_eq(Vec3::Z, EPS));
}

#[test]
fn test_default_frame() {
    let t = TurtleState::default();
    assert!(t.is_orthonormal(EPS));
    assert_eq!(t.heading.cross(t.left), t.up);
    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.depth, 0);
}

#[test]
fn test_yaw_turns_towards_left() {
    let mut t = TurtleState::default();
    t.yaw(FRAC_PI_2);
    assert!(t.heading.abs_diff_eq(Vec3::NEG_X, EPS), "heading {}", t.heading);
    assert!(t.left.abs_diff_eq(Vec3::NEG_Y, EPS), "left {}", t.left);
    assert!(t.up.abs_diff_eq(Vec3::Z, EPS));
}

#[test]
fn test_pitch_down_and_roll() {
    let mut t = TurtleState::default();
    t.pitch(FRAC_PI_2);
    assert!(t.heading.abs_diff_eq(Vec3::NEG_Z, EPS), "heading {}", t.heading);
    assert!(t.up.abs_diff_eq(Vec3::Y, EPS), "up {}", t.up);
    assert!(t.left.abs_diff_eq(Vec3::NEG_X, EPS));

    let mut t = TurtleState::default();
    t.roll(FRAC_PI_2);
    assert!(t.heading.abs_diff_eq(Vec3::Y, EPS));
    assert!(t.left.abs_diff_eq(Vec3::Z, EPS), "left {}", t.left);
    assert!(t.up.abs_diff_eq(Vec3::X, EPS), "up {}", t.up);
}

#[test]
fn test_rotations_preserve_orthonormality() {
    let mut t = TurtleState::default();
    let angles = [0.3_f32, 1.1, 2.7, -0.45, 0.0137];
    for i in 0..3000 {
        let a = angles[i % angles.len()];
        match i % 3 {
            0 => t.yaw(a),
            1 => t.pitch(a),
            _ => t.roll(a),
        }
        assert!(t.is_orthonormal(EPS), "frame drifted after {i} rotations");
    }
    // Still right-handed
    assert!(t.heading.cross(t.left).abs_diff_eq(t.up, EPS));
}

#[test]
fn test_planar_yaw_keeps_up() {
    let mut t = TurtleState::default();
    for _ in 0..7 {
        t.yaw_around(lsystem_flora::PLANAR_AXIS, 0.4);
    }
    assert!(t.up.abs_diff_eq(Vec3::Z, EPS));
    assert!(t.heading.z.abs() < EPS);
}

#[test]
fn test_orientation_of_default_frame_is_identity() {
    let t = TurtleState::default();
    assert!(t.orientation().abs_diff_eq(Mat4::IDENTITY, EPS));
}

#[test]
fn test_orientation_is_orthonormal_after_drift() {
    let mut t = TurtleState::default();
    t.yaw(0.7);
    t.pitch(-1.3);
    t.roll(2.2);
    // Damage the stored frame; the ornament matrix must still be rigid
    t.up = (t.up + t.heading * 0.05).normalize();

    let m = t.orientation();
    let (right, forward, up) = (m.x_axis.truncate(), m.y_axis.truncate(), m.z_axis.truncate());
    assert!(forward.abs_diff_eq(t.heading, EPS));
    for v in [right, forward, up] {
        assert!((v.length() - 1.0).abs() < EPS);
    }
    assert!(right.dot(forward).abs() < EPS);
    assert!(right.dot(up).abs() < EPS);
    assert!(forward.dot(up).abs() < EPS);
}

#[test]
fn test_color_drift_clamps() {
    let mut t = TurtleState {
        color: Vec3::new(0.01, 0.98, 0.3),
        ..Default::default()
    };
    t.drift_color();
    assert_eq!(t.color, Vec3::new(0.0, 1.0, 0.3));

    let mut t = TurtleState {
        color: Vec3::new(0.5, 0.2, 0.1),
        ..Default::default()
    };
    t.drift_color();
    t.drift_color();
    assert!(t.color.abs_diff_eq(Vec3::new(0.46, 0.3, 0.1), EPS));
}

#[test]
fn test_symbol_table() {
    for s in ['F', 'G', 'A', 'B'] {
        assert_eq!(TurtleOp::from_symbol(s), TurtleOp::Draw);
    }
    assert_eq!(TurtleOp::from_symbol('f'), TurtleOp::Move);
    assert_eq!(TurtleOp::from_symbol('+'), TurtleOp::Yaw(1.0));
    assert_eq!(TurtleOp::from_symbol('-'), TurtleOp::Yaw(-1.0));
    assert_eq!(TurtleOp::from_symbol('&'), TurtleOp::Pitch(1.0));
    assert_eq!(TurtleOp::from_symbol('^'), TurtleOp::Pitch(-1.0));
    assert_eq!(TurtleOp::from_symbol('\\'), TurtleOp::Roll(1.0));
    assert_eq!(TurtleOp::from_symbol('/'), TurtleOp::Roll(-1.0));
    assert_eq!(TurtleOp::from_symbol('|'), TurtleOp::TurnAround);
    assert_eq!(TurtleOp::from_symbol('['), TurtleOp::Push);
    assert_eq!(TurtleOp::from_symbol(']'), TurtleOp::Pop);
    assert_eq!(TurtleOp::from_symbol('l'), TurtleOp::Leaf);
    assert_eq!(TurtleOp::from_symbol('K'), TurtleOp::Flower);
    assert_eq!(TurtleOp::from_symbol('!'), TurtleOp::Thin);
    assert_eq!(TurtleOp::from_symbol('\''), TurtleOp::ColorDrift);
    for s in ['X', 'Y', 'g', ' ', '{'] {
        assert_eq!(TurtleOp::from_symbol(s), TurtleOp::Ignore);
    }
}
