use approx::assert_relative_eq;
use keyframe_animator_core::{
    parse_script, sample, AnimatorConfig, AnimatorError, ParameterDescriptor, ParameterRegistry,
    Value, ValueKind, Vector3,
};

fn registry() -> ParameterRegistry {
    let mut r = ParameterRegistry::new();
    r.register([
        ParameterDescriptor::vector3("position").required(),
        ParameterDescriptor::scalar("angle"),
        ParameterDescriptor::array("color"),
        ParameterDescriptor::vector4("quat"),
    ]);
    r
}

fn assert_vec3_eq(a: Vector3, b: Vector3) {
    assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
    assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
    assert_relative_eq!(a.z, b.z, epsilon = 1e-9);
}

const THREE_KEYS: &str = "\
0
position: 0, 0, 0
10
position: 10, 5, 0
20
position: 20, 0, 5
";

#[test]
fn round_trip_at_keyframe_times() {
    let r = registry();
    let store = parse_script(THREE_KEYS, &r, &AnimatorConfig::default()).unwrap();
    let expected = [
        (0.0, Vector3::new(0.0, 0.0, 0.0)),
        (10.0, Vector3::new(10.0, 5.0, 0.0)),
        (20.0, Vector3::new(20.0, 0.0, 5.0)),
    ];
    for (time, value) in expected {
        let snap = sample(&store, &r, time).unwrap();
        assert_vec3_eq(snap.require::<Vector3>("position").unwrap(), value);
    }
}

#[test]
fn monotonic_identity_for_every_keyframe() {
    let r = registry();
    let text = "\
0
position: 1, 2, 3
angle: 10
color: 1, 0, 0
quat: 0, 0, 0, 1
3
position: -4, 2, 8
angle: 25
5
color: 0.5, 0.5, 0.5
quat: 0, 0.7071, 0, 0.7071
9
position: 0, 0, 0
";
    let store = parse_script(text, &r, &AnimatorConfig::default()).unwrap();
    for keyframe in store.iter() {
        let snap = sample(&store, &r, keyframe.time).unwrap();
        assert_eq!(snap.len(), keyframe.values().len());
        for (name, value) in keyframe.values() {
            let got = snap.get(name).unwrap();
            for (a, b) in got.components().iter().zip(value.components()) {
                assert_relative_eq!(*a, b, epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn boundary_extrapolation_is_bounded_and_reproducible() {
    let r = registry();
    let store = parse_script(THREE_KEYS, &r, &AnimatorConfig::default()).unwrap();
    for time in [-0.001, -5.0, 20.001, 25.0] {
        let a = sample(&store, &r, time).unwrap();
        let b = sample(&store, &r, time).unwrap();
        assert_eq!(a, b);
        let p = a.require::<Vector3>("position").unwrap();
        assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
    }
    // just before the start stays close to the first keyframe
    let p = sample(&store, &r, -0.001)
        .unwrap()
        .require::<Vector3>("position")
        .unwrap();
    assert!(p.distance(&Vector3::zero()) < 0.01);
}

#[test]
fn catmull_rom_passes_midpoint_of_symmetric_path() {
    let r = registry();
    let text = "0\nposition:0,0,0\n1\nposition:1,0,0\n2\nposition:2,0,0\n3\nposition:3,0,0\n";
    let store = parse_script(text, &r, &AnimatorConfig::default()).unwrap();
    let p = sample(&store, &r, 1.5)
        .unwrap()
        .require::<Vector3>("position")
        .unwrap();
    assert_vec3_eq(p, Vector3::new(1.5, 0.0, 0.0));
}

#[test]
fn scalar_then_array_for_one_name_is_rejected() {
    let r = registry();
    // "angle" is registered as a scalar, so an array literal fails to parse
    let err = parse_script(
        "0\nposition:0,0,0\nangle:1\n1\nangle:1,2,3\n",
        &r,
        &AnimatorConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AnimatorError::Parse { .. }));
}

#[test]
fn interpolator_rejects_mixed_kinds() {
    let d = ParameterDescriptor::scalar("angle");
    let err = d
        .interpolate(
            &Value::Scalar(0.0),
            &Value::Scalar(1.0),
            &Value::Array(vec![1.0, 2.0]),
            &Value::Scalar(3.0),
            0.5,
        )
        .unwrap_err();
    assert_eq!(
        err,
        AnimatorError::TypeMismatch {
            parameter: "angle".to_string(),
            expected: ValueKind::Scalar,
            actual: ValueKind::Array,
        }
    );
}

#[test]
fn array_parameters_interpolate_per_component() {
    let r = registry();
    let text = "0\nposition:0,0,0\ncolor:0,0,0,0\n2\ncolor:1,1,1,1\n";
    let store = parse_script(text, &r, &AnimatorConfig::default()).unwrap();
    let color: Vec<f64> = sample(&store, &r, 1.0).unwrap().require("color").unwrap();
    assert_eq!(color.len(), 4);
    for c in color {
        assert_relative_eq!(c, 0.5, epsilon = 1e-9);
    }
}
