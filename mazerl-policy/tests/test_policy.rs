use anyhow::Result;
use mazerl_controllers::{check_types, ControllerRegistry};
use mazerl_core::{BuildData, Controller, CoreError, Observation, Vec2};
use mazerl_policy::{Mat, Mlp, MlpController};
use serde_json::{json, Map, Value};
use tempdir::TempDir;

fn retina(vision: usize, value: f32) -> Observation {
    Observation::Continuous {
        vision,
        pixels: vec![value; vision * vision],
    }
}

fn registry() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    mazerl_policy::register(&mut registry);
    registry
}

#[test]
fn test_factory_builds_zero_policy() -> Result<()> {
    let registry = registry();

    let mut params = Map::new();
    params.insert("vision".to_string(), Value::from(3));
    let mut controller = registry.factory("policy", &params)?;

    assert_eq!(controller.vision(), Some(3));
    assert_eq!(controller.act(&retina(3, 1.0)), Vec2::null());
    Ok(())
}

#[test]
fn test_round_trip_preserves_actions() -> Result<()> {
    let dir = TempDir::new("policy")?;
    let registry = registry();

    // One 9->2 layer with a single nonzero weight per output.
    let mut w = vec![0.0; 18];
    w[0] = 1.0;
    w[9 + 4] = -1.0;
    let mlp = Mlp::new(vec![Mat::new(2, 9, w)], vec![Mat::zeros(2, 1)]);
    let mut controller = MlpController::new(mlp, 3);

    let obs = retina(3, 0.5);
    let expected = controller.act(&obs);
    assert_eq!(expected, Vec2::new(0.5f32.tanh(), (-0.5f32).tanh()));

    let path = registry.save(&controller, dir.path().join("policy"), None)?;
    let mut loaded = registry.load(&path)?;

    assert_eq!(loaded.act(&obs), expected);
    assert_eq!(loaded.vision(), Some(3));
    assert_eq!(loaded.infos().get("algo"), Some(&json!("mlp")));
    Ok(())
}

#[test]
fn test_build_data_from_policy() -> Result<()> {
    let controller = MlpController::new(Mlp::zeros(&[25, 2]), 5);

    let bd = BuildData::from_controller(&controller)?;
    assert_eq!(bd.to_string(), "CC5");
    assert!(check_types(&controller, &bd).is_ok());
    assert!(matches!(
        check_types(&controller, &BuildData::from_string("D")?),
        Err(CoreError::IncompatibleInput(..))
    ));
    Ok(())
}

#[test]
#[should_panic(expected = "acceleration needs 2")]
fn test_single_output_network_is_rejected() {
    let _ = MlpController::new(Mlp::zeros(&[9, 1]), 3);
}

#[test]
fn test_unregistered_registry_rejects_policy() -> Result<()> {
    let dir = TempDir::new("policy")?;
    let controller = MlpController::new(Mlp::zeros(&[9, 2]), 3);

    let err = ControllerRegistry::new()
        .save(&controller, dir.path().join("policy"), None)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::UnregisteredType)
    ));
    Ok(())
}
