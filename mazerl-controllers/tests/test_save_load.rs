use anyhow::Result;
use mazerl_controllers::{ControllerRegistry, RandomController, TabularController};
use mazerl_core::{CoreError, Direction, Observation};
use serde_json::{json, Map};
use tempdir::TempDir;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_random_round_trip() -> Result<()> {
    init();
    let dir = TempDir::new("save_load")?;
    let registry = ControllerRegistry::new();

    let controller = registry.factory("random", &Map::new())?;
    let path = registry.save(controller.as_ref(), dir.path().join("random"), None)?;
    let loaded = registry.load(&path)?;

    assert!(loaded.as_any().is::<RandomController>());
    Ok(())
}

#[test]
fn test_save_normalizes_extension() -> Result<()> {
    init();
    let dir = TempDir::new("save_load")?;
    let registry = ControllerRegistry::new();
    let controller = registry.factory("keyboard", &Map::new())?;

    let path = registry.save(controller.as_ref(), dir.path().join("ctrl"), None)?;
    assert_eq!(path.extension().unwrap(), "zip");
    assert!(path.exists());

    let path = registry.save(controller.as_ref(), dir.path().join("ctrl.bin"), None)?;
    assert_eq!(path.file_name().unwrap(), "ctrl.zip");
    Ok(())
}

#[test]
fn test_infos_merge_caller_wins() -> Result<()> {
    init();
    let dir = TempDir::new("save_load")?;
    let registry = ControllerRegistry::new();

    let mut controller = registry.factory("random", &Map::new())?;
    let mut own = Map::new();
    own.insert("algo".to_string(), json!("random"));
    own.insert("mazes".to_string(), json!(["M4_6x6"]));
    controller.set_infos(own);

    let mut extra = Map::new();
    extra.insert("algo".to_string(), json!("random-v2"));
    extra.insert("score".to_string(), json!(0.75));

    let path = registry.save(controller.as_ref(), dir.path().join("infos"), Some(extra))?;
    let loaded = registry.load(&path)?;

    let infos = loaded.infos();
    assert_eq!(infos.get("algo"), Some(&json!("random-v2")));
    assert_eq!(infos.get("mazes"), Some(&json!(["M4_6x6"])));
    assert_eq!(infos.get("score"), Some(&json!(0.75)));
    assert_eq!(infos.len(), 3);
    Ok(())
}

#[test]
fn test_tabular_table_survives() -> Result<()> {
    init();
    let dir = TempDir::new("save_load")?;
    let registry = ControllerRegistry::new();

    let mut controller = TabularController::new(1.0);
    let obs = Observation::Discrete(vec![1.0, 0.0, 0.0, 0.5]);
    controller.update(&obs, Direction::West, 2.0);

    let path = registry.save(&controller, dir.path().join("tabular"), None)?;
    let mut loaded = registry.load(&path)?;

    assert_eq!(loaded.act(&obs), Direction::West.as_vec());
    let tabular = loaded.as_any().downcast_ref::<TabularController>().unwrap();
    assert_eq!(tabular.q_values(&obs)[Direction::West as usize], 2.0);
    Ok(())
}

#[test]
fn test_load_unregistered_kind_fails() -> Result<()> {
    init();
    let dir = TempDir::new("save_load")?;
    let registry = ControllerRegistry::new();

    let controller = registry.factory("random", &Map::new())?;
    let path = registry.save(controller.as_ref(), dir.path().join("random"), None)?;

    let err = ControllerRegistry::empty().load(&path).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::UnknownController(_))
    ));
    Ok(())
}

#[test]
fn test_save_unregistered_type_fails() -> Result<()> {
    init();
    let dir = TempDir::new("save_load")?;
    let registry = ControllerRegistry::new();
    let controller = registry.factory("random", &Map::new())?;

    let err = ControllerRegistry::empty()
        .save(controller.as_ref(), dir.path().join("random"), None)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::UnregisteredType)
    ));
    Ok(())
}
