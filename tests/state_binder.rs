//! 상태 저장소와 그리드 바인더의 계약 테스트.
use hydrogen_risk_toolbox::binder::{EditOutcome, GridBinder};
use hydrogen_risk_toolbox::conversion::{base_unit, Unit};
use hydrogen_risk_toolbox::quantity::QuantityKind;
use hydrogen_risk_toolbox::registry::{ParameterDescriptor, ParameterRegistry};
use hydrogen_risk_toolbox::state::{StateError, StateStore};
use hydrogen_risk_toolbox::units::{PressureUnit, TemperatureUnit};

fn test_registry() -> ParameterRegistry {
    ParameterRegistry::new(vec![
        ParameterDescriptor::new("test.temp", "param.amb_temp", QuantityKind::Temperature),
        ParameterDescriptor::new("test.pres", "param.amb_pres", QuantityKind::Pressure),
        ParameterDescriptor::new("test.frac", "param.contour", QuantityKind::Unitless),
    ])
    .expect("registry")
}

fn seeded_store() -> StateStore {
    let mut store = StateStore::new();
    store.ensure("test.temp", QuantityKind::Temperature, 300.0);
    store.ensure("test.pres", QuantityKind::Pressure, 101_325.0);
    store.ensure("test.frac", QuantityKind::Unitless, 0.04);
    store
}

#[test]
fn set_then_get_same_unit_round_trips() {
    let mut store = seeded_store();
    store
        .set("test.pres", 5.0, Unit::Pressure(PressureUnit::Pascal))
        .expect("set");
    let read = store
        .get_value("test.pres", Unit::Pressure(PressureUnit::Pascal))
        .expect("get");
    assert!((read - 5.0).abs() < 1e-12);
}

#[test]
fn read_before_initialization_is_missing_key() {
    let store = StateStore::new();
    match store.get_value("test.temp", base_unit(QuantityKind::Temperature)) {
        Err(StateError::MissingKey(key)) => assert_eq!(key, "test.temp"),
        other => panic!("expected MissingKey, got {other:?}"),
    }
}

#[test]
fn unit_kind_mismatch_is_rejected_without_mutation() {
    let mut store = seeded_store();
    // 온도 key를 압력 단위로 읽기/쓰기 둘 다 거부된다
    assert!(matches!(
        store.get_value("test.temp", Unit::Pressure(PressureUnit::Bar)),
        Err(StateError::UnsupportedUnit { .. })
    ));
    assert!(matches!(
        store.set("test.temp", 1.0, Unit::Pressure(PressureUnit::Bar)),
        Err(StateError::UnsupportedUnit { .. })
    ));
    let kelvin = store
        .get_value("test.temp", base_unit(QuantityKind::Temperature))
        .expect("still readable");
    assert!((kelvin - 300.0).abs() < 1e-12);
}

#[test]
fn ensure_does_not_clobber_user_edit() {
    let mut store = seeded_store();
    store
        .set("test.temp", 350.0, Unit::Temperature(TemperatureUnit::Kelvin))
        .expect("set");
    store.ensure("test.temp", QuantityKind::Temperature, 300.0);
    let read = store
        .get_value("test.temp", Unit::Temperature(TemperatureUnit::Kelvin))
        .expect("get");
    assert!((read - 350.0).abs() < 1e-12);
}

#[test]
fn binder_rows_follow_registry_order() {
    let store = seeded_store();
    let binder = GridBinder::from_store(test_registry(), &store).expect("binder");
    assert_eq!(binder.len(), 3);
    let keys: Vec<&str> = binder.rows().iter().map(|r| r.key).collect();
    assert_eq!(keys, ["test.temp", "test.pres", "test.frac"]);
    // 초기 행 값은 기준 단위로 렌더링된다
    assert_eq!(binder.rows()[0].text, "300");
    assert_eq!(binder.rows()[1].text, "101325");
}

#[test]
fn valid_edit_reaches_store() {
    let mut store = seeded_store();
    let mut binder = GridBinder::from_store(test_registry(), &store).expect("binder");
    *binder.row_text_mut(0).expect("row") = "350".to_string();
    let outcome = binder.commit_edit(&mut store, 0).expect("commit");
    assert_eq!(outcome, EditOutcome::Applied);
    let kelvin = store
        .get_value("test.temp", base_unit(QuantityKind::Temperature))
        .expect("get");
    assert!((kelvin - 350.0).abs() < 1e-12);
}

#[test]
fn invalid_edit_reverts_cell_and_leaves_store_unchanged() {
    let mut store = seeded_store();
    let mut binder = GridBinder::from_store(test_registry(), &store).expect("binder");
    *binder.row_text_mut(0).expect("row") = "abc".to_string();
    let outcome = binder.commit_edit(&mut store, 0).expect("commit");
    assert_eq!(outcome, EditOutcome::Reverted);
    assert_eq!(binder.rows()[0].text, "300");
    let kelvin = store
        .get_value("test.temp", base_unit(QuantityKind::Temperature))
        .expect("get");
    assert!((kelvin - 300.0).abs() < 1e-12);
}

#[test]
fn out_of_range_edit_is_ignored() {
    let mut store = seeded_store();
    let mut binder = GridBinder::from_store(test_registry(), &store).expect("binder");
    let outcome = binder.commit_edit(&mut store, 99).expect("commit");
    assert_eq!(outcome, EditOutcome::Ignored);
    assert_eq!(binder.len(), 3);
}

#[test]
fn row_unit_switch_re_renders_value() {
    let mut store = seeded_store();
    let mut binder = GridBinder::from_store(test_registry(), &store).expect("binder");
    binder
        .set_row_unit(&store, 0, Unit::Temperature(TemperatureUnit::Celsius))
        .expect("unit switch");
    assert_eq!(binder.rows()[0].text, "26.85");
    // 섭씨로 입력해도 저장은 켈빈 기준으로 들어간다
    *binder.row_text_mut(0).expect("row") = "30".to_string();
    binder.commit_edit(&mut store, 0).expect("commit");
    let kelvin = store
        .get_value("test.temp", base_unit(QuantityKind::Temperature))
        .expect("get");
    assert!((kelvin - 303.15).abs() < 1e-9);
}

#[test]
fn duplicate_registry_key_is_rejected() {
    let result = ParameterRegistry::new(vec![
        ParameterDescriptor::new("dup.key", "param.amb_temp", QuantityKind::Temperature),
        ParameterDescriptor::new("dup.key", "param.amb_pres", QuantityKind::Pressure),
    ]);
    assert!(result.is_err());
}
