//! 실행 어댑터와 패널 요청 빌더의 계약 테스트.
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use hydrogen_risk_toolbox::binder::GridBinder;
use hydrogen_risk_toolbox::conversion::base_unit;
use hydrogen_risk_toolbox::defaults;
use hydrogen_risk_toolbox::engine::{
    EngineError, EngineRequest, ExecutionSlot, ExecutionState, PhysicsEngine,
};
use hydrogen_risk_toolbox::panels::{self, NozzleModel, OverpressureMethod};
use hydrogen_risk_toolbox::quantity::QuantityKind;
use hydrogen_risk_toolbox::registry::{ParameterDescriptor, ParameterRegistry};
use hydrogen_risk_toolbox::state::StateStore;

/// 요청을 기록하고 준비된 응답을 돌려주는 스텁 엔진.
struct RecordingEngine {
    captured: Mutex<Option<EngineRequest>>,
    /// None이면 빈 결과(실패 신호)를 흉내낸다.
    response: Option<PathBuf>,
}

impl RecordingEngine {
    fn new(response: Option<PathBuf>) -> Self {
        Self {
            captured: Mutex::new(None),
            response,
        }
    }
}

impl PhysicsEngine for RecordingEngine {
    fn invoke(&self, request: &EngineRequest) -> Result<PathBuf, EngineError> {
        if let Ok(mut slot) = self.captured.lock() {
            *slot = Some(request.clone());
        }
        match &self.response {
            Some(path) => Ok(path.clone()),
            None => Err(EngineError::EmptyResult),
        }
    }
}

/// 신호를 받을 때까지 반환하지 않는 엔진. 중복 실행 방지 테스트용.
struct BlockingEngine {
    release: Mutex<mpsc::Receiver<()>>,
}

impl PhysicsEngine for BlockingEngine {
    fn invoke(&self, _request: &EngineRequest) -> Result<PathBuf, EngineError> {
        if let Ok(rx) = self.release.lock() {
            let _ = rx.recv_timeout(Duration::from_secs(5));
        }
        Ok(PathBuf::from("out/plot.png"))
    }
}

fn wait_terminal(slot: &mut ExecutionSlot) -> ExecutionState {
    for _ in 0..500 {
        if slot.poll() {
            return slot.state().clone();
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("worker did not reach a terminal state");
}

#[test]
fn edited_value_reaches_engine_and_failure_leaves_store_intact() {
    let mut store = StateStore::new();
    let registry = panels::plume::registry().expect("registry");
    panels::plume::init(&mut store, &registry).expect("defaults");
    let mut binder = GridBinder::from_store(registry, &store).expect("binder");

    // 주위 온도 셀을 350으로 편집
    assert_eq!(binder.rows()[0].key, "plume.amb_temp");
    *binder.row_text_mut(0).expect("row") = "350".to_string();
    binder.commit_edit(&mut store, 0).expect("commit");

    let engine = Arc::new(RecordingEngine::new(None));
    let request = panels::plume::build_request(&store, NozzleModel::Birch).expect("request");
    let mut slot = ExecutionSlot::new();
    assert!(slot.start(engine.clone(), request));

    // 빈 결과는 실패로 끝난다
    match wait_terminal(&mut slot) {
        ExecutionState::Failed(_) => {}
        other => panic!("expected Failed, got {other:?}"),
    }

    // 엔진은 기준 단위(K) 값 350을 받았다
    let captured = engine.captured.lock().expect("captured").clone();
    let captured = captured.expect("engine was invoked");
    assert_eq!(captured.operation, "plume-plot");
    let amb = captured
        .args
        .iter()
        .find(|(name, _)| *name == "amb_temp")
        .expect("amb_temp arg");
    assert!((amb.1 - 350.0).abs() < 1e-12);
    assert_eq!(
        captured.selectors,
        vec![("nozzle", "birch".to_string())]
    );

    // 실패한 호출은 저장소를 바꾸지 않는다
    let kelvin = store
        .get_value("plume.amb_temp", base_unit(QuantityKind::Temperature))
        .expect("get");
    assert!((kelvin - 350.0).abs() < 1e-12);

    // 종료 후에는 재실행이 가능하다
    slot.reset();
    assert_eq!(*slot.state(), ExecutionState::Idle);
}

#[test]
fn successful_result_carries_artifact_path() {
    let mut store = StateStore::new();
    let registry = panels::flame::registry().expect("registry");
    panels::flame::init(&mut store, &registry).expect("defaults");
    let engine = Arc::new(RecordingEngine::new(Some(PathBuf::from("out/flame.png"))));
    let request =
        panels::flame::build_request(&store, NozzleModel::YuceilOtugen).expect("request");
    let mut slot = ExecutionSlot::new();
    assert!(slot.start(engine, request));
    match wait_terminal(&mut slot) {
        ExecutionState::Succeeded(path) => assert_eq!(path, PathBuf::from("out/flame.png")),
        other => panic!("expected Succeeded, got {other:?}"),
    }
}

#[test]
fn second_start_while_running_is_a_no_op() {
    let (tx, rx) = mpsc::channel();
    let engine = Arc::new(BlockingEngine {
        release: Mutex::new(rx),
    });
    let request = EngineRequest {
        operation: "plume-plot",
        args: vec![("amb_temp", 288.15)],
        selectors: vec![],
    };
    let mut slot = ExecutionSlot::new();
    assert!(slot.start(engine.clone(), request.clone()));
    assert!(slot.is_running());
    // Running 동안 두 번째 트리거는 워커를 띄우지 않는다
    assert!(!slot.start(engine, request));
    assert!(!slot.poll());

    tx.send(()).expect("release worker");
    match wait_terminal(&mut slot) {
        ExecutionState::Succeeded(_) => {}
        other => panic!("expected Succeeded, got {other:?}"),
    }
}

#[test]
fn overpressure_selectors_follow_method() {
    let mut store = StateStore::new();
    let registry = panels::overpressure::registry().expect("registry");
    panels::overpressure::init(&mut store, &registry).expect("defaults");

    let bst = panels::overpressure::build_request(
        &store,
        NozzleModel::Birch,
        OverpressureMethod::Bst,
        0.35,
    )
    .expect("bst request");
    assert!(bst
        .selectors
        .iter()
        .any(|(name, value)| *name == "mach_flame_speed" && value == "0.35"));

    let tnt = panels::overpressure::build_request(
        &store,
        NozzleModel::Birch,
        OverpressureMethod::Tnt,
        0.35,
    )
    .expect("tnt request");
    assert!(tnt
        .selectors
        .iter()
        .any(|(name, value)| *name == "method" && value == "tnt"));
    assert!(!tnt
        .selectors
        .iter()
        .any(|(name, _)| *name == "mach_flame_speed"));
}

#[test]
fn missing_default_fails_fast() {
    let mut store = StateStore::new();
    let registry = ParameterRegistry::new(vec![ParameterDescriptor::new(
        "unknown.key",
        "param.amb_temp",
        QuantityKind::Temperature,
    )])
    .expect("registry");
    assert!(defaults::apply_defaults(&mut store, &registry).is_err());
    // 실패 시 0이 조용히 들어가지 않는다
    assert!(!store.contains("unknown.key"));
}
