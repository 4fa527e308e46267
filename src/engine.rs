//! 외부 물리/통계 엔진 호출 어댑터.
//!
//! 엔진 자체는 이 저장소 밖의 협력자이다. 어댑터의 책임은 파라미터를
//! 기준 단위로 모아 전달하고, 빈 결과를 실패 신호로 취급하는 것뿐이다.
//! 결과는 생성된 아티팩트(플롯 이미지) 파일 경로 한 줄이다.

use std::path::PathBuf;
use std::process::Command;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

/// 엔진에 넘길 요청 하나. 수치 인자는 전부 내부 기준 단위이다.
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// 수행할 연산 이름 (예: "plume-plot")
    pub operation: &'static str,
    /// key=value로 전달되는 수치 인자
    pub args: Vec<(&'static str, f64)>,
    /// 노즐 모델 등 범주형 선택자
    pub selectors: Vec<(&'static str, String)>,
}

/// 엔진 호출 시 발생 가능한 오류.
#[derive(Debug)]
pub enum EngineError {
    /// 프로세스 실행 실패
    Io(std::io::Error),
    /// 엔진이 빈 결과를 반환함. 유일한 실패 신호로, 세부 구분은 없다.
    EmptyResult,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Io(e) => write!(f, "엔진 실행 오류: {e}"),
            EngineError::EmptyResult => write!(f, "엔진이 결과를 반환하지 않음"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(value: std::io::Error) -> Self {
        EngineError::Io(value)
    }
}

/// 외부 엔진 경계. 테스트에서는 스텁 구현으로 대체한다.
pub trait PhysicsEngine: Send + Sync {
    fn invoke(&self, request: &EngineRequest) -> Result<PathBuf, EngineError>;
}

/// 설정된 실행 파일을 자식 프로세스로 호출하는 기본 구현.
///
/// 호출 형식: `<program> --op <operation> key=value ... selector=value ...`
/// 표준 출력 첫 줄(trim)이 아티팩트 경로이며, 비어 있으면 실패이다.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: PathBuf,
}

impl CommandEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &PathBuf {
        &self.program
    }
}

impl PhysicsEngine for CommandEngine {
    fn invoke(&self, request: &EngineRequest) -> Result<PathBuf, EngineError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--op").arg(request.operation);
        for (name, value) in &request.args {
            cmd.arg(format!("{name}={value}"));
        }
        for (name, value) in &request.selectors {
            cmd.arg(format!("{name}={value}"));
        }
        let output = cmd.output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout.lines().next().unwrap_or("").trim();
        if path.is_empty() {
            // 종료 코드와 무관하게 빈 출력은 전부 같은 실패로 수렴한다.
            return Err(EngineError::EmptyResult);
        }
        Ok(PathBuf::from(path))
    }
}

/// 패널 인스턴스당 하나뿐인 실행 상태 기계.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionState {
    Idle,
    Running,
    Succeeded(PathBuf),
    Failed(String),
}

/// 사용자 트리거 한 번에 워커 스레드 하나를 띄우고, 대화 스레드에서
/// poll로 종료 상태를 회수한다.
///
/// Running 동안 start는 no-op이라 같은 패널에서 요청이 겹치지 않는다.
/// 재시도·타임아웃·취소는 없다. 사용자가 다시 누르는 것이 재시도다.
#[derive(Debug)]
pub struct ExecutionSlot {
    state: ExecutionState,
    rx: Option<mpsc::Receiver<Result<PathBuf, String>>>,
}

impl Default for ExecutionSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionSlot {
    pub fn new() -> Self {
        Self {
            state: ExecutionState::Idle,
            rx: None,
        }
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ExecutionState::Running
    }

    /// 워커 스레드에서 엔진을 호출한다. 이미 Running이면 false를 반환하고
    /// 아무것도 하지 않는다.
    pub fn start(&mut self, engine: Arc<dyn PhysicsEngine>, request: EngineRequest) -> bool {
        if self.is_running() {
            return false;
        }
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = engine.invoke(&request).map_err(|e| e.to_string());
            let _ = tx.send(result);
        });
        self.rx = Some(rx);
        self.state = ExecutionState::Running;
        true
    }

    /// 대화 스레드에서 주기적으로 호출한다. 종료 상태로 전이했으면 true.
    pub fn poll(&mut self) -> bool {
        let rx = match self.rx.as_ref() {
            Some(rx) => rx,
            None => return false,
        };
        match rx.try_recv() {
            Ok(Ok(path)) => {
                self.state = ExecutionState::Succeeded(path);
            }
            Ok(Err(message)) => {
                self.state = ExecutionState::Failed(message);
            }
            Err(mpsc::TryRecvError::Empty) => return false,
            Err(mpsc::TryRecvError::Disconnected) => {
                // 워커가 결과 없이 죽은 경우도 세부 구분 없는 실패로 취급한다.
                self.state = ExecutionState::Failed(EngineError::EmptyResult.to_string());
            }
        }
        self.rx = None;
        true
    }

    /// 결과를 소비한 뒤 Idle로 되돌린다.
    pub fn reset(&mut self) {
        if !self.is_running() {
            self.state = ExecutionState::Idle;
            self.rx = None;
        }
    }
}
