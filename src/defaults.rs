//! 패널 파라미터의 초기값 테이블.
//!
//! 원본 시스템의 상수 데이터베이스 역할을 한다. 값은 내부 기준 단위
//! (K, Pa, m, rad)이며, 패널 로드 시 `apply_defaults`로 상태 저장소에
//! 명시적으로 주입한다. 초기화 없이 읽으면 저장소가 MissingKey로 실패하므로
//! 0이 조용히 대입되는 일은 없다.

use crate::quantity::QuantityKind;
use crate::registry::ParameterRegistry;
use crate::state::StateStore;

#[derive(Debug, Clone, Copy)]
pub struct ParameterDefault {
    pub key: &'static str,
    pub kind: QuantityKind,
    pub value_base: f64,
}

impl ParameterDefault {
    const fn new(key: &'static str, kind: QuantityKind, value_base: f64) -> Self {
        Self {
            key,
            kind,
            value_base,
        }
    }
}

use QuantityKind::*;

const DEFAULTS: &[ParameterDefault] = &[
    // 무화염 플룸
    ParameterDefault::new("plume.amb_temp", Temperature, 288.15),
    ParameterDefault::new("plume.amb_pres", Pressure, 101_325.0),
    ParameterDefault::new("plume.h2_temp", Temperature, 288.15),
    ParameterDefault::new("plume.h2_pres", Pressure, 35_000_000.0),
    ParameterDefault::new("plume.orifice_diam", Distance, 0.003_56),
    ParameterDefault::new("plume.release_angle", Angle, std::f64::consts::FRAC_PI_2),
    ParameterDefault::new("plume.contour", Unitless, 0.04),
    // 화염 온도/궤적
    ParameterDefault::new("flame.h2_temp", Temperature, 288.15),
    ParameterDefault::new("flame.h2_pres", Pressure, 35_000_000.0),
    ParameterDefault::new("flame.amb_temp", Temperature, 288.15),
    ParameterDefault::new("flame.amb_pres", Pressure, 101_325.0),
    ParameterDefault::new("flame.orifice_diam", Distance, 0.003_56),
    ParameterDefault::new("flame.release_angle", Angle, 0.0),
    ParameterDefault::new("flame.rel_humidity", Unitless, 0.89),
    // 폭발 과압
    ParameterDefault::new("overp.amb_temp", Temperature, 288.15),
    ParameterDefault::new("overp.amb_pres", Pressure, 101_325.0),
    ParameterDefault::new("overp.h2_temp", Temperature, 288.15),
    ParameterDefault::new("overp.h2_pres", Pressure, 35_000_000.0),
    ParameterDefault::new("overp.orifice_diam", Distance, 0.003_56),
    ParameterDefault::new("overp.release_height", Distance, 0.0),
    ParameterDefault::new("overp.yield_factor", Unitless, 0.03),
];

/// 기본값 적용 시 발생 가능한 오류.
#[derive(Debug)]
pub enum DefaultsError {
    /// 레지스트리가 선언한 key에 대응하는 기본값이 테이블에 없는 경우
    MissingDefault(&'static str),
    /// 디스크립터와 기본값의 물리량 종류가 다른 경우
    KindMismatch(&'static str),
}

impl std::fmt::Display for DefaultsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultsError::MissingDefault(k) => write!(f, "기본값이 정의되지 않은 파라미터: {k}"),
            DefaultsError::KindMismatch(k) => {
                write!(f, "기본값과 디스크립터의 물리량 종류가 다름: {k}")
            }
        }
    }
}

impl std::error::Error for DefaultsError {}

pub fn defaults() -> &'static [ParameterDefault] {
    DEFAULTS
}

pub fn default_for(key: &str) -> Option<&'static ParameterDefault> {
    DEFAULTS.iter().find(|d| d.key == key)
}

/// 레지스트리의 모든 key를 기본값으로 초기화한다.
///
/// 이미 값이 있는 key는 건드리지 않는다(사용자 편집 보존). 기본값이 없는
/// key는 즉시 실패한다.
pub fn apply_defaults(
    store: &mut StateStore,
    registry: &ParameterRegistry,
) -> Result<(), DefaultsError> {
    for d in registry.iter() {
        let default = default_for(d.key).ok_or(DefaultsError::MissingDefault(d.key))?;
        if default.kind != d.kind {
            return Err(DefaultsError::KindMismatch(d.key));
        }
        store.ensure(d.key, d.kind, default.value_base);
    }
    Ok(())
}
