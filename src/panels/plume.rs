//! 무화염 플룸(농도 분포) 패널.

use crate::defaults::{self, DefaultsError};
use crate::engine::EngineRequest;
use crate::quantity::QuantityKind::*;
use crate::registry::{ParameterDescriptor, ParameterRegistry, RegistryError};
use crate::state::{StateError, StateStore};

use super::{gather_args, NozzleModel};

pub const OPERATION: &str = "plume-plot";

const DESCRIPTORS: &[ParameterDescriptor] = &[
    ParameterDescriptor::new("plume.amb_temp", "param.amb_temp", Temperature),
    ParameterDescriptor::new("plume.amb_pres", "param.amb_pres", Pressure),
    ParameterDescriptor::new("plume.h2_temp", "param.h2_temp", Temperature),
    ParameterDescriptor::new("plume.h2_pres", "param.h2_pres", Pressure),
    ParameterDescriptor::new("plume.orifice_diam", "param.orifice_diam", Distance),
    ParameterDescriptor::new("plume.release_angle", "param.release_angle", Angle),
    ParameterDescriptor::new("plume.contour", "param.contour", Unitless),
];

/// 패널 파라미터 레지스트리를 만든다.
pub fn registry() -> Result<ParameterRegistry, RegistryError> {
    ParameterRegistry::new(DESCRIPTORS.to_vec())
}

/// 패널 로드 시 기본값을 저장소에 주입한다.
pub fn init(store: &mut StateStore, registry: &ParameterRegistry) -> Result<(), DefaultsError> {
    defaults::apply_defaults(store, registry)
}

/// 저장소에서 기준 단위 값을 모아 플룸 플롯 요청을 만든다.
pub fn build_request(
    store: &StateStore,
    nozzle: NozzleModel,
) -> Result<EngineRequest, StateError> {
    Ok(EngineRequest {
        operation: OPERATION,
        args: gather_args(store, DESCRIPTORS)?,
        selectors: vec![("nozzle", nozzle.as_code().to_string())],
    })
}
