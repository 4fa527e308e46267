//! 제트 화염 온도/궤적 패널.

use crate::defaults::{self, DefaultsError};
use crate::engine::EngineRequest;
use crate::quantity::QuantityKind::*;
use crate::registry::{ParameterDescriptor, ParameterRegistry, RegistryError};
use crate::state::{StateError, StateStore};

use super::{gather_args, NozzleModel};

pub const OPERATION: &str = "flame-temperature-plot";

const DESCRIPTORS: &[ParameterDescriptor] = &[
    ParameterDescriptor::new("flame.h2_temp", "param.h2_temp", Temperature),
    ParameterDescriptor::new("flame.h2_pres", "param.h2_pres", Pressure),
    ParameterDescriptor::new("flame.amb_temp", "param.amb_temp", Temperature),
    ParameterDescriptor::new("flame.amb_pres", "param.amb_pres", Pressure),
    ParameterDescriptor::new("flame.orifice_diam", "param.orifice_diam", Distance),
    ParameterDescriptor::new("flame.release_angle", "param.release_angle", Angle),
    ParameterDescriptor::new("flame.rel_humidity", "param.rel_humidity", Unitless),
];

pub fn registry() -> Result<ParameterRegistry, RegistryError> {
    ParameterRegistry::new(DESCRIPTORS.to_vec())
}

pub fn init(store: &mut StateStore, registry: &ParameterRegistry) -> Result<(), DefaultsError> {
    defaults::apply_defaults(store, registry)
}

/// 저장소에서 기준 단위 값을 모아 화염 온도 플롯 요청을 만든다.
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
