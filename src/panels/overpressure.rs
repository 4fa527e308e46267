//! 폭발 과압 패널.

use crate::binder::format_value;
use crate::defaults::{self, DefaultsError};
use crate::engine::EngineRequest;
use crate::quantity::QuantityKind::*;
use crate::registry::{ParameterDescriptor, ParameterRegistry, RegistryError};
use crate::state::{StateError, StateStore};

use super::{gather_args, NozzleModel, OverpressureMethod};

pub const OPERATION: &str = "overpressure-plot";

const DESCRIPTORS: &[ParameterDescriptor] = &[
    ParameterDescriptor::new("overp.amb_temp", "param.amb_temp", Temperature),
    ParameterDescriptor::new("overp.amb_pres", "param.amb_pres", Pressure),
    ParameterDescriptor::new("overp.h2_temp", "param.h2_temp", Temperature),
    ParameterDescriptor::new("overp.h2_pres", "param.h2_pres", Pressure),
    ParameterDescriptor::new("overp.orifice_diam", "param.orifice_diam", Distance),
    ParameterDescriptor::new("overp.release_height", "param.release_height", Distance),
    ParameterDescriptor::new("overp.yield_factor", "param.yield_factor", Unitless),
];

pub fn registry() -> Result<ParameterRegistry, RegistryError> {
    ParameterRegistry::new(DESCRIPTORS.to_vec())
}

pub fn init(store: &mut StateStore, registry: &ParameterRegistry) -> Result<(), DefaultsError> {
    defaults::apply_defaults(store, registry)
}

/// 저장소에서 기준 단위 값을 모아 과압 플롯 요청을 만든다.
///
/// BST 방법일 때만 Mach 화염 속도 선택자가 함께 전달된다.
pub fn build_request(
    store: &StateStore,
    nozzle: NozzleModel,
    method: OverpressureMethod,
    bst_mach_flame_speed: f64,
) -> Result<EngineRequest, StateError> {
    let mut selectors = vec![
        ("nozzle", nozzle.as_code().to_string()),
        ("method", method.as_code().to_string()),
    ];
    if method == OverpressureMethod::Bst {
        selectors.push(("mach_flame_speed", format_value(bst_mach_flame_speed)));
    }
    Ok(EngineRequest {
        operation: OPERATION,
        args: gather_args(store, DESCRIPTORS)?,
        selectors,
    })
}
