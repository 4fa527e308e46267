use serde::{Deserialize, Serialize};

/// 압력 단위. 내부 기준은 파스칼(절대압)이다.
///
/// 외부 엔진은 절대압만 받으므로 게이지 척도는 두지 않는다.
/// 게이지 계기로 읽은 값은 입력 전에 대기압을 더해 절대로 환산해야 한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Pascal,
    KiloPascal,
    MegaPascal,
    Bar,
    Atm,
    Psi,
}

const PA_PER_BAR: f64 = 100_000.0;
const PA_PER_ATM: f64 = 101_325.0;
const PA_PER_PSI: f64 = 6_894.757;

/// 주어진 압력을 Pa(절대)로 변환한다.
pub fn to_pascal(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Pascal => value,
        PressureUnit::KiloPascal => value * 1_000.0,
        PressureUnit::MegaPascal => value * 1_000_000.0,
        PressureUnit::Bar => value * PA_PER_BAR,
        PressureUnit::Atm => value * PA_PER_ATM,
        PressureUnit::Psi => value * PA_PER_PSI,
    }
}

/// Pa 값을 원하는 단위로 변환한다.
pub fn from_pascal(value_pa: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Pascal => value_pa,
        PressureUnit::KiloPascal => value_pa / 1_000.0,
        PressureUnit::MegaPascal => value_pa / 1_000_000.0,
        PressureUnit::Bar => value_pa / PA_PER_BAR,
        PressureUnit::Atm => value_pa / PA_PER_ATM,
        PressureUnit::Psi => value_pa / PA_PER_PSI,
    }
}

/// 압력을 원하는 단위로 변환한다.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    let pa = to_pascal(value, from);
    from_pascal(pa, to)
}
