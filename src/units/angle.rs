use serde::{Deserialize, Serialize};

/// 릴리스 각도 단위. 내부 기준은 라디안이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngleUnit {
    Radian,
    Degree,
}

/// 주어진 각도를 라디안으로 변환한다.
pub fn to_radian(value: f64, unit: AngleUnit) -> f64 {
    match unit {
        AngleUnit::Radian => value,
        AngleUnit::Degree => value.to_radians(),
    }
}

/// 라디안 값을 원하는 단위로 변환한다.
pub fn from_radian(value_rad: f64, unit: AngleUnit) -> f64 {
    match unit {
        AngleUnit::Radian => value_rad,
        AngleUnit::Degree => value_rad.to_degrees(),
    }
}

/// 각도를 서로 다른 단위로 변환한다.
pub fn convert_angle(value: f64, from: AngleUnit, to: AngleUnit) -> f64 {
    let rad = to_radian(value, from);
    from_radian(rad, to)
}
