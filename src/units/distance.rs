use serde::{Deserialize, Serialize};

/// 거리(오리피스 직경, 릴리스 높이 등) 단위. 내부 기준은 미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    Meter,
    Centimeter,
    Millimeter,
    Inch,
    Foot,
}

/// 주어진 거리를 미터로 변환한다.
pub fn to_meter(value: f64, unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Meter => value,
        DistanceUnit::Centimeter => value / 100.0,
        DistanceUnit::Millimeter => value / 1000.0,
        DistanceUnit::Inch => value * 0.0254,
        DistanceUnit::Foot => value * 0.3048,
    }
}

/// 미터 값을 원하는 단위로 변환한다.
pub fn from_meter(value_m: f64, unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Meter => value_m,
        DistanceUnit::Centimeter => value_m * 100.0,
        DistanceUnit::Millimeter => value_m * 1000.0,
        DistanceUnit::Inch => value_m / 0.0254,
        DistanceUnit::Foot => value_m / 0.3048,
    }
}

/// 거리를 다른 단위로 변환한다.
pub fn convert_distance(value: f64, from: DistanceUnit, to: DistanceUnit) -> f64 {
    let m = to_meter(value, from);
    from_meter(m, to)
}
