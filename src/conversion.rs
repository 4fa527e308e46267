use crate::quantity::QuantityKind;
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    UnknownUnit(String),
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::UnknownUnit(u) => write!(f, "알 수 없는 단위: {u}"),
        }
    }
}

impl std::error::Error for ConversionError {}

/// 물리량 종류별 단위를 하나로 감싼 타입.
///
/// 상태 저장소가 요청 단위의 종류를 호출 지점에서 검증할 수 있게 한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Unit {
    Temperature(TemperatureUnit),
    Pressure(PressureUnit),
    Distance(DistanceUnit),
    Angle(AngleUnit),
    Unitless,
}

impl Unit {
    /// 이 단위가 속한 물리량 종류를 반환한다.
    pub fn kind(&self) -> QuantityKind {
        match self {
            Unit::Temperature(_) => QuantityKind::Temperature,
            Unit::Pressure(_) => QuantityKind::Pressure,
            Unit::Distance(_) => QuantityKind::Distance,
            Unit::Angle(_) => QuantityKind::Angle,
            Unit::Unitless => QuantityKind::Unitless,
        }
    }

    /// 표시 단위 값을 내부 기준 단위로 환산한다.
    pub fn to_base(&self, value: f64) -> f64 {
        match self {
            Unit::Temperature(u) => temperature::to_kelvin(value, *u),
            Unit::Pressure(u) => pressure::to_pascal(value, *u),
            Unit::Distance(u) => distance::to_meter(value, *u),
            Unit::Angle(u) => angle::to_radian(value, *u),
            Unit::Unitless => value,
        }
    }

    /// 내부 기준 단위 값을 이 표시 단위로 환산한다.
    pub fn from_base(&self, value_base: f64) -> f64 {
        match self {
            Unit::Temperature(u) => temperature::from_kelvin(value_base, *u),
            Unit::Pressure(u) => pressure::from_pascal(value_base, *u),
            Unit::Distance(u) => distance::from_meter(value_base, *u),
            Unit::Angle(u) => angle::from_radian(value_base, *u),
            Unit::Unitless => value_base,
        }
    }

    /// 단위 기호 문자열을 반환한다. 파서(`parse_unit`)와 왕복 가능하다.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Temperature(TemperatureUnit::Kelvin) => "K",
            Unit::Temperature(TemperatureUnit::Celsius) => "C",
            Unit::Temperature(TemperatureUnit::Fahrenheit) => "F",
            Unit::Pressure(PressureUnit::Pascal) => "Pa",
            Unit::Pressure(PressureUnit::KiloPascal) => "kPa",
            Unit::Pressure(PressureUnit::MegaPascal) => "MPa",
            Unit::Pressure(PressureUnit::Bar) => "bar",
            Unit::Pressure(PressureUnit::Atm) => "atm",
            Unit::Pressure(PressureUnit::Psi) => "psi",
            Unit::Distance(DistanceUnit::Meter) => "m",
            Unit::Distance(DistanceUnit::Centimeter) => "cm",
            Unit::Distance(DistanceUnit::Millimeter) => "mm",
            Unit::Distance(DistanceUnit::Inch) => "in",
            Unit::Distance(DistanceUnit::Foot) => "ft",
            Unit::Angle(AngleUnit::Radian) => "rad",
            Unit::Angle(AngleUnit::Degree) => "deg",
            Unit::Unitless => "-",
        }
    }
}

/// 물리량 종류의 내부 기준 단위를 반환한다.
pub fn base_unit(kind: QuantityKind) -> Unit {
    match kind {
        QuantityKind::Temperature => Unit::Temperature(TemperatureUnit::Kelvin),
        QuantityKind::Pressure => Unit::Pressure(PressureUnit::Pascal),
        QuantityKind::Distance => Unit::Distance(DistanceUnit::Meter),
        QuantityKind::Angle => Unit::Angle(AngleUnit::Radian),
        QuantityKind::Unitless => Unit::Unitless,
    }
}

/// 물리량 종류별 선택 가능한 단위 목록을 반환한다. UI 콤보박스용.
pub fn unit_choices(kind: QuantityKind) -> &'static [Unit] {
    match kind {
        QuantityKind::Temperature => &[
            Unit::Temperature(TemperatureUnit::Kelvin),
            Unit::Temperature(TemperatureUnit::Celsius),
            Unit::Temperature(TemperatureUnit::Fahrenheit),
        ],
        QuantityKind::Pressure => &[
            Unit::Pressure(PressureUnit::Pascal),
            Unit::Pressure(PressureUnit::KiloPascal),
            Unit::Pressure(PressureUnit::MegaPascal),
            Unit::Pressure(PressureUnit::Bar),
            Unit::Pressure(PressureUnit::Atm),
            Unit::Pressure(PressureUnit::Psi),
        ],
        QuantityKind::Distance => &[
            Unit::Distance(DistanceUnit::Meter),
            Unit::Distance(DistanceUnit::Centimeter),
            Unit::Distance(DistanceUnit::Millimeter),
            Unit::Distance(DistanceUnit::Inch),
            Unit::Distance(DistanceUnit::Foot),
        ],
        QuantityKind::Angle => &[
            Unit::Angle(AngleUnit::Radian),
            Unit::Angle(AngleUnit::Degree),
        ],
        QuantityKind::Unitless => &[Unit::Unitless],
    }
}

/// 문자열로 전달된 단위명을 주어진 물리량 종류의 단위로 해석한다.
///
/// 단위 문자열 예시는 `C`, `K`, `bar`, `MPa`, `mm`, `deg` 등을 사용할 수 있다.
pub fn parse_unit(kind: QuantityKind, s: &str) -> Result<Unit, ConversionError> {
    match kind {
        QuantityKind::Temperature => Ok(Unit::Temperature(parse_temperature_unit(s)?)),
        QuantityKind::Pressure => Ok(Unit::Pressure(parse_pressure_unit(s)?)),
        QuantityKind::Distance => Ok(Unit::Distance(parse_distance_unit(s)?)),
        QuantityKind::Angle => Ok(Unit::Angle(parse_angle_unit(s)?)),
        QuantityKind::Unitless => match s.trim() {
            "" | "-" => Ok(Unit::Unitless),
            other => Err(ConversionError::UnknownUnit(other.to_string())),
        },
    }
}

/// 문자열 단위명 기반 변환. CLI/GUI 단위 변환기에서 사용한다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    let from = parse_unit(kind, from_unit_str)?;
    let to = parse_unit(kind, to_unit_str)?;
    Ok(to.from_base(from.to_base(value)))
}

fn parse_temperature_unit(s: &str) -> Result<TemperatureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
        "c" | "celsius" | "°c" => Ok(TemperatureUnit::Celsius),
        "f" | "fahrenheit" | "°f" => Ok(TemperatureUnit::Fahrenheit),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_pressure_unit(s: &str) -> Result<PressureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "pa" | "pascal" => Ok(PressureUnit::Pascal),
        "kpa" | "kilopascal" => Ok(PressureUnit::KiloPascal),
        "mpa" | "megapascal" => Ok(PressureUnit::MegaPascal),
        "bar" => Ok(PressureUnit::Bar),
        "atm" => Ok(PressureUnit::Atm),
        "psi" => Ok(PressureUnit::Psi),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_distance_unit(s: &str) -> Result<DistanceUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "m" | "meter" | "metre" => Ok(DistanceUnit::Meter),
        "cm" => Ok(DistanceUnit::Centimeter),
        "mm" => Ok(DistanceUnit::Millimeter),
        "in" | "inch" => Ok(DistanceUnit::Inch),
        "ft" | "foot" => Ok(DistanceUnit::Foot),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_angle_unit(s: &str) -> Result<AngleUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "rad" | "radian" => Ok(AngleUnit::Radian),
        "deg" | "degree" | "°" => Ok(AngleUnit::Degree),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}
