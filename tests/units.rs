//! 단위 변환 회귀 테스트. 기준값은 정의 상수에서 직접 계산했다.
use hydrogen_risk_toolbox::conversion::{self, base_unit, parse_unit, Unit};
use hydrogen_risk_toolbox::quantity::QuantityKind;
use hydrogen_risk_toolbox::units::*;

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected} got {actual} (diff {diff})"
    );
}

#[test]
fn celsius_to_kelvin_reference_points() {
    assert_close(
        "0C",
        convert_temperature(0.0, TemperatureUnit::Celsius, TemperatureUnit::Kelvin),
        273.15,
        1e-9,
    );
    assert_close(
        "15C",
        convert_temperature(15.0, TemperatureUnit::Celsius, TemperatureUnit::Kelvin),
        288.15,
        1e-9,
    );
    // 화씨 변환: 59°F = 15°C = 288.15K
    assert_close(
        "59F",
        convert_temperature(59.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Kelvin),
        288.15,
        1e-9,
    );
}

#[test]
fn pressure_absolute_reference_points() {
    assert_close(
        "1atm",
        convert_pressure(1.0, PressureUnit::Atm, PressureUnit::Pascal),
        101_325.0,
        1e-6,
    );
    assert_close(
        "350bar",
        convert_pressure(350.0, PressureUnit::Bar, PressureUnit::MegaPascal),
        35.0,
        1e-9,
    );
    assert_close(
        "1psi",
        convert_pressure(1.0, PressureUnit::Psi, PressureUnit::Pascal),
        6_894.757,
        1e-3,
    );
}

#[test]
fn distance_and_angle_reference_points() {
    assert_close(
        "3.56mm",
        convert_distance(3.56, DistanceUnit::Millimeter, DistanceUnit::Meter),
        0.003_56,
        1e-12,
    );
    assert_close(
        "1in",
        convert_distance(1.0, DistanceUnit::Inch, DistanceUnit::Millimeter),
        25.4,
        1e-9,
    );
    assert_close(
        "90deg",
        convert_angle(90.0, AngleUnit::Degree, AngleUnit::Radian),
        std::f64::consts::FRAC_PI_2,
        1e-12,
    );
}

#[test]
fn display_unit_round_trip_within_tolerance() {
    // 표시 단위 → 기준 단위 → 표시 단위 왕복이 값을 보존해야 한다
    let cases: &[(Unit, f64)] = &[
        (Unit::Temperature(TemperatureUnit::Fahrenheit), -40.0),
        (Unit::Pressure(PressureUnit::Psi), 5_000.0),
        (Unit::Distance(DistanceUnit::Inch), 0.14),
        (Unit::Angle(AngleUnit::Degree), 45.0),
        (Unit::Unitless, 0.04),
    ];
    for (unit, value) in cases {
        let round = unit.from_base(unit.to_base(*value));
        assert_close(unit.symbol(), round, *value, 1e-9 * value.abs().max(1.0));
    }
}

#[test]
fn parse_unit_rejects_kind_mismatch() {
    // 압력 자리에 온도 단위 기호를 넣으면 UnknownUnit으로 거부된다
    assert!(parse_unit(QuantityKind::Pressure, "C").is_err());
    assert!(parse_unit(QuantityKind::Temperature, "bar").is_err());
    let unit = parse_unit(QuantityKind::Pressure, "kPa").expect("kPa");
    assert_eq!(unit.kind(), QuantityKind::Pressure);
}

#[test]
fn string_convert_matches_typed_convert() {
    let via_str = conversion::convert(QuantityKind::Temperature, 300.0, "K", "C").expect("convert");
    assert_close("300K", via_str, 26.85, 1e-9);
    assert_eq!(base_unit(QuantityKind::Angle).symbol(), "rad");
}
