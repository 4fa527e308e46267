use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::units::*;

/// 사용 가능한 단위 시스템 프리셋을 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// SI 절대 단위. 내부 계산 기준과 동일하다.
    Si,
    /// 현장 관용 단위 (°C, bar, mm, deg)
    Engineering,
    /// 영국식/야드파운드법
    Imperial,
}

/// 각 물리량별 기본 표시 단위 설정을 담는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultUnits {
    pub temperature: TemperatureUnit,
    pub pressure: PressureUnit,
    pub distance: DistanceUnit,
    pub angle: AngleUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        units_for_system(UnitSystem::Si)
    }
}

/// 프리셋별 기본 표시 단위 세트를 반환한다.
pub fn units_for_system(system: UnitSystem) -> DefaultUnits {
    match system {
        UnitSystem::Si => DefaultUnits {
            temperature: TemperatureUnit::Kelvin,
            pressure: PressureUnit::Pascal,
            distance: DistanceUnit::Meter,
            angle: AngleUnit::Radian,
        },
        UnitSystem::Engineering => DefaultUnits {
            temperature: TemperatureUnit::Celsius,
            pressure: PressureUnit::Bar,
            distance: DistanceUnit::Millimeter,
            angle: AngleUnit::Degree,
        },
        UnitSystem::Imperial => DefaultUnits {
            temperature: TemperatureUnit::Fahrenheit,
            pressure: PressureUnit::Psi,
            distance: DistanceUnit::Inch,
            angle: AngleUnit::Degree,
        },
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub language: String,
    /// 언어팩 TOML 디렉터리. 없으면 내장 문자열만 사용한다.
    pub language_pack_dir: Option<String>,
    /// 외부 물리 엔진 실행 파일 경로. PATH 탐색 가능한 이름도 허용한다.
    pub engine_path: String,
    pub unit_system: UnitSystem,
    pub default_units: DefaultUnits,
    /// GUI 창 투명도 (0.3~1.0)
    pub window_alpha: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            engine_path: "h2-engine".to_string(),
            unit_system: UnitSystem::Si,
            default_units: DefaultUnits::default(),
            window_alpha: 1.0,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new("config.toml");
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write("config.toml", content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self)
    }
}
