use crate::config::Config;
use crate::conversion;
use crate::defaults;
use crate::i18n::{self, Translator};
use crate::registry;
use crate::state::{self, StateStore};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 단위 변환 오류
    Conversion(conversion::ConversionError),
    /// 상태 저장소 접근 오류
    State(state::StateError),
    /// 레지스트리 구성 오류
    Registry(registry::RegistryError),
    /// 기본값 테이블 오류
    Defaults(defaults::DefaultsError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Conversion(e) => write!(f, "단위 변환 오류: {e}"),
            AppError::State(e) => write!(f, "상태 저장소 오류: {e}"),
            AppError::Registry(e) => write!(f, "레지스트리 오류: {e}"),
            AppError::Defaults(e) => write!(f, "기본값 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<conversion::ConversionError> for AppError {
    fn from(value: conversion::ConversionError) -> Self {
        AppError::Conversion(value)
    }
}

impl From<state::StateError> for AppError {
    fn from(value: state::StateError) -> Self {
        AppError::State(value)
    }
}

impl From<registry::RegistryError> for AppError {
    fn from(value: registry::RegistryError) -> Self {
        AppError::Registry(value)
    }
}

impl From<defaults::DefaultsError> for AppError {
    fn from(value: defaults::DefaultsError) -> Self {
        AppError::Defaults(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 상태 저장소는 여기(애플리케이션 루트)가 소유하고 각 핸들러에 명시적으로
/// 전달한다. 패널을 오가도 편집한 값은 저장소에 남는다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    let mut store = StateStore::new();
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Plume => {
                ui_cli::handle_panel(tr, config, &mut store, ui_cli::PanelKind::Plume)?
            }
            MenuChoice::Flame => {
                ui_cli::handle_panel(tr, config, &mut store, ui_cli::PanelKind::Flame)?
            }
            MenuChoice::Overpressure => {
                ui_cli::handle_panel(tr, config, &mut store, ui_cli::PanelKind::Overpressure)?
            }
            MenuChoice::UnitConversion => ui_cli::handle_unit_conversion(tr)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
