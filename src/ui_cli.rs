use std::io::{self, Write};
use std::sync::Arc;

use crate::app::AppError;
use crate::binder::{EditOutcome, GridBinder};
use crate::config::Config;
use crate::conversion;
use crate::engine::{CommandEngine, PhysicsEngine};
use crate::i18n::{keys, Translator};
use crate::panels::{self, NozzleModel, OverpressureMethod, BST_MACH_FLAME_SPEEDS};
use crate::quantity::QuantityKind;
use crate::state::StateStore;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Plume,
    Flame,
    Overpressure,
    UnitConversion,
    Settings,
    Exit,
}

/// CLI에서 다루는 패널 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Plume,
    Flame,
    Overpressure,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_PLUME));
    println!("{}", tr.t(keys::MAIN_MENU_FLAME));
    println!("{}", tr.t(keys::MAIN_MENU_OVERPRESSURE));
    println!("{}", tr.t(keys::MAIN_MENU_UNIT_CONVERSION));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Plume),
            "2" => return Ok(MenuChoice::Flame),
            "3" => return Ok(MenuChoice::Overpressure),
            "4" => return Ok(MenuChoice::UnitConversion),
            "5" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 시나리오 패널 하나를 CLI로 처리한다.
///
/// 파라미터 편집은 GUI와 같은 그리드 바인더를 거친다. 엔진 호출은 CLI에서는
/// 동기 호출이다. 실패(빈 결과)는 메시지로만 알리고 저장소는 건드리지 않는다.
pub fn handle_panel(
    tr: &Translator,
    cfg: &Config,
    store: &mut StateStore,
    panel: PanelKind,
) -> Result<(), AppError> {
    let registry = match panel {
        PanelKind::Plume => panels::plume::registry()?,
        PanelKind::Flame => panels::flame::registry()?,
        PanelKind::Overpressure => panels::overpressure::registry()?,
    };
    match panel {
        PanelKind::Plume => panels::plume::init(store, &registry)?,
        PanelKind::Flame => panels::flame::init(store, &registry)?,
        PanelKind::Overpressure => panels::overpressure::init(store, &registry)?,
    }
    let mut binder = GridBinder::from_store(registry, store)?;
    let engine = Arc::new(CommandEngine::new(cfg.engine_path.clone()));
    let mut nozzle = NozzleModel::default();
    let mut method = OverpressureMethod::default();
    let mut mach = BST_MACH_FLAME_SPEEDS[1];

    loop {
        println!();
        println!("{}", tr.t(keys::PANEL_PARAMS_HEADING));
        for (i, row) in binder.rows().iter().enumerate() {
            println!(
                "{:>2}) {} [{}] = {}",
                i + 1,
                tr.text(row.label_key),
                row.unit.symbol(),
                row.text
            );
        }
        println!("    {} = {}", tr.t(keys::PANEL_SELECTOR_NOZZLE), nozzle.label());
        if panel == PanelKind::Overpressure {
            println!("    {} = {}", tr.t(keys::PANEL_SELECTOR_METHOD), method.label());
            if method == OverpressureMethod::Bst {
                println!("    {} = {}", tr.t(keys::PANEL_SELECTOR_MACH), mach);
            }
        }
        println!("{}", tr.t(keys::PANEL_EDIT_HINT));

        let line = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        let cmd = line.trim();
        if cmd.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        if cmd.eq_ignore_ascii_case("r") {
            run_engine(tr, store, panel, engine.clone(), nozzle, method, mach)?;
            continue;
        }
        if let Some((sel_name, sel_value)) = cmd.split_once('=') {
            let sel_name = sel_name.trim();
            let sel_value = sel_value.trim();
            if sel_name.eq_ignore_ascii_case("nozzle") {
                match NozzleModel::ALL.iter().find(|n| n.as_code() == sel_value) {
                    Some(n) => nozzle = *n,
                    None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
                }
                continue;
            }
            if sel_name.eq_ignore_ascii_case("method") && panel == PanelKind::Overpressure {
                match OverpressureMethod::ALL.iter().find(|m| m.as_code() == sel_value) {
                    Some(m) => method = *m,
                    None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
                }
                continue;
            }
            if sel_name.eq_ignore_ascii_case("mach") && panel == PanelKind::Overpressure {
                match sel_value.parse::<f64>() {
                    Ok(v) if BST_MACH_FLAME_SPEEDS.contains(&v) => mach = v,
                    _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
                }
                continue;
            }
            // u번호=단위: 표시 단위 변경
            if let Some(rest) = sel_name.strip_prefix('u') {
                if let Ok(n) = rest.trim().parse::<usize>() {
                    if let Some(row) = binder.rows().get(n.wrapping_sub(1)) {
                        match conversion::parse_unit(row.unit.kind(), sel_value) {
                            Ok(unit) => binder.set_row_unit(store, n - 1, unit)?,
                            Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
                        }
                    }
                    continue;
                }
            }
            // 번호=값: 셀 편집
            if let Ok(n) = sel_name.parse::<usize>() {
                let index = n.wrapping_sub(1);
                if let Some(text) = binder.row_text_mut(index) {
                    *text = sel_value.to_string();
                }
                if binder.commit_edit(store, index)? == EditOutcome::Reverted {
                    println!("{}", tr.t(keys::PANEL_EDIT_REVERTED));
                }
                continue;
            }
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

fn run_engine(
    tr: &Translator,
    store: &StateStore,
    panel: PanelKind,
    engine: Arc<CommandEngine>,
    nozzle: NozzleModel,
    method: OverpressureMethod,
    mach: f64,
) -> Result<(), AppError> {
    let request = match panel {
        PanelKind::Plume => panels::plume::build_request(store, nozzle)?,
        PanelKind::Flame => panels::flame::build_request(store, nozzle)?,
        PanelKind::Overpressure => {
            panels::overpressure::build_request(store, nozzle, method, mach)?
        }
    };
    println!("{}", tr.t(keys::PANEL_RUNNING));
    match engine.invoke(&request) {
        Ok(path) => println!("{} {}", tr.t(keys::PANEL_RESULT_PATH), path.display()),
        Err(_) => println!("{}", tr.t(keys::PANEL_ENGINE_FAILED)),
    }
    Ok(())
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::UNIT_CONVERSION_HEADING));
    println!("{}", tr.t(keys::UNIT_CONVERSION_OPTIONS));
    let kind = loop {
        let sel = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_KIND))?;
        match sel.trim() {
            "1" => break QuantityKind::Temperature,
            "2" => break QuantityKind::Pressure,
            "3" => break QuantityKind::Distance,
            "4" => break QuantityKind::Angle,
            _ => println!("{}", tr.t(keys::UNIT_CONVERSION_UNSUPPORTED)),
        }
    };
    let value = read_f64(tr, tr.t(keys::UNIT_CONVERSION_PROMPT_VALUE))?;
    let from = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_FROM_UNIT))?;
    let to = read_line(tr.t(keys::UNIT_CONVERSION_PROMPT_TO_UNIT))?;
    match conversion::convert(kind, value, from.trim(), to.trim()) {
        Ok(out) => println!("{} {:.6} {}", tr.t(keys::UNIT_CONVERSION_RESULT), out, to.trim()),
        Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {:?}",
        tr.t(keys::SETTINGS_CURRENT_UNIT_SYSTEM),
        cfg.unit_system
    );
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_ENGINE), cfg.engine_path);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => return Ok(()),
        "1" => {
            cfg.unit_system = crate::config::UnitSystem::Si;
            cfg.default_units = crate::config::units_for_system(cfg.unit_system);
        }
        "2" => {
            cfg.unit_system = crate::config::UnitSystem::Engineering;
            cfg.default_units = crate::config::units_for_system(cfg.unit_system);
        }
        "3" => {
            cfg.unit_system = crate::config::UnitSystem::Imperial;
            cfg.default_units = crate::config::units_for_system(cfg.unit_system);
        }
        "4" => {
            let path = read_line(tr.t(keys::SETTINGS_PROMPT_ENGINE_PATH))?;
            if !path.trim().is_empty() {
                cfg.engine_path = path.trim().to_string();
            }
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
