use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_PLUME: &str = "main_menu.plume";
    pub const MAIN_MENU_FLAME: &str = "main_menu.flame";
    pub const MAIN_MENU_OVERPRESSURE: &str = "main_menu.overpressure";
    pub const MAIN_MENU_UNIT_CONVERSION: &str = "main_menu.unit_conversion";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const PANEL_PARAMS_HEADING: &str = "panel.params_heading";
    pub const PANEL_EDIT_HINT: &str = "panel.edit_hint";
    pub const PANEL_SELECTOR_NOZZLE: &str = "panel.selector_nozzle";
    pub const PANEL_SELECTOR_METHOD: &str = "panel.selector_method";
    pub const PANEL_SELECTOR_MACH: &str = "panel.selector_mach";
    pub const PANEL_RUNNING: &str = "panel.running";
    pub const PANEL_RESULT_PATH: &str = "panel.result_path";
    pub const PANEL_ENGINE_FAILED: &str = "panel.engine_failed";
    pub const PANEL_EDIT_REVERTED: &str = "panel.edit_reverted";

    pub const UNIT_CONVERSION_HEADING: &str = "unit_conversion.heading";
    pub const UNIT_CONVERSION_OPTIONS: &str = "unit_conversion.options";
    pub const UNIT_CONVERSION_PROMPT_KIND: &str = "unit_conversion.prompt_kind";
    pub const UNIT_CONVERSION_PROMPT_VALUE: &str = "unit_conversion.prompt_value";
    pub const UNIT_CONVERSION_PROMPT_FROM_UNIT: &str = "unit_conversion.prompt_from_unit";
    pub const UNIT_CONVERSION_PROMPT_TO_UNIT: &str = "unit_conversion.prompt_to_unit";
    pub const UNIT_CONVERSION_RESULT: &str = "unit_conversion.result";
    pub const UNIT_CONVERSION_UNSUPPORTED: &str = "unit_conversion.unsupported";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_UNIT_SYSTEM: &str = "settings.current_unit_system";
    pub const SETTINGS_CURRENT_ENGINE: &str = "settings.current_engine";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_PROMPT_ENGINE_PATH: &str = "settings.prompt_engine_path";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const PARAM_AMB_TEMP: &str = "param.amb_temp";
    pub const PARAM_AMB_PRES: &str = "param.amb_pres";
    pub const PARAM_H2_TEMP: &str = "param.h2_temp";
    pub const PARAM_H2_PRES: &str = "param.h2_pres";
    pub const PARAM_ORIFICE_DIAM: &str = "param.orifice_diam";
    pub const PARAM_RELEASE_ANGLE: &str = "param.release_angle";
    pub const PARAM_CONTOUR: &str = "param.contour";
    pub const PARAM_REL_HUMIDITY: &str = "param.rel_humidity";
    pub const PARAM_RELEASE_HEIGHT: &str = "param.release_height";
    pub const PARAM_YIELD_FACTOR: &str = "param.yield_factor";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// 언어팩 → 내장 순으로 조회한다. GUI 라벨용.
    pub fn text(&self, key: &str) -> String {
        self.lookup(key)
            .unwrap_or_else(|| self.t(key).to_string())
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫/중첩 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Hydrogen Risk Toolbox ===",
        MAIN_MENU_PLUME => "1) 플룸 농도 플롯",
        MAIN_MENU_FLAME => "2) 화염 온도 플롯",
        MAIN_MENU_OVERPRESSURE => "3) 폭발 과압 플롯",
        MAIN_MENU_UNIT_CONVERSION => "4) 단위 변환기",
        MAIN_MENU_SETTINGS => "5) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        PANEL_PARAMS_HEADING => "현재 파라미터:",
        PANEL_EDIT_HINT => "번호=값 으로 수정, u번호=단위 로 표시 단위 변경, r=실행, q=뒤로",
        PANEL_SELECTOR_NOZZLE => "노즐 모델",
        PANEL_SELECTOR_METHOD => "과압 방법",
        PANEL_SELECTOR_MACH => "Mach 화염 속도",
        PANEL_RUNNING => "엔진 호출 중...",
        PANEL_RESULT_PATH => "생성된 플롯:",
        PANEL_ENGINE_FAILED => "엔진 호출이 실패했습니다. 입력을 확인한 뒤 다시 실행하세요.",
        PANEL_EDIT_REVERTED => "숫자가 아니어서 직전 값으로 되돌렸습니다.",
        UNIT_CONVERSION_HEADING => "\n-- 단위 변환 --",
        UNIT_CONVERSION_OPTIONS => "1) 온도  2) 압력  3) 거리  4) 각도",
        UNIT_CONVERSION_PROMPT_KIND => "항목 번호를 입력: ",
        UNIT_CONVERSION_PROMPT_VALUE => "값 입력: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "입력 단위(ex: C, bar, mm, deg): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "변환 단위(ex: K, psi, in, rad): ",
        UNIT_CONVERSION_RESULT => "변환 결과:",
        UNIT_CONVERSION_UNSUPPORTED => "지원하지 않는 번호입니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "현재 단위 시스템:",
        SETTINGS_CURRENT_ENGINE => "현재 엔진 경로:",
        SETTINGS_OPTIONS => "1) SI  2) Engineering  3) Imperial  4) 엔진 경로 변경",
        SETTINGS_PROMPT_CHANGE => "변경할 번호 입력 (엔터 시 취소): ",
        SETTINGS_PROMPT_ENGINE_PATH => "엔진 실행 파일 경로: ",
        SETTINGS_INVALID => "잘못된 입력입니다. 설정이 유지됩니다.",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        PARAM_AMB_TEMP => "주위 온도",
        PARAM_AMB_PRES => "주위 압력",
        PARAM_H2_TEMP => "수소 온도",
        PARAM_H2_PRES => "수소 압력",
        PARAM_ORIFICE_DIAM => "오리피스 직경",
        PARAM_RELEASE_ANGLE => "릴리스 각도",
        PARAM_CONTOUR => "농도 등고선(몰분율)",
        PARAM_REL_HUMIDITY => "상대 습도",
        PARAM_RELEASE_HEIGHT => "릴리스 높이",
        PARAM_YIELD_FACTOR => "수율 계수",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Hydrogen Risk Toolbox ===",
        MAIN_MENU_PLUME => "1) Plume concentration plot",
        MAIN_MENU_FLAME => "2) Flame temperature plot",
        MAIN_MENU_OVERPRESSURE => "3) Explosion overpressure plot",
        MAIN_MENU_UNIT_CONVERSION => "4) Unit converter",
        MAIN_MENU_SETTINGS => "5) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input; try again.",
        PANEL_PARAMS_HEADING => "Current parameters:",
        PANEL_EDIT_HINT => "Edit with n=value, change unit with un=unit, r=run, q=back",
        PANEL_SELECTOR_NOZZLE => "Nozzle model",
        PANEL_SELECTOR_METHOD => "Overpressure method",
        PANEL_SELECTOR_MACH => "Mach flame speed",
        PANEL_RUNNING => "Calling engine...",
        PANEL_RESULT_PATH => "Generated plot:",
        PANEL_ENGINE_FAILED => "Engine call failed. Check inputs and run again.",
        PANEL_EDIT_REVERTED => "Not a number; reverted to the previous value.",
        UNIT_CONVERSION_HEADING => "\n-- Unit Conversion --",
        UNIT_CONVERSION_OPTIONS => "1) Temperature  2) Pressure  3) Distance  4) Angle",
        UNIT_CONVERSION_PROMPT_KIND => "Enter quantity number: ",
        UNIT_CONVERSION_PROMPT_VALUE => "Enter value: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "From unit (ex: C, bar, mm, deg): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "To unit (ex: K, psi, in, rad): ",
        UNIT_CONVERSION_RESULT => "Result:",
        UNIT_CONVERSION_UNSUPPORTED => "Unsupported number.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "Current unit system:",
        SETTINGS_CURRENT_ENGINE => "Current engine path:",
        SETTINGS_OPTIONS => "1) SI  2) Engineering  3) Imperial  4) Change engine path",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_PROMPT_ENGINE_PATH => "Engine executable path: ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        PARAM_AMB_TEMP => "Ambient temperature",
        PARAM_AMB_PRES => "Ambient pressure",
        PARAM_H2_TEMP => "Hydrogen temperature",
        PARAM_H2_PRES => "Hydrogen pressure",
        PARAM_ORIFICE_DIAM => "Orifice diameter",
        PARAM_RELEASE_ANGLE => "Release angle",
        PARAM_CONTOUR => "Contour (mole fraction)",
        PARAM_REL_HUMIDITY => "Relative humidity",
        PARAM_RELEASE_HEIGHT => "Release height",
        PARAM_YIELD_FACTOR => "Yield factor",
        _ => return None,
    })
}
