#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use std::{env, fs};

use hydrogen_risk_toolbox::{
    app::AppError,
    binder::GridBinder,
    config,
    conversion::{self, Unit},
    engine::{CommandEngine, ExecutionSlot, ExecutionState},
    i18n,
    panels::{self, NozzleModel, OverpressureMethod, BST_MACH_FLAME_SPEEDS},
    quantity::QuantityKind,
    state::StateStore,
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_transparent(true);
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Hydrogen Risk Toolbox",
        native,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            match GuiApp::new(app_cfg.clone()) {
                Ok(app) => Box::new(app),
                Err(e) => {
                    eprintln!("초기화 오류: {e}");
                    std::process::exit(1);
                }
            }
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search
        .iter()
        .find(|p| Path::new(*p).exists())
        .map(|s| s.to_string())?;
    let bytes = fs::read(&path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 기본 폰트를 우선 적용한다.
/// 1) assets/fonts 내 폰트
/// 2) Windows/Linux 시스템 폰트
/// 3) 모두 실패 시 Err를 반환해 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = vec![
        "assets/fonts/malgun.ttf".into(),
        "assets/fonts/NanumGothic.ttf".into(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "malgunsl.ttf", "gulim.ttc", "batang.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }
    for cand in [
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    ] {
        candidates.push(cand.into());
    }
    for p in candidates {
        if p.exists() {
            let bytes =
                fs::read(&p).map_err(|e| format!("Failed to read font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }
    Err("Font not found. Please set a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

/// 생성된 플롯 PNG를 egui 텍스처로 올린다.
fn load_plot_texture(
    ctx: &egui::Context,
    path: &Path,
    name: &str,
) -> Result<egui::TextureHandle, String> {
    let bytes = fs::read(path).map_err(|e| format!("{e}"))?;
    let img = image::load_from_memory(&bytes).map_err(|e| format!("{e}"))?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    let color = egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], rgba.as_raw());
    Ok(ctx.load_texture(name, color, egui::TextureOptions::default()))
}

/// 물리량 종류에 대한 기본 표시 단위를 설정에서 고른다.
fn unit_for_kind(du: &config::DefaultUnits, kind: QuantityKind) -> Unit {
    match kind {
        QuantityKind::Temperature => Unit::Temperature(du.temperature),
        QuantityKind::Pressure => Unit::Pressure(du.pressure),
        QuantityKind::Distance => Unit::Distance(du.distance),
        QuantityKind::Angle => Unit::Angle(du.angle),
        QuantityKind::Unitless => Unit::Unitless,
    }
}

/// 파라미터 그리드를 그린다. 셀 편집 확정과 표시 단위 변경은 바인더를 거친다.
fn param_grid(
    ui: &mut egui::Ui,
    id: &str,
    binder: &mut GridBinder,
    store: &mut StateStore,
    tr: &i18n::Translator,
    error: &mut Option<String>,
) {
    egui::Grid::new(id)
        .num_columns(3)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for i in 0..binder.len() {
                let label = tr.text(binder.rows()[i].label_key);
                ui.label(label);
                let commit = match binder.row_text_mut(i) {
                    Some(text) => ui
                        .add(egui::TextEdit::singleline(text).desired_width(140.0))
                        .lost_focus(),
                    None => false,
                };
                let current = binder.rows()[i].unit;
                let mut selected = current;
                if current == Unit::Unitless {
                    ui.label(current.symbol());
                } else {
                    egui::ComboBox::from_id_source((id, i))
                        .selected_text(current.symbol())
                        .show_ui(ui, |ui| {
                            for unit in conversion::unit_choices(current.kind()) {
                                ui.selectable_value(&mut selected, *unit, unit.symbol());
                            }
                        });
                }
                if selected != current {
                    if let Err(e) = binder.set_row_unit(store, i, selected) {
                        *error = Some(e.to_string());
                    }
                }
                if commit {
                    if let Err(e) = binder.commit_edit(store, i) {
                        *error = Some(e.to_string());
                    }
                }
                ui.end_row();
            }
        });
}

fn nozzle_combo(ui: &mut egui::Ui, id: &str, label: &str, nozzle: &mut NozzleModel) {
    ui.horizontal(|ui| {
        ui.label(label);
        egui::ComboBox::from_id_source(id)
            .selected_text(nozzle.label())
            .show_ui(ui, |ui| {
                for n in NozzleModel::ALL {
                    ui.selectable_value(nozzle, *n, n.label());
                }
            });
    });
}

/// 단위 변환기 콤보박스용 단위 코드 목록.
fn unit_options(kind: QuantityKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        QuantityKind::Temperature => &[
            ("Kelvin (K)", "K"),
            ("Celsius (°C)", "C"),
            ("Fahrenheit (°F)", "F"),
        ],
        QuantityKind::Pressure => &[
            ("Pa", "Pa"),
            ("kPa", "kPa"),
            ("MPa", "MPa"),
            ("bar", "bar"),
            ("atm", "atm"),
            ("psi", "psi"),
        ],
        QuantityKind::Distance => &[
            ("m", "m"),
            ("cm", "cm"),
            ("mm", "mm"),
            ("inch", "in"),
            ("ft", "ft"),
        ],
        QuantityKind::Angle => &[("rad", "rad"), ("deg", "deg")],
        QuantityKind::Unitless => &[("-", "-")],
    }
}

fn unit_label(code: &str, kind: QuantityKind) -> String {
    for (label, c) in unit_options(kind) {
        if code.eq_ignore_ascii_case(c) {
            return label.to_string();
        }
    }
    code.to_string()
}

fn default_conv_units_for_kind(kind: QuantityKind) -> (&'static str, &'static str) {
    match kind {
        QuantityKind::Temperature => ("C", "K"),
        QuantityKind::Pressure => ("bar", "Pa"),
        QuantityKind::Distance => ("mm", "m"),
        QuantityKind::Angle => ("deg", "rad"),
        QuantityKind::Unitless => ("-", "-"),
    }
}

/// 시나리오 패널 하나의 GUI 상태 묶음.
struct PanelState {
    binder: GridBinder,
    nozzle: NozzleModel,
    slot: ExecutionSlot,
    texture: Option<egui::TextureHandle>,
    result_path: Option<PathBuf>,
    error: Option<String>,
    show_output: bool,
}

impl PanelState {
    fn new(binder: GridBinder) -> Self {
        Self {
            binder,
            nozzle: NozzleModel::default(),
            slot: ExecutionSlot::new(),
            texture: None,
            result_path: None,
            error: None,
            show_output: false,
        }
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    lang_save_status: Option<String>,
    tab: Tab,
    window_alpha: f32,
    apply_initial_view_size: bool,
    // 공유 상태와 엔진
    store: StateStore,
    engine: Arc<CommandEngine>,
    engine_input: String,
    // 시나리오 패널
    plume: PanelState,
    flame: PanelState,
    overp: PanelState,
    overp_method: OverpressureMethod,
    overp_mach: f64,
    // 단위 변환
    conv_value: f64,
    conv_from: String,
    conv_to: String,
    conv_kind: QuantityKind,
    conv_result: Option<String>,
    // 설정
    ui_scale: f32,
    always_on_top: bool,
    show_settings_modal: bool,
    show_help_modal: bool,
    theme: ThemeChoice,
    custom_font_path: String,
    font_load_error: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Plume,
    Flame,
    Overpressure,
    UnitConv,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ThemeChoice {
    System,
    Light,
    Dark,
}

impl GuiApp {
    fn new(config: config::Config) -> Result<Self, AppError> {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        eprintln!("GUI language resolved: {lang_code}");

        let mut store = StateStore::new();
        let plume_reg = panels::plume::registry()?;
        panels::plume::init(&mut store, &plume_reg)?;
        let plume = PanelState::new(GridBinder::from_store(plume_reg, &store)?);
        let flame_reg = panels::flame::registry()?;
        panels::flame::init(&mut store, &flame_reg)?;
        let flame = PanelState::new(GridBinder::from_store(flame_reg, &store)?);
        let overp_reg = panels::overpressure::registry()?;
        panels::overpressure::init(&mut store, &overp_reg)?;
        let overp = PanelState::new(GridBinder::from_store(overp_reg, &store)?);

        let engine = Arc::new(CommandEngine::new(config.engine_path.clone()));
        let (conv_from, conv_to) = default_conv_units_for_kind(QuantityKind::Temperature);
        let lang_input = config.language.clone();
        let engine_input = config.engine_path.clone();
        let mut app = Self {
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            config,
            tr,
            lang_input,
            lang_save_status: None,
            tab: Tab::Plume,
            apply_initial_view_size: true,
            store,
            engine,
            engine_input,
            plume,
            flame,
            overp,
            overp_method: OverpressureMethod::default(),
            overp_mach: BST_MACH_FLAME_SPEEDS[1],
            conv_value: 300.0,
            conv_from: conv_from.into(),
            conv_to: conv_to.into(),
            conv_kind: QuantityKind::Temperature,
            conv_result: None,
            ui_scale: 1.0,
            always_on_top: false,
            show_settings_modal: false,
            show_help_modal: false,
            theme: ThemeChoice::System,
            custom_font_path: String::new(),
            font_load_error: None,
        };
        app.apply_display_units();
        Ok(app)
    }

    /// 설정된 기본 표시 단위를 모든 패널 그리드에 적용한다.
    fn apply_display_units(&mut self) {
        let du = self.config.default_units.clone();
        let store = &self.store;
        for panel in [&mut self.plume, &mut self.flame, &mut self.overp] {
            let binder = &mut panel.binder;
            for i in 0..binder.len() {
                let kind = binder.rows()[i].unit.kind();
                let _ = binder.set_row_unit(store, i, unit_for_kind(&du, kind));
            }
        }
    }

    /// 단위 시스템 프리셋을 설정과 화면에 반영한다.
    fn apply_unit_preset(&mut self, system: config::UnitSystem) {
        self.config.unit_system = system;
        self.config.default_units = config::units_for_system(system);
        self.apply_display_units();
        let du = &self.config.default_units;
        self.conv_from = unit_for_kind(du, self.conv_kind).symbol().to_string();
        self.conv_to = conversion::base_unit(self.conv_kind).symbol().to_string();
    }

    /// 워커 스레드 종료를 회수해 패널별 결과/오류에 반영한다.
    fn poll_panels(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        for (panel, tex_name) in [
            (&mut self.plume, "plume_plot"),
            (&mut self.flame, "flame_plot"),
            (&mut self.overp, "overp_plot"),
        ] {
            if panel.slot.poll() {
                match panel.slot.state().clone() {
                    ExecutionState::Succeeded(path) => {
                        match load_plot_texture(ctx, &path, tex_name) {
                            Ok(tex) => {
                                panel.texture = Some(tex);
                                panel.result_path = Some(path);
                                panel.error = None;
                                panel.show_output = true;
                            }
                            Err(e) => panel.error = Some(e),
                        }
                    }
                    ExecutionState::Failed(_) => {
                        panel.error = Some(tr.text(i18n::keys::PANEL_ENGINE_FAILED));
                    }
                    _ => {}
                }
            }
            if panel.slot.is_running() {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
        }
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.style_mut().wrap = Some(false);
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Plume, txt("gui.tab.plume", "Plume Dispersion")),
            (Tab::Flame, txt("gui.tab.flame", "Flame Temperature")),
            (Tab::Overpressure, txt("gui.tab.overpressure", "Overpressure")),
            (Tab::UnitConv, txt("gui.tab.unit_conv", "Unit Converter")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            let resp = ui
                .add(button)
                .on_hover_text(txt("gui.nav.switch_tip", "Switch menu"));
            if resp.clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    /// 패널 출력 뷰(플롯 이미지)를 그린다. true를 반환하면 출력 뷰가 소비됨.
    fn ui_panel_output(
        ui: &mut egui::Ui,
        tr: &i18n::Translator,
        panel: &mut PanelState,
    ) -> bool {
        if !panel.show_output {
            return false;
        }
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        if let Some(tex) = &panel.texture {
            ui.image(tex);
        }
        if let Some(path) = &panel.result_path {
            ui.label(format!(
                "{} {}",
                tr.text(i18n::keys::PANEL_RESULT_PATH),
                path.display()
            ));
        }
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button(txt("gui.panel.save_as", "Save as...")).clicked() {
                if let Some(src) = panel.result_path.clone() {
                    let file_name = src
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "plot.png".to_string());
                    if let Some(dest) = FileDialog::new().set_file_name(file_name).save_file() {
                        if let Err(e) = fs::copy(&src, &dest) {
                            panel.error = Some(format!("{e}"));
                        }
                    }
                }
            }
            if ui.button(txt("gui.panel.back", "Back to inputs")).clicked() {
                panel.show_output = false;
                panel.slot.reset();
            }
        });
        if let Some(err) = &panel.error {
            ui.colored_label(egui::Color32::RED, err);
        }
        true
    }

    /// 패널 입력 뷰의 공통 꼬리: 실행 버튼/스피너/오류 라벨.
    /// 버튼이 눌렸을 때만 true를 반환한다.
    fn ui_run_controls(
        ui: &mut egui::Ui,
        tr: &i18n::Translator,
        slot: &ExecutionSlot,
        error: &Option<String>,
    ) -> bool {
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let mut clicked = false;
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            clicked = ui
                .add_enabled(
                    !slot.is_running(),
                    egui::Button::new(txt("gui.panel.run", "Generate plot")),
                )
                .clicked();
            if slot.is_running() {
                ui.spinner();
                ui.label(tr.text(i18n::keys::PANEL_RUNNING));
            }
        });
        if let Some(err) = error {
            ui.colored_label(egui::Color32::RED, err);
        }
        clicked
    }

    fn ui_plume(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.plume.heading", "Plume Dispersion"),
            &txt(
                "gui.plume.tip",
                "Unignited hydrogen release concentration plot.",
            ),
        );
        ui.add_space(8.0);
        if Self::ui_panel_output(ui, &tr, &mut self.plume) {
            return;
        }
        egui::Frame::group(ui.style()).show(ui, |ui| {
            param_grid(
                ui,
                "plume_grid",
                &mut self.plume.binder,
                &mut self.store,
                &tr,
                &mut self.plume.error,
            );
            ui.add_space(6.0);
            nozzle_combo(
                ui,
                "plume_nozzle",
                &tr.text(i18n::keys::PANEL_SELECTOR_NOZZLE),
                &mut self.plume.nozzle,
            );
        });
        if Self::ui_run_controls(ui, &tr, &self.plume.slot, &self.plume.error) {
            match panels::plume::build_request(&self.store, self.plume.nozzle) {
                Ok(req) => {
                    self.plume.error = None;
                    self.plume.slot.start(self.engine.clone(), req);
                }
                Err(e) => self.plume.error = Some(e.to_string()),
            }
        }
    }

    fn ui_flame(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.flame.heading", "Flame Temperature"),
            &txt(
                "gui.flame.tip",
                "Jet flame temperature and trajectory plot.",
            ),
        );
        ui.add_space(8.0);
        if Self::ui_panel_output(ui, &tr, &mut self.flame) {
            return;
        }
        egui::Frame::group(ui.style()).show(ui, |ui| {
            param_grid(
                ui,
                "flame_grid",
                &mut self.flame.binder,
                &mut self.store,
                &tr,
                &mut self.flame.error,
            );
            ui.add_space(6.0);
            nozzle_combo(
                ui,
                "flame_nozzle",
                &tr.text(i18n::keys::PANEL_SELECTOR_NOZZLE),
                &mut self.flame.nozzle,
            );
        });
        if Self::ui_run_controls(ui, &tr, &self.flame.slot, &self.flame.error) {
            match panels::flame::build_request(&self.store, self.flame.nozzle) {
                Ok(req) => {
                    self.flame.error = None;
                    self.flame.slot.start(self.engine.clone(), req);
                }
                Err(e) => self.flame.error = Some(e.to_string()),
            }
        }
    }

    fn ui_overpressure(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.overp.heading", "Explosion Overpressure"),
            &txt(
                "gui.overp.tip",
                "Unconfined overpressure versus distance plot.",
            ),
        );
        ui.add_space(8.0);
        if Self::ui_panel_output(ui, &tr, &mut self.overp) {
            return;
        }
        egui::Frame::group(ui.style()).show(ui, |ui| {
            param_grid(
                ui,
                "overp_grid",
                &mut self.overp.binder,
                &mut self.store,
                &tr,
                &mut self.overp.error,
            );
            ui.add_space(6.0);
            nozzle_combo(
                ui,
                "overp_nozzle",
                &tr.text(i18n::keys::PANEL_SELECTOR_NOZZLE),
                &mut self.overp.nozzle,
            );
            ui.horizontal(|ui| {
                ui.label(tr.text(i18n::keys::PANEL_SELECTOR_METHOD));
                egui::ComboBox::from_id_source("overp_method")
                    .selected_text(self.overp_method.label())
                    .show_ui(ui, |ui| {
                        for m in OverpressureMethod::ALL {
                            ui.selectable_value(&mut self.overp_method, *m, m.label());
                        }
                    });
            });
            if self.overp_method == OverpressureMethod::Bst {
                ui.horizontal(|ui| {
                    ui.label(tr.text(i18n::keys::PANEL_SELECTOR_MACH));
                    egui::ComboBox::from_id_source("overp_mach")
                        .selected_text(format!("{}", self.overp_mach))
                        .show_ui(ui, |ui| {
                            for speed in BST_MACH_FLAME_SPEEDS {
                                ui.selectable_value(
                                    &mut self.overp_mach,
                                    *speed,
                                    format!("{speed}"),
                                );
                            }
                        });
                });
            }
        });
        if Self::ui_run_controls(ui, &tr, &self.overp.slot, &self.overp.error) {
            match panels::overpressure::build_request(
                &self.store,
                self.overp.nozzle,
                self.overp_method,
                self.overp_mach,
            ) {
                Ok(req) => {
                    self.overp.error = None;
                    self.overp.slot.start(self.engine.clone(), req);
                }
                Err(e) => self.overp.error = Some(e.to_string()),
            }
        }
    }

    fn ui_unit_conv(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.unit.heading", "Unit Converter"),
            &txt(
                "gui.unit.tip",
                "Convert engineering quantities between units.",
            ),
        );
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("conv_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    label_with_tip(
                        ui,
                        &txt("gui.unit.quantity.label", "Quantity"),
                        &txt("gui.unit.quantity_tip", "Select the quantity type"),
                    );
                    let before = self.conv_kind;
                    let q_options = [
                        (
                            QuantityKind::Temperature,
                            txt("gui.unit.quantity.temperature", "Temperature"),
                        ),
                        (
                            QuantityKind::Pressure,
                            txt("gui.unit.quantity.pressure", "Pressure"),
                        ),
                        (
                            QuantityKind::Distance,
                            txt("gui.unit.quantity.distance", "Distance"),
                        ),
                        (QuantityKind::Angle, txt("gui.unit.quantity.angle", "Angle")),
                    ];
                    let selected_label = q_options
                        .iter()
                        .find(|(k, _)| *k == self.conv_kind)
                        .map(|(_, l)| l.clone())
                        .unwrap_or_else(|| txt("gui.unit.quantity.label", "Quantity"));
                    egui::ComboBox::from_id_source("conv_kind")
                        .selected_text(selected_label)
                        .show_ui(ui, |ui| {
                            for (k, label) in &q_options {
                                ui.selectable_value(&mut self.conv_kind, *k, label.clone());
                            }
                        });
                    if before != self.conv_kind {
                        let (f, t) = default_conv_units_for_kind(self.conv_kind);
                        self.conv_from = f.to_string();
                        self.conv_to = t.to_string();
                    }
                    ui.end_row();

                    label_with_tip(
                        ui,
                        &txt("gui.unit.value", "Value"),
                        &txt("gui.unit.value_tip", "Enter the value to convert"),
                    );
                    ui.add(egui::DragValue::new(&mut self.conv_value).speed(1.0));
                    ui.end_row();

                    label_with_tip(
                        ui,
                        &txt("gui.unit.from", "From unit"),
                        &txt("gui.unit.from_tip", "Current unit of the value"),
                    );
                    egui::ComboBox::from_id_source("conv_from")
                        .selected_text(unit_label(&self.conv_from, self.conv_kind))
                        .show_ui(ui, |ui| {
                            for (label, code) in unit_options(self.conv_kind) {
                                ui.selectable_value(&mut self.conv_from, code.to_string(), *label);
                            }
                        });
                    ui.end_row();

                    label_with_tip(
                        ui,
                        &txt("gui.unit.to", "To unit"),
                        &txt("gui.unit.to_tip", "Desired unit after conversion"),
                    );
                    egui::ComboBox::from_id_source("conv_to")
                        .selected_text(unit_label(&self.conv_to, self.conv_kind))
                        .show_ui(ui, |ui| {
                            for (label, code) in unit_options(self.conv_kind) {
                                ui.selectable_value(&mut self.conv_to, code.to_string(), *label);
                            }
                        });
                    ui.end_row();
                });
            ui.add_space(8.0);
            if ui.button(txt("gui.unit.run", "Convert")).clicked() {
                self.conv_result = match conversion::convert(
                    self.conv_kind,
                    self.conv_value,
                    self.conv_from.trim(),
                    self.conv_to.trim(),
                ) {
                    Ok(v) => Some(format!("{v:.6} {}", self.conv_to.trim())),
                    Err(e) => Some(format!("{}: {e}", tr.text(i18n::keys::ERROR_PREFIX))),
                };
            }
            if let Some(result) = &self.conv_result {
                ui.label(result);
            }
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 최초 1회 화면 크기 조정
        if self.apply_initial_view_size {
            if let Some(screen) = ctx.input(|i| {
                let r = i.screen_rect();
                if r.is_positive() {
                    Some(r.size())
                } else {
                    None
                }
            }) {
                let target =
                    egui::vec2((screen.x * 0.60).max(900.0), (screen.y * 0.60).max(650.0));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(target));
                self.apply_initial_view_size = false;
            }
        }

        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        // 테마 적용 후 투명도 반영 + 라벨 복사 방지 스타일
        let mut visuals = match self.theme {
            ThemeChoice::System => egui::Visuals::default(),
            ThemeChoice::Light => egui::Visuals::light(),
            ThemeChoice::Dark => egui::Visuals::dark(),
        };
        visuals.window_fill = visuals.window_fill.linear_multiply(self.window_alpha);
        visuals.panel_fill = visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_visuals(visuals);
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        ctx.set_style(style);

        // 워커 결과 회수는 그리기 전에 한다
        self.poll_panels(ctx);

        let tr = self.tr.clone();
        let txt =
            move |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Hydrogen Risk Toolbox"));
                ui.label(" | Desktop GUI");
                ui.separator();
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            let mut new_unit_system = self.config.unit_system;
            egui::Window::new(txt("gui.settings.title", "Program Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.heading(txt("gui.settings.general", "General"));
                    ui.separator();
                    ui.label(txt("gui.settings.unit_preset", "Unit system preset"));
                    ui.horizontal(|ui| {
                        for (label, us) in [
                            ("SI", config::UnitSystem::Si),
                            ("Engineering", config::UnitSystem::Engineering),
                            ("Imperial", config::UnitSystem::Imperial),
                        ] {
                            ui.selectable_value(&mut new_unit_system, us, label);
                        }
                    });
                    ui.separator();
                    ui.label(txt("gui.settings.engine", "Physics engine executable"));
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut self.engine_input)
                                .desired_width(240.0),
                        );
                        if ui.button(txt("gui.settings.browse", "Browse...")).clicked() {
                            if let Some(path) = FileDialog::new().pick_file() {
                                self.engine_input = path.display().to_string();
                            }
                        }
                    });
                    ui.separator();
                    ui.label(txt("gui.settings.ui_scale", "UI scale"));
                    let scale_slider =
                        egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
                    if ui.add(scale_slider).changed() {
                        ctx.set_pixels_per_point(self.ui_scale);
                    }
                    ui.separator();
                    ui.checkbox(
                        &mut self.always_on_top,
                        txt("gui.settings.always_on_top", "Always on top"),
                    );
                    ui.separator();
                    ui.label(txt("gui.settings.alpha", "Window transparency"));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    ui.label(txt("gui.settings.theme", "Theme"));
                    ui.horizontal(|ui| {
                        for (label, theme) in [
                            (txt("gui.settings.theme.system", "System"), ThemeChoice::System),
                            (txt("gui.settings.theme.light", "Light"), ThemeChoice::Light),
                            (txt("gui.settings.theme.dark", "Dark"), ThemeChoice::Dark),
                        ] {
                            ui.selectable_value(&mut self.theme, theme, label);
                        }
                    });
                    ui.separator();
                    ui.label(txt("gui.settings.font", "Custom font (.ttf/.ttc)"));
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut self.custom_font_path)
                                .desired_width(240.0),
                        );
                        if ui.button(txt("gui.settings.font_load", "Load font")).clicked() {
                            match load_custom_font(ctx, &self.custom_font_path) {
                                Ok(()) => self.font_load_error = None,
                                Err(e) => self.font_load_error = Some(e),
                            }
                        }
                    });
                    if let Some(err) = &self.font_load_error {
                        ui.colored_label(egui::Color32::RED, err);
                    }
                    ui.separator();
                    ui.label(txt("gui.settings.lang", "Language"));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut self.lang_input,
                                "auto".into(),
                                txt("gui.settings.lang.auto", "System"),
                            );
                            ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                            ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                        });
                    if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                        self.config.language = self.lang_input.clone();
                        self.config.window_alpha = self.window_alpha;
                        if self.config.engine_path != self.engine_input {
                            self.config.engine_path = self.engine_input.clone();
                            self.engine =
                                Arc::new(CommandEngine::new(self.config.engine_path.clone()));
                        }
                        // 즉시 번역기 반영
                        let resolved = i18n::resolve_language(&self.config.language, None);
                        self.tr = i18n::Translator::new_with_pack(
                            &resolved,
                            self.config.language_pack_dir.as_deref(),
                        );
                        if let Err(e) = self.config.save() {
                            self.lang_save_status = Some(format!("Save error: {e}"));
                        } else {
                            self.lang_save_status = Some(txt("gui.settings.saved", "Saved."));
                        }
                    }
                    if let Some(msg) = &self.lang_save_status {
                        ui.label(msg);
                    }
                });
            if new_unit_system != self.config.unit_system {
                self.apply_unit_preset(new_unit_system);
            }
        }

        // 도움말 모달
        if self.show_help_modal {
            egui::Window::new(txt("gui.about.title", "Help / About"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(txt(
                        "gui.about.app",
                        "Hydrogen release risk-assessment front end",
                    ));
                    ui.label(txt("gui.about.version", "Version: 1.0"));
                    ui.separator();
                    ui.label(txt("gui.about.units.title", "Unit guide"));
                    ui.label(txt(
                        "gui.about.units.abs",
                        "- Pressures are absolute; engine inputs are SI (K, Pa, m, rad).",
                    ));
                    ui.label(txt(
                        "gui.about.engine",
                        "- Plots are produced by the external physics engine configured in settings.",
                    ));
                    ui.label(txt(
                        "gui.about.hint",
                        "Adjust units/font in settings if you see issues.",
                    ));
                });
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(200.0)
            .max_width(400.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Plume => self.ui_plume(ui),
                    Tab::Flame => self.ui_flame(ui),
                    Tab::Overpressure => self.ui_overpressure(ui),
                    Tab::UnitConv => self.ui_unit_conv(ui),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_si_applies_base_units() {
        let mut app = GuiApp::new(config::Config::default()).expect("app");
        app.apply_unit_preset(config::UnitSystem::Si);
        let symbols: Vec<&str> = app
            .plume
            .binder
            .rows()
            .iter()
            .map(|r| r.unit.symbol())
            .collect();
        assert_eq!(symbols, ["K", "Pa", "K", "Pa", "m", "rad", "-"]);
        assert_eq!(app.conv_from, "K");
        assert_eq!(app.conv_to, "K");
    }

    #[test]
    fn preset_imperial_applies_imperial_units() {
        let mut app = GuiApp::new(config::Config::default()).expect("app");
        app.apply_unit_preset(config::UnitSystem::Imperial);
        let symbols: Vec<&str> = app
            .flame
            .binder
            .rows()
            .iter()
            .map(|r| r.unit.symbol())
            .collect();
        assert_eq!(symbols, ["F", "psi", "F", "psi", "in", "deg", "-"]);
    }

    #[test]
    fn preset_change_keeps_stored_base_values() {
        let mut app = GuiApp::new(config::Config::default()).expect("app");
        app.apply_unit_preset(config::UnitSystem::Engineering);
        // 표시 단위가 바뀌어도 저장소의 기준 단위 값은 그대로다
        let pa = app
            .store
            .get_value(
                "plume.amb_pres",
                conversion::base_unit(QuantityKind::Pressure),
            )
            .expect("value");
        assert!((pa - 101_325.0).abs() < 1e-9);
    }

    #[test]
    fn convert_pressure_bar_to_pa() {
        let out = conversion::convert(QuantityKind::Pressure, 1.0, "bar", "Pa").unwrap();
        assert!((out - 100_000.0).abs() < 1e-9);
    }
}
