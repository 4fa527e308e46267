use clap::Parser;

use hydrogen_risk_toolbox::{app, config, i18n};

/// 수소 릴리스 위험성 평가 CLI.
#[derive(Debug, Parser)]
#[command(name = "hydrogen_risk_toolbox_cli", version)]
struct Cli {
    /// 언어 코드 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 외부 물리 엔진 실행 파일 경로 (설정값보다 우선)
    #[arg(long)]
    engine: Option<String>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    if let Some(engine) = cli.engine {
        cfg.engine_path = engine;
    }
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, None);
    app::run(&mut cfg, &tr)?;
    Ok(())
}
