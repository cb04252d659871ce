// ==========================================
// PC 组装套餐系统 - 命令行入口
// ==========================================
// 用法:
//   pc-bundling <stok.csv|xlsx> [--tier office|standard|advanced]
//               [--pick SLOT=INDEX]... [--with-vga]
//               [--rules rules.json] [--config-db path]
//               [--locale id|en] [--export-dir dir]
// ==========================================

use anyhow::{Context, Result};
use clap::Parser;
use pc_bundling::api::BundleApi;
use pc_bundling::config::{ConfigManager, StaticRulesReader};
use pc_bundling::db::{get_default_db_path, DB_PATH_ENV};
use pc_bundling::domain::{Bundle, Slot, SlotStatus, Tier};
use pc_bundling::exporter::format_rupiah;
use pc_bundling::i18n::{self, note_text, slot_label, t, t_with_args, tier_label};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Parser)]
#[command(name = "pc-bundling", version, about = "PC 组装套餐系统 - 库存分级与套餐装配")]
struct CliArgs {
    /// 库存文件（.csv / .xlsx / .xls）
    inventory: PathBuf,

    /// 分级: office | standard | advanced（也接受 Std/2D、Adv/3D）
    #[arg(long, value_parser = Tier::from_str)]
    tier: Option<Tier>,

    /// 覆写槽位选择 SLOT=INDEX,可重复
    #[arg(long = "pick", value_parser = parse_pick)]
    picks: Vec<(Slot, usize)>,

    /// 处理器带核显时仍选入独显
    #[arg(long)]
    with_vga: bool,

    /// 分级规则 JSON 文件
    #[arg(long)]
    rules: Option<PathBuf>,

    /// 规则配置库路径
    #[arg(long)]
    config_db: Option<String>,

    /// 界面语言
    #[arg(long, value_parser = ["id", "en"])]
    locale: Option<String>,

    /// 导出目录
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

/// SLOT=INDEX,例如 ram=1
fn parse_pick(raw: &str) -> Result<(Slot, usize), String> {
    let (slot, index) = raw
        .split_once('=')
        .ok_or_else(|| format!("格式应为 SLOT=INDEX: {}", raw))?;
    let slot = Slot::parse(slot).ok_or_else(|| format!("未知槽位: {}", slot))?;
    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("无效索引 {}: {}", index, e))?;
    Ok((slot, index))
}

/// 规则来源: --rules JSON > --config-db / 环境变量 > 内置默认
fn build_api(cli: &CliArgs) -> Result<BundleApi> {
    if let Some(rules) = &cli.rules {
        let reader = StaticRulesReader::from_json_file(rules)
            .with_context(|| format!("无法加载规则文件: {}", rules.display()))?;
        return Ok(BundleApi::from_reader(&reader)?);
    }

    let db_path = cli
        .config_db
        .clone()
        .or_else(|| std::env::var(DB_PATH_ENV).ok().map(|_| get_default_db_path()));
    match db_path {
        Some(path) => {
            let manager = ConfigManager::new(&path)
                .with_context(|| format!("无法打开配置库: {}", path))?;
            Ok(BundleApi::from_reader(&manager)?)
        }
        None => Ok(BundleApi::with_default_rules()?),
    }
}

fn print_bundle(bundle: &Bundle) {
    println!("== {} ==", tier_label(bundle.tier));
    for resolution in &bundle.slots {
        let choice = match (resolution.status, resolution.selected()) {
            (SlotStatus::Resolved, Some(part)) => format!(
                "[{}/{}] {} ({})",
                resolution.selected_index.unwrap_or(0),
                resolution.candidates.len(),
                part.name,
                format_rupiah(part.price)
            ),
            (SlotStatus::Unresolved, _) => "!".to_string(),
            _ => "-".to_string(),
        };
        println!("{:<14} {}", slot_label(resolution.slot), choice);
        for note in &resolution.notes {
            println!("{:<14}   {}", "", note_text(*note));
        }
    }
}

fn run(cli: CliArgs) -> Result<()> {
    i18n::set_locale(cli.locale.as_deref().unwrap_or(i18n::DEFAULT_LOCALE));

    let mut api = build_api(&cli)?;
    api.select_tier(cli.tier.unwrap_or(Tier::Office));

    let loaded = api
        .load_inventory(&cli.inventory)
        .with_context(|| t_with_args("import.failed", &[("path", &cli.inventory.display().to_string())]))?;
    eprintln!(
        "{}",
        t_with_args(
            "import.loaded",
            &[
                ("count", &loaded.loaded.to_string()),
                ("dropped", &loaded.dropped_out_of_stock.to_string()),
            ],
        )
    );
    if !loaded.coercions.is_empty() {
        eprintln!(
            "{}",
            t_with_args("import.coerced", &[("count", &loaded.coercions.len().to_string())])
        );
    }

    if cli.with_vga {
        api.set_vga_opt_in(true)?;
    }

    // 按装配顺序应用覆写,保证 VGA / PSU 在上游确定后再校验
    let mut picks = cli.picks.clone();
    picks.sort_by_key(|(slot, _)| Slot::ORDER.iter().position(|s| s == slot));
    for (slot, index) in picks {
        if let Err(e) = api.override_slot(slot, index) {
            eprintln!("{}: {}", slot_label(slot), e);
        }
    }

    let bundle = api.bundle()?;
    print_bundle(bundle);

    println!();
    println!("{}", t("summary.title"));
    let summary = bundle.summary();
    if summary.rows.is_empty() {
        println!("{}", t("summary.empty"));
    }
    for row in &summary.rows {
        println!(
            "{:<12} {:<48} {:<12} {:>16}",
            row.component,
            row.product_name,
            row.brand,
            format_rupiah(row.price)
        );
    }
    println!("{}: {}", t("summary.total"), format_rupiah(summary.total_price));
    if !summary.complete {
        let slots: Vec<String> = summary.unresolved.iter().map(|s| slot_label(*s)).collect();
        println!("{}", t_with_args("summary.incomplete", &[("slots", &slots.join(", "))]));
    }

    if let Some(dir) = &cli.export_dir {
        let paths = api.export(dir)?;
        for path in [paths.audit, paths.summary] {
            eprintln!("{}", t_with_args("export.written", &[("path", &path.display().to_string())]));
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    pc_bundling::logging::init_with_default("warn");

    let cli = CliArgs::parse();
    tracing::info!(version = pc_bundling::VERSION, inventory = %cli.inventory.display(), "{}", pc_bundling::APP_NAME);
    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("pc-bundling").chain(list.iter().copied()))
    }

    #[test]
    fn test_parse_args_full() {
        let cli = parse(&[
            "stok.xlsx",
            "--tier",
            "advanced",
            "--pick",
            "ram=1",
            "--pick",
            "VGA=0",
            "--with-vga",
            "--locale",
            "en",
        ])
        .unwrap();

        assert_eq!(cli.inventory, PathBuf::from("stok.xlsx"));
        assert_eq!(cli.tier, Some(Tier::Advanced));
        assert_eq!(cli.picks, vec![(Slot::Ram, 1), (Slot::Vga, 0)]);
        assert!(cli.with_vga);
        assert_eq!(cli.locale.as_deref(), Some("en"));
        assert_eq!(cli.export_dir, None);
    }

    #[test]
    fn test_parse_args_column_key_tier() {
        let cli = parse(&["stok.csv", "--tier", "Std/2D"]).unwrap();
        assert_eq!(cli.tier, Some(Tier::Standard));
        assert!(cli.picks.is_empty());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.csv", "--tier", "server"]).is_err());
        assert!(parse(&["a.csv", "--pick", "ram"]).is_err());
        assert!(parse(&["a.csv", "--pick", "ram=x"]).is_err());
        assert!(parse(&["a.csv", "--bogus"]).is_err());
        assert!(parse(&["a.csv", "--tier"]).is_err());
        assert!(parse(&["a.csv", "--locale", "fr"]).is_err());
        assert!(parse(&["a.csv", "b.csv"]).is_err());
    }

    #[test]
    fn test_parse_pick() {
        assert_eq!(parse_pick("psu=2"), Ok((Slot::Psu, 2)));
        assert!(parse_pick("gpu=1").is_err());
    }

    #[test]
    fn test_import_error_keeps_underlying_cause() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "SKU,Kategori,Nama Accurate,Web,Stock Total").unwrap();
        writeln!(file, "P-1,Processor,Core i3-12100,1650000,1").unwrap();

        let cli = parse(&[file.path().to_str().unwrap(), "--locale", "en"]).unwrap();
        let err = run(cli).unwrap_err();
        let chain = format!("{:#}", err);

        assert!(chain.starts_with("Failed to import"), "{}", chain);
        assert!(chain.contains("Brand, Current SO"), "{}", chain);
        assert!(!chain.contains("not found"), "{}", chain);
    }
}
