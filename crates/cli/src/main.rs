use anyhow::Result;
use clap::{Parser, ValueEnum};
use fieldphoto_renamer_core::{
    is_calendar_date, load_config, normalize_region_code, rename_single_folder_mode,
    rename_subfolder_mode, validate_date_code, ConsoleSink, LogSink, RenameError,
    SingleFolderOptions, SingleFolderSummary, SubfolderOptions, SubfolderSummary,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "fieldphoto-renamer-cli")]
#[command(about = "調査写真を 地域-日付-ID-角度 の規則で一括リネームしてコピーします")]
struct Cli {
    /// 地域コード (英字2文字、例: HR)
    #[arg(long)]
    region: String,
    /// 日付コード (数字6桁、例: 250701)
    #[arg(long)]
    date: String,
    /// 処理モード
    #[arg(long, value_enum)]
    mode: Mode,
    /// ベースディレクトリ。省略時は ./{REGION}{DATE}
    #[arg(long, alias = "source_dir")]
    source_dir: Option<PathBuf>,
    /// single_folder モードの画像サブフォルダ名。省略時は設定ファイル、なければ phone_image
    #[arg(long, alias = "image_folder")]
    image_folder: Option<String>,
    /// single_folder モードの角度数。省略時は設定ファイル、なければ 4
    #[arg(long, alias = "angle_num")]
    angle_num: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    #[value(name = "subfolder")]
    Subfolder,
    #[value(name = "single_folder", alias = "single-folder")]
    SingleFolder,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config()?;
    let sink = ConsoleSink;

    let region_code = normalize_region_code(&cli.region)?;
    validate_date_code(&cli.date)?;
    if !is_calendar_date(&cli.date) {
        sink.log(&format!(
            "警告: 日付コード '{}' は暦日として解釈できません。そのまま使用します。",
            cli.date
        ));
    }

    let base_dir = match cli.source_dir.as_ref() {
        Some(dir) => {
            sink.log(&format!(
                "指定されたベースディレクトリを使用します: {}",
                dir.display()
            ));
            dir.clone()
        }
        None => {
            let default_dir = PathBuf::from(format!("./{}{}", region_code, cli.date));
            sink.log(&format!(
                "既定のベースディレクトリを使用します: {}",
                default_dir.display()
            ));
            default_dir
        }
    };
    if !base_dir.is_dir() {
        return Err(RenameError::MissingBaseDir(base_dir).into());
    }

    let rules = config.naming_rules();
    match cli.mode {
        Mode::Subfolder => {
            let options = SubfolderOptions {
                base_dir,
                region_code,
                date_code: cli.date.clone(),
                rules,
            };
            let summary = rename_subfolder_mode(&options, &sink)?;
            print_subfolder_summary(cli.output, &summary)?;
        }
        Mode::SingleFolder => {
            let image_folder = cli
                .image_folder
                .clone()
                .unwrap_or_else(|| config.image_folder.clone());
            let angle_num = cli.angle_num.unwrap_or(config.angle_num);
            let image_dir = base_dir.join(&image_folder);
            let options = SingleFolderOptions {
                base_dir,
                image_dir,
                region_code,
                date_code: cli.date.clone(),
                angle_num,
                rules,
            };
            let summary = rename_single_folder_mode(&options, &sink)?;
            print_single_folder_summary(cli.output, &summary)?;
        }
    }

    Ok(())
}

fn print_subfolder_summary(format: OutputFormat, summary: &SubfolderSummary) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Text => println!(
            "\n集計: sample_dirs={} renamed={} skipped_dirs={} skipped_files={} copy_failures={}",
            summary.sample_dirs,
            summary.renamed,
            summary.skipped_dirs,
            summary.skipped_files,
            summary.copy_failures
        ),
    }
    Ok(())
}

fn print_single_folder_summary(format: OutputFormat, summary: &SingleFolderSummary) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Text => println!(
            "\n集計: batches={} files_per_batch={} guides_copied={} renamed={} copy_failures={} leading_skipped={}",
            summary.batches,
            summary.files_per_batch,
            summary.guides_copied,
            summary.renamed,
            summary.copy_failures,
            summary.leading_skipped
        ),
    }
    Ok(())
}
