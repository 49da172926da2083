use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_RENAMED_DIR_NAME: &str = "renamed";
pub const DEFAULT_IMAGE_FOLDER: &str = "phone_image";
pub const DEFAULT_ANGLE_NUM: usize = 4;
pub const DEFAULT_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub image_folder: String,
    pub angle_num: usize,
    pub renamed_dir_name: String,
    pub supported_extensions: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            image_folder: DEFAULT_IMAGE_FOLDER.to_string(),
            angle_num: DEFAULT_ANGLE_NUM,
            renamed_dir_name: DEFAULT_RENAMED_DIR_NAME.to_string(),
            supported_extensions: DEFAULT_EXTENSIONS.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn naming_rules(&self) -> NamingRules {
        NamingRules {
            renamed_dir_name: self.renamed_dir_name.clone(),
            supported_extensions: self.supported_extensions.clone(),
        }
    }
}

/// 起動時に確定する不変の命名設定。コア関数へは値として渡す。
#[derive(Debug, Clone)]
pub struct NamingRules {
    pub renamed_dir_name: String,
    pub supported_extensions: Vec<String>,
}

impl Default for NamingRules {
    fn default() -> Self {
        AppConfig::default().naming_rules()
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub config_path: PathBuf,
}

pub fn app_paths() -> Result<AppPaths> {
    let proj = ProjectDirs::from("com", "fieldphoto", "fieldphoto-renamer")
        .context("OS標準設定ディレクトリを取得できませんでした")?;
    let config_dir = proj.config_dir().to_path_buf();
    Ok(AppPaths {
        config_path: config_dir.join("config.toml"),
        config_dir,
    })
}

pub fn load_config() -> Result<AppConfig> {
    let paths = app_paths()?;
    if !paths.config_path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(&paths.config_path).with_context(|| {
        format!(
            "設定ファイルを読めませんでした: {}",
            paths.config_path.display()
        )
    })?;

    let config = toml::from_str::<AppConfig>(&raw).context("設定ファイルのパースに失敗しました")?;
    Ok(config)
}

pub fn save_config(config: &AppConfig) -> Result<()> {
    let paths = app_paths()?;
    fs::create_dir_all(&paths.config_dir).with_context(|| {
        format!(
            "設定ディレクトリを作成できませんでした: {}",
            paths.config_dir.display()
        )
    })?;
    let body = toml::to_string_pretty(config).context("設定のシリアライズに失敗しました")?;
    fs::write(&paths.config_path, body).with_context(|| {
        format!(
            "設定ファイルを書き込めませんでした: {}",
            paths.config_path.display()
        )
    })?;
    Ok(())
}
