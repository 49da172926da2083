use crate::config::NamingRules;
use crate::logger::LogSink;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 対応拡張子かどうかはファイル名末尾の照合で決める (大文字小文字は無視)。
pub fn is_supported_image(file_name: &str, extensions: &[String]) -> bool {
    let lower = file_name.to_ascii_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&ext.to_ascii_lowercase()))
}

/// フォルダ直下の対応画像ファイル名を辞書順で返す。
pub fn list_image_files(dir: &Path, extensions: &[String]) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("フォルダを読めませんでした: {}", dir.display()))?;

    let mut out = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("エントリ読み取りに失敗しました: {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if is_supported_image(&name, extensions) {
            out.push(name);
        }
    }
    out.sort();
    Ok(out)
}

/// ベース直下のサンプル候補フォルダを名前順で返す。出力フォルダは除外。
pub fn list_sample_dirs(base_dir: &Path, renamed_dir_name: &str) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(base_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry
            .with_context(|| format!("フォルダ走査に失敗しました: {}", base_dir.display()))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy() == renamed_dir_name {
            continue;
        }
        out.push(entry.into_path());
    }
    Ok(out)
}

/// 出力先 `renamed` フォルダを冪等に作成する。
pub fn ensure_renamed_dir(
    base_dir: &Path,
    rules: &NamingRules,
    sink: &dyn LogSink,
) -> Result<PathBuf> {
    let renamed_dir = base_dir.join(&rules.renamed_dir_name);
    fs::create_dir_all(&renamed_dir).with_context(|| {
        format!(
            "出力フォルダを作成できませんでした: {}",
            renamed_dir.display()
        )
    })?;
    sink.log(&format!(
        "出力フォルダを作成または確認しました: {}",
        renamed_dir.display()
    ));
    Ok(renamed_dir)
}

#[cfg(test)]
mod tests {
    use super::{ensure_renamed_dir, is_supported_image, list_image_files, list_sample_dirs};
    use crate::config::NamingRules;
    use crate::logger::MemorySink;
    use std::fs;
    use tempfile::tempdir;

    fn exts() -> Vec<String> {
        NamingRules::default().supported_extensions
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(is_supported_image("a.jpg", &exts()));
        assert!(is_supported_image("a.JPEG", &exts()));
        assert!(is_supported_image("b.Tiff", &exts()));
        assert!(!is_supported_image("b.txt", &exts()));
        assert!(!is_supported_image("b.jpg.bak", &exts()));
    }

    #[test]
    fn image_listing_is_sorted_and_skips_directories() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("b.jpg"), b"x").expect("b");
        fs::write(temp.path().join("a.PNG"), b"x").expect("a");
        fs::write(temp.path().join("notes.txt"), b"x").expect("txt");
        fs::create_dir(temp.path().join("sub.jpg")).expect("dir");

        let files = list_image_files(temp.path(), &exts()).expect("list");
        assert_eq!(files, vec!["a.PNG".to_string(), "b.jpg".to_string()]);
    }

    #[test]
    fn sample_dirs_exclude_the_output_folder() {
        let temp = tempdir().expect("tempdir");
        fs::create_dir(temp.path().join("0002")).expect("0002");
        fs::create_dir(temp.path().join("0001")).expect("0001");
        fs::create_dir(temp.path().join("renamed")).expect("renamed");
        fs::write(temp.path().join("loose.jpg"), b"x").expect("file");

        let dirs = list_sample_dirs(temp.path(), "renamed").expect("dirs");
        let names: Vec<_> = dirs
            .iter()
            .map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect();
        assert_eq!(
            names,
            vec![Some("0001".to_string()), Some("0002".to_string())]
        );
    }

    #[test]
    fn renamed_dir_creation_is_idempotent() {
        let temp = tempdir().expect("tempdir");
        let sink = MemorySink::new();
        let rules = NamingRules::default();

        let first = ensure_renamed_dir(temp.path(), &rules, &sink).expect("first");
        let second = ensure_renamed_dir(temp.path(), &rules, &sink).expect("second");
        assert_eq!(first, second);
        assert!(first.is_dir());
        assert!(sink.contains("出力フォルダを作成または確認しました"));
    }
}
