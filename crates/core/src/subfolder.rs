use crate::config::NamingRules;
use crate::error::RenameError;
use crate::logger::LogSink;
use crate::naming::{is_sample_dir_name, lowercase_extension, subfolder_target_name};
use crate::scan::{ensure_renamed_dir, list_image_files, list_sample_dirs};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const ANGLE_SUFFIXES: &[char] = &['A', 'B', 'C', 'D'];

#[derive(Debug, Clone)]
pub struct SubfolderOptions {
    pub base_dir: PathBuf,
    pub region_code: String,
    pub date_code: String,
    pub rules: NamingRules,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SubfolderSummary {
    pub sample_dirs: usize,
    pub renamed: usize,
    pub skipped_dirs: usize,
    pub skipped_files: usize,
    pub copy_failures: usize,
}

/// モード1: ベース直下の4桁数字フォルダをサンプルとして扱い、内部の画像を
/// 辞書順に A〜D の角度付きでコピーする。
pub fn rename_subfolder_mode(
    options: &SubfolderOptions,
    sink: &dyn LogSink,
) -> Result<SubfolderSummary> {
    if !options.base_dir.is_dir() {
        return Err(RenameError::MissingBaseDir(options.base_dir.clone()).into());
    }

    let renamed_dir = ensure_renamed_dir(&options.base_dir, &options.rules, sink)?;
    let mut summary = SubfolderSummary::default();

    for sample_dir in list_sample_dirs(&options.base_dir, &options.rules.renamed_dir_name)? {
        let sample_id = sample_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if !is_sample_dir_name(&sample_id) {
            sink.log(&format!(
                "スキップ '{}': フォルダ名 '{}' が4桁数字のサンプル番号ではありません。",
                sample_dir.display(),
                sample_id
            ));
            summary.skipped_dirs += 1;
            continue;
        }

        let image_files = list_image_files(&sample_dir, &options.rules.supported_extensions)?;
        if image_files.is_empty() {
            sink.log(&format!(
                "警告: フォルダ '{}' に対応する画像がないためスキップします。",
                sample_dir.display()
            ));
            summary.skipped_dirs += 1;
            continue;
        }

        sink.log(&format!(
            "\nフォルダを処理しています (サブフォルダモード): {}",
            sample_dir.display()
        ));
        summary.sample_dirs += 1;

        for (i, original_name) in image_files.iter().enumerate() {
            if i >= ANGLE_SUFFIXES.len() {
                sink.log(&format!(
                    "注意: フォルダ '{}' の画像が{}枚を超えています。超過分には角度を割り当てずスキップします。",
                    sample_dir.display(),
                    ANGLE_SUFFIXES.len()
                ));
                summary.skipped_files += image_files.len() - i;
                break;
            }

            let new_name = subfolder_target_name(
                &options.region_code,
                &options.date_code,
                &sample_id,
                ANGLE_SUFFIXES[i],
                &lowercase_extension(original_name),
            );
            let src = sample_dir.join(original_name);
            let dst = renamed_dir.join(&new_name);

            match fs::copy(&src, &dst) {
                Ok(_) => {
                    sink.log(&format!(
                        "  コピーしてリネーム: '{}' -> '{}'",
                        original_name, new_name
                    ));
                    summary.renamed += 1;
                }
                Err(err) => {
                    sink.log(&format!(
                        "  エラー: '{}' から '{}' へのコピーに失敗しました: {}",
                        src.display(),
                        dst.display(),
                        err
                    ));
                    summary.copy_failures += 1;
                }
            }
        }
    }

    sink.log(&format!(
        "\nサブフォルダモード完了。合計 {} 件のファイルをコピーしてリネームしました。",
        summary.renamed
    ));
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::{rename_subfolder_mode, SubfolderOptions};
    use crate::config::NamingRules;
    use crate::logger::MemorySink;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn options(base: &Path) -> SubfolderOptions {
        SubfolderOptions {
            base_dir: base.to_path_buf(),
            region_code: "HR".to_string(),
            date_code: "250701".to_string(),
            rules: NamingRules::default(),
        }
    }

    fn write_images(dir: &Path, names: &[&str]) {
        fs::create_dir_all(dir).expect("sample dir");
        for name in names {
            fs::write(dir.join(name), name.as_bytes()).expect("image");
        }
    }

    #[test]
    fn renames_sorted_images_with_angle_suffixes() {
        let temp = tempdir().expect("tempdir");
        write_images(&temp.path().join("0012"), &["b.JPG", "a.png"]);
        write_images(&temp.path().join("notes"), &["c.jpg"]);

        let sink = MemorySink::new();
        let summary = rename_subfolder_mode(&options(temp.path()), &sink).expect("run");

        let renamed = temp.path().join("renamed");
        assert!(renamed.join("HR-250701-0012-A.png").is_file());
        assert!(renamed.join("HR-250701-0012-B.jpg").is_file());
        assert_eq!(summary.sample_dirs, 1);
        assert_eq!(summary.renamed, 2);
        assert_eq!(summary.skipped_dirs, 1);
        assert!(sink.contains("4桁数字のサンプル番号ではありません"));
        // 元ファイルは移動されない
        assert!(temp.path().join("0012").join("b.JPG").is_file());
    }

    #[test]
    fn files_beyond_the_fourth_are_not_copied() {
        let temp = tempdir().expect("tempdir");
        write_images(
            &temp.path().join("0001"),
            &["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg"],
        );

        let sink = MemorySink::new();
        let summary = rename_subfolder_mode(&options(temp.path()), &sink).expect("run");

        let renamed = temp.path().join("renamed");
        assert!(renamed.join("HR-250701-0001-D.jpg").is_file());
        assert_eq!(fs::read_dir(&renamed).expect("read").count(), 4);
        assert_eq!(summary.renamed, 4);
        assert_eq!(summary.skipped_files, 1);
        assert!(sink.contains("超過分には角度を割り当てず"));
    }

    #[test]
    fn empty_sample_dir_is_skipped_with_warning() {
        let temp = tempdir().expect("tempdir");
        fs::create_dir_all(temp.path().join("0003")).expect("dir");

        let sink = MemorySink::new();
        let summary = rename_subfolder_mode(&options(temp.path()), &sink).expect("run");
        assert_eq!(summary.sample_dirs, 0);
        assert_eq!(summary.skipped_dirs, 1);
        assert!(sink.contains("対応する画像がないためスキップ"));
    }

    #[test]
    fn second_run_overwrites_without_touching_sources() {
        let temp = tempdir().expect("tempdir");
        write_images(&temp.path().join("0007"), &["x.jpg"]);

        let sink = MemorySink::new();
        rename_subfolder_mode(&options(temp.path()), &sink).expect("first run");
        let summary = rename_subfolder_mode(&options(temp.path()), &sink).expect("second run");

        assert_eq!(summary.renamed, 1);
        assert!(temp.path().join("0007").join("x.jpg").is_file());
        assert!(temp
            .path()
            .join("renamed")
            .join("HR-250701-0007-A.jpg")
            .is_file());
    }

    #[test]
    fn missing_base_dir_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let missing = temp.path().join("nope");
        let sink = MemorySink::new();
        let err = rename_subfolder_mode(&options(&missing), &sink).expect_err("should fail");
        assert!(err.to_string().contains("ベースディレクトリが存在しません"));
    }
}
