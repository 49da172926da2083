use crate::config::NamingRules;
use crate::error::RenameError;
use crate::guide::guide_batch_id;
use crate::logger::LogSink;
use crate::naming::{angle_labels, lowercase_extension, single_folder_target_name};
use crate::scan::{ensure_renamed_dir, list_image_files};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SingleFolderOptions {
    pub base_dir: PathBuf,
    pub image_dir: PathBuf,
    pub region_code: String,
    pub date_code: String,
    pub angle_num: usize,
    pub rules: NamingRules,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SingleFolderSummary {
    pub batches: usize,
    pub files_per_batch: usize,
    pub guides_copied: usize,
    pub renamed: usize,
    pub copy_failures: usize,
    pub leading_skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidePhoto {
    pub file_name: String,
    pub index: usize,
    pub batch_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub guide_file: String,
    pub batch_id: String,
    pub files_to_rename: Vec<String>,
}

pub fn find_guide_photos(files: &[String], extensions: &[String]) -> Vec<GuidePhoto> {
    files
        .iter()
        .enumerate()
        .filter_map(|(index, file_name)| {
            guide_batch_id(file_name, extensions).map(|batch_id| GuidePhoto {
                file_name: file_name.clone(),
                index,
                batch_id,
            })
        })
        .collect()
}

/// ガイド写真の位置でファイル列をバッチに区切る。バッチkはガイドkの位置から
/// 次のガイドの直前まで (最後のバッチは列の末尾まで)。
pub fn build_batches(files: &[String], guides: &[GuidePhoto]) -> Vec<Batch> {
    let mut batches = Vec::with_capacity(guides.len());
    for (i, guide) in guides.iter().enumerate() {
        let end = guides
            .get(i + 1)
            .map(|next| next.index)
            .unwrap_or(files.len());
        batches.push(Batch {
            guide_file: guide.file_name.clone(),
            batch_id: guide.batch_id.clone(),
            files_to_rename: files[guide.index + 1..end].to_vec(),
        });
    }
    batches
}

/// モード2: 単一フォルダの画像をガイド写真で区切り、グループIDと角度を
/// 割り当ててコピーする。構造エラーはファイルを1枚も触らずに返す。
pub fn rename_single_folder_mode(
    options: &SingleFolderOptions,
    sink: &dyn LogSink,
) -> Result<SingleFolderSummary> {
    let labels = angle_labels(options.angle_num)?;

    if !options.image_dir.is_dir() {
        return Err(RenameError::MissingImageDir(options.image_dir.clone()).into());
    }

    let renamed_dir = ensure_renamed_dir(&options.base_dir, &options.rules, sink)?;
    let mut summary = SingleFolderSummary::default();

    let all_files = list_image_files(&options.image_dir, &options.rules.supported_extensions)?;
    if all_files.is_empty() {
        sink.log(&format!(
            "警告: フォルダ '{}' に対応する画像がありません。",
            options.image_dir.display()
        ));
        return Ok(summary);
    }

    let guides = find_guide_photos(&all_files, &options.rules.supported_extensions);
    if guides.is_empty() {
        return Err(RenameError::NoGuidePhotos(options.image_dir.clone()).into());
    }

    summary.leading_skipped = guides[0].index;
    if summary.leading_skipped > 0 {
        sink.log(&format!(
            "警告: 最初のガイド写真より前に {} 枚のファイルがあります。これらはどのバッチにも属さないため処理しません。",
            summary.leading_skipped
        ));
    }

    let batches = build_batches(&all_files, &guides);
    if batches.len() > 1 {
        let first_count = batches[0].files_to_rename.len();
        if batches
            .iter()
            .any(|b| b.files_to_rename.len() != first_count)
        {
            for batch in &batches {
                sink.log(&format!(
                    "  - ガイド写真 '{}' の後に {} 枚の処理対象が続いています。",
                    batch.guide_file,
                    batch.files_to_rename.len()
                ));
            }
            return Err(RenameError::InconsistentBatchSizes.into());
        }
    }

    let files_per_batch = batches[0].files_to_rename.len();
    if files_per_batch == 0 {
        sink.log("警告: ガイド写真は見つかりましたが、その間に処理対象の画像がありません。");
    } else if files_per_batch % options.angle_num != 0 {
        sink.log("ファイル数を確認するか、角度数の指定を調整してください。");
        return Err(RenameError::IndivisibleBatchSize {
            count: files_per_batch,
            angle_num: options.angle_num,
        }
        .into());
    }

    sink.log(&format!(
        "\nフォルダを処理しています (単一フォルダモード): {}",
        options.image_dir.display()
    ));
    sink.log(&format!(
        "検出したバッチ数: {}、各バッチの処理対象: {} 枚、角度数: {}。",
        batches.len(),
        files_per_batch,
        options.angle_num
    ));
    summary.batches = batches.len();
    summary.files_per_batch = files_per_batch;

    for (i, batch) in batches.iter().enumerate() {
        sink.log(&format!(
            "\n  バッチ {} を処理中 (ガイド写真: '{}', バッチID: {})",
            i + 1,
            batch.guide_file,
            batch.batch_id
        ));

        let guide_src = options.image_dir.join(&batch.guide_file);
        let guide_dst = renamed_dir.join(&batch.guide_file);
        match fs::copy(&guide_src, &guide_dst) {
            Ok(_) => {
                sink.log(&format!("    ガイド写真をコピー: '{}'", batch.guide_file));
                summary.guides_copied += 1;
            }
            Err(err) => {
                sink.log(&format!(
                    "    エラー: ガイド写真 '{}' のコピーに失敗しました: {}",
                    batch.guide_file, err
                ));
                summary.copy_failures += 1;
            }
        }

        for (j, original_name) in batch.files_to_rename.iter().enumerate() {
            let group_id = j / options.angle_num + 1;
            let angle = labels[j % options.angle_num];
            let new_name = single_folder_target_name(
                &options.region_code,
                &options.date_code,
                &batch.batch_id,
                group_id,
                angle,
                &lowercase_extension(original_name),
            );

            let src = options.image_dir.join(original_name);
            let dst = renamed_dir.join(&new_name);
            match fs::copy(&src, &dst) {
                Ok(_) => {
                    sink.log(&format!(
                        "    コピーしてリネーム: '{}' -> '{}'",
                        original_name, new_name
                    ));
                    summary.renamed += 1;
                }
                Err(err) => {
                    sink.log(&format!(
                        "    エラー: '{}' から '{}' へのコピーに失敗しました: {}",
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
        "\n単一フォルダモード完了。合計 {} 件のファイルをコピーしてリネームしました。",
        summary.renamed
    ));
    Ok(summary)
}
