use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenameError {
    #[error("ベースディレクトリが存在しません: {}", .0.display())]
    MissingBaseDir(PathBuf),
    #[error("画像フォルダが存在しません: {}", .0.display())]
    MissingImageDir(PathBuf),
    #[error("地域コードは英字2文字で指定してください: {0}")]
    InvalidRegionCode(String),
    #[error("日付コードは数字6桁で指定してください: {0}")]
    InvalidDateCode(String),
    #[error("角度数は1〜26の範囲で指定してください: {0}")]
    InvalidAngleNum(usize),
    #[error("'...-XX.ext' 形式のガイド写真が見つかりませんでした: {}", .0.display())]
    NoGuidePhotos(PathBuf),
    #[error("各バッチの画像枚数が一致しません。ファイルの並びを確認してください")]
    InconsistentBatchSizes,
    #[error("バッチあたりの画像枚数 ({count}) が角度数 ({angle_num}) で割り切れません")]
    IndivisibleBatchSize { count: usize, angle_num: usize },
}
