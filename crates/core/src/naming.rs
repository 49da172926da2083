use crate::error::RenameError;
use chrono::NaiveDate;

/// angle_num 個分の角度ラベル ('A' から連続) を返す。
/// アルファベットを超える指定は明示的にエラーにする。
pub fn angle_labels(angle_num: usize) -> Result<Vec<char>, RenameError> {
    if angle_num == 0 || angle_num > 26 {
        return Err(RenameError::InvalidAngleNum(angle_num));
    }
    Ok((0..angle_num).map(|i| (b'A' + i as u8) as char).collect())
}

/// ファイル名から拡張子 (ドット付き) を小文字で取り出す。
/// 先頭ドットのみの隠しファイルは拡張子なし扱い。
pub fn lowercase_extension(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(pos) if pos > 0 => file_name[pos..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

pub fn subfolder_target_name(
    region_code: &str,
    date_code: &str,
    sample_id: &str,
    angle: char,
    ext_lower: &str,
) -> String {
    format!("{region_code}-{date_code}-{sample_id}-{angle}{ext_lower}")
}

pub fn single_folder_target_name(
    region_code: &str,
    date_code: &str,
    batch_id: &str,
    group_id: usize,
    angle: char,
    ext_lower: &str,
) -> String {
    format!("{region_code}-{date_code}-{batch_id}{group_id:02}-{angle}{ext_lower}")
}

/// サンプル番号フォルダ名: ちょうど4桁の数字。
pub fn is_sample_dir_name(name: &str) -> bool {
    name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit())
}

pub fn normalize_region_code(value: &str) -> Result<String, RenameError> {
    let trimmed = value.trim();
    if trimmed.len() == 2 && trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(trimmed.to_ascii_uppercase())
    } else {
        Err(RenameError::InvalidRegionCode(value.to_string()))
    }
}

pub fn validate_date_code(value: &str) -> Result<(), RenameError> {
    if value.len() == 6 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(RenameError::InvalidDateCode(value.to_string()))
    }
}

/// 日付コードが暦日として読めるか (YYMMDD)。警告判定にのみ使う。
pub fn is_calendar_date(date_code: &str) -> bool {
    NaiveDate::parse_from_str(date_code, "%y%m%d").is_ok()
}

/// フォルダ名の先頭が「英字2 + 数字6」ならば (地域, 日付) に分解する。
/// フロントエンドの自動入力用。
pub fn split_region_date(folder_name: &str) -> Option<(String, String)> {
    let bytes = folder_name.as_bytes();
    if bytes.len() < 8 {
        return None;
    }
    if !bytes[..2].iter().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    if !bytes[2..8].iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((
        folder_name[..2].to_ascii_uppercase(),
        folder_name[2..8].to_string(),
    ))
}
