/// ガイド写真の判定。ファイル名が「…-XX.ext」(XXは英数字2文字、拡張子は
/// 対応リスト内、いずれも大文字小文字を区別しない) で終わるとき、XXを
/// バッチIDとして返す。IDの大文字小文字は元のまま保持する。
pub fn guide_batch_id(file_name: &str, extensions: &[String]) -> Option<String> {
    let dot = file_name.rfind('.')?;
    let ext = &file_name[dot..];
    if !extensions
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(ext))
    {
        return None;
    }

    let stem = &file_name[..dot];
    let bytes = stem.as_bytes();
    if bytes.len() < 3 {
        return None;
    }
    let id_start = bytes.len() - 2;
    if bytes[id_start - 1] != b'-' {
        return None;
    }
    if !bytes[id_start..].iter().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }

    Some(stem[id_start..].to_string())
}
