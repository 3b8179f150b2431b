//! アップロード前のローカル検証

use crate::error::ValidationError;
use crate::types::LocalFile;

/// アップロード可能な拡張子
pub const ALLOWED_EXTENSIONS: [&str; 2] = [".csv", ".xlsx"];

/// ファイルサイズ上限（5 MiB）
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// ファイル名から拡張子（最後の '.' 以降、小文字）を取り出す
pub fn extension_of(file_name: &str) -> Option<String> {
    file_name
        .rfind('.')
        .map(|idx| file_name[idx..].to_lowercase())
}

/// 拡張子とサイズを検証
pub fn validate_upload<F: LocalFile>(file: &F) -> Result<(), ValidationError> {
    let supported = extension_of(file.name())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);

    if !supported {
        return Err(ValidationError::UnsupportedExtension {
            file_name: file.name().to_string(),
        });
    }

    if file.size() > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge {
            size: file.size(),
            limit: MAX_FILE_SIZE,
        });
    }

    Ok(())
}
