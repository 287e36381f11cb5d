//! PDF NHS 号码提取
//!
//! 信件 PDF 中每位受试者都有一行 "NHS No: ..."，取该行中的所有数字

use std::path::Path;

use tracing::debug;

use crate::error::{AppError, AppResult, DocumentError};

/// 标记 NHS 号码所在行的文本
pub const NHS_NUMBER_MARKER: &str = "NHS No";

/// 从提取出的文本中找出 NHS 号码
///
/// 每个包含标记的行产生一个号码，按出现顺序返回；不做长度或校验位检查，
/// 标记行里没有数字时不产生任何结果
pub fn extract_nhs_numbers_from_text(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| line.contains(NHS_NUMBER_MARKER))
        .map(|line| line.chars().filter(char::is_ascii_digit).collect::<String>())
        .filter(|digits| !digits.is_empty())
        .collect()
}

/// 读取 PDF 文件并提取所有页面中的 NHS 号码
pub fn extract_nhs_numbers(path: &Path) -> AppResult<Vec<String>> {
    let bytes =
        std::fs::read(path).map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
        DocumentError::PdfExtractFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })?;

    let mut numbers = Vec::new();
    for (page_index, page_text) in pages.iter().enumerate() {
        let found = extract_nhs_numbers_from_text(page_text);
        debug!("第 {} 页找到 {} 个 NHS 号码", page_index + 1, found.len());
        numbers.extend(found);
    }

    Ok(numbers)
}
