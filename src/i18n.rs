// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持印尼语（默认,操作员语言）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::bundle::SlotNote;
use crate::domain::types::{Slot, Tier};

/// 默认语言
pub const DEFAULT_LOCALE: &str = "id";

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["id", "en"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"id" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use pc_bundling::i18n::t;
/// let msg = t("note.no_stock");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use pc_bundling::i18n::t_with_args;
/// let msg = t_with_args("import.failed", &[("path", "/tmp/stok.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

pub fn tier_label(tier: Tier) -> String {
    t(tier.i18n_key())
}

pub fn slot_label(slot: Slot) -> String {
    t(slot.i18n_key())
}

pub fn note_text(note: SlotNote) -> String {
    t(note.i18n_key())
}
