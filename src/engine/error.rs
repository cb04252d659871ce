// ==========================================
// PC 组装套餐系统 - 引擎层错误类型
// ==========================================

use crate::domain::types::{ConditionalSlotState, Slot};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("分级规则正则无效 ({rule}): {message}")]
    InvalidRulePattern { rule: String, message: String },

    #[error("候选索引越界 (slot: {slot}): index={index}, candidates={candidates}")]
    OverrideOutOfRange {
        slot: Slot,
        index: usize,
        candidates: usize,
    },

    #[error("槽位未启用，不能选择 (slot: {slot}, state: {state})")]
    SlotNotActive {
        slot: Slot,
        state: ConditionalSlotState,
    },

    #[error("正则错误: {0}")]
    Regex(#[from] regex::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
