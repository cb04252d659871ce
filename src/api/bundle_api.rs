// ==========================================
// PC 组装套餐系统 - 套餐装配 API
// ==========================================
// 职责: 导入 → 分级 → 会话装配 → 汇总 / 导出
// 约定: 候选列表按价格升序；覆写索引以当前候选列表为准
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::RulesConfigReader;
use crate::domain::bundle::{Bundle, SlotNote, SlotStatus};
use crate::domain::part::Part;
use crate::domain::types::{ConditionalSlotState, Slot, Tier};
use crate::engine::{AssemblySession, Classifier, TierFilter};
use crate::exporter::{audit_table, summary_table, CsvExporter, Table};
use crate::importer::{FieldCoercion, PartImporter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument};

/// 库存导入响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryLoadResponse {
    /// 批次ID（手工传入商品时为 None）
    pub batch_id: Option<String>,
    /// 源表行数
    pub total_rows: usize,
    /// 有库存并已分级的商品数
    pub loaded: usize,
    /// 因无库存被剔除的行数
    pub dropped_out_of_stock: usize,
    /// 未命中任何分级的商品数
    pub unclassified: usize,
    /// 数值强制转换记录
    pub coercions: Vec<FieldCoercion>,
    /// 耗时（毫秒）
    pub elapsed_ms: i64,
}

/// 槽位候选视图（供选择界面使用）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateView {
    pub slot: Slot,
    pub candidates: Vec<Part>,
    pub selected_index: Option<usize>,
    pub status: SlotStatus,
    pub conditional_state: Option<ConditionalSlotState>,
    pub notes: Vec<SlotNote>,
}

/// 导出文件路径
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPaths {
    pub audit: PathBuf,
    pub summary: PathBuf,
}

/// 套餐装配API
pub struct BundleApi {
    classifier: Classifier,
    importer: PartImporter,
    exporter: CsvExporter,
    tier: Tier,
    headers: Vec<String>,
    session: Option<AssemblySession>,
}

impl BundleApi {
    /// 使用给定分级引擎创建
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            importer: PartImporter::new(),
            exporter: CsvExporter::new(),
            tier: Tier::Office,
            headers: Vec::new(),
            session: None,
        }
    }

    /// 使用默认分级规则
    pub fn with_default_rules() -> ApiResult<Self> {
        Ok(Self::new(Classifier::with_default_rules()?))
    }

    /// 从规则配置读取器创建
    pub fn from_reader<R: RulesConfigReader + ?Sized>(reader: &R) -> ApiResult<Self> {
        let rules = reader.classifier_rules()?;
        Ok(Self::new(Classifier::new(rules)?))
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// 当前会话中的已分级商品
    pub fn parts(&self) -> ApiResult<&[Part]> {
        Ok(self.session()?.parts())
    }

    // ==========================================
    // 导入
    // ==========================================

    /// 导入库存文件（CSV / Excel）,分级后开启新会话
    #[instrument(skip(self, path))]
    pub fn load_inventory<P: AsRef<Path>>(&mut self, path: P) -> ApiResult<InventoryLoadResponse> {
        let start = Instant::now();
        let report = self.importer.import_file(path)?;

        let total_rows = report.total_rows;
        let dropped = report.dropped_out_of_stock;
        let mut response = self.start_session(report.parts, report.headers);
        response.batch_id = Some(report.batch_id);
        response.total_rows = total_rows;
        response.dropped_out_of_stock = dropped;
        response.coercions = report.coercions;
        response.elapsed_ms = start.elapsed().as_millis() as i64;
        Ok(response)
    }

    /// 直接传入未分级商品（无库存商品在此剔除）
    pub fn load_parts(&mut self, parts: Vec<Part>, headers: Vec<String>) -> InventoryLoadResponse {
        let start = Instant::now();
        let total_rows = parts.len();
        let in_stock = TierFilter::in_stock(&parts);
        let dropped = total_rows - in_stock.len();

        let mut response = self.start_session(in_stock, headers);
        response.total_rows = total_rows;
        response.dropped_out_of_stock = dropped;
        response.elapsed_ms = start.elapsed().as_millis() as i64;
        response
    }

    fn start_session(&mut self, parts: Vec<Part>, headers: Vec<String>) -> InventoryLoadResponse {
        let classified = self.classifier.classify(&parts);
        let unclassified = classified.iter().filter(|p| p.tiers.is_empty()).count();
        let loaded = classified.len();

        let session = AssemblySession::new(classified, self.tier);
        info!(
            session_id = %session.session_id(),
            loaded = loaded,
            unclassified = unclassified,
            "库存已加载"
        );
        self.headers = headers;
        self.session = Some(session);

        InventoryLoadResponse {
            batch_id: None,
            total_rows: loaded,
            loaded,
            dropped_out_of_stock: 0,
            unclassified,
            coercions: Vec::new(),
            elapsed_ms: 0,
        }
    }

    // ==========================================
    // 操作员意图
    // ==========================================

    /// 切换分级（未加载库存时只记录分级）
    pub fn select_tier(&mut self, tier: Tier) {
        self.tier = tier;
        if let Some(session) = self.session.as_mut() {
            session.set_tier(tier);
        }
    }

    /// 槽位候选（价格升序）与当前选中索引
    pub fn candidates(&self, slot: Slot) -> ApiResult<CandidateView> {
        let resolution = self
            .session()?
            .slot(slot)
            .ok_or_else(|| ApiError::InternalError(format!("槽位缺失: {}", slot)))?;

        Ok(CandidateView {
            slot,
            candidates: resolution.candidates.clone(),
            selected_index: resolution.selected().and(resolution.selected_index),
            status: resolution.status,
            conditional_state: resolution.conditional_state,
            notes: resolution.notes.clone(),
        })
    }

    /// 覆写槽位选择（失败时原选择保持不变）
    pub fn override_slot(&mut self, slot: Slot, index: usize) -> ApiResult<()> {
        self.session_mut()?.override_slot(slot, index)?;
        Ok(())
    }

    pub fn clear_override(&mut self, slot: Slot) -> ApiResult<()> {
        self.session_mut()?.clear_override(slot);
        Ok(())
    }

    pub fn set_vga_opt_in(&mut self, opt_in: bool) -> ApiResult<()> {
        self.session_mut()?.set_vga_opt_in(opt_in);
        Ok(())
    }

    // ==========================================
    // 结果
    // ==========================================

    pub fn bundle(&self) -> ApiResult<&Bundle> {
        Ok(self.session()?.bundle())
    }

    pub fn summary_table(&self) -> ApiResult<Table> {
        Ok(summary_table(self.bundle()?))
    }

    /// 当前分级的库存表
    pub fn audit_table(&self) -> ApiResult<Table> {
        let session = self.session()?;
        Ok(audit_table(session.tier(), session.parts(), &self.headers))
    }

    /// 导出库存表与汇总表到目录
    pub fn export<P: AsRef<Path>>(&self, dir: P) -> ApiResult<ExportPaths> {
        let dir = dir.as_ref();
        let audit = self.exporter.write_into(
            &self.audit_table()?,
            dir,
            &CsvExporter::audit_file_name(self.tier),
        )?;
        let summary = self.exporter.write_into(
            &self.summary_table()?,
            dir,
            &CsvExporter::summary_file_name(self.tier),
        )?;
        Ok(ExportPaths { audit, summary })
    }

    fn session(&self) -> ApiResult<&AssemblySession> {
        self.session.as_ref().ok_or(ApiError::NoInventoryLoaded)
    }

    fn session_mut(&mut self) -> ApiResult<&mut AssemblySession> {
        self.session.as_mut().ok_or(ApiError::NoInventoryLoaded)
    }
}
