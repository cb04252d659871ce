// ==========================================
// PC 组装套餐系统 - 库存 / 分级过滤
// ==========================================
// 职责: 无库存剔除 + 按分级筛选 + 最低价优先排序
// 红线: 过滤幂等（过滤两次 = 过滤一次）
// ==========================================

use crate::domain::part::Part;
use crate::domain::types::{Category, Tier};
use std::cmp::Ordering;

pub struct TierFilter;

impl TierFilter {
    /// 剔除 stock_total <= 0 的商品（分级之前执行）
    pub fn in_stock(parts: &[Part]) -> Vec<Part> {
        parts.iter().filter(|p| p.in_stock()).cloned().collect()
    }

    /// 指定分级的可用商品,按价格升序（稳定排序,同价保持输入顺序）
    pub fn for_tier(parts: &[Part], tier: Tier) -> Vec<Part> {
        let mut eligible: Vec<Part> = parts
            .iter()
            .filter(|p| p.is_eligible_for(tier))
            .cloned()
            .collect();
        eligible.sort_by(cheapest_first);
        eligible
    }

    /// 从已排序的分级视图中取某类目的候选
    pub fn candidates(sorted: &[Part], category: Category) -> Vec<Part> {
        sorted
            .iter()
            .filter(|p| p.category == Some(category))
            .cloned()
            .collect()
    }
}

/// 默认选择策略: 最低价优先
pub fn cheapest_first(a: &Part, b: &Part) -> Ordering {
    a.price.total_cmp(&b.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TierSet;

    fn part(sku: &str, price: f64, stock: i64, tiers: TierSet) -> Part {
        let mut p = Part::new(sku, "SSD Internal", sku, price, stock);
        p.tiers = tiers;
        p
    }

    #[test]
    fn test_in_stock_drops_zero_and_negative() {
        let parts = vec![
            part("A", 1.0, 0, TierSet::all()),
            part("B", 1.0, 3, TierSet::all()),
            part("C", 1.0, -1, TierSet::all()),
        ];
        let kept = TierFilter::in_stock(&parts);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].sku, "B");
    }

    #[test]
    fn test_for_tier_sorted_and_idempotent() {
        let parts = vec![
            part("A", 300.0, 1, TierSet::all()),
            part("B", 100.0, 1, TierSet::of(&[Tier::Office])),
            part("C", 200.0, 0, TierSet::all()),
            part("D", 100.0, 1, TierSet::all()),
            part("E", 50.0, 1, TierSet::of(&[Tier::Advanced])),
        ];

        let office = TierFilter::for_tier(&parts, Tier::Office);
        assert_eq!(
            office.iter().map(|p| p.sku.as_str()).collect::<Vec<_>>(),
            vec!["B", "D", "A"]
        );

        let again = TierFilter::for_tier(&office, Tier::Office);
        assert_eq!(again, office);
    }
}
