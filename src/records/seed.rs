//! Initial table contents

use super::table::RecordTable;
use crate::config::EditorConfig;

const TAGS: &[(&str, &[&str])] = &[
    ("厂商", &["A厂商", "B厂商", "C厂商"]),
    ("设备", &["吸塑机", "注塑机"]),
    ("文档类型", &["产品手册", "维修手册"]),
];

const DOC_TYPES: &[(&str, &[&str])] = &[
    ("产品维修", &["故障代码", "维修步骤", "备件信息", "工具列表", "安全警告"]),
    ("产品运营", &["运营指标", "活动方案"]),
    ("技术文档", &["API接口", "数据结构", "系统架构", "部署流程"]),
    ("用户手册", &[]),
    ("培训材料", &["课程大纲", "讲师介绍"]),
    ("行业标准", &["标准编号", "发布日期", "适用范围"]),
    ("测试文档", &["测试用例", "测试报告"]),
];

/// Tag table with its seed records
#[must_use]
pub fn tag_table(config: &EditorConfig) -> RecordTable {
    seeded(RecordTable::new("tag", config.tables.tags), config, TAGS)
}

/// Document type table with its seed records
#[must_use]
pub fn doc_type_table(config: &EditorConfig) -> RecordTable {
    seeded(
        RecordTable::new("document type", config.tables.doc_types),
        config,
        DOC_TYPES,
    )
}

fn seeded(table: RecordTable, config: &EditorConfig, rows: &[(&str, &[&str])]) -> RecordTable {
    let mut table = table.with_chip_limits(config.max_chips, config.max_name_len);
    // Creating inserts at the front, so walk backwards to keep listed order
    for (name, chips) in rows.iter().rev() {
        let chips: Vec<String> = chips.iter().map(|c| (*c).to_string()).collect();
        if let Err(err) = table.create(name, &chips) {
            tracing::warn!(table = table.label(), name, error = %err, "skipping seed record");
        }
    }
    table
}
