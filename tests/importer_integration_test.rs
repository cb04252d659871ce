// ==========================================
// PartImporter 集成测试
// ==========================================
// 测试目标: 验证完整的库存导入流程（CSV → 清洗 → 库存过滤）
// ==========================================


use pc_bundling::importer::{ImportError, PartImporter};
use pc_bundling::logging;
use test_helpers::{sample_inventory, write_inventory_csv, write_raw_csv, INVENTORY_HEADERS};

#[test]
fn test_import_csv_basic() {
    logging::init_test();

    let file = write_inventory_csv(&sample_inventory()).unwrap();
    let report = PartImporter::new().import_file(file.path()).unwrap();

    assert_eq!(report.total_rows, 20);
    assert_eq!(report.parts.len(), 19);
    assert_eq!(report.dropped_out_of_stock, 1);
    assert!(report.coercions.is_empty());
    assert_eq!(report.headers, INVENTORY_HEADERS.to_vec());
    assert_eq!(report.source.as_deref(), file.path().to_str());

    let ram = report.parts.iter().find(|p| p.sku == "RAM-16").unwrap();
    assert_eq!(ram.name, "Corsair Vengeance 16GB (2x8GB) DDR5");
    assert_eq!(ram.brand, "Corsair");
    assert_eq!(ram.price, 900_000.0);
    assert_eq!(ram.stock_total, 6);
    assert_eq!(ram.extra.get("Stock Gudang").map(String::as_str), Some("6"));
    assert_eq!(ram.extra.get("ABC Category").map(String::as_str), Some("B"));
    // 导入器不分级
    assert!(ram.tiers.is_empty());
}

#[test]
fn test_import_coerces_bad_numbers() {
    let file = write_raw_csv(
        "SKU,Kategori,Brand,Nama Accurate,Web,Stock Total,Current SO\n\
         P-1,Processor,Intel,Core i3-12100,\"1,650,000\",2,0\n\
         P-2,Processor,Intel,Core i5-12400,2500000,n/a,1\n\
         P-3,Processor,Intel,,2400000,4,\n",
    )
    .unwrap();

    let report = PartImporter::new().import_file(file.path()).unwrap();

    assert_eq!(report.total_rows, 3);
    assert_eq!(report.parts.len(), 2);
    let p1 = report.parts.iter().find(|p| p.sku == "P-1").unwrap();
    assert_eq!(p1.price, 0.0);
    let p3 = report.parts.iter().find(|p| p.sku == "P-3").unwrap();
    assert_eq!(p3.name, "");
    assert_eq!(p3.current_so, 0);

    let fields: Vec<(&str, &str)> = report
        .coercions
        .iter()
        .map(|c| (c.sku.as_str(), c.field.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![("P-1", "Web"), ("P-2", "Stock Total"), ("P-3", "Current SO")]
    );
    assert_eq!(report.coercions[0].raw_value, "1,650,000");
    assert_eq!(report.coercions[1].row_number, 3);
}

#[test]
fn test_import_missing_required_column() {
    let file = write_raw_csv("SKU,Kategori,Nama Accurate,Web,Stock Total\nP-1,Processor,X,1,1\n").unwrap();

    let result = PartImporter::new().import_file(file.path());

    match result {
        Err(ImportError::MissingRequiredColumn(cols)) => assert_eq!(cols, "Brand, Current SO"),
        other => panic!("expected MissingRequiredColumn, got {:?}", other.map(|r| r.total_rows)),
    }
}

#[test]
fn test_import_file_not_found() {
    let result = PartImporter::new().import_file("/nonexistent/stok.csv");
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}

#[test]
fn test_import_empty_inventory() {
    let file = write_inventory_csv(&[]).unwrap();
    let report = PartImporter::new().import_file(file.path()).unwrap();
    assert_eq!(report.total_rows, 0);
    assert!(report.parts.is_empty());
}

/// tests/fixtures/stok_sample.xlsx:
/// 表头 " Brand " 带空格；第 4 行为空行；数值列为数字单元格；
/// PSU-650 的 Web 为文本 "Rp 750.000"、Stock Total 为 2.5、Current SO 为空
fn xlsx_fixture() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/stok_sample.xlsx")
}

#[test]
fn test_import_xlsx_fixture() {
    logging::init_test();

    let report = PartImporter::new().import_file(xlsx_fixture()).unwrap();

    assert_eq!(
        report.headers,
        vec![
            "SKU",
            "Kategori",
            "Brand",
            "Nama Accurate",
            "Web",
            "Stock Total",
            "Current SO",
            "ABC Category",
        ]
    );
    // 空行跳过
    assert_eq!(report.total_rows, 4);
    assert_eq!(report.dropped_out_of_stock, 1);

    let skus: Vec<&str> = report.parts.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, vec!["CPU-I3", "RAM-16", "PSU-650"]);

    // 数字单元格按整数文本渲染后可直接解析
    let cpu = &report.parts[0];
    assert_eq!(cpu.price, 1_650_000.0);
    assert_eq!(cpu.stock_total, 5);
    assert_eq!(cpu.brand, "Intel");
    assert_eq!(cpu.row_number, 2);
    assert_eq!(cpu.extra.get("ABC Category").map(String::as_str), Some("A"));

    let psu = &report.parts[2];
    assert_eq!(psu.row_number, 6);
    assert_eq!(psu.price, 0.0);
    assert_eq!(psu.stock_total, 2);
    assert_eq!(psu.current_so, 0);

    let coerced: Vec<(usize, &str, &str)> = report
        .coercions
        .iter()
        .map(|c| (c.row_number, c.field.as_str(), c.raw_value.as_str()))
        .collect();
    assert_eq!(
        coerced,
        vec![(6, "Web", "Rp 750.000"), (6, "Current SO", "")]
    );
}

#[test]
fn test_import_unsupported_extension() {
    let file = tempfile::Builder::new().suffix(".ods").tempfile().unwrap();
    let result = PartImporter::new().import_file(file.path());
    assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "ods"));
}
