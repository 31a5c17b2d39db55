use outcomecraft_core::present::{csv, html};
use outcomecraft_core::{
    DisplayOrder, ExtractionError, ExtractionStrategy, LoadError, OutcomeError, OutcomesConfig,
    StatisticKind, TableGenerator, UploadedFile,
};

// Canonical export: nine metadata rows, cohort header on row 9, statistic
// values 6, 11 and 16 rows below it.
const CANONICAL: &str = "\
TriNetX Outcomes Report
Network,Research
Created,2024-01-05
Analysis,Compare Outcomes
Index event,First prescription
Time window,1 day - 5 years
Matching,Propensity score 1:1
Outcome,Ischemic stroke
,
Cohort,Cohort Name,Patients in Cohort,Patients with Outcome,Risk
1,Metformin,\"5,120\",256,0.05
2,Sulfonylurea,\"5,120\",384,0.075
,
Risk Difference
Risk Difference,95 % CI Lower,95 % CI Upper,z,p
-0.025,-0.034,-0.016,-5.2,0.0000002
,
Risk Ratio
,
Risk Ratio,95 % CI Lower,95 % CI Upper
0.667,0.573,0.776
,
Odds Ratio
,
Odds Ratio,95 % CI Lower,95 % CI Upper
0.649,0.553,0.762
";

// Header on the first row and no blank rows between sections.
const COMPACT: &str = "\
Cohort,Cohort Name,Patients in Cohort,Patients with Outcome,Risk
1,Exposed,200,30,0.15
2,Comparison,200,20,0.10
Risk Difference,95 % CI Lower,95 % CI Upper,z,p
0.05,-0.012,0.112,1.58,0.114
Risk Ratio,95 % CI Lower,95 % CI Upper
1.5,0.876,2.569
Odds Ratio,95 % CI Lower,95 % CI Upper
1.588,0.876,2.878
";

fn generator_with(strategy: ExtractionStrategy) -> TableGenerator {
    let mut config = OutcomesConfig::default();
    config.extraction.strategy = strategy;
    TableGenerator::with_config(config)
}

#[test]
fn test_canonical_export_end_to_end() {
    let generator = TableGenerator::new();
    let record = generator
        .process_file(&UploadedFile::new("Ischemic stroke.csv", CANONICAL))
        .unwrap();

    assert_eq!(record.outcome_name, "Ischemic stroke");
    assert_eq!(record.cohorts[0].name, "Metformin");
    assert_eq!(record.cohorts[0].n.value(), Some(5120));
    assert_eq!(record.cohorts[0].events.value(), Some(256));
    assert_eq!(record.cohorts[1].name, "Sulfonylurea");
    assert_eq!(record.cohorts[1].events.value(), Some(384));

    let rd = record.stat(StatisticKind::RiskDifference);
    assert_eq!(rd.value.raw(), "-0.025");
    assert_eq!(rd.ci_low.raw(), "-0.034");
    assert_eq!(rd.ci_high.raw(), "-0.016");
    assert_eq!(rd.z.as_deref(), Some("-5.2"));
    assert_eq!(rd.p.as_deref(), Some("0.0000002"));

    let rr = record.stat(StatisticKind::RiskRatio);
    assert_eq!(rr.value.value(), Some(0.667));
    assert_eq!(rr.p, None);

    let or = record.stat(StatisticKind::OddsRatio);
    assert_eq!(or.value.raw(), "0.649");
    assert_eq!(or.ci_high.raw(), "0.762");
}

#[test]
fn test_fixed_offset_matches_header_relative_on_canonical_export() {
    let file = UploadedFile::new("stroke.csv", CANONICAL);
    let relative = TableGenerator::new().process_file(&file).unwrap();
    let fixed = generator_with(ExtractionStrategy::FixedOffset)
        .process_file(&file)
        .unwrap();
    assert_eq!(relative, fixed);
}

#[test]
fn test_label_scan_reads_compact_layout() {
    let file = UploadedFile::new("bleeding.csv", COMPACT);
    let record = generator_with(ExtractionStrategy::LabelScan)
        .process_file(&file)
        .unwrap();

    let rd = record.stat(StatisticKind::RiskDifference);
    assert_eq!(rd.value.raw(), "0.05");
    assert_eq!(rd.z.as_deref(), Some("1.58"));
    assert_eq!(rd.p.as_deref(), Some("0.114"));
    assert_eq!(record.stat(StatisticKind::RiskRatio).value.raw(), "1.5");
    assert_eq!(record.stat(StatisticKind::OddsRatio).value.raw(), "1.588");
    assert_eq!(record.stat(StatisticKind::OddsRatio).ci_low.raw(), "0.876");

    // Offsets tuned for the canonical layout land on the wrong rows here.
    let offset = TableGenerator::new().process_file(&file).unwrap();
    assert_ne!(offset.stat(StatisticKind::RiskDifference).value.raw(), "0.05");
}

#[test]
fn test_label_scan_agrees_on_canonical_export() {
    let file = UploadedFile::new("stroke.csv", CANONICAL);
    let relative = TableGenerator::new().process_file(&file).unwrap();
    let scanned = generator_with(ExtractionStrategy::LabelScan)
        .process_file(&file)
        .unwrap();
    assert_eq!(relative, scanned);
}

#[test]
fn test_tab_separated_export() {
    let tsv = CANONICAL.replace("\"5,120\"", "5120").replace(',', "\t");
    let record = TableGenerator::new()
        .process_file(&UploadedFile::new("stroke.tsv", tsv))
        .unwrap();
    assert_eq!(record.cohorts[0].n.value(), Some(5120));
    assert_eq!(record.stat(StatisticKind::OddsRatio).value.raw(), "0.649");
}

#[test]
fn test_batch_keeps_order_and_isolates_failures() {
    let files = vec![
        UploadedFile::new("stroke.csv", CANONICAL),
        UploadedFile::new("notes.csv", "free text,with no\ntable,in it\n"),
        UploadedFile::new("bleeding.csv", COMPACT),
    ];
    let reports = TableGenerator::new().process_batch(&files);

    let names: Vec<&str> = reports.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, vec!["stroke.csv", "notes.csv", "bleeding.csv"]);

    assert_eq!(reports[0].record().unwrap().outcome_name, "stroke");
    assert!(matches!(
        reports[1].error(),
        Some(OutcomeError::Extraction(ExtractionError::HeaderNotFound { scanned: 2 }))
    ));
    assert_eq!(reports[2].record().unwrap().outcome_name, "bleeding");

    let records = outcomecraft_core::batch::records(&reports);
    assert_eq!(records.len(), 2);
}

#[test]
fn test_load_failures_are_reported_per_file() {
    let files = vec![
        UploadedFile::new("report.pdf", "%PDF-1.4"),
        UploadedFile::new("latin.csv", vec![b'C', b'o', b'h', 0xE9, b'\n']),
        UploadedFile::new("broken.xlsx", "not a zip archive"),
    ];
    let reports = TableGenerator::new().process_batch(&files);

    assert!(matches!(
        reports[0].error(),
        Some(OutcomeError::Load(LoadError::UnsupportedFormat { extension })) if extension == "pdf"
    ));
    assert!(matches!(
        reports[1].error(),
        Some(OutcomeError::Load(LoadError::Decode { .. }))
    ));
    assert!(matches!(
        reports[2].error(),
        Some(OutcomeError::Load(LoadError::Workbook(_)))
    ));
    for report in &reports {
        assert_eq!(report.error().unwrap().hint(), "check file integrity");
    }
}

#[test]
fn test_missing_path_is_an_io_error() {
    let reports = TableGenerator::new().process_paths(&["/nonexistent/dir/stroke.csv"]);
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].file_name, "stroke.csv");
    assert!(matches!(
        reports[0].error(),
        Some(OutcomeError::Load(LoadError::Io(_)))
    ));
}

#[test]
fn test_configured_outcome_names() {
    let config = OutcomesConfig::from_toml_str("[names]\nstroke = \"Ischemic stroke\"\n").unwrap();
    let record = TableGenerator::with_config(config)
        .process_file(&UploadedFile::new("stroke.csv", CANONICAL))
        .unwrap();
    assert_eq!(record.outcome_name, "Ischemic stroke");
}

#[test]
fn test_display_order_drives_rendering() {
    let files = vec![
        UploadedFile::new("stroke.csv", CANONICAL),
        UploadedFile::new("bleeding.csv", COMPACT),
    ];
    let generator = TableGenerator::new();
    let records = outcomecraft_core::batch::records(&generator.process_batch(&files));

    let mut order = DisplayOrder::from_names(records.iter().map(|r| r.outcome_name.clone()));
    assert!(order.move_name("bleeding", 0));
    let arranged = order.arrange(&records);

    let config = generator.config();
    let exported = csv::export_csv(arranged.iter().copied(), &config.format).unwrap();
    let blocks: Vec<&str> = exported.split("\n\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("bleeding\n"));
    assert!(blocks[1].starts_with("stroke\n"));
    assert!(blocks[1].contains("Metformin,\"5,120\",256,5.0%"));
    assert!(blocks[1].contains("Risk Difference,-0.03,\"(-0.03, -0.02)\",<.001"));

    let page = html::render_document(
        arranged.iter().copied(),
        "Outcomes",
        &config.format,
        &config.style,
    );
    assert!(page.find(">bleeding</h3>").unwrap() < page.find(">stroke</h3>").unwrap());
}
