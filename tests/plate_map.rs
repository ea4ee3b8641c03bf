use kira_ampliqc::io::plate_map::parse_plate_map;
use kira_ampliqc::plate::{PlateFormat, Well};

#[test]
fn plate_map_parse() {
    let content = "\
%Timestamp,Accession,Well
2020-04-20 12:01:07,B12345,A2
2020-04-20 12:01:31,EMPTY,A3
2020-04-20 12:02:02,Water_1,B1
2020-04-20 12:02:40,B23456,B2
";
    let accessions = parse_plate_map(content, "test").unwrap();
    assert_eq!(accessions.len(), 3);

    let a2 = Well::parse("A2", PlateFormat::W96).unwrap();
    assert_eq!(accessions.get(&a2).map(String::as_str), Some("B12345"));
    // placeholder rows are dropped
    let a3 = Well::parse("A3", PlateFormat::W96).unwrap();
    assert!(!accessions.contains_key(&a3));
    // control labels ride along as accessions
    let b1 = Well::parse("B1", PlateFormat::W96).unwrap();
    assert_eq!(accessions.get(&b1).map(String::as_str), Some("Water_1"));
}

#[test]
fn plate_map_rejects_bad_wells() {
    let content = "2020-04-20 12:01:07,B12345,Z2\n";
    assert!(parse_plate_map(content, "test").is_err());
}

#[test]
fn plate_map_skips_bom_and_blank_lines() {
    let content = "\u{feff}%header\n\n2020-04-20 12:01:07,B12345,A2\n";
    let accessions = parse_plate_map(content, "test").unwrap();
    assert_eq!(accessions.len(), 1);
}
