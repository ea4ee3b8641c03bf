use std::fs;

use kira_ampliqc::io::run_files::{QUANT_AMP, QUANT_CQ, RUN_INFO, RunFiles, qpcr_file_type};
use kira_ampliqc::io::run_info::RunInfo;
use kira_ampliqc::plate::demux::Fluor;
use kira_ampliqc::protocol::SOP_V2;
use tempfile::TempDir;

#[test]
fn file_type_matching() {
    assert_eq!(
        qpcr_file_type("SB100 -  Run Information.csv", "SB100"),
        Some((RUN_INFO, None))
    );
    assert_eq!(
        qpcr_file_type("SB100_All Wells -  Quantification Cq Results.csv", "SB100"),
        Some((QUANT_CQ, None))
    );
    assert_eq!(
        qpcr_file_type(
            "SB100 -  Quantification Amplification Results_HEX.csv",
            "SB100"
        ),
        Some((QUANT_AMP, Some(Fluor::Hex)))
    );
    // other barcodes and unrelated files are ignored
    assert_eq!(qpcr_file_type("SB200 -  Run Information.csv", "SB100"), None);
    assert_eq!(qpcr_file_type("SB100 notes.txt", "SB100"), None);
    assert_eq!(
        qpcr_file_type("SB100 -  Melt Curve Derivative Results.csv", "SB100"),
        None
    );
}

#[test]
fn discovery_collects_one_barcode() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("SB100 -  Run Information.csv"), "Run Ended,now\n").unwrap();
    fs::write(dir.join("SB100 -  Quantification Cq Results.csv"), ",Well,Fluor,Cq\n").unwrap();
    fs::write(
        dir.join("SB100 -  Quantification Amplification Results_FAM.csv"),
        "Cycle\n",
    )
    .unwrap();
    fs::write(dir.join("SB200 -  Run Information.csv"), "Run Ended,now\n").unwrap();

    let files = RunFiles::discover(dir, "SB100").unwrap();
    assert!(files.complete());
    assert_eq!(files.quant_amp.len(), 1);
    assert!(files.quant_amp.contains_key(&Fluor::Fam));

    let files = RunFiles::discover(dir, "SB200").unwrap();
    assert!(!files.complete());
}

#[test]
fn run_info_protocol_check() {
    let info = RunInfo::parse(
        "Protocol File Name,Covid19-LUNA_protocol.prcl\n\
         Plate Setup File Name,Covid19-v2_platelayout.pltd\n\
         Run Ended,04/20/2020 17:32:08\n",
    );
    info.check_protocol(&SOP_V2).unwrap();
    assert_eq!(info.run_ended().unwrap(), "04/20/2020 17:32:08");

    let wrong = RunInfo::parse("Protocol File Name,Other.prcl\nPlate Setup File Name,x\n");
    assert!(wrong.check_protocol(&SOP_V2).is_err());
}
