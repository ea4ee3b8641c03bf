pub mod json_writer;
pub mod plate_map;
pub mod quant_csv;
pub mod results_csv;
pub mod run_files;
pub mod run_info;
pub mod summary;
