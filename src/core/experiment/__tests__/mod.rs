pub mod report_test;
pub mod result_test;
