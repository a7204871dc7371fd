pub mod field_test;
