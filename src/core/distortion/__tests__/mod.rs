pub mod chord_test;
