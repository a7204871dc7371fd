pub mod derivatives_test;
pub mod vielbein_test;
