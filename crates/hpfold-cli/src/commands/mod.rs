pub mod benchmarks;
pub mod lab;
pub mod run;
