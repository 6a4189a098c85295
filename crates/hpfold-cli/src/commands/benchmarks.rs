use crate::error::Result;
use hpfold::core::benchmarks;

pub async fn run() -> Result<()> {
    println!("{:<6} {:>6} {:>8}  sequence", "name", "length", "best");
    for (name, benchmark) in benchmarks::all() {
        println!(
            "{:<6} {:>6} {:>8}  {}",
            name,
            benchmark.length(),
            benchmark.optimal_score,
            benchmark.sequence
        );
    }
    Ok(())
}
