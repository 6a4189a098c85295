use crate::cli::LabArgs;
use crate::error::Result;
use hpfold::workflows::lab::Lab;
use tracing::info;

pub async fn run(args: LabArgs) -> Result<()> {
    let mut lab = Lab::new(args.length, args.seed)?;
    info!(
        length = args.length,
        seed = args.seed,
        steps = args.steps,
        "Starting mutation lab."
    );
    println!("Sequence: {}", lab.sequence());
    println!("step  energy  change");

    let mut unchanged = 0;
    for step in 0..=args.steps {
        if step > 0 && !lab.mutate() {
            unchanged += 1;
        }
        if let Some(scores) = lab.scores_at(step) {
            let change = scores
                .previous
                .map(|prev| i64::from(scores.current) - i64::from(prev))
                .map_or_else(|| "-".to_string(), |delta| format!("{:+}", delta));
            println!("{:>4}  {:>6}  {:>6}", step, scores.current, change);
        }
    }

    if unchanged > 0 {
        println!("Warning: {} step(s) left the chain unchanged.", unchanged);
    }
    Ok(())
}
