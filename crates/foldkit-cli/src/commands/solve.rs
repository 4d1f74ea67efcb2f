use crate::cli::SolveArgs;
use crate::error::{CliError, Result};
use foldkit::core::algebra::solve_linear;
use tracing::debug;

pub fn run(args: SolveArgs) -> Result<()> {
    if !args.a.is_finite() || !args.b.is_finite() {
        return Err(CliError::Argument(
            "coefficients must be finite numbers".to_string(),
        ));
    }
    debug!(a = args.a, b = args.b, "Solving linear equation");
    let solution = solve_linear(args.a, args.b);
    println!("{}x + {} = 0  =>  {}", args.a, args.b, solution);
    Ok(())
}
