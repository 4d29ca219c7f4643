//! Runs the `sml-vec` backend checks and prints one line per configuration.

use sml_check::{cli, CheckArgs};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, launch_time) = cli::parse_args::<CheckArgs>("sml-check");

    cli::setup_logging(launch_time, args.log_level);

    let reports = sml_check::run(&args)?;

    for report in &reports {
        println!("{}", report);
    }
    println!(
        "{} configurations passed with {} samples each (seed {:#x}, backend {}).",
        reports.len(),
        args.samples,
        args.seed,
        sml_vec::backend()
    );

    Ok(())
}
