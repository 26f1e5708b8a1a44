use meanblur::{args, error::BlurError, help};

fn main() {
    if let Err(e) = real_main() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), BlurError> {
    help::maybe_print_help_and_exit("meanblur");
    let arguments: Vec<_> = std::env::args_os().collect();
    let plan = args::parse_args(arguments)?;
    plan.execute()
}
