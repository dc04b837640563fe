use clap::Parser;
use linkpulse::{
    cli::{describe_settings, Args},
    logging,
    runner::run,
    Settings,
};
use log::LevelFilter;

fn main() {
    let args = parse_command_line_arguments();
    initialize_logging(&args);

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => exit_with_error(&format!("Error loading settings: {}", e)),
    };

    if args.print_config {
        println!("{}", describe_settings(&settings));
        return;
    }

    match run(&settings, true) {
        Ok(summary) => {
            println!(
                "Played {} bars in {} steps",
                summary.bars.saturating_sub(1),
                summary.steps
            );
        }
        Err(e) => exit_with_error(&format!("Error running clock: {}", e)),
    }
}

fn parse_command_line_arguments() -> Args {
    Args::parse()
}

fn initialize_logging(args: &Args) {
    let level = if args.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    // Running without a log file is fine, the pulses still flow.
    if let Err(e) = logging::init_logger(level) {
        eprintln!("{}", e);
    }
    log::info!("Application starting");
}

fn load_settings(args: &Args) -> linkpulse::Result<Settings> {
    let settings = args.apply(Settings::load(args.config.as_deref())?);
    settings.validate()?;
    Ok(settings)
}

fn exit_with_error(error_msg: &str) -> ! {
    log::error!("{}", error_msg);
    eprintln!("{}", error_msg);
    std::process::exit(1);
}
