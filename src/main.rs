use std::env;
use std::process::ExitCode;

use clap::Parser;
use currency_exchange_rate::{Cli, FileLog, run};

fn main() -> ExitCode {
    env_logger::init();
    let args = Cli::parse();

    let env_key = env::var("API_KEY").ok();
    let mut log = FileLog::new(args.layout().error_log);
    ExitCode::from(run(&args, env_key.as_deref(), &mut log))
}
