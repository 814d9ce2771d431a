use std::io::{self, BufRead, Write};

use ip4t_dashboard::command::HELP;
use ip4t_dashboard::report::banner;
use ip4t_dashboard::{logging, run_analysis, show_tree, Command, DashboardConfig, Session};
use tracing::error;

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("{}", err);
    }

    let config = match DashboardConfig::load() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "cannot load configuration");
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    let mut session = Session::new();

    println!("{}", banner(&config));
    println!("{}", HELP);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                error!(error = %err, "cannot read command");
                break;
            }
            None => break,
        };

        match Command::parse(&line) {
            Command::Run => match run_analysis(&config, &mut session) {
                Ok(report) => println!("{}", report),
                Err(err) => println!("error: {}", err),
            },
            Command::Tree(index) => match show_tree(&session, index) {
                Ok(text) => println!("{}", text),
                Err(err) => println!("warning: {}", err),
            },
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Empty => {}
            Command::Invalid(reason) => println!("{}", reason),
        }
    }
}
