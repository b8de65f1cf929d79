use anyhow::Context;
use onecall_weather::cli::{self, Command};
use onecall_weather::config::LoggingConfig;
use onecall_weather::presenter::CurrentConditionsView;
use onecall_weather::{OneCallConfig, Session, WeatherApiClient};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("onecall_weather={}", logging.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

fn main() -> anyhow::Result<()> {
    let config = OneCallConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);
    info!("onecall-weather {}", onecall_weather::VERSION);

    let client = WeatherApiClient::new(&config).context("Failed to build the HTTP client")?;
    let mut session = Session::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{}\n", cli::HELP);

    loop {
        print!("location> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = Command::parse(&line);
        debug!("Command: {:?}", command);

        match &command {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => println!("{}", cli::HELP),
            Command::Unknown(text) => println!("Unknown command {text}. Type :help for help."),
            Command::Query(query) => match session.submit(&client, query) {
                Ok(snapshot) => println!("{}", CurrentConditionsView::new(snapshot)),
                Err(e) => println!("{}", e.user_message()),
            },
            Command::Current | Command::TwelveHour | Command::FortyEightHour | Command::SevenDay => {
                let Some(snapshot) = session.snapshot() else {
                    println!("No weather loaded yet. Enter a location first.");
                    continue;
                };
                match command {
                    Command::TwelveHour => println!("{}", snapshot.twelve_hour_table()),
                    Command::FortyEightHour => println!("{}", snapshot.forty_eight_hour_table()),
                    Command::SevenDay => println!("{}", snapshot.seven_day_table()),
                    _ => println!("{}", CurrentConditionsView::new(snapshot)),
                }
            }
        }
    }

    Ok(())
}
