//! Prompt-line grammar for the terminal front end

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Look up weather for a free-text location
    Query(String),
    /// Re-show current conditions for the current snapshot
    Current,
    TwelveHour,
    FortyEightHour,
    SevenDay,
    Help,
    Quit,
    /// Blank line
    Empty,
    /// Starts with `:` but is not a known command
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        let Some(name) = line.strip_prefix(':') else {
            return Command::Query(line.to_string());
        };

        match name.trim().to_lowercase().as_str() {
            "now" => Command::Current,
            "12" => Command::TwelveHour,
            "48" => Command::FortyEightHour,
            "7" => Command::SevenDay,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

pub const HELP: &str = "\
Enter a location as town, state/region, country (e.g. Cheyenne, WY, US).

Commands:
  :now   current conditions and air quality
  :12    12 hour forecast
  :48    48 hour forecast
  :7     7 day forecast
  :help  this message
  :quit  exit";
