use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use typespeed::{
    app::{App, Flow, Settings},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
};

/// typing speed test on generated pseudo-sentences
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of words to use in test [default: 50, or the saved config]
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// number of seconds before the test ends [default: 60, or the saved config]
    #[clap(short = 's', long)]
    number_of_secs: Option<u64>,

    /// line-delimited word list to draw words from instead of the bundled one
    #[clap(long)]
    words_file: Option<PathBuf>,

    /// persist the resolved settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Flags given on the command line win over the config file
    fn resolve(&self, cfg: &Config) -> Settings {
        let mut settings = Settings::from(cfg);
        if let Some(words) = self.number_of_words {
            settings.number_of_words = words;
        }
        if let Some(secs) = self.number_of_secs {
            settings.duration_secs = secs;
        }
        if let Some(path) = &self.words_file {
            settings.words_file = Some(path.clone());
        }
        settings
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = match AppDirs::log_dir().map(|dir| logging::init(&dir)).transpose() {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("warning: logging disabled: {err}");
            None
        }
    };

    let store = FileConfigStore::new();
    let settings = cli.resolve(&store.load());
    if cli.save_config {
        store.save(&Config::from(&settings))?;
        tracing::info!(path = %store.path().display(), "saved config");
    }

    // the word list must load before the terminal is taken over
    let mut app = App::from_settings(settings)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match app.on_event(runner.step()) {
            Flow::Continue => {}
            Flow::Restarted => runner.reset_ticks(),
            Flow::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["typespeed"]);

        assert_eq!(cli.number_of_words, None);
        assert_eq!(cli.number_of_secs, None);
        assert_eq!(cli.words_file, None);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_number_of_words() {
        let cli = Cli::parse_from(["typespeed", "-w", "25"]);
        assert_eq!(cli.number_of_words, Some(25));

        let cli = Cli::parse_from(["typespeed", "--number-of-words", "50"]);
        assert_eq!(cli.number_of_words, Some(50));
    }

    #[test]
    fn test_cli_number_of_secs() {
        let cli = Cli::parse_from(["typespeed", "-s", "30"]);
        assert_eq!(cli.number_of_secs, Some(30));

        let cli = Cli::parse_from(["typespeed", "--number-of-secs", "120"]);
        assert_eq!(cli.number_of_secs, Some(120));
    }

    #[test]
    fn test_cli_words_file() {
        let cli = Cli::parse_from(["typespeed", "--words-file", "words.txt"]);
        assert_eq!(cli.words_file, Some(PathBuf::from("words.txt")));
    }

    #[test]
    fn test_cli_rejects_negative_word_count() {
        assert!(Cli::try_parse_from(["typespeed", "-w", "-3"]).is_err());
    }

    #[test]
    fn test_resolve_uses_config_when_flags_absent() {
        let cli = Cli::parse_from(["typespeed"]);
        let cfg = Config {
            number_of_words: 10,
            number_of_secs: 20,
            words_file: Some(PathBuf::from("mine.txt")),
        };

        let settings = cli.resolve(&cfg);

        assert_eq!(settings.number_of_words, 10);
        assert_eq!(settings.duration_secs, 20);
        assert_eq!(settings.words_file, Some(PathBuf::from("mine.txt")));
    }

    #[test]
    fn test_resolve_flags_override_config() {
        let cli = Cli::parse_from(["typespeed", "-w", "5", "-s", "15"]);

        let settings = cli.resolve(&Config::default());

        assert_eq!(settings.number_of_words, 5);
        assert_eq!(settings.duration_secs, 15);
        assert_eq!(settings.words_file, None);
    }

    #[test]
    fn test_cli_command_is_valid() {
        Cli::command().debug_assert();
    }
}
