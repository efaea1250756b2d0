use super::{event, Plugin};
use crate::{
    config::CommandConfig,
    process::{run_with_output, split_commandline},
};
use std::time::Duration;

/// First line of the output, without trailing whitespace.
fn first_line(output: &str) -> &str {
    output.lines().next().unwrap_or("").trim_end()
}

/// Shows the first line of a command's output. The command is re-run every
/// interval and when the segment is clicked, with the button number in the
/// `BUTTON` environment variable.
pub struct Command {
    argv: Vec<String>,
    interval: Duration,
    button: Option<u8>,
}

impl Command {
    pub fn new(config: &CommandConfig) -> Self {
        let argv = split_commandline(&config.command);
        if argv.is_empty() {
            log::warn!("command: no command configured");
        }
        Self {
            argv,
            interval: Duration::from_millis(config.interval.max(1)),
            button: None,
        }
    }
}

impl Plugin for Command {
    fn name(&self) -> &str {
        "command"
    }

    fn interval(&self) -> Option<Duration> {
        Some(self.interval)
    }

    fn update(&mut self) -> Option<String> {
        if self.argv.is_empty() {
            return Some(String::new());
        }
        let env: Vec<(&str, String)> = self
            .button
            .take()
            .map(|button| ("BUTTON", button.to_string()))
            .into_iter()
            .collect();
        match run_with_output(&self.argv, &env) {
            Ok(output) => Some(first_line(&output).to_string()),
            Err(error) => {
                log::error!("command: failed to run '{}': {error}", self.argv[0]);
                None
            }
        }
    }

    fn event(&mut self, id: u8) -> bool {
        if event::is_button(id) {
            self.button = Some(id);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(line: &str) -> Command {
        Command::new(&CommandConfig {
            command: line.to_string(),
            ..CommandConfig::default()
        })
    }

    #[test]
    fn shows_first_line() {
        assert_eq!(first_line("42%  \nsecond"), "42%");
        assert_eq!(first_line(""), "");
        let mut plugin = command("printf 'one\\ntwo'");
        assert_eq!(plugin.update().as_deref(), Some("one"));
    }

    #[test]
    fn click_passes_button() {
        let mut plugin = command("sh -c 'echo \"b=$BUTTON\"'");
        assert_eq!(plugin.update().as_deref(), Some("b="));
        assert!(plugin.event(event::BUTTON_RIGHT));
        assert!(!plugin.event(event::ROOT_PROPERTY));
        assert_eq!(plugin.update().as_deref(), Some("b=3"));
        assert_eq!(plugin.update().as_deref(), Some("b="));
    }

    #[test]
    fn empty_command_shows_nothing() {
        let mut plugin = command("");
        assert_eq!(plugin.update().as_deref(), Some(""));
    }

    #[test]
    fn missing_program_keeps_text() {
        let mut plugin = command("/nonexistent/excalibar-test-program");
        assert_eq!(plugin.update(), None);
    }
}
