use crate::{
    bar::Position,
    cfg::{
        error::{value_error, Error},
        parse::{Parser, Value},
        parsed_config,
        scanner::Scanner,
    },
    color::Color,
};
use pango::FontDescription;
use std::{io, path::Path};

/// Window the bar is stacked relative to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RootWindow {
    /// Plain X root window.
    Root,
    /// The container window created by i3.
    I3,
}

impl Value for RootWindow {
    fn parse(scanner: &mut Scanner) -> Result<Self, Error> {
        let name = String::parse(scanner)?;
        match name.to_ascii_lowercase().as_str() {
            "root" => Ok(Self::Root),
            "i3" => Ok(Self::I3),
            _ => Err(value_error(
                "invalid root window",
                "expected `'root'` or `'i3'`",
            )),
        }
    }
}

impl Value for Position {
    fn parse(scanner: &mut Scanner) -> Result<Self, Error> {
        let word = scanner.some(|c| c.is_alphabetic());
        match word.as_str().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            _ => Err(word.as_error("invalid position", "expected `top` or `bottom`")),
        }
    }
}

parsed_config! {
    sections => {
        BarConfig {
            width: u16 = "0",
            height: u16 = "24",
            x: i32 = "0",
            position: Position = "top",
            root_win: RootWindow = "'root'",
            transparent: bool = "true",
            background: Color = "#00000080",
            foreground: Color = "#FFFFFF",
            font: FontDescription = "'sans 11'",
            padding: u16 = "8",
            gap: u16 = "16",
            plugins: Vec<String> = "['title', 'clock']",
        }

        ClockConfig {
            format: String = "'%H:%M'",
            alt_format: String = "'%a %b %e %Y'",
            interval: u64 = "1000",
        }

        TitleConfig {
            max_chars: usize = "80",
        }

        TextConfig {
            text: String = "''",
        }

        CommandConfig {
            command: String = "''",
            interval: u64 = "5000",
        }
    }
    document => Config {
        bar: BarConfig => "bar",
        clock: ClockConfig => "clock",
        title: TitleConfig => "title",
        text: TextConfig => "text",
        command: CommandConfig => "command",
    }
}

impl Config {
    /// Parses the config source. On error the report is returned, rendered for
    /// a terminal if `color` is set.
    pub fn parse(parser: &Parser, color: bool) -> Result<Self, String> {
        let mut config = Self::default();
        match parser.parse(&mut config) {
            Ok(()) => Ok(config),
            Err(error) => {
                log::error!(
                    "Config error:\n{}",
                    error.render(parser.path(), parser.source(), false)
                );
                Err(error.render(parser.path(), parser.source(), color))
            }
        }
    }

    /// Loads the config file at `path`. A missing file yields the default
    /// configuration.
    pub fn load(path: &Path) -> Result<Self, String> {
        match Parser::new(path) {
            Ok(parser) => {
                log::info!("Loading config from {}", path.display());
                Self::parse(&parser, true)
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(error) => Err(format!("{}: {error}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Config, String> {
        Config::parse(&Parser::from_source("test.cfg", source.to_string()), false)
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.bar.width, 0);
        assert_eq!(config.bar.height, 24);
        assert_eq!(config.bar.position, Position::Top);
        assert_eq!(config.bar.root_win, RootWindow::Root);
        assert!(config.bar.transparent);
        assert_eq!(config.bar.background, Color::new(0.0, 0.0, 0.0, 128.0 / 255.0));
        assert_eq!(config.bar.plugins, vec!["title", "clock"]);
        assert_eq!(config.clock.format, "%H:%M");
        assert_eq!(config.clock.interval, 1000);
        assert_eq!(config.title.max_chars, 80);
        assert_eq!(config.text.text, "");
        assert_eq!(config.command.interval, 5000);
    }

    #[test]
    fn empty_source_gives_defaults() {
        let config = parse("# nothing here\n\n").unwrap();
        assert_eq!(config.bar.height, 24);
    }

    #[test]
    fn sections_and_comments() {
        let config = parse(
            "# excalibar\n\
             [bar]\n\
             height = 30   # pixels\n\
             position = bottom\n\
             root_win = 'i3'\n\
             x = -10\n\
             plugins = [\n  'text',\n  'clock'\n]\n\
             \n\
             [ clock ]\n\
             format='%T'\n\
             [text]\n\
             text = \"hello # not a comment\"",
        )
        .unwrap();
        assert_eq!(config.bar.height, 30);
        assert_eq!(config.bar.position, Position::Bottom);
        assert_eq!(config.bar.root_win, RootWindow::I3);
        assert_eq!(config.bar.x, -10);
        assert_eq!(config.bar.plugins, vec!["text", "clock"]);
        assert_eq!(config.clock.format, "%T");
        assert_eq!(config.text.text, "hello # not a comment");
    }

    #[test]
    fn unknown_field_suggests_similar() {
        let error = parse("[bar]\nheigth = 30\n").unwrap_err();
        assert!(error.contains("no field `heigth` in section `bar`"));
        assert!(error.contains("`height`"));
    }

    #[test]
    fn unknown_section_suggests_similar() {
        let error = parse("[clok]\n").unwrap_err();
        assert!(error.contains("no such section: `clok`"));
        assert!(error.contains("`clock`"));
    }

    #[test]
    fn assignment_outside_section() {
        let error = parse("height = 30\n").unwrap_err();
        assert!(error.contains("assignment outside section"));
    }

    #[test]
    fn invalid_values() {
        assert!(parse("[bar]\nheight = tall\n").is_err());
        assert!(parse("[bar]\nposition = left\n").is_err());
        assert!(parse("[bar]\nroot_win = 'screen'\n").is_err());
        assert!(parse("[bar]\nbackground = #123\n").is_err());
        assert!(parse("[bar]\nheight = 30 40\n").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load(Path::new("/nonexistent/excalibar/excalibar.cfg")).unwrap();
        assert_eq!(config.bar.gap, 16);
    }
}
