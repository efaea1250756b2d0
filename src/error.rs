/// Reports the given message and aborts the program.
pub fn fatal_error(message: String) -> ! {
    log::error!("Error: {}", message.replace('\n', "\n     | "));
    eprintln!("excalibar: {message}");
    std::process::exit(1);
}

pub trait OrFatal<T> {
    fn or_fatal(self);

    fn unwrap_or_fatal(self) -> T;
}

impl<T, E> OrFatal<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn or_fatal(self) {
        if let Err(error) = self {
            fatal_error(format!("{error:#}"))
        }
    }

    fn unwrap_or_fatal(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => fatal_error(format!("{error:#}")),
        }
    }
}

pub trait LogError<T> {
    fn log_error(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> LogError<T> for Result<T, E> {
    /// Turn a result into an option, logging the error if it was one.
    fn log_error(self) -> Option<T> {
        match self {
            Ok(x) => Some(x),
            Err(e) => {
                log::error!("{e}");
                None
            }
        }
    }
}

pub trait LogNone<T> {
    fn log_none(self, msg: &str) -> Option<T>;
}

impl<T> LogNone<T> for Option<T> {
    /// Logs the given error message if the option is `None`.
    fn log_none(self, msg: &str) -> Self {
        if self.is_none() {
            log::error!("{msg}");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_error_maps_to_option() {
        let ok: Result<u8, String> = Ok(3);
        let err: Result<u8, String> = Err("nope".to_string());
        assert_eq!(ok.log_error(), Some(3));
        assert_eq!(err.log_error(), None);
    }

    #[test]
    fn log_none_passes_value_through() {
        assert_eq!(Some(5).log_none("unused"), Some(5));
        assert_eq!(None::<u8>.log_none("missing"), None);
    }
}
