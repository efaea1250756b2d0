use std::{
    io::{Error, ErrorKind, Result},
    process::{Command, Stdio},
};

/// Splits a commandline into its elements. Strings are delimited by either
/// `'` or `"`, a `\` makes the next character literal except inside `'...'`.
pub fn split_commandline(commandline: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut elem = String::new();
    let mut in_elem = false;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for c in commandline.chars() {
        if escaped {
            elem.push(c);
            escaped = false;
            continue;
        }
        match c {
            _ if quote == Some(c) => quote = None,
            '\\' if quote != Some('\'') => {
                escaped = true;
                in_elem = true;
            }
            '"' | '\'' if quote.is_none() => {
                quote = Some(c);
                in_elem = true;
            }
            ' ' | '\t' if quote.is_none() => {
                if in_elem {
                    result.push(std::mem::take(&mut elem));
                    in_elem = false;
                }
            }
            _ => {
                elem.push(c);
                in_elem = true;
            }
        }
    }
    if in_elem {
        result.push(elem);
    }
    result
}

/// Runs the command and waits for it, returning its standard output.
/// `env` is added to the environment of the process.
pub fn run_with_output(argv: &[String], env: &[(&str, String)]) -> Result<String> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "empty command"))?;
    let output = Command::new(program)
        .args(args)
        .envs(env.iter().map(|(k, v)| (*k, v.as_str())))
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()?;
    if !output.status.success() {
        log::debug!("{program} exited with {}", output.status);
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain_words() {
        assert_eq!(split_commandline("date  +%s"), vec!["date", "+%s"]);
        assert!(split_commandline("   ").is_empty());
    }

    #[test]
    fn split_quoted() {
        assert_eq!(
            split_commandline("sh -c 'echo \"hi there\"'"),
            vec!["sh", "-c", "echo \"hi there\""]
        );
        assert_eq!(split_commandline("a '' b"), vec!["a", "", "b"]);
        assert_eq!(split_commandline("pre'fix suf'fix"), vec!["prefix suffix"]);
        assert_eq!(split_commandline("printf 'a\\nb'"), vec!["printf", "a\\nb"]);
        assert_eq!(split_commandline("echo \"a\\\"b\""), vec!["echo", "a\"b"]);
    }

    #[test]
    fn split_escaped() {
        assert_eq!(split_commandline("a\\ b c"), vec!["a b", "c"]);
        assert_eq!(split_commandline("\\'x"), vec!["'x"]);
    }

    #[test]
    fn run_captures_stdout_and_env() {
        let argv = split_commandline("sh -c 'printf %s \"$BUTTON\"'");
        let output = run_with_output(&argv, &[("BUTTON", "3".to_string())]).unwrap();
        assert_eq!(output, "3");
    }

    #[test]
    fn run_empty_command_fails() {
        assert!(run_with_output(&[], &[]).is_err());
    }
}
