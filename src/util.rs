use std::io::Write;
use std::path::PathBuf;
use anyhow::Result;
use crate::error::PackitError;

/// File name of the credential record, created in the working directory by `login`.
pub const AUTH_FILE_NAME: &str = ".packit-auth.json";
/// File name of the local package manifest.
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Returns the path to the credential record in the current working directory.
pub fn get_auth_file() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(AUTH_FILE_NAME))
}

/// Returns the path to the `package.json` in the current working directory.
pub fn get_manifest_file() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(MANIFEST_FILE_NAME))
}

/// Reads one line from stdin after printing `message`, falling back to
/// `default` on empty input. EOF during the prompt aborts the command.
pub fn prompt_line(message: &str, default: &str) -> Result<String> {
    print!("{} ({}) ", message, default);
    std::io::stdout().flush()?;
    let mut input = String::new();
    let n = std::io::stdin().read_line(&mut input)?;
    if n == 0 {
        return Err(PackitError::Aborted.into());
    }
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Ok(default.to_string())
    }
    else {
        Ok(trimmed.to_string())
    }
}

/// Asks a yes/no question, defaulting to no. EOF aborts the command.
pub fn prompt_confirm(message: &str) -> Result<bool> {
    print!("{} [y/N] ", message);
    std::io::stdout().flush()?;
    let mut input = String::new();
    let n = std::io::stdin().read_line(&mut input)?;
    if n == 0 {
        return Err(PackitError::Aborted.into());
    }
    let answer = input.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Lets the user pick one entry out of `choices` by number.
/// Keeps asking until the input is a valid index; EOF aborts.
pub fn prompt_select(message: &str, choices: &[String]) -> Result<String> {
    println!("{}", message);
    for (i, choice) in choices.iter().enumerate() {
        println!("  {}) {}", i + 1, choice);
    }
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut input = String::new();
        let n = std::io::stdin().read_line(&mut input)?;
        if n == 0 {
            return Err(PackitError::Aborted.into());
        }
        if let Ok(index) = input.trim().parse::<usize>() {
            if index >= 1 && index <= choices.len() {
                return Ok(choices[index - 1].clone());
            }
        }
        println!("Please enter a number between 1 and {}", choices.len());
    }
}
