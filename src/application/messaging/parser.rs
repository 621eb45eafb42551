//! Command parser - turns one line of chat text into a typed Command
//!
//! Parsing is total: input that matches no rule becomes `Command::Unknown`.
//! Rules are tried in a fixed priority order and the first match wins, so
//! `LIST MOVE /a /b` is a LIST of the folder "MOVE /a /b".

use crate::domain::entities::Command;

/// Parse one line of user text.
pub fn parse(text: &str) -> Command {
    let text = text.trim();

    if let Some(arg) = remainder_arg(text, "LIST") {
        return Command::List { folder_path: arg };
    }
    if let Some(arg) = remainder_arg(text, "DELETE") {
        return Command::Delete { file_path: arg };
    }
    if let Some((source, dest)) = two_token_args(text, "MOVE") {
        return Command::Move { source_path: source, dest_path: dest };
    }
    if let Some(arg) = remainder_arg(text, "SUMMARY") {
        return Command::Summary { folder_path: arg };
    }
    if let Some((current, new)) = two_token_args(text, "RENAME") {
        return Command::Rename { current_name: current, new_name: new };
    }
    if let Some((folder, name)) = two_token_args(text, "UPLOAD") {
        return Command::UploadText { folder_path: folder, file_name: name };
    }
    if text.eq_ignore_ascii_case("HELP") {
        return Command::Help;
    }

    Command::Unknown { raw: text.to_string() }
}

/// Match `keyword <remainder>`, taking the rest of the line as a single
/// argument that may itself contain spaces. A bare keyword does not match.
fn remainder_arg(text: &str, keyword: &str) -> Option<String> {
    let (first, rest) = split_first_token(text)?;
    if !first.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_string())
}

/// Match `keyword <tok1> <tok2>` with exactly two whitespace-delimited
/// tokens. A third token invalidates the rule so the input falls through.
/// No quoting syntax exists, so these arguments cannot contain spaces.
fn two_token_args(text: &str, keyword: &str) -> Option<(String, String)> {
    let (first, rest) = split_first_token(text)?;
    if !first.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let mut tokens = rest.split_whitespace();
    let a = tokens.next()?;
    let b = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    Some((a.to_string(), b.to_string()))
}

fn split_first_token(text: &str) -> Option<(&str, &str)> {
    let mut parts = text.splitn(2, char::is_whitespace);
    let first = parts.next().filter(|s| !s.is_empty())?;
    Some((first, parts.next().unwrap_or("")))
}
