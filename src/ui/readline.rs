//! Readline wrapper completing command verbs and platform names.

use std::path::PathBuf;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Context, Editor, Helper};

/// Verbs whose first argument is a platform name
const NAME_VERBS: &[&str] = &["deposit", "withdraw", "interest", "set-rate", "history"];

pub struct CommandHelper {
    verbs: Vec<String>,
    platform_names: Vec<String>,
    hinter: HistoryHinter,
}

impl CommandHelper {
    pub fn new(verbs: &[&str]) -> Self {
        Self {
            verbs: verbs.iter().map(|s| s.to_string()).collect(),
            platform_names: Vec::new(),
            hinter: HistoryHinter::default(),
        }
    }

    fn candidates(&self, tokens: &[&str]) -> Vec<String> {
        match tokens.len() {
            1 => self.verbs.clone(),
            2 => {
                let verb = tokens[0].trim_start_matches('/').to_lowercase();
                if NAME_VERBS.contains(&verb.as_str()) {
                    self.platform_names
                        .iter()
                        .map(|n| {
                            if n.contains(char::is_whitespace) {
                                format!("\"{}\"", n)
                            } else {
                                n.clone()
                            }
                        })
                        .collect()
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }
}

impl Helper for CommandHelper {}
impl Validator for CommandHelper {}
impl Highlighter for CommandHelper {}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let before = &line[..pos];
        let mut tokens: Vec<&str> = before.split_whitespace().collect();

        // Treat trailing space as start of a new token
        if before.chars().last().is_some_and(|c| c.is_whitespace()) || tokens.is_empty() {
            tokens.push("");
        }

        let prefix = tokens.last().copied().unwrap_or("");
        let start = pos.saturating_sub(prefix.len());
        let has_leading_slash = tokens.len() == 1 && prefix.starts_with('/');
        let prefix_lower = prefix.trim_start_matches('/').to_lowercase();

        let mut matches: Vec<Pair> = self
            .candidates(&tokens)
            .into_iter()
            .filter(|c| c.to_lowercase().starts_with(&prefix_lower))
            .map(|c| {
                let token = if has_leading_slash {
                    format!("/{}", c)
                } else {
                    c
                };
                let replacement = format!("{} ", token);
                Pair {
                    display: replacement.clone(),
                    replacement,
                }
            })
            .collect();

        matches.sort_by(|a, b| a.replacement.cmp(&b.replacement));
        matches.dedup_by(|a, b| a.replacement == b.replacement);

        Ok((start, matches))
    }
}

/// Thin wrapper over `rustyline::Editor` with preset verbs and history path.
pub struct Readline {
    editor: Editor<CommandHelper, DefaultHistory>,
    history_path: PathBuf,
}

impl Readline {
    pub fn new(verbs: &[&str], history_path: PathBuf) -> anyhow::Result<Self> {
        let config = Config::builder()
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(CommandHelper::new(verbs)));

        let _ = editor.load_history(&history_path);

        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Refresh the platform names offered for completion.
    pub fn set_platform_names<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(helper) = self.editor.helper_mut() {
            helper.platform_names = names.into_iter().map(Into::into).collect();
        }
    }

    pub fn readline(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        let line = self.editor.readline(prompt)?;
        if !line.trim().is_empty() {
            let _ = self.editor.add_history_entry(line.as_str());
            let _ = self.editor.append_history(&self.history_path);
        }
        Ok(line)
    }

    /// Return completions alongside the replacement start index.
    #[cfg(test)]
    pub fn completions_with_start(&self, line: &str) -> Vec<(usize, String)> {
        if let Some(helper) = self.editor.helper() {
            let pos = line.len();
            let history = self.editor.history();
            if let Ok((start, pairs)) = helper.complete(line, pos, &Context::new(history)) {
                return pairs.into_iter().map(|p| (start, p.replacement)).collect();
            }
        }
        Vec::new()
    }
}
