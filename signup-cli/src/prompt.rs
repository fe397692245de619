//! Line-based prompts for `--interactive`.

use std::io::Write;

use anyhow::Result;
use signup_form::prelude::*;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

pub struct Prompter<R> {
    lines: tokio::io::Lines<R>,
}

impl Prompter<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Prompter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Ask for one field. Returns `None` once input is exhausted.
    pub async fn ask(&mut self, field: FieldName, current: &str) -> Result<Option<String>> {
        let mut stdout = std::io::stdout();
        if current.is_empty() {
            write!(stdout, "{} [{}]: ", field.label(), field.placeholder())?;
        } else {
            write!(stdout, "{} [{}]: ", field.label(), current)?;
        }
        stdout.flush()?;

        let Some(line) = self.lines.next_line().await? else {
            return Ok(None);
        };
        let line = line.trim_end_matches('\r');
        // Enter keeps what is already there.
        if line.is_empty() && !current.is_empty() {
            return Ok(Some(current.to_string()));
        }
        Ok(Some(line.to_string()))
    }

    /// Prompt for each of `fields`, writing answers into the form.
    ///
    /// Returns `false` if input ran out before every field was answered.
    pub async fn fill<A: UserApi>(
        &mut self,
        form: &SignupForm<A>,
        fields: &[FieldName],
    ) -> Result<bool> {
        for &field in fields {
            let current = form.field(field).value();
            match self.ask(field, &current).await? {
                Some(value) => form.on_field_change(field, value)?,
                None => return Ok(false),
            }
        }
        Ok(true)
    }
}

/// Fields still empty, in render order. `photo` counts as filled when a
/// file is attached.
pub fn missing_fields<A: UserApi>(form: &SignupForm<A>) -> Vec<FieldName> {
    let draft = form.draft();
    FieldName::ALL
        .into_iter()
        .filter(|&field| draft.get(field).is_empty())
        .filter(|&field| !(field == FieldName::Photo && form.attachment().is_some()))
        .collect()
}
