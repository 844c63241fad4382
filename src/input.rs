use std::io::{self, BufRead, Write};

use crate::error::{AnnotateError, Result};
use crate::session::InputChannel;

pub struct LineInput<R> {
    reader: R,
    prompt: Option<String>,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            prompt: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

impl LineInput<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> InputChannel for LineInput<R> {
    fn read_line(&mut self) -> Result<String> {
        if let Some(prompt) = &self.prompt {
            let mut out = io::stdout().lock();
            writeln!(out, "{prompt}")?;
            out.flush()?;
        }

        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .map_err(|e| AnnotateError::InputUnavailable(e.to_string()))?;
        if n == 0 {
            return Err(AnnotateError::InputUnavailable("end of input".into()));
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}
