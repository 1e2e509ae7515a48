//! Member side of the attendance code lifecycle: the six-cell code input and
//! the submit cycle around it.

use thiserror::Error;

pub const CODE_LENGTH: usize = 6;

/// Six single-digit cells plus the index of the focused cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeInput {
    cells: [Option<char>; CODE_LENGTH],
    focus: usize,
}

impl CodeInput {
    pub fn cells(&self) -> &[Option<char>; CODE_LENGTH] {
        &self.cells
    }

    /// Cell contents as display strings, empty for blank cells.
    pub fn cell_values(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cell| cell.map(String::from).unwrap_or_default())
            .collect()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn set_focus(&mut self, index: usize) {
        self.focus = index.min(CODE_LENGTH - 1);
    }

    /// Put a digit in `index` and move focus to the next cell. Anything other
    /// than `0-9` is rejected and leaves the input untouched.
    pub fn type_digit(&mut self, index: usize, ch: char) -> bool {
        if index >= CODE_LENGTH || !ch.is_ascii_digit() {
            return false;
        }
        self.cells[index] = Some(ch);
        self.focus = (index + 1).min(CODE_LENGTH - 1);
        true
    }

    /// Clear a filled cell, or step back from an empty one without touching
    /// the previous cell's content.
    pub fn backspace(&mut self, index: usize) {
        if index >= CODE_LENGTH {
            return;
        }
        if self.cells[index].is_some() {
            self.cells[index] = None;
            self.focus = index;
        } else if index > 0 {
            self.focus = index - 1;
        }
    }

    /// Paste into the first cell. Up to six characters are spread left to
    /// right; a non-digit clears its position. Cells past the pasted text are
    /// left as they were.
    pub fn paste(&mut self, index: usize, text: &str) -> bool {
        if index != 0 {
            return false;
        }

        let mut pasted = 0;
        for (position, ch) in text.chars().take(CODE_LENGTH).enumerate() {
            self.cells[position] = ch.is_ascii_digit().then_some(ch);
            pasted = position + 1;
        }
        if pasted == 0 {
            return false;
        }

        self.focus = if pasted >= CODE_LENGTH {
            CODE_LENGTH - 1
        } else {
            pasted
        };
        true
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The full code, once every cell is filled.
    pub fn code(&self) -> Option<String> {
        self.cells.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckInPhase {
    #[default]
    Editing,
    Submitting,
    /// Success is on screen; the input resets when the pause ends
    Succeeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckInError {
    #[error("Enter all 6 digits")]
    Incomplete,
    #[error("A check-in is already in progress")]
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckIn {
    input: CodeInput,
    phase: CheckInPhase,
    error: Option<String>,
}

impl CheckIn {
    pub fn input(&self) -> &CodeInput {
        &self.input
    }

    pub fn phase(&self) -> CheckInPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_editable(&self) -> bool {
        self.phase == CheckInPhase::Editing
    }

    pub fn can_submit(&self) -> bool {
        self.submission().is_ok()
    }

    pub fn type_digit(&mut self, index: usize, ch: char) -> bool {
        if !self.is_editable() {
            return false;
        }
        let accepted = self.input.type_digit(index, ch);
        if accepted {
            self.error = None;
        }
        accepted
    }

    pub fn backspace(&mut self, index: usize) {
        if self.is_editable() {
            self.input.backspace(index);
        }
    }

    pub fn paste(&mut self, index: usize, text: &str) -> bool {
        if !self.is_editable() {
            return false;
        }
        let accepted = self.input.paste(index, text);
        if accepted {
            self.error = None;
        }
        accepted
    }

    pub fn set_focus(&mut self, index: usize) {
        if self.is_editable() {
            self.input.set_focus(index);
        }
    }

    /// The code to send, or why nothing may be sent yet. Does not change state.
    pub fn submission(&self) -> Result<String, CheckInError> {
        if !self.is_editable() {
            return Err(CheckInError::Busy);
        }
        self.input.code().ok_or(CheckInError::Incomplete)
    }

    /// Enter `Submitting` and return the code to send.
    pub fn begin_submit(&mut self) -> Result<String, CheckInError> {
        match self.submission() {
            Ok(code) => {
                self.phase = CheckInPhase::Submitting;
                self.error = None;
                Ok(code)
            }
            Err(error) => {
                if error == CheckInError::Incomplete {
                    self.error = Some(error.to_string());
                }
                Err(error)
            }
        }
    }

    pub fn complete_submit(&mut self) {
        if self.phase == CheckInPhase::Submitting {
            self.phase = CheckInPhase::Succeeded;
        }
    }

    /// A failed check-in clears the code at once and refocuses the first cell.
    pub fn fail_submit(&mut self, message: impl Into<String>) {
        if self.phase != CheckInPhase::Submitting {
            return;
        }
        self.input.clear();
        self.phase = CheckInPhase::Editing;
        self.error = Some(message.into());
    }

    /// End of the success pause.
    pub fn finish_success(&mut self) {
        if self.phase == CheckInPhase::Succeeded {
            self.input.clear();
            self.phase = CheckInPhase::Editing;
        }
    }
}
