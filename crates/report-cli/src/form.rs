//! Ticker collection form
//!
//! Holds the ordered list of tickers for one session. Tickers can only be
//! appended: there is no removal, editing, deduplication or reset.

use comfy_table::{Attribute, Cell, Color, Table};

/// Shortest accepted input, in characters
pub const MIN_TICKER_LEN: usize = 3;

/// Label shown before any invalid submission
pub const PROMPT_LABEL: &str = "Add stock tickers below to get a stock predictions report.";

/// Label shown after an invalid submission
pub const VALIDATION_MESSAGE: &str = "You must add at least one ticker. A ticker is a 3 letter or more code for a stock. E.g TSLA for Tesla.";

/// Visual state of the form label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelState {
    Prompt,
    /// Rendered red
    Invalid,
}

/// Outcome of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Ticker was uppercased and appended
    Accepted(String),
    /// Input too short; list unchanged
    Rejected,
}

/// Session-local ticker list plus its label
#[derive(Debug, Clone)]
pub struct TickerForm {
    tickers: Vec<String>,
    label: LabelState,
}

impl Default for TickerForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TickerForm {
    pub fn new() -> Self {
        Self {
            tickers: Vec::new(),
            label: LabelState::Prompt,
        }
    }

    /// Submit one input value
    ///
    /// Values of two characters or fewer are rejected and switch the label to
    /// its validation message. Once shown, the message stays.
    pub fn submit(&mut self, input: &str) -> Submission {
        if input.chars().count() < MIN_TICKER_LEN {
            self.label = LabelState::Invalid;
            return Submission::Rejected;
        }

        let ticker = input.to_uppercase();
        self.tickers.push(ticker.clone());
        Submission::Accepted(ticker)
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Report generation is enabled once a ticker was accepted
    pub fn can_generate(&self) -> bool {
        !self.tickers.is_empty()
    }

    pub fn label_state(&self) -> LabelState {
        self.label
    }

    pub fn label_text(&self) -> &'static str {
        match self.label {
            LabelState::Prompt => PROMPT_LABEL,
            LabelState::Invalid => VALIDATION_MESSAGE,
        }
    }

    /// Render the label and every ticker tag
    pub fn render(&self) -> Table {
        let mut label = Cell::new(self.label_text());
        if self.label_state() == LabelState::Invalid {
            label = label.fg(Color::Red);
        }

        let mut table = Table::new();
        table.set_header(vec![label]);
        for ticker in &self.tickers {
            table.add_row(vec![Cell::new(ticker).add_attribute(Attribute::Bold)]);
        }
        table
    }
}
