//! Fixed summarization settings

/// Model used for every summary
pub const SUMMARY_MODEL: &str = "gpt-4";

/// Token cap for the generated summary
pub const SUMMARY_MAX_TOKENS: usize = 500;

/// Sampling temperature for the summary
pub const SUMMARY_TEMPERATURE: f32 = 1.0;

/// Instruction sent ahead of the market data
pub const SYSTEM_PROMPT: &str = "You are a trading guru. Given data on share prices over the past 3 days, write a report of no more than 150 words describing the stocks performance and recommending whether to buy, sell, or hold the stock.";
