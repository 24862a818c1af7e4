//! Sizing domain - how much of a balance to trade

mod trade_sizer;

pub use trade_sizer::{TradeAmount, TradeSizer};
