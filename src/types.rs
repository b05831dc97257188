pub const SATS_PER_BTC: u64 = 100_000_000;
pub const MAX_EUR_DP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Sats,
    Eur,
}

impl Field {
    pub fn other(self) -> Self {
        match self {
            Field::Sats => Field::Eur,
            Field::Eur => Field::Sats,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Sats => "sats",
            Field::Eur => "EUR",
        }
    }

    /// Only the EUR field accepts a decimal point.
    pub fn allows_decimal(self) -> bool {
        matches!(self, Field::Eur)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Neutral,
    Success,
    Error,
}
