//! Consumable Token List
//!
//! The parser's working state: the whitespace-split tokens of the input
//! plus a consumed flag per token. Each matcher pass walks the unconsumed
//! tokens, interprets the ones it recognizes, and marks them consumed so
//! later passes never see them. This keeps pass precedence auditable and
//! testable in isolation.

/// Token list with per-token consumption state.
#[derive(Debug)]
pub struct TokenList {
    tokens: Vec<String>,
    consumed: Vec<bool>,
}

impl TokenList {
    /// Split input on whitespace.
    pub fn new(text: &str) -> Self {
        let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let consumed = vec![false; tokens.len()];
        Self { tokens, consumed }
    }

    /// Whether the list started empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token at `index`, consumed or not.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// The token at `index` if still unconsumed.
    pub fn get_unconsumed(&self, index: usize) -> Option<&str> {
        if self.consumed.get(index).copied().unwrap_or(true) {
            None
        } else {
            self.get(index)
        }
    }

    /// Mark a token consumed.
    pub fn consume(&mut self, index: usize) {
        if let Some(flag) = self.consumed.get_mut(index) {
            *flag = true;
        }
    }

    /// Unconsumed `(index, token)` pairs in order.
    pub fn remaining(&self) -> Vec<(usize, &str)> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.consumed[*i])
            .map(|(i, t)| (i, t.as_str()))
            .collect()
    }

    /// Leftover tokens no pass interpreted, for diagnostics.
    pub fn leftovers(&self) -> Vec<&str> {
        self.remaining().into_iter().map(|(_, t)| t).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        let tokens = TokenList::new("AAPL  Jun26\t240/220 PS");
        assert_eq!(tokens.get(0), Some("AAPL"));
        assert_eq!(tokens.get(3), Some("PS"));
        assert_eq!(tokens.get(4), None);
    }

    #[test]
    fn consume_hides_from_remaining() {
        let mut tokens = TokenList::new("a b c");
        tokens.consume(1);
        assert_eq!(tokens.remaining(), vec![(0, "a"), (2, "c")]);
        assert_eq!(tokens.get_unconsumed(1), None);
        assert_eq!(tokens.get_unconsumed(2), Some("c"));
    }

    #[test]
    fn empty_input() {
        assert!(TokenList::new("   ").is_empty());
    }
}
