//! Idle-screen tip carousel.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TipRotation {
    tips:  Vec<String>,
    index: usize,
}

impl TipRotation {
    pub fn new(tips: Vec<String>) -> Self {
        Self { tips, index: 0 }
    }

    pub fn current(&self) -> Option<&str> {
        self.tips.get(self.index).map(String::as_str)
    }

    pub fn index(&self) -> usize { self.index }
    pub fn len(&self) -> usize   { self.tips.len() }
    pub fn is_empty(&self) -> bool { self.tips.is_empty() }

    /// Step to the next tip, wrapping. Returns the new index.
    /// With no tips the index stays at 0.
    pub fn advance(&mut self) -> usize {
        if !self.tips.is_empty() {
            self.index = (self.index + 1) % self.tips.len();
        }
        self.index
    }

    /// Tips shown so far in this cycle, including the current one.
    pub fn progress(&self) -> usize {
        if self.tips.is_empty() { 0 } else { self.index + 1 }
    }

    pub fn restart(&mut self) {
        self.index = 0;
    }
}
