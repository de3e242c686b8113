use std::fmt;

use twinlens_types::TranslationResult;

/// Bounded cursor over the alternatives of one result
#[derive(Debug, Clone)]
pub struct TranslationPager {
    result: TranslationResult,
    index: usize,
}

/// The alternative currently on display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    pub index: usize,
    pub text: &'a str,
    pub total: usize,
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}: {}", self.index + 1, self.total, self.text)
    }
}

impl TranslationPager {
    pub fn new(result: TranslationResult) -> Self {
        Self { result, index: 0 }
    }

    pub fn result(&self) -> &TranslationResult {
        &self.result
    }

    pub fn source_text(&self) -> &str {
        self.result.source_text()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns false at the last alternative
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.result.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Returns false at the first alternative
    pub fn previous(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Page<'_> {
        Page {
            index: self.index,
            text: &self.result.alternatives()[self.index],
            total: self.result.len(),
        }
    }
}
