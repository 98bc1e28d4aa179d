/// Single-slot store for the last yanked or deleted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Register {
    content: String,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot. Last write wins.
    pub fn store(&mut self, text: impl Into<String>) {
        self.content = text.into();
    }

    pub fn get(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut reg = Register::new();
        assert!(reg.is_empty());
        reg.store("first");
        reg.store(String::from("second"));
        assert_eq!(reg.get(), "second");
    }
}
