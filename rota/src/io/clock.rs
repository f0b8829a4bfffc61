//! Clock collaborator: what day it is, as the string stored on draws.

use chrono::Local;

pub trait Clock {
    fn today(&self) -> String;
}

/// Local calendar day rendered with a chrono strftime format.
#[derive(Debug, Clone)]
pub struct SystemClock {
    format: String,
}

impl SystemClock {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new("%Y-%m-%d")
    }
}

impl Clock for SystemClock {
    fn today(&self) -> String {
        Local::now().date_naive().format(&self.format).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_is_iso_date() {
        let today = SystemClock::default().today();
        assert_eq!(today.len(), 10);
        assert_eq!(today.as_bytes()[4], b'-');
        assert_eq!(today.as_bytes()[7], b'-');
    }
}
