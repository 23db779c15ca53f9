//! Dashboard view data and pl-PL number formatting.

use serde::Serialize;

use crate::api::dto::{AiTip, ExpenseSummary};

pub const MAX_TIPS: usize = 3;
pub const MSG_EMPTY_WEEK: &str = "Brak danych za ten tydzień.";
pub const MSG_NO_TIPS: &str = "Brak porad do wyświetlenia.";

const NBSP: char = '\u{a0}';

/// Format an amount the way `pl-PL` does with two fraction digits
///
/// Thousands are grouped with a non-breaking space only from five integer
/// digits up (`1234,50` but `12 345,00`), and the decimal mark is a comma.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0,00".to_string();
    }

    let cents = (value.abs() * 100.0).round();
    let fraction = cents % 100.0;
    let integer = format!("{:.0}", (cents - fraction) / 100.0);

    let grouped = if integer.len() > 4 {
        group_thousands(&integer)
    } else {
        integer
    };

    let sign = if value < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{}{},{:02}", sign, grouped, fraction as u8)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(NBSP);
        }
        out.push(ch);
    }
    out
}

/// Weekly summary card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub total_amount: String,
    pub transaction_count: u64,
    /// Replaces the figures when there were no transactions
    pub empty_message: Option<&'static str>,
}

impl From<&ExpenseSummary> for SummaryView {
    fn from(summary: &ExpenseSummary) -> Self {
        Self {
            total_amount: format_amount(summary.total_amount),
            transaction_count: summary.transaction_count,
            empty_message: (summary.transaction_count == 0).then_some(MSG_EMPTY_WEEK),
        }
    }
}

/// AI tips list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipsView {
    pub tips: Vec<String>,
    pub empty_message: Option<&'static str>,
}

impl From<&[AiTip]> for TipsView {
    fn from(tips: &[AiTip]) -> Self {
        Self {
            tips: tips.iter().take(MAX_TIPS).map(|t| t.message.clone()).collect(),
            empty_message: tips.is_empty().then_some(MSG_NO_TIPS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_pl() {
        assert_eq!(format_amount(0.0), "0,00");
        assert_eq!(format_amount(12.5), "12,50");
        assert_eq!(format_amount(1234.5), "1234,50");
        assert_eq!(format_amount(12345.0), "12\u{a0}345,00");
        assert_eq!(format_amount(1234567.891), "1\u{a0}234\u{a0}567,89");
        assert_eq!(format_amount(-99.999), "-100,00");
    }

    #[test]
    fn test_format_amount_beyond_integer_range() {
        assert_eq!(
            format_amount(1e20),
            "100\u{a0}000\u{a0}000\u{a0}000\u{a0}000\u{a0}000\u{a0}000,00"
        );
        assert_eq!(format_amount(f64::NAN), "0,00");
    }

    #[test]
    fn test_empty_week_message() {
        let view = SummaryView::from(&ExpenseSummary {
            total_amount: 0.0,
            transaction_count: 0,
        });
        assert_eq!(view.empty_message, Some("Brak danych za ten tydzień."));

        let view = SummaryView::from(&ExpenseSummary {
            total_amount: 150.25,
            transaction_count: 4,
        });
        assert_eq!(view.empty_message, None);
        assert_eq!(view.total_amount, "150,25");
    }

    #[test]
    fn test_tips_truncated_to_three() {
        let tips: Vec<AiTip> = (1..=5)
            .map(|i| AiTip {
                message: format!("Porada {}", i),
            })
            .collect();
        let view = TipsView::from(tips.as_slice());
        assert_eq!(view.tips, vec!["Porada 1", "Porada 2", "Porada 3"]);
        assert_eq!(view.empty_message, None);

        let view = TipsView::from(&[][..]);
        assert_eq!(view.empty_message, Some("Brak porad do wyświetlenia."));
    }
}
