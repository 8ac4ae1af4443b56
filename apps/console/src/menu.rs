//! # Main Menu
//!
//! Menu codes and the text shown before every choice.

use std::fmt;
use std::str::FromStr;

use crate::error::ConsoleError;

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCode {
    UpdateBook,
    ListBooksByGenre,
    ListBooksByAuthor,
    UpdateCustomer,
    PurchaseHistory,
    ProcessSale,
    RevenueByGenre,
    SalesReport,
    RevenueReport,
    Exit,
}

impl MenuCode {
    /// Display order, matching the numeric codes.
    pub const ALL: [MenuCode; 10] = [
        MenuCode::UpdateBook,
        MenuCode::ListBooksByGenre,
        MenuCode::ListBooksByAuthor,
        MenuCode::UpdateCustomer,
        MenuCode::PurchaseHistory,
        MenuCode::ProcessSale,
        MenuCode::RevenueByGenre,
        MenuCode::SalesReport,
        MenuCode::RevenueReport,
        MenuCode::Exit,
    ];

    pub fn code(self) -> u8 {
        match self {
            MenuCode::UpdateBook => 1,
            MenuCode::ListBooksByGenre => 2,
            MenuCode::ListBooksByAuthor => 3,
            MenuCode::UpdateCustomer => 4,
            MenuCode::PurchaseHistory => 5,
            MenuCode::ProcessSale => 6,
            MenuCode::RevenueByGenre => 7,
            MenuCode::SalesReport => 8,
            MenuCode::RevenueReport => 9,
            MenuCode::Exit => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuCode::UpdateBook => "Update Book Details",
            MenuCode::ListBooksByGenre => "List Books by Genre",
            MenuCode::ListBooksByAuthor => "List Books by Author",
            MenuCode::UpdateCustomer => "Update Customer Information",
            MenuCode::PurchaseHistory => "View Customer's Purchase History",
            MenuCode::ProcessSale => "Process New Sale",
            MenuCode::RevenueByGenre => "Calculate Total Revenue by Genre",
            MenuCode::SalesReport => "Generate Sales Report",
            MenuCode::RevenueReport => "Generate Revenue Report by Genre",
            MenuCode::Exit => "Exit",
        }
    }
}

impl fmt::Display for MenuCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.code(), self.label())
    }
}

/// Parses a typed choice. Surrounding whitespace is ignored; the rest must
/// be exactly the printed code, so `+8` and `01` are rejected.
impl FromStr for MenuCode {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        MenuCode::ALL
            .into_iter()
            .find(|m| m.code().to_string() == text)
            .ok_or_else(ConsoleError::invalid_choice)
    }
}

/// The lines printed before each choice.
pub fn menu_lines() -> Vec<String> {
    let mut lines = Vec::with_capacity(MenuCode::ALL.len() + 2);
    lines.push("Choose an option:".to_string());
    lines.extend(MenuCode::ALL.iter().map(|m| m.to_string()));
    lines.push(String::new());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::INVALID_CHOICE_MESSAGE;

    #[test]
    fn test_parse_every_code() {
        for menu in MenuCode::ALL {
            let parsed: MenuCode = format!(" {} \n", menu.code()).parse().unwrap();
            assert_eq!(parsed, menu);
        }
    }

    #[test]
    fn test_unknown_choice() {
        for input in ["", "10", "-1", "abc", "1.0", "+8", "01", "08", "00", "1 2"] {
            let err = input.parse::<MenuCode>().unwrap_err();
            assert_eq!(err.message, INVALID_CHOICE_MESSAGE);
        }
    }

    #[test]
    fn test_menu_text() {
        let lines = menu_lines();
        assert_eq!(lines[0], "Choose an option:");
        assert_eq!(lines[1], "1. Update Book Details");
        assert_eq!(lines[10], "0. Exit");
        assert_eq!(lines.len(), 12);
    }
}
