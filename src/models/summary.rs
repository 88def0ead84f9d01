use rust_decimal::Decimal;

use super::Month;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: Month,
    pub income: Decimal,
    pub expenses: Decimal,
}

impl MonthSummary {
    pub fn balance(&self) -> Decimal {
        self.income - self.expenses
    }

    pub fn is_positive(&self) -> bool {
        self.balance() >= Decimal::ZERO
    }
}
