use crate::expense::{Expense, ExpenseData};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Returns the six sample expenses in their display order.
pub fn sample_expenses() -> Vec<Expense> {
    // These ids sit outside the space produced by `UuidGenerator`, and are
    // reserved in the store's issued set anyway.
    let seed: [(&str, &str, Decimal, (i32, u32, u32)); 6] = [
        ("e1", "A pair of shoes", dec!(59.99), (2021, 12, 19)),
        ("e2", "A pair of trousers", dec!(89.29), (2022, 1, 5)),
        ("e3", "Some bananas", dec!(5.99), (2021, 12, 1)),
        ("e4", "A book", dec!(14.99), (2022, 2, 19)),
        ("e5", "Another book", dec!(18.59), (2022, 2, 18)),
        ("e6", "Another book", dec!(18.59), (2023, 2, 26)),
    ];

    seed.iter()
        .filter_map(|&(id, description, amount, (y, m, d))| {
            let date = NaiveDate::from_ymd_opt(y, m, d)?;
            Some(Expense::new(
                id.into(),
                ExpenseData {
                    description: description.to_owned(),
                    amount,
                    date,
                },
            ))
        })
        .collect()
}
