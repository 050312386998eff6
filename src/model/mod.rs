//! Types that represent the core data model, such as `Transaction` and `Categories`.
mod amount;
mod category;
mod transaction;

pub use amount::{format_currency, Amount, AmountError};
pub use category::Categories;
pub use transaction::{day_start, parse_entry_date, NewTransaction, Transaction, TransactionType};
