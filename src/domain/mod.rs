pub mod budget;
pub mod category;
pub mod common;
pub mod transaction;

pub use budget::Budget;
pub use category::Category;
pub use common::{
    find_by_id, find_by_name, parse_amount, parse_date, position_by_id, validate_amount,
    EntryKind, Identifiable, NamedEntity,
};
pub use transaction::{NewTransaction, Transaction};
