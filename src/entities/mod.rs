//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities mirror the backend tables one to one.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod category;
pub mod expense;
pub mod fixed_expense;
pub mod fixed_expense_check;
pub mod household;
pub mod investment;
pub mod investment_history;
pub mod monthly_income;
pub mod reserve;
pub mod reserve_history;
pub mod user;

// Re-export specific types to avoid conflicts
pub use category::{Entity as Category, Model as CategoryModel};
pub use expense::{Entity as Expense, Model as ExpenseModel};
pub use fixed_expense::{Entity as FixedExpense, Model as FixedExpenseModel};
pub use fixed_expense_check::{Entity as FixedExpenseCheck, Model as FixedExpenseCheckModel};
pub use household::{Entity as Household, Model as HouseholdModel};
pub use investment::{Entity as Investment, Model as InvestmentModel};
pub use investment_history::{Entity as InvestmentHistory, Model as InvestmentHistoryModel};
pub use monthly_income::{Entity as MonthlyIncome, Model as MonthlyIncomeModel};
pub use reserve::{Entity as Reserve, Model as ReserveModel};
pub use reserve_history::{Entity as ReserveHistory, Model as ReserveHistoryModel};
pub use user::{Entity as User, Model as UserModel};
