//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod chat_message;
pub mod contribution;
pub mod notice;
pub mod personal_expense;
pub mod profile;
pub mod purse_transaction;
pub mod recurring_bill;
pub mod room_expense;

// Re-export specific types to avoid conflicts
pub use chat_message::{Column as ChatMessageColumn, Entity as ChatMessage, Model as ChatMessageModel};
pub use contribution::{
    Column as ContributionColumn, Entity as Contribution, Model as ContributionModel,
};
pub use notice::{Column as NoticeColumn, Entity as Notice, Model as NoticeModel};
pub use personal_expense::{
    Column as PersonalExpenseColumn, Entity as PersonalExpense, Model as PersonalExpenseModel,
};
pub use profile::{Column as ProfileColumn, Entity as Profile, Model as ProfileModel};
pub use purse_transaction::{
    Column as PurseTransactionColumn, Entity as PurseTransaction, Model as PurseTransactionModel,
};
pub use recurring_bill::{
    Column as RecurringBillColumn, Entity as RecurringBill, Model as RecurringBillModel,
};
pub use room_expense::{
    Column as RoomExpenseColumn, Entity as RoomExpense, Model as RoomExpenseModel,
};
