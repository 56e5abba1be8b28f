//! Database configuration module.
//!
//! Handles `SQLite` connection setup and table creation using `SeaORM`.
//! Table creation uses `Schema::create_table_from_entity` so the schema is
//! generated straight from the entity definitions without manual SQL.

use crate::entities::{
    ChatMessage, Contribution, Notice, PersonalExpense, Profile, PurseTransaction, RecurringBill,
    RoomExpense,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Default local database location, overridden by `DATABASE_URL`.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/roomledger.sqlite";

/// Gets the database URL from the `DATABASE_URL` environment variable or
/// returns the default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database described by [`get_database_url`].
///
/// # Errors
/// Returns an error when the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
///
/// # Errors
/// Returns an error when any of the generated statements fails to execute.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let profile_table = schema.create_table_from_entity(Profile);
    let room_expense_table = schema.create_table_from_entity(RoomExpense);
    let purse_transaction_table = schema.create_table_from_entity(PurseTransaction);
    let personal_expense_table = schema.create_table_from_entity(PersonalExpense);
    let contribution_table = schema.create_table_from_entity(Contribution);
    let recurring_bill_table = schema.create_table_from_entity(RecurringBill);
    let chat_message_table = schema.create_table_from_entity(ChatMessage);
    let notice_table = schema.create_table_from_entity(Notice);

    db.execute(builder.build(&profile_table)).await?;
    db.execute(builder.build(&room_expense_table)).await?;
    db.execute(builder.build(&purse_transaction_table)).await?;
    db.execute(builder.build(&personal_expense_table)).await?;
    db.execute(builder.build(&contribution_table)).await?;
    db.execute(builder.build(&recurring_bill_table)).await?;
    db.execute(builder.build(&chat_message_table)).await?;
    db.execute(builder.build(&notice_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ContributionModel, ProfileModel, PurseTransactionModel, RoomExpenseModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Tables exist if we can query them
        let _: Vec<ProfileModel> = Profile::find().limit(1).all(&db).await?;
        let _: Vec<RoomExpenseModel> = RoomExpense::find().limit(1).all(&db).await?;
        let _: Vec<PurseTransactionModel> = PurseTransaction::find().limit(1).all(&db).await?;
        let _: Vec<ContributionModel> = Contribution::find().limit(1).all(&db).await?;

        Ok(())
    }
}
