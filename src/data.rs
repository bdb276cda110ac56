use crate::error::RollcallResult;
use serde::Deserialize;
use sqlx::{Pool, Sqlite, SqliteConnection};

pub mod student;

#[derive(Deserialize)]
pub struct IdForm {
    pub id: i64,
}

pub trait DataType: Sized {
    type Id;
    type FormForAdding;

    async fn get_from_db_by_id(
        id: Self::Id,
        conn: &mut SqliteConnection,
    ) -> RollcallResult<Option<Self>>;
    async fn get_all(pool: &Pool<Sqlite>) -> RollcallResult<Vec<Self>>;
    async fn insert_into_database(
        to_be_added: Self::FormForAdding,
        conn: &mut SqliteConnection,
    ) -> RollcallResult<Self::Id>;
    async fn update_in_database(
        id: Self::Id,
        update: Self::FormForAdding,
        conn: &mut SqliteConnection,
    ) -> RollcallResult<()>;
    async fn remove_from_database(id: Self::Id, conn: &mut SqliteConnection) -> RollcallResult<()>;
}
