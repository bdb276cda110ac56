use crate::{
    data::DataType,
    error::{GetDatabaseConnectionSnafu, MakeQuerySnafu, RollcallResult},
};
use maud::Render;
use serde::Deserialize;
use snafu::ResultExt;
use sqlx::{Pool, Sqlite, SqliteConnection};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
}

///The form dialog's working copy of a student - both fields arrive as plain
///strings and get normalised on the way into the database.
#[derive(Deserialize, Debug, Clone)]
pub struct AddStudentForm {
    pub first_name: String,
    pub last_name: String,
}

impl AddStudentForm {
    fn normalised(self) -> (String, Option<String>) {
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim();
        let last_name = if last_name.is_empty() {
            None
        } else {
            Some(last_name.to_string())
        };

        (first_name, last_name)
    }
}

impl DataType for Student {
    type Id = i64;
    type FormForAdding = AddStudentForm;

    async fn get_from_db_by_id(
        id: Self::Id,
        conn: &mut SqliteConnection,
    ) -> RollcallResult<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, first_name, last_name FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await
            .context(MakeQuerySnafu)
    }

    async fn get_all(pool: &Pool<Sqlite>) -> RollcallResult<Vec<Self>> {
        let mut conn = pool.acquire().await.context(GetDatabaseConnectionSnafu)?;

        sqlx::query_as::<_, Self>("SELECT id, first_name, last_name FROM students ORDER BY id")
            .fetch_all(&mut *conn)
            .await
            .context(MakeQuerySnafu)
    }

    async fn insert_into_database(
        to_be_added: Self::FormForAdding,
        conn: &mut SqliteConnection,
    ) -> RollcallResult<Self::Id> {
        let (first_name, last_name) = to_be_added.normalised();

        let result = sqlx::query("INSERT INTO students (first_name, last_name) VALUES (?, ?)")
            .bind(first_name)
            .bind(last_name)
            .execute(conn)
            .await
            .context(MakeQuerySnafu)?;

        Ok(result.last_insert_rowid())
    }

    async fn update_in_database(
        id: Self::Id,
        update: Self::FormForAdding,
        conn: &mut SqliteConnection,
    ) -> RollcallResult<()> {
        let (first_name, last_name) = update.normalised();

        //updating a missing id is a silent no-op, same as remove below
        sqlx::query("UPDATE students SET first_name = ?, last_name = ? WHERE id = ?")
            .bind(first_name)
            .bind(last_name)
            .bind(id)
            .execute(conn)
            .await
            .context(MakeQuerySnafu)?;

        Ok(())
    }

    async fn remove_from_database(id: Self::Id, conn: &mut SqliteConnection) -> RollcallResult<()> {
        sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await
            .context(MakeQuerySnafu)?;

        Ok(())
    }
}

impl Student {
    ///Inserts when no id is given, updates otherwise. Either way the saved
    ///record's id comes back.
    pub async fn save(
        id: Option<i64>,
        form: AddStudentForm,
        conn: &mut SqliteConnection,
    ) -> RollcallResult<i64> {
        match id {
            Some(id) => {
                Self::update_in_database(id, form, conn).await?;
                Ok(id)
            }
            None => Self::insert_into_database(form, conn).await,
        }
    }

    pub fn name(&self) -> String {
        self.render().0
    }
}

impl Render for Student {
    fn render_to(&self, buffer: &mut String) {
        //if this ever includes HTML, update the name function above
        buffer.push_str(&self.first_name);
        if let Some(last_name) = self.last_name.as_deref() {
            buffer.push(' ');
            buffer.push_str(last_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RollcallState;

    fn form(first_name: &str, last_name: &str) -> AddStudentForm {
        AddStudentForm {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_fresh_increasing_ids() {
        let (_dir, state) = RollcallState::for_tests().await;
        let mut conn = state.get_connection().await.unwrap();

        let first = Student::insert_into_database(form("Ana", ""), &mut conn)
            .await
            .unwrap();
        let second = Student::insert_into_database(form("Bob", "Lee"), &mut conn)
            .await
            .unwrap();
        assert!(second > first);

        //deleted ids never come back
        Student::remove_from_database(second, &mut conn).await.unwrap();
        let third = Student::insert_into_database(form("Cal", "Ng"), &mut conn)
            .await
            .unwrap();
        assert!(third > second);
    }

    #[tokio::test]
    async fn get_by_missing_id_is_none() {
        let (_dir, state) = RollcallState::for_tests().await;
        let mut conn = state.get_connection().await.unwrap();

        assert!(
            Student::get_from_db_by_id(999, &mut conn)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn update_and_remove_of_missing_id_are_silent_noops() {
        let (_dir, state) = RollcallState::for_tests().await;
        let mut conn = state.get_connection().await.unwrap();

        let id = Student::insert_into_database(form("Ana", "Diaz"), &mut conn)
            .await
            .unwrap();

        Student::update_in_database(id + 1, form("Zoe", ""), &mut conn)
            .await
            .unwrap();
        Student::remove_from_database(id + 1, &mut conn).await.unwrap();

        let all = Student::get_all(&state).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].first_name, "Ana");
        assert_eq!(all[0].last_name.as_deref(), Some("Diaz"));
    }

    #[tokio::test]
    async fn save_dispatches_on_id_presence() {
        let (_dir, state) = RollcallState::for_tests().await;
        let mut conn = state.get_connection().await.unwrap();

        let id = Student::save(None, form("Bob", "Lee"), &mut conn)
            .await
            .unwrap();
        let same_id = Student::save(Some(id), form("Bob", "Lane"), &mut conn)
            .await
            .unwrap();
        assert_eq!(id, same_id);

        let stored = Student::get_from_db_by_id(id, &mut conn)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.first_name, "Bob");
        assert_eq!(stored.last_name.as_deref(), Some("Lane"));
        assert_eq!(Student::get_all(&state).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn fields_are_trimmed_and_empty_last_name_becomes_null() {
        let (_dir, state) = RollcallState::for_tests().await;
        let mut conn = state.get_connection().await.unwrap();

        let id = Student::insert_into_database(form("  Ana ", "   "), &mut conn)
            .await
            .unwrap();

        let stored = Student::get_from_db_by_id(id, &mut conn)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.first_name, "Ana");
        assert_eq!(stored.last_name, None);
        assert_eq!(stored.name(), "Ana");
    }

    #[tokio::test]
    async fn get_all_orders_by_id() {
        let (_dir, state) = RollcallState::for_tests().await;
        let mut conn = state.get_connection().await.unwrap();

        for (first, last) in [("Cal", "Ng"), ("Ana", "Diaz"), ("Bob", "Lee")] {
            Student::insert_into_database(form(first, last), &mut conn)
                .await
                .unwrap();
        }

        let all = Student::get_all(&state).await.unwrap();
        let ids: Vec<_> = all.iter().map(|student| student.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn display_name_joins_first_and_last() {
        let student = Student {
            id: 1,
            first_name: "Bob".to_string(),
            last_name: Some("Lee".to_string()),
        };
        assert_eq!(student.name(), "Bob Lee");
    }
}
