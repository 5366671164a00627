//! Person repository contract and SQLite implementation.
//!
//! # Invariants
//! - Duplicated names are accepted on insert.
//! - Name lookups return the first match in insertion order.

use crate::model::natural_key;
use crate::model::person::{Person, PersonId};
use crate::repo::{ensure_tables, map_write_error, parse_uuid, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const PERSON_SELECT_SQL: &str = "SELECT id, first_name, last_name FROM persons";

/// Repository interface for person records.
pub trait PersonRepository {
    /// Inserts a person without checking for an existing namesake.
    fn create_person(&self, person: &Person) -> RepoResult<PersonId>;
    /// Finds the first person whose names match case-insensitively.
    fn find_person_by_name(&self, first_name: &str, last_name: &str)
        -> RepoResult<Option<Person>>;
    /// Lists all persons in storage order.
    fn list_persons(&self) -> RepoResult<Vec<Person>>;
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["persons"])?;
        Ok(Self { conn })
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn create_person(&self, person: &Person) -> RepoResult<PersonId> {
        self.conn
            .execute(
                "INSERT INTO persons (id, first_name, first_name_key, last_name, last_name_key)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    person.id.to_string(),
                    person.first_name.as_str(),
                    natural_key(&person.first_name),
                    person.last_name.as_str(),
                    natural_key(&person.last_name),
                ],
            )
            .map_err(|err| map_write_error(err, "person"))?;
        Ok(person.id)
    }

    fn find_person_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<Option<Person>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PERSON_SELECT_SQL}
             WHERE first_name_key = ?1
               AND last_name_key = ?2
             ORDER BY rowid ASC
             LIMIT 1;"
        ))?;
        let row = stmt
            .query_row(
                params![natural_key(first_name), natural_key(last_name)],
                read_person_columns,
            )
            .optional()?;
        row.map(into_person).transpose()
    }

    fn list_persons(&self) -> RepoResult<Vec<Person>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PERSON_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let rows = stmt.query_map([], read_person_columns)?;
        let mut persons = Vec::new();
        for row in rows {
            persons.push(into_person(row?)?);
        }
        Ok(persons)
    }
}

type PersonColumns = (String, String, String);

fn read_person_columns(row: &Row<'_>) -> rusqlite::Result<PersonColumns> {
    Ok((row.get("id")?, row.get("first_name")?, row.get("last_name")?))
}

fn into_person((id, first_name, last_name): PersonColumns) -> RepoResult<Person> {
    Ok(Person {
        id: parse_uuid(&id, "persons.id")?,
        first_name,
        last_name,
    })
}
