//! Employee repository.

use rusqlite::{OptionalExtension, Row, params, types::Type};
use tracing::{info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Employee, Gender, NewEmployee};

use super::{Store, classify_write_error};

const EMPLOYEE_COLUMNS: &str =
    "id, first_name, last_name, email, birth_date, hire_date, gender, remaining_holidays";

fn row_to_employee(row: &Row<'_>) -> rusqlite::Result<Employee> {
    let gender = match row.get::<_, Option<String>>(6)? {
        Some(text) => text
            .parse::<Gender>()
            .map_err(|err| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(err)))?,
        None => Gender::Unknown,
    };
    Ok(Employee {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        birth_date: row.get(4)?,
        hire_date: row.get(5)?,
        gender,
        remaining_holidays: row.get(7)?,
    })
}

impl Store {
    /// Inserts an employee and returns it with its new id.
    ///
    /// # Errors
    ///
    /// `DuplicateEntry` when the email is already taken (compared exactly
    /// as stored), `ConstraintViolation` for other rejected writes.
    pub fn insert_employee(&self, employee: &NewEmployee) -> TrackerResult<Employee> {
        let tx = self.conn.unchecked_transaction()?;

        let taken = tx
            .query_row(
                "SELECT 1 FROM employee WHERE email = ?1",
                [employee.email()],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if taken {
            return Err(TrackerError::DuplicateEntry {
                what: "employee".to_string(),
            });
        }

        tx.execute(
            "INSERT INTO employee
                (first_name, last_name, email, birth_date, hire_date, gender, remaining_holidays)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                employee.first_name(),
                employee.last_name(),
                employee.email(),
                employee.birth_date(),
                employee.hire_date(),
                employee.gender().as_str(),
                employee.remaining_holidays(),
            ],
        )
        .map_err(|e| classify_write_error(e, "employee"))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!(employee_id = id, email = %employee.email(), "Employee created");
        Ok(employee.clone().into_employee(id))
    }

    /// Stores an employee; `false` means nothing was written because the
    /// email is taken or storage rejected the row.
    pub fn save_employee(&self, employee: &NewEmployee) -> TrackerResult<bool> {
        match self.insert_employee(employee) {
            Ok(_) => Ok(true),
            Err(err) if err.is_rejected_write() => {
                warn!(email = %employee.email(), error = %err, "Employee not saved");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// All employees ordered by last name, then first name.
    pub fn fetch_employees(&self) -> TrackerResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employee ORDER BY last_name, first_name, id"
        ))?;
        let employees = stmt
            .query_map([], row_to_employee)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    /// Looks up one employee by id.
    pub fn get_employee(&self, id: i64) -> TrackerResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                &format!("SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE id = ?1"),
                [id],
                row_to_employee,
            )
            .optional()?;
        Ok(employee)
    }

    /// Like [`Store::get_employee`] but a missing id is an error.
    pub fn require_employee(&self, id: i64) -> TrackerResult<Employee> {
        self.get_employee(id)?
            .ok_or(TrackerError::EmployeeNotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_employee(first: &str, last: &str, email: &str) -> NewEmployee {
        NewEmployee::new(
            first,
            last,
            email,
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_insert_assigns_id_and_round_trips() {
        let store = Store::open_in_memory().unwrap();
        let employee = new_employee("Max", "Mustermann", "max@example.com")
            .with_gender(Gender::Male)
            .with_remaining_holidays(25);
        let saved = store.insert_employee(&employee).unwrap();
        assert!(saved.id > 0);

        let loaded = store.get_employee(saved.id).unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.gender, Gender::Male);
        assert_eq!(loaded.remaining_holidays, 25);
    }

    #[test]
    fn test_duplicate_email_rejected_without_write() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.save_employee(&new_employee("A", "One", "same@example.com")).unwrap());
        assert!(!store.save_employee(&new_employee("B", "Two", "same@example.com")).unwrap());
        assert_eq!(store.fetch_employees().unwrap().len(), 1);
    }

    #[test]
    fn test_email_uniqueness_is_case_sensitive() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.save_employee(&new_employee("A", "One", "same@example.com")).unwrap());
        assert!(store.save_employee(&new_employee("B", "Two", "Same@example.com")).unwrap());
    }

    #[test]
    fn test_insert_duplicate_reports_kind() {
        let store = Store::open_in_memory().unwrap();
        store.insert_employee(&new_employee("A", "One", "x@example.com")).unwrap();
        let err = store
            .insert_employee(&new_employee("A", "One", "x@example.com"))
            .unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateEntry { .. }));
    }

    #[test]
    fn test_fetch_employees_sorted_by_last_then_first() {
        let store = Store::open_in_memory().unwrap();
        store.insert_employee(&new_employee("Zoe", "Berg", "zb@example.com")).unwrap();
        store.insert_employee(&new_employee("Anna", "Berg", "ab@example.com")).unwrap();
        store.insert_employee(&new_employee("Carl", "Adler", "ca@example.com")).unwrap();

        let names: Vec<String> = store
            .fetch_employees()
            .unwrap()
            .iter()
            .map(Employee::full_name)
            .collect();
        assert_eq!(names, vec!["Carl Adler", "Anna Berg", "Zoe Berg"]);
    }

    #[test]
    fn test_stored_gender_is_read_case_insensitively() {
        let store = Store::open_in_memory().unwrap();
        let saved = store.insert_employee(&new_employee("A", "One", "a@example.com")).unwrap();
        store
            .conn()
            .execute("UPDATE employee SET gender = 'FEMALE' WHERE id = ?1", [saved.id])
            .unwrap();
        assert_eq!(store.get_employee(saved.id).unwrap().unwrap().gender, Gender::Female);
    }

    #[test]
    fn test_unrecognised_stored_gender_is_an_error() {
        let store = Store::open_in_memory().unwrap();
        let saved = store.insert_employee(&new_employee("A", "One", "a@example.com")).unwrap();
        store
            .conn()
            .execute("UPDATE employee SET gender = 'robot' WHERE id = ?1", [saved.id])
            .unwrap();

        assert!(matches!(
            store.get_employee(saved.id),
            Err(TrackerError::Storage(rusqlite::Error::FromSqlConversionFailure(6, Type::Text, _)))
        ));
        assert!(store.fetch_employees().is_err());
    }

    #[test]
    fn test_get_missing_employee() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.get_employee(99).unwrap().is_none());
        assert!(matches!(
            store.require_employee(99),
            Err(TrackerError::EmployeeNotFound { id: 99 })
        ));
    }

    #[test]
    fn test_storage_rejects_hire_before_birth_written_directly() {
        let store = Store::open_in_memory().unwrap();
        let result = store.conn().execute(
            "INSERT INTO employee (first_name, last_name, email, birth_date, hire_date)
             VALUES ('A', 'B', 'a@example.com', '2000-01-02', '2000-01-01')",
            [],
        );
        let err = classify_write_error(result.unwrap_err(), "employee");
        assert!(matches!(err, TrackerError::ConstraintViolation { .. }));
    }
}
