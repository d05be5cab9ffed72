//! Interactive numbered menu.
//!
//! The menu offers four choices: create an employee, record time for an
//! employee, show an employee's report, and exit. It runs over any
//! `BufRead`/`Write` pair, so the binary drives it with the terminal and
//! the tests drive it with in-memory buffers.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use time_tracker::cli::Menu;
//! use time_tracker::storage::Store;
//!
//! let store = Store::open_in_memory().unwrap();
//! let input = Cursor::new(b"4\n".to_vec());
//! let mut output = Vec::new();
//!
//! Menu::new(&store, input, &mut output).run().unwrap();
//! assert!(String::from_utf8(output).unwrap().ends_with("Bye! Have a nice day!\n"));
//! ```

mod prompt;
mod report;

use std::io::{BufRead, Write};

use tracing::debug;

use crate::calculation::{YearMonth, entries_in_month, month_name, summarize_by_month};
use crate::error::TrackerResult;
use crate::models::{Employee, NewEmployee, NewTimeEntry};
use crate::storage::Store;

pub use prompt::Prompter;
pub use report::{employee_header, employee_row, month_detail, monthly_overview};

/// The interactive menu over one store.
pub struct Menu<'s, R, W> {
    store: &'s Store,
    prompt: Prompter<R, W>,
}

impl<'s, R: BufRead, W: Write> Menu<'s, R, W> {
    /// Creates a menu reading from `input` and writing to `output`.
    pub fn new(store: &'s Store, input: R, output: W) -> Self {
        Self {
            store,
            prompt: Prompter::new(input, output),
        }
    }

    /// Runs the menu loop until the user picks exit or input ends.
    pub fn run(&mut self) -> TrackerResult<()> {
        loop {
            self.prompt.say("\n--- Menu ---")?;
            self.prompt.say("1) Create new employee")?;
            self.prompt.say("2) Record time for employee")?;
            self.prompt.say("3) Show report")?;
            self.prompt.say("4) Exit")?;

            let Some(choice) = self.prompt.ask("Choose [1-4]: ")? else {
                return Ok(());
            };
            debug!(choice = %choice, "Menu choice");
            match choice.as_str() {
                "1" => self.create_employee()?,
                "2" => self.record_time()?,
                "3" => self.show_report()?,
                "4" => {
                    self.prompt.say("Bye! Have a nice day!")?;
                    return Ok(());
                }
                _ => self.prompt.say("Invalid choice.")?,
            }
        }
    }

    fn create_employee(&mut self) -> TrackerResult<()> {
        self.prompt.say("\nCreate new employee (0=Cancel for any field):")?;
        let Some(first) = self.prompt.ask_field("First name: ")? else {
            return Ok(());
        };
        let Some(last) = self.prompt.ask_field("Last name: ")? else {
            return Ok(());
        };
        let Some(email) = self.prompt.ask_field("Email: ")? else {
            return Ok(());
        };
        let Some(born) = self.prompt.ask_date("Birth date")? else {
            return Ok(());
        };
        let Some(hired) = self.prompt.ask_date("Hire date")? else {
            return Ok(());
        };

        let employee = match NewEmployee::new(&first, &last, &email, born, hired) {
            Ok(employee) => employee,
            Err(err) => return self.prompt.say(format!("✗ Invalid inputs: {}", err)),
        };

        if self.store.save_employee(&employee)? {
            self.prompt.say(format!(
                "✓ Employee created: {} {} ({})",
                employee.first_name(),
                employee.last_name(),
                employee.email()
            ))
        } else {
            self.prompt.say("✗ Email already in use (UNIQUE).")
        }
    }

    fn pick_employee(&mut self, title: &str) -> TrackerResult<Option<Employee>> {
        let mut employees = self.store.fetch_employees()?;
        if employees.is_empty() {
            self.prompt.say("✗ No employees in the database.")?;
            return Ok(None);
        }

        self.prompt.say(format!("\n{}:", title))?;
        for (index, employee) in employees.iter().enumerate() {
            self.prompt.say(employee_row(employee, index + 1))?;
        }
        Ok(self
            .prompt
            .ask_index(employees.len())?
            .map(|index| employees.swap_remove(index - 1)))
    }

    fn record_time(&mut self) -> TrackerResult<()> {
        let Some(employee) = self.pick_employee("Record time – choose employee")? else {
            return Ok(());
        };
        let Some(date) = self.prompt.ask_date("Date")? else {
            return Ok(());
        };
        let Some(start) = self.prompt.ask_time("Start")? else {
            return Ok(());
        };
        let Some(end) = self.prompt.ask_time("End")? else {
            return Ok(());
        };
        let Some(pause) = self.prompt.ask_time("Break")? else {
            return Ok(());
        };

        let entry = NewTimeEntry {
            employee_id: employee.id,
            date,
            start,
            end,
            pause,
        };
        if self.store.save_time_entry(&entry)? {
            self.prompt.say(format!(
                "✓ Entry saved for {} on {}.",
                employee.full_name(),
                date.format("%d.%m.%Y")
            ))
        } else {
            self.prompt.say("ⓘ Similar entry already exists. No insert.")
        }
    }

    fn show_report(&mut self) -> TrackerResult<()> {
        let Some(employee) = self.pick_employee("Report – choose employee")? else {
            return Ok(());
        };

        let entries = self.store.entries_for_employee(employee.id)?;
        let summary = summarize_by_month(&entries);

        self.prompt.say("")?;
        for line in employee_header(&employee) {
            self.prompt.say(line)?;
        }
        if summary.is_empty() {
            return self.prompt.say("No entries found.");
        }

        let months: Vec<YearMonth> = summary.keys().copied().collect();
        let lines = match self.choose_month(&months)? {
            None => monthly_overview(&summary),
            Some(month) => month_detail(month, &entries_in_month(&entries, month)),
        };
        self.prompt.say("")?;
        for line in lines {
            self.prompt.say(line)?;
        }
        Ok(())
    }

    /// `None` selects the overview of all months.
    fn choose_month(&mut self, months: &[YearMonth]) -> TrackerResult<Option<YearMonth>> {
        self.prompt.say("Available months:")?;
        self.prompt.say("[0] All months (monthly overview)")?;
        for (index, month) in months.iter().enumerate() {
            self.prompt.say(format!(
                "[{}] {} {}",
                index + 1,
                month_name(month.month),
                month.year
            ))?;
        }

        loop {
            let Some(answer) = self
                .prompt
                .ask_field("Choose month (number, 0/Enter=Overview): ")?
            else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(index) if (1..=months.len()).contains(&index) => {
                    return Ok(Some(months[index - 1]));
                }
                _ => self.prompt.say("Invalid choice.")?,
            }
        }
    }

    /// Releases the input and output streams.
    pub fn into_parts(self) -> (R, W) {
        self.prompt.into_parts()
    }
}
