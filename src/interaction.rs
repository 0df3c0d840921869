// src/interaction.rs

//! Console menu for browsing stored vacancies.

use std::io::{BufRead, Write};

use crate::error::{AppError, Result};
use crate::models::{Record, Vacancy};
use crate::query::Criteria;
use crate::services::JobPlatformApi;
use crate::storage::VacancyStorage;

const MENU: &str = "
Menu:
1. Show vacancies
2. Select a vacancy
3. Filter by salary
4. Filter by region
5. Filter by experience
6. Filter by city
7. Delete a vacancy
8. New search
9. Exit";

/// Interactive session over any line-based input and output.
pub struct ConsoleSession<'a, R, W> {
    api: &'a dyn JobPlatformApi,
    storage: &'a dyn VacancyStorage,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> ConsoleSession<'a, R, W> {
    pub fn new(
        api: &'a dyn JobPlatformApi,
        storage: &'a dyn VacancyStorage,
        input: R,
        output: W,
    ) -> Self {
        Self {
            api,
            storage,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends.
    ///
    /// Asks for a profession first unless `initial_query` is given.
    pub fn run(&mut self, initial_query: Option<&str>) -> Result<()> {
        let query = match initial_query {
            Some(query) => query.to_string(),
            None => match self.prompt("Enter a profession (e.g. 'Java developer'): ")? {
                Some(query) => query,
                None => return Ok(()),
            },
        };
        self.search(&query, false)?;

        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Your choice: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => {
                    let records = self.storage.query(None)?;
                    self.show(&records)?;
                }
                "2" => self.select()?,
                "3" => self.filter_by_salary()?,
                "4" => self.filter_by_text("Region (e.g. Moscow): ", |c, v| c.region(v))?,
                "5" => self.filter_by_text("Experience (Junior/Middle/Senior): ", |c, v| {
                    c.experience(v)
                })?,
                "6" => self.filter_by_text("City (e.g. Moscow): ", |c, v| c.city(v))?,
                "7" => self.delete()?,
                "8" => {
                    if let Some(query) = self.prompt("Enter a new profession: ")? {
                        self.search(&query, true)?;
                    }
                }
                "9" => break,
                _ => writeln!(self.output, "Unknown menu item, try again.")?,
            }
        }
        Ok(())
    }

    /// Fetch vacancies and store the valid ones, optionally replacing old results.
    fn search(&mut self, query: &str, replace: bool) -> Result<()> {
        let items = match self.api.get_vacancies(query) {
            Ok(items) => items,
            Err(e @ (AppError::Http(_) | AppError::RemoteRequest { .. })) => {
                writeln!(self.output, "Search failed: {e}")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let vacancies = Vacancy::cast_to_vacancies(&items);
        if replace {
            self.storage.clear()?;
        }
        self.storage.add_all(&vacancies)?;
        writeln!(
            self.output,
            "Saved {} of {} vacancies for '{}'.",
            vacancies.len(),
            items.len(),
            query
        )?;
        Ok(())
    }

    fn select(&mut self) -> Result<()> {
        let records = self.storage.query(None)?;
        if records.is_empty() {
            writeln!(self.output, "No matching vacancies.")?;
            return Ok(());
        }
        self.show(&records)?;

        let selection = self
            .prompt("Pick a vacancy number for details (Enter to cancel): ")?
            .unwrap_or_default();
        match selection.parse::<usize>() {
            Ok(n) if (1..=records.len()).contains(&n) => {
                let record = &records[n - 1];
                writeln!(self.output, "\nVacancy details:")?;
                writeln!(self.output, "Title: {}", record.text("title"))?;
                writeln!(self.output, "City: {}", record.text("city"))?;
                writeln!(self.output, "Link: {}", record.text("link"))?;
                writeln!(self.output, "Salary: {}", salary_text(record))?;
                writeln!(self.output, "Requirements: {}", record.text("description"))?;
            }
            _ => writeln!(self.output, "Selection cancelled.")?,
        }
        Ok(())
    }

    fn filter_by_salary(&mut self) -> Result<()> {
        let low = self.prompt("Minimum salary: ")?.unwrap_or_default();
        let high = self.prompt("Maximum salary: ")?.unwrap_or_default();
        match (low.parse::<f64>(), high.parse::<f64>()) {
            (Ok(low), Ok(high)) => {
                let criteria = Criteria::new().salary(low, high);
                let records = self.storage.query(Some(&criteria))?;
                self.show(&records)
            }
            _ => {
                writeln!(self.output, "Salary bounds must be numbers.")?;
                Ok(())
            }
        }
    }

    fn filter_by_text(
        &mut self,
        question: &str,
        build: fn(Criteria, String) -> Criteria,
    ) -> Result<()> {
        let value = self.prompt(question)?.unwrap_or_default();
        let criteria = build(Criteria::new(), value);
        let records = self.storage.query(Some(&criteria))?;
        self.show(&records)
    }

    fn delete(&mut self) -> Result<()> {
        let title = self.prompt("Title of the vacancy to delete: ")?.unwrap_or_default();
        let link = self.prompt("Link of the vacancy: ")?.unwrap_or_default();
        let removed = self.storage.delete(&Vacancy::identity(title, link))?;
        writeln!(self.output, "Deleted {removed} vacancy record(s).")?;
        Ok(())
    }

    fn show(&mut self, records: &[Record]) -> Result<()> {
        if records.is_empty() {
            writeln!(self.output, "No matching vacancies.")?;
            return Ok(());
        }
        for (idx, record) in records.iter().enumerate() {
            writeln!(
                self.output,
                "\n{}. {} ({}) -> {}\nSalary: {}\nDescription: {}",
                idx + 1,
                record.text("title"),
                record.text("city"),
                record.text("link"),
                salary_text(record),
                record.text("description"),
            )?;
        }
        Ok(())
    }

    /// Print `question` and read one trimmed line. `None` on end of input.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn salary_text(record: &Record) -> String {
    match record.text("salary") {
        s if s.is_empty() => "not specified".to_string(),
        s => s,
    }
}
