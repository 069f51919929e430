use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

use crate::canteen::Canteen;
use crate::monitor::TargetMeal;
use crate::parse::MealRecord;
use crate::selection::select_targets;

/// Line based questions to the operator, re-asked until the answer is usable.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_string())
    }

    /// A blank answer picks `today`.
    pub fn date(&mut self, today: NaiveDate) -> io::Result<NaiveDate> {
        loop {
            writeln!(self.output, "\n{}", "=".repeat(50))?;
            writeln!(self.output, "{:^50}", "Press [Enter] for today's date")?;
            writeln!(self.output, "{}", "=".repeat(50))?;
            let answer = self.ask("\nOrder date (YYYY-MM-DD): ")?;
            if answer.is_empty() {
                writeln!(self.output, "\nUsing today's date: {today}")?;
                return Ok(today);
            }
            match NaiveDate::parse_from_str(&answer, "%Y-%m-%d") {
                Ok(date) => {
                    writeln!(self.output, "\nDate set: {date}")?;
                    return Ok(date);
                }
                Err(_) => {
                    writeln!(self.output, "\nInvalid or non-existent date.")?;
                    writeln!(self.output, "Please use YYYY-MM-DD, e.g. 2024-02-15.")?;
                }
            }
        }
    }

    pub fn canteen(&mut self) -> io::Result<Canteen> {
        writeln!(self.output, "\nChoose a canteen:")?;
        for canteen in Canteen::ALL {
            writeln!(self.output, "{} - {canteen}", canteen.id())?;
        }
        loop {
            let answer = self.ask("Your choice (1-3): ")?;
            match answer.parse::<u8>().ok().and_then(Canteen::from_id) {
                Some(canteen) => return Ok(canteen),
                None => writeln!(self.output, "Invalid choice, enter a number between 1 and 3.")?,
            }
        }
    }

    /// `Ok(None)` when the operator selects nothing, which ends the session.
    pub fn targets(&mut self, listing: &[MealRecord]) -> io::Result<Option<Vec<TargetMeal>>> {
        writeln!(self.output, "\nChoose the meals to order.")?;
        writeln!(self.output, "Enter meal numbers separated by commas (e.g. 1,3,5).")?;
        writeln!(
            self.output,
            "The meals will be watched and ordered as soon as they are available."
        )?;
        loop {
            let answer = self.ask("Your selection: ")?;
            match select_targets(listing, &answer) {
                Ok(targets) => return Ok(Some(targets)),
                Err(e) if e.can_retry() => writeln!(self.output, "{e}. Try again.")?,
                Err(_) => {
                    writeln!(self.output, "No meals selected, exiting.")?;
                    return Ok(None);
                }
            }
        }
    }
}
