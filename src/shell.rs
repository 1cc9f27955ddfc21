// Shell layer: the numbered menu loop on top of the catalog store.
// Each pass reads one choice, runs one store operation and prints the
// outcome. Bad input just sends the user back to the menu; only storage
// failures escape the loop.

use crate::catalog::Catalog;
use crate::error::CatalogError;
use anyhow::Result;
use dialoguer::Input;
use std::io::{BufRead, Write};

const MENU: &[&str] = &[
    "Add a book",
    "Remove a book",
    "Search books",
    "List all books",
    "Change book status",
    "Exit",
];

/// Source of user input. `None` means the input is exhausted.
pub trait Prompter {
    fn prompt(&mut self, text: &str) -> Result<Option<String>>;
}

/// Interactive prompt on the terminal, backed by `dialoguer`.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        // Empty input is allowed so the shell decides what it means.
        let line: String = Input::new()
            .with_prompt(text)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(line))
    }
}

/// Reads one line per prompt from any reader, e.g. piped stdin.
pub struct LinePrompter<R, W> {
    input: R,
    echo: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, echo: W) -> Self {
        Self { input, echo }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.echo, "{}: ", text)?;
        self.echo.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

enum Flow {
    Continue,
    Exit,
}

/// The menu loop. Owns the catalog for the length of the session.
pub struct Shell<P, W> {
    catalog: Catalog,
    prompter: P,
    out: W,
}

impl<P: Prompter, W: Write> Shell<P, W> {
    pub fn new(catalog: Catalog, prompter: P, out: W) -> Self {
        Self {
            catalog,
            prompter,
            out,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Hand the output sink back, mostly so tests can inspect it.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the user picks "Exit" or input runs out.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let choice = match self.prompter.prompt("Choose an action (1-6)")? {
                Some(c) => c,
                None => {
                    self.farewell()?;
                    return Ok(());
                }
            };
            let flow = match choice.trim() {
                "1" => self.handle_add()?,
                "2" => self.handle_remove()?,
                "3" => self.handle_search()?,
                "4" => self.handle_list()?,
                "5" => self.handle_status()?,
                "6" => Flow::Exit,
                _ => {
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if let Flow::Exit = flow {
                self.farewell()?;
                return Ok(());
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Menu:")?;
        for (i, item) in MENU.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, item)?;
        }
        Ok(())
    }

    fn farewell(&mut self) -> Result<()> {
        writeln!(self.out, "Goodbye!")?;
        Ok(())
    }

    /// Prompt for a field; `None` when input ran out mid-flow.
    fn ask(&mut self, text: &str) -> Result<Option<String>> {
        self.prompter.prompt(text)
    }

    fn ask_id(&mut self, text: &str) -> Result<Option<u64>> {
        let Some(raw) = self.ask(text)? else {
            return Ok(None);
        };
        match raw.trim().parse::<u64>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.out, "Invalid input, id must be a number.")?;
                Ok(None)
            }
        }
    }

    fn handle_add(&mut self) -> Result<Flow> {
        let Some(title) = self.ask("Title")? else {
            return Ok(Flow::Exit);
        };
        let Some(author) = self.ask("Author")? else {
            return Ok(Flow::Exit);
        };
        let Some(year) = self.ask("Year")? else {
            return Ok(Flow::Exit);
        };
        let year: i32 = match year.trim().parse() {
            Ok(y) => y,
            Err(_) => {
                writeln!(self.out, "Year must be a number.")?;
                return Ok(Flow::Continue);
            }
        };
        match self.catalog.add(&title, &author, year) {
            Ok(book) => writeln!(self.out, "Book '{}' added with id {}.", book.title, book.id)?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn handle_remove(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id("Id of the book to remove")? else {
            return Ok(Flow::Continue);
        };
        match self.catalog.remove(id) {
            Ok(_) => writeln!(self.out, "Book with id {} removed.", id)?,
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    fn handle_search(&mut self) -> Result<Flow> {
        let Some(term) = self.ask("Search (title, author or year)")? else {
            return Ok(Flow::Exit);
        };
        let found = self.catalog.search(&term);
        if found.is_empty() {
            writeln!(self.out, "No books found.")?;
        }
        for book in found {
            writeln!(self.out, "{}", book)?;
        }
        Ok(Flow::Continue)
    }

    fn handle_list(&mut self) -> Result<Flow> {
        if self.catalog.books().is_empty() {
            writeln!(self.out, "The library is empty.")?;
        }
        for book in self.catalog.books() {
            writeln!(self.out, "{}", book)?;
        }
        Ok(Flow::Continue)
    }

    fn handle_status(&mut self) -> Result<Flow> {
        let Some(id) = self.ask_id("Id of the book")? else {
            return Ok(Flow::Continue);
        };
        let Some(status) = self.ask("New status ('available' or 'checked-out')")? else {
            return Ok(Flow::Exit);
        };
        match self.catalog.set_status(id, &status) {
            Ok(book) => {
                let msg = format!("Status of book {} changed to '{}'.", book.id, book.status);
                writeln!(self.out, "{}", msg)?;
            }
            Err(e) => self.report(e)?,
        }
        Ok(Flow::Continue)
    }

    /// Print recoverable store errors; anything else ends the session.
    fn report(&mut self, err: CatalogError) -> Result<()> {
        if !err.is_recoverable() {
            let path = self.catalog.path().display().to_string();
            return Err(anyhow::Error::new(err).context(format!("Saving {}", path)));
        }
        writeln!(self.out, "{}", err)?;
        Ok(())
    }
}
