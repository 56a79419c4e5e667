#![forbid(unsafe_code)]

//! Interactive command loop over a text stream.
//!
//! The session reads whitespace-separated integers, so a whole command can
//! arrive on one line (`1 10 3`) or spread over several. Indices are checked
//! with [`FenwickTree::contains`] before anything reaches the tree.

use std::io::{self, BufRead, Write};

use bitsum::{Dump, FenwickError, FenwickTree};
use tracing::{debug, info};

const MENU: &str = "\
1. Add a number at an index
2. Query sum
3. Quit
4. Dump tree";

const BAD_INDEX: &str = "  incorrect index given...";

/// Menu choices. Anything unrecognised quits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Add,
    Query,
    Dump,
    Quit,
}

impl Choice {
    fn from_input(value: i64) -> Self {
        match value {
            1 => Self::Add,
            2 => Self::Query,
            4 => Self::Dump,
            _ => Self::Quit,
        }
    }
}

/// One interactive run: a tree (possibly not yet created), an input and an
/// output.
pub struct Session<R, W> {
    tree: Option<FenwickTree>,
    input: R,
    output: W,
    pending: Vec<String>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// A session that asks for the capacity before showing the menu.
    pub fn new(input: R, output: W) -> Self {
        Self {
            tree: None,
            input,
            output,
            pending: Vec::new(),
        }
    }

    /// A session over an existing tree; the capacity prompt is skipped.
    pub fn with_tree(tree: FenwickTree, input: R, output: W) -> Self {
        Self {
            tree: Some(tree),
            ..Self::new(input, output)
        }
    }

    /// The tree, once created.
    pub fn tree(&self) -> Option<&FenwickTree> {
        self.tree.as_ref()
    }

    /// Drive the loop until the user quits or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        if self.tree.is_none() && !self.create_tree()? {
            return Ok(());
        }

        writeln!(self.output, "{MENU}")?;
        loop {
            writeln!(self.output)?;
            let Some(raw) = self.prompt("Enter your choice: ")? else {
                break;
            };
            writeln!(self.output)?;

            let choice = Choice::from_input(raw);
            debug!(?choice, "menu choice");
            let keep_going = match choice {
                Choice::Add => self.add()?,
                Choice::Query => self.query()?,
                Choice::Dump => self.dump()?,
                Choice::Quit => false,
            };
            if !keep_going {
                break;
            }
        }
        self.output.flush()
    }

    /// Returns `false` if input ended before a capacity arrived.
    fn create_tree(&mut self) -> io::Result<bool> {
        let Some(capacity) = self.prompt("Enter number of elements: ")? else {
            return Ok(false);
        };
        writeln!(self.output)?;
        match FenwickTree::new(capacity) {
            Ok(tree) => {
                info!(capacity = tree.capacity(), "tree created");
                self.tree = Some(tree);
            }
            Err(err) => writeln!(self.output, "  {err}")?,
        }
        Ok(true)
    }

    fn add(&mut self) -> io::Result<bool> {
        self.on_tree(|session, tree| {
            let Some(delta) = session.prompt("  Enter number to add: ")? else {
                return Ok(false);
            };
            let Some(raw) = session.prompt("  Enter index: ")? else {
                return Ok(false);
            };
            match checked_index(tree, raw) {
                Some(index) => {
                    if let Err(err) = tree.update(index, delta) {
                        writeln!(session.output, "  {err}")?;
                    }
                }
                None => writeln!(session.output, "{BAD_INDEX}")?,
            }
            Ok(true)
        })
    }

    fn query(&mut self) -> io::Result<bool> {
        self.on_tree(|session, tree| {
            let Some(raw) = session.prompt("  Enter index: ")? else {
                return Ok(false);
            };
            match checked_index(tree, raw) {
                Some(index) => {
                    let sum = tree.prefix_sum(index);
                    writeln!(session.output, "    sum = {sum}")?;
                }
                None => writeln!(session.output, "{BAD_INDEX}")?,
            }
            Ok(true)
        })
    }

    /// Run `command` against the tree, or report that there is none without
    /// reading any arguments. The tree is put back whatever `command` returns.
    fn on_tree<F>(&mut self, command: F) -> io::Result<bool>
    where
        F: FnOnce(&mut Self, &mut FenwickTree) -> io::Result<bool>,
    {
        let Some(mut tree) = self.tree.take() else {
            return self.uninitialized();
        };
        let outcome = command(self, &mut tree);
        self.tree = Some(tree);
        outcome
    }

    fn dump(&mut self) -> io::Result<bool> {
        let Some(tree) = self.tree.as_ref() else {
            return self.uninitialized();
        };
        write!(self.output, "{}", Dump::new(tree))?;
        Ok(true)
    }

    fn uninitialized(&mut self) -> io::Result<bool> {
        writeln!(self.output, "  {}", FenwickError::Uninitialized)?;
        Ok(true)
    }

    /// Write `label`, then read one integer. `None` on end of input or a
    /// token that is not an integer.
    fn prompt(&mut self, label: &str) -> io::Result<Option<i64>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let Some(token) = self.next_token()? else {
            return Ok(None);
        };
        match token.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                debug!(%token, "non-integer input ends the session");
                Ok(None)
            }
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending = line.split_whitespace().rev().map(str::to_owned).collect();
        }
        Ok(self.pending.pop())
    }
}

fn checked_index(tree: &FenwickTree, raw: i64) -> Option<usize> {
    usize::try_from(raw).ok().filter(|&i| tree.contains(i))
}
