//! Line-oriented terminal front end

use std::fmt::Write as _;

use crate::{
    desk::Desk,
    models::book::{BookId, LendingAction},
    view::{CardStatus, CatalogView},
};

pub const HELP: &str = "\
Commands:
  list                                   show the filtered catalog
  search [term]                          filter by title/author (empty clears)
  category [name]                        filter by exact category (empty clears)
  add                                    open a blank book form
  edit <id>                              open the form prefilled with a book
  save <title> | <author> | <category>   submit the open form
  cancel                                 close the open form
  borrow <id> <name>                     borrow a book
  return <id>                            return a book (asks for confirmation)
  delete <id>                            delete a book (asks for confirmation)
  yes | no                               answer the pending confirmation
  reload                                 refetch the catalog
  help                                   show this text
  quit                                   leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Category(String),
    Add,
    Edit(BookId),
    Save { title: String, author: String, category: String },
    Cancel,
    Borrow { id: BookId, name: String },
    Return(BookId),
    Delete(BookId),
    Yes,
    No,
    Reload,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "search" => Command::Search(rest.to_string()),
            "category" => Command::Category(rest.to_string()),
            "add" => Command::Add,
            "edit" => Command::Edit(parse_id(rest)?),
            "save" => {
                let mut parts = rest.splitn(3, '|').map(str::trim);
                let title = parts.next().unwrap_or_default().to_string();
                let author = parts.next().unwrap_or_default().to_string();
                let category = parts.next().unwrap_or_default().to_string();
                Command::Save { title, author, category }
            }
            "cancel" => Command::Cancel,
            "borrow" => {
                let (id, name) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Command::Borrow {
                    id: parse_id(id)?,
                    name: name.trim().to_string(),
                }
            }
            "return" => Command::Return(parse_id(rest)?),
            "delete" | "rm" => Command::Delete(parse_id(rest)?),
            "yes" | "y" => Command::Yes,
            "no" | "n" => Command::No,
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "" => return Err("Type 'help' for commands".to_string()),
            other => return Err(format!("Unknown command '{}'", other)),
        };
        Ok(command)
    }
}

fn parse_id(raw: &str) -> Result<BookId, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("Expected a book id, got '{}'", raw.trim()))
}

/// Apply one command. Returns `false` once the user quits.
pub async fn execute(desk: &mut Desk, command: Command, out: &mut String) -> bool {
    // Errors are already on the toast; only the render step differs per command
    match command {
        Command::List => render_catalog(desk, out),
        Command::Search(term) => {
            desk.set_search_term(term);
            render_catalog(desk, out);
        }
        Command::Category(category) => {
            desk.set_category(category);
            render_catalog(desk, out);
        }
        Command::Add => {
            let form = desk.open_add_form();
            let _ = writeln!(out, "{} (use: save <title> | <author> | <category>)", form.heading());
        }
        Command::Edit(id) => {
            if let Ok(form) = desk.open_edit_form(id) {
                let _ = writeln!(
                    out,
                    "{}: {} | {} | {}",
                    form.heading(),
                    form.title,
                    form.author,
                    form.category
                );
            }
        }
        Command::Save { title, author, category } => {
            if desk.submit_form(&title, &author, &category).await.is_ok() {
                render_catalog(desk, out);
            }
        }
        Command::Cancel => {
            desk.close_form();
            desk.close_borrow();
        }
        Command::Borrow { id, name } => {
            desk.open_borrow(id);
            if desk.submit_borrow(&name).await.is_ok() {
                render_catalog(desk, out);
            }
        }
        Command::Return(id) => {
            desk.request_return(id);
        }
        Command::Delete(id) => {
            desk.request_delete(id);
        }
        Command::Yes => match desk.confirm().await {
            Some(Ok(())) => render_catalog(desk, out),
            Some(Err(_)) => {}
            None => out.push_str("Nothing to confirm\n"),
        },
        Command::No => desk.dismiss(),
        Command::Reload => {
            if desk.refresh().await.is_ok() {
                render_catalog(desk, out);
            }
        }
        Command::Help => {
            out.push_str(HELP);
            out.push('\n');
        }
        Command::Quit => return false,
    }
    true
}

pub fn render_view(view: &CatalogView, out: &mut String) {
    let cards = match view {
        CatalogView::Empty => {
            out.push_str("No books found.\n");
            return;
        }
        CatalogView::Cards(cards) => cards,
    };

    for card in cards {
        let status = match &card.status {
            CardStatus::Available => card.status.label().to_string(),
            CardStatus::CheckedOut { borrower } => format!("{} ({})", card.status.label(), borrower),
        };
        let action = match card.action {
            LendingAction::Borrow => "borrow",
            LendingAction::Return => "return",
        };
        let _ = writeln!(
            out,
            "#{:<4} [{}] {} by {} - {} [{} | edit | delete]",
            card.id, card.category, card.title, card.author, status, action
        );
    }
}

/// Filtered catalog, naming the active filter when it hides every book
pub fn render_catalog(desk: &Desk, out: &mut String) {
    let view = desk.view();
    let filter = desk.filter();
    if view.is_empty() && filter.is_active() {
        let _ = writeln!(
            out,
            "No books match search '{}' in category '{}'.",
            filter.term,
            if filter.category.is_empty() { "all" } else { filter.category.as_str() }
        );
        return;
    }
    render_view(&view, out);
}

/// Toast and pending prompt, printed after every command
pub fn render_status(desk: &Desk, out: &mut String) {
    if let Some(toast) = desk.toast() {
        let _ = writeln!(out, ">> {}", toast.message);
    }
    if let Some(prompt) = desk.pending_prompt() {
        let _ = writeln!(out, "{}: {} (yes/no)", prompt.title, prompt.message);
    }
}
