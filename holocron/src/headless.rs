//! Headless mode for the browser.
//!
//! A line-oriented protocol over stdin/stdout for scripts and automated
//! testing. Every line is a `#` command; results are printed as tagged blocks.

use std::io::{self, BufRead, Write};

use holocron_core::list_view::DisplayEntry;
use holocron_core::{
    BrowserConfig, BrowserError, DetailSnapshot, EntityRef, FavoriteKind, FavouriteRecord,
    HeadlessBrowser, ListDisplay, ListSnapshot,
};
use swapi::Collection;

const HELP: &str = "\
  #people [page]          - List characters
  #films [page]           - List films
  #starships [page]       - List starships
  #vehicles [page]        - List vehicles
  #search <text>          - Search the current section (empty clears)
  #next / #prev           - Turn the page
  #favonly on|off         - Show only favorites
  #person <id>            - Character detail (also #film, #starship, #vehicle)
  #fav <kind> <id> <name> - Add a character or starship favorite
  #unfav <kind> <id> <name>
  #favs                   - Show both favorites lists
  #save                   - Write favorites to the configured file
  #help                   - Show this help
  #quit                   - Exit";

/// A parsed protocol line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { collection: Collection, page: u32 },
    Search(String),
    Next,
    Prev,
    FavoritesOnly(bool),
    Show(EntityRef),
    Favourite {
        kind: FavoriteKind,
        record: FavouriteRecord,
        on: bool,
    },
    Favourites,
    Save,
    Help,
    Quit,
}

/// Parse one line. Lines must start with `#`.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let Some(body) = line.trim().strip_prefix('#') else {
        return Err("Commands start with '#'. Type #help for help.".to_string());
    };
    let (name, rest) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
    let rest = rest.trim();

    let page = |rest: &str| -> Result<u32, String> {
        if rest.is_empty() {
            return Ok(1);
        }
        match rest.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("Invalid page: {rest}")),
        }
    };
    let id = |collection: Collection| -> Result<Command, String> {
        if rest.is_empty() || rest.contains(char::is_whitespace) {
            return Err(format!("Usage: #{name} <id>"));
        }
        Ok(Command::Show(EntityRef::new(collection, rest)))
    };

    match name {
        "people" | "characters" => Ok(Command::List {
            collection: Collection::People,
            page: page(rest)?,
        }),
        "films" => Ok(Command::List {
            collection: Collection::Films,
            page: page(rest)?,
        }),
        "starships" => Ok(Command::List {
            collection: Collection::Starships,
            page: page(rest)?,
        }),
        "vehicles" => Ok(Command::List {
            collection: Collection::Vehicles,
            page: page(rest)?,
        }),
        "search" => Ok(Command::Search(rest.to_string())),
        "next" => Ok(Command::Next),
        "prev" => Ok(Command::Prev),
        "favonly" => match rest {
            "on" => Ok(Command::FavoritesOnly(true)),
            "off" => Ok(Command::FavoritesOnly(false)),
            _ => Err("Usage: #favonly on|off".to_string()),
        },
        "person" | "character" => id(Collection::People),
        "film" => id(Collection::Films),
        "starship" => id(Collection::Starships),
        "vehicle" => id(Collection::Vehicles),
        "fav" | "unfav" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let (Some(kind), Some(id), Some(record_name)) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(format!("Usage: #{name} <character|starship> <id> <name>"));
            };
            let kind = FavoriteKind::parse(kind)
                .ok_or_else(|| format!("Unknown favorite kind: {kind}"))?;
            Ok(Command::Favourite {
                kind,
                record: FavouriteRecord::new(id, record_name.trim()),
                on: name == "fav",
            })
        }
        "favs" => Ok(Command::Favourites),
        "save" => Ok(Command::Save),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command: #{other}. Type #help for help.")),
    }
}

/// Text block for a listing.
pub fn format_list(snapshot: &ListSnapshot) -> String {
    let mut header = format!("[LIST] {}", snapshot.collection.title());
    if snapshot.favorites_only {
        header.push_str(" (favorites)");
    } else if let Some(search) = &snapshot.search {
        header.push_str(&format!(" (search \"{search}\")"));
    } else {
        header.push_str(&format!(" page {}", snapshot.page));
    }

    let mut out = vec![header];
    match &snapshot.display {
        ListDisplay::Loading => out.push("  Loading...".to_string()),
        ListDisplay::Empty(message) => out.push(format!("  {message}")),
        ListDisplay::Entries(rows) => {
            for DisplayEntry { entry, favourited } in rows {
                let heart = if *favourited { "♥" } else { " " };
                let id = entry.id().unwrap_or("?");
                out.push(format!("  {heart} {} [{id}]", entry.name));
            }
        }
    }

    if !snapshot.page_buttons.is_empty() {
        let buttons: Vec<String> = snapshot
            .page_buttons
            .iter()
            .map(|&p| {
                if p == snapshot.page {
                    format!("[{p}]")
                } else {
                    p.to_string()
                }
            })
            .collect();
        let prev = if snapshot.show_prev { "< " } else { "" };
        let next = if snapshot.show_next { " >" } else { "" };
        out.push(format!("[PAGES] {prev}{}{next}", buttons.join(" ")));
    }
    out.join("\n")
}

/// Text block for a detail screen.
pub fn format_detail(snapshot: &DetailSnapshot) -> String {
    let heart = match snapshot.favourited {
        Some(true) => " ♥",
        Some(false) => " ♡",
        None => "",
    };
    let mut out = vec![
        format!("[DETAIL] {}{heart}", snapshot.title),
        format!("  Image: {}", snapshot.image_url),
    ];
    for fact in &snapshot.facts {
        out.push(format!("  {}: {}", fact.label, fact.value));
    }
    for group in &snapshot.groups {
        out.push(format!("[{}]", group.title.to_uppercase()));
        if group.entries.is_empty() {
            out.push(format!("  {}", group.empty_message));
        }
        for entry in &group.entries {
            match &entry.reference {
                Some(r) => out.push(format!("  {} [{}/{}]", entry.name, r.collection.path(), r.id)),
                None => out.push(format!("  {}", entry.name)),
            }
        }
    }
    if snapshot.failed > 0 {
        out.push(format!("[WARN] {} related entries could not be loaded", snapshot.failed));
    }
    out.join("\n")
}

fn format_favourites(browser: &HeadlessBrowser) -> String {
    let mut out = Vec::new();
    for kind in [FavoriteKind::Character, FavoriteKind::Starship] {
        out.push(format!("[FAVORITES] {}", kind.collection().title()));
        let records = browser.favourites(kind);
        if records.is_empty() {
            out.push("  (none)".to_string());
        }
        for record in records {
            out.push(format!("  {} [{}]", record.name, record.id));
        }
    }
    out.join("\n")
}

/// Run one command. Returns `false` when the session should end.
async fn execute(browser: &mut HeadlessBrowser, command: Command) -> Result<bool, BrowserError> {
    match command {
        Command::List { collection, page } => {
            println!("{}", format_list(&browser.list(collection, page).await?));
        }
        Command::Search(text) => println!("{}", format_list(&browser.search(&text).await?)),
        Command::Next => println!("{}", format_list(&browser.next_page().await?)),
        Command::Prev => println!("{}", format_list(&browser.prev_page().await?)),
        Command::FavoritesOnly(on) => {
            println!("{}", format_list(&browser.favorites_only(on).await?));
        }
        Command::Show(target) => println!("{}", format_detail(&browser.show(&target).await?)),
        Command::Favourite { kind, record, on } => {
            let name = record.name.clone();
            let changed = browser.set_favourite(kind, record, on).await?;
            match (changed, on) {
                (true, true) => println!("[FAV] Added {name}"),
                (true, false) => println!("[FAV] Removed {name}"),
                (false, true) => println!("[FAV] {name} is already a favorite"),
                (false, false) if browser.favourites_contain_name(kind, &name) => {
                    println!("[FAV] {name} is a favorite under a different id")
                }
                (false, false) => println!("[FAV] {name} is not a favorite"),
            }
        }
        Command::Favourites => println!("{}", format_favourites(browser)),
        Command::Save => {
            if browser.browser().save_favorites().await? {
                println!("[SAVED] Favorites written");
            } else {
                println!("[ERROR] No favorites file configured (use --favorites <FILE>)");
            }
        }
        Command::Help => println!("[HELP]\n{HELP}"),
        Command::Quit => {
            println!("Goodbye!");
            return Ok(false);
        }
    }
    Ok(true)
}

/// Run the browser in headless mode.
pub async fn run_headless(config: BrowserConfig) -> Result<(), BrowserError> {
    let mut browser = HeadlessBrowser::open(config).await?;

    println!("=== Holocron Headless Mode ===");
    println!("API: {}", browser.browser().client().base_url());
    println!();
    println!("Commands:");
    println!("{HELP}");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Ok(command) => match execute(&mut browser, command).await {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => println!("[ERROR] {e}"),
            },
            Err(message) => println!("[ERROR] {message}"),
        }
        stdout.flush().ok();
    }

    Ok(())
}
