// src/bin/main.rs
use cards_core::persistence::{load_from_disk, save_to_disk};
use cards_core::{Card, Collection, SearchEngine};
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::execute;
use std::io::{stdin, stdout, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

const COLLECTION_PATH: &str = "cards.bin";
const SEARCH_LIMIT: usize = 10;

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

fn main() {
    let mut collection =
        load_from_disk(Path::new(COLLECTION_PATH)).unwrap_or_else(|_| Collection::new());
    let engine = SearchEngine::default();
    let mut status = format!("loaded {} cards", collection.len());

    loop {
        print_ui(&collection, &status);

        let mut input = String::new();
        if stdin().read_line(&mut input).is_err() {
            break;
        }
        let line = input.trim();

        match line {
            "exit" => break,
            "" => {
                status.clear();
            }
            s if s.starts_with(":add ") => {
                status = match s[5..].split_once("::") {
                    Some((word, definition)) => {
                        let card = Card::new(
                            collection.next_card_id(),
                            word.trim(),
                            definition.trim(),
                            now_millis(),
                        );
                        let word = card.word.clone();
                        match collection.insert_card(card) {
                            Some(_) => format!("added '{}'", word),
                            None => format!("card id collision for '{}'", word),
                        }
                    }
                    None => "usage: :add WORD :: DEFINITION".to_string(),
                };
            }
            s if s.starts_with(":rm ") => {
                status = match s[4..].trim().parse() {
                    Ok(id) => match collection.remove_card(id) {
                        Some(card) => format!("removed '{}'", card.word),
                        None => format!("no card {}", id),
                    },
                    Err(_) => "usage: :rm ID".to_string(),
                };
            }
            s if s.starts_with(":mv ") => {
                let rest = s[4..].trim();
                status = match rest.split_once(' ') {
                    Some((id, word)) => match id.parse() {
                        Ok(id) => match collection.rename_card(id, word.trim()) {
                            Some(_) => format!("renamed card {} to '{}'", id, word.trim()),
                            None => format!("no card {}", id),
                        },
                        Err(_) => "usage: :mv ID WORD".to_string(),
                    },
                    None => "usage: :mv ID WORD".to_string(),
                };
            }
            query => {
                print_results(&engine, &collection, query);
                status.clear();
                continue;
            }
        }
    }

    println!("\nSaving collection...");
    if let Err(e) = save_to_disk(&collection, Path::new(COLLECTION_PATH)) {
        eprintln!("[ERROR] Could not save collection: {}", e);
    } else {
        println!("Collection saved to '{}'", COLLECTION_PATH);
    }
}

fn print_ui(collection: &Collection, status: &str) {
    let mut out = stdout();
    execute!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetForegroundColor(Color::Cyan),
        Print("Korean Card Search\n"),
        ResetColor,
    )
    .unwrap();

    println!(
        "{} cards, {} distinct words",
        collection.len(),
        collection.homonyms().live_len()
    );
    println!("type a query (try '!', '#', or a partial syllable), or:");
    println!("  :add WORD :: DEFINITION | :rm ID | :mv ID WORD | exit");
    if !status.is_empty() {
        println!("> {}", status);
    }
    print!("? ");
    out.flush().unwrap();
}

fn print_results(engine: &SearchEngine, collection: &Collection, query: &str) {
    let results = engine.search(collection, query, SEARCH_LIMIT);

    let mut out = stdout();
    if results.is_empty() {
        println!("no results");
    }
    for result in results {
        execute!(
            out,
            SetForegroundColor(Color::Green),
            Print(&result.word),
            ResetColor,
        )
        .unwrap();
        println!("  {:?}  {}", result.numbers, result.url);
        for definition in &result.definitions {
            println!("    - {}", definition);
        }
    }

    println!("(enter to continue)");
    let mut pause = String::new();
    let _ = stdin().read_line(&mut pause);
}
