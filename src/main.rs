use std::process::ExitCode;

use binder_layout::{
    binder::{
        LoadStatus,
        Recovery,
    },
    logging,
    Binder,
    BinderConfig,
    BinderState,
    Card,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "binder", about = "Lay out a card set as binder pages")]
struct Cli {
    /// Set code to load, e.g. FIN, MH3, DMU. Defaults to the configured set.
    set_code: Option<String>,

    /// Binder page to print, starting at 1.
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Print cards whose name or collector number matches instead of a page.
    #[arg(long)]
    search: Option<String>,

    /// Write the current settings to the config file, with SET as the default set if given.
    #[arg(long)]
    save_config: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let mut config = BinderConfig::load();
    if cli.save_config {
        if let Some(set_code) = &cli.set_code {
            config.default_set_code = set_code.to_uppercase();
        }
        match config.save() {
            Ok(path) => println!("Saved settings to {}", path.display()),
            Err(e) => {
                eprintln!("Error saving settings: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    let binder = match Binder::from_config(&config) {
        Ok(binder) => binder,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let set_code = cli.set_code.unwrap_or_else(|| config.default_set_code.clone());
    if let Err(e) = binder.load_set(&set_code).await {
        eprintln!("Failed to load {}: {}", set_code, e);
    }

    let state = binder.snapshot();
    if let LoadStatus::Failed { recovery: Recovery::Fallback, .. } = state.status {
        eprintln!("Showing sample cards instead.");
    }

    match cli.search {
        Some(query) => print_search(&state, &query),
        None => print_page(&state, binder.go_to_page(cli.page.saturating_sub(1))),
    }

    match state.status {
        LoadStatus::Ready => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn describe(card: &Card) -> String {
    let mut line = format!("#{} {} [{}] {}", card.collector_number, card.name, card.rarity, card.type_line);
    if card.is_double_faced {
        line.push_str(" • DFC");
    }
    let caption = card.variant_caption();
    if !caption.is_empty() {
        line.push_str(&format!(" ({caption})"));
    }
    line
}

fn print_page(state: &BinderState, page_index: usize) {
    println!("{} ({}) | {} cards", state.set_name, state.set_code, state.cards().len());
    if state.total_pages() == 0 {
        println!("No cards to show.");
        return;
    }

    println!("Page {} of {}", page_index + 1, state.total_pages());
    for (address, card) in state.store.page(page_index) {
        let label = format!("{:>5} {}", address.side(), address.slot_index() + 1);
        match card {
            Some(card) => println!("  {label}: {}", describe(card)),
            None => println!("  {label}: Empty Slot"),
        }
    }

    let counts: Vec<String> =
        state.rarity_counts().iter().map(|(rarity, count)| format!("{rarity}: {count}")).collect();
    println!("Rarities: {}", counts.join(", "));
}

fn print_search(state: &BinderState, query: &str) {
    let found = state.find_cards(query);
    println!("{} matches for \"{}\" in {}", found.len(), query, state.set_name);
    for card in found {
        println!("  {}", describe(card));
    }
}
