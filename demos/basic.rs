use std::time::Duration;

use beak::{prompt, Choice, ListEntry, PromptConfig, Question, Separator};
use clap::Parser;
use color_eyre::eyre::Result;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Rows to show per page
    #[clap(long, short, default_value_t = 7)]
    page_size: usize,

    /// Write a debug log to the default log directory
    #[clap(long, action)]
    log: bool,
}

const DABBLERS: &[&str] = &["Mallard", "Teal", "Wigeon", "Pintail", "Shoveler"];
const DIVERS: &[&str] = &["Eider", "Goldeneye", "Pochard", "Scaup", "Smew"];

fn search(term: &str) -> Vec<ListEntry<String>> {
    let term = term.to_lowercase();

    let mut entries: Vec<ListEntry<String>> = vec![Separator::titled(" Dabbling ").into()];
    entries.extend(
        DABBLERS
            .iter()
            .copied()
            .filter(|name| name.to_lowercase().contains(&term))
            .map(|name| Choice::new(name.to_string()).into()),
    );
    entries.push(Separator::titled(" Diving ").into());
    entries.extend(
        DIVERS
            .iter()
            .copied()
            .filter(|name| name.to_lowercase().contains(&term))
            .map(|name| {
                let choice = Choice::new(name.to_string());
                if name == "Smew" {
                    choice.disabled_because("rarely seen").into()
                } else {
                    choice.describe("dives for its dinner").into()
                }
            }),
    );
    entries
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    if args.log {
        beak::logging::initialize_logging(&None)?;
    }

    let config = PromptConfig::builder()
        .message("Which duck are you after?")
        .source(|_answers, term| async move {
            // pretend we went to a backend for this
            tokio::time::sleep(Duration::from_millis(150)).await;
            Ok(search(term.as_deref().unwrap_or_default()))
        })
        .default_value("Teal")
        .page_size(args.page_size)
        .build()?;

    let answers = prompt([Question::new("duck", config).boxed()]).await?;
    println!("you went with {}", answers["duck"]);
    Ok(())
}
