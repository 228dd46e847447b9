use beak::{prompt, Candidate, ListEntry, PromptConfig, Question, Validation};
use clap::Parser;
use color_eyre::eyre::Result;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Default branch offered when enter is pressed on an empty line
    #[clap(long, short, default_value = "main")]
    default: String,
}

const BRANCHES: &[&str] = &[
    "main",
    "develop",
    "feature/nesting",
    "feature/migration",
    "fix/moulting",
];

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config = PromptConfig::builder()
        .message("Branch to check out?")
        .source(|_answers, term| async move {
            let term = term.unwrap_or_default();
            Ok(BRANCHES
                .iter()
                .copied()
                .filter(|b| b.starts_with(&term))
                .map(ListEntry::from)
                .collect())
        })
        .suggest_only()
        .default_value(&args.default)
        .validate(|candidate, _| match candidate {
            Candidate::Input(line) if line.contains(' ') => {
                Validation::error("branch names cannot contain spaces")
            }
            _ => Validation::Valid,
        })
        .build()?;

    let answers = prompt([Question::new("branch", config).boxed()]).await?;
    println!("checking out {}", answers["branch"]);
    Ok(())
}
