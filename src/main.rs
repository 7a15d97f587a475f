use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;
use weatlab_core::{similarity, BiasReport, BiasTest, Error, DEFAULT_TOP_ATTRIBUTES};
use weatlab_storage::{read_glove, Workspace, WorkspaceConfig};

/// Word-embedding similarity search and association bias tests
#[derive(Parser, Debug)]
#[command(name = "weatlab")]
#[command(version, about = "Word-embedding similarity and bias measurement", long_about = None)]
struct Args {
    /// Directory holding persisted stores (*.wvs)
    #[arg(long, default_value = "models", global = true)]
    models_dir: PathBuf,

    /// Directory holding word lists (*.txt, one word per line)
    #[arg(long, default_value = "wordlists", global = true)]
    wordlists_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a GloVe text file into a persisted store
    Convert {
        /// GloVe-format text file
        input: PathBuf,
        /// Store name to save under
        name: String,
    },
    /// Print the words most similar to a query word
    Similar {
        store: String,
        word: String,
        /// Number of results to print
        count: usize,
    },
    /// Run a WEAT-style association test
    Weat {
        store: String,
        target1: String,
        target2: String,
        attr1: String,
        attr2: String,
        /// Attribute words to list per target group
        #[arg(long, default_value_t = DEFAULT_TOP_ATTRIBUTES)]
        top: usize,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available stores
    Models,
    /// List available word lists
    Wordlists,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let workspace = Workspace::new(WorkspaceConfig {
        models_dir: args.models_dir,
        wordlists_dir: args.wordlists_dir,
    });
    debug!("Models directory: {:?}", workspace.config().models_dir);
    debug!("Word lists directory: {:?}", workspace.config().wordlists_dir);

    let result = match args.command {
        Command::Convert { input, name } => convert(&workspace, &input, &name),
        Command::Similar { store, word, count } => similar(&workspace, &store, &word, count),
        Command::Weat {
            store,
            target1,
            target2,
            attr1,
            attr2,
            top,
            json,
        } => weat(
            &workspace,
            &store,
            [target1.as_str(), target2.as_str(), attr1.as_str(), attr2.as_str()],
            top,
            json,
        ),
        Command::Models => print_names(workspace.list_models()?),
        Command::Wordlists => print_names(workspace.list_wordlists()?),
    };

    if let Err(err) = &result {
        print_options(&workspace, err);
    }
    result
}

fn convert(workspace: &Workspace, input: &Path, name: &str) -> anyhow::Result<()> {
    let (store, summary) =
        read_glove(input).with_context(|| format!("failed to read {}", input.display()))?;
    let path = workspace.save_store(name, &store)?;
    println!(
        "Saved {} words ({} dimensions, {} lines skipped) to {}",
        summary.entries,
        summary.dim,
        summary.skipped,
        path.display()
    );
    Ok(())
}

fn similar(workspace: &Workspace, store_name: &str, word: &str, count: usize) -> anyhow::Result<()> {
    let store = workspace.load_store(store_name)?;
    let results = similarity::most_similar_to_word(&store, word, count)?;

    println!("Printing {} most similar words to {}\n", count, word);
    println!("{:>10} {:>10}", "word", "score");
    println!("{} {}", "-".repeat(10), "-".repeat(10));
    for r in &results {
        println!("{:>10} {:>10.3}", r.word, r.score);
    }
    Ok(())
}

fn weat(
    workspace: &Workspace,
    store_name: &str,
    lists: [&str; 4],
    top: usize,
    json: bool,
) -> anyhow::Result<()> {
    let store = workspace.load_store(store_name)?;
    let [t1, t2, a1, a2] = lists;

    let target1 = workspace.resolve_wordlist(t1, &store)?;
    let target2 = workspace.resolve_wordlist(t2, &store)?;
    let attr1 = workspace.resolve_wordlist(a1, &store)?;
    let attr2 = workspace.resolve_wordlist(a2, &store)?;

    let report = BiasTest::new(&store, &target1, &target2, &attr1, &attr2)
        .with_top_n(top)
        .run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, top);
    }
    info!("Bias test finished");
    Ok(())
}

fn print_report(report: &BiasReport, top: usize) {
    let (t1, t2) = (&report.target1.name, &report.target2.name);
    let (a1, a2) = (&report.attr1.name, &report.attr2.name);

    for (name, ranked) in [
        (t1, &report.top_attributes_target1),
        (t2, &report.top_attributes_target2),
    ] {
        println!();
        println!("Top {} most similar attribute words to {}:", top, name);
        for r in ranked {
            println!("\t{}", r.word);
        }
    }

    println!();
    println!("Calculating effect size.  The score is between +2.0 and -2.0.");
    println!("Positive scores indicate that {} is more associated with {} than {}.", t1, a1, t2);
    println!("Or, equivalently, {} is more associated with {} than {}.", t2, a2, t1);
    println!("Negative scores have the opposite relationship.");
    println!("Scores close to 0 indicate little to no effect.");
    println!();
    println!("Effect size: {:.2}", report.effect_size);
}

fn print_names(names: Vec<String>) -> anyhow::Result<()> {
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

/// After a bad store or word-list name, tell the user what exists
fn print_options(workspace: &Workspace, err: &anyhow::Error) {
    let options = match err.downcast_ref::<Error>() {
        Some(Error::StoreNotFound(_)) => workspace.list_models(),
        Some(Error::WordListNotFound(_)) => workspace.list_wordlists(),
        _ => return,
    };
    if let Ok(options) = options {
        eprintln!("Options are: {}", options.join(", "));
    }
}
