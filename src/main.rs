use std::{
    fs::{self, File},
    io::{self, BufRead},
    path::PathBuf,
};

use clap::Parser;

use promptsub::{
    settings::{self, Settings},
    store::{DirStore, RuleStore},
    Replacer,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Rule file path, can be repeated. Loaded in given order
    #[arg(short, long = "rules")]
    rules: Vec<PathBuf>,

    /// Directly provided rule text, loaded after rule files
    #[arg(long)]
    rule_string: Vec<String>,

    /// Directory with named rules
    #[arg(long, default_value = "rule")]
    store: PathBuf,

    /// Rule name from store, loaded after rule strings
    #[arg(short, long)]
    name: Vec<String>,

    /// Settings file (ron). Takes rule names and enable switch from it instead
    #[arg(long, conflicts_with_all = ["rules", "rule_string", "name"])]
    settings: Option<PathBuf>,

    /// File with prompts, one per line. Reads from stdin if unset
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn read_lines(file: Option<PathBuf>) -> Result<Vec<String>, String> {
    let lines: io::Result<Vec<String>> = match file {
        Some(filename) => {
            let file = File::open(filename).map_err(|err| format!("reading input file: {err}"))?;
            io::BufReader::new(file).lines().collect()
        }
        None => io::stdin().lines().collect(),
    };

    lines.map_err(|err| format!("reading line: {err}"))
}

fn load_replacer(args: &Args) -> Result<Replacer, String> {
    let mut replacer = Replacer::new();

    for path in &args.rules {
        let text = fs::read_to_string(path)
            .map_err(|err| format!("reading rule file {}: {err}", path.display()))?;
        replacer
            .add_rule(&text)
            .map_err(|err| format!("parsing rule file {}: {err}", path.display()))?;
    }

    for text in &args.rule_string {
        replacer
            .add_rule(text)
            .map_err(|err| format!("parsing rule string: {err}"))?;
    }

    if !args.name.is_empty() {
        let store =
            DirStore::open(&args.store).map_err(|err| format!("opening rule store: {err}"))?;

        for name in &args.name {
            replacer
                .add_rule(&store.get(name))
                .map_err(|err| format!("parsing rule {name}: {err}"))?;
        }
    }

    Ok(replacer)
}

fn main() -> Result<(), String> {
    env_logger::init();

    let args = Args::parse();

    if let Some(settings_path) = &args.settings {
        let settings_string = fs::read_to_string(settings_path)
            .map_err(|err| format!("reading settings file: {err}"))?;
        let settings = ron::from_str::<Settings>(&settings_string)
            .map_err(|err| format!("parsing settings: {err}"))?;
        let store =
            DirStore::open(&args.store).map_err(|err| format!("opening rule store: {err}"))?;

        let mut prompts = read_lines(args.file)?;
        settings::process_batch(&settings, &store, &mut prompts);

        for prompt in prompts {
            println!("{prompt}");
        }

        return Ok(());
    }

    let replacer = load_replacer(&args)?;

    for line in read_lines(args.file)? {
        match replacer.replace(&line) {
            Ok(replaced) => println!("{replaced}"),
            Err(err) => {
                log::warn!("keeping line as is: {err}");
                println!("{line}");
            }
        }
    }

    Ok(())
}
