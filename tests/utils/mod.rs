use std::fs;

use promptsub::Replacer;

/// Read sample prompts into string
pub fn read_sample_file() -> String {
    fs::read_to_string("tests/sample_prompts.txt").unwrap()
}

/// Read sample prompt lines and filter junk
pub fn read_sample_file_lines() -> Vec<String> {
    read_sample_file()
        .lines()
        .filter(|&l| !l.trim().is_empty())
        .map(|s| s.to_owned())
        .collect()
}

/// Replacer with every bundled rule file, in name order
pub fn bundled_replacer() -> Replacer {
    let mut paths: Vec<_> = fs::read_dir("rules")
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut replacer = Replacer::new();
    for path in paths {
        let text = fs::read_to_string(&path).unwrap();
        replacer
            .add_rule(&text)
            .unwrap_or_else(|err| panic!("parsing rules {}: {err}", path.display()));
    }

    replacer
}
