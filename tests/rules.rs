mod utils;

use promptsub::Prompt;
use utils::{bundled_replacer, read_sample_file_lines};

#[test]
fn bundled_rules_work() {
    let replacer = bundled_replacer();
    let lines = read_sample_file_lines();

    assert!(!replacer.is_empty());
    assert!(!lines.is_empty());

    for line in &lines {
        let replaced = replacer
            .replace(line)
            .unwrap_or_else(|err| panic!("replacing {line:?}: {err}"));

        // output is always a valid prompt again
        Prompt::new(&replaced).unwrap_or_else(|err| panic!("reparsing {replaced:?}: {err}"));
    }
}

#[test]
fn bundled_rule_order() {
    let replacer = bundled_replacer();
    let names: Vec<_> = replacer.entries().iter().map(|e| e.name.as_str()).collect();

    assert_eq!(
        names,
        ["cats", "dogs", "fur", "quality", "resolution", "sketch"]
    );
}

#[test]
fn bundled_rules_expected_output() {
    let replacer = bundled_replacer();

    let cases = [
        (
            "1girl, looking at viewer, cat",
            "1girl, looking at viewer, (cat:1.1), whiskers",
        ),
        (
            "masterpiece, best quality, 1girl,   looking   at viewer",
            "<lora:quality:0.800>masterpiece, best quality, 1girl, looking at viewer",
        ),
        (
            "<lora:dogs:0.9> dog, fluffy fur",
            "<lora:dogs:0.900><lora:fur_detail:0.400>(dog:1.1), fluffy fur",
        ),
        (
            "sketch, 8k, [fantasy:cyberpunk:16] landscape",
            "<lora:detail:0.500>[sketch:photo:0.4], 8k, [fantasy:cyberpunk:16] landscape",
        ),
        (
            r"\(artist\), {red|blue} hair, (smile:1.2)",
            r"\(artist\), {red|blue} hair, (smile:1.2)",
        ),
        ("a <lora:unclosed", "a <lora:unclosed"),
    ];

    for (input, expected) in cases {
        assert_eq!(replacer.replace(input).unwrap(), expected, "for {input:?}");
    }
}

#[test]
fn normalized_prompts_stay_normalized() {
    for line in read_sample_file_lines() {
        if line.contains('<') {
            continue;
        }

        let once = Prompt::new(&line).unwrap().to_string();
        let twice = Prompt::new(&once).unwrap().to_string();

        assert_eq!(once, twice, "for {line:?}");
    }
}
