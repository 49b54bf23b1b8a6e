#![cfg(feature = "deserialize")]

use promptsub::{
    settings::{process_batch, Settings},
    store::{DirStore, RuleStore},
};

#[test]
fn settings_from_ron() {
    let settings = ron::from_str::<Settings>(r#"(enabled: true, rules: ["quality", "animals"])"#)
        .expect("parsing settings");

    assert_eq!(
        settings,
        Settings::new(true, vec!["quality".to_owned(), "animals".to_owned()])
    );
}

#[test]
fn settings_from_json_defaults() {
    let settings = serde_json::from_str::<Settings>("{}").expect("parsing settings");

    assert_eq!(settings, Settings::default());
    assert!(!settings.enabled);
}

#[test]
fn batch_with_bundled_store() {
    let store = DirStore::open("rules").unwrap();
    assert!(store.names().contains(&"animals".to_owned()));

    let settings = Settings::new(true, Settings::parse_rule_list("quality, animals, missing"));
    let mut prompts = vec![
        "cat, masterpiece".to_owned(),
        "dog <lora:dogs:oops>".to_owned(),
    ];

    process_batch(&settings, &store, &mut prompts);

    assert_eq!(
        prompts,
        [
            "<lora:quality:0.800>(cat:1.1), whiskers, masterpiece",
            "dog <lora:dogs:oops>",
        ]
    );
}
