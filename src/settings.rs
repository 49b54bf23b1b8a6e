use crate::{replacer::Replacer, store::RuleStore};

/// Host side switches: whether substitution runs and which stored rules to load, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
pub struct Settings {
    #[cfg_attr(feature = "deserialize", serde(default))]
    pub enabled: bool,
    #[cfg_attr(feature = "deserialize", serde(default))]
    pub rules: Vec<String>,
}

impl Settings {
    pub fn new(enabled: bool, rules: Vec<String>) -> Self {
        Self { enabled, rules }
    }

    /// Splits comma separated rule names, dropping blanks
    pub fn parse_rule_list(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// Loads every configured rule from store in order. Rules that fail to parse are skipped
pub fn load_replacer<S: RuleStore + ?Sized>(settings: &Settings, store: &S) -> Replacer {
    let mut replacer = Replacer::new();

    for name in &settings.rules {
        if let Err(err) = replacer.add_rule(&store.get(name)) {
            log::warn!("skipping rule {name}: {err}");
        }
    }

    replacer
}

/// Rewrites prompts in place if enabled. Prompts that fail to parse are left untouched
pub fn process_batch<S: RuleStore + ?Sized>(
    settings: &Settings,
    store: &S,
    prompts: &mut [String],
) {
    if !settings.enabled {
        return;
    }

    let replacer = load_replacer(settings, store);
    if replacer.is_empty() {
        return;
    }

    for prompt in prompts.iter_mut() {
        match replacer.replace(prompt) {
            Ok(replaced) => *prompt = replaced.into_owned(),
            Err(err) => log::warn!("keeping prompt {prompt:?}: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{load_replacer, process_batch, Settings};
    use crate::store::{MemoryStore, RuleStore};

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();

        store.put("cats", "rule: cats\ntag: cat\nfor: feline").unwrap();
        store
            .put("quality", "rule: q\nkeyword: masterpiece\nfor: <lora:q:0.5>")
            .unwrap();
        store.put("broken", "rule: b\nre: (").unwrap();
        store
    }

    #[test]
    fn rule_list() {
        assert_eq!(
            Settings::parse_rule_list(" cats, ,quality,,"),
            ["cats", "quality"]
        );
        assert!(Settings::parse_rule_list("").is_empty());
    }

    #[test]
    fn disabled_untouched() {
        let settings = Settings::new(false, vec!["cats".to_owned()]);
        let mut prompts = vec!["cat,dog".to_owned()];

        process_batch(&settings, &store(), &mut prompts);

        assert_eq!(prompts, ["cat,dog"]);
    }

    #[test]
    fn rules_applied_in_order() {
        let settings = Settings::new(true, Settings::parse_rule_list("cats,quality"));
        let mut prompts = vec![
            "cat, masterpiece".to_owned(),
            "dog,bird".to_owned(),
            "cat <lora:x:bad>".to_owned(),
        ];

        process_batch(&settings, &store(), &mut prompts);

        assert_eq!(
            prompts,
            [
                "<lora:q:0.500>feline, masterpiece",
                "dog, bird",
                "cat <lora:x:bad>"
            ]
        );
    }

    #[test]
    fn broken_and_missing_rules_skipped() {
        let settings = Settings::new(true, Settings::parse_rule_list("broken, missing, cats"));

        let replacer = load_replacer(&settings, &store());

        assert_eq!(replacer.entries().len(), 1);
        assert_eq!(replacer.entries()[0].name, "cats");
    }

    #[test]
    fn no_rules_untouched() {
        let settings = Settings::new(true, Vec::new());
        let mut prompts = vec!["a,b".to_owned()];

        process_batch(&settings, &store(), &mut prompts);

        assert_eq!(prompts, ["a,b"]);
    }
}
