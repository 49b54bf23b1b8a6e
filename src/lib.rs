//! Prompt substitution rules.
//!
//! # Table of contents
//! * [Description](#description)
//! * [Prompt](#prompt)
//! * [Rules](#rules)
//! * [Hosting](#hosting)
//! * [CLI tool](#cli-tool)
//! * [Feature flags](#feature-flags)
//!
//! # Description
//!
//! Rewrites comma separated generation prompts using a list of rules. A rule either swaps a
//! matching tag for other content or only adds extra networks (`<lora:name:0.8>` style
//! annotations) when a pattern shows up. Weighting syntax like `(word:1.2)` or
//! `[from:to:0.5]` is kept intact.
//!
//! # Prompt
//!
//! [`Prompt`] splits text into [`Token`]s and pulls extra networks out of them. Repeated
//! networks collapse into one with the highest weight. When printed, networks go first:
//!
//! ```rust
//! use promptsub::Prompt;
//!
//! let prompt = Prompt::new("1girl,   <lora:foo:0.5> looking at viewer <lora:foo:0.8>").unwrap();
//!
//! assert_eq!(prompt.to_string(), "<lora:foo:0.800>1girl, looking at viewer");
//! ```
//!
//! # Rules
//!
//! Rules are written in a line based format, see [`grammar`]. [`Replacer`] runs every rule in
//! order against the same prompt, so one rule can match output of another:
//!
//! ```rust
//! use promptsub::Replacer;
//!
//! let mut replacer = Replacer::new();
//! replacer
//!     .add_rule(
//!         r#"
//! rule: cats
//! tag: cat
//! for: (feline:1.1)
//!
//! rule: quality
//! keyword: masterpiece, best quality
//! for: <lora:quality:1.0>
//! "#,
//!     )
//!     .expect("rules did not parse");
//!
//! assert_eq!(
//!     replacer.replace("masterpiece, cat, cat").unwrap(),
//!     "<lora:quality:1.000>masterpiece, (feline:1.1), cat"
//! );
//! ```
//!
//! Without any rules [`Replacer::replace`] returns input untouched.
//!
//! # Hosting
//!
//! [`settings::process_batch`] rewrites a batch of prompts using rules loaded by name from a
//! [`RuleStore`] such as [`DirStore`]. Broken rules and prompts are skipped with a warning.
//!
//! # CLI tool
//!
//! You can run CLI tool by enabling `cli` feature: `cargo run --features=cli -- --help`.
//!
//! `echo "cat, night" | cargo run --features=cli -- -r rules/animals.txt`
//!
//! # Feature flags
//!
//! Name | Description | Default?
//! ---|---|---
//! `deserialize` | enables deserialization for [`Settings`] | yes
//! `cli` | required to run CLI tool | no
//!
//! [`Token`]: crate::token::Token
//! [`RuleStore`]: crate::store::RuleStore
//! [`DirStore`]: crate::store::DirStore
//! [`Settings`]: crate::settings::Settings

mod entry;
mod extra_network;
mod lexer;
mod prompt;
mod replacer;

pub mod grammar;
pub mod settings;
pub mod store;
pub mod token;

pub use entry::{Entry, Trigger};
pub use extra_network::{ExtraNetwork, ParseError};
pub use lexer::tokenize;
pub use prompt::Prompt;
pub use replacer::Replacer;
