use packconf::{ConfigBuilder, DefaultCategory, Fallback, Mode};
use serde_json::json;
use std::path::PathBuf;

fn session(dev: bool) -> ConfigBuilder {
    ConfigBuilder::new(PathBuf::from("/project"), dev)
}

#[test]
fn test_fresh_dev_session_scenario() {
    let mut builder = session(false);
    builder.set_mode(true).add_entry("main", ["./src/index.js"]);

    let record = builder.finalize().clone();

    assert_eq!(record.mode, Some(Mode::Development));
    assert_eq!(
        record.entry["main"],
        [PathBuf::from("/project/src/index.js")]
    );

    for category in DefaultCategory::ORDER {
        assert!(
            builder.is_default_applied(category),
            "category {} should be applied after finalize",
            category
        );
    }

    // One stylesheet-extraction plugin, dev filename convention.
    assert_eq!(record.plugins.len(), 1);
    assert_eq!(record.plugins[0]["plugin"], json!("mini-css-extract-plugin"));
    assert_eq!(
        record.plugins[0]["options"]["filename"],
        json!("../../css/base/[name].css")
    );

    // Default stylesheet, script and asset rules are all present:
    // css, sass, less, js, images, fonts.
    assert_eq!(record.module.rules.len(), 6);
    let tests: Vec<&str> = record
        .module
        .rules
        .iter()
        .map(|rule| rule["test"].as_str().unwrap())
        .collect();
    assert!(tests.contains(&r"\.css$"));
    assert!(tests.contains(&r"\.js$"));
    assert!(tests.contains(&r"\.(png|jpg|jpeg|gif|tiff)$"));

    // Default fallbacks and aliases.
    assert_eq!(record.resolve.fallback["crypto"], Fallback::Flag(false));
    assert_eq!(record.resolve.fallback["buffer"], Fallback::Flag(false));
    assert_eq!(record.resolve.alias.len(), 9);
    assert_eq!(
        record.resolve.alias["@public"],
        PathBuf::from("/project/public")
    );
}

#[test]
fn test_production_session_uses_hashed_names() {
    let mut builder = session(false);
    builder.set_mode(false).set_output(None, None, true);

    let record = builder.finalize().clone();

    assert_eq!(record.mode, Some(Mode::Production));
    assert_eq!(
        record.output.as_ref().unwrap().filename,
        "[name].[contenthash].min.js"
    );
    assert_eq!(
        record.plugins[0]["options"]["filename"],
        json!("../../css/min/[name].[contenthash].min.css")
    );
    // Watch ignore default is development-only.
    assert!(record.watch_options.is_none());
}

#[test]
fn test_caller_customization_survives_finalize() {
    let mut builder = session(true);
    builder
        .set_watch(true)
        .set_source_map(true)
        .set_stats_error_details(true)
        .add_path_alias("@app", "./app")
        .add_fallback([("crypto", "crypto-browserify")])
        .add_plugin(json!({"plugin": "my-plugin"}));

    let record = builder.finalize().clone();

    assert_eq!(record.watch, Some(true));
    assert!(record.stats.error_details);
    // Caller alias kept alongside the nine defaults.
    assert_eq!(record.resolve.alias["@app"], PathBuf::from("/project/app"));
    assert_eq!(record.resolve.alias.len(), 10);
    // The default fallback merge runs later and overwrites same-name keys,
    // exactly like a later add_fallback call would.
    assert_eq!(record.resolve.fallback["crypto"], Fallback::Flag(false));
    // Caller plugin first, default extraction plugin appended after it.
    assert_eq!(record.plugins[0]["plugin"], json!("my-plugin"));
    assert_eq!(record.plugins.len(), 2);
}

#[test]
fn test_marked_categories_are_not_backfilled() {
    let mut builder = session(true);
    builder
        .mark_default_applied(DefaultCategory::PathAlias)
        .mark_default_applied(DefaultCategory::Fallbacks);

    let record = builder.finalize().clone();

    assert!(record.resolve.alias.is_empty());
    assert!(record.resolve.fallback.is_empty());
    // Everything else still ran.
    assert_eq!(record.plugins.len(), 1);
    assert_eq!(record.module.rules.len(), 6);
}

#[test]
fn test_finalize_twice_structurally_identical() {
    let mut builder = session(true);
    builder
        .set_mode(true)
        .add_entry("main", ["./src/index.js", "./src/style.scss"])
        .set_output(None, None, true);

    let first = builder.finalize().clone();
    let rules_after_first = first.module.rules.len();
    let second = builder.finalize().clone();

    assert_eq!(first, second);
    assert_eq!(second.module.rules.len(), rules_after_first);
}

#[test]
fn test_two_sessions_are_independent() {
    let mut first = session(true);
    first.add_entry("a", ["./a.js"]);
    first.finalize();

    let mut second = session(false);
    let record = second.finalize().clone();

    assert!(record.entry.is_empty());
    assert_eq!(record.plugins.len(), 1);
}
