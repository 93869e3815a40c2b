use once_cell::unsync::OnceCell;
use serde_json::{json, Value};
use std::env;
use std::path::PathBuf;

use crate::defaults::{DefaultCategory, DefaultRegistry};
use crate::models::{ConfigRecord, Devtool, Fallback, Mode, Output, WatchOptions};
use crate::utils::{paths, Logger};

const ENV_MODE_VAR: &str = "NODE_ENV";
const ENV_MODE_DEV: &str = "dev";

const PUBLIC_PATH: &str = "/resources/";
const BUILD_ROOT: &str = "public/resources/build";

const DEV_OUTPUT_DIR: &str = "js/base/";
const PROD_OUTPUT_DIR: &str = "js/min/";
const DEV_FILENAME: &str = "[name].js";
const PROD_FILENAME: &str = "[name].[contenthash].min.js";
const DEV_CSS_FILENAME: &str = "../../css/base/[name].css";
const PROD_CSS_FILENAME: &str = "../../css/min/[name].[contenthash].min.css";

/// Fluent builder for one bundler configuration session.
///
/// The builder owns its record and default registry; two sessions never
/// share state. Mutators chain and never fail: input that cannot be used is
/// discarded with a debug log and the chain continues. `finalize` back-fills
/// every category the caller did not touch, exactly once, in the fixed
/// `DefaultCategory::ORDER`.
pub struct ConfigBuilder {
    record: ConfigRecord,
    defaults: DefaultRegistry,
    root: PathBuf,
    dev: bool,
    // Shared across the css, sass and less rules; computed once per session.
    css_loader_chain: OnceCell<Vec<Value>>,
}

impl ConfigBuilder {
    /// Start a fresh session rooted at `root`.
    ///
    /// `dev` selects which mode-dependent defaults later populators pick;
    /// it does not write the record's `mode` field (use [`set_mode`] for
    /// that).
    ///
    /// [`set_mode`]: ConfigBuilder::set_mode
    pub fn new(root: PathBuf, dev: bool) -> Self {
        Logger::session_start(
            &root.display().to_string(),
            Mode::from_dev_flag(dev).as_str(),
        );

        Self {
            record: ConfigRecord::default(),
            defaults: DefaultRegistry::new(),
            root,
            dev,
            css_loader_chain: OnceCell::new(),
        }
    }

    /// Start a session from the process environment: the working directory
    /// as root, `NODE_ENV == "dev"` selecting development mode.
    pub fn from_env() -> Self {
        let dev = env::var(ENV_MODE_VAR)
            .map(|value| value == ENV_MODE_DEV)
            .unwrap_or(false);
        let root = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self::new(root, dev)
    }

    pub fn is_dev(&self) -> bool {
        self.dev
    }

    pub fn is_prod(&self) -> bool {
        !self.dev
    }

    /// Read access to the record as assembled so far.
    pub fn record(&self) -> &ConfigRecord {
        &self.record
    }

    /// Pick the first value in development mode, the second in production.
    fn pick<T>(&self, dev_value: T, prod_value: T) -> T {
        if self.dev {
            dev_value
        } else {
            prod_value
        }
    }

    /// Set the record's mode and switch which mode-dependent defaults the
    /// session picks from here on.
    pub fn set_mode(&mut self, is_dev: bool) -> &mut Self {
        self.dev = is_dev;
        self.record.mode = Some(Mode::from_dev_flag(is_dev));
        self
    }

    /// Enable source maps ("source-map" kind) or disable them outright.
    pub fn set_source_map(&mut self, enabled: bool) -> &mut Self {
        self.record.devtool = Some(if enabled {
            Devtool::SourceMap
        } else {
            Devtool::Disabled
        });
        self
    }

    pub fn set_watch(&mut self, enabled: bool) -> &mut Self {
        self.record.watch = Some(enabled);
        self
    }

    /// Add a pattern to ignore while watching. Duplicates and empty
    /// patterns are discarded.
    pub fn add_watch_ignore(&mut self, pattern: &str) -> &mut Self {
        if pattern.is_empty() {
            Logger::discarded_input("add_watch_ignore", "empty pattern");
            return self;
        }

        let options = self
            .record
            .watch_options
            .get_or_insert_with(WatchOptions::default);
        if !options.ignored.iter().any(|existing| existing == pattern) {
            options.ignored.push(pattern.to_string());
        }
        self
    }

    /// Add one or more paths to the named entry.
    ///
    /// Paths are resolved against the session root; a path already present
    /// for the entry is kept once, in first-seen order. Empty names or
    /// paths are discarded without touching the rest of the call.
    pub fn add_entry<I, S>(&mut self, name: &str, entry_paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if name.is_empty() {
            Logger::discarded_input("add_entry", "empty entry name");
            return self;
        }

        for entry_path in entry_paths {
            let entry_path = entry_path.as_ref();
            if entry_path.is_empty() {
                Logger::discarded_input("add_entry", "empty path");
                continue;
            }

            let resolved = paths::resolve_lexical(&self.root, entry_path);
            let bucket = self.record.entry.entry(name.to_string()).or_default();
            if !bucket.contains(&resolved) {
                bucket.push(resolved);
            }
        }
        self
    }

    /// Set the output section. Omitted directory or filename fall back to
    /// the session mode's convention: stable human-readable names in
    /// development, content-hashed names in production.
    pub fn set_output(
        &mut self,
        dirname: Option<&str>,
        filename: Option<&str>,
        clean: bool,
    ) -> &mut Self {
        let dirname = match dirname {
            Some(dir) if !dir.is_empty() => dir,
            _ => self.pick(DEV_OUTPUT_DIR, PROD_OUTPUT_DIR),
        };
        let filename = match filename {
            Some(name) if !name.is_empty() => name,
            _ => self.pick(DEV_FILENAME, PROD_FILENAME),
        };

        let build_dir = format!("{}/{}", BUILD_ROOT, dirname);
        self.record.output = Some(Output {
            path: paths::resolve_lexical(&self.root, &build_dir),
            filename: filename.to_string(),
            public_path: PUBLIC_PATH.to_string(),
            clean,
        });
        self
    }

    /// Map an alias name to a directory, resolved against the session root.
    /// Re-adding an existing alias overwrites it.
    pub fn add_path_alias(&mut self, name: &str, dirname: &str) -> &mut Self {
        if name.is_empty() || dirname.is_empty() {
            Logger::discarded_input("add_path_alias", "empty name or directory");
            return self;
        }

        let resolved = paths::resolve_lexical(&self.root, dirname);
        self.record.resolve.alias.insert(name.to_string(), resolved);
        self
    }

    /// Append an opaque plugin descriptor. Only structured objects are
    /// accepted; anything else is discarded.
    pub fn add_plugin(&mut self, descriptor: Value) -> &mut Self {
        if !descriptor.is_object() {
            Logger::discarded_input("add_plugin", "descriptor is not an object");
            return self;
        }
        self.record.plugins.push(descriptor);
        self
    }

    /// Append an opaque module rule descriptor. Rules keep insertion order;
    /// nothing is ever removed or reordered.
    pub fn add_module_rule(&mut self, rule: Value) -> &mut Self {
        if !rule.is_object() {
            Logger::discarded_input("add_module_rule", "rule is not an object");
            return self;
        }
        self.record.module.rules.push(rule);
        self
    }

    /// Merge fallback mappings; a later key overwrites an earlier one of
    /// the same name.
    pub fn add_fallback<I, K, V>(&mut self, mapping: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Fallback>,
    {
        for (name, value) in mapping {
            self.record
                .resolve
                .fallback
                .insert(name.into(), value.into());
        }
        self
    }

    pub fn set_stats_error_details(&mut self, enabled: bool) -> &mut Self {
        self.record.stats.error_details = enabled;
        self
    }

    /// Mark a category applied so `finalize` skips its populator.
    pub fn mark_default_applied(&mut self, category: DefaultCategory) -> &mut Self {
        if self.defaults.mark(category) {
            Logger::default_applied(category.name());
        }
        self
    }

    pub fn is_default_applied(&self, category: DefaultCategory) -> bool {
        self.defaults.is_applied(category)
    }

    /// Attempt to mark a category from inside its populator. Returns
    /// `false` when the category already ran (or was suppressed by the
    /// caller), in which case the populator must not mutate the record.
    fn begin_default(&mut self, category: DefaultCategory) -> bool {
        let first = self.defaults.mark(category);
        if first {
            Logger::default_applied(category.name());
        }
        first
    }

    /// The shared loader chain for stylesheet rules: extraction, css-loader,
    /// url resolution, postcss with autoprefixer. Computed once per session
    /// and reused by content for the css, sass and less rules.
    pub fn default_css_loader(&self) -> &[Value] {
        self.css_loader_chain.get_or_init(|| {
            vec![
                json!("mini-css-extract-plugin/loader"),
                json!({
                    "loader": "css-loader",
                    "options": {
                        "importLoaders": 1,
                        "url": true,
                    },
                }),
                json!({
                    "loader": "resolve-url-loader",
                }),
                json!({
                    "loader": "postcss-loader",
                    "options": {
                        "postcssOptions": {
                            "plugins": [["autoprefixer", {}]],
                        },
                    },
                }),
            ]
        })
    }

    /// Default plugin set: one stylesheet-extraction plugin with the
    /// session mode's filename convention.
    pub fn apply_default_plugins(&mut self) -> &mut Self {
        if !self.begin_default(DefaultCategory::Plugins) {
            return self;
        }

        let filename = self.pick(DEV_CSS_FILENAME, PROD_CSS_FILENAME);
        self.add_plugin(json!({
            "plugin": "mini-css-extract-plugin",
            "options": {
                "filename": filename,
            },
        }))
    }

    /// Ignore dependency directories while watching, development only.
    pub fn apply_default_ignore_watch(&mut self) -> &mut Self {
        if !self.begin_default(DefaultCategory::IgnoreWatch) {
            return self;
        }

        if self.is_dev() {
            self.add_watch_ignore("**/node_modules");
        }
        self
    }

    /// Marks the entry category without populating anything: no default
    /// entry set exists.
    pub fn apply_default_entry(&mut self) -> &mut Self {
        self.begin_default(DefaultCategory::Entry);
        self
    }

    /// Default path aliases for the project's resource tree.
    pub fn apply_default_aliases(&mut self) -> &mut Self {
        if !self.begin_default(DefaultCategory::PathAlias) {
            return self;
        }

        self.add_path_alias(
            "@co/resources",
            "./core/Controllers/Controller/Templating/Admin/Views/resources",
        )
        .add_path_alias(
            "@co/css",
            "./core/Controllers/Controller/Templating/Admin/Views/resources/css",
        )
        .add_path_alias(
            "@co/js",
            "./core/Controllers/Controller/Templating/Admin/Views/resources/js",
        )
        .add_path_alias(
            "@co/img",
            "./core/Controllers/Controller/Templating/Admin/Views/resources/img",
        )
        .add_path_alias(
            "@co/form-default-colors",
            "./core/Controllers/Controller/Templating/Admin/Views/resources/css/colors/form.default.colors",
        )
        .add_path_alias(
            "@co/form-script",
            "./core/Controllers/Controller/Templating/Admin/Views/resources/css/colors/form.script",
        )
        .add_path_alias("@public", "./public")
        .add_path_alias("@resources", "./public/resources")
        .add_path_alias("@assets", "./assets")
    }

    /// Default stylesheet rule: plain CSS through the shared loader chain.
    pub fn apply_default_rules(&mut self) -> &mut Self {
        if !self.begin_default(DefaultCategory::Rules) {
            return self;
        }

        let chain = self.default_css_loader().to_vec();
        self.add_module_rule(json!({
            "test": r"\.css$",
            "use": chain,
        }))
    }

    /// Default fallbacks: stub out node built-ins the browser bundle never
    /// needs.
    pub fn apply_default_fallbacks(&mut self) -> &mut Self {
        if !self.begin_default(DefaultCategory::Fallbacks) {
            return self;
        }

        self.add_fallback([("crypto", false), ("buffer", false)])
    }

    /// Sass/scss rule: the shared loader chain plus sass-loader.
    pub fn apply_sass_rule(&mut self) -> &mut Self {
        if !self.begin_default(DefaultCategory::SassRule) {
            return self;
        }

        let mut chain = self.default_css_loader().to_vec();
        chain.push(json!("sass-loader"));
        self.add_module_rule(json!({
            "test": r"\.sass$|\.scss$",
            "use": chain,
        }))
    }

    /// Less rule: the shared loader chain plus less-loader.
    pub fn apply_less_rule(&mut self) -> &mut Self {
        if !self.begin_default(DefaultCategory::LessRule) {
            return self;
        }

        let mut chain = self.default_css_loader().to_vec();
        chain.push(json!("less-loader"));
        self.add_module_rule(json!({
            "test": r"\.less$",
            "use": chain,
        }))
    }

    /// Script rule: babel with preset-env, dependency directories excluded.
    pub fn apply_js_rule(&mut self) -> &mut Self {
        if !self.begin_default(DefaultCategory::JsRule) {
            return self;
        }

        self.add_module_rule(json!({
            "test": r"\.js$",
            "exclude": r"(node_modules|bower_components)",
            "use": {
                "loader": "babel-loader",
                "options": {
                    "presets": ["@babel/preset-env"],
                },
            },
        }))
    }

    /// Asset rules: images and fonts inlined below 8 KiB, emitted beside
    /// the build otherwise.
    pub fn apply_file_url_rule(&mut self) -> &mut Self {
        if !self.begin_default(DefaultCategory::FileUrlRule) {
            return self;
        }

        self.add_module_rule(json!({
            "test": r"\.(png|jpg|jpeg|gif|tiff)$",
            "use": [{
                "loader": "url-loader",
                "options": {
                    "limit": 8192,
                    "publicPath": "/resources/build/images/",
                    "outputPath": "../../images/",
                    "name": "[name].[ext]",
                    "esModule": false,
                },
            }],
        }));

        self.add_module_rule(json!({
            "test": r"\.(otf|ttf|svg|eot|woff|woff2)$",
            "use": [{
                "loader": "url-loader",
                "options": {
                    "limit": 8192,
                    "publicPath": "/resources/build/fonts/",
                    "outputPath": "../../fonts/",
                    "name": "[name].[ext]",
                    "esModule": false,
                },
            }],
        }))
    }

    /// Back-fill every category the session has not touched, in the fixed
    /// order, then hand back the finished record. A second call finds every
    /// category marked and mutates nothing.
    pub fn finalize(&mut self) -> &ConfigRecord {
        for category in DefaultCategory::ORDER {
            if self.defaults.is_applied(category) {
                continue;
            }
            match category {
                DefaultCategory::Plugins => self.apply_default_plugins(),
                DefaultCategory::IgnoreWatch => self.apply_default_ignore_watch(),
                DefaultCategory::Entry => self.apply_default_entry(),
                DefaultCategory::PathAlias => self.apply_default_aliases(),
                DefaultCategory::Rules => self.apply_default_rules(),
                DefaultCategory::Fallbacks => self.apply_default_fallbacks(),
                DefaultCategory::SassRule => self.apply_sass_rule(),
                DefaultCategory::LessRule => self.apply_less_rule(),
                DefaultCategory::JsRule => self.apply_js_rule(),
                DefaultCategory::FileUrlRule => self.apply_file_url_rule(),
            };
        }
        &self.record
    }
}
