// Example: Basic Configuration Session
//
// Builds a development configuration with one entry point and a custom
// alias, lets finalize() back-fill the remaining defaults, and prints the
// record as the JSON the bundler would consume.

use packconf::utils::Logger;
use packconf::ConfigBuilder;
use std::path::PathBuf;

fn main() -> packconf::Result<()> {
    Logger::init();

    let mut builder = ConfigBuilder::new(PathBuf::from("."), true);
    builder
        .set_mode(true)
        .set_source_map(true)
        .set_watch(true)
        .add_entry("main", ["./src/index.js", "./src/style.scss"])
        .add_path_alias("@app", "./src")
        .set_output(None, None, true);

    let record = builder.finalize();
    println!("{}", record.to_json_pretty()?);

    Ok(())
}
