use std::path::PathBuf;

use clap::{command, value_parser, Arg};
use context::Context;
use generator::{extract::DEFAULT_EXCERPT_LENGTH, generate};
use renderer::generate_renderer;

mod context;
mod generator;
mod renderer;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args([
            Arg::new("root_dir")
                .help("Repository root. Paths in the generated module are relative to it.")
                .value_parser(value_parser!(PathBuf))
                .default_value("."),
            Arg::new("article_dir")
                .help("Directory path of articles, relative to root_dir")
                .value_parser(value_parser!(PathBuf))
                .default_value("blog/articles"),
            Arg::new("out_file")
                .help("Path of the generated module, relative to root_dir. Existing file will be overwritten.")
                .value_parser(value_parser!(PathBuf))
                .default_value("blog/config/articles-config.js"),
            Arg::new("template")
                .long("template")
                .help("Handlebars template of the generated module. Available fields: `articles_json` (the JSON array), `count` and `articles`.")
                .value_parser(value_parser!(PathBuf)),
            Arg::new("excerpt_length")
                .long("excerpt-length")
                .help("Maximum number of characters of an excerpt [default: 180]")
                .value_parser(value_parser!(u64).range(1..)),
        ])
        .get_matches();

    // all of these have default values
    let root_dir: &PathBuf = matches.get_one("root_dir").unwrap();
    let article_dir: &PathBuf = matches.get_one("article_dir").unwrap();
    let out_file: &PathBuf = matches.get_one("out_file").unwrap();
    let excerpt_length = match matches.get_one::<u64>("excerpt_length") {
        Some(n) => usize::try_from(*n)?,
        None => DEFAULT_EXCERPT_LENGTH,
    };
    let template: Option<&PathBuf> = matches.get_one("template");

    let handlebars = generate_renderer(template.map(PathBuf::as_path))?;
    let ctx = Context::new(
        root_dir,
        article_dir,
        out_file,
        excerpt_length,
        handlebars,
    )?;

    let count = generate(&ctx)?;
    println!("Wrote {} with {} articles.", ctx.out_file.display(), count);

    Ok(())
}
