//! mdtemplate's main application entry point.
//! Parses arguments, loads configuration and registers the Markdown units
//! into one template namespace.

use mdtemplate::{
    cli::{get_args, Args},
    config::{load_config, load_config_file},
    engine::TemplateSet,
    error::{default_error_handler, Result},
    preprocessor::Preprocessor,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration. Warnings stay visible without --verbose.
    env_logger::Builder::new()
        .filter_level(if args.verbose { log::LevelFilter::Trace } else { log::LevelFilter::Warn })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Builds the namespace the way the arguments ask for.
///
/// With `--root` the namespace exists before the first unit, so a unit of
/// the same name becomes its root content. Without it the first unit roots it.
fn build_namespace(preprocessor: &Preprocessor, args: &Args) -> Result<TemplateSet> {
    match (&args.root, &args.name) {
        (Some(root), Some(name)) => {
            let mut namespace = TemplateSet::new(root.as_str());
            preprocessor.parse_file(&mut namespace, name, &args.pattern)?;
            Ok(namespace)
        }
        (Some(root), None) => {
            let mut namespace = TemplateSet::new(root.as_str());
            preprocessor.parse_glob(&mut namespace, &args.pattern)?;
            Ok(namespace)
        }
        (None, Some(name)) => {
            let mut namespace = TemplateSet::new(name.as_str());
            preprocessor.parse_file(&mut namespace, name, &args.pattern)?;
            Ok(namespace)
        }
        (None, None) => preprocessor.glob_new(&args.pattern),
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration
/// 2. Registers every unit into one namespace
/// 3. Reports template calls that name undefined templates
/// 4. Optionally prints the generated sources
fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => load_config(std::env::current_dir()?)?,
    };
    let preprocessor = Preprocessor::from_config(&config);
    let namespace = build_namespace(&preprocessor, &args)?;

    namespace.check_references(args.strict)?;

    if args.print {
        for template in namespace.templates() {
            println!("--- {} ---\n{}\n", template.name(), template.source());
        }
    }

    println!(
        "Registered {} template(s) in '{}': {}",
        namespace.len(),
        namespace.name(),
        namespace.defined_templates()
    );
    Ok(())
}
