//! jsshape CLI
//!
//! Prints the shape of the bootstrapped standard library, one member per
//! line, starting from the global object or from a dotted property path.

use std::sync::Once;

use jsshape::{Engine, EngineConfig, ObjectId, Value};

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` asks for engine diagnostics.
///
/// `RUST_LOG=jsshape=debug` shows bootstrap milestones, `jsshape=trace`
/// every call and coercion, and `jsshape=warn` refused prototypes and
/// scope links that close a lookup cycle.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Silent unless RUST_LOG is set
        if std::env::var_os("RUST_LOG").is_some() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

fn print_usage() {
    eprintln!("Usage: jsshape [options] [path]");
    eprintln!();
    eprintln!("Lists the members of a standard library object. `path` is a dotted");
    eprintln!("property path from the global object, e.g. `Array.prototype`.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --legacy                  Reproduce the legacy call and ToObject results");
    eprintln!("  -h, --help                Show this message");
}

fn main() {
    init_tracing();

    let mut config = EngineConfig::new();
    let mut path = None;

    for arg in std::env::args().skip(1) {
        if arg == "-h" || arg == "--help" {
            print_usage();
            return;
        } else if arg == "--legacy" {
            config = EngineConfig::legacy();
        } else if arg.starts_with('-') {
            eprintln!("error: unknown option `{arg}`");
            print_usage();
            std::process::exit(1);
        } else if path.is_none() {
            path = Some(arg);
        } else {
            eprintln!("error: unexpected argument `{arg}`");
            std::process::exit(1);
        }
    }

    let engine = Engine::with_config(config);
    let target = match path.as_deref() {
        None => engine.global_object(),
        Some(path) => match resolve_path(&engine, path) {
            Ok(target) => target,
            Err(message) => {
                eprintln!("error: {message}");
                std::process::exit(1);
            }
        },
    };

    let object = engine.object(target);
    println!(
        "{} : {}",
        path.as_deref().unwrap_or("<global>"),
        engine.type_id(Some(object.as_value()))
    );
    for (name, value) in object.members() {
        println!("  {name:<28} {}", describe(&engine, value));
    }
}

/// Follow a dotted property path from the global object.
fn resolve_path(engine: &Engine, path: &str) -> Result<ObjectId, String> {
    let mut current = engine.global_object();
    for segment in path.split('.') {
        let value = engine
            .object(current)
            .property(segment)
            .ok_or_else(|| format!("`{segment}` not found in `{path}`"))?;
        current = value
            .object_id()
            .ok_or_else(|| format!("`{segment}` is a {}, not an object", value.kind().name()))?;
    }
    Ok(current)
}

/// One-line shape of a member: its type, plus arity and result for functions.
fn describe(engine: &Engine, value: Value) -> String {
    let type_name = engine.type_id(Some(value));
    let Some(function) = value.as_function().and_then(|id| engine.function(id)) else {
        return type_name.to_owned();
    };
    let arguments: Vec<_> = function
        .arguments()
        .map(|hint| engine.type_id(Some(hint)))
        .collect();
    format!(
        "{type_name}({}) -> {}",
        arguments.join(", "),
        engine.type_id(Some(function.return_value()))
    )
}
