mod debug_report;

use bangroute::{
    Catalog, Defaults, FilePreferences, Resolution, parse, query_from_url, resolve_verbose_with, resolve_with,
    search_template,
};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_NO_QUERY: i32 = 3;
const EXIT_NO_MATCH: i32 = 4;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(EXIT_USAGE);
        }
    };

    match run(config) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn run(config: CliConfig) -> bangroute::Result<i32> {
    if let Some(origin) = &config.template_origin {
        println!("{}", search_template(origin));
        return Ok(0);
    }

    let loaded;
    let catalog: &Catalog = match &config.catalog_path {
        Some(path) => {
            loaded = Catalog::from_path(path)?;
            &loaded
        }
        None => Catalog::bundled(),
    };

    if config.list {
        for entry in catalog {
            println!("{:<12} {:<24} {}", entry.token, entry.name.as_deref().unwrap_or("-"), entry.url_template);
        }
        return Ok(0);
    }

    let prefs = match &config.prefs_path {
        Some(path) => FilePreferences::load(path)?,
        None => FilePreferences::default_path().map(FilePreferences::load_or_default).unwrap_or_default(),
    };
    let defaults = Defaults::from_store(&prefs)
        .with_overrides(config.default_bang.as_deref(), config.default_question.as_deref());
    log::debug!("defaults: {defaults:?}");

    let query = match &config.source {
        QuerySource::Text(text) => text.clone(),
        QuerySource::RequestUrl(url) => query_from_url(url)?.unwrap_or_default(),
        QuerySource::Stdin => read_stdin_input()?,
    };

    let resolution = if config.explain {
        let report = resolve_verbose_with(&query, catalog, &defaults);
        debug_report::print_report(&report, &defaults, config.color);
        report.resolution
    } else {
        resolve_with(&query, catalog, &defaults)
    };

    let code = match resolution {
        Resolution::Redirect(url) => {
            if !config.explain {
                println!("{url}");
            }
            0
        }
        Resolution::NoQuery => {
            eprintln!("no query to resolve");
            EXIT_NO_QUERY
        }
        Resolution::NoMatchingDirective => {
            let parsed = parse(query.trim());
            match parsed.directive_token() {
                Some(token) => eprintln!("unknown directive '?{token}'"),
                None => eprintln!(
                    "default directive '{}' is not in the catalog",
                    if parsed.has_directive_marker() { &defaults.question_directive } else { &defaults.directive }
                ),
            }
            EXIT_NO_MATCH
        }
    };

    Ok(code)
}

enum QuerySource {
    Text(String),
    RequestUrl(String),
    Stdin,
}

struct CliConfig {
    source: QuerySource,
    catalog_path: Option<PathBuf>,
    prefs_path: Option<PathBuf>,
    default_bang: Option<String>,
    default_question: Option<String>,
    template_origin: Option<String>,
    explain: bool,
    list: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut source: Option<QuerySource> = None;
    let mut catalog_path = None;
    let mut prefs_path = None;
    let mut default_bang = None;
    let mut default_question = None;
    let mut template_origin = None;
    let mut explain = false;
    let mut list = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    fn set_source(slot: &mut Option<QuerySource>, value: QuerySource) -> Result<(), String> {
        if slot.is_some() {
            return Err("error: query provided multiple times".to_string());
        }
        *slot = Some(value);
        Ok(())
    }

    fn value_of(flag: &str, value: Option<String>) -> Result<String, String> {
        value.ok_or_else(|| format!("error: {flag} expects a value"))
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("bangroute {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--explain" => explain = true,
            "--list" => list = true,
            "--query" | "-q" => set_source(&mut source, QuerySource::Text(value_of(&arg, args.next())?))?,
            "--url" => set_source(&mut source, QuerySource::RequestUrl(value_of(&arg, args.next())?))?,
            "--catalog" => catalog_path = Some(PathBuf::from(value_of(&arg, args.next())?)),
            "--prefs" => prefs_path = Some(PathBuf::from(value_of(&arg, args.next())?)),
            "--default-bang" => default_bang = Some(value_of(&arg, args.next())?),
            "--default-question" => default_question = Some(value_of(&arg, args.next())?),
            "--template" => template_origin = Some(value_of(&arg, args.next())?),
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.is_empty() {
                    set_source(&mut source, QuerySource::Text(rest))?;
                }
                break;
            }
            _ if arg.starts_with("--query=") => {
                set_source(&mut source, QuerySource::Text(arg.trim_start_matches("--query=").to_string()))?
            }
            _ if arg.starts_with("--url=") => {
                set_source(&mut source, QuerySource::RequestUrl(arg.trim_start_matches("--url=").to_string()))?
            }
            _ if arg.starts_with("--catalog=") => {
                catalog_path = Some(PathBuf::from(arg.trim_start_matches("--catalog=")));
            }
            _ if arg.starts_with("--prefs=") => {
                prefs_path = Some(PathBuf::from(arg.trim_start_matches("--prefs=")));
            }
            _ if arg.starts_with("--default-bang=") => {
                default_bang = Some(arg.trim_start_matches("--default-bang=").to_string());
            }
            _ if arg.starts_with("--default-question=") => {
                default_question = Some(arg.trim_start_matches("--default-question=").to_string());
            }
            _ if arg.starts_with("--template=") => {
                template_origin = Some(arg.trim_start_matches("--template=").to_string());
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_source(&mut source, QuerySource::Text(rest))?;
                break;
            }
        }
    }

    let source = match source {
        Some(source) => source,
        None if list || template_origin.is_some() => QuerySource::Text(String::new()),
        None => QuerySource::Stdin,
    };

    Ok(CliConfig {
        source,
        catalog_path,
        prefs_path,
        default_bang,
        default_question,
        template_origin,
        explain,
        list,
        color,
    })
}

fn read_stdin_input() -> bangroute::Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|source| bangroute::Error::Io { path: "<stdin>".into(), source })?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "bangroute {version}

Resolve a bang-style search query into a redirect URL.

Usage:
  bangroute [OPTIONS] [--] <query...>
  bangroute [OPTIONS] --query <text>
  bangroute [OPTIONS] --url <request-url>

A query may carry a directive: '?' followed by a token, anywhere in the text
(e.g. '?w albert einstein'). A bare '?' selects the default question directive;
no '?' selects the default directive.

Options:
  -q, --query <text>          Query to resolve. If omitted, reads remaining args
                              or stdin when no args are provided.
  --url <request-url>         Take the query from the 'q' parameter of a URL.
  --catalog <path>            JSON catalog to use instead of the bundled one.
  --prefs <path>              Preferences TOML file.
                              Default: {prefs}
  --default-bang <token>      Directive for queries without '?'. Default: {bang}
  --default-question <token>  Directive for a bare '?'. Default: {question}
  --explain                   Print a trace of every resolution stage.
  --list                      List the catalog and exit.
  --template <origin>         Print the search-engine URL to register for a
                              deployment at <origin> and exit.
  --color                     Force ANSI color output.
  --no-color                  Disable ANSI color output.
  -h, --help                  Show this help message.
  -V, --version               Print version information.

Environment:
  RUST_LOG                    Log filter (e.g. 'debug'). Default: warn

Exit codes:
  0  Redirect URL printed.
  1  Catalog, preferences or URL error.
  2  Invalid arguments.
  3  Empty query.
  4  No catalog entry for the selected directive.
",
        version = env!("CARGO_PKG_VERSION"),
        prefs = FilePreferences::default_path().map_or_else(|| "(none)".to_string(), |p| p.display().to_string()),
        bang = bangroute::FALLBACK_DEFAULT_BANG,
        question = bangroute::FALLBACK_DEFAULT_QUESTION,
    )
}
