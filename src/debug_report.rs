use bangroute::{Defaults, ParsedQuery, Resolution, ResolutionReport};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Print a human readable trace of one resolution to stdout.
pub fn print_report(report: &ResolutionReport, defaults: &Defaults, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Resolving: \"{}\"", report.query), ansi::CYAN)));

    let Some(parsed) = &report.parsed else {
        println!("\n{}", palette.dim("  Empty query: nothing to resolve"));
        println!();
        return;
    };

    println!("\n{}", palette.paint("━━━ Parse ━━━", ansi::GRAY));
    println!("  {} {}", palette.dim("marker:"), palette.paint(describe_parsed(parsed), ansi::BLUE));
    if let Some(clean) = &report.clean_query {
        println!("  {} {}", palette.dim("clean query:"), palette.paint(format!("\"{clean}\""), ansi::YELLOW));
    }

    println!("\n{}", palette.paint("━━━ Selection ━━━", ansi::GRAY));
    if let Some(rule) = report.rule {
        println!("  {} {}", palette.dim("rule:"), palette.paint(rule.to_string(), ansi::BLUE));
    }
    if let Some(token) = &report.looked_up {
        println!("  {} {}", palette.dim("token:"), palette.paint(token, ansi::CYAN));
    }
    println!(
        "  {} {}  {} {}",
        palette.dim("defaults:"),
        palette.paint(&defaults.directive, ansi::CYAN),
        palette.dim("│ question:"),
        palette.paint(&defaults.question_directive, ansi::CYAN),
    );
    match &report.entry {
        Some(entry) => {
            let name = entry.name.as_deref().unwrap_or("-");
            println!(
                "  {} {} {} {}",
                palette.dim("entry:"),
                palette.bold(palette.paint(name, ansi::GREEN)),
                palette.dim("│"),
                palette.paint(&entry.url_template, ansi::YELLOW),
            );
        }
        None => println!("  {}", palette.dim("entry: ✗ not in catalog")),
    }

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    match &report.resolution {
        Resolution::Redirect(url) => println!("  {} {}", palette.paint("→", ansi::GREEN), palette.bold(url)),
        Resolution::NoMatchingDirective => println!("  {}", palette.paint("✗ no matching directive", ansi::YELLOW)),
        Resolution::NoQuery => println!("  {}", palette.dim("✗ no query")),
    }

    let t = &report.timings;
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Parse: {}  │  Select: {}  │  Sanitize: {}  │  Build: {}",
        palette.paint(format!("{:?}", t.total), ansi::GREEN),
        palette.dim(format!("{:?}", t.parse)),
        palette.dim(format!("{:?}", t.select)),
        palette.dim(format!("{:?}", t.sanitize)),
        palette.dim(format!("{:?}", t.build)),
    );
    println!();
}

fn describe_parsed(parsed: &ParsedQuery) -> String {
    match parsed {
        ParsedQuery::NoMarker => "none".to_string(),
        ParsedQuery::BareMarker => "bare \"?\"".to_string(),
        ParsedQuery::Directive(token) => format!("\"?{token}\""),
    }
}
